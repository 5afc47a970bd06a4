//! Value objects and the stored wire format

mod completion;
/// JSON representation of the snapshot as held by the shared store
pub mod wire;

pub use completion::CompletionEvent;
pub use wire::{EntryWire, SnapshotWire, decode_snapshot, encode_snapshot};
