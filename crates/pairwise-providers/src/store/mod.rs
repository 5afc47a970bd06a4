//! Progress Store Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryProgressStore`] | Local | Single-process store, also the test fake |
//! | [`RedisProgressStore`] | Distributed | Redis-backed, shared by every server process |

pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;

pub use memory::InMemoryProgressStore;
#[cfg(feature = "store-redis")]
pub use redis::RedisProgressStore;
