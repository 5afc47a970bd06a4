//! Application services shared by use cases

/// Reference-counted fan-out of progress update notifications
pub mod subscriptions;

pub use subscriptions::{UpdateHandler, UpdateSubscription, UpdateSubscriptionManager};
