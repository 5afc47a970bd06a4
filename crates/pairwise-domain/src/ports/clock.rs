//! Clock Port

/// Source of wall-clock time in epoch milliseconds
///
/// Injected so pruning windows can be tested without sleeping.
pub trait ClockProvider: Send + Sync + std::fmt::Debug {
    /// Current time in epoch milliseconds
    fn now_millis(&self) -> i64;
}
