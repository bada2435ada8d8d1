use crate::traits::Timestamp;

/// Return true if at least `interval` ms elapsed since `last_timestamp`.
/// A clock behind `last_timestamp` counts as no elapsed time.
pub fn is_due(now: Timestamp, last_timestamp: Timestamp, interval: Timestamp) -> bool {
    now.saturating_sub(last_timestamp) >= interval
}
