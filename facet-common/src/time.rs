/// Time types used by the shared animation clock.
///
/// Re-exported from one place so every crate steps transitions against the
/// same notion of time.
pub use std::time::{Duration, Instant};
