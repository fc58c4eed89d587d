//! Pure transforms that turn a raw [`Forecast`](crate::Forecast) payload into
//! the exact series a chart renders.
//!
//! The two transforms are independent: [`resample::resample_daily`] buckets
//! hourly samples into calendar days, [`window::hourly_window`] cuts a
//! fixed-length slice out of the hourly series anchored at a reference
//! instant. Both are synchronous, allocation-only computations with no I/O
//! and no logging; callers own the returned values outright.

pub mod resample;
pub mod window;
