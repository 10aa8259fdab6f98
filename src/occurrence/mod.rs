//! Occurrence domain rules
//!
//! - [`classification`] - label to signed-effect mapping per entry flow
//! - [`duration`] - HH:MM range to duration with validity checks

pub mod classification;
pub mod duration;

pub use classification::{EntryFlow, UnknownLabel, classify, is_regularization, options};
pub use duration::{DurationError, calculate, minutes_since_midnight};
