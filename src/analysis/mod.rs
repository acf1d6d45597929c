//! Aggregation over a loaded [log::UsageLog]. Everything in here is pure: queries take the log by
//! reference and never modify it.

pub mod log;
pub mod query;
pub mod seconds;
