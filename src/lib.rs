//! Simple to use cli for analyzing screen time logs. A log is a JSON document mapping each day to
//! the seconds spent in every application, and the cli answers questions about it either through
//! an interactive menu or through one-shot commands.
//!

pub mod analysis;
pub mod cli;
pub mod storage;
pub mod utils;
