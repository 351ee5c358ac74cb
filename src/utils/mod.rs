//! Utility modules for the taskboard client.
//!
//! - [`datetime`] - Due-date parsing, canonical encoding and human-readable formatting

pub mod datetime;
