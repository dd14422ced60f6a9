//! Command implementations for studybuddy.
//!
//! Each command returns the text to print, already formatted for the
//! requested output format.

mod completions;
mod config;
mod focus;

pub use completions::completions;
pub use config::config;
pub use focus::{focus, session_config, TimerOverrides};
