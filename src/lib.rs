//! studybuddy - A Pomodoro focus timer for study sessions
//!
//! This crate provides the focus session state machine, its persistence and
//! reporting, and a terminal front end for running it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StudyError;
pub use features::focus::{FocusMachine, FocusService, Phase, SessionConfig, TimerState};
