//! Feature implementations for studybuddy.
//!
//! - Focus timer state machine, history and reports
//! - Toast notifications

pub mod focus;
pub mod notify;
