//! Toast notifications.
//!
//! Short-lived, non-blocking messages shown to the user (for example when a
//! completed interval could not be saved). Anything that performs user-facing
//! commands gets a [`Notifier`] injected; the terminal screen drains a
//! [`ToastQueue`] into its status line.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of toasts kept before the oldest is dropped.
const MAX_TOASTS: usize = 16;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// Neutral information
    Info,
    /// Something went well
    Success,
    /// Something degraded but the app carries on
    Warning,
    /// An operation failed
    Error,
}

impl ToastLevel {
    /// Icon shown in front of the message.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    #[must_use]
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    /// Stamp the toast with `created_at` instead of the wall clock.
    #[must_use]
    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Whether the toast is older than `ttl` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.created_at) > ttl
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.icon(), self.message)
    }
}

/// Sink for user-facing notifications.
pub trait Notifier {
    /// Show a toast.
    fn notify(&mut self, toast: Toast);
}

/// Shared single-threaded toast queue.
///
/// Clones share the same queue, so one handle can be given to a
/// [`Notifier`] consumer while the renderer keeps another.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Rc<RefCell<VecDeque<Toast>>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent toast that has not expired.
    #[must_use]
    pub fn latest(&self, now: DateTime<Utc>, ttl: Duration) -> Option<Toast> {
        self.inner
            .borrow()
            .back()
            .filter(|t| !t.is_expired(now, ttl))
            .cloned()
    }

    /// Drop toasts older than `ttl`.
    pub fn prune(&self, now: DateTime<Utc>, ttl: Duration) {
        self.inner.borrow_mut().retain(|t| !t.is_expired(now, ttl));
    }

    /// Remove and return every queued toast, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Toast> {
        self.inner.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, toast: Toast) {
        let mut queue = self.inner.borrow_mut();
        if queue.len() == MAX_TOASTS {
            queue.pop_front();
        }
        queue.push_back(toast);
    }
}
