//! Cancellation and deadlines for a decode call.
//!
//! A [`Context`] is checked before every backend lookup. Once its token is
//! cancelled or its deadline has passed, the decode stops with
//! [`BackendError::Cancelled`] or [`BackendError::DeadlineExceeded`] and no
//! further lookups are issued.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::BackendError;

/// Cancellation token plus optional deadline.
///
/// Clones share the same token, so cancelling any clone cancels all of them.
#[derive(Clone, Debug, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context cancelled together with `token`.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Add (or tighten) a deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Add a deadline `timeout` from now.
    ///
    /// A timeout too large to represent as an `Instant` adds no deadline.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// A child context: cancelled when `self` is, but cancelling it does not
    /// affect `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Why the context is done, or `None` if it is still live.
    pub fn err(&self) -> Option<BackendError> {
        if self.token.is_cancelled() {
            return Some(BackendError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(BackendError::DeadlineExceeded),
            _ => None,
        }
    }

    /// `Ok(())` while the context is live.
    pub fn check(&self) -> Result<(), BackendError> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
