//! Action generations
//!
//! Every user action on a controller takes a new [`Token`]. Work started by
//! an older action may still finish, but it only commits to the document
//! while its token is current.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter shared by all actions of one controller
#[derive(Debug, Clone, Default)]
pub struct Generation {
    latest: Arc<AtomicU64>,
}

impl Generation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new action, superseding every earlier token
    #[must_use]
    pub fn begin(&self) -> Token {
        let value = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Token {
            latest: Arc::clone(&self.latest),
            value,
        }
    }
}

/// Identity of one action
#[derive(Debug, Clone)]
pub struct Token {
    latest: Arc<AtomicU64>,
    value: u64,
}

impl Token {
    /// Whether no newer action has started since this one
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_token_supersedes() {
        let generation = Generation::new();
        let first = generation.begin();
        assert!(first.is_current());

        let second = generation.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }
}
