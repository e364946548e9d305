//! Stale response guard
//!
//! Fetches started by a view are not cancelled. Each fetch takes a
//! [`RequestToken`] before the call and applies its result only while that
//! token is still the newest one issued by the view's [`LatestRequest`].

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Default)]
pub struct LatestRequest {
    generation: Rc<Cell<u64>>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, invalidating every earlier token
    pub fn begin(&self) -> RequestToken {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        RequestToken(next)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generation.get() == token.0
    }

    /// Run `apply` only if `token` is still current
    pub fn apply<T>(&self, token: RequestToken, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_current(token) {
            apply(value);
            true
        } else {
            tracing::debug!("Dropping stale response");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_newer_request_wins() {
        let latest = LatestRequest::new();
        let first = latest.begin();
        let second = latest.begin();

        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let latest = LatestRequest::new();
        let shown = RefCell::new(Vec::new());

        let slow = latest.begin();
        let fast = latest.begin();

        assert!(latest.apply(fast, "fast", |v| shown.borrow_mut().push(v)));
        assert!(!latest.apply(slow, "slow", |v| shown.borrow_mut().push(v)));
        assert_eq!(*shown.borrow(), vec!["fast"]);
    }

    #[test]
    fn test_clones_share_generation() {
        let latest = LatestRequest::new();
        let handle = latest.clone();
        let token = latest.begin();
        handle.begin();
        assert!(!latest.is_current(token));
    }
}
