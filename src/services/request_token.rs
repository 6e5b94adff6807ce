/// Identifies one issued request for a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Hands out increasing tokens so only the response to the latest request of
/// a subject (e.g. the photo shown in the lightbox) gets applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    /// Issues a new token; every earlier token becomes stale
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Invalidates outstanding requests without issuing a new one, e.g. when
    /// the view closes
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_token_wins() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        assert!(tracker.is_current(first));

        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_invalidate_rejects_outstanding() {
        let mut tracker = RequestTracker::default();
        let token = tracker.issue();
        tracker.invalidate();
        assert!(!tracker.is_current(token));
    }
}
