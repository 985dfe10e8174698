//! Time-boxed email verification codes.
//!
//! Codes are 6 random digits with a short TTL and a resend throttle.
//! The store is owned by whoever constructs it (the API server keeps
//! one instance in its shared state) rather than living in process-wide
//! static storage, so tests and multiple servers in one process never
//! observe each other's codes.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::Rng;

/// How long an issued code stays valid.
pub const CODE_TTL: Duration = Duration::from_secs(120);

/// Minimum wait between two codes for the same address.
pub const RESEND_AFTER: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct IssuedCode {
    code: String,
    issued_at: Instant,
}

/// In-memory store of pending verification codes, keyed by email.
#[derive(Debug)]
pub struct VerificationCodes {
    ttl: Duration,
    resend_after: Duration,
    inner: Mutex<HashMap<String, IssuedCode>>,
}

impl VerificationCodes {
    /// Store with the standard TTL and resend throttle.
    pub fn new() -> Self {
        Self::with_timings(CODE_TTL, RESEND_AFTER)
    }

    /// Store with explicit timings. Intended for tests.
    pub fn with_timings(ttl: Duration, resend_after: Duration) -> Self {
        Self {
            ttl,
            resend_after,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh code for `email`.
    ///
    /// Returns `None` when a previous code was issued too recently
    /// (resend throttle). A newly issued code replaces any pending one.
    pub fn issue(&self, email: &str) -> Option<String> {
        let mut inner = self.inner.lock().expect("verification store poisoned");

        if let Some(existing) = inner.get(email) {
            if existing.issued_at.elapsed() < self.resend_after {
                return None;
            }
        }

        let code = generate_code();
        inner.insert(
            email.to_string(),
            IssuedCode {
                code: code.clone(),
                issued_at: Instant::now(),
            },
        );
        Some(code)
    }

    /// Check `code` against the pending code for `email`.
    ///
    /// A successful match consumes the code (single use). Expired codes
    /// never match and are dropped on the way out.
    pub fn verify(&self, email: &str, code: &str) -> bool {
        let mut inner = self.inner.lock().expect("verification store poisoned");

        match inner.get(email) {
            Some(existing) if existing.issued_at.elapsed() >= self.ttl => {
                inner.remove(email);
                false
            }
            Some(existing) if existing.code == code => {
                inner.remove(email);
                true
            }
            _ => false,
        }
    }

    /// Drop every expired entry. Called opportunistically by the owner;
    /// correctness does not depend on it since `verify` checks expiry.
    pub fn purge_expired(&self) {
        let mut inner = self.inner.lock().expect("verification store poisoned");
        inner.retain(|_, issued| issued.issued_at.elapsed() < self.ttl);
    }
}

impl Default for VerificationCodes {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a 6-digit numeric code, zero-padded.
fn generate_code() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(0..1_000_000u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let store = VerificationCodes::with_timings(CODE_TTL, Duration::ZERO);
        let code = store.issue("a@example.com").expect("first issue succeeds");

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        assert!(!store.verify("a@example.com", "000000x"));
        assert!(store.verify("a@example.com", &code));
        // Single use: the same code does not verify twice.
        assert!(!store.verify("a@example.com", &code));
    }

    #[test]
    fn test_resend_throttle() {
        let store = VerificationCodes::with_timings(CODE_TTL, Duration::from_secs(60));
        assert!(store.issue("b@example.com").is_some());
        assert!(
            store.issue("b@example.com").is_none(),
            "second issue inside the throttle window must be refused"
        );
        // Other addresses are unaffected.
        assert!(store.issue("c@example.com").is_some());
    }

    #[test]
    fn test_expired_code_rejected() {
        let store = VerificationCodes::with_timings(Duration::ZERO, Duration::ZERO);
        let code = store.issue("d@example.com").unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert!(
            !store.verify("d@example.com", &code),
            "expired code must not verify"
        );
    }

    #[test]
    fn test_purge_expired() {
        let store = VerificationCodes::with_timings(Duration::ZERO, Duration::ZERO);
        store.issue("e@example.com").unwrap();
        std::thread::sleep(Duration::from_millis(5));
        store.purge_expired();
        assert!(store.inner.lock().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_email_does_not_verify() {
        let store = VerificationCodes::with_timings(CODE_TTL, Duration::ZERO);
        let code = store.issue("f@example.com").unwrap();
        assert!(!store.verify("g@example.com", &code));
        // The original address still verifies.
        assert!(store.verify("f@example.com", &code));
    }
}
