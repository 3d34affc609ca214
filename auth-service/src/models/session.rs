use chrono::{DateTime, Duration, Utc};

/// How many consecutive failures trip the lockout, and for how long.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    pub max_failed_attempts: u32,
    pub cooldown: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            cooldown: Duration::seconds(120),
        }
    }
}

/// Per-operator session state. Lives only in process memory: created
/// unauthenticated, mutated by the login path, destroyed on logout or
/// process exit.
///
/// The lockout portion is a two-state machine, `Open` and `Blocked`.
/// `Blocked` is entered when the failure counter reaches the policy
/// threshold and leaves again lazily once the cooldown has elapsed; no
/// explicit transition event exists.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub authenticated: bool,
    pub display_name: Option<String>,
    pub organizational_unit_id: Option<i32>,
    pub failed_attempt_count: u32,
    pub blocked_until: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds left on an active lockout, rounded up. `None` means the
    /// session is open (including a `blocked_until` that already passed).
    pub fn lockout_remaining(&self, now: DateTime<Utc>) -> Option<u64> {
        let until = self.blocked_until?;
        if now >= until {
            return None;
        }
        let millis = (until - now).num_milliseconds().max(0) as u64;
        Some(millis.div_ceil(1000))
    }

    /// Record one failed login attempt. The attempt that reaches the
    /// threshold starts the cooldown and resets the counter.
    pub fn record_failure(&mut self, now: DateTime<Utc>, policy: &LockoutPolicy) {
        self.failed_attempt_count += 1;
        if self.failed_attempt_count >= policy.max_failed_attempts {
            self.blocked_until = Some(now + policy.cooldown);
            self.failed_attempt_count = 0;
        }
    }

    /// Mark the session authenticated. Success forces the lockout state
    /// machine back to `Open`.
    pub fn establish(&mut self, display_name: String, organizational_unit_id: i32) {
        self.authenticated = true;
        self.display_name = Some(display_name);
        self.organizational_unit_id = Some(organizational_unit_id);
        self.failed_attempt_count = 0;
        self.blocked_until = None;
    }

    /// Full reset, used on logout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
