//! The abuse-protection gate consulted before a transaction is created.

use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use crate::{Error, UserID};

/// Whether a caller may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The request may proceed.
    Allow,
    /// The caller has used up their allowance.
    RateLimited {
        /// Requests left in the current window, zero when denied.
        remaining: u32,
        /// Seconds until the allowance is refilled.
        reset_in_seconds: u64,
    },
    /// The caller may not make this request at all.
    Blocked,
}

impl GateDecision {
    /// Convert a denial into the matching [Error].
    ///
    /// # Errors
    /// Returns [Error::RateLimited] or [Error::Blocked] if the request was denied.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            GateDecision::Allow => Ok(()),
            GateDecision::RateLimited {
                remaining,
                reset_in_seconds,
            } => Err(Error::RateLimited {
                remaining,
                reset_in_seconds,
            }),
            GateDecision::Blocked => Err(Error::Blocked),
        }
    }
}

/// Decides whether a user may make a rate-limited request.
///
/// Each call to [RequestGate::check] that returns [GateDecision::Allow]
/// consumes part of the caller's allowance.
pub trait RequestGate: Send + Sync + Debug {
    /// Check and record a request by `user_id`.
    fn check(&self, user_id: UserID) -> GateDecision;
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: u32,
    last_refill: Instant,
}

/// A per-user token bucket with a list of blocked users.
///
/// Every user starts with `capacity` tokens. Each allowed request takes one
/// token, and the bucket is topped back up to `capacity` once per
/// `refill_interval`.
#[derive(Debug)]
pub struct TokenBucketGate {
    capacity: u32,
    refill_interval: Duration,
    blocked: HashSet<UserID>,
    buckets: Mutex<HashMap<UserID, Bucket>>,
}

impl TokenBucketGate {
    /// Create a gate that allows `capacity` requests per `refill_interval`.
    pub fn new(
        capacity: u32,
        refill_interval: Duration,
        blocked: impl IntoIterator<Item = UserID>,
    ) -> Self {
        Self {
            capacity,
            refill_interval,
            blocked: blocked.into_iter().collect(),
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Check and record a request by `user_id` made at `now`.
    pub fn check_at(&self, user_id: UserID, now: Instant) -> GateDecision {
        if self.blocked.contains(&user_id) {
            tracing::warn!("Blocked request from user {user_id}");
            return GateDecision::Blocked;
        }

        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let bucket = buckets.entry(user_id).or_insert(Bucket {
            tokens: self.capacity,
            last_refill: now,
        });

        let elapsed = now.saturating_duration_since(bucket.last_refill);
        if !self.refill_interval.is_zero() && elapsed >= self.refill_interval {
            let intervals = elapsed.as_nanos() / self.refill_interval.as_nanos();
            bucket.tokens = self.capacity;
            bucket.last_refill += self.refill_interval * intervals.min(u32::MAX as u128) as u32;
        }

        if bucket.tokens > 0 {
            bucket.tokens -= 1;
            return GateDecision::Allow;
        }

        let reset_in = (bucket.last_refill + self.refill_interval).saturating_duration_since(now);
        tracing::warn!(
            "Rate limited user {user_id} for another {}s",
            reset_in.as_secs()
        );

        GateDecision::RateLimited {
            remaining: 0,
            reset_in_seconds: reset_in.as_secs_f64().ceil() as u64,
        }
    }
}

impl RequestGate for TokenBucketGate {
    fn check(&self, user_id: UserID) -> GateDecision {
        self.check_at(user_id, Instant::now())
    }
}
