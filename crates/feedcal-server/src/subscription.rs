//! Subscription records and the state shared with poll cycles.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use feedcal_core::NormalizedEvent;
use feedcal_feed::{FeedError, FeedResult, validate_feed_url};
use tokio::sync::RwLock;

/// Outcome of one poll cycle.
pub type PollResult = Result<Vec<NormalizedEvent>, FeedError>;

/// A feed the user connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSubscription {
    /// URL as the user entered it.
    pub url: String,
    /// URL after `webcal://` rewriting; this is what gets fetched.
    pub normalized_url: String,
    pub poll_interval: Duration,
    pub active: bool,
    /// Assigned by the scheduler when polling starts; 0 until then.
    pub generation: u64,
}

impl FeedSubscription {
    /// Creates an inactive subscription for `url`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when `url` is blank.
    pub fn new(url: impl Into<String>, poll_interval: Duration) -> FeedResult<Self> {
        let url = url.into();
        let normalized_url = validate_feed_url(&url)?;
        Ok(Self {
            url,
            normalized_url,
            poll_interval,
            active: false,
            generation: 0,
        })
    }
}

/// One delivered poll cycle.
#[derive(Debug, Clone)]
pub struct PollUpdate {
    /// Generation of the subscription this cycle ran for.
    pub generation: u64,
    /// Normalized feed URL that was fetched.
    pub url: String,
    pub polled_at: DateTime<Utc>,
    pub result: PollResult,
}

impl PollUpdate {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// What the scheduler knows about its current subscription.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionState {
    pub subscription: Option<FeedSubscription>,
    /// Last successful batch. Replaced wholesale by every successful cycle.
    pub current_events: Vec<NormalizedEvent>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Delivered cycles for the current subscription.
    pub poll_count: u64,
}

impl SubscriptionState {
    /// Resets the state for a freshly started subscription.
    pub fn begin(&mut self, subscription: FeedSubscription) {
        *self = Self {
            subscription: Some(subscription),
            ..Self::default()
        };
    }

    /// Marks the current subscription inactive. Cached events are kept.
    pub fn deactivate(&mut self) {
        if let Some(subscription) = self.subscription.as_mut() {
            subscription.active = false;
        }
    }

    /// Returns true if `generation` belongs to the active subscription.
    pub fn is_current(&self, generation: u64) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|s| s.active && s.generation == generation)
    }

    /// Records a successful cycle, replacing the cached batch.
    pub fn record_success(&mut self, events: Vec<NormalizedEvent>, at: DateTime<Utc>) {
        self.current_events = events;
        self.last_success = Some(at);
        self.last_attempt = Some(at);
        self.last_error = None;
        self.poll_count += 1;
    }

    /// Records a failed cycle. The cached batch is left untouched.
    pub fn record_failure(&mut self, error: impl Into<String>, at: DateTime<Utc>) {
        self.last_attempt = Some(at);
        self.last_error = Some(error.into());
        self.poll_count += 1;
    }
}

/// Subscription state shared between the scheduler and its poll cycles.
pub type SharedSubscriptionState = Arc<RwLock<SubscriptionState>>;

pub fn new_subscription_state() -> SharedSubscriptionState {
    Arc::new(RwLock::new(SubscriptionState::default()))
}
