//! Background poller for one feed subscription.
//!
//! The scheduler owns at most one active subscription. Subscribing runs a
//! poll cycle right away, then a timer fires a new cycle every
//! `poll_interval`. Cycles are spawned and never awaited by the timer, so a
//! slow relay does not delay the next tick. Every cycle is tagged with the
//! subscription's generation; a cycle that finishes after its subscription
//! was stopped or replaced is dropped without touching state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use feedcal_core::NormalizedEvent;
use feedcal_feed::{FeedSource, fetch_feed_events};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::subscription::{
    FeedSubscription, PollResult, PollUpdate, SharedSubscriptionState, SubscriptionState,
    new_subscription_state,
};

/// Everything a spawned poll cycle needs.
struct PollContext {
    source: Arc<dyn FeedSource>,
    state: SharedSubscriptionState,
    /// Generation of the active subscription; 0 when idle.
    current_generation: AtomicU64,
    updates: mpsc::UnboundedSender<PollUpdate>,
}

impl PollContext {
    /// Runs one cycle for `subscription` and delivers its result.
    async fn poll_once(&self, subscription: &FeedSubscription) -> PollResult {
        debug!(
            generation = subscription.generation,
            source = self.source.name(),
            "Starting poll cycle"
        );
        let result = fetch_feed_events(self.source.as_ref(), &subscription.normalized_url).await;
        self.deliver(subscription, &result).await;
        result
    }

    async fn deliver(&self, subscription: &FeedSubscription, result: &PollResult) {
        // The write lock orders delivery against stop(): once stop() has
        // released it, no cycle of the old generation gets past this check.
        let mut state = self.state.write().await;
        if self.current_generation.load(Ordering::SeqCst) != subscription.generation
            || !state.is_current(subscription.generation)
        {
            debug!(
                generation = subscription.generation,
                "Discarding result of a superseded subscription"
            );
            return;
        }

        let polled_at = Utc::now();
        match result {
            Ok(events) => {
                info!(
                    url = %subscription.normalized_url,
                    events = events.len(),
                    "Calendar updated"
                );
                state.record_success(events.clone(), polled_at);
            }
            Err(e) => {
                warn!(url = %subscription.normalized_url, error = %e, "Sync failed");
                state.record_failure(e.to_string(), polled_at);
            }
        }

        let update = PollUpdate {
            generation: subscription.generation,
            url: subscription.normalized_url.clone(),
            polled_at,
            result: result.clone(),
        };
        if self.updates.send(update).is_err() {
            debug!("Update receiver dropped, result only cached");
        }
    }
}

/// The running timer of the active subscription.
struct ActivePoll {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Polls one feed subscription on a fixed interval.
pub struct PollScheduler {
    config: SchedulerConfig,
    context: Arc<PollContext>,
    next_generation: u64,
    active: Option<ActivePoll>,
}

impl PollScheduler {
    /// Creates an idle scheduler and the receiver its poll updates go to.
    pub fn new(
        config: SchedulerConfig,
        source: Arc<dyn FeedSource>,
    ) -> (Self, mpsc::UnboundedReceiver<PollUpdate>) {
        let (updates, updates_rx) = mpsc::unbounded_channel();
        let context = Arc::new(PollContext {
            source,
            state: new_subscription_state(),
            current_generation: AtomicU64::new(0),
            updates,
        });
        let scheduler = Self {
            config,
            context,
            next_generation: 0,
            active: None,
        };
        (scheduler, updates_rx)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Subscribes to `url`, replacing any current subscription.
    ///
    /// Runs the first cycle before returning and hands back its result. The
    /// scheduler keeps polling even when that first cycle failed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank URL, in which case the current
    /// subscription is left alone. Otherwise returns the first cycle's error.
    pub async fn subscribe(&mut self, url: impl Into<String>) -> PollResult {
        let subscription = FeedSubscription::new(url, self.config.poll_interval)?;
        self.start(subscription).await
    }

    /// Starts polling `subscription`, stopping the current one first.
    pub async fn start(&mut self, mut subscription: FeedSubscription) -> PollResult {
        self.stop().await;

        self.next_generation += 1;
        subscription.generation = self.next_generation;
        subscription.active = true;
        let period = subscription
            .poll_interval
            .max(SchedulerConfig::MIN_POLL_INTERVAL);

        {
            let mut state = self.context.state.write().await;
            state.begin(subscription.clone());
            self.context
                .current_generation
                .store(subscription.generation, Ordering::SeqCst);
        }
        info!(
            url = %subscription.normalized_url,
            generation = subscription.generation,
            interval_secs = period.as_secs(),
            "Subscribed to feed"
        );

        // Ticks count from subscribe time, not from the end of the first cycle.
        let first_tick = Instant::now() + period;
        let first = self.context.poll_once(&subscription).await;

        let (cancel, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(run_timer(
            self.context.clone(),
            subscription,
            first_tick,
            cancel_rx,
        ));
        self.active = Some(ActivePoll { cancel, task });

        first
    }

    /// Stops polling. In-flight cycles finish but their results are dropped.
    pub async fn stop(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        {
            let mut state = self.context.state.write().await;
            state.deactivate();
            self.context.current_generation.store(0, Ordering::SeqCst);
        }

        let _ = active.cancel.send(true);
        if let Err(e) = active.task.await {
            warn!(error = %e, "Poll timer task ended abnormally");
        }
        info!("Stopped polling");
    }

    /// Same as [`Self::stop`].
    pub async fn unsubscribe(&mut self) {
        self.stop().await;
    }

    pub fn is_polling(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the last successful batch.
    pub async fn current_events(&self) -> Vec<NormalizedEvent> {
        self.context.state.read().await.current_events.clone()
    }

    /// Returns a snapshot of the subscription state.
    pub async fn state(&self) -> SubscriptionState {
        self.context.state.read().await.clone()
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            self.context.current_generation.store(0, Ordering::SeqCst);
            let _ = active.cancel.send(true);
        }
    }
}

async fn run_timer(
    context: Arc<PollContext>,
    subscription: FeedSubscription,
    first_tick: Instant,
    mut cancel: watch::Receiver<bool>,
) {
    let period = subscription
        .poll_interval
        .max(SchedulerConfig::MIN_POLL_INTERVAL);
    let mut ticker = tokio::time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    debug!(generation = subscription.generation, "Poll timer cancelled");
                    break;
                }
            }
            _ = ticker.tick() => {
                let context = context.clone();
                let subscription = subscription.clone();
                tokio::spawn(async move {
                    let _ = context.poll_once(&subscription).await;
                });
            }
        }
    }
}
