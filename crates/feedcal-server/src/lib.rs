//! Polling and relay for feedcal.
//!
//! - [`scheduler`]: keeps one feed subscription fresh on a fixed interval
//! - [`subscription`]: subscription records and the shared cached state
//! - [`relay`]: the axum router implementing the relay HTTP contract

pub mod config;
pub mod error;
pub mod relay;
pub mod scheduler;
pub mod subscription;

pub use config::SchedulerConfig;
pub use error::{ServerError, ServerResult};
pub use relay::{RELAY_PATH, RelayErrorBody, relay_router, upstream_client};
pub use scheduler::PollScheduler;
pub use subscription::{
    FeedSubscription, PollResult, PollUpdate, SharedSubscriptionState, SubscriptionState,
};
