//! Core types: events, feed date parsing, tracing

pub mod event;
pub mod time;
pub mod tracing;

pub use event::{NormalizedEvent, UNTITLED_EVENT};
pub use time::{FeedDate, parse_feed_date, parse_generic_date, parse_ics_date};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
