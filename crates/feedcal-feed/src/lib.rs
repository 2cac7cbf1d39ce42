//! Feed ingestion for subscribed ICS calendars.
//!
//! - [`normalize_feed_url`] - `webcal://` to `https://`
//! - [`RelayClient`] - fetches feed text through the CORS relay
//! - [`parse_ics`] - scans feed text into [`RawEventRecord`]s
//! - [`EventNormalizer`] - turns records into validated [`NormalizedEvent`]s
//! - [`run_pipeline`] - all of the above, once
//!
//! # Architecture
//!
//! ```text
//!   feed URL ──► normalize_feed_url ──► FeedSource (RelayClient)
//!                                              │ raw text
//!                                              ▼
//!                                        parse_ics()
//!                                              │ RawEventRecord
//!                                              ▼
//!                                      EventNormalizer
//!                                              │
//!                                              ▼
//!                                   Vec<NormalizedEvent>
//! ```
//!
//! [`NormalizedEvent`]: feedcal_core::NormalizedEvent

pub mod error;
pub mod feed_url;
pub mod ics;
pub mod normalize;
pub mod pipeline;
pub mod raw_event;
pub mod relay;
pub mod source;

// Re-export main types at crate root
pub use error::{FeedError, FeedErrorCode, FeedResult};
pub use feed_url::{normalize_feed_url, validate_feed_url};
pub use ics::{EVENT_BEGIN_MARKER, parse_ics};
pub use normalize::{EventNormalizer, IdGenerator, SequentialIds, UuidGenerator, normalize_events};
pub use pipeline::{events_from_text, fetch_feed_events, run_pipeline};
pub use raw_event::{FieldKey, RawEventRecord};
pub use relay::{RelayClient, RelayConfig};
pub use source::{BoxFuture, FeedSource, StaticSource};
