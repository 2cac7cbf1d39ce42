//! Long-running subscription.

use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use feedcal_feed::{FeedErrorCode, RelayClient};
use feedcal_server::{PollScheduler, PollUpdate};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::output;

/// Subscribes to the feed and prints every poll until Ctrl-C.
pub async fn run(
    url: Option<String>,
    interval: Option<u64>,
    relay_url: Option<&str>,
    json: bool,
    config: &ClientConfig,
) -> ClientResult<()> {
    let url = config.feed_url(url)?;
    let client = RelayClient::new(config.relay_config(relay_url)?)?;

    let mut scheduler_config = config.scheduler_config();
    if let Some(secs) = interval {
        scheduler_config = scheduler_config.with_poll_interval(Duration::from_secs(secs));
    }

    let (mut scheduler, mut updates) = PollScheduler::new(scheduler_config, Arc::new(client));

    if let Err(e) = scheduler.subscribe(url).await
        && e.code() == FeedErrorCode::InvalidInput
    {
        return Err(e.into());
    }

    let mut stdout = std::io::stdout();
    let result = print_updates(&mut updates, json, &mut stdout, tokio::signal::ctrl_c()).await;
    info!("Interrupted, unsubscribing");
    scheduler.unsubscribe().await;
    result
}

/// Writes one line per update until `shutdown` resolves or the channel closes.
///
/// With `json`, each line is a JSON object; otherwise a status summary.
async fn print_updates<W, S>(
    updates: &mut mpsc::UnboundedReceiver<PollUpdate>,
    json: bool,
    out: &mut W,
    shutdown: S,
) -> ClientResult<()>
where
    W: Write,
    S: Future,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => return Ok(()),
            update = updates.recv() => {
                let Some(update) = update else {
                    return Ok(());
                };
                let line = if json {
                    output::update_json(&update)?
                } else {
                    output::summarize_update(&update)
                };
                writeln!(out, "{}", line)?;
                out.flush()?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use feedcal_core::{NormalizedEvent, parse_feed_date};
    use feedcal_feed::FeedError;
    use feedcal_server::PollResult;

    fn update(generation: u64, result: PollResult) -> PollUpdate {
        PollUpdate {
            generation,
            url: "https://example.com/cal.ics".into(),
            polled_at: Utc.with_ymd_and_hms(2025, 2, 5, 9, 30, 0).unwrap(),
            result,
        }
    }

    fn standup() -> NormalizedEvent {
        NormalizedEvent::new(
            "standup-1",
            "Standup",
            parse_feed_date("20250205T140000Z").unwrap(),
            parse_feed_date("20250205T143000Z").unwrap(),
        )
    }

    /// Feeds `updates` through a closed channel and returns what was printed.
    async fn printed(updates: Vec<PollUpdate>, json: bool) -> String {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for update in updates {
            tx.send(update).unwrap();
        }
        drop(tx);

        let mut out = Vec::new();
        print_updates(&mut rx, json, &mut out, std::future::pending::<()>())
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn prints_summary_per_update() {
        let text = printed(
            vec![
                update(1, Ok(vec![standup()])),
                update(1, Err(FeedError::http_status(503, "Service Unavailable"))),
            ],
            false,
        )
        .await;

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "[09:30:00] Calendar updated: 1 events",
                "[09:30:00] Sync failed: network_error: HTTP error! status: 503 Service Unavailable",
            ]
        );
    }

    #[tokio::test]
    async fn json_mode_prints_only_json_lines() {
        let text = printed(
            vec![
                update(1, Ok(vec![standup()])),
                update(2, Err(FeedError::network("Relay request failed"))),
            ],
            true,
        )
        .await;

        let values: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["generation"], 1);
        assert_eq!(values[0]["events"][0]["title"], "Standup");
        assert_eq!(values[1]["generation"], 2);
        assert!(values[1]["error"].as_str().unwrap().contains("Relay request failed"));
    }

    #[tokio::test]
    async fn stops_on_shutdown_with_channel_open() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(update(1, Ok(Vec::new()))).unwrap();

        let mut out = Vec::new();
        print_updates(&mut rx, false, &mut out, std::future::ready(()))
            .await
            .unwrap();

        assert!(out.is_empty());
        assert!(!tx.is_closed());
    }
}
