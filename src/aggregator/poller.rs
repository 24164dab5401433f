use super::{ListingSource, Mirror, SyncError};
use crate::listing::decode;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Keeps one mirror fresh with periodic fetch-decode-replace cycles.
///
/// A failed cycle records the error on the mirror and leaves its catalog
/// alone; the next cycle retries from scratch. There is no backoff and no
/// retry limit, an unreachable node is simply polled again at the same
/// cadence forever while its mirror keeps answering readers with the last
/// good catalog.
pub struct Poller {
    mirror: Arc<Mirror>,
    source: Arc<dyn ListingSource>,
    interval: Duration,
}

impl Poller {
    pub fn new(mirror: Arc<Mirror>, source: Arc<dyn ListingSource>, interval: Duration) -> Poller {
        Poller {
            mirror,
            source,
            interval,
        }
    }

    /// Spawns the poll loop: one cycle right away, then one per interval,
    /// for the lifetime of the process. There is no stop signal.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                self.poll_once().await;
            }
        })
    }

    /// One fetch-decode-replace cycle.
    pub async fn poll_once(&self) {
        let body = match self.source.fetch_listing().await {
            Ok(body) => body,
            Err(err) => {
                warn!(
                    "Fetching listing from {} failed: {:#}",
                    self.mirror.address(),
                    err
                );
                self.mirror
                    .record_error(SyncError::Transport(format!("{:#}", err)));
                return;
            }
        };

        match decode(&body) {
            Ok(catalog) => {
                info!(
                    "Refreshed {}: {} artists, {} albums, {} tracks",
                    self.mirror.address(),
                    catalog.artists_count(),
                    catalog.albums_count(),
                    catalog.tracks_count()
                );
                self.mirror.replace(catalog);
            }
            Err(err) => {
                warn!("Listing from {} is invalid: {}", self.mirror.address(), err);
                self.mirror.record_error(SyncError::Listing(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Artist, Catalog};
    use crate::listing::DecodeError;
    use anyhow::anyhow;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedSource {
        responses: Mutex<VecDeque<anyhow::Result<String>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<anyhow::Result<String>>) -> Arc<ScriptedSource> {
            Arc::new(ScriptedSource {
                responses: Mutex::new(responses.into()),
            })
        }
    }

    #[async_trait::async_trait]
    impl ListingSource for ScriptedSource {
        async fn fetch_listing(&self) -> anyhow::Result<String> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("no scripted response left")))
        }
    }

    fn seeded_mirror() -> Arc<Mirror> {
        let mirror = Arc::new(Mirror::new("node.test:54321"));
        let mut catalog = Catalog::new();
        catalog.insert_artist(Artist::new("A1", "Alice"));
        mirror.replace(catalog);
        mirror
    }

    fn poller(mirror: &Arc<Mirror>, source: Arc<ScriptedSource>) -> Poller {
        Poller::new(Arc::clone(mirror), source, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn repeated_fetch_failures_leave_the_catalog_and_track_the_latest_error() {
        let mirror = seeded_mirror();
        let source = ScriptedSource::new(vec![
            Err(anyhow!("first failure")),
            Err(anyhow!("second failure")),
            Err(anyhow!("third failure")),
        ]);
        let poller = poller(&mirror, source);

        for _ in 0..3 {
            poller.poll_once().await;
        }

        let snapshot = mirror.snapshot();
        assert!(snapshot.catalog.artist("A1").is_some());
        match snapshot.error {
            Some(SyncError::Transport(message)) => assert!(message.contains("third failure")),
            other => panic!("expected a transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_listing_records_the_decode_error_and_keeps_the_catalog() {
        let mirror = seeded_mirror();
        let source = ScriptedSource::new(vec![Ok("\t\torphan\tT1\thttp://h/t\n".to_owned())]);

        poller(&mirror, source).poll_once().await;

        let snapshot = mirror.snapshot();
        assert!(snapshot.catalog.artist("A1").is_some());
        match snapshot.error {
            Some(SyncError::Listing(err)) => {
                assert_eq!(err, DecodeError::TrackOutsideAlbum { line: 1 })
            }
            other => panic!("expected a listing error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn successful_cycle_replaces_the_catalog_and_clears_the_error() {
        let mirror = seeded_mirror();
        mirror.record_error(SyncError::Transport("stale".to_owned()));
        let source = ScriptedSource::new(vec![Ok(
            "Bob\tA2\n\tAlbumZ\tAL3\thttp://h/cover/A2/AL3\n".to_owned()
        )]);

        poller(&mirror, source).poll_once().await;

        let snapshot = mirror.snapshot();
        assert!(snapshot.error.is_none());
        assert!(snapshot.catalog.artist("A1").is_none());
        assert_eq!(snapshot.catalog.artist("A2").unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn a_failure_after_a_success_serves_the_stale_catalog_with_the_error() {
        let mirror = seeded_mirror();
        let source = ScriptedSource::new(vec![
            Ok("Bob\tA2\n".to_owned()),
            Err(anyhow!("connection refused")),
        ]);
        let poller = poller(&mirror, source);

        poller.poll_once().await;
        poller.poll_once().await;

        let snapshot = mirror.snapshot();
        assert!(snapshot.catalog.artist("A2").is_some());
        assert!(matches!(snapshot.error, Some(SyncError::Transport(_))));
    }
}
