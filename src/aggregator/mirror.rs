use crate::catalog::Catalog;
use crate::listing::DecodeError;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// What went wrong during the last synchronization cycle of a mirror.
#[derive(Clone, Debug, Error)]
pub enum SyncError {
    #[error("fetching listing failed: {0}")]
    Transport(String),
    #[error("invalid listing: {0}")]
    Listing(#[from] DecodeError),
}

/// The cached copy of one media node's catalog, plus the last
/// synchronization error.
///
/// The poller is the only writer; any number of HTTP readers call
/// [`Mirror::snapshot`] concurrently. The catalog is kept behind an `Arc`
/// that is swapped under the lock, so a replace is atomic with respect to
/// snapshots and readers never hold the lock for longer than the swap. A
/// snapshot is always a catalog produced by one complete decode, or the
/// empty catalog if no cycle has succeeded yet.
pub struct Mirror {
    address: String,
    state: Mutex<MirrorState>,
}

struct MirrorState {
    catalog: Arc<Catalog>,
    last_error: Option<SyncError>,
}

/// The state of a mirror at one point in time.
pub struct Snapshot {
    pub catalog: Arc<Catalog>,
    pub error: Option<SyncError>,
}

impl Mirror {
    pub fn new(address: impl Into<String>) -> Mirror {
        Mirror {
            address: address.into(),
            state: Mutex::new(MirrorState {
                catalog: Arc::new(Catalog::new()),
                last_error: None,
            }),
        }
    }

    /// `host:port` of the media node this mirror follows.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Swaps in the catalog from a successful poll cycle and clears the
    /// error.
    pub fn replace(&self, catalog: Catalog) {
        let mut state = self.state.lock().unwrap();
        state.catalog = Arc::new(catalog);
        state.last_error = None;
    }

    /// Records a failed poll cycle. The catalog is left untouched.
    pub fn record_error(&self, error: SyncError) {
        self.state.lock().unwrap().last_error = Some(error);
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock().unwrap();
        Snapshot {
            catalog: Arc::clone(&state.catalog),
            error: state.last_error.clone(),
        }
    }
}
