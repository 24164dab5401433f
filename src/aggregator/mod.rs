mod mirror;
mod poller;
mod server;
mod source;

pub use mirror::{Mirror, Snapshot, SyncError};
pub use poller::Poller;
pub use server::{make_app, run_server};
pub use source::{HttpListingSource, ListingSource};

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Owns one mirror per configured media node.
///
/// Built once at startup and handed by reference to the serving layer; the
/// pollers it starts are the only writers to its mirrors.
pub struct Aggregator {
    mirrors: Vec<Arc<Mirror>>,
}

impl Aggregator {
    pub fn new(addresses: &[String]) -> Aggregator {
        Aggregator {
            mirrors: addresses
                .iter()
                .map(|address| Arc::new(Mirror::new(address.clone())))
                .collect(),
        }
    }

    pub fn mirrors(&self) -> &[Arc<Mirror>] {
        &self.mirrors
    }

    /// Spawns one poller per mirror. The pollers run until the process
    /// exits.
    pub fn start(&self, interval: Duration) {
        for mirror in &self.mirrors {
            info!("Starting poller for {}", mirror.address());
            let source = Arc::new(HttpListingSource::new(mirror.address()));
            Poller::new(Arc::clone(mirror), source, interval).spawn();
        }
    }
}
