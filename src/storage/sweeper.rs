//! Background reclamation of expired links

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, trace, warn};

use super::KvStore;

/// Periodically calls [`KvStore::purge_expired`] until shut down.
pub struct ExpirySweeper {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ExpirySweeper {
    /// Start sweeping every `every` (at least one second). The first sweep
    /// runs right away.
    pub fn spawn(store: KvStore, every: Duration) -> Self {
        let (stop, mut stop_rx) = oneshot::channel::<()>();
        let every = every.max(Duration::from_secs(1));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let store = store.clone();
                        // redb 事务是阻塞调用，放到 blocking 线程池
                        match tokio::task::spawn_blocking(move || store.purge_expired()).await {
                            Ok(Ok(0)) => trace!("Expiry sweep: nothing to purge"),
                            Ok(Ok(count)) => debug!("Expiry sweep purged {} links", count),
                            Ok(Err(e)) => warn!("Expiry sweep failed: {}", e),
                            Err(e) => error!("Expiry sweep task panicked: {}", e),
                        }
                    }
                }
            }

            debug!("Expiry sweeper stopped");
        });

        Self { stop, handle }
    }

    /// Stop the sweeper and wait for an in-flight sweep to finish.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.handle.await {
            warn!("Expiry sweeper did not stop cleanly: {}", e);
        }
    }
}
