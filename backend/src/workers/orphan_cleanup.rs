use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{info, warn};

use crate::database::DocumentStore;
use crate::services::reconcile;

/// Background worker that removes documents stranded by interrupted cascades
///
/// Sweeps every `interval_secs` until a shutdown signal arrives. The first
/// sweep runs immediately at startup.
pub async fn orphan_cleanup_worker(
    store: Arc<dyn DocumentStore>,
    interval_secs: u64,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) {
    let mut cleanup_interval = interval(Duration::from_secs(interval_secs.max(1)));
    info!(interval_secs, "Orphan cleanup worker started");

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("Orphan cleanup worker shutting down");
                break;
            }
            _ = cleanup_interval.tick() => {
                match reconcile::remove_orphans(store.as_ref()).await {
                    Ok(report) if report.is_empty() => {}
                    Ok(report) => {
                        info!(
                            tasks_removed = report.tasks_removed,
                            boards_removed = report.boards_removed,
                            members_pruned = report.members_pruned,
                            assignments_cleared = report.assignments_cleared,
                            "Removed orphaned documents",
                        );
                    }
                    Err(e) => {
                        warn!(error = %e, "Orphan cleanup failed");
                    }
                }
            }
        }
    }

    info!("Orphan cleanup worker stopped");
}
