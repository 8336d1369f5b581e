use crate::api::BackendApi;
use crate::types::{ConnectivityStatus, HealthReport};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(5);
const MIN_HEALTH_INTERVAL: Duration = Duration::from_millis(10);

/// Polls the backend health endpoint: once right away, then on a fixed
/// interval until cancelled. Reports every result on `report_tx`.
pub struct HealthMonitor {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    pub fn spawn(
        api: BackendApi,
        interval: Duration,
        report_tx: mpsc::UnboundedSender<HealthReport>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let interval = interval.max(MIN_HEALTH_INTERVAL);
        info!(?interval, url = %api.base_url(), "Starting backend health monitor");

        let task = tokio::spawn(async move {
            run(api, interval, report_tx, token).await;
        });

        Self {
            cancel,
            task: Some(task),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!("Backend health monitor stopped");
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    api: BackendApi,
    interval: Duration,
    report_tx: mpsc::UnboundedSender<HealthReport>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = ConnectivityStatus::Checking;

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let status = tokio::select! {
            _ = token.cancelled() => break,
            status = api.health() => status,
        };

        if status != last {
            info!(from = %last, to = %status, "Backend connectivity changed");
            last = status;
        }

        let report = HealthReport {
            status,
            checked_at: Utc::now(),
        };
        if report_tx.send(report).is_err() {
            debug!("Health report receiver dropped, stopping monitor");
            break;
        }
    }
}
