use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{ExportFormat, ExportRequest};
use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub tick: Duration,
    pub step_percent: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(300),
            step_percent: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExportStatus {
    Running { progress: u8 },
    #[serde(rename_all = "camelCase")]
    Completed { completed_at: DateTime<Utc> },
    Cancelled,
}

impl ExportStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, ExportStatus::Completed { .. })
    }
}

/// What a finished export produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub option: &'static str,
    pub format: ExportFormat,
    pub fields: Vec<&'static str>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// When progress reached 100.
    pub completed_at: DateTime<Utc>,
}

/// A running export. Progress is simulated on a timer.
///
/// Dropping the job aborts the timer task so nothing updates after the
/// export dialog is gone.
pub struct ExportJob {
    status: watch::Receiver<ExportStatus>,
    handle: JoinHandle<()>,
    cancelled: bool,
    option: &'static str,
    format: ExportFormat,
    fields: Vec<&'static str>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl ExportJob {
    /// Must be called from within a tokio runtime.
    pub fn start(request: &ExportRequest, settings: ExportSettings) -> Result<Self, ExportError> {
        let (option, format) = match (request.option(), request.format()) {
            (Some(option), Some(format)) if !request.fields().is_empty() => (option, format),
            (None, _) => return Err(ExportError::NotReady("no data set selected")),
            (_, None) => return Err(ExportError::NotReady("no format selected")),
            _ => return Err(ExportError::NotReady("no fields selected")),
        };

        let (tx, rx) = watch::channel(ExportStatus::Running { progress: 0 });
        let step = settings.step_percent.max(1);
        let tick = settings.tick;
        log::info!(
            "Starting {} export of {} ({} fields)",
            format,
            option.id,
            request.fields().len()
        );

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // first tick completes immediately
            interval.tick().await;

            let mut progress: u8 = 0;
            loop {
                interval.tick().await;
                progress = progress.saturating_add(step).min(100);
                if progress >= 100 {
                    let _ = tx.send(ExportStatus::Completed {
                        completed_at: Utc::now(),
                    });
                    break;
                }
                if tx.send(ExportStatus::Running { progress }).is_err() {
                    log::debug!("Export watcher gone; stopping");
                    break;
                }
            }
        });

        Ok(Self {
            status: rx,
            handle,
            cancelled: false,
            option: option.id,
            format,
            fields: request.fields().to_vec(),
            date_from: request.date_from,
            date_to: request.date_to,
        })
    }

    pub fn status(&self) -> ExportStatus {
        let current = *self.status.borrow();
        if self.cancelled && !current.is_completed() {
            return ExportStatus::Cancelled;
        }
        current
    }

    pub fn subscribe(&self) -> watch::Receiver<ExportStatus> {
        self.status.clone()
    }

    /// Stop the export. A job that already completed stays completed.
    pub fn cancel(&mut self) {
        if self.status.borrow().is_completed() {
            return;
        }
        if !self.cancelled {
            log::info!("Cancelling {} export", self.option);
            self.cancelled = true;
            self.handle.abort();
        }
    }

    fn receipt(&self, completed_at: DateTime<Utc>) -> ExportReceipt {
        ExportReceipt {
            option: self.option,
            format: self.format,
            fields: self.fields.clone(),
            date_from: self.date_from,
            date_to: self.date_to,
            completed_at,
        }
    }

    /// Resolve once the export completes or is cancelled.
    pub async fn wait(&mut self) -> Result<ExportReceipt, ExportError> {
        loop {
            let current = *self.status.borrow_and_update();
            if let ExportStatus::Completed { completed_at } = current {
                log::info!("{} export complete", self.option);
                return Ok(self.receipt(completed_at));
            }
            if self.cancelled {
                return Err(ExportError::Cancelled);
            }
            if self.status.changed().await.is_err() {
                // sender dropped: either it finished or it was aborted
                let last = *self.status.borrow();
                return match last {
                    ExportStatus::Completed { completed_at } => Ok(self.receipt(completed_at)),
                    _ => Err(ExportError::Cancelled),
                };
            }
        }
    }
}

impl Drop for ExportJob {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
