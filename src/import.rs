//! Entry points for a host application importing a beatmap as guidelines.
//!
//! A host only needs to tell success (a guideline string) from failure.
//! Background imports hand their result back through a single-slot channel
//! that the host checks once per tick.

use crate::parser::beatmap_parser::parse_osu_file;
use crate::GuideError;
use std::path::{Path, PathBuf};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Parse a beatmap file and serialize its click events.
pub fn import_guidelines(path: impl AsRef<Path>, offset_ms: f64) -> Result<String, GuideError> {
    let beatmap = parse_osu_file(path)?;
    if !beatmap.warnings.is_empty() {
        log::info!(
            "Beatmap imported with {} skipped lines",
            beatmap.warnings.len()
        );
    }
    log::info!(
        "Imported {} click events with offset {offset_ms}ms",
        beatmap.click_events.len()
    );
    Ok(beatmap.guideline_string(offset_ms))
}

/// Offset typed by a user, anything that is not a finite number reverts to `0`.
pub fn parse_offset_input(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|offset| offset.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug)]
pub enum ImportStatus {
    /// Still running
    Pending,
    /// Result delivered, only reported once
    Ready(Result<String, GuideError>),
    /// Result already taken by a previous poll
    Delivered,
}

/// Result slot of an import running in the background.
#[derive(Debug)]
pub struct PendingImport {
    receiver: Option<oneshot::Receiver<Result<String, GuideError>>>,
}

impl PendingImport {
    /// Non blocking check, meant to be called from the host update loop.
    pub fn poll(&mut self) -> ImportStatus {
        let Some(receiver) = self.receiver.as_mut() else {
            return ImportStatus::Delivered;
        };
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                ImportStatus::Ready(result)
            }
            Err(TryRecvError::Empty) => ImportStatus::Pending,
            Err(TryRecvError::Closed) => {
                self.receiver = None;
                ImportStatus::Ready(Err(import_task_lost()))
            }
        }
    }

    pub async fn wait(self) -> Result<String, GuideError> {
        match self.receiver {
            Some(receiver) => receiver.await.unwrap_or_else(|_| Err(import_task_lost())),
            None => Err(GuideError::IoFailure(
                "import result already delivered".to_string(),
            )),
        }
    }
}

fn import_task_lost() -> GuideError {
    GuideError::IoFailure("import task ended without a result".to_string())
}

/// Run [`import_guidelines`] on the blocking pool of the current Tokio runtime.
pub fn spawn_import(path: PathBuf, offset_ms: f64) -> PendingImport {
    let (sender, receiver) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let result = import_guidelines(&path, offset_ms);
        if sender.send(result).is_err() {
            log::debug!("Import of {path:?} finished after its slot was dropped");
        }
    });
    PendingImport {
        receiver: Some(receiver),
    }
}
