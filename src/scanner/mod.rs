//! Scanner Module - simulated scanning
//!
//! This module contains the `ScanSimulator` and its configuration.
//! Split into submodules for maintainability:
//! - `entry`: per-file simulation (delay, threat draws, status)
//! - `summary`: folding per-file results into a `ScanSummary`

mod entry;
mod summary;

pub use entry::{random_scan_message, SCAN_MESSAGES};
pub use summary::summarize;

use crate::models::{FileEntry, ScanResult, ScanSummary, Threat};
use crate::threat_intel::ThreatCatalog;
use crate::ui::UiEvent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::{SentinelError, SentinelResult};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Chance that a file carries threats unless configured otherwise
pub const DEFAULT_DETECTION_PROBABILITY: f64 = 0.3;

/// Knobs for the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    /// Chance that a file carries threats
    pub detection_probability: f64,
    /// Lower bound of the simulated per-file scan time (inclusive)
    pub min_scan_time_ms: u64,
    /// Upper bound of the simulated per-file scan time (exclusive)
    pub max_scan_time_ms: u64,
    /// Actually wait out the simulated scan time
    pub pace: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            detection_probability: DEFAULT_DETECTION_PROBABILITY,
            min_scan_time_ms: 1000,
            max_scan_time_ms: 3000,
            pace: true,
        }
    }
}

impl ScanOptions {
    /// Default odds and timings, without sleeping
    pub fn instant() -> Self {
        Self {
            pace: false,
            ..Self::default()
        }
    }

    /// Detection odds clamped to `0.0..=1.0`; a non-finite value means the default
    pub fn effective_detection_probability(&self) -> f64 {
        if self.detection_probability.is_finite() {
            self.detection_probability.clamp(0.0, 1.0)
        } else {
            log::debug!(
                "Ignoring detection probability {}, using {}",
                self.detection_probability,
                DEFAULT_DETECTION_PROBABILITY
            );
            DEFAULT_DETECTION_PROBABILITY
        }
    }
}

/// Per-file results, in input order, plus their aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub results: Vec<ScanResult>,
    pub summary: ScanSummary,
}

impl ScanOutcome {
    /// All threats across every file, in scan order
    pub fn threats(&self) -> Vec<Threat> {
        self.results
            .iter()
            .flat_map(|r| r.threats.iter().cloned())
            .collect()
    }
}

/// Simulated scanner with an injected random source.
///
/// Progress messages come from their own stream, forked from `rng` at
/// construction, so attaching a UI never changes the scan draws.
pub struct ScanSimulator<R = StdRng> {
    pub(crate) rng: R,
    pub(crate) message_rng: StdRng,
    pub(crate) options: ScanOptions,
    pub(crate) catalog: ThreatCatalog,
}

impl ScanSimulator<StdRng> {
    /// Deterministic simulator for reproducible runs
    pub fn seeded(seed: u64, options: ScanOptions) -> Self {
        Self::new(StdRng::seed_from_u64(seed), options)
    }

    /// Simulator seeded from the operating system
    pub fn from_entropy(options: ScanOptions) -> Self {
        Self::new(StdRng::from_entropy(), options)
    }
}

impl<R: Rng> ScanSimulator<R> {
    pub fn new(mut rng: R, options: ScanOptions) -> Self {
        log::debug!("Creating scan simulator with options: {:?}", options);
        let message_rng = StdRng::seed_from_u64(rng.gen());
        Self {
            rng,
            message_rng,
            options,
            catalog: ThreatCatalog::new(),
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan files strictly one after another, then aggregate.
    ///
    /// Progress is reported on `ui` when given. An empty selection yields an
    /// empty summary.
    pub async fn scan_files(
        &mut self,
        files: &[FileEntry],
        ui: Option<&mpsc::Sender<UiEvent>>,
    ) -> ScanOutcome {
        log::info!("Starting simulated scan of {} files", files.len());

        let mut results = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            if let Some(sender) = ui {
                let message = random_scan_message(&mut self.message_rng).to_string();
                notify(
                    sender,
                    UiEvent::FileStarted {
                        index,
                        name: file.name.clone(),
                        message,
                    },
                )
                .await;
            }

            let result = self.scan_file(file).await;

            if let Some(sender) = ui {
                for threat in &result.threats {
                    notify(
                        sender,
                        UiEvent::ThreatFound {
                            file: result.file_name.clone(),
                            threat_name: threat.name.clone(),
                            severity: threat.severity,
                        },
                    )
                    .await;
                }
                notify(
                    sender,
                    UiEvent::FileCompleted {
                        status: result.scan_status,
                        threats: result.threats.len(),
                    },
                )
                .await;
            }

            results.push(result);
        }

        let summary = summarize(&results);

        if let Some(sender) = ui {
            notify(sender, UiEvent::Complete).await;
        }

        log::info!(
            "Scan completed: {} files, {} threats, {}s simulated",
            summary.scanned_files,
            summary.threats_found,
            summary.scan_duration
        );

        ScanOutcome { results, summary }
    }
}

/// Forward a progress event to the UI
pub(crate) async fn send_event(
    sender: &mpsc::Sender<UiEvent>,
    event: UiEvent,
) -> SentinelResult<()> {
    sender
        .send(event)
        .await
        .map_err(|e| SentinelError::UiChannel(e.to_string()))
}

/// Progress is best effort; a gone receiver never stops the scan
async fn notify(sender: &mpsc::Sender<UiEvent>, event: UiEvent) {
    if let Err(e) = send_event(sender, event).await {
        log::warn!("{}, continuing without progress", e);
    }
}
