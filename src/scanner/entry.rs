//! Entry Processing Module
//!
//! Simulates the scan of a single file: a random delay, a detection draw and
//! the threats attached on detection.

use crate::models::{DetectionMethod, FileEntry, ScanResult, ScanStatus, Threat};
use crate::utils::format_file_size;
use rand::Rng;
use std::time::Duration;

use super::ScanSimulator;

/// Upper bound on threats attached to one file
const MAX_THREATS_PER_FILE: usize = 3;

/// Progress lines shown while a file is being "analyzed"
pub const SCAN_MESSAGES: [&str; 14] = [
    "Analyzing file structure...",
    "Checking for known signatures...",
    "Running heuristic analysis...",
    "Scanning memory for threats...",
    "Examining file metadata...",
    "Inspecting executable code...",
    "Analyzing network activity...",
    "Checking for suspicious patterns...",
    "Performing deep scan...",
    "Validating file integrity...",
    "Scanning registry references...",
    "Checking for encrypted content...",
    "Analyzing behavioral patterns...",
    "Inspecting system modifications...",
];

/// Pick a progress line
pub fn random_scan_message<R: Rng>(rng: &mut R) -> &'static str {
    SCAN_MESSAGES[rng.gen_range(0..SCAN_MESSAGES.len())]
}

impl<R: Rng> ScanSimulator<R> {
    /// Simulate one file, waiting out its scan time when pacing is on
    pub async fn scan_file(&mut self, file: &FileEntry) -> ScanResult {
        let result = self.simulate_file(file);

        if self.options.pace {
            tokio::time::sleep(Duration::from_millis(result.scan_time)).await;
        }

        result
    }

    /// Draw the outcome for one file without waiting
    pub(crate) fn simulate_file(&mut self, file: &FileEntry) -> ScanResult {
        log::debug!("Simulating scan of: {} ({} bytes)", file.name, file.size);

        let scan_time = self.draw_scan_time();
        let threats = self.draw_threats(&file.name);
        let scan_status = ScanStatus::from_threats(&threats);

        if !threats.is_empty() {
            log::debug!(
                "{} threat(s) attached to {} -> {}",
                threats.len(),
                file.name,
                scan_status
            );
        }

        ScanResult {
            file_name: file.name.clone(),
            file_path: file.name.clone(),
            file_size: format_file_size(file.size),
            scan_status,
            threats,
            scan_time,
        }
    }

    fn draw_scan_time(&mut self) -> u64 {
        let min = self.options.min_scan_time_ms;
        let max = self.options.max_scan_time_ms;
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn draw_threats(&mut self, file_name: &str) -> Vec<Threat> {
        let probability = self.options.effective_detection_probability();
        if self.catalog.is_empty() || !self.rng.gen_bool(probability) {
            return Vec::new();
        }

        let count = self.rng.gen_range(1..=MAX_THREATS_PER_FILE);
        let mut threats = Vec::with_capacity(count);

        for _ in 0..count {
            let index = self.rng.gen_range(0..self.catalog.len());
            let method = if self.rng.gen_bool(0.5) {
                DetectionMethod::Signature
            } else {
                DetectionMethod::Heuristic
            };

            if let Some(archetype) = self.catalog.get(index) {
                threats.push(archetype.instantiate(file_name, method));
            }
        }

        threats
    }
}
