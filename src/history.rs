//! Append-only scan history, newest first.

use crate::models::{
    DetectionMethod, HistoryStatus, ScanHistoryItem, ScanSummary, SeverityCounts, Threat,
};
use crate::scanner::ScanOutcome;
use crate::threat_intel::ThreatCatalog;
use crate::utils::format_duration;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

impl ScanHistoryItem {
    /// Record a finished scan
    pub fn from_outcome(id: impl Into<String>, date: DateTime<Utc>, outcome: &ScanOutcome) -> Self {
        let threats = outcome.threats();
        let summary = outcome.summary.clone();

        Self {
            id: id.into(),
            date,
            duration: format_duration(summary.scan_duration),
            files_scanned: summary.scanned_files,
            threats_detected: summary.threats_found,
            status: if threats.is_empty() {
                HistoryStatus::Clean
            } else {
                HistoryStatus::ThreatsFound
            },
            summary,
            threats,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanHistory {
    scans: Vec<ScanHistoryItem>,
}

impl ScanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History preloaded with the four demo scans
    pub fn with_sample_data() -> Self {
        Self {
            scans: sample_scans(),
        }
    }

    pub fn add_scan(&mut self, scan: ScanHistoryItem) {
        log::debug!("Recording scan {} ({} threats)", scan.id, scan.threats_detected);
        self.scans.insert(0, scan);
    }

    /// All scans, newest first
    pub fn scans(&self) -> &[ScanHistoryItem] {
        &self.scans
    }

    pub fn recent(&self, count: usize) -> &[ScanHistoryItem] {
        &self.scans[..count.min(self.scans.len())]
    }

    pub fn get(&self, id: &str) -> Option<&ScanHistoryItem> {
        self.scans.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Next free `scan-NNN` id
    pub fn next_id(&self) -> String {
        let highest = self
            .scans
            .iter()
            .filter_map(|s| s.id.strip_prefix("scan-"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("scan-{:03}", highest + 1)
    }

    pub fn clear(&mut self) {
        self.scans.clear();
    }
}

fn sample_threat(id: &str, path: &str, method: DetectionMethod) -> Option<Threat> {
    ThreatCatalog::new()
        .find(id)
        .map(|archetype| archetype.instantiate(path, method))
}

fn sample_scan(
    id: &str,
    date: DateTime<Utc>,
    files_scanned: usize,
    duration_secs: u64,
    threats: Vec<Threat>,
) -> ScanHistoryItem {
    let mut by_severity = SeverityCounts::default();
    let mut by_type = BTreeMap::new();
    for threat in &threats {
        by_severity.record(threat.severity);
        *by_type.entry(threat.category).or_insert(0) += 1;
    }

    ScanHistoryItem {
        id: id.to_string(),
        date,
        duration: format_duration(duration_secs),
        files_scanned,
        threats_detected: threats.len(),
        status: if threats.is_empty() {
            HistoryStatus::Clean
        } else {
            HistoryStatus::ThreatsFound
        },
        summary: ScanSummary {
            scanned_files: files_scanned,
            threats_found: threats.len(),
            scan_duration: duration_secs,
            threats_by_severity: by_severity,
            threats_by_type: by_type,
        },
        threats,
    }
}

fn sample_scans() -> Vec<ScanHistoryItem> {
    let at = |month: u32, day: u32, hour: u32, minute: u32| {
        Utc.with_ymd_and_hms(2023, month, day, hour, minute, 0)
            .single()
            .unwrap_or_else(Utc::now)
    };

    vec![
        sample_scan("scan-001", at(4, 15, 9, 30), 1245, 222, vec![]),
        sample_scan(
            "scan-002",
            at(4, 10, 14, 15),
            2103,
            318,
            [
                sample_threat("mal-006", "downloads/suspicious-file.exe", DetectionMethod::Signature),
                sample_threat("spy-003", "downloads/free-tool.exe", DetectionMethod::Heuristic),
            ]
            .into_iter()
            .flatten()
            .collect(),
        ),
        sample_scan(
            "scan-003",
            at(4, 5, 10, 0),
            1876,
            249,
            sample_threat("ran-004", "downloads/attachment.zip", DetectionMethod::Behavioral)
                .into_iter()
                .collect(),
        ),
        sample_scan("scan-004", at(3, 28, 19, 45), 943, 176, vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileEntry, Severity};
    use crate::scanner::{ScanOptions, ScanSimulator};

    #[test]
    fn test_sample_history_shape() {
        let history = ScanHistory::with_sample_data();
        assert_eq!(history.len(), 4);
        assert_eq!(history.scans()[0].id, "scan-001");
        assert_eq!(history.scans()[0].duration, "3m 42s");

        let scan = history.get("scan-002").expect("scan-002");
        assert_eq!(scan.threats_detected, 2);
        assert_eq!(scan.status, HistoryStatus::ThreatsFound);
        assert_eq!(scan.summary.threats_by_severity.total(), 2);

        let scan = history.get("scan-003").expect("scan-003");
        assert_eq!(scan.threats[0].severity, Severity::Critical);
        assert_eq!(scan.duration, "4m 9s");
    }

    #[test]
    fn test_add_scan_prepends() {
        let mut history = ScanHistory::with_sample_data();
        let mut newest = history.scans()[3].clone();
        newest.id = history.next_id();
        history.add_scan(newest);

        assert_eq!(history.len(), 5);
        assert_eq!(history.scans()[0].id, "scan-005");
        assert_eq!(history.recent(3).len(), 3);
        assert_eq!(history.recent(10).len(), 5);
    }

    #[test]
    fn test_next_id_on_empty_history() {
        assert_eq!(ScanHistory::new().next_id(), "scan-001");
    }

    #[tokio::test]
    async fn test_from_outcome() {
        let files: Vec<_> = (0..20).map(|i| FileEntry::new(format!("f{}.exe", i), 100)).collect();
        let mut simulator = ScanSimulator::seeded(17, ScanOptions::instant());
        let outcome = simulator.scan_files(&files, None).await;

        let item = ScanHistoryItem::from_outcome("scan-100", Utc::now(), &outcome);
        assert_eq!(item.files_scanned, 20);
        assert_eq!(item.threats.len(), outcome.summary.threats_found);
        assert_eq!(item.threats_detected, item.threats.len());
        assert_eq!(item.duration, format_duration(outcome.summary.scan_duration));
        assert_eq!(
            item.status == HistoryStatus::Clean,
            outcome.summary.threats_found == 0
        );
    }
}
