//! Aggregation of per-file results

use crate::models::{ScanResult, ScanSummary};

/// Fold results into a summary in a single pass over their threats.
///
/// The duration is the sum of simulated scan times, rounded to whole seconds.
pub fn summarize(results: &[ScanResult]) -> ScanSummary {
    let mut summary = ScanSummary {
        scanned_files: results.len(),
        ..ScanSummary::default()
    };

    let mut total_ms: u64 = 0;

    for result in results {
        total_ms += result.scan_time;
        for threat in &result.threats {
            summary.threats_found += 1;
            summary.threats_by_severity.record(threat.severity);
            *summary.threats_by_type.entry(threat.category).or_insert(0) += 1;
        }
    }

    summary.scan_duration = (total_ms + 500) / 1000;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DetectionMethod, ScanStatus, Severity, Threat, ThreatCategory};

    fn result(name: &str, scan_time: u64, threats: Vec<(Severity, ThreatCategory)>) -> ScanResult {
        let threats: Vec<Threat> = threats
            .into_iter()
            .enumerate()
            .map(|(i, (severity, category))| Threat {
                id: format!("t-{}", i),
                name: format!("Threat {}", i),
                file_path: name.to_string(),
                severity,
                category,
                detection_method: DetectionMethod::Heuristic,
            })
            .collect();
        ScanResult {
            file_name: name.to_string(),
            file_path: name.to_string(),
            file_size: "1 KB".to_string(),
            scan_status: ScanStatus::from_threats(&threats),
            threats,
            scan_time,
        }
    }

    #[test]
    fn test_summarize_counts() {
        let results = vec![
            result("a", 1500, vec![(Severity::High, ThreatCategory::Trojan)]),
            result("b", 1200, vec![]),
            result(
                "c",
                2900,
                vec![
                    (Severity::Medium, ThreatCategory::Adware),
                    (Severity::High, ThreatCategory::Trojan),
                    (Severity::Critical, ThreatCategory::Rootkit),
                ],
            ),
        ];

        let summary = summarize(&results);
        assert_eq!(summary.scanned_files, 3);
        assert_eq!(summary.threats_found, 4);
        assert_eq!(summary.scan_duration, 6);
        assert_eq!(summary.threats_by_severity.high, 2);
        assert_eq!(summary.threats_by_severity.medium, 1);
        assert_eq!(summary.threats_by_severity.critical, 1);
        assert_eq!(summary.threats_by_severity.low, 0);
        assert_eq!(summary.threats_by_type.get(&ThreatCategory::Trojan), Some(&2));
        assert_eq!(summary.threats_by_type.get(&ThreatCategory::Worm), None);
    }

    #[test]
    fn test_duration_rounds_to_nearest_second() {
        assert_eq!(summarize(&[result("a", 1499, vec![])]).scan_duration, 1);
        assert_eq!(summarize(&[result("a", 1500, vec![])]).scan_duration, 2);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary, ScanSummary::default());
    }
}
