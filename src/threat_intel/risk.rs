//! Risk Scoring for the System

use crate::models::{RiskAssessment, RiskStatus, ScanHistoryItem, Severity};

/// Number of most recent scans the evaluator looks at
pub const RECENT_SCAN_WINDOW: usize = 3;

/// Score the system from the newest scans and the number of active protections.
///
/// `history` is newest first. Each active feature discounts the score.
pub fn evaluate_system_risk(history: &[ScanHistoryItem], active_features: usize) -> RiskAssessment {
    let active = active_features as u32;

    if history.is_empty() {
        let score = 10u32.saturating_sub(active.saturating_mul(2));
        let status = if score > 5 || active <= 1 {
            RiskStatus::AtRisk
        } else {
            RiskStatus::Safe
        };
        return RiskAssessment { score, status };
    }

    let mut critical = 0u32;
    let mut high = 0u32;
    let mut medium = 0u32;

    for threat in history
        .iter()
        .take(RECENT_SCAN_WINDOW)
        .flat_map(|scan| scan.threats.iter())
    {
        match threat.severity {
            Severity::Critical => critical += 1,
            Severity::High => high += 1,
            Severity::Medium => medium += 1,
            Severity::Low => {}
        }
    }

    let base = critical * 10 + high * 5 + medium * 2;
    let score = base.saturating_sub(active.saturating_mul(3));

    let status = if critical > 0 && active < 3 {
        RiskStatus::Compromised
    } else if high > 0 || score > 5 {
        RiskStatus::AtRisk
    } else {
        RiskStatus::Safe
    };

    log::debug!(
        "Risk evaluation: critical={} high={} medium={} active={} -> score {} ({})",
        critical,
        high,
        medium,
        active,
        score,
        status
    );

    RiskAssessment { score, status }
}
