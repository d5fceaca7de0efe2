//! Text reports for the terminal: scan results, history and the dashboard.

use crate::app::Dashboard;
use crate::models::{ScanHistoryItem, ScanStatus, ScanSummary, Severity, Threat};
use crate::protection::ProtectionFeature;
use crate::scanner::ScanOutcome;
use crate::SentinelResult;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const RULE: &str = "═══════════════════════════════════════";

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::High => "🟠",
        Severity::Medium => "🟡",
        Severity::Low => "🟢",
    }
}

fn status_marker(status: ScanStatus) -> &'static str {
    match status {
        ScanStatus::Infected => "🔴",
        ScanStatus::Suspicious => "🟡",
        ScanStatus::Clean => "🟢",
    }
}

/// Severity and category breakdown plus the threat list
pub fn render_threat_report(summary: &ScanSummary, threats: &[Threat]) -> SentinelResult<String> {
    let mut out = String::new();

    writeln!(out, "\n🎯 THREAT REPORT")?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "📄 Files Scanned: {} ({:.2} files/sec)",
        summary.scanned_files,
        summary.files_per_second()
    )?;
    writeln!(out, "🚨 Threats Found: {}", summary.threats_found)?;
    writeln!(out, "⏱️  Duration: {}s", summary.scan_duration)?;

    if summary.threats_found == 0 {
        writeln!(out, "\n✅ No threats detected")?;
        return Ok(out);
    }

    writeln!(out, "\n🚨 BY SEVERITY")?;
    writeln!(out, "{}", RULE)?;
    for severity in Severity::ALL.iter().rev() {
        let count = summary.threats_by_severity.get(*severity);
        if count > 0 {
            writeln!(out, "{} {}: {}", severity_marker(*severity), severity, count)?;
        }
    }

    writeln!(out, "\n🧬 BY TYPE")?;
    writeln!(out, "{}", RULE)?;
    for (category, count) in &summary.threats_by_type {
        writeln!(out, "   {}: {}", category, count)?;
    }

    writeln!(out, "\n🔍 DETECTED THREATS")?;
    writeln!(out, "{}", RULE)?;
    for (i, threat) in threats.iter().enumerate() {
        writeln!(
            out,
            "{}. {} {} [{}] in {} ({})",
            i + 1,
            severity_marker(threat.severity),
            threat.name,
            threat.category,
            threat.file_path,
            threat.detection_method
        )?;
    }

    Ok(out)
}

/// Per-file lines followed by the threat report
pub fn render_scan_outcome(outcome: &ScanOutcome) -> SentinelResult<String> {
    let mut out = String::new();

    writeln!(out, "\n📁 FILES")?;
    writeln!(out, "{}", RULE)?;
    for result in &outcome.results {
        writeln!(
            out,
            "{} {} ({}) - {} [{} ms]",
            status_marker(result.scan_status),
            result.file_name,
            result.file_size,
            result.scan_status,
            result.scan_time
        )?;
    }

    out.push_str(&render_threat_report(&outcome.summary, &outcome.threats())?);
    Ok(out)
}

pub fn render_history(scans: &[ScanHistoryItem]) -> SentinelResult<String> {
    let mut out = String::new();

    writeln!(out, "\n🕘 SCAN HISTORY")?;
    writeln!(out, "{}", RULE)?;
    if scans.is_empty() {
        writeln!(out, "No scans recorded")?;
        return Ok(out);
    }

    for scan in scans {
        writeln!(
            out,
            "{}  {}  {:>8}  {:>6} files  {:>3} threats  {}",
            scan.id,
            scan.date.format("%Y-%m-%d %H:%M"),
            scan.duration,
            scan.files_scanned,
            scan.threats_detected,
            scan.status
        )?;
    }

    Ok(out)
}

pub fn render_features(
    features: &[ProtectionFeature],
    now: DateTime<Utc>,
) -> SentinelResult<String> {
    let mut out = String::new();

    writeln!(out, "\n🛡 PROTECTION FEATURES")?;
    writeln!(out, "{}", RULE)?;
    for feature in features {
        writeln!(
            out,
            "{} {:<22} {:<12} {:<9} {}",
            if feature.is_active() { "🟢" } else { "⚪" },
            feature.name,
            feature.id,
            format!("{:?}", feature.status).to_lowercase(),
            feature.last_updated_label(now)
        )?;
    }

    Ok(out)
}

pub fn render_dashboard(dashboard: &Dashboard) -> SentinelResult<String> {
    let mut out = String::new();

    writeln!(out, "\n📊 SYSTEM STATUS: {}", dashboard.system_status)?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Risk score: {} ({})",
        dashboard.risk.score, dashboard.risk.status
    )?;
    writeln!(
        out,
        "Active features: {}/{}",
        dashboard.active_features, dashboard.total_features
    )?;
    writeln!(
        out,
        "AI protection: {}{}",
        if dashboard.ai_enabled { "on" } else { "off" },
        if dashboard.ai_learning_mode { " (learning)" } else { "" }
    )?;
    writeln!(out, "Classifier: {}", dashboard.classifier)?;
    writeln!(out, "Scans recorded: {}", dashboard.total_scans)?;
    if let Some(last) = &dashboard.last_scan {
        writeln!(
            out,
            "Last scan: {} on {} ({} threats)",
            last.id,
            last.date.format("%Y-%m-%d %H:%M"),
            last.threats_detected
        )?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ScanHistory;
    use crate::protection::ProtectionState;

    #[test]
    fn test_clean_report() -> SentinelResult<()> {
        let summary = ScanSummary {
            scanned_files: 3,
            scan_duration: 0,
            ..Default::default()
        };
        let report = render_threat_report(&summary, &[])?;
        assert!(report.contains("Files Scanned: 3 (3.00 files/sec)"));
        assert!(report.contains("No threats detected"));
        Ok(())
    }

    #[test]
    fn test_report_lists_threats() -> SentinelResult<()> {
        let history = ScanHistory::with_sample_data();
        let scan = history.get("scan-002").expect("scan-002");
        let report = render_threat_report(&scan.summary, &scan.threats)?;

        assert!(report.contains("Sentinel.Spyware.KeyLogger"));
        assert!(report.contains("high: 1"));
        assert!(report.contains("malware: 1"));
        assert!(!report.contains("critical:"));
        Ok(())
    }

    #[test]
    fn test_history_table() -> SentinelResult<()> {
        let history = ScanHistory::with_sample_data();
        let table = render_history(history.scans())?;
        assert!(table.contains("scan-004"));
        assert!(table.contains("threats-found"));
        assert!(render_history(&[])?.contains("No scans recorded"));
        Ok(())
    }

    #[test]
    fn test_features_listing() -> SentinelResult<()> {
        let now = Utc::now();
        let state = ProtectionState::with_defaults(now);
        let listing = render_features(&state.features, now)?;
        assert!(listing.contains("Web Shield"));
        assert!(listing.contains("15 minutes ago"));
        Ok(())
    }
}
