//! Application state: the protection store, the scan history and the
//! classifier, changed only through the operations below.

use crate::detection::{ThreatClassifier, TrainingOutcome};
use crate::history::ScanHistory;
use crate::models::{FileEntry, RiskAssessment, ScanHistoryItem, SystemStatus};
use crate::protection::{FeatureStatus, ProtectionState};
use crate::scanner::{ScanOutcome, ScanSimulator};
use crate::threat_intel::evaluate_system_risk;
use crate::ui::UiEvent;
use crate::SentinelResult;
use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::sync::mpsc;

/// Read-only snapshot for the dashboard view
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub system_status: SystemStatus,
    pub risk: RiskAssessment,
    pub active_features: usize,
    pub total_features: usize,
    pub ai_enabled: bool,
    pub ai_learning_mode: bool,
    pub classifier: String,
    pub total_scans: usize,
    pub last_scan: Option<ScanHistoryItem>,
}

pub struct AppState {
    protection: ProtectionState,
    history: ScanHistory,
    classifier: Box<dyn ThreatClassifier>,
}

impl AppState {
    pub fn new(
        protection: ProtectionState,
        history: ScanHistory,
        classifier: Box<dyn ThreatClassifier>,
    ) -> Self {
        let mut state = Self {
            protection,
            history,
            classifier,
        };
        if state.protection.ai_enabled {
            state.retrain();
        }
        state.refresh_system_status();
        state
    }

    pub fn protection(&self) -> &ProtectionState {
        &self.protection
    }

    pub fn history(&self) -> &ScanHistory {
        &self.history
    }

    pub fn classifier(&self) -> &dyn ThreatClassifier {
        self.classifier.as_ref()
    }

    /// Scan a selection, record it and refresh the derived status.
    ///
    /// The classifier is retrained on the grown history while AI is enabled.
    /// An empty selection is a no-op and records nothing.
    pub async fn run_scan<R: Rng>(
        &mut self,
        files: &[FileEntry],
        simulator: &mut ScanSimulator<R>,
        ui: Option<&mpsc::Sender<UiEvent>>,
        now: DateTime<Utc>,
    ) -> ScanOutcome {
        let outcome = simulator.scan_files(files, ui).await;

        if files.is_empty() {
            log::info!("Empty selection, nothing recorded");
            return outcome;
        }

        let item = ScanHistoryItem::from_outcome(self.history.next_id(), now, &outcome);
        self.add_scan(item);

        if self.protection.ai_enabled {
            self.retrain();
        }

        outcome
    }

    pub fn add_scan(&mut self, scan: ScanHistoryItem) {
        self.history.add_scan(scan);
        self.refresh_system_status();
    }

    pub fn toggle_feature(&mut self, id: &str, now: DateTime<Utc>) -> SentinelResult<FeatureStatus> {
        let status = self.protection.toggle_feature(id, now)?;
        self.refresh_system_status();
        Ok(status)
    }

    pub fn toggle_ai(&mut self) -> bool {
        let enabled = self.protection.toggle_ai();
        if enabled {
            self.retrain();
        }
        self.refresh_system_status();
        enabled
    }

    /// Learning mode is a displayed preference; retraining follows `ai_enabled`
    pub fn toggle_ai_learning(&mut self) -> bool {
        self.protection.toggle_ai_learning()
    }

    pub fn evaluate_risk(&self) -> RiskAssessment {
        evaluate_system_risk(self.history.scans(), self.protection.active_feature_count())
    }

    /// Recompute the stored system status from features and history
    pub fn refresh_system_status(&mut self) -> SystemStatus {
        let status = self.protection.protection_status(self.history.scans());
        if status != self.protection.system_status {
            log::info!("System status: {} -> {}", self.protection.system_status, status);
        }
        self.protection.set_system_status(status);
        status
    }

    /// Path suspicion from the active classifier; 0.0 while AI is off
    pub fn classify_path(&self, path: &str) -> f64 {
        if !self.protection.ai_enabled {
            return 0.0;
        }
        self.classifier.score_path(path)
    }

    pub fn retrain(&mut self) -> TrainingOutcome {
        let outcome = self.classifier.train(self.history.scans());
        log::debug!("Classifier {} training: {:?}", self.classifier.name(), outcome);
        outcome
    }

    /// Forget every recorded scan
    pub fn reset(&mut self) {
        self.history.clear();
        self.refresh_system_status();
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            system_status: self.protection.system_status,
            risk: self.evaluate_risk(),
            active_features: self.protection.active_feature_count(),
            total_features: self.protection.features.len(),
            ai_enabled: self.protection.ai_enabled,
            ai_learning_mode: self.protection.ai_learning_mode,
            classifier: self.classifier.name().to_string(),
            total_scans: self.history.len(),
            last_scan: self.history.scans().first().cloned(),
        }
    }

    /// Hand the state back for persistence
    pub fn into_parts(self) -> (ProtectionState, ScanHistory) {
        (self.protection, self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{build_classifier, ClassifierKind};
    use crate::models::RiskStatus;
    use crate::scanner::ScanOptions;

    fn state(history: ScanHistory) -> SentinelResult<AppState> {
        Ok(AppState::new(
            ProtectionState::default(),
            history,
            build_classifier(ClassifierKind::Rules)?,
        ))
    }

    #[tokio::test]
    async fn test_run_scan_records_history() -> SentinelResult<()> {
        let mut app = state(ScanHistory::with_sample_data())?;
        let mut simulator = ScanSimulator::seeded(21, ScanOptions::instant());
        let files = vec![FileEntry::new("a.exe", 10), FileEntry::new("b.txt", 20)];

        let outcome = app.run_scan(&files, &mut simulator, None, Utc::now()).await;
        assert_eq!(app.history().len(), 5);
        let newest = &app.history().scans()[0];
        assert_eq!(newest.id, "scan-005");
        assert_eq!(newest.files_scanned, 2);
        assert_eq!(newest.threats_detected, outcome.summary.threats_found);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_scan_records_nothing() -> SentinelResult<()> {
        let mut app = state(ScanHistory::new())?;
        let mut simulator = ScanSimulator::seeded(1, ScanOptions::instant());

        let outcome = app.run_scan(&[], &mut simulator, None, Utc::now()).await;
        assert_eq!(outcome.summary.scanned_files, 0);
        assert!(app.history().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_scan_retrains_while_ai_enabled() -> SentinelResult<()> {
        let mut app = AppState::new(
            ProtectionState::default(),
            ScanHistory::new(),
            build_classifier(ClassifierKind::Logistic)?,
        );
        assert!(!app.protection().ai_learning_mode);
        assert!(!app.classifier().is_ready());

        let options = ScanOptions {
            detection_probability: 1.0,
            ..ScanOptions::instant()
        };
        let mut simulator = ScanSimulator::seeded(13, options);
        let files: Vec<_> = (0..10)
            .map(|i| FileEntry::new(format!("payload_{}.exe", i), 512))
            .collect();

        app.run_scan(&files, &mut simulator, None, Utc::now()).await;
        assert!(app.classifier().is_ready());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_scan_skips_training_while_ai_disabled() -> SentinelResult<()> {
        let mut app = AppState::new(
            ProtectionState::default(),
            ScanHistory::new(),
            build_classifier(ClassifierKind::Logistic)?,
        );
        app.toggle_ai();

        let options = ScanOptions {
            detection_probability: 1.0,
            ..ScanOptions::instant()
        };
        let mut simulator = ScanSimulator::seeded(13, options);
        let files = vec![FileEntry::new("a.exe", 1); 10];

        app.run_scan(&files, &mut simulator, None, Utc::now()).await;
        assert!(!app.classifier().is_ready());
        Ok(())
    }

    #[test]
    fn test_sample_history_with_all_features() -> SentinelResult<()> {
        // newest three scans hold one medium, one high and one critical threat
        let app = state(ScanHistory::with_sample_data())?;
        let risk = app.evaluate_risk();
        assert_eq!(risk.score, 0);
        assert_eq!(risk.status, RiskStatus::AtRisk);
        assert_eq!(app.protection().system_status, SystemStatus::AtRisk);
        Ok(())
    }

    #[test]
    fn test_disabling_features_compromises() -> SentinelResult<()> {
        let mut app = state(ScanHistory::with_sample_data())?;
        let now = Utc::now();
        for id in ["real-time", "web-shield", "ransomware", "network"] {
            app.toggle_feature(id, now)?;
        }

        assert_eq!(app.protection().active_feature_count(), 2);
        assert_eq!(app.protection().system_status, SystemStatus::Compromised);
        Ok(())
    }

    #[test]
    fn test_ai_off_uses_feature_count() -> SentinelResult<()> {
        let mut app = state(ScanHistory::with_sample_data())?;
        assert!(!app.toggle_ai());
        assert_eq!(app.protection().system_status, SystemStatus::Protected);
        assert_eq!(app.classify_path("downloads/keygen.exe"), 0.0);

        app.toggle_feature("identity", Utc::now())?;
        assert_eq!(app.protection().system_status, SystemStatus::AtRisk);
        Ok(())
    }

    #[test]
    fn test_reset_and_dashboard() -> SentinelResult<()> {
        let mut app = state(ScanHistory::with_sample_data())?;
        assert_eq!(app.dashboard().total_scans, 4);

        app.reset();
        let dashboard = app.dashboard();
        assert_eq!(dashboard.total_scans, 0);
        assert!(dashboard.last_scan.is_none());
        assert_eq!(dashboard.risk.score, 0);
        assert_eq!(dashboard.system_status, SystemStatus::Protected);
        Ok(())
    }
}
