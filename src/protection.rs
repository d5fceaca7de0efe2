//! Protection feature toggles and the global AI switches.

use crate::models::{ScanHistoryItem, SystemStatus};
use crate::threat_intel::evaluate_system_risk;
use crate::utils::relative_time_label;
use crate::{SentinelError, SentinelResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    Active,
    Inactive,
}

impl FeatureStatus {
    pub fn flipped(self) -> Self {
        match self {
            FeatureStatus::Active => FeatureStatus::Inactive,
            FeatureStatus::Inactive => FeatureStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionFeature {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: FeatureStatus,
    pub last_updated: DateTime<Utc>,
}

impl ProtectionFeature {
    pub fn is_active(&self) -> bool {
        self.status == FeatureStatus::Active
    }

    /// "Just now", "15 minutes ago", ... relative to `now`
    pub fn last_updated_label(&self, now: DateTime<Utc>) -> String {
        relative_time_label(self.last_updated, now)
    }
}

/// Feature toggles plus the AI flags and the last computed system status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionState {
    pub features: Vec<ProtectionFeature>,
    pub ai_enabled: bool,
    pub ai_learning_mode: bool,
    pub system_status: SystemStatus,
}

impl ProtectionState {
    /// Six active features with staggered update times
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        let feature = |id: &str, name: &str, description: &str, age_minutes: i64| ProtectionFeature {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: FeatureStatus::Active,
            last_updated: now - Duration::minutes(age_minutes),
        };

        Self {
            features: vec![
                feature("real-time", "Real-time Protection", "Monitors system continuously for malware", 1),
                feature("web-shield", "Web Shield", "Blocks malicious websites and downloads", 15),
                feature("ransomware", "Ransomware Shield", "Prevents unauthorized file encryption", 60),
                feature("network", "Network Inspector", "Monitors network traffic for suspicious activity", 35),
                feature("behavior", "Behavior Shield", "Analyzes application behavior for suspicious patterns", 17),
                feature("identity", "Identity Protection", "Protects personal information from theft", 45),
            ],
            ai_enabled: true,
            ai_learning_mode: false,
            system_status: SystemStatus::Protected,
        }
    }

    pub fn feature(&self, id: &str) -> Option<&ProtectionFeature> {
        self.features.iter().find(|f| f.id == id)
    }

    fn feature_mut(&mut self, id: &str) -> SentinelResult<&mut ProtectionFeature> {
        self.features
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| SentinelError::UnknownFeature(id.to_string()))
    }

    /// Flip a feature and stamp its update time; returns the new status
    pub fn toggle_feature(&mut self, id: &str, now: DateTime<Utc>) -> SentinelResult<FeatureStatus> {
        let feature = self.feature_mut(id)?;
        feature.status = feature.status.flipped();
        feature.last_updated = now;
        log::info!("Feature {} is now {:?}", feature.id, feature.status);
        Ok(feature.status)
    }

    /// Stamp a feature as freshly updated without changing its status
    pub fn touch_feature(&mut self, id: &str, now: DateTime<Utc>) -> SentinelResult<()> {
        self.feature_mut(id)?.last_updated = now;
        Ok(())
    }

    pub fn toggle_ai(&mut self) -> bool {
        self.ai_enabled = !self.ai_enabled;
        self.ai_enabled
    }

    pub fn toggle_ai_learning(&mut self) -> bool {
        self.ai_learning_mode = !self.ai_learning_mode;
        self.ai_learning_mode
    }

    pub fn set_system_status(&mut self, status: SystemStatus) {
        self.system_status = status;
    }

    pub fn active_feature_count(&self) -> usize {
        self.features.iter().filter(|f| f.is_active()).count()
    }

    pub fn inactive_features(&self) -> impl Iterator<Item = &ProtectionFeature> {
        self.features.iter().filter(|f| !f.is_active())
    }

    /// Overall status: the risk evaluator when AI is on, otherwise
    /// protected only while every feature is active
    pub fn protection_status(&self, history: &[ScanHistoryItem]) -> SystemStatus {
        if self.ai_enabled {
            evaluate_system_risk(history, self.active_feature_count()).status.into()
        } else if self.inactive_features().next().is_none() {
            SystemStatus::Protected
        } else {
            SystemStatus::AtRisk
        }
    }
}

impl Default for ProtectionState {
    fn default() -> Self {
        Self::with_defaults(Utc::now())
    }
}
