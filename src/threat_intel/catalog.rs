//! Known threat archetypes

use crate::models::{Severity, ThreatCategory};

use super::ThreatArchetype;

/// Load the static archetype catalog
pub fn load_known_threats() -> Vec<ThreatArchetype> {
    vec![
        ThreatArchetype::new("trj-001", "Sentinel.Trojan.Agent", Severity::High, ThreatCategory::Trojan),
        ThreatArchetype::new("adw-002", "Sentinel.Adware.Banner", Severity::Medium, ThreatCategory::Adware),
        ThreatArchetype::new("spy-003", "Sentinel.Spyware.KeyLogger", Severity::High, ThreatCategory::Spyware),
        ThreatArchetype::new("ran-004", "Sentinel.Ransomware.Encrypt", Severity::Critical, ThreatCategory::Ransomware),
        ThreatArchetype::new("rkt-005", "Sentinel.Rootkit.Hidden", Severity::Critical, ThreatCategory::Rootkit),
        ThreatArchetype::new("mal-006", "Sentinel.Malware.Generic", Severity::Medium, ThreatCategory::Malware),
        ThreatArchetype::new("wrm-007", "Sentinel.Worm.Spread", Severity::High, ThreatCategory::Worm),
        ThreatArchetype::new("bdr-008", "Sentinel.Backdoor.Access", Severity::High, ThreatCategory::Backdoor),
        ThreatArchetype::new("bot-009", "Sentinel.Botnet.Client", Severity::Medium, ThreatCategory::Botnet),
        ThreatArchetype::new("fil-010", "Sentinel.FileInfector", Severity::Medium, ThreatCategory::Virus),
    ]
}
