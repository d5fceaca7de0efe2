//! Threat Intelligence Module
//!
//! Holds the catalog of threat archetypes the simulator draws from and the
//! severity-weighted risk evaluation over scan history.

mod catalog;
mod risk;

pub use risk::{evaluate_system_risk, RECENT_SCAN_WINDOW};

use crate::models::{DetectionMethod, Severity, Threat, ThreatCategory};

/// A catalog entry: everything a threat carries except where and how it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatArchetype {
    /// Catalog id (e.g., ran-004)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    pub severity: Severity,
    pub category: ThreatCategory,
}

impl ThreatArchetype {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        severity: Severity,
        category: ThreatCategory,
    ) -> Self {
        Self {
            id,
            name,
            severity,
            category,
        }
    }

    /// Stamp the archetype with a location and detection method
    pub fn instantiate(&self, file_path: impl Into<String>, method: DetectionMethod) -> Threat {
        Threat {
            id: self.id.to_string(),
            name: self.name.to_string(),
            file_path: file_path.into(),
            severity: self.severity,
            category: self.category,
            detection_method: method,
        }
    }
}

/// Static threat catalog
pub struct ThreatCatalog {
    archetypes: Vec<ThreatArchetype>,
}

impl ThreatCatalog {
    pub fn new() -> Self {
        Self {
            archetypes: catalog::load_known_threats(),
        }
    }

    pub fn archetypes(&self) -> &[ThreatArchetype] {
        &self.archetypes
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Archetype at a position, as drawn by the simulator
    pub fn get(&self, index: usize) -> Option<&ThreatArchetype> {
        self.archetypes.get(index)
    }

    /// Look up an archetype by catalog id
    pub fn find(&self, id: &str) -> Option<&ThreatArchetype> {
        self.archetypes.iter().find(|a| a.id == id)
    }
}

impl Default for ThreatCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_archetypes() {
        let catalog = ThreatCatalog::new();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.find("ran-004").is_some());
        assert!(catalog.find("nope-000").is_none());
    }

    #[test]
    fn test_catalog_severities() {
        let catalog = ThreatCatalog::new();
        let critical: Vec<_> = catalog
            .archetypes()
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .map(|a| a.id)
            .collect();
        assert_eq!(critical, vec!["ran-004", "rkt-005"]);
        assert!(catalog.archetypes().iter().all(|a| a.severity != Severity::Low));
    }

    #[test]
    fn test_instantiate_tags_path_and_method() {
        let catalog = ThreatCatalog::new();
        let archetype = catalog.find("spy-003").expect("spyware archetype");
        let threat = archetype.instantiate("setup.exe", DetectionMethod::Heuristic);

        assert_eq!(threat.id, "spy-003");
        assert_eq!(threat.file_path, "setup.exe");
        assert_eq!(threat.category, ThreatCategory::Spyware);
        assert_eq!(threat.detection_method, DetectionMethod::Heuristic);
    }
}
