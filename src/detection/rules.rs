use super::{PathHeuristics, ThreatClassifier, TrainingOutcome};
use crate::models::ScanHistoryItem;
use crate::SentinelResult;

/// Stub strategy: a fixed weighting of path traits
pub struct RuleBasedClassifier {
    heuristics: PathHeuristics,
}

impl RuleBasedClassifier {
    pub fn new() -> SentinelResult<Self> {
        Ok(Self {
            heuristics: PathHeuristics::new()?,
        })
    }
}

impl ThreatClassifier for RuleBasedClassifier {
    fn name(&self) -> &str {
        "rules"
    }

    fn train(&mut self, _history: &[ScanHistoryItem]) -> TrainingOutcome {
        TrainingOutcome::Skipped
    }

    fn score_path(&self, path: &str) -> f64 {
        let features = self.heuristics.features(path);
        let mut score = 0.0;

        if features.executable_extension {
            score += 0.45;
        }
        if features.suspicious_keyword {
            score += 0.4;
        }
        if features.download_location {
            score += 0.15;
        }

        f64::min(score, 1.0)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_scores() -> SentinelResult<()> {
        let mut classifier = RuleBasedClassifier::new()?;
        assert!(classifier.is_ready());
        assert_eq!(classifier.train(&[]), TrainingOutcome::Skipped);

        assert_eq!(classifier.score_path("photos/cat.png"), 0.0);
        let installer = classifier.score_path("setup.msi");
        let pirated = classifier.score_path("downloads/keygen.exe");
        assert!(installer > 0.0);
        assert!(pirated > installer);
        assert!(pirated <= 1.0);
        Ok(())
    }
}
