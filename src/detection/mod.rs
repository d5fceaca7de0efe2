//! Threat Classification Strategies
//!
//! The "AI" side of the scanner. Neither strategy inspects file contents;
//! both only look at a path. Scores are in `0.0..=1.0`.
//! - `rules`: fixed path heuristics, always ready
//! - `logistic`: a two-feature logistic model trained on scan history

mod logistic;
mod rules;

pub use logistic::LogisticClassifier;
pub use rules::RuleBasedClassifier;

use crate::models::ScanHistoryItem;
use crate::{SentinelError, SentinelResult};
use clap::ValueEnum;
use regex::Regex;
use std::fmt;

/// Result of a training request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    /// Model fitted on this many threat samples
    Trained { samples: usize },
    /// Not enough threats in history to fit
    InsufficientData { samples: usize, required: usize },
    /// Strategy has nothing to learn
    Skipped,
}

/// Pluggable path classifier
pub trait ThreatClassifier: Send {
    fn name(&self) -> &str;

    /// Learn from past scans
    fn train(&mut self, history: &[ScanHistoryItem]) -> TrainingOutcome;

    /// Suspicion score for a path; an unready model answers 0.0
    fn score_path(&self, path: &str) -> f64;

    fn is_ready(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassifierKind {
    /// Fixed path heuristics
    Rules,
    /// Logistic model trained on scan history
    Logistic,
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::Rules => write!(f, "rules"),
            ClassifierKind::Logistic => write!(f, "logistic"),
        }
    }
}

/// Build the selected strategy
pub fn build_classifier(kind: ClassifierKind) -> SentinelResult<Box<dyn ThreatClassifier>> {
    log::debug!("Building {} classifier", kind);
    let classifier: Box<dyn ThreatClassifier> = match kind {
        ClassifierKind::Rules => Box::new(RuleBasedClassifier::new()?),
        ClassifierKind::Logistic => Box::new(LogisticClassifier::new()?),
    };
    Ok(classifier)
}

const EXECUTABLE_PATTERN: &str = r"(?i)\.(exe|bat|cmd|msi|dll|sh|jar)$";
const KEYWORD_PATTERN: &str = r"(?i)(crack|keygen|patch|warez|torrent|pirate)";

/// Boolean traits of a path shared by both strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathFeatures {
    pub executable_extension: bool,
    pub suspicious_keyword: bool,
    pub download_location: bool,
}

/// Compiled path patterns
pub struct PathHeuristics {
    executable: Regex,
    keywords: Regex,
}

impl PathHeuristics {
    pub fn new() -> SentinelResult<Self> {
        let compile =
            |pattern: &str| Regex::new(pattern).map_err(|e| SentinelError::regex(e, pattern));

        Ok(Self {
            executable: compile(EXECUTABLE_PATTERN)?,
            keywords: compile(KEYWORD_PATTERN)?,
        })
    }

    pub fn features(&self, path: &str) -> PathFeatures {
        PathFeatures {
            executable_extension: self.executable.is_match(path),
            suspicious_keyword: self.keywords.is_match(path),
            download_location: path.contains("download") || path.contains("temp"),
        }
    }
}
