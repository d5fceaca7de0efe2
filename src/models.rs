use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Ordered risk level of a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Numeric rank, 0 for low up to 3 for critical
    pub fn rank(self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        }
    }

    /// High and critical threats mark a file as infected
    pub fn is_severe(self) -> bool {
        self >= Severity::High
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Category tag of a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatCategory {
    Malware,
    Spyware,
    Trojan,
    Adware,
    Ransomware,
    Rootkit,
    Worm,
    Backdoor,
    Botnet,
    Virus,
}

impl ThreatCategory {
    /// Stable index used as a classifier feature
    pub fn index(self) -> u8 {
        match self {
            ThreatCategory::Malware => 0,
            ThreatCategory::Spyware => 1,
            ThreatCategory::Trojan => 2,
            ThreatCategory::Adware => 3,
            ThreatCategory::Ransomware => 4,
            ThreatCategory::Rootkit => 5,
            ThreatCategory::Worm => 6,
            ThreatCategory::Backdoor => 7,
            ThreatCategory::Botnet => 8,
            ThreatCategory::Virus => 9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThreatCategory::Malware => "malware",
            ThreatCategory::Spyware => "spyware",
            ThreatCategory::Trojan => "trojan",
            ThreatCategory::Adware => "adware",
            ThreatCategory::Ransomware => "ransomware",
            ThreatCategory::Rootkit => "rootkit",
            ThreatCategory::Worm => "worm",
            ThreatCategory::Backdoor => "backdoor",
            ThreatCategory::Botnet => "botnet",
            ThreatCategory::Virus => "virus",
        }
    }
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a threat was (supposedly) detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionMethod {
    #[serde(rename = "Signature matching")]
    Signature,
    #[serde(rename = "Heuristic analysis")]
    Heuristic,
    #[serde(rename = "Behavioral analysis")]
    Behavioral,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMethod::Signature => write!(f, "Signature matching"),
            DetectionMethod::Heuristic => write!(f, "Heuristic analysis"),
            DetectionMethod::Behavioral => write!(f, "Behavioral analysis"),
        }
    }
}

/// A synthetic detected artifact. Fields are set once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threat {
    pub id: String,
    pub name: String,
    pub file_path: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub category: ThreatCategory,
    pub detection_method: DetectionMethod,
}

/// A user selected file: only its name and size are ever looked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Build an entry from filesystem metadata without opening the file
    pub fn from_path(path: &Path) -> crate::SentinelResult<Self> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| crate::SentinelError::io(e, Some(path.to_path_buf())))?;
        if !metadata.is_file() {
            return Err(crate::SentinelError::InvalidPath(path.display().to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| crate::SentinelError::InvalidPath(path.display().to_string()))?;

        Ok(Self {
            name,
            size: metadata.len(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Clean,
    Suspicious,
    Infected,
}

impl ScanStatus {
    /// Infected wins over suspicious; no threats means clean
    pub fn from_threats(threats: &[Threat]) -> Self {
        if threats.iter().any(|t| t.severity.is_severe()) {
            ScanStatus::Infected
        } else if !threats.is_empty() {
            ScanStatus::Suspicious
        } else {
            ScanStatus::Clean
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStatus::Clean => write!(f, "clean"),
            ScanStatus::Suspicious => write!(f, "suspicious"),
            ScanStatus::Infected => write!(f, "infected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub file_name: String,
    pub file_path: String,
    pub file_size: String,
    pub scan_status: ScanStatus,
    pub threats: Vec<Threat>,
    /// Simulated scan time in milliseconds
    pub scan_time: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub scanned_files: usize,
    pub threats_found: usize,
    /// Whole seconds
    pub scan_duration: u64,
    pub threats_by_severity: SeverityCounts,
    pub threats_by_type: BTreeMap<ThreatCategory, usize>,
}

impl ScanSummary {
    /// Throughput, with a zero duration treated as one second
    pub fn files_per_second(&self) -> f64 {
        self.scanned_files as f64 / self.scan_duration.max(1) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryStatus {
    Clean,
    ThreatsFound,
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryStatus::Clean => write!(f, "clean"),
            HistoryStatus::ThreatsFound => write!(f, "threats-found"),
        }
    }
}

/// One persisted scan in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanHistoryItem {
    pub id: String,
    pub date: DateTime<Utc>,
    pub duration: String,
    pub files_scanned: usize,
    pub threats_detected: usize,
    pub status: HistoryStatus,
    pub summary: ScanSummary,
    pub threats: Vec<Threat>,
}

/// Output of the risk evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskStatus {
    Safe,
    AtRisk,
    Compromised,
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskStatus::Safe => write!(f, "safe"),
            RiskStatus::AtRisk => write!(f, "at-risk"),
            RiskStatus::Compromised => write!(f, "compromised"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub status: RiskStatus,
}

/// Overall status shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemStatus {
    #[default]
    Protected,
    AtRisk,
    Compromised,
}

impl From<RiskStatus> for SystemStatus {
    fn from(status: RiskStatus) -> Self {
        match status {
            RiskStatus::Safe => SystemStatus::Protected,
            RiskStatus::AtRisk => SystemStatus::AtRisk,
            RiskStatus::Compromised => SystemStatus::Compromised,
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemStatus::Protected => write!(f, "protected"),
            SystemStatus::AtRisk => write!(f, "at-risk"),
            SystemStatus::Compromised => write!(f, "compromised"),
        }
    }
}
