//! Sentinel
//!
//! A simulated antivirus: randomized mock scans of user selected files,
//! severity-weighted risk scoring over scan history, and protection toggles.
//! No file contents are ever inspected.

pub mod app;
pub mod cli;
pub mod detection;
pub mod errors;
pub mod history;
pub mod models;
pub mod protection;
pub mod reporter;
pub mod scanner;
pub mod storage;
pub mod threat_intel;
pub mod ui;
pub mod utils;

pub use app::AppState;
pub use errors::{SentinelError, SentinelResult};
pub use scanner::{ScanOptions, ScanOutcome, ScanSimulator};
pub use threat_intel::evaluate_system_risk;
