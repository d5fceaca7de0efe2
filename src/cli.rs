use crate::detection::ClassifierKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sentinel",
    about = "Sentinel - simulated antivirus scanner with risk scoring",
    version
)]
pub struct Args {
    /// Directory holding protection and history state
    #[arg(long, global = true, default_value = ".sentinel")]
    pub state_dir: PathBuf,

    /// Start an empty history instead of the demo scans
    #[arg(long, global = true)]
    pub no_sample_data: bool,

    /// Classification strategy for path analysis
    #[arg(long, global = true, default_value = "logistic")]
    pub classifier: ClassifierKind,

    /// Enable verbose logging of all operations
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide progress bars and use quiet output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Simulate a scan of the given files (only names and sizes are read)
    Scan {
        /// Files to scan
        files: Vec<PathBuf>,

        /// Seed for a reproducible scan
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the simulated per-file delay
        #[arg(long)]
        instant: bool,

        /// Write the scan outcome to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List recorded scans, newest first
    History {
        /// Maximum number of scans to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the threat report of one recorded scan
    Show {
        /// Scan id (e.g. scan-002)
        id: String,
    },

    /// Evaluate system risk and show the dashboard
    Risk,

    /// List protection features
    Features,

    /// Toggle a protection feature on or off
    Toggle {
        /// Feature id (e.g. web-shield)
        feature: String,
    },

    /// Toggle AI protection, or its learning mode with --learning
    Ai {
        #[arg(long)]
        learning: bool,
    },

    /// Score a path with the active classifier
    Classify { path: String },

    /// Clear the scan history
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan() {
        let args = Args::parse_from([
            "sentinel", "scan", "a.exe", "b.txt", "--seed", "7", "--instant", "-q",
        ]);
        assert!(args.quiet);
        assert_eq!(args.classifier, ClassifierKind::Logistic);
        assert_eq!(
            args.command,
            Command::Scan {
                files: vec![PathBuf::from("a.exe"), PathBuf::from("b.txt")],
                seed: Some(7),
                instant: true,
                output: None,
            }
        );
    }

    #[test]
    fn test_parse_global_options() {
        let args = Args::parse_from([
            "sentinel", "--state-dir", "/tmp/s", "--classifier", "rules", "toggle", "web-shield",
        ]);
        assert_eq!(args.state_dir, PathBuf::from("/tmp/s"));
        assert_eq!(args.classifier, ClassifierKind::Rules);
        assert_eq!(args.command, Command::Toggle { feature: "web-shield".to_string() });
    }
}
