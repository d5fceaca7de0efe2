use crate::models::{ScanStatus, Severity};
use crate::utils::truncate_display;
use crate::SentinelResult;
use console::{style, Term};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

/// Progress notifications emitted by the scan simulator
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    FileStarted { index: usize, name: String, message: String },
    ThreatFound { file: String, threat_name: String, severity: Severity },
    FileCompleted { status: ScanStatus, threats: usize },
    Complete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub files_processed: u64,
    pub threats_found: u64,
    pub infected_files: u64,
}

pub struct ScanProgressUi {
    term: Term,
    _multi_progress: MultiProgress,
    main_progress: ProgressBar,
    file_progress: ProgressBar,
    quiet: bool,
}

impl ScanProgressUi {
    pub fn new(total_files: u64, quiet: bool) -> SentinelResult<Self> {
        let term = Term::stdout();
        let multi_progress = MultiProgress::new();

        let main_style = ProgressStyle::with_template(
            "{prefix} {spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )?
        .progress_chars("█▉▊▋▌▍▎▏  ");

        let main_progress = if quiet {
            ProgressBar::hidden()
        } else {
            term.hide_cursor()?;
            multi_progress.add(ProgressBar::new(total_files))
        };
        main_progress.set_style(main_style);
        main_progress.set_prefix(style("🛡 SCAN").green().bold().to_string());

        let file_progress = if quiet {
            ProgressBar::hidden()
        } else {
            multi_progress.add(ProgressBar::new_spinner())
        };
        file_progress.set_style(ProgressStyle::with_template("{prefix} {msg}")?);
        file_progress.set_prefix(style("📄 FILE").cyan().bold().to_string());

        Ok(Self {
            term,
            _multi_progress: multi_progress,
            main_progress,
            file_progress,
            quiet,
        })
    }

    /// Consume events until the scan completes or the sender is dropped
    pub async fn run(self, mut events: mpsc::Receiver<UiEvent>) -> SentinelResult<ProgressStats> {
        let mut stats = ProgressStats::default();

        while let Some(event) = events.recv().await {
            match event {
                UiEvent::FileStarted { index, name, message } => {
                    log::debug!("UI: File started - #{} {}", index, name);
                    self.file_progress.set_message(format!(
                        "{} {} {}",
                        style("Processing:").dim(),
                        style(truncate_display(&name, 60)).white().bold(),
                        style(message).dim()
                    ));
                }

                UiEvent::ThreatFound { file, threat_name, severity } => {
                    log::debug!("UI: Threat found - {} in {} ({})", threat_name, file, severity);
                    if severity.is_severe() && !self.quiet {
                        self.main_progress.println(format!(
                            "🚨 {} {} in {}",
                            style(severity.to_string().to_uppercase()).red().bold(),
                            style(&threat_name).yellow(),
                            style(&file).dim()
                        ));
                    }
                }

                UiEvent::FileCompleted { status, threats } => {
                    stats.files_processed += 1;
                    stats.threats_found += threats as u64;
                    if status == ScanStatus::Infected {
                        stats.infected_files += 1;
                    }
                    self.main_progress.set_message(
                        style(format!("{} threats", stats.threats_found)).red().bold().to_string(),
                    );
                    self.main_progress.inc(1);
                }

                UiEvent::Complete => {
                    log::debug!("UI: Scan complete");
                    self.main_progress
                        .finish_with_message(style("✅ Scan complete").green().bold().to_string());
                    self.file_progress.finish_and_clear();
                    break;
                }
            }
        }

        if !self.quiet {
            self.term.show_cursor()?;
        }

        Ok(stats)
    }
}

impl Drop for ScanProgressUi {
    fn drop(&mut self) {
        if !self.quiet {
            let _ = self.term.show_cursor();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::send_event;

    #[tokio::test]
    async fn test_quiet_ui_counts_events() -> SentinelResult<()> {
        let ui = ScanProgressUi::new(2, true)?;
        let (tx, rx) = mpsc::channel(16);

        for event in [
            UiEvent::FileStarted {
                index: 0,
                name: "a.exe".to_string(),
                message: "Performing deep scan...".to_string(),
            },
            UiEvent::FileCompleted { status: ScanStatus::Infected, threats: 2 },
            UiEvent::FileCompleted { status: ScanStatus::Clean, threats: 0 },
            UiEvent::Complete,
        ] {
            send_event(&tx, event).await?;
        }

        let stats = ui.run(rx).await?;
        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.threats_found, 2);
        assert_eq!(stats.infected_files, 1);
        Ok(())
    }
}
