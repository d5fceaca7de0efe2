use clap::Parser;
use env_logger::Env;
use sentinel::cli::{Args, Command};
use sentinel::detection::build_classifier;
use sentinel::models::FileEntry;
use sentinel::reporter;
use sentinel::storage::{write_report, StateStore};
use sentinel::ui::ScanProgressUi;
use sentinel::{AppState, ScanOptions, ScanSimulator, SentinelError, SentinelResult};
use tokio::sync::mpsc;

fn collect_files(args: &[std::path::PathBuf]) -> Vec<FileEntry> {
    args.iter()
        .filter_map(|path| match FileEntry::from_path(path) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping {:?}: {}", path, e);
                None
            }
        })
        .collect()
}

async fn run(args: Args) -> SentinelResult<()> {
    let store = StateStore::new(&args.state_dir);
    let protection = store.load_protection()?;
    let history = store.load_history(!args.no_sample_data)?;
    let classifier = build_classifier(args.classifier)?;

    let mut app = AppState::new(protection, history, classifier);
    let now = chrono::Utc::now();

    match &args.command {
        Command::Scan { files, seed, instant, output } => {
            let entries = collect_files(files);
            if entries.is_empty() {
                println!("No files to scan");
                return Ok(());
            }

            let options = if *instant { ScanOptions::instant() } else { ScanOptions::default() };
            let mut simulator = match seed {
                Some(seed) => ScanSimulator::seeded(*seed, options),
                None => ScanSimulator::from_entropy(options),
            };

            let ui = ScanProgressUi::new(entries.len() as u64, args.quiet)?;
            let (ui_sender, ui_receiver) = mpsc::channel(1000);
            let ui_task = tokio::spawn(async move {
                if let Err(e) = ui.run(ui_receiver).await {
                    log::error!("UI task error: {}", e);
                }
            });

            let outcome = app.run_scan(&entries, &mut simulator, Some(&ui_sender), now).await;
            drop(ui_sender);
            ui_task.await?;

            if let Some(path) = output {
                write_report(&outcome, path)?;
            }
            println!("{}", reporter::render_scan_outcome(&outcome)?);
            println!("{}", reporter::render_dashboard(&app.dashboard())?);
        }

        Command::History { limit } => {
            let scans = match limit {
                Some(limit) => app.history().recent(*limit),
                None => app.history().scans(),
            };
            println!("{}", reporter::render_history(scans)?);
        }

        Command::Show { id } => {
            let scan = app
                .history()
                .get(id)
                .ok_or_else(|| SentinelError::UnknownScan(id.clone()))?;
            println!(
                "{} - {} ({})",
                scan.id,
                scan.date.format("%Y-%m-%d %H:%M"),
                scan.duration
            );
            println!("{}", reporter::render_threat_report(&scan.summary, &scan.threats)?);
        }

        Command::Risk => {
            println!("{}", reporter::render_dashboard(&app.dashboard())?);
        }

        Command::Features => {
            println!("{}", reporter::render_features(&app.protection().features, now)?);
        }

        Command::Toggle { feature } => {
            let status = app.toggle_feature(feature, now)?;
            println!("{} is now {:?}", feature, status);
            println!("{}", reporter::render_dashboard(&app.dashboard())?);
        }

        Command::Ai { learning } => {
            if *learning {
                let on = app.toggle_ai_learning();
                println!("AI learning mode {}", if on { "enabled" } else { "disabled" });
            } else {
                let on = app.toggle_ai();
                println!("AI protection {}", if on { "enabled" } else { "disabled" });
            }
        }

        Command::Classify { path } => {
            let classifier = app.classifier();
            if !classifier.is_ready() {
                log::warn!("Classifier {} has no model yet, scores are neutral", classifier.name());
            }
            println!("{}: {:.3} ({})", path, app.classify_path(path), classifier.name());
        }

        Command::Reset => {
            app.reset();
            println!("Scan history cleared");
        }
    }

    let (protection, history) = app.into_parts();
    store.save_protection(&protection)?;
    store.save_history(&history)?;
    log::debug!("State saved to {:?}", store.dir());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let log_level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    log::info!("Sentinel starting with args: {:?}", args);

    run(args).await?;

    Ok(())
}
