mod cli;

use std::io;
use std::process;

use anyhow::Context;
use clap::Parser;
use cli::commands::{Cli, Commands};
use cli::progress::CliReporter;
use colored::*;
use dotenv::dotenv;
use size_trim::backup::RsyncTransfer;
use size_trim::platform::{OsFileSystem, SystemMount};
use size_trim::prompt::Prompter;
use size_trim::{render, AppConfig, Collaborators, ScanEngine, Session};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = cli::logging::init_logger();

    let args = Cli::parse();

    let mut config = match size_trim::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    match args.command.unwrap_or(Commands::Run) {
        Commands::Run => run_interactive(config)?,
        Commands::Scan => run_scan(config)?,
        Commands::PrintConfig => {
            println!("Configuration: {:#?}", config);
            println!("Resolved roots: {:?}", config.resolved_roots());
        }
    }

    Ok(())
}

fn run_scan(config: AppConfig) -> anyhow::Result<()> {
    let engine = ScanEngine::new(config);
    let result = engine.scan(&CliReporter::new());

    let mut out = io::stdout().lock();
    render::banner(&mut out, "LARGEST ITEMS")?;
    render::render_listing(&mut out, &result.working_set())?;
    info!(
        "Scanned {} files ({}) in {}",
        result.index.files_seen,
        render::format_bytes(result.index.total_bytes()).green(),
        format!("{:.2}s", result.scan_duration.as_secs_f64()).green(),
    );
    Ok(())
}

fn run_interactive(config: AppConfig) -> anyhow::Result<()> {
    let engine = ScanEngine::new(config);
    let result = engine.scan(&CliReporter::new());
    let config = engine.config();

    let transfer = RsyncTransfer::new(
        &config.backup.transfer_program,
        &config.backup.transfer_args,
    );
    let mount = SystemMount::new(&config.backup.mount_program);
    let collaborators = Collaborators {
        fs: &OsFileSystem,
        mount: &mount,
        transfer: &transfer,
    };

    let prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(config, result.index.roots.clone(), prompter, collaborators);
    let summary = session
        .run(result.working_set())
        .context("interactive session failed")?;

    info!(
        "Session finished: {} item(s) deleted, {} large file(s) remain",
        format!("{}", summary.items_removed).red(),
        format!("{}", summary.remaining.files.len()).cyan(),
    );
    Ok(())
}
