//! setup-flavors CLI
//!
//! Entry point for the `setup-flavors` command-line tool. With no arguments
//! it updates `ios/Runner.xcodeproj` in the current directory.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use xcflavors::summary::{success_message, NextSteps};
use xcflavors::{pipeline, RunOptions};

#[derive(Parser)]
#[command(name = "setup-flavors")]
#[command(
    about = "Add dev/prod flavor build configurations to an Xcode project",
    version
)]
struct Cli {
    /// Path to the .xcodeproj bundle or project.pbxproj (default: ios/Runner.xcodeproj)
    #[arg(long, short = 'p')]
    project: Option<PathBuf>,

    /// Path to config file (default: .flavors.toml if present)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Compute changes without writing the project file
    #[arg(long)]
    dry_run: bool,

    /// Print the run report as JSON instead of human-readable output
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = RunOptions {
        project: cli.project,
        config: cli.config,
        dry_run: cli.dry_run,
        ..Default::default()
    };

    let json = cli.json;
    let outcome = match pipeline::run(&options, |line| {
        if !json {
            println!("{}", line);
        }
    }) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json {
        match outcome.report.to_json() {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if !outcome.report.written {
        println!(
            "\nDry run: {} configuration(s) would be added to {}",
            outcome.report.created_count(),
            outcome.report.project_path
        );
        return;
    }

    let steps = NextSteps::new(&outcome.config.config, &outcome.plan);
    print!("{}", success_message(&steps));
}
