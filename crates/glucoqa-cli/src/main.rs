//! Glucoqa CLI - Evidence-based diabetes Q&A.

use clap::Parser;
use glucoqa::commands;
use glucoqa::repl;
use glucoqa::{Cli, Command, Config, Formatter, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> glucoqa::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let config = match &cli.config {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load()?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Knowledge base is loaded once and shared read-only
    let knowledge_base = Arc::new(config.load_knowledge_base()?);
    let role = cli.role.map(Into::into).unwrap_or(config.default_role);

    match cli.command {
        None | Some(Command::Repl) => {
            let mut session = Session::new(knowledge_base, role);
            repl::run_repl(&mut session, &config, &formatter)?;
        }
        Some(Command::Ask(args)) => {
            let mut session = Session::new(knowledge_base, role);
            commands::execute_ask(&args.text(), &mut session, &formatter)?;
        }
        Some(Command::Quick(args)) => {
            let mut session = Session::new(knowledge_base, role);
            commands::execute_quick(args.preset, &mut session, &formatter)?;
        }
        Some(Command::Topics) => {
            commands::execute_topics(&knowledge_base, &formatter)?;
        }
    }

    Ok(())
}
