mod calculator;
mod catalog;
mod cli;
mod clock;
mod error;
mod fmt;
mod input;
mod models;
mod settings;
mod state;
mod tui;
mod validation;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::app::AppOptions;
use cli::{Cli, Commands};
use error::Result;
use settings::Settings;
use state::signup::ValidationPolicy;

/// Log to a file: the terminal belongs to the UI.
fn init_logging(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_from_env("EASYPAY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let log_path = settings.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_layer = log_fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    info!(path = %log_path.display(), "logging initialized");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = settings::load_settings();
    init_logging(&settings)?;

    let catalog = settings.catalog(cli.catalog.as_deref())?;
    let policy = if cli.strict || settings.enforce_validation {
        ValidationPolicy::Enforce
    } else {
        ValidationPolicy::Advisory
    };

    match cli.command {
        None => cli::app::run(AppOptions {
            catalog,
            order_delay: settings.order_delay(),
            policy,
            start_with_signup: !cli.skip_signup,
            signup_only: false,
        }),
        Some(Commands::Signup) => cli::app::run(AppOptions {
            catalog,
            order_delay: settings.order_delay(),
            policy,
            start_with_signup: true,
            signup_only: true,
        }),
        Some(Commands::Products { search }) => cli::catalog::products(&catalog, search.as_deref()),
        Some(Commands::Firms) => cli::catalog::firms(&catalog),
        Some(Commands::Quote {
            product,
            deposit,
            firm,
        }) => cli::quote::run(&catalog, &product, deposit, firm),
        Some(Commands::Init) => {
            let path = settings::settings_path();
            if settings::settings_file_exists() {
                println!("Settings already exist at {}", path.display());
            } else {
                settings::save_settings(&Settings::default())?;
                println!("Wrote default settings to {}", path.display());
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
