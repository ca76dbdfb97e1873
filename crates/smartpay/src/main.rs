// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SmartPay - command-line client for managing financed device sales.
//!
//! This is the binary entry point: it loads and validates configuration,
//! initializes tracing, and dispatches to the command modules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use smartpay_config::SmartPayConfig;
use smartpay_core::SmartPayError;
use tracing_subscriber::EnvFilter;

mod app;
mod auth;
mod device;
mod enroll;
mod payment;
mod plan;
mod store;
mod user;

use app::App;

/// SmartPay - manage financed device sales from the terminal.
#[derive(Parser, Debug)]
#[command(name = "smartpay", version, about, long_about = None)]
struct Cli {
    /// Explicit config file path (overrides the XDG lookup).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and persist the session.
    Login(auth::LoginArgs),
    /// Clear the persisted session and any in-progress sale.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Enroll a new device or television and wait for it to connect.
    Enroll(enroll::EnrollArgs),
    /// Inspect and command managed hardware.
    #[command(subcommand)]
    Device(device::DeviceCommand),
    /// Manage installment plans.
    #[command(subcommand)]
    Plan(plan::PlanCommand),
    /// Register and list payments.
    #[command(subcommand)]
    Payment(payment::PaymentCommand),
    /// Administer stores and their contacts.
    #[command(subcommand)]
    Store(store::StoreCommand),
    /// Administer users.
    #[command(subcommand)]
    User(user::UserCommand),
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("smartpay={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<SmartPayConfig, Vec<smartpay_config::ConfigError>> {
    match path {
        Some(path) => smartpay_config::load_config_from_path(path)
            .map_err(smartpay_config::diagnostic::figment_to_config_errors)
            .and_then(|config| {
                smartpay_config::validation::validate_config(&config).map(|()| config)
            }),
        None => smartpay_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            smartpay_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.log.level);

    let app = match App::new(config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            std::process::exit(1);
        }
    };

    let result = run(cli.command, &app).await;
    if let Err(err) = result {
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(1);
    }
}

async fn run(command: Commands, app: &App) -> Result<(), SmartPayError> {
    match command {
        Commands::Login(args) => auth::login(args, app).await,
        Commands::Logout => auth::logout(app),
        Commands::Whoami => auth::whoami(app),
        Commands::Enroll(args) => enroll::run(args, app).await,
        Commands::Device(cmd) => device::run(cmd, app).await,
        Commands::Plan(cmd) => plan::run(cmd, app).await,
        Commands::Payment(cmd) => payment::run(cmd, app).await,
        Commands::Store(cmd) => store::run(cmd, app).await,
        Commands::User(cmd) => user::run(cmd, app).await,
    }
}
