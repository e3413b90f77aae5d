//! Shopdesk CLI - Admin console for the store backend.
//!
//! # Usage
//!
//! ```bash
//! # Log in (password from -p or SHOPDESK_PASSWORD)
//! shopdesk login -e admin@example.com
//!
//! # Browse and search the catalog
//! shopdesk products list --search laptop
//!
//! # Ship a cart and notify its owner
//! shopdesk carts status 64f1c0ffee shipped
//!
//! # Answer a customer comment
//! shopdesk comments reply 64f1beef "Thanks, restocked next week"
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `status` - Admin session
//! - `dashboard` - Record counts and latest users
//! - `products` - Catalog CRUD and flags
//! - `carts` - Cart status and deletion
//! - `comments` - Comment moderation and replies
//! - `notifications` - Customer notification review
//!
//! # Environment Variables
//!
//! See [`shopdesk_admin::config`]. Logging is controlled with `RUST_LOG`;
//! set `SHOPDESK_LOG_JSON` for JSON log lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopdesk_admin::{AdminConfig, Console, NoticeLog, SentryConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use commands::CliError;

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(author, version, about = "Shopdesk admin console")]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as an admin
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password (defaults to SHOPDESK_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored admin token
    Logout,
    /// Show the session state and backend
    Status,
    /// Show record counts and the latest users
    Dashboard,
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// Manage customer carts
    Carts {
        #[command(subcommand)]
        action: commands::carts::CartsAction,
    },
    /// Moderate comments and replies
    Comments {
        #[command(subcommand)]
        action: commands::comments::CommentsAction,
    },
    /// Review customer notifications
    Notifications {
        #[command(subcommand)]
        action: commands::notifications::NotificationsAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SentryConfig) -> sentry::ClientInitGuard {
    sentry::init((
        config.dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ))
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "shopdesk=warn,shopdesk_admin=warn",
        1 => "shopdesk=info,shopdesk_admin=info",
        _ => "shopdesk=debug,shopdesk_admin=debug",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so stdout stays clean for tables
    let json = std::env::var_os("SHOPDESK_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AdminConfig::from_env();

    // Sentry must be up before the tracing subscriber
    let _sentry_guard = config
        .as_ref()
        .ok()
        .and_then(|c| c.sentry.as_ref())
        .map(init_sentry);

    init_tracing(cli.verbose);

    let notices = NoticeLog::new();
    let result = match config {
        Ok(config) => run(cli.command, config, &notices).await,
        Err(e) => Err(CliError::from(e)),
    };

    let mut stderr = std::io::stderr().lock();
    for notice in notices.drain() {
        let marker = if notice.is_error() { "✗" } else { "✓" };
        let _ = writeln!(stderr, "{marker} {}", notice.message);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            // Console failures were already shown as notices
            if !e.is_reported() {
                let _ = writeln!(stderr, "error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: AdminConfig, notices: &NoticeLog) -> Result<(), CliError> {
    let mut console = Console::open(config, Arc::new(notices.clone())).await?;
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Login { email, password } => {
            commands::session::login(&mut console, &email, password).await?;
        }
        Commands::Logout => commands::session::logout(&mut console).await?,
        Commands::Status => commands::session::status(&console, &mut out)?,
        Commands::Dashboard => commands::dashboard::show(&mut console, &mut out).await?,
        Commands::Products { action } => {
            commands::products::run(&mut console, action, &mut out).await?;
        }
        Commands::Carts { action } => commands::carts::run(&mut console, action, &mut out).await?,
        Commands::Comments { action } => {
            commands::comments::run(&mut console, action, &mut out).await?;
        }
        Commands::Notifications { action } => {
            commands::notifications::run(&mut console, action, &mut out).await?;
        }
    }
    Ok(())
}
