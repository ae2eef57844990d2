//! Municipal Services Portal access gate
//!
//! Command-line inspector for the portal's access policy, menus and session.

use clap::{Parser, Subcommand};
use mms_gate::{
    access_control::{AccessResolver, Identity},
    config::{AppConfig, LogFormat, LoggingConfig, load_config},
    gate::Gate,
    session::{CredentialDirectory, LocalSession, SessionProvider, create_session_store},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Municipal Services Portal - role-based access gate
#[derive(Parser, Debug)]
#[command(name = "mms-gate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "MMS_GATE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "MMS_GATE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the route policy table
    Policy,

    /// Print the sidebar for a role
    Menu {
        /// Role tag (admin, finance, project_manager, hr_manager, clerk, citizen)
        #[arg(short, long)]
        role: String,

        /// Unread notification count to show as a badge
        #[arg(long, default_value_t = 0)]
        unread: u32,
    },

    /// Decide whether a user may open a route
    ///
    /// Signs in with the given credentials, or uses the stored session when
    /// none are given.
    Decide {
        #[arg(short, long)]
        resource: String,

        #[arg(long, requires = "password")]
        email: Option<String>,

        #[arg(long, requires = "email")]
        password: Option<String>,
    },

    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "MMS_GATE_PASSWORD")]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the stored session
    Status,
}

fn init_tracing(logging: &LoggingConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(&logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (pretty, json) = match logging.format {
        LogFormat::Pretty => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(pretty)
        .with(json)
        .with(filter)
        .init();
}

fn print_identity(identity: &Identity) {
    println!(
        "{} <{}> as {} ({})",
        identity.name,
        identity.email,
        identity.role.display_name(),
        identity.role.dashboard()
    );
}

async fn restore_session(
    config: &AppConfig,
    directory: Arc<CredentialDirectory>,
) -> anyhow::Result<LocalSession> {
    let store = create_session_store(&config.session);
    let session = LocalSession::restore(directory, store.as_ref())
        .await
        .inspect_err(|e| error!(error = %e, "Failed to restore session"))?;
    Ok(session)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration decides the log format, so load it before logging starts
    let loaded = load_config(args.config.as_deref());
    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging, args.log_level.as_deref());

    info!(version = env!("CARGO_PKG_VERSION"), "Starting mms-gate");

    let config = loaded.inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;

    // Policy table and menus
    let resolver = AccessResolver::from_config(&config.access_control)
        .inspect_err(|e| error!(error = %e, "Failed to build access policy"))?;
    let gate = Gate::with_resolver(resolver);

    let directory = Arc::new(
        CredentialDirectory::from_config(&config.accounts)
            .inspect_err(|e| error!(error = %e, "Failed to load accounts"))?,
    );

    match args.command {
        Command::Policy => {
            for (resource, policy) in gate.resolver().policy().iter() {
                println!("{:<28} {}", resource.as_str(), policy);
            }
        }
        Command::Menu { role, unread } => {
            let badges = move |resource: &str| {
                if resource == mms_gate::notifications::NOTIFICATIONS_RESOURCE {
                    unread
                } else {
                    0
                }
            };
            for entry in gate.menu().visible_menu_for_tag(&role, &badges) {
                match entry.badge {
                    Some(count) => println!("{:<18} {:<28} ({})", entry.label, entry.resource.as_str(), count),
                    None => println!("{:<18} {}", entry.label, entry.resource),
                }
            }
        }
        Command::Decide {
            resource,
            email,
            password,
        } => {
            let session = match (email, password) {
                (Some(email), Some(password)) => {
                    let mut session = LocalSession::new(directory);
                    session
                        .login(&email, &password)
                        .inspect_err(|e| error!(error = %e, "Login failed"))?;
                    session
                }
                _ => restore_session(&config, directory).await?,
            };

            let pass = gate
                .render_pass(&session, &resource, &mms_gate::menu::NoBadges)
                .inspect_err(|e| error!(error = %e, resource = %resource, "Cannot decide"))?;
            println!("{} -> {}", pass.decision, pass.outcome);
        }
        Command::Login { email, password } => {
            let store = create_session_store(&config.session);
            let mut session = LocalSession::restore(directory, store.as_ref()).await?;
            let identity = session
                .login(&email, &password)
                .inspect_err(|e| error!(error = %e, "Login failed"))?;
            session.persist(store.as_ref()).await?;
            print_identity(&identity);
        }
        Command::Logout => {
            let store = create_session_store(&config.session);
            let mut session = LocalSession::restore(directory, store.as_ref()).await?;
            session.logout();
            session.persist(store.as_ref()).await?;
            println!("Signed out");
        }
        Command::Status => {
            let session = restore_session(&config, directory).await?;
            match session.identity() {
                Some(identity) => print_identity(identity),
                None => println!("Not signed in"),
            }
        }
    }

    Ok(())
}
