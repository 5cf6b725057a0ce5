//! CLI entry point for ninjarmm, a NinjaOne RMM API client.
//!
//! Loads credentials from flags, the environment (optionally populated from
//! `.env` or `--env-file`) or `env.json`, then runs one read-only query and prints
//! the decoded response as pretty JSON on stdout. Logs go to stderr and are
//! controlled with `RUST_LOG` (default `warn`).
//!
//! Exit codes:
//! - 0: success
//! - 1: runtime error (missing credentials, auth failure, API error, etc.)
//! - 2: argument validation error (clap handles this automatically)

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ninjarmm::activities::{ActivityLogOptions, get_activity_log};
use ninjarmm::alerts::{AlertListOptions, DeviceAlertOptions, list_alerts, list_device_alerts};
use ninjarmm::client::RmmClient;
use ninjarmm::config::{Overrides, Settings};
use ninjarmm::devices::{DeviceListOptions, get_device, get_device_custom_fields, list_devices};
use ninjarmm::organizations::{
    get_organization_custom_fields, list_organizations, list_organizations_detailed,
};
use ninjarmm::users::{UserType, list_users};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// API client ID.
    #[arg(long, global = true, env = "NINJARMM_CLIENT_ID")]
    client_id: Option<String>,

    /// API client secret. Prefer setting via the NINJARMM_CLIENT_SECRET
    /// environment variable to keep it out of process listings and shell
    /// history.
    #[arg(long, global = true, env = "NINJARMM_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Space-separated OAuth scopes.
    #[arg(long, global = true)]
    scope: Option<String>,

    /// Regional host, e.g. https://app.ninjarmm.com.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// JSON credentials file to read instead of ./env.json.
    #[arg(long, global = true)]
    credentials_file: Option<PathBuf>,

    /// Dotenv file to load instead of ./.env. Variables already set in the
    /// environment take precedence over the file.
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List organizations.
    Organizations {
        /// Include locations, policies and settings.
        #[arg(long)]
        detailed: bool,
    },

    /// List devices.
    Devices {
        /// Device filter expression, e.g. "class = WINDOWS_SERVER".
        #[arg(long)]
        filter: Option<String>,

        /// Include references, IP addresses and notes.
        #[arg(long)]
        detailed: bool,

        #[arg(long)]
        page_size: Option<u32>,

        /// Only devices with an ID greater than this.
        #[arg(long)]
        after: Option<i64>,
    },

    /// Show one device.
    Device { id: i64 },

    /// Show the custom fields of a device or organization.
    CustomFields {
        #[command(subcommand)]
        target: FieldTarget,
    },

    /// List active alerts.
    Alerts {
        /// Device filter expression.
        #[arg(long, conflicts_with = "device")]
        filter: Option<String>,

        /// Only alerts of this device.
        #[arg(long)]
        device: Option<i64>,
    },

    /// Show the newest page of the activity log.
    Activities {
        #[arg(long)]
        page_size: Option<u32>,

        /// Activity type, e.g. CONDITION or PATCH_MANAGEMENT.
        #[arg(long = "type")]
        activity_type: Option<String>,
    },

    /// List users.
    Users {
        /// TECHNICIAN or END_USER.
        #[arg(long)]
        user_type: Option<UserType>,
    },
}

#[derive(Subcommand)]
enum FieldTarget {
    Device { id: i64 },
    Organization { id: i64 },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            scope: self.scope.clone(),
            base_url: self.base_url.clone(),
            credentials_file: self.credentials_file.clone(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(cli.overrides())?;
    let client = RmmClient::from_settings(&settings);

    match cli.command {
        Command::Organizations { detailed: false } => {
            print_json(&list_organizations(&client).await?)
        }
        Command::Organizations { detailed: true } => {
            print_json(&list_organizations_detailed(&client).await?)
        }
        Command::Devices {
            filter,
            detailed,
            page_size,
            after,
        } => {
            let options = DeviceListOptions {
                filter: filter.unwrap_or_default(),
                after: after.unwrap_or_default(),
                page_size: page_size.unwrap_or_default(),
                detailed,
            };
            print_json(&list_devices(&client, &options).await?)
        }
        Command::Device { id } => print_json(&get_device(&client, id).await?),
        Command::CustomFields { target } => {
            let fields = match target {
                FieldTarget::Device { id } => get_device_custom_fields(&client, id).await?,
                FieldTarget::Organization { id } => {
                    get_organization_custom_fields(&client, id).await?
                }
            };
            print_json(&fields)
        }
        Command::Alerts {
            device: Some(device_id),
            ..
        } => print_json(
            &list_device_alerts(&client, device_id, &DeviceAlertOptions::default()).await?,
        ),
        Command::Alerts {
            filter,
            device: None,
        } => {
            let options = AlertListOptions {
                filter: filter.unwrap_or_default(),
                ..Default::default()
            };
            print_json(&list_alerts(&client, &options).await?)
        }
        Command::Activities {
            page_size,
            activity_type,
        } => {
            let options = ActivityLogOptions {
                page_size: page_size.unwrap_or_default(),
                activity_type: activity_type.unwrap_or_default(),
                ..Default::default()
            };
            print_json(&get_activity_log(&client, &options).await?)
        }
        Command::Users { user_type } => print_json(&list_users(&client, user_type).await?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    // An explicit --env-file must exist; a missing ./.env is not an error.
    match &args.env_file {
        Some(path) => {
            if let Err(e) = dotenvy::from_path(path) {
                eprintln!("Error: cannot load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
