use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use iam_resolver::config::loader::load_config;
use iam_resolver::observability::logging;
use iam_resolver::{CircuitClient, Credential, IamResolver};

#[derive(Parser)]
#[command(name = "iam-cli")]
#[command(about = "Query credentials from the identity authority", long_about = None)]
struct Cli {
    /// Path to the resolver configuration file.
    #[arg(short, long, default_value = "iam.toml")]
    config: PathBuf,

    /// Print secret access keys instead of redacting them.
    #[arg(long)]
    show_secrets: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every access key owned by a project
    Keys { project_id: String },
    /// Look up a single access key
    Credential { access_key: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let cli = Cli::parse();

    let config = load_config(&cli.config).map_err(|e| {
        format!("failed to load config {}: {}", cli.config.display(), e)
    })?;

    let transport = Arc::new(CircuitClient::new(
        config.circuit_breaker.failure_threshold,
        Duration::from_secs(config.circuit_breaker.recovery_timeout_secs),
    ));
    let resolver = IamResolver::new(&config, transport);

    match cli.command {
        Commands::Keys { project_id } => {
            let credentials = resolver.resolve_all_for_identity(&project_id).await?;
            let rendered: Vec<Value> = credentials
                .iter()
                .map(|c| render_credential(c, cli.show_secrets))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
        Commands::Credential { access_key } => {
            let credential = resolver.resolve_by_key(&access_key).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&render_credential(&credential, cli.show_secrets))?
            );
        }
    }

    Ok(())
}

fn render_credential(credential: &Credential, show_secrets: bool) -> Value {
    json!({
        "project_id": credential.project_id,
        "display_name": credential.display_name,
        "access_key_id": credential.access_key_id,
        "secret_access_key": if show_secrets {
            credential.secret_access_key.as_str()
        } else {
            "<redacted>"
        },
        "allow_delegated_access": credential.allow_delegated_access,
    })
}
