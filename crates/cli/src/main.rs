mod config_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    edgecloud_config::{GatewayConfig, Severity},
    edgecloud_service_traits::Backends,
    tracing::{error, info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "edgecloud",
    about = "GraphQL gateway for edge-cloud tenants, projects and edge clusters",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (defaults to ./edgecloud.* then ~/.config/edgecloud/).
    #[arg(long, global = true, env = "EDGECLOUD_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,
    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server (default when no subcommand is provided).
    Serve,
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
    /// Print the GraphQL schema in SDL form.
    Schema,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// CLI flags take precedence over the file and the environment.
fn apply_cli_overrides(mut config: GatewayConfig, cli: &Cli) -> GatewayConfig {
    if let Some(ref bind) = cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config
}

async fn serve(config: GatewayConfig) -> anyhow::Result<()> {
    let diagnostics = edgecloud_config::validate_config(&config);
    for d in &diagnostics {
        match d.severity {
            Severity::Error => error!(path = %d.path, "{}", d.message),
            Severity::Warning => warn!(path = %d.path, "{}", d.message),
            Severity::Info => info!(path = %d.path, "{}", d.message),
        }
    }
    if diagnostics.iter().any(|d| d.severity == Severity::Error) {
        anyhow::bail!("invalid configuration; run `edgecloud config check` for details");
    }

    edgecloud_gateway::start_gateway(&config).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let mut cli = Cli::parse();

    init_telemetry(&cli);

    let config_path = config_commands::resolve_config_path(cli.config.clone());

    match cli.command.take() {
        None | Some(Commands::Serve) => {
            info!(version = env!("CARGO_PKG_VERSION"), "edgecloud starting");
            let config = edgecloud_config::load(config_path.as_deref())?;
            let config = apply_cli_overrides(config, &cli);
            serve(config).await
        },
        Some(Commands::Config { action }) => {
            config_commands::handle_config(action, config_path.as_deref())
        },
        Some(Commands::Schema) => {
            let config = GatewayConfig::default();
            let state = edgecloud_gateway::GatewayState::new(&config, Backends::default());
            println!("{}", edgecloud_graphql::schema_sdl(&state.schema));
            Ok(())
        },
    }
}
