use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{env_subst::substitute_env, schema::GatewayConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "edgecloud.toml",
    "edgecloud.yaml",
    "edgecloud.yml",
    "edgecloud.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<GatewayConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./edgecloud.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/edgecloud/edgecloud.{toml,yaml,yml,json}` (user-global)
///
/// Returns `GatewayConfig::default()` if no config file is found or the one
/// found cannot be parsed.
pub fn discover_and_load() -> GatewayConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    GatewayConfig::default()
}

/// Full startup load: an explicit path must parse, otherwise discovery
/// applies. Environment overrides are applied last either way.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<GatewayConfig> {
    let config = match explicit {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            load_config(path)?
        },
        None => discover_and_load(),
    };
    apply_env_overrides(config)
}

/// Find the first config file in standard locations.
pub(crate) fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/edgecloud/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "edgecloud").map(|d| d.config_dir().to_path_buf())
}

/// Override file values with the deployment environment variables.
///
/// `HTTP_HOST`, `HTTP_PORT`, `TENANT_ADDRESS`, `PROJECT_ADDRESS`,
/// `EDGE_CLUSTER_ADDRESS`, `GRAPHQL_USER_ID`. Empty variables are ignored.
pub fn apply_env_overrides(config: GatewayConfig) -> anyhow::Result<GatewayConfig> {
    apply_env_overrides_with(config, |name| std::env::var(name).ok())
}

fn apply_env_overrides_with(
    mut config: GatewayConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<GatewayConfig> {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("HTTP_HOST") {
        config.server.bind = host;
    }
    if let Some(port) = get("HTTP_PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("HTTP_PORT must be a port number, got {port:?}: {e}"))?;
    }
    if let Some(address) = get("TENANT_ADDRESS") {
        config.backends.tenant_address = address;
    }
    if let Some(address) = get("PROJECT_ADDRESS") {
        config.backends.project_address = address;
    }
    if let Some(address) = get("EDGE_CLUSTER_ADDRESS") {
        config.backends.edge_cluster_address = address;
    }
    if let Some(user_id) = get("GRAPHQL_USER_ID") {
        config.graphql.user_id = user_id;
    }
    Ok(config)
}

pub(crate) fn parse_config(raw: &str, path: &Path) -> anyhow::Result<GatewayConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

/// Parse into an untyped tree, for unknown-field detection.
pub(crate) fn parse_config_value(raw: &str, path: &Path) -> anyhow::Result<serde_json::Value> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => {
            let v: toml::Value = toml::from_str(raw)?;
            Ok(serde_json::to_value(v)?)
        },
        "yaml" | "yml" => {
            let v: serde_yaml::Value = serde_yaml::from_str(raw)?;
            Ok(serde_json::to_value(v)?)
        },
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
