//! Configuration loading, validation, and env substitution.
//!
//! Config files: `edgecloud.toml`, `edgecloud.yaml`, or `edgecloud.json`
//! Searched in `./` then `~/.config/edgecloud/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values, and a fixed set
//! of environment overrides applied after the file is parsed.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{apply_env_overrides, config_dir, discover_and_load, load, load_config},
    schema::{BackendsConfig, GatewayConfig, GraphqlConfig, ServerConfig},
    validate::{Diagnostic, Severity, ValidationResult, validate, validate_config},
};
