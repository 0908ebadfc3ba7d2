//! Configuration validation.
//!
//! Checks a config file for syntax, unknown or misspelled fields, and values
//! the gateway cannot start with (missing backend addresses, port 0).

use std::path::{Path, PathBuf};

use crate::{
    env_subst::substitute_env,
    loader::{apply_env_overrides, find_config_file, parse_config, parse_config_value},
    schema::GatewayConfig,
};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "unknown-field", "type-error", "missing",
    /// "invalid-value", "env", "file-ref"
    pub category: &'static str,
    /// Dotted path, e.g. "backends.tenant_address"
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.severity, self.message)
        } else {
            write!(f, "{}: {}: {}", self.severity, self.path, self.message)
        }
    }
}

/// Result of validating a configuration file.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<PathBuf>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

fn diagnostic(
    severity: Severity,
    category: &'static str,
    path: &str,
    message: impl Into<String>,
) -> Diagnostic {
    Diagnostic {
        severity,
        category,
        path: path.to_string(),
        message: message.into(),
    }
}

// ── Known fields ────────────────────────────────────────────────────────────

const SECTIONS: &[(&str, &[&str])] = &[
    ("server", &["bind", "port"]),
    ("backends", &[
        "tenant_address",
        "project_address",
        "edge_cluster_address",
        "connect_timeout_secs",
    ]),
    ("graphql", &["graphiql", "user_id", "request_timeout_secs"]),
];

fn check_unknown_fields(value: &serde_json::Value, diagnostics: &mut Vec<Diagnostic>) {
    let Some(root) = value.as_object() else {
        return;
    };
    let section_names: Vec<&str> = SECTIONS.iter().map(|(name, _)| *name).collect();

    for (key, child) in root {
        let Some((_, fields)) = SECTIONS.iter().find(|(name, _)| name == key) else {
            let message = match suggest(key, &section_names, 3) {
                Some(s) => format!("unknown field at top level (did you mean \"{s}\"?)"),
                None => "unknown field at top level".to_string(),
            };
            diagnostics.push(diagnostic(Severity::Error, "unknown-field", key, message));
            continue;
        };

        let Some(table) = child.as_object() else {
            continue;
        };
        for field in table.keys() {
            if fields.contains(&field.as_str()) {
                continue;
            }
            let message = match suggest(field, fields, 3) {
                Some(s) => format!("unknown field (did you mean \"{s}\"?)"),
                None => "unknown field".to_string(),
            };
            diagnostics.push(diagnostic(
                Severity::Error,
                "unknown-field",
                &format!("{key}.{field}"),
                message,
            ));
        }
    }
}

// ── Levenshtein distance ────────────────────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_len]
}

/// Closest candidate within `max_distance` edits, if any.
fn suggest<'a>(needle: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&candidate| (candidate, levenshtein(needle, candidate)))
        .filter(|&(_, d)| d > 0 && d <= max_distance)
        .min_by_key(|&(_, d)| d)
        .map(|(candidate, _)| candidate)
}

// ── Value checks ────────────────────────────────────────────────────────────

/// Semantic checks on a fully loaded config (file plus env overrides).
#[must_use]
pub fn validate_config(config: &GatewayConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if config.server.port == 0 {
        diagnostics.push(diagnostic(
            Severity::Error,
            "invalid-value",
            "server.port",
            "port must be between 1 and 65535",
        ));
    }
    if config.server.bind.trim().is_empty() {
        diagnostics.push(diagnostic(
            Severity::Error,
            "missing",
            "server.bind",
            "bind address is required (or set HTTP_HOST)",
        ));
    }

    for (path, value, env) in [
        (
            "backends.tenant_address",
            &config.backends.tenant_address,
            "TENANT_ADDRESS",
        ),
        (
            "backends.project_address",
            &config.backends.project_address,
            "PROJECT_ADDRESS",
        ),
        (
            "backends.edge_cluster_address",
            &config.backends.edge_cluster_address,
            "EDGE_CLUSTER_ADDRESS",
        ),
    ] {
        if value.trim().is_empty() {
            diagnostics.push(diagnostic(
                Severity::Error,
                "missing",
                path,
                format!("backend address is required (or set {env})"),
            ));
        } else if value.contains("${") {
            diagnostics.push(diagnostic(
                Severity::Warning,
                "env",
                path,
                format!("unresolved environment placeholder in \"{value}\""),
            ));
        }
    }

    if config.backends.connect_timeout_secs == 0 {
        diagnostics.push(diagnostic(
            Severity::Warning,
            "invalid-value",
            "backends.connect_timeout_secs",
            "a zero connect timeout makes every backend dial fail",
        ));
    }
    if config.graphql.user_id.trim().is_empty() {
        diagnostics.push(diagnostic(
            Severity::Error,
            "missing",
            "graphql.user_id",
            "user id is required (or set GRAPHQL_USER_ID)",
        ));
    }
    if config.graphql.request_timeout_secs == 0 {
        diagnostics.push(diagnostic(
            Severity::Info,
            "invalid-value",
            "graphql.request_timeout_secs",
            "backend calls have no time limit",
        ));
    }

    diagnostics
}

// ── Core validation ─────────────────────────────────────────────────────────

/// Validate a config file at the given path, or discover the default config
/// file location if `path` is `None`. Environment overrides are applied
/// before the value checks, exactly as at startup.
#[must_use]
pub fn validate(path: Option<&Path>) -> ValidationResult {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config_file(),
    };

    let Some(actual_path) = config_path else {
        let mut diagnostics = vec![diagnostic(
            Severity::Info,
            "file-ref",
            "",
            "no config file found; using defaults",
        )];
        check_loaded(GatewayConfig::default(), &mut diagnostics);
        return ValidationResult {
            diagnostics,
            config_path: None,
        };
    };

    let diagnostics = match std::fs::read_to_string(&actual_path) {
        Ok(content) => validate_str(&content, &actual_path),
        Err(e) => vec![diagnostic(
            Severity::Error,
            "syntax",
            "",
            format!("failed to read config file: {e}"),
        )],
    };
    ValidationResult {
        diagnostics,
        config_path: Some(actual_path),
    }
}

/// Validate raw config text; `path` only selects the format by extension.
#[must_use]
pub fn validate_str(content: &str, path: &Path) -> Vec<Diagnostic> {
    let raw = substitute_env(content);
    let mut diagnostics = Vec::new();

    match parse_config_value(&raw, path) {
        Ok(value) => check_unknown_fields(&value, &mut diagnostics),
        Err(e) => {
            diagnostics.push(diagnostic(
                Severity::Error,
                "syntax",
                "",
                format!("syntax error: {e}"),
            ));
            return diagnostics;
        },
    }

    match parse_config(&raw, path) {
        Ok(config) => check_loaded(config, &mut diagnostics),
        Err(e) => diagnostics.push(diagnostic(Severity::Error, "type-error", "", e.to_string())),
    }
    diagnostics
}

fn check_loaded(config: GatewayConfig, diagnostics: &mut Vec<Diagnostic>) {
    match apply_env_overrides(config) {
        Ok(config) => diagnostics.extend(validate_config(&config)),
        Err(e) => diagnostics.push(diagnostic(Severity::Error, "env", "", e.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn complete() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.backends.tenant_address = "tenant:50051".into();
        config.backends.project_address = "project:50051".into();
        config.backends.edge_cluster_address = "edge-cluster:50051".into();
        config
    }

    #[test]
    fn levenshtein_edits() {
        assert_eq!(levenshtein("server", "server"), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("sever", "server"), 1);
        assert_eq!(levenshtein("bnd", "bind"), 1);
    }

    #[test]
    fn complete_config_is_clean() {
        assert!(validate_config(&complete()).is_empty());
    }

    #[test]
    fn missing_addresses_are_errors() {
        let diagnostics = validate_config(&GatewayConfig::default());
        let missing: Vec<&str> = diagnostics
            .iter()
            .filter(|d| d.category == "missing")
            .map(|d| d.path.as_str())
            .collect();
        assert_eq!(missing, vec![
            "backends.tenant_address",
            "backends.project_address",
            "backends.edge_cluster_address",
        ]);
    }

    #[test]
    fn zero_port_is_an_error() {
        let mut config = complete();
        config.server.port = 0;
        let diagnostics = validate_config(&config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].path, "server.port");
    }

    #[test]
    fn unknown_fields_get_suggestions() {
        let diagnostics = validate_str(
            "[sever]\nport = 1\n\n[backends]\ntenant_adress = \"t:1\"\n",
            Path::new("edgecloud.toml"),
        );
        let unknown: Vec<(&str, &str)> = diagnostics
            .iter()
            .filter(|d| d.category == "unknown-field")
            .map(|d| (d.path.as_str(), d.message.as_str()))
            .collect();
        assert!(unknown.contains(&(
            "sever",
            "unknown field at top level (did you mean \"server\"?)"
        )));
        assert!(unknown.contains(&(
            "backends.tenant_adress",
            "unknown field (did you mean \"tenant_address\"?)"
        )));
    }

    #[test]
    fn syntax_error_stops_validation() {
        let diagnostics = validate_str("[server\n", Path::new("edgecloud.toml"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category, "syntax");
    }

    #[test]
    fn wrong_type_is_reported() {
        let diagnostics = validate_str(
            "{\"server\": {\"port\": \"eighty\"}}",
            Path::new("edgecloud.json"),
        );
        assert!(diagnostics.iter().any(|d| d.category == "type-error"));
    }

    #[test]
    fn validates_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edgecloud.yaml");
        std::fs::write(
            &path,
            "backends:\n  tenant_address: t:1\n  project_address: p:1\n  edge_cluster_address: e:1\n",
        )
        .unwrap();
        let result = validate(Some(&path));
        assert_eq!(result.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(result.count(Severity::Error), 0);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate(Some(&dir.path().join("absent.toml")));
        assert!(result.has_errors());
    }
}
