use std::path::{Path, PathBuf};

use {anyhow::Result, clap::Subcommand};

use edgecloud_config::{GatewayConfig, Severity, ValidationResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors/warnings.
    Check {
        /// Show informational diagnostics in addition to errors and warnings.
        #[arg(long)]
        verbose: bool,
    },
    /// Print the effective configuration (file, then environment overrides).
    Show {
        /// Emit JSON instead of TOML.
        #[arg(long)]
        json: bool,
    },
    /// Print the user-global config directory.
    Path,
}

pub fn handle_config(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Check { verbose } => {
            let result = edgecloud_config::validate(config_path);
            eprint!("{}", render_check(&result, verbose, false));
            if result.has_errors() {
                std::process::exit(1);
            }
            Ok(())
        },
        ConfigAction::Show { json } => {
            let config = edgecloud_config::load(config_path)?;
            println!("{}", render_config(&config, json)?);
            Ok(())
        },
        ConfigAction::Path => {
            match edgecloud_config::config_dir() {
                Some(dir) => println!("{}", dir.display()),
                None => eprintln!("no home directory; only ./edgecloud.* files are searched"),
            }
            Ok(())
        },
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Human-readable report for `config check`.
pub fn render_check(result: &ValidationResult, verbose: bool, plain: bool) -> String {
    let paint = |s: &'static str| if plain { "" } else { s };
    let mut out = String::new();

    match result.config_path {
        Some(ref path) => out.push_str(&format!("Checking {}\n\n", path.display())),
        None => out.push_str("No config file found; checking defaults.\n\n"),
    }

    let mut shown = 0;
    for d in &result.diagnostics {
        if d.severity == Severity::Info && !verbose {
            continue;
        }

        let (color, label) = match d.severity {
            Severity::Error => (RED, "error"),
            Severity::Warning => (YELLOW, "warning"),
            Severity::Info => (CYAN, "info"),
        };
        let (bold, color, reset) = (paint(BOLD), paint(color), paint(RESET));

        if d.path.is_empty() {
            out.push_str(&format!("  {bold}{color}{label}{reset} {}\n", d.message));
        } else {
            out.push_str(&format!(
                "  {bold}{color}{label}{reset} {}: {}\n",
                d.path, d.message
            ));
        }
        shown += 1;
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if shown > 0 {
        out.push('\n');
    }

    if errors == 0 && warnings == 0 {
        out.push_str("No issues found.\n");
    } else {
        out.push_str(&format!("{errors} error(s), {warnings} warning(s)\n"));
    }
    out
}

fn render_config(config: &GatewayConfig, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(config)?)
    } else {
        Ok(toml::to_string_pretty(config)?)
    }
}

/// `--config` wins; otherwise discovery decides.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {super::*, std::io::Write};

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn check_reports_no_issues_for_complete_config() {
        let file = write_config(
            r#"
[backends]
tenant_address = "tenant:50051"
project_address = "project:50051"
edge_cluster_address = "edge-cluster:50051"
"#,
        );
        let result = edgecloud_config::validate(Some(file.path()));
        let report = render_check(&result, false, true);
        assert!(report.contains("No issues found."), "{report}");
    }

    #[test]
    fn check_reports_unknown_fields_and_missing_addresses() {
        let file = write_config("[server]\nprot = 8080\n");
        let result = edgecloud_config::validate(Some(file.path()));
        assert!(result.has_errors());

        let report = render_check(&result, false, true);
        assert!(report.contains("server.prot"), "{report}");
        assert!(report.contains("error"), "{report}");
        assert!(!report.contains('\x1b'));
    }

    #[test]
    fn show_renders_both_formats() {
        let config = GatewayConfig::default();
        let toml = render_config(&config, false).unwrap();
        assert!(toml.contains("[server]"));
        let json: serde_json::Value =
            serde_json::from_str(&render_config(&config, true).unwrap()).unwrap();
        assert_eq!(json["server"]["port"], 8080);
    }

    #[test]
    fn empty_config_flag_means_discovery() {
        assert_eq!(resolve_config_path(Some(PathBuf::new())), None);
        assert_eq!(
            resolve_config_path(Some(PathBuf::from("gw.toml"))),
            Some(PathBuf::from("gw.toml"))
        );
    }
}
