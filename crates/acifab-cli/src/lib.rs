//! # acifab-cli — Command-Line Frontend
//!
//! Everything the core engine treats as external: reading the input file,
//! parsing YAML, rendering the flat model, and translating failure into a
//! process exit code. The library half exists so the pipeline is testable
//! without spawning the binary.

pub mod render;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use acifab_core::FlatModel;

/// Load, parse, and flatten a tenancy intent file.
///
/// # Errors
///
/// Unreadable file, YAML syntax error, or any validation violation. All are
/// terminal; the caller maps them to a diagnostic line and a non-zero exit.
pub fn flatten_file(config: &Path) -> Result<FlatModel> {
    let raw = std::fs::read_to_string(config)
        .with_context(|| format!("unable to read {}", config.display()))?;
    debug!(path = %config.display(), bytes = raw.len(), "configuration loaded");

    let doc: serde_yaml::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("unable to parse YAML in {}", config.display()))?;

    let model = acifab_core::validate_and_flatten(&doc)?;
    debug!(records = model.record_count(), "validation passed");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = "
tenants:
  - name: prod
    description: production tenant
    vrfs:
      - name: v1
    contracts:
      - name: web-to-db
        scope: context
        subject:
          - name: db-traffic
            filter: allow-sql
    bridge_domains:
      - name: bd1
        vrf: v1
        subnets:
          - name: 10.0.0.1
            mask: 24
            scope: private
    application_profiles:
      - name: commerce
        description: storefront
        epgs:
          - name: web
            bd: bd1
            contracts:
              - name: web-to-db
                type: consumer
";

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn flatten_file_round_trips_a_valid_config() {
        let file = write_config(VALID);
        let model = flatten_file(file.path()).unwrap();
        assert_eq!(model.tenants.len(), 1);
        assert_eq!(model.record_count(), 11);
    }

    #[test]
    fn flatten_file_reports_missing_file() {
        let err = flatten_file(Path::new("/nonexistent/tenancy.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("unable to read"));
    }

    #[test]
    fn flatten_file_reports_yaml_syntax_errors() {
        let file = write_config("tenants: [unclosed");
        let err = flatten_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unable to parse YAML"));
    }

    #[test]
    fn flatten_file_surfaces_validation_violations() {
        let file = write_config(&VALID.replace("        vrf: v1\n", "        vrf: v9\n"));
        let err = flatten_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("not declared in vrfs"));
    }

    #[test]
    fn flatten_file_surfaces_duplicate_names() {
        let file = write_config(&VALID.replace(
            "    vrfs:\n      - name: v1\n",
            "    vrfs:\n      - name: v1\n      - name: v1\n",
        ));
        let err = flatten_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("redeclared in vrfs"));
    }
}
