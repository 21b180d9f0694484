//! Ground-truth violation lists for evaluation runs.

use std::fs;
use std::path::Path;

use crate::core::errors::{Result, SemtraceError};
use crate::report::metrics::ExpectedViolation;

use super::model_loader::ModelFormat;

/// Load expected violations from a JSON or YAML list of
/// `{rule_id, element_name}` records
pub fn load_ground_truth(path: impl AsRef<Path>) -> Result<Vec<ExpectedViolation>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        SemtraceError::io(format!("Failed to read ground truth {}", path.display()), e)
    })?;

    match ModelFormat::from_path(path)? {
        ModelFormat::Json => serde_json::from_str(&content)
            .map_err(|e| SemtraceError::parse_at("json", e.to_string(), path.display().to_string())),
        ModelFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| SemtraceError::parse_at("yaml", e.to_string(), path.display().to_string())),
        ModelFormat::Xmi => Err(SemtraceError::validation_field(
            format!("Ground truth must be JSON or YAML: {}", path.display()),
            "ground_truth",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::violation::RuleId;

    #[test]
    fn test_load_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("truth.json");
        fs::write(
            &json,
            r#"[{"rule_id": "actor_name_noun", "element_name": "Quickly"}]"#,
        )
        .unwrap();
        assert_eq!(
            load_ground_truth(&json).unwrap(),
            vec![ExpectedViolation::new(RuleId::ActorNameNoun, "Quickly")]
        );

        let yaml = dir.path().join("truth.yaml");
        fs::write(&yaml, "- rule_id: bogus_rule\n  element_name: X\n").unwrap();
        assert!(matches!(
            load_ground_truth(&yaml).unwrap_err(),
            SemtraceError::Parse { .. }
        ));

        let xml = dir.path().join("truth.xml");
        fs::write(&xml, "<truth/>").unwrap();
        assert!(load_ground_truth(&xml).is_err());
    }
}
