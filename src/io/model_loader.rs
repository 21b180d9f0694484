//! JSON and YAML model documents.
//!
//! ```yaml
//! elements:
//!   - { id: a1, name: Customer, kind: actor }
//!   - { id: uc1, name: Withdraw Cash, kind: use_case }
//!   - id: c1
//!     name: Cash Dispenser
//!     kind: class
//!     methods:
//!       - { name: withdraw, return_type: bool }
//! relationships:
//!   - { source_id: a1, target_id: uc1, kind: association }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::errors::{Result, SemtraceError};
use crate::core::model::{
    Attribute, ClassPayload, DesignModel, ElementKind, ElementPayload, Method, ModelElement,
    Relationship,
};

use super::xmi::parse_xmi;

/// On-disk element record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDocument {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
}

/// On-disk model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub elements: Vec<ElementDocument>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl TryFrom<ModelDocument> for DesignModel {
    type Error = SemtraceError;

    fn try_from(document: ModelDocument) -> Result<Self> {
        let mut model = DesignModel::new();
        for element in document.elements {
            let payload = match element.kind {
                ElementKind::Actor => ElementPayload::Actor,
                ElementKind::UseCase => ElementPayload::UseCase,
                ElementKind::Class => ElementPayload::Class(ClassPayload {
                    attributes: element.attributes,
                    methods: element.methods,
                }),
            };
            model.add_element(ModelElement {
                id: element.id,
                name: element.name,
                payload,
            })?;
        }
        for relationship in document.relationships {
            model.add_relationship(relationship);
        }
        Ok(model)
    }
}

impl From<&DesignModel> for ModelDocument {
    fn from(model: &DesignModel) -> Self {
        Self {
            elements: model
                .elements()
                .map(|element| ElementDocument {
                    id: element.id.clone(),
                    name: element.name.clone(),
                    kind: element.kind(),
                    attributes: element.attributes().to_vec(),
                    methods: element.methods().to_vec(),
                })
                .collect(),
            relationships: model.relationships().to_vec(),
        }
    }
}

/// Interchange format of a model file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Yaml,
    Xmi,
}

impl ModelFormat {
    /// Format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(ModelFormat::Json),
            "yaml" | "yml" => Ok(ModelFormat::Yaml),
            "xmi" | "xml" => Ok(ModelFormat::Xmi),
            other => Err(SemtraceError::validation_field(
                format!(
                    "Unsupported model file extension '{}' for {}",
                    other,
                    path.display()
                ),
                "model",
            )),
        }
    }
}

impl DesignModel {
    /// Parse a JSON model document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: ModelDocument = serde_json::from_str(content)
            .map_err(|e| SemtraceError::parse("json", e.to_string()))?;
        DesignModel::try_from(document)
    }

    /// Parse a YAML model document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document: ModelDocument = serde_yaml::from_str(content)
            .map_err(|e| SemtraceError::parse("yaml", e.to_string()))?;
        DesignModel::try_from(document)
    }

    /// Load a model file, picking the format from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ModelFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            SemtraceError::io(format!("Failed to read model file {}", path.display()), e)
        })?;
        debug!("Loading {:?} model from {}", format, path.display());

        let model = match format {
            ModelFormat::Json => Self::from_json_str(&content),
            ModelFormat::Yaml => Self::from_yaml_str(&content),
            ModelFormat::Xmi => parse_xmi(&content),
        }
        .map_err(|e| e.with_context(path.display().to_string()))?;

        info!(
            "Loaded model from {}: {} elements, {} relationships",
            path.display(),
            model.len(),
            model.relationships().len()
        );
        Ok(model)
    }

    /// Serialize as a JSON model document
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ModelDocument::from(self))?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const YAML: &str = r#"
elements:
  - { id: a1, name: Customer, kind: actor }
  - { id: uc1, name: Withdraw Cash, kind: use_case }
  - id: c1
    name: Cash Dispenser
    kind: class
    attributes:
      - { name: balance, type: float, visibility: private }
    methods:
      - name: withdraw
        return_type: bool
        parameters:
          - { name: amount, type: float }
relationships:
  - { source_id: a1, target_id: uc1 }
"#;

    #[test]
    fn test_yaml_document() {
        let model = DesignModel::from_yaml_str(YAML).unwrap();

        assert_eq!(model.len(), 3);
        let class = model.get("c1").unwrap();
        assert_eq!(class.kind(), ElementKind::Class);
        assert_eq!(class.methods()[0].parameters[0].type_name.as_deref(), Some("float"));
        assert_eq!(class.attributes()[0].visibility.as_deref(), Some("private"));
        assert_eq!(model.relationships()[0].kind, "association");
    }

    #[test]
    fn test_json_round_trip_through_document() {
        let model = DesignModel::from_yaml_str(YAML).unwrap();
        let json = model.to_json_string().unwrap();
        let again = DesignModel::from_json_str(&json).unwrap();

        let ids: Vec<&str> = again.elements().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "uc1", "c1"]);
        assert_eq!(again.get("c1"), model.get("c1"));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let json = r#"{"elements": [
            {"id": "x", "name": "A", "kind": "actor"},
            {"id": "x", "name": "B", "kind": "class"}
        ]}"#;
        let err = DesignModel::from_json_str(json).unwrap_err();
        assert!(matches!(err, SemtraceError::Validation { .. }));
    }

    #[test]
    fn test_malformed_input_is_a_parse_error() {
        let err = DesignModel::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SemtraceError::Parse { .. }));

        let err = DesignModel::from_yaml_str("elements: [{ id: a, kind: robot }]").unwrap_err();
        assert!(matches!(err, SemtraceError::Parse { .. }));
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.yml");
        fs::File::create(&path)
            .unwrap()
            .write_all(YAML.as_bytes())
            .unwrap();

        assert_eq!(DesignModel::from_path(&path).unwrap().len(), 3);
        assert!(DesignModel::from_path(dir.path().join("model.txt")).is_err());
        assert!(DesignModel::from_path(dir.path().join("missing.json")).is_err());
    }
}
