//! In-memory design model: actors, use cases, classes and their relationships.
//!
//! Elements are kept in insertion order; every engine iterates them in that
//! order, which is what makes violation ordering reproducible.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SemtraceError};

/// Element discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Use-case diagram actor
    Actor,
    /// Use-case diagram use case
    UseCase,
    /// Class diagram class
    Class,
}

impl ElementKind {
    /// Wire name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Actor => "actor",
            ElementKind::UseCase => "use_case",
            ElementKind::Class => "class",
        }
    }
}

/// Class attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

/// Method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Class method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Method {
    /// Method with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            parameters: Vec::new(),
        }
    }
}

/// Class-specific payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPayload {
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
}

/// Kind-specific element data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementPayload {
    Actor,
    UseCase,
    Class(ClassPayload),
}

/// A model element: actor, use case or class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelElement {
    pub id: String,
    pub name: String,
    pub payload: ElementPayload,
}

impl ModelElement {
    /// Create an actor
    pub fn actor(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payload: ElementPayload::Actor,
        }
    }

    /// Create a use case
    pub fn use_case(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payload: ElementPayload::UseCase,
        }
    }

    /// Create a class with no members
    pub fn class(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payload: ElementPayload::Class(ClassPayload::default()),
        }
    }

    /// Append a method; no-op for non-class elements
    pub fn with_method(mut self, method: Method) -> Self {
        if let ElementPayload::Class(class) = &mut self.payload {
            class.methods.push(method);
        }
        self
    }

    /// Append an attribute; no-op for non-class elements
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        if let ElementPayload::Class(class) = &mut self.payload {
            class.attributes.push(attribute);
        }
        self
    }

    pub fn kind(&self) -> ElementKind {
        match self.payload {
            ElementPayload::Actor => ElementKind::Actor,
            ElementPayload::UseCase => ElementKind::UseCase,
            ElementPayload::Class(_) => ElementKind::Class,
        }
    }

    /// Methods of a class; empty for actors and use cases
    pub fn methods(&self) -> &[Method] {
        match &self.payload {
            ElementPayload::Class(class) => &class.methods,
            _ => &[],
        }
    }

    /// Attributes of a class; empty for actors and use cases
    pub fn attributes(&self) -> &[Attribute] {
        match &self.payload {
            ElementPayload::Class(class) => &class.attributes,
            _ => &[],
        }
    }
}

/// Directed typed link between two elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source_id: String,
    pub target_id: String,
    #[serde(default = "default_relationship_kind")]
    pub kind: String,
}

fn default_relationship_kind() -> String {
    "association".to_string()
}

impl Relationship {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: kind.into(),
        }
    }
}

/// A relationship with at least one endpoint missing from the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference<'a> {
    pub relationship: &'a Relationship,
    pub missing_ids: Vec<&'a str>,
}

/// Complete design model
#[derive(Debug, Clone, Default)]
pub struct DesignModel {
    elements: IndexMap<String, ModelElement>,
    relationships: Vec<Relationship>,
}

impl DesignModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element; ids must be unique within the model.
    pub fn add_element(&mut self, element: ModelElement) -> Result<()> {
        if self.elements.contains_key(&element.id) {
            return Err(SemtraceError::validation_field(
                format!("duplicate element id '{}'", element.id),
                "id",
            ));
        }
        self.elements.insert(element.id.clone(), element);
        Ok(())
    }

    /// Add a relationship. Endpoints are not checked here.
    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    /// Builder-style [`add_element`](Self::add_element)
    pub fn with_element(mut self, element: ModelElement) -> Result<Self> {
        self.add_element(element)?;
        Ok(self)
    }

    /// Builder-style [`add_relationship`](Self::add_relationship)
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.add_relationship(relationship);
        self
    }

    pub fn get(&self, id: &str) -> Option<&ModelElement> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &ModelElement> {
        self.elements.values()
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Elements of one kind, in insertion order
    pub fn elements_of(&self, kind: ElementKind) -> Vec<&ModelElement> {
        self.elements.values().filter(|e| e.kind() == kind).collect()
    }

    pub fn actors(&self) -> Vec<&ModelElement> {
        self.elements_of(ElementKind::Actor)
    }

    pub fn use_cases(&self) -> Vec<&ModelElement> {
        self.elements_of(ElementKind::UseCase)
    }

    pub fn classes(&self) -> Vec<&ModelElement> {
        self.elements_of(ElementKind::Class)
    }

    /// Relationships whose source or target id is unknown
    pub fn dangling_references(&self) -> Vec<DanglingReference<'_>> {
        self.relationships
            .iter()
            .filter_map(|relationship| {
                let missing_ids: Vec<&str> = [&relationship.source_id, &relationship.target_id]
                    .into_iter()
                    .filter(|id| !self.elements.contains_key(id.as_str()))
                    .map(String::as_str)
                    .collect();
                (!missing_ids.is_empty()).then_some(DanglingReference {
                    relationship,
                    missing_ids,
                })
            })
            .collect()
    }
}
