//! XMI-like XML model files.
//!
//! Reads the flat dialect used by the use-case and class diagram exporters:
//! `actor`, `useCase`, `class` (with nested `attribute` and `method`, methods
//! with nested `parameter`) and `relationship` elements. Namespaced UML tags
//! (`uml:Actor`, `uml:UseCase`, `uml:Class`, `uml:Operation`,
//! `uml:Association`) are read the same way; ids may be given as `id` or
//! `xmi:id`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::core::errors::{Result, SemtraceError};
use crate::core::model::{Attribute, DesignModel, Method, ModelElement, Parameter, Relationship};

/// Parse an XMI document into a model
pub fn parse_xmi(content: &str) -> Result<DesignModel> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut builder = XmiBuilder::default();

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => builder
                .open(&tag, false)
                .map_err(|e| e.with_context(format!("byte {position}")))?,
            Ok(Event::Empty(tag)) => builder
                .open(&tag, true)
                .map_err(|e| e.with_context(format!("byte {position}")))?,
            Ok(Event::End(tag)) => builder.close(tag.local_name().as_ref())?,
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(SemtraceError::parse_at(
                    "xmi",
                    format!("Malformed XMI: {err}"),
                    format!("byte {}", reader.buffer_position()),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

#[derive(Default)]
struct XmiBuilder {
    model: DesignModel,
    class: Option<ModelElement>,
    method: Option<Method>,
}

impl XmiBuilder {
    fn open(&mut self, tag: &BytesStart<'_>, empty: bool) -> Result<()> {
        let name = tag_kind(tag.local_name().as_ref());
        match name.as_str() {
            "actor" => {
                let (id, name) = identity(tag, "actor")?;
                self.model.add_element(ModelElement::actor(id, name))?;
            }
            "usecase" => {
                let (id, name) = identity(tag, "useCase")?;
                self.model.add_element(ModelElement::use_case(id, name))?;
            }
            "class" => {
                let (id, name) = identity(tag, "class")?;
                let class = ModelElement::class(id, name);
                if empty {
                    self.model.add_element(class)?;
                } else {
                    self.class = Some(class);
                }
            }
            "attribute" | "property" => {
                if let Some(class) = self.class.take() {
                    self.class = Some(class.with_attribute(Attribute {
                        name: attribute_value(tag, b"name").unwrap_or_default(),
                        type_name: attribute_value(tag, b"type"),
                        visibility: attribute_value(tag, b"visibility"),
                    }));
                }
            }
            "method" | "operation" => {
                let method = Method {
                    name: attribute_value(tag, b"name").unwrap_or_default(),
                    return_type: attribute_value(tag, b"returnType"),
                    parameters: Vec::new(),
                };
                if empty {
                    self.push_method(method);
                } else {
                    self.method = Some(method);
                }
            }
            "parameter" | "ownedparameter" => {
                if let Some(method) = self.method.as_mut() {
                    method.parameters.push(Parameter {
                        name: attribute_value(tag, b"name").unwrap_or_default(),
                        type_name: attribute_value(tag, b"type"),
                    });
                }
            }
            "relationship" | "association" => {
                let source = attribute_value(tag, b"source");
                let target = attribute_value(tag, b"target");
                let (Some(source), Some(target)) = (source, target) else {
                    return Err(SemtraceError::parse(
                        "xmi",
                        "relationship requires 'source' and 'target' attributes",
                    ));
                };
                let kind = attribute_value(tag, b"type").unwrap_or_else(|| name.clone());
                self.model
                    .add_relationship(Relationship::new(source, target, kind));
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, local_name: &[u8]) -> Result<()> {
        match tag_kind(local_name).as_str() {
            "method" | "operation" => {
                if let Some(method) = self.method.take() {
                    self.push_method(method);
                }
            }
            "class" => {
                if let Some(class) = self.class.take() {
                    debug!("Parsed class '{}' with {} methods", class.name, class.methods().len());
                    self.model.add_element(class)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn push_method(&mut self, method: Method) {
        if let Some(class) = self.class.take() {
            self.class = Some(class.with_method(method));
        }
    }

    fn finish(self) -> Result<DesignModel> {
        if let Some(class) = self.class {
            return Err(SemtraceError::parse(
                "xmi",
                format!("class '{}' is never closed", class.id),
            ));
        }
        Ok(self.model)
    }
}

/// Lower-cased local tag name
fn tag_kind(local_name: &[u8]) -> String {
    String::from_utf8_lossy(local_name).to_ascii_lowercase()
}

fn identity(tag: &BytesStart<'_>, kind: &str) -> Result<(String, String)> {
    let id = attribute_value(tag, b"id").ok_or_else(|| {
        SemtraceError::parse("xmi", format!("{kind} element without an id attribute"))
    })?;
    let name = attribute_value(tag, b"name").unwrap_or_default();
    Ok((id, name))
}

/// Attribute by local name, so `xmi:id` matches `id`
fn attribute_value(tag: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    tag.attributes()
        .with_checks(false)
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}
