//! Wire types for SPARQL JSON results and entity documents

use patnet_domain::{FieldPair, PublicationId, PublicationRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// `application/sparql-results+json` document
#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    /// Solution sequence
    pub results: Solutions,
}

/// The `results` member
#[derive(Debug, Deserialize)]
pub struct Solutions {
    /// One map per solution, keyed by variable name
    #[serde(default)]
    pub bindings: Vec<HashMap<String, Term>>,
}

/// One bound RDF term
#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    /// `uri`, `literal`, `typed-literal` or `bnode`
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Lexical value
    pub value: String,
}

impl SparqlResults {
    /// Values bound to `column`, skipping solutions where it is unbound
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.results
            .bindings
            .iter()
            .filter_map(move |solution| solution.get(column).map(|term| term.value.as_str()))
    }

    /// Publication identifiers from a listing query
    pub fn publications(&self, column: &str) -> Vec<PublicationId> {
        self.column(column).map(PublicationId::new).collect()
    }

    /// Field pairs from an attribute query (`?title` / `?abstract`)
    pub fn record(&self) -> PublicationRecord {
        self.results
            .bindings
            .iter()
            .filter_map(|solution| {
                let title = solution.get("title")?;
                let value = solution.get("abstract")?;
                Some(FieldPair::new(title.value.clone(), value.value.clone()))
            })
            .collect()
    }
}

/// Entity description served at `<identifier>.json`
#[derive(Debug, Deserialize)]
pub struct EntityDocument {
    /// Present for known entities
    pub result: Option<EntityResult>,
}

/// The `result` member of an entity document
#[derive(Debug, Deserialize)]
pub struct EntityResult {
    /// The described resource
    #[serde(rename = "primaryTopic")]
    pub primary_topic: Option<PrimaryTopic>,
}

/// The described resource
#[derive(Debug, Deserialize)]
pub struct PrimaryTopic {
    /// vCard formatted name; a string, or a list for multi-valued names
    #[serde(rename = "fn")]
    pub formatted_name: Option<Value>,
}

impl EntityDocument {
    /// Display name, if the document carries one
    pub fn display_name(&self) -> Option<String> {
        let name = self.result.as_ref()?.primary_topic.as_ref()?.formatted_name.as_ref()?;
        match name {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
            _ => None,
        }
    }
}
