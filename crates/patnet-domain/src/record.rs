//! Raw publication records as returned by the query service

use std::fmt;

/// Identifier (URI) of a publication resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicationId(String);

impl PublicationId {
    /// Wrap a publication URI
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Get the URI as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raw `(title, abstract)` binding of a publication
///
/// `title` is the predicate URI, `value` the bound object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    /// Predicate URI acting as the discriminator
    pub title: String,

    /// Bound value (identifier URI, code URI, literal)
    pub value: String,
}

impl FieldPair {
    /// Create a new field pair
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }

    /// Last `/`-separated segment of the title, e.g. `applicantVC`
    pub fn discriminator(&self) -> &str {
        self.title.rsplit('/').next().unwrap_or(&self.title)
    }
}

/// All field pairs fetched for one publication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationRecord {
    /// Field pairs in the order the service returned them
    pub fields: Vec<FieldPair>,
}

impl PublicationRecord {
    /// Create a record from field pairs
    pub fn new(fields: Vec<FieldPair>) -> Self {
        Self { fields }
    }

    /// Whether the record carries no data at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of field pairs
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl FromIterator<FieldPair> for PublicationRecord {
    fn from_iter<T: IntoIterator<Item = FieldPair>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_is_last_segment() {
        let pair = FieldPair::new(
            "http://data.epo.org/linked-data/def/patent/applicantVC",
            "http://data.epo.org/linked-data/id/applicant/1",
        );
        assert_eq!(pair.discriminator(), "applicantVC");
    }

    #[test]
    fn test_discriminator_without_slash() {
        let pair = FieldPair::new("applicantVC", "x");
        assert_eq!(pair.discriminator(), "applicantVC");
    }

    #[test]
    fn test_record_collect() {
        let record: PublicationRecord = vec![FieldPair::new("a", "1"), FieldPair::new("b", "2")]
            .into_iter()
            .collect();
        assert_eq!(record.len(), 2);
        assert!(!record.is_empty());
        assert!(PublicationRecord::default().is_empty());
    }
}
