//! Record extraction - picking co-applicants and classification codes out of raw fields

use patnet_domain::PublicationRecord;

/// Discriminator of co-applicant identifier fields
pub const APPLICANT_FIELD: &str = "applicantVC";

/// Discriminator of classification code fields
pub const CLASSIFICATION_FIELD: &str = "classificationIPCInventive";

/// Co-applicant identifiers and classification codes of one publication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Distinct identifiers, first-seen order
    pub applicants: Vec<String>,

    /// Classification code URIs, input order
    pub codes: Vec<String>,
}

/// Bucket the fields of a record by discriminator
///
/// Returns `None` unless the record names at least two distinct co-applicants
/// and at least one classification code.
pub fn extract(record: &PublicationRecord) -> Option<ExtractedRecord> {
    let mut applicants: Vec<String> = Vec::new();
    let mut codes = Vec::new();

    for field in &record.fields {
        match field.discriminator() {
            APPLICANT_FIELD => {
                if !applicants.contains(&field.value) {
                    applicants.push(field.value.clone());
                }
            }
            CLASSIFICATION_FIELD => codes.push(field.value.clone()),
            _ => {}
        }
    }

    if applicants.len() > 1 && !codes.is_empty() {
        Some(ExtractedRecord { applicants, codes })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patnet_domain::FieldPair;

    const PATENT: &str = "http://data.epo.org/linked-data/def/patent/";

    fn field(kind: &str, value: &str) -> FieldPair {
        FieldPair::new(format!("{}{}", PATENT, kind), value)
    }

    #[test]
    fn test_extract_usable_record() {
        let record = PublicationRecord::new(vec![
            field("applicantVC", "a1"),
            field("titleOfInvention", "Widget"),
            field("applicantVC", "a2"),
            field("classificationIPCInventive", "http://ipc/G06F0001000000"),
        ]);

        let extracted = extract(&record).unwrap();
        assert_eq!(extracted.applicants, vec!["a1", "a2"]);
        assert_eq!(extracted.codes, vec!["http://ipc/G06F0001000000"]);
    }

    #[test]
    fn test_single_applicant_is_unusable() {
        let record = PublicationRecord::new(vec![
            field("applicantVC", "a1"),
            field("classificationIPCInventive", "c"),
        ]);
        assert_eq!(extract(&record), None);
    }

    #[test]
    fn test_repeated_applicant_counts_once() {
        let record = PublicationRecord::new(vec![
            field("applicantVC", "a1"),
            field("applicantVC", "a1"),
            field("classificationIPCInventive", "c"),
        ]);
        assert_eq!(extract(&record), None);
    }

    #[test]
    fn test_no_codes_is_unusable() {
        let record = PublicationRecord::new(vec![field("applicantVC", "a1"), field("applicantVC", "a2")]);
        assert_eq!(extract(&record), None);
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(extract(&PublicationRecord::default()), None);
    }

    #[test]
    fn test_discriminator_must_match_exactly() {
        let record = PublicationRecord::new(vec![
            field("applicantVCX", "a1"),
            field("applicantVC", "a2"),
            FieldPair::new("applicantVC/other", "a3"),
            field("classificationIPCInventive", "c"),
        ]);
        assert_eq!(extract(&record), None);
    }
}
