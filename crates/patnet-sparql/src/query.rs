//! SPARQL query text for the patent linked-data vocabulary

use crate::SparqlError;
use patnet_domain::{Authority, PublicationId, Window};

/// Prefix block prepended to every query
pub const PREFIXES: &str = "
prefix cpc: <http://data.epo.org/linked-data/def/cpc/>
prefix dcterms: <http://purl.org/dc/terms/>
prefix ipc: <http://data.epo.org/linked-data/def/ipc/>
prefix mads: <http://www.loc.gov/standards/mads/rdf/v1.rdf>
prefix owl: <http://www.w3.org/2002/07/owl#>
prefix patent: <http://data.epo.org/linked-data/def/patent/>
prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#>
prefix skos: <http://www.w3.org/2004/02/skos/core#>
prefix st3: <http://data.epo.org/linked-data/def/st3/>
prefix text: <http://jena.apache.org/text#>
prefix vcard: <http://www.w3.org/2006/vcard/ns#>
prefix xsd: <http://www.w3.org/2001/XMLSchema#>
";

/// Result column holding the publication URI in [`application_query`]
pub const PUBLICATION_COLUMN: &str = "pub";

/// Publications of applications filed at `authority` inside `window`
pub fn application_query(window: &Window, authority: &Authority) -> String {
    format!(
        r#"{PREFIXES}SELECT ?apn ?pub {{
  ?application rdf:type patent:Application;
      patent:applicationNumber ?apn;
      patent:publication ?pub;
      patent:filingDate ?filingDate;
      patent:applicationAuthority/skos:notation ?auth.
  FILTER(?filingDate >= xsd:date("{start}") && ?filingDate < xsd:date("{end}") && ?auth = "{auth}")
}}
"#,
        start = window.start,
        end = window.end,
        auth = authority.as_str(),
    )
}

/// All `(title, abstract)` bindings of one publication
///
/// Only publications with a title of invention in `language` match.
pub fn publication_query(publication: &PublicationId, language: &str) -> Result<String, SparqlError> {
    let uri = publication.as_str();
    if !is_safe_iri(uri) {
        return Err(SparqlError::InvalidIri(uri.to_string()));
    }
    Ok(format!(
        r#"{PREFIXES}SELECT DISTINCT * {{ <{uri}> ?title ?abstract;
    rdf:type patent:Publication;
    patent:titleOfInvention ?toi.
  FILTER(langMatches(lang(?toi), "{language}"))
}}
"#
    ))
}

/// Whether `uri` can be written between `<` and `>` unescaped
fn is_safe_iri(uri: &str) -> bool {
    !uri.is_empty()
        && !uri
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`'))
}
