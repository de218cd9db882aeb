//! Company name normalization
//!
//! Display names from the entity service are spelled inconsistently
//! (`ACME CO.,`, `Acme Company`, `ACME CO`). A normalization pass upper-cases
//! the name, appends a space so suffix rules can anchor on it, strips
//! embedded line breaks, applies [`RULES`] in order, then title-cases and
//! trims. The pass is repeated until the name stops changing.
//!
//! Rule order matters: several patterns are produced by earlier rules
//! (`LIMITED` becomes `LTD.`, which `..` then collapses).

/// Ordered literal replacements applied to the upper-cased name
pub const RULES: &[(&str, &str)] = &[
    (", INC.", " INC."),
    (" LIMITED", " LTD."),
    (" LTD.,", " LTD."),
    (" LTD", " LTD."),
    (" E. V.", " E.V."),
    (" B.V", " B.V."),
    ("(S.A.S.)", "S.A.S."),
    ("S.A.S.", " S.A.S."),
    (" S.A.S", " S.A.S."),
    (" SAS ", " S.A.S."),
    (" ( S.A.S. )", " S.A.S."),
    (" SP.Z O.O.", " SP. Z O.O."),
    (" SP.Z.O.O.", " SP. Z O.O."),
    (" SP Z O.O.", " SP. Z O.O."),
    (" CO.,", " CO."),
    (" CO ", " CO."),
    (" COMPANY", " CO."),
    ("AKTIENGESELLSCHAFT", "AG"),
    (" CORPORATION", " CORP."),
    (" SA ", " S.A."),
    (" AS ", " S.A."),
    (" S/A", " S.A."),
    (" A/S", " S.A."),
    (" LTDA.", " LTDA"),
    (" LLC.", " L.L.C."),
    (", LLC ", " L.L.C."),
    (" LLC ", " L.L.C."),
    ("Ü", "U"),
    ("À", "A"),
    ("É", "E"),
    ("Ô", "O"),
    ("È", "E"),
    ("Ä", "A"),
    ("'", ""),
    ("  ", " "),
    ("..", "."),
    (" - ", " "),
    (")", ""),
    ("(", ""),
    (" Ag ", " AG"),
    (" Gmbh ", " GmbH"),
    (" Ges. M.B.H.", " GmbH"),
    ("\"", ""),
];

/// Upper bound on normalization passes
pub const MAX_PASSES: usize = 16;

/// Canonical form of a company name
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```
/// use patnet_harvester::normalize::normalize;
///
/// assert_eq!(normalize("ACME CO.,"), "Acme Co.");
/// assert_eq!(normalize("Siemens Aktiengesellschaft"), "Siemens Ag");
/// ```
pub fn normalize(name: &str) -> String {
    let mut current = normalize_pass(name);
    for _ in 1..MAX_PASSES {
        let next = normalize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// One normalization pass
pub fn normalize_pass(name: &str) -> String {
    let mut upper = name.to_uppercase();
    upper.push(' ');
    upper.retain(|c| c != '\n' && c != '\r');

    let replaced = RULES.iter().fold(upper, |acc, (pattern, replacement)| {
        apply_rule(acc, pattern, replacement)
    });

    title_case(&replaced).trim().to_string()
}

/// Apply one rule; a rule that shortens the text is repeated until its
/// pattern is gone, so runs such as `"    "` or `"...."` collapse in one pass
fn apply_rule(text: String, pattern: &str, replacement: &str) -> String {
    let mut text = text.replace(pattern, replacement);
    if replacement.len() < pattern.len() {
        while text.contains(pattern) {
            text = text.replace(pattern, replacement);
        }
    }
    text
}

/// Title-case: a cased letter is upper-cased when it follows an uncased
/// character and lower-cased otherwise
///
/// ```
/// use patnet_harvester::normalize::title_case;
///
/// assert_eq!(title_case("ACME CO. 3M o'neil"), "Acme Co. 3M O'Neil");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && previous_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }

    out
}
