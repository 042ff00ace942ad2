//! Target fields of the client ("cliente") record
//!
//! The server is authoritative on which fields a column may map to (it sends
//! them as `all_db_columns` in the check response). This list only provides
//! human labels for the fields the CRM is known to have, plus the loose
//! header matching used by the offline preview.

use std::borrow::Cow;

/// Known target fields as (db column, label)
pub const KNOWN_FIELDS: &[(&str, &str)] = &[
    ("ragione_sociale", "Ragione sociale"),
    ("p_iva", "Partita IVA"),
    ("email", "Email"),
    ("telefono", "Telefono"),
    ("tipologia", "Tipologia"),
    ("indirizzo", "Indirizzo"),
    ("cap", "CAP"),
    ("citta", "Città"),
    ("provincia", "Provincia"),
    ("regione", "Regione"),
];

/// Human label for a target field; unknown fields display their raw name
pub fn field_label(db_column: &str) -> Cow<'static, str> {
    KNOWN_FIELDS
        .iter()
        .find(|(name, _)| *name == db_column)
        .map(|(_, label)| Cow::Borrowed(*label))
        .unwrap_or_else(|| Cow::Owned(db_column.to_string()))
}

/// "Label (db_column)", or just the name when there is no label
pub fn field_display(db_column: &str) -> String {
    let label = field_label(db_column);
    if label == db_column {
        db_column.to_string()
    } else {
        format!("{} ({})", label, db_column)
    }
}

/// Normalize a header or field name for loose comparison:
/// lowercase, accents folded, anything non-alphanumeric dropped
pub fn normalize_header(s: &str) -> String {
    s.chars()
        .flat_map(|c| c.to_lowercase())
        .map(fold_accent)
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ä' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        other => other,
    }
}

/// Guess the known field a spreadsheet header refers to.
///
/// Only exact matches after normalization count ("Ragione Sociale",
/// "ragione_sociale", "P.IVA" style variants). Anything fuzzier is left to
/// the server.
pub fn guess_known_field(header: &str) -> Option<&'static str> {
    let normalized = normalize_header(header);
    if normalized.is_empty() {
        return None;
    }

    KNOWN_FIELDS
        .iter()
        .find(|(name, label)| {
            normalize_header(name) == normalized || normalize_header(label) == normalized
        })
        .map(|(name, _)| *name)
        .or_else(|| match normalized.as_str() {
            "piva" | "partitaiva" | "vat" => Some("p_iva"),
            "tel" | "phone" | "cellulare" => Some("telefono"),
            "comune" | "city" => Some("citta"),
            _ => None,
        })
}
