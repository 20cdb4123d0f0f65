//! ISBN identifier injection

use crate::models::{Identifier, IsbnFormat, ProcessOptions};

use super::RecordSet;

/// Identifier entry for an ISBN of the given format, e.g. `978-0-00-000000-0 (Flat)`
pub fn isbn_identifier(isbn: &str, format: IsbnFormat) -> Identifier {
    Identifier {
        identifier: format!("{} ({})", isbn, format.label()),
        namespace: "isbn".to_string(),
        href: None,
        extra: Default::default(),
    }
}

/// Append the flat then folded ISBN (whichever are set) to every record's identifiers
pub fn apply(mut set: RecordSet, options: &ProcessOptions) -> RecordSet {
    let isbns: Vec<Identifier> = [
        (options.isbn_flat.as_deref(), IsbnFormat::Flat),
        (options.isbn_folded.as_deref(), IsbnFormat::Folded),
    ]
    .into_iter()
    .filter_map(|(isbn, format)| match isbn {
        Some(isbn) if !isbn.is_empty() => Some(isbn_identifier(isbn, format)),
        _ => None,
    })
    .collect();

    if isbns.is_empty() {
        return set;
    }

    for (_, record) in set.records_mut() {
        record.identification.identifiers.extend(isbns.iter().cloned());
    }
    set
}
