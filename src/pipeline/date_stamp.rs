//! Metadata date stamp

use chrono::NaiveDate;

use super::RecordSet;

/// Stamp all three records with the same processing date
pub fn apply(mut set: RecordSet, today: NaiveDate) -> RecordSet {
    for (_, record) in set.records_mut() {
        record.metadata.date_stamp = Some(today);
    }
    set
}
