//! Contact roles and ordering
//!
//! Two concerns live here: making sure the maintaining organisation is always
//! credited as an author, and rearranging contacts into a caller-chosen order.
//!
//! Ordering is expressed as a permutation of original indices, so that
//! `new[k] = old[permutation[k]]`. A caller that only knows display names can
//! resolve them with [`resolve_names`]; names must be unique within a record
//! because a duplicated name cannot identify a single contact.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    error::{PipelineError, PipelineResult},
    models::{Contact, ContactOrdering, RecordRole},
};

use super::RecordSet;

pub const AUTHOR_ROLE: &str = "author";

/// Give every contact using `maintainer_email` the author role (once)
pub fn normalize_roles(mut set: RecordSet, maintainer_email: &str) -> RecordSet {
    for (role, record) in set.records_mut() {
        for contact in record.identification.contacts.iter_mut() {
            if contact.email.as_deref() == Some(maintainer_email) && !contact.has_role(AUTHOR_ROLE) {
                tracing::debug!("Adding author role to maintainer contact in {} record", role);
                contact.role.push(AUTHOR_ROLE.to_string());
            }
        }
    }
    set
}

/// Reorder `contacts` so that `result[k] == contacts[permutation[k]]`
pub fn apply_permutation(
    role: RecordRole,
    contacts: Vec<Contact>,
    permutation: &[usize],
) -> PipelineResult<Vec<Contact>> {
    if permutation.len() != contacts.len() {
        return Err(PipelineError::InvalidPermutation {
            role,
            reason: format!(
                "expected {} indices, got {}",
                contacts.len(),
                permutation.len()
            ),
        });
    }

    let mut seen = HashSet::with_capacity(permutation.len());
    for &index in permutation {
        if index >= contacts.len() {
            return Err(PipelineError::InvalidPermutation {
                role,
                reason: format!("index {} out of range", index),
            });
        }
        if !seen.insert(index) {
            return Err(PipelineError::InvalidPermutation {
                role,
                reason: format!("index {} repeated", index),
            });
        }
    }

    let mut slots: Vec<Option<Contact>> = contacts.into_iter().map(Some).collect();
    Ok(permutation
        .iter()
        .filter_map(|&index| slots[index].take())
        .collect())
}

/// Resolve display names to a permutation of contact indices.
///
/// Each name is matched against [`Contact::display_name`] (individual name,
/// falling back to organisation name). Fails if the record has duplicate
/// display names or if a name is unknown.
pub fn resolve_names(
    role: RecordRole,
    contacts: &[Contact],
    names: &[String],
) -> PipelineResult<Vec<usize>> {
    let mut index_by_name: IndexMap<&str, usize> = IndexMap::new();
    for (index, contact) in contacts.iter().enumerate() {
        let Some(name) = contact.display_name() else {
            continue;
        };
        if index_by_name.insert(name, index).is_some() {
            return Err(PipelineError::DuplicateContactName {
                role,
                name: name.to_string(),
            });
        }
    }

    names
        .iter()
        .map(|name| {
            index_by_name
                .get(name.as_str())
                .copied()
                .ok_or_else(|| PipelineError::UnknownContactName {
                    role,
                    name: name.clone(),
                })
        })
        .collect()
}

/// Display names of a record's contacts, in order. Unnamed contacts are skipped.
pub fn display_names(contacts: &[Contact]) -> Vec<String> {
    contacts
        .iter()
        .filter_map(Contact::display_name)
        .map(String::from)
        .collect()
}

/// The series contact names if all three records have the same multiset of names
pub fn shared_contact_names(set: &RecordSet) -> Option<Vec<String>> {
    let series = display_names(&set.series.identification.contacts);

    let mut expected = series.clone();
    expected.sort();
    for side in [&set.side_a, &set.side_b] {
        let mut names = display_names(&side.identification.contacts);
        names.sort();
        if names != expected {
            return None;
        }
    }
    Some(series)
}

/// Apply the requested contact order to every record
pub fn reorder(mut set: RecordSet, ordering: &ContactOrdering) -> PipelineResult<RecordSet> {
    for (role, record) in set.records_mut() {
        let contacts = std::mem::take(&mut record.identification.contacts);
        let permutation = match ordering {
            ContactOrdering::Indices {
                series,
                side_a,
                side_b,
            } => match role {
                RecordRole::Series => series.clone(),
                RecordRole::SideA => side_a.clone(),
                RecordRole::SideB => side_b.clone(),
            },
            ContactOrdering::Names(names) => resolve_names(role, &contacts, names)?,
        };
        record.identification.contacts = apply_permutation(role, contacts, &permutation)?;
    }
    Ok(set)
}
