//! School-level summaries.
//!
//! Status counts back both the dashboard's school card and the schools
//! screen header. Headcounts are computed for every school in a single pass
//! over already-fetched collections instead of one store round-trip per school.

use crate::records::{RecordSets, SchoolRecord, SchoolStatus};
use std::collections::BTreeMap;

/// How many schools are in each lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchoolStatusCounts {
    /// All schools
    pub total: usize,
    /// Schools with status `active`
    pub active: usize,
    /// Schools with status `blocked`
    pub blocked: usize,
    /// Schools with status `inactive`
    pub inactive: usize,
}

/// Counts schools by status.
///
/// `active + blocked <= total` always holds; the remainder are inactive.
#[must_use]
pub fn school_status_counts(schools: &[SchoolRecord]) -> SchoolStatusCounts {
    schools
        .iter()
        .fold(SchoolStatusCounts::default(), |mut counts, school| {
            counts.total += 1;
            match school.status {
                SchoolStatus::Active => counts.active += 1,
                SchoolStatus::Blocked => counts.blocked += 1,
                SchoolStatus::Inactive => counts.inactive += 1,
            }
            counts
        })
}

/// People attached to one school.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchoolHeadcount {
    /// Enrolled students
    pub students: usize,
    /// Teachers
    pub teachers: usize,
    /// Staff members
    pub staff: usize,
    /// Parent rows
    pub parents: usize,
}

/// Headcounts keyed by school id.
///
/// Every known school appears, with zeros if nobody is attached. Records that
/// reference a school missing from `records.schools` are still counted under
/// their own school id.
#[must_use]
pub fn school_headcounts(records: &RecordSets) -> BTreeMap<String, SchoolHeadcount> {
    let mut counts: BTreeMap<String, SchoolHeadcount> = records
        .schools
        .iter()
        .map(|school| (school.id.clone(), SchoolHeadcount::default()))
        .collect();

    for student in &records.students {
        counts.entry(student.school_id.clone()).or_default().students += 1;
    }
    for teacher in &records.teachers {
        counts.entry(teacher.school_id.clone()).or_default().teachers += 1;
    }
    for member in &records.staff {
        counts.entry(member.school_id.clone()).or_default().staff += 1;
    }
    for parent in &records.parents {
        counts.entry(parent.school_id.clone()).or_default().parents += 1;
    }

    counts
}
