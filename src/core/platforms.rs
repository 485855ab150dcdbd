//! Platform integration summaries for the platforms screen.

use crate::records::{PlatformRecord, PlatformStatus, PlatformType};
use std::collections::BTreeMap;

/// Integration counts and reach.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSummary {
    /// All integrations
    pub total: usize,
    /// Integrations with status `active`
    pub active: usize,
    /// Integrations with status `inactive`
    pub inactive: usize,
    /// Integrations with status `maintenance`
    pub maintenance: usize,
    /// Sum of `active_users_count` over active integrations
    pub active_users: u64,
    /// Integrations per platform type; every type is present
    pub by_type: BTreeMap<PlatformType, usize>,
}

/// Summarises a set of integrations.
#[must_use]
pub fn platform_summary(platforms: &[PlatformRecord]) -> PlatformSummary {
    let mut summary = PlatformSummary {
        by_type: PlatformType::ALL.iter().map(|kind| (*kind, 0)).collect(),
        ..PlatformSummary::default()
    };

    for platform in platforms {
        summary.total += 1;
        *summary.by_type.entry(platform.platform_type).or_default() += 1;
        match platform.status {
            PlatformStatus::Active => {
                summary.active += 1;
                summary.active_users = summary
                    .active_users
                    .saturating_add(platform.active_users_count);
            }
            PlatformStatus::Inactive => summary.inactive += 1,
            PlatformStatus::Maintenance => summary.maintenance += 1,
        }
    }

    summary
}

/// The platforms screen's school dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SchoolFilter {
    /// Integrations of every school
    #[default]
    All,
    /// Integrations of the school with this id
    School(String),
}

impl SchoolFilter {
    /// `None` or `"all"` selects everything, anything else is a school id.
    #[must_use]
    pub fn from_arg(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | "all") => Self::All,
            Some(id) => Self::School(id.to_string()),
        }
    }
}

/// Integrations belonging to the selected school, in input order.
#[must_use]
pub fn filter_platforms_by_school(
    platforms: &[PlatformRecord],
    filter: &SchoolFilter,
) -> Vec<PlatformRecord> {
    match filter {
        SchoolFilter::All => platforms.to_vec(),
        SchoolFilter::School(id) => platforms
            .iter()
            .filter(|platform| &platform.school_id == id)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_summary_counts_and_users() {
        let platforms = vec![
            platform_record("p1", "s1", PlatformType::Mobile, PlatformStatus::Active, 120),
            platform_record("p2", "s1", PlatformType::Web, PlatformStatus::Maintenance, 40),
            platform_record("p3", "s2", PlatformType::Mobile, PlatformStatus::Active, 30),
            platform_record("p4", "s2", PlatformType::Api, PlatformStatus::Inactive, 5),
        ];

        let summary = platform_summary(&platforms);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.maintenance, 1);
        assert_eq!(summary.inactive, 1);
        // Users on non-active integrations are not counted
        assert_eq!(summary.active_users, 150);
        assert_eq!(summary.by_type[&PlatformType::Mobile], 2);
        assert_eq!(summary.by_type[&PlatformType::Desktop], 0);
    }

    #[test]
    fn test_empty_summary_lists_all_types() {
        let summary = platform_summary(&[]);
        assert_eq!(summary.active, 0);
        assert_eq!(summary.by_type.len(), PlatformType::ALL.len());
        assert!(summary.by_type.values().all(|count| *count == 0));
    }

    #[test]
    fn test_school_filter() {
        let platforms = vec![
            platform_record("p1", "s1", PlatformType::Mobile, PlatformStatus::Active, 1),
            platform_record("p2", "s2", PlatformType::Web, PlatformStatus::Active, 1),
            platform_record("p3", "s1", PlatformType::Desktop, PlatformStatus::Active, 1),
        ];

        let only_s1 = filter_platforms_by_school(&platforms, &SchoolFilter::from_arg(Some("s1")));
        let ids: Vec<&str> = only_s1.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);

        assert_eq!(
            filter_platforms_by_school(&platforms, &SchoolFilter::from_arg(Some("all"))).len(),
            3
        );
        assert_eq!(SchoolFilter::from_arg(None), SchoolFilter::All);
        assert!(filter_platforms_by_school(&[], &SchoolFilter::School("s1".to_string())).is_empty());
    }
}
