//! View-models - render-ready data derived from record sets.
//!
//! Every screen is built from an explicit struct rather than ad-hoc state:
//! list screens from [`ListView`], the landing page from [`DashboardView`].
//! Selection and modal changes return a new view-model instead of mutating
//! shared state.

pub mod render;

use crate::config::session::Session;
use crate::core::aggregate::{Stats, aggregate};
use crate::core::filter::{Searchable, search};
use crate::core::platforms::{
    PlatformSummary, SchoolFilter, filter_platforms_by_school, platform_summary,
};
use crate::errors::{Error, Result};
use crate::records::{Identified, PlatformRecord, RecordSets};
use std::fmt;
use std::str::FromStr;

/// A screen either still waiting for its fetch or ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    /// Fetch in flight; a placeholder is shown
    Loading,
    /// Data available
    Ready(T),
}

impl<T> ViewState<T> {
    /// Whether the placeholder is showing
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The ready value, if any
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Ready(value) => Some(value),
        }
    }

    /// Transforms the ready value, keeping `Loading` as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            Self::Loading => ViewState::Loading,
            Self::Ready(value) => ViewState::Ready(f(value)),
        }
    }
}

/// One list screen: its filtered rows plus selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<T> {
    rows: Vec<T>,
    search_term: String,
    selected: Option<String>,
    modal_open: bool,
}

impl<T: Identified> ListView<T> {
    /// Wraps rows that have already been narrowed by `search_term`.
    #[must_use]
    pub fn from_rows(rows: Vec<T>, search_term: &str) -> Self {
        Self {
            rows,
            search_term: search_term.to_string(),
            selected: None,
            modal_open: false,
        }
    }

    /// Filters `records` with their own search fields.
    #[must_use]
    pub fn build(records: &[T], search_term: &str) -> Self
    where
        T: Searchable + Clone,
    {
        Self::from_rows(search(records, search_term), search_term)
    }

    /// Opens the detail modal on the row with `id`.
    ///
    /// Unknown ids leave the view unchanged.
    #[must_use]
    pub fn select(self, id: &str) -> Self {
        if !self.rows.iter().any(|row| row.id() == id) {
            return self;
        }
        Self {
            selected: Some(id.to_string()),
            modal_open: true,
            ..self
        }
    }

    /// Closes the detail modal and clears the selection.
    #[must_use]
    pub fn close_modal(self) -> Self {
        Self {
            selected: None,
            modal_open: false,
            ..self
        }
    }

    /// The row the modal is showing, if open.
    #[must_use]
    pub fn selected_record(&self) -> Option<&T> {
        let id = self.selected.as_deref()?;
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Rows in display order
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Query that produced the rows
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether the detail modal is open
    #[must_use]
    pub const fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// True when no row survived the filter
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One summary tile on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCard {
    /// Tile heading
    pub title: &'static str,
    /// The headline figure, already formatted
    pub value: String,
    /// Supporting line under the figure
    pub subtitle: String,
}

/// The landing page: statistics plus their eight cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Raw figures
    pub stats: Stats,
    /// Cards in display order
    pub cards: Vec<DashboardCard>,
}

impl DashboardView {
    /// Aggregates `records` and lays out the cards, formatting money with
    /// `currency_symbol`.
    #[must_use]
    pub fn build(records: &RecordSets, currency_symbol: &str) -> Self {
        let stats = aggregate(records);
        Self::from_stats(stats, currency_symbol)
    }

    /// Lays out the cards for precomputed statistics.
    #[must_use]
    pub fn from_stats(stats: Stats, currency_symbol: &str) -> Self {
        use render::{format_amount, format_count};

        let card = |title, value, subtitle| DashboardCard {
            title,
            value,
            subtitle,
        };

        let cards = vec![
            card(
                "Total Schools",
                format_count(stats.total_schools),
                format!(
                    "{} active, {} blocked",
                    stats.active_schools, stats.blocked_schools
                ),
            ),
            card(
                "Students",
                format_count(stats.total_students),
                "Across all schools".to_string(),
            ),
            card(
                "Teachers",
                format_count(stats.total_teachers),
                "Active educators".to_string(),
            ),
            card(
                "Staff Members",
                format_count(stats.total_staff),
                "Administrative staff".to_string(),
            ),
            card(
                "Parents",
                format_count(stats.total_parents),
                format!("{} using platform", stats.active_parents),
            ),
            card(
                "Total Revenue",
                format_amount(stats.total_revenue, currency_symbol),
                format!("{} completed payments", stats.completed_payments),
            ),
            card(
                "Pending Revenue",
                format_amount(stats.pending_revenue, currency_symbol),
                format!("{} not yet completed", stats.outstanding_payments()),
            ),
            card(
                "Active Platforms",
                format_count(stats.active_platforms),
                "Platform integrations".to_string(),
            ),
        ];

        Self { stats, cards }
    }

    /// The card with `title`, if any
    #[must_use]
    pub fn card(&self, title: &str) -> Option<&DashboardCard> {
        self.cards.iter().find(|card| card.title == title)
    }
}

/// The platforms screen.
///
/// The school dropdown only narrows the table; the summary always describes
/// every integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformsView {
    /// Integrations of the selected school, in fetch order
    pub rows: Vec<PlatformRecord>,
    /// Counts over all integrations
    pub summary: PlatformSummary,
}

impl PlatformsView {
    /// Narrows `platforms` to `filter` and summarises the full list.
    #[must_use]
    pub fn build(platforms: &[PlatformRecord], filter: &SchoolFilter) -> Self {
        Self {
            rows: filter_platforms_by_school(platforms, filter),
            summary: platform_summary(platforms),
        }
    }
}

/// Every screen of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Sign-in prompt; the only screen reachable without a session
    Login,
    /// Statistics overview
    Dashboard,
    /// Schools list
    Schools,
    /// Students list
    Students,
    /// Parents list
    Parents,
    /// Teachers list
    Teachers,
    /// Payments list
    Payments,
    /// Platform integrations list
    Platforms,
}

impl Screen {
    /// Screens reachable once signed in, in navigation order
    pub const NAVIGATION: [Self; 7] = [
        Self::Dashboard,
        Self::Schools,
        Self::Students,
        Self::Parents,
        Self::Teachers,
        Self::Payments,
        Self::Platforms,
    ];

    /// Route name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::Schools => "schools",
            Self::Students => "students",
            Self::Parents => "parents",
            Self::Teachers => "teachers",
            Self::Payments => "payments",
            Self::Platforms => "platforms",
        }
    }

    /// The screen actually shown for `requested`: without a session that is
    /// always the login screen.
    #[must_use]
    pub const fn resolve(session: Option<&Session>, requested: Self) -> Self {
        match session {
            Some(_) => requested,
            None => Self::Login,
        }
    }

    /// Like [`Screen::resolve`], but reports a redirect to login as an error.
    ///
    /// # Errors
    /// Returns [`Error::Unauthenticated`] when a non-login screen is
    /// requested without a session.
    pub fn require(session: Option<&Session>, requested: Self) -> Result<Self> {
        match Self::resolve(session, requested) {
            Self::Login if requested != Self::Login => Err(Error::Unauthenticated),
            screen => Ok(screen),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim().to_ascii_lowercase();
        std::iter::once(Self::Login)
            .chain(Self::NAVIGATION)
            .find(|screen| screen.as_str() == wanted)
            .ok_or_else(|| Error::InvalidValue {
                kind: "screen",
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{
        PaymentStatus, PersonRecord, PlatformStatus, PlatformType, SchoolStatus,
    };
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    fn students() -> Vec<PersonRecord> {
        vec![
            student_record("1", "João Silva", "Escola Exemplo", "A", "Maria Silva"),
            student_record("2", "Ana Pereira", "Colégio Exemplar", "B", "Carlos Pereira"),
        ]
    }

    #[test]
    fn test_list_view_filters_and_selects() {
        let view = ListView::build(&students(), "silva");
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.search_term(), "silva");
        assert!(!view.modal_open());

        let view = view.select("1");
        assert!(view.modal_open());
        assert_eq!(
            view.selected_record().map(|p| p.name.as_str()),
            Some("João Silva")
        );

        let view = view.close_modal();
        assert!(!view.modal_open());
        assert_eq!(view.selected_record(), None);
    }

    #[test]
    fn test_selecting_filtered_out_row_is_ignored() {
        let view = ListView::build(&students(), "silva").select("2");
        assert!(!view.modal_open());
        assert_eq!(view.selected_record(), None);
    }

    #[test]
    fn test_empty_list_view() {
        let view = ListView::build(&students(), "zzz");
        assert!(view.is_empty());
    }

    #[test]
    fn test_view_state() {
        let loading: ViewState<u8> = ViewState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.map(|n| n + 1), ViewState::Loading);

        let ready = ViewState::Ready(1_u8).map(|n| n + 1);
        assert_eq!(ready.ready(), Some(&2));
    }

    #[test]
    fn test_dashboard_cards() {
        let records = RecordSets {
            schools: vec![
                school_record("s1", "Dom Bosco", SchoolStatus::Active),
                school_record("s2", "Escola Norte", SchoolStatus::Active),
                school_record("s3", "Colégio XYZ", SchoolStatus::Blocked),
            ],
            students: vec![PersonRecord::default(); 1500],
            payments: vec![
                payment_record("p1", dec!(1250.5), PaymentStatus::Completed),
                payment_record("p2", dec!(50), PaymentStatus::Pending),
            ],
            ..RecordSets::default()
        };

        let view = DashboardView::build(&records, "$");
        assert_eq!(view.cards.len(), 8);

        let schools = view.card("Total Schools");
        assert_eq!(schools.map(|c| c.value.as_str()), Some("3"));
        assert_eq!(
            schools.map(|c| c.subtitle.as_str()),
            Some("2 active, 1 blocked")
        );
        assert_eq!(
            view.card("Students").map(|c| c.value.as_str()),
            Some("1,500")
        );
        assert_eq!(
            view.card("Total Revenue").map(|c| c.value.as_str()),
            Some("$1,250.50")
        );
        assert_eq!(
            view.card("Pending Revenue").map(|c| c.subtitle.as_str()),
            Some("1 not yet completed")
        );
    }

    #[test]
    fn test_platform_summary_ignores_school_filter() {
        let platforms = vec![
            platform_record("p1", "s1", PlatformType::Mobile, PlatformStatus::Active, 120),
            platform_record("p2", "s2", PlatformType::Web, PlatformStatus::Maintenance, 40),
            platform_record("p3", "s2", PlatformType::Api, PlatformStatus::Active, 30),
        ];

        let view = PlatformsView::build(&platforms, &SchoolFilter::School("s1".to_string()));
        let ids: Vec<&str> = view.rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1"]);
        assert_eq!(view.summary, platform_summary(&platforms));
        assert_eq!(view.summary.total, 3);
        assert_eq!(view.summary.active_users, 150);
        assert_eq!(view.summary.maintenance, 1);
    }

    #[test]
    fn test_screen_gate() {
        let session = Session::from_token(Some("token".to_string()));
        assert_eq!(
            Screen::resolve(session.as_ref(), Screen::Payments),
            Screen::Payments
        );
        assert_eq!(Screen::resolve(None, Screen::Payments), Screen::Login);
        assert!(matches!(
            Screen::require(None, Screen::Dashboard),
            Err(Error::Unauthenticated)
        ));
        assert!(matches!(Screen::require(None, Screen::Login), Ok(Screen::Login)));
    }

    #[test]
    fn test_screen_parsing() {
        assert!(matches!("Payments".parse::<Screen>(), Ok(Screen::Payments)));
        assert!(matches!(
            "reports".parse::<Screen>(),
            Err(Error::InvalidValue { kind: "screen", .. })
        ));
    }
}
