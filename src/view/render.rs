//! Plain-text rendering of view-models.
//!
//! All functions here are pure and return the text to print. Money is shown
//! with the configured currency symbol, thousands separators and two
//! decimals; counts get thousands separators too.

use super::{DashboardView, ListView, PlatformsView, ViewState};
use crate::config::console::DisplayConfig;
use crate::core::payments::PaymentBreakdown;
use crate::core::people::{payment_standing, recent_actions};
use crate::core::schools::{SchoolHeadcount, SchoolStatusCounts};
use crate::records::{Action, PaymentRecord, PersonRecord, SchoolRecord, TeacherRecord};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::{Display, Write};

/// Shown instead of a table when a list is empty
pub const EMPTY_MESSAGE: &str = "No records found.";

/// Shown while a screen's fetch is in flight
pub const LOADING_MESSAGE: &str = "Loading statistics...";

/// Shown when no session is present
pub const LOGIN_MESSAGE: &str =
    "Sign in required. Set CONSOLE_SESSION_TOKEN to your session token and retry.";

/// Text of a screen that may still be loading.
#[must_use]
pub fn render_state(state: &ViewState<String>) -> &str {
    match state {
        ViewState::Loading => LOADING_MESSAGE,
        ViewState::Ready(text) => text,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a count like `1,500`.
#[must_use]
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// Formats money like `$1,250.50`.
#[must_use]
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}{symbol}{}.{cents}", group_thousands(whole))
}

/// Writes `formatted`, or `fallback` if the pattern cannot render this value.
fn formatted_or(formatted: impl Display, fallback: impl Display) -> String {
    let mut out = String::new();
    if write!(out, "{formatted}").is_err() {
        return fallback.to_string();
    }
    out
}

/// Formats a date with the configured pattern, falling back to ISO 8601.
#[must_use]
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    formatted_or(date.format(pattern), date)
}

/// Formats an optional sign-in time; `None` reads "Never".
#[must_use]
pub fn format_last_login(at: Option<DateTime<Utc>>, pattern: &str) -> String {
    at.map_or_else(
        || "Never".to_string(),
        |at| {
            format!(
                "{} {}",
                format_date(at.date_naive(), pattern),
                at.format("%H:%M")
            )
        },
    )
}

/// A left-aligned text table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Starts a table with these column headings.
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing cells render blank.
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Renders headings, a rule, then every row.
    #[must_use]
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(i) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }

        let line = |cells: &[String]| {
            widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = cells.get(i).map_or("", String::as_str);
                    format!("{cell:<width$}")
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let rule = widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  ");

        let mut lines = vec![line(&self.headers), rule];
        lines.extend(self.rows.iter().map(|row| line(row)));
        lines.join("\n")
    }
}

fn table_or_empty(table: &Table, is_empty: bool) -> String {
    if is_empty {
        EMPTY_MESSAGE.to_string()
    } else {
        table.render()
    }
}

fn search_line(term: &str, shown: usize) -> Option<String> {
    (!term.trim().is_empty()).then(|| format!("Search \"{term}\": {} shown", format_count(shown)))
}

fn join_sections(sections: impl IntoIterator<Item = String>) -> String {
    sections.into_iter().collect::<Vec<_>>().join("\n\n")
}

/// Renders the dashboard cards.
#[must_use]
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut lines = vec!["Dashboard".to_string(), "=========".to_string()];
    for card in &view.cards {
        lines.push(format!(
            "{:<16} {:>14}  {}",
            card.title, card.value, card.subtitle
        ));
    }
    lines.join("\n")
}

/// Renders the schools screen.
#[must_use]
pub fn render_schools(
    view: &ListView<SchoolRecord>,
    counts: &SchoolStatusCounts,
    headcounts: &BTreeMap<String, SchoolHeadcount>,
    display: &DisplayConfig,
) -> String {
    let mut table = Table::new([
        "Code", "School", "Director", "Status", "Plan", "Students", "Teachers", "Staff",
        "Parents", "Since",
    ]);
    for school in view.rows() {
        let heads = headcounts.get(&school.id).copied().unwrap_or_default();
        table.push_row(vec![
            school.code.clone(),
            school.name.clone(),
            school.director.clone().unwrap_or_default(),
            school.status.to_string(),
            school.subscription_plan.clone(),
            format!(
                "{}/{}",
                format_count(heads.students),
                school.limits.max_students
            ),
            format!("{}/{}", format_count(heads.teachers), school.limits.max_teachers),
            format!("{}/{}", format_count(heads.staff), school.limits.max_staff),
            format_count(heads.parents),
            format_date(school.created_at.date_naive(), &display.date_format),
        ]);
    }

    let header = format!(
        "Schools: {} total, {} active, {} blocked",
        format_count(counts.total),
        format_count(counts.active),
        format_count(counts.blocked)
    );
    join_sections(
        [Some(header), search_line(view.search_term(), view.rows().len())]
            .into_iter()
            .flatten()
            .chain([table_or_empty(&table, view.is_empty())]),
    )
}

fn person_table(rows: &[PersonRecord], display: &DisplayConfig) -> Table {
    let mut table = Table::new([
        "Student", "School", "Class", "Grade", "Parent", "Paid", "Billed", "Standing",
    ]);
    for person in rows {
        table.push_row(vec![
            person.name.clone(),
            person.school_name.clone(),
            person.class_name.clone(),
            person.grade.clone(),
            person.parent_name.clone(),
            format_amount(person.payments.paid, &display.currency_symbol),
            format_amount(person.payments.total, &display.currency_symbol),
            payment_standing(&person.payments).label().to_string(),
        ]);
    }
    table
}

/// Renders the students screen, plus the detail modal when one is open.
#[must_use]
pub fn render_students(view: &ListView<PersonRecord>, display: &DisplayConfig) -> String {
    let table = person_table(view.rows(), display);
    let header = format!("Students: {}", format_count(view.rows().len()));
    join_sections(
        [Some(header), search_line(view.search_term(), view.rows().len())]
            .into_iter()
            .flatten()
            .chain([table_or_empty(&table, view.is_empty())])
            .chain(
                view.selected_record()
                    .map(|person| render_person_detail(person, display)),
            ),
    )
}

/// Renders the parents screen, plus the detail modal when one is open.
#[must_use]
pub fn render_parents(view: &ListView<PersonRecord>, display: &DisplayConfig) -> String {
    let mut table = Table::new([
        "Parent", "Student", "School", "Class", "Platform", "Last login", "Standing",
    ]);
    for parent in view.rows() {
        table.push_row(vec![
            parent.parent_name.clone(),
            parent.name.clone(),
            parent.school_name.clone(),
            parent.class_name.clone(),
            if parent.platform_active {
                "Active".to_string()
            } else {
                "Inactive".to_string()
            },
            format_last_login(parent.last_login, &display.date_format),
            payment_standing(&parent.payments).label().to_string(),
        ]);
    }

    let active = view.rows().iter().filter(|p| p.platform_active).count();
    let header = format!(
        "Parents: {} ({} using platform)",
        format_count(view.rows().len()),
        format_count(active)
    );
    join_sections(
        [Some(header), search_line(view.search_term(), view.rows().len())]
            .into_iter()
            .flatten()
            .chain([table_or_empty(&table, view.is_empty())])
            .chain(
                view.selected_record()
                    .map(|person| render_person_detail(person, display)),
            ),
    )
}

/// Renders the teachers screen, plus the detail modal when one is open.
#[must_use]
pub fn render_teachers(view: &ListView<TeacherRecord>, display: &DisplayConfig) -> String {
    let mut table = Table::new([
        "Teacher", "Email", "School", "Parents", "Students", "Status", "Last login",
    ]);
    for teacher in view.rows() {
        table.push_row(vec![
            teacher.name.clone(),
            teacher.email.clone(),
            teacher.school_name.clone(),
            teacher.total_parents.to_string(),
            teacher.total_students.to_string(),
            if teacher.is_active {
                "Active".to_string()
            } else {
                "Inactive".to_string()
            },
            format_last_login(teacher.last_login, &display.date_format),
        ]);
    }

    let header = format!("Teachers: {}", format_count(view.rows().len()));
    join_sections(
        [Some(header), search_line(view.search_term(), view.rows().len())]
            .into_iter()
            .flatten()
            .chain([table_or_empty(&table, view.is_empty())])
            .chain(
                view.selected_record()
                    .map(|teacher| render_teacher_detail(teacher, display)),
            ),
    )
}

/// Renders the payments screen with its status breakdown.
#[must_use]
pub fn render_payments(
    view: &ListView<PaymentRecord>,
    breakdown: &PaymentBreakdown,
    display: &DisplayConfig,
) -> String {
    let symbol = display.currency_symbol.as_str();
    let mut table = Table::new([
        "Date", "School", "Parent", "Student", "Amount", "Status", "Type", "Method",
        "Transaction",
    ]);
    for payment in view.rows() {
        table.push_row(vec![
            format_date(payment.created_at.date_naive(), &display.date_format),
            payment.school_name.clone(),
            payment.parent_name.clone().unwrap_or_default(),
            payment.student_name.clone().unwrap_or_default(),
            format_amount(payment.amount, symbol),
            payment.status.to_string(),
            payment.payment_type.clone(),
            payment.payment_method.clone().unwrap_or_default(),
            payment.transaction_id.clone().unwrap_or_default(),
        ]);
    }

    let header = [
        format!(
            "Payments: {} total, {} completed, {} pending, {} failed, {} refunded",
            format_count(breakdown.total),
            format_count(breakdown.completed),
            format_count(breakdown.pending),
            format_count(breakdown.failed),
            format_count(breakdown.refunded)
        ),
        format!(
            "Revenue: {} received, {} pending",
            format_amount(breakdown.total_revenue, symbol),
            format_amount(breakdown.pending_revenue, symbol)
        ),
        format!("Success rate: {:.1}%", breakdown.success_rate()),
    ]
    .join("\n");

    join_sections(
        [Some(header), search_line(view.search_term(), view.rows().len())]
            .into_iter()
            .flatten()
            .chain([table_or_empty(&table, view.is_empty())]),
    )
}

/// Renders the platform integrations screen with its summary.
#[must_use]
pub fn render_platforms(view: &PlatformsView, display: &DisplayConfig) -> String {
    let summary = &view.summary;
    let mut table = Table::new([
        "Platform", "School", "Type", "Status", "Active users", "Last sync",
    ]);
    for platform in &view.rows {
        table.push_row(vec![
            platform.platform_name.clone(),
            platform
                .school_name
                .clone()
                .unwrap_or_else(|| platform.school_id.clone()),
            platform.platform_type.to_string(),
            platform.status.to_string(),
            platform.active_users_count.to_string(),
            format_last_login(platform.last_sync, &display.date_format),
        ]);
    }

    let by_type = summary
        .by_type
        .iter()
        .map(|(kind, count)| format!("{kind}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    let header = [
        format!(
            "Platforms: {} total, {} active, {} maintenance, {} inactive",
            format_count(summary.total),
            format_count(summary.active),
            format_count(summary.maintenance),
            format_count(summary.inactive)
        ),
        format!("Active users: {}", summary.active_users),
        format!("By type: {by_type}"),
    ]
    .join("\n");

    join_sections([header, table_or_empty(&table, view.rows.is_empty())])
}

fn actions_block(actions: &[Action], display: &DisplayConfig) -> String {
    let recent = recent_actions(actions, display.action_limit());
    if recent.is_empty() {
        return "Recent activity: none".to_string();
    }
    let mut lines = vec!["Recent activity:".to_string()];
    lines.extend(recent.iter().map(|action| {
        format!(
            "  {} {}  {}",
            format_date(action.timestamp.date_naive(), &display.date_format),
            action.timestamp.format("%H:%M"),
            if action.description.is_empty() {
                action.kind.as_str()
            } else {
                action.description.as_str()
            }
        )
    }));
    lines.join("\n")
}

/// Renders the detail modal of a student or parent row.
#[must_use]
pub fn render_person_detail(person: &PersonRecord, display: &DisplayConfig) -> String {
    let symbol = display.currency_symbol.as_str();
    let teachers = if person.teachers.is_empty() {
        "-".to_string()
    } else {
        person.teachers.join(", ")
    };

    let details = [
        format!("{} ({})", person.name, person.id),
        format!("School:      {}", person.school_name),
        format!("Class:       {} / {}", person.class_name, person.grade),
        format!("Parent:      {}", person.parent_name),
        format!("Teachers:    {teachers}"),
        format!(
            "Payments:    {} paid of {}, {} overdue ({})",
            format_amount(person.payments.paid, symbol),
            format_amount(person.payments.total, symbol),
            format_amount(person.payments.overdue, symbol),
            payment_standing(&person.payments).label()
        ),
        format!(
            "Enrolled:    {}",
            format_date(person.enrollment_date, &display.date_format)
        ),
        format!(
            "Last login:  {}",
            format_last_login(person.last_login, &display.date_format)
        ),
    ]
    .join("\n");

    join_sections([details, actions_block(&person.actions, display)])
}

/// Renders the detail modal of a teacher row.
#[must_use]
pub fn render_teacher_detail(teacher: &TeacherRecord, display: &DisplayConfig) -> String {
    let details = [
        format!("{} ({})", teacher.name, teacher.id),
        format!("Email:       {}", teacher.email),
        format!("School:      {}", teacher.school_name),
        format!(
            "Reach:       {} students, {} parents",
            teacher.total_students, teacher.total_parents
        ),
        format!(
            "Since:       {}",
            format_date(teacher.enrollment_date, &display.date_format)
        ),
        format!(
            "Last login:  {}",
            format_last_login(teacher.last_login, &display.date_format)
        ),
    ]
    .join("\n");

    join_sections([details, actions_block(&teacher.actions, display)])
}
