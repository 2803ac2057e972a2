//! CSV export of one statistic bucket

use std::cmp::Ordering;

use chrono::NaiveDate;
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;
use serde::Serialize;

use crate::domain::entities::Member;
use crate::domain::errors::DomainError;
use crate::domain::services::{bucket, FamilyGraph};
use crate::domain::value_objects::StatKind;

pub const CSV_HEADER: &str = "Full Name,Gender,Birth Date,Age";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// A rendered CSV file ready to hand to an export sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// `Jan-5-2024`
pub fn format_export_date(date: NaiveDate) -> String {
    date.format("%b-%-d-%Y").to_string()
}

/// `"Adults With Children"` -> `adults_with_children_members.csv`
pub fn export_filename(label: &str) -> String {
    let stem = label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    format!("{}_members.csv", stem)
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Case-insensitive order; on a case-only difference lowercase sorts first.
/// Used only when no collator can be built.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// English collation at tertiary strength: accents are secondary to the
/// base letter and lowercase precedes uppercase on a case-only difference.
fn english_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);

    let locale = locale!("en").into();
    match Collator::try_new(&locale, options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!(error = %e, "English collator unavailable, sorting names case-insensitively");
            None
        }
    }
}

fn compare_names(collator: Option<&Collator>, a: &Member, b: &Member) -> Ordering {
    let compare = |x: &str, y: &str| match collator {
        Some(collator) => collator.compare(x, y),
        None => compare_text(x, y),
    };
    compare(&a.first_name, &b.first_name).then_with(|| compare(&a.last_name, &b.last_name))
}

fn render_row(member: &Member, today: NaiveDate) -> String {
    let mut full_name = member.full_name();
    if let Some(death_date) = member.death_date {
        full_name.push_str(&format!(" (deceased on {})", format_export_date(death_date)));
    }

    format!(
        "{},{},{},{}",
        quote_field(&full_name),
        member.gender,
        format_export_date(member.birth_date),
        member.age(today)
    )
}

/// Render members as CSV, sorted by first name then last name in English
/// collation order.
///
/// Rows are joined with `\n`; there is no trailing newline.
pub fn render_csv(members: &[&Member], today: NaiveDate) -> String {
    let collator = english_collator();
    let mut sorted = members.to_vec();
    sorted.sort_by(|a, b| compare_names(collator.as_ref(), a, b));

    std::iter::once(CSV_HEADER.to_string())
        .chain(sorted.into_iter().map(|member| render_row(member, today)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Package already-selected members as the export of the statistic `label`
pub fn export_members(label: &str, members: &[&Member], today: NaiveDate) -> CsvExport {
    tracing::info!(statistic = label, rows = members.len(), "Rendering CSV export");

    CsvExport {
        filename: export_filename(label),
        mime_type: CSV_MIME_TYPE,
        content: render_csv(members, today),
    }
}

/// Build the export for one statistic's bucket
pub fn export_statistic(kind: StatKind, graph: &FamilyGraph, today: NaiveDate) -> Result<CsvExport, DomainError> {
    let members = bucket(kind, graph, today).ok_or(DomainError::NotExportable(kind))?;
    Ok(export_members(kind.label(), &members, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Gender;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ann_and_bo() -> FamilyGraph {
        FamilyGraph::new(vec![
            Member::new(2, "Bo", "Kim", Gender::Male, date(1985, 5, 5)).with_death_date(date(2020, 12, 25)),
            Member::new(1, "Ann", "Lee", Gender::Female, date(1990, 1, 1)),
        ])
    }

    #[test]
    fn test_total_members_export() {
        let export = export_statistic(StatKind::TotalMembers, &ann_and_bo(), date(2024, 6, 15)).unwrap();

        assert_eq!(export.filename, "total_members_members.csv");
        assert_eq!(export.mime_type, "text/csv;charset=utf-8;");
        assert_eq!(
            export.content,
            "Full Name,Gender,Birth Date,Age\n\
             \"Ann Lee\",female,Jan-1-1990,34\n\
             \"Bo Kim (deceased on Dec-25-2020)\",male,May-5-1985,35"
        );
    }

    #[test]
    fn test_levels_is_not_exportable() {
        let err = export_statistic(StatKind::Levels, &ann_and_bo(), date(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, DomainError::NotExportable(StatKind::Levels)));
    }

    #[test]
    fn test_empty_bucket_is_header_only() {
        let export = export_statistic(StatKind::Under18, &ann_and_bo(), date(2024, 6, 15)).unwrap();
        assert_eq!(export.content, CSV_HEADER);
        assert_eq!(export.filename, "under_18_members.csv");
    }

    #[test]
    fn test_filename_collapses_whitespace() {
        assert_eq!(export_filename("Adults  Without\tChildren"), "adults_without_children_members.csv");
    }

    #[test]
    fn test_ties_on_first_name_sort_by_last_name() {
        let a = Member::new(1, "Sam", "young", Gender::Male, date(2001, 2, 3));
        let b = Member::new(2, "sam", "Adams", Gender::Male, date(2001, 2, 3));
        let c = Member::new(3, "Sam", "Baker", Gender::Male, date(2001, 2, 3));
        let csv = render_csv(&[&a, &b, &c], date(2024, 1, 1));
        let names: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(names, vec!["\"sam Adams\"", "\"Sam Baker\"", "\"Sam young\""]);
    }

    #[test]
    fn test_quotes_in_names_are_doubled() {
        let m = Member::new(1, "Robert \"Bob\"", "Ray", Gender::Male, date(1970, 10, 9));
        let csv = render_csv(&[&m], date(2024, 1, 1));
        assert_eq!(csv.lines().nth(1), Some("\"Robert \"\"Bob\"\" Ray\",male,Oct-9-1970,53"));
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let zoe = Member::new(1, "Zoe", "Lee", Gender::Female, date(1990, 1, 1));
        let emile = Member::new(2, "Émile", "Roy", Gender::Male, date(1990, 1, 1));
        let eve = Member::new(3, "Eve", "Kim", Gender::Female, date(1990, 1, 1));
        let csv = render_csv(&[&zoe, &emile, &eve], date(2024, 1, 1));
        let names: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(names, vec!["\"Émile Roy\"", "\"Eve Kim\"", "\"Zoe Lee\""]);
    }

    #[test]
    fn test_fallback_order_is_case_insensitive() {
        assert_eq!(compare_text("adams", "Baker"), Ordering::Less);
        assert_eq!(compare_text("sam", "Sam"), Ordering::Less);
    }
}
