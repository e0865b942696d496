//! Pure ranking computations over fetched result rows.
//!
//! Everything here is a function of (rows, parameters) to a derived
//! view; source rows are never mutated. Ordering is deterministic:
//! percentage descending, then submission time ascending, then id.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::features::rankings::dtos::{
    GroupBy, GroupCountDto, RankedResultDto, StandardGroupDto, SummaryDto,
};
use crate::features::results::models::ExamResultDetail;

/// Deterministic ranking order within a group
fn rank_order(a: &ExamResultDetail, b: &ExamResultDetail) -> Ordering {
    b.percentage
        .cmp(&a.percentage)
        .then_with(|| a.submitted_at.cmp(&b.submitted_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Partition rows by standard and keep the top `n` of each partition.
///
/// Catalogued standards come first in display order; free-text "other"
/// labels follow alphabetically, each forming its own group.
pub fn top_n_by_standard(rows: Vec<ExamResultDetail>, n: usize) -> Vec<StandardGroupDto> {
    let mut partitions: BTreeMap<(i32, String), Vec<ExamResultDetail>> = BTreeMap::new();
    for row in rows {
        let order = row.standard_display_order.unwrap_or(i32::MAX);
        let label = row.standard_label().to_string();
        partitions.entry((order, label)).or_default().push(row);
    }

    partitions
        .into_iter()
        .map(|((_, label), mut members)| {
            members.sort_by(rank_order);
            members.truncate(n);
            StandardGroupDto {
                standard: label,
                members: ranked(&members),
            }
        })
        .collect()
}

/// Count, average, max and min percentage over a set.
///
/// An empty set yields count 0 with zeroed statistics.
pub fn summarize(rows: &[ExamResultDetail]) -> SummaryDto {
    if rows.is_empty() {
        return SummaryDto {
            count: 0,
            average_percentage: Decimal::ZERO,
            max_percentage: Decimal::ZERO,
            min_percentage: Decimal::ZERO,
        };
    }

    let sum: Decimal = rows.iter().map(|r| r.percentage).sum();
    let average = (sum / Decimal::from(rows.len() as i64))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let mut max = rows[0].percentage;
    let mut min = rows[0].percentage;
    for row in &rows[1..] {
        max = max.max(row.percentage);
        min = min.min(row.percentage);
    }

    SummaryDto {
        count: rows.len(),
        average_percentage: average,
        max_percentage: max,
        min_percentage: min,
    }
}

/// Group rows by the requested axis, with ranked members per group.
///
/// Standard groups keep display order; medium and village groups are
/// ordered alphabetically by key.
pub fn grouped_counts(rows: Vec<ExamResultDetail>, by: GroupBy) -> Vec<GroupCountDto> {
    let mut groups: BTreeMap<(i32, String), Vec<ExamResultDetail>> = BTreeMap::new();
    for row in rows {
        let key = match by {
            GroupBy::Medium => (0, row.medium.as_str().to_string()),
            GroupBy::Village => (0, row.village_name.clone()),
            GroupBy::Standard => (
                row.standard_display_order.unwrap_or(i32::MAX),
                row.standard_label().to_string(),
            ),
        };
        groups.entry(key).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|((_, key), mut members)| {
            members.sort_by(rank_order);
            GroupCountDto {
                key,
                count: members.len(),
                members: ranked(&members),
            }
        })
        .collect()
}

fn ranked(members: &[ExamResultDetail]) -> Vec<RankedResultDto> {
    members
        .iter()
        .enumerate()
        .map(|(i, detail)| RankedResultDto::from_detail(i + 1, detail))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::results::models::Medium;
    use chrono::{Duration, TimeZone, Utc};
    use fake::faker::name::en::Name;
    use fake::Fake;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    struct Fixture {
        standard: Option<(&'static str, i32)>,
        other: Option<&'static str>,
        percentage: Decimal,
        submitted_offset_secs: i64,
        medium: Medium,
        village: &'static str,
    }

    fn row(f: Fixture) -> ExamResultDetail {
        let base = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
        let submitted = base + Duration::seconds(f.submitted_offset_secs);
        ExamResultDetail {
            id: Uuid::new_v4(),
            student_name: Name().fake(),
            standard_id: f.standard.map(|_| Uuid::new_v4()),
            other_standard: f.other.map(String::from),
            medium: f.medium,
            total_marks: None,
            obtained_marks: None,
            percentage: f.percentage,
            village_id: Uuid::new_v4(),
            contact_number: "9876543210".to_string(),
            image_url: "/uploads/results/test.jpg".to_string(),
            image_url_secondary: None,
            is_verified: false,
            is_approved: true,
            submitted_at: submitted,
            created_at: submitted,
            updated_at: submitted,
            standard_name: f.standard.map(|(name, _)| name.to_string()),
            standard_display_order: f.standard.map(|(_, order)| order),
            village_name: f.village.to_string(),
        }
    }

    fn std_10(percentage: Decimal, offset: i64) -> ExamResultDetail {
        row(Fixture {
            standard: Some(("Standard 10", 10)),
            other: None,
            percentage,
            submitted_offset_secs: offset,
            medium: Medium::Gujarati,
            village: "Amreli",
        })
    }

    #[test]
    fn top_three_takes_highest_percentages() {
        let rows = vec![
            std_10(dec!(72.00), 0),
            std_10(dec!(91.50), 1),
            std_10(dec!(85.00), 2),
            std_10(dec!(64.25), 3),
            std_10(dec!(88.00), 4),
        ];

        let groups = top_n_by_standard(rows, 3);
        assert_eq!(groups.len(), 1);
        let members = &groups[0].members;
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].percentage, dec!(91.50));
        assert_eq!(members[1].percentage, dec!(88.00));
        assert_eq!(members[2].percentage, dec!(85.00));
        assert_eq!(members[0].rank, 1);
        assert_eq!(members[2].rank, 3);
    }

    #[test]
    fn ties_break_on_submission_time_then_id() {
        let mut first = std_10(dec!(90.00), 10);
        let second = std_10(dec!(90.00), 20);
        first.student_name = "Earlier".to_string();

        let groups = top_n_by_standard(vec![second.clone(), first.clone()], 2);
        let members = &groups[0].members;
        assert_eq!(members[0].student_name, "Earlier");
        assert_eq!(members[1].id, second.id);

        // Same instant: the smaller id wins
        let mut a = std_10(dec!(80.00), 0);
        let mut b = std_10(dec!(80.00), 0);
        a.id = Uuid::from_u128(1);
        b.id = Uuid::from_u128(2);
        let groups = top_n_by_standard(vec![b, a], 2);
        assert_eq!(groups[0].members[0].id, Uuid::from_u128(1));
    }

    #[test]
    fn small_groups_return_all_their_rows() {
        let rows = vec![std_10(dec!(70.00), 0), std_10(dec!(60.00), 1)];
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let groups = top_n_by_standard(rows, 3);
        assert_eq!(groups[0].members.len(), 2);
        for member in &groups[0].members {
            assert!(ids.contains(&member.id));
        }
    }

    #[test]
    fn other_labels_form_their_own_groups_after_catalogued_standards() {
        let rows = vec![
            row(Fixture {
                standard: None,
                other: Some("Diploma CE"),
                percentage: dec!(75.00),
                submitted_offset_secs: 0,
                medium: Medium::English,
                village: "Rajula",
            }),
            std_10(dec!(82.00), 1),
            row(Fixture {
                standard: None,
                other: Some("B.Sc Sem 2"),
                percentage: dec!(68.00),
                submitted_offset_secs: 2,
                medium: Medium::English,
                village: "Rajula",
            }),
        ];

        let groups = top_n_by_standard(rows, 3);
        let labels: Vec<&str> = groups.iter().map(|g| g.standard.as_str()).collect();
        assert_eq!(labels, vec!["Standard 10", "B.Sc Sem 2", "Diploma CE"]);
    }

    #[test]
    fn empty_summary_is_zeroed() {
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_percentage, Decimal::ZERO);
        assert_eq!(summary.max_percentage, Decimal::ZERO);
        assert_eq!(summary.min_percentage, Decimal::ZERO);
    }

    #[test]
    fn summary_statistics_over_a_set() {
        let rows = vec![
            std_10(dec!(90.00), 0),
            std_10(dec!(80.00), 1),
            std_10(dec!(71.00), 2),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.count, 3);
        // (90 + 80 + 71) / 3 = 80.333... -> 80.33
        assert_eq!(summary.average_percentage, dec!(80.33));
        assert_eq!(summary.max_percentage, dec!(90.00));
        assert_eq!(summary.min_percentage, dec!(71.00));
    }

    #[test]
    fn grouped_counts_by_village() {
        let mut in_rajula = row(Fixture {
            standard: Some(("Standard 12", 12)),
            other: None,
            percentage: dec!(95.00),
            submitted_offset_secs: 0,
            medium: Medium::Gujarati,
            village: "Rajula",
        });
        in_rajula.student_name = "Topper".to_string();

        let rows = vec![
            std_10(dec!(70.00), 1),
            std_10(dec!(60.00), 2),
            in_rajula,
        ];

        let groups = grouped_counts(rows, GroupBy::Village);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Amreli");
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].key, "Rajula");
        assert_eq!(groups[1].members[0].student_name, "Topper");
        assert_eq!(groups[1].members[0].rank, 1);
    }

    #[test]
    fn grouped_counts_by_medium() {
        let rows = vec![
            std_10(dec!(70.00), 0),
            row(Fixture {
                standard: Some(("Standard 9", 9)),
                other: None,
                percentage: dec!(66.00),
                submitted_offset_secs: 1,
                medium: Medium::English,
                village: "Amreli",
            }),
            std_10(dec!(88.00), 2),
        ];

        let groups = grouped_counts(rows, GroupBy::Medium);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["english", "gujarati"]);
        assert_eq!(groups[1].count, 2);
    }
}
