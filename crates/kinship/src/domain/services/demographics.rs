//! Demographic aggregation - the statistic cards of the stats widget
//!
//! Every statistic is evaluated independently over the full member set.
//! Except for `Levels`, each one keeps the ids of the members that produced
//! its value so the exact bucket can be exported later.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::{Member, MemberId};
use crate::domain::services::{tree_depth, FamilyGraph, ADULT_AGE};
use crate::domain::value_objects::{Gender, StatKind};

type Predicate = fn(&FamilyGraph, &Member, NaiveDate) -> bool;

/// One computed statistic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistic {
    pub kind: StatKind,
    pub label: String,
    pub value: u64,
    /// Member ids in snapshot order; `None` for statistics without a bucket
    pub bucket: Option<Vec<MemberId>>,
    /// Snapshot positions of the same members. Unlike ids these stay
    /// distinct when a snapshot repeats an id.
    #[serde(skip)]
    pub positions: Option<Vec<usize>>,
}

/// All statistics for one snapshot, computed for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub snapshot_version: u64,
    pub computed_for: NaiveDate,
    pub statistics: Vec<Statistic>,
}

impl StatsReport {
    pub fn get(&self, kind: StatKind) -> Option<&Statistic> {
        self.statistics.iter().find(|stat| stat.kind == kind)
    }

    pub fn value(&self, kind: StatKind) -> u64 {
        self.get(kind).map(|stat| stat.value).unwrap_or(0)
    }
}

fn predicate(kind: StatKind) -> Option<Predicate> {
    let predicate: Predicate = match kind {
        StatKind::TotalMembers => |_, _, _| true,
        StatKind::Levels => return None,
        StatKind::MaleMembers => |_, m, _| m.gender == Gender::Male,
        StatKind::FemaleMembers => |_, m, _| m.gender == Gender::Female,
        StatKind::LivingMembers => |_, m, _| !m.is_deceased(),
        StatKind::DeceasedMembers => |_, m, _| m.is_deceased(),
        StatKind::NoPhoto => |_, m, _| !m.has_photo(),
        StatKind::Under18 => |_, m, today| m.age(today) < ADULT_AGE,
        StatKind::AdultsWithChildren => {
            |g, m, today| m.age(today) >= ADULT_AGE && g.is_parent_of_someone(m)
        }
        StatKind::AdultsWithoutChildren => {
            |g, m, today| m.age(today) >= ADULT_AGE && !g.is_parent_of_someone(m)
        }
    };
    Some(predicate)
}

fn bucket_positions(kind: StatKind, graph: &FamilyGraph, today: NaiveDate) -> Option<Vec<usize>> {
    let predicate = predicate(kind)?;
    Some(
        graph
            .members()
            .iter()
            .enumerate()
            .filter(|(_, member)| predicate(graph, member, today))
            .map(|(position, _)| position)
            .collect(),
    )
}

/// Members backing `kind`, in snapshot order. `None` if the statistic has no bucket.
pub fn bucket(kind: StatKind, graph: &FamilyGraph, today: NaiveDate) -> Option<Vec<&Member>> {
    let positions = bucket_positions(kind, graph, today)?;
    Some(graph.members_at(&positions).collect())
}

pub fn compute_statistic(kind: StatKind, graph: &FamilyGraph, today: NaiveDate) -> Statistic {
    let (value, bucket, positions) = match bucket_positions(kind, graph, today) {
        Some(positions) => {
            let ids: Vec<MemberId> = graph.members_at(&positions).map(|m| m.id).collect();
            (positions.len() as u64, Some(ids), Some(positions))
        }
        None => (tree_depth(graph) as u64, None, None),
    };

    Statistic {
        kind,
        label: kind.label().to_string(),
        value,
        bucket,
        positions,
    }
}

/// Compute every statistic in card order
pub fn compute_report(graph: &FamilyGraph, snapshot_version: u64, today: NaiveDate) -> StatsReport {
    let statistics = StatKind::ALL
        .into_iter()
        .map(|kind| compute_statistic(kind, graph, today))
        .collect();

    tracing::debug!(
        snapshot_version,
        members = graph.len(),
        %today,
        "Computed family statistics"
    );

    StatsReport {
        snapshot_version,
        computed_for: today,
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::age_in_years;
    use crate::domain::value_objects::RelationshipType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn sample_graph() -> FamilyGraph {
        FamilyGraph::new(vec![
            Member::new(1, "Grace", "Hall", Gender::Female, date(1940, 3, 2))
                .with_death_date(date(2010, 8, 9))
                .with_relationship(RelationshipType::Child, 2),
            Member::new(2, "Henry", "Hall", Gender::Male, date(1965, 7, 1))
                .with_photo("photos/henry.jpg")
                .with_relationship(RelationshipType::Parent, 1)
                .with_relationship(RelationshipType::Child, 3),
            Member::new(3, "Ivy", "Hall", Gender::Female, date(2010, 1, 20))
                .with_relationship(RelationshipType::Parent, 2)
                .with_relationship(RelationshipType::Parent, 77),
            Member::new(4, "Jun", "Park", Gender::Other, date(2006, 6, 15)).with_photo(""),
            Member::new(5, "Kai", "Hall", Gender::Male, date(1990, 12, 31))
                .with_relationship(RelationshipType::Spouse, 2),
        ])
    }

    #[test]
    fn test_report_values() {
        let report = compute_report(&sample_graph(), 1, today());

        assert_eq!(report.value(StatKind::TotalMembers), 5);
        assert_eq!(report.value(StatKind::Levels), 3);
        assert_eq!(report.value(StatKind::MaleMembers), 2);
        assert_eq!(report.value(StatKind::FemaleMembers), 2);
        assert_eq!(report.value(StatKind::LivingMembers), 4);
        assert_eq!(report.value(StatKind::DeceasedMembers), 1);
        assert_eq!(report.value(StatKind::NoPhoto), 4);
        assert_eq!(report.value(StatKind::Under18), 1);
        assert_eq!(report.value(StatKind::AdultsWithChildren), 2);
        assert_eq!(report.value(StatKind::AdultsWithoutChildren), 2);
    }

    #[test]
    fn test_eighteenth_birthday_counts_as_adult() {
        let graph = sample_graph();
        let adults = bucket(StatKind::AdultsWithoutChildren, &graph, today()).unwrap();
        let ids: Vec<MemberId> = adults.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn test_buckets_keep_snapshot_order() {
        let report = compute_report(&sample_graph(), 1, today());
        assert_eq!(report.get(StatKind::LivingMembers).unwrap().bucket, Some(vec![2, 3, 4, 5]));
        assert_eq!(report.get(StatKind::Levels).unwrap().bucket, None);
    }

    #[test]
    fn test_living_plus_deceased_is_total() {
        let report = compute_report(&sample_graph(), 1, today());
        assert_eq!(
            report.value(StatKind::LivingMembers) + report.value(StatKind::DeceasedMembers),
            report.value(StatKind::TotalMembers)
        );
    }

    #[test]
    fn test_adult_partition_is_complete() {
        let graph = sample_graph();
        for day in [date(2000, 1, 1), date(2024, 6, 14), today(), date(2060, 1, 1)] {
            let report = compute_report(&graph, 1, day);
            let adults = graph
                .members()
                .iter()
                .filter(|m| age_in_years(m.birth_date, m.death_date.unwrap_or(day)) >= ADULT_AGE)
                .count() as u64;
            assert_eq!(
                report.value(StatKind::AdultsWithChildren) + report.value(StatKind::AdultsWithoutChildren),
                adults
            );
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let report = compute_report(&FamilyGraph::default(), 0, today());
        assert!(report.statistics.iter().all(|stat| stat.value == 0));
        assert_eq!(report.statistics.len(), StatKind::ALL.len());
    }

    #[test]
    fn test_repeated_ids_are_counted_by_position() {
        let graph = FamilyGraph::new(vec![
            Member::new(1, "Lena", "Ortiz", Gender::Female, date(1970, 2, 2)),
            Member::new(1, "Marco", "Ortiz", Gender::Male, date(1972, 3, 3)),
        ]);
        let stat = compute_statistic(StatKind::TotalMembers, &graph, today());

        assert_eq!(stat.value, 2);
        assert_eq!(stat.bucket, Some(vec![1, 1]));
        assert_eq!(stat.positions, Some(vec![0, 1]));

        let names: Vec<&str> = bucket(StatKind::TotalMembers, &graph, today())
            .unwrap()
            .iter()
            .map(|m| m.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["Lena", "Marco"]);
    }
}
