//! FamilyGraph - In-memory relationship graph over one snapshot
//!
//! Edges are directional and taken as-is: no inverse edges are synthesised,
//! and an edge pointing at an id outside the snapshot resolves to nothing.

use std::collections::HashMap;

use crate::domain::entities::{Member, MemberId};
use crate::domain::value_objects::RelationshipType;

/// Members of one snapshot plus an id index built once at construction
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    members: Vec<Member>,
    index: HashMap<MemberId, usize>,
}

impl FamilyGraph {
    pub fn new(members: Vec<Member>) -> Self {
        let mut index = HashMap::with_capacity(members.len());
        for (position, member) in members.iter().enumerate() {
            if index.contains_key(&member.id) {
                tracing::warn!(member_id = member.id, "Duplicate member id in snapshot, keeping first");
                continue;
            }
            index.insert(member.id, position);
        }
        Self { members, index }
    }

    /// Members in snapshot order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn find_by_id(&self, id: MemberId) -> Option<&Member> {
        self.index.get(&id).map(|&position| &self.members[position])
    }

    /// Members at the given snapshot positions, skipping out-of-range ones
    pub fn members_at<'a: 'p, 'p>(&'a self, positions: &'p [usize]) -> impl Iterator<Item = &'a Member> + 'p {
        positions.iter().filter_map(move |&position| self.members.get(position))
    }

    /// Targets of the member's `parent` edges. Dangling ids are skipped.
    pub fn parents_of(&self, member: &Member) -> Vec<&Member> {
        member
            .relationships
            .iter()
            .filter(|rel| rel.relationship_type == RelationshipType::Parent)
            .filter_map(|rel| self.find_by_id(rel.to_member_id))
            .collect()
    }

    /// True iff the member carries an outgoing `child` edge
    /// (`relationship_type == child` and `from_member_id == member.id`).
    ///
    /// Parent edges on other members pointing here are not consulted.
    pub fn is_parent_of_someone(&self, member: &Member) -> bool {
        member.relationships.iter().any(|rel| {
            rel.relationship_type == RelationshipType::Child && rel.from_member_id == member.id
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Gender;
    use chrono::NaiveDate;

    fn member(id: MemberId, name: &str) -> Member {
        Member::new(id, name, "Test", Gender::Other, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())
    }

    #[test]
    fn test_find_by_id() {
        let graph = FamilyGraph::new(vec![member(1, "A"), member(2, "B")]);
        assert_eq!(graph.find_by_id(2).map(|m| m.first_name.as_str()), Some("B"));
        assert!(graph.find_by_id(3).is_none());
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let graph = FamilyGraph::new(vec![member(1, "First"), member(1, "Second")]);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.find_by_id(1).map(|m| m.first_name.as_str()), Some("First"));
    }

    #[test]
    fn test_members_at_keeps_repeated_ids_apart() {
        let graph = FamilyGraph::new(vec![member(1, "First"), member(1, "Second"), member(2, "Other")]);
        let names: Vec<&str> = graph
            .members_at(&[1, 0, 9])
            .map(|m| m.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn test_parents_of_skips_dangling_and_other_edges() {
        let child = member(3, "C")
            .with_relationship(RelationshipType::Parent, 1)
            .with_relationship(RelationshipType::Parent, 99)
            .with_relationship(RelationshipType::Sibling, 2);
        let graph = FamilyGraph::new(vec![member(1, "A"), member(2, "B"), child.clone()]);

        let parents: Vec<MemberId> = graph.parents_of(&child).iter().map(|m| m.id).collect();
        assert_eq!(parents, vec![1]);
    }

    #[test]
    fn test_parenthood_uses_outgoing_child_edge_only() {
        // B names A as its parent, but A carries no child edge: A is not a parent.
        let a = member(1, "A");
        let b = member(2, "B").with_relationship(RelationshipType::Parent, 1);
        // C carries a child edge, even though it points at nobody in the snapshot.
        let c = member(3, "C").with_relationship(RelationshipType::Child, 42);
        let graph = FamilyGraph::new(vec![a.clone(), b.clone(), c.clone()]);

        assert!(!graph.is_parent_of_someone(&a));
        assert!(!graph.is_parent_of_someone(&b));
        assert!(graph.is_parent_of_someone(&c));
    }

    #[test]
    fn test_child_edge_with_foreign_subject_is_ignored() {
        let mut a = member(1, "A");
        a.relationships.push(crate::domain::entities::Relationship {
            relationship_type: RelationshipType::Child,
            from_member_id: 5,
            to_member_id: 1,
        });
        let graph = FamilyGraph::new(vec![a.clone()]);
        assert!(!graph.is_parent_of_someone(&a));
    }
}
