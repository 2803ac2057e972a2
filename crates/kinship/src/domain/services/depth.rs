//! Tree depth - number of generations in a snapshot

use std::collections::{HashMap, HashSet};

use crate::domain::entities::{Member, MemberId};
use crate::domain::services::FamilyGraph;

/// Ancestor walk shared by every member of one depth computation.
///
/// `chain` holds the ids on the current path and is pushed and popped in
/// place. A level is cached only when its ancestry never ran into the
/// chain: such a level does not depend on the path that reached it.
/// The walk keeps its own stack so long lines of descent cannot exhaust
/// the thread stack.
struct LevelWalk<'a> {
    graph: &'a FamilyGraph,
    chain: HashSet<MemberId>,
    levels: HashMap<MemberId, usize>,
}

struct Frame<'a> {
    member: &'a Member,
    parents: Vec<&'a Member>,
    next: usize,
    deepest: usize,
    cut: bool,
}

impl<'a> LevelWalk<'a> {
    fn new(graph: &'a FamilyGraph, chain: HashSet<MemberId>) -> Self {
        Self {
            graph,
            chain,
            levels: HashMap::new(),
        }
    }

    /// Level already settled for `member`, or 0 with a cut if it is on the chain
    fn known(&self, member: &Member) -> Option<(usize, bool)> {
        if self.chain.contains(&member.id) {
            return Some((0, true));
        }
        self.levels.get(&member.id).map(|&level| (level, false))
    }

    fn enter(&mut self, member: &'a Member) -> Frame<'a> {
        self.chain.insert(member.id);
        Frame {
            member,
            parents: self.graph.parents_of(member),
            next: 0,
            deepest: 0,
            cut: false,
        }
    }

    /// Level of `start` and whether a cycle cut was hit in its ancestry
    fn level(&mut self, start: &'a Member) -> (usize, bool) {
        if let Some(known) = self.known(start) {
            return known;
        }

        let mut outcome = (0, false);
        let mut stack = vec![self.enter(start)];

        while let Some(frame) = stack.last_mut() {
            if let Some(&parent) = frame.parents.get(frame.next) {
                frame.next += 1;
                match self.known(parent) {
                    Some((level, cut)) => {
                        frame.deepest = frame.deepest.max(level);
                        frame.cut |= cut;
                    }
                    None => {
                        let frame = self.enter(parent);
                        stack.push(frame);
                    }
                }
                continue;
            }

            let id = frame.member.id;
            let level = 1 + frame.deepest;
            let cut = frame.cut;
            stack.pop();

            self.chain.remove(&id);
            if !cut {
                self.levels.insert(id, level);
            }

            match stack.last_mut() {
                Some(child) => {
                    child.deepest = child.deepest.max(level);
                    child.cut |= cut;
                }
                None => outcome = (level, cut),
            }
        }

        outcome
    }
}

/// Generational level of `member`: 1 for a root ancestor, otherwise one more
/// than its deepest resolvable parent.
///
/// `visited` holds the ids already on the current call chain. Reaching one
/// of them again contributes 0 for that branch, so a cycle under-counts
/// instead of looping.
pub fn generation_level(graph: &FamilyGraph, member: &Member, visited: HashSet<MemberId>) -> usize {
    LevelWalk::new(graph, visited).level(member).0
}

/// Maximum generational level across the snapshot; 0 for an empty snapshot
pub fn tree_depth(graph: &FamilyGraph) -> usize {
    let mut walk = LevelWalk::new(graph, HashSet::new());
    graph
        .members()
        .iter()
        .map(|member| walk.level(member).0)
        .max()
        .unwrap_or(0)
}
