use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use sculptor_core::BodyId;

/// Undirected contact graph over every body. Rebuilt from scratch for each
/// evaluation; edges come from contact-force reports and interpenetrations.
/// Only the former count as contact pairs.
#[derive(Clone, Debug, Default)]
pub struct ContactGraph {
    adj: BTreeMap<BodyId, BTreeSet<BodyId>>,
    contacts: BTreeSet<(BodyId, BodyId)>,
}

impl ContactGraph {
    pub fn new(bodies: impl IntoIterator<Item = BodyId>) -> Self {
        Self { adj: bodies.into_iter().map(|id| (id, BTreeSet::new())).collect(), contacts: BTreeSet::new() }
    }

    /// Edge from a contact-force report.
    pub fn link_contact(&mut self, a: BodyId, b: BodyId) {
        if self.link(a, b) {
            self.contacts.insert((a.min(b), a.max(b)));
        }
    }

    /// Edge from an interpenetration with no contact report.
    pub fn link_overlap(&mut self, a: BodyId, b: BodyId) {
        self.link(a, b);
    }

    fn link(&mut self, a: BodyId, b: BodyId) -> bool {
        if a == b {
            return false;
        }
        self.adj.entry(a).or_default().insert(b);
        self.adj.entry(b).or_default().insert(a);
        true
    }

    pub fn neighbours(&self, id: BodyId) -> impl Iterator<Item = BodyId> + '_ {
        self.adj.get(&id).into_iter().flat_map(|s| s.iter().copied())
    }

    pub fn touching(&self, a: BodyId, b: BodyId) -> bool {
        self.adj.get(&a).is_some_and(|s| s.contains(&b))
    }

    /// Distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Distinct pairs linked by contact reports.
    pub fn contact_count(&self) -> usize { self.contacts.len() }

    pub fn node_count(&self) -> usize { self.adj.len() }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityMode {
    /// Every dynamic body must reach an anchor.
    StaticAnchored,
    /// No anchors: the dynamic bodies must form one component.
    PeerToPeer,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityReport {
    pub total_bodies: usize,
    pub static_bodies: usize,
    pub dynamic_bodies: usize,
    pub connected_dynamic_bodies: usize,
    pub disconnected_dynamic_bodies: Vec<BodyId>,
    pub fully_connected: bool,
    pub overlapping_pairs: usize,
    pub contact_pairs: usize,
    pub mode: ConnectivityMode,
}

/// Walks `graph` and reports which dynamic bodies are attached.
/// `dynamic[i]` tells whether `BodyId(i)` is dynamic.
pub fn analyse(graph: &ContactGraph, dynamic: &[bool], overlapping_pairs: usize) -> ConnectivityReport {
    let is_dynamic = |id: BodyId| dynamic.get(id.index()).copied().unwrap_or(false);
    let ids: Vec<BodyId> = (0..dynamic.len() as u32).map(BodyId).collect();
    let statics: Vec<BodyId> = ids.iter().copied().filter(|&id| !is_dynamic(id)).collect();
    let dynamics: Vec<BodyId> = ids.iter().copied().filter(|&id| is_dynamic(id)).collect();

    let (mode, visited) = if !statics.is_empty() {
        (ConnectivityMode::StaticAnchored, bfs(graph, &statics, |_| true))
    } else if dynamics.len() <= 1 {
        (ConnectivityMode::PeerToPeer, dynamics.iter().copied().collect())
    } else {
        (ConnectivityMode::PeerToPeer, bfs(graph, &dynamics[..1], is_dynamic))
    };

    let disconnected: Vec<BodyId> = dynamics.iter().copied().filter(|id| !visited.contains(id)).collect();
    ConnectivityReport {
        total_bodies: ids.len(),
        static_bodies: statics.len(),
        dynamic_bodies: dynamics.len(),
        connected_dynamic_bodies: dynamics.len() - disconnected.len(),
        fully_connected: disconnected.is_empty(),
        disconnected_dynamic_bodies: disconnected,
        overlapping_pairs,
        contact_pairs: graph.contact_count(),
        mode,
    }
}

fn bfs(graph: &ContactGraph, roots: &[BodyId], follow: impl Fn(BodyId) -> bool) -> BTreeSet<BodyId> {
    let mut seen: BTreeSet<BodyId> = roots.iter().copied().collect();
    let mut queue: VecDeque<BodyId> = roots.iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        for n in graph.neighbours(id) {
            if follow(n) && seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    seen
}
