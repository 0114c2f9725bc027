use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;

use crate::graph::{EdgeKind, Graph};
use crate::registry::CountryId;

/// One border crossing along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub from: CountryId,
    pub to: CountryId,
    pub distance_km: u32,
    pub kind: EdgeKind,
}

/// Lowest-cost route between two countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub start: CountryId,
    pub goal: CountryId,
    pub distance_km: u64,
    pub hops: Vec<Hop>,
}

impl Route {
    /// Number of border crossings.
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Number of crossings whose weight defaulted to zero.
    pub fn unmeasured_hops(&self) -> usize {
        self.hops
            .iter()
            .filter(|hop| hop.kind == EdgeKind::Unmeasured)
            .count()
    }
}

/// Run Dijkstra's algorithm from `start` and stop once `goal` is settled.
///
/// Returns `None` when `goal` cannot be reached. A route from a country to
/// itself has no hops and zero distance, even when the country has no
/// adjacency entry.
pub fn find_route(graph: &Graph, start: CountryId, goal: CountryId) -> Option<Route> {
    if start == goal {
        return Some(Route {
            start,
            goal,
            distance_km: 0,
            hops: Vec::new(),
        });
    }

    let mut distances: HashMap<CountryId, u64> = HashMap::new();
    let mut parents: HashMap<CountryId, CountryId> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0);
    queue.push(QueueEntry {
        node: start,
        cost: 0,
    });

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(&entry.node) {
            Some(distance) if *distance < entry.cost => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            return Some(reconstruct_route(graph, &parents, start, goal, current_distance));
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            let next_cost = current_distance + u64::from(edge.distance_km);
            let improves = distances
                .get(&next)
                .map_or(true, |known| next_cost < *known);
            if improves {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry {
                    node: next,
                    cost: next_cost,
                });
            }
        }
    }

    None
}

/// Shortest distance in kilometres, or `None` when unreachable.
pub fn shortest_distance(graph: &Graph, start: CountryId, goal: CountryId) -> Option<u64> {
    find_route(graph, start, goal).map(|route| route.distance_km)
}

fn reconstruct_route(
    graph: &Graph,
    parents: &HashMap<CountryId, CountryId>,
    start: CountryId,
    goal: CountryId,
    distance_km: u64,
) -> Route {
    let mut hops = Vec::new();
    let mut current = goal;
    while current != start {
        let Some(&previous) = parents.get(&current) else {
            break;
        };
        // The parent link was recorded while relaxing this very edge.
        let (kind, weight) = graph
            .edge(previous, current)
            .map(|edge| (edge.kind, edge.distance_km))
            .unwrap_or((EdgeKind::Unmeasured, 0));
        hops.push(Hop {
            from: previous,
            to: current,
            distance_km: weight,
            kind,
        });
        current = previous;
    }
    hops.reverse();

    Route {
        start,
        goal,
        distance_km,
        hops,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: CountryId,
    cost: u64,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
