use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

use crate::registry::CountryId;

/// Whether an edge weight came from the distance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// A capital distance row was attached to the edge.
    Measured,
    /// No distance row matched; the edge weighs 0 km.
    Unmeasured,
}

/// Edge within the border graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: CountryId,
    pub kind: EdgeKind,
    pub distance_km: u32,
}

/// Adjacency under construction.
///
/// Border rows add countries and unweighted edges, the distance table attaches
/// weights, and curated corrections remove entries. [`BorderGraph::freeze`]
/// turns it into the read-only [`Graph`] used for queries.
#[derive(Debug, Clone, Default)]
pub struct BorderGraph {
    adjacency: HashMap<CountryId, BTreeMap<CountryId, Option<u32>>>,
}

impl BorderGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_country(&self, country: CountryId) -> bool {
        self.adjacency.contains_key(&country)
    }

    pub fn contains_edge(&self, from: CountryId, to: CountryId) -> bool {
        self.adjacency
            .get(&from)
            .is_some_and(|neighbours| neighbours.contains_key(&to))
    }

    /// Add a country with the given neighbours unless it is already present.
    ///
    /// Returns `false` when the country existed; the earlier entry is kept.
    pub fn insert_country<I>(&mut self, country: CountryId, neighbours: I) -> bool
    where
        I: IntoIterator<Item = CountryId>,
    {
        if self.adjacency.contains_key(&country) {
            return false;
        }
        let edges = neighbours.into_iter().map(|target| (target, None)).collect();
        self.adjacency.insert(country, edges);
        true
    }

    /// Attach a weight to an existing edge. Returns `false` when the edge is
    /// missing; no edge is created.
    pub fn set_weight(&mut self, from: CountryId, to: CountryId, distance_km: u32) -> bool {
        match self
            .adjacency
            .get_mut(&from)
            .and_then(|neighbours| neighbours.get_mut(&to))
        {
            Some(weight) => {
                *weight = Some(distance_km);
                true
            }
            None => false,
        }
    }

    /// Remove the edge `from -> to`. Returns `false` when it did not exist.
    pub fn remove_edge(&mut self, from: CountryId, to: CountryId) -> bool {
        self.adjacency
            .get_mut(&from)
            .is_some_and(|neighbours| neighbours.remove(&to).is_some())
    }

    /// Remove a country's own adjacency entry. Edges pointing at it from other
    /// countries are left untouched.
    pub fn remove_country(&mut self, country: CountryId) -> bool {
        self.adjacency.remove(&country).is_some()
    }

    pub fn country_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Number of edges that never received a distance.
    pub fn unmeasured_edge_count(&self) -> usize {
        self.adjacency
            .values()
            .flat_map(BTreeMap::values)
            .filter(|weight| weight.is_none())
            .count()
    }

    /// Freeze the adjacency into an immutable, shareable graph.
    pub fn freeze(self) -> Graph {
        let adjacency = self
            .adjacency
            .into_iter()
            .map(|(country, neighbours)| {
                let edges = neighbours
                    .into_iter()
                    .map(|(target, weight)| match weight {
                        Some(distance_km) => Edge {
                            target,
                            kind: EdgeKind::Measured,
                            distance_km,
                        },
                        None => Edge {
                            target,
                            kind: EdgeKind::Unmeasured,
                            distance_km: 0,
                        },
                    })
                    .collect();
                (country, edges)
            })
            .collect();

        Graph {
            adjacency: Arc::new(adjacency),
        }
    }
}

/// Read-only weighted graph used by pathfinding.
///
/// Cloning is cheap; clones share the same adjacency.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<CountryId, Vec<Edge>>>,
}

impl Graph {
    /// Return the outgoing edges of a country, sorted by target identifier.
    pub fn neighbours(&self, country: CountryId) -> &[Edge] {
        self.adjacency
            .get(&country)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up the edge `from -> to`.
    pub fn edge(&self, from: CountryId, to: CountryId) -> Option<&Edge> {
        self.neighbours(from).iter().find(|edge| edge.target == to)
    }

    pub fn contains_country(&self, country: CountryId) -> bool {
        self.adjacency.contains_key(&country)
    }

    /// Identifiers of every country with an adjacency entry.
    pub fn countries(&self) -> impl Iterator<Item = CountryId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn country_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
