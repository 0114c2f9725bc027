//! Query facade over the curated border graph.
//!
//! [`RoadAtlas`] runs the whole construction pipeline once (registry, border
//! list, capital distances, curated corrections) and then answers distance
//! and path queries by country name. It is immutable after construction and
//! can be shared between threads.

use std::io::Read;

use serde::Serialize;
use tracing::{info, warn};

use crate::borders::{build_border_graph, load_border_graph, BorderReport};
use crate::curation::{apply_corrections, Correction, CurationReport, CURATED_CORRECTIONS};
use crate::dataset::DatasetPaths;
use crate::distances::{attach_distances, load_distances, DistanceReport};
use crate::error::Result;
use crate::graph::{BorderGraph, Graph};
use crate::output::{PathSegment, RouteSummary};
use crate::path::{find_route, Route};
use crate::registry::CountryRegistry;

/// Returned by [`RoadAtlas::distance_or_not_found`] for unknown countries and
/// unreachable pairs. Valid distances are never negative.
pub const NOT_FOUND: i64 = -1;

/// Counters gathered while building a [`RoadAtlas`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub registered_countries: usize,
    pub borders: BorderReport,
    pub distances: DistanceReport,
    pub curation: CurationReport,
    pub graph_countries: usize,
    pub graph_edges: usize,
    pub unmeasured_edges: usize,
}

/// Immutable country graph with name-based queries.
#[derive(Debug, Clone)]
pub struct RoadAtlas {
    registry: CountryRegistry,
    graph: Graph,
    report: LoadReport,
}

impl RoadAtlas {
    /// Load the three source files and build the atlas.
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        paths.ensure_exists()?;
        let registry = CountryRegistry::from_path(&paths.registry)?;
        let (mut graph, borders) = load_border_graph(&paths.borders, &registry)?;
        let distances = load_distances(&paths.distances, &mut graph)?;
        Ok(Self::finish(registry, graph, borders, distances, CURATED_CORRECTIONS))
    }

    /// Build the atlas from in-memory sources using [`CURATED_CORRECTIONS`].
    pub fn from_readers<B, D>(registry: CountryRegistry, borders: B, distances: D) -> Result<Self>
    where
        B: Read,
        D: Read,
    {
        Self::from_readers_with_corrections(registry, borders, distances, CURATED_CORRECTIONS)
    }

    /// Build the atlas from in-memory sources with a custom correction table.
    pub fn from_readers_with_corrections<B, D>(
        registry: CountryRegistry,
        borders: B,
        distances: D,
        corrections: &[Correction],
    ) -> Result<Self>
    where
        B: Read,
        D: Read,
    {
        let (mut graph, border_report) = build_border_graph(borders, &registry)?;
        let distance_report = attach_distances(distances, &mut graph)?;
        Ok(Self::finish(
            registry,
            graph,
            border_report,
            distance_report,
            corrections,
        ))
    }

    fn finish(
        registry: CountryRegistry,
        mut graph: BorderGraph,
        borders: BorderReport,
        distances: DistanceReport,
        corrections: &[Correction],
    ) -> Self {
        let curation = apply_corrections(&mut graph, corrections);
        let report = LoadReport {
            registered_countries: registry.len(),
            borders,
            distances,
            curation,
            graph_countries: graph.country_count(),
            graph_edges: graph.edge_count(),
            unmeasured_edges: graph.unmeasured_edge_count(),
        };

        info!(
            countries = report.graph_countries,
            edges = report.graph_edges,
            skipped_border_rows = report.borders.unresolved_countries,
            skipped_distance_rows = report.distances.skipped,
            corrections = report.curation.applied,
            "border graph ready"
        );
        if report.unmeasured_edges > 0 {
            warn!(
                edges = report.unmeasured_edges,
                "border crossings without a capital distance count as 0 km"
            );
        }

        Self {
            registry,
            graph: graph.freeze(),
            report,
        }
    }

    pub fn registry(&self) -> &CountryRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Lowest-cost route between two named countries.
    ///
    /// Fails with [`crate::Error::UnknownCountry`] for unknown names and
    /// returns `Ok(None)` when no route exists.
    pub fn route(&self, from: &str, to: &str) -> Result<Option<Route>> {
        let start = self.registry.resolve(from)?;
        let goal = self.registry.resolve(to)?;
        Ok(find_route(&self.graph, start, goal))
    }

    /// Shortest distance in kilometres between two named countries.
    pub fn distance(&self, from: &str, to: &str) -> Result<Option<u64>> {
        Ok(self.route(from, to)?.map(|route| route.distance_km))
    }

    /// Shortest distance, or [`NOT_FOUND`] when either name is unknown or
    /// no route exists.
    pub fn distance_or_not_found(&self, from: &str, to: &str) -> i64 {
        match self.distance(from, to) {
            Ok(Some(distance)) => i64::try_from(distance).unwrap_or(i64::MAX),
            Ok(None) | Err(_) => NOT_FOUND,
        }
    }

    /// Route summary with resolved names, or `Ok(None)` when unreachable.
    pub fn summary(&self, from: &str, to: &str) -> Result<Option<RouteSummary>> {
        Ok(self
            .route(from, to)?
            .map(|route| RouteSummary::from_route(&self.registry, &route)))
    }

    /// Border crossings along the shortest route, in travel order.
    ///
    /// Empty when no route exists. A country paired with itself yields one
    /// zero-length segment.
    pub fn path(&self, from: &str, to: &str) -> Result<Vec<PathSegment>> {
        Ok(self
            .summary(from, to)?
            .map(|summary| summary.segments)
            .unwrap_or_default())
    }

    /// Rendered path lines; empty for unknown names or unreachable pairs.
    pub fn path_lines(&self, from: &str, to: &str) -> Vec<String> {
        self.path(from, to)
            .map(|segments| segments.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}
