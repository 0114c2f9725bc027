//! Hand-maintained corrections applied to the border graph.
//!
//! The border list links several countries to territories or former states
//! that have no capital distance, and a few pairs are recorded one way only.
//! [`CURATED_CORRECTIONS`] removes those entries before the graph is frozen.

use serde::Serialize;
use tracing::debug;

use crate::graph::BorderGraph;
use crate::registry::CountryId;

/// A single correction to the border graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Drop the edge `from -> to`.
    Edge { from: CountryId, to: CountryId },
    /// Drop the adjacency entry of a country.
    Node(CountryId),
}

const fn edge(from: CountryId, to: CountryId) -> Correction {
    Correction::Edge { from, to }
}

/// Corrections applied, in order, to every graph built from the datasets.
pub const CURATED_CORRECTIONS: &[Correction] = &[
    edge(20, -2),
    Correction::Node(340),
    edge(346, 340),
    edge(310, 340),
    edge(355, 340),
    edge(341, 340),
    edge(344, 340),
    edge(347, 340),
    edge(359, 340),
    edge(360, 340),
    edge(343, 340),
    edge(530, 626),
    edge(290, -3),
    edge(339, 347),
    edge(341, 347),
    edge(347, 339),
    edge(347, 341),
    edge(625, 626),
    Correction::Node(626),
    edge(482, 626),
    edge(484, 490),
    edge(490, 484),
    edge(490, 626),
    edge(500, 626),
    edge(501, 626),
    edge(390, 20),
];

/// Counters describing a curation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CurationReport {
    pub applied: usize,
    pub missing: usize,
}

/// Apply `corrections` in order. Entries that no longer exist are counted as
/// missing and otherwise ignored.
pub fn apply_corrections(graph: &mut BorderGraph, corrections: &[Correction]) -> CurationReport {
    let mut report = CurationReport::default();
    for correction in corrections {
        let removed = match *correction {
            Correction::Edge { from, to } => graph.remove_edge(from, to),
            Correction::Node(country) => graph.remove_country(country),
        };
        if removed {
            report.applied += 1;
        } else {
            debug!(?correction, "correction target not present");
            report.missing += 1;
        }
    }
    report
}
