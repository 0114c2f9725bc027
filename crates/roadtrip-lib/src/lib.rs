//! Road trip library entry points.
//!
//! This crate parses the country registry, the land border list, and the
//! capital distance table, assembles them into a weighted border graph, and
//! answers shortest-path queries between countries. Higher-level consumers
//! (the CLI) should only depend on the items exported here instead of
//! reimplementing behavior.
//!

pub mod atlas;
pub mod borders;
pub mod curation;
pub mod dataset;
pub mod distances;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod registry;

pub use atlas::{LoadReport, RoadAtlas, NOT_FOUND};
pub use borders::{build_border_graph, load_border_graph, BorderReport};
pub use curation::{apply_corrections, Correction, CurationReport, CURATED_CORRECTIONS};
pub use dataset::{default_data_dir, resolve_data_dir, resolve_dataset, DatasetPaths};
pub use distances::{attach_distances, load_distances, DistanceReport};
pub use error::{Error, Result};
pub use graph::{BorderGraph, Edge, EdgeKind, Graph};
pub use output::{PathSegment, RouteEndpoint, RouteSummary};
pub use path::{find_route, shortest_distance, Hop, Route};
pub use registry::{CountryId, CountryRegistry, NAME_OVERRIDES};
