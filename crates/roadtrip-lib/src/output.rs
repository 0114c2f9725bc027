use std::fmt;
use std::fmt::Write;

use serde::Serialize;

use crate::graph::EdgeKind;
use crate::path::Route;
use crate::registry::{CountryId, CountryRegistry};

/// Human-readable border crossing, rendered as `From --> To (123 km.)`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathSegment {
    pub from: String,
    pub to: String,
    pub distance_km: u32,
    pub kind: EdgeKind,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {} ({} km.)", self.from, self.to, self.distance_km)
    }
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: CountryId,
    pub name: String,
}

/// Structured representation of a route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub distance_km: u64,
    pub hops: usize,
    /// Crossings whose distance was missing from the capital table and
    /// counted as 0 km.
    pub unmeasured_hops: usize,
    pub segments: Vec<PathSegment>,
}

impl RouteSummary {
    /// Convert a [`Route`] into a summary with resolved country names.
    ///
    /// A route from a country to itself yields a single zero-length segment.
    pub fn from_route(registry: &CountryRegistry, route: &Route) -> Self {
        let endpoint = |id: CountryId| RouteEndpoint {
            id,
            name: registry.display_name(id),
        };
        let start = endpoint(route.start);
        let goal = endpoint(route.goal);

        let segments = if route.hops.is_empty() && route.start == route.goal {
            vec![PathSegment {
                from: start.name.clone(),
                to: goal.name.clone(),
                distance_km: 0,
                kind: EdgeKind::Measured,
            }]
        } else {
            route
                .hops
                .iter()
                .map(|hop| PathSegment {
                    from: registry.display_name(hop.from),
                    to: registry.display_name(hop.to),
                    distance_km: hop.distance_km,
                    kind: hop.kind,
                })
                .collect()
        };

        Self {
            start,
            goal,
            distance_km: route.distance_km,
            hops: route.hop_count(),
            unmeasured_hops: route.unmeasured_hops(),
            segments,
        }
    }

    /// Render one line per segment.
    pub fn render_lines(&self) -> Vec<String> {
        self.segments.iter().map(ToString::to_string).collect()
    }

    /// Render a short report with a header, the segments, and the total.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} {})",
            self.start.name,
            self.goal.name,
            self.hops,
            if self.hops == 1 { "hop" } else { "hops" }
        );
        for segment in &self.segments {
            let _ = writeln!(buffer, "{segment}");
        }
        let _ = writeln!(buffer, "Total distance: {} km", self.distance_km);
        if self.unmeasured_hops > 0 {
            let _ = writeln!(
                buffer,
                "Note: {} crossing(s) have no capital distance and count as 0 km",
                self.unmeasured_hops
            );
        }
        buffer
    }
}
