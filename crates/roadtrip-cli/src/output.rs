//! Output formatting for query results.
//!
//! Text output mirrors the hop lines printed by the interactive session;
//! JSON output serialises the library's [`RouteSummary`].

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use roadtrip_lib::RouteSummary;

/// Message printed when two countries are not connected by land.
pub const NO_PATH_MESSAGE: &str = "No path exists!";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct DistanceResult<'a> {
    from: &'a str,
    to: &'a str,
    distance_km: Option<u64>,
}

impl OutputFormat {
    /// Render the outcome of a `distance` query.
    ///
    /// `from` and `to` are the names as the user typed them; the summary, when
    /// present, carries the canonical names.
    pub fn render_distance<W: Write>(
        self,
        out: &mut W,
        from: &str,
        to: &str,
        summary: Option<&RouteSummary>,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => match summary {
                Some(summary) => writeln!(
                    out,
                    "{} -> {}: {} km",
                    summary.start.name, summary.goal.name, summary.distance_km
                ),
                None => writeln!(out, "{NO_PATH_MESSAGE}"),
            },
            OutputFormat::Json => {
                let result = match summary {
                    Some(summary) => DistanceResult {
                        from: &summary.start.name,
                        to: &summary.goal.name,
                        distance_km: Some(summary.distance_km),
                    },
                    None => DistanceResult {
                        from,
                        to,
                        distance_km: None,
                    },
                };
                write_json(out, &result)
            }
        }
    }

    /// Render the outcome of a `path` query.
    pub fn render_path<W: Write>(self, out: &mut W, summary: Option<&RouteSummary>) -> io::Result<()> {
        match (self, summary) {
            (OutputFormat::Text, Some(summary)) => write!(out, "{}", summary.render_plain()),
            (OutputFormat::Text, None) => writeln!(out, "{NO_PATH_MESSAGE}"),
            (OutputFormat::Json, summary) => write_json(out, &summary),
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadtrip_lib::{EdgeKind, PathSegment, RouteEndpoint};

    fn summary() -> RouteSummary {
        RouteSummary {
            start: RouteEndpoint {
                id: 1,
                name: "Alpha".to_string(),
            },
            goal: RouteEndpoint {
                id: 2,
                name: "Bravo".to_string(),
            },
            distance_km: 120,
            hops: 1,
            unmeasured_hops: 0,
            segments: vec![PathSegment {
                from: "Alpha".to_string(),
                to: "Bravo".to_string(),
                distance_km: 120,
                kind: EdgeKind::Measured,
            }],
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).expect("render succeeds");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn text_distance_uses_canonical_names() {
        let summary = summary();
        let text = render(|out| OutputFormat::Text.render_distance(out, "a", "b", Some(&summary)));
        assert_eq!(text, "Alpha -> Bravo: 120 km\n");
    }

    #[test]
    fn unreachable_text_output() {
        let text = render(|out| OutputFormat::Text.render_distance(out, "a", "b", None));
        assert_eq!(text, "No path exists!\n");
        let text = render(|out| OutputFormat::Text.render_path(out, None));
        assert_eq!(text, "No path exists!\n");
    }

    #[test]
    fn json_distance_is_null_when_unreachable() {
        let text = render(|out| OutputFormat::Json.render_distance(out, "a", "b", None));
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["from"], "a");
        assert!(value["distance_km"].is_null());
    }

    #[test]
    fn json_path_serialises_summary() {
        let summary = summary();
        let text = render(|out| OutputFormat::Json.render_path(out, Some(&summary)));
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["segments"][0]["to"], "Bravo");
        assert_eq!(value["distance_km"], 120);
    }
}
