//! Border list parsing.
//!
//! Each row reads `Country = Neighbour 120 km; Other 36 km` or `Country = `
//! for a country without land borders. Names are resolved through the
//! [`CountryRegistry`]; names it does not know are dropped rather than failing
//! the whole load, since the border list and the registry disagree in places.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::BorderGraph;
use crate::registry::{CountryId, CountryRegistry};

/// Name used when reporting problems with the border source.
pub const BORDERS_SOURCE: &str = "borders.txt";

const ROW_DELIMITER: &str = " = ";
const NEIGHBOUR_DELIMITER: &str = "; ";

/// Counters describing how the border list was consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BorderReport {
    pub rows: usize,
    pub countries_added: usize,
    pub duplicate_rows: usize,
    pub unresolved_countries: usize,
    pub unresolved_neighbours: usize,
    pub unreadable_rows: usize,
}

/// A single border row split into its raw parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderRow<'a> {
    pub country: &'a str,
    pub neighbours: Vec<&'a str>,
}

/// Read the border list from a file.
pub fn load_border_graph(path: &Path, registry: &CountryRegistry) -> Result<(BorderGraph, BorderReport)> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = fs::File::open(path)?;
    build_border_graph(file, registry)
}

/// Build the unweighted border graph from a reader.
///
/// The first row for a country wins; later rows for the same country are
/// ignored. A country listed with no neighbours is still added, isolated.
pub fn build_border_graph<R: Read>(
    reader: R,
    registry: &CountryRegistry,
) -> Result<(BorderGraph, BorderReport)> {
    let mut graph = BorderGraph::new();
    let mut report = BorderReport::default();

    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();
    let mut line_number = 0;
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;

        let line = match std::str::from_utf8(&buffer) {
            Ok(text) => text.trim_end_matches(['\n', '\r']),
            Err(err) => {
                let err = Error::unparsable(BORDERS_SOURCE, line_number, format!("invalid UTF-8: {err}"));
                warn!(%err, "skipping border row");
                report.rows += 1;
                report.unreadable_rows += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        report.rows += 1;

        let row = parse_border_row(line);
        let Some(country) = registry.lookup(row.country) else {
            debug!(line = line_number, country = row.country, "skipping border row for unknown country");
            report.unresolved_countries += 1;
            continue;
        };

        let mut neighbours: Vec<CountryId> = Vec::with_capacity(row.neighbours.len());
        for name in &row.neighbours {
            match registry.lookup(name) {
                Some(id) => neighbours.push(id),
                None => {
                    debug!(country = row.country, neighbour = *name, "dropping unknown neighbour");
                    report.unresolved_neighbours += 1;
                }
            }
        }

        if graph.insert_country(country, neighbours) {
            report.countries_added += 1;
        } else {
            debug!(line = line_number, country = row.country, "ignoring duplicate border row");
            report.duplicate_rows += 1;
        }
    }

    Ok((graph, report))
}

/// Split a border row into the country name and cleaned neighbour names.
///
/// ```
/// use roadtrip_lib::borders::parse_border_row;
///
/// let row = parse_border_row("Chile = Argentina 6,691 km; Bolivia 942 km; Peru 171 km");
/// assert_eq!(row.country, "Chile");
/// assert_eq!(row.neighbours, vec!["Argentina", "Bolivia", "Peru"]);
/// ```
pub fn parse_border_row(line: &str) -> BorderRow<'_> {
    let (country, rest) = match line.split_once(ROW_DELIMITER) {
        Some((country, rest)) => (country, rest),
        None => (line.trim_end().trim_end_matches('=').trim_end(), ""),
    };

    let neighbours = if rest.trim().is_empty() {
        Vec::new()
    } else {
        rest.split(NEIGHBOUR_DELIMITER)
            .map(neighbour_name)
            .filter(|name| !name.is_empty())
            .collect()
    };

    BorderRow {
        country,
        neighbours,
    }
}

/// Strip everything from the first digit onward and trim.
fn neighbour_name(token: &str) -> &str {
    let end = token
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].trim()
}
