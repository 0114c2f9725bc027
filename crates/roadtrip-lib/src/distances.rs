//! Capital distance table.
//!
//! Rows look like `numa,ida,numb,idb,kmdist,midist` after a header line.
//! Only the numeric identifiers and the kilometre column are used.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::BorderGraph;
use crate::registry::CountryId;

/// Name used when reporting problems with the distance source.
pub const DISTANCES_SOURCE: &str = "capdist.csv";

const FROM_COLUMN: usize = 0;
const TO_COLUMN: usize = 2;
const DISTANCE_COLUMN: usize = 4;

/// A parsed row of the distance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapitalDistance {
    pub from: CountryId,
    pub to: CountryId,
    pub distance_km: u32,
}

/// Counters describing how the distance table was consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DistanceReport {
    pub rows: usize,
    pub attached: usize,
    pub ignored: usize,
    pub skipped: usize,
}

/// Read the distance table from a file and attach weights to `graph`.
pub fn load_distances(path: &Path, graph: &mut BorderGraph) -> Result<DistanceReport> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = fs::File::open(path)?;
    attach_distances(file, graph)
}

/// Attach capital distances to edges that already exist in `graph`.
///
/// Rows for country pairs that do not share a border are ignored; this step
/// never creates edges. Malformed rows are logged and skipped.
pub fn attach_distances<R: Read>(reader: R, graph: &mut BorderGraph) -> Result<DistanceReport> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(reader);

    let mut report = DistanceReport::default();
    // Line 1 is the header.
    for (index, result) in csv_reader.records().enumerate() {
        let line = index + 2;
        report.rows += 1;

        let parsed = result
            .map_err(Error::from)
            .and_then(|record| parse_distance_row(&record, line));
        let row = match parsed {
            Ok(row) => row,
            Err(err) => {
                warn!(%err, "skipping distance row");
                report.skipped += 1;
                continue;
            }
        };

        if graph.set_weight(row.from, row.to, row.distance_km) {
            report.attached += 1;
        } else {
            report.ignored += 1;
        }
    }

    debug!(
        attached = report.attached,
        ignored = report.ignored,
        skipped = report.skipped,
        "capital distances attached"
    );
    Ok(report)
}

/// Parse one record of the distance table.
pub fn parse_distance_row(record: &StringRecord, line: usize) -> Result<CapitalDistance> {
    if record.len() <= DISTANCE_COLUMN {
        return Err(Error::unparsable(
            DISTANCES_SOURCE,
            line,
            format!(
                "expected at least {} columns, found {}",
                DISTANCE_COLUMN + 1,
                record.len()
            ),
        ));
    }

    let field = |column: usize| record.get(column).unwrap_or_default();
    let from = parse_field::<CountryId>(field(FROM_COLUMN), "from id", line)?;
    let to = parse_field::<CountryId>(field(TO_COLUMN), "to id", line)?;
    let distance_km = parse_field::<u32>(field(DISTANCE_COLUMN), "distance", line)?;

    Ok(CapitalDistance {
        from,
        to,
        distance_km,
    })
}

fn parse_field<T>(raw: &str, label: &str, line: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|err| {
        Error::unparsable(
            DISTANCES_SOURCE,
            line,
            format!("invalid {label} '{raw}': {err}"),
        )
    })
}
