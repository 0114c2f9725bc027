//! Country registry: canonical names, aliases, and numeric identifiers.
//!
//! The registry source lists every name a state has carried over time. Only
//! rows that are still current (end date [`LIVE_END_DATE`]) are kept. The
//! border and distance sources spell several countries differently, so a
//! fixed alias table ([`NAME_OVERRIDES`]) is layered on top after parsing.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Numeric identifier for a country. Negative identifiers denote territories
/// that only exist in the alias table.
pub type CountryId = i64;

/// End date carried by registry rows that describe the current name of a state.
pub const LIVE_END_DATE: &str = "2020-12-31";

/// Name used when reporting problems with the registry source.
pub const REGISTRY_SOURCE: &str = "state_name.tsv";

const REGISTRY_COLUMNS: usize = 5;
const MIN_SUGGESTION_SCORE: f64 = 0.8;

/// Alternate spelling mapped onto a registry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOverride {
    pub alias: &'static str,
    pub id: CountryId,
}

const fn alias(alias: &'static str, id: CountryId) -> NameOverride {
    NameOverride { alias, id }
}

/// Aliases reconciling the border and distance sources with the registry.
///
/// Applied in order after the registry rows, so an alias always wins over a
/// registry name with the same spelling.
pub const NAME_OVERRIDES: &[NameOverride] = &[
    alias("Democratic Republic of the Congo", 490),
    alias("Republic of the Congo", 484),
    alias("Germany", 260),
    alias("Bahamas, The", 31),
    alias("Burma", 775),
    alias("Bosnia and Herzegovina", 346),
    alias("Romania", 360),
    alias("Cote d'Ivoire", 437),
    alias("US", 2),
    alias("Denmark (Greenland)", -2),
    alias("North Korea", 731),
    alias("Kyrgyzstan", 703),
    alias("Congo, Democratic Republic of the", 490),
    alias("Congo, Republic of the", 484),
    alias("Eswatini", 572),
    alias("Gambia, The", 420),
    alias("Timor-Leste", 860),
    alias("UK", 200),
    alias("Korea, North", 731),
    alias("South Korea", 732),
    alias("Korea, South", 732),
    alias("UAE", 696),
    alias("Russia (Kaliningrad Oblast)", -3),
    alias("The Gambia", 420),
    alias("Turkey (Turkiye)", 640),
    alias("United States", 2),
    alias("Czechia", 316),
    alias("Macedonia", 343),
    alias("North Macedonia", 343),
    alias("Spain (Ceuta)", 230),
];

/// Bidirectional lookup between country names and identifiers.
///
/// Immutable once built. Every alias resolves to exactly one identifier and
/// every identifier has exactly one canonical name.
#[derive(Debug, Clone, Default)]
pub struct CountryRegistry {
    name_to_id: HashMap<String, CountryId>,
    id_to_name: HashMap<CountryId, String>,
}

impl CountryRegistry {
    /// Load the registry from a tab-separated file and apply [`NAME_OVERRIDES`].
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse registry rows from a reader and apply [`NAME_OVERRIDES`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_reader_with_overrides(reader, NAME_OVERRIDES))
    }

    /// Parse registry rows from a reader and apply a custom alias table.
    pub fn from_reader_with_overrides<R: Read>(reader: R, overrides: &[NameOverride]) -> Self {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let line = index + 1;
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!(line, %err, "skipping unreadable registry row");
                    continue;
                }
            };
            match parse_registry_row(&record, line) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(err) => warn!(%err, "skipping registry row"),
            }
        }

        entries.extend(
            overrides
                .iter()
                .map(|entry| (entry.alias.to_string(), entry.id)),
        );

        let registry = Self::from_entries(entries);
        debug!(
            names = registry.name_to_id.len(),
            countries = registry.id_to_name.len(),
            "country registry built"
        );
        registry
    }

    /// Build a registry from `(name, id)` pairs given in priority order.
    ///
    /// A later pair re-points a name that was already present. The canonical
    /// name of an identifier is the first of its names that still resolves to
    /// it; an identifier whose names were all re-pointed keeps its first name.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, CountryId)>,
        S: Into<String>,
    {
        let entries: Vec<(String, CountryId)> = entries
            .into_iter()
            .map(|(name, id)| (name.into(), id))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        let mut name_to_id = HashMap::new();
        for (name, id) in &entries {
            name_to_id.insert(name.clone(), *id);
        }

        let mut id_to_name: HashMap<CountryId, String> = HashMap::new();
        for (name, id) in &entries {
            if name_to_id.get(name) == Some(id) && !id_to_name.contains_key(id) {
                id_to_name.insert(*id, name.clone());
            }
        }
        for (name, id) in &entries {
            id_to_name.entry(*id).or_insert_with(|| name.clone());
        }

        Self {
            name_to_id,
            id_to_name,
        }
    }

    /// Lookup a country identifier by its exact name or alias.
    pub fn lookup(&self, name: &str) -> Option<CountryId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve a name, returning [`Error::UnknownCountry`] with suggestions
    /// when it is not registered.
    pub fn resolve(&self, name: &str) -> Result<CountryId> {
        self.lookup(name).ok_or_else(|| Error::UnknownCountry {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    /// Canonical name for a country identifier.
    pub fn name(&self, id: CountryId) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    /// Canonical name, or a placeholder when the identifier is unknown.
    pub fn display_name(&self, id: CountryId) -> String {
        self.name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("<country {id}>"))
    }

    /// Iterate over `(id, canonical name)` pairs in no particular order.
    pub fn countries(&self) -> impl Iterator<Item = (CountryId, &str)> {
        self.id_to_name
            .iter()
            .map(|(id, name)| (*id, name.as_str()))
    }

    /// Number of distinct countries.
    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// Return up to `limit` registered names that look similar to `name`,
    /// best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .name_to_id
            .keys()
            .map(|candidate| (jaro_winkler(&needle, &candidate.to_lowercase()), candidate.as_str()))
            .filter(|(score, _)| *score >= MIN_SUGGESTION_SCORE)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

/// Normalize a registry display name.
///
/// Keeps the text before the first comma, drops every parenthesised
/// qualifier, keeps the text before the first slash, and trims the result.
///
/// ```
/// use roadtrip_lib::registry::canonical_name;
///
/// assert_eq!(canonical_name("Bahamas, The"), "Bahamas");
/// assert_eq!(canonical_name("Myanmar (Burma)"), "Myanmar");
/// assert_eq!(canonical_name("Bosnia/Herzegovina"), "Bosnia");
/// ```
pub fn canonical_name(display: &str) -> String {
    let primary = display.split(',').next().unwrap_or_default();
    let unqualified = strip_parenthesized(primary);
    unqualified
        .split('/')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Remove `(...)` groups, each closed by the nearest following `)`.
/// An unmatched `(` is kept verbatim.
fn strip_parenthesized(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                output.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    output.push_str(rest);
    output
}

fn parse_registry_row(record: &StringRecord, line: usize) -> Result<Option<(String, CountryId)>> {
    if record.len() != REGISTRY_COLUMNS {
        return Err(Error::unparsable(
            REGISTRY_SOURCE,
            line,
            format!("expected {REGISTRY_COLUMNS} columns, found {}", record.len()),
        ));
    }
    if record.get(4) != Some(LIVE_END_DATE) {
        return Ok(None);
    }

    let raw_id = record.get(0).unwrap_or_default().trim();
    let id = raw_id.parse::<CountryId>().map_err(|err| {
        Error::unparsable(
            REGISTRY_SOURCE,
            line,
            format!("invalid country id '{raw_id}': {err}"),
        )
    })?;
    let name = canonical_name(record.get(2).unwrap_or_default());
    if name.is_empty() {
        return Err(Error::unparsable(
            REGISTRY_SOURCE,
            line,
            "country name is empty after normalization",
        ));
    }

    Ok(Some((name, id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "statenumber\tstateabb\tcountryname\tstart\tend\n\
2\tUSA\tUnited States of America\t1816-01-01\t2020-12-31\n\
20\tCAN\tCanada\t1920-01-10\t2020-12-31\n\
70\tMEX\tMexico\t1831-01-01\t2020-12-31\n\
260\tGFR\tGerman Federal Republic\t1955-05-05\t1990-10-02\n\
255\tGMY\tGermany (Prussia)\t1990-10-03\t2020-12-31\n\
31\tBHM\tBahamas, The\t1973-07-10\t2020-12-31\n\
bad row with spaces only\n";

    fn sample() -> CountryRegistry {
        CountryRegistry::from_reader(Cursor::new(SAMPLE)).expect("registry parses")
    }

    #[test]
    fn canonical_name_strips_qualifiers() {
        assert_eq!(canonical_name("Germany (Prussia)"), "Germany");
        assert_eq!(canonical_name("Yemen (Arab Republic of Yemen)"), "Yemen");
        assert_eq!(canonical_name("Korea, People's Republic of"), "Korea");
        assert_eq!(canonical_name("Cambodia (Kampuchea)/Khmer"), "Cambodia");
        assert_eq!(canonical_name("  Peru  "), "Peru");
        assert_eq!(canonical_name("Sudan (North (old)) Rest"), "Sudan ) Rest");
        assert_eq!(canonical_name("Unclosed (qualifier"), "Unclosed (qualifier");
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn keeps_only_live_rows() {
        let registry = sample();
        assert_eq!(registry.lookup("United States of America"), Some(2));
        assert_eq!(registry.lookup("Canada"), Some(20));
        assert_eq!(registry.lookup("German Federal Republic"), None);
        assert_eq!(registry.lookup("statenumber"), None);
    }

    #[test]
    fn overrides_win_over_registry_names() {
        let registry = sample();
        assert_eq!(registry.lookup("Germany"), Some(260));
        assert_eq!(registry.lookup("US"), Some(2));
        assert_eq!(registry.lookup("United States"), Some(2));
        assert_eq!(registry.lookup("Bahamas"), Some(31));
        assert_eq!(registry.lookup("Bahamas, The"), Some(31));
        assert_eq!(registry.lookup("Denmark (Greenland)"), Some(-2));
    }

    #[test]
    fn canonical_names_prefer_registry_spelling() {
        let registry = sample();
        assert_eq!(registry.name(2), Some("United States of America"));
        assert_eq!(registry.name(31), Some("Bahamas"));
        assert_eq!(registry.name(-2), Some("Denmark (Greenland)"));
        assert_eq!(registry.name(-3), Some("Russia (Kaliningrad Oblast)"));
        assert_eq!(registry.name(260), Some("Germany"));
        assert_eq!(registry.name(999), None);
        assert_eq!(registry.display_name(999), "<country 999>");
    }

    #[test]
    fn every_name_resolves_back_to_its_id() {
        let registry = CountryRegistry::from_entries([("Alpha", 1), ("Beta", 2), ("Gamma", 3)]);
        for (id, name) in registry.countries() {
            assert_eq!(registry.lookup(name), Some(id));
        }
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn later_entries_repoint_names() {
        let registry = CountryRegistry::from_entries([("Alpha", 1), ("Alpha", 2), ("Beta", 2)]);
        assert_eq!(registry.lookup("Alpha"), Some(2));
        assert_eq!(registry.name(2), Some("Alpha"));
        assert_eq!(registry.name(1), Some("Alpha"));
    }

    #[test]
    fn resolve_unknown_name_suggests_alternatives() {
        let registry = sample();
        let err = registry.resolve("Mexcio").expect_err("unknown name");
        match err {
            Error::UnknownCountry { name, suggestions } => {
                assert_eq!(name, "Mexcio");
                assert_eq!(suggestions.first().map(String::as_str), Some("Mexico"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = sample();
        assert_eq!(registry.lookup("canada"), None);
        assert!(registry
            .fuzzy_matches("canada", 3)
            .contains(&"Canada".to_string()));
    }

    #[test]
    fn override_table_is_reproduced() {
        assert_eq!(NAME_OVERRIDES.len(), 30);
        let find = |name: &str| {
            NAME_OVERRIDES
                .iter()
                .find(|entry| entry.alias == name)
                .map(|entry| entry.id)
        };
        assert_eq!(find("Congo, Democratic Republic of the"), Some(490));
        assert_eq!(find("Republic of the Congo"), Some(484));
        assert_eq!(find("Russia (Kaliningrad Oblast)"), Some(-3));
        assert_eq!(find("Spain (Ceuta)"), Some(230));
        assert_eq!(find("Turkey (Turkiye)"), Some(640));
    }
}
