//! One-shot `distance` and `path` commands.

use std::io::{self, Write};

use anyhow::{Context, Result};

use roadtrip_cli::output::OutputFormat;
use roadtrip_lib::{Error as AtlasError, RoadAtlas, RouteSummary};

/// Handle the `distance` subcommand.
pub fn handle_distance_command(
    atlas: &RoadAtlas,
    format: OutputFormat,
    from: &str,
    to: &str,
) -> Result<()> {
    let summary = plan(atlas, from, to)?;
    let mut stdout = io::stdout().lock();
    format
        .render_distance(&mut stdout, from, to, summary.as_ref())
        .context("failed to write distance")?;
    stdout.flush().context("failed to flush stdout")
}

/// Handle the `path` subcommand.
pub fn handle_path_command(
    atlas: &RoadAtlas,
    format: OutputFormat,
    from: &str,
    to: &str,
) -> Result<()> {
    let summary = plan(atlas, from, to)?;
    let mut stdout = io::stdout().lock();
    format
        .render_path(&mut stdout, summary.as_ref())
        .context("failed to write path")?;
    stdout.flush().context("failed to flush stdout")
}

fn plan(atlas: &RoadAtlas, from: &str, to: &str) -> Result<Option<RouteSummary>> {
    atlas.summary(from, to).map_err(handle_query_failure)
}

fn handle_query_failure(err: AtlasError) -> anyhow::Error {
    match err {
        AtlasError::UnknownCountry { name, suggestions } => {
            anyhow::anyhow!(format_unknown_country_message(&name, &suggestions))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_country_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown country '{}'.", name);
    match suggestions {
        [] => {}
        [suggestion] => message.push_str(&format!(" Did you mean '{suggestion}'?")),
        _ => {
            let joined = suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_country_without_suggestions() {
        assert_eq!(
            format_unknown_country_message("Narnia", &[]),
            "Unknown country 'Narnia'."
        );
    }

    #[test]
    fn unknown_country_with_one_suggestion() {
        assert_eq!(
            format_unknown_country_message("Guatamala", &["Guatemala".to_string()]),
            "Unknown country 'Guatamala'. Did you mean 'Guatemala'?"
        );
    }

    #[test]
    fn unknown_country_with_several_suggestions() {
        let suggestions = vec!["Niger".to_string(), "Nigeria".to_string()];
        assert_eq!(
            format_unknown_country_message("Nigr", &suggestions),
            "Unknown country 'Nigr'. Did you mean one of: 'Niger', 'Nigeria'?"
        );
    }
}
