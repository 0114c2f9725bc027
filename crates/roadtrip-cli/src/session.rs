//! Interactive read-loop for route queries.

use std::io::{self, BufRead, Write};

use roadtrip_lib::RoadAtlas;
use tracing::debug;

use crate::output::NO_PATH_MESSAGE;

pub const FIRST_PROMPT: &str = "Enter the name of the first country (type EXIT to quit):";
pub const SECOND_PROMPT: &str = "Enter the name of the second country (type EXIT to quit):";
pub const INVALID_COUNTRY: &str = "Invalid country name. Please enter a valid country name.";
pub const FAREWELL: &str = "Exiting program. Thank you!";

const EXIT_COMMAND: &str = "EXIT";

enum Answer {
    Exit,
    Country(String),
}

/// Prompt for country pairs until the user types `EXIT` or input ends.
///
/// Unknown names restart the loop from the first prompt.
pub fn run<R: BufRead, W: Write>(atlas: &RoadAtlas, mut input: R, mut out: W) -> io::Result<()> {
    loop {
        let first = match ask(&mut input, &mut out, FIRST_PROMPT)? {
            Answer::Exit => break,
            Answer::Country(name) => name,
        };
        if atlas.registry().lookup(&first).is_none() {
            debug!(name = %first, "rejected first country");
            writeln!(out, "{INVALID_COUNTRY}")?;
            continue;
        }

        let second = match ask(&mut input, &mut out, SECOND_PROMPT)? {
            Answer::Exit => break,
            Answer::Country(name) => name,
        };
        if atlas.registry().lookup(&second).is_none() {
            debug!(name = %second, "rejected second country");
            writeln!(out, "{INVALID_COUNTRY}")?;
            continue;
        }

        let lines = atlas.path_lines(&first, &second);
        if lines.is_empty() {
            writeln!(out, "{NO_PATH_MESSAGE}")?;
        } else {
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }
    }

    writeln!(out, "{FAREWELL}")?;
    out.flush()
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Answer> {
    writeln!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Answer::Exit);
    }
    let answer = line.trim();
    if answer.eq_ignore_ascii_case(EXIT_COMMAND) {
        Ok(Answer::Exit)
    } else {
        Ok(Answer::Country(answer.to_string()))
    }
}
