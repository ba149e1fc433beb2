use std::io::BufRead;

use crate::{core::JobDescriptor, error::InputError};

/// Reads `arrival pid required` triples, one job per line.
///
/// Tokens are separated by any whitespace. Blank lines and lines starting
/// with `#` are skipped; tokens after the third are ignored.
pub fn parse_jobs(reader: impl BufRead) -> Result<Vec<JobDescriptor>, InputError> {
    let mut jobs = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let number = index + 1;
        let mut tokens = trimmed.split_whitespace();
        let mut field = || {
            tokens.next().ok_or_else(|| InputError::MissingField {
                line: number,
                found: trimmed.to_owned(),
            })
        };
        let (arrival, pid, required) = (field()?, field()?, field()?);

        jobs.push(JobDescriptor::new(
            parse_int(arrival, number)?,
            parse_int(pid, number)?,
            parse_int(required, number)?,
        ));
    }
    Ok(jobs)
}

fn parse_int<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    token: &str,
    line: usize,
) -> Result<T, InputError> {
    token.parse().map_err(|source| InputError::BadInteger {
        line,
        token: token.to_owned(),
        source,
    })
}
