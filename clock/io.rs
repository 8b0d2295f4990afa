// ========================================================================================
//
//                         Sample ingestion and result output
//
// ========================================================================================
//
// This module moves beta-value text in and result rows out. It contains no scientific
// logic: parsing produces plain vectors, and the validating constructor in `types`
// turns them into panels.

use crate::types::{AgeEstimate, ClockError, HORVATH_CPG_COUNT};
use rand::Rng;
use rand::distributions::Standard;
use std::io::{self, BufRead, Write};

/// Parses one comma-separated line of beta values.
///
/// Tokens are trimmed and empty tokens are skipped, so trailing commas and ragged
/// spacing survive a copy-paste from a spreadsheet export. The count is NOT checked
/// here; panel construction is the single validation point for that.
pub fn parse_beta_line(line: &str) -> Result<Vec<f64>, ClockError> {
    let mut values = Vec::with_capacity(HORVATH_CPG_COUNT);
    let tokens = line.split(',').map(str::trim).filter(|token| !token.is_empty());
    for (index, token) in tokens.enumerate() {
        let value = token
            .parse::<f64>()
            .map_err(|_| ClockError::InvalidBetaValue {
                token: token.to_string(),
                position: index + 1,
            })?;
        values.push(value);
    }
    Ok(values)
}

/// Reads raw samples from a reader: one comma-separated sample per line, blank
/// lines skipped.
pub fn read_samples<R: BufRead>(reader: R) -> Result<Vec<Vec<f64>>, ClockError> {
    let mut samples = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        samples.push(parse_beta_line(&line)?);
    }
    Ok(samples)
}

/// Writes labelled estimates as tab-separated rows under a `#`-prefixed header.
pub fn write_estimates_tsv<W: Write>(
    writer: &mut W,
    estimates: &[(String, AgeEstimate)],
) -> io::Result<()> {
    writeln!(writer, "#SAMPLE\tMODEL\tAGE_YEARS")?;
    for (sample, estimate) in estimates {
        writeln!(
            writer,
            "{sample}\t{}\t{:.1}",
            estimate.model, estimate.age_years
        )?;
    }
    Ok(())
}

/// Generates one example panel: uniform draws in [0, 1], rounded to six decimal
/// places like a methylation array export.
pub fn example_panel() -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..HORVATH_CPG_COUNT)
        .map(|_| {
            let draw: f64 = rng.sample(Standard);
            (draw * 1e6).round() / 1e6
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClockModel;
    use std::io::Cursor;

    #[test]
    fn parse_trims_and_skips_empty_tokens() {
        let values = parse_beta_line(" 0.1 , 0.2 ,, 0.3 ,").unwrap();
        assert_eq!(values, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn parse_reports_offending_token_and_position() {
        match parse_beta_line("0.1, 0.2, beta, 0.4") {
            Err(ClockError::InvalidBetaValue { token, position }) => {
                assert_eq!(token, "beta");
                assert_eq!(position, 3);
            }
            other => panic!("expected a parse failure, got {other:?}"),
        }
    }

    #[test]
    fn read_samples_skips_blank_lines() {
        let text = "0.1, 0.2\n\n   \n0.3, 0.4\n";
        let samples = read_samples(Cursor::new(text)).unwrap();
        assert_eq!(samples, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[test]
    fn tsv_output_has_header_and_one_decimal() {
        let estimates = vec![(
            "sample_1".to_string(),
            AgeEstimate {
                model: ClockModel::MeanSeeded,
                age_years: 59.94,
                seed: Some(176_500),
            },
        )];
        let mut buffer = Vec::new();
        write_estimates_tsv(&mut buffer, &estimates).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "#SAMPLE\tMODEL\tAGE_YEARS\nsample_1\tmean-seeded\t59.9\n");
    }

    #[test]
    fn example_panel_has_full_count_in_unit_range() {
        let panel = example_panel();
        assert_eq!(panel.len(), HORVATH_CPG_COUNT);
        assert!(panel.iter().all(|value| (0.0..=1.0).contains(value)));
    }
}
