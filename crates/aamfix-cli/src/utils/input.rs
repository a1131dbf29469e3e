use crate::cli::ReactionInput;
use crate::error::{CliError, Result};
use aamfix::core::io::smiles::parse_reaction;
use aamfix::core::models::reaction::Reaction;
use anyhow::anyhow;
use std::path::Path;
use tracing::debug;

/// Non-empty lines that are not `#` comments, with their 1-based numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

pub fn read_reaction(input: &ReactionInput) -> Result<Reaction> {
    if let Some(smiles) = &input.reaction {
        return Ok(parse_reaction(smiles)?);
    }
    let path = input
        .input
        .as_deref()
        .ok_or_else(|| CliError::Argument("Either --reaction or --input is required.".into()))?;

    debug!("Reading reaction from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let (line_no, line) = content_lines(&content).next().ok_or_else(|| CliError::FileParsing {
        path: path.to_path_buf(),
        source: anyhow!("file contains no reaction"),
    })?;
    parse_reaction(line).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: anyhow!("line {}: {}", line_no, e),
    })
}

/// Reads `BAD<TAB>GOOD` reaction pairs, one per line.
pub fn read_batch(path: &Path) -> Result<Vec<(Reaction, Reaction)>> {
    debug!("Reading reaction pairs from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let parse_error = |line_no: usize, message: String| CliError::FileParsing {
        path: path.to_path_buf(),
        source: anyhow!("line {}: {}", line_no, message),
    };

    content_lines(&content)
        .map(|(line_no, line)| {
            let (bad, good) = line.split_once('\t').ok_or_else(|| {
                parse_error(line_no, "expected two tab-separated reactions".into())
            })?;
            let bad = parse_reaction(bad.trim()).map_err(|e| parse_error(line_no, e.to_string()))?;
            let good =
                parse_reaction(good.trim()).map_err(|e| parse_error(line_no, e.to_string()))?;
            Ok((bad, good))
        })
        .collect()
}
