use aamfix::core::models::atom::AtomIndex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid atom pair '{0}'. Expected 'BAD:GOOD' (e.g., '2:3').")]
    InvalidPairFormat(String),

    #[error("Invalid atom index '{index}' in pair '{pair}'. Expected a positive integer.")]
    InvalidIndex { index: String, pair: String },
}

/// Parses a reviewer-entered `BAD:GOOD` pair of atom map numbers.
pub fn parse_atom_pair(pair: &str) -> Result<(AtomIndex, AtomIndex), ParseError> {
    let (bad, good) = pair
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidPairFormat(pair.to_string()))?;

    let index = |s: &str| {
        s.trim()
            .parse::<AtomIndex>()
            .ok()
            .filter(|&i| i > 0)
            .ok_or_else(|| ParseError::InvalidIndex {
                index: s.to_string(),
                pair: pair.to_string(),
            })
    };
    Ok((index(bad)?, index(good)?))
}

/// Splits pairs into the two parallel index lists, keeping entry order.
pub fn parse_pairs(pairs: &[String]) -> Result<(Vec<AtomIndex>, Vec<AtomIndex>), ParseError> {
    pairs
        .iter()
        .map(|pair| parse_atom_pair(pair))
        .collect::<Result<Vec<_>, _>>()
        .map(|parsed| parsed.into_iter().unzip())
}
