//! Double-dummy trick tables as printed on tournament hand records.
//!
//! Each partnership gets one string of space-separated tokens such as
//! `"2C 2/-H 1S 3/2NT D6 H8/6"`. A token names a strain and a trick count.
//! When the count comes before the strain it is a count of tricks over book
//! (`2C` is eight tricks); when it comes after, it is the raw trick count
//! (`C2` is two tricks). `a/b` gives different counts for the first and
//! second seat of the pair, and a `-` in a token marks a count that is
//! repeated in full elsewhere in the string.

use crate::card::{BiddingSuit, Direction};
use crate::error::{ParseError, Result};
use std::collections::HashMap;

const BOOK: u8 = 6;

/// Strain identifiers in lookup order; `NT` contains none of the suit letters
const STRAIN_IDENTIFIERS: [(&str, BiddingSuit); 5] = [
    ("C", BiddingSuit::Clubs),
    ("D", BiddingSuit::Diamonds),
    ("H", BiddingSuit::Hearts),
    ("S", BiddingSuit::Spades),
    ("NT", BiddingSuit::NoTrump),
];

/// Double-dummy tricks for every declarer and strain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleDummyScore {
    scores: HashMap<(Direction, BiddingSuit), u8>,
}

impl DoubleDummyScore {
    /// Wrap a full table; anything other than 20 entries is rejected
    pub fn new(scores: HashMap<(Direction, BiddingSuit), u8>) -> Result<Self> {
        if scores.len() != 20 {
            return Err(ParseError::DoubleDummy(format!(
                "expected 20 scores, found {}",
                scores.len()
            )));
        }
        Ok(DoubleDummyScore { scores })
    }

    /// Parse the North-South and East-West strings of a tournament hand record
    pub fn from_tournament_strings(north_south: &str, east_west: &str) -> Result<Self> {
        let mut scores = HashMap::new();
        parse_partnership(north_south, Direction::North, &mut scores)?;
        parse_partnership(east_west, Direction::East, &mut scores)?;
        DoubleDummyScore::new(scores)
    }

    /// Tricks available to `declarer` in `strain`
    pub fn tricks(&self, declarer: Direction, strain: BiddingSuit) -> u8 {
        self.scores.get(&(declarer, strain)).copied().unwrap_or(0)
    }

    pub fn scores(&self) -> &HashMap<(Direction, BiddingSuit), u8> {
        &self.scores
    }
}

fn parse_partnership(
    s: &str,
    first: Direction,
    scores: &mut HashMap<(Direction, BiddingSuit), u8>,
) -> Result<()> {
    for token in s.split_whitespace() {
        if token.contains('-') {
            continue;
        }
        let (strain, first_tricks, second_tricks) = parse_token(token)?;
        scores.insert((first, strain), first_tricks);
        scores.insert((first.partner(), strain), second_tricks);
    }
    Ok(())
}

/// Split one token into its strain and the tricks for each seat of the pair
fn parse_token(token: &str) -> Result<(BiddingSuit, u8, u8)> {
    let invalid = || ParseError::DoubleDummy(format!("invalid score '{}'", token));

    let (identifier, strain, position) = STRAIN_IDENTIFIERS
        .iter()
        .find_map(|&(identifier, strain)| {
            token
                .find(identifier)
                .map(|position| (identifier, strain, position))
        })
        .ok_or_else(invalid)?;
    let book = if position > 0 { BOOK } else { 0 };
    let counts = token.replacen(identifier, "", 1);

    let parse_count = |s: &str| -> Result<u8> {
        s.parse::<u8>()
            .map_err(|_| invalid())?
            .checked_add(book)
            .filter(|tricks| *tricks <= 13)
            .ok_or_else(invalid)
    };
    match counts.split_once('/') {
        Some((a, b)) => Ok((strain, parse_count(a)?, parse_count(b)?)),
        None => {
            let tricks = parse_count(&counts)?;
            Ok((strain, tricks, tricks))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let dd = DoubleDummyScore::from_tournament_strings(
            "C4 D6 H5 S6 NT4",
            "2C 2/-H 1S 3/2NT D6 H8/6",
        )
        .unwrap();

        for direction in [Direction::North, Direction::South] {
            assert_eq!(4, dd.tricks(direction, BiddingSuit::Clubs));
            assert_eq!(6, dd.tricks(direction, BiddingSuit::Diamonds));
            assert_eq!(5, dd.tricks(direction, BiddingSuit::Hearts));
            assert_eq!(6, dd.tricks(direction, BiddingSuit::Spades));
            assert_eq!(4, dd.tricks(direction, BiddingSuit::NoTrump));
        }

        assert_eq!(8, dd.tricks(Direction::East, BiddingSuit::Clubs));
        assert_eq!(6, dd.tricks(Direction::East, BiddingSuit::Diamonds));
        assert_eq!(8, dd.tricks(Direction::East, BiddingSuit::Hearts));
        assert_eq!(7, dd.tricks(Direction::East, BiddingSuit::Spades));
        assert_eq!(9, dd.tricks(Direction::East, BiddingSuit::NoTrump));

        assert_eq!(8, dd.tricks(Direction::West, BiddingSuit::Clubs));
        assert_eq!(6, dd.tricks(Direction::West, BiddingSuit::Diamonds));
        assert_eq!(6, dd.tricks(Direction::West, BiddingSuit::Hearts));
        assert_eq!(7, dd.tricks(Direction::West, BiddingSuit::Spades));
        assert_eq!(8, dd.tricks(Direction::West, BiddingSuit::NoTrump));
    }

    #[test]
    fn test_book_offset_follows_position() {
        assert_eq!(parse_token("2C").unwrap(), (BiddingSuit::Clubs, 8, 8));
        assert_eq!(parse_token("C2").unwrap(), (BiddingSuit::Clubs, 2, 2));
        assert_eq!(parse_token("3/2NT").unwrap(), (BiddingSuit::NoTrump, 9, 8));
        assert_eq!(parse_token("NT6").unwrap(), (BiddingSuit::NoTrump, 6, 6));
    }

    #[test]
    fn test_incomplete_table_rejected() {
        let err = DoubleDummyScore::from_tournament_strings("C4 D6 H5 S6", "2C 1D 3H 2S 3NT")
            .unwrap_err();
        assert!(matches!(err, ParseError::DoubleDummy(_)));
    }

    #[test]
    fn test_bad_token_rejected() {
        assert!(parse_token("9").is_err());
        assert!(parse_token("XC").is_err());
        assert!(parse_token("9C").is_err());
        assert!(parse_token("255C").is_err());
        assert!(parse_token("C255").is_err());
    }
}
