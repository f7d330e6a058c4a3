//! Suits, ranks, cards, strains and seats.

use crate::error::{ParseError, Result};
use std::fmt;
use std::str::FromStr;

/// A card suit, ordered clubs < diamonds < hearts < spades
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in ascending order
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Suits in the order hands are written (spades first)
    pub const DISPLAY_ORDER: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    pub fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }
}

/// A card rank, two through ace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in ascending order
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value, 2 for a two up to 14 for an ace
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl FromStr for Rank {
    type Err = ParseError;

    /// Parse a rank token; accepts "10" as well as "T"
    fn from_str(s: &str) -> Result<Rank> {
        let s = s.trim();
        if s == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Rank::from_char(c).ok_or_else(|| ParseError::Card(format!("unknown rank '{}'", s)))
            }
            _ => Err(ParseError::Card(format!("unknown rank '{}'", s))),
        }
    }
}

/// A single playing card, ordered by suit then rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    /// Every card in the deck in ascending suit-then-rank order
    pub fn deck() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(suit, rank)))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.to_char(), self.rank.to_char())
    }
}

impl FromStr for Card {
    type Err = ParseError;

    /// Parse a two-character card such as "SA" or "d2"
    fn from_str(s: &str) -> Result<Card> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit = chars.next().and_then(Suit::from_char);
        let rank = chars.next().and_then(Rank::from_char);
        match (suit, rank, chars.next()) {
            (Some(suit), Some(rank), None) => Ok(Card::new(suit, rank)),
            _ => Err(ParseError::Card(s.to_string())),
        }
    }
}

/// The strain of a contract: a suit or no trump
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BiddingSuit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl BiddingSuit {
    pub const ALL: [BiddingSuit; 5] = [
        BiddingSuit::Clubs,
        BiddingSuit::Diamonds,
        BiddingSuit::Hearts,
        BiddingSuit::Spades,
        BiddingSuit::NoTrump,
    ];

    /// The trump suit, or `None` for no trump
    pub fn to_suit(self) -> Option<Suit> {
        match self {
            BiddingSuit::Clubs => Some(Suit::Clubs),
            BiddingSuit::Diamonds => Some(Suit::Diamonds),
            BiddingSuit::Hearts => Some(Suit::Hearts),
            BiddingSuit::Spades => Some(Suit::Spades),
            BiddingSuit::NoTrump => None,
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            BiddingSuit::Clubs => "C",
            BiddingSuit::Diamonds => "D",
            BiddingSuit::Hearts => "H",
            BiddingSuit::Spades => "S",
            BiddingSuit::NoTrump => "NT",
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(self, BiddingSuit::Clubs | BiddingSuit::Diamonds)
    }
}

impl From<Suit> for BiddingSuit {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => BiddingSuit::Clubs,
            Suit::Diamonds => BiddingSuit::Diamonds,
            Suit::Hearts => BiddingSuit::Hearts,
            Suit::Spades => BiddingSuit::Spades,
        }
    }
}

impl FromStr for BiddingSuit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<BiddingSuit> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(BiddingSuit::Clubs),
            "D" => Ok(BiddingSuit::Diamonds),
            "H" => Ok(BiddingSuit::Hearts),
            "S" => Ok(BiddingSuit::Spades),
            "N" | "NT" => Ok(BiddingSuit::NoTrump),
            _ => Err(ParseError::Contract(format!("unknown strain '{}'", s))),
        }
    }
}

impl fmt::Display for BiddingSuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// A seat at the table. Clockwise order is N, E, S, W.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Inverse of [`Direction::index`], taken modulo 4
    pub fn from_index(index: usize) -> Direction {
        match index % 4 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    pub fn from_char(c: char) -> Option<Direction> {
        match c.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Parse a full seat name ("north", "West") or a single letter
    pub fn from_name(name: &str) -> Option<Direction> {
        match name.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Some(Direction::North),
            "east" | "e" => Some(Direction::East),
            "south" | "s" => Some(Direction::South),
            "west" | "w" => Some(Direction::West),
            _ => None,
        }
    }

    pub fn next(self) -> Direction {
        self.offset(1)
    }

    pub fn partner(self) -> Direction {
        self.offset(2)
    }

    pub fn previous(self) -> Direction {
        self.offset(3)
    }

    /// The seat `n` places clockwise from this one
    pub fn offset(self, n: usize) -> Direction {
        Direction::from_index(self.index() + n % 4)
    }

    /// True for the seats of the same partnership
    pub fn same_side(self, other: Direction) -> bool {
        self == other || self.partner() == other
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "North"),
            Direction::East => write!(f, "East"),
            Direction::South => write!(f, "South"),
            Direction::West => write!(f, "West"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_from_str() {
        let card: Card = "SA".parse().unwrap();
        assert_eq!(card, Card::new(Suit::Spades, Rank::Ace));

        let card: Card = "d2".parse().unwrap();
        assert_eq!(card, Card::new(Suit::Diamonds, Rank::Two));

        assert!("S".parse::<Card>().is_err());
        assert!("XA".parse::<Card>().is_err());
        assert!("SAK".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Ten).to_string(), "HT");
        assert_eq!(Card::new(Suit::Clubs, Rank::Two).to_string(), "C2");
    }

    #[test]
    fn test_card_ordering() {
        let c_ace = Card::new(Suit::Clubs, Rank::Ace);
        let d_two = Card::new(Suit::Diamonds, Rank::Two);
        let d_three = Card::new(Suit::Diamonds, Rank::Three);
        assert!(c_ace < d_two);
        assert!(d_two < d_three);
        assert_eq!(Card::deck().count(), 52);
        assert_eq!(Card::deck().next(), Some(Card::new(Suit::Clubs, Rank::Two)));
    }

    #[test]
    fn test_rank_from_str() {
        assert_eq!("10".parse::<Rank>().unwrap(), Rank::Ten);
        assert_eq!("t".parse::<Rank>().unwrap(), Rank::Ten);
        assert_eq!("A".parse::<Rank>().unwrap(), Rank::Ace);
        assert!("1".parse::<Rank>().is_err());
        assert_eq!(Rank::Ace.value(), 14);
        assert_eq!(Rank::Two.value(), 2);
    }

    #[test]
    fn test_direction_cycle() {
        assert_eq!(Direction::West.next(), Direction::North);
        assert_eq!(Direction::North.previous(), Direction::West);
        assert_eq!(Direction::East.partner(), Direction::West);
        assert_eq!(Direction::South.offset(6), Direction::North);
        assert!(Direction::North.same_side(Direction::South));
        assert!(!Direction::North.same_side(Direction::East));
    }

    #[test]
    fn test_bidding_suit() {
        assert_eq!("NT".parse::<BiddingSuit>().unwrap(), BiddingSuit::NoTrump);
        assert_eq!("n".parse::<BiddingSuit>().unwrap(), BiddingSuit::NoTrump);
        assert_eq!(BiddingSuit::NoTrump.to_suit(), None);
        assert_eq!(BiddingSuit::Hearts.to_suit(), Some(Suit::Hearts));
        assert!("Z".parse::<BiddingSuit>().is_err());
    }
}
