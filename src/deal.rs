//! Hands and deals.

use crate::card::{Card, Direction, Rank, Suit};
use crate::error::{ParseError, Result};
use std::collections::HashSet;
use std::fmt;

/// Vulnerability strings that make North-South vulnerable
const NS_VULNERABLE_STRINGS: [&str; 4] = ["Both", "N-S", "All", "NS"];

/// Vulnerability strings that make East-West vulnerable
const EW_VULNERABLE_STRINGS: [&str; 4] = ["Both", "E-W", "All", "EW"];

/// Decode a PBN/tournament vulnerability string into (ns, ew) flags.
/// Unrecognized strings ("None", "Love", "-") mean neither side is vulnerable.
pub fn vulnerability_from_str(s: &str) -> (bool, bool) {
    let s = s.trim();
    (
        NS_VULNERABLE_STRINGS.contains(&s),
        EW_VULNERABLE_STRINGS.contains(&s),
    )
}

/// One player's thirteen cards, grouped by suit with ranks high to low
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerHand {
    suits: [Vec<Rank>; 4],
}

impl PlayerHand {
    /// Build a hand from per-suit holdings indexed by [`Suit::index`].
    /// Fails unless the holdings total exactly 13 cards.
    pub fn new(mut suits: [Vec<Rank>; 4]) -> Result<Self> {
        let count: usize = suits.iter().map(Vec::len).sum();
        if count != 13 {
            return Err(ParseError::Hand(format!(
                "expected 13 cards, found {}",
                count
            )));
        }
        for ranks in suits.iter_mut() {
            ranks.sort_unstable_by(|a, b| b.cmp(a));
        }
        Ok(PlayerHand { suits })
    }

    /// Build a hand from rank tokens per suit, e.g. `["A", "10", "3"]`
    pub fn from_string_lists<S: AsRef<str>>(
        spades: &[S],
        hearts: &[S],
        diamonds: &[S],
        clubs: &[S],
    ) -> Result<Self> {
        let parse = |tokens: &[S]| -> Result<Vec<Rank>> {
            tokens.iter().map(|t| t.as_ref().parse::<Rank>()).collect()
        };
        PlayerHand::new([
            parse(clubs)?,
            parse(diamonds)?,
            parse(hearts)?,
            parse(spades)?,
        ])
    }

    /// Build a hand from any collection of cards, regrouping them by suit
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Result<Self> {
        let mut suits: [Vec<Rank>; 4] = Default::default();
        for card in cards {
            suits[card.suit.index()].push(card.rank);
        }
        PlayerHand::new(suits)
    }

    /// Ranks held in `suit`, highest first
    pub fn suit(&self, suit: Suit) -> &[Rank] {
        &self.suits[suit.index()]
    }

    pub fn suit_length(&self, suit: Suit) -> usize {
        self.suits[suit.index()].len()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.suits[card.suit.index()].contains(&card.rank)
    }

    /// All cards, spades first, each suit high to low
    pub fn cards(&self) -> Vec<Card> {
        Suit::DISPLAY_ORDER
            .iter()
            .flat_map(|&suit| self.suit(suit).iter().map(move |&rank| Card::new(suit, rank)))
            .collect()
    }
}

impl fmt::Display for PlayerHand {
    /// PBN-style holding: "AKQ.JT9.876.5432"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suits: Vec<String> = Suit::DISPLAY_ORDER
            .iter()
            .map(|&suit| self.suit(suit).iter().map(|r| r.to_char()).collect())
            .collect();
        write!(f, "{}", suits.join("."))
    }
}

/// A dealt board: dealer, vulnerability, and the four hands.
///
/// Equality and hashing are structural; because each hand is kept in a
/// canonical order, two deals holding the same cards compare equal no matter
/// how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Deal {
    pub dealer: Direction,
    pub ns_vulnerable: bool,
    pub ew_vulnerable: bool,
    hands: [PlayerHand; 4],
}

impl Deal {
    /// Build a deal from hands indexed by [`Direction::index`] (N, E, S, W)
    pub fn new(
        dealer: Direction,
        ns_vulnerable: bool,
        ew_vulnerable: bool,
        hands: [PlayerHand; 4],
    ) -> Self {
        Deal {
            dealer,
            ns_vulnerable,
            ew_vulnerable,
            hands,
        }
    }

    /// Build a deal from per-direction card lists (N, E, S, W)
    pub fn from_cards(
        dealer: Direction,
        ns_vulnerable: bool,
        ew_vulnerable: bool,
        player_cards: [Vec<Card>; 4],
    ) -> Result<Self> {
        let [north, east, south, west] = player_cards;
        Ok(Deal::new(
            dealer,
            ns_vulnerable,
            ew_vulnerable,
            [
                PlayerHand::from_cards(north)?,
                PlayerHand::from_cards(east)?,
                PlayerHand::from_cards(south)?,
                PlayerHand::from_cards(west)?,
            ],
        ))
    }

    /// Parse PBN `Dealer`, `Vulnerable` and `Deal` tag values.
    ///
    /// The deal string is `"<first>:<hand> <hand> <hand> <hand>"` with hands
    /// clockwise from `first`, each written `spades.hearts.diamonds.clubs`.
    pub fn from_pbn(dealer: &str, vulnerability: &str, deal: &str) -> Result<Self> {
        let dealer = dealer
            .trim()
            .chars()
            .next()
            .and_then(Direction::from_char)
            .ok_or_else(|| ParseError::Pbn(format!("invalid dealer '{}'", dealer)))?;
        let (ns_vulnerable, ew_vulnerable) = vulnerability_from_str(vulnerability);

        let deal = deal.trim();
        let (first, holdings) = deal
            .split_once(':')
            .ok_or_else(|| ParseError::Pbn(format!("invalid deal '{}'", deal)))?;
        let mut direction = first
            .trim()
            .chars()
            .next()
            .and_then(Direction::from_char)
            .ok_or_else(|| ParseError::Pbn(format!("invalid deal '{}'", deal)))?;

        let holdings: Vec<&str> = holdings.split_whitespace().collect();
        if holdings.len() != 4 {
            return Err(ParseError::Pbn(format!(
                "expected 4 hands in deal, got {}",
                holdings.len()
            )));
        }

        let mut player_cards: [Vec<Card>; 4] = Default::default();
        for holding in holdings {
            let suits: Vec<&str> = holding.split('.').collect();
            if suits.len() != 4 {
                return Err(ParseError::Pbn(format!("invalid holding '{}'", holding)));
            }
            for (&suit, ranks) in Suit::DISPLAY_ORDER.iter().zip(suits) {
                for c in ranks.chars() {
                    let rank = Rank::from_char(c)
                        .ok_or_else(|| ParseError::Card(format!("{}{}", suit.to_char(), c)))?;
                    player_cards[direction.index()].push(Card::new(suit, rank));
                }
            }
            direction = direction.next();
        }

        Deal::from_cards(dealer, ns_vulnerable, ew_vulnerable, player_cards)
    }

    pub fn hand(&self, direction: Direction) -> &PlayerHand {
        &self.hands[direction.index()]
    }

    /// Flattened card list for one seat, spades first, high to low
    pub fn player_cards(&self, direction: Direction) -> Vec<Card> {
        self.hand(direction).cards()
    }

    /// The seat holding `card`, if any
    pub fn holder_of(&self, card: Card) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.hand(direction).contains(card))
    }

    pub fn is_vulnerable(&self, direction: Direction) -> bool {
        match direction {
            Direction::North | Direction::South => self.ns_vulnerable,
            Direction::East | Direction::West => self.ew_vulnerable,
        }
    }

    /// True when the four hands are disjoint and cover the whole deck.
    /// Construction only guarantees thirteen cards per hand.
    pub fn is_complete(&self) -> bool {
        let distinct: HashSet<Card> = Direction::ALL
            .iter()
            .flat_map(|&direction| self.player_cards(direction))
            .collect();
        distinct.len() == 52
    }
}
