//! Tournament hand records: the flat JSON published with results.
//!
//! Each suit holding is a string of space-separated ranks (`"A Q 10 9 3"`),
//! or `"-----"` for a void. Unknown keys are ignored.

use crate::card::{Direction, Suit};
use crate::deal::{vulnerability_from_str, Deal, PlayerHand};
use crate::double_dummy::DoubleDummyScore;
use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};

const VOID: &str = "-----";

/// One hand record as it appears in the JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentHandRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_number: Option<u32>,
    pub north_spades: String,
    pub north_hearts: String,
    pub north_diamonds: String,
    pub north_clubs: String,
    pub east_spades: String,
    pub east_hearts: String,
    pub east_diamonds: String,
    pub east_clubs: String,
    pub south_spades: String,
    pub south_hearts: String,
    pub south_diamonds: String,
    pub south_clubs: String,
    pub west_spades: String,
    pub west_hearts: String,
    pub west_diamonds: String,
    pub west_clubs: String,
    pub dealer: String,
    pub vulnerability: String,
    pub double_dummy_north_south: String,
    pub double_dummy_east_west: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_dummy_par_score: Option<String>,
}

impl TournamentHandRecord {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The four holdings of one seat, spades first
    fn holdings(&self, direction: Direction) -> [&str; 4] {
        match direction {
            Direction::North => [
                self.north_spades.as_str(),
                self.north_hearts.as_str(),
                self.north_diamonds.as_str(),
                self.north_clubs.as_str(),
            ],
            Direction::East => [
                self.east_spades.as_str(),
                self.east_hearts.as_str(),
                self.east_diamonds.as_str(),
                self.east_clubs.as_str(),
            ],
            Direction::South => [
                self.south_spades.as_str(),
                self.south_hearts.as_str(),
                self.south_diamonds.as_str(),
                self.south_clubs.as_str(),
            ],
            Direction::West => [
                self.west_spades.as_str(),
                self.west_hearts.as_str(),
                self.west_diamonds.as_str(),
                self.west_clubs.as_str(),
            ],
        }
    }

    /// Build the deal this record describes
    pub fn to_deal(&self) -> Result<Deal> {
        let mut hands = Vec::with_capacity(4);
        for direction in Direction::ALL {
            let mut suits: [Vec<&str>; 4] = Default::default();
            for (suit, holding) in Suit::DISPLAY_ORDER.iter().zip(self.holdings(direction)) {
                if holding.trim() != VOID {
                    suits[suit.index()] = holding.split_whitespace().collect();
                }
            }
            let [clubs, diamonds, hearts, spades] = suits;
            hands.push(PlayerHand::from_string_lists(&spades, &hearts, &diamonds, &clubs)?);
        }
        let hands: [PlayerHand; 4] = hands
            .try_into()
            .map_err(|_| ParseError::Hand("expected four hands".to_string()))?;

        let dealer = Direction::from_name(&self.dealer)
            .ok_or_else(|| ParseError::Record(format!("invalid dealer '{}'", self.dealer)))?;
        let (ns_vulnerable, ew_vulnerable) = vulnerability_from_str(&self.vulnerability);
        Ok(Deal::new(dealer, ns_vulnerable, ew_vulnerable, hands))
    }

    pub fn double_dummy(&self) -> Result<DoubleDummyScore> {
        DoubleDummyScore::from_tournament_strings(
            &self.double_dummy_north_south,
            &self.double_dummy_east_west,
        )
    }
}

/// Deal from a tournament hand record
pub fn deal_from_tournament(record: &TournamentHandRecord) -> Result<Deal> {
    record.to_deal()
}

/// A deal together with its double-dummy table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentDeal {
    pub board_number: Option<u32>,
    pub deal: Deal,
    pub double_dummy: DoubleDummyScore,
}

impl TournamentDeal {
    pub fn from_record(record: &TournamentHandRecord) -> Result<Self> {
        Ok(TournamentDeal {
            board_number: record.board_number,
            deal: record.to_deal()?,
            double_dummy: record.double_dummy()?,
        })
    }

    /// Parse one JSON hand record
    pub fn from_json(json: &str) -> Result<Self> {
        TournamentDeal::from_record(&TournamentHandRecord::from_json(json)?)
    }
}
