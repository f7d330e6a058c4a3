//! Contracts and the record of a board played at one table.

use crate::bids::is_contract_bid;
use crate::card::{BiddingSuit, Card, Direction};
use crate::deal::Deal;
use crate::error::{ParseError, Result};
use crate::scoring::calculate_score;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// How many times the final contract was doubled
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Doubled {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

impl Doubled {
    /// 0 undoubled, 1 doubled, 2 redoubled
    pub fn count(self) -> u8 {
        match self {
            Doubled::Undoubled => 0,
            Doubled::Doubled => 1,
            Doubled::Redoubled => 2,
        }
    }

    pub fn from_count(count: usize) -> Option<Doubled> {
        match count {
            0 => Some(Doubled::Undoubled),
            1 => Some(Doubled::Doubled),
            2 => Some(Doubled::Redoubled),
            _ => None,
        }
    }
}

/// The final contract of a board. A level of 0 means the board was passed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contract {
    pub level: u8,
    pub strain: Option<BiddingSuit>,
    pub doubled: Doubled,
}

impl Contract {
    pub const PASSED_OUT: Contract = Contract {
        level: 0,
        strain: None,
        doubled: Doubled::Undoubled,
    };

    pub fn new(level: u8, strain: BiddingSuit, doubled: Doubled) -> Self {
        Contract {
            level,
            strain: Some(strain),
            doubled,
        }
    }

    pub fn is_passed_out(&self) -> bool {
        self.level == 0
    }

    /// Determine the contract from a canonical bidding record.
    ///
    /// The contract is the call before the closing three passes; when that
    /// call is a double or redouble, walk back to the last contract bid.
    pub fn from_auction<S: AsRef<str>>(bidding_record: &[S]) -> Result<Contract> {
        if bidding_record.len() < 4 {
            return Err(ParseError::Record(format!(
                "auctions must have 4+ bids, got {}",
                bidding_record.len()
            )));
        }
        let final_index = bidding_record.len() - 4;
        let final_call = bidding_record[final_index].as_ref();
        if final_call == "PASS" {
            return Ok(Contract::PASSED_OUT);
        }
        if is_contract_bid(final_call) {
            return final_call.parse();
        }

        let bid = bidding_record[..final_index]
            .iter()
            .rev()
            .map(|bid| bid.as_ref())
            .find(|bid| *bid != "X" && *bid != "PASS")
            .ok_or_else(|| {
                ParseError::Contract(format!("{} with no contract bid", final_call))
            })?;
        format!("{}{}", bid, final_call).parse()
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strain {
            Some(strain) if self.level > 0 => {
                write!(f, "{}{}", self.level, strain)?;
                for _ in 0..self.doubled.count() {
                    f.write_str("X")?;
                }
                Ok(())
            }
            _ => f.write_str("PASS"),
        }
    }
}

impl FromStr for Contract {
    type Err = ParseError;

    /// Parse "PASS", "3C", "2NTX", "6DXX" (case-insensitive)
    fn from_str(s: &str) -> Result<Contract> {
        let upper = s.trim().to_ascii_uppercase();
        if upper == "PASS" {
            return Ok(Contract::PASSED_OUT);
        }
        let invalid = || ParseError::Contract(s.to_string());

        let body = upper.trim_end_matches('X');
        let doubled = Doubled::from_count(upper.len() - body.len()).ok_or_else(invalid)?;
        let mut chars = body.chars();
        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .filter(|level| (1..=7).contains(level))
            .ok_or_else(invalid)? as u8;
        let strain = chars.as_str().parse::<BiddingSuit>().map_err(|_| invalid())?;
        Ok(Contract::new(level, strain, doubled))
    }
}

/// Alert state and explanation attached to one call of the auction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BidMetadata {
    /// Zero-based index into the cleaned bidding record
    pub bid_index: usize,
    pub bid: String,
    pub alerted: bool,
    pub explanation: Option<String>,
}

impl BidMetadata {
    pub fn new(bid_index: usize, bid: impl Into<String>) -> Self {
        BidMetadata {
            bid_index,
            bid: bid.into(),
            alerted: false,
            explanation: None,
        }
    }
}

/// Where a piece of commentary belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentaryAnchor {
    /// Before any call was made
    BeforeAuction,
    /// After the call at this index of the bidding record
    Bid(usize),
    /// After the card at this index of the play record
    Play(usize),
}

/// Analyst commentary on a board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Commentary {
    pub anchor: CommentaryAnchor,
    pub comment: String,
}

/// How the score of a board is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreInput {
    /// Score given by the source record
    Supplied(i32),
    /// Compute the score from the contract and tricks; the flag is the
    /// declaring side's vulnerability
    DeclarerVulnerable(bool),
}

/// The record of one table's play of a deal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardRecord {
    /// Canonical calls
    pub bidding_record: Vec<String>,
    /// Calls and annotation tokens exactly as they appeared in the source
    pub raw_bidding_record: Vec<String>,
    /// Cards in the order they were played
    pub play_record: Vec<Card>,
    pub declarer: Direction,
    pub contract: Contract,
    /// Tricks won by declarer's side
    pub tricks: u8,
    pub scoring: Option<String>,
    pub names: BTreeMap<Direction, String>,
    pub date: Option<String>,
    pub event: Option<String>,
    pub bidding_metadata: Vec<BidMetadata>,
    pub commentary: Vec<Commentary>,
    /// Score from declarer's point of view
    pub score: i32,
    pub board_name: Option<String>,
}

impl BoardRecord {
    pub fn builder(declarer: Direction, contract: Contract, tricks: u8) -> BoardRecordBuilder {
        BoardRecordBuilder {
            bidding_record: Vec::new(),
            raw_bidding_record: Vec::new(),
            play_record: Vec::new(),
            declarer,
            contract,
            tricks,
            scoring: None,
            names: BTreeMap::new(),
            date: None,
            event: None,
            bidding_metadata: Vec::new(),
            commentary: Vec::new(),
            board_name: None,
        }
    }
}

/// Collects the parts of a [`BoardRecord`]; the score is settled in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct BoardRecordBuilder {
    bidding_record: Vec<String>,
    raw_bidding_record: Vec<String>,
    play_record: Vec<Card>,
    declarer: Direction,
    contract: Contract,
    tricks: u8,
    scoring: Option<String>,
    names: BTreeMap<Direction, String>,
    date: Option<String>,
    event: Option<String>,
    bidding_metadata: Vec<BidMetadata>,
    commentary: Vec<Commentary>,
    board_name: Option<String>,
}

impl BoardRecordBuilder {
    pub fn with_bidding(mut self, bidding_record: Vec<String>, raw: Vec<String>) -> Self {
        self.bidding_record = bidding_record;
        self.raw_bidding_record = raw;
        self
    }

    pub fn with_play(mut self, play_record: Vec<Card>) -> Self {
        self.play_record = play_record;
        self
    }

    pub fn with_scoring(mut self, scoring: Option<String>) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_names(mut self, names: BTreeMap<Direction, String>) -> Self {
        self.names = names;
        self
    }

    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    pub fn with_event(mut self, event: Option<String>) -> Self {
        self.event = event;
        self
    }

    pub fn with_bidding_metadata(mut self, bidding_metadata: Vec<BidMetadata>) -> Self {
        self.bidding_metadata = bidding_metadata;
        self
    }

    pub fn with_commentary(mut self, commentary: Vec<Commentary>) -> Self {
        self.commentary = commentary;
        self
    }

    pub fn with_board_name(mut self, board_name: Option<String>) -> Self {
        self.board_name = board_name;
        self
    }

    pub fn build(self, score: ScoreInput) -> BoardRecord {
        let score = match score {
            ScoreInput::Supplied(score) => score,
            ScoreInput::DeclarerVulnerable(vulnerable) => calculate_score(
                self.contract.level,
                self.contract.strain,
                self.contract.doubled,
                self.tricks,
                vulnerable,
            ),
        };
        BoardRecord {
            bidding_record: self.bidding_record,
            raw_bidding_record: self.raw_bidding_record,
            play_record: self.play_record,
            declarer: self.declarer,
            contract: self.contract,
            tricks: self.tricks,
            scoring: self.scoring,
            names: self.names,
            date: self.date,
            event: self.event,
            bidding_metadata: self.bidding_metadata,
            commentary: self.commentary,
            score,
            board_name: self.board_name,
        }
    }
}

/// A deal and every board record played on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealRecord {
    pub deal: Deal,
    pub board_records: Vec<BoardRecord>,
}

/// Group board records under their deal, keeping deals in first-seen order
pub fn group_by_deal<I>(records: I) -> Vec<DealRecord>
where
    I: IntoIterator<Item = (Deal, BoardRecord)>,
{
    let mut positions: HashMap<Deal, usize> = HashMap::new();
    let mut grouped: Vec<DealRecord> = Vec::new();
    for (deal, board_record) in records {
        match positions.get(&deal) {
            Some(&index) => grouped[index].board_records.push(board_record),
            None => {
                positions.insert(deal.clone(), grouped.len());
                grouped.push(DealRecord {
                    deal,
                    board_records: vec![board_record],
                });
            }
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_from_str() {
        assert_eq!(Contract::PASSED_OUT, "PASS".parse().unwrap());
        assert_eq!(
            Contract::new(3, BiddingSuit::Clubs, Doubled::Undoubled),
            "3C".parse().unwrap()
        );
        assert_eq!(
            Contract::new(2, BiddingSuit::NoTrump, Doubled::Doubled),
            "2NTX".parse().unwrap()
        );
        assert_eq!(
            Contract::new(6, BiddingSuit::Diamonds, Doubled::Redoubled),
            "6DXX".parse().unwrap()
        );
        assert_eq!(
            Contract::new(4, BiddingSuit::Spades, Doubled::Undoubled),
            "4s".parse().unwrap()
        );
    }

    #[test]
    fn test_contract_to_str() {
        assert_eq!(Contract::PASSED_OUT.to_string(), "PASS");
        assert_eq!(
            Contract::new(3, BiddingSuit::Clubs, Doubled::Undoubled).to_string(),
            "3C"
        );
        assert_eq!(
            Contract::new(3, BiddingSuit::NoTrump, Doubled::Redoubled).to_string(),
            "3NTXX"
        );
    }

    #[test]
    fn test_invalid_contract() {
        for bad in ["", "3", "3Z", "8H", "0C", "1HXXX", "X"] {
            assert!(bad.parse::<Contract>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_contract_string_round_trip() {
        let mut contracts = vec![Contract::PASSED_OUT];
        for level in 1..=7 {
            for strain in BiddingSuit::ALL {
                for doubled in [Doubled::Undoubled, Doubled::Doubled, Doubled::Redoubled] {
                    contracts.push(Contract::new(level, strain, doubled));
                }
            }
        }
        for contract in contracts {
            assert_eq!(contract, contract.to_string().parse().unwrap());
        }
    }

    #[test]
    fn test_contract_from_auction() {
        let auction = ["1NT", "PASS", "3NT", "PASS", "PASS", "PASS"];
        assert_eq!("3NT", Contract::from_auction(&auction).unwrap().to_string());

        let auction = ["1H", "X", "PASS", "PASS", "PASS"];
        assert_eq!("1HX", Contract::from_auction(&auction).unwrap().to_string());

        let auction = ["1H", "X", "XX", "PASS", "PASS", "PASS"];
        assert_eq!("1HXX", Contract::from_auction(&auction).unwrap().to_string());

        let auction = ["PASS", "PASS", "PASS", "PASS"];
        assert!(Contract::from_auction(&auction).unwrap().is_passed_out());

        assert!(Contract::from_auction(&["1C", "PASS", "PASS"]).is_err());
    }

    #[test]
    fn test_score_supplied_or_computed() {
        let contract: Contract = "4H".parse().unwrap();
        let computed = BoardRecord::builder(Direction::South, contract, 10)
            .build(ScoreInput::DeclarerVulnerable(true));
        assert_eq!(computed.score, 620);

        let supplied = BoardRecord::builder(Direction::South, contract, 10)
            .build(ScoreInput::Supplied(-100));
        assert_eq!(supplied.score, -100);
    }

    #[test]
    fn test_group_by_deal() {
        let deal_a = Deal::from_pbn(
            "N",
            "None",
            "N:K843.T542.J6.863 AQJ7.K.Q75.AT942 962.AJ7.KT82.J75 T5.Q9863.A943.KQ",
        )
        .unwrap();
        let deal_b = Deal::from_pbn(
            "E",
            "NS",
            "E:Q7.AKT9.JT3.JT96 J653.QJ8.A.AQ732 K92.654.K954.K84 AT84.732.Q8762.5",
        )
        .unwrap();
        let board = |tricks| {
            BoardRecord::builder(Direction::North, "3NT".parse().unwrap(), tricks)
                .build(ScoreInput::DeclarerVulnerable(false))
        };

        let grouped = group_by_deal(vec![
            (deal_a.clone(), board(9)),
            (deal_b.clone(), board(8)),
            (deal_a.clone(), board(10)),
        ]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].deal, deal_a);
        assert_eq!(grouped[0].board_records.len(), 2);
        assert_eq!(grouped[0].board_records[1].tricks, 10);
        assert_eq!(grouped[1].deal, deal_b);
    }
}
