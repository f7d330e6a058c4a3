//! LIN record reader.

use super::{dealer_from_lin, LIN_SEATS};
use crate::bids::canonicalize_bid;
use crate::board::{
    group_by_deal, BidMetadata, BoardRecord, Commentary, CommentaryAnchor, Contract, DealRecord,
    ScoreInput,
};
use crate::card::{Card, Direction, Rank, Suit};
use crate::deal::Deal;
use crate::error::{ParseError, Result};
use crate::play::{count_declarer_tricks, determine_declarer};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Every node of one LIN record, accumulated in a single pass.
///
/// Values are kept per key in the order they appeared. Bid explanations
/// (`an`) are keyed by the index of the bid they follow, and commentary
/// (`nt`) is anchored to the last card played, or failing that the last bid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinNodes {
    values: HashMap<String, Vec<String>>,
    explanations: BTreeMap<usize, String>,
    commentary: Vec<Commentary>,
}

impl LinNodes {
    /// Split a single-line LIN record into its nodes
    pub fn parse(lin: &str) -> Result<LinNodes> {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        let mut explanations = BTreeMap::new();
        let mut commentary = Vec::new();

        let mut rest = lin;
        while !rest.trim().is_empty() {
            let mut parts = rest.splitn(3, '|');
            let key = parts.next().unwrap_or_default().trim();
            let (value, remainder) = match (parts.next(), parts.next()) {
                (Some(value), Some(remainder)) => (value, remainder),
                _ => {
                    return Err(ParseError::Lin(format!(
                        "unterminated node '{}'",
                        rest.trim()
                    )))
                }
            };
            rest = remainder;

            let last_bid = values.get("mb").map_or(0, Vec::len).checked_sub(1);
            let last_card = values.get("pc").map_or(0, Vec::len).checked_sub(1);
            match key {
                "an" => match last_bid {
                    Some(bid_index) => {
                        explanations.insert(bid_index, value.to_string());
                    }
                    None => log::debug!("ignoring explanation before first bid: {}", value),
                },
                "nt" => {
                    let anchor = match (last_card, last_bid) {
                        (Some(card_index), _) => CommentaryAnchor::Play(card_index),
                        (None, Some(bid_index)) => CommentaryAnchor::Bid(bid_index),
                        (None, None) => CommentaryAnchor::BeforeAuction,
                    };
                    commentary.push(Commentary {
                        anchor,
                        comment: value.to_string(),
                    });
                }
                _ => values
                    .entry(key.to_string())
                    .or_default()
                    .push(value.to_string()),
            }
        }

        Ok(LinNodes {
            values,
            explanations,
            commentary,
        })
    }

    /// All values seen for `key`, in order
    pub fn get(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first value seen for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Bid explanations keyed by bid index
    pub fn explanations(&self) -> &BTreeMap<usize, String> {
        &self.explanations
    }

    pub fn commentary(&self) -> &[Commentary] {
        &self.commentary
    }

    /// Replace every value of `key`, as when a session header supplies the players
    pub fn with_values(mut self, key: &str, values: Vec<String>) -> Self {
        self.values.insert(key.to_string(), values);
        self
    }

    /// Dealer, vulnerability and hands from the `md` and `sv` nodes
    pub fn deal(&self) -> Result<Deal> {
        let md = self
            .first("md")
            .ok_or_else(|| ParseError::Lin("missing md node".to_string()))?;
        let sv = self
            .first("sv")
            .ok_or_else(|| ParseError::Lin("missing sv node".to_string()))?;
        let (ns_vulnerable, ew_vulnerable) = parse_sv(sv)?;

        let mut chars = md.chars();
        let dealer = chars
            .next()
            .and_then(dealer_from_lin)
            .ok_or_else(|| ParseError::Lin(format!("invalid dealer in md '{}'", md)))?;
        let player_cards = parse_holdings(chars.as_str())?;
        Deal::from_cards(dealer, ns_vulnerable, ew_vulnerable, player_cards)
    }

    /// The board played at this table on `deal`
    pub fn board_record(&self, deal: &Deal) -> Result<BoardRecord> {
        let raw_bidding_record = self.get("mb").to_vec();
        let (bidding_record, bidding_metadata) =
            parse_bidding_record(&raw_bidding_record, &self.explanations)?;
        let contract = Contract::from_auction(&bidding_record)?;

        let play_record = self
            .get("pc")
            .iter()
            .map(|card| card.parse::<Card>())
            .collect::<Result<Vec<Card>>>()?;
        let declarer = determine_declarer(&play_record, &bidding_record, deal)?;
        let claim = self
            .first("mc")
            .map(|mc| {
                mc.trim()
                    .parse::<u8>()
                    .map_err(|_| ParseError::Lin(format!("invalid claim '{}'", mc)))
            })
            .transpose()?;
        let tricks = count_declarer_tricks(&contract, claim, declarer, &play_record)?;

        Ok(BoardRecord::builder(declarer, contract, tricks)
            .with_bidding(bidding_record, raw_bidding_record)
            .with_play(play_record)
            .with_names(self.player_names())
            .with_bidding_metadata(bidding_metadata)
            .with_commentary(self.commentary.clone())
            .with_board_name(self.board_name())
            .build(ScoreInput::DeclarerVulnerable(deal.is_vulnerable(declarer))))
    }

    /// Seat names from `pn`, South first and clockwise.
    ///
    /// Vugraph sessions list eight names, open room then closed room. The
    /// first four are used when the trailing four are placeholder seat names
    /// or the board id (`qx`) is an open-room board (`o…`).
    fn player_names(&self) -> BTreeMap<Direction, String> {
        let Some(pn) = self.first("pn") else {
            return BTreeMap::new();
        };
        let names: Vec<&str> = pn.split(',').collect();
        let names = match self.first("qx") {
            Some(qx) if names.len() > 4 => {
                let placeholders = names[4..].starts_with(&["South", "West", "North", "East"]);
                if placeholders || qx.starts_with('o') {
                    &names[..4]
                } else {
                    &names[4..names.len().min(8)]
                }
            }
            _ => &names[..],
        };
        LIN_SEATS
            .iter()
            .zip(names)
            .map(|(&seat, name)| (seat, name.to_string()))
            .collect()
    }

    /// Board header (`ah`) or, failing that, board id (`qx`)
    fn board_name(&self) -> Option<String> {
        self.first("ah")
            .map(|ah| ah.replace('+', " "))
            .or_else(|| self.first("qx").map(str::to_string))
    }
}

/// Vulnerability flags (ns, ew) from an `sv` code
fn parse_sv(sv: &str) -> Result<(bool, bool)> {
    match sv.trim().to_lowercase().as_str() {
        "o" | "0" | "-" => Ok((false, false)),
        "n" | "ns" => Ok((true, false)),
        "e" | "ew" => Ok((false, true)),
        "b" | "both" | "all" => Ok((true, true)),
        _ => Err(ParseError::Record(format!("unknown vulnerability '{}'", sv))),
    }
}

/// Cards of each seat (N, E, S, W) from the holdings part of `md`.
///
/// Holdings are listed South, West, North, East. A single missing holding is
/// the rest of the deck.
fn parse_holdings(holdings: &str) -> Result<[Vec<Card>; 4]> {
    let holdings: Vec<&str> = holdings.split(',').collect();
    if holdings.len() > 4 {
        return Err(ParseError::Lin(format!(
            "expected at most 4 holdings, found {}",
            holdings.len()
        )));
    }

    let mut player_cards: [Vec<Card>; 4] = Default::default();
    let mut missing = Vec::new();
    for (position, &seat) in LIN_SEATS.iter().enumerate() {
        match holdings.get(position).map(|h| h.trim()) {
            Some(holding) if !holding.is_empty() => {
                player_cards[seat.index()] = parse_lin_hand(holding)?;
            }
            _ => missing.push(seat),
        }
    }

    if let [seat] = missing[..] {
        let dealt: Vec<Card> = player_cards.iter().flatten().copied().collect();
        player_cards[seat.index()] = Card::deck().filter(|card| !dealt.contains(card)).collect();
    }
    Ok(player_cards)
}

/// Cards of one holding such as `SAKQHJT9D8765C432`
fn parse_lin_hand(holding: &str) -> Result<Vec<Card>> {
    let mut cards = Vec::with_capacity(13);
    let mut suit: Option<Suit> = None;
    for c in holding.chars() {
        if let Some(next) = Suit::from_char(c) {
            suit = Some(next);
            continue;
        }
        match (suit, Rank::from_char(c)) {
            (Some(suit), Some(rank)) => cards.push(Card::new(suit, rank)),
            _ => return Err(ParseError::Card(format!("'{}' in holding '{}'", c, holding))),
        }
    }
    Ok(cards)
}

/// Canonical calls plus metadata for every alerted or explained call
fn parse_bidding_record(
    raw_bidding_record: &[String],
    explanations: &BTreeMap<usize, String>,
) -> Result<(Vec<String>, Vec<BidMetadata>)> {
    let mut bidding_record = Vec::with_capacity(raw_bidding_record.len());
    let mut bidding_metadata = Vec::new();
    for (bid_index, raw) in raw_bidding_record.iter().enumerate() {
        let bid = canonicalize_bid(raw).ok_or_else(|| ParseError::Bid(raw.clone()))?;
        bidding_record.push(bid.to_string());

        let alerted = raw.contains('!');
        let explanation = explanations.get(&bid_index).cloned();
        if alerted || explanation.is_some() {
            bidding_metadata.push(BidMetadata {
                bid_index,
                bid: bid.to_string(),
                alerted,
                explanation,
            });
        }
    }
    Ok((bidding_record, bidding_metadata))
}

/// Parse one single-line LIN record
pub fn parse_lin(lin: &str) -> Result<(Deal, BoardRecord)> {
    let nodes = LinNodes::parse(lin)?;
    let deal = nodes.deal()?;
    let board_record = nodes.board_record(&deal)?;
    Ok((deal, board_record))
}

/// Parse board-per-line LIN content, grouping boards by deal.
///
/// Lines that fail to parse are logged and skipped.
pub fn parse_lin_str(content: &str) -> Vec<DealRecord> {
    let records = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_lin(line) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Malformed record {}: {}", line, e);
                None
            }
        });
    group_by_deal(records)
}

/// Read a board-per-line LIN file
pub fn parse_lin_file(path: &Path) -> Result<Vec<DealRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_lin_str(&content))
}

/// Parse a multi-board session.
///
/// The header runs until a line that leaves the accumulated text ending in
/// `|pg||`; its player names apply to every board. Each board starts on a
/// line beginning `qx`. Boards that fail to parse are logged and skipped; a
/// missing header fails the whole session.
pub fn parse_multi_lin_str(content: &str) -> Result<Vec<DealRecord>> {
    let mut lines = content.lines();
    let mut header = String::new();
    loop {
        match lines.next() {
            Some(line) => {
                header.push_str(line);
                if header.ends_with("|pg||") {
                    break;
                }
            }
            None => return Err(ParseError::Lin("invalid multi-board header".to_string())),
        }
    }
    let header = LinNodes::parse(&header)?;
    let header_names = header.get("pn").to_vec();

    let mut boards: Vec<String> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with("qx") {
            boards.push(String::new());
        }
        match boards.last_mut() {
            Some(board) => board.push_str(line),
            None => log::warn!("Ignoring line before first board: {}", line),
        }
    }

    let records = boards.iter().filter_map(|board| {
        let parsed = LinNodes::parse(board).and_then(|nodes| {
            let nodes = if header_names.is_empty() {
                nodes
            } else {
                nodes.with_values("pn", header_names.clone())
            };
            let deal = nodes.deal()?;
            let board_record = nodes.board_record(&deal)?;
            Ok((deal, board_record))
        });
        match parsed {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Malformed record {}: {}", board, e);
                None
            }
        }
    });
    Ok(group_by_deal(records))
}

/// Read a multi-board session LIN file
pub fn parse_multi_lin_file(path: &Path) -> Result<Vec<DealRecord>> {
    let content = std::fs::read_to_string(path)?;
    parse_multi_lin_str(&content)
}
