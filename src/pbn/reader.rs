//! PBN file reader.

use crate::bids::canonicalize_bid;
use crate::board::{
    group_by_deal, BidMetadata, BoardRecord, Commentary, CommentaryAnchor, Contract, DealRecord,
    ScoreInput,
};
use crate::card::{Card, Direction};
use crate::deal::Deal;
use crate::error::{ParseError, Result};
use crate::play::{determine_declarer, trick_winner};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// A parsed PBN tag pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub name: String,
    pub value: String,
}

/// Parse a tag pair from a line: [TagName "value"]
fn parse_tag_pair(line: &str) -> Option<TagPair> {
    let line = line.trim();
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();

    let (name, rest) = inner.split_once(char::is_whitespace)?;
    let value = rest.trim().replace('"', "");
    Some(TagPair {
        name: name.to_string(),
        value,
    })
}

/// Part of a record a piece of commentary appeared in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Auction,
    Play,
}

/// Every tag and block of one PBN record, accumulated in a single pass.
///
/// `Note` tags (`"N:text"`) are stored under `Note_N`. The `Auction` block
/// keeps its raw tokens and the `Play` block keeps one row of columns per
/// trick, both ending at the next tag, commentary, or `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PbnRecord {
    tags: HashMap<String, String>,
    auction: Vec<String>,
    play: Vec<Vec<String>>,
    /// Comments with the section they appeared in and how many auction
    /// tokens or play rows preceded them
    commentary: Vec<(Section, usize, String)>,
}

impl PbnRecord {
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> PbnRecord {
        let lines: Vec<&str> = lines.iter().map(|line| line.as_ref().trim()).collect();
        let mut tags: HashMap<String, String> = HashMap::new();
        let mut auction = Vec::new();
        let mut play = Vec::new();
        let mut commentary = Vec::new();
        let mut section = Section::Header;

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];

            if line.starts_with('{') {
                let (text, next) = read_comment(&lines, i);
                let offset = match section {
                    Section::Header => 0,
                    Section::Auction => auction.len(),
                    Section::Play => play.len(),
                };
                commentary.push((section, offset, text));
                i = next;
                continue;
            }

            if !line.starts_with('[') {
                i += 1;
                continue;
            }

            // A tag without its closing bracket continues on the following lines
            let mut tag_text = line.to_string();
            while !tag_text.contains(']') && i + 1 < lines.len() {
                i += 1;
                tag_text.push(' ');
                tag_text.push_str(lines[i]);
            }
            i += 1;

            let Some(tag) = parse_tag_pair(&tag_text) else {
                log::debug!("Skipping malformed tag {}", tag_text);
                continue;
            };
            let TagPair { name, value } = tag;
            let note = (name == "Note")
                .then(|| value.split_once(':'))
                .flatten()
                .map(|(number, text)| (format!("Note_{}", number.trim()), text.to_string()));
            let (name, value) = note.unwrap_or((name, value));

            match name.as_str() {
                "Auction" => {
                    section = Section::Auction;
                    while i < lines.len() {
                        if lines[i].starts_with('{') {
                            let (text, next) = read_comment(&lines, i);
                            commentary.push((section, auction.len(), text));
                            i = next;
                            continue;
                        }
                        if ends_block(lines[i]) {
                            break;
                        }
                        auction.extend(
                            lines[i]
                                .split_whitespace()
                                .filter(|token| *token != "*")
                                .map(str::to_string),
                        );
                        i += 1;
                    }
                }
                "Play" => {
                    section = Section::Play;
                    while i < lines.len() {
                        if lines[i].starts_with('{') {
                            let (text, next) = read_comment(&lines, i);
                            commentary.push((section, play.len(), text));
                            i = next;
                            continue;
                        }
                        if ends_block(lines[i]) {
                            break;
                        }
                        let row: Vec<String> =
                            lines[i].split_whitespace().map(str::to_string).collect();
                        if !row.is_empty() {
                            play.push(row);
                        }
                        i += 1;
                    }
                }
                _ => {}
            }

            // Notes attached to the play never replace the auction's notes
            if section == Section::Play && name.starts_with("Note_") && tags.contains_key(&name) {
                continue;
            }
            tags.insert(name, value);
        }

        PbnRecord {
            tags,
            auction,
            play,
            commentary,
        }
    }

    /// Value of a tag; empty values count as absent
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Raw tokens of the `Auction` block
    pub fn auction(&self) -> &[String] {
        &self.auction
    }

    /// Rows of the `Play` block, one per trick, columns starting at the leader
    pub fn play(&self) -> &[Vec<String>] {
        &self.play
    }

    /// The deal from the `Dealer`, `Vulnerable` and `Deal` tags, or `None` if any is missing
    pub fn deal(&self) -> Result<Option<Deal>> {
        match (self.tag("Dealer"), self.tag("Vulnerable"), self.tag("Deal")) {
            (Some(dealer), Some(vulnerability), Some(deal)) => {
                Deal::from_pbn(dealer, vulnerability, deal).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// The board played at this table on `deal`
    pub fn board_record(&self, deal: &Deal) -> Result<BoardRecord> {
        let contract_str = self
            .tag("Contract")
            .ok_or_else(|| ParseError::Pbn("missing contract".to_string()))?;
        let contract: Contract = contract_str.parse()?;

        let (bidding_record, bidding_metadata) = parse_auction(&self.auction, &self.tags);
        let play_record = sort_play_record(&self.play, contract_str);

        let declarer = match self.tag("Declarer") {
            Some(declarer) => declarer
                .chars()
                .next()
                .and_then(Direction::from_char)
                .ok_or_else(|| ParseError::Pbn(format!("invalid declarer '{}'", declarer)))?,
            None if contract.is_passed_out() => deal.dealer,
            None => determine_declarer(&play_record, &bidding_record, deal)?,
        };

        let tricks = match self.tag("Result") {
            Some(result) => result
                .parse::<u8>()
                .map_err(|_| ParseError::Pbn(format!("invalid result '{}'", result)))?,
            None if contract.is_passed_out() => 0,
            None => return Err(ParseError::Pbn("missing tricks result".to_string())),
        };

        let names: BTreeMap<Direction, String> = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                self.tag(&direction.to_string())
                    .map(|name| (direction, name.to_string()))
            })
            .collect();
        let commentary = self.anchored_commentary(bidding_record.len(), play_record.len());
        let owned = |name: &str| self.tag(name).map(str::to_string);

        Ok(BoardRecord::builder(declarer, contract, tricks)
            .with_bidding(bidding_record, self.auction.clone())
            .with_play(play_record)
            .with_scoring(owned("Scoring"))
            .with_names(names)
            .with_date(owned("Date"))
            .with_event(owned("Event"))
            .with_bidding_metadata(bidding_metadata)
            .with_commentary(commentary)
            .with_board_name(owned("Board"))
            .build(ScoreInput::DeclarerVulnerable(deal.is_vulnerable(declarer))))
    }

    /// Anchor each comment after the last call or card read before it.
    ///
    /// `bids` and `cards` are the lengths of the whole bidding and play
    /// records. A comment in the play falls back to the last call when no
    /// card precedes it or the play could not be ordered.
    fn anchored_commentary(&self, bids: usize, cards: usize) -> Vec<Commentary> {
        let after_bid = |count: usize| {
            count
                .checked_sub(1)
                .map_or(CommentaryAnchor::BeforeAuction, CommentaryAnchor::Bid)
        };
        self.commentary
            .iter()
            .map(|(section, offset, comment)| {
                let anchor = match section {
                    Section::Header => CommentaryAnchor::BeforeAuction,
                    Section::Auction => {
                        let (calls, _) = parse_auction(&self.auction[..*offset], &self.tags);
                        after_bid(calls.len())
                    }
                    Section::Play => {
                        let played: usize = self.play[..*offset]
                            .iter()
                            .map(|row| {
                                row.iter()
                                    .take(4)
                                    .filter(|token| !matches!(token.as_str(), "-" | "--"))
                                    .count()
                            })
                            .sum();
                        match played.min(cards).checked_sub(1) {
                            Some(card_index) => CommentaryAnchor::Play(card_index),
                            None => after_bid(bids),
                        }
                    }
                };
                Commentary {
                    anchor,
                    comment: comment.clone(),
                }
            })
            .collect()
    }
}

fn ends_block(line: &str) -> bool {
    line.contains('[') || line == "*"
}

/// Read a `{...}` comment starting at `lines[start]`.
///
/// The comment ends at the line holding its closing brace, or before the
/// next tag line if the brace never closes. Returns the text without its
/// outer braces, lines joined with a space, and the index after it.
fn read_comment(lines: &[&str], start: usize) -> (String, usize) {
    let mut text = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if i > start && line.starts_with('[') {
            break;
        }
        text.push(line);
        i += 1;
        if line.contains('}') {
            break;
        }
    }
    let text = text.join(" ");
    let text = text.trim();
    let text = text.strip_prefix('{').unwrap_or(text);
    let text = text.strip_suffix('}').unwrap_or(text);
    (text.trim().to_string(), i)
}

/// Canonical calls from an `Auction` block, folding annotations into metadata.
///
/// `AP` closes the auction with three passes. Any other token that is not a
/// call annotates the call before it: `!` alerts it, `=N=` names the note
/// `Note_N` as its explanation, and anything else is the explanation itself.
/// Several explanations on one call are joined with `" | "`.
pub fn parse_auction(
    raw_bidding_record: &[String],
    tags: &HashMap<String, String>,
) -> (Vec<String>, Vec<BidMetadata>) {
    let mut bidding_record: Vec<String> = Vec::new();
    let mut bidding_metadata: Vec<BidMetadata> = Vec::new();

    for raw in raw_bidding_record {
        if let Some(bid) = canonicalize_bid(raw) {
            bidding_record.push(bid.to_string());
            continue;
        }
        if raw.eq_ignore_ascii_case("AP") {
            bidding_record.extend(std::iter::repeat("PASS".to_string()).take(3));
            continue;
        }

        let Some(last_bid) = bidding_record.last() else {
            log::debug!("Ignoring annotation before first call: {}", raw);
            continue;
        };
        let bid_index = bidding_record.len() - 1;
        if bidding_metadata.last().map(|m| m.bid_index) != Some(bid_index) {
            bidding_metadata.push(BidMetadata::new(bid_index, last_bid.clone()));
        }
        let Some(metadata) = bidding_metadata.last_mut() else {
            continue;
        };

        if raw == "!" {
            metadata.alerted = true;
            continue;
        }
        let explanation = note_number(raw)
            .and_then(|number| tags.get(&format!("Note_{}", number)))
            .cloned()
            .unwrap_or_else(|| raw.clone());
        metadata.explanation = Some(match metadata.explanation.take() {
            Some(previous) => format!("{} | {}", previous, explanation),
            None => explanation,
        });
    }
    (bidding_record, bidding_metadata)
}

/// The number in a note reference such as `=3=`
fn note_number(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('=')?;
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if digits == 0 || !rest[digits..].starts_with('=') {
        return None;
    }
    Some(&rest[..digits])
}

/// Put the cards of a `Play` block into the order they were played.
///
/// Rows list each trick by seat, starting with the seat that led the first
/// trick; the winner of each full trick leads the next, so reading starts
/// from the winner's column. `-` and `--` mark a seat that played no card.
/// An empty, unparseable or passed-out contract, or a malformed row, gives
/// an empty play record.
pub fn sort_play_record<S: AsRef<str>>(tricks: &[Vec<S>], contract: &str) -> Vec<Card> {
    if contract.trim().is_empty() {
        log::warn!("Empty contract, cannot determine play ordering");
        return Vec::new();
    }
    let trump = match contract.parse::<Contract>() {
        Ok(contract) => match contract.strain {
            Some(strain) if !contract.is_passed_out() => strain,
            _ => return Vec::new(),
        },
        Err(e) => {
            log::warn!("Cannot determine play ordering: {}", e);
            return Vec::new();
        }
    };

    let mut play_record = Vec::new();
    let mut on_lead = 0;
    for row in tricks {
        let mut trick = Vec::with_capacity(4);
        for offset in 0..4 {
            let Some(token) = row.get((on_lead + offset) % 4).map(|t| t.as_ref()) else {
                log::warn!("Malformed play record: trick has {} cards", row.len());
                return Vec::new();
            };
            if token == "-" || token == "--" {
                continue;
            }
            match token.parse::<Card>() {
                Ok(card) => trick.push(card),
                Err(e) => {
                    log::warn!("Malformed play record: {}", e);
                    return Vec::new();
                }
            }
        }
        if trick.len() == 4 {
            on_lead = (on_lead + trick_winner(trump, &trick).unwrap_or(0)) % 4;
        }
        play_record.extend(trick);
    }
    play_record
}

/// Parse one PBN record.
///
/// A record without all of `Dealer`, `Vulnerable` and `Deal` is played on
/// `previous`, and fails if there is none.
pub fn parse_pbn_record<S: AsRef<str>>(
    lines: &[S],
    previous: Option<&Deal>,
) -> Result<(Deal, BoardRecord)> {
    let record = PbnRecord::parse(lines);
    let deal = match (record.deal()?, previous) {
        (Some(deal), _) => deal,
        (None, Some(previous)) => previous.clone(),
        (None, None) => {
            return Err(ParseError::Pbn(
                "missing deal fields and no previous deal".to_string(),
            ))
        }
    };
    let board_record = record.board_record(&deal)?;
    Ok((deal, board_record))
}

/// Split PBN content into records on blank lines
fn split_records(content: &str) -> Vec<Vec<&str>> {
    let mut records = Vec::new();
    let mut current = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        records.push(current);
    }
    records
}

/// Parse every record of PBN content, grouping boards by deal.
///
/// Records that fail to parse are logged and skipped.
pub fn parse_pbn_str(content: &str) -> Vec<DealRecord> {
    let mut previous: Option<Deal> = None;
    let mut records = Vec::new();
    for lines in split_records(content) {
        match parse_pbn_record(&lines, previous.as_ref()) {
            Ok((deal, board_record)) => {
                previous = Some(deal.clone());
                records.push((deal, board_record));
            }
            Err(e) => log::warn!("Malformed record {:?}: {}", lines, e),
        }
    }
    group_by_deal(records)
}

/// Read boards from a PBN file
pub fn parse_pbn_file(path: &Path) -> Result<Vec<DealRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_pbn_str(&content))
}
