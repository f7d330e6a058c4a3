//! LIN rendering.

use super::{dealer_to_lin, LIN_SEATS};
use crate::board::{BidMetadata, BoardRecord, Commentary, CommentaryAnchor};
use crate::card::Suit;
use crate::deal::Deal;
use std::collections::HashMap;
use std::fmt::Display;

const HANDVIEWER_URL: &str = "https://www.bridgebase.com/tools/handviewer.html?lin=";

/// Which kind of LIN record to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinType {
    /// Standalone record led by the player names (`pn`)
    #[default]
    Single,
    /// Session board led by its board id (`qx`)
    Multi,
}

/// Render a deal and one board played on it as a single-line LIN record
pub fn build_lin_str(deal: &Deal, board: &BoardRecord, lin_type: LinType) -> String {
    let mut lin = String::new();
    match lin_type {
        LinType::Single => {
            let names: Vec<String> = LIN_SEATS
                .iter()
                .map(|seat| {
                    board
                        .names
                        .get(seat)
                        .cloned()
                        .unwrap_or_else(|| seat.to_string())
                })
                .collect();
            push_node(&mut lin, "pn", names.join(","));
        }
        LinType::Multi => {
            push_node(&mut lin, "qx", board.board_name.as_deref().unwrap_or_default());
        }
    }

    let holdings: Vec<String> = LIN_SEATS
        .iter()
        .map(|&seat| {
            let hand = deal.hand(seat);
            Suit::DISPLAY_ORDER
                .iter()
                .map(|&suit| {
                    let ranks: String = hand.suit(suit).iter().map(|rank| rank.to_char()).collect();
                    format!("{}{}", suit.to_char(), ranks)
                })
                .collect()
        })
        .collect();
    push_node(&mut lin, "st", "");
    push_node(
        &mut lin,
        "md",
        format!("{}{}", dealer_to_lin(deal.dealer), holdings.join(",")),
    );

    if let Some(number) = board.board_name.as_deref().and_then(board_number) {
        push_node(&mut lin, "ah", format!("Board {}", number));
    }
    push_node(&mut lin, "sv", vulnerability_code(deal));

    write_bidding(&mut lin, board);
    write_play(&mut lin, board);
    push_node(&mut lin, "pg", "");
    lin
}

/// BBO handviewer URL showing the board
pub fn build_lin_url(deal: &Deal, board: &BoardRecord) -> String {
    let lin = build_lin_str(deal, board, LinType::Single);
    format!("{}{}", HANDVIEWER_URL, form_urlencode(&lin))
}

fn vulnerability_code(deal: &Deal) -> char {
    match (deal.ns_vulnerable, deal.ew_vulnerable) {
        (true, true) => 'b',
        (false, true) => 'e',
        (true, false) => 'n',
        (false, false) => 'o',
    }
}

/// First run of digits in a board name ("Board 15" -> "15")
fn board_number(board_name: &str) -> Option<&str> {
    let start = board_name.find(|c: char| c.is_ascii_digit())?;
    let digits = &board_name[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    Some(&digits[..end])
}

/// LIN spelling of a canonical call
fn lin_bid(bid: &str) -> String {
    match bid {
        "PASS" => "p".to_string(),
        "X" => "d".to_string(),
        "XX" => "r".to_string(),
        _ => bid.replace("NT", "N"),
    }
}

/// Append one `key|value|` node
fn push_node(lin: &mut String, key: &str, value: impl Display) {
    lin.push_str(key);
    lin.push('|');
    lin.push_str(&value.to_string());
    lin.push('|');
}

fn write_commentary<'a>(lin: &mut String, commentary: impl Iterator<Item = &'a Commentary>) {
    for comment in commentary {
        push_node(lin, "nt", &comment.comment);
    }
}

fn anchored(board: &BoardRecord, anchor: CommentaryAnchor) -> impl Iterator<Item = &Commentary> {
    board.commentary.iter().filter(move |c| c.anchor == anchor)
}

fn write_bidding(lin: &mut String, board: &BoardRecord) {
    let metadata: HashMap<usize, &BidMetadata> = board
        .bidding_metadata
        .iter()
        .map(|m| (m.bid_index, m))
        .collect();

    write_commentary(lin, anchored(board, CommentaryAnchor::BeforeAuction));
    for (bid_index, bid) in board.bidding_record.iter().enumerate() {
        let mut call = lin_bid(bid);
        let mut explanation = None;
        if let Some(m) = metadata.get(&bid_index) {
            if m.alerted {
                call.push('!');
            }
            explanation = m.explanation.as_deref();
        }
        push_node(lin, "mb", call);
        if let Some(explanation) = explanation {
            push_node(lin, "an", explanation);
        }
        write_commentary(lin, anchored(board, CommentaryAnchor::Bid(bid_index)));
    }
    push_node(lin, "pg", "");
}

/// Cards four to a trick; a claim closes an unfinished play
fn write_play(lin: &mut String, board: &BoardRecord) {
    for (card_index, card) in board.play_record.iter().enumerate() {
        push_node(lin, "pc", card);
        write_commentary(lin, anchored(board, CommentaryAnchor::Play(card_index)));
        if card_index % 4 == 3 {
            push_node(lin, "pg", "");
        }
    }
    if board.play_record.len() < 52 {
        push_node(lin, "mc", board.tricks);
    }
}

/// `application/x-www-form-urlencoded` escaping: spaces become `+`
fn form_urlencode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'~' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
