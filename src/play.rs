//! Trick evaluation and declarer/trick inference from the play.

use crate::board::Contract;
use crate::card::{BiddingSuit, Card, Direction, Suit};
use crate::deal::Deal;
use crate::error::{ParseError, Result};

const TRUMP_BONUS: i32 = 100;
const DISCARD_PENALTY: i32 = 100;

/// Score a card's ability to win a trick. Within one trick the card with the
/// highest score wins: trumps beat everything, discards lose to everything.
pub fn evaluate_card(trump: BiddingSuit, suit_led: Suit, card: Card) -> i32 {
    let score = i32::from(card.rank.value());
    if Some(card.suit) == trump.to_suit() {
        score + TRUMP_BONUS
    } else if card.suit != suit_led {
        score - DISCARD_PENALTY
    } else {
        score
    }
}

/// Index of the winning card of a trick; the first card sets the suit led
pub fn trick_winner(trump: BiddingSuit, trick: &[Card]) -> Option<usize> {
    let suit_led = trick.first()?.suit;
    trick
        .iter()
        .enumerate()
        .max_by_key(|(_, &card)| evaluate_card(trump, suit_led, card))
        .map(|(index, _)| index)
}

/// True for a bidding record of four passes
pub fn is_passed_out<S: AsRef<str>>(bidding_record: &[S]) -> bool {
    bidding_record.len() == 4 && bidding_record.iter().all(|bid| bid.as_ref() == "PASS")
}

/// Work out who declared the board.
///
/// A passed-out board is "declared" by the dealer. Otherwise the opening
/// lead comes from declarer's left-hand opponent, so declarer sits to the
/// right of whoever held the first card played.
pub fn determine_declarer<S: AsRef<str>>(
    play_record: &[Card],
    bidding_record: &[S],
    deal: &Deal,
) -> Result<Direction> {
    if is_passed_out(bidding_record) {
        return Ok(deal.dealer);
    }
    let opening_lead = play_record
        .first()
        .ok_or_else(|| ParseError::Record("missing play record".to_string()))?;
    let leader = deal.holder_of(*opening_lead).ok_or_else(|| {
        ParseError::Record(format!("opening lead {} is not in any hand", opening_lead))
    })?;
    Ok(leader.previous())
}

/// Number of tricks won by declarer's side.
///
/// A claim, when present, is taken as-is. Without one the full 52-card play
/// is replayed trick by trick.
pub fn count_declarer_tricks(
    contract: &Contract,
    claim: Option<u8>,
    declarer: Direction,
    play_record: &[Card],
) -> Result<u8> {
    let trump = match contract.strain {
        Some(strain) if !contract.is_passed_out() => strain,
        _ => return Ok(0),
    };
    if let Some(tricks) = claim {
        return Ok(tricks);
    }
    if play_record.len() != 52 {
        return Err(ParseError::Record(format!(
            "not enough cards played: {}",
            play_record.len()
        )));
    }

    let mut on_lead = declarer.next();
    let mut declarer_tricks = 0;
    for trick in play_record.chunks(4) {
        let winner = trick_winner(trump, trick).unwrap_or(0);
        on_lead = on_lead.offset(winner);
        if on_lead.same_side(declarer) {
            declarer_tricks += 1;
        }
    }
    Ok(declarer_tricks)
}
