//! Fixed-width binary encoding of a deal.
//!
//! A deal packs into 14 big-endian bytes: two bits per card naming the seat
//! that holds it (cards in ascending suit-then-rank order, first card in the
//! most significant position), then two bits of dealer and one bit each for
//! North-South and East-West vulnerability. The 108 used bits are
//! right-aligned in the 112 available.

use crate::card::{Card, Direction};
use crate::deal::Deal;
use crate::error::Result;

/// Encoded size of a deal in bytes
pub const DEAL_BYTES: usize = 14;

/// Pack a deal into its 14-byte form
pub fn serialize_deal(deal: &Deal) -> [u8; DEAL_BYTES] {
    let mut packed: u128 = 0;
    for card in Card::deck() {
        // Every card of a well-formed deal has a holder; a missing card packs as North.
        let holder = deal.holder_of(card).unwrap_or(Direction::North);
        packed = (packed << 2) | holder.index() as u128;
    }
    packed = (packed << 2) | deal.dealer.index() as u128;
    packed = (packed << 1) | u128::from(deal.ns_vulnerable);
    packed = (packed << 1) | u128::from(deal.ew_vulnerable);

    let wide = packed.to_be_bytes();
    let mut bytes = [0u8; DEAL_BYTES];
    bytes.copy_from_slice(&wide[wide.len() - DEAL_BYTES..]);
    bytes
}

/// Unpack a deal from its 14-byte form.
///
/// Fails only if the bytes do not give every seat exactly 13 cards.
pub fn deserialize_deal(bytes: &[u8; DEAL_BYTES]) -> Result<Deal> {
    let mut wide = [0u8; 16];
    wide[16 - DEAL_BYTES..].copy_from_slice(bytes);
    let mut packed = u128::from_be_bytes(wide);

    let ew_vulnerable = packed & 1 == 1;
    let ns_vulnerable = packed & 2 == 2;
    packed >>= 2;
    let dealer = Direction::from_index((packed & 3) as usize);
    packed >>= 2;

    let mut player_cards: [Vec<Card>; 4] = Default::default();
    let mut deck: Vec<Card> = Card::deck().collect();
    deck.reverse();
    for card in deck {
        player_cards[(packed & 3) as usize].push(card);
        packed >>= 2;
    }

    Deal::from_cards(dealer, ns_vulnerable, ew_vulnerable, player_cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::PlayerHand;

    fn test_deal() -> Deal {
        let north = PlayerHand::from_string_lists(
            &["9", "8", "6", "4"],
            &["K", "Q", "7", "6", "3"],
            &["A", "K"],
            &["7", "3"],
        )
        .unwrap();
        let east = PlayerHand::from_string_lists(
            &["2"],
            &["J", "10", "8", "5", "2"],
            &["Q", "8", "7", "4", "3"],
            &["A", "10"],
        )
        .unwrap();
        let south = PlayerHand::from_string_lists(
            &["A", "K", "Q", "5"],
            &["A", "9", "4"],
            &["J", "5", "2"],
            &["K", "8", "4"],
        )
        .unwrap();
        let west = PlayerHand::from_string_lists(
            &["J", "10", "7", "3"],
            &[],
            &["10", "9", "6"],
            &["Q", "J", "9", "6", "5", "2"],
        )
        .unwrap();
        Deal::new(Direction::East, true, false, [north, east, south, west])
    }

    #[test]
    fn test_serialize_then_deserialize() {
        let deal = test_deal();
        let bytes = serialize_deal(&deal);
        assert_eq!(deserialize_deal(&bytes).unwrap(), deal);
    }

    #[test]
    fn test_round_trip_every_dealer_and_vulnerability() {
        let base = test_deal();
        for dealer in Direction::ALL {
            for (ns, ew) in [(false, false), (true, false), (false, true), (true, true)] {
                let player_cards = Direction::ALL.map(|d| base.player_cards(d));
                let deal = Deal::from_cards(dealer, ns, ew, player_cards).unwrap();
                assert_eq!(deserialize_deal(&serialize_deal(&deal)).unwrap(), deal);
            }
        }
    }

    #[test]
    fn test_bit_layout() {
        let deal = test_deal();
        let bytes = serialize_deal(&deal);
        // Low nibble: dealer East (01), NS vulnerable (1), EW not (0)
        assert_eq!(bytes[DEAL_BYTES - 1] & 0x0F, 0b0110);
        // Top four bits are padding; the first card (C2) is held by West (11)
        assert_eq!(bytes[0] >> 4, 0);
        assert_eq!((bytes[0] >> 2) & 0b11, 0b11);
    }

    #[test]
    fn test_rejects_unbalanced_bytes() {
        // All zeros gives North every card
        assert!(deserialize_deal(&[0u8; DEAL_BYTES]).is_err());
    }
}
