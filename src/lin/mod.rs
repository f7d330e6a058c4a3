//! LIN (Linear) format for BBO hand records.
//!
//! LIN is a pipe-delimited format used by Bridge Base Online to encode
//! complete hand records including deal, auction, and cardplay. A record is
//! a flat run of `key|value|` nodes; keys such as `mb` (bid) and `pc`
//! (played card) repeat once per event.
//!
//! Two file shapes are read: one board per line ([`parse_lin_str`]) and a
//! multi-board session whose header is shared by every board
//! ([`parse_multi_lin_str`]). [`build_lin_str`] renders a board back to LIN.

mod reader;
mod writer;

pub use reader::{
    parse_lin, parse_lin_file, parse_lin_str, parse_multi_lin_file, parse_multi_lin_str, LinNodes,
};
pub use writer::{build_lin_str, build_lin_url, LinType};

use crate::card::Direction;

/// Seat order of LIN hands and names (BBO convention)
pub(crate) const LIN_SEATS: [Direction; 4] = [
    Direction::South,
    Direction::West,
    Direction::North,
    Direction::East,
];

/// Dealer digit: 1=S, 2=W, 3=N, 4=E
pub(crate) fn dealer_from_lin(c: char) -> Option<Direction> {
    let position = c.to_digit(10)?.checked_sub(1)?;
    LIN_SEATS.get(position as usize).copied()
}

pub(crate) fn dealer_to_lin(dealer: Direction) -> char {
    match dealer {
        Direction::South => '1',
        Direction::West => '2',
        Direction::North => '3',
        Direction::East => '4',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dealer_codes() {
        for seat in Direction::ALL {
            assert_eq!(dealer_from_lin(dealer_to_lin(seat)), Some(seat));
        }
        assert_eq!(dealer_from_lin('3'), Some(Direction::North));
        assert_eq!(dealer_from_lin('0'), None);
        assert_eq!(dealer_from_lin('5'), None);
        assert_eq!(dealer_from_lin('x'), None);
    }
}
