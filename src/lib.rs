//! Played-board records for contract bridge.
//!
//! This crate reads the record of how a bridge board was played (the deal,
//! the auction, the cardplay and the result) from common file formats:
//! - **LIN** - BBO (Bridge Base Online) hand records, one board per line or
//!   a multi-board session
//! - **PBN** (Portable Bridge Notation) - Standard format for bridge records
//! - **Tournament JSON** - Hand records with double-dummy tables
//!
//! Boards are scored, grouped by deal, and can be rendered back to LIN. A
//! deal also packs into 14 bytes with [`binary::serialize_deal`].
//!
//! # Example
//!
//! ```
//! use bridge_records::{lin, Direction};
//!
//! let record = "pn|a,b,c,d|st||md|3SAKQJT98765432HDC,SHAKQJT98765432DC,\
//! SHDAKQJT98765432C,SHDCAKQJT98765432|sv|o|mb|p|mb|p|mb|p|mb|p|pg||";
//!
//! let (deal, board) = lin::parse_lin(record).unwrap();
//! assert_eq!(deal.dealer, Direction::North);
//! assert!(board.contract.is_passed_out());
//! assert_eq!(board.score, 0);
//! ```

pub mod bids;
pub mod binary;
pub mod board;
pub mod card;
pub mod deal;
pub mod double_dummy;
mod error;
pub mod lin;
pub mod pbn;
pub mod play;
mod reader;
pub mod scoring;
pub mod tournament;

pub use board::{
    BidMetadata, BoardRecord, Commentary, CommentaryAnchor, Contract, DealRecord, Doubled,
};
pub use card::{BiddingSuit, Card, Direction, Rank, Suit};
pub use deal::{Deal, PlayerHand};
pub use error::{ParseError, Result};
pub use reader::{read_records, read_records_as, SourceFormat};
