//! PBN (Portable Bridge Notation) reader.
//!
//! A PBN file is a run of records separated by blank lines. Each record is a
//! set of `[Tag "value"]` lines, some of which open a block of free text:
//! `Auction` is followed by the calls, `Play` by one row of cards per trick,
//! and `{...}` holds commentary. A record that omits the deal tags is played
//! on the deal of the record before it.

mod reader;

pub use reader::{
    parse_auction, parse_pbn_file, parse_pbn_record, parse_pbn_str, sort_play_record, PbnRecord,
    TagPair,
};
