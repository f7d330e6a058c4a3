//! Record reader with format auto-detection.
//!
//! Picks the parser for a file from its extension or, failing that, from
//! its content, then reads every board it can. Boards that fail to parse
//! are logged and skipped.
//!
//! # Example
//!
//! ```
//! use bridge_records::SourceFormat;
//!
//! let content = "[Board \"1\"]\n[Dealer \"N\"]\n";
//! assert_eq!(SourceFormat::detect(content), SourceFormat::Pbn);
//! ```

use crate::board::DealRecord;
use crate::error::Result;
use crate::lin::{parse_lin_str, parse_multi_lin_str};
use crate::pbn::parse_pbn_str;
use std::path::Path;

/// Input format of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Portable Bridge Notation
    Pbn,
    /// One LIN board per line
    Lin,
    /// A LIN session: shared header, then one `qx` board after another
    MultiLin,
}

impl SourceFormat {
    /// Guess the format from file content.
    ///
    /// Bracketed tag lines mean PBN, a line starting `qx|` means a LIN
    /// session, and anything else is read as one LIN board per line.
    pub fn detect(content: &str) -> SourceFormat {
        let mut lines = content.lines().map(str::trim).filter(|line| !line.is_empty());
        if lines.clone().any(|line| line.starts_with('[')) {
            SourceFormat::Pbn
        } else if lines.any(|line| line.starts_with("qx|")) {
            SourceFormat::MultiLin
        } else {
            SourceFormat::Lin
        }
    }

    /// Format implied by the file extension: `.pbn` is PBN and `.lin` is
    /// LIN, with the single/multi split left to [`SourceFormat::detect`]
    pub fn from_path(path: &Path) -> Option<SourceFormat> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pbn" => Some(SourceFormat::Pbn),
            "lin" => Some(SourceFormat::Lin),
            _ => None,
        }
    }

    /// Parse content in this format
    pub fn parse_str(self, content: &str) -> Result<Vec<DealRecord>> {
        match self {
            SourceFormat::Pbn => Ok(parse_pbn_str(content)),
            SourceFormat::Lin => Ok(parse_lin_str(content)),
            SourceFormat::MultiLin => parse_multi_lin_str(content),
        }
    }
}

/// Read every board of a record file, choosing the format automatically
pub fn read_records(path: &Path) -> Result<Vec<DealRecord>> {
    let content = std::fs::read_to_string(path)?;
    let format = match (SourceFormat::from_path(path), SourceFormat::detect(&content)) {
        (Some(SourceFormat::Pbn), _) => SourceFormat::Pbn,
        (Some(_), SourceFormat::MultiLin) => SourceFormat::MultiLin,
        (Some(_), _) => SourceFormat::Lin,
        (None, detected) => detected,
    };
    log::debug!("Reading {} as {:?}", path.display(), format);
    format.parse_str(&content)
}

/// Read a record file in a known format
pub fn read_records_as(path: &Path, format: SourceFormat) -> Result<Vec<DealRecord>> {
    let content = std::fs::read_to_string(path)?;
    format.parse_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIN_BOARD: &str = "pn|a,b,c,d|st||md|3SAKQJT98765432HDC,SHAKQJT98765432DC,\
SHDAKQJT98765432C,SHDCAKQJT98765432|sv|o|mb|p|mb|p|mb|p|mb|p|pg||";

    const PBN_BOARD: &str = r#"[Board "1"]
[Dealer "N"]
[Vulnerable "None"]
[Deal "N:AKQJT98765432... .AKQJT98765432.. ..AKQJT98765432. ...AKQJT98765432"]
[Contract "Pass"]
"#;

    #[test]
    fn test_detect() {
        assert_eq!(SourceFormat::detect(PBN_BOARD), SourceFormat::Pbn);
        assert_eq!(SourceFormat::detect(LIN_BOARD), SourceFormat::Lin);
        assert_eq!(
            SourceFormat::detect("vg|Final,,P,1,16,A,0,B,0|\npn|a,b,c,d,e,f,g,h|pg||\nqx|o1|md|3|"),
            SourceFormat::MultiLin
        );
        assert_eq!(SourceFormat::detect(""), SourceFormat::Lin);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(SourceFormat::from_path(Path::new("a/b.PBN")), Some(SourceFormat::Pbn));
        assert_eq!(SourceFormat::from_path(Path::new("b.lin")), Some(SourceFormat::Lin));
        assert_eq!(SourceFormat::from_path(Path::new("b.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_read_records() {
        let dir = tempfile::tempdir().unwrap();

        let pbn = dir.path().join("session.txt");
        std::fs::write(&pbn, PBN_BOARD).unwrap();
        let records = read_records(&pbn).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].board_records[0].contract.is_passed_out());

        let lin = dir.path().join("board.lin");
        std::fs::write(&lin, format!("{}\n{}\n", LIN_BOARD, LIN_BOARD)).unwrap();
        let records = read_records(&lin).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].board_records.len(), 2);

        let records = read_records_as(&pbn, SourceFormat::Lin).unwrap();
        assert!(records.is_empty());

        assert!(read_records(&dir.path().join("missing.pbn")).is_err());
    }
}
