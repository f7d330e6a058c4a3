//! Canonical bid strings.

/// The 38 legal calls in canonical form
pub const LEGAL_BIDS: [&str; 38] = [
    "PASS", "1C", "1D", "1H", "1S", "1NT", "2C", "2D", "2H", "2S", "2NT", "3C", "3D", "3H", "3S",
    "3NT", "4C", "4D", "4H", "4S", "4NT", "5C", "5D", "5H", "5S", "5NT", "6C", "6D", "6H", "6S",
    "6NT", "7C", "7D", "7H", "7S", "7NT", "X", "XX",
];

/// Normalize a free-form bid token ("2N", "d", "P!", "Pass") to its canonical
/// form, or `None` if the token is not a call.
pub fn canonicalize_bid(bid: &str) -> Option<&'static str> {
    let mut bid = bid.trim().trim_matches('!').to_ascii_uppercase();
    if bid.ends_with('N') {
        bid.push('T');
    }
    let bid = match bid.as_str() {
        "DBL" | "D" => "X",
        "REDBL" | "R" => "XX",
        "P" => "PASS",
        other => other,
    };
    LEGAL_BIDS.iter().copied().find(|legal| *legal == bid)
}

/// True for a contract-level bid (not pass, double or redouble)
pub fn is_contract_bid(bid: &str) -> bool {
    !matches!(bid, "PASS" | "X" | "XX")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_variants() {
        assert_eq!(canonicalize_bid("2N"), Some("2NT"));
        assert_eq!(canonicalize_bid("1nt"), Some("1NT"));
        assert_eq!(canonicalize_bid("d"), Some("X"));
        assert_eq!(canonicalize_bid("DBL"), Some("X"));
        assert_eq!(canonicalize_bid("r"), Some("XX"));
        assert_eq!(canonicalize_bid("Redbl"), Some("XX"));
        assert_eq!(canonicalize_bid("P!"), Some("PASS"));
        assert_eq!(canonicalize_bid("Pass"), Some("PASS"));
        assert_eq!(canonicalize_bid("!3c"), Some("3C"));
    }

    #[test]
    fn test_rejects_non_bids() {
        assert_eq!(canonicalize_bid("8C"), None);
        assert_eq!(canonicalize_bid("AP"), None);
        assert_eq!(canonicalize_bid("=1="), None);
        assert_eq!(canonicalize_bid("N"), None);
        assert_eq!(canonicalize_bid(""), None);
    }

    #[test]
    fn test_canonical_bids_are_fixed_points() {
        for bid in LEGAL_BIDS {
            assert_eq!(canonicalize_bid(bid), Some(bid));
        }
        for raw in ["1n", "p", "d", "r", "7s!", "XX"] {
            let once = canonicalize_bid(raw).unwrap();
            assert_eq!(canonicalize_bid(once), Some(once));
        }
    }
}
