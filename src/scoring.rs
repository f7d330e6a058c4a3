//! Duplicate bridge scoring.

use crate::board::Doubled;
use crate::card::BiddingSuit;

const PART_SCORE_BONUS: i32 = 50;
const GAME_THRESHOLD: i32 = 100;

/// Bonuses indexed by vulnerability: [non-vulnerable, vulnerable]
const GAME_BONUS: [i32; 2] = [300, 500];
const SMALL_SLAM_BONUS: [i32; 2] = [500, 750];
const GRAND_SLAM_BONUS: [i32; 2] = [1000, 1500];

/// Bonus for making a doubled contract, indexed by doubled count
const INSULT_BONUS: [i32; 3] = [0, 50, 100];

/// Doubled overtricks: [doubled count][vulnerable]
const DOUBLED_OVERTRICK: [[i32; 2]; 3] = [[0, 0], [100, 200], [200, 400]];

/// Undertrick penalties: [doubled count][vulnerable]
const FIRST_UNDERTRICK: [[i32; 2]; 3] = [[50, 100], [100, 200], [200, 400]];
const SECOND_THIRD_UNDERTRICK: [[i32; 2]; 3] = [[50, 100], [200, 300], [400, 600]];
const LATER_UNDERTRICK: [[i32; 2]; 3] = [[50, 100], [300, 300], [600, 600]];

/// (first trick, each subsequent trick) values for a strain
fn trick_values(strain: BiddingSuit) -> (i32, i32) {
    match strain {
        BiddingSuit::Clubs | BiddingSuit::Diamonds => (20, 20),
        BiddingSuit::Hearts | BiddingSuit::Spades => (30, 30),
        BiddingSuit::NoTrump => (40, 30),
    }
}

/// Score a board from declarer's point of view.
///
/// `level` is 0 for a passed-out board (`strain` is then ignored), and
/// `tricks` is the number of tricks won by declarer's side. Impossible
/// combinations are not checked.
pub fn calculate_score(
    level: u8,
    strain: Option<BiddingSuit>,
    doubled: Doubled,
    tricks: u8,
    vulnerable: bool,
) -> i32 {
    let strain = match strain {
        Some(strain) if level > 0 => strain,
        _ => return 0,
    };
    let vul = usize::from(vulnerable);
    let dbl = usize::from(doubled.count());
    let level = i32::from(level);
    let required = level + 6;
    let tricks = i32::from(tricks);

    if tricks < required {
        return -undertrick_penalty(required - tricks, vul, dbl);
    }

    let (first, subsequent) = trick_values(strain);
    let multiplier = 1 << dbl;
    let trick_score = (first + (level - 1) * subsequent) * multiplier;

    let mut score = trick_score;
    score += if trick_score >= GAME_THRESHOLD {
        GAME_BONUS[vul]
    } else {
        PART_SCORE_BONUS
    };
    if level == 6 {
        score += SMALL_SLAM_BONUS[vul];
    } else if level == 7 {
        score += GRAND_SLAM_BONUS[vul];
    }
    score += INSULT_BONUS[dbl];

    let overtricks = tricks - required;
    let overtrick_value = match doubled {
        Doubled::Undoubled => subsequent,
        Doubled::Doubled | Doubled::Redoubled => DOUBLED_OVERTRICK[dbl][vul],
    };
    score + overtricks * overtrick_value
}

fn undertrick_penalty(undertricks: i32, vul: usize, dbl: usize) -> i32 {
    (1..=undertricks)
        .map(|n| match n {
            1 => FIRST_UNDERTRICK[dbl][vul],
            2 | 3 => SECOND_THIRD_UNDERTRICK[dbl][vul],
            _ => LATER_UNDERTRICK[dbl][vul],
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLUBS: Option<BiddingSuit> = Some(BiddingSuit::Clubs);
    const DIAMONDS: Option<BiddingSuit> = Some(BiddingSuit::Diamonds);
    const HEARTS: Option<BiddingSuit> = Some(BiddingSuit::Hearts);
    const NO_TRUMP: Option<BiddingSuit> = Some(BiddingSuit::NoTrump);

    use crate::board::Doubled::{Doubled as X, Redoubled as XX, Undoubled as U};

    #[test]
    fn test_passed_out() {
        assert_eq!(0, calculate_score(0, None, U, 0, true));
    }

    #[test]
    fn test_one_minor() {
        assert_eq!(70, calculate_score(1, CLUBS, U, 7, true));
        assert_eq!(140, calculate_score(1, CLUBS, X, 7, true));
        assert_eq!(230, calculate_score(1, CLUBS, XX, 7, false));

        assert_eq!(150, calculate_score(1, CLUBS, U, 11, false));
        assert_eq!(540, calculate_score(1, CLUBS, X, 11, false));
        assert_eq!(1030, calculate_score(1, CLUBS, XX, 11, false));

        assert_eq!(150, calculate_score(1, CLUBS, U, 11, true));
        assert_eq!(940, calculate_score(1, CLUBS, X, 11, true));
        assert_eq!(1830, calculate_score(1, CLUBS, XX, 11, true));
    }

    #[test]
    fn test_three_no_trump() {
        assert_eq!(400, calculate_score(3, NO_TRUMP, U, 9, false));
        assert_eq!(550, calculate_score(3, NO_TRUMP, X, 9, false));
        assert_eq!(800, calculate_score(3, NO_TRUMP, XX, 9, false));
        assert_eq!(600, calculate_score(3, NO_TRUMP, U, 9, true));
        assert_eq!(750, calculate_score(3, NO_TRUMP, X, 9, true));
        assert_eq!(1000, calculate_score(3, NO_TRUMP, XX, 9, true));

        assert_eq!(460, calculate_score(3, NO_TRUMP, U, 11, false));
        assert_eq!(750, calculate_score(3, NO_TRUMP, X, 11, false));
        assert_eq!(1200, calculate_score(3, NO_TRUMP, XX, 11, false));
        assert_eq!(660, calculate_score(3, NO_TRUMP, U, 11, true));
        assert_eq!(1150, calculate_score(3, NO_TRUMP, X, 11, true));
        assert_eq!(1800, calculate_score(3, NO_TRUMP, XX, 11, true));
    }

    #[test]
    fn test_small_major_slam() {
        assert_eq!(980, calculate_score(6, HEARTS, U, 12, false));
        assert_eq!(1210, calculate_score(6, HEARTS, X, 12, false));
        assert_eq!(1620, calculate_score(6, HEARTS, XX, 12, false));
        assert_eq!(1430, calculate_score(6, HEARTS, U, 12, true));
        assert_eq!(1660, calculate_score(6, HEARTS, X, 12, true));
        assert_eq!(2070, calculate_score(6, HEARTS, XX, 12, true));

        assert_eq!(1010, calculate_score(6, HEARTS, U, 13, false));
        assert_eq!(1310, calculate_score(6, HEARTS, X, 13, false));
        assert_eq!(1820, calculate_score(6, HEARTS, XX, 13, false));
        assert_eq!(1460, calculate_score(6, HEARTS, U, 13, true));
        assert_eq!(1860, calculate_score(6, HEARTS, X, 13, true));
        assert_eq!(2470, calculate_score(6, HEARTS, XX, 13, true));
    }

    #[test]
    fn test_grand_minor_slam() {
        assert_eq!(1440, calculate_score(7, DIAMONDS, U, 13, false));
        assert_eq!(1630, calculate_score(7, DIAMONDS, X, 13, false));
        assert_eq!(1960, calculate_score(7, DIAMONDS, XX, 13, false));
        assert_eq!(2140, calculate_score(7, DIAMONDS, U, 13, true));
        assert_eq!(2330, calculate_score(7, DIAMONDS, X, 13, true));
        assert_eq!(2660, calculate_score(7, DIAMONDS, XX, 13, true));
    }

    #[test]
    fn test_undertricks() {
        let down = |tricks, doubled, vul| calculate_score(7, DIAMONDS, doubled, tricks, vul);

        assert_eq!(-50, down(12, U, false));
        assert_eq!(-100, down(12, X, false));
        assert_eq!(-200, down(12, XX, false));
        assert_eq!(-100, down(12, U, true));
        assert_eq!(-200, down(12, X, true));
        assert_eq!(-400, down(12, XX, true));

        assert_eq!(-100, down(11, U, false));
        assert_eq!(-300, down(11, X, false));
        assert_eq!(-600, down(11, XX, false));
        assert_eq!(-200, down(11, U, true));
        assert_eq!(-500, down(11, X, true));
        assert_eq!(-1000, down(11, XX, true));

        assert_eq!(-150, down(10, U, false));
        assert_eq!(-500, down(10, X, false));
        assert_eq!(-1000, down(10, XX, false));
        assert_eq!(-300, down(10, U, true));
        assert_eq!(-800, down(10, X, true));
        assert_eq!(-1600, down(10, XX, true));

        assert_eq!(-200, down(9, U, false));
        assert_eq!(-800, down(9, X, false));
        assert_eq!(-1600, down(9, XX, false));
        assert_eq!(-400, down(9, U, true));
        assert_eq!(-1100, down(9, X, true));
        assert_eq!(-2200, down(9, XX, true));
    }
}
