use super::round::MAX_RECENT_ROUNDS;

/// Fewest rounds that produce a handicap index.
pub const MIN_ROUNDS: usize = 3;

/// How many of the lowest differentials are averaged, and the flat
/// adjustment added afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub best_count: usize,
    pub adjustment: f64,
}

const fn row(best_count: usize, adjustment: f64) -> Selection {
    Selection {
        best_count,
        adjustment,
    }
}

/// Indexed by `n - MIN_ROUNDS`, one row per round count 3..=20.
const SELECTION_TABLE: [Selection; MAX_RECENT_ROUNDS - MIN_ROUNDS + 1] = [
    row(1, -2.0), // 3
    row(1, -1.0), // 4
    row(1, 0.0),  // 5
    row(2, -1.0), // 6
    row(2, 0.0),  // 7
    row(2, 0.0),  // 8
    row(3, 0.0),  // 9
    row(3, 0.0),  // 10
    row(3, 0.0),  // 11
    row(4, 0.0),  // 12
    row(4, 0.0),  // 13
    row(4, 0.0),  // 14
    row(5, 0.0),  // 15
    row(5, 0.0),  // 16
    row(6, 0.0),  // 17
    row(6, 0.0),  // 18
    row(7, 0.0),  // 19
    row(8, 0.0),  // 20
];

/// Look up the selection rule for `n` rounds.
///
/// Returns `None` outside 3..=20.
pub fn selection(n: usize) -> Option<Selection> {
    n.checked_sub(MIN_ROUNDS)
        .and_then(|i| SELECTION_TABLE.get(i))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect(n: usize, best_count: usize, adjustment: f64) {
        assert_eq!(
            selection(n),
            Some(Selection {
                best_count,
                adjustment
            }),
            "selection for n = {}",
            n
        );
    }

    #[test]
    fn test_below_minimum_has_no_selection() {
        assert_eq!(selection(0), None);
        assert_eq!(selection(1), None);
        assert_eq!(selection(2), None);
    }

    #[test]
    fn test_above_window_has_no_selection() {
        assert_eq!(selection(21), None);
        assert_eq!(selection(100), None);
    }

    #[test]
    fn test_three_rounds() {
        expect(3, 1, -2.0);
    }

    #[test]
    fn test_four_rounds() {
        expect(4, 1, -1.0);
    }

    #[test]
    fn test_five_rounds() {
        expect(5, 1, 0.0);
    }

    #[test]
    fn test_six_rounds() {
        expect(6, 2, -1.0);
    }

    #[test]
    fn test_seven_and_eight_rounds() {
        expect(7, 2, 0.0);
        expect(8, 2, 0.0);
    }

    #[test]
    fn test_nine_to_eleven_rounds() {
        expect(9, 3, 0.0);
        expect(10, 3, 0.0);
        expect(11, 3, 0.0);
    }

    #[test]
    fn test_twelve_to_fourteen_rounds() {
        expect(12, 4, 0.0);
        expect(13, 4, 0.0);
        expect(14, 4, 0.0);
    }

    #[test]
    fn test_fifteen_and_sixteen_rounds() {
        expect(15, 5, 0.0);
        expect(16, 5, 0.0);
    }

    #[test]
    fn test_seventeen_and_eighteen_rounds() {
        expect(17, 6, 0.0);
        expect(18, 6, 0.0);
    }

    #[test]
    fn test_nineteen_rounds() {
        expect(19, 7, 0.0);
    }

    #[test]
    fn test_twenty_rounds() {
        expect(20, 8, 0.0);
    }

    #[test]
    fn test_best_count_never_exceeds_round_count() {
        for n in MIN_ROUNDS..=MAX_RECENT_ROUNDS {
            let sel = selection(n).unwrap();
            assert!(sel.best_count >= 1 && sel.best_count <= n);
        }
    }
}
