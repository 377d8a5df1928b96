use chrono::NaiveDate;
use serde::Serialize;

use super::engine::differential;
use super::error::HandicapError;

/// Number of most recent rounds that count toward a handicap index.
pub const MAX_RECENT_ROUNDS: usize = 20;

/// One round as the engine sees it. Owned by the caller; never mutated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Round {
    pub gross_score: i32,
    pub course_rating: f64,
    pub slope_rating: i32,
    pub date_played: NaiveDate,
}

impl Round {
    pub fn new(
        gross_score: i32,
        course_rating: f64,
        slope_rating: i32,
        date_played: NaiveDate,
    ) -> Self {
        Self {
            gross_score,
            course_rating,
            slope_rating,
            date_played,
        }
    }

    /// Score differential for this round (unrounded)
    pub fn differential(&self) -> Result<f64, HandicapError> {
        differential(self.gross_score, self.course_rating, self.slope_rating)
    }
}

/// Return a copy of `rounds` ordered newest-first, limited to the most recent 20.
///
/// Rounds played on the same date keep their input order.
pub fn recent_rounds(rounds: &[Round]) -> Vec<Round> {
    split_recent(rounds).0
}

/// Split `rounds`, ordered newest-first, into the most recent 20 and the rest.
pub(crate) fn split_recent(rounds: &[Round]) -> (Vec<Round>, Vec<Round>) {
    let mut recent = rounds.to_vec();
    recent.sort_by(|a, b| b.date_played.cmp(&a.date_played));
    let older = recent.split_off(recent.len().min(MAX_RECENT_ROUNDS));
    (recent, older)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_round_differential() {
        let round = Round::new(90, 72.0, 113, day(1));
        assert_eq!(round.differential().unwrap(), 18.0);
    }

    #[test]
    fn test_recent_rounds_sorts_newest_first() {
        let rounds = vec![
            Round::new(80, 70.0, 113, day(1)),
            Round::new(81, 70.0, 113, day(3)),
            Round::new(82, 70.0, 113, day(2)),
        ];
        let recent = recent_rounds(&rounds);
        let scores: Vec<i32> = recent.iter().map(|r| r.gross_score).collect();
        assert_eq!(scores, vec![81, 82, 80]);
    }

    #[test]
    fn test_recent_rounds_truncates_to_twenty() {
        let rounds: Vec<Round> = (1..=25)
            .map(|d| Round::new(70 + d as i32, 70.0, 113, day(d)))
            .collect();
        let recent = recent_rounds(&rounds);
        assert_eq!(recent.len(), MAX_RECENT_ROUNDS);
        // Newest is May 25, oldest kept is May 6
        assert_eq!(recent[0].date_played, day(25));
        assert_eq!(recent[19].date_played, day(6));
    }

    #[test]
    fn test_recent_rounds_same_day_keeps_input_order() {
        let rounds = vec![
            Round::new(80, 70.0, 113, day(4)),
            Round::new(90, 70.0, 113, day(4)),
        ];
        let recent = recent_rounds(&rounds);
        assert_eq!(recent[0].gross_score, 80);
        assert_eq!(recent[1].gross_score, 90);
    }

    #[test]
    fn test_recent_rounds_does_not_touch_input() {
        let rounds = vec![
            Round::new(80, 70.0, 113, day(1)),
            Round::new(81, 70.0, 113, day(2)),
        ];
        let _ = recent_rounds(&rounds);
        assert_eq!(rounds[0].gross_score, 80);
    }
}
