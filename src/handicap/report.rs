use serde::Serialize;
use std::fmt;

use super::engine::{course_handicap, select, HandicapIndex};
use super::error::HandicapError;
use super::round::{split_recent, Round};
use super::table::MIN_ROUNDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandicapStatus {
    NoScores,
    NeedMore(usize),
    Established,
}

impl fmt::Display for HandicapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandicapStatus::NoScores => write!(f, "No scores posted yet"),
            HandicapStatus::NeedMore(n) => {
                write!(f, "Need {} more score(s) to establish handicap", n)
            }
            HandicapStatus::Established => write!(f, "Handicap established"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRound {
    pub round: Round,
    /// `None` only for a round outside the window whose ratings are invalid
    pub differential: Option<f64>,
    /// Within the 20 most recent rounds
    pub counted: bool,
    /// One of the lowest differentials averaged into the index
    pub used: bool,
}

/// Everything known about one golfer's handicap, recomputed from their history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandicapReport {
    pub handicap_index: Option<HandicapIndex>,
    pub total_rounds: usize,
    pub rounds_considered: usize,
    pub rounds_used: usize,
    pub minimum_rounds_needed: usize,
    pub status: HandicapStatus,
    /// Newest-first. Input that is already newest-first keeps its order.
    pub rounds: Vec<ScoredRound>,
}

impl HandicapReport {
    /// Build the report from a golfer's full history, in any order.
    ///
    /// Only the 20 most recent rounds must be valid. Older rounds are listed
    /// for reference and never affect the index.
    pub fn from_rounds(rounds: &[Round]) -> Result<Self, HandicapError> {
        let (recent, older) = split_recent(rounds);
        let rounds_considered = recent.len();

        let differentials = recent
            .iter()
            .map(Round::differential)
            .collect::<Result<Vec<f64>, HandicapError>>()?;

        let mut scored: Vec<ScoredRound> = recent
            .into_iter()
            .zip(&differentials)
            .map(|(round, &differential)| ScoredRound {
                round,
                differential: Some(differential),
                counted: true,
                used: false,
            })
            .collect();
        scored.extend(older.into_iter().map(|round| ScoredRound {
            round,
            differential: round.differential().ok(),
            counted: false,
            used: false,
        }));

        let (handicap_index, rounds_used) = match select(&differentials)? {
            Some((rule, index)) => {
                let mut by_differential: Vec<usize> = (0..rounds_considered).collect();
                by_differential.sort_by(|&a, &b| differentials[a].total_cmp(&differentials[b]));
                for &i in &by_differential[..rule.best_count] {
                    scored[i].used = true;
                }
                (Some(index), rule.best_count)
            }
            None => (None, 0),
        };

        let minimum_rounds_needed = MIN_ROUNDS.saturating_sub(rounds_considered);
        let status = if rounds_considered == 0 {
            HandicapStatus::NoScores
        } else if minimum_rounds_needed > 0 {
            HandicapStatus::NeedMore(minimum_rounds_needed)
        } else {
            HandicapStatus::Established
        };

        Ok(HandicapReport {
            handicap_index,
            total_rounds: scored.len(),
            rounds_considered,
            rounds_used,
            minimum_rounds_needed,
            status,
            rounds: scored,
        })
    }

    /// Convert this report's index into a course handicap.
    pub fn course_handicap(
        &self,
        slope_rating: i32,
        course_rating: f64,
        par: i32,
    ) -> Result<Option<i32>, HandicapError> {
        course_handicap(self.handicap_index, slope_rating, course_rating, par)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Rounds at slope 113 and rating 70.0 so differential == gross - 70.
    /// `diffs[i]` is played `i` days after the start.
    fn rounds_with_diffs(diffs: &[i32]) -> Vec<Round> {
        diffs
            .iter()
            .enumerate()
            .map(|(i, d)| Round::new(70 + d, 70.0, 113, start() + Duration::days(i as i64)))
            .collect()
    }

    #[test]
    fn test_empty_history() {
        let report = HandicapReport::from_rounds(&[]).unwrap();
        assert_eq!(report.handicap_index, None);
        assert_eq!(report.status, HandicapStatus::NoScores);
        assert_eq!(report.minimum_rounds_needed, 3);
        assert_eq!(report.rounds_used, 0);
        assert!(report.rounds.is_empty());
    }

    #[test]
    fn test_two_rounds_needs_one_more() {
        let report = HandicapReport::from_rounds(&rounds_with_diffs(&[10, 12])).unwrap();
        assert_eq!(report.handicap_index, None);
        assert_eq!(report.status, HandicapStatus::NeedMore(1));
        assert_eq!(report.minimum_rounds_needed, 1);
        assert_eq!(report.total_rounds, 2);
        assert!(report.rounds.iter().all(|r| r.counted && !r.used));
    }

    #[test]
    fn test_three_rounds_established() {
        let report = HandicapReport::from_rounds(&rounds_with_diffs(&[10, 12, 8])).unwrap();
        assert_eq!(report.handicap_index.map(|i| i.value()), Some(6.0));
        assert_eq!(report.status, HandicapStatus::Established);
        assert_eq!(report.rounds_used, 1);
        assert_eq!(report.minimum_rounds_needed, 0);
        // Newest-first: 8 (day 2), 12 (day 1), 10 (day 0)
        let diffs: Vec<Option<f64>> = report.rounds.iter().map(|r| r.differential).collect();
        assert_eq!(diffs, vec![Some(8.0), Some(12.0), Some(10.0)]);
        assert!(report.rounds[0].used);
        assert!(!report.rounds[1].used);
        assert!(!report.rounds[2].used);
    }

    #[test]
    fn test_only_twenty_most_recent_count() {
        // Five old rounds with excellent differentials, then twenty at 15
        let mut diffs = vec![0; 5];
        diffs.extend(vec![15; 20]);
        let report = HandicapReport::from_rounds(&rounds_with_diffs(&diffs)).unwrap();

        assert_eq!(report.total_rounds, 25);
        assert_eq!(report.rounds_considered, 20);
        assert_eq!(report.handicap_index.map(|i| i.value()), Some(15.0));
        assert_eq!(report.rounds.iter().filter(|r| r.counted).count(), 20);
        // Old rounds are at the end and neither counted nor used
        assert!(report.rounds[20..].iter().all(|r| !r.counted && !r.used));
    }

    #[test]
    fn test_used_flags_match_rounds_used() {
        let diffs: Vec<i32> = (1..=20).rev().collect();
        let report = HandicapReport::from_rounds(&rounds_with_diffs(&diffs)).unwrap();
        assert_eq!(report.rounds_used, 8);
        assert_eq!(report.rounds.iter().filter(|r| r.used).count(), 8);
        for scored in &report.rounds {
            assert_eq!(scored.used, scored.differential.unwrap() <= 8.0);
        }
    }

    #[test]
    fn test_tied_differentials_prefer_newer_round() {
        let report = HandicapReport::from_rounds(&rounds_with_diffs(&[5, 5, 9])).unwrap();
        // Newest-first: 9 (day 2), 5 (day 1), 5 (day 0)
        assert!(!report.rounds[0].used);
        assert!(report.rounds[1].used);
        assert!(!report.rounds[2].used);
    }

    #[test]
    fn test_unsorted_input_is_ordered_by_date() {
        let mut rounds = rounds_with_diffs(&[1, 2, 3, 4]);
        rounds.reverse();
        rounds.swap(0, 2);
        let report = HandicapReport::from_rounds(&rounds).unwrap();
        let dates: Vec<NaiveDate> = report.rounds.iter().map(|r| r.round.date_played).collect();
        let mut expected = dates.clone();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_invalid_round_is_an_error() {
        let mut rounds = rounds_with_diffs(&[1, 2, 3]);
        rounds[1].slope_rating = 0;
        assert!(HandicapReport::from_rounds(&rounds).is_err());
    }

    #[test]
    fn test_invalid_round_outside_window_is_ignored() {
        let mut diffs = vec![0; 3];
        diffs.extend(vec![15; 20]);
        let mut rounds = rounds_with_diffs(&diffs);
        rounds[0].slope_rating = 0;

        let report = HandicapReport::from_rounds(&rounds).unwrap();
        assert_eq!(report.total_rounds, 23);
        assert_eq!(report.handicap_index.map(|i| i.value()), Some(15.0));
        // Oldest round sorts last
        assert_eq!(report.rounds[22].differential, None);
        assert!(!report.rounds[22].counted);
        assert_eq!(report.rounds[21].differential, Some(0.0));
    }

    #[test]
    fn test_report_course_handicap() {
        let report = HandicapReport::from_rounds(&rounds_with_diffs(&[12, 12, 12])).unwrap();
        assert_eq!(report.course_handicap(120, 71.0, 72).unwrap(), Some(10));

        let empty = HandicapReport::from_rounds(&[]).unwrap();
        assert_eq!(empty.course_handicap(120, 71.0, 72).unwrap(), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(HandicapStatus::NoScores.to_string(), "No scores posted yet");
        assert_eq!(
            HandicapStatus::NeedMore(2).to_string(),
            "Need 2 more score(s) to establish handicap"
        );
        assert_eq!(HandicapStatus::Established.to_string(), "Handicap established");
    }
}
