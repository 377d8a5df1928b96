use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::handicap::{HandicapError, HandicapReport, Round};

fn default_par() -> i32 {
    72
}

fn default_slope() -> i32 {
    113
}

/// Golfers, courses and posted scores.
///
/// Example YAML:
/// ```yaml
/// golfers:
///   - { id: 1, name: "Jane Doe", email: "jane@example.com" }
/// courses:
///   - { id: 1, name: "The Continental", par: 72, course_rating: 71.8, slope_rating: 125 }
/// scores:
///   - { golfer_id: 1, course_id: 1, gross_score: 88, date_played: "2024-05-04" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Ledger {
    #[serde(default)]
    pub golfers: Vec<Golfer>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Golfer {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Course {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_par")]
    pub par: i32,
    pub course_rating: f64,
    #[serde(default = "default_slope")]
    pub slope_rating: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Score {
    pub golfer_id: u32,
    pub course_id: u32,
    pub gross_score: i32,
    pub date_played: NaiveDate,
}

/// A posted score joined with the course it was played on.
#[derive(Debug, Clone, Copy)]
pub struct LedgerRound<'a> {
    pub round: Round,
    pub course: &'a Course,
}

impl Ledger {
    /// Sample courses for a fresh ledger. No golfers or scores.
    pub fn starter() -> Self {
        let course = |id, name: &str, course_rating, slope_rating| Course {
            id,
            name: name.to_string(),
            par: 72,
            course_rating,
            slope_rating,
        };
        Ledger {
            golfers: Vec::new(),
            courses: vec![
                course(1, "Pebble Beach Golf Links", 74.8, 142),
                course(2, "Augusta National Golf Club", 76.2, 137),
                course(3, "St. Andrews Old Course", 74.3, 129),
                course(4, "Local Municipal Course", 70.5, 118),
                course(5, "The Continental", 71.8, 125),
            ],
            scores: Vec::new(),
        }
    }

    pub fn golfer(&self, id: u32) -> Option<&Golfer> {
        self.golfers.iter().find(|g| g.id == id)
    }

    pub fn course(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Find a golfer by numeric id, else by case-insensitive name.
    pub fn find_golfer(&self, query: &str) -> Result<&Golfer> {
        find_by_id_or_name(&self.golfers, query, "golfer", |g| g.id, |g| g.name.as_str())
    }

    /// Find a course by numeric id, else by case-insensitive name.
    pub fn find_course(&self, query: &str) -> Result<&Course> {
        find_by_id_or_name(&self.courses, query, "course", |c| c.id, |c| c.name.as_str())
    }

    /// Number of scores posted by a golfer (all time)
    pub fn score_count(&self, golfer_id: u32) -> usize {
        self.scores
            .iter()
            .filter(|s| s.golfer_id == golfer_id)
            .count()
    }

    /// A golfer's rounds joined with their courses, newest-first.
    ///
    /// Scores pointing at unknown courses are skipped; `validate_ledger`
    /// reports them.
    pub fn rounds_for(&self, golfer_id: u32) -> Vec<LedgerRound<'_>> {
        let mut rounds: Vec<LedgerRound<'_>> = self
            .scores
            .iter()
            .filter(|s| s.golfer_id == golfer_id)
            .filter_map(|s| {
                let course = self.course(s.course_id)?;
                Some(LedgerRound {
                    round: Round::new(
                        s.gross_score,
                        course.course_rating,
                        course.slope_rating,
                        s.date_played,
                    ),
                    course,
                })
            })
            .collect();
        rounds.sort_by(|a, b| b.round.date_played.cmp(&a.round.date_played));
        rounds
    }

    /// Handicap report for a golfer. `report.rounds[i]` matches `rounds_for(golfer_id)[i]`.
    pub fn report_for(&self, golfer_id: u32) -> Result<HandicapReport, HandicapError> {
        let rounds: Vec<Round> = self
            .rounds_for(golfer_id)
            .iter()
            .map(|r| r.round)
            .collect();
        HandicapReport::from_rounds(&rounds)
    }
}

fn find_by_id_or_name<'a, T>(
    items: &'a [T],
    query: &str,
    kind: &str,
    id_of: impl Fn(&T) -> u32,
    name_of: impl Fn(&T) -> &str,
) -> Result<&'a T> {
    let query = query.trim();
    if let Ok(id) = query.parse::<u32>() {
        if let Some(item) = items.iter().find(|&i| id_of(i) == id) {
            return Ok(item);
        }
    }

    let matches: Vec<&T> = items
        .iter()
        .filter(|&i| name_of(i).eq_ignore_ascii_case(query))
        .collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => bail!("No {} matches '{}'", kind, query),
        many => bail!(
            "'{}' matches {} {}s; use the id instead ({})",
            query,
            many.len(),
            kind,
            many.iter()
                .map(|&i| id_of(i).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
