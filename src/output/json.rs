use anyhow::{Context, Result};
use serde::Serialize;

use super::formatter::GolferRow;
use crate::handicap::{HandicapIndex, HandicapReport, HandicapStatus};
use crate::ledger::{Course, Golfer, LedgerRound};

#[derive(Serialize)]
struct GolferSummary<'a> {
    id: u32,
    name: &'a str,
    email: Option<&'a str>,
    handicap_index: Option<HandicapIndex>,
    score_count: usize,
}

#[derive(Serialize)]
struct RoundView<'a> {
    date_played: String,
    course_name: &'a str,
    gross_score: i32,
    course_rating: f64,
    slope_rating: i32,
    par: i32,
    differential: Option<f64>,
    counted: bool,
    used_in_calculation: bool,
}

#[derive(Serialize)]
struct GolferReport<'a> {
    id: u32,
    name: &'a str,
    email: Option<&'a str>,
    handicap_index: Option<HandicapIndex>,
    total_scores: usize,
    scores_considered: usize,
    scores_used: usize,
    minimum_scores_needed: usize,
    status: String,
    status_code: HandicapStatus,
    scores: Vec<RoundView<'a>>,
}

#[derive(Serialize)]
struct CourseHandicapView<'a> {
    golfer_name: &'a str,
    course_name: &'a str,
    handicap_index: Option<HandicapIndex>,
    course_handicap: Option<i32>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON output")
}

pub fn golfers_json(rows: &[GolferRow]) -> Result<String> {
    let summaries: Vec<GolferSummary> = rows
        .iter()
        .map(|row| GolferSummary {
            id: row.golfer.id,
            name: &row.golfer.name,
            email: row.golfer.email.as_deref(),
            handicap_index: row.handicap_index,
            score_count: row.rounds,
        })
        .collect();
    to_json(&summaries)
}

/// `rounds` must line up with `report.rounds` (see `Ledger::report_for`).
pub fn report_json(
    golfer: &Golfer,
    report: &HandicapReport,
    rounds: &[LedgerRound],
) -> Result<String> {
    let scores = report
        .rounds
        .iter()
        .zip(rounds)
        .map(|(scored, joined)| RoundView {
            date_played: scored.round.date_played.format("%Y-%m-%d").to_string(),
            course_name: &joined.course.name,
            gross_score: scored.round.gross_score,
            course_rating: scored.round.course_rating,
            slope_rating: scored.round.slope_rating,
            par: joined.course.par,
            differential: scored.differential,
            counted: scored.counted,
            used_in_calculation: scored.used,
        })
        .collect();

    to_json(&GolferReport {
        id: golfer.id,
        name: &golfer.name,
        email: golfer.email.as_deref(),
        handicap_index: report.handicap_index,
        total_scores: report.total_rounds,
        scores_considered: report.rounds_considered,
        scores_used: report.rounds_used,
        minimum_scores_needed: report.minimum_rounds_needed,
        status: report.status.to_string(),
        status_code: report.status,
        scores,
    })
}

pub fn courses_json(courses: &[Course]) -> Result<String> {
    to_json(&courses)
}

pub fn course_handicap_json(
    golfer: &Golfer,
    course: &Course,
    index: Option<HandicapIndex>,
    strokes: Option<i32>,
) -> Result<String> {
    to_json(&CourseHandicapView {
        golfer_name: &golfer.name,
        course_name: &course.name,
        handicap_index: index,
        course_handicap: strokes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handicap::Round;
    use chrono::NaiveDate;
    use serde_json::Value;

    fn golfer() -> Golfer {
        Golfer {
            id: 1,
            name: "Jane Doe".to_string(),
            email: None,
        }
    }

    fn course() -> Course {
        Course {
            id: 2,
            name: "Local Municipal Course".to_string(),
            par: 72,
            course_rating: 70.5,
            slope_rating: 118,
        }
    }

    #[test]
    fn test_golfers_json_null_index() {
        let jane = golfer();
        let rows = vec![GolferRow {
            golfer: &jane,
            handicap_index: None,
            rounds: 2,
        }];
        let value: Value = serde_json::from_str(&golfers_json(&rows).unwrap()).unwrap();
        assert_eq!(value[0]["name"], "Jane Doe");
        assert!(value[0]["handicap_index"].is_null());
        assert_eq!(value[0]["score_count"], 2);
    }

    #[test]
    fn test_report_json() {
        let course = course();
        let rounds: Vec<LedgerRound> = [(80, 3), (85, 2), (90, 1)]
            .iter()
            .map(|&(gross, day)| LedgerRound {
                round: Round::new(
                    gross,
                    course.course_rating,
                    course.slope_rating,
                    NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
                ),
                course: &course,
            })
            .collect();
        let plain: Vec<Round> = rounds.iter().map(|r| r.round).collect();
        let report = HandicapReport::from_rounds(&plain).unwrap();

        let value: Value =
            serde_json::from_str(&report_json(&golfer(), &report, &rounds).unwrap()).unwrap();
        assert_eq!(value["total_scores"], 3);
        assert_eq!(value["scores_used"], 1);
        assert_eq!(value["status"], "Handicap established");
        assert_eq!(value["status_code"], "established");
        assert_eq!(value["scores"][0]["date_played"], "2024-08-03");
        assert_eq!(value["scores"][0]["used_in_calculation"], true);
        assert_eq!(value["scores"][1]["used_in_calculation"], false);
        // (80 - 70.5) * 113 / 118 = 9.097..., minus 2.0
        assert_eq!(value["handicap_index"], 7.1);
    }

    #[test]
    fn test_course_handicap_json() {
        let value: Value = serde_json::from_str(
            &course_handicap_json(&golfer(), &course(), None, None).unwrap(),
        )
        .unwrap();
        assert_eq!(value["course_name"], "Local Municipal Course");
        assert!(value["course_handicap"].is_null());
    }

    #[test]
    fn test_courses_json() {
        let value: Value = serde_json::from_str(&courses_json(&[course()]).unwrap()).unwrap();
        assert_eq!(value[0]["slope_rating"], 118);
        assert_eq!(value[0]["par"], 72);
    }
}
