use clap::ValueEnum;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::handicap::{HandicapIndex, HandicapReport};
use crate::ledger::{Course, Golfer, LedgerRound};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

/// A golfer with their current index, for listings
pub struct GolferRow<'a> {
    pub golfer: &'a Golfer,
    pub handicap_index: Option<HandicapIndex>,
    pub rounds: usize,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a handicap index the way golfers write it.
/// "NH" (no handicap) when absent; negative indexes are plus handicaps ("+1.2").
pub fn format_index(index: Option<HandicapIndex>) -> String {
    match index {
        None => "NH".to_string(),
        Some(i) if i.value() < 0.0 => format!("+{:.1}", -i.value()),
        Some(i) => i.to_string(),
    }
}

/// Format a course handicap, "+N" for plus handicaps
pub fn format_course_handicap(strokes: Option<i32>) -> String {
    match strokes {
        None => "NH".to_string(),
        Some(n) if n < 0 => format!("+{}", -n),
        Some(n) => n.to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn fit_to_terminal(name: &str, fixed_width: usize) -> String {
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => truncate_name(name, width - fixed_width),
        Some(_) => truncate_name(name, 20),
        None => name.to_string(),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Format golfers as a table: Index, Handicap, Name, Rounds
/// Handicap column is right-aligned, 5 chars wide (fits "+10.0")
pub fn format_golfer_table(rows: &[GolferRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No golfers found.".to_string();
    }

    let index_width = 3;
    let handicap_width = 5;
    let separator = "  ";

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>2}.", idx + 1);
            let handicap = format!(
                "{:>width$}",
                format_index(row.handicap_index),
                width = handicap_width
            );
            let rounds = plural(row.rounds, "round");
            let fixed_width =
                index_width + 1 + handicap_width + separator.len() * 2 + rounds.len();
            let name = fit_to_terminal(&row.golfer.name, fixed_width);

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    handicap.bold(),
                    separator,
                    name,
                    separator,
                    rounds.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, handicap, separator, name, separator, rounds
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format golfers as tab-separated values for scripting
/// Columns: id, name, handicap index, rounds (no headers, no colors)
pub fn format_golfer_tsv(rows: &[GolferRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}",
                row.golfer.id,
                row.golfer.name,
                format_index(row.handicap_index),
                row.rounds
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one golfer's handicap report with every round, newest first.
///
/// `rounds` must line up with `report.rounds` (see `Ledger::report_for`).
/// Rounds averaged into the index are marked `*`; rounds outside the
/// 20-round window are marked `-`.
pub fn format_golfer_detail(
    golfer: &Golfer,
    report: &HandicapReport,
    rounds: &[LedgerRound],
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    let index = format_index(report.handicap_index);
    if use_colors {
        lines.push(format!("{}", golfer.name.bold()));
        lines.push(format!("  Handicap Index: {}", index.green().bold()));
    } else {
        lines.push(golfer.name.clone());
        lines.push(format!("  Handicap Index: {}", index));
    }
    if let Some(ref email) = golfer.email {
        lines.push(format!("  Email: {}", email));
    }
    lines.push(format!("  Status: {}", report.status));
    lines.push(format!(
        "  Rounds: {} posted, {} counted, {} used",
        report.total_rounds, report.rounds_considered, report.rounds_used
    ));

    if report.rounds.is_empty() {
        return lines.join("\n");
    }

    lines.push(String::new());
    let course_width = rounds
        .iter()
        .map(|r| r.course.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(32);

    for (scored, joined) in report.rounds.iter().zip(rounds) {
        let marker = if scored.used {
            "*"
        } else if scored.counted {
            " "
        } else {
            "-"
        };
        let line = format!(
            "  {} {}  {:<width$}  {:>3}  {:>5}",
            marker,
            scored.round.date_played.format("%Y-%m-%d"),
            truncate_name(&joined.course.name, course_width),
            scored.round.gross_score,
            format_differential(scored.differential),
            width = course_width
        );
        if !use_colors {
            lines.push(line);
        } else if scored.used {
            lines.push(format!("{}", line.green()));
        } else if !scored.counted {
            lines.push(format!("{}", line.dimmed()));
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// One decimal, or "-" for a round whose differential could not be computed
fn format_differential(differential: Option<f64>) -> String {
    match differential {
        Some(d) => format!("{:.1}", d),
        None => "-".to_string(),
    }
}

/// Format a golfer's rounds as tab-separated values
/// Columns: date, course, gross, differential, used (no headers, no colors)
pub fn format_rounds_tsv(report: &HandicapReport, rounds: &[LedgerRound]) -> String {
    report
        .rounds
        .iter()
        .zip(rounds)
        .map(|(scored, joined)| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                scored.round.date_played.format("%Y-%m-%d"),
                joined.course.name,
                scored.round.gross_score,
                format_differential(scored.differential),
                scored.used
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format courses as a table: Index, Name, Par, Rating / Slope
pub fn format_course_table(courses: &[Course], use_colors: bool) -> String {
    if courses.is_empty() {
        return "No courses found.".to_string();
    }

    let name_width = courses
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(40);

    courses
        .iter()
        .map(|course| {
            let index_str = format!("{:>3}.", course.id);
            let name = format!(
                "{:<width$}",
                truncate_name(&course.name, name_width),
                width = name_width
            );
            let ratings = format!(
                "par {}  {:.1}/{}",
                course.par, course.course_rating, course.slope_rating
            );
            if use_colors {
                format!("{} {}  {}", index_str.dimmed(), name.bold(), ratings)
            } else {
                format!("{} {}  {}", index_str, name, ratings)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format courses as tab-separated values
/// Columns: id, name, par, course rating, slope rating
pub fn format_course_tsv(courses: &[Course]) -> String {
    courses
        .iter()
        .map(|c| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                c.id, c.name, c.par, c.course_rating, c.slope_rating
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a golfer's course handicap on one course
pub fn format_course_handicap_line(
    golfer: &Golfer,
    course: &Course,
    index: Option<HandicapIndex>,
    strokes: Option<i32>,
    use_colors: bool,
) -> String {
    let strokes_str = format_course_handicap(strokes);
    let header = format!("{} at {}", golfer.name, course.name);
    let detail = format!(
        "  Handicap Index: {}\n  Course Handicap: {}",
        format_index(index),
        if use_colors {
            format!("{}", strokes_str.green().bold())
        } else {
            strokes_str
        }
    );
    if use_colors {
        format!("{}\n{}", header.bold(), detail)
    } else {
        format!("{}\n{}", header, detail)
    }
}
