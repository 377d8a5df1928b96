use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use golf_handicap::config::{self, ColorMode};
use golf_handicap::handicap::{self, HandicapIndex, HandicapStatus};
use golf_handicap::ledger::{self, Ledger};
use golf_handicap::output::{self, GolferRow, OutputFormat};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_INPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List golfers with their handicap index (default if no subcommand)
    List,
    /// Show a golfer's handicap report and rounds
    Show {
        /// Golfer id or name
        golfer: String,
    },
    /// List courses with par, course rating and slope rating
    Courses,
    /// Compute a golfer's course handicap on a course
    CourseHandicap {
        /// Golfer id or name
        golfer: String,
        /// Course id or name
        course: String,
    },
    /// Compute a handicap index from differentials, newest first
    Calc {
        /// Score differential (repeatable, at most 20)
        #[arg(
            short,
            long = "differential",
            required_unless_present = "index",
            conflicts_with = "index",
            num_args = 1..,
            allow_negative_numbers = true
        )]
        differentials: Vec<f64>,
        /// Use a known handicap index instead of differentials
        #[arg(short, long, allow_negative_numbers = true)]
        index: Option<f64>,
        /// Slope rating, to also compute a course handicap
        #[arg(long, requires = "rating")]
        slope: Option<i32>,
        /// Course rating, to also compute a course handicap
        #[arg(long, requires = "slope")]
        rating: Option<f64>,
        /// Course par
        #[arg(long, default_value_t = 72)]
        par: i32,
    },
    /// Compute the differential for a single round
    Differential {
        gross_score: i32,
        course_rating: f64,
        slope_rating: i32,
    },
    /// Create a ledger with sample courses
    Init {
        /// Overwrite an existing ledger
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "golf-handicap")]
#[command(about = "Golf handicap index and course handicap calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/golf-handicap/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to ledger file (overrides the config file)
    #[arg(short, long, global = true)]
    ledger: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Color output (overrides the config file)
    #[arg(long, global = true, value_enum)]
    color: Option<ColorMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    golf_handicap::logging::init(cli.verbose);
    let command = cli.command.unwrap_or(Commands::List);
    let start_time = Instant::now();

    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let use_colors = cli.color.unwrap_or(config.color).use_colors();

    let ledger_path = match config::resolve_ledger_path(cli.ledger, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let result = match command {
        Commands::List => run_list(&load_valid_ledger(&ledger_path), cli.format, use_colors),
        Commands::Show { golfer } => {
            run_show(&load_valid_ledger(&ledger_path), &golfer, cli.format, use_colors)
        }
        Commands::Courses => run_courses(&load_valid_ledger(&ledger_path), cli.format, use_colors),
        Commands::CourseHandicap { golfer, course } => run_course_handicap(
            &load_valid_ledger(&ledger_path),
            &golfer,
            &course,
            cli.format,
            use_colors,
        ),
        Commands::Calc {
            differentials,
            index,
            slope,
            rating,
            par,
        } => run_calc(&differentials, index, slope.zip(rating), par, cli.format),
        Commands::Differential {
            gross_score,
            course_rating,
            slope_rating,
        } => run_differential(gross_score, course_rating, slope_rating, cli.format),
        Commands::Init { force } => {
            if let Err(e) = run_init(&ledger_path, force) {
                eprintln!("Ledger error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_INPUT);
    }

    debug!("Finished in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}

/// Load and validate the ledger, exiting with EXIT_DATA on failure.
fn load_valid_ledger(path: &std::path::Path) -> Ledger {
    let ledger = match ledger::load_ledger(path) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Ledger error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if let Err(errors) = ledger::validate_ledger(&ledger) {
        eprintln!("Ledger errors in {}:", path.display());
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_DATA);
    }

    ledger
}

fn run_list(ledger: &Ledger, format: OutputFormat, use_colors: bool) -> Result<()> {
    let mut rows = ledger
        .golfers
        .iter()
        .map(|golfer| {
            let report = ledger
                .report_for(golfer.id)
                .with_context(|| format!("Cannot compute handicap for {}", golfer.name))?;
            Ok(GolferRow {
                golfer,
                handicap_index: report.handicap_index,
                rounds: ledger.score_count(golfer.id),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    rows.sort_by_key(|row| row.golfer.name.to_lowercase());

    let rendered = match format {
        OutputFormat::Table => output::format_golfer_table(&rows, use_colors),
        OutputFormat::Tsv => output::format_golfer_tsv(&rows),
        OutputFormat::Json => output::golfers_json(&rows)?,
    };
    println!("{}", rendered);
    info!(golfers = rows.len(), "listed golfers");
    Ok(())
}

fn run_show(ledger: &Ledger, query: &str, format: OutputFormat, use_colors: bool) -> Result<()> {
    let golfer = ledger.find_golfer(query)?;
    let rounds = ledger.rounds_for(golfer.id);
    let report = ledger.report_for(golfer.id)?;
    debug!(
        golfer = %golfer.name,
        rounds = report.total_rounds,
        considered = report.rounds_considered,
        used = report.rounds_used,
        "computed handicap report"
    );

    let rendered = match format {
        OutputFormat::Table => output::format_golfer_detail(golfer, &report, &rounds, use_colors),
        OutputFormat::Tsv => output::format_rounds_tsv(&report, &rounds),
        OutputFormat::Json => output::report_json(golfer, &report, &rounds)?,
    };
    println!("{}", rendered);
    Ok(())
}

fn run_courses(ledger: &Ledger, format: OutputFormat, use_colors: bool) -> Result<()> {
    let rendered = match format {
        OutputFormat::Table => output::format_course_table(&ledger.courses, use_colors),
        OutputFormat::Tsv => output::format_course_tsv(&ledger.courses),
        OutputFormat::Json => output::courses_json(&ledger.courses)?,
    };
    println!("{}", rendered);
    Ok(())
}

fn run_course_handicap(
    ledger: &Ledger,
    golfer_query: &str,
    course_query: &str,
    format: OutputFormat,
    use_colors: bool,
) -> Result<()> {
    let golfer = ledger.find_golfer(golfer_query)?;
    let course = ledger.find_course(course_query)?;
    let report = ledger.report_for(golfer.id)?;
    let strokes = report.course_handicap(course.slope_rating, course.course_rating, course.par)?;

    let rendered = match format {
        OutputFormat::Table => output::format_course_handicap_line(
            golfer,
            course,
            report.handicap_index,
            strokes,
            use_colors,
        ),
        OutputFormat::Tsv => format!(
            "{}\t{}\t{}\t{}",
            golfer.name,
            course.name,
            output::format_index(report.handicap_index),
            output::format_course_handicap(strokes)
        ),
        OutputFormat::Json => {
            output::course_handicap_json(golfer, course, report.handicap_index, strokes)?
        }
    };
    println!("{}", rendered);
    Ok(())
}

fn run_calc(
    differentials: &[f64],
    known_index: Option<f64>,
    course: Option<(i32, f64)>,
    par: i32,
    format: OutputFormat,
) -> Result<()> {
    let index = match known_index {
        Some(value) => Some(HandicapIndex::new(value)?),
        None => handicap::handicap_index(differentials)?,
    };
    let strokes = match course {
        Some((slope, rating)) => Some(handicap::course_handicap(index, slope, rating, par)?),
        None => None,
    };

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "differentials": differentials,
                "handicap_index": index,
                "course_handicap": strokes.flatten(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Tsv => {
            let mut line = output::format_index(index);
            if let Some(ch) = strokes {
                line.push('\t');
                line.push_str(&output::format_course_handicap(ch));
            }
            println!("{}", line);
        }
        OutputFormat::Table => {
            println!("Handicap Index: {}", output::format_index(index));
            if index.is_none() {
                let status = match differentials.len() {
                    0 => HandicapStatus::NoScores,
                    n => HandicapStatus::NeedMore(handicap::MIN_ROUNDS.saturating_sub(n)),
                };
                println!("  {}", status);
            }
            if let Some(ch) = strokes {
                println!("Course Handicap: {}", output::format_course_handicap(ch));
            }
        }
    }
    Ok(())
}

fn run_differential(
    gross_score: i32,
    course_rating: f64,
    slope_rating: i32,
    format: OutputFormat,
) -> Result<()> {
    let differential = handicap::differential(gross_score, course_rating, slope_rating)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "differential": differential })),
        OutputFormat::Tsv => println!("{}", differential),
        OutputFormat::Table => println!("Differential: {:.1}", differential),
    }
    Ok(())
}

fn run_init(path: &std::path::Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Ledger already exists at {}. Use --force to overwrite",
            path.display()
        );
    }
    let ledger = Ledger::starter();
    ledger::save_ledger(path, &ledger)?;
    println!(
        "Created ledger with {} sample courses at {}",
        ledger.courses.len(),
        path.display()
    );
    Ok(())
}
