pub mod formatter;
pub mod json;

pub use formatter::{
    format_course_handicap, format_course_handicap_line, format_course_table, format_course_tsv,
    format_golfer_detail, format_golfer_table, format_golfer_tsv, format_index, format_rounds_tsv,
    should_use_colors, GolferRow, OutputFormat,
};
pub use json::{course_handicap_json, courses_json, golfers_json, report_json};
