pub mod engine;
pub mod error;
pub mod report;
pub mod round;
pub mod table;

pub use engine::{course_handicap, differential, handicap_index, HandicapIndex};
pub use error::HandicapError;
pub use report::{HandicapReport, HandicapStatus, ScoredRound};
pub use round::{recent_rounds, Round, MAX_RECENT_ROUNDS};
pub use table::{selection, Selection, MIN_ROUNDS};
