mod storage;
mod types;
mod validation;

pub use storage::{get_ledger_path, load_ledger, save_ledger};
pub use types::{Course, Golfer, Ledger, LedgerRound, Score};
pub use validation::validate_ledger;
