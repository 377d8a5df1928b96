pub mod config;
pub mod handicap;
pub mod ledger;
pub mod logging;
pub mod output;
