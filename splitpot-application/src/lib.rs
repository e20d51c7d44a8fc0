#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger_processor;
pub mod model;
pub mod ports;

pub use error::{BookError, LedgerParseError};
pub use ledger_processor::LedgerProcessor;
pub use model::{ExpenseAllocation, ExpenseBook, LedgerReport, NewExpense, NewParticipation};
pub use ports::LedgerParser;
