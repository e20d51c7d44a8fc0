#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::{ExpenseError, WeightError};
pub use model::{
    Allocation, BalanceSheet, DISPLAY_SCALE, Expense, ExpenseId, MAX_AMOUNT, MAX_WEIGHT,
    MAX_WEIGHT_SCALE, Money, Participant, ParticipationRole, Roster, SETTLEMENT_EPSILON, SettleUp,
    Settlement, WeightTable,
};
pub use services::{Allocator, BalanceAccumulator, SettlementReducer};
