use rust_decimal::Decimal;
use thiserror::Error;

use crate::model::{Money, Participant, ParticipationRole};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    #[error("Expense amount must be positive (found {0})")]
    InvalidAmount(Money),
    #[error("Amount {0} exceeds the limit of 1000000000000")]
    AmountTooLarge(Money),
    #[error("Cannot override the share of '{participant}', who is out of this expense")]
    OverrideOnExcludedParticipant { participant: Participant },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    #[error("Weight for '{role}' must not be negative (found {weight})")]
    Negative {
        role: ParticipationRole,
        weight: Decimal,
    },
    #[error(
        "Weight for '{role}' must be at most 1000 with at most 4 decimal places (found {weight})"
    )]
    OutOfRange {
        role: ParticipationRole,
        weight: Decimal,
    },
    #[error("Role '{0}' never carries a weight")]
    Unweighted(ParticipationRole),
}
