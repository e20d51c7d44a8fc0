use splitpot_domain::{ExpenseError, ExpenseId, WeightError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error("Expense {0} does not exist")]
    UnknownExpense(ExpenseId),
    #[error("'{0}' is not on the roster")]
    UnknownMember(String),
    #[error("'{0}' is listed more than once in the same expense")]
    DuplicateParticipant(String),
    #[error("Expense description must not be empty")]
    EmptyDescription,
    #[error(transparent)]
    Expense(#[from] ExpenseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerParseError {
    #[error("Missing `MEMBERS := ...` declaration before line {line}")]
    MissingMembersDeclaration { line: usize },
    #[error("Member '{name}' is listed twice at line {line}")]
    DuplicateMember { name: String, line: usize },
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
    #[error("Invalid weights: {0}")]
    InvalidWeights(#[from] WeightError),
    #[error("Invalid expense at line {line}: {source}")]
    InvalidExpense { line: usize, source: BookError },
}
