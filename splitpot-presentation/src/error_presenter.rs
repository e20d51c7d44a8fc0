use splitpot_application::{BookError, LedgerParseError};
use splitpot_domain::{ExpenseError, MAX_AMOUNT, MAX_WEIGHT, MAX_WEIGHT_SCALE, WeightError};
use splitpot_i18n as i18n;

use crate::report_presenter::role_label;

pub fn format_ledger_parse_error(error: &LedgerParseError) -> String {
    match error {
        LedgerParseError::MissingMembersDeclaration { line } => {
            i18n::at_line(*line, i18n::MISSING_MEMBERS_DECLARATION).to_string()
        }
        LedgerParseError::DuplicateMember { name, line } => {
            i18n::at_line(*line, i18n::duplicate_member(name)).to_string()
        }
        LedgerParseError::SyntaxError { line, detail } => {
            i18n::syntax_error(*line, detail.clone()).to_string()
        }
        LedgerParseError::InvalidWeights(source) => {
            i18n::invalid_weights(format_weight_error(source))
        }
        LedgerParseError::InvalidExpense { line, source } => {
            i18n::at_line(*line, format_book_error(source)).to_string()
        }
    }
}

pub fn format_book_error(error: &BookError) -> String {
    match error {
        BookError::UnknownExpense(id) => i18n::unknown_expense(id),
        BookError::UnknownMember(name) => i18n::unknown_member(name),
        BookError::DuplicateParticipant(name) => i18n::duplicate_participant(name),
        BookError::EmptyDescription => i18n::EMPTY_DESCRIPTION.to_string(),
        BookError::Expense(source) => format_expense_error(source),
    }
}

fn format_expense_error(error: &ExpenseError) -> String {
    match error {
        ExpenseError::InvalidAmount(amount) => i18n::invalid_amount(amount),
        ExpenseError::AmountTooLarge(amount) => i18n::amount_too_large(amount, MAX_AMOUNT),
        ExpenseError::OverrideOnExcludedParticipant { participant } => {
            i18n::override_on_excluded(participant)
        }
    }
}

fn format_weight_error(error: &WeightError) -> String {
    match error {
        WeightError::Negative { role, weight } => i18n::negative_weight(role_label(*role), weight),
        WeightError::OutOfRange { role, weight } => {
            i18n::weight_out_of_range(role_label(*role), weight, MAX_WEIGHT, MAX_WEIGHT_SCALE)
        }
        WeightError::Unweighted(role) => i18n::unweighted_role(role_label(*role)),
    }
}
