use splitpot_application::{
    ExpenseBook, LedgerParseError, LedgerParser, NewExpense, NewParticipation,
};
use splitpot_domain::{Money, ParticipationRole, Roster, WeightTable};
use splitpot_parser::{ParseError, Role, parse_ledger};

#[derive(Default)]
pub struct SplitpotLedgerParser;

impl LedgerParser for SplitpotLedgerParser {
    fn parse(
        &self,
        content: &str,
        base_weights: WeightTable,
    ) -> Result<ExpenseBook, LedgerParseError> {
        let ledger = parse_ledger(content).map_err(to_ledger_parse_error)?;

        let weights = ledger
            .weights
            .iter()
            .try_fold(base_weights, |table, setting| {
                table.with_weight(to_role(setting.role), setting.weight)
            })?;

        let mut book = ExpenseBook::new(Roster::new(ledger.members.iter().copied()))
            .with_weights(weights);

        for entry in ledger.expenses {
            let splitpot_parser::ExpenseWithLine { line, expense } = entry;
            let new = NewExpense {
                description: expense.description,
                amount: Money::from_decimal(expense.amount),
                payer: expense.payer,
                participations: expense
                    .participations
                    .into_iter()
                    .map(|participation| NewParticipation {
                        name: participation.name,
                        role: to_role(participation.role),
                        override_amount: participation.override_amount.map(Money::from_decimal),
                    })
                    .collect(),
            };
            book.add_expense(new)
                .map_err(|source| LedgerParseError::InvalidExpense { line, source })?;
        }

        Ok(book)
    }
}

fn to_role(role: Role) -> ParticipationRole {
    match role {
        Role::Out => ParticipationRole::Out,
        Role::Use => ParticipationRole::Use,
        Role::Choose => ParticipationRole::Choose,
        Role::Gift => ParticipationRole::Gift,
    }
}

fn to_ledger_parse_error(err: ParseError) -> LedgerParseError {
    match err {
        ParseError::MissingMembersDeclaration { line } => {
            LedgerParseError::MissingMembersDeclaration { line }
        }
        ParseError::DuplicateMember { name, line } => {
            LedgerParseError::DuplicateMember { name, line }
        }
        ParseError::SyntaxError { line, detail } => LedgerParseError::SyntaxError { line, detail },
    }
}
