use crate::{
    error::LedgerParseError,
    model::{ExpenseAllocation, ExpenseBook, LedgerReport},
    ports::LedgerParser,
};
use splitpot_domain::{Allocator, SettlementReducer, WeightTable};

#[derive(Clone, Copy)]
pub struct LedgerProcessor<'a> {
    parser: &'a dyn LedgerParser,
}

impl<'a> LedgerProcessor<'a> {
    pub fn new(parser: &'a dyn LedgerParser) -> Self {
        Self { parser }
    }

    pub fn load(&self, content: &str) -> Result<ExpenseBook, LedgerParseError> {
        self.load_with_weights(content, WeightTable::default())
    }

    pub fn load_with_weights(
        &self,
        content: &str,
        base_weights: WeightTable,
    ) -> Result<ExpenseBook, LedgerParseError> {
        let book = self.parser.parse(content, base_weights)?;
        tracing::info!(
            member_count = book.roster().len(),
            expense_count = book.expenses().len(),
            "Loaded ledger"
        );
        Ok(book)
    }

    /// Recomputes shares, balances and settlements for the whole book.
    pub fn report(&self, book: &ExpenseBook) -> LedgerReport {
        let reducer = SettlementReducer::new(Allocator::new(book.weights()));
        let roster = book.roster();

        let allocations = book
            .expenses()
            .iter()
            .map(|expense| ExpenseAllocation {
                expense_id: expense.id(),
                description: expense.description().to_string(),
                amount: expense.amount(),
                payer: expense.payer().clone(),
                roles: roster
                    .iter()
                    .map(|member| (member.clone(), expense.role(member.as_str())))
                    .collect(),
                allocation: reducer.allocator().allocate(roster, expense),
            })
            .collect();

        let balances = reducer.balances(roster, book.expenses());
        let settle_up = reducer.settle(balances.clone());

        LedgerReport {
            allocations,
            balances,
            settle_up,
        }
    }
}
