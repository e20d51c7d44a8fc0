use crate::{
    model::{BalanceSheet, Expense, Participant, Roster, SETTLEMENT_EPSILON, SettleUp, Settlement},
    services::{Allocator, BalanceAccumulator},
};

/// Turns expenses into net balances and balances into payments.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementReducer {
    allocator: Allocator,
}

impl SettlementReducer {
    pub fn new(allocator: Allocator) -> Self {
        Self { allocator }
    }

    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// Net balance per roster member across all expenses.
    ///
    /// Expense order does not matter.
    pub fn balances<'e, I>(&self, roster: &Roster, expenses: I) -> BalanceSheet
    where
        I: IntoIterator<Item = &'e Expense>,
    {
        let mut accumulator = BalanceAccumulator::new(roster, &self.allocator);
        for expense in expenses {
            accumulator.apply(expense);
        }
        accumulator.into_balances()
    }

    /// Greedy creditor-by-debtor matching.
    ///
    /// Takes ownership of the balances and returns the settlements together with
    /// the balances left after applying them. Creditors are visited in sheet order
    /// and, for each one, debtors in sheet order; every pair that still has more
    /// than [`SETTLEMENT_EPSILON`] on both sides produces one payment of the smaller
    /// magnitude. This does not minimize the number of payments.
    ///
    /// When the sheet does not sum to zero one side runs out first and the other
    /// keeps an unsettled remainder, visible through [`SettleUp::residual`].
    pub fn settle(&self, balances: BalanceSheet) -> SettleUp {
        let mut working_balances = balances;
        let creditors: Vec<Participant> = working_balances
            .iter()
            .filter(|(_, balance)| *balance > SETTLEMENT_EPSILON)
            .map(|(member, _)| member.clone())
            .collect();
        let debtors: Vec<Participant> = working_balances
            .iter()
            .filter(|(_, balance)| *balance < -SETTLEMENT_EPSILON)
            .map(|(member, _)| member.clone())
            .collect();

        let mut settlements = Vec::new();
        for creditor in &creditors {
            for debtor in &debtors {
                let credit = working_balances.get(creditor.as_str());
                if credit <= SETTLEMENT_EPSILON {
                    break;
                }
                let debt = -working_balances.get(debtor.as_str());
                if debt <= SETTLEMENT_EPSILON {
                    continue;
                }

                let amount = credit.min(debt);
                working_balances.adjust(creditor, -amount);
                working_balances.adjust(debtor, amount);
                settlements.push(Settlement {
                    from: debtor.clone(),
                    to: creditor.clone(),
                    amount,
                });
            }
        }

        let settle_up = SettleUp {
            settlements,
            residual: working_balances,
        };

        if !settle_up.is_fully_settled() {
            tracing::warn!(
                creditor_count = creditors.len(),
                debtor_count = debtors.len(),
                settlement_count = settle_up.settlements.len(),
                residual_total = %settle_up.residual.total(),
                "Balances do not sum to zero; leaving an unsettled residual"
            );
        }

        settle_up
    }

    /// [`Self::balances`] followed by [`Self::settle`].
    pub fn reduce<'e, I>(&self, roster: &Roster, expenses: I) -> SettleUp
    where
        I: IntoIterator<Item = &'e Expense>,
    {
        self.settle(self.balances(roster, expenses))
    }
}
