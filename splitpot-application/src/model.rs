use crate::error::BookError;
use fxhash::FxHashSet;
use splitpot_domain::{
    Allocation, BalanceSheet, Expense, ExpenseId, Money, Participant, ParticipationRole, Roster,
    SettleUp, WeightTable,
};

/// One participant line of an expense being added.
#[derive(Debug, Clone, PartialEq)]
pub struct NewParticipation<'a> {
    pub name: &'a str,
    pub role: ParticipationRole,
    pub override_amount: Option<Money>,
}

/// Input for [`ExpenseBook::add_expense`]; members not listed are `Out`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense<'a> {
    pub description: &'a str,
    pub amount: Money,
    pub payer: &'a str,
    pub participations: Vec<NewParticipation<'a>>,
}

/// The caller-owned, editable collection of expenses for one roster.
///
/// Every edit is validated against the roster. Nothing derived from the
/// expenses is cached; reports are recomputed from scratch.
#[derive(Debug, Clone)]
pub struct ExpenseBook {
    roster: Roster,
    weights: WeightTable,
    expenses: Vec<Expense>,
    next_id: u64,
}

impl ExpenseBook {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            weights: WeightTable::default(),
            expenses: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn weights(&self) -> WeightTable {
        self.weights
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id() == id)
    }

    pub fn add_expense(&mut self, new: NewExpense<'_>) -> Result<ExpenseId, BookError> {
        let description = new.description.trim();
        if description.is_empty() {
            return Err(BookError::EmptyDescription);
        }

        let id = ExpenseId(self.next_id);
        let payer = self.member(new.payer)?;
        let mut expense = Expense::try_new(id, description, new.amount, payer)?;
        let mut seen = FxHashSet::default();
        for participation in new.participations {
            let member = self.member(participation.name)?;
            if !seen.insert(member.clone()) {
                return Err(BookError::DuplicateParticipant(member.to_string()));
            }
            expense.set_role(member.clone(), participation.role);
            expense.set_override(member, participation.override_amount)?;
        }

        tracing::debug!(
            expense_id = %id,
            amount = %expense.amount(),
            payer = %expense.payer(),
            participant_count = expense.participants().count(),
            "Added expense"
        );
        self.expenses.push(expense);
        self.next_id += 1;
        Ok(id)
    }

    pub fn set_role(
        &mut self,
        id: ExpenseId,
        name: &str,
        role: ParticipationRole,
    ) -> Result<(), BookError> {
        let member = self.member(name)?;
        self.expense_mut(id)?.set_role(member, role);
        Ok(())
    }

    /// `None` or a non-positive amount clears the override.
    pub fn set_override(
        &mut self,
        id: ExpenseId,
        name: &str,
        amount: Option<Money>,
    ) -> Result<(), BookError> {
        let member = self.member(name)?;
        self.expense_mut(id)?.set_override(member, amount)?;
        Ok(())
    }

    pub fn remove_expense(&mut self, id: ExpenseId) -> Result<Expense, BookError> {
        let position = self
            .expenses
            .iter()
            .position(|expense| expense.id() == id)
            .ok_or(BookError::UnknownExpense(id))?;
        Ok(self.expenses.remove(position))
    }

    fn member(&self, name: &str) -> Result<Participant, BookError> {
        self.roster
            .get(name)
            .cloned()
            .ok_or_else(|| BookError::UnknownMember(name.to_string()))
    }

    fn expense_mut(&mut self, id: ExpenseId) -> Result<&mut Expense, BookError> {
        self.expenses
            .iter_mut()
            .find(|expense| expense.id() == id)
            .ok_or(BookError::UnknownExpense(id))
    }
}

/// Per-participant shares of one expense, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseAllocation {
    pub expense_id: ExpenseId,
    pub description: String,
    pub amount: Money,
    pub payer: Participant,
    /// Every roster member's role, in roster order.
    pub roles: Vec<(Participant, ParticipationRole)>,
    pub allocation: Allocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerReport {
    pub allocations: Vec<ExpenseAllocation>,
    pub balances: BalanceSheet,
    pub settle_up: SettleUp,
}
