use crate::{
    model::{BalanceSheet, Expense, Roster},
    services::Allocator,
};

/// Folds expenses into a balance sheet one at a time.
///
/// The payer is credited with the full amount and every roster member is debited
/// by their allocated share. Paying and participating are independent, so a payer
/// who also participates sees both movements.
pub struct BalanceAccumulator<'a> {
    roster: &'a Roster,
    allocator: &'a Allocator,
    balances: BalanceSheet,
}

impl<'a> BalanceAccumulator<'a> {
    pub fn new(roster: &'a Roster, allocator: &'a Allocator) -> Self {
        Self {
            roster,
            allocator,
            balances: BalanceSheet::new(roster),
        }
    }

    pub fn apply(&mut self, expense: &Expense) {
        self.balances.adjust(expense.payer(), expense.amount());

        let allocation = self.allocator.allocate(self.roster, expense);
        for (member, share) in allocation.iter() {
            self.balances.adjust(member, -share);
        }
    }

    pub fn balances(&self) -> &BalanceSheet {
        &self.balances
    }

    pub fn into_balances(self) -> BalanceSheet {
        self.balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpenseId, Money, ParticipationRole};
    use rstest::{fixture, rstest};

    #[fixture]
    fn roster() -> Roster {
        Roster::new(["A", "B"])
    }

    #[rstest]
    fn payer_outside_split_is_fully_credited(roster: Roster) {
        let allocator = Allocator::default();
        let mut accumulator = BalanceAccumulator::new(&roster, &allocator);
        let expense = Expense::try_new(ExpenseId(1), "tickets", Money::from_i64(100), "A")
            .expect("positive amount")
            .with_role("B", ParticipationRole::Use);

        accumulator.apply(&expense);

        let balances = accumulator.into_balances();
        assert_eq!(balances.get("A"), Money::from_i64(100));
        assert_eq!(balances.get("B"), Money::from_i64(-100));
    }

    #[rstest]
    fn payer_who_participates_is_credited_and_debited(roster: Roster) {
        let allocator = Allocator::default();
        let mut accumulator = BalanceAccumulator::new(&roster, &allocator);
        let expense = Expense::try_new(ExpenseId(1), "pizza", Money::from_i64(50), "A")
            .expect("positive amount")
            .with_role("A", ParticipationRole::Use)
            .with_role("B", ParticipationRole::Use);

        accumulator.apply(&expense);

        assert_eq!(accumulator.balances().get("A"), Money::from_i64(25));
        assert_eq!(accumulator.balances().get("B"), Money::from_i64(-25));
    }

    #[rstest]
    fn payer_off_roster_is_appended(roster: Roster) {
        let allocator = Allocator::default();
        let mut accumulator = BalanceAccumulator::new(&roster, &allocator);
        let expense = Expense::try_new(ExpenseId(1), "gift card", Money::from_i64(20), "Guest")
            .expect("positive amount")
            .with_role("A", ParticipationRole::Use);

        accumulator.apply(&expense);

        let balances = accumulator.into_balances();
        let order: Vec<&str> = balances.iter().map(|(member, _)| member.as_str()).collect();
        assert_eq!(order, ["A", "B", "Guest"]);
        assert_eq!(balances.get("Guest"), Money::from_i64(20));
        assert_eq!(balances.total(), Money::ZERO);
    }
}
