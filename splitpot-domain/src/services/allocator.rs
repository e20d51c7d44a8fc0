use crate::model::{Allocation, Expense, Money, Participant, Roster, WeightTable};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Splits a single expense across the roster.
///
/// Overrides are taken first and subtracted from the amount; whatever remains is
/// divided among the other participants in proportion to their role weights.
/// Nothing is rounded and nothing is renormalized: an override larger than the
/// expense leaves a negative remainder that flows into the weighted shares as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Allocator {
    weights: WeightTable,
}

impl Allocator {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Returns one entry per roster member, in roster order.
    ///
    /// Roles and overrides for names outside the roster are ignored. When the
    /// weighted participants carry no weight at all, they receive zero instead of
    /// dividing by zero.
    pub fn allocate(&self, roster: &Roster, expense: &Expense) -> Allocation {
        let mut shares: IndexMap<Participant, Money> = roster
            .iter()
            .map(|member| (member.clone(), Money::ZERO))
            .collect();
        let mut remaining = expense.amount();
        let mut weighted: Vec<(&Participant, Decimal)> = Vec::with_capacity(roster.len());

        for member in roster {
            let role = expense.role(member.as_str());
            if role.is_excluded() {
                continue;
            }
            match expense.override_for(member.as_str()) {
                Some(fixed) => {
                    shares.insert(member.clone(), fixed);
                    remaining -= fixed;
                }
                None => weighted.push((member, self.weights.weight(role))),
            }
        }

        if remaining.signum() < 0 {
            tracing::debug!(
                expense_id = %expense.id(),
                amount = %expense.amount(),
                remaining = %remaining,
                "Overrides exceed the expense amount"
            );
        }

        let total_weight: Decimal = weighted.iter().map(|(_, weight)| *weight).sum();
        if total_weight.is_zero() {
            if !remaining.is_zero() {
                tracing::debug!(
                    expense_id = %expense.id(),
                    weighted_count = weighted.len(),
                    remaining = %remaining,
                    "No weighted participants; remainder left unallocated"
                );
            }
            return Allocation::new(shares);
        }

        let base_share = remaining / total_weight;
        for (member, weight) in weighted {
            shares.insert(member.clone(), base_share * weight);
        }

        Allocation::new(shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpenseId, ParticipationRole};
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn allocator() -> Allocator {
        Allocator::default()
    }

    #[fixture]
    fn roster() -> Roster {
        Roster::new(["A", "B", "C"])
    }

    fn expense(amount: Money, roles: &[(&str, ParticipationRole)]) -> Expense {
        roles.iter().fold(
            Expense::try_new(ExpenseId(1), "dinner", amount, "A").expect("positive amount"),
            |expense, (member, role)| expense.with_role(*member, *role),
        )
    }

    fn shares(allocation: &Allocation) -> Vec<(&str, Money)> {
        allocation
            .iter()
            .map(|(member, share)| (member.as_str(), share))
            .collect()
    }

    #[rstest]
    fn weighted_split_of_ninety(allocator: Allocator, roster: Roster) {
        let expense = expense(
            Money::from_i64(90),
            &[
                ("A", ParticipationRole::Choose),
                ("B", ParticipationRole::Use),
                ("C", ParticipationRole::Gift),
            ],
        );

        let allocation = allocator.allocate(&roster, &expense);

        assert_eq!(
            shares(&allocation),
            vec![
                ("A", Money::new(4_125, 2)),
                ("B", Money::new(375, 1)),
                ("C", Money::new(1_125, 2)),
            ]
        );
        assert_eq!(allocation.total(), Money::from_i64(90));
    }

    #[rstest]
    fn override_is_taken_before_weighting(allocator: Allocator, roster: Roster) {
        let expense = expense(
            Money::from_i64(90),
            &[
                ("A", ParticipationRole::Choose),
                ("B", ParticipationRole::Use),
                ("C", ParticipationRole::Gift),
            ],
        )
        .with_override("C", Money::from_i64(5))
        .expect("C participates");

        let allocation = allocator.allocate(&roster, &expense);

        assert_eq!(allocation.get("C"), Money::from_i64(5));
        assert_eq!(allocation.get("A").as_decimal().round_dp(3), dec!(44.524));
        assert_eq!(allocation.get("B").as_decimal().round_dp(3), dec!(40.476));
        assert!((allocation.total() - Money::from_i64(90)).abs() <= Money::new(1, 9));
    }

    #[rstest]
    #[case::single_out(&[("A", ParticipationRole::Use), ("B", ParticipationRole::Use)], "C")]
    #[case::payer_out(&[("B", ParticipationRole::Gift), ("C", ParticipationRole::Choose)], "A")]
    fn excluded_members_get_zero(
        allocator: Allocator,
        roster: Roster,
        #[case] roles: &[(&str, ParticipationRole)],
        #[case] excluded: &str,
    ) {
        let expense = expense(Money::from_i64(40), roles);

        let allocation = allocator.allocate(&roster, &expense);

        assert_eq!(allocation.get(excluded), Money::ZERO);
        assert_eq!(allocation.total(), Money::from_i64(40));
    }

    #[rstest]
    fn nobody_participating_yields_zeros(allocator: Allocator, roster: Roster) {
        let expense = expense(Money::from_i64(12), &[]);

        let allocation = allocator.allocate(&roster, &expense);

        assert_eq!(allocation.len(), 3);
        assert!(allocation.iter().all(|(_, share)| share.is_zero()));
    }

    #[rstest]
    fn everyone_overridden_leaves_remainder_unallocated(allocator: Allocator, roster: Roster) {
        let expense = expense(
            Money::from_i64(20),
            &[("A", ParticipationRole::Use), ("B", ParticipationRole::Use)],
        )
        .with_override("A", Money::from_i64(3))
        .and_then(|expense| expense.with_override("B", Money::from_i64(4)))
        .expect("both participate");

        let allocation = allocator.allocate(&roster, &expense);

        assert_eq!(
            shares(&allocation),
            vec![
                ("A", Money::from_i64(3)),
                ("B", Money::from_i64(4)),
                ("C", Money::ZERO),
            ]
        );
    }

    #[rstest]
    fn zero_weight_roles_do_not_divide_by_zero(roster: Roster) {
        let weights = WeightTable::default()
            .with_weight(ParticipationRole::Gift, dec!(0))
            .expect("zero is allowed");
        let allocator = Allocator::new(weights);
        let expense = expense(
            Money::from_i64(10),
            &[("B", ParticipationRole::Gift), ("C", ParticipationRole::Gift)],
        );

        let allocation = allocator.allocate(&roster, &expense);

        assert!(allocation.iter().all(|(_, share)| share.is_zero()));
    }

    #[rstest]
    fn oversized_override_makes_others_negative(allocator: Allocator, roster: Roster) {
        let expense = expense(
            Money::from_i64(10),
            &[("A", ParticipationRole::Use), ("B", ParticipationRole::Use)],
        )
        .with_override("A", Money::from_i64(16))
        .expect("A participates");

        let allocation = allocator.allocate(&roster, &expense);

        assert_eq!(allocation.get("A"), Money::from_i64(16));
        assert_eq!(allocation.get("B"), Money::from_i64(-6));
        assert_eq!(allocation.total(), Money::from_i64(10));
    }

    #[rstest]
    fn custom_weights_are_respected(roster: Roster) {
        let allocator = Allocator::new(
            WeightTable::new(dec!(2), dec!(1), dec!(1)).expect("valid weights"),
        );
        let expense = expense(
            Money::from_i64(40),
            &[
                ("A", ParticipationRole::Choose),
                ("B", ParticipationRole::Use),
                ("C", ParticipationRole::Gift),
            ],
        );

        let allocation = allocator.allocate(&roster, &expense);

        assert_eq!(allocation.get("A"), Money::from_i64(20));
        assert_eq!(allocation.get("B"), Money::from_i64(10));
        assert_eq!(allocation.get("C"), Money::from_i64(10));
    }

    #[rstest]
    fn names_off_the_roster_are_ignored(allocator: Allocator, roster: Roster) {
        let expense = expense(
            Money::from_i64(30),
            &[("A", ParticipationRole::Use), ("Z", ParticipationRole::Use)],
        );

        let allocation = allocator.allocate(&roster, &expense);

        assert_eq!(allocation.len(), 3);
        assert_eq!(allocation.get("A"), Money::from_i64(30));
        assert_eq!(allocation.get("Z"), Money::ZERO);
    }
}
