use arcstr::ArcStr;
use indexmap::{IndexMap, IndexSet, map::Entry};
use rust_decimal::{Decimal, RoundingStrategy};
use std::{
    borrow::Borrow,
    fmt,
    hash::{Hash, Hasher},
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use crate::error::{ExpenseError, WeightError};

/// Tolerance below which a balance counts as settled (one currency minor unit).
pub const SETTLEMENT_EPSILON: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

/// Largest amount a single expense or override may carry (10^12).
pub const MAX_AMOUNT: Money = Money(Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0));

/// Upper bound for a role weight.
pub const MAX_WEIGHT: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Finest weight step; together with [`MAX_AMOUNT`] this keeps every share in range.
pub const MAX_WEIGHT_SCALE: u32 = 4;

/// Number of decimal places used when an amount is shown to a person.
pub const DISPLAY_SCALE: u32 = 2;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Participant(ArcStr);

impl Participant {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Must agree with `str`'s hash so maps keyed by `Participant` can be queried with `&str`.
impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for Participant {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed, ordered set of people sharing expenses.
///
/// Roster order is the iteration order of every allocation, balance sheet and
/// settlement list the engine produces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    members: IndexSet<Participant>,
}

impl Roster {
    pub fn new<I, P>(members: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Participant>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.members.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = indexmap::set::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn signum(self) -> i64 {
        if self.0.is_zero() {
            0
        } else if self.0.is_sign_negative() {
            -1
        } else {
            1
        }
    }

    /// Rounds half away from zero to [`DISPLAY_SCALE`] places.
    pub fn round_for_display(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// How a participant engaged with one expense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParticipationRole {
    /// Not part of the expense at all.
    #[default]
    Out,
    Use,
    Choose,
    Gift,
}

impl ParticipationRole {
    pub const ALL: [Self; 4] = [Self::Out, Self::Use, Self::Choose, Self::Gift];

    pub fn is_excluded(self) -> bool {
        matches!(self, Self::Out)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Out => "out",
            Self::Use => "use",
            Self::Choose => "choose",
            Self::Gift => "gift",
        }
    }
}

impl fmt::Display for ParticipationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight each sharing role carries in a weighted split.
///
/// `Out` never carries weight; everything else defaults to
/// `Choose = 1.1`, `Use = 1.0`, `Gift = 0.3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightTable {
    choose: Decimal,
    use_: Decimal,
    gift: Decimal,
}

impl WeightTable {
    pub fn new(choose: Decimal, use_: Decimal, gift: Decimal) -> Result<Self, WeightError> {
        Self::default()
            .with_weight(ParticipationRole::Choose, choose)?
            .with_weight(ParticipationRole::Use, use_)?
            .with_weight(ParticipationRole::Gift, gift)
    }

    pub fn with_weight(
        mut self,
        role: ParticipationRole,
        weight: Decimal,
    ) -> Result<Self, WeightError> {
        if weight < Decimal::ZERO {
            return Err(WeightError::Negative { role, weight });
        }
        if weight > MAX_WEIGHT || weight.normalize().scale() > MAX_WEIGHT_SCALE {
            return Err(WeightError::OutOfRange { role, weight });
        }
        match role {
            ParticipationRole::Out => return Err(WeightError::Unweighted(role)),
            ParticipationRole::Use => self.use_ = weight,
            ParticipationRole::Choose => self.choose = weight,
            ParticipationRole::Gift => self.gift = weight,
        }
        Ok(self)
    }

    pub fn weight(&self, role: ParticipationRole) -> Decimal {
        match role {
            ParticipationRole::Out => Decimal::ZERO,
            ParticipationRole::Use => self.use_,
            ParticipationRole::Choose => self.choose,
            ParticipationRole::Gift => self.gift,
        }
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            choose: Decimal::new(11, 1),
            use_: Decimal::ONE,
            gift: Decimal::new(3, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(pub u64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One shared purchase and how every participant engaged with it.
///
/// Only non-`Out` roles are stored; a participant without an entry is `Out`.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    id: ExpenseId,
    description: String,
    amount: Money,
    payer: Participant,
    roles: IndexMap<Participant, ParticipationRole>,
    overrides: IndexMap<Participant, Money>,
}

impl Expense {
    pub fn try_new(
        id: ExpenseId,
        description: impl Into<String>,
        amount: Money,
        payer: impl Into<Participant>,
    ) -> Result<Self, ExpenseError> {
        if !amount.is_positive() {
            return Err(ExpenseError::InvalidAmount(amount));
        }
        if amount > MAX_AMOUNT {
            return Err(ExpenseError::AmountTooLarge(amount));
        }

        Ok(Self {
            id,
            description: description.into(),
            amount,
            payer: payer.into(),
            roles: IndexMap::new(),
            overrides: IndexMap::new(),
        })
    }

    pub fn with_role(mut self, participant: impl Into<Participant>, role: ParticipationRole) -> Self {
        self.set_role(participant, role);
        self
    }

    pub fn with_override(
        mut self,
        participant: impl Into<Participant>,
        amount: Money,
    ) -> Result<Self, ExpenseError> {
        self.set_override(participant, Some(amount))?;
        Ok(self)
    }

    /// Switching someone to `Out` also drops their override.
    pub fn set_role(&mut self, participant: impl Into<Participant>, role: ParticipationRole) {
        let participant = participant.into();
        if role.is_excluded() {
            self.roles.shift_remove(&participant);
            self.overrides.shift_remove(&participant);
        } else {
            self.roles.insert(participant, role);
        }
    }

    /// `None` or a non-positive amount clears the override; amounts above
    /// [`MAX_AMOUNT`] are rejected.
    pub fn set_override(
        &mut self,
        participant: impl Into<Participant>,
        amount: Option<Money>,
    ) -> Result<(), ExpenseError> {
        let participant = participant.into();
        let Some(amount) = amount.filter(|amount| amount.is_positive()) else {
            self.overrides.shift_remove(&participant);
            return Ok(());
        };
        if amount > MAX_AMOUNT {
            return Err(ExpenseError::AmountTooLarge(amount));
        }
        if self.role(participant.as_str()).is_excluded() {
            return Err(ExpenseError::OverrideOnExcludedParticipant { participant });
        }
        self.overrides.insert(participant, amount);
        Ok(())
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn payer(&self) -> &Participant {
        &self.payer
    }

    pub fn role(&self, participant: &str) -> ParticipationRole {
        self.roles.get(participant).copied().unwrap_or_default()
    }

    pub fn override_for(&self, participant: &str) -> Option<Money> {
        self.overrides.get(participant).copied()
    }

    /// Non-`Out` participants in the order their roles were set.
    pub fn participants(&self) -> impl Iterator<Item = (&Participant, ParticipationRole)> + '_ {
        self.roles.iter().map(|(member, role)| (member, *role))
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&Participant, Money)> + '_ {
        self.overrides.iter().map(|(member, amount)| (member, *amount))
    }
}

/// Share of one expense attributed to each roster member, in roster order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Allocation {
    shares: IndexMap<Participant, Money>,
}

impl Allocation {
    pub(crate) fn new(shares: IndexMap<Participant, Money>) -> Self {
        Self { shares }
    }

    /// Zero for anyone not on the roster the allocation was computed for.
    pub fn get(&self, participant: &str) -> Money {
        self.shares.get(participant).copied().unwrap_or(Money::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Participant, Money)> + '_ {
        self.shares.iter().map(|(member, share)| (member, *share))
    }

    pub fn total(&self) -> Money {
        self.shares.values().sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Net position per participant: positive is owed money, negative owes money.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceSheet {
    balances: IndexMap<Participant, Money>,
}

impl BalanceSheet {
    pub fn new(roster: &Roster) -> Self {
        Self {
            balances: roster
                .iter()
                .map(|member| (member.clone(), Money::ZERO))
                .collect(),
        }
    }

    pub fn get(&self, participant: &str) -> Money {
        self.balances.get(participant).copied().unwrap_or(Money::ZERO)
    }

    /// Adds `delta`, appending the participant if the sheet does not know them yet.
    pub fn adjust(&mut self, participant: &Participant, delta: Money) {
        match self.balances.entry(participant.clone()) {
            Entry::Occupied(mut entry) => *entry.get_mut() += delta,
            Entry::Vacant(entry) => {
                entry.insert(delta);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Participant, Money)> + '_ {
        self.balances.iter().map(|(member, balance)| (member, *balance))
    }

    pub fn total(&self) -> Money {
        self.balances.values().sum()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl<P: Into<Participant>> FromIterator<(P, Money)> for BalanceSheet {
    fn from_iter<T: IntoIterator<Item = (P, Money)>>(iter: T) -> Self {
        let mut sheet = Self::default();
        for (member, balance) in iter {
            sheet.adjust(&member.into(), balance);
        }
        sheet
    }
}

/// A directed payment from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub from: Participant,
    pub to: Participant,
    pub amount: Money,
}

/// Outcome of settling a balance sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct SettleUp {
    pub settlements: Vec<Settlement>,
    /// The input sheet with every settlement applied.
    pub residual: BalanceSheet,
}

impl SettleUp {
    pub fn is_fully_settled(&self) -> bool {
        self.residual
            .iter()
            .all(|(_, balance)| balance.abs() <= SETTLEMENT_EPSILON)
    }

    /// Members left with a balance beyond [`SETTLEMENT_EPSILON`].
    pub fn unsettled(&self) -> impl Iterator<Item = (&Participant, Money)> + '_ {
        self.residual
            .iter()
            .filter(|(_, balance)| balance.abs() > SETTLEMENT_EPSILON)
    }
}
