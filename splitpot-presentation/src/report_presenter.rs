use crate::text_table::{Alignment, TextTableBuilder};
use splitpot_application::{ExpenseAllocation, LedgerReport};
use splitpot_domain::{BalanceSheet, Money, ParticipationRole, SettleUp};
use splitpot_i18n as i18n;
use std::{borrow::Cow, fmt::Write as _};

pub struct ReportPresenter;

impl ReportPresenter {
    /// Renders shares per expense, then balances, then settlements.
    pub fn render(report: &LedgerReport) -> String {
        let mut out = String::with_capacity(1024);

        let _ = writeln!(&mut out, "{}", i18n::EXPENSES);
        if report.allocations.is_empty() {
            let _ = writeln!(&mut out, "{}", i18n::NO_EXPENSES);
        }
        for expense in &report.allocations {
            let _ = writeln!(&mut out);
            out.push_str(&Self::build_share_table(expense));
        }

        let _ = writeln!(&mut out);
        let _ = writeln!(&mut out, "{}", i18n::BALANCES);
        out.push_str(&Self::build_balance_table(&report.balances));

        let _ = writeln!(&mut out);
        let _ = writeln!(&mut out, "{}", i18n::SETTLEMENTS);
        out.push_str(&Self::build_settlement_section(&report.settle_up));

        out
    }

    pub fn build_share_table(expense: &ExpenseAllocation) -> String {
        let mut out = format!(
            "{} {}: {} {} {}\n",
            expense.expense_id,
            expense.description,
            format_amount(expense.amount),
            i18n::PAID_BY,
            expense.payer
        );

        let table = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::MEMBER),
                Cow::Borrowed(i18n::ROLE),
                Cow::Borrowed(i18n::SHARE),
            ])
            .rows(expense.roles.iter().map(|(member, role)| {
                [
                    Cow::Borrowed(member.as_str()),
                    Cow::Borrowed(role_label(*role)),
                    Cow::Owned(format_amount(expense.allocation.get(member.as_str()))),
                ]
            }))
            .build();
        out.push_str(&table);
        out
    }

    pub fn build_balance_table(balances: &BalanceSheet) -> String {
        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed(i18n::MEMBER), Cow::Borrowed(i18n::BALANCE)])
            .rows(balances.iter().map(|(member, balance)| {
                [
                    Cow::Borrowed(member.as_str()),
                    Cow::Owned(format_signed(balance)),
                ]
            }))
            .build()
    }

    pub fn build_settlement_section(settle_up: &SettleUp) -> String {
        let fully_settled = settle_up.is_fully_settled();
        let mut out = if settle_up.settlements.is_empty() {
            if fully_settled {
                format!("{}\n", i18n::ALL_SETTLED)
            } else {
                String::new()
            }
        } else {
            TextTableBuilder::new()
                .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
                .headers(&[
                    Cow::Borrowed(i18n::FROM),
                    Cow::Borrowed(i18n::TO),
                    Cow::Borrowed(i18n::AMOUNT),
                ])
                .rows(settle_up.settlements.iter().map(|settlement| {
                    [
                        Cow::Borrowed(settlement.from.as_str()),
                        Cow::Borrowed(settlement.to.as_str()),
                        Cow::Owned(format_amount(settlement.amount)),
                    ]
                }))
                .build()
        };

        if !fully_settled {
            let _ = writeln!(&mut out, "{}:", i18n::UNSETTLED_RESIDUAL);
            for (member, balance) in settle_up.unsettled() {
                let _ = writeln!(&mut out, "- {member}: {}", format_signed(balance));
            }
        }

        out
    }
}

pub(crate) fn role_label(role: ParticipationRole) -> &'static str {
    match role {
        ParticipationRole::Out => i18n::ROLE_OUT,
        ParticipationRole::Use => i18n::ROLE_USE,
        ParticipationRole::Choose => i18n::ROLE_CHOOSE,
        ParticipationRole::Gift => i18n::ROLE_GIFT,
    }
}

fn display_value(amount: Money) -> Money {
    let rounded = amount.round_for_display();
    // -0.004 rounds to a signed zero
    if rounded.is_zero() { Money::ZERO } else { rounded }
}

fn format_amount(amount: Money) -> String {
    format!("{:.2}", display_value(amount))
}

fn format_signed(amount: Money) -> String {
    let value = display_value(amount);
    let sign = if value.signum() >= 0 { "+" } else { "" };
    format!("{sign}{value:.2}")
}
