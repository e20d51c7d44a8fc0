#![warn(clippy::uninlined_format_args)]

mod i18n;

use fxhash::FxHashSet;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while1},
    character::complete::{char, digit1, multispace1},
    combinator::{map_res, opt, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, terminated},
};
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Out,
    Use,
    Choose,
    Gift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightSetting {
    pub role: Role,
    pub weight: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation<'a> {
    pub name: &'a str,
    pub role: Role,
    pub override_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseEntry<'a> {
    pub description: &'a str,
    pub amount: Decimal,
    pub payer: &'a str,
    pub participations: Vec<Participation<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    Members(Vec<&'a str>),
    Weights(Vec<WeightSetting>),
    Expense(ExpenseEntry<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseWithLine<'a> {
    pub line: usize,
    pub expense: ExpenseEntry<'a>,
}

/// A parsed ledger file: roster, optional weight settings and expenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger<'a> {
    pub members: Vec<&'a str>,
    pub weights: Vec<WeightSetting>,
    pub expenses: Vec<ExpenseWithLine<'a>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Missing `MEMBERS := ...` declaration before line {line}.")]
    MissingMembersDeclaration { line: usize },
    #[error("Member '{name}' is listed twice at line {line}.")]
    DuplicateMember { name: String, line: usize },
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
}

fn sp(input: &str) -> IResult<&str, &str> {
    fn comment(input: &str) -> IResult<&str, &str> {
        delimited(tag("/*"), take_until("*/"), tag("*/")).parse(input)
    }

    fn line_comment(input: &str) -> IResult<&str, &str> {
        recognize((tag("//"), take_till(|c| c == '\n'))).parse(input)
    }

    recognize(many0(alt((multispace1, comment, line_comment)))).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || c == '\'').parse(input)
}

fn decimal(input: &str) -> IResult<&str, Decimal> {
    map_res(
        recognize((digit1, opt((char('.'), digit1)))),
        Decimal::from_str,
    )
    .parse(input)
}

fn amount(input: &str) -> IResult<&str, Decimal> {
    (opt(alt((char('€'), char('$')))), sp, decimal)
        .map(|(_, _, value)| value)
        .parse(input)
}

fn role(input: &str) -> IResult<&str, Role> {
    alt((
        tag_no_case("out").map(|_| Role::Out),
        tag_no_case("use").map(|_| Role::Use),
        tag_no_case("choose").map(|_| Role::Choose),
        tag_no_case("gift").map(|_| Role::Gift),
    ))
    .parse(input)
}

fn weighted_role(input: &str) -> IResult<&str, Role> {
    alt((
        tag_no_case("use").map(|_| Role::Use),
        tag_no_case("choose").map(|_| Role::Choose),
        tag_no_case("gift").map(|_| Role::Gift),
    ))
    .parse(input)
}

fn list_separator(input: &str) -> IResult<&str, ()> {
    (sp, opt(char(',')), sp).map(|_| ()).parse(input)
}

// MEMBERS := Alice Bob, Carol
fn members(input: &str) -> IResult<&str, Vec<&str>> {
    (
        tag_no_case("MEMBERS"),
        sp,
        tag(":="),
        sp,
        many1(terminated(identifier, list_separator)),
    )
        .map(|(_, _, _, _, names)| names)
        .parse(input)
}

fn weight_setting(input: &str) -> IResult<&str, WeightSetting> {
    (weighted_role, sp, char('='), sp, decimal)
        .map(|(role, _, _, _, weight)| WeightSetting { role, weight })
        .parse(input)
}

// WEIGHTS choose=1.1 use=1.0 gift=0.3
fn weights(input: &str) -> IResult<&str, Vec<WeightSetting>> {
    (
        tag_no_case("WEIGHTS"),
        sp,
        many1(terminated(weight_setting, list_separator)),
    )
        .map(|(_, _, settings)| settings)
        .parse(input)
}

fn description(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c| c == '"'), char('"')).parse(input)
}

fn paid_by(input: &str) -> IResult<&str, &str> {
    recognize((tag_no_case("paid"), sp, tag_no_case("by"))).parse(input)
}

// {name} {role} [{override}]
fn participation(input: &str) -> IResult<&str, Participation<'_>> {
    (identifier, sp, role, opt((sp, amount)))
        .map(|(name, _, role, override_amount)| Participation {
            name,
            role,
            override_amount: override_amount.map(|(_, value)| value),
        })
        .parse(input)
}

fn participations(input: &str) -> IResult<&str, Vec<Participation<'_>>> {
    (
        char(':'),
        sp,
        separated_list1((sp, char(','), sp), participation),
    )
        .map(|(_, _, entries)| entries)
        .parse(input)
}

// "{description}" {amount} paid by {payer}[: {participations}]
fn expense(input: &str) -> IResult<&str, ExpenseEntry<'_>> {
    (
        description,
        sp,
        amount,
        sp,
        paid_by,
        sp,
        identifier,
        sp,
        opt(participations),
    )
        .map(
            |(description, _, amount, _, _, _, payer, _, participations)| ExpenseEntry {
                description,
                amount,
                payer,
                participations: participations.unwrap_or_default(),
            },
        )
        .parse(input)
}

fn statement(input: &str) -> IResult<&str, Statement<'_>> {
    alt((
        members.map(Statement::Members),
        weights.map(Statement::Weights),
        expense.map(Statement::Expense),
    ))
    .parse(input)
}

fn statement_with_sp(input: &str) -> IResult<&str, Statement<'_>> {
    (sp, statement, sp).map(|(_, stmt, _)| stmt).parse(input)
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<Statement<'_>>, ParseError> {
    let (rest, _) = sp(line).map_err(|e| ParseError::SyntaxError {
        line: line_no,
        detail: i18n::syntax_error_detail(e),
    })?;
    if rest.trim().is_empty() {
        return Ok(None);
    }

    match statement_with_sp(rest) {
        Ok((rest, stmt)) if rest.trim().is_empty() => Ok(Some(stmt)),
        Ok((rest, _)) => Err(ParseError::SyntaxError {
            line: line_no,
            detail: i18n::syntax_error_unparsed_detail(rest.trim()),
        }),
        Err(e) => Err(ParseError::SyntaxError {
            line: line_no,
            detail: i18n::syntax_error_detail(e),
        }),
    }
}

/// Parses a ledger file.
///
/// The first statement must be `MEMBERS := ...`. `WEIGHTS` may appear at most
/// once. Names are not checked against the roster here.
pub fn parse_ledger(input: &str) -> Result<Ledger<'_>, ParseError> {
    let mut members: Option<Vec<&str>> = None;
    let mut weights: Option<Vec<WeightSetting>> = None;
    let mut expenses = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let line = idx + 1;
        let Some(stmt) = parse_line(line, raw_line)? else {
            continue;
        };

        match stmt {
            Statement::Members(names) => {
                if members.is_some() {
                    return Err(ParseError::SyntaxError {
                        line,
                        detail: i18n::DUPLICATE_MEMBERS_DECLARATION.to_string(),
                    });
                }
                let mut seen = FxHashSet::default();
                if let Some(name) = names.iter().find(|name| !seen.insert(**name)) {
                    return Err(ParseError::DuplicateMember {
                        name: (*name).to_string(),
                        line,
                    });
                }
                members = Some(names);
            }
            _ if members.is_none() => {
                return Err(ParseError::MissingMembersDeclaration { line });
            }
            Statement::Weights(settings) => {
                if weights.is_some() {
                    return Err(ParseError::SyntaxError {
                        line,
                        detail: i18n::DUPLICATE_WEIGHTS_DECLARATION.to_string(),
                    });
                }
                weights = Some(settings);
            }
            Statement::Expense(expense) => expenses.push(ExpenseWithLine { line, expense }),
        }
    }

    let Some(members) = members else {
        return Err(ParseError::MissingMembersDeclaration {
            line: input.lines().count().max(1),
        });
    };

    Ok(Ledger {
        members,
        weights: weights.unwrap_or_default(),
        expenses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn entry(name: &str, role: Role, override_amount: Option<Decimal>) -> Participation<'_> {
        Participation {
            name,
            role,
            override_amount,
        }
    }

    #[rstest]
    #[case::spaces("MEMBERS := Gili Lena Lukas", &["Gili", "Lena", "Lukas"])]
    #[case::commas("MEMBERS := Gili, Lena,Lukas", &["Gili", "Lena", "Lukas"])]
    #[case::unicode("MEMBERS := Zoë 花子", &["Zoë", "花子"])]
    #[case::lowercase("members := A B", &["A", "B"])]
    #[case::mixed_case("Members := A", &["A"])]
    fn test_members(#[case] input: &str, #[case] expected: &[&str]) {
        let (_, names) = members(input).unwrap();
        assert_eq!(names, expected);
    }

    #[rstest]
    #[case::integer("42", dec!(42))]
    #[case::fraction("42.50", dec!(42.50))]
    #[case::euro("€88.8", dec!(88.8))]
    #[case::dollar_spaced("$ 7.25", dec!(7.25))]
    fn test_amount(#[case] input: &str, #[case] expected: Decimal) {
        let (_, value) = amount(input).unwrap();
        assert_eq!(value, expected);
    }

    #[rstest]
    #[case::lower("use", Role::Use)]
    #[case::upper("CHOOSE", Role::Choose)]
    #[case::mixed("Gift", Role::Gift)]
    #[case::out("out", Role::Out)]
    fn test_role(#[case] input: &str, #[case] expected: Role) {
        let (_, parsed) = role(input).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_weights() {
        let (_, settings) = weights("WEIGHTS choose=1.2, use = 1 gift=0.25").unwrap();
        assert_eq!(
            settings,
            vec![
                WeightSetting {
                    role: Role::Choose,
                    weight: dec!(1.2)
                },
                WeightSetting {
                    role: Role::Use,
                    weight: dec!(1)
                },
                WeightSetting {
                    role: Role::Gift,
                    weight: dec!(0.25)
                },
            ]
        );
    }

    #[test]
    fn test_weights_reject_out() {
        assert!(weights("WEIGHTS out=1").is_err());
    }

    #[rstest]
    #[case::full(
        "\"Lilith's Midnight Oil\" €88.80 paid by Nora: Gili gift, Lena choose, Lukas use 20, Nora use",
        ExpenseEntry {
            description: "Lilith's Midnight Oil",
            amount: dec!(88.80),
            payer: "Nora",
            participations: vec![
                entry("Gili", Role::Gift, None),
                entry("Lena", Role::Choose, None),
                entry("Lukas", Role::Use, Some(dec!(20))),
                entry("Nora", Role::Use, None),
            ],
        }
    )]
    #[case::no_participants(
        "\"Deposit\" 100 PAID BY Gili",
        ExpenseEntry {
            description: "Deposit",
            amount: dec!(100),
            payer: "Gili",
            participations: vec![],
        }
    )]
    #[case::inline_comment(
        "\"Bread\" 3.2 /* bakery */ paid by Lena: Lena use",
        ExpenseEntry {
            description: "Bread",
            amount: dec!(3.2),
            payer: "Lena",
            participations: vec![entry("Lena", Role::Use, None)],
        }
    )]
    fn test_expense(#[case] input: &str, #[case] expected: ExpenseEntry<'_>) {
        let (rest, parsed) = expense(input).unwrap();
        assert!(rest.trim().is_empty(), "unparsed: {rest}");
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_ledger() {
        let input = "\
// housemates
MEMBERS := Gili Lena Lukas Nora Philip
WEIGHTS gift=0.2

\"Hypatia's Star Maps\" 42.5 paid by Lena: Gili choose, Lena use, Nora use, Philip gift
\"Lilith's Midnight Oil\" 88.8 paid by Nora: Gili gift, Lena choose // late night
";
        let ledger = parse_ledger(input).expect("ledger should parse");

        assert_eq!(ledger.members, ["Gili", "Lena", "Lukas", "Nora", "Philip"]);
        assert_eq!(
            ledger.weights,
            vec![WeightSetting {
                role: Role::Gift,
                weight: dec!(0.2)
            }]
        );
        assert_eq!(ledger.expenses.len(), 2);
        assert_eq!(ledger.expenses[0].line, 5);
        assert_eq!(ledger.expenses[1].line, 6);
        assert_eq!(ledger.expenses[1].expense.participations.len(), 2);
    }

    #[rstest]
    #[case::empty("", 1)]
    #[case::comment_only("// nothing yet", 1)]
    #[case::expense_first("\"Tea\" 4 paid by Gili\nMEMBERS := Gili", 1)]
    #[case::weights_first("\n\nWEIGHTS use=1\nMEMBERS := Gili", 3)]
    fn test_missing_members(#[case] input: &str, #[case] line: usize) {
        assert_eq!(
            parse_ledger(input),
            Err(ParseError::MissingMembersDeclaration { line })
        );
    }

    #[test]
    fn test_duplicate_member() {
        assert_eq!(
            parse_ledger("MEMBERS := Gili Lena Gili"),
            Err(ParseError::DuplicateMember {
                name: "Gili".to_string(),
                line: 1
            })
        );
    }

    #[rstest]
    #[case::second_members("MEMBERS := A\nMEMBERS := B", 2)]
    #[case::second_weights("MEMBERS := A\nWEIGHTS use=1\nWEIGHTS gift=1", 3)]
    #[case::missing_amount("MEMBERS := A\n\"Tea\" paid by A", 2)]
    #[case::trailing_garbage("MEMBERS := A\n\"Tea\" 4 paid by A: A use ???", 2)]
    #[case::unterminated_comment("MEMBERS := A\n\"Tea\" 4 /* paid by A", 2)]
    #[case::unterminated_description("MEMBERS := A\n\"Tea 4 paid by A", 2)]
    fn test_syntax_errors(#[case] input: &str, #[case] expected_line: usize) {
        match parse_ledger(input) {
            Err(ParseError::SyntaxError { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_lowercase_keywords_declare_the_ledger() {
        let ledger = parse_ledger("members := A B\nweights gift=1\n\"Tea\" 4 paid by A: B gift")
            .expect("lowercase keywords should parse");

        assert_eq!(ledger.members, ["A", "B"]);
        assert_eq!(ledger.weights.len(), 1);
        assert_eq!(ledger.expenses.len(), 1);
    }

    #[rstest]
    #[case::missing_amount("MEMBERS := A\n\"Tea\" paid by A")]
    #[case::trailing_garbage("MEMBERS := A\n\"Tea\" 4 paid by A: A use ???")]
    fn test_syntax_error_detail_is_not_prefixed(#[case] input: &str) {
        match parse_ledger(input) {
            Err(ParseError::SyntaxError { detail, .. }) => {
                assert!(!detail.is_empty());
                assert!(!detail.starts_with("Syntax error"), "{detail}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }
}
