#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const ROLE: &str = "役割";
    pub const SHARE: &str = "負担額";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const PAID_BY: &str = "立替者";
    pub const EXPENSES: &str = "支出";
    pub const BALANCES: &str = "収支一覧";
    pub const SETTLEMENTS: &str = "精算";
    pub const NO_EXPENSES: &str = "支出はまだありません。";
    pub const ALL_SETTLED: &str = "精算は不要です。";
    pub const UNSETTLED_RESIDUAL: &str = "精算しきれなかった残額";
    pub const ROLE_OUT: &str = "対象外";
    pub const ROLE_USE: &str = "利用";
    pub const ROLE_CHOOSE: &str = "選択";
    pub const ROLE_GIFT: &str = "贈与";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const ROLE: &str = "Role";
    pub const SHARE: &str = "Share";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const PAID_BY: &str = "paid by";
    pub const EXPENSES: &str = "Expenses";
    pub const BALANCES: &str = "Balances";
    pub const SETTLEMENTS: &str = "Settlements";
    pub const NO_EXPENSES: &str = "No expenses yet.";
    pub const ALL_SETTLED: &str = "All settled.";
    pub const UNSETTLED_RESIDUAL: &str = "Left unsettled";
    pub const ROLE_OUT: &str = "out";
    pub const ROLE_USE: &str = "use";
    pub const ROLE_CHOOSE: &str = "choose";
    pub const ROLE_GIFT: &str = "gift";
}

pub use strings::*;

pub struct SyntaxErrorMessage {
    line: usize,
    detail: String,
}

pub struct LineErrorMessage<D> {
    line: usize,
    detail: D,
}

pub fn syntax_error(line: usize, detail: String) -> SyntaxErrorMessage {
    SyntaxErrorMessage { line, detail }
}

pub fn at_line<D: std::fmt::Display>(line: usize, detail: D) -> LineErrorMessage<D> {
    LineErrorMessage { line, detail }
}

#[cfg(feature = "ja")]
pub const MISSING_MEMBERS_DECLARATION: &str =
    "台帳の先頭に `MEMBERS := ...` の宣言が見つかりません。";

#[cfg(not(feature = "ja"))]
pub const MISSING_MEMBERS_DECLARATION: &str =
    "Could not find a `MEMBERS := ...` declaration at the top of the ledger.";

#[cfg(feature = "ja")]
pub fn duplicate_member(name: impl std::fmt::Display) -> String {
    format!("メンバー '{name}' が重複しています")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_member(name: impl std::fmt::Display) -> String {
    format!("Member '{name}' is listed more than once")
}

#[cfg(feature = "ja")]
pub fn invalid_weights(detail: impl std::fmt::Display) -> String {
    format!("重みの設定が不正です: {detail}")
}

#[cfg(not(feature = "ja"))]
pub fn invalid_weights(detail: impl std::fmt::Display) -> String {
    format!("Invalid weights: {detail}")
}

#[cfg(feature = "ja")]
pub fn negative_weight(role: impl std::fmt::Display, weight: impl std::fmt::Display) -> String {
    format!("役割 '{role}' の重みは負にできません ({weight})")
}

#[cfg(not(feature = "ja"))]
pub fn negative_weight(role: impl std::fmt::Display, weight: impl std::fmt::Display) -> String {
    format!("Weight for '{role}' must not be negative (found {weight})")
}

#[cfg(feature = "ja")]
pub fn weight_out_of_range(
    role: impl std::fmt::Display,
    weight: impl std::fmt::Display,
    max: impl std::fmt::Display,
    scale: u32,
) -> String {
    format!("役割 '{role}' の重みは {max} 以下、小数点以下 {scale} 桁までです ({weight})")
}

#[cfg(not(feature = "ja"))]
pub fn weight_out_of_range(
    role: impl std::fmt::Display,
    weight: impl std::fmt::Display,
    max: impl std::fmt::Display,
    scale: u32,
) -> String {
    format!(
        "Weight for '{role}' must be at most {max} with at most {scale} decimal places (found {weight})"
    )
}

#[cfg(feature = "ja")]
pub fn unweighted_role(role: impl std::fmt::Display) -> String {
    format!("役割 '{role}' には重みを設定できません")
}

#[cfg(not(feature = "ja"))]
pub fn unweighted_role(role: impl std::fmt::Display) -> String {
    format!("Role '{role}' never carries a weight")
}

#[cfg(feature = "ja")]
pub fn unknown_expense(id: impl std::fmt::Display) -> String {
    format!("支出 {id} は存在しません")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_expense(id: impl std::fmt::Display) -> String {
    format!("Expense {id} does not exist")
}

#[cfg(feature = "ja")]
pub fn unknown_member(name: impl std::fmt::Display) -> String {
    format!("'{name}' はメンバーではありません")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_member(name: impl std::fmt::Display) -> String {
    format!("'{name}' is not on the roster")
}

#[cfg(feature = "ja")]
pub fn duplicate_participant(name: impl std::fmt::Display) -> String {
    format!("'{name}' が同じ支出に複数回指定されています")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_participant(name: impl std::fmt::Display) -> String {
    format!("'{name}' is listed more than once in the same expense")
}

#[cfg(feature = "ja")]
pub const EMPTY_DESCRIPTION: &str = "支出の説明が空です";

#[cfg(not(feature = "ja"))]
pub const EMPTY_DESCRIPTION: &str = "Expense description must not be empty";

#[cfg(feature = "ja")]
pub fn invalid_amount(amount: impl std::fmt::Display) -> String {
    format!("金額は正の値である必要があります ({amount})")
}

#[cfg(not(feature = "ja"))]
pub fn invalid_amount(amount: impl std::fmt::Display) -> String {
    format!("Expense amount must be positive (found {amount})")
}

#[cfg(feature = "ja")]
pub fn amount_too_large(amount: impl std::fmt::Display, limit: impl std::fmt::Display) -> String {
    format!("金額 {amount} が上限 {limit} を超えています")
}

#[cfg(not(feature = "ja"))]
pub fn amount_too_large(amount: impl std::fmt::Display, limit: impl std::fmt::Display) -> String {
    format!("Amount {amount} exceeds the limit of {limit}")
}

#[cfg(feature = "ja")]
pub fn override_on_excluded(name: impl std::fmt::Display) -> String {
    format!("対象外の '{name}' には固定額を設定できません")
}

#[cfg(not(feature = "ja"))]
pub fn override_on_excluded(name: impl std::fmt::Display) -> String {
    format!("Cannot override the share of '{name}', who is out of this expense")
}

#[cfg(feature = "ja")]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "構文エラー (行 {}): {}", self.line, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}

#[cfg(feature = "ja")]
impl<D: std::fmt::Display> std::fmt::Display for LineErrorMessage<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (行 {})", self.detail, self.line)
    }
}

#[cfg(not(feature = "ja"))]
impl<D: std::fmt::Display> std::fmt::Display for LineErrorMessage<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {})", self.detail, self.line)
    }
}
