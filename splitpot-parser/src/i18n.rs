#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub fn syntax_error_detail(error: impl std::fmt::Display) -> String {
    format!("予期しない入力 - {error}")
}

#[cfg(feature = "ja")]
pub fn syntax_error_unparsed_detail(input: impl std::fmt::Display) -> String {
    format!("解析されていない入力: {input}")
}

#[cfg(feature = "ja")]
pub const DUPLICATE_MEMBERS_DECLARATION: &str = "`MEMBERS := ...` が複数回宣言されています";

#[cfg(feature = "ja")]
pub const DUPLICATE_WEIGHTS_DECLARATION: &str = "`WEIGHTS` が複数回宣言されています";

#[cfg(not(feature = "ja"))]
pub fn syntax_error_detail(error: impl std::fmt::Display) -> String {
    format!("Unexpected input - {error}")
}

#[cfg(not(feature = "ja"))]
pub fn syntax_error_unparsed_detail(input: impl std::fmt::Display) -> String {
    format!("Unparsed input: {input}")
}

#[cfg(not(feature = "ja"))]
pub const DUPLICATE_MEMBERS_DECLARATION: &str = "`MEMBERS := ...` is declared more than once";

#[cfg(not(feature = "ja"))]
pub const DUPLICATE_WEIGHTS_DECLARATION: &str = "`WEIGHTS` is declared more than once";
