use crate::{error::LedgerParseError, model::ExpenseBook};
use splitpot_domain::WeightTable;

pub trait LedgerParser: Send + Sync {
    /// Builds an expense book from ledger text.
    ///
    /// `base_weights` is used for every role the ledger does not reweight itself.
    fn parse(
        &self,
        content: &str,
        base_weights: WeightTable,
    ) -> Result<ExpenseBook, LedgerParseError>;
}
