pub mod allocator;
pub mod balance_accumulator;
pub mod settlement_reducer;

pub use allocator::Allocator;
pub use balance_accumulator::BalanceAccumulator;
pub use settlement_reducer::SettlementReducer;
