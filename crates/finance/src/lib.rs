//! Finance domain module: the revenue/expense ledger and owner payout statements.
//!
//! Amounts are `Money` (signed minor units). Expenses may be recorded with either sign;
//! every aggregate here sums them by absolute value.

pub mod record;
pub mod statement;

pub use record::{revenue_for_booking, FinanceRecord, LedgerTotals, NewFinanceRecord, RecordKind, ACCOMMODATION};
pub use statement::{owner_statement, payout, OwnerStatement, RevenueItem, StatementProperty, MANAGEMENT_FEE_BPS};
