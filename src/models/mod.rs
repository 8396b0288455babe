pub mod filter;
pub mod record;

pub use filter::{DateRange, FilterSpec};
pub use record::{RawTradeRecord, RecordError, TradeRecord, UNASSIGNED_LABEL};
