mod range;
mod report;
mod summary;
mod view;

pub use range::DateRange;
pub use report::{breakdown, tiles, BreakdownRow, CollectionReport, SummaryTile};
pub use summary::{PaymentSummary, Tender};
pub use view::{CollectionView, Surface, ViewState, LOAD_ERROR_MESSAGE};
