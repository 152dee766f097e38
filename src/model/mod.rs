mod invoice;
mod kot;
pub mod lenient;

pub use invoice::{Invoice, InvoiceDocument, InvoiceLineItem, OrderType};
pub use kot::{KotItem, KotRecord, KotStatus, PaymentMethod, REPORTABLE_STATUSES};
