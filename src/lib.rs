pub mod backend;
pub mod collection;
pub mod config;
pub mod error;
pub mod format;
pub mod invoice;
pub mod model;
pub mod pdf;

pub use collection::{CollectionReport, CollectionView, DateRange, PaymentSummary};
pub use config::Config;
pub use error::{PosError, Result};
pub use invoice::{InvoicePreview, InvoiceView};
