mod preview;
mod view;

pub use preview::InvoicePreview;
pub use view::{BadgeStyle, InvoiceRowView, InvoiceView, OrderBadge, TAX_LABEL, WALK_IN_CUSTOMER};
