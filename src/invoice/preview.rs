use crate::config::Business;
use crate::error::Result;
use crate::model::InvoiceDocument;
use crate::pdf::Printer;

use super::InvoiceView;

/// An invoice on screen with its two actions. Holds nothing beyond what it
/// was given.
pub struct InvoicePreview {
    view: InvoiceView,
    printer: Box<dyn Printer>,
    on_close: Box<dyn FnMut()>,
}

impl InvoicePreview {
    pub fn new(
        business: &Business,
        doc: &InvoiceDocument,
        printer: Box<dyn Printer>,
        on_close: impl FnMut() + 'static,
    ) -> Self {
        Self {
            view: InvoiceView::build(business, doc),
            printer,
            on_close: Box::new(on_close),
        }
    }

    pub fn view(&self) -> &InvoiceView {
        &self.view
    }

    /// Dismiss the preview.
    pub fn close(&mut self) {
        (self.on_close)();
    }

    /// Send the whole current view to the print surface.
    pub fn print(&self) -> Result<()> {
        self.printer.print(&self.view)
    }
}
