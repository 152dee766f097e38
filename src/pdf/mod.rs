mod printer;
mod typst;

pub use printer::{open_path, send_to_printer, Printer, TypstPrinter};
pub use typst::{generate_invoice_pdf, generate_report_pdf};
