use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

use super::generate_invoice_pdf;
use crate::config::PrintCommand;
use crate::error::{PosError, Result};
use crate::invoice::InvoiceView;

/// The platform print surface.
pub trait Printer {
    fn print(&self, view: &InvoiceView) -> Result<()>;
}

/// Prints through a PDF: rendered with Typst, then passed to a print command
/// or opened in the system viewer for print preview.
pub struct TypstPrinter {
    output_dir: PathBuf,
    command: Option<PrintCommand>,
}

impl TypstPrinter {
    pub fn new(output_dir: PathBuf, command: Option<PrintCommand>) -> Self {
        Self {
            output_dir,
            command,
        }
    }

    pub fn pdf_path(&self, view: &InvoiceView) -> PathBuf {
        self.output_dir
            .join(format!("{}.pdf", file_stem(&view.invoice_number)))
    }
}

impl Printer for TypstPrinter {
    fn print(&self, view: &InvoiceView) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        let pdf_path = self.pdf_path(view);
        generate_invoice_pdf(view, &pdf_path)?;
        info!(path = %pdf_path.display(), "invoice rendered");

        match &self.command {
            Some(command) => send_to_printer(command, &pdf_path),
            None => open_path(&pdf_path),
        }
    }
}

/// Invoice numbers may contain separators that are not valid in file names.
fn file_stem(invoice_number: &str) -> String {
    invoice_number
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

/// Run the configured print command (e.g. `lp -d counter`) with the PDF path appended.
pub fn send_to_printer(command: &PrintCommand, pdf_path: &Path) -> Result<()> {
    let args = command.args();
    let (program, rest) = args.split_first().ok_or_else(|| PosError::PrintFailed {
        command: command.to_string(),
        reason: "empty command".to_string(),
    })?;

    let output = Command::new(program)
        .args(rest)
        .arg(pdf_path)
        .output()
        .map_err(|e| PosError::PrintFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(PosError::PrintFailed {
            command: command.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Open a file with the system default viewer
pub fn open_path(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
