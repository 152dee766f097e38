use serde::Serialize;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::collection::CollectionReport;
use crate::error::{PosError, Result};
use crate::invoice::InvoiceView;

/// Embedded Typst template for the printed invoice.
/// Interactive controls and the on-screen footer are not part of the print.
const INVOICE_TEMPLATE: &str = r##"// Invoice Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "a5",
  margin: (top: 1.2cm, bottom: 1.2cm, left: 1.2cm, right: 1.2cm),
)

#set text(size: 9pt)

#let badge-colors = (
  blue: (rgb("#dbeafe"), rgb("#1e40af")),
  green: (rgb("#dcfce7"), rgb("#166534")),
  purple: (rgb("#f3e8ff"), rgb("#6b21a8")),
)

// Header band
#block(fill: rgb("#dc2626"), width: 100%, inset: 12pt, radius: (top: 4pt))[
  #set text(fill: white)
  #grid(
    columns: (1fr, 1fr),
    align: (left, right),
    [
      #text(size: 18pt, weight: "bold")[INVOICE] \
      #data.business_name
    ],
    [
      Invoice \#: #data.invoice_number \
      Date: #data.date \
      Time: #data.time
    ]
  )
]

#v(1em)

// Billing details and order summary
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [
    #text(weight: "bold")[Bill To:] \
    #data.bill_to
    #if data.phone != none [ \ Phone: #data.phone ]
    #if data.table != none [ \ Table: #data.table ]
    #v(0.4em)
    #let (bg, fg) = badge-colors.at(data.badge.style)
    #box(fill: bg, inset: (x: 8pt, y: 3pt), radius: 8pt)[
      #text(fill: fg, size: 8pt, weight: "bold")[#data.badge.label]
    ]
  ],
  [
    #text(weight: "bold")[Order Summary] \
    Items: #data.item_count \
    Subtotal: #data.subtotal \
    #data.tax_label: #data.tax \
    #v(0.3em)
    #text(size: 12pt, weight: "bold")[Total: #data.total]
  ]
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(0.5em)

// Line items
#table(
  columns: (1fr, auto, auto, auto),
  align: (left, right, right, right),
  stroke: none,
  inset: 6pt,
  fill: (x, y) => if y == 0 { luma(240) } else if calc.even(y) { luma(248) } else { none },

  [*ITEM*], [*QTY*], [*PRICE*], [*TOTAL*],

  ..data.rows.map(row => (
    row.name,
    str(row.quantity),
    row.unit_price,
    row.line_total,
  )).flatten()
)
"##;

/// Embedded Typst template for the collection report.
const REPORT_TEMPLATE: &str = r##"// Collection Report Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
)

#set text(size: 10pt)

#let tile-colors = (
  CASH: rgb("#16a34a"),
  UPI: rgb("#2563eb"),
  CARD: rgb("#9333ea"),
  TOTAL: rgb("#334155"),
)

#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [
    #text(size: 18pt, weight: "bold")[Collection Report]
    #v(0.3em)
    #data.business_name
  ],
  [
    #text(size: 10pt, fill: gray)[Generated #data.generated_at] \
    #data.range_label
  ]
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

// Headline tiles
#grid(
  columns: (1fr, 1fr, 1fr, 1fr),
  gutter: 8pt,
  ..data.tiles.map(tile => block(
    fill: tile-colors.at(tile.tag),
    inset: 10pt,
    radius: 4pt,
    width: 100%,
  )[
    #set text(fill: white)
    #text(size: 8pt, weight: "bold")[#tile.tag] \
    #text(size: 14pt, weight: "bold")[#tile.amount]
    #if tile.detail != none [ \ #text(size: 7pt)[#tile.detail] ]
  ])
)

#v(1.5em)

#text(size: 12pt, weight: "bold")[Payment Breakdown]
#v(0.5em)

#table(
  columns: (auto, 1fr, auto),
  align: (left, left, right),
  stroke: (x, y) => (bottom: 0.5pt + gray),
  inset: 8pt,
  fill: (x, y) => if y == data.breakdown.len() - 1 { luma(240) } else { none },

  ..data.breakdown.map(row => (
    text(weight: "bold")[#row.heading],
    text(fill: gray)[#row.detail],
    text(weight: "bold")[#row.amount],
  )).flatten()
)
"##;

/// Write `data` as JSON next to `template` and compile both with the Typst CLI.
fn compile<T: Serialize>(template: &str, data: &T, stem: &str, output_path: &Path) -> Result<()> {
    // Check if typst is available
    if Command::new("typst").arg("--version").output().is_err() {
        return Err(PosError::TypstNotFound);
    }

    let temp_dir = std::env::temp_dir().join("kot-cli");
    std::fs::create_dir_all(&temp_dir)?;

    let json_data =
        serde_json::to_string(data).map_err(|e| PosError::PdfGeneration(e.to_string()))?;
    let json_name = format!("{stem}.json");
    let json_path = temp_dir.join(&json_name);
    std::fs::write(&json_path, &json_data)?;

    let template_content = template.replace("DATA_JSON_PATH", &json_name);
    let template_path = temp_dir.join(format!("{stem}.typ"));
    std::fs::write(&template_path, &template_content)?;

    debug!(template = %template_path.display(), output = %output_path.display(), "typst compile");
    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(&temp_dir)
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    let _ = std::fs::remove_file(&template_path);
    let _ = std::fs::remove_file(&json_path);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PosError::PdfGeneration(stderr.to_string()));
    }

    Ok(())
}

/// Render a printable invoice PDF
pub fn generate_invoice_pdf(view: &InvoiceView, output_path: &Path) -> Result<()> {
    compile(INVOICE_TEMPLATE, view, "invoice", output_path)
}

/// Render the collection report PDF
pub fn generate_report_pdf(report: &CollectionReport, output_path: &Path) -> Result<()> {
    compile(REPORT_TEMPLATE, report, "report", output_path)
}
