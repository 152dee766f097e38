use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("Config directory not found at {0}. Run 'kot init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Backend is not configured. Set [backend] url and anon_key in config.toml or KOT_BACKEND_URL / KOT_BACKEND_KEY.")]
    BackendNotConfigured,

    #[error("Backend request failed: {0}")]
    Request(#[from] ureq::Error),

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Invoice '{0}' not found")]
    InvoiceNotFound(String),

    #[error("Specify either an invoice number or --file, not both")]
    AmbiguousInvoiceSource,

    #[error("No invoice specified. Pass an invoice number or --file <path>.")]
    NoInvoice,

    #[error("Failed to load collection data: {0}")]
    CollectionUnavailable(String),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Print command '{command}' failed: {reason}")]
    PrintFailed { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PosError>;
