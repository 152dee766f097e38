use serde::{Deserialize, Serialize};

pub const DEFAULT_FOOTER: &str = "Thank you for dining with us!";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub business: Business,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub print: PrintSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default = "default_footer")]
    pub footer: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendSettings {
    /// Apply `KOT_BACKEND_URL` / `KOT_BACKEND_KEY` on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("KOT_BACKEND_URL") {
            self.url = Some(url);
        }
        if let Ok(key) = std::env::var("KOT_BACKEND_KEY") {
            self.anon_key = Some(key);
        }
        self
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrintSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Command that receives the rendered PDF path. When unset the PDF is
    /// opened in the system viewer instead.
    #[serde(default)]
    pub command: Option<PrintCommand>,
}

/// Print command, either as one line split on whitespace (`"lp -d counter"`)
/// or as an argument list (`["lp", "-d", "Front Counter"]`) for arguments
/// that contain spaces.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PrintCommand {
    Line(String),
    Args(Vec<String>),
}

impl PrintCommand {
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            Self::Args(args) => args.clone(),
        }
    }
}

impl std::fmt::Display for PrintCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line(line) => write!(f, "{line}"),
            Self::Args(args) => write!(f, "{}", args.join(" ")),
        }
    }
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            command: None,
        }
    }
}

fn default_footer() -> String {
    DEFAULT_FOOTER.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_output_dir() -> String {
    "output".to_string()
}
