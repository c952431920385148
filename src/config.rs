use std::fmt;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Public copy of the historical automobile sales dataset.
pub const DEFAULT_SOURCE_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

// ---------------------------------------------------------------------------
// Source locator
// ---------------------------------------------------------------------------

/// Where the dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    /// Classify a locator string: `http://` / `https://` are fetched, anything
    /// else is a local file.
    pub fn parse(locator: &str) -> Self {
        let lower = locator.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(locator.to_string())
        } else {
            Source::Path(PathBuf::from(locator))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub source: Source,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: Source::Url(DEFAULT_SOURCE_URL.to_string()),
        }
    }
}

impl DashboardConfig {
    /// Build the configuration from the process arguments (program name
    /// already skipped). At most one positional locator is accepted.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(locator) = args.next() else {
            return Ok(Self::default());
        };
        if let Some(extra) = args.next() {
            bail!("expected a single dataset locator, got an extra argument '{extra}'");
        }
        if locator.trim().is_empty() {
            bail!("dataset locator is empty");
        }
        Ok(Self {
            source: Source::parse(locator.trim()),
        })
    }
}
