//! Configuration module
//!
//! Handles CLI configuration including the grading service URL, the
//! assignment this session works against, and where local state lives.

use std::path::PathBuf;

use anyhow::Result;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the grading service
    pub api_url: String,

    /// Assignment id sent with every submission
    pub assignment_id: String,

    /// Directory holding the session file and the saved-versions file
    pub state_dir: PathBuf,
}

impl Config {
    pub fn new(
        api_url: String,
        assignment_id: String,
        state_dir: Option<PathBuf>,
    ) -> Result<Self> {
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            anyhow::bail!("api url must start with http:// or https://");
        }
        if assignment_id.is_empty() {
            anyhow::bail!("assignment id cannot be empty");
        }

        let state_dir = match state_dir {
            Some(dir) => dir,
            None => default_state_dir()?,
        };

        Ok(Self {
            api_url,
            assignment_id,
            state_dir,
        })
    }
}

fn default_state_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .ok_or_else(|| anyhow::anyhow!("HOME is not set; pass --state-dir"))?;
    Ok(PathBuf::from(home).join(".cloudemy"))
}
