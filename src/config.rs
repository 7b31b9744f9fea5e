// src/config.rs
use std::{
    fmt::Debug,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert technical recruiter. You will receive a Job Description and a Resume. \
Your task is to provide a \"Match Score\" out of 100, identify the top 3 missing keywords, \
suggest 2 specific bullet point improvements for the resume, and finish with a short executive summary of the candidate's fit.";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Process-wide settings, read once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    /// `None` when unset or blank; chat requests then fail with a configuration error.
    pub openai_api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub system_prompt: String,
    pub request_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if request_timeout == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            openai_api_key,
            model: non_blank(lookup("OPENAI_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_blank(lookup("OPENAI_BASE_URL"))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            system_prompt: non_blank(lookup("SYSTEM_PROMPT"))
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            request_timeout: Duration::from_secs(request_timeout),
            host: non_blank(lookup("HOST")).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// What happened when we looked for a `.env` file.
#[derive(Debug)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    Missing,
    Failed(dotenvy::Error),
}

/// Loads `.env` from the working directory or its parents, if present.
pub fn load_dotenv() -> DotenvOutcome {
    classify(dotenvy::dotenv())
}

/// Loads one env file. Never fails: a bad file is reported back so the
/// caller can log it once logging is up.
pub fn load_dotenv_from(path: impl AsRef<Path>) -> DotenvOutcome {
    let path = path.as_ref();
    classify(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn classify(result: Result<PathBuf, dotenvy::Error>) -> DotenvOutcome {
    match result {
        Ok(path) => DotenvOutcome::Loaded(path),
        Err(e) if e.not_found() => DotenvOutcome::Missing,
        Err(e) => DotenvOutcome::Failed(e),
    }
}
