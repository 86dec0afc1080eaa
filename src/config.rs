// src/config.rs

use std::env;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use url::Url;

/// Default published export, overridable with `PODIUM_SHEET_URL`.
const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vREoOJcRvBQYqDlGB236JdFGax7LNag1b_GaHyMwzFxUC2BTa8C6xdc7S_SH4UvTyuzimjsYAJBg1K7/pub?output=csv";

const DEFAULT_REFRESH_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Console,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sheet_url: Url,
    pub refresh: Duration,
    pub request_timeout: Duration,
    pub output: OutputKind,
}

impl Config {
    /// Read configuration from the environment, once at startup.
    pub fn from_env() -> Result<Self> {
        let url = env::var("PODIUM_SHEET_URL").unwrap_or_else(|_| DEFAULT_SHEET_URL.to_string());
        let refresh = env::var("PODIUM_REFRESH_SECS").ok();
        let timeout = env::var("PODIUM_REQUEST_TIMEOUT_SECS").ok();
        let output = env::var("PODIUM_OUTPUT").ok();
        Self::build(
            &url,
            refresh.as_deref(),
            timeout.as_deref(),
            output.as_deref(),
        )
    }

    fn build(
        url: &str,
        refresh: Option<&str>,
        timeout: Option<&str>,
        output: Option<&str>,
    ) -> Result<Self> {
        let sheet_url =
            Url::parse(url).with_context(|| format!("invalid sheet URL {:?}", url))?;
        let refresh = parse_secs(refresh, DEFAULT_REFRESH_SECS).context("PODIUM_REFRESH_SECS")?;
        let request_timeout =
            parse_secs(timeout, DEFAULT_REQUEST_TIMEOUT_SECS).context("PODIUM_REQUEST_TIMEOUT_SECS")?;

        let output = match output.map(|s| s.trim().to_lowercase()) {
            None => OutputKind::Console,
            Some(s) if s == "console" => OutputKind::Console,
            Some(s) if s == "json" => OutputKind::Json,
            Some(s) => bail!("unknown PODIUM_OUTPUT {:?} (expected console or json)", s),
        };

        Ok(Self {
            sheet_url,
            refresh,
            request_timeout,
            output,
        })
    }
}

fn parse_secs(raw: Option<&str>, default: u64) -> Result<Duration> {
    let secs = match raw {
        None => default,
        Some(s) => s
            .trim()
            .parse::<u64>()
            .with_context(|| format!("not a whole number of seconds: {:?}", s))?,
    };
    ensure!(secs > 0, "must be at least 1 second");
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = Config::build(DEFAULT_SHEET_URL, None, None, None).unwrap();
        assert_eq!(cfg.refresh, Duration::from_secs(30));
        assert_eq!(cfg.request_timeout, Duration::from_secs(20));
        assert_eq!(cfg.output, OutputKind::Console);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = Config::build("https://example.com/pub?output=csv", Some("5"), Some("3"), Some("json"))
            .unwrap();
        assert_eq!(cfg.refresh, Duration::from_secs(5));
        assert_eq!(cfg.request_timeout, Duration::from_secs(3));
        assert_eq!(cfg.output, OutputKind::Json);
    }

    #[test]
    fn bad_refresh_is_rejected() {
        assert!(Config::build(DEFAULT_SHEET_URL, Some("soon"), None, None).is_err());
        assert!(Config::build(DEFAULT_SHEET_URL, Some("0"), None, None).is_err());
    }

    #[test]
    fn bad_url_and_bad_output_are_rejected() {
        assert!(Config::build("not a url", None, None, None).is_err());
        assert!(Config::build(DEFAULT_SHEET_URL, None, None, Some("xml")).is_err());
    }
}
