//! Resolving the calendar URL and its companion CSV export.

use url::Url;

use crate::config::RewriteConfig;
use crate::error::{RewriteError, RewriteResult};

/// The two documents describing one schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSource {
    pub calendar_url: Url,
    pub table_url: Url,
}

impl ScheduleSource {
    /// Decode and validate a (possibly percent-encoded) calendar URL.
    ///
    /// The host must be exactly the configured one, and the path must end
    /// in the calendar extension so the CSV export can be found next to it.
    pub fn resolve(raw: &str, config: &RewriteConfig) -> RewriteResult<Self> {
        tracing::debug!("Resolving schedule URL {}", raw);

        let invalid = || RewriteError::InvalidUrl(raw.to_string());

        let decoded = urlencoding::decode(raw.trim()).map_err(|_| invalid())?;
        let calendar_url = Url::parse(&decoded).map_err(|_| invalid())?;

        if !matches!(calendar_url.scheme(), "http" | "https") {
            return Err(invalid());
        }

        if calendar_url.host_str() != Some(config.expected_host.as_str()) {
            return Err(RewriteError::UntrustedSource {
                expected: config.expected_host.clone(),
                url: calendar_url.to_string(),
            });
        }

        let stem = calendar_url
            .path()
            .strip_suffix(config.calendar_extension.as_str())
            .ok_or_else(invalid)?;

        let mut table_url = calendar_url.clone();
        table_url.set_path(&format!("{stem}{}", config.table_extension));

        Ok(ScheduleSource {
            calendar_url,
            table_url,
        })
    }
}
