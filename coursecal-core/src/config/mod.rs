//! Rewrite configuration.
//!
//! Everything the rewrite depends on that is specific to one schedule
//! provider, language or cohort lives here instead of in the pipeline:
//! the trusted host, the CSV column labels, the description prefixes and
//! the inclusion policy. The defaults reproduce the TimeEdit/DVACD16 feed.

mod policy;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{RewriteError, RewriteResult};
use crate::table::Role;

pub use policy::{Decision, Policy, PolicyRule};

static DEFAULT_HOST: &str = "se.timeedit.net";

/// Configuration at ~/.config/coursecal/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// The only host calendar URLs may point at
    pub expected_host: String,

    /// Extension of the calendar feed path (replaced to find the CSV export)
    pub calendar_extension: String,

    /// Extension of the companion CSV export
    pub table_extension: String,

    /// IANA zone the CSV export's dates and times are written in.
    /// Uses the system's local time when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    pub table: TableLayout,

    /// Header label -> column role. Several labels may share a role.
    pub labels: BTreeMap<String, Role>,

    pub description: DescriptionLabels,

    pub policy: Policy,
}

/// Where the header and the course code legend sit in the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub header_row: usize,
    pub legend_row: usize,
    pub legend_column: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        TableLayout {
            header_row: 0,
            legend_row: 1,
            legend_column: 0,
        }
    }
}

/// Line prefixes used when composing event descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionLabels {
    pub teacher: String,
    pub course: String,
    pub info: String,
    pub text: String,
}

impl Default for DescriptionLabels {
    fn default() -> Self {
        DescriptionLabels {
            teacher: "Teacher: ".to_string(),
            course: "Course: ".to_string(),
            info: "Info: ".to_string(),
            text: "Text:".to_string(),
        }
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfig {
            expected_host: DEFAULT_HOST.to_string(),
            calendar_extension: ".ics".to_string(),
            table_extension: ".csv".to_string(),
            timezone: None,
            table: TableLayout::default(),
            labels: default_labels(),
            description: DescriptionLabels::default(),
            policy: Policy::default(),
        }
    }
}

/// Swedish column labels used by TimeEdit exports
fn default_labels() -> BTreeMap<String, Role> {
    [
        ("Startdatum", Role::StartDate),
        ("Starttid", Role::StartTime),
        ("Slutdatum", Role::StopDate),
        ("Sluttid", Role::StopTime),
        ("Kurs", Role::Course),
        ("Person", Role::Person),
        ("Lärare", Role::Person),
        ("Lokal", Role::Room),
        ("Moment", Role::Type),
        ("Undervisningstyp", Role::Type),
        ("Text", Role::Text),
        ("Information till student", Role::Info),
    ]
    .into_iter()
    .map(|(label, role)| (label.to_string(), role))
    .collect()
}

impl RewriteConfig {
    pub fn config_path() -> RewriteResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RewriteError::Config("Could not determine config directory".into()))?
            .join("coursecal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present and the built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> RewriteResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::config_path()?;
                if !default_path.exists() {
                    tracing::debug!(
                        "No config at {}, using built-in defaults",
                        default_path.display()
                    );
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Configuration loaded from {}", path.display());

        Ok(config)
    }

    pub fn from_toml(content: &str) -> RewriteResult<Self> {
        let config: RewriteConfig =
            toml::from_str(content).map_err(|e| RewriteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> RewriteResult<()> {
        if self.expected_host.is_empty() {
            return Err(RewriteError::Config("expected_host must not be empty".into()));
        }
        if self.calendar_extension.is_empty() || self.table_extension.is_empty() {
            return Err(RewriteError::Config("file extensions must not be empty".into()));
        }
        if self.table.header_row == self.table.legend_row {
            return Err(RewriteError::Config(format!(
                "header_row and legend_row both point at row {}",
                self.table.header_row
            )));
        }
        self.timezone()?;
        Ok(())
    }

    /// The zone CSV dates are interpreted in, `None` meaning system local time.
    pub fn timezone(&self) -> RewriteResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| RewriteError::Config(format!("Unknown timezone '{name}': {e}")))
            })
            .transpose()
    }

    /// Write a config file holding the defaults, for editing.
    pub fn create_default_config(path: &Path) -> RewriteResult<()> {
        let defaults = toml::to_string_pretty(&Self::default())
            .map_err(|e| RewriteError::Config(e.to_string()))?;
        let contents = format!(
            "\
# coursecal configuration
#
# To drop a course's sessions for everyone outside the cohort, add a rule
# after the including one, e.g.:
#
# [[policy.rules]]
# course_contains = \"FY1420\"
# decision = \"exclude\"

{defaults}"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_toml_roundtrip() {
        let text = toml::to_string_pretty(&RewriteConfig::default()).unwrap();
        let parsed = RewriteConfig::from_toml(&text).expect("defaults should parse");

        assert_eq!(parsed.expected_host, "se.timeedit.net");
        assert_eq!(parsed.labels.get("Lärare"), Some(&Role::Person));
        assert_eq!(parsed.policy.rules.len(), 4);
        assert_eq!(
            parsed.policy.rules[3].decision,
            Decision::Retitle("Räknestuga".to_string())
        );
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = RewriteConfig::from_toml(
            r#"
timezone = "Europe/Stockholm"

[table]
header_row = 2
legend_row = 1
"#,
        )
        .unwrap();

        assert_eq!(config.table.header_row, 2);
        assert_eq!(config.table.legend_column, 0);
        assert_eq!(config.timezone().unwrap(), Some(chrono_tz::Europe::Stockholm));
        assert_eq!(config.policy.cohort, "DVACD16");
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let err = RewriteConfig::from_toml(r#"timezone = "Mars/Olympus""#).unwrap_err();
        assert!(matches!(err, RewriteError::Config(_)));
    }

    #[test]
    fn test_rejects_overlapping_rows() {
        let err = RewriteConfig::from_toml("[table]\nheader_row = 1\nlegend_row = 1\n").unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_custom_policy_rules() {
        let config = RewriteConfig::from_toml(
            r#"
[policy]
cohort = "DVAMI17"
default = "exclude"

[[policy.rules]]
type_contains = "Tentamen"
decision = { retitle = "Exam" }
"#,
        )
        .unwrap();

        assert_eq!(config.policy.cohort, "DVAMI17");
        assert_eq!(config.policy.default, Decision::Exclude);
        assert_eq!(config.policy.rules.len(), 1);
        assert_eq!(config.policy.rules[0].type_contains.as_deref(), Some("Tentamen"));
    }

    #[test]
    fn test_missing_explicit_config_is_io_error() {
        let path = std::env::temp_dir().join("coursecal-no-such-dir/config.toml");
        let err = RewriteConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, RewriteError::Io(_)));
    }
}
