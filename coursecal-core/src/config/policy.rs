//! Inclusion policy: which rewritten events end up in the feed.

use serde::{Deserialize, Serialize};

use crate::table::ProjectedRecord;

/// What happens to an event once a rule matched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Include,
    Exclude,
    /// Replace the title with a fixed label, then include
    Retitle(String),
}

/// One ordered rule. Every condition that is set must hold for the rule to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_contains: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_contains: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_contains: Option<String>,

    /// Require the event's text to mention the cohort tag
    #[serde(default)]
    pub in_cohort: bool,

    pub decision: Decision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Text token identifying the student group the feed is built for
    pub cohort: String,

    /// Applied when no rule matches
    pub default: Decision,

    pub rules: Vec<PolicyRule>,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            cohort: "DVACD16".to_string(),
            default: Decision::Include,
            rules: vec![
                PolicyRule {
                    course_contains: Some("FY1420".to_string()),
                    in_cohort: true,
                    ..PolicyRule::new(Decision::Include)
                },
                PolicyRule {
                    course_contains: Some("MA1446".to_string()),
                    in_cohort: true,
                    ..PolicyRule::new(Decision::Include)
                },
                PolicyRule {
                    type_contains: Some("Gruppövning".to_string()),
                    in_cohort: true,
                    ..PolicyRule::new(Decision::Include)
                },
                PolicyRule {
                    text_contains: Some("räknestuga".to_string()),
                    ..PolicyRule::new(Decision::Retitle("Räknestuga".to_string()))
                },
            ],
        }
    }
}

impl PolicyRule {
    /// A rule without conditions, matching every event.
    pub fn new(decision: Decision) -> Self {
        PolicyRule {
            course_contains: None,
            type_contains: None,
            text_contains: None,
            in_cohort: false,
            decision,
        }
    }

    fn matches(&self, cohort: &str, record: &ProjectedRecord) -> bool {
        condition(self.course_contains.as_deref(), record.course.as_deref())
            && condition(self.type_contains.as_deref(), record.kind.as_deref())
            && condition(self.text_contains.as_deref(), record.text.as_deref())
            && (!self.in_cohort || contains(record.text.as_deref(), cohort))
    }
}

impl Policy {
    /// First matching rule decides, otherwise the default does.
    pub fn decide(&self, record: &ProjectedRecord) -> &Decision {
        self.rules
            .iter()
            .find(|rule| rule.matches(&self.cohort, record))
            .map(|rule| &rule.decision)
            .unwrap_or(&self.default)
    }
}

fn condition(needle: Option<&str>, field: Option<&str>) -> bool {
    needle.is_none_or(|needle| contains(field, needle))
}

/// Case-sensitive substring test; an absent field contains nothing.
fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|field| field.contains(needle))
}
