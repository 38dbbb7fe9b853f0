//! Course code legend: `"MA1446, Analys 2, FY1420, Fysik"` -> code table.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{RewriteError, RewriteResult};

/// Two uppercase letters followed by four digits, e.g. MA1446
static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2}[0-9]{4}").expect("course code pattern is valid"));

/// Course code -> human readable course name.
#[derive(Debug, Clone, Default)]
pub struct CourseCodes {
    codes: BTreeMap<String, String>,
    /// Alternation over every known code
    matcher: Option<Regex>,
}

impl CourseCodes {
    /// Segment the legend cell into codes and descriptions.
    ///
    /// A description runs until the separator in front of the next course
    /// code, so a description that itself contains something shaped like a
    /// course code gets cut short there.
    pub fn extract(cell: Option<&str>) -> RewriteResult<Self> {
        let cell = cell
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .ok_or(RewriteError::EmptyLegend)?;

        let mut codes = BTreeMap::new();
        let mut rest = cell;

        while !rest.is_empty() {
            let Some(found) = COURSE_CODE.find(rest) else {
                warn!("Ignoring legend text without a course code: {:?}", rest);
                break;
            };
            if found.start() > 0 {
                warn!(
                    "Skipping legend text before {}: {:?}",
                    found.as_str(),
                    &rest[..found.start()]
                );
            }

            let code = found.as_str().to_string();
            let after = rest[found.end()..].trim_start_matches([',', ' ']);

            match COURSE_CODE.find(after) {
                Some(next) => {
                    let description = after[..next.start()].trim_end_matches([',', ' ']).trim();
                    codes.insert(code, description.to_string());
                    rest = &after[next.start()..];
                }
                None => {
                    codes.insert(code, after.trim().to_string());
                    rest = "";
                }
            }
        }

        debug!("Extracted {} course codes", codes.len());
        Self::from_map(codes)
    }

    pub fn from_map(codes: BTreeMap<String, String>) -> RewriteResult<Self> {
        let matcher = if codes.is_empty() {
            None
        } else {
            let alternation = codes
                .keys()
                .map(|code| regex::escape(code))
                .collect::<Vec<_>>()
                .join("|");
            let matcher = Regex::new(&alternation)
                .map_err(|e| RewriteError::Config(format!("Invalid course code table: {e}")))?;
            Some(matcher)
        };

        Ok(CourseCodes { codes, matcher })
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Display name for a course field.
    ///
    /// The first known code found in `course` is replaced by its description.
    /// Falls back to `course` itself when no code matches or the code has
    /// no description.
    pub fn display_name<'a>(&'a self, course: &'a str) -> &'a str {
        self.matcher
            .as_ref()
            .and_then(|matcher| matcher.find(course))
            .and_then(|found| self.get(found.as_str()))
            .filter(|description| !description.is_empty())
            .unwrap_or(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_pairs() {
        let codes = CourseCodes::extract(Some("AB1234, Desc one, CD5678, Desc two")).unwrap();

        assert_eq!(codes.len(), 2);
        assert_eq!(codes.get("AB1234"), Some("Desc one"));
        assert_eq!(codes.get("CD5678"), Some("Desc two"));
    }

    #[test]
    fn test_single_entry_takes_the_remainder() {
        let codes = CourseCodes::extract(Some("MA1446, Analys 2, del 1, vt17")).unwrap();

        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get("MA1446"), Some("Analys 2, del 1, vt17"));
    }

    #[test]
    fn test_separator_without_comma() {
        let codes = CourseCodes::extract(Some("MA1446, Analys 2, MA1448 Linjär Algebra 1")).unwrap();

        assert_eq!(codes.get("MA1446"), Some("Analys 2"));
        assert_eq!(codes.get("MA1448"), Some("Linjär Algebra 1"));
    }

    #[test]
    fn test_code_shaped_text_truncates_description() {
        let codes = CourseCodes::extract(Some("AB1234, Replaces XY9999 course, CD5678, Two")).unwrap();

        assert_eq!(codes.get("AB1234"), Some("Replaces"));
        assert_eq!(codes.get("XY9999"), Some("course"));
        assert_eq!(codes.get("CD5678"), Some("Two"));
    }

    #[test]
    fn test_leading_noise_is_skipped() {
        let codes = CourseCodes::extract(Some("Kurser: AB1234, Desc")).unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get("AB1234"), Some("Desc"));
    }

    #[test]
    fn test_missing_or_blank_legend() {
        assert!(matches!(CourseCodes::extract(None), Err(RewriteError::EmptyLegend)));
        assert!(matches!(CourseCodes::extract(Some("  ")), Err(RewriteError::EmptyLegend)));
    }

    #[test]
    fn test_display_name() {
        let codes = CourseCodes::extract(Some("MA1446, Analys 2, FY1420, ")).unwrap();

        assert_eq!(codes.display_name("MA1446 Analys"), "Analys 2");
        // first code found wins, even when it has no description
        assert_eq!(codes.display_name("FY1420/MA1446"), "FY1420/MA1446");
        assert_eq!(codes.display_name("Calculus incl. MA1446, FY1420"), "Analys 2");
        assert_eq!(codes.display_name("DV1337 Webbteknik"), "DV1337 Webbteknik");
    }

    #[test]
    fn test_display_name_without_codes() {
        let codes = CourseCodes::default();
        assert_eq!(codes.display_name("MA1446"), "MA1446");
    }
}
