//! Rewriting paired events and deciding which ones stay in the feed.

use chrono_tz::Tz;
use icalendar::{Component, Event};
use tracing::{debug, info, warn};

use crate::config::{Decision, DescriptionLabels, RewriteConfig};
use crate::error::{RewriteError, RewriteResult};
use crate::ics::event_start;
use crate::table::{CourseCodes, ProjectedRecord};

/// What a rewrite run did, for logging and for the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Events paired with a CSV record
    pub paired: usize,
    pub included: usize,
    pub excluded: usize,
    /// Included under a fixed title
    pub retitled: usize,
    /// Calendar events left over after pairing (dropped)
    pub unpaired_events: usize,
    /// CSV records left over after pairing
    pub unpaired_records: usize,
    /// Pairs whose two start times disagree
    pub start_mismatches: usize,
}

/// Rewrites sorted calendar events using their sorted CSV counterparts.
pub struct Rewriter<'a> {
    config: &'a RewriteConfig,
    codes: &'a CourseCodes,
    zone: Option<Tz>,
}

impl<'a> Rewriter<'a> {
    pub fn new(config: &'a RewriteConfig, codes: &'a CourseCodes, zone: Option<Tz>) -> Self {
        Rewriter {
            config,
            codes,
            zone,
        }
    }

    /// Pair `events[i]` with `records[i]`, rewrite each event and keep the
    /// ones the policy lets through, in order.
    ///
    /// Fails without producing anything if a paired record has no course.
    pub fn rewrite(
        &self,
        events: Vec<Event>,
        records: &[ProjectedRecord],
    ) -> RewriteResult<(Vec<Event>, RewriteSummary)> {
        debug!("Rewriting {} events", events.len());

        let mut summary = RewriteSummary {
            unpaired_events: events.len().saturating_sub(records.len()),
            unpaired_records: records.len().saturating_sub(events.len()),
            ..RewriteSummary::default()
        };
        if summary.unpaired_events > 0 || summary.unpaired_records > 0 {
            warn!(
                "Calendar has {} events but the CSV export has {} records; pairing the first {}",
                events.len(),
                records.len(),
                events.len().min(records.len())
            );
        }

        let mut kept = Vec::with_capacity(events.len().min(records.len()));

        for (index, (mut event, record)) in events.into_iter().zip(records).enumerate() {
            summary.paired += 1;
            self.check_alignment(index, &event, record, &mut summary);

            let course = record
                .course
                .as_deref()
                .ok_or_else(|| RewriteError::MissingCourse {
                    index,
                    start: record
                        .start
                        .map(|start| start.to_rfc3339())
                        .unwrap_or_else(|| "at an unknown time".to_string()),
                })?;

            event.summary(&self.title(course, record.kind.as_deref()));
            event.description(&describe(record, &self.config.description));

            match self.config.policy.decide(record) {
                Decision::Include => {
                    summary.included += 1;
                    kept.push(event);
                }
                Decision::Exclude => {
                    summary.excluded += 1;
                }
                Decision::Retitle(title) => {
                    event.summary(title);
                    summary.included += 1;
                    summary.retitled += 1;
                    kept.push(event);
                }
            }
        }

        info!(
            "Kept {} of {} paired events ({} retitled, {} excluded)",
            summary.included, summary.paired, summary.retitled, summary.excluded
        );

        Ok((kept, summary))
    }

    /// `<type>: <course name>`, or just the course name without a type
    fn title(&self, course: &str, kind: Option<&str>) -> String {
        let name = self.codes.display_name(course);
        match kind {
            Some(kind) => format!("{kind}: {name}"),
            None => name.to_string(),
        }
    }

    fn check_alignment(
        &self,
        index: usize,
        event: &Event,
        record: &ProjectedRecord,
        summary: &mut RewriteSummary,
    ) {
        let (Some(calendar_start), Some(record_start)) =
            (event_start(event, self.zone), record.start)
        else {
            return;
        };
        if calendar_start != record_start {
            summary.start_mismatches += 1;
            warn!(
                "Event #{} starts {} in the calendar but {} in the CSV export",
                index, calendar_start, record_start
            );
        }
    }
}

/// One line per non-empty field: teacher, course, info, text.
fn describe(record: &ProjectedRecord, labels: &DescriptionLabels) -> String {
    [
        (&labels.teacher, &record.person),
        (&labels.course, &record.course),
        (&labels.info, &record.info),
        (&labels.text, &record.text),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_deref().map(|value| format!("{label}{value}")))
    .collect::<Vec<_>>()
    .join("\n")
}
