//! The full rewrite: URL in, rewritten ICS feed out.

use icalendar::Calendar;
use tracing::{debug, info};

use crate::config::RewriteConfig;
use crate::error::RewriteResult;
use crate::fetch::Fetcher;
use crate::ics;
use crate::rewrite::{RewriteSummary, Rewriter};
use crate::sort::{sort_events, sort_records};
use crate::source::ScheduleSource;
use crate::table::{ColumnRoles, CourseCodes, TableSections, parse_rows, project_records};

/// A rewritten feed and what it took to build it.
#[derive(Debug, Clone)]
pub struct RewrittenFeed {
    pub calendar: Calendar,
    pub summary: RewriteSummary,
}

impl RewrittenFeed {
    pub fn to_ics(&self) -> String {
        ics::generate_ics(&self.calendar)
    }
}

/// Resolve `url`, fetch the feed and its CSV export concurrently, and rewrite.
pub async fn rewrite_url<F>(fetcher: &F, config: &RewriteConfig, url: &str) -> RewriteResult<RewrittenFeed>
where
    F: Fetcher + Sync,
{
    let source = ScheduleSource::resolve(url, config)?;

    let (ics_text, csv_text) = tokio::try_join!(
        fetcher.fetch(&source.calendar_url),
        fetcher.fetch(&source.table_url),
    )?;
    info!(
        "Fetched {} bytes of ICS and {} bytes of CSV from {}",
        ics_text.len(),
        csv_text.len(),
        config.expected_host
    );

    rewrite_documents(&ics_text, &csv_text, config)
}

/// Rewrite already fetched documents.
pub fn rewrite_documents(
    ics_text: &str,
    csv_text: &str,
    config: &RewriteConfig,
) -> RewriteResult<RewrittenFeed> {
    let zone = config.timezone()?;

    debug!("Parsing ICS");
    let mut calendar = ics::parse_calendar(ics_text)?;

    debug!("Parsing CSV");
    let sections = TableSections::split(parse_rows(csv_text)?, &config.table);

    let roles = ColumnRoles::resolve(&sections.header, &config.labels);
    let codes = CourseCodes::extract(sections.legend_cell(config.table.legend_column))?;
    let mut records = project_records(&sections.data, &roles, zone);

    let mut events = ics::take_events(&mut calendar);
    sort_events(&mut events, zone);
    sort_records(&mut records);

    let (kept, summary) = Rewriter::new(config, &codes, zone).rewrite(events, &records)?;
    ics::restore_events(&mut calendar, kept);

    Ok(RewrittenFeed { calendar, summary })
}
