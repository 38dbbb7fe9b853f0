use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use coursecal_core::config::TableLayout;
use coursecal_core::{Fetcher, RewriteConfig, RewriteError, RewriteResult, Url, rewrite_url};

const FEED_URL: &str = "https://se.timeedit.net/web/bth/db1/sched1/ri1.ics";
const CSV_URL: &str = "https://se.timeedit.net/web/bth/db1/sched1/ri1.csv";

/// Serves canned documents; unknown URLs answer 404.
struct StaticFetcher {
    documents: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    fn new(ics: &str, csv: &str) -> Self {
        StaticFetcher {
            documents: HashMap::from([
                (FEED_URL.to_string(), ics.to_string()),
                (CSV_URL.to_string(), csv.to_string()),
            ]),
            calls: AtomicUsize::new(0),
        }
    }
}

impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &Url) -> RewriteResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.documents
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| RewriteError::FetchStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

fn stockholm() -> RewriteConfig {
    RewriteConfig {
        timezone: Some("Europe/Stockholm".to_string()),
        ..RewriteConfig::default()
    }
}

fn feed(events: &[(&str, &str)]) -> String {
    let mut ics = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//TimeEdit//EN\r\n");
    for (uid, start) in events {
        ics.push_str(&format!(
            "BEGIN:VEVENT\r\nUID:{uid}\r\nDTSTART:{start}\r\nSUMMARY:Kurs: {uid}\r\nDESCRIPTION:ID {uid}\r\nEND:VEVENT\r\n"
        ));
    }
    ics.push_str("END:VCALENDAR\r\n");
    ics
}

const HEADER: &str = "Startdatum,Starttid,Slutdatum,Sluttid,Kurs,Lärare,Lokal,Moment,Text,Information till student";

#[tokio::test]
async fn test_single_event_end_to_end() {
    let csv = format!(
        "{HEADER}\n\
         \"MA1446, Linjär Algebra\"\n\
         2017-01-16,08:15,2017-01-16,10:00,MA1446 Linjär Algebra,Anna Andersson,J1650,Föreläsning,DVACD16,\n"
    );
    let fetcher = StaticFetcher::new(&feed(&[("one", "20170116T071500Z")]), &csv);

    let rewritten = rewrite_url(&fetcher, &stockholm(), FEED_URL).await.unwrap();
    let ics = rewritten.to_ics();

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(rewritten.summary.included, 1);
    assert_eq!(rewritten.summary.start_mismatches, 0);
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    assert!(ics.contains("SUMMARY:Föreläsning: Linjär Algebra"));
    assert!(ics.contains("Teacher: Anna Andersson"));
    assert!(!ics.contains("Kurs: one"));
}

#[tokio::test]
async fn test_events_paired_in_start_order() {
    // Feed and export list the same three events in different orders
    let ics = feed(&[
        ("wed", "20170118T071500Z"),
        ("mon", "20170116T071500Z"),
        ("tue", "20170117T121500Z"),
    ]);
    let csv = format!(
        "{HEADER}\n\
         \"MA1446, Linjär Algebra, FY1420, Fysik 1\"\n\
         2017-01-17,13:15,2017-01-17,15:00,FY1420,,,Laboration,DVACD16,\n\
         2017-01-18,08:15,2017-01-18,10:00,DV1337,,,,öppen räknestuga,\n\
         2017-01-16,08:15,2017-01-16,10:00,MA1446,,,Föreläsning,DVACD16,Ta med penna\n"
    );
    let fetcher = StaticFetcher::new(&ics, &csv);

    let rewritten = rewrite_url(&fetcher, &stockholm(), FEED_URL).await.unwrap();
    let out = rewritten.to_ics();

    assert_eq!(rewritten.summary.paired, 3);
    assert_eq!(rewritten.summary.retitled, 1);
    assert_eq!(rewritten.summary.start_mismatches, 0);
    assert_eq!(out.matches("BEGIN:VEVENT").count(), 3);

    let mon = out.find("SUMMARY:Föreläsning: Linjär Algebra").expect("monday");
    let tue = out.find("SUMMARY:Laboration: Fysik 1").expect("tuesday");
    let wed = out.find("SUMMARY:Räknestuga").expect("wednesday");
    assert!(mon < tue && tue < wed);
}

#[tokio::test]
async fn test_timeedit_layout_with_preamble() {
    let config = RewriteConfig {
        table: TableLayout {
            header_row: 2,
            legend_row: 1,
            legend_column: 0,
        },
        ..stockholm()
    };
    let csv = format!(
        "2017-01-16 - 2017-06-04\n\
         \"MA1446, Linjär Algebra\"\n\
         {HEADER}\n\
         2017-01-16,08:15,2017-01-16,10:00,MA1446,,,,DVACD16,\n"
    );
    let fetcher = StaticFetcher::new(&feed(&[("one", "20170116T071500Z")]), &csv);

    let rewritten = rewrite_url(&fetcher, &config, FEED_URL).await.unwrap();
    assert!(rewritten.to_ics().contains("SUMMARY:Linjär Algebra"));
}

#[tokio::test]
async fn test_missing_course_produces_no_feed() {
    let csv = format!(
        "{HEADER}\n\
         \"MA1446, Linjär Algebra\"\n\
         2017-01-16,08:15,2017-01-16,10:00,,,,Föreläsning,DVACD16,\n"
    );
    let fetcher = StaticFetcher::new(&feed(&[("one", "20170116T071500Z")]), &csv);

    let err = rewrite_url(&fetcher, &stockholm(), FEED_URL).await.unwrap_err();
    assert!(matches!(err, RewriteError::MissingCourse { index: 0, .. }));
}

#[tokio::test]
async fn test_missing_legend() {
    let fetcher = StaticFetcher::new(&feed(&[]), HEADER);

    let err = rewrite_url(&fetcher, &stockholm(), FEED_URL).await.unwrap_err();
    assert!(matches!(err, RewriteError::EmptyLegend));
}

#[tokio::test]
async fn test_untrusted_host_fetches_nothing() {
    let fetcher = StaticFetcher::new("", "");

    let err = rewrite_url(&fetcher, &stockholm(), "https://example.com/ri1.ics")
        .await
        .unwrap_err();

    assert!(matches!(err, RewriteError::UntrustedSource { .. }));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fetch_failure_aborts() {
    let fetcher = StaticFetcher::new("", "");

    let err = rewrite_url(
        &fetcher,
        &stockholm(),
        "https://se.timeedit.net/web/bth/db1/sched1/ri2.ics",
    )
    .await
    .unwrap_err();

    assert!(err.is_fetch());
    assert!(err.to_string().contains("404"));
}
