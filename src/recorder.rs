use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{HttpError, SyncError};
use crate::model::record::CalendarRecord;
use crate::notion::PageSink;

/// What happened to a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Created { page_id: String },
    Existing { page_id: String },
    Skipped,
}

fn rich_text(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content } }])
}

/// Build the page-create payload for a record.
///
/// The round is coerced to an integer here; a non-numeric round fails the whole record.
/// The sync key property is only written when `with_sync_key` is set.
pub fn build_page(
    config: &Config,
    record: &CalendarRecord,
    with_sync_key: bool,
) -> Result<Value, SyncError> {
    let round: u32 = record
        .round
        .trim()
        .parse()
        .map_err(|_| SyncError::RoundFormat {
            title: record.title.clone(),
            value: record.round.clone(),
        })?;

    let mut properties = json!({
        "Name": { "title": rich_text(&record.title) },
        "Date": { "date": { "start": record.start.to_start_value() } },
        "Location": { "rich_text": rich_text(&record.location) },
        "Round": { "number": round },
    });
    if let Some(text) = &record.enrichment {
        properties[config.enrichment_property.as_str()] = json!({ "rich_text": rich_text(text) });
    }
    if with_sync_key {
        properties[config.sync_key_property.as_str()] =
            json!({ "rich_text": rich_text(&record.idempotency_key()) });
    }

    let mut page = json!({
        "parent": { "database_id": config.database_id },
        "properties": properties,
    });
    if let Some(url) = &record.cover_url {
        page["cover"] = json!({ "type": "external", "external": { "url": url } });
    }
    if let Some(emoji) = &record.icon {
        page["icon"] = json!({ "type": "emoji", "emoji": emoji });
    }
    Ok(page)
}

/// Submits calendar records to a page sink, one create call per record.
pub struct Recorder<'a, P: PageSink> {
    sink: &'a P,
    config: &'a Config,
    skip_existing: bool,
}

impl<'a, P: PageSink> Recorder<'a, P> {
    pub fn new(sink: &'a P, config: &'a Config, skip_existing: bool) -> Self {
        Self { sink, config, skip_existing }
    }

    /// Record one session. Failures are logged and reported as `Skipped`, never returned.
    pub fn record(&self, record: &CalendarRecord) -> RecordOutcome {
        match self.try_record(record) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(title = %record.title, error = %e, "Failed to add session to Notion");
                RecordOutcome::Skipped
            }
        }
    }

    fn try_record(&self, record: &CalendarRecord) -> Result<RecordOutcome, SyncError> {
        let page = build_page(self.config, record, self.skip_existing)?;
        if !record.start.has_calendar_date() {
            warn!(title = %record.title, date = %record.start.date, "Session date is not YYYY-MM-DD, submitting as given");
        }
        let submission_error = |source: HttpError| SyncError::RemoteSubmission {
            title: record.title.clone(),
            source,
        };

        if self.skip_existing {
            let key = record.idempotency_key();
            let existing = self
                .sink
                .find_page(&self.config.sync_key_property, &key)
                .map_err(submission_error)?;
            if let Some(page_id) = existing {
                info!(title = %record.title, key = %key, page_id = %page_id, "Session already in Notion, skipping");
                return Ok(RecordOutcome::Existing { page_id });
            }
        }

        let page_id = self.sink.create_page(&page).map_err(submission_error)?;
        info!(title = %record.title, page_id = %page_id, "Added session to Notion");
        Ok(RecordOutcome::Created { page_id })
    }
}
