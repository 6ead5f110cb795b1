use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    FirstPractice,
    SecondPractice,
    ThirdPractice,
    Qualifying,
    Sprint,
    Race,
}

impl SessionKind {
    /// Calendar order within a race weekend.
    pub const ALL: [SessionKind; 6] = [
        SessionKind::FirstPractice,
        SessionKind::SecondPractice,
        SessionKind::ThirdPractice,
        SessionKind::Qualifying,
        SessionKind::Sprint,
        SessionKind::Race,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SessionKind::FirstPractice => "Practice 1",
            SessionKind::SecondPractice => "Practice 2",
            SessionKind::ThirdPractice => "Practice 3",
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Sprint => "Sprint",
            SessionKind::Race => "Race",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            SessionKind::FirstPractice => "fp1",
            SessionKind::SecondPractice => "fp2",
            SessionKind::ThirdPractice => "fp3",
            SessionKind::Qualifying => "quali",
            SessionKind::Sprint => "sprint",
            SessionKind::Race => "race",
        }
    }
}

/// Scheduled start of a session, kept exactly as the schedule API returned it.
/// A missing time means the time of day is not yet known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStart {
    pub date: String,
    pub time: Option<String>,
}

impl EventStart {
    pub fn new(date: &str, time: Option<&str>) -> Self {
        Self {
            date: date.to_string(),
            time: time.map(str::to_string),
        }
    }

    /// Value for the content store's date field: `date` alone, or `dateTtime` verbatim.
    pub fn to_start_value(&self) -> String {
        match &self.time {
            Some(time) => format!("{}T{}", self.date, time),
            None => self.date.clone(),
        }
    }

    /// Whether the date is a plain `YYYY-MM-DD` calendar date.
    pub fn has_calendar_date(&self) -> bool {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_ok()
    }
}
