use serde::{Deserialize, Serialize};

use crate::model::session::{EventStart, SessionKind};

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(rename = "MRData")]
    pub mr_data: ScheduleData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleData {
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RaceTable {
    #[serde(rename = "Races")]
    pub races: Vec<RaceEntry>,
}

/// One scheduled event in a season, as returned by the schedule API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceEntry {
    pub season: String,
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "FirstPractice", default)]
    pub first_practice: Option<SessionEntry>,
    #[serde(rename = "SecondPractice", default)]
    pub second_practice: Option<SessionEntry>,
    #[serde(rename = "ThirdPractice", default)]
    pub third_practice: Option<SessionEntry>,
    #[serde(rename = "Qualifying", default)]
    pub qualifying: Option<SessionEntry>,
    #[serde(rename = "Sprint", default)]
    pub sprint: Option<SessionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(rename = "circuitName")]
    pub circuit_name: String,
    #[serde(rename = "Location")]
    pub location: CircuitLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitLocation {
    pub locality: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
}

/// A session that actually takes place for a race, with its resolved start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledSession {
    pub kind: SessionKind,
    pub start: EventStart,
}

impl RaceEntry {
    /// "Circuit - Locality, Country"
    pub fn location_label(&self) -> String {
        format!(
            "{} - {}, {}",
            self.circuit.circuit_name, self.circuit.location.locality, self.circuit.location.country
        )
    }

    fn session_entry(&self, kind: SessionKind) -> Option<&SessionEntry> {
        match kind {
            SessionKind::FirstPractice => self.first_practice.as_ref(),
            SessionKind::SecondPractice => self.second_practice.as_ref(),
            SessionKind::ThirdPractice => self.third_practice.as_ref(),
            SessionKind::Qualifying => self.qualifying.as_ref(),
            SessionKind::Sprint => self.sprint.as_ref(),
            SessionKind::Race => None,
        }
    }

    /// The main race as a session.
    pub fn race_session(&self) -> ScheduledSession {
        ScheduledSession {
            kind: SessionKind::Race,
            start: EventStart::new(&self.date, self.time.as_deref()),
        }
    }

    /// Sessions present in this entry, in calendar order, always ending with the race.
    pub fn scheduled_sessions(&self) -> Vec<ScheduledSession> {
        let mut sessions: Vec<ScheduledSession> = SessionKind::ALL
            .iter()
            .filter_map(|&kind| {
                self.session_entry(kind).map(|entry| ScheduledSession {
                    kind,
                    start: EventStart::new(&entry.date, entry.time.as_deref()),
                })
            })
            .collect();
        sessions.push(self.race_session());
        sessions
    }
}
