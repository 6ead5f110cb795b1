use crate::config::Config;
use crate::model::race::{RaceEntry, ScheduledSession};
use crate::model::session::{EventStart, SessionKind};

/// One page to be created in the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRecord {
    pub title: String,
    pub start: EventStart,
    pub location: String,
    pub round: String,
    pub season: String,
    pub session: SessionKind,
    pub enrichment: Option<String>,
    pub cover_url: Option<String>,
    pub icon: Option<String>,
}

impl CalendarRecord {
    pub fn for_session(
        race: &RaceEntry,
        session: ScheduledSession,
        enrichment: Option<String>,
        config: &Config,
    ) -> Self {
        CalendarRecord {
            title: format!("{} - {}", race.race_name, session.kind.label()),
            start: session.start,
            location: race.location_label(),
            round: race.round.clone(),
            season: race.season.clone(),
            session: session.kind,
            enrichment,
            cover_url: config.cover_url.clone(),
            icon: config.icon.clone(),
        }
    }

    /// Deterministic key identifying this session across runs.
    pub fn idempotency_key(&self) -> String {
        format!("{}-{}-{}", self.season, self.round, self.session.slug())
    }
}
