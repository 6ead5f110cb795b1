use tracing::{info, info_span, instrument};
use ureq::Agent;

use crate::error::{HttpError, SyncError};
use crate::model::race::{RaceEntry, ScheduleDocument};
use crate::model::results::{ResultSummary, ResultsDocument};

/// Which season to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Season {
    #[default]
    Current,
    Year(i32),
}

impl Season {
    fn path_segment(self) -> String {
        match self {
            Season::Current => "current".to_string(),
            Season::Year(year) => year.to_string(),
        }
    }
}

impl From<Option<i32>> for Season {
    fn from(year: Option<i32>) -> Self {
        year.map_or(Season::Current, Season::Year)
    }
}

/// Source of race calendars and historical results.
pub trait ScheduleSource {
    fn fetch_schedule(&self, season: Season) -> Result<Vec<RaceEntry>, SyncError>;

    fn fetch_prior_result(&self, season: i32, round: u32) -> Result<ResultSummary, SyncError>;
}

/// Blocking client for the Ergast-compatible F1 API.
#[derive(Clone)]
pub struct Ergast {
    base_url: String,
    agent: Agent,
}

impl Ergast {
    pub fn new(base_url: impl Into<String>) -> Self {
        let config = Agent::config_builder().http_status_as_error(false).build();
        Self {
            base_url: base_url.into(),
            agent: Agent::new_with_config(config),
        }
    }

    pub fn schedule_url(&self, season: Season) -> String {
        format!("{}/f1/{}.json", self.base_url, season.path_segment())
    }

    pub fn results_url(&self, season: i32, round: u32) -> String {
        format!("{}/f1/{}/{}/results.json", self.base_url, season, round)
    }

    /// GET a URL and return the body of a 2xx response.
    fn get_body(&self, url: &str) -> Result<String, HttpError> {
        let response = {
            let _span = info_span!("ergast_fetch", url = %url).entered();
            self.agent.get(url).call()?
        };
        let status = response.status().as_u16();
        let body = response.into_body().read_to_string()?;
        if !(200..300).contains(&status) {
            return Err(HttpError::Status { status, body });
        }
        Ok(body)
    }
}

impl ScheduleSource for Ergast {
    #[instrument(level = "info", skip(self))]
    fn fetch_schedule(&self, season: Season) -> Result<Vec<RaceEntry>, SyncError> {
        let url = self.schedule_url(season);
        let races = self
            .get_body(&url)
            .and_then(|body| parse_schedule(&body).map_err(HttpError::from))
            .map_err(|source| SyncError::ScheduleFetch { url: url.clone(), source })?;
        info!(race_count = races.len(), "Fetched season schedule");
        Ok(races)
    }

    #[instrument(level = "info", skip(self))]
    fn fetch_prior_result(&self, season: i32, round: u32) -> Result<ResultSummary, SyncError> {
        let url = self.results_url(season, round);
        self.get_body(&url)
            .and_then(|body| parse_prior_result(&body))
            .map_err(|source| SyncError::ScheduleFetch { url, source })
    }
}

/// Parse a schedule response body into its race entries.
#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn parse_schedule(body: &str) -> Result<Vec<RaceEntry>, serde_json::Error> {
    let doc = serde_json::from_str::<ScheduleDocument>(body)?;
    Ok(doc.mr_data.race_table.races)
}

/// Parse a results response body. A total of "0" means the race has no recorded results.
pub fn parse_prior_result(body: &str) -> Result<ResultSummary, HttpError> {
    let doc = serde_json::from_str::<ResultsDocument>(body)?;
    let total = doc.mr_data.total;
    if total.trim() == "0" {
        return Ok(ResultSummary::NoData);
    }
    doc.mr_data
        .race_table
        .races
        .into_iter()
        .next()
        .and_then(|race| race.results.into_iter().next())
        .map(|result| ResultSummary::Winner(result.driver.family_name))
        .ok_or_else(|| HttpError::Shape(format!("total is {total} but no result entries were returned")))
}
