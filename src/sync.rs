use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::ergast::{ScheduleSource, Season};
use crate::error::SyncError;
use crate::model::race::RaceEntry;
use crate::model::record::CalendarRecord;
use crate::model::results::ResultSummary;
use crate::notion::PageSink;
use crate::recorder::{RecordOutcome, Recorder};

/// Whether a race produces one page per session or a single page for the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Sessions,
    RaceOnly,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub season: Season,
    pub layout: Layout,
    pub enrich: bool,
    pub skip_existing: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub races: usize,
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
}

impl SyncReport {
    fn tally(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Created { .. } => self.created += 1,
            RecordOutcome::Existing { .. } => self.existing += 1,
            RecordOutcome::Skipped => self.failed += 1,
        }
    }
}

/// Fetch the season schedule and record every applicable session.
///
/// Only a failed schedule fetch aborts the run; per-record failures are logged and counted.
#[instrument(level = "info", skip(source, sink, config))]
pub fn run<S, P>(
    source: &S,
    sink: &P,
    config: &Config,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError>
where
    S: ScheduleSource,
    P: PageSink,
{
    let races = match source.fetch_schedule(options.season) {
        Ok(races) => races,
        Err(e) => {
            error!(error = %e, "Error fetching F1 schedule");
            return Err(e);
        }
    };

    let recorder = Recorder::new(sink, config, options.skip_existing);
    let mut report = SyncReport::default();

    for race in &races {
        report.races += 1;
        let enrichment = options
            .enrich
            .then(|| prior_result(source, race).to_string());

        let sessions = match options.layout {
            Layout::Sessions => race.scheduled_sessions(),
            Layout::RaceOnly => vec![race.race_session()],
        };
        for session in sessions {
            let record = CalendarRecord::for_session(race, session, enrichment.clone(), config);
            let outcome = recorder.record(&record);
            report.tally(&outcome);
        }
    }

    info!(
        races = report.races,
        created = report.created,
        existing = report.existing,
        failed = report.failed,
        "Finished syncing F1 schedule"
    );
    Ok(report)
}

/// Look up the previous season's result for the same round, degrading to `NoData` on any failure.
fn prior_result<S: ScheduleSource>(source: &S, race: &RaceEntry) -> ResultSummary {
    let prior_season = race.season.trim().parse::<i32>().ok().and_then(|s| s.checked_sub(1));
    let round = race.round.trim().parse::<u32>().ok();
    let (Some(prior_season), Some(round)) = (prior_season, round) else {
        warn!(race = %race.race_name, season = %race.season, round = %race.round, "Cannot look up prior result for this season and round");
        return ResultSummary::NoData;
    };

    match source.fetch_prior_result(prior_season, round) {
        Ok(summary) => summary,
        Err(e) => {
            warn!(race = %race.race_name, error = %e, "Prior result lookup failed, recording without it");
            ResultSummary::NoData
        }
    }
}
