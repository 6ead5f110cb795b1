use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::ergast::{Ergast, Season};
use crate::notion::Notion;
use crate::sync::{self, Layout, SyncOptions, SyncReport};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    /// Season year; omitted or null means the current season.
    #[serde(default)]
    pub season: Option<i32>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub enrich: bool,
    #[serde(default)]
    pub skip_existing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

impl Request {
    pub fn options(&self) -> SyncOptions {
        SyncOptions {
            season: Season::from(self.season),
            layout: self.layout,
            enrich: self.enrich,
            skip_existing: self.skip_existing,
        }
    }
}

/// Human readable summary of a finished run.
pub fn summarize(season: Option<i32>, report: &SyncReport) -> String {
    let season = season.map_or_else(|| "current".to_string(), |y| y.to_string());
    format!(
        "Season {}: {} races, {} pages created, {} already present, {} failed",
        season, report.races, report.created, report.existing, report.failed
    )
}

#[instrument(skip(event, config))]
pub async fn handler(event: LambdaEvent<Request>, config: Arc<Config>) -> Result<Response, Error> {
    let payload = event.payload;
    let options = payload.options();
    info!(?options, "Starting F1 schedule sync");

    // The sync is blocking (ureq), so keep it off the async runtime threads.
    let run_config = Arc::clone(&config);
    let result = tokio::task::spawn_blocking(move || {
        let source = Ergast::new(run_config.schedule_api_base.clone());
        let sink = Notion::new(&run_config);
        sync::run(&source, &sink, &run_config, &options)
    })
    .await;

    match result {
        Ok(Ok(report)) => Ok(Response { message: summarize(payload.season, &report) }),
        Ok(Err(e)) => Err(e.into()),
        Err(e) => {
            error!(error = %e, "Sync task join error");
            Err(e.into())
        }
    }
}
