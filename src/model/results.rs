use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsDocument {
    #[serde(rename = "MRData")]
    pub mr_data: ResultsData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsData {
    pub total: String,
    #[serde(rename = "RaceTable")]
    pub race_table: ResultsRaceTable,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsRaceTable {
    #[serde(rename = "Races", default)]
    pub races: Vec<RaceResults>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RaceResults {
    #[serde(rename = "Results", default)]
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultEntry {
    #[serde(rename = "Driver")]
    pub driver: Driver,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Driver {
    #[serde(rename = "familyName")]
    pub family_name: String,
}

/// Prior-season outcome used to enrich a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSummary {
    Winner(String),
    NoData,
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultSummary::Winner(family_name) => write!(f, "Last year's winner: {family_name}"),
            ResultSummary::NoData => f.write_str("No data available"),
        }
    }
}
