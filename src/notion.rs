use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use ureq::Agent;

use crate::config::Config;
use crate::error::HttpError;

pub const NOTION_VERSION: &str = "2022-06-28";

/// Destination for calendar pages.
pub trait PageSink {
    /// Create a page from a fully built payload and return its id.
    fn create_page(&self, page: &Value) -> Result<String, HttpError>;

    /// Look up a page in the target database whose rich-text `property` equals `key`.
    fn find_page(&self, property: &str, key: &str) -> Result<Option<String>, HttpError>;
}

#[derive(Debug, Deserialize)]
struct PageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<PageRef>,
}

/// Simple Notion API client bound to one integration token and database.
#[derive(Clone)]
pub struct Notion {
    base_url: String,
    token: String,
    database_id: String,
    agent: Agent,
}

impl Notion {
    pub fn new(config: &Config) -> Self {
        let agent_config = Agent::config_builder().http_status_as_error(false).build();
        Self {
            base_url: config.notion_api_base.clone(),
            token: config.notion_token.clone(),
            database_id: config.database_id.clone(),
            agent: Agent::new_with_config(agent_config),
        }
    }

    /// POST a JSON body and return the body of a 2xx response.
    fn post_json(&self, url: &str, body: &Value) -> Result<String, HttpError> {
        let response = self
            .agent
            .post(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
            .send_json(body)?;
        let status = response.status().as_u16();
        let text = response.into_body().read_to_string()?;
        if !(200..300).contains(&status) {
            return Err(HttpError::Status { status, body: text });
        }
        debug!(status, url = %url, "Notion request succeeded");
        Ok(text)
    }
}

impl PageSink for Notion {
    fn create_page(&self, page: &Value) -> Result<String, HttpError> {
        let url = format!("{}/pages", self.base_url);
        let text = self.post_json(&url, page)?;
        let created: PageRef = serde_json::from_str(&text)?;
        debug!(page_id = %created.id, "Created Notion page");
        Ok(created.id)
    }

    fn find_page(&self, property: &str, key: &str) -> Result<Option<String>, HttpError> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        let query = serde_json::json!({
            "filter": {
                "property": property,
                "rich_text": { "equals": key }
            },
            "page_size": 1
        });
        let text = self.post_json(&url, &query)?;
        let response: QueryResponse = serde_json::from_str(&text)?;
        Ok(response.results.into_iter().next().map(|page| page.id))
    }
}
