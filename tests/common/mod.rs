#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use f1_notion_calendar::config::Config;
use f1_notion_calendar::ergast::{ScheduleSource, Season, parse_prior_result, parse_schedule};
use f1_notion_calendar::error::{HttpError, SyncError};
use f1_notion_calendar::model::race::RaceEntry;
use f1_notion_calendar::model::results::ResultSummary;
use f1_notion_calendar::notion::PageSink;
use serde_json::Value;

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/{name}"))
        .unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "NOTION_TOKEN" => Some("secret-token".to_string()),
        "DATABASE_ID" => Some("db-123".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn config_with_notion_base(base: &str) -> Config {
    let base = base.to_string();
    Config::from_lookup(move |key| match key {
        "NOTION_TOKEN" => Some("secret-token".to_string()),
        "DATABASE_ID" => Some("db-123".to_string()),
        "NOTION_API_BASE" => Some(base.clone()),
        _ => None,
    })
    .expect("test config")
}

/// Answer exactly one HTTP request on a local port with `status` and `body`.
/// Returns the base URL and a handle yielding the raw request that was received.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let base = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
        request
    });
    (base, handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
        if head.contains("transfer-encoding: chunked") {
            if buf.ends_with(b"0\r\n\r\n") {
                break;
            }
            continue;
        }
        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= head_end + 4 + content_length {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Wrap a list of race objects in the schedule response envelope.
pub fn schedule_body(races: Value) -> String {
    serde_json::json!({ "MRData": { "RaceTable": { "Races": races } } }).to_string()
}

pub fn race_json(round: &str, name: &str) -> Value {
    serde_json::json!({
        "season": "2024",
        "round": round,
        "raceName": name,
        "Circuit": {
            "circuitName": "Circuit de Monaco",
            "Location": { "locality": "Monte-Carlo", "country": "Monaco" }
        },
        "date": "2024-05-26",
        "time": "13:00:00Z"
    })
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Run `f` with a plain-text subscriber installed and return its output alongside the result.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

pub fn count_level(logs: &str, level: &str) -> usize {
    logs.lines().filter(|l| l.trim_start().starts_with(level)).count()
}

/// Schedule source serving canned bodies.
pub struct FakeSource {
    /// Body of the schedule response, or the HTTP status it fails with.
    pub schedule: Result<String, u16>,
    /// Body of every results response; `None` makes lookups fail with a 503.
    pub prior_body: Option<String>,
    pub prior_calls: RefCell<Vec<(i32, u32)>>,
}

impl FakeSource {
    pub fn with_schedule(body: String) -> Self {
        Self { schedule: Ok(body), prior_body: None, prior_calls: RefCell::new(Vec::new()) }
    }

    pub fn failing(status: u16) -> Self {
        Self { schedule: Err(status), prior_body: None, prior_calls: RefCell::new(Vec::new()) }
    }
}

impl ScheduleSource for FakeSource {
    fn fetch_schedule(&self, season: Season) -> Result<Vec<RaceEntry>, SyncError> {
        let url = format!("fake://schedule/{season:?}");
        match &self.schedule {
            Ok(body) => parse_schedule(body)
                .map_err(|e| SyncError::ScheduleFetch { url, source: HttpError::from(e) }),
            Err(status) => Err(SyncError::ScheduleFetch {
                url,
                source: HttpError::Status { status: *status, body: "Internal Server Error".to_string() },
            }),
        }
    }

    fn fetch_prior_result(&self, season: i32, round: u32) -> Result<ResultSummary, SyncError> {
        self.prior_calls.borrow_mut().push((season, round));
        let url = format!("fake://results/{season}/{round}");
        match &self.prior_body {
            Some(body) => parse_prior_result(body).map_err(|source| SyncError::ScheduleFetch { url, source }),
            None => Err(SyncError::ScheduleFetch {
                url,
                source: HttpError::Status { status: 503, body: "unavailable".to_string() },
            }),
        }
    }
}

/// Page sink recording every created page in memory.
#[derive(Default)]
pub struct FakeSink {
    pub pages: RefCell<Vec<Value>>,
    pub reject_titles: Vec<String>,
    pub existing_keys: Vec<String>,
    pub lookups: RefCell<Vec<(String, String)>>,
}

pub fn page_title(page: &Value) -> &str {
    page["properties"]["Name"]["title"][0]["text"]["content"].as_str().unwrap_or_default()
}

impl FakeSink {
    pub fn titles(&self) -> Vec<String> {
        self.pages.borrow().iter().map(|p| page_title(p).to_string()).collect()
    }
}

impl PageSink for FakeSink {
    fn create_page(&self, page: &Value) -> Result<String, HttpError> {
        let title = page_title(page).to_string();
        if self.reject_titles.contains(&title) {
            return Err(HttpError::Status {
                status: 400,
                body: r#"{"object":"error","code":"validation_error"}"#.to_string(),
            });
        }
        let mut pages = self.pages.borrow_mut();
        pages.push(page.clone());
        Ok(format!("page-{}", pages.len()))
    }

    fn find_page(&self, property: &str, key: &str) -> Result<Option<String>, HttpError> {
        self.lookups.borrow_mut().push((property.to_string(), key.to_string()));
        if self.existing_keys.iter().any(|k| k == key) {
            Ok(Some(format!("existing-{key}")))
        } else {
            Ok(None)
        }
    }
}
