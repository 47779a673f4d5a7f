use std::collections::HashMap;

use serde_json::{json, Value};

use crate::daily::payload_model::Row;
use crate::error::ReportError;
use crate::sheets::requests::{BatchUpdateBody, Request};

// ============================================================================
// SheetsApi trait — tab resolver, writer, and reader collaborators
// ============================================================================

/// External spreadsheet collaborator: tab creation/lookup, value writes,
/// batch updates, and read-back for the monthly aggregator.
///
/// Calls are blocking and sequential; a failure mid-sequence can leave the
/// destination tab partially updated. This layer surfaces the failure and
/// does not retry — retry policy belongs to the transport.
pub trait SheetsApi {
    /// Create a tab and return its numeric id.
    fn create_tab(&mut self, title: &str) -> Result<i64, ReportError>;

    /// Look up a tab id by title; `None` when no tab has the title.
    fn tab_id(&self, title: &str) -> Result<Option<i64>, ReportError>;

    /// Append rows of values to the named tab.
    fn write_rows(&mut self, title: &str, rows: &[Row]) -> Result<(), ReportError>;

    /// Submit one ordered batch of update operations.
    fn batch_update(&mut self, requests: &[Request]) -> Result<(), ReportError>;

    /// Read a tab's values as displayed text; `None` when the tab is absent.
    fn read_rows(&self, title: &str) -> Result<Option<Vec<Vec<String>>>, ReportError>;
}

/// Render one API value cell to its displayed text. Whole-valued floats
/// display without a trailing `.0`, the way the sheet shows them.
fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n
                .as_f64()
                .map(|f| format!("{}", f))
                .unwrap_or_else(|| n.to_string()),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// HttpSheetsClient — reqwest-backed spreadsheet API transport
// ============================================================================

pub struct HttpSheetsClient {
    http: reqwest::blocking::Client,
    /// API base, e.g. `https://sheets.googleapis.com/v4/spreadsheets`
    endpoint: String,
    spreadsheet_id: String,
    token: String,
}

impl HttpSheetsClient {
    pub fn new(endpoint: &str, spreadsheet_id: &str, token: &str) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            token: token.to_string(),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.endpoint, self.spreadsheet_id, suffix)
    }

    fn post_json(&self, url: &str, body: &Value, context: &str) -> Result<Value, ReportError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(|source| ReportError::Http {
                context: context.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ReportError::Api {
                context: context.to_string(),
                detail: format!("HTTP {}: {}", status, detail),
            });
        }

        response.json().map_err(|source| ReportError::Http {
            context: context.to_string(),
            source,
        })
    }

    fn get(&self, url: &str, context: &str) -> Result<reqwest::blocking::Response, ReportError> {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|source| ReportError::Http {
                context: context.to_string(),
                source,
            })
    }
}

impl SheetsApi for HttpSheetsClient {
    fn create_tab(&mut self, title: &str) -> Result<i64, ReportError> {
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        let reply = self.post_json(&self.url(":batchUpdate"), &body, "create-tab")?;
        reply
            .pointer("/replies/0/addSheet/properties/sheetId")
            .and_then(Value::as_i64)
            .ok_or_else(|| ReportError::Api {
                context: "create-tab".to_string(),
                detail: format!("no sheetId in reply for tab '{}'", title),
            })
    }

    fn tab_id(&self, title: &str) -> Result<Option<i64>, ReportError> {
        let url = self.url("?fields=sheets.properties");
        let response = self.get(&url, "tab-lookup")?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ReportError::Api {
                context: "tab-lookup".to_string(),
                detail: format!("HTTP {}: {}", status, detail),
            });
        }
        let reply: Value = response.json().map_err(|source| ReportError::Http {
            context: "tab-lookup".to_string(),
            source,
        })?;

        let sheets = reply
            .pointer("/sheets")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for sheet in &sheets {
            let props = &sheet["properties"];
            if props["title"].as_str() == Some(title) {
                return Ok(props["sheetId"].as_i64());
            }
        }
        Ok(None)
    }

    fn write_rows(&mut self, title: &str, rows: &[Row]) -> Result<(), ReportError> {
        let values: Vec<Vec<Value>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_user_value()).collect())
            .collect();
        let body = json!({ "values": values });
        let url = self.url(&format!(
            "/values/{}!A1:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            title
        ));
        self.post_json(&url, &body, "write-rows").map(|_| ())
    }

    fn batch_update(&mut self, requests: &[Request]) -> Result<(), ReportError> {
        let batch = BatchUpdateBody {
            requests: requests.to_vec(),
        };
        let body = serde_json::to_value(&batch).map_err(|source| ReportError::Json {
            context: "batch-update".to_string(),
            source,
        })?;
        self.post_json(&self.url(":batchUpdate"), &body, "batch-update")
            .map(|_| ())
    }

    fn read_rows(&self, title: &str) -> Result<Option<Vec<Vec<String>>>, ReportError> {
        let url = self.url(&format!("/values/{}", title));
        let response = self.get(&url, "read-rows")?;
        let status = response.status();

        // The API answers an unknown tab range with a client error.
        if status.as_u16() == 400 || status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ReportError::Api {
                context: "read-rows".to_string(),
                detail: format!("HTTP {}: {}", status, detail),
            });
        }

        let reply: Value = response.json().map_err(|source| ReportError::Http {
            context: "read-rows".to_string(),
            source,
        })?;
        let rows = reply
            .pointer("/values")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| cells.iter().map(value_to_display).collect())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Some(rows))
    }
}

// ============================================================================
// InMemorySheets — deterministic fake for tests and dry runs
// ============================================================================

/// In-memory spreadsheet double. Records every write and batch so tests can
/// assert on submission content and order, and supports fault injection to
/// exercise fail-fast behavior.
#[derive(Debug, Default)]
pub struct InMemorySheets {
    next_sheet_id: i64,
    tabs: Vec<(String, i64)>,
    values: HashMap<String, Vec<Vec<Value>>>,
    /// Every batch submitted, in order
    pub batches: Vec<Vec<Request>>,
    /// Fail the Nth write (0-based) with an API error, for fail-fast tests
    pub fail_on_write: Option<usize>,
    writes_seen: usize,
}

impl InMemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tab with already-displayed values, as a prior run would have
    /// left it. Used to stage daily tabs for monthly aggregation tests.
    pub fn seed_tab(&mut self, title: &str, rows: Vec<Vec<String>>) {
        let id = self.next_sheet_id;
        self.next_sheet_id += 1;
        self.tabs.push((title.to_string(), id));
        self.values.insert(
            title.to_string(),
            rows.into_iter()
                .map(|row| row.into_iter().map(Value::String).collect())
                .collect(),
        );
    }

    pub fn tab_titles(&self) -> Vec<&str> {
        self.tabs.iter().map(|(title, _)| title.as_str()).collect()
    }

    /// Rows written to a tab, rendered as displayed text.
    pub fn written_rows(&self, title: &str) -> Option<Vec<Vec<String>>> {
        self.values.get(title).map(|rows| {
            rows.iter()
                .map(|row| row.iter().map(value_to_display).collect())
                .collect()
        })
    }
}

impl SheetsApi for InMemorySheets {
    fn create_tab(&mut self, title: &str) -> Result<i64, ReportError> {
        if self.tabs.iter().any(|(t, _)| t == title) {
            return Err(ReportError::Api {
                context: "create-tab".to_string(),
                detail: format!("tab '{}' already exists", title),
            });
        }
        let id = self.next_sheet_id;
        self.next_sheet_id += 1;
        self.tabs.push((title.to_string(), id));
        self.values.insert(title.to_string(), Vec::new());
        Ok(id)
    }

    fn tab_id(&self, title: &str) -> Result<Option<i64>, ReportError> {
        Ok(self
            .tabs
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, id)| *id))
    }

    fn write_rows(&mut self, title: &str, rows: &[Row]) -> Result<(), ReportError> {
        if self.fail_on_write == Some(self.writes_seen) {
            return Err(ReportError::Api {
                context: "write-rows".to_string(),
                detail: "injected write failure".to_string(),
            });
        }
        self.writes_seen += 1;

        let tab = self
            .values
            .get_mut(title)
            .ok_or_else(|| ReportError::Api {
                context: "write-rows".to_string(),
                detail: format!("no tab titled '{}'", title),
            })?;
        for row in rows {
            tab.push(row.iter().map(|cell| cell.to_user_value()).collect());
        }
        Ok(())
    }

    fn batch_update(&mut self, requests: &[Request]) -> Result<(), ReportError> {
        self.batches.push(requests.to_vec());
        Ok(())
    }

    fn read_rows(&self, title: &str) -> Result<Option<Vec<Vec<String>>>, ReportError> {
        Ok(self.written_rows(title))
    }
}
