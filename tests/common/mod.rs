//! In-memory `SalesforceApi` that records every call and answers from a script.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use sfquerier::SalesforceApi;
use sfquerier_rest::{Error as RestError, ErrorKind as RestErrorKind, RequestMethod};

/// A remote call as the double saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query(String),
    QueryMore(String),
    Search(String),
    Get { sobject: String, id: String },
    Create { sobject: String, fields: Value },
    Update { sobject: String, id: String, fields: Value },
    Delete { sobject: String, id: String },
    Restful { method: String, path: String, params: Vec<(String, String)>, body: Option<Value> },
}

/// A scripted answer.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    NotFound,
    Malformed(&'static str),
    Unknown(&'static str),
}

impl Reply {
    fn into_error(self, url: &str) -> RestError {
        let kind = match self {
            Reply::NotFound => RestErrorKind::NotFound {
                url: url.to_string(),
                error_code: "NOT_FOUND".to_string(),
                message: "The requested resource does not exist".to_string(),
            },
            Reply::Malformed(code) => RestErrorKind::MalformedRequest {
                url: url.to_string(),
                error_code: code.to_string(),
                message: "Request rejected".to_string(),
            },
            Reply::Unknown(message) => RestErrorKind::Client(message.to_string()),
            Reply::Json(_) | Reply::Status(_) => unreachable!("not an error reply"),
        };
        RestError::new(kind)
    }

    fn into_json(self, url: &str) -> sfquerier_rest::Result<Value> {
        match self {
            Reply::Json(value) => Ok(value),
            Reply::Status(_) => Ok(Value::Null),
            other => Err(other.into_error(url)),
        }
    }

    fn into_status(self, url: &str) -> sfquerier_rest::Result<u16> {
        match self {
            Reply::Status(status) => Ok(status),
            Reply::Json(_) => Ok(200),
            other => Err(other.into_error(url)),
        }
    }
}

/// A query envelope holding `records`.
pub fn envelope(records: Vec<Value>) -> Value {
    json!({"totalSize": records.len(), "done": true, "records": records})
}

/// A page that continues at `next`.
pub fn partial_page(total: usize, records: Vec<Value>, next: &str) -> Value {
    json!({"totalSize": total, "done": false, "nextRecordsUrl": next, "records": records})
}

#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<Call>>,
    queries: Vec<(String, Reply)>,
    pages: HashMap<String, Reply>,
    search: Option<Reply>,
    gets: HashMap<String, Reply>,
    create: Option<Reply>,
    updates: HashMap<String, Reply>,
    deletes: HashMap<String, Reply>,
    restful: HashMap<String, Reply>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any query whose SOQL contains `fragment`. First match wins.
    pub fn on_query(mut self, fragment: &str, reply: Reply) -> Self {
        self.queries.push((fragment.to_string(), reply));
        self
    }

    pub fn on_query_more(mut self, url: &str, reply: Reply) -> Self {
        self.pages.insert(url.to_string(), reply);
        self
    }

    pub fn on_search(mut self, reply: Reply) -> Self {
        self.search = Some(reply);
        self
    }

    pub fn on_get(mut self, id: &str, reply: Reply) -> Self {
        self.gets.insert(id.to_string(), reply);
        self
    }

    pub fn on_create(mut self, reply: Reply) -> Self {
        self.create = Some(reply);
        self
    }

    pub fn on_update(mut self, id: &str, reply: Reply) -> Self {
        self.updates.insert(id.to_string(), reply);
        self
    }

    pub fn on_delete(mut self, id: &str, reply: Reply) -> Self {
        self.deletes.insert(id.to_string(), reply);
        self
    }

    pub fn on_restful(mut self, path: &str, reply: Reply) -> Self {
        self.restful.insert(path.to_string(), reply);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(sobject, id)` of every delete, in order.
    pub fn deletes(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete { sobject, id } => Some((sobject, id)),
                _ => None,
            })
            .collect()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Query(soql) => Some(soql),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SalesforceApi for MockApi {
    async fn query(&self, soql: &str) -> sfquerier_rest::Result<Value> {
        self.record(Call::Query(soql.to_string()));
        self.queries
            .iter()
            .find(|(fragment, _)| soql.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Reply::Json(envelope(vec![])))
            .into_json("/services/data/v62.0/query")
    }

    async fn query_more(&self, next_records_url: &str) -> sfquerier_rest::Result<Value> {
        self.record(Call::QueryMore(next_records_url.to_string()));
        self.pages
            .get(next_records_url)
            .cloned()
            .unwrap_or(Reply::NotFound)
            .into_json(next_records_url)
    }

    async fn search(&self, sosl: &str) -> sfquerier_rest::Result<Value> {
        self.record(Call::Search(sosl.to_string()));
        self.search
            .clone()
            .unwrap_or_else(|| Reply::Json(json!({"searchRecords": []})))
            .into_json("/services/data/v62.0/search")
    }

    async fn get(&self, sobject: &str, id: &str) -> sfquerier_rest::Result<Value> {
        self.record(Call::Get {
            sobject: sobject.to_string(),
            id: id.to_string(),
        });
        self.gets
            .get(id)
            .cloned()
            .unwrap_or(Reply::NotFound)
            .into_json(&format!("/services/data/v62.0/sobjects/{}/{}", sobject, id))
    }

    async fn create(&self, sobject: &str, fields: &Value) -> sfquerier_rest::Result<Value> {
        self.record(Call::Create {
            sobject: sobject.to_string(),
            fields: fields.clone(),
        });
        self.create
            .clone()
            .unwrap_or_else(|| Reply::Json(json!({"id": "001000000000099AAA", "success": true, "errors": []})))
            .into_json(&format!("/services/data/v62.0/sobjects/{}", sobject))
    }

    async fn update(&self, sobject: &str, id: &str, fields: &Value) -> sfquerier_rest::Result<u16> {
        self.record(Call::Update {
            sobject: sobject.to_string(),
            id: id.to_string(),
            fields: fields.clone(),
        });
        self.updates
            .get(id)
            .cloned()
            .unwrap_or(Reply::Status(204))
            .into_status(&format!("/services/data/v62.0/sobjects/{}/{}", sobject, id))
    }

    async fn delete(&self, sobject: &str, id: &str) -> sfquerier_rest::Result<u16> {
        self.record(Call::Delete {
            sobject: sobject.to_string(),
            id: id.to_string(),
        });
        self.deletes
            .get(id)
            .cloned()
            .unwrap_or(Reply::Status(204))
            .into_status(&format!("/services/data/v62.0/sobjects/{}/{}", sobject, id))
    }

    async fn restful(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> sfquerier_rest::Result<Value> {
        self.record(Call::Restful {
            method: format!("{:?}", method),
            path: path.to_string(),
            params: params.to_vec(),
            body: body.cloned(),
        });
        self.restful
            .get(path)
            .cloned()
            .unwrap_or(Reply::NotFound)
            .into_json(&format!("/services/data/v62.0/{}", path))
    }
}
