//! SOQL and SOSL result types.

pub use sfquerier_client::QueryResult;

/// Result of a SOSL search.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct SearchResult<T> {
    #[serde(rename = "searchRecords", default = "Vec::new")]
    pub search_records: Vec<T>,
}
