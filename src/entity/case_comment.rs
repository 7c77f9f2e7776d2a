use serde_json::{json, Map, Value};
use tracing::instrument;

use crate::api::SalesforceApi;
use crate::entity::{is_blank, literal, sobject_wrapper};
use crate::error::{Error, Result};
use crate::record::Record;

sobject_wrapper!(
    /// Comments attached to a case.
    CaseComment,
    "CaseComment"
);

impl<C: SalesforceApi> CaseComment<C> {
    /// Comment on a case and return the comment id.
    pub async fn add(&self, case_id: &str, body: &str, is_published: bool) -> Result<String> {
        if is_blank(case_id) {
            return Err(Error::missing_id("Case"));
        }
        self.sobject
            .create(&json!({
                "ParentId": case_id,
                "CommentBody": body,
                "IsPublished": is_published,
            }))
            .await
    }

    /// Replace a comment's body. `IsPublished` is left alone when `None`.
    pub async fn edit(&self, comment_id: &str, body: &str, is_published: Option<bool>) -> Result<()> {
        let mut fields = Map::new();
        fields.insert("CommentBody".to_string(), Value::from(body));
        if let Some(published) = is_published {
            fields.insert("IsPublished".to_string(), Value::from(published));
        }
        self.sobject.update(comment_id, &Value::Object(fields)).await
    }

    /// Comments on a case.
    #[instrument(skip(self))]
    pub async fn get_for_case(&self, case_id: &str) -> Result<Vec<Record>> {
        if is_blank(case_id) {
            return Err(Error::missing_id("Case"));
        }
        self.sobject
            .query_all(&format!(
                "SELECT Id,ParentId,CommentBody,IsPublished,CreatedDate FROM CaseComment WHERE ParentId={}",
                literal(case_id)
            ))
            .await
    }
}
