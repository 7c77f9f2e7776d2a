use serde::Serialize;
use tracing::instrument;

use crate::error::Result;

impl super::SalesforceRestClient {
    /// Fetch one record: `GET sobjects/{sobject}/{id}`.
    #[instrument(skip(self))]
    pub async fn get(&self, sobject: &str, id: &str) -> Result<serde_json::Value> {
        let path = self.sobject_record_path(sobject, id)?;
        self.client.rest_get(&path).await.map_err(Into::into)
    }

    /// Create a record: `POST sobjects/{sobject}`.
    ///
    /// Returns the response body untouched (`{"id", "success", "errors"}` on
    /// a normal org); deciding whether the create took is the caller's job.
    #[instrument(skip(self, fields))]
    pub async fn create<B: Serialize>(&self, sobject: &str, fields: &B) -> Result<serde_json::Value> {
        let path = self.sobject_collection_path(sobject)?;
        self.client.rest_post(&path, fields).await.map_err(Into::into)
    }

    /// Update a record: `PATCH sobjects/{sobject}/{id}`. Returns the status
    /// code, 204 when the update was applied.
    #[instrument(skip(self, fields))]
    pub async fn update<B: Serialize>(&self, sobject: &str, id: &str, fields: &B) -> Result<u16> {
        let path = self.sobject_record_path(sobject, id)?;
        self.client.rest_patch(&path, fields).await.map_err(Into::into)
    }

    /// Delete a record: `DELETE sobjects/{sobject}/{id}`. Returns the status
    /// code, 204 when the record was deleted.
    #[instrument(skip(self))]
    pub async fn delete(&self, sobject: &str, id: &str) -> Result<u16> {
        let path = self.sobject_record_path(sobject, id)?;
        self.client.rest_delete(&path).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SalesforceRestClient;
    use crate::error::ErrorKind;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Contract/800000000000001AAA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "attributes": {"type": "Contract", "url": "/services/data/v62.0/sobjects/Contract/800000000000001AAA"},
                "Id": "800000000000001AAA",
                "ContractNumber": "00000100",
                "ContractTerm": 12
            })))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let record = client.get("Contract", "800000000000001AAA").await.unwrap();

        assert_eq!(record["ContractNumber"], "00000100");
        assert_eq!(record["ContractTerm"], 12);
    }

    #[tokio::test]
    async fn test_get_missing_record_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Case/500000000000009AAA"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!([{
                "errorCode": "NOT_FOUND",
                "message": "The requested resource does not exist"
            }])))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let err = client.get("Case", "500000000000009AAA").await.unwrap_err();

        match err.kind {
            ErrorKind::NotFound {
                url,
                error_code,
                message,
            } => {
                assert!(url.ends_with("/sobjects/Case/500000000000009AAA"));
                assert_eq!(error_code, "NOT_FOUND");
                assert_eq!(message, "The requested resource does not exist");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/sobjects/CaseComment"))
            .and(body_json(serde_json::json!({
                "ParentId": "500000000000001AAA",
                "CommentBody": "Rebooted the router",
                "IsPublished": false
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "00a000000000001AAA",
                "success": true,
                "errors": []
            })))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let body = client
            .create(
                "CaseComment",
                &serde_json::json!({
                    "ParentId": "500000000000001AAA",
                    "CommentBody": "Rebooted the router",
                    "IsPublished": false
                }),
            )
            .await
            .unwrap();

        assert_eq!(body["id"], "00a000000000001AAA");
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_create_unknown_field_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/sobjects/Account"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!([{
                "errorCode": "INVALID_FIELD",
                "message": "No such column 'Nme' on sobject of type Account"
            }])))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let err = client
            .create("Account", &serde_json::json!({"Nme": "Acme"}))
            .await
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_update_and_delete_return_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/services/data/v62.0/sobjects/Contact/003000000000001AAA"))
            .and(body_json(serde_json::json!({"FirstName": "Adam"})))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/services/data/v62.0/sobjects/Contact/003000000000001AAA"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let status = client
            .update(
                "Contact",
                "003000000000001AAA",
                &serde_json::json!({"FirstName": "Adam"}),
            )
            .await
            .unwrap();
        assert_eq!(status, 204);

        let status = client.delete("Contact", "003000000000001AAA").await.unwrap();
        assert_eq!(status, 204);
    }

    #[tokio::test]
    async fn test_malformed_id_never_leaves_the_process() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let err = client.delete("Account", "../limits").await.unwrap_err();
        assert!(err.is_malformed());
    }
}
