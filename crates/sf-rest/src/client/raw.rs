use tracing::instrument;

use sfquerier_client::RequestMethod;

use crate::error::Result;

impl super::SalesforceRestClient {
    /// Call any path under the versioned REST root.
    ///
    /// `path` is relative (`sobjects/Account/001...`, `ui-api/record-ui/001...`).
    /// Returns the JSON body, or `Value::Null` when Salesforce sends none.
    #[instrument(skip(self, params, body))]
    pub async fn restful(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        self.client
            .restful(method, path, params, body)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SalesforceRestClient;
    use sfquerier_client::RequestMethod;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_restful_get_with_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Account/001000000000001AAA"))
            .and(query_param("fields", "Name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Id": "001000000000001AAA",
                "Name": "Acme"
            })))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let value = client
            .restful(
                RequestMethod::Get,
                "sobjects/Account/001000000000001AAA",
                &[("fields".to_string(), "Name".to_string())],
                None,
            )
            .await
            .unwrap();

        assert_eq!(value["Name"], "Acme");
    }

    #[tokio::test]
    async fn test_restful_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/ui-api/record-ui/001000000000404AAA"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!([{
                "errorCode": "NOT_FOUND",
                "message": "The requested resource does not exist"
            }])))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let err = client
            .restful(
                RequestMethod::Get,
                "ui-api/record-ui/001000000000404AAA",
                &[],
                None,
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
