use serde_json::json;
use tracing::{instrument, warn};

use crate::api::SalesforceApi;
use crate::entity::{is_blank, literal, sobject_wrapper};
use crate::error::{Error, ErrorKind, Result};
use crate::record::Record;

sobject_wrapper!(
    /// Support cases.
    Case,
    "Case"
);

impl<C: SalesforceApi> Case<C> {
    /// The case with the given number.
    ///
    /// Returns `NotFound` when nothing matches.
    #[instrument(skip(self))]
    pub async fn get_by_number(&self, case_number: &str) -> Result<Record> {
        if is_blank(case_number) {
            return Err(Error::missing_id(Self::SOBJECT));
        }
        let records = self
            .sobject
            .query(&format!(
                "SELECT Id,AccountId,CaseNumber,ContactId,Description,ParentId,Status \
                 FROM Case WHERE CaseNumber={}",
                literal(case_number)
            ))
            .await?;

        records.into_iter().next().ok_or_else(|| {
            warn!(case_number, "Case was not found");
            Error::new(ErrorKind::NotFound {
                resource: Self::SOBJECT.to_string(),
                error_code: "NOT_FOUND".to_string(),
                message: format!("No case numbered {}", case_number),
            })
        })
    }

    /// Open a case for a contact and return its id.
    pub async fn open(&self, contact_id: &str, subject: &str, description: &str) -> Result<String> {
        if is_blank(contact_id) {
            return Err(Error::missing_id("Contact"));
        }
        self.sobject
            .create(&json!({
                "ContactId": contact_id,
                "Subject": subject,
                "Description": description,
            }))
            .await
    }
}
