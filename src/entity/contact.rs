use tracing::instrument;

use crate::api::SalesforceApi;
use crate::cascade::{self, ChildDeletion, Dependent, PurgeReport};
use crate::entity::{is_blank, literal, sobject_wrapper};
use crate::error::{Error, Result};
use crate::record::Record;

const DEPENDENTS: [Dependent; 1] = [Dependent::new("Case", "ContactId").labelled("CaseNumber")];

sobject_wrapper!(
    /// Contacts.
    Contact,
    "Contact"
);

impl<C: SalesforceApi> Contact<C> {
    /// Contacts belonging to an account.
    #[instrument(skip(self))]
    pub async fn get_account_contacts(&self, account_id: &str) -> Result<Vec<Record>> {
        if is_blank(account_id) {
            return Err(Error::missing_id("Account"));
        }
        self.sobject
            .query(&format!(
                "SELECT Id,FirstName,LastName,Email,Phone,AccountId FROM Contact WHERE AccountId={}",
                literal(account_id)
            ))
            .await
    }

    /// Cases raised by a contact.
    #[instrument(skip(self))]
    pub async fn get_cases(&self, contact_id: &str) -> Result<Vec<Record>> {
        if is_blank(contact_id) {
            return Err(Error::missing_id(Self::SOBJECT));
        }
        self.sobject
            .query(&format!(
                "SELECT Id,CaseNumber,ContactId,AccountId FROM Case WHERE ContactId={}",
                literal(contact_id)
            ))
            .await
    }

    /// Delete the contact's cases, then the contact.
    pub async fn purge(&self, contact_id: &str) -> Result<PurgeReport> {
        cascade::purge(self.sobject.api(), Self::SOBJECT, contact_id, &DEPENDENTS).await
    }

    /// Delete the contact's cases and keep the contact.
    pub async fn delete_cases(&self, contact_id: &str) -> Result<Vec<ChildDeletion>> {
        cascade::delete_children(self.sobject.api(), Self::SOBJECT, contact_id, &DEPENDENTS).await
    }
}
