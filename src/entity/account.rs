use tracing::instrument;

use crate::api::SalesforceApi;
use crate::cascade::{self, Dependent, PurgeReport};
use crate::entity::{is_blank, literal, sobject_wrapper};
use crate::error::{Error, Result};
use crate::record::Record;

const FIELDS: &str = "Id,AccountNumber,Name,CreatedDate,Website";

/// Cases then opportunities; the account goes last.
const DEPENDENTS: [Dependent; 2] = [
    Dependent::new("Case", "AccountId").labelled("CaseNumber"),
    Dependent::new("Opportunity", "AccountId"),
];

sobject_wrapper!(
    /// Accounts.
    Account,
    "Account"
);

impl<C: SalesforceApi> Account<C> {
    /// Every account, following pagination to the end.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Record>> {
        self.sobject
            .query_all(&format!("SELECT {} FROM Account", FIELDS))
            .await
    }

    /// Accounts matching a raw SOQL `WHERE` clause.
    ///
    /// The clause is sent verbatim; quote any values with the SOQL escaping
    /// helpers before building it.
    #[instrument(skip(self))]
    pub async fn get_all_where(&self, clause: &str) -> Result<Vec<Record>> {
        self.sobject
            .query_all(&format!("SELECT {} FROM Account WHERE {}", FIELDS, clause))
            .await
    }

    /// Accounts whose `Website` is exactly `website`. First page only.
    #[instrument(skip(self))]
    pub async fn get_by_domain(&self, website: &str) -> Result<Vec<Record>> {
        self.sobject
            .query(&format!(
                "SELECT {} FROM Account WHERE Website={}",
                FIELDS,
                literal(website)
            ))
            .await
    }

    /// Accounts named exactly `name`. First page only.
    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> Result<Vec<Record>> {
        self.sobject
            .query(&format!(
                "SELECT {} FROM Account WHERE Name={}",
                FIELDS,
                literal(name)
            ))
            .await
    }

    /// Cases filed against an account.
    #[instrument(skip(self))]
    pub async fn get_cases(&self, account_id: &str) -> Result<Vec<Record>> {
        if is_blank(account_id) {
            return Err(Error::missing_id(Self::SOBJECT));
        }
        self.sobject
            .query(&format!(
                "SELECT Id,CaseNumber,ContactId,AccountId,Type,Status,Subject,Description \
                 FROM Case WHERE AccountId={}",
                literal(account_id)
            ))
            .await
    }

    /// Contacts belonging to an account.
    #[instrument(skip(self))]
    pub async fn get_contacts(&self, account_id: &str) -> Result<Vec<Record>> {
        if is_blank(account_id) {
            return Err(Error::missing_id(Self::SOBJECT));
        }
        self.sobject
            .query(&format!(
                "SELECT Id,FirstName,LastName,Email,Phone,AccountId FROM Contact WHERE AccountId={}",
                literal(account_id)
            ))
            .await
    }

    /// Delete the account's cases and opportunities, then the account.
    ///
    /// See [`cascade::purge`] for the failure policy.
    pub async fn purge(&self, account_id: &str) -> Result<PurgeReport> {
        cascade::purge(self.sobject.api(), Self::SOBJECT, account_id, &DEPENDENTS).await
    }
}
