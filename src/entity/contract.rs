use tracing::instrument;

use crate::api::SalesforceApi;
use crate::entity::{is_blank, literal, sobject_wrapper};
use crate::error::{Error, Result};
use crate::record::Record;

sobject_wrapper!(
    /// Contracts.
    Contract,
    "Contract"
);

impl<C: SalesforceApi> Contract<C> {
    /// Contracts signed under an account.
    #[instrument(skip(self))]
    pub async fn get_account_contracts(&self, account_id: &str) -> Result<Vec<Record>> {
        if is_blank(account_id) {
            return Err(Error::missing_id("Account"));
        }
        self.sobject
            .query(&format!(
                "SELECT Id,ContractNumber,ContractTerm,CreatedById,CreatedDate,Description,OwnerId,AccountId \
                 FROM Contract WHERE AccountId={}",
                literal(account_id)
            ))
            .await
    }
}
