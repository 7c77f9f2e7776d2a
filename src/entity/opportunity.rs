use tracing::instrument;

use crate::api::SalesforceApi;
use crate::entity::{is_blank, literal, sobject_wrapper};
use crate::error::{Error, Result};
use crate::record::Record;

sobject_wrapper!(
    /// Opportunities.
    Opportunity,
    "Opportunity"
);

impl<C: SalesforceApi> Opportunity<C> {
    /// Opportunities of an account, with amount and win/close flags.
    #[instrument(skip(self))]
    pub async fn get_opportunities(&self, account_id: &str) -> Result<Vec<Record>> {
        if is_blank(account_id) {
            return Err(Error::missing_id("Account"));
        }
        self.sobject
            .query(&format!(
                "SELECT Id,Amount,IsClosed,IsWon,Type FROM Opportunity WHERE AccountId={}",
                literal(account_id)
            ))
            .await
    }
}
