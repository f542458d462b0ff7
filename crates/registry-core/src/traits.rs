use async_trait::async_trait;
use crate::{latest_report, Company, FinancialReport, RegistryResult};

/// Storage collaborator the analysis operations read from
#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn company(&self, id: i64) -> RegistryResult<Option<Company>>;

    /// All reports of a company, in no particular order
    async fn reports(&self, company_id: i64) -> RegistryResult<Vec<FinancialReport>>;

    async fn latest_report(&self, company_id: i64) -> RegistryResult<Option<FinancialReport>> {
        let reports = self.reports(company_id).await?;
        Ok(latest_report(&reports).cloned())
    }

    /// Companies sharing an industry code, excluding `exclude_id`
    async fn industry_peers(&self, industry_code: &str, exclude_id: i64) -> RegistryResult<Vec<Company>>;

    /// Company ids on a user's watchlist
    async fn watchlist(&self, user_id: i64) -> RegistryResult<Vec<i64>>;
}
