//! Request-level operations of the company registry.
//!
//! Resolves company ids through a [`CompanyStore`], validates request
//! parameters and hands the loaded records to the risk scorer and the
//! financial analysis engine. Identifier problems surface as
//! [`RegistryError::NotFound`] / [`RegistryError::InvalidInput`] before any
//! computation starts; missing data never does.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use financial_analysis::{
    BenchmarkResult, CompareResult, FinancialAnalysisEngine, FinancialAnalysisResult, PeerReports,
};
use registry_core::{latest_report, Company, CompanyStore, RegistryError, RegistryResult};
use risk_scoring::{RiskAnalysisResult, RiskScorer, WatchlistRiskItem, WatchlistRiskSummary};

pub mod memory_store;

pub use memory_store::{Dataset, InMemoryStore};

/// Smallest number of companies a comparison accepts
pub const MIN_COMPARE: usize = 2;
/// Largest number of companies a comparison accepts
pub const MAX_COMPARE: usize = 5;

/// Parse a comma-separated id list. Blank tokens are skipped.
pub fn parse_company_ids(ids: &str) -> RegistryResult<Vec<i64>> {
    ids.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| RegistryError::InvalidInput("Hibás ID formátum".to_string()))
        })
        .collect()
}

fn validate_compare_count(count: usize) -> RegistryResult<()> {
    if count > MAX_COMPARE {
        return Err(RegistryError::InvalidInput(format!(
            "Maximum {} cég hasonlítható össze",
            MAX_COMPARE
        )));
    }
    if count < MIN_COMPARE {
        return Err(RegistryError::InvalidInput(format!(
            "Legalább {} cég szükséges az összehasonlításhoz",
            MIN_COMPARE
        )));
    }
    Ok(())
}

pub struct RegistryService {
    store: Arc<dyn CompanyStore>,
    engine: FinancialAnalysisEngine,
    /// Fixed evaluation date for the age rule; today when unset
    evaluation_date: Option<NaiveDate>,
}

impl RegistryService {
    pub fn new(store: Arc<dyn CompanyStore>) -> Self {
        Self {
            store,
            engine: FinancialAnalysisEngine::new(),
            evaluation_date: None,
        }
    }

    /// Pin the date risk scores are evaluated against
    pub fn with_evaluation_date(mut self, date: NaiveDate) -> Self {
        self.evaluation_date = Some(date);
        self
    }

    fn scorer(&self) -> RiskScorer {
        let date = self
            .evaluation_date
            .unwrap_or_else(|| Local::now().date_naive());
        RiskScorer::new(date)
    }

    async fn require_company(&self, id: i64) -> RegistryResult<Company> {
        self.store
            .company(id)
            .await?
            .ok_or_else(RegistryError::company_not_found)
    }

    /// Risk score, factors and input snapshot of one company
    pub async fn risk_analysis(&self, company_id: i64) -> RegistryResult<RiskAnalysisResult> {
        let company = self.require_company(company_id).await?;
        let latest = self.store.latest_report(company_id).await?;

        let assessment = self.scorer().assess(&company, latest.as_ref());
        tracing::info!(
            company_id,
            score = assessment.score,
            level = assessment.risk_level().as_str(),
            "Risk analysis served"
        );
        Ok(RiskAnalysisResult::new(&company, latest.as_ref(), assessment))
    }

    /// Abbreviated risk results for every company on a user's watchlist
    pub async fn watchlist_overview(&self, user_id: i64) -> RegistryResult<WatchlistRiskSummary> {
        let scorer = self.scorer();
        let mut items = Vec::new();

        for company_id in self.store.watchlist(user_id).await? {
            let Some(company) = self.store.company(company_id).await? else {
                tracing::warn!(user_id, company_id, "Watched company missing from store");
                continue;
            };
            let latest = self.store.latest_report(company_id).await?;
            let assessment = scorer.assess(&company, latest.as_ref());
            items.push(WatchlistRiskItem::new(&company, &assessment));
        }

        let overview = WatchlistRiskSummary::from_items(items);
        tracing::info!(
            user_id,
            items = overview.items.len(),
            red = overview.summary.red,
            "Watchlist risk overview served"
        );
        Ok(overview)
    }

    /// Yearly metrics, averages and revenue CAGR of one company
    pub async fn financial_analysis(&self, company_id: i64) -> RegistryResult<FinancialAnalysisResult> {
        let company = self.require_company(company_id).await?;
        let reports = self.store.reports(company_id).await?;
        Ok(self.engine.analyze(&company, &reports))
    }

    /// Compare companies given as a comma-separated id list
    pub async fn compare(&self, ids: &str) -> RegistryResult<CompareResult> {
        let ids = parse_company_ids(ids)?;
        self.compare_ids(&ids).await
    }

    /// Compare 2 to 5 companies. All ids are resolved before anything is built.
    pub async fn compare_ids(&self, ids: &[i64]) -> RegistryResult<CompareResult> {
        validate_compare_count(ids.len())?;

        let mut loaded = Vec::with_capacity(ids.len());
        for &id in ids {
            let company = self.store.company(id).await?.ok_or_else(|| {
                RegistryError::NotFound(format!("A(z) {} ID-jú cég nem található", id))
            })?;
            let reports = self.store.reports(id).await?;
            loaded.push((company, reports));
        }

        let companies = loaded
            .iter()
            .map(|(company, reports)| self.engine.comparison(company, reports))
            .collect();
        tracing::info!(count = ids.len(), "Company comparison served");
        Ok(CompareResult { companies })
    }

    /// Latest-year figures of a company against its industry peers
    pub async fn benchmark(&self, company_id: i64) -> RegistryResult<BenchmarkResult> {
        let company = self.require_company(company_id).await?;
        let Some(industry) = company.industry().map(str::to_string) else {
            // engine produces the client error for a missing industry code
            return self.engine.benchmark(&company, &[], &[]);
        };

        let reports = self.store.reports(company_id).await?;
        let mut peers = Vec::new();
        for peer in self.store.industry_peers(&industry, company_id).await? {
            let peer_reports = self.store.reports(peer.id).await?;
            if latest_report(&peer_reports).is_some() {
                peers.push(PeerReports {
                    company: peer,
                    reports: peer_reports,
                });
            }
        }

        let result = self.engine.benchmark(&company, &reports, &peers)?;
        tracing::info!(
            company_id,
            industry = %industry,
            peers = result.industry_peer_count,
            "Industry benchmark served"
        );
        Ok(result)
    }
}
