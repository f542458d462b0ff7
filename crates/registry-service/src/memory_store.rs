//! In-memory `CompanyStore`, used by the CLI and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use registry_core::{Company, CompanyStore, FinancialReport, RegistryResult};
use serde::{Deserialize, Serialize};

/// Serialized form of a registry snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub reports: Vec<FinancialReport>,
    /// user id -> watched company ids
    #[serde(default)]
    pub watchlists: HashMap<i64, Vec<i64>>,
}

#[derive(Default)]
pub struct InMemoryStore {
    companies: DashMap<i64, Company>,
    reports: DashMap<i64, Vec<FinancialReport>>,
    watchlists: DashMap<i64, Vec<i64>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        let store = Self::new();
        for company in dataset.companies {
            store.insert_company(company);
        }
        for report in dataset.reports {
            store.insert_report(report);
        }
        for (user_id, company_ids) in dataset.watchlists {
            store.watchlists.insert(user_id, company_ids);
        }
        store
    }

    pub fn insert_company(&self, company: Company) {
        self.companies.insert(company.id, company);
    }

    pub fn insert_report(&self, report: FinancialReport) {
        self.reports.entry(report.company_id).or_default().push(report);
    }

    pub fn watch(&self, user_id: i64, company_id: i64) {
        let mut list = self.watchlists.entry(user_id).or_default();
        if !list.contains(&company_id) {
            list.push(company_id);
        }
    }

    pub fn company_count(&self) -> usize {
        self.companies.len()
    }
}

#[async_trait]
impl CompanyStore for InMemoryStore {
    async fn company(&self, id: i64) -> RegistryResult<Option<Company>> {
        Ok(self.companies.get(&id).map(|c| c.value().clone()))
    }

    async fn reports(&self, company_id: i64) -> RegistryResult<Vec<FinancialReport>> {
        Ok(self
            .reports
            .get(&company_id)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }

    async fn industry_peers(&self, industry_code: &str, exclude_id: i64) -> RegistryResult<Vec<Company>> {
        let mut peers: Vec<Company> = self
            .companies
            .iter()
            .filter(|c| c.id != exclude_id && c.industry() == Some(industry_code))
            .map(|c| c.value().clone())
            .collect();
        peers.sort_by_key(|c| c.id);
        Ok(peers)
    }

    async fn watchlist(&self, user_id: i64) -> RegistryResult<Vec<i64>> {
        Ok(self
            .watchlists
            .get(&user_id)
            .map(|w| w.value().clone())
            .unwrap_or_default())
    }
}
