//! Industry benchmark
//!
//! Compares a company's latest-year figures with the average of its TEÁOR
//! peers. Every peer contributes exactly one report, its latest one, so a
//! peer with a long history weighs the same as a peer with a single year.

use std::collections::BTreeMap;

use registry_core::{latest_report, Company, FinancialReport, RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};

use crate::models::{BenchmarkMetric, BenchmarkMetricKind, BenchmarkResult, Position};
use crate::{mean, round_to, FinancialAnalysisEngine};

/// A peer company with all of its reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerReports {
    pub company: Company,
    pub reports: Vec<FinancialReport>,
}

impl FinancialAnalysisEngine {
    /// Benchmark `company` against peers in the same industry.
    ///
    /// Peers with a different industry code, and the company itself, are
    /// ignored. Fails only when the company has no industry code.
    pub fn benchmark(
        &self,
        company: &Company,
        company_reports: &[FinancialReport],
        peers: &[PeerReports],
    ) -> RegistryResult<BenchmarkResult> {
        let industry = company.industry().ok_or_else(|| {
            RegistryError::InvalidInput(
                "A cégnek nincs TEÁOR kódja, benchmark nem készíthető".to_string(),
            )
        })?;

        let peer_reports = latest_peer_reports(industry, company.id, peers);
        let own_latest = latest_report(company_reports);

        let metrics = match own_latest {
            Some(own) if !peer_reports.is_empty() => BenchmarkMetricKind::ALL
                .iter()
                .map(|kind| compare_metric(*kind, own, &peer_reports))
                .collect(),
            _ => Vec::new(),
        };

        tracing::debug!(
            company_id = company.id,
            industry,
            peer_count = peer_reports.len(),
            metric_count = metrics.len(),
            "Industry benchmark computed"
        );

        Ok(BenchmarkResult {
            company_id: company.id,
            company_name: company.name.clone(),
            industry_code: company.industry_code.clone(),
            industry_label: company.industry_label.clone(),
            industry_peer_count: peer_reports.len(),
            metrics,
        })
    }
}

/// Latest-year report of every distinct peer in `industry`, excluding `exclude_id`
fn latest_peer_reports<'a>(
    industry: &str,
    exclude_id: i64,
    peers: &'a [PeerReports],
) -> Vec<&'a FinancialReport> {
    let mut latest: BTreeMap<i64, &'a FinancialReport> = BTreeMap::new();
    for peer in peers {
        if peer.company.id == exclude_id || peer.company.industry() != Some(industry) {
            continue;
        }
        let Some(report) = latest_report(&peer.reports) else {
            continue;
        };
        latest
            .entry(peer.company.id)
            .and_modify(|current| {
                if report.year > current.year {
                    *current = report;
                }
            })
            .or_insert(report);
    }
    latest.into_values().collect()
}

fn compare_metric(
    kind: BenchmarkMetricKind,
    own: &FinancialReport,
    peer_reports: &[&FinancialReport],
) -> BenchmarkMetric {
    let company_value = kind.value(own);
    // compared unrounded, rounded for output only
    let industry_avg = mean(peer_reports.iter().map(|r| kind.value(r)));

    let mut position = Position::compare(company_value, industry_avg);
    if kind.lower_is_better() {
        position = position.map(Position::inverted);
    }

    BenchmarkMetric {
        metric: kind,
        company_value: company_value.map(|v| round_to(v, 4)),
        industry_avg: industry_avg.map(|v| round_to(v, 4)),
        position,
    }
}
