pub mod benchmark;
pub mod models;

use registry_core::{Company, FinancialReport};

pub use benchmark::PeerReports;
pub use models::*;

/// Round to a fixed number of decimal places, ties to even
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Mean of the present values rounded to 4 decimals, `None` when nothing is present
pub fn safe_average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    mean(values).map(|avg| round_to(avg, 4))
}

/// Unrounded mean of the present values
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let valid: Vec<f64> = values.into_iter().flatten().collect();
    if valid.is_empty() {
        return None;
    }
    Some(valid.iter().sum::<f64>() / valid.len() as f64)
}

/// Compound annual revenue growth in percent, rounded to 2 decimals.
///
/// Uses the first and last year with positive revenue; gap years in between
/// are not accounted for.
pub fn revenue_cagr(reports: &[FinancialReport]) -> Option<f64> {
    let mut revenues: Vec<(i32, f64)> = reports
        .iter()
        .filter_map(|r| r.revenue.filter(|v| *v > 0.0).map(|v| (r.year, v)))
        .collect();
    if revenues.len() < 2 {
        return None;
    }
    revenues.sort_by_key(|(year, _)| *year);

    let (first_year, first_value) = revenues[0];
    let (last_year, last_value) = revenues[revenues.len() - 1];
    let years = last_year.checked_sub(first_year)?;
    if years <= 0 || first_value <= 0.0 {
        return None;
    }

    let cagr = ((last_value / first_value).powf(1.0 / years as f64) - 1.0) * 100.0;
    Some(round_to(cagr, 2))
}

/// Year-over-year change in percent relative to the absolute previous value
fn growth_pct(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (previous, current) {
        (Some(prev), Some(cur)) if prev != 0.0 => {
            Some(round_to((cur - prev) / prev.abs() * 100.0, 2))
        }
        _ => None,
    }
}

pub struct FinancialAnalysisEngine;

impl FinancialAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Per-year metrics in ascending year order. The input slice is left untouched.
    pub fn build_yearly_metrics(&self, reports: &[FinancialReport]) -> Vec<YearlyMetric> {
        let mut sorted: Vec<&FinancialReport> = reports.iter().collect();
        sorted.sort_by_key(|r| r.year);

        let mut metrics = Vec::with_capacity(sorted.len());
        let mut previous_revenue: Option<f64> = None;
        for report in sorted {
            let growth = growth_pct(previous_revenue, report.revenue);
            metrics.push(YearlyMetric::from_report(report, growth));
            previous_revenue = report.revenue;
        }
        metrics
    }

    /// Full analysis of one company over all of its reports
    pub fn analyze(&self, company: &Company, reports: &[FinancialReport]) -> FinancialAnalysisResult {
        let averages = Averages::of(reports);
        let result = FinancialAnalysisResult {
            company_id: company.id,
            company_name: company.name.clone(),
            industry_code: company.industry_code.clone(),
            yearly_metrics: self.build_yearly_metrics(reports),
            avg_profit_margin: averages.profit_margin,
            avg_roe: averages.roe,
            avg_debt_ratio: averages.debt_ratio,
            avg_liquidity: averages.liquidity,
            revenue_cagr: revenue_cagr(reports),
        };
        tracing::debug!(
            company_id = company.id,
            years = result.yearly_metrics.len(),
            revenue_cagr = ?result.revenue_cagr,
            "Financial analysis built"
        );
        result
    }

    /// Compare entry for one company
    pub fn comparison(&self, company: &Company, reports: &[FinancialReport]) -> CompanyComparison {
        let averages = Averages::of(reports);
        CompanyComparison {
            company_id: company.id,
            company_name: company.name.clone(),
            yearly_metrics: self.build_yearly_metrics(reports),
            avg_profit_margin: averages.profit_margin,
            avg_roe: averages.roe,
            avg_debt_ratio: averages.debt_ratio,
            avg_liquidity: averages.liquidity,
        }
    }
}

impl Default for FinancialAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Multi-year averages of the headline ratios
struct Averages {
    profit_margin: Option<f64>,
    roe: Option<f64>,
    debt_ratio: Option<f64>,
    liquidity: Option<f64>,
}

impl Averages {
    fn of(reports: &[FinancialReport]) -> Self {
        Self {
            profit_margin: safe_average(reports.iter().map(|r| r.profit_margin)),
            roe: safe_average(reports.iter().map(|r| r.roe)),
            debt_ratio: safe_average(reports.iter().map(|r| r.debt_ratio)),
            liquidity: safe_average(reports.iter().map(|r| r.liquidity_ratio)),
        }
    }
}
