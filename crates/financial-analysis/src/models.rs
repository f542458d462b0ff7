use registry_core::FinancialReport;
use serde::{Deserialize, Serialize};

/// One fiscal year of a company's figures plus the derived growth rate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyMetric {
    pub year: i32,
    pub revenue: Option<f64>,
    pub operating_result: Option<f64>,
    pub net_result: Option<f64>,
    pub equity: Option<f64>,
    pub liabilities: Option<f64>,
    pub total_assets: Option<f64>,
    pub current_assets: Option<f64>,
    pub short_term_liabilities: Option<f64>,
    pub debt_ratio: Option<f64>,
    pub profit_margin: Option<f64>,
    pub liquidity_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub ebitda: Option<f64>,
    /// Year-over-year revenue growth in percent
    pub revenue_growth_pct: Option<f64>,
}

impl YearlyMetric {
    pub(crate) fn from_report(report: &FinancialReport, revenue_growth_pct: Option<f64>) -> Self {
        Self {
            year: report.year,
            revenue: report.revenue,
            operating_result: report.operating_result,
            net_result: report.net_result,
            equity: report.equity,
            liabilities: report.liabilities,
            total_assets: report.total_assets,
            current_assets: report.current_assets,
            short_term_liabilities: report.short_term_liabilities,
            debt_ratio: report.debt_ratio,
            profit_margin: report.profit_margin,
            liquidity_ratio: report.liquidity_ratio,
            roe: report.roe,
            ebitda: report.ebitda,
            revenue_growth_pct,
        }
    }
}

/// Multi-year financial analysis of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysisResult {
    pub company_id: i64,
    pub company_name: String,
    pub industry_code: Option<String>,
    pub yearly_metrics: Vec<YearlyMetric>,
    pub avg_profit_margin: Option<f64>,
    pub avg_roe: Option<f64>,
    pub avg_debt_ratio: Option<f64>,
    pub avg_liquidity: Option<f64>,
    /// Compound annual revenue growth in percent
    pub revenue_cagr: Option<f64>,
}

/// Compare entry: the analysis without industry code and CAGR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyComparison {
    pub company_id: i64,
    pub company_name: String,
    pub yearly_metrics: Vec<YearlyMetric>,
    pub avg_profit_margin: Option<f64>,
    pub avg_roe: Option<f64>,
    pub avg_debt_ratio: Option<f64>,
    pub avg_liquidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareResult {
    pub companies: Vec<CompanyComparison>,
}

/// Metrics compared against the industry average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkMetricKind {
    ProfitMargin,
    Roe,
    DebtRatio,
    Liquidity,
    Revenue,
    Ebitda,
}

impl BenchmarkMetricKind {
    /// Output order of benchmark metrics
    pub const ALL: [BenchmarkMetricKind; 6] = [
        BenchmarkMetricKind::ProfitMargin,
        BenchmarkMetricKind::Roe,
        BenchmarkMetricKind::DebtRatio,
        BenchmarkMetricKind::Liquidity,
        BenchmarkMetricKind::Revenue,
        BenchmarkMetricKind::Ebitda,
    ];

    pub fn value(&self, report: &FinancialReport) -> Option<f64> {
        match self {
            BenchmarkMetricKind::ProfitMargin => report.profit_margin,
            BenchmarkMetricKind::Roe => report.roe,
            BenchmarkMetricKind::DebtRatio => report.debt_ratio,
            BenchmarkMetricKind::Liquidity => report.liquidity_ratio,
            BenchmarkMetricKind::Revenue => report.revenue,
            BenchmarkMetricKind::Ebitda => report.ebitda,
        }
    }

    /// For these metrics a lower value is the better one
    pub fn lower_is_better(&self) -> bool {
        matches!(self, BenchmarkMetricKind::DebtRatio)
    }
}

/// Where the company stands relative to the industry average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Above,
    Below,
    Equal,
}

impl Position {
    pub fn compare(company_value: Option<f64>, industry_avg: Option<f64>) -> Option<Self> {
        let (c, i) = (company_value?, industry_avg?);
        if c > i {
            Some(Position::Above)
        } else if c < i {
            Some(Position::Below)
        } else {
            Some(Position::Equal)
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Position::Above => Position::Below,
            Position::Below => Position::Above,
            Position::Equal => Position::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetric {
    pub metric: BenchmarkMetricKind,
    pub company_value: Option<f64>,
    pub industry_avg: Option<f64>,
    pub position: Option<Position>,
}

/// Company's latest-year figures against its TEÁOR industry peers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub company_id: i64,
    pub company_name: String,
    pub industry_code: Option<String>,
    pub industry_label: Option<String>,
    /// Peers that contributed a latest-year report
    pub industry_peer_count: usize,
    pub metrics: Vec<BenchmarkMetric>,
}
