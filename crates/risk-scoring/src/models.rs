use registry_core::{Company, FinancialReport};
use serde::{Deserialize, Serialize};

use crate::scorer::{PartnerRating, RiskAssessment, RiskColor, RiskFactor, RiskLevel};

/// Status shown when the registry has none
pub const UNKNOWN_STATUS: &str = "ismeretlen";

/// Full risk analysis of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysisResult {
    pub company_id: i64,
    pub company_name: String,
    pub status: String,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub risk_color: RiskColor,
    pub partner_rating: PartnerRating,
    pub factors: Vec<RiskFactor>,
    pub negative_events: Vec<String>,

    // Snapshot of the inputs the score was built from
    pub founded_on: Option<String>,
    pub industry_code: Option<String>,
    pub nav_deregistered: Option<bool>,
    pub nav_risk_rating: Option<String>,
    pub debt_ratio: Option<f64>,
    pub equity: Option<f64>,
    pub liquidity_ratio: Option<f64>,
    pub net_result: Option<f64>,
}

impl RiskAnalysisResult {
    pub fn new(
        company: &Company,
        latest_report: Option<&FinancialReport>,
        assessment: RiskAssessment,
    ) -> Self {
        let level = assessment.risk_level();
        Self {
            company_id: company.id,
            company_name: company.name.clone(),
            status: display_status(company),
            risk_score: assessment.score,
            risk_level: level,
            risk_color: level.color(),
            partner_rating: assessment.partner_rating(),
            factors: assessment.factors,
            negative_events: assessment.negative_events,
            founded_on: company.founded_on.clone(),
            industry_code: company.industry_code.clone(),
            nav_deregistered: company.nav_deregistered,
            nav_risk_rating: company.nav_risk_rating.clone(),
            debt_ratio: latest_report.and_then(|r| r.debt_ratio),
            equity: latest_report.and_then(|r| r.equity),
            liquidity_ratio: latest_report.and_then(|r| r.liquidity_ratio),
            net_result: latest_report.and_then(|r| r.net_result),
        }
    }
}

/// Abbreviated risk result for one watchlist entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistRiskItem {
    pub company_id: i64,
    pub company_name: String,
    pub status: String,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub risk_color: RiskColor,
    pub partner_rating: PartnerRating,
}

impl WatchlistRiskItem {
    pub fn new(company: &Company, assessment: &RiskAssessment) -> Self {
        let level = assessment.risk_level();
        Self {
            company_id: company.id,
            company_name: company.name.clone(),
            status: display_status(company),
            risk_score: assessment.score,
            risk_level: level,
            risk_color: level.color(),
            partner_rating: assessment.partner_rating(),
        }
    }
}

/// Number of watched companies per risk color. All four keys are always serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSummary {
    pub green: usize,
    pub yellow: usize,
    pub orange: usize,
    pub red: usize,
}

impl ColorSummary {
    pub fn record(&mut self, color: RiskColor) {
        match color {
            RiskColor::Green => self.green += 1,
            RiskColor::Yellow => self.yellow += 1,
            RiskColor::Orange => self.orange += 1,
            RiskColor::Red => self.red += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.green + self.yellow + self.orange + self.red
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchlistRiskSummary {
    pub items: Vec<WatchlistRiskItem>,
    pub summary: ColorSummary,
}

impl WatchlistRiskSummary {
    pub fn from_items(items: Vec<WatchlistRiskItem>) -> Self {
        let mut summary = ColorSummary::default();
        for item in &items {
            summary.record(item.risk_color);
        }
        Self { items, summary }
    }
}

fn display_status(company: &Company) -> String {
    company
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_STATUS)
        .to_string()
}
