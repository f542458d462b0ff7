//! Risk Scoring Module
//!
//! Point-deduction risk model for a single company. Every company starts at
//! 100 points; negative events, status, NAV flags, latest-year financial
//! ratios and company age deduct from that. The result is clamped to 0..=100.

use chrono::NaiveDate;
use registry_core::{Company, FinancialReport};
use serde::{Deserialize, Serialize};

const START_SCORE: i32 = 100;

const NEGATIVE_EVENT_PENALTY: i32 = 25;
const CEASED_STATUS_PENALTY: i32 = 30;
const NAV_DEREGISTERED_PENALTY: i32 = 20;
const NAV_HIGH_RISK_PENALTY: i32 = 15;
const NAV_MEDIUM_RISK_PENALTY: i32 = 5;
const HIGH_DEBT_PENALTY: i32 = 10;
const NEGATIVE_EQUITY_PENALTY: i32 = 15;
const LOW_LIQUIDITY_PENALTY: i32 = 10;
const NEGATIVE_NET_RESULT_PENALTY: i32 = 5;
const YOUNG_COMPANY_PENALTY: i32 = 5;

const HIGH_DEBT_RATIO: f64 = 0.7;
const LOW_LIQUIDITY_RATIO: f64 = 0.5;
/// Companies younger than this many days count as young (~2 years)
const YOUNG_COMPANY_DAYS: i64 = 730;

/// Kind of a risk factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    NegativeEvent,
    Status,
    Nav,
    Financial,
    Age,
}

/// One itemized deduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: FactorCategory,
    pub description: String,
    pub points_deducted: u32,
}

/// Score plus the deductions that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub factors: Vec<RiskFactor>,
    pub negative_events: Vec<String>,
}

impl RiskAssessment {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score)
    }

    pub fn partner_rating(&self) -> PartnerRating {
        PartnerRating::from_score(self.score)
    }
}

/// Four-band risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "alacsony")]
    Low,
    #[serde(rename = "közepes")]
    Medium,
    #[serde(rename = "magas")]
    High,
    #[serde(rename = "kritikus")]
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => RiskLevel::Low,
            s if s >= 60 => RiskLevel::Medium,
            s if s >= 40 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "alacsony",
            RiskLevel::Medium => "közepes",
            RiskLevel::High => "magas",
            RiskLevel::Critical => "kritikus",
        }
    }

    pub fn color(&self) -> RiskColor {
        match self {
            RiskLevel::Low => RiskColor::Green,
            RiskLevel::Medium => RiskColor::Yellow,
            RiskLevel::High => RiskColor::Orange,
            RiskLevel::Critical => RiskColor::Red,
        }
    }
}

/// Traffic-light color shown next to the risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Orange,
    Red,
}

/// Three-tier partner recommendation. Uses its own thresholds, not the
/// risk level bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerRating {
    #[serde(rename = "ajánlott")]
    Recommended,
    #[serde(rename = "óvatosság")]
    Caution,
    #[serde(rename = "magas kockázat")]
    HighRisk,
}

impl PartnerRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 70 => PartnerRating::Recommended,
            s if s >= 45 => PartnerRating::Caution,
            _ => PartnerRating::HighRisk,
        }
    }
}

/// Scores companies against a fixed evaluation date.
///
/// The date only matters for the young-company rule; pass the current local
/// date in production and a fixed one in tests.
#[derive(Debug, Clone, Copy)]
pub struct RiskScorer {
    evaluation_date: NaiveDate,
}

impl RiskScorer {
    pub fn new(evaluation_date: NaiveDate) -> Self {
        Self { evaluation_date }
    }

    /// Compute the risk score of `company` from its own fields and its latest report.
    pub fn assess(&self, company: &Company, latest_report: Option<&FinancialReport>) -> RiskAssessment {
        let mut score = START_SCORE;
        let mut factors: Vec<RiskFactor> = Vec::new();
        let mut negative_events: Vec<String> = Vec::new();

        let mut deduct = |category: FactorCategory, description: String, points: i32| {
            score -= points;
            factors.push(RiskFactor {
                category,
                description,
                points_deducted: points as u32,
            });
        };

        let events = [
            (company.liquidation, "Felszámolás alatt"),
            (company.bankruptcy, "Csődeljárás alatt"),
            (company.winding_up, "Végelszámolás alatt"),
            (company.forced_deregistration, "Kényszertörlés alatt"),
        ];
        for (flag, label) in events {
            if flag.unwrap_or(false) {
                negative_events.push(label.to_string());
                deduct(FactorCategory::NegativeEvent, label.to_string(), NEGATIVE_EVENT_PENALTY);
            }
        }

        if company.status.as_deref().map_or(false, is_ceased_status) {
            deduct(FactorCategory::Status, "Megszűnt státusz".to_string(), CEASED_STATUS_PENALTY);
        }

        if company.nav_deregistered.unwrap_or(false) {
            deduct(
                FactorCategory::Nav,
                "NAV által törölt adószám".to_string(),
                NAV_DEREGISTERED_PENALTY,
            );
        }

        match company.nav_risk_rating.as_deref().map(NavRiskTier::from_rating) {
            Some(NavRiskTier::High) => deduct(
                FactorCategory::Nav,
                "NAV magas kockázatú besorolás".to_string(),
                NAV_HIGH_RISK_PENALTY,
            ),
            Some(NavRiskTier::Medium) => deduct(
                FactorCategory::Nav,
                "NAV közepes kockázatú besorolás".to_string(),
                NAV_MEDIUM_RISK_PENALTY,
            ),
            _ => {}
        }

        if let Some(report) = latest_report {
            if let Some(debt_ratio) = report.debt_ratio.filter(|d| *d > HIGH_DEBT_RATIO) {
                deduct(
                    FactorCategory::Financial,
                    format!("Magas eladósodottság ({:.2})", debt_ratio),
                    HIGH_DEBT_PENALTY,
                );
            }

            if report.equity.map_or(false, |e| e < 0.0) {
                deduct(
                    FactorCategory::Financial,
                    "Negatív saját tőke".to_string(),
                    NEGATIVE_EQUITY_PENALTY,
                );
            }

            if let Some(liquidity) = report.liquidity_ratio.filter(|l| *l < LOW_LIQUIDITY_RATIO) {
                deduct(
                    FactorCategory::Financial,
                    format!("Alacsony likviditás ({:.2})", liquidity),
                    LOW_LIQUIDITY_PENALTY,
                );
            }

            if report.net_result.map_or(false, |n| n < 0.0) {
                deduct(
                    FactorCategory::Financial,
                    "Negatív adózott eredmény".to_string(),
                    NEGATIVE_NET_RESULT_PENALTY,
                );
            }
        }

        if let Some(founded) = company.founding_date() {
            let age_days = (self.evaluation_date - founded).num_days();
            if age_days < YOUNG_COMPANY_DAYS {
                deduct(
                    FactorCategory::Age,
                    "Fiatal cég (kevesebb mint 2 éves)".to_string(),
                    YOUNG_COMPANY_PENALTY,
                );
            }
        }

        let score = score.clamp(0, 100) as u8;
        tracing::debug!(
            company_id = company.id,
            score,
            factor_count = factors.len(),
            "Risk score computed"
        );

        RiskAssessment {
            score,
            factors,
            negative_events,
        }
    }
}

/// NAV risk rating bucket derived from free text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavRiskTier {
    High,
    Medium,
    Neutral,
}

impl NavRiskTier {
    fn from_rating(rating: &str) -> Self {
        let r = rating.to_lowercase();
        if r.contains("magas") || r.contains("high") {
            NavRiskTier::High
        } else if r.contains("közepes") || r.contains("medium") {
            NavRiskTier::Medium
        } else {
            NavRiskTier::Neutral
        }
    }
}

fn is_ceased_status(status: &str) -> bool {
    status.to_lowercase().contains("megszűnt")
}
