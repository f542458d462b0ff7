use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format the registry stores founding dates in
pub const FOUNDING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Company record as loaded from the registry store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub registry_number: Option<String>,
    /// Free-text lifecycle status ("aktív", "megszűnt", "felszámolás alatt", ...)
    #[serde(default)]
    pub status: Option<String>,
    /// TEÁOR industry classification code
    #[serde(default)]
    pub industry_code: Option<String>,
    #[serde(default)]
    pub industry_label: Option<String>,
    /// Founding date as supplied by the store, normally `YYYY-MM-DD`
    #[serde(default)]
    pub founded_on: Option<String>,

    // Negative events, independently settable
    #[serde(default)]
    pub liquidation: Option<bool>,
    #[serde(default)]
    pub bankruptcy: Option<bool>,
    #[serde(default)]
    pub winding_up: Option<bool>,
    #[serde(default)]
    pub forced_deregistration: Option<bool>,

    // NAV tax authority
    #[serde(default)]
    pub nav_deregistered: Option<bool>,
    /// Free-text NAV risk rating ("AVG", "B", "magas", "medium", ...)
    #[serde(default)]
    pub nav_risk_rating: Option<String>,
}

impl Company {
    /// Parsed founding date. Missing or unparseable text yields `None`.
    pub fn founding_date(&self) -> Option<NaiveDate> {
        let raw = self.founded_on.as_deref()?.trim();
        match NaiveDate::parse_from_str(raw, FOUNDING_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                tracing::warn!(company_id = self.id, founded_on = raw, "Unparseable founding date");
                None
            }
        }
    }

    /// Industry code, treating blank strings as missing
    pub fn industry(&self) -> Option<&str> {
        self.industry_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Annual financial report. Amounts are in thousand HUF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub company_id: i64,
    pub year: i32,

    // Income statement
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub operating_result: Option<f64>,
    #[serde(default)]
    pub pre_tax_result: Option<f64>,
    #[serde(default)]
    pub net_result: Option<f64>,

    // Balance sheet: assets
    #[serde(default)]
    pub total_assets: Option<f64>,
    #[serde(default)]
    pub fixed_assets: Option<f64>,
    #[serde(default)]
    pub current_assets: Option<f64>,
    #[serde(default)]
    pub cash: Option<f64>,

    // Balance sheet: equity and liabilities
    #[serde(default)]
    pub equity: Option<f64>,
    #[serde(default)]
    pub provisions: Option<f64>,
    #[serde(default)]
    pub liabilities: Option<f64>,
    #[serde(default)]
    pub short_term_liabilities: Option<f64>,
    #[serde(default)]
    pub long_term_liabilities: Option<f64>,

    // Ratios
    #[serde(default)]
    pub debt_ratio: Option<f64>,
    #[serde(default)]
    pub leverage: Option<f64>,
    #[serde(default)]
    pub profit_margin: Option<f64>,
    #[serde(default)]
    pub liquidity_ratio: Option<f64>,
    #[serde(default)]
    pub ebitda: Option<f64>,
    #[serde(default)]
    pub roe: Option<f64>,
}

/// The report with the highest fiscal year, if any
pub fn latest_report(reports: &[FinancialReport]) -> Option<&FinancialReport> {
    reports.iter().max_by_key(|r| r.year)
}
