pub mod models;
pub mod scorer;
#[cfg(test)]
mod tests;

pub use models::*;
pub use scorer::{
    FactorCategory, PartnerRating, RiskAssessment, RiskColor, RiskFactor, RiskLevel, RiskScorer,
};
