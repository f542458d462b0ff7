#[cfg(test)]
mod risk_scorer_tests {
    use chrono::NaiveDate;
    use registry_core::{Company, FinancialReport};

    use crate::models::{ColorSummary, RiskAnalysisResult, WatchlistRiskItem, WatchlistRiskSummary};
    use crate::scorer::*;

    fn evaluation_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn scorer() -> RiskScorer {
        RiskScorer::new(evaluation_date())
    }

    /// Helper: an established, active company with no red flags.
    fn clean_company() -> Company {
        Company {
            id: 1,
            name: "Példa Kft.".to_string(),
            status: Some("aktív".to_string()),
            industry_code: Some("6201".to_string()),
            founded_on: Some("2010-05-20".to_string()),
            liquidation: Some(false),
            bankruptcy: None,
            winding_up: Some(false),
            forced_deregistration: None,
            nav_deregistered: Some(false),
            nav_risk_rating: Some("AVG".to_string()),
            ..Default::default()
        }
    }

    /// Helper: a report that triggers no financial deduction.
    fn healthy_report() -> FinancialReport {
        FinancialReport {
            company_id: 1,
            year: 2023,
            revenue: Some(500_000.0),
            net_result: Some(42_000.0),
            equity: Some(120_000.0),
            debt_ratio: Some(0.7),
            liquidity_ratio: Some(0.5),
            ..Default::default()
        }
    }

    /// Helper: a report that triggers all four financial deductions.
    fn distressed_report() -> FinancialReport {
        FinancialReport {
            company_id: 1,
            year: 2023,
            net_result: Some(-1_500.0),
            equity: Some(-20_000.0),
            debt_ratio: Some(0.8567),
            liquidity_ratio: Some(0.3333),
            ..Default::default()
        }
    }

    fn points_for(assessment: &RiskAssessment, category: FactorCategory) -> u32 {
        assessment
            .factors
            .iter()
            .filter(|f| f.category == category)
            .map(|f| f.points_deducted)
            .sum()
    }

    #[test]
    fn test_clean_company_without_report() {
        let result = scorer().assess(&clean_company(), None);
        assert_eq!(result.score, 100);
        assert!(result.factors.is_empty());
        assert!(result.negative_events.is_empty());
        assert_eq!(result.risk_level(), RiskLevel::Low);
        assert_eq!(result.risk_level().color(), RiskColor::Green);
        assert_eq!(result.partner_rating(), PartnerRating::Recommended);
    }

    #[test]
    fn test_clean_company_with_boundary_report() {
        // debt ratio exactly 0.7 and liquidity exactly 0.5 are not penalized
        let report = healthy_report();
        let result = scorer().assess(&clean_company(), Some(&report));
        assert_eq!(result.score, 100);
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_negative_events_stack() {
        let company = Company {
            liquidation: Some(true),
            bankruptcy: Some(true),
            ..clean_company()
        };
        let result = scorer().assess(&company, None);
        assert_eq!(result.score, 50);
        assert_eq!(
            result.negative_events,
            vec!["Felszámolás alatt".to_string(), "Csődeljárás alatt".to_string()]
        );
        assert_eq!(points_for(&result, FactorCategory::NegativeEvent), 50);
        assert_eq!(result.factors[0].description, "Felszámolás alatt");
        assert_eq!(result.factors[1].description, "Csődeljárás alatt");
    }

    #[test]
    fn test_winding_up_and_forced_deregistration_labels() {
        let company = Company {
            winding_up: Some(true),
            forced_deregistration: Some(true),
            ..clean_company()
        };
        let result = scorer().assess(&company, None);
        assert_eq!(
            result.negative_events,
            vec!["Végelszámolás alatt".to_string(), "Kényszertörlés alatt".to_string()]
        );
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_ceased_status() {
        let company = Company {
            status: Some("Megszűnt".to_string()),
            ..clean_company()
        };
        let result = scorer().assess(&company, None);
        assert_eq!(result.score, 70);
        assert_eq!(result.factors.len(), 1);
        assert_eq!(result.factors[0].category, FactorCategory::Status);
        assert_eq!(result.factors[0].description, "Megszűnt státusz");
        assert_eq!(result.factors[0].points_deducted, 30);
    }

    #[test]
    fn test_nav_deregistration() {
        let company = Company {
            nav_deregistered: Some(true),
            ..clean_company()
        };
        let result = scorer().assess(&company, None);
        assert_eq!(result.score, 80);
        assert_eq!(result.factors[0].category, FactorCategory::Nav);
        assert_eq!(result.factors[0].description, "NAV által törölt adószám");
    }

    #[test]
    fn test_nav_risk_rating_tiers() {
        let high = Company {
            nav_risk_rating: Some("Magas".to_string()),
            ..clean_company()
        };
        let result = scorer().assess(&high, None);
        assert_eq!(result.score, 85);
        assert_eq!(result.factors[0].description, "NAV magas kockázatú besorolás");

        let medium = Company {
            nav_risk_rating: Some("Medium".to_string()),
            ..clean_company()
        };
        let result = scorer().assess(&medium, None);
        assert_eq!(result.score, 95);
        assert_eq!(result.factors[0].description, "NAV közepes kockázatú besorolás");

        for neutral in ["AVG", "B", "C"] {
            let company = Company {
                nav_risk_rating: Some(neutral.to_string()),
                ..clean_company()
            };
            assert_eq!(scorer().assess(&company, None).score, 100, "rating {neutral}");
        }
    }

    #[test]
    fn test_financial_deductions_in_order() {
        let report = distressed_report();
        let result = scorer().assess(&clean_company(), Some(&report));
        assert_eq!(result.score, 60);

        let descriptions: Vec<&str> = result.factors.iter().map(|f| f.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Magas eladósodottság (0.86)",
                "Negatív saját tőke",
                "Alacsony likviditás (0.33)",
                "Negatív adózott eredmény",
            ]
        );
        assert!(result.factors.iter().all(|f| f.category == FactorCategory::Financial));
    }

    #[test]
    fn test_missing_report_fields_are_not_zero() {
        // An all-null report must behave exactly like no report
        let report = FinancialReport {
            company_id: 1,
            year: 2023,
            ..Default::default()
        };
        let with_empty = scorer().assess(&clean_company(), Some(&report));
        let without = scorer().assess(&clean_company(), None);
        assert_eq!(with_empty, without);
        assert_eq!(with_empty.score, 100);
    }

    #[test]
    fn test_young_company_boundary() {
        // 729 days before the evaluation date: young
        let young = Company {
            founded_on: Some("2022-06-03".to_string()),
            ..clean_company()
        };
        let result = scorer().assess(&young, None);
        assert_eq!(result.score, 95);
        assert_eq!(result.factors[0].category, FactorCategory::Age);
        assert_eq!(result.factors[0].description, "Fiatal cég (kevesebb mint 2 éves)");

        // exactly 730 days: not young
        let two_years = Company {
            founded_on: Some("2022-06-02".to_string()),
            ..clean_company()
        };
        assert_eq!(scorer().assess(&two_years, None).score, 100);
    }

    #[test]
    fn test_unparseable_founding_date_is_skipped() {
        let company = Company {
            founded_on: Some("tavaly".to_string()),
            ..clean_company()
        };
        let result = scorer().assess(&company, None);
        assert_eq!(result.score, 100);
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let company = Company {
            status: Some("megszűnt".to_string()),
            founded_on: Some("2024-01-01".to_string()),
            liquidation: Some(true),
            bankruptcy: Some(true),
            winding_up: Some(true),
            forced_deregistration: Some(true),
            nav_deregistered: Some(true),
            nav_risk_rating: Some("high".to_string()),
            ..clean_company()
        };
        let report = distressed_report();
        let result = scorer().assess(&company, Some(&report));

        let total: u32 = result.factors.iter().map(|f| f.points_deducted).sum();
        assert_eq!(total, 205);
        assert_eq!(result.factors.len(), 12);
        assert_eq!(result.score, 0);
        assert_eq!(result.risk_level(), RiskLevel::Critical);
        assert_eq!(result.partner_rating(), PartnerRating::HighRisk);
    }

    #[test]
    fn test_assessment_is_idempotent() {
        let company = Company {
            bankruptcy: Some(true),
            nav_risk_rating: Some("közepes".to_string()),
            ..clean_company()
        };
        let report = distressed_report();
        let first = scorer().assess(&company, Some(&report));
        let second = scorer().assess(&company, Some(&report));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_analysis_result_snapshot() {
        let company = Company {
            status: None,
            ..clean_company()
        };
        let report = distressed_report();
        let assessment = scorer().assess(&company, Some(&report));
        let result = RiskAnalysisResult::new(&company, Some(&report), assessment);

        assert_eq!(result.status, "ismeretlen");
        assert_eq!(result.risk_score, 60);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.risk_color, RiskColor::Yellow);
        assert_eq!(result.partner_rating, PartnerRating::Caution);
        assert_eq!(result.debt_ratio, Some(0.8567));
        assert_eq!(result.equity, Some(-20_000.0));
        assert_eq!(result.liquidity_ratio, Some(0.3333));
        assert_eq!(result.net_result, Some(-1_500.0));
        assert_eq!(result.industry_code.as_deref(), Some("6201"));
        assert_eq!(result.founded_on.as_deref(), Some("2010-05-20"));
    }

    #[test]
    fn test_watchlist_summary_has_all_colors() {
        let empty = WatchlistRiskSummary::from_items(Vec::new());
        let json = serde_json::to_value(&empty).unwrap();
        for key in ["green", "yellow", "orange", "red"] {
            assert_eq!(json["summary"][key], 0, "missing key {key}");
        }

        let clean = clean_company();
        let failing = Company {
            id: 2,
            liquidation: Some(true),
            bankruptcy: Some(true),
            winding_up: Some(true),
            ..clean_company()
        };
        let items = vec![
            WatchlistRiskItem::new(&clean, &scorer().assess(&clean, None)),
            WatchlistRiskItem::new(&failing, &scorer().assess(&failing, None)),
        ];
        let summary = WatchlistRiskSummary::from_items(items);
        assert_eq!(
            summary.summary,
            ColorSummary {
                green: 1,
                yellow: 0,
                orange: 0,
                red: 1,
            }
        );
        assert_eq!(summary.summary.total(), 2);
        assert_eq!(summary.items[1].risk_score, 25);
    }
}
