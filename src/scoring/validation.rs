use super::config::{
    EngagementWeights, NetworkWeights, PointTier, ScoringConfig, TrustDeductions, Weights,
};
use super::factors::{RangeOp, Tier};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    compile(config).map(|_| ())
}

/// Parse every ladder into its runtime form, filling missing sections with
/// the built-in defaults.
pub fn compile(config: &ScoringConfig) -> Result<Weights, Vec<String>> {
    let mut errors = Vec::new();

    let engagement = config.engagement.clone().unwrap_or_default();
    let network = config.network.clone().unwrap_or_default();
    let trust = config.trust.unwrap_or_default();

    let EngagementWeights {
        time_on_page,
        scroll,
        mouse,
        clicks,
    } = engagement;
    let NetworkWeights { speed, rtt } = network;

    let weights = Weights {
        time_on_page: compile_ladder("scoring.engagement.time_on_page", &time_on_page, &mut errors),
        scroll: compile_ladder("scoring.engagement.scroll", &scroll, &mut errors),
        mouse: compile_ladder("scoring.engagement.mouse", &mouse, &mut errors),
        clicks: compile_ladder("scoring.engagement.clicks", &clicks, &mut errors),
        speed: compile_ladder("scoring.network.speed", &speed, &mut errors),
        rtt: compile_ladder("scoring.network.rtt", &rtt, &mut errors),
        trust,
    };

    check_trust(&trust, &mut errors);

    if errors.is_empty() {
        Ok(weights)
    } else {
        Err(errors)
    }
}

fn compile_ladder(path: &str, tiers: &[PointTier], errors: &mut Vec<String>) -> Vec<Tier> {
    let mut compiled = Vec::with_capacity(tiers.len());
    for (i, tier) in tiers.iter().enumerate() {
        match RangeOp::parse(&tier.range) {
            Ok(op) => compiled.push(Tier {
                op,
                points: tier.points,
            }),
            Err(e) => errors.push(format!(
                "{}[{}].range: invalid '{}' - {}",
                path, i, tier.range, e
            )),
        }
        if tier.points > 100 {
            errors.push(format!(
                "{}[{}].points: {} exceeds 100",
                path, i, tier.points
            ));
        }
    }
    compiled
}

fn check_trust(trust: &TrustDeductions, errors: &mut Vec<String>) {
    let fields = [
        ("proxy", trust.proxy),
        ("hosting", trust.hosting),
        ("no_https", trust.no_https),
        ("insecure_context", trust.insecure_context),
    ];
    for (name, value) in fields {
        if value > 100 {
            errors.push(format!("scoring.trust.{}: {} exceeds 100", name, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engagement_with_scroll(scroll: Vec<PointTier>) -> EngagementWeights {
        EngagementWeights {
            scroll,
            ..EngagementWeights::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = ScoringConfig {
            engagement: None,
            network: None,
            trust: None,
        };
        let weights = compile(&config).unwrap();
        assert_eq!(weights, compile(&ScoringConfig::default()).unwrap());
    }

    #[test]
    fn test_defaults_match_builtin_weights() {
        let weights = compile(&ScoringConfig::default()).unwrap();
        assert_eq!(weights, Weights::default());
    }

    #[test]
    fn test_defaults_compile_to_expected_ladders() {
        let weights = compile(&ScoringConfig::default()).unwrap();
        assert_eq!(weights.time_on_page[0], Tier::at_least(300.0, 40));
        assert_eq!(weights.rtt[2], Tier::at_most(200.0, 10));
        assert_eq!(weights.trust.insecure_context, 15);
    }

    #[test]
    fn test_invalid_range() {
        let config = ScoringConfig {
            engagement: Some(engagement_with_scroll(vec![PointTier {
                range: "most".to_string(),
                points: 30,
            }])),
            network: None,
            trust: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.engagement.scroll[0].range"));
    }

    #[test]
    fn test_points_over_budget() {
        let config = ScoringConfig {
            engagement: None,
            network: Some(NetworkWeights {
                speed: vec![PointTier {
                    range: ">=10".to_string(),
                    points: 101,
                }],
                rtt: vec![],
            }),
            trust: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.network.speed[0].points"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            engagement: Some(engagement_with_scroll(vec![
                PointTier {
                    range: "bad".to_string(), // Error 1
                    points: 10,
                },
                PointTier {
                    range: ">=50".to_string(),
                    points: 500, // Error 2
                },
            ])),
            network: None,
            trust: Some(TrustDeductions {
                proxy: 150, // Error 3
                ..TrustDeductions::default()
            }),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[2].contains("scoring.trust.proxy"));
    }
}
