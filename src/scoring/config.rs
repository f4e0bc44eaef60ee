use serde::{Deserialize, Serialize};

use super::factors::Tier;

/// Tunable scoring weights.
///
/// Only the heuristics that have no stated justification beyond "business
/// judgement" are exposed here. Every section is optional; a missing section
/// keeps the built-in values.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   engagement:
///     time_on_page:
///       - { range: ">=300", points: 40 }
///       - { range: ">=120", points: 30 }
///   network:
///     rtt:
///       - { range: "<=50", points: 20 }
///   trust:
///     proxy: 30
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Point ladders behind the engagement level (40/30/20/10 budget)
    #[serde(default)]
    pub engagement: Option<EngagementWeights>,

    /// Speed and latency ladders behind the network quality
    #[serde(default)]
    pub network: Option<NetworkWeights>,

    /// Deductions from the 100-point trust score
    #[serde(default)]
    pub trust: Option<TrustDeductions>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            engagement: Some(EngagementWeights::default()),
            network: Some(NetworkWeights::default()),
            trust: Some(TrustDeductions::default()),
        }
    }
}

/// A ladder rung as written in the config file.
///
/// Range format: "<N", "<=N", ">N", ">=N", "N", "N-M" (inclusive range)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PointTier {
    pub range: String,
    pub points: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngagementWeights {
    /// Seconds on page (max 40 points)
    #[serde(default = "default_time_on_page")]
    pub time_on_page: Vec<PointTier>,

    /// Scroll depth percentage (max 30 points)
    #[serde(default = "default_scroll")]
    pub scroll: Vec<PointTier>,

    /// Mouse movement count (max 20 points)
    #[serde(default = "default_mouse")]
    pub mouse: Vec<PointTier>,

    /// Click count (max 10 points)
    #[serde(default = "default_clicks")]
    pub clicks: Vec<PointTier>,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            time_on_page: default_time_on_page(),
            scroll: default_scroll(),
            mouse: default_mouse(),
            clicks: default_clicks(),
        }
    }
}

// Built-in ladders. The YAML defaults are rendered from these so the file
// written by `init` and `Weights::default()` can never drift apart.

const TIME_ON_PAGE: &[Tier] = &[
    Tier::at_least(300.0, 40), // 5+ minutes
    Tier::at_least(120.0, 30), // 2+ minutes
    Tier::at_least(60.0, 20),  // 1+ minute
    Tier::at_least(30.0, 10),  // 30+ seconds
];

const SCROLL: &[Tier] = &[
    Tier::at_least(75.0, 30),
    Tier::at_least(50.0, 20),
    Tier::at_least(25.0, 10),
];

const MOUSE: &[Tier] = &[
    Tier::at_least(100.0, 20),
    Tier::at_least(50.0, 15),
    Tier::at_least(25.0, 10),
    Tier::at_least(10.0, 5),
];

const CLICKS: &[Tier] = &[
    Tier::at_least(5.0, 10),
    Tier::at_least(3.0, 7),
    Tier::at_least(1.0, 5),
];

const SPEED: &[Tier] = &[
    Tier::at_least(10.0, 30),
    Tier::at_least(5.0, 20),
    Tier::at_least(2.0, 15),
];

const RTT: &[Tier] = &[
    Tier::at_most(50.0, 20),
    Tier::at_most(100.0, 15),
    Tier::at_most(200.0, 10),
];

fn rendered(tiers: &[Tier]) -> Vec<PointTier> {
    tiers
        .iter()
        .map(|tier| PointTier {
            range: tier.op.to_string(),
            points: tier.points,
        })
        .collect()
}

fn default_time_on_page() -> Vec<PointTier> {
    rendered(TIME_ON_PAGE)
}

fn default_scroll() -> Vec<PointTier> {
    rendered(SCROLL)
}

fn default_mouse() -> Vec<PointTier> {
    rendered(MOUSE)
}

fn default_clicks() -> Vec<PointTier> {
    rendered(CLICKS)
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NetworkWeights {
    /// Downlink speed in Mbps
    #[serde(default = "default_speed")]
    pub speed: Vec<PointTier>,

    /// Round-trip time in ms
    #[serde(default = "default_rtt")]
    pub rtt: Vec<PointTier>,
}

impl Default for NetworkWeights {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            rtt: default_rtt(),
        }
    }
}

fn default_speed() -> Vec<PointTier> {
    rendered(SPEED)
}

fn default_rtt() -> Vec<PointTier> {
    rendered(RTT)
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TrustDeductions {
    #[serde(default = "default_proxy_deduction")]
    pub proxy: u32,
    #[serde(default = "default_hosting_deduction")]
    pub hosting: u32,
    #[serde(default = "default_no_https_deduction")]
    pub no_https: u32,
    #[serde(default = "default_insecure_context_deduction")]
    pub insecure_context: u32,
}

impl Default for TrustDeductions {
    fn default() -> Self {
        Self {
            proxy: default_proxy_deduction(),
            hosting: default_hosting_deduction(),
            no_https: default_no_https_deduction(),
            insecure_context: default_insecure_context_deduction(),
        }
    }
}

fn default_proxy_deduction() -> u32 {
    30
}

fn default_hosting_deduction() -> u32 {
    20
}

fn default_no_https_deduction() -> u32 {
    20
}

fn default_insecure_context_deduction() -> u32 {
    15
}

/// Ladders after range parsing. Built once per engine by `validation::compile`.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    pub time_on_page: Vec<Tier>,
    pub scroll: Vec<Tier>,
    pub mouse: Vec<Tier>,
    pub clicks: Vec<Tier>,
    pub speed: Vec<Tier>,
    pub rtt: Vec<Tier>,
    pub trust: TrustDeductions,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            time_on_page: TIME_ON_PAGE.to_vec(),
            scroll: SCROLL.to_vec(),
            mouse: MOUSE.to_vec(),
            clicks: CLICKS.to_vec(),
            speed: SPEED.to_vec(),
            rtt: RTT.to_vec(),
            trust: TrustDeductions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(range: &str, points: u32) -> PointTier {
        PointTier {
            range: range.to_string(),
            points,
        }
    }

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();
        let engagement = config.engagement.unwrap();
        assert_eq!(engagement.time_on_page[0], tier(">=300", 40));
        assert_eq!(engagement.clicks.len(), 3);
        assert_eq!(config.trust.unwrap().proxy, 30);
        assert_eq!(config.network.unwrap().rtt[0].range, "<=50");
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
engagement:
  scroll:
    - range: ">=90"
      points: 30
    - range: ">=75"
      points: 25
trust:
  proxy: 50
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let engagement = config.engagement.unwrap();
        assert_eq!(engagement.scroll.len(), 2);
        assert_eq!(engagement.scroll[1].points, 25);
        // Unspecified ladders keep their defaults
        assert_eq!(engagement.time_on_page, default_time_on_page());

        let trust = config.trust.unwrap();
        assert_eq!(trust.proxy, 50);
        assert_eq!(trust.hosting, 20);
        assert!(config.network.is_none());
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.engagement.is_none());
        assert!(config.network.is_none());
        assert!(config.trust.is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = r#"
trust:
  vpn: 10
"#;
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }
}
