use serde::Serialize;

use super::behavior::attention_span;
use super::factors::{bucket, ladder_points, Tier};
use super::labels::{AttentionSpan, BounceRisk, Graded, InteractionPattern, RetentionPotential};
use super::rules::{first_match, Rule};
use crate::visitor::VisitorAttributes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementProfile {
    pub attention_span: AttentionSpan,
    pub interaction_pattern: InteractionPattern,
    pub bounce_risk: BounceRisk,
    pub retention_potential: Graded<RetentionPotential>,
}

pub fn analyze(attrs: &VisitorAttributes) -> EngagementProfile {
    EngagementProfile {
        attention_span: attention_span(attrs),
        interaction_pattern: interaction_pattern(attrs),
        bounce_risk: bounce_risk(attrs),
        retention_potential: retention_potential(attrs),
    }
}

pub const PATTERN_RULES: &[Rule<InteractionPattern>] = &[
    Rule {
        name: "highly-engaged",
        when: |a| a.time_on_page() >= 300.0 && a.scroll_percentage() >= 75.0 && a.clicks() >= 5.0,
        then: InteractionPattern::HighlyEngaged,
    },
    Rule {
        name: "moderately-engaged",
        when: |a| a.time_on_page() >= 120.0 && a.scroll_percentage() >= 50.0 && a.clicks() >= 2.0,
        then: InteractionPattern::ModeratelyEngaged,
    },
    Rule {
        name: "lightly-engaged",
        when: |a| a.time_on_page() >= 60.0 && a.scroll_percentage() >= 25.0 && a.clicks() >= 1.0,
        then: InteractionPattern::LightlyEngaged,
    },
];

pub fn interaction_pattern(attrs: &VisitorAttributes) -> InteractionPattern {
    first_match(PATTERN_RULES, attrs, InteractionPattern::MinimallyEngaged)
}

pub const BOUNCE_RULES: &[Rule<BounceRisk>] = &[
    Rule {
        name: "instant-exit",
        when: |a| a.time_on_page() < 10.0 && a.scroll_percentage() < 5.0,
        then: BounceRisk::VeryHigh,
    },
    Rule {
        name: "early-exit",
        when: |a| a.time_on_page() < 30.0 && a.scroll_percentage() < 10.0,
        then: BounceRisk::High,
    },
    Rule {
        name: "shallow-visit",
        when: |a| a.time_on_page() < 60.0 && a.scroll_percentage() < 25.0,
        then: BounceRisk::Medium,
    },
];

pub fn bounce_risk(attrs: &VisitorAttributes) -> BounceRisk {
    first_match(BOUNCE_RULES, attrs, BounceRisk::Low)
}

const RETENTION_TIME: &[Tier] = &[
    Tier::at_least(300.0, 30),
    Tier::at_least(120.0, 20),
    Tier::at_least(60.0, 10),
];
const RETENTION_SCROLL: &[Tier] = &[
    Tier::at_least(75.0, 25),
    Tier::at_least(50.0, 15),
    Tier::at_least(25.0, 10),
];
const RETENTION_CLICKS: &[Tier] = &[
    Tier::at_least(5.0, 25),
    Tier::at_least(3.0, 15),
    Tier::at_least(1.0, 10),
];
const RETENTION_MOUSE: &[Tier] = &[
    Tier::at_least(100.0, 20),
    Tier::at_least(50.0, 15),
    Tier::at_least(25.0, 10),
];

pub fn retention_potential(attrs: &VisitorAttributes) -> Graded<RetentionPotential> {
    let score = ladder_points(RETENTION_TIME, attrs.time_on_page)
        + ladder_points(RETENTION_SCROLL, attrs.scroll_percentage)
        + ladder_points(RETENTION_CLICKS, attrs.clicks_detected)
        + ladder_points(RETENTION_MOUSE, attrs.mouse_movements);

    let label = bucket(
        score,
        &[
            (80, RetentionPotential::VeryHigh),
            (60, RetentionPotential::High),
            (40, RetentionPotential::Medium),
            (20, RetentionPotential::Low),
        ],
        RetentionPotential::VeryLow,
    );
    Graded { label, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(time: f64, scroll: f64, clicks: f64) -> VisitorAttributes {
        VisitorAttributes {
            time_on_page: Some(time),
            scroll_percentage: Some(scroll),
            clicks_detected: Some(clicks),
            ..Default::default()
        }
    }

    #[test]
    fn test_interaction_pattern() {
        assert_eq!(
            interaction_pattern(&session(300.0, 75.0, 5.0)),
            InteractionPattern::HighlyEngaged
        );
        assert_eq!(
            interaction_pattern(&session(300.0, 75.0, 4.0)),
            InteractionPattern::ModeratelyEngaged
        );
        assert_eq!(
            interaction_pattern(&session(60.0, 25.0, 1.0)),
            InteractionPattern::LightlyEngaged
        );
        assert_eq!(
            interaction_pattern(&VisitorAttributes::default()),
            InteractionPattern::MinimallyEngaged
        );
    }

    #[test]
    fn test_bounce_risk() {
        assert_eq!(bounce_risk(&VisitorAttributes::default()), BounceRisk::VeryHigh);
        assert_eq!(bounce_risk(&session(20.0, 5.0, 0.0)), BounceRisk::High);
        assert_eq!(bounce_risk(&session(45.0, 20.0, 0.0)), BounceRisk::Medium);
        assert_eq!(bounce_risk(&session(45.0, 30.0, 0.0)), BounceRisk::Low);
    }

    #[test]
    fn test_retention_potential() {
        let mut attrs = session(300.0, 75.0, 5.0);
        attrs.mouse_movements = Some(100.0);
        let retention = retention_potential(&attrs);
        assert_eq!(retention.score, 100);
        assert_eq!(retention.label, RetentionPotential::VeryHigh);

        // 10 + 10 + 10 + 0
        let retention = retention_potential(&session(60.0, 25.0, 1.0));
        assert_eq!(retention.score, 30);
        assert_eq!(retention.label, RetentionPotential::Low);
    }
}
