use serde::Serialize;

use super::config::Weights;
use super::factors::{bucket, ladder_points, Tier};
use super::labels::{
    AttentionSpan, BehaviorPattern, EngagementLevel, Graded, IntentLevel, InteractionQuality,
};
use super::rules::{first_match, Rule};
use crate::visitor::VisitorAttributes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorProfile {
    pub engagement_level: Graded<EngagementLevel>,
    pub intent_level: IntentLevel,
    pub behavior_pattern: BehaviorPattern,
    pub attention_span: AttentionSpan,
    pub interaction_quality: Graded<InteractionQuality>,
}

pub fn analyze(attrs: &VisitorAttributes, weights: &Weights) -> BehaviorProfile {
    BehaviorProfile {
        engagement_level: engagement_level(attrs, weights),
        intent_level: intent_level(attrs),
        behavior_pattern: behavior_pattern(attrs),
        attention_span: attention_span(attrs),
        interaction_quality: interaction_quality(attrs),
    }
}

/// Sum of the time, scroll, mouse and click ladders (40/30/20/10 by default).
pub fn engagement_level(attrs: &VisitorAttributes, weights: &Weights) -> Graded<EngagementLevel> {
    let score = ladder_points(&weights.time_on_page, attrs.time_on_page)
        + ladder_points(&weights.scroll, attrs.scroll_percentage)
        + ladder_points(&weights.mouse, attrs.mouse_movements)
        + ladder_points(&weights.clicks, attrs.clicks_detected);

    let label = bucket(
        score,
        &[
            (80, EngagementLevel::VeryHigh),
            (60, EngagementLevel::High),
            (40, EngagementLevel::Medium),
            (20, EngagementLevel::Low),
        ],
        EngagementLevel::VeryLow,
    );
    Graded { label, score }
}

pub const INTENT_RULES: &[Rule<IntentLevel>] = &[
    Rule {
        name: "high-intent",
        when: |a| a.time_on_page() >= 120.0 && a.scroll_percentage() >= 50.0 && a.clicks() >= 2.0,
        then: IntentLevel::High,
    },
    Rule {
        name: "medium-intent",
        when: |a| a.time_on_page() >= 60.0 && a.scroll_percentage() >= 25.0,
        then: IntentLevel::Medium,
    },
    Rule {
        name: "low-intent",
        when: |a| a.time_on_page() < 30.0 && a.scroll_percentage() < 10.0,
        then: IntentLevel::Low,
    },
];

pub fn intent_level(attrs: &VisitorAttributes) -> IntentLevel {
    first_match(INTENT_RULES, attrs, IntentLevel::Unknown)
}

pub const PATTERN_RULES: &[Rule<BehaviorPattern>] = &[
    Rule {
        name: "deep-researcher",
        when: |a| {
            a.time_on_page() >= 300.0 && a.scroll_percentage() >= 75.0 && a.sections_visited() >= 4.0
        },
        then: BehaviorPattern::DeepResearcher,
    },
    Rule {
        name: "casual-browser",
        when: |a| {
            a.time_on_page() >= 60.0 && a.scroll_percentage() >= 25.0 && a.sections_visited() >= 2.0
        },
        then: BehaviorPattern::CasualBrowser,
    },
    Rule {
        name: "quick-scanner",
        when: |a| {
            a.time_on_page() >= 30.0 && a.scroll_percentage() >= 10.0 && a.sections_visited() >= 1.0
        },
        then: BehaviorPattern::QuickScanner,
    },
    Rule {
        name: "bounce",
        when: |a| a.time_on_page() < 30.0 && a.scroll_percentage() < 10.0,
        then: BehaviorPattern::Bounce,
    },
];

pub fn behavior_pattern(attrs: &VisitorAttributes) -> BehaviorPattern {
    first_match(PATTERN_RULES, attrs, BehaviorPattern::Unknown)
}

pub const ATTENTION_RULES: &[Rule<AttentionSpan>] = &[
    Rule {
        name: "very-short",
        when: |a| a.time_on_page() < 10.0,
        then: AttentionSpan::VeryShort,
    },
    Rule {
        name: "short",
        when: |a| a.time_on_page() < 30.0,
        then: AttentionSpan::Short,
    },
    Rule {
        name: "medium",
        when: |a| a.time_on_page() < 120.0,
        then: AttentionSpan::Medium,
    },
    Rule {
        name: "long",
        when: |a| a.time_on_page() < 300.0,
        then: AttentionSpan::Long,
    },
];

pub fn attention_span(attrs: &VisitorAttributes) -> AttentionSpan {
    first_match(ATTENTION_RULES, attrs, AttentionSpan::VeryLong)
}

const QUALITY_TIME: &[Tier] = &[
    Tier::at_least(300.0, 30),
    Tier::at_least(120.0, 20),
    Tier::at_least(60.0, 15),
    Tier::at_least(30.0, 10),
];
const QUALITY_SCROLL: &[Tier] = &[
    Tier::at_least(75.0, 25),
    Tier::at_least(50.0, 20),
    Tier::at_least(25.0, 15),
    Tier::at_least(10.0, 10),
];
const QUALITY_MOUSE: &[Tier] = &[
    Tier::at_least(100.0, 25),
    Tier::at_least(50.0, 20),
    Tier::at_least(25.0, 15),
    Tier::at_least(10.0, 10),
];
const QUALITY_CLICKS: &[Tier] = &[
    Tier::at_least(5.0, 20),
    Tier::at_least(3.0, 15),
    Tier::at_least(1.0, 10),
];

pub fn interaction_quality(attrs: &VisitorAttributes) -> Graded<InteractionQuality> {
    let score = ladder_points(QUALITY_TIME, attrs.time_on_page)
        + ladder_points(QUALITY_SCROLL, attrs.scroll_percentage)
        + ladder_points(QUALITY_MOUSE, attrs.mouse_movements)
        + ladder_points(QUALITY_CLICKS, attrs.clicks_detected);

    let label = bucket(
        score,
        &[
            (80, InteractionQuality::Excellent),
            (60, InteractionQuality::Good),
            (40, InteractionQuality::Average),
            (20, InteractionQuality::Poor),
        ],
        InteractionQuality::VeryPoor,
    );
    Graded { label, score }
}
