//! Follow-up advice derived from a finished report.
//!
//! Each trigger is checked on its own; every one that fires contributes its
//! text, in table order. The recommendation and action tables share two
//! entries and nothing de-duplicates them.

use crate::scoring::labels::{DeviceType, GeographicContext, LeadQuality, ProfessionalGrade};
use crate::scoring::IntelligenceReport;

pub struct Trigger {
    pub when: fn(&IntelligenceReport) -> bool,
    pub text: &'static str,
}

fn low_engagement(r: &IntelligenceReport) -> bool {
    r.behavior_profile.engagement_level.label.is_low()
}

fn high_bounce_risk(r: &IntelligenceReport) -> bool {
    r.engagement_profile.bounce_risk.is_high()
}

fn tech_hub(r: &IntelligenceReport) -> bool {
    r.location_intelligence.tech_hub
}

const AB_TEST: &str = "A/B test hero section and loading speed";
const TECH_CONTENT: &str = "Target with technology-focused content";

pub const RECOMMENDATIONS: &[Trigger] = &[
    Trigger {
        when: low_engagement,
        text: "Optimize first 10 seconds to capture attention",
    },
    Trigger {
        when: |r| r.device_profile.professional_grade.label == ProfessionalGrade::Professional,
        text: "Target with professional development content",
    },
    Trigger {
        when: |r| {
            r.location_intelligence.geographic_context == GeographicContext::MajorBusinessDistrict
        },
        text: "Focus on B2B messaging and corporate solutions",
    },
    Trigger {
        when: high_bounce_risk,
        text: AB_TEST,
    },
    Trigger {
        when: tech_hub,
        text: TECH_CONTENT,
    },
];

pub const ACTIONS: &[Trigger] = &[
    Trigger {
        when: |r| r.lead_quality.label == LeadQuality::High,
        text: "Prioritize for immediate follow-up",
    },
    Trigger {
        when: high_bounce_risk,
        text: AB_TEST,
    },
    Trigger {
        when: tech_hub,
        text: TECH_CONTENT,
    },
    Trigger {
        when: |r| r.device_profile.device_type == DeviceType::MacBookPro,
        text: "Optimize for professional desktop experience",
    },
    Trigger {
        when: low_engagement,
        text: "Improve content relevance and loading speed",
    },
];

pub fn fired(triggers: &[Trigger], report: &IntelligenceReport) -> Vec<String> {
    triggers
        .iter()
        .filter(|t| (t.when)(report))
        .map(|t| t.text.to_string())
        .collect()
}

pub fn recommendations(report: &IntelligenceReport) -> Vec<String> {
    fired(RECOMMENDATIONS, report)
}

pub fn actions(report: &IntelligenceReport) -> Vec<String> {
    fired(ACTIONS, report)
}

/// Device, location, behavior and professional sentences, in that order.
pub fn insights(report: &IntelligenceReport) -> Vec<String> {
    let device = &report.device_profile;
    let location = &report.location_intelligence;
    let behavior = &report.behavior_profile;
    let professional = &report.professional_context;

    vec![
        format!(
            "Professional {} with {} performance",
            device.device_type, device.performance_tier.label
        ),
        format!(
            "{} in {} market",
            location.geographic_context, location.market_opportunity
        ),
        format!(
            "{} with {} intent",
            behavior.engagement_level.label, behavior.intent_level
        ),
        format!(
            "{} at {}",
            professional.likely_profession, professional.company_size
        ),
    ]
}
