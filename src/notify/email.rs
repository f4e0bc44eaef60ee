use serde::Serialize;

use super::{or_unknown, EmailPayload, TemplateParams};
use crate::report::VisitorReport;
use crate::visitor::VisitorAttributes;

fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Build the owner notification for an analyzed visitor.
pub fn build_payload(attrs: &VisitorAttributes, report: &VisitorReport) -> EmailPayload {
    let summary = &report.summary;
    let intel = &report.intelligence;
    let city = or_unknown(attrs.city.as_deref());
    let country = or_unknown(attrs.country.as_deref());

    let subject = format!(
        "INTELLIGENCE: {} from {}, {}",
        summary.visitor_type, city, country
    );

    let mut params = TemplateParams::new();

    params.set(
        "visitor_status",
        format!("INTELLIGENCE ANALYZED - {}", summary.lead_quality),
    );
    params.set(
        "visitor_name",
        format!("{} (Intelligence Enhanced)", summary.visitor_type),
    );
    params.set(
        "visitor_location",
        format!(
            "{}, {}, {} - {}",
            city,
            attrs.region.as_deref().unwrap_or(""),
            country,
            summary.geographic_context
        ),
    );
    params.set(
        "visitor_device",
        format!("{} ({})", summary.visitor_type, summary.professional_grade),
    );

    params.set("lead_quality", summary.lead_quality.to_string());
    params.set("professional_grade", summary.professional_grade.to_string());
    params.set("engagement_level", summary.engagement_level.to_string());
    params.set("visitor_type", summary.visitor_type.clone());
    params.set("geographic_context", summary.geographic_context.to_string());

    params.set("intelligence_summary", pretty(summary));
    params.set("intelligence_recommendations", report.recommendations.join("\n"));
    params.set("intelligence_actions", report.actions.join("\n"));
    params.set("intelligence_insights", pretty(&report.insights));

    params.set("intelligence_device_profile", pretty(&intel.device_profile));
    params.set(
        "intelligence_location_intelligence",
        pretty(&intel.location_intelligence),
    );
    params.set("intelligence_behavior_profile", pretty(&intel.behavior_profile));
    params.set(
        "intelligence_professional_context",
        pretty(&intel.professional_context),
    );
    params.set("intelligence_risk_profile", pretty(&intel.risk_profile));
    params.set(
        "intelligence_business_intelligence",
        pretty(&intel.business_intelligence),
    );
    params.set("intelligence_technical_profile", pretty(&intel.technical_profile));
    params.set("intelligence_engagement_profile", pretty(&intel.engagement_profile));

    let device = &intel.device_profile;
    params.set("intelligence_device_type", device.device_type.to_string());
    params.set(
        "intelligence_performance_tier",
        device.performance_tier.label.to_string(),
    );
    params.set(
        "intelligence_display_quality",
        device.display_quality.label.to_string(),
    );
    params.set(
        "intelligence_hardware_capabilities",
        pretty(&device.hardware_capabilities),
    );

    let location = &intel.location_intelligence;
    params.set(
        "intelligence_market_opportunity",
        location.market_opportunity.to_string(),
    );
    params.set(
        "intelligence_network_quality",
        location.network_quality.label.to_string(),
    );
    params.set(
        "intelligence_tech_hub",
        if location.tech_hub { "YES" } else { "NO" },
    );

    let behavior = &intel.behavior_profile;
    params.set("intelligence_intent_level", behavior.intent_level.to_string());
    params.set(
        "intelligence_behavior_pattern",
        behavior.behavior_pattern.to_string(),
    );
    params.set(
        "intelligence_interaction_quality",
        behavior.interaction_quality.label.to_string(),
    );

    let professional = &intel.professional_context;
    params.set(
        "intelligence_likely_profession",
        professional.likely_profession.to_string(),
    );
    params.set(
        "intelligence_company_size",
        professional.company_size.to_string(),
    );
    params.set(
        "intelligence_industry_guess",
        professional.industry.to_string(),
    );
    params.set(
        "intelligence_decision_authority",
        professional.decision_making_authority.to_string(),
    );
    params.set(
        "intelligence_technical_sophistication",
        professional.technical_sophistication.label.to_string(),
    );

    let risk = &intel.risk_profile;
    params.set("intelligence_risk_level", risk.risk_level.to_string());
    params.set("intelligence_trust_score", risk.trust_score.to_string());
    params.set(
        "intelligence_threat_indicators",
        risk.threat_indicators.to_string(),
    );
    params.set(
        "intelligence_security_assessment",
        risk.security_assessment.to_string(),
    );

    let business = &intel.business_intelligence;
    params.set(
        "intelligence_revenue_potential",
        business.revenue_potential.label.to_string(),
    );
    params.set(
        "intelligence_conversion_probability",
        business.conversion_probability.label.to_string(),
    );
    params.set(
        "intelligence_competitive_landscape",
        business.competitive_landscape.to_string(),
    );

    let technical = &intel.technical_profile;
    params.set(
        "intelligence_browser_capabilities",
        technical.browser_capabilities.to_string(),
    );
    params.set(
        "intelligence_os_capabilities",
        technical.os_capabilities.to_string(),
    );
    params.set(
        "intelligence_graphics_capabilities",
        technical.graphics_capabilities.to_string(),
    );
    params.set(
        "intelligence_security_profile",
        technical.security_profile.to_string(),
    );

    let engagement = &intel.engagement_profile;
    params.set(
        "intelligence_attention_span",
        engagement.attention_span.to_string(),
    );
    params.set(
        "intelligence_interaction_pattern",
        engagement.interaction_pattern.to_string(),
    );
    params.set("intelligence_bounce_risk", engagement.bounce_risk.to_string());
    params.set(
        "intelligence_retention_potential",
        engagement.retention_potential.label.to_string(),
    );

    EmailPayload { subject, params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::generate_report;
    use crate::visitor::DeviceClass;

    #[test]
    fn test_subject_for_unlocated_visitor() {
        let attrs = VisitorAttributes::default();
        let payload = build_payload(&attrs, &generate_report(&attrs));
        assert_eq!(
            payload.subject,
            "INTELLIGENCE: Standard Device User from Unknown, Unknown"
        );
        assert_eq!(
            payload.params.get("visitor_location"),
            Some("Unknown, , Unknown - Standard Location")
        );
        assert_eq!(payload.params.get("intelligence_tech_hub"), Some("NO"));
        assert_eq!(payload.params.get("intelligence_trust_score"), Some("65"));
    }

    #[test]
    fn test_located_visitor() {
        let attrs = VisitorAttributes {
            device: Some(DeviceClass::Desktop),
            city: Some("Bangalore".to_string()),
            region: Some("Karnataka".to_string()),
            country: Some("India".to_string()),
            https_enabled: Some(true),
            secure_context: Some(true),
            ..Default::default()
        };
        let payload = build_payload(&attrs, &generate_report(&attrs));

        assert_eq!(
            payload.subject,
            "INTELLIGENCE: Standard Device User from Bangalore, India"
        );
        assert_eq!(
            payload.params.get("visitor_location"),
            Some("Bangalore, Karnataka, India - Technology Hub")
        );
        assert_eq!(payload.params.get("intelligence_tech_hub"), Some("YES"));
        assert_eq!(
            payload.params.get("intelligence_threat_indicators"),
            Some("No threats detected")
        );
        assert_eq!(
            payload.params.get("intelligence_recommendations"),
            Some(
                "Optimize first 10 seconds to capture attention\n\
                 A/B test hero section and loading speed\n\
                 Target with technology-focused content"
            )
        );
    }

    #[test]
    fn test_params_start_with_headline_fields() {
        let attrs = VisitorAttributes::default();
        let payload = build_payload(&attrs, &generate_report(&attrs));
        let keys: Vec<_> = payload.params.keys().take(4).collect();
        assert_eq!(
            keys,
            vec!["visitor_status", "visitor_name", "visitor_location", "visitor_device"]
        );
        assert_eq!(
            payload.params.get("visitor_status"),
            Some("INTELLIGENCE ANALYZED - Poor Lead")
        );
        assert_eq!(
            payload.params.get("visitor_device"),
            Some("Standard Device User (Basic)")
        );
    }

    #[test]
    fn test_section_params_carry_full_profiles() {
        let attrs = VisitorAttributes::default();
        let payload = build_payload(&attrs, &generate_report(&attrs));

        let sections = [
            "intelligence_device_profile",
            "intelligence_location_intelligence",
            "intelligence_behavior_profile",
            "intelligence_professional_context",
            "intelligence_risk_profile",
            "intelligence_business_intelligence",
            "intelligence_technical_profile",
            "intelligence_engagement_profile",
        ];
        let keys: Vec<_> = payload
            .params
            .keys()
            .filter(|k| sections.contains(k))
            .collect();
        assert_eq!(keys, sections);

        let risk: serde_json::Value =
            serde_json::from_str(payload.params.get("intelligence_risk_profile").unwrap()).unwrap();
        assert_eq!(risk["trustScore"], 65);
        assert!(payload
            .params
            .get("intelligence_device_profile")
            .unwrap()
            .contains("\n  \"deviceType\""));
    }

    #[test]
    fn test_industry_guess_param() {
        let attrs = VisitorAttributes {
            isp: Some("Reliance Jio Infocomm Limited".to_string()),
            ..Default::default()
        };
        let payload = build_payload(&attrs, &generate_report(&attrs));
        assert_eq!(
            payload.params.get("intelligence_industry_guess"),
            Some("Telecommunications/Technology")
        );
        assert_eq!(payload.params.get("intelligence_industry"), None);
    }
}
