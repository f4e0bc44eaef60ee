use serde::{Serialize, Serializer};

use super::config::TrustDeductions;
use super::labels::{RiskLevel, SecurityAssessment, ThreatIndicator};
use super::rules::{first_match, Rule};
use crate::visitor::VisitorAttributes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub risk_level: RiskLevel,
    pub threat_indicators: ThreatIndicators,
    pub trust_score: u32,
    pub security_assessment: SecurityAssessment,
}

pub fn analyze(attrs: &VisitorAttributes, trust: &TrustDeductions) -> RiskProfile {
    RiskProfile {
        risk_level: risk_level(attrs),
        threat_indicators: threat_indicators(attrs),
        trust_score: trust_score(attrs, trust),
        security_assessment: security_assessment(attrs),
    }
}

pub const RISK_RULES: &[Rule<RiskLevel>] = &[
    Rule {
        name: "masked-origin",
        when: |a| a.behind_proxy() || a.on_hosting(),
        then: RiskLevel::Medium,
    },
    Rule {
        name: "mobile-network",
        when: |a| a.on_mobile_network(),
        then: RiskLevel::Low,
    },
];

pub fn risk_level(attrs: &VisitorAttributes) -> RiskLevel {
    first_match(RISK_RULES, attrs, RiskLevel::VeryLow)
}

/// Detected threats in a fixed order. Serializes as a comma separated
/// sentence, or "No threats detected" when clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreatIndicators(pub Vec<ThreatIndicator>);

impl ThreatIndicators {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ThreatIndicators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("No threats detected");
        }
        let joined: Vec<&str> = self.0.iter().map(|t| t.label()).collect();
        f.write_str(&joined.join(", "))
    }
}

impl Serialize for ThreatIndicators {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn threat_indicators(attrs: &VisitorAttributes) -> ThreatIndicators {
    let checks = [
        (attrs.behind_proxy(), ThreatIndicator::Proxy),
        (attrs.on_hosting(), ThreatIndicator::HostingOrVpn),
        (!attrs.https(), ThreatIndicator::InsecureConnection),
        (attrs.automated(), ThreatIndicator::AutomatedBrowser),
    ];
    ThreatIndicators(
        checks
            .into_iter()
            .filter_map(|(hit, threat)| hit.then_some(threat))
            .collect(),
    )
}

/// Starts at 100 and never drops below 0.
pub fn trust_score(attrs: &VisitorAttributes, trust: &TrustDeductions) -> u32 {
    let deductions = [
        (attrs.behind_proxy(), trust.proxy),
        (attrs.on_hosting(), trust.hosting),
        (!attrs.https(), trust.no_https),
        (!attrs.secure(), trust.insecure_context),
    ];
    deductions
        .into_iter()
        .filter(|(hit, _)| *hit)
        .fold(100u32, |score, (_, points)| score.saturating_sub(points))
}

pub const SECURITY_RULES: &[Rule<SecurityAssessment>] = &[
    Rule {
        name: "clean-connection",
        when: |a| a.https() && a.secure() && !a.behind_proxy() && !a.on_hosting(),
        then: SecurityAssessment::High,
    },
    Rule {
        name: "secure-with-indicators",
        when: |a| a.https() && a.secure(),
        then: SecurityAssessment::Medium,
    },
    Rule {
        name: "https-only",
        when: |a| a.https(),
        then: SecurityAssessment::Low,
    },
];

pub fn security_assessment(attrs: &VisitorAttributes) -> SecurityAssessment {
    first_match(SECURITY_RULES, attrs, SecurityAssessment::VeryLow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secure_visitor() -> VisitorAttributes {
        VisitorAttributes {
            https_enabled: Some(true),
            secure_context: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_risk_level() {
        let mut attrs = secure_visitor();
        assert_eq!(risk_level(&attrs), RiskLevel::VeryLow);

        attrs.mobile = Some(true);
        assert_eq!(risk_level(&attrs), RiskLevel::Low);

        attrs.hosting = Some(true);
        assert_eq!(risk_level(&attrs), RiskLevel::Medium);
    }

    #[test]
    fn test_trust_score_clean() {
        assert_eq!(trust_score(&secure_visitor(), &TrustDeductions::default()), 100);
    }

    #[test]
    fn test_trust_score_all_deductions() {
        let attrs = VisitorAttributes {
            proxy: Some(true),
            hosting: Some(true),
            https_enabled: Some(false),
            secure_context: Some(false),
            ..Default::default()
        };
        assert_eq!(trust_score(&attrs, &TrustDeductions::default()), 15);
    }

    #[test]
    fn test_trust_score_floors_at_zero() {
        let attrs = VisitorAttributes {
            proxy: Some(true),
            hosting: Some(true),
            ..Default::default()
        };
        let harsh = TrustDeductions {
            proxy: 60,
            hosting: 60,
            ..TrustDeductions::default()
        };
        assert_eq!(trust_score(&attrs, &harsh), 0);
    }

    #[test]
    fn test_absent_flags_count_as_insecure() {
        let attrs = VisitorAttributes::default();
        // -20 no HTTPS, -15 insecure context
        assert_eq!(trust_score(&attrs, &TrustDeductions::default()), 65);
        assert_eq!(
            threat_indicators(&attrs).0,
            vec![ThreatIndicator::InsecureConnection]
        );
        assert_eq!(security_assessment(&attrs), SecurityAssessment::VeryLow);
    }

    #[test]
    fn test_threat_indicators_order_and_text() {
        let attrs = VisitorAttributes {
            proxy: Some(true),
            hosting: Some(true),
            webdriver: Some(true),
            https_enabled: Some(true),
            ..Default::default()
        };
        let threats = threat_indicators(&attrs);
        assert_eq!(
            threats.to_string(),
            "Proxy detected, Hosting/VPN detected, Automated browser detected"
        );

        let clean = threat_indicators(&secure_visitor());
        assert!(clean.is_empty());
        assert_eq!(serde_json::to_value(&clean).unwrap(), "No threats detected");
    }

    #[test]
    fn test_security_assessment_cascade() {
        let mut attrs = secure_visitor();
        assert_eq!(security_assessment(&attrs), SecurityAssessment::High);

        attrs.proxy = Some(true);
        assert_eq!(security_assessment(&attrs), SecurityAssessment::Medium);

        attrs.secure_context = Some(false);
        assert_eq!(security_assessment(&attrs), SecurityAssessment::Low);
    }
}
