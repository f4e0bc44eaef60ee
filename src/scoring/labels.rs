//! Closed label sets for every classifier.
//!
//! Scoring code only ever compares variants. Display text is attached here and
//! nowhere else, so report wording can change without touching a rule.

use serde::{Serialize, Serializer};

macro_rules! labels {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

// Device

labels!(DeviceType {
    MacBookPro => "Apple MacBook Pro (M1 Pro)",
    ProfessionalWorkstation => "Professional Workstation",
    HighEndMobile => "High-End Mobile Device",
    Standard => "Standard Device",
});

labels!(ProfessionalGrade {
    Professional => "Professional Grade",
    HighEndConsumer => "High-End Consumer",
    MidRange => "Mid-Range",
    Basic => "Basic",
});

labels!(DisplayQuality {
    Professional => "Professional Grade",
    High => "High Quality",
    Standard => "Standard Quality",
    Basic => "Basic Quality",
});

labels!(PerformanceTier {
    High => "High Performance",
    Medium => "Medium Performance",
    Standard => "Standard Performance",
    Basic => "Basic Performance",
});

// Location

labels!(GeographicContext {
    MajorBusinessDistrict => "Major Business District",
    TechnologyHub => "Technology Hub",
    IndianMetropolitanArea => "Indian Metropolitan Area",
    Standard => "Standard Location",
});

labels!(NetworkQuality {
    Excellent => "Excellent Network Quality",
    Good => "Good Network Quality",
    Average => "Average Network Quality",
    Poor => "Poor Network Quality",
    VeryPoor => "Very Poor Network Quality",
});

labels!(MarketOpportunity {
    High => "High Market Opportunity",
    Medium => "Medium Market Opportunity",
    Standard => "Standard Market Opportunity",
});

// Behavior

labels!(EngagementLevel {
    VeryHigh => "Very High Engagement",
    High => "High Engagement",
    Medium => "Medium Engagement",
    Low => "Low Engagement",
    VeryLow => "Very Low Engagement",
});

impl EngagementLevel {
    pub fn is_low(&self) -> bool {
        matches!(self, EngagementLevel::Low | EngagementLevel::VeryLow)
    }
}

labels!(IntentLevel {
    High => "High Intent",
    Medium => "Medium Intent",
    Low => "Low Intent",
    Unknown => "Unknown Intent",
});

labels!(BehaviorPattern {
    DeepResearcher => "Deep Researcher - Comprehensive Exploration",
    CasualBrowser => "Casual Browser - Moderate Interest",
    QuickScanner => "Quick Scanner - Basic Interest",
    Bounce => "Bounce - No Interest",
    Unknown => "Unknown Pattern",
});

labels!(AttentionSpan {
    VeryShort => "Very Short (Under 10s)",
    Short => "Short (10-30s)",
    Medium => "Medium (30s-2min)",
    Long => "Long (2-5min)",
    VeryLong => "Very Long (5min+)",
});

labels!(InteractionQuality {
    Excellent => "Excellent Interaction Quality",
    Good => "Good Interaction Quality",
    Average => "Average Interaction Quality",
    Poor => "Poor Interaction Quality",
    VeryPoor => "Very Poor Interaction Quality",
});

// Professional context

labels!(Profession {
    SoftwareDeveloper => "Software Developer",
    DesignProfessional => "Design Professional",
    BusinessProfessional => "Business Professional",
    GeneralUser => "General User",
});

labels!(CompanySize {
    LargeEnterprise => "Large Enterprise",
    MediumBusiness => "Medium Business",
    SmallBusiness => "Small Business",
    IndividualOrStartup => "Individual/Startup",
});

labels!(Industry {
    Telecommunications => "Telecommunications/Technology",
    TechnologyConsulting => "Technology/Consulting",
    GeneralBusiness => "General Business",
});

labels!(DecisionAuthority {
    HighProfessionalSetup => "High Authority - Professional Setup",
    MediumCorporateNetwork => "Medium Authority - Corporate Network",
    MediumProfessionalUser => "Medium Authority - Professional User",
    LowStandardUser => "Low Authority - Standard User",
});

labels!(TechnicalSophistication {
    VeryHigh => "Very High - Technical Expert",
    High => "High - Technical Professional",
    Medium => "Medium - Technical User",
    Low => "Low - Basic User",
    VeryLow => "Very Low - Non-Technical User",
});

// Risk

labels!(RiskLevel {
    Medium => "Medium Risk",
    Low => "Low Risk",
    VeryLow => "Very Low Risk",
});

labels!(ThreatIndicator {
    Proxy => "Proxy detected",
    HostingOrVpn => "Hosting/VPN detected",
    InsecureConnection => "Insecure connection",
    AutomatedBrowser => "Automated browser detected",
});

labels!(SecurityAssessment {
    High => "High Security - Clean Connection",
    Medium => "Medium Security - Secure but with indicators",
    Low => "Low Security - Basic HTTPS only",
    VeryLow => "Very Low Security - Insecure connection",
});

// Lead and business

labels!(LeadQuality {
    High => "High-Quality Lead",
    Medium => "Medium-Quality Lead",
    Low => "Low-Quality Lead",
    Poor => "Poor Lead",
});

labels!(CompetitiveLandscape {
    High => "High Competition - Major Tech Hub",
    Medium => "Medium Competition - Growing Market",
    Standard => "Standard Competition",
});

labels!(RevenuePotential {
    High => "High Revenue Potential",
    Medium => "Medium Revenue Potential",
    Low => "Low Revenue Potential",
});

labels!(ConversionProbability {
    VeryHigh => "Very High (80%+)",
    High => "High (60-79%)",
    Medium => "Medium (40-59%)",
    Low => "Low (20-39%)",
    VeryLow => "Very Low (<20%)",
});

// Technical

labels!(BrowserCapability {
    Modern => "Modern Browser - Full Support",
    Legacy => "Legacy Browser - Limited Support",
});

labels!(OsCapability {
    Modern => "Modern OS - Full Support",
    Legacy => "Legacy OS - Limited Support",
});

labels!(GraphicsCapability {
    Advanced => "Advanced Graphics - Full Support",
    Basic => "Basic Graphics - Limited Support",
    Unsupported => "No Graphics Support",
});

labels!(SecurityProfile {
    High => "Secure Connection - High Security",
    Medium => "Secure Connection - Medium Security",
    Low => "Insecure Connection - Low Security",
});

// Engagement profile

labels!(InteractionPattern {
    HighlyEngaged => "Highly Engaged - Deep Interaction",
    ModeratelyEngaged => "Moderately Engaged - Good Interaction",
    LightlyEngaged => "Lightly Engaged - Basic Interaction",
    MinimallyEngaged => "Minimally Engaged - Poor Interaction",
});

labels!(BounceRisk {
    VeryHigh => "Very High Bounce Risk",
    High => "High Bounce Risk",
    Medium => "Medium Bounce Risk",
    Low => "Low Bounce Risk",
});

impl BounceRisk {
    pub fn is_high(&self) -> bool {
        matches!(self, BounceRisk::VeryHigh | BounceRisk::High)
    }
}

labels!(RetentionPotential {
    VeryHigh => "Very High Retention Potential",
    High => "High Retention Potential",
    Medium => "Medium Retention Potential",
    Low => "Low Retention Potential",
    VeryLow => "Very Low Retention Potential",
});

/// A label together with the 0-100 score it was bucketed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Graded<L> {
    pub label: L,
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_label() {
        assert_eq!(DeviceType::MacBookPro.to_string(), "Apple MacBook Pro (M1 Pro)");
        assert_eq!(EngagementLevel::VeryHigh.label(), "Very High Engagement");
        assert_eq!(ConversionProbability::VeryLow.to_string(), "Very Low (<20%)");
    }

    #[test]
    fn test_serializes_as_display_string() {
        let json = serde_json::to_string(&LeadQuality::High).unwrap();
        assert_eq!(json, "\"High-Quality Lead\"");

        let graded = Graded {
            label: EngagementLevel::Medium,
            score: 45,
        };
        let json = serde_json::to_value(graded).unwrap();
        assert_eq!(json["label"], "Medium Engagement");
        assert_eq!(json["score"], 45);
    }

    #[test]
    fn test_labels_are_unique_within_a_set() {
        let mut seen = std::collections::HashSet::new();
        for level in BehaviorPattern::ALL {
            assert!(seen.insert(level.label()));
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_low_and_high_groupings() {
        assert!(EngagementLevel::VeryLow.is_low());
        assert!(EngagementLevel::Low.is_low());
        assert!(!EngagementLevel::Medium.is_low());
        assert!(BounceRisk::VeryHigh.is_high());
        assert!(!BounceRisk::Medium.is_high());
    }
}
