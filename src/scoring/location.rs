use serde::Serialize;

use super::business::market_opportunity;
use super::config::Weights;
use super::factors::{bucket, ladder_points};
use super::labels::{GeographicContext, Graded, MarketOpportunity, NetworkQuality};
use super::rules::{first_match, Rule};
use crate::visitor::VisitorAttributes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationIntelligence {
    pub geographic_context: GeographicContext,
    pub business_district: bool,
    pub tech_hub: bool,
    pub network_quality: Graded<NetworkQuality>,
    pub market_opportunity: MarketOpportunity,
}

pub fn analyze(attrs: &VisitorAttributes, weights: &Weights) -> LocationIntelligence {
    LocationIntelligence {
        geographic_context: geographic_context(attrs),
        business_district: is_business_district(attrs.postal.as_deref()),
        tech_hub: is_tech_hub(attrs.city.as_deref(), attrs.country.as_deref()),
        network_quality: network_quality(attrs, weights),
        market_opportunity: market_opportunity(attrs),
    }
}

/// Cities that count as a technology hub for the geographic context label.
/// Narrower than `TECH_HUBS`: Pune is a hub but not a context upgrade.
const CONTEXT_HUB_CITIES: &[&str] = &["Delhi", "Mumbai", "Bangalore", "Hyderabad", "Chennai"];

/// Central Delhi postal codes
pub const BUSINESS_POSTALS: &[&str] = &["110001", "110002", "110003", "110004", "110005"];

pub const TECH_HUBS: &[(&str, &[&str])] = &[
    ("India", &["Delhi", "Mumbai", "Bangalore", "Hyderabad", "Chennai", "Pune"]),
    ("United States", &["San Francisco", "New York", "Seattle", "Austin", "Boston"]),
    ("United Kingdom", &["London", "Manchester", "Birmingham"]),
    ("Canada", &["Toronto", "Vancouver", "Montreal"]),
];

// Most specific first: a Delhi 110001 visitor is a business district even
// though Delhi is also a hub.
pub const GEOGRAPHY_RULES: &[Rule<GeographicContext>] = &[
    Rule {
        name: "delhi-business-district",
        when: |a| a.city_is("Delhi") && a.postal.as_deref() == Some("110001"),
        then: GeographicContext::MajorBusinessDistrict,
    },
    Rule {
        name: "technology-hub",
        when: |a| a.city.as_deref().is_some_and(|c| CONTEXT_HUB_CITIES.contains(&c)),
        then: GeographicContext::TechnologyHub,
    },
    Rule {
        name: "indian-metro",
        when: |a| a.city.is_some() && a.country_is("India"),
        then: GeographicContext::IndianMetropolitanArea,
    },
];

pub fn geographic_context(attrs: &VisitorAttributes) -> GeographicContext {
    first_match(GEOGRAPHY_RULES, attrs, GeographicContext::Standard)
}

pub fn is_business_district(postal: Option<&str>) -> bool {
    postal.is_some_and(|p| BUSINESS_POSTALS.contains(&p))
}

pub fn is_tech_hub(city: Option<&str>, country: Option<&str>) -> bool {
    let (Some(city), Some(country)) = (city, country) else {
        return false;
    };
    TECH_HUBS
        .iter()
        .find(|(c, _)| *c == country)
        .is_some_and(|(_, cities)| cities.contains(&city))
}

pub fn network_quality(attrs: &VisitorAttributes, weights: &Weights) -> Graded<NetworkQuality> {
    let type_points = match attrs.connection_type.as_deref() {
        Some("4g") | Some("wifi") => 30,
        Some("3g") => 20,
        Some("2g") => 10,
        _ => 0,
    };

    let isp_points = if attrs.isp_contains("Limited") {
        20
    } else if attrs.isp_contains("Corp") {
        15
    } else {
        0
    };

    let score = type_points
        + ladder_points(&weights.speed, attrs.connection_speed)
        + ladder_points(&weights.rtt, attrs.connection_rtt)
        + isp_points;

    let label = bucket(
        score,
        &[
            (80, NetworkQuality::Excellent),
            (60, NetworkQuality::Good),
            (40, NetworkQuality::Average),
            (20, NetworkQuality::Poor),
        ],
        NetworkQuality::VeryPoor,
    );
    Graded { label, score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{compile, ScoringConfig};

    fn weights() -> Weights {
        compile(&ScoringConfig::default()).unwrap()
    }

    fn located(city: &str, country: &str, postal: Option<&str>) -> VisitorAttributes {
        VisitorAttributes {
            city: Some(city.to_string()),
            country: Some(country.to_string()),
            postal: postal.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_business_district_beats_tech_hub() {
        let attrs = located("Delhi", "India", Some("110001"));
        assert_eq!(geographic_context(&attrs), GeographicContext::MajorBusinessDistrict);
    }

    #[test]
    fn test_delhi_other_postal_is_hub() {
        let attrs = located("Delhi", "India", Some("110020"));
        assert_eq!(geographic_context(&attrs), GeographicContext::TechnologyHub);
    }

    #[test]
    fn test_pune_is_metro_not_context_hub() {
        let attrs = located("Pune", "India", None);
        assert_eq!(geographic_context(&attrs), GeographicContext::IndianMetropolitanArea);
        assert!(is_tech_hub(Some("Pune"), Some("India")));
    }

    #[test]
    fn test_country_fallback() {
        assert_eq!(
            geographic_context(&located("Lisbon", "Portugal", None)),
            GeographicContext::Standard
        );
        let no_city = VisitorAttributes {
            country: Some("India".to_string()),
            ..Default::default()
        };
        assert_eq!(geographic_context(&no_city), GeographicContext::Standard);
    }

    #[test]
    fn test_business_district_membership() {
        assert!(is_business_district(Some("110005")));
        assert!(!is_business_district(Some("110006")));
        assert!(!is_business_district(None));
    }

    #[test]
    fn test_tech_hub_is_country_scoped() {
        assert!(is_tech_hub(Some("London"), Some("United Kingdom")));
        assert!(is_tech_hub(Some("Austin"), Some("United States")));
        assert!(!is_tech_hub(Some("London"), Some("Canada")));
        assert!(!is_tech_hub(Some("Delhi"), None));
        assert!(!is_tech_hub(None, Some("India")));
    }

    #[test]
    fn test_network_quality_sample() {
        let attrs = VisitorAttributes {
            connection_type: Some("4g".to_string()),
            connection_speed: Some(6.5),
            connection_rtt: Some(200.0),
            isp: Some("Reliance Jio Infocomm Limited".to_string()),
            ..Default::default()
        };
        // 30 + 20 + 10 + 20
        let quality = network_quality(&attrs, &weights());
        assert_eq!(quality.score, 80);
        assert_eq!(quality.label, NetworkQuality::Excellent);
    }

    #[test]
    fn test_network_quality_absent_rtt_earns_nothing() {
        let attrs = VisitorAttributes {
            connection_type: Some("3g".to_string()),
            ..Default::default()
        };
        let quality = network_quality(&attrs, &weights());
        assert_eq!(quality.score, 20);
        assert_eq!(quality.label, NetworkQuality::Poor);

        let quality = network_quality(&VisitorAttributes::default(), &weights());
        assert_eq!(quality.score, 0);
        assert_eq!(quality.label, NetworkQuality::VeryPoor);
    }

    #[test]
    fn test_network_isp_corp() {
        let attrs = VisitorAttributes {
            connection_type: Some("wifi".to_string()),
            connection_speed: Some(12.0),
            connection_rtt: Some(80.0),
            isp: Some("Comcast Corp".to_string()),
            ..Default::default()
        };
        // 30 + 30 + 15 + 15
        assert_eq!(network_quality(&attrs, &weights()).score, 90);
    }
}
