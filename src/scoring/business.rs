use serde::Serialize;

use super::factors::{bucket, ladder_points, Tier};
use super::labels::{
    CompetitiveLandscape, ConversionProbability, Graded, MarketOpportunity, RevenuePotential,
};
use super::rules::{first_match, Rule};
use crate::visitor::VisitorAttributes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessIntelligence {
    pub market_opportunity: MarketOpportunity,
    pub competitive_landscape: CompetitiveLandscape,
    pub revenue_potential: Graded<RevenuePotential>,
    pub conversion_probability: Graded<ConversionProbability>,
}

pub fn analyze(attrs: &VisitorAttributes) -> BusinessIntelligence {
    BusinessIntelligence {
        market_opportunity: market_opportunity(attrs),
        competitive_landscape: competitive_landscape(attrs),
        revenue_potential: revenue_potential(attrs),
        conversion_probability: conversion_probability(attrs),
    }
}

fn in_delhi(attrs: &VisitorAttributes) -> bool {
    attrs.city_is("Delhi") && attrs.country_is("India")
}

pub const MARKET_RULES: &[Rule<MarketOpportunity>] = &[
    Rule {
        name: "delhi-desktop",
        when: |a| in_delhi(a) && a.is_desktop(),
        then: MarketOpportunity::High,
    },
    Rule {
        name: "india-desktop",
        when: |a| a.country_is("India") && a.is_desktop(),
        then: MarketOpportunity::Medium,
    },
];

/// Shared by the location and business sections of the report.
pub fn market_opportunity(attrs: &VisitorAttributes) -> MarketOpportunity {
    first_match(MARKET_RULES, attrs, MarketOpportunity::Standard)
}

pub const COMPETITION_RULES: &[Rule<CompetitiveLandscape>] = &[
    Rule {
        name: "delhi",
        when: in_delhi,
        then: CompetitiveLandscape::High,
    },
    Rule {
        name: "india-desktop",
        when: |a| a.country_is("India") && a.is_desktop(),
        then: CompetitiveLandscape::Medium,
    },
];

pub fn competitive_landscape(attrs: &VisitorAttributes) -> CompetitiveLandscape {
    first_match(COMPETITION_RULES, attrs, CompetitiveLandscape::Standard)
}

pub fn revenue_potential(attrs: &VisitorAttributes) -> Graded<RevenuePotential> {
    let device = if attrs.is_desktop() {
        30
    } else if attrs.is_mobile_device() {
        15
    } else {
        0
    };

    let location = if in_delhi(attrs) {
        25
    } else if attrs.country_is("India") {
        15
    } else {
        0
    };

    let (time, scroll) = (attrs.time_on_page(), attrs.scroll_percentage());
    let engagement = if time >= 300.0 && scroll >= 75.0 {
        25
    } else if time >= 120.0 && scroll >= 50.0 {
        15
    } else {
        0
    };

    let score = device + location + engagement;
    let label = bucket(
        score,
        &[(70, RevenuePotential::High), (50, RevenuePotential::Medium)],
        RevenuePotential::Low,
    );
    Graded { label, score }
}

const CONVERSION_TIME: &[Tier] = &[
    Tier::at_least(300.0, 30),
    Tier::at_least(120.0, 20),
    Tier::at_least(60.0, 10),
];
const CONVERSION_SCROLL: &[Tier] = &[
    Tier::at_least(75.0, 25),
    Tier::at_least(50.0, 15),
    Tier::at_least(25.0, 10),
];
const CONVERSION_CLICKS: &[Tier] = &[
    Tier::at_least(5.0, 25),
    Tier::at_least(3.0, 15),
    Tier::at_least(1.0, 10),
];

pub fn conversion_probability(attrs: &VisitorAttributes) -> Graded<ConversionProbability> {
    let device = if attrs.is_desktop() {
        20
    } else if attrs.is_mobile_device() {
        10
    } else {
        0
    };

    let score = ladder_points(CONVERSION_TIME, attrs.time_on_page)
        + ladder_points(CONVERSION_SCROLL, attrs.scroll_percentage)
        + ladder_points(CONVERSION_CLICKS, attrs.clicks_detected)
        + device;

    let label = bucket(
        score,
        &[
            (80, ConversionProbability::VeryHigh),
            (60, ConversionProbability::High),
            (40, ConversionProbability::Medium),
            (20, ConversionProbability::Low),
        ],
        ConversionProbability::VeryLow,
    );
    Graded { label, score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::DeviceClass;

    fn visitor(device: DeviceClass, city: &str, country: &str) -> VisitorAttributes {
        VisitorAttributes {
            device: Some(device),
            city: Some(city.to_string()),
            country: Some(country.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_market_opportunity() {
        let delhi = visitor(DeviceClass::Desktop, "Delhi", "India");
        assert_eq!(market_opportunity(&delhi), MarketOpportunity::High);

        let mumbai = visitor(DeviceClass::Desktop, "Mumbai", "India");
        assert_eq!(market_opportunity(&mumbai), MarketOpportunity::Medium);

        let phone = visitor(DeviceClass::Mobile, "Delhi", "India");
        assert_eq!(market_opportunity(&phone), MarketOpportunity::Standard);
    }

    #[test]
    fn test_competitive_landscape_ignores_device_in_delhi() {
        let phone = visitor(DeviceClass::Mobile, "Delhi", "India");
        assert_eq!(competitive_landscape(&phone), CompetitiveLandscape::High);

        let mumbai_phone = visitor(DeviceClass::Mobile, "Mumbai", "India");
        assert_eq!(competitive_landscape(&mumbai_phone), CompetitiveLandscape::Standard);

        assert_eq!(
            competitive_landscape(&VisitorAttributes::default()),
            CompetitiveLandscape::Standard
        );
    }

    #[test]
    fn test_revenue_potential() {
        let mut attrs = visitor(DeviceClass::Desktop, "Delhi", "India");
        attrs.time_on_page = Some(300.0);
        attrs.scroll_percentage = Some(75.0);
        let revenue = revenue_potential(&attrs);
        assert_eq!(revenue.score, 80);
        assert_eq!(revenue.label, RevenuePotential::High);

        // 15 + 15 + 15
        let mut attrs = visitor(DeviceClass::Mobile, "Pune", "India");
        attrs.time_on_page = Some(150.0);
        attrs.scroll_percentage = Some(60.0);
        let revenue = revenue_potential(&attrs);
        assert_eq!(revenue.score, 45);
        assert_eq!(revenue.label, RevenuePotential::Low);
    }

    #[test]
    fn test_conversion_probability() {
        let mut attrs = visitor(DeviceClass::Desktop, "Delhi", "India");
        attrs.time_on_page = Some(300.0);
        attrs.scroll_percentage = Some(75.0);
        attrs.clicks_detected = Some(5.0);
        let conversion = conversion_probability(&attrs);
        assert_eq!(conversion.score, 100);
        assert_eq!(conversion.label, ConversionProbability::VeryHigh);

        let conversion = conversion_probability(&VisitorAttributes::default());
        assert_eq!(conversion.score, 0);
        assert_eq!(conversion.label, ConversionProbability::VeryLow);
    }

    #[test]
    fn test_conversion_mobile_light_session() {
        // 10 + 10 + 10 + 10
        let attrs = VisitorAttributes {
            device: Some(DeviceClass::Mobile),
            time_on_page: Some(60.0),
            scroll_percentage: Some(25.0),
            clicks_detected: Some(1.0),
            ..Default::default()
        };
        let conversion = conversion_probability(&attrs);
        assert_eq!(conversion.score, 40);
        assert_eq!(conversion.label, ConversionProbability::Medium);
    }
}
