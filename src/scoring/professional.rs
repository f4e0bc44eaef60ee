use serde::Serialize;

use super::factors::bucket;
use super::labels::{
    CompanySize, DecisionAuthority, Graded, Industry, Profession, TechnicalSophistication,
};
use super::rules::{first_match, Rule};
use crate::visitor::VisitorAttributes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalContext {
    pub likely_profession: Profession,
    pub company_size: CompanySize,
    #[serde(rename = "industrySector")]
    pub industry: Industry,
    pub decision_making_authority: DecisionAuthority,
    pub technical_sophistication: Graded<TechnicalSophistication>,
}

pub fn analyze(attrs: &VisitorAttributes) -> ProfessionalContext {
    ProfessionalContext {
        likely_profession: likely_profession(attrs),
        company_size: company_size(attrs),
        industry: industry(attrs),
        decision_making_authority: decision_authority(attrs),
        technical_sophistication: technical_sophistication(attrs),
    }
}

pub const PROFESSION_RULES: &[Rule<Profession>] = &[
    Rule {
        name: "software-developer",
        when: |a| {
            a.is_desktop()
                && a.cores() >= 8.0
                && a.browser.as_deref().is_some_and(|b| b.contains("Chrome"))
        },
        then: Profession::SoftwareDeveloper,
    },
    Rule {
        name: "design-professional",
        when: |a| {
            a.color_depth() >= 30.0
                && a.screen_resolution.as_deref().is_some_and(|r| r.contains("1512"))
        },
        then: Profession::DesignProfessional,
    },
    Rule {
        name: "business-professional",
        when: |a| a.is_desktop() && a.cores() >= 4.0,
        then: Profession::BusinessProfessional,
    },
];

pub fn likely_profession(attrs: &VisitorAttributes) -> Profession {
    first_match(PROFESSION_RULES, attrs, Profession::GeneralUser)
}

pub const COMPANY_RULES: &[Rule<CompanySize>] = &[
    Rule {
        name: "large-enterprise",
        when: |a| a.isp_contains("Limited") && a.is_desktop() && a.cores() >= 8.0,
        then: CompanySize::LargeEnterprise,
    },
    Rule {
        name: "medium-business",
        when: |a| a.is_desktop() && a.cores() >= 4.0,
        then: CompanySize::MediumBusiness,
    },
    Rule {
        name: "small-business",
        when: |a| a.is_desktop(),
        then: CompanySize::SmallBusiness,
    },
];

pub fn company_size(attrs: &VisitorAttributes) -> CompanySize {
    first_match(COMPANY_RULES, attrs, CompanySize::IndividualOrStartup)
}

pub const INDUSTRY_RULES: &[Rule<Industry>] = &[
    Rule {
        name: "jio-network",
        when: |a| a.isp_contains("Jio"),
        then: Industry::Telecommunications,
    },
    Rule {
        name: "delhi",
        when: |a| a.city_is("Delhi") && a.country_is("India"),
        then: Industry::TechnologyConsulting,
    },
];

pub fn industry(attrs: &VisitorAttributes) -> Industry {
    first_match(INDUSTRY_RULES, attrs, Industry::GeneralBusiness)
}

pub const AUTHORITY_RULES: &[Rule<DecisionAuthority>] = &[
    Rule {
        name: "professional-setup",
        when: |a| a.is_desktop() && a.cores() >= 8.0 && a.memory_gb() >= 8.0,
        then: DecisionAuthority::HighProfessionalSetup,
    },
    Rule {
        name: "corporate-network",
        when: |a| a.isp_contains("Limited") && a.is_desktop(),
        then: DecisionAuthority::MediumCorporateNetwork,
    },
    Rule {
        name: "professional-user",
        when: |a| a.is_desktop() && a.cores() >= 4.0,
        then: DecisionAuthority::MediumProfessionalUser,
    },
];

pub fn decision_authority(attrs: &VisitorAttributes) -> DecisionAuthority {
    first_match(AUTHORITY_RULES, attrs, DecisionAuthority::LowStandardUser)
}

fn browser_points(attrs: &VisitorAttributes) -> u32 {
    if attrs.browser_is("Chrome") && attrs.browser_version_at_least("100") {
        25
    } else if attrs.browser_is("Firefox") && attrs.browser_version_at_least("100") {
        20
    } else if attrs.browser_is("Safari") && attrs.browser_version_at_least("15") {
        20
    } else {
        0
    }
}

fn os_points(attrs: &VisitorAttributes) -> u32 {
    if attrs.os_is("macOS") && attrs.os_version_at_least("10.15") {
        25
    } else if attrs.os_is("Windows") && attrs.os_version_contains("10") {
        20
    } else if attrs.os_is("Linux") {
        25
    } else {
        0
    }
}

pub fn technical_sophistication(attrs: &VisitorAttributes) -> Graded<TechnicalSophistication> {
    let graphics = if attrs.webgl() && attrs.canvas() {
        25
    } else if attrs.canvas() {
        15
    } else {
        0
    };
    let security = if attrs.https() && attrs.secure() { 25 } else { 0 };

    let score = browser_points(attrs) + os_points(attrs) + graphics + security;
    let label = bucket(
        score,
        &[
            (80, TechnicalSophistication::VeryHigh),
            (60, TechnicalSophistication::High),
            (40, TechnicalSophistication::Medium),
            (20, TechnicalSophistication::Low),
        ],
        TechnicalSophistication::VeryLow,
    );
    Graded { label, score }
}
