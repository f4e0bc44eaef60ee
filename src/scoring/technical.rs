use serde::Serialize;

use super::labels::{BrowserCapability, GraphicsCapability, OsCapability, SecurityProfile};
use super::rules::{first_match, Rule};
use crate::visitor::VisitorAttributes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalProfile {
    pub browser_capabilities: BrowserCapability,
    pub os_capabilities: OsCapability,
    pub graphics_capabilities: GraphicsCapability,
    pub security_profile: SecurityProfile,
}

pub fn analyze(attrs: &VisitorAttributes) -> TechnicalProfile {
    TechnicalProfile {
        browser_capabilities: browser_capability(attrs),
        os_capabilities: os_capability(attrs),
        graphics_capabilities: graphics_capability(attrs),
        security_profile: security_profile(attrs),
    }
}

pub const BROWSER_RULES: &[Rule<BrowserCapability>] = &[Rule {
    name: "modern-browser",
    when: |a| {
        let evergreen =
            a.browser_is("Chrome") || a.browser_is("Firefox") || a.browser_is("Edge");
        (evergreen && a.browser_version_at_least("100"))
            || (a.browser_is("Safari") && a.browser_version_at_least("15"))
    },
    then: BrowserCapability::Modern,
}];

pub fn browser_capability(attrs: &VisitorAttributes) -> BrowserCapability {
    first_match(BROWSER_RULES, attrs, BrowserCapability::Legacy)
}

pub const OS_RULES: &[Rule<OsCapability>] = &[Rule {
    name: "modern-os",
    when: |a| {
        (a.os_is("macOS") && a.os_version_at_least("10.15"))
            || (a.os_is("Windows") && a.os_version_contains("10"))
            || a.os_is("Linux")
    },
    then: OsCapability::Modern,
}];

pub fn os_capability(attrs: &VisitorAttributes) -> OsCapability {
    first_match(OS_RULES, attrs, OsCapability::Legacy)
}

pub const GRAPHICS_RULES: &[Rule<GraphicsCapability>] = &[
    Rule {
        name: "webgl-and-canvas",
        when: |a| a.webgl() && a.canvas(),
        then: GraphicsCapability::Advanced,
    },
    Rule {
        name: "canvas-only",
        when: |a| a.canvas(),
        then: GraphicsCapability::Basic,
    },
];

pub fn graphics_capability(attrs: &VisitorAttributes) -> GraphicsCapability {
    first_match(GRAPHICS_RULES, attrs, GraphicsCapability::Unsupported)
}

pub const SECURITY_PROFILE_RULES: &[Rule<SecurityProfile>] = &[
    Rule {
        name: "https-secure-context",
        when: |a| a.https() && a.secure(),
        then: SecurityProfile::High,
    },
    Rule {
        name: "https-only",
        when: |a| a.https(),
        then: SecurityProfile::Medium,
    },
];

pub fn security_profile(attrs: &VisitorAttributes) -> SecurityProfile {
    first_match(SECURITY_PROFILE_RULES, attrs, SecurityProfile::Low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rules::matching_rule;

    fn browser(name: &str, version: &str) -> VisitorAttributes {
        VisitorAttributes {
            browser: Some(name.to_string()),
            browser_version: Some(version.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_browser_capability() {
        assert_eq!(browser_capability(&browser("Edge", "120")), BrowserCapability::Modern);
        assert_eq!(browser_capability(&browser("Safari", "17.1")), BrowserCapability::Modern);
        assert_eq!(browser_capability(&browser("Safari", "14.1")), BrowserCapability::Legacy);
        assert_eq!(browser_capability(&browser("Opera", "110")), BrowserCapability::Legacy);
        assert_eq!(
            browser_capability(&VisitorAttributes::default()),
            BrowserCapability::Legacy
        );
    }

    #[test]
    fn test_os_capability() {
        let os = |name: &str, version: Option<&str>| VisitorAttributes {
            os: Some(name.to_string()),
            os_version: version.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(os_capability(&os("Linux", None)), OsCapability::Modern);
        assert_eq!(os_capability(&os("Windows", Some("10"))), OsCapability::Modern);
        assert_eq!(os_capability(&os("Windows", Some("7"))), OsCapability::Legacy);
        assert_eq!(os_capability(&os("macOS", Some("10.15.7"))), OsCapability::Modern);
        assert_eq!(os_capability(&os("macOS", None)), OsCapability::Legacy);
    }

    #[test]
    fn test_graphics_and_security() {
        let attrs = VisitorAttributes {
            webgl_support: Some(true),
            canvas_support: Some(false),
            https_enabled: Some(true),
            ..Default::default()
        };
        assert_eq!(graphics_capability(&attrs), GraphicsCapability::Unsupported);
        assert_eq!(security_profile(&attrs), SecurityProfile::Medium);

        let attrs = VisitorAttributes {
            canvas_support: Some(true),
            secure_context: Some(true),
            ..Default::default()
        };
        assert_eq!(graphics_capability(&attrs), GraphicsCapability::Basic);
        assert_eq!(security_profile(&attrs), SecurityProfile::Low);
    }

    #[test]
    fn test_graphics_and_security_rule_order() {
        let attrs = VisitorAttributes {
            webgl_support: Some(true),
            canvas_support: Some(true),
            https_enabled: Some(true),
            secure_context: Some(true),
            ..Default::default()
        };
        // Both rules in each table hold; the first one decides
        assert_eq!(
            matching_rule(GRAPHICS_RULES, &attrs).map(|r| r.name),
            Some("webgl-and-canvas")
        );
        assert_eq!(
            matching_rule(SECURITY_PROFILE_RULES, &attrs).map(|r| r.name),
            Some("https-secure-context")
        );
        assert_eq!(graphics_capability(&attrs), GraphicsCapability::Advanced);
        assert_eq!(security_profile(&attrs), SecurityProfile::High);
    }
}
