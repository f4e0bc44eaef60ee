use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{or_unknown, EmailPayload, TemplateParams};
use crate::error::EngineError;
use crate::visitor::lenient;
use crate::visitor::{DeviceClass, VisitorAttributes};

/// Visitor identification pushed by the RB2B webhook.
///
/// Only the fields the notification reads are typed, and each of them decodes
/// leniently: a number becomes its string form and any other wrong-typed value
/// is treated as absent. Unknown keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Rb2bPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The body as received, echoed back in `full_data`.
    #[serde(skip)]
    pub raw: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Person {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Device {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Page {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Rb2bPayload {
    pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| EngineError::InvalidInput(format!("not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(EngineError::InvalidInput(
                "webhook payload must be a JSON object".to_string(),
            ));
        }
        let mut payload: Self = serde_json::from_value(value.clone())
            .map_err(|e| EngineError::InvalidInput(format!("malformed webhook payload: {}", e)))?;
        payload.raw = Some(value);
        Ok(payload)
    }

    /// A person counts as identified once we have a name or an email.
    pub fn is_identified(&self) -> bool {
        self.person
            .as_ref()
            .is_some_and(|p| non_empty(&p.name).is_some() || non_empty(&p.email).is_some())
    }

    /// Location and device fields mapped onto a visitor record so the
    /// webhook visitor can be scored like any other.
    pub fn to_attributes(&self) -> VisitorAttributes {
        let location = self.location.clone().unwrap_or_default();
        let device = self.device.clone().unwrap_or_default();
        VisitorAttributes {
            city: location.city,
            region: location.region,
            country: location.country,
            isp: location.isp,
            device: device.kind.as_deref().and_then(DeviceClass::parse),
            browser: device.browser,
            os: device.os,
            ..Default::default()
        }
    }

    pub fn email_payload(&self) -> EmailPayload {
        self.email_payload_at(Utc::now())
    }

    pub fn email_payload_at(&self, received_at: DateTime<Utc>) -> EmailPayload {
        let person = self.person.clone().unwrap_or_default();
        let location = self.location.clone().unwrap_or_default();
        let device = self.device.clone().unwrap_or_default();
        let page = self.page.clone().unwrap_or_default();
        let identified = self.is_identified();

        let subject = if identified {
            format!(
                "IDENTIFIED VISITOR: {} from {}",
                non_empty(&person.name).unwrap_or("Unknown Name"),
                non_empty(&person.company).unwrap_or("Unknown Company")
            )
        } else {
            format!(
                "New Anonymous Visitor - {}",
                non_empty(&location.city).unwrap_or("Unknown Location")
            )
        };

        let mut params = TemplateParams::new();
        params.set(
            "visitor_status",
            if identified { "IDENTIFIED" } else { "ANONYMOUS" },
        );
        params.set("visitor_name", or_unknown(person.name.as_deref()));
        params.set("visitor_email", or_unknown(person.email.as_deref()));
        params.set("visitor_company", or_unknown(person.company.as_deref()));
        params.set("visitor_linkedin", or_unknown(person.linkedin.as_deref()));
        params.set("visitor_phone", or_unknown(person.phone.as_deref()));
        params.set("visitor_title", or_unknown(person.title.as_deref()));

        params.set(
            "visitor_location",
            format!(
                "{}, {}",
                or_unknown(location.city.as_deref()),
                or_unknown(location.country.as_deref())
            ),
        );
        params.set("visitor_ip", or_unknown(location.ip.as_deref()));
        params.set("visitor_isp", or_unknown(location.isp.as_deref()));

        params.set("visitor_device", or_unknown(device.kind.as_deref()));
        params.set("visitor_browser", or_unknown(device.browser.as_deref()));
        params.set("visitor_os", or_unknown(device.os.as_deref()));

        params.set("page_url", or_unknown(page.url.as_deref()));
        params.set("page_title", or_unknown(page.title.as_deref()));
        params.set(
            "referrer",
            non_empty(&page.referrer).unwrap_or("Direct visit"),
        );

        params.set("visit_time", received_at.to_rfc3339());
        params.set("timezone", or_unknown(location.timezone.as_deref()));
        let full_data = match &self.raw {
            Some(raw) => serde_json::to_string_pretty(raw),
            None => serde_json::to_string_pretty(self),
        };
        params.set("full_data", full_data.unwrap_or_default());

        EmailPayload { subject, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const IDENTIFIED: &str = r#"{
        "person": {
            "name": "Asha Rao",
            "email": "asha@example.com",
            "company": "Acme Labs",
            "title": "CTO"
        },
        "location": {
            "city": "Mumbai",
            "country": "India",
            "ip": "203.0.113.7",
            "timezone": "Asia/Kolkata"
        },
        "device": { "type": "desktop", "browser": "Chrome", "os": "macOS" },
        "page": { "url": "https://example.com/work", "title": "Work" },
        "campaign": "spring"
    }"#;

    fn received() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_identified_visitor() {
        let payload = Rb2bPayload::from_json_str(IDENTIFIED).unwrap();
        assert!(payload.is_identified());

        let email = payload.email_payload_at(received());
        assert_eq!(email.subject, "IDENTIFIED VISITOR: Asha Rao from Acme Labs");
        assert_eq!(email.params.get("visitor_status"), Some("IDENTIFIED"));
        assert_eq!(email.params.get("visitor_phone"), Some("Unknown"));
        assert_eq!(email.params.get("visitor_location"), Some("Mumbai, India"));
        assert_eq!(email.params.get("referrer"), Some("Direct visit"));
        assert_eq!(
            email.params.get("visit_time"),
            Some("2024-05-02T09:30:00+00:00")
        );
    }

    #[test]
    fn test_full_data_keeps_unknown_fields() {
        let payload = Rb2bPayload::from_json_str(IDENTIFIED).unwrap();
        let email = payload.email_payload_at(received());
        let full: Value = serde_json::from_str(email.params.get("full_data").unwrap()).unwrap();
        assert_eq!(full["campaign"], "spring");
        assert_eq!(full["device"]["type"], "desktop");
    }

    #[test]
    fn test_full_data_echoes_received_body() {
        let body = r#"{"person": {"name": "Ann", "phone": 5551234}, "location": {"city": "Pune"}}"#;
        let payload = Rb2bPayload::from_json_str(body).unwrap();
        let email = payload.email_payload_at(received());
        let full: Value = serde_json::from_str(email.params.get("full_data").unwrap()).unwrap();
        assert_eq!(full, serde_json::from_str::<Value>(body).unwrap());
        assert!(full["location"].get("region").is_none());
    }

    #[test]
    fn test_built_payload_skips_absent_fields() {
        let payload = Rb2bPayload {
            location: Some(Location {
                city: Some("Pune".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let full: Value = serde_json::from_str(
            payload.email_payload_at(received()).params.get("full_data").unwrap(),
        )
        .unwrap();
        assert_eq!(full, serde_json::json!({"location": {"city": "Pune"}}));
    }

    #[test]
    fn test_wrong_typed_fields_are_tolerated() {
        let payload = Rb2bPayload::from_json_str(
            r#"{"person": {"name": "Ann", "phone": 5551234, "email": {"primary": "a@b.c"}},
                "device": {"type": ["desktop"], "browser": "Chrome"}}"#,
        )
        .unwrap();
        let person = payload.person.clone().unwrap();
        assert_eq!(person.phone.as_deref(), Some("5551234"));
        assert_eq!(person.email, None);
        assert!(payload.is_identified());

        let email = payload.email_payload_at(received());
        assert_eq!(email.params.get("visitor_phone"), Some("5551234"));
        assert_eq!(email.params.get("visitor_email"), Some("Unknown"));
        assert_eq!(email.params.get("visitor_device"), Some("Unknown"));
        assert_eq!(email.params.get("visitor_browser"), Some("Chrome"));
    }

    #[test]
    fn test_anonymous_visitor() {
        let payload = Rb2bPayload::from_json_str(r#"{"location": {"city": "Pune"}}"#).unwrap();
        assert!(!payload.is_identified());
        let email = payload.email_payload_at(received());
        assert_eq!(email.subject, "New Anonymous Visitor - Pune");
        assert_eq!(email.params.get("visitor_status"), Some("ANONYMOUS"));
        assert_eq!(email.params.get("visitor_location"), Some("Pune, Unknown"));

        let empty = Rb2bPayload::from_json_str("{}").unwrap();
        assert_eq!(
            empty.email_payload_at(received()).subject,
            "New Anonymous Visitor - Unknown Location"
        );
    }

    #[test]
    fn test_blank_name_is_not_identified() {
        let payload = Rb2bPayload::from_json_str(r#"{"person": {"name": ""}}"#).unwrap();
        assert!(!payload.is_identified());
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(matches!(
            Rb2bPayload::from_json_str("[1, 2]"),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            Rb2bPayload::from_json_str(r#"{"person": "Asha"}"#),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_to_attributes() {
        let payload = Rb2bPayload::from_json_str(IDENTIFIED).unwrap();
        let attrs = payload.to_attributes();
        assert_eq!(attrs.city.as_deref(), Some("Mumbai"));
        assert_eq!(attrs.device, Some(DeviceClass::Desktop));
        assert_eq!(attrs.browser.as_deref(), Some("Chrome"));
        assert!(attrs.time_on_page.is_none());
    }
}
