pub mod email;
pub mod webhook;

use serde::{Serialize, Serializer};

pub use email::build_payload;
pub use webhook::Rb2bPayload;

/// Placeholder for any template parameter with no value.
pub const UNKNOWN: &str = "Unknown";

/// A notification ready for an email template service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailPayload {
    pub subject: String,
    pub params: TemplateParams,
}

/// Template parameters in insertion order.
///
/// Serializes as a JSON object whose keys keep the order they were added in,
/// so the rendered payload reads top to bottom like the email it fills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParams(Vec<(&'static str, String)>);

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an earlier value in place.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(k, _)| *k)
    }
}

impl Serialize for TemplateParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (*k, v)))
    }
}

fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = TemplateParams::new();
        params.set("a", "1");
        params.set("b", "2");
        params.set("a", "3");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("3"));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut params = TemplateParams::new();
        params.set("zeta", "last letter");
        params.set("alpha", "first letter");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"zeta":"last letter","alpha":"first letter"}"#);
    }

    #[test]
    fn test_or_unknown() {
        assert_eq!(or_unknown(Some("Delhi")), "Delhi");
        assert_eq!(or_unknown(Some("")), UNKNOWN);
        assert_eq!(or_unknown(None), UNKNOWN);
    }
}
