use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use crate::error::EngineError;

/// Coarse device class reported by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Desktop,
    Mobile,
    Tablet,
}

impl DeviceClass {
    /// Case-insensitive parse. Unknown classes are treated as absent.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Some(DeviceClass::Desktop),
            "mobile" => Some(DeviceClass::Mobile),
            "tablet" => Some(DeviceClass::Tablet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Desktop => "Desktop",
            DeviceClass::Mobile => "Mobile",
            DeviceClass::Tablet => "Tablet",
        }
    }
}

/// Parsed "WxH" screen resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Parse "1920x1080". Anything without a single `x` separating two
    /// integers yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.trim().split_once('x')?;
        Some(Resolution {
            width: w.trim().parse().ok()?,
            height: h.trim().parse().ok()?,
        })
    }

    pub fn at_least(&self, width: u32, height: u32) -> bool {
        self.width >= width && self.height >= height
    }
}

/// One visitor session as reported by the data collector.
///
/// Every field is optional. Values of the wrong type are decoded as `None`;
/// the accessor methods below apply the defaulting rules the sub-scorers rely
/// on, so scoring code never handles `Option` arithmetic itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorAttributes {
    // Device
    #[serde(default, deserialize_with = "lenient::device", skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceClass>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub screen_resolution: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub color_depth: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub pixel_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub hardware_concurrency: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub device_memory: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub max_touch_points: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub webgl_support: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub canvas_support: Option<bool>,

    // Network / location
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    /// Mbps
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub connection_speed: Option<f64>,
    /// Round-trip time in ms
    #[serde(
        default,
        rename = "connectionRTT",
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_rtt: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub proxy: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub hosting: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,

    // Browser / OS
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub browser_version: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub https_enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub secure_context: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub webdriver: Option<bool>,

    // Behavior
    /// Seconds
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub time_on_page: Option<f64>,
    /// 0-100
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub scroll_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub mouse_movements: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub clicks_detected: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub sections_visited: Option<f64>,

    // Identity (only used for the visitor id)
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub fingerprint_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub canvas_fingerprint: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub audio_fingerprint: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl VisitorAttributes {
    /// Decode a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` if the value is not a JSON object.
    /// Individual fields never cause an error.
    pub fn from_json_value(value: Value) -> Result<Self, EngineError> {
        if !value.is_object() {
            return Err(EngineError::InvalidInput(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| EngineError::InvalidInput(e.to_string()))
    }

    /// Parse and decode a record from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| EngineError::InvalidInput(format!("not valid JSON: {}", e)))?;
        Self::from_json_value(value)
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.screen_resolution.as_deref().and_then(Resolution::parse)
    }

    pub fn is_desktop(&self) -> bool {
        self.device == Some(DeviceClass::Desktop)
    }

    pub fn is_mobile_device(&self) -> bool {
        self.device == Some(DeviceClass::Mobile)
    }

    pub fn city_is(&self, city: &str) -> bool {
        self.city.as_deref() == Some(city)
    }

    pub fn country_is(&self, country: &str) -> bool {
        self.country.as_deref() == Some(country)
    }

    pub fn isp_contains(&self, needle: &str) -> bool {
        self.isp.as_deref().is_some_and(|isp| isp.contains(needle))
    }

    pub fn browser_is(&self, browser: &str) -> bool {
        self.browser.as_deref() == Some(browser)
    }

    pub fn os_is(&self, os: &str) -> bool {
        self.os.as_deref() == Some(os)
    }

    /// Lexical version comparison, e.g. "99" >= "100" is true. Absent never passes.
    pub fn browser_version_at_least(&self, min: &str) -> bool {
        self.browser_version.as_deref().is_some_and(|v| v >= min)
    }

    pub fn os_version_at_least(&self, min: &str) -> bool {
        self.os_version.as_deref().is_some_and(|v| v >= min)
    }

    pub fn os_version_contains(&self, needle: &str) -> bool {
        self.os_version.as_deref().is_some_and(|v| v.contains(needle))
    }

    // Behavior counters read as zero when absent

    pub fn time_on_page(&self) -> f64 {
        self.time_on_page.unwrap_or(0.0)
    }

    pub fn scroll_percentage(&self) -> f64 {
        self.scroll_percentage.unwrap_or(0.0)
    }

    pub fn mouse_movements(&self) -> f64 {
        self.mouse_movements.unwrap_or(0.0)
    }

    pub fn clicks(&self) -> f64 {
        self.clicks_detected.unwrap_or(0.0)
    }

    pub fn sections_visited(&self) -> f64 {
        self.sections_visited.unwrap_or(0.0)
    }

    // Hardware numbers read as zero when absent

    pub fn cores(&self) -> f64 {
        self.hardware_concurrency.unwrap_or(0.0)
    }

    pub fn memory_gb(&self) -> f64 {
        self.device_memory.unwrap_or(0.0)
    }

    pub fn color_depth(&self) -> f64 {
        self.color_depth.unwrap_or(0.0)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio.unwrap_or(0.0)
    }

    // Flags read as false when absent

    pub fn https(&self) -> bool {
        self.https_enabled.unwrap_or(false)
    }

    pub fn secure(&self) -> bool {
        self.secure_context.unwrap_or(false)
    }

    pub fn behind_proxy(&self) -> bool {
        self.proxy.unwrap_or(false)
    }

    pub fn on_hosting(&self) -> bool {
        self.hosting.unwrap_or(false)
    }

    pub fn on_mobile_network(&self) -> bool {
        self.mobile.unwrap_or(false)
    }

    pub fn automated(&self) -> bool {
        self.webdriver.unwrap_or(false)
    }

    pub fn webgl(&self) -> bool {
        self.webgl_support.unwrap_or(false)
    }

    pub fn canvas(&self) -> bool {
        self.canvas_support.unwrap_or(false)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
