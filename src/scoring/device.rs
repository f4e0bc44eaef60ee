use serde::Serialize;

use super::factors::{bucket, ladder_points, Tier};
use super::labels::{DeviceType, DisplayQuality, Graded, PerformanceTier, ProfessionalGrade};
use super::rules::{first_match, Rule};
use crate::visitor::VisitorAttributes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub device_type: DeviceType,
    pub professional_grade: Graded<ProfessionalGrade>,
    pub hardware_capabilities: HardwareCapabilities,
    pub display_quality: Graded<DisplayQuality>,
    pub performance_tier: Graded<PerformanceTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareCapabilities {
    pub cpu_cores: Option<f64>,
    #[serde(rename = "memoryGB")]
    pub memory_gb: Option<f64>,
    pub touch_capable: bool,
    pub graphics_capable: bool,
    pub performance_score: u32,
}

pub fn analyze(attrs: &VisitorAttributes) -> DeviceProfile {
    DeviceProfile {
        device_type: classify_device(attrs),
        professional_grade: professional_grade(attrs),
        hardware_capabilities: hardware_capabilities(attrs),
        display_quality: display_quality(attrs),
        performance_tier: performance_tier(attrs),
    }
}

pub const DEVICE_RULES: &[Rule<DeviceType>] = &[
    Rule {
        name: "macbook-pro-m1",
        when: |a| {
            a.is_desktop()
                && a.screen_resolution.as_deref() == Some("1512x982")
                && a.pixel_ratio == Some(2.0)
        },
        then: DeviceType::MacBookPro,
    },
    Rule {
        name: "professional-workstation",
        when: |a| a.cores() >= 8.0 && a.memory_gb() >= 8.0 && a.color_depth() >= 24.0,
        then: DeviceType::ProfessionalWorkstation,
    },
    Rule {
        name: "high-end-mobile",
        when: |a| a.is_mobile_device() && a.pixel_ratio() >= 2.0,
        then: DeviceType::HighEndMobile,
    },
];

pub fn classify_device(attrs: &VisitorAttributes) -> DeviceType {
    first_match(DEVICE_RULES, attrs, DeviceType::Standard)
}

const GRADE_CORES: &[Tier] = &[Tier::at_least(8.0, 25), Tier::at_least(4.0, 15)];
const GRADE_MEMORY: &[Tier] = &[Tier::at_least(8.0, 25), Tier::at_least(4.0, 15)];
const GRADE_COLOR_DEPTH: &[Tier] = &[Tier::at_least(30.0, 20), Tier::at_least(24.0, 15)];
const GRADE_PIXEL_RATIO: &[Tier] = &[Tier::at_least(2.0, 15), Tier::at_least(1.5, 10)];

pub fn professional_grade(attrs: &VisitorAttributes) -> Graded<ProfessionalGrade> {
    let mut score = ladder_points(GRADE_CORES, attrs.hardware_concurrency)
        + ladder_points(GRADE_MEMORY, attrs.device_memory)
        + ladder_points(GRADE_COLOR_DEPTH, attrs.color_depth)
        + ladder_points(GRADE_PIXEL_RATIO, attrs.pixel_ratio);

    if attrs.resolution().is_some_and(|r| r.at_least(1440, 900)) {
        score += 15;
    }

    let label = bucket(
        score,
        &[
            (80, ProfessionalGrade::Professional),
            (60, ProfessionalGrade::HighEndConsumer),
            (40, ProfessionalGrade::MidRange),
        ],
        ProfessionalGrade::Basic,
    );
    Graded { label, score }
}

// (min width, min height, points), highest first
const DISPLAY_RESOLUTIONS: &[(u32, u32, u32)] = &[
    (1920, 1080, 30),
    (1440, 900, 25),
    (1366, 768, 20),
    (1024, 768, 15),
];
const DISPLAY_COLOR_DEPTH: &[Tier] = &[
    Tier::at_least(30.0, 25),
    Tier::at_least(24.0, 20),
    Tier::at_least(16.0, 15),
];
const DISPLAY_PIXEL_RATIO: &[Tier] = &[
    Tier::at_least(2.0, 25),
    Tier::at_least(1.5, 20),
    Tier::at_least(1.0, 15),
];

pub fn display_quality(attrs: &VisitorAttributes) -> Graded<DisplayQuality> {
    let resolution_points = attrs
        .resolution()
        .and_then(|r| {
            DISPLAY_RESOLUTIONS
                .iter()
                .find(|(w, h, _)| r.at_least(*w, *h))
                .map(|(_, _, points)| *points)
        })
        .unwrap_or(0);

    let score = resolution_points
        + ladder_points(DISPLAY_COLOR_DEPTH, attrs.color_depth)
        + ladder_points(DISPLAY_PIXEL_RATIO, attrs.pixel_ratio);

    let label = bucket(
        score,
        &[
            (70, DisplayQuality::Professional),
            (50, DisplayQuality::High),
            (30, DisplayQuality::Standard),
        ],
        DisplayQuality::Basic,
    );
    Graded { label, score }
}

/// Continuous hardware score: 30 for 16 cores, 30 for 16 GB, 20 for 32-bit
/// color, 10 per unit of pixel ratio up to 3. Rounded and capped at 100.
pub fn performance_score(attrs: &VisitorAttributes) -> u32 {
    raw_performance(attrs).round().min(100.0) as u32
}

fn raw_performance(attrs: &VisitorAttributes) -> f64 {
    let raw = (attrs.cores() / 16.0) * 30.0
        + (attrs.memory_gb() / 16.0) * 30.0
        + (attrs.color_depth() / 32.0) * 20.0
        + attrs.pixel_ratio().min(3.0) * 10.0;
    raw.max(0.0)
}

pub fn performance_tier(attrs: &VisitorAttributes) -> Graded<PerformanceTier> {
    // Tier is decided on the unrounded sum: 79.6 is still Medium
    let raw = raw_performance(attrs);
    let label = bucket(
        raw.floor().min(100.0) as u32,
        &[
            (80, PerformanceTier::High),
            (60, PerformanceTier::Medium),
            (40, PerformanceTier::Standard),
        ],
        PerformanceTier::Basic,
    );
    Graded {
        label,
        score: performance_score(attrs),
    }
}

pub fn hardware_capabilities(attrs: &VisitorAttributes) -> HardwareCapabilities {
    HardwareCapabilities {
        cpu_cores: attrs.hardware_concurrency,
        memory_gb: attrs.device_memory,
        touch_capable: attrs.max_touch_points.is_some_and(|n| n > 0.0),
        graphics_capable: attrs.webgl() && attrs.canvas(),
        performance_score: performance_score(attrs),
    }
}
