pub mod advice;

use serde::Serialize;

use crate::scoring::labels::{EngagementLevel, GeographicContext, LeadQuality, ProfessionalGrade};
use crate::scoring::{Engine, IntelligenceReport};
use crate::visitor::VisitorAttributes;

/// Headline labels for a visitor, as shown at the top of a notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub visitor_type: String,
    pub lead_quality: LeadQuality,
    pub engagement_level: EngagementLevel,
    pub geographic_context: GeographicContext,
    pub professional_grade: ProfessionalGrade,
}

impl Summary {
    pub fn of(report: &IntelligenceReport) -> Self {
        Self {
            visitor_type: format!("{} User", report.device_profile.device_type),
            lead_quality: report.lead_quality.label,
            engagement_level: report.behavior_profile.engagement_level.label,
            geographic_context: report.location_intelligence.geographic_context,
            professional_grade: report.device_profile.professional_grade.label,
        }
    }
}

/// An intelligence report with its summary and follow-up advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorReport {
    #[serde(flatten)]
    pub intelligence: IntelligenceReport,
    pub summary: Summary,
    pub recommendations: Vec<String>,
    pub actions: Vec<String>,
    pub insights: Vec<String>,
}

impl From<IntelligenceReport> for VisitorReport {
    fn from(intelligence: IntelligenceReport) -> Self {
        Self {
            summary: Summary::of(&intelligence),
            recommendations: advice::recommendations(&intelligence),
            actions: advice::actions(&intelligence),
            insights: advice::insights(&intelligence),
            intelligence,
        }
    }
}

impl Engine {
    pub fn generate_report(&self, attrs: &VisitorAttributes) -> VisitorReport {
        self.evaluate(attrs).into()
    }
}

/// Full report with the built-in weights.
pub fn generate_report(attrs: &VisitorAttributes) -> VisitorReport {
    Engine::default().generate_report(attrs)
}
