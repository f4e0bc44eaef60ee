use chrono::{DateTime, Utc};
use serde::Serialize;

use super::behavior::{self, BehaviorProfile};
use super::business::{self, BusinessIntelligence};
use super::config::{ScoringConfig, Weights};
use super::device::{self, DeviceProfile};
use super::engagement::{self, EngagementProfile};
use super::labels::{Graded, LeadQuality};
use super::lead::lead_quality;
use super::location::{self, LocationIntelligence};
use super::professional::{self, ProfessionalContext};
use super::risk::{self, RiskProfile};
use super::technical::{self, TechnicalProfile};
use super::validation::compile;
use crate::error::EngineError;
use crate::visitor::{visitor_id, VisitorAttributes};

/// Everything the engine derives from one visitor record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceReport {
    pub timestamp: DateTime<Utc>,
    pub visitor_id: String,
    pub device_profile: DeviceProfile,
    pub location_intelligence: LocationIntelligence,
    pub behavior_profile: BehaviorProfile,
    pub professional_context: ProfessionalContext,
    pub risk_profile: RiskProfile,
    pub lead_quality: Graded<LeadQuality>,
    pub business_intelligence: BusinessIntelligence,
    pub technical_profile: TechnicalProfile,
    pub engagement_profile: EngagementProfile,
}

/// Scores visitor records against a fixed set of weights.
///
/// The engine holds no per-visitor state; one instance can be shared across
/// threads and reused for any number of records.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    weights: Weights,
}

impl Engine {
    /// Validate `config` and build an engine from it. Every problem in the
    /// config is reported, not just the first.
    pub fn new(config: ScoringConfig) -> Result<Self, EngineError> {
        let weights = compile(&config).map_err(EngineError::InvalidConfig)?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn evaluate(&self, attrs: &VisitorAttributes) -> IntelligenceReport {
        self.evaluate_at(attrs, Utc::now())
    }

    /// Same as `evaluate` with a caller-chosen timestamp, so two runs over the
    /// same record compare equal.
    pub fn evaluate_at(
        &self,
        attrs: &VisitorAttributes,
        timestamp: DateTime<Utc>,
    ) -> IntelligenceReport {
        let device_profile = device::analyze(attrs);
        let location_intelligence = location::analyze(attrs, &self.weights);
        let behavior_profile = behavior::analyze(attrs, &self.weights);

        let lead_quality = lead_quality(
            behavior_profile.engagement_level.label,
            device_profile.professional_grade.label,
            location_intelligence.geographic_context,
        );

        let report = IntelligenceReport {
            timestamp,
            visitor_id: visitor_id(attrs),
            device_profile,
            location_intelligence,
            behavior_profile,
            professional_context: professional::analyze(attrs),
            risk_profile: risk::analyze(attrs, &self.weights.trust),
            lead_quality,
            business_intelligence: business::analyze(attrs),
            technical_profile: technical::analyze(attrs),
            engagement_profile: engagement::analyze(attrs),
        };

        tracing::debug!(
            visitor_id = %report.visitor_id,
            lead_quality = %report.lead_quality.label,
            lead_score = report.lead_quality.score,
            "evaluated visitor"
        );

        report
    }
}

/// Evaluate with the built-in weights.
pub fn evaluate(attrs: &VisitorAttributes) -> IntelligenceReport {
    Engine::default().evaluate(attrs)
}
