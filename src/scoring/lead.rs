use super::factors::bucket;
use super::labels::{EngagementLevel, GeographicContext, Graded, LeadQuality, ProfessionalGrade};

fn engagement_points(level: EngagementLevel) -> u32 {
    match level {
        EngagementLevel::VeryHigh => 40,
        EngagementLevel::High => 30,
        EngagementLevel::Medium => 20,
        // Very Low deliberately shares the Low weight
        EngagementLevel::Low | EngagementLevel::VeryLow => 10,
    }
}

fn grade_points(grade: ProfessionalGrade) -> u32 {
    match grade {
        ProfessionalGrade::Professional => 30,
        ProfessionalGrade::HighEndConsumer => 20,
        ProfessionalGrade::MidRange => 10,
        ProfessionalGrade::Basic => 0,
    }
}

fn geography_points(context: GeographicContext) -> u32 {
    match context {
        GeographicContext::MajorBusinessDistrict => 30,
        GeographicContext::TechnologyHub => 25,
        GeographicContext::IndianMetropolitanArea => 15,
        GeographicContext::Standard => 0,
    }
}

/// Composite of the three labels, not of the raw attributes.
pub fn lead_quality(
    engagement: EngagementLevel,
    grade: ProfessionalGrade,
    geography: GeographicContext,
) -> Graded<LeadQuality> {
    let score = engagement_points(engagement) + grade_points(grade) + geography_points(geography);
    let label = bucket(
        score,
        &[
            (80, LeadQuality::High),
            (60, LeadQuality::Medium),
            (40, LeadQuality::Low),
        ],
        LeadQuality::Poor,
    );
    Graded { label, score }
}
