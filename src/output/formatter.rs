use std::fmt::Display;
use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::report::VisitorReport;
use crate::scoring::{Graded, IntelligenceReport};

/// Width of the field-name column in section listings
const KEY_WIDTH: usize = 24;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pretty JSON for `--json` output.
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize report")
}

/// Score with a traffic-light color: green from 80, yellow from 50, else red.
pub fn format_score(score: u32, use_colors: bool) -> String {
    let text = format!("{:>3}", score);
    if !use_colors {
        return text;
    }
    if score >= 80 {
        text.green().to_string()
    } else if score >= 50 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// "label (score)" for score-backed classifications.
pub fn format_graded<L: Display>(graded: &Graded<L>, use_colors: bool) -> String {
    format!(
        "{} ({})",
        graded.label,
        format_score(graded.score, use_colors).trim_start()
    )
}

struct Section {
    title: &'static str,
    rows: Vec<(&'static str, String)>,
}

impl Section {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(mut self, key: &'static str, value: impl ToString) -> Self {
        self.rows.push((key, value.to_string()));
        self
    }

    fn render(&self, use_colors: bool, term_width: Option<usize>) -> String {
        let heading = if use_colors {
            self.title.bold().to_string()
        } else {
            self.title.to_string()
        };

        let mut lines = vec![heading];
        for (key, value) in &self.rows {
            // Colored values carry escape codes; only plain text is truncated
            let value = match term_width {
                Some(width) if !use_colors && width > KEY_WIDTH + 12 => {
                    truncate(value, width - KEY_WIDTH - 2)
                }
                _ => value.clone(),
            };
            let key = format!("{:<width$}", key, width = KEY_WIDTH);
            if use_colors {
                lines.push(format!("  {}{}", key.dimmed(), value));
            } else {
                lines.push(format!("  {}{}", key, value));
            }
        }
        lines.join("\n")
    }
}

fn sections(report: &IntelligenceReport, use_colors: bool) -> Vec<Section> {
    let device = &report.device_profile;
    let hardware = &device.hardware_capabilities;
    let location = &report.location_intelligence;
    let behavior = &report.behavior_profile;
    let professional = &report.professional_context;
    let risk = &report.risk_profile;
    let business = &report.business_intelligence;
    let technical = &report.technical_profile;
    let engagement = &report.engagement_profile;
    let yes_no = |b: bool| if b { "yes" } else { "no" };

    vec![
        Section::new("Device")
            .row("Type", device.device_type)
            .row("Professional grade", format_graded(&device.professional_grade, use_colors))
            .row("Display quality", format_graded(&device.display_quality, use_colors))
            .row("Performance", format_graded(&device.performance_tier, use_colors))
            .row("Touch capable", yes_no(hardware.touch_capable))
            .row("Graphics capable", yes_no(hardware.graphics_capable)),
        Section::new("Location")
            .row("Geographic context", location.geographic_context)
            .row("Business district", yes_no(location.business_district))
            .row("Tech hub", yes_no(location.tech_hub))
            .row("Network", format_graded(&location.network_quality, use_colors))
            .row("Market opportunity", location.market_opportunity),
        Section::new("Behavior")
            .row("Engagement", format_graded(&behavior.engagement_level, use_colors))
            .row("Intent", behavior.intent_level)
            .row("Pattern", behavior.behavior_pattern)
            .row("Attention span", behavior.attention_span)
            .row("Interaction quality", format_graded(&behavior.interaction_quality, use_colors)),
        Section::new("Professional")
            .row("Likely profession", professional.likely_profession)
            .row("Company size", professional.company_size)
            .row("Industry", professional.industry)
            .row("Decision authority", professional.decision_making_authority)
            .row(
                "Technical sophistication",
                format_graded(&professional.technical_sophistication, use_colors),
            ),
        Section::new("Risk")
            .row("Risk level", risk.risk_level)
            .row("Trust score", format_score(risk.trust_score, use_colors).trim_start())
            .row("Threats", &risk.threat_indicators)
            .row("Security", risk.security_assessment),
        Section::new("Business")
            .row("Lead quality", format_graded(&report.lead_quality, use_colors))
            .row("Competition", business.competitive_landscape)
            .row("Revenue potential", format_graded(&business.revenue_potential, use_colors))
            .row(
                "Conversion probability",
                format_graded(&business.conversion_probability, use_colors),
            ),
        Section::new("Technical")
            .row("Browser", technical.browser_capabilities)
            .row("OS", technical.os_capabilities)
            .row("Graphics", technical.graphics_capabilities)
            .row("Security", technical.security_profile),
        Section::new("Engagement")
            .row("Interaction pattern", engagement.interaction_pattern)
            .row("Bounce risk", engagement.bounce_risk)
            .row("Retention", format_graded(&engagement.retention_potential, use_colors)),
    ]
}

/// Format an intelligence report as titled sections of aligned key/value rows.
pub fn format_report(report: &IntelligenceReport, use_colors: bool) -> String {
    let term_width = get_terminal_width();
    let header = if use_colors {
        format!("Visitor {}", report.visitor_id.cyan())
    } else {
        format!("Visitor {}", report.visitor_id)
    };

    std::iter::once(header)
        .chain(
            sections(report, use_colors)
                .iter()
                .map(|s| s.render(use_colors, term_width)),
        )
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_list(title: &str, items: &[String], use_colors: bool) -> String {
    let heading = if use_colors {
        title.bold().to_string()
    } else {
        title.to_string()
    };
    if items.is_empty() {
        return format!("{}\n  (none)", heading);
    }
    let bullets = items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n{}", heading, bullets)
}

/// Summary line, the full breakdown, then recommendations, actions and insights.
pub fn format_visitor_report(report: &VisitorReport, use_colors: bool) -> String {
    let summary = &report.summary;
    let headline = format!(
        "{} | {} | {} | {}",
        summary.visitor_type,
        summary.lead_quality,
        summary.engagement_level,
        summary.geographic_context
    );
    let headline = if use_colors {
        headline.bold().to_string()
    } else {
        headline
    };

    [
        headline,
        format_report(&report.intelligence, use_colors),
        format_list("Recommendations", &report.recommendations, use_colors),
        format_list("Actions", &report.actions, use_colors),
        format_list("Insights", &report.insights, use_colors),
    ]
    .join("\n\n")
}
