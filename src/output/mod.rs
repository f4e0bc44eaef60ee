pub mod formatter;

pub use formatter::{
    format_graded, format_json, format_report, format_score, format_visitor_report,
    should_use_colors,
};
