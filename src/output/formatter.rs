//! Console and JSON rendering of recommendation responses

use crate::api::RecommendResponse;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::recommender::engine::ScoredResult;
use colored::{Color, Colorize};

pub trait OutputFormatter {
    fn format_response(&self, response: &RecommendResponse) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Ranked table for terminals
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.blue().bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn match_color(percentage: f64) -> Color {
        match percentage {
            p if p >= 75.0 => Color::Green,
            p if p >= 40.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_entry(&self, rank: usize, result: &ScoredResult) -> String {
        let name = if self.use_colors {
            result.name.bold().to_string()
        } else {
            result.name.clone()
        };
        let percentage = format!("{:.1}% match", result.match_percentage);

        format!(
            "{:>2}. {} (id {})  score {:.4}  {}\n    rating {:.2} | {} projects | {} yrs experience\n    skills: {}\n",
            rank,
            name,
            result.id,
            result.score,
            self.colorize(&percentage, Self::match_color(result.match_percentage)),
            result.rating,
            result.completed_projects,
            result.experience,
            result.skills
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_response(&self, response: &RecommendResponse) -> Result<String> {
        let mut output = String::new();

        if !response.success {
            if let Some(message) = &response.message {
                output.push_str(&self.colorize(message, Color::Yellow));
                output.push('\n');
            }
            if let Some(error) = &response.error {
                output.push_str(&self.colorize(&format!("Error: {}", error), Color::Red));
                output.push('\n');
            }
            return Ok(output);
        }

        output.push_str(&self.format_header(&format!(
            "Top {} recommended freelancers",
            response.total
        )));
        for (index, result) in response.recommendations.iter().enumerate() {
            output.push_str(&self.format_entry(index + 1, result));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_response(&self, response: &RecommendResponse) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(response)?)
        } else {
            Ok(serde_json::to_string(response)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

pub fn formatter_for(format: &OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
