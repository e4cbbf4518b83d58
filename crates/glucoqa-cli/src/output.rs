//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use glucoqa_domain::{AnswerRecord, KnowledgeBase};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Educational-use notice printed after every answer.
pub const EMERGENCY_NOTICE: &str = "Educational information only. For medical emergencies, \
contact your healthcare provider or call emergency services immediately.";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a freshly resolved answer.
    pub fn format_answer(&self, record: &AnswerRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.format_answer_text(record)),
            OutputFormat::Quiet => Ok(record.answer_text().to_string()),
        }
    }

    fn format_answer_text(&self, record: &AnswerRecord) -> String {
        let mut out = String::new();

        if record.matched().is_fallback() {
            out.push_str(&self.warning("No matching topic, showing general guidance"));
        } else {
            out.push_str(&self.success(&format!("Answer ({})", record.matched_topic_key())));
        }
        out.push_str("\n\n");
        out.push_str(record.answer_text());
        out.push('\n');

        if !record.sources().is_empty() {
            out.push('\n');
            out.push_str(&self.colorize("Sources:", "cyan"));
            out.push('\n');
            for (i, source) in record.sources().iter().enumerate() {
                out.push_str(&format!("  [{}] {}\n", i + 1, source));
            }
        }

        out.push('\n');
        out.push_str(&self.colorize(EMERGENCY_NOTICE, "red"));
        out
    }

    /// Format conversation history (records already ordered most recent first).
    pub fn format_history(&self, records: &[&AnswerRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_history_text(records)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.question())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_history_text(&self, records: &[&AnswerRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No questions asked yet.", "yellow");
        }

        let blocks: Vec<String> = records
            .iter()
            .map(|r| {
                format!(
                    "{} {}\n   {} [{} | {}]\n{}",
                    self.colorize("Q:", "cyan"),
                    r.question(),
                    self.colorize("A:", "green"),
                    r.role(),
                    r.matched_topic_key(),
                    indent(r.answer_text(), "   "),
                )
            })
            .collect();
        blocks.join("\n\n")
    }

    /// Format the topic list in match order.
    pub fn format_topics(&self, kb: &KnowledgeBase) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let topics: Vec<serde_json::Value> = kb
                    .entries()
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "key": e.key(),
                            "sources": e.sources(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&topics)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "Topic", "Sources"]);
                for (i, entry) in kb.entries().iter().enumerate() {
                    builder.push_record([
                        (i + 1).to_string(),
                        entry.key().to_string(),
                        entry.sources().len().to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(kb.topic_keys().collect::<Vec<_>>().join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}
