//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use glucoqa_domain::Role;

/// Glucoqa - Evidence-based diabetes Q&A from the command line.
#[derive(Debug, Parser)]
#[command(name = "glucoqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GLUCOQA_CONFIG")]
    pub config: Option<String>,

    /// Who is asking (overrides the configured default role)
    #[arg(short, long, value_enum, global = true)]
    pub role: Option<RoleArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Text and tables (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (answer text or keys only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a question
    Ask(AskArgs),

    /// Ask one of the preset quick questions
    Quick(QuickArgs),

    /// List knowledge-base topics in match order
    Topics,

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question text (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    /// Question as a single string.
    pub fn text(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for the quick command.
#[derive(Debug, Parser)]
pub struct QuickArgs {
    /// Preset question
    #[arg(value_enum)]
    pub preset: PresetArg,
}

/// Role argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RoleArg {
    /// Person living with diabetes
    Patient,
    /// Clinician or other care provider
    #[value(alias = "hcp")]
    HealthcareProfessional,
    /// Family member or carer
    Caregiver,
    /// Learner
    Student,
}

/// Preset quick questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Blood sugar targets
    Targets,
    /// First-line medication
    Medication,
    /// Diet advice
    Diet,
    /// Exercise guidelines
    Exercise,
    /// What HbA1c means
    Hba1c,
    /// Common symptoms
    Symptoms,
}

impl PresetArg {
    /// Parse a preset name (REPL use).
    pub fn parse(s: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(s, true).ok()
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Patient => Role::Patient,
            RoleArg::HealthcareProfessional => Role::HealthcareProfessional,
            RoleArg::Caregiver => Role::Caregiver,
            RoleArg::Student => Role::Student,
        }
    }
}
