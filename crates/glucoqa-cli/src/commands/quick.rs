//! Quick question command implementation.

use super::ask::execute_ask;
use crate::cli::PresetArg;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Question text asked for each preset.
pub fn preset_question(preset: PresetArg) -> &'static str {
    match preset {
        PresetArg::Targets => "What are normal blood sugar levels?",
        PresetArg::Medication => "What is first-line medication for type 2 diabetes?",
        PresetArg::Diet => "What should I eat with diabetes?",
        PresetArg::Exercise => "How much exercise for diabetes?",
        PresetArg::Hba1c => "What is HbA1c?",
        PresetArg::Symptoms => "What are diabetes symptoms?",
    }
}

/// Execute the quick command.
pub fn execute_quick(preset: PresetArg, session: &mut Session, formatter: &Formatter) -> Result<()> {
    execute_ask(preset_question(preset), session, formatter)
}
