//! History command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use glucoqa_domain::ConversationLog;

/// Execute the history command: show the last `count` questions, newest first.
pub fn execute_history(log: &ConversationLog, count: usize, formatter: &Formatter) -> Result<()> {
    if count == 0 {
        return Err(CliError::InvalidInput(
            "History count must be greater than 0".to_string(),
        ));
    }

    println!("{}", formatter.format_history(&log.recent(count))?);
    if log.len() > count {
        println!(
            "{}",
            formatter.info(&format!("Showing {} of {} questions", count, log.len()))
        );
    }
    Ok(())
}
