//! Topics command implementation.

use crate::error::Result;
use crate::output::Formatter;
use glucoqa_domain::KnowledgeBase;

/// Execute the topics command.
pub fn execute_topics(kb: &KnowledgeBase, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_topics(kb)?);
    Ok(())
}
