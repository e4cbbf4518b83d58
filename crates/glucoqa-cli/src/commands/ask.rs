//! Ask command implementation.

use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the ask command: resolve, log and print the answer.
pub fn execute_ask(question: &str, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let record = session.ask(question)?;
    println!("{}", formatter.format_answer(&record)?);
    Ok(())
}
