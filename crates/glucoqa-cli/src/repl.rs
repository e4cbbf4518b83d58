//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Anything that is not a recognised command is asked as a question, so
//! "history of insulin" is a question while "history 3" is a command.

use crate::cli::PresetArg;
use crate::commands;
use crate::config::{self, Config};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use glucoqa_domain::Role;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL for one session.
pub fn run_repl(session: &mut Session, config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Glucoqa - ask a diabetes question, 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(readline_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(readline_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("glucoqa ({})> ", session.role());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, session, config, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Ask(String),
    Quick(PresetArg),
    ShowRole,
    SetRole(Role),
    History(Option<usize>),
    Topics,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let rest = &parts[1..];
    let command = match (parts[0], rest.len()) {
        ("exit" | "quit" | "q", 0) => ReplCommand::Exit,
        ("help" | "?", 0) => ReplCommand::Help,
        ("topics", 0) => ReplCommand::Topics,
        ("history", 0) => ReplCommand::History(None),
        ("history", 1) => match rest[0].parse() {
            Ok(n) => ReplCommand::History(Some(n)),
            Err(_) => ReplCommand::Ask(line.to_string()),
        },
        ("role", 0) => ReplCommand::ShowRole,
        ("role", _) => match Role::parse(&rest.join(" ")) {
            Some(role) => ReplCommand::SetRole(role),
            None => ReplCommand::Ask(line.to_string()),
        },
        ("quick", 0) => {
            return Err(CliError::InvalidInput(
                "Usage: quick <targets|medication|diet|exercise|hba1c|symptoms>".to_string(),
            ))
        }
        ("quick", 1) => match PresetArg::parse(rest[0]) {
            Some(preset) => ReplCommand::Quick(preset),
            None => {
                return Err(CliError::InvalidInput(format!(
                    "Unknown quick question: {}",
                    rest[0]
                )))
            }
        },
        ("ask", 0) => {
            return Err(CliError::InvalidInput("Usage: ask <question>".to_string()));
        }
        // Keep the question exactly as typed after the keyword
        ("ask", _) => ReplCommand::Ask(line.trim_start()["ask".len()..].trim_start().to_string()),
        _ => ReplCommand::Ask(line.to_string()),
    };

    Ok(command)
}

/// Execute a REPL command.
fn execute_repl_command(
    cmd: ReplCommand,
    session: &mut Session,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Ask(question) => commands::execute_ask(&question, session, formatter)?,
        ReplCommand::Quick(preset) => commands::execute_quick(preset, session, formatter)?,
        ReplCommand::ShowRole => {
            println!("Current role: {}", formatter.success(session.role().as_str()));
            let roles: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
            println!("  Available: {}", roles.join(", "));
        }
        ReplCommand::SetRole(role) => {
            session.set_role(role);
            println!("{}", formatter.success(&format!("Role set to {}", role)));
        }
        ReplCommand::History(count) => {
            let count = count.unwrap_or(config.settings.recent_limit);
            commands::execute_history(session.log(), count, formatter)?;
        }
        ReplCommand::Topics => commands::execute_topics(session.knowledge_base(), formatter)?,
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn readline_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to initialize editor: {}", e),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = config::data_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <question>                     - Ask a question (any other input)");
    println!("  ask <question>                 - Ask a question explicitly");
    println!("  quick <preset>                 - Ask a preset question");
    println!("    preset: targets|medication|diet|exercise|hba1c|symptoms");
    println!("  role [name]                    - Show or switch role");
    println!("    name: patient|healthcare-professional|caregiver|student");
    println!("  history [n]                    - Show the last n questions, newest first");
    println!("  topics                         - List topics in match order");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse_repl_command("What is HbA1c?").unwrap(),
            ReplCommand::Ask("What is HbA1c?".to_string())
        );
    }

    #[test]
    fn test_explicit_ask() {
        assert_eq!(
            parse_repl_command("ask diet   tips").unwrap(),
            ReplCommand::Ask("diet   tips".to_string())
        );
        assert_eq!(
            parse_repl_command("ask\tWhat  is HbA1c?").unwrap(),
            ReplCommand::Ask("What  is HbA1c?".to_string())
        );
        assert!(parse_repl_command("ask").is_err());
    }

    #[test]
    fn test_exit_and_help() {
        assert_eq!(parse_repl_command("exit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("q").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("?").unwrap(), ReplCommand::Help);
        // Only bare keywords are commands
        assert_eq!(
            parse_repl_command("help with diet").unwrap(),
            ReplCommand::Ask("help with diet".to_string())
        );
    }

    #[test]
    fn test_history_command() {
        assert_eq!(parse_repl_command("history").unwrap(), ReplCommand::History(None));
        assert_eq!(parse_repl_command("history 3").unwrap(), ReplCommand::History(Some(3)));
        assert_eq!(
            parse_repl_command("history of insulin").unwrap(),
            ReplCommand::Ask("history of insulin".to_string())
        );
    }

    #[test]
    fn test_role_command() {
        assert_eq!(parse_repl_command("role").unwrap(), ReplCommand::ShowRole);
        assert_eq!(
            parse_repl_command("role Healthcare Professional").unwrap(),
            ReplCommand::SetRole(Role::HealthcareProfessional)
        );
        assert_eq!(
            parse_repl_command("role student").unwrap(),
            ReplCommand::SetRole(Role::Student)
        );
        assert_eq!(
            parse_repl_command("role of exercise").unwrap(),
            ReplCommand::Ask("role of exercise".to_string())
        );
    }

    #[test]
    fn test_quick_command() {
        assert_eq!(
            parse_repl_command("quick symptoms").unwrap(),
            ReplCommand::Quick(PresetArg::Symptoms)
        );
        assert!(parse_repl_command("quick").is_err());
        assert!(parse_repl_command("quick lunch").is_err());
    }

    #[test]
    fn test_topics_command() {
        assert_eq!(parse_repl_command("topics").unwrap(), ReplCommand::Topics);
    }
}
