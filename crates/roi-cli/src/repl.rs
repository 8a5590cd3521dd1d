//! Interactive chat loop.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use roi_application::{ChatSession, SendOutcome};
use roi_core::catalog;
use roi_core::error::RoiError;

use crate::render;

const COMMANDS: &[&str] = &[
    "/calculate",
    "/clear",
    "/help",
    "/quit",
    "/status",
    "/template",
];

/// Rustyline helper completing and hinting the slash commands.
#[derive(Clone)]
struct ChatHelper;

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ChatHelper {}

fn print_help() {
    println!(
        "{}",
        "Commands: /clear  /calculate  /status  /template  /quit".bright_black()
    );
}

fn print_agent(session: &ChatSession, text: &str) {
    println!("{}", format!("[{}]", session.agent_name()).bright_magenta());
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
    println!();
}

async fn print_outcome(session: &ChatSession, outcome: SendOutcome) {
    if let SendOutcome::Replied { text, ready, .. } = outcome {
        print_agent(session, &text);
        if ready {
            println!(
                "{}",
                "All data collected. Type /calculate to run the ROI calculation.".bright_green()
            );
        } else {
            println!("{}", session.input_hint().await.bright_black());
        }
    }
}

fn print_template(session: &ChatSession) {
    match session.template() {
        Some(template) => {
            println!(
                "{} {}",
                "Template:".bright_magenta(),
                template.file.bright_cyan()
            );
            println!(
                "{}",
                format!(
                    "Fill in {} and paste its contents as your message.",
                    template.download_name
                )
                .bright_black()
            );
        }
        None => println!(
            "{}",
            "Templates are only used with the expert agent.".bright_black()
        ),
    }
}

async fn calculate(session: &ChatSession) {
    println!("{}", "Calculating ROI...".bright_black());
    match session.calculate().await {
        Ok(outcome) => {
            println!("{}", "ROI calculation completed successfully!".bright_green());
            render::print_result(&outcome.result);
            println!(
                "{}",
                format!("Results saved. Next: {}", outcome.next).bright_black()
            );
        }
        Err(RoiError::CalculationFailed(message)) => {
            eprintln!(
                "{}",
                format!("Failed to calculate ROI: {message}. Please try again.").red()
            );
        }
        Err(err) => eprintln!("{}", format!("Error: {err}").red()),
    }
}

/// Runs the chat until `/quit` or end of input.
pub async fn run(session: ChatSession) -> Result<()> {
    let context = session.context();
    println!(
        "{}",
        format!(
            "=== {} · {} ===",
            catalog::display_name(&context.system_id),
            session.agent_name()
        )
        .bright_magenta()
        .bold()
    );
    print_help();
    println!();

    match session.start().await {
        Ok(outcome) => print_outcome(&session, outcome).await,
        Err(err) => {
            tracing::warn!("[roi] Greeting failed: {}", err);
            eprintln!("{}", "Error starting the conversation.".red());
        }
    }

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match trimmed {
                    "/quit" | "/exit" => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    "/help" => print_help(),
                    "/status" => render::print_status(&session.status().await),
                    "/template" => print_template(&session),
                    "/calculate" => calculate(&session).await,
                    "/clear" => match session.clear().await {
                        Ok(outcome) => {
                            println!("{}", "Chat cleared".bright_green());
                            print_outcome(&session, outcome).await;
                        }
                        Err(err) => eprintln!("{}", format!("Error: {err}").red()),
                    },
                    command if command.starts_with('/') => {
                        println!("{}", format!("Unknown command {command}").bright_black());
                    }
                    text => match session.send(text).await {
                        Ok(outcome) => print_outcome(&session, outcome).await,
                        Err(err) => {
                            tracing::warn!("[roi] Turn failed: {}", err);
                            if let Some(turn) = session.transcript().await.last() {
                                eprintln!("{}", turn.content.red());
                            }
                        }
                    },
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
