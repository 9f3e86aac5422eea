//! Interactive chat loop.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads one line at a time and turns it into either a slash command or a
//! question. While a question is in flight the loop keeps reading input so
//! it can refuse it: lines typed during loading are discarded, never queued.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::analyst::AnalystApi;
use crate::chat::ChatSession;
use crate::render::Printer;

#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("question is empty")]
    EmptyQuestion,
    #[error("the analyst service could not answer the question")]
    QuestionFailed,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Blank,
    Help,
    History,
    Examples,
    Example(usize),
    Quit,
    Unknown(&'a str),
    Question(&'a str),
}

impl<'a> Input<'a> {
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Blank;
        }
        let Some(command) = trimmed.strip_prefix('/') else {
            return Self::Question(trimmed);
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("help"), None, _) => Self::Help,
            (Some("history"), None, _) => Self::History,
            (Some("examples"), None, _) => Self::Examples,
            (Some("example"), Some(number), None) => match number.parse() {
                Ok(number) => Self::Example(number),
                Err(_) => Self::Unknown(trimmed),
            },
            (Some("quit" | "exit"), None, _) => Self::Quit,
            _ => Self::Unknown(trimmed),
        }
    }
}

/// Run the chat until `/quit` or end of input.
///
/// # Errors
///
/// Returns an error only when reading input or writing output fails. Failed
/// questions are reported inside the chat.
pub async fn run<A, R, W>(
    api: &A,
    session: &mut ChatSession,
    printer: &mut Printer<W>,
    input: R,
) -> Result<(), ReplError>
where
    A: AnalystApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    printer.banner(session)?;

    loop {
        printer.prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input_open = match Input::parse(&line) {
            Input::Blank => true,
            Input::Help => {
                printer.help()?;
                true
            }
            Input::History => {
                printer.transcript(session)?;
                true
            }
            Input::Examples => {
                printer.examples()?;
                true
            }
            Input::Example(number) => match ChatSession::example(number) {
                Some(example) => {
                    printer.echo(example.question)?;
                    ask(api, session, printer, &mut lines, example.question).await?
                }
                None => {
                    printer.notice(&format!("no example {number}; try /examples"))?;
                    true
                }
            },
            Input::Quit => break,
            Input::Unknown(command) => {
                printer.notice(&format!("unknown command {command}; try /help"))?;
                true
            }
            Input::Question(question) => ask(api, session, printer, &mut lines, question).await?,
        };

        if !input_open {
            break;
        }
    }

    tracing::debug!(messages = session.messages().len(), "chat ended");
    Ok(())
}

/// Run one turn while draining input. Returns `false` once input has ended.
async fn ask<A, R, W>(
    api: &A,
    session: &mut ChatSession,
    printer: &mut Printer<W>,
    lines: &mut Lines<R>,
    question: &str,
) -> Result<bool, ReplError>
where
    A: AnalystApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let Some(request) = session.begin_turn(question) else {
        return Ok(true);
    };
    tracing::info!(question = %request.question, history = request.chat_history.len(), "question sent");
    printer.thinking()?;

    let reply = api.ask(&request);
    tokio::pin!(reply);
    let mut input_open = true;
    let mut input_error = None;

    let result = loop {
        tokio::select! {
            biased;
            result = &mut reply => break result,
            line = lines.next_line(), if input_open => match line {
                Ok(Some(line)) if !line.trim().is_empty() => {
                    tracing::debug!("input discarded while loading");
                    if let Err(err) = printer.notice("input disabled while loading; wait for the answer") {
                        input_error = Some(err);
                        input_open = false;
                    }
                }
                Ok(Some(_)) => {}
                Ok(None) => input_open = false,
                Err(err) => {
                    input_error = Some(err);
                    input_open = false;
                }
            },
        }
    };

    // The pending turn always settles before an input error surfaces.
    let index = session.finish_turn(result);
    printer.message(index, &session.messages()[index])?;
    if let Some(err) = input_error {
        return Err(err.into());
    }
    Ok(input_open)
}

/// Ask a single question outside the interactive loop and print the answer.
///
/// # Errors
///
/// Returns [`ReplError::EmptyQuestion`] for blank input and
/// [`ReplError::QuestionFailed`] when the service call failed. The failure
/// is still printed as the chat's error message first.
pub async fn ask_once<A, W>(
    api: &A,
    session: &mut ChatSession,
    printer: &mut Printer<W>,
    question: &str,
) -> Result<(), ReplError>
where
    A: AnalystApi + ?Sized,
    W: Write,
{
    let Some(request) = session.begin_turn(question) else {
        return Err(ReplError::EmptyQuestion);
    };
    let result = api.ask(&request).await;
    let failed = result.is_err();

    let index = session.finish_turn(result);
    printer.message(index, &session.messages()[index])?;

    if failed {
        return Err(ReplError::QuestionFailed);
    }
    Ok(())
}

#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;
