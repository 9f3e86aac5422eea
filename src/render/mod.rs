//! Terminal output for the chat.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything the user sees goes through [`Printer`], which writes to any
//! `io::Write`. Tests capture output in a `Vec<u8>`; the binary hands it
//! stdout. Diagnostics go through `tracing` to stderr instead.

pub mod chart;
pub mod markdown;

use std::io::{self, Write};
use std::path::PathBuf;

use crate::chat::{ChatSession, EXAMPLE_PROMPTS, Message, Role};

pub use markdown::render_markdown;

/// How assistant messages are presented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Where chart images are written. `None` only reports their size.
    pub chart_dir: Option<PathBuf>,
    /// Print markdown verbatim instead of rendering it.
    pub raw: bool,
}

/// Whether a chart is written to disk or only pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartOutput {
    Save,
    Reference,
}

/// Drop control characters other than newline and tab so remote text cannot
/// drive the terminal (ESC sequences, bells, carriage returns).
#[must_use]
pub fn sanitize_terminal_text(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

pub struct Printer<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self { out, options }
    }

    /// Consume the printer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Title, greeting, and (before the first question) the example prompts.
    pub fn banner(&mut self, session: &ChatSession) -> io::Result<()> {
        writeln!(self.out, "AI Financial Analyst")?;
        writeln!(self.out, "Type a question and press Enter. /help lists commands.")?;
        writeln!(self.out)?;
        for (index, message) in session.messages().iter().enumerate() {
            self.message(index, message)?;
        }
        if session.shows_examples() {
            self.examples()?;
        }
        self.out.flush()
    }

    pub fn message(&mut self, index: usize, message: &Message) -> io::Result<()> {
        self.write_message(index, message, ChartOutput::Save)
    }

    /// Every message in the session, in order. Charts already written are
    /// referenced, not written again.
    pub fn transcript(&mut self, session: &ChatSession) -> io::Result<()> {
        for (index, message) in session.messages().iter().enumerate() {
            self.write_message(index, message, ChartOutput::Reference)?;
        }
        Ok(())
    }

    fn write_message(&mut self, index: usize, message: &Message, charts: ChartOutput) -> io::Result<()> {
        let text = sanitize_terminal_text(&message.text);
        match message.role {
            Role::User => writeln!(self.out, "[you] {text}")?,
            Role::Assistant => {
                writeln!(self.out, "[analyst]")?;
                if self.options.raw {
                    writeln!(self.out, "{}", text.trim_end())?;
                } else {
                    writeln!(self.out, "{}", render_markdown(&text))?;
                }
                if let Some(encoded) = message.chart_image.as_deref().filter(|c| !c.trim().is_empty()) {
                    self.chart(index, encoded, charts)?;
                }
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn examples(&mut self) -> io::Result<()> {
        writeln!(self.out, "Try an example:")?;
        for (number, example) in EXAMPLE_PROMPTS.iter().enumerate() {
            writeln!(self.out, "  /example {}  {} {}", number + 1, example.title, example.subtitle)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "Commands:")?;
        writeln!(self.out, "  /help          - Show this help")?;
        writeln!(self.out, "  /history       - Print the conversation so far")?;
        writeln!(self.out, "  /examples      - List example questions")?;
        writeln!(self.out, "  /example <n>   - Ask example question n")?;
        writeln!(self.out, "  /quit          - Exit")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }

    /// Echo a question the user did not type themselves.
    pub fn echo(&mut self, question: &str) -> io::Result<()> {
        writeln!(self.out, "{question}")?;
        self.out.flush()
    }

    pub fn thinking(&mut self) -> io::Result<()> {
        writeln!(self.out, "... thinking")?;
        self.out.flush()
    }

    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "({text})")?;
        self.out.flush()
    }

    fn chart(&mut self, index: usize, encoded: &str, charts: ChartOutput) -> io::Result<()> {
        let Some(dir) = &self.options.chart_dir else {
            return match chart::decode_chart(encoded) {
                Ok(bytes) => writeln!(
                    self.out,
                    "[chart image: {} bytes; pass --chart-dir to save it]",
                    bytes.len()
                ),
                Err(err) => writeln!(self.out, "[{err}]"),
            };
        };
        if charts == ChartOutput::Reference {
            let path = dir.join(chart::chart_file_name(index));
            return writeln!(self.out, "[chart at {}]", path.display());
        }
        match chart::save_chart(dir, index, encoded) {
            Ok(path) => writeln!(self.out, "[chart saved to {}]", path.display()),
            Err(err) => {
                tracing::warn!(error = %err, "chart not saved");
                writeln!(self.out, "[{err}]")
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
