//! Markdown to plain terminal text.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Render model markdown as plain text for a terminal.
///
/// Raw HTML is dropped. Emphasis markers are removed, headings are
/// underlined, code blocks are indented four spaces, and link targets follow
/// the link text in parentheses.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = TextRenderer::default();
    for event in Parser::new_ext(markdown, options) {
        renderer.event(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct TextRenderer {
    out: String,
    /// One entry per open list: the next number for ordered lists.
    lists: Vec<Option<u64>>,
    links: Vec<String>,
    heading_start: usize,
    in_code_block: bool,
}

impl TextRenderer {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                for line in text.lines() {
                    self.out.push_str("    ");
                    self.out.push_str(line);
                    self.out.push('\n');
                }
            }
            Event::Text(text) => self.out.push_str(&text),
            Event::Code(code) => {
                self.out.push('`');
                self.out.push_str(&code);
                self.out.push('`');
            }
            Event::SoftBreak => self.out.push(' '),
            Event::HardBreak => self.out.push('\n'),
            Event::Rule => {
                self.line_break();
                self.out.push_str("----------");
                self.block_break();
            }
            Event::TaskListMarker(done) => self.out.push_str(if done { "[x] " } else { "[ ] " }),
            // Html, InlineHtml, footnotes, math
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { .. } => self.heading_start = self.out.len(),
            Tag::List(first) => {
                self.line_break();
                self.lists.push(first);
            }
            Tag::Item => {
                self.line_break();
                let depth = self.lists.len().saturating_sub(1);
                self.out.push_str(&"  ".repeat(depth));
                match self.lists.last_mut() {
                    Some(Some(number)) => {
                        self.out.push_str(&format!("{number}. "));
                        *number += 1;
                    }
                    _ => self.out.push_str("- "),
                }
            }
            Tag::CodeBlock(_) => {
                self.line_break();
                self.in_code_block = true;
            }
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => self.links.push(dest_url.into_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Table => self.block_break(),
            TagEnd::Heading(level) => {
                let width = self.out[self.heading_start..].chars().count();
                let underline = if level == HeadingLevel::H1 { "=" } else { "-" };
                self.out.push('\n');
                self.out.push_str(&underline.repeat(width));
                self.block_break();
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.block_break();
            }
            TagEnd::Item => self.line_break(),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.block_break();
            }
            TagEnd::Link | TagEnd::Image => {
                if let Some(url) = self.links.pop() {
                    if !self.out.ends_with(url.as_str()) {
                        self.out.push_str(&format!(" ({url})"));
                    }
                }
            }
            TagEnd::TableCell => self.out.push_str(" | "),
            TagEnd::TableHead | TagEnd::TableRow => {
                let trimmed = self.out.trim_end_matches(" | ").len();
                self.out.truncate(trimmed);
                self.out.push('\n');
            }
            _ => {}
        }
    }

    /// Start a new line unless already at one.
    fn line_break(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Leave a blank line after a block. Inside lists only a line break.
    fn block_break(&mut self) {
        self.line_break();
        if self.lists.is_empty() && !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn finish(self) -> String {
        self.out.trim_end().to_owned()
    }
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
