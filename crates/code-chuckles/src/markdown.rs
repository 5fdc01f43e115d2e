//! Markdown in chat messages, rendered for the terminal.
//!
//! Emphasis, strong text, links and headings become text styles, code
//! spans and code blocks are highlighted, list items get bullets. Soft
//! breaks are kept as line breaks, since jokes are often laid out line by
//! line.

use owo_colors::{OwoColorize, Style};
use pulldown_cmark::{Event, Parser, Tag};

const CODE_INDENT: &str = "  ";
const RULE: &str = "───";

/// Renders `text` into styled lines. `base` applies to all of the text.
pub fn render_lines(text: &str, base: Style) -> Vec<String> {
    let mut writer = LineWriter::new(base);
    for event in Parser::new(text) {
        writer.handle(event);
    }
    writer.finish()
}

struct LineWriter {
    base: Style,
    lines: Vec<String>,
    current: String,
    strong: usize,
    emphasis: usize,
    link: usize,
    quote: usize,
    heading: bool,
    in_code_block: bool,
    // Next number of each open list, `None` for bullet lists.
    lists: Vec<Option<u64>>,
}

impl LineWriter {
    fn new(base: Style) -> Self {
        Self {
            base,
            lines: Vec::new(),
            current: String::new(),
            strong: 0,
            emphasis: 0,
            link: 0,
            quote: 0,
            heading: false,
            in_code_block: false,
            lists: Vec::new(),
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => self.push_code(&text),
            Event::Text(text) => self.push(&text, LineWriter::style(self)),
            Event::Code(code) => {
                self.push(&code, LineWriter::style(self).bright_yellow())
            }
            Event::Html(html) => {
                self.push(html.trim_end_matches('\n'), LineWriter::style(self))
            }
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.start_block();
                self.lines.push(styled(RULE, self.base.dimmed()));
            }
            Event::TaskListMarker(done) => {
                self.push(if done { "[x] " } else { "[ ] " }, LineWriter::style(self))
            }
            Event::FootnoteReference(name) => {
                self.push(&format!("[^{name}]"), LineWriter::style(self))
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.start_block();
                }
            }
            Tag::Heading(..) => {
                self.start_block();
                self.heading = true;
            }
            Tag::BlockQuote => {
                self.start_block();
                self.quote += 1;
            }
            Tag::CodeBlock(_) => {
                self.start_block();
                self.in_code_block = true;
            }
            Tag::List(first) => {
                if self.lists.is_empty() {
                    self.start_block();
                } else {
                    self.flush();
                }
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let bullet = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let bullet = format!("{number}. ");
                        *number += 1;
                        bullet
                    }
                    _ => "• ".to_owned(),
                };
                self.current = format!("{}{bullet}", "  ".repeat(depth));
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Link(..) => self.link += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph | Tag::Item => self.flush(),
            Tag::Heading(..) => {
                self.flush();
                self.heading = false;
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote = self.quote.saturating_sub(1);
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.in_code_block = false;
            }
            Tag::List(_) => {
                self.lists.pop();
            }
            Tag::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            Tag::Strong => self.strong = self.strong.saturating_sub(1),
            Tag::Link(..) => self.link = self.link.saturating_sub(1),
            _ => {}
        }
    }

    fn style(&self) -> Style {
        let mut style = self.base;
        if self.strong > 0 || self.heading {
            style = style.bold();
        }
        if self.emphasis > 0 {
            style = style.italic();
        }
        if self.link > 0 || self.heading {
            style = style.underline();
        }
        if self.quote > 0 {
            style = style.dimmed();
        }
        style
    }

    fn push(&mut self, text: &str, style: Style) {
        if self.current.is_empty() && self.quote > 0 {
            self.current.push_str(&styled("│ ", self.base.dimmed()));
        }
        self.current.push_str(&styled(text, style));
    }

    fn push_code(&mut self, text: &str) {
        let style = self.base.bright_yellow();
        for line in text.lines() {
            self.lines.push(format!("{CODE_INDENT}{}", styled(line, style)));
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
    }

    /// Separates a new block from the previous one with a blank line.
    fn start_block(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        while self.lines.last().is_some_and(String::is_empty) {
            self.lines.pop();
        }
        self.lines
    }
}

fn styled(text: &str, style: Style) -> String {
    if style.is_plain() {
        text.to_owned()
    } else {
        text.style(style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Vec<String> {
        render_lines(text, Style::new())
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            plain("Knock knock.\nRace condition."),
            ["Knock knock.", "Race condition."]
        );
        assert!(plain("").is_empty());
    }

    #[test]
    fn test_inline_styles() {
        let lines = plain("It *works* on **my** machine");
        assert_eq!(
            lines,
            [format!(
                "It {} on {} machine",
                "works".style(Style::new().italic()),
                "my".style(Style::new().bold()),
            )]
        );
    }

    #[test]
    fn test_code_span() {
        let lines = plain("Just `rm` it");
        assert_eq!(
            lines,
            [format!(
                "Just {} it",
                "rm".style(Style::new().bright_yellow())
            )]
        );
    }

    #[test]
    fn test_code_block() {
        let lines =
            plain("Behold:\n\n```rust\nloop {}\nunreachable!()\n```\n");
        let code = Style::new().bright_yellow();
        assert_eq!(
            lines,
            [
                "Behold:".to_owned(),
                String::new(),
                format!("  {}", "loop {}".style(code)),
                format!("  {}", "unreachable!()".style(code)),
            ]
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(plain("- tabs\n- spaces"), ["• tabs", "• spaces"]);
        assert_eq!(plain("1. push\n2. pray"), ["1. push", "2. pray"]);
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            plain("Why do Java developers wear glasses?\n\nThey don't C#."),
            ["Why do Java developers wear glasses?", "", "They don't C#."]
        );
    }
}
