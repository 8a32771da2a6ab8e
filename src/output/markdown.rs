//! Markdown to ANSI text for review prose.
//!
//! Walks pulldown-cmark events and emits colored lines. Covers what
//! reviews actually contain: headings, emphasis, inline and fenced code,
//! lists, block quotes, links, rules, and simple tables.

use colored::Colorize;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

const RULE_WIDTH: usize = 40;
const CODE_INDENT: &str = "    ";

/// Render markdown source as terminal text. Returns an empty string for
/// empty input; never ends with a newline.
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
    let mut state = RenderState::default();
    for event in Parser::new_ext(source, options) {
        state.handle(event);
    }
    state.finish()
}

#[derive(Default)]
struct RenderState {
    out: String,
    line: String,
    line_started: bool,
    needs_blank: bool,

    strong: usize,
    emphasis: usize,
    strikethrough: usize,
    heading: Option<HeadingLevel>,
    link_url: Option<String>,

    /// One entry per open list; `Some(n)` is the next ordered number.
    lists: Vec<Option<u64>>,
    quote_depth: usize,

    in_code_block: bool,
    code_buffer: String,
    code_language: Option<String>,

    in_table_head: bool,
    table_cell: usize,
}

impl RenderState {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    self.code_buffer.push_str(&text);
                } else {
                    self.push_styled(&text);
                }
            }
            Event::Code(code) => {
                self.begin_line();
                self.line.push_str(&code.yellow().to_string());
            }
            Event::Html(html) | Event::InlineHtml(html) => self.push_styled(&html),
            Event::SoftBreak => self.push_styled(" "),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.block_gap();
                self.begin_line();
                self.line.push_str(&"─".repeat(RULE_WIDTH).dimmed().to_string());
                self.flush_line();
                self.needs_blank = true;
            }
            Event::TaskListMarker(checked) => {
                self.begin_line();
                self.line.push_str(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Tight list items put text right after the marker.
                if !self.line_started {
                    self.block_gap();
                }
            }
            Tag::Heading { level, .. } => {
                self.block_gap();
                self.heading = Some(level);
            }
            Tag::CodeBlock(kind) => {
                self.flush_line();
                self.block_gap();
                self.in_code_block = true;
                self.code_buffer.clear();
                self.code_language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
            }
            Tag::List(start) => {
                if self.line_started {
                    self.flush_line();
                } else if self.lists.is_empty() {
                    self.block_gap();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                self.begin_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}.");
                        *n += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.line.push_str(&format!("{indent}{} ", marker.cyan()));
            }
            Tag::BlockQuote(_) => {
                if self.quote_depth == 0 {
                    self.block_gap();
                }
                self.quote_depth += 1;
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strikethrough += 1,
            Tag::Link { dest_url, .. } => self.link_url = Some(dest_url.to_string()),
            Tag::Table(_) => self.block_gap(),
            Tag::TableHead => {
                self.in_table_head = true;
                self.table_cell = 0;
            }
            Tag::TableRow => self.table_cell = 0,
            Tag::TableCell => {
                self.begin_line();
                if self.table_cell > 0 {
                    self.line.push_str(&" │ ".dimmed().to_string());
                }
                self.table_cell += 1;
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::Heading(_) => {
                self.flush_line();
                self.heading = None;
                self.needs_blank = true;
            }
            TagEnd::CodeBlock => self.end_code_block(),
            TagEnd::List(_) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.needs_blank = true;
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.needs_blank = true;
            }
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.strikethrough = self.strikethrough.saturating_sub(1),
            TagEnd::Link => {
                if let Some(url) = self.link_url.take() {
                    if !url.is_empty() {
                        self.line.push_str(&format!(" ({url})").dimmed().to_string());
                    }
                }
            }
            TagEnd::TableHead => {
                self.flush_line();
                self.in_table_head = false;
            }
            TagEnd::TableRow => self.flush_line(),
            TagEnd::Table => self.needs_blank = true,
            _ => {}
        }
    }

    fn end_code_block(&mut self) {
        self.in_code_block = false;
        if let Some(lang) = self.code_language.take() {
            self.begin_line();
            self.line.push_str(&format!("{CODE_INDENT}{}", lang.dimmed()));
            self.flush_line();
        }
        let code = std::mem::take(&mut self.code_buffer);
        for code_line in code.trim_end_matches('\n').lines() {
            self.begin_line();
            self.line.push_str(CODE_INDENT);
            self.line.push_str(&code_line.green().to_string());
            self.flush_line();
        }
        self.needs_blank = true;
    }

    fn push_styled(&mut self, text: &str) {
        self.begin_line();
        let mut styled = text.normal();
        match self.heading {
            Some(HeadingLevel::H1) => styled = styled.bold().underline().cyan(),
            Some(_) => styled = styled.bold().cyan(),
            None => {}
        }
        if self.strong > 0 || self.in_table_head {
            styled = styled.bold();
        }
        if self.emphasis > 0 {
            styled = styled.italic();
        }
        if self.strikethrough > 0 {
            styled = styled.strikethrough();
        }
        if self.link_url.is_some() {
            styled = styled.underline().blue();
        }
        self.line.push_str(&styled.to_string());
    }

    /// Start a line, writing the block quote prefix.
    fn begin_line(&mut self) {
        if self.line_started {
            return;
        }
        self.line_started = true;
        for _ in 0..self.quote_depth {
            self.line.push_str(&"│ ".dimmed().to_string());
        }
    }

    fn flush_line(&mut self) {
        if !self.line_started {
            return;
        }
        self.out.push_str(self.line.trim_end());
        self.out.push('\n');
        self.line.clear();
        self.line_started = false;
    }

    /// Separate blocks by one blank line.
    fn block_gap(&mut self) {
        self.flush_line();
        if self.needs_blank && !self.out.is_empty() {
            if self.quote_depth > 0 {
                self.out.push_str(&"│".dimmed().to_string());
            }
            self.out.push('\n');
        }
        self.needs_blank = false;
    }

    fn finish(mut self) -> String {
        self.flush_line();
        let trimmed = self.out.trim_end_matches('\n').len();
        self.out.truncate(trimmed);
        self.out
    }
}
