//! Conversion of puzzle descriptions from HTML to Markdown

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::sync::LazyLock;

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Convert an HTML fragment to Markdown
///
/// Covers the markup used in puzzle descriptions: headings, paragraphs,
/// emphasis, inline code, preformatted blocks, links, lists, line breaks and
/// rules. Unknown elements contribute their children; scripts and styles are
/// dropped.
///
/// # Example
///
/// ```
/// use aoc_http_client::html_to_markdown;
///
/// let md = html_to_markdown("<h2>--- Day 1 ---</h2><p>Sum is <code><em>142</em></code>.</p>");
/// assert_eq!(md, "## --- Day 1 ---\n\nSum is `142`.");
/// ```
pub fn html_to_markdown(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut writer = MarkdownWriter::default();
    writer.children(fragment.root_element());
    writer.finish()
}

#[derive(Default)]
struct MarkdownWriter {
    out: String,
}

impl MarkdownWriter {
    fn finish(self) -> String {
        BLANK_LINES
            .replace_all(&self.out, "\n\n")
            .trim()
            .to_string()
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    /// Separate what follows from the previous block by one blank line
    fn block_break(&mut self) {
        while self.out.ends_with(' ') {
            self.out.pop();
        }
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    /// Render the children of `element` on their own, without block breaks
    /// leaking into the current output
    fn inline(element: ElementRef<'_>) -> String {
        let mut sub = MarkdownWriter::default();
        sub.children(element);
        sub.out
    }

    fn children(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.text(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn text(&mut self, text: &str) {
        let collapsed = collapse_whitespace(text);
        let collapsed = if self.at_line_start() || self.out.ends_with(' ') {
            collapsed.trim_start()
        } else {
            collapsed.as_str()
        };
        let escaped = escape(collapsed);
        if self.at_line_start() {
            self.out.push_str(&escape_line_start(&escaped));
        } else {
            self.out.push_str(&escaped);
        }
    }

    fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        match name {
            "script" | "style" | "head" | "title" => {}
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                let content = Self::inline(element);
                self.block_break();
                self.raw(&"#".repeat(level));
                self.raw(" ");
                self.raw(content.trim());
                self.block_break();
            }
            "p" | "div" | "article" | "section" | "main" | "header" | "footer" => {
                self.block_break();
                self.children(element);
                self.block_break();
            }
            "blockquote" => {
                let mut sub = MarkdownWriter::default();
                sub.children(element);
                let quoted = sub
                    .finish()
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                self.block_break();
                self.raw(&quoted);
                self.block_break();
            }
            "br" => self.raw("  \n"),
            "hr" => {
                self.block_break();
                self.raw("---");
                self.block_break();
            }
            "em" | "i" => self.wrap(element, "*"),
            "strong" | "b" => self.wrap(element, "**"),
            "code" | "kbd" | "samp" => self.inline_code(element),
            "pre" => {
                let code = element.text().collect::<String>();
                self.block_break();
                self.raw("```\n");
                self.raw(code.trim_end_matches('\n'));
                self.raw("\n```");
                self.block_break();
            }
            "a" => {
                let content = Self::inline(element);
                match element.value().attr("href") {
                    Some(href) if !content.trim().is_empty() => {
                        self.raw(&format!("[{}]({})", content.trim(), href));
                    }
                    _ => self.raw(&content),
                }
            }
            "ul" => self.list(element, None),
            "ol" => {
                let start = element
                    .value()
                    .attr("start")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1);
                self.list(element, Some(start));
            }
            "li" => {
                self.block_break();
                self.list_item(element, "- ");
                self.block_break();
            }
            _ => self.children(element),
        }
    }

    /// Surround the element's content with `marker`, keeping surrounding
    /// whitespace outside of it
    fn wrap(&mut self, element: ElementRef<'_>, marker: &str) {
        let content = Self::inline(element);
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return;
        }
        let text = element.text().collect::<String>();
        if text.starts_with(char::is_whitespace)
            && !self.at_line_start()
            && !self.out.ends_with(' ')
        {
            self.raw(" ");
        }
        self.raw(marker);
        self.raw(trimmed);
        self.raw(marker);
        if text.ends_with(char::is_whitespace) {
            self.raw(" ");
        }
    }

    fn inline_code(&mut self, element: ElementRef<'_>) {
        let code = element.text().collect::<String>().replace('\n', " ");
        if code.is_empty() {
            return;
        }
        if code.contains('`') {
            self.raw(&format!("`` {code} ``"));
        } else {
            self.raw(&format!("`{code}`"));
        }
    }

    /// Render a list; `start` is the first number of an ordered list
    fn list(&mut self, element: ElementRef<'_>, start: Option<usize>) {
        self.block_break();
        let items = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li");

        for (i, item) in items.enumerate() {
            let marker = match start {
                Some(start) => format!("{}. ", start + i),
                None => "- ".to_string(),
            };
            self.list_item(item, &marker);
            self.raw("\n");
        }
        self.block_break();
    }

    /// Render one item, indenting continuation lines under the marker
    fn list_item(&mut self, item: ElementRef<'_>, marker: &str) {
        let mut sub = MarkdownWriter::default();
        sub.children(item);
        let body = sub.finish();
        let indent = " ".repeat(marker.len());

        self.raw(marker);
        for (n, line) in body.lines().enumerate() {
            if n > 0 {
                self.raw("\n");
                if !line.is_empty() {
                    self.raw(&indent);
                }
            }
            self.raw(line);
        }
    }
}

/// Replace every whitespace run with a single space
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    if pending_space {
        out.push(' ');
    }
    out
}

/// Backslash-escape characters Markdown would treat as markup
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Backslash-escape a list, heading or quote marker opening a line
fn escape_line_start(text: &str) -> String {
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && matches!(text[digits..].chars().next(), Some('.' | ')')) {
        return format!("{}\\{}", &text[..digits], &text[digits..]);
    }
    match text.chars().next() {
        Some('-' | '+' | '#' | '>') => format!("\\{text}"),
        _ => text.to_string(),
    }
}
