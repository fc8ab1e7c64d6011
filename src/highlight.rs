//! Syntax highlighted HTML with line numbers and line anchors.
//!
//! Every source line is rendered as its own
//! `<span class="line" id="line-N">` element. Highlight spans that cross a
//! line break are closed at the end of the line and reopened on the next
//! one, so each line is well-formed HTML on its own and can be linked to.

use {
    crate::{config::Config, language::Language, utils},
    std::collections::BTreeMap,
    thiserror::Error,
    tree_sitter::QueryError,
    tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter},
};

/// Capture names recognized in highlight queries, in the order their
/// indices are reported by the highlighter.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "boolean",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "escape",
    "function",
    "function.builtin",
    "function.method",
    "keyword",
    "label",
    "module",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

const DEFAULT_THEME: &[(&str, &str)] = &[
    ("attribute", "color: #aa22ff"),
    ("boolean", "color: #008000"),
    ("comment", "color: #3d7b7b; font-style: italic"),
    ("constant", "color: #880000"),
    ("constant.builtin", "color: #008000"),
    ("constructor", "color: #0000ff"),
    ("escape", "color: #aa5d1f; font-weight: bold"),
    ("function", "color: #0000ff"),
    ("function.builtin", "color: #008000"),
    ("function.method", "color: #0000ff"),
    ("keyword", "color: #008000; font-weight: bold"),
    ("module", "color: #0000ff; font-weight: bold"),
    ("number", "color: #666666"),
    ("operator", "color: #666666"),
    ("property", "color: #687822"),
    ("string", "color: #ba2121"),
    ("string.special", "color: #a45a77"),
    ("tag", "color: #008000; font-weight: bold"),
    ("type", "color: #b00040"),
    ("type.builtin", "color: #008000"),
    ("variable.builtin", "color: #008000"),
    ("variable.parameter", "color: #19177c"),
];

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("invalid highlight query")]
    Query(#[from] QueryError),
    #[error("highlighting failed")]
    Highlight(#[from] tree_sitter_highlight::Error),
}

#[derive(Debug, Clone)]
pub struct Options<'a> {
    pub line_numbers: bool,
    /// empty disables the `id` attribute on lines
    pub line_anchors: &'a str,
    pub anchor_line_numbers: bool,
}

impl<'a> From<&'a Config> for Options<'a> {
    fn from(config: &'a Config) -> Self {
        Options {
            line_numbers: config.line_numbers,
            line_anchors: &config.line_anchors,
            anchor_line_numbers: config.anchor_line_numbers,
        }
    }
}

impl Default for Options<'_> {
    fn default() -> Self {
        Options {
            line_numbers: true,
            line_anchors: "line",
            anchor_line_numbers: true,
        }
    }
}

/// Renders `text` as highlighted HTML. Without a language the text is
/// rendered plain.
pub fn html(
    text: &str,
    language: Option<Language>,
    options: &Options,
) -> Result<String, HighlightError> {
    let mut writer = HtmlWriter::new(text, options);
    let Some(language) = language else {
        log::debug!("no language, rendering plain text");
        writer.text(text);
        return Ok(writer.finish());
    };

    let mut configuration = HighlightConfiguration::new(
        language.grammar(),
        language.name(),
        language.highlights_query(),
        "",
        "",
    )?;
    configuration.configure(HIGHLIGHT_NAMES);

    let mut highlighter = Highlighter::new();
    let events = highlighter.highlight(&configuration, text.as_bytes(), None, |_| None)?;
    for event in events {
        match event? {
            HighlightEvent::Source { start, end } => writer.text(&text[start..end]),
            HighlightEvent::HighlightStart(highlight) => writer.start(highlight.0),
            HighlightEvent::HighlightEnd => writer.end(),
        }
    }
    Ok(writer.finish())
}

/// CSS rules for line numbers and every highlight name of the theme.
pub fn style_defs(overrides: &BTreeMap<String, String>) -> String {
    let mut theme: BTreeMap<String, String> = DEFAULT_THEME
        .iter()
        .map(|(name, style)| (name.to_string(), style.to_string()))
        .collect();
    theme.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

    let mut css = String::new();
    css.push_str(".highlight pre { line-height: 125%; }\n");
    css.push_str(".highlight .line { display: block; }\n");
    css.push_str(
        ".highlight .lineno { color: #999999; padding-right: 1em; user-select: none; text-decoration: none; }\n",
    );
    for (name, style) in &theme {
        css.push_str(&format!(".highlight .{} {{ {style} }}\n", class_name(name)));
    }
    css
}

fn class_name(highlight_name: &str) -> String {
    format!("hl-{}", highlight_name.replace('.', "-"))
}

struct HtmlWriter<'a> {
    output: String,
    options: &'a Options<'a>,
    /// highlight indices of the currently open spans, outermost first
    stack: Vec<usize>,
    line: usize,
    width: usize,
    in_line: bool,
}

impl<'a> HtmlWriter<'a> {
    fn new(text: &str, options: &'a Options<'a>) -> Self {
        HtmlWriter {
            output: String::with_capacity(text.len() * 3),
            options,
            stack: Vec::new(),
            line: 0,
            width: text.lines().count().max(1).to_string().len(),
            in_line: false,
        }
    }

    fn start(&mut self, highlight: usize) {
        if self.in_line {
            self.open_span(highlight);
        }
        self.stack.push(highlight);
    }

    fn end(&mut self) {
        if self.stack.pop().is_some() && self.in_line {
            self.output.push_str("</span>");
        }
    }

    fn text(&mut self, text: &str) {
        for chunk in text.split_inclusive('\n') {
            if !self.in_line {
                self.begin_line();
            }
            let content = chunk.strip_suffix('\n').unwrap_or(chunk);
            utils::escape_html_into(content, &mut self.output);
            if content.len() < chunk.len() {
                self.end_line();
            }
        }
    }

    fn finish(mut self) -> String {
        if self.in_line {
            self.end_line();
        }
        format!("<div class=\"highlight\"><pre>{}</pre></div>", self.output)
    }

    fn begin_line(&mut self) {
        self.line += 1;
        self.in_line = true;
        let (line, width, anchors) = (self.line, self.width, self.options.line_anchors);

        if anchors.is_empty() {
            self.output.push_str("<span class=\"line\">");
        } else {
            self.output
                .push_str(&format!("<span class=\"line\" id=\"{anchors}-{line}\">"));
        }

        if self.options.line_numbers {
            if self.options.anchor_line_numbers && !anchors.is_empty() {
                self.output.push_str(&format!(
                    "<a class=\"lineno\" href=\"#{anchors}-{line}\">{line:>width$}</a>"
                ));
            } else {
                self.output
                    .push_str(&format!("<span class=\"lineno\">{line:>width$}</span>"));
            }
        }

        for i in 0..self.stack.len() {
            self.open_span(self.stack[i]);
        }
    }

    fn end_line(&mut self) {
        for _ in &self.stack {
            self.output.push_str("</span>");
        }
        self.output.push_str("</span>\n");
        self.in_line = false;
    }

    fn open_span(&mut self, highlight: usize) {
        let name = HIGHLIGHT_NAMES.get(highlight).copied().unwrap_or("unknown");
        self.output
            .push_str(&format!("<span class=\"{}\">", class_name(name)));
    }
}
