//! Line builder for HCL output.

/// Indentation unit used by `terraform fmt`.
const INDENT: &str = "  ";

/// Fluent builder that keeps track of block nesting and indentation.
///
/// ```
/// use teamsync_core::render::HclBuilder;
///
/// let hcl = HclBuilder::new()
///     .block("resource \"grafana_team\" \"ops\"", |b| {
///         b.attrs(&[("name", "\"Ops\"".to_string())])
///     })
///     .build();
///
/// assert_eq!(hcl, "resource \"grafana_team\" \"ops\" {\n  name = \"Ops\"\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HclBuilder {
    indent_level: usize,
    buffer: String,
}

impl HclBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line at the current indentation.
    pub fn line(mut self, s: &str) -> Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add an empty line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Add a `#` comment line.
    pub fn comment(self, text: &str) -> Self {
        self.line(&format!("# {}", text))
    }

    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add `header {`, the body produced by `f`, and the closing `}`.
    pub fn block<F>(self, header: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(&format!("{} {{", header)).indent();
        f(builder).dedent().line("}")
    }

    /// Add `key = value` lines with the `=` signs aligned.
    pub fn attrs(self, attrs: &[(&str, String)]) -> Self {
        let width = attrs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        attrs.iter().fold(self, |b, (key, value)| {
            b.line(&format!("{:<width$} = {}", key, value, width = width))
        })
    }

    /// Run `f` once per item, threading the builder through.
    pub fn each<T, I, F>(self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

/// Quote `s` as an HCL string literal.
///
/// Escapes backslashes, double quotes and control characters, and turns
/// `${` / `%{` into their literal forms so names are never interpreted as
/// template sequences.
pub fn quote(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    escaped.push('"');
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped.replace("${", "$${").replace("%{", "%%{")
}
