//! Reply markup
//!
//! The web chat page renders replies as inline HTML; API and terminal
//! clients can ask for plain text instead. Structure (one labeled field
//! per line) is the same in both.

use std::borrow::Cow;

use sales_assistant_config::ReplyFormat;

#[derive(Debug, Clone, Copy)]
pub struct Markup {
    format: ReplyFormat,
}

impl Markup {
    pub fn new(format: ReplyFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ReplyFormat {
        self.format
    }

    /// Escape a value for inclusion in the reply
    pub fn text<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self.format {
            ReplyFormat::Html if value.contains(['&', '<', '>', '"']) => Cow::Owned(
                value
                    .replace('&', "&amp;")
                    .replace('<', "&lt;")
                    .replace('>', "&gt;")
                    .replace('"', "&quot;"),
            ),
            _ => Cow::Borrowed(value),
        }
    }

    pub fn bold(&self, value: &str) -> String {
        match self.format {
            ReplyFormat::Html => format!("<b>{}</b>", self.text(value)),
            ReplyFormat::Plain => value.to_string(),
        }
    }

    pub fn italic(&self, value: &str) -> String {
        match self.format {
            ReplyFormat::Html => format!("<i>{}</i>", self.text(value)),
            ReplyFormat::Plain => value.to_string(),
        }
    }

    pub fn line_break(&self) -> &'static str {
        match self.format {
            ReplyFormat::Html => "<br>",
            ReplyFormat::Plain => "\n",
        }
    }

    pub fn indent(&self) -> &'static str {
        match self.format {
            ReplyFormat::Html => "&nbsp;&nbsp;",
            ReplyFormat::Plain => "  ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html() {
        let markup = Markup::new(ReplyFormat::Html);
        assert_eq!(markup.bold("Alpha Corp"), "<b>Alpha Corp</b>");
        assert_eq!(markup.italic("Next?"), "<i>Next?</i>");
        assert_eq!(markup.text("R&D <team>"), "R&amp;D &lt;team&gt;");
        assert_eq!(markup.line_break(), "<br>");
    }

    #[test]
    fn test_plain() {
        let markup = Markup::new(ReplyFormat::Plain);
        assert_eq!(markup.bold("Alpha Corp"), "Alpha Corp");
        assert_eq!(markup.text("R&D"), "R&D");
        assert_eq!(markup.line_break(), "\n");
        assert_eq!(markup.indent(), "  ");
    }
}
