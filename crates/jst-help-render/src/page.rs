//! HTML page shell for rendered help fragments.

use std::fmt::Write;

/// Closing markup appended after every fragment.
pub const FOOTER: &str = "\n</body>\n\n</html>\n";

/// Fixed document shell around a rendered fragment.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    title: String,
    stylesheet: String,
    body_class: String,
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self {
            title: "JSTColorPicker".to_owned(),
            stylesheet: "../github-markdown.css".to_owned(),
            body_class: "markdown-body".to_owned(),
        }
    }
}

impl PageTemplate {
    /// Create a template with a custom title, stylesheet href and body class.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        stylesheet: impl Into<String>,
        body_class: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            stylesheet: stylesheet.into(),
            body_class: body_class.into(),
        }
    }

    /// Opening markup, up to and including the `<body>` line.
    #[must_use]
    pub fn header(&self) -> String {
        let mut html = String::with_capacity(256);
        html.push_str("<!DOCTYPE html>\n<html>\n\n<head>\n");
        html.push_str("    <meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "    <title>{}</title>", escape(&self.title));
        let _ = writeln!(
            html,
            "    <link rel=\"stylesheet\" href=\"{}\">",
            escape(&self.stylesheet)
        );
        html.push_str("</head>\n\n");
        let _ = writeln!(html, "<body class=\"{}\">", escape(&self.body_class));
        html
    }

    /// Wrap a fragment into a complete document.
    ///
    /// The fragment is inserted byte-for-byte between header and footer.
    #[must_use]
    pub fn wrap(&self, fragment: &str) -> String {
        let header = self.header();
        let mut html = String::with_capacity(header.len() + fragment.len() + FOOTER.len());
        html.push_str(&header);
        html.push_str(fragment);
        html.push_str(FOOTER);
        html
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEFAULT_HEADER: &str = r#"<!DOCTYPE html>
<html>

<head>
    <meta charset="utf-8">
    <title>JSTColorPicker</title>
    <link rel="stylesheet" href="../github-markdown.css">
</head>

<body class="markdown-body">
"#;

    #[test]
    fn test_default_header() {
        assert_eq!(PageTemplate::default().header(), DEFAULT_HEADER);
    }

    #[test]
    fn test_footer() {
        assert_eq!(FOOTER, "\n</body>\n\n</html>\n");
    }

    #[test]
    fn test_wrap_keeps_fragment_verbatim() {
        let fragment = "<h1>Title</h1>\n<p>a &amp; b</p>";
        let page = PageTemplate::default().wrap(fragment);

        assert!(page.starts_with(DEFAULT_HEADER));
        assert!(page.ends_with(FOOTER));
        assert_eq!(
            &page[DEFAULT_HEADER.len()..page.len() - FOOTER.len()],
            fragment
        );
    }

    #[test]
    fn test_wrap_empty_fragment() {
        let page = PageTemplate::default().wrap("");
        assert_eq!(page, format!("{DEFAULT_HEADER}{FOOTER}"));
    }

    #[test]
    fn test_custom_template_escapes_attributes() {
        let template = PageTemplate::new("A & B", "css/\"x\".css", "help");
        let header = template.header();
        assert!(header.contains("<title>A &amp; B</title>"));
        assert!(header.contains("href=\"css/&quot;x&quot;.css\""));
        assert!(header.contains("<body class=\"help\">"));
    }
}
