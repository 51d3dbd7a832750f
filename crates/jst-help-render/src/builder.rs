//! Help bundle builder: locate, render, place.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::layout::HelpLayout;
use crate::locate::MarkdownFiles;
use crate::page::PageTemplate;
use crate::place::write_page;
use crate::remote::MarkdownService;

/// A help page written during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPage {
    /// Markdown source the page was rendered from.
    pub source: PathBuf,
    /// Language tag derived from the source stem.
    pub lang: String,
    /// Path the page was written to.
    pub output: PathBuf,
}

/// Renders every top-level Markdown file of a project into its help bundle.
///
/// Files are processed one at a time in enumeration order. The first error
/// aborts the build; pages written before it stay on disk.
///
/// # Example
///
/// ```ignore
/// use jst_help_render::{HelpBuilder, RemoteRenderer};
///
/// let service = RemoteRenderer::new("https://api.github.com/markdown/raw");
/// let pages = HelpBuilder::new("/path/to/JSTColorPicker", Box::new(service)).build()?;
/// ```
pub struct HelpBuilder {
    root: PathBuf,
    service: Box<dyn MarkdownService>,
    template: PageTemplate,
    layout: HelpLayout,
    create_dirs: bool,
}

impl HelpBuilder {
    /// Create a builder for `root` using the stock page shell and layout.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, service: Box<dyn MarkdownService>) -> Self {
        Self {
            root: root.into(),
            service,
            template: PageTemplate::default(),
            layout: HelpLayout::default(),
            create_dirs: false,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: PageTemplate) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Create missing `<lang>.lproj` directories instead of failing.
    #[must_use]
    pub fn create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Project root the builder reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render every `*.md` file directly inside the root.
    ///
    /// Two sources with the same language tag target the same page; the one
    /// processed last wins.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuildError`] hit while listing, reading,
    /// rendering or writing.
    pub fn build(&self) -> Result<Vec<WrittenPage>, BuildError> {
        let locate_error = |source: std::io::Error| BuildError::Locate {
            path: self.root.clone(),
            source,
        };
        let files = MarkdownFiles::new(&self.root).map_err(locate_error)?;

        let mut written = Vec::new();
        let mut targets: HashMap<PathBuf, PathBuf> = HashMap::new();

        for entry in files {
            let source = entry.map_err(locate_error)?;
            tracing::debug!(path = %source.display(), "Found markdown source");

            let page = self.render_file(&source)?;
            if let Some(previous) = targets.insert(page.output.clone(), source.clone()) {
                tracing::warn!(
                    output = %page.output.display(),
                    previous = %previous.display(),
                    current = %source.display(),
                    "Help page overwritten by another source with the same language"
                );
            }
            written.push(page);
        }

        tracing::info!(count = written.len(), root = %self.root.display(), "Help bundle built");
        Ok(written)
    }

    /// Render one Markdown source and write its page.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if reading, rendering or writing fails.
    pub fn render_file(&self, source: &Path) -> Result<WrittenPage, BuildError> {
        let markdown = std::fs::read_to_string(source)
            .map(normalize_newlines)
            .map_err(|e| BuildError::Read {
                path: source.to_path_buf(),
                source: e,
            })?;

        let fragment = self
            .service
            .render(&markdown)
            .map_err(|e| BuildError::Render {
                path: source.to_path_buf(),
                source: e,
            })?;
        let html = self.template.wrap(&fragment);

        let lang = self.layout.language_for(source);
        let output = self.layout.output_path(&self.root, &lang);

        write_page(&output, html.as_bytes(), self.create_dirs).map_err(|e| BuildError::Write {
            path: output.clone(),
            source: e,
        })?;
        tracing::info!(
            source = %source.display(),
            output = %output.display(),
            lang = %lang,
            "Wrote help page"
        );

        Ok(WrittenPage {
            source: source.to_path_buf(),
            lang,
            output,
        })
    }
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
