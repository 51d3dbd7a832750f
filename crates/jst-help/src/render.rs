//! Help bundle rendering command.

use std::path::{Path, PathBuf};

use clap::Args;
use jst_help_config::{CliSettings, Config};
use jst_help_render::{HelpBuilder, HelpLayout, PageTemplate, RemoteRenderer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for rendering the help bundle.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Project root holding the Markdown sources
    /// (default: parent of the directory containing this executable).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover jst-help.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (per-file logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Render every top-level Markdown file into its help page.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any file fails to render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings { root: self.root };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        let root = match config.root_resolved.clone() {
            Some(root) => root,
            None => executable_root()?,
        };

        let renderer = RemoteRenderer::new(config.render.endpoint.clone())
            .timeout(config.render.timeout())
            .token(config.render.token().map(str::to_owned))
            .fail_on_http_error(config.render.fail_on_http_error);
        output.info(&format!("Endpoint: {}", renderer.endpoint()));

        let builder = HelpBuilder::new(root, Box::new(renderer))
            .with_template(PageTemplate::new(
                config.page.title.clone(),
                config.page.stylesheet.clone(),
                config.page.body_class.clone(),
            ))
            .with_layout(HelpLayout::new(
                config.output.bundle_dir.clone(),
                config.output.file_name.clone(),
                config.output.default_lang.clone(),
            ))
            .create_dirs(config.output.create_dirs);
        output.info(&format!("Root: {}", builder.root().display()));

        let pages = builder.build()?;
        for page in &pages {
            output.detail(&format!(
                "  {} -> {}",
                page.source.display(),
                page.output.display()
            ));
        }

        output.success(&format!("Rendered {} help page(s)", pages.len()));
        Ok(())
    }
}

/// Root derived from the running executable, expected at `<root>/bin/`.
fn executable_root() -> Result<PathBuf, CliError> {
    let exe = std::env::current_exe()?;
    root_for_executable(&exe).ok_or_else(|| {
        CliError::Validation(format!(
            "cannot derive project root from {}, pass --root",
            exe.display()
        ))
    })
}

fn root_for_executable(exe: &Path) -> Option<PathBuf> {
    exe.parent()?.parent().map(Path::to_path_buf)
}
