//! Mapping from source file names to help bundle locations.

use std::path::{Path, PathBuf};

/// Where localized help pages live inside the project.
///
/// A source stem of the form `<name>_<lang>` targets `<lang>.lproj`;
/// any other stem targets the default language.
#[derive(Debug, Clone)]
pub struct HelpLayout {
    bundle_dir: PathBuf,
    file_name: String,
    default_lang: String,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            bundle_dir: PathBuf::from("JSTColorPicker/Help"),
            file_name: "JSTColorPicker.html".to_owned(),
            default_lang: "en".to_owned(),
        }
    }
}

impl HelpLayout {
    /// Create a layout with a custom bundle directory, page name and
    /// default language.
    #[must_use]
    pub fn new(
        bundle_dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
        default_lang: impl Into<String>,
    ) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            file_name: file_name.into(),
            default_lang: default_lang.into(),
        }
    }

    /// Language tag for a file stem.
    ///
    /// Splitting on `_` must give exactly two parts for the second one to
    /// count as the tag. `a_b_c` and `a` both fall back to the default.
    /// The tag is not validated, so `doc_` yields an empty tag.
    #[must_use]
    pub fn language_tag<'a>(&'a self, stem: &'a str) -> &'a str {
        let mut parts = stem.split('_');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(tag), None) => tag,
            _ => &self.default_lang,
        }
    }

    /// Language tag for a source path, taken from its file stem.
    #[must_use]
    pub fn language_for(&self, source: &Path) -> String {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        self.language_tag(&stem).to_owned()
    }

    /// Output page path for `lang` under `root`.
    #[must_use]
    pub fn output_path(&self, root: &Path, lang: &str) -> PathBuf {
        root.join(&self.bundle_dir)
            .join(format!("{lang}.lproj"))
            .join(&self.file_name)
    }
}
