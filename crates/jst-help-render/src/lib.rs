//! Markdown to localized help bundle rendering for JSTColorPicker.
//!
//! Each top-level `*.md` file of a project is sent to a Markdown rendering
//! endpoint, wrapped in a fixed page shell and written to
//! `JSTColorPicker/Help/<lang>.lproj/JSTColorPicker.html`, where `<lang>`
//! comes from a `_<lang>` suffix on the file stem.
//!
//! - [`MarkdownFiles`]: top-level `*.md` enumeration
//! - [`RemoteRenderer`]: blocking HTTP rendering via [`MarkdownService`]
//! - [`PageTemplate`]: page shell around the fragment
//! - [`HelpLayout`]: language tag and output path derivation
//! - [`HelpBuilder`]: the sequential pipeline tying them together

mod builder;
mod error;
mod layout;
mod locate;
mod page;
mod place;
mod remote;

pub use builder::{HelpBuilder, WrittenPage};
pub use error::{BuildError, RenderError};
pub use layout::HelpLayout;
pub use locate::MarkdownFiles;
pub use page::{FOOTER, PageTemplate};
pub use place::write_page;
pub use remote::{MarkdownService, RemoteRenderer};
