//! Host-environment collaborators outside the bridge proper.
//!
//! The directory picker and the editor-settings lookup are the only two
//! host-side operations that suspend: both are one-shot, resolve or are
//! abandoned by the user, and carry no timeout or cancellation.

pub mod settings;

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

pub use settings::{default_editor_settings_path, load_editor_settings};

/// Seam for the platform's directory-picker dialog.
///
/// `None` means the user abandoned the dialog; there is no error case.
pub trait DirectoryPicker: Send + Sync {
    /// Show the dialog and resolve to the chosen directory.
    fn pick_directory(&self) -> Pin<Box<dyn Future<Output = Option<PathBuf>> + Send + '_>>;
}

/// Picker that always resolves to a preconfigured answer. Used by the
/// headless binary and by tests; GUI front-ends supply a real dialog.
#[derive(Debug, Clone, Default)]
pub struct FixedDirectoryPicker {
    /// The directory to resolve with, or `None` to simulate abandonment.
    pub directory: Option<PathBuf>,
}

impl DirectoryPicker for FixedDirectoryPicker {
    fn pick_directory(&self) -> Pin<Box<dyn Future<Output = Option<PathBuf>> + Send + '_>> {
        let directory = self.directory.clone();
        Box::pin(async move { directory })
    }
}
