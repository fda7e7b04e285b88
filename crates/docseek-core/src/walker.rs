use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::SetupError;
use crate::types::DocumentKind;

/// One item discovered under the corpus root.
#[derive(Debug)]
pub enum WalkEntry {
    Document { path: PathBuf, kind: DocumentKind },
    Unsupported { path: PathBuf },
    /// Permission errors and symlink cycles. The walk goes on.
    Inaccessible { path: Option<PathBuf>, reason: String },
}

/// Depth-first corpus enumeration with extension-based classification.
///
/// Symbolic links are followed; cycles are detected by `walkdir` and surface as
/// `WalkEntry::Inaccessible`. Sibling order is whatever the OS returns.
#[derive(Debug, Clone)]
pub struct CorpusWalker {
    kinds: Vec<(String, DocumentKind)>,
}

impl Default for CorpusWalker {
    fn default() -> Self {
        Self { kinds: DocumentKind::TABLE.iter().map(|(ext, kind)| (ext.to_string(), *kind)).collect() }
    }
}

impl CorpusWalker {
    pub fn new() -> Self { Self::default() }

    /// Register another extension (without the dot).
    pub fn with_kind(mut self, extension: &str, kind: DocumentKind) -> Self {
        self.kinds.push((extension.trim_start_matches('.').to_string(), kind));
        self
    }

    pub fn classify(&self, path: &Path) -> Option<DocumentKind> {
        DocumentKind::from_path_with(self.kinds.iter().map(|(ext, kind)| (ext.as_str(), *kind)), path)
    }

    /// Visit every file under `root`. Fails only when `root` itself is unusable.
    pub fn walk<F>(&self, root: &Path, mut visit: F) -> Result<(), SetupError>
    where
        F: FnMut(WalkEntry),
    {
        std::fs::metadata(root).map_err(|source| SetupError::RootNotAccessible { path: root.to_path_buf(), source })?;

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf);
                    if err.depth() == 0 {
                        let source = err
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "unreadable root"));
                        return Err(SetupError::RootNotAccessible { path: root.to_path_buf(), source });
                    }
                    visit(WalkEntry::Inaccessible { path, reason: err.to_string() });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            match self.classify(&path) {
                Some(kind) => visit(WalkEntry::Document { path, kind }),
                None => visit(WalkEntry::Unsupported { path }),
            }
        }
        Ok(())
    }
}
