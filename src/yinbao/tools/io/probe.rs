use std::path::Path;

/// Answers whether a path exists. The resolution chain depends only on this
/// capability, so callers can substitute an in-memory view of the filesystem.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFilesystem;

impl PathProbe for HostFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
