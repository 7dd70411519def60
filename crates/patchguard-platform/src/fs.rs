use crate::traits::FileStore;
use anyhow::Context;
use camino::Utf8PathBuf;
use patchguard_types::VendorPath;

/// File store rooted at the project directory. All paths are resolved
/// relative to that root.
#[derive(Clone, Debug)]
pub struct FsFileStore {
    root: Utf8PathBuf,
}

impl FsFileStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &VendorPath) -> Utf8PathBuf {
        self.root.join(path.as_str())
    }
}

impl FileStore for FsFileStore {
    fn exists(&self, path: &VendorPath) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &VendorPath) -> anyhow::Result<Option<String>> {
        let full = self.resolve(path);
        if !full.is_file() {
            return Ok(None);
        }
        let text =
            std::fs::read_to_string(&full).with_context(|| format!("read file: {full}"))?;
        Ok(Some(text))
    }

    fn write(&self, path: &VendorPath, content: &str) -> anyhow::Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory: {parent}"))?;
        }
        std::fs::write(&full, content).with_context(|| format!("write file: {full}"))?;
        Ok(())
    }
}
