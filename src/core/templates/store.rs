//! Filesystem layout of the templates root.
//!
//! ```text
//! <root>/<name>/template.yaml
//! <root>/<name>/skeleton/catalog-info.yaml
//! <root>/<name>/skeleton/README.md
//! <root>/<name>/skeleton/.github/workflows/deploy.yml
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::core::error::Result;
use crate::core::standards::TEMPLATE_FILE;

use super::document::TemplateDocument;

/// Directory under which every template lives
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `name` can address a directory directly under the root
    pub fn is_valid_name(name: &str) -> bool {
        let mut components = Path::new(name).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }

    /// Directory of the named template
    pub fn template_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Path of the named template's `template.yaml`
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.template_dir(name).join(TEMPLATE_FILE)
    }

    /// Whether the named template's directory exists
    pub async fn is_template_dir(&self, name: &str) -> Result<bool> {
        match fs::metadata(self.template_dir(name)).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether anything occupies the named template's path
    pub async fn is_occupied(&self, name: &str) -> Result<bool> {
        Ok(fs::try_exists(self.template_dir(name)).await?)
    }

    /// Create the template directory and its skeleton workflow directory.
    ///
    /// Existing directories are left as they are.
    pub async fn create_layout(&self, name: &str) -> Result<PathBuf> {
        let dir = self.template_dir(name);
        let workflows = dir.join("skeleton").join(".github").join("workflows");
        debug!(path = %workflows.display(), "Creating template directories");
        fs::create_dir_all(&workflows).await?;
        Ok(dir)
    }

    /// Load the named template's document, `None` when the file is absent
    pub async fn load_document(&self, name: &str) -> Result<Option<TemplateDocument>> {
        let path = self.document_path(name);
        if !fs::try_exists(&path).await? {
            debug!(path = %path.display(), "No template document");
            return Ok(None);
        }
        TemplateDocument::load(&path).await.map(Some)
    }

    pub async fn save_document(&self, name: &str, document: &TemplateDocument) -> Result<()> {
        document.save(&self.document_path(name)).await
    }

    /// Read a file relative to the template directory, `None` when absent
    pub async fn read_file(&self, name: &str, relative: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.template_dir(name).join(relative)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a file relative to the template directory, creating parents
    pub async fn write_file(&self, name: &str, relative: &str, content: &str) -> Result<()> {
        let path = self.template_dir(name).join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        debug!(path = %path.display(), bytes = content.len(), "Writing template file");
        fs::write(&path, content).await?;
        Ok(())
    }

    /// Relative paths from `required` that do not exist in the template directory
    pub async fn missing_files<'a>(&self, name: &str, required: &[&'a str]) -> Result<Vec<&'a str>> {
        let dir = self.template_dir(name);
        let mut missing = Vec::new();
        for relative in required {
            if !fs::try_exists(dir.join(relative)).await? {
                missing.push(*relative);
            }
        }
        Ok(missing)
    }

    /// Move a template directory to a new name with a single rename
    pub async fn rename(&self, old_name: &str, new_name: &str) -> Result<()> {
        let from = self.template_dir(old_name);
        let to = self.template_dir(new_name);
        debug!(from = %from.display(), to = %to.display(), "Renaming template directory");
        fs::rename(&from, &to).await?;
        Ok(())
    }

    /// Names of the directories under the root that start with `prefix`, sorted
    pub async fn template_names(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "Templates root does not exist");
                return Ok(names);
            }
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with(prefix) && entry.file_type().await?.is_dir() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_valid_name() {
        assert!(TemplateStore::is_valid_name("billpay-demo"));
        assert!(!TemplateStore::is_valid_name(""));
        assert!(!TemplateStore::is_valid_name("../escape"));
        assert!(!TemplateStore::is_valid_name("nested/dir"));
        assert!(!TemplateStore::is_valid_name(".."));
        assert!(!TemplateStore::is_valid_name("/absolute"));
    }

    #[tokio::test]
    async fn test_create_layout_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = TemplateStore::new(temp_dir.path());

        let dir = store.create_layout("billpay-demo").await.unwrap();
        assert!(dir.join("skeleton/.github/workflows").is_dir());
        store.create_layout("billpay-demo").await.unwrap();
        assert!(store.is_template_dir("billpay-demo").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = TemplateStore::new(temp_dir.path());
        store.create_layout("billpay-demo").await.unwrap();
        store
            .write_file("billpay-demo", "skeleton/README.md", "# demo\n")
            .await
            .unwrap();

        let missing = store
            .missing_files("billpay-demo", &["template.yaml", "skeleton/README.md"])
            .await
            .unwrap();
        assert_eq!(missing, vec!["template.yaml"]);
    }

    #[tokio::test]
    async fn test_load_document_absent_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = TemplateStore::new(temp_dir.path());
        store.create_layout("billpay-demo").await.unwrap();
        assert!(store.load_document("billpay-demo").await.unwrap().is_none());
        assert!(
            store
                .read_file("billpay-demo", "skeleton/README.md")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_template_names_filters_prefix_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = TemplateStore::new(temp_dir.path());
        store.create_layout("billpay-b").await.unwrap();
        store.create_layout("billpay-a").await.unwrap();
        store.create_layout("other-template").await.unwrap();
        std::fs::write(temp_dir.path().join("billpay-notes.txt"), "not a dir").unwrap();

        let names = store.template_names("billpay-").await.unwrap();
        assert_eq!(names, vec!["billpay-a", "billpay-b"]);
    }

    #[tokio::test]
    async fn test_template_names_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = TemplateStore::new(temp_dir.path().join("nope"));
        assert!(store.template_names("billpay-").await.unwrap().is_empty());
    }
}
