//! Resolution of request paths against the configured document root.

use std::path::{Component, Path, PathBuf};

use bytes::Bytes;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct StaticRoot {
    root: PathBuf,
}

impl StaticRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path onto a file under the root.
    ///
    /// Returns `None` for paths that would leave the root (`..`, absolute or
    /// prefixed components once the leading slashes are stripped).
    pub fn resolve(&self, resource: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();

        for component in Path::new(resource.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        Some(path)
    }

    /// Reads the whole resource into memory.
    ///
    /// A missing resource is [`Error::ResourceNotFound`]; one that exists but
    /// cannot be opened or read is [`Error::ResourceUnreadable`].
    pub async fn load(&self, resource: &str) -> Result<Bytes> {
        let path = self.resolve(resource).ok_or(Error::ResourceNotFound)?;

        match tokio::fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => return Err(Error::ResourceNotFound),
            Err(e) => return Err(Error::ResourceUnreadable(e)),
        }

        tokio::fs::read(&path)
            .await
            .map(Bytes::from)
            .map_err(Error::ResourceUnreadable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_under_root() {
        let root = StaticRoot::new("/srv/www");
        assert_eq!(
            root.resolve("/docs/./index.html"),
            Some(PathBuf::from("/srv/www/docs/index.html"))
        );
        assert_eq!(root.resolve("/"), Some(PathBuf::from("/srv/www")));
    }

    #[test]
    fn rejects_parent_components() {
        let root = StaticRoot::new("/srv/www");
        assert_eq!(root.resolve("/../etc/passwd"), None);
        assert_eq!(root.resolve("/a/../../b"), None);
    }

    #[tokio::test]
    async fn traversal_is_not_found() {
        let root = StaticRoot::new(std::env::temp_dir());
        let err = root.load("/../anything").await.unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound));
    }
}
