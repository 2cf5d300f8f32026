//! Sandboxed file-access layer over a note vault.
//!
//! All operations take vault-relative paths and are confined to the
//! configured root: absolute paths, `..` components, and hidden components
//! (leading `.`) are rejected before any filesystem call, and `read`/`write`
//! only touch `.md` notes.

use std::path::{Component, Path, PathBuf};

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use tokio::fs;

use crate::error::{VaultError, VaultResult};

/// A directory entry returned by [`VaultStore::ls`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultEntry {
    /// `"dir"` or `"file"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Base name of the entry.
    pub name: String,
    /// Vault-relative path of the entry.
    pub path: String,
}

/// A node in the tree returned by [`VaultStore::tree`].
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// A single line matched by [`VaultStore::search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// Vault-relative path of the note.
    pub path: String,
    /// 1-based line number.
    pub line: usize,
    /// The matching line, trailing whitespace trimmed.
    pub text: String,
}

/// Service layer for a note vault on disk.
#[derive(Debug, Clone)]
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a vault-relative path against the root, enforcing confinement.
    fn resolve(&self, path: &str) -> VaultResult<PathBuf> {
        let rel = Path::new(path);
        if rel.is_absolute() {
            return Err(VaultError::AbsolutePath);
        }
        for component in rel.components() {
            match component {
                Component::Normal(part) => {
                    if part.to_string_lossy().starts_with('.') {
                        return Err(VaultError::HiddenPath);
                    }
                }
                Component::CurDir => {}
                // ParentDir, and the Windows-only Prefix/RootDir forms, all
                // point outside the vault.
                _ => return Err(VaultError::PathTraversal),
            }
        }
        Ok(self.root.join(rel))
    }

    /// Resolve a note path: confinement plus the `.md` extension check.
    fn resolve_note(&self, path: &str) -> VaultResult<PathBuf> {
        let full = self.resolve(path)?;
        if full.extension().and_then(|e| e.to_str()) != Some("md") {
            return Err(VaultError::NotMarkdown);
        }
        Ok(full)
    }

    /// List directories and notes directly under `path` (`""` for the root).
    ///
    /// Hidden entries and non-note files are excluded; entries are sorted by
    /// name.
    pub async fn ls(&self, path: &str) -> VaultResult<Vec<VaultEntry>> {
        let dir = self.resolve(path)?;
        let mut reader = fs::read_dir(&dir).await.map_err(VaultError::from_io)?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await.map_err(VaultError::from_io)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let rel = if path.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", path.trim_end_matches('/'), name)
            };
            let file_type = entry.file_type().await.map_err(VaultError::from_io)?;
            if file_type.is_dir() {
                entries.push(VaultEntry { kind: "dir".to_owned(), name, path: rel });
            } else if name.ends_with(".md") {
                entries.push(VaultEntry { kind: "file".to_owned(), name, path: rel });
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Read a note and return its content.
    pub async fn read(&self, path: &str) -> VaultResult<String> {
        let full = self.resolve_note(path)?;
        fs::read_to_string(&full).await.map_err(VaultError::from_io)
    }

    /// Create or overwrite a note, creating parent directories as needed.
    pub async fn write(&self, path: &str, content: &str) -> VaultResult<()> {
        let full = self.resolve_note(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await.map_err(VaultError::from_io)?;
        }
        fs::write(&full, content).await.map_err(VaultError::from_io)
    }

    /// Vault-relative paths of all notes matching a glob pattern.
    pub async fn glob(&self, pattern: &str) -> VaultResult<Vec<String>> {
        let pattern =
            glob::Pattern::new(pattern).map_err(|e| VaultError::InvalidPattern(e.to_string()))?;
        let notes = self.walk_notes().await?;
        Ok(notes.into_iter().filter(|p| pattern.matches(p)).collect())
    }

    /// Nested directory/note structure of the whole vault.
    pub async fn tree(&self) -> VaultResult<Vec<TreeNode>> {
        self.tree_at(PathBuf::new()).await
    }

    fn tree_at(&self, rel_dir: PathBuf) -> BoxFuture<'_, VaultResult<Vec<TreeNode>>> {
        async move {
            let mut reader =
                fs::read_dir(self.root.join(&rel_dir)).await.map_err(VaultError::from_io)?;
            let mut nodes = Vec::new();

            while let Some(entry) = reader.next_entry().await.map_err(VaultError::from_io)? {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    continue;
                }
                let file_type = entry.file_type().await.map_err(VaultError::from_io)?;
                if file_type.is_dir() {
                    let children = self.tree_at(rel_dir.join(&name)).await?;
                    nodes.push(TreeNode { name, kind: "dir".to_owned(), children });
                } else if name.ends_with(".md") {
                    nodes.push(TreeNode { name, kind: "file".to_owned(), children: Vec::new() });
                }
            }

            nodes.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(nodes)
        }
        .boxed()
    }

    /// Search all notes for a literal query, line by line.
    pub async fn search(&self, query: &str, case_sensitive: bool) -> VaultResult<Vec<SearchMatch>> {
        let matcher = regex::RegexBuilder::new(&regex::escape(query))
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| VaultError::InvalidPattern(e.to_string()))?;

        let mut matches = Vec::new();
        for path in self.walk_notes().await? {
            let full = self.root.join(&path);
            let content = fs::read_to_string(&full).await.map_err(VaultError::from_io)?;
            for (index, line) in content.lines().enumerate() {
                if matcher.is_match(line) {
                    matches.push(SearchMatch {
                        path: path.clone(),
                        line: index + 1,
                        text: line.trim_end().to_owned(),
                    });
                }
            }
        }
        Ok(matches)
    }

    /// Vault-relative paths of every note, hidden directories skipped.
    async fn walk_notes(&self) -> VaultResult<Vec<String>> {
        let mut notes = Vec::new();
        let mut pending = vec![PathBuf::new()];

        while let Some(rel_dir) = pending.pop() {
            let mut reader =
                fs::read_dir(self.root.join(&rel_dir)).await.map_err(VaultError::from_io)?;
            while let Some(entry) = reader.next_entry().await.map_err(VaultError::from_io)? {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    continue;
                }
                let rel = rel_dir.join(&name);
                let file_type = entry.file_type().await.map_err(VaultError::from_io)?;
                if file_type.is_dir() {
                    pending.push(rel);
                } else if name.ends_with(".md") {
                    notes.push(rel.to_string_lossy().into_owned());
                }
            }
        }

        notes.sort();
        Ok(notes)
    }
}
