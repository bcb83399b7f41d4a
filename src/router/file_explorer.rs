//! File-explorer state: the project path and the directory tree.
//!
//! The agent reports a flat list of relative paths; the host folds it
//! into a nested tree. Directories sort before files, then by name, so
//! the rendered explorer is stable across refreshes.

use crate::protocol::{FileEntry, FileStatus};

/// Kind of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Directory with children.
    Directory,
    /// File leaf.
    File,
}

/// One node of the explorer tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Last path segment (file or directory name).
    pub name: String,
    /// Directory or file.
    pub kind: NodeKind,
    /// Version-control status; only ever set on file leaves.
    pub status: Option<FileStatus>,
    /// Child nodes; empty for files.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn directory(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: NodeKind::Directory,
            status: None,
            children: Vec::new(),
        }
    }

    fn file(name: &str, status: Option<FileStatus>) -> Self {
        Self {
            name: name.to_owned(),
            kind: NodeKind::File,
            status,
            children: Vec::new(),
        }
    }

    /// Find a direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Fold a flat file listing into a sorted tree.
///
/// Path separators may be `/` or `\` (the agent reports whatever its
/// platform produced). The last segment of each path is the file leaf;
/// every earlier segment is a directory. Directories sort before files,
/// then case-sensitively by name.
#[must_use]
pub fn build_tree(entries: &[FileEntry]) -> Vec<TreeNode> {
    let mut roots: Vec<TreeNode> = Vec::new();

    for entry in entries {
        let normalized = entry.path.replace('\\', "/");
        let parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty()).collect();
        insert_path(&mut roots, &parts, entry.status);
    }

    sort_level(&mut roots);
    roots
}

fn insert_path(level: &mut Vec<TreeNode>, parts: &[&str], status: Option<FileStatus>) {
    let Some((head, rest)) = parts.split_first() else {
        return;
    };

    if rest.is_empty() {
        if !level.iter().any(|n| n.name == *head) {
            level.push(TreeNode::file(head, status));
        }
        return;
    }

    let position = level.iter().position(|n| n.name == *head);
    let index = position.unwrap_or_else(|| {
        level.push(TreeNode::directory(head));
        level.len() - 1
    });
    insert_path(&mut level[index].children, rest, status);
}

fn sort_level(level: &mut [TreeNode]) {
    level.sort_by(|a, b| match (a.kind, b.kind) {
        (NodeKind::Directory, NodeKind::File) => std::cmp::Ordering::Less,
        (NodeKind::File, NodeKind::Directory) => std::cmp::Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });
    for node in level {
        sort_level(&mut node.children);
    }
}

/// File-explorer subsystem state.
#[derive(Debug, Default)]
pub struct FileExplorer {
    /// Active project directory, once the agent confirmed it.
    pub project_path: Option<String>,
    /// Current explorer tree; `None` until the first listing arrives.
    pub tree: Option<Vec<TreeNode>>,
    /// Explorer status lines (project loads, file creations).
    pub log: Vec<String>,
}

impl FileExplorer {
    /// Record the agent's project confirmation.
    pub fn project_loaded(&mut self, path: String) {
        self.log.push(format!("project loaded: {path}"));
        self.project_path = Some(path);
    }

    /// Replace the tree with a fresh listing.
    pub fn set_listing(&mut self, files: &[FileEntry]) {
        self.tree = Some(build_tree(files));
    }

    /// Record a file creation; the caller refreshes the listing.
    pub fn file_created(&mut self, file: &str) {
        self.log.push(format!("created: {file}"));
    }
}
