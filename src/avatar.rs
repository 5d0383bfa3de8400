//! Avatar lookup by author display name.

use std::collections::HashMap;

const BUILT_IN: &[(&str, &str)] = &[
    ("Alice", "https://randomuser.me/api/portraits/women/1.jpg"),
    ("Bob", "https://randomuser.me/api/portraits/men/2.jpg"),
    ("Carol", "https://randomuser.me/api/portraits/women/3.jpg"),
    ("Dave", "https://randomuser.me/api/portraits/men/4.jpg"),
    ("Eve", "https://randomuser.me/api/portraits/women/5.jpg"),
    ("Frank", "https://randomuser.me/api/portraits/men/6.jpg"),
    ("Grace", "https://randomuser.me/api/portraits/women/7.jpg"),
    ("Henry", "https://randomuser.me/api/portraits/men/8.jpg"),
    ("Ivy", "https://randomuser.me/api/portraits/women/9.jpg"),
    ("Jack", "https://randomuser.me/api/portraits/men/10.jpg"),
    ("Kate", "https://randomuser.me/api/portraits/women/11.jpg"),
];

/// Owned author → avatar table with a fallback for unknown authors.
///
/// Resolution is read-only; creating posts never registers new authors here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarDirectory {
    entries: HashMap<String, String>,
    fallback: String,
}

impl AvatarDirectory {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    pub fn with_entry(mut self, author: impl Into<String>, avatar: impl Into<String>) -> Self {
        self.entries.insert(author.into(), avatar.into());
        self
    }

    pub fn resolve(&self, author: &str) -> &str {
        self.entries
            .get(author)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for AvatarDirectory {
    fn default() -> Self {
        BUILT_IN
            .iter()
            .fold(AvatarDirectory::new(BUILT_IN[0].1), |dir, (author, url)| {
                dir.with_entry(*author, *url)
            })
    }
}
