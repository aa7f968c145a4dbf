//! Queue entry types

use serde::{Deserialize, Serialize};
use std::fmt;

/// One catalog page to discover, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageToken(u32);

impl PageToken {
    /// Creates a token for a page index; page 0 does not exist
    pub fn new(page: u32) -> Option<Self> {
        (page >= 1).then_some(Self(page))
    }

    pub fn page(self) -> u32 {
        self.0
    }

    /// Tokens for pages `1..=pages`
    pub fn seed(pages: u32) -> impl Iterator<Item = PageToken> {
        (1..=pages).map(PageToken)
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}", self.0)
    }
}

/// One repository to star, identified by its full name (`owner/repo`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionItem {
    pub full_name: String,
}

impl ActionItem {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }
}

impl fmt::Display for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// An entry of the shared task queue
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Task {
    /// Discovery work: fetch a listing page
    Page(PageToken),

    /// Action work: star one repository
    Star(ActionItem),
}

impl From<PageToken> for Task {
    fn from(token: PageToken) -> Self {
        Task::Page(token)
    }
}

impl From<ActionItem> for Task {
    fn from(item: ActionItem) -> Self {
        Task::Star(item)
    }
}
