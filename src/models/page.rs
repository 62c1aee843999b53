use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DmError, Result};

// ---------------------------------------------------------------------------
// PagedResult — one server page of results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    pub page: Page,
}

impl<T> PagedResult<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

/// Paging metadata. `number` is 0-based as sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub size: u32,
    pub number: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl Page {
    /// 1-based page number for display.
    pub fn display_number(&self) -> PageNumber {
        PageNumber(self.number.saturating_add(1))
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }
}

// ---------------------------------------------------------------------------
// PageNumber — 1-based page number as used in routes
// ---------------------------------------------------------------------------

/// A 1-based page number. Must be reversed with [`to_server`](Self::to_server)
/// before it is put into a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn new(number: u32) -> Result<Self> {
        if number == 0 {
            return Err(DmError::InvalidArgument(
                "page numbers start at 1".to_string(),
            ));
        }
        Ok(PageNumber(number))
    }

    /// Parse a route segment. Only integral values `>= 1` are accepted.
    pub fn parse(segment: &str) -> Result<Self> {
        let number = segment.trim().parse::<u32>().map_err(|_| {
            DmError::InvalidArgument(format!("not a page number: {:?}", segment))
        })?;
        Self::new(number)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// 0-based number the server expects.
    pub fn to_server(self) -> u32 {
        self.0 - 1
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        PageNumber::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
