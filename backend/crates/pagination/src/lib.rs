//! Offset pagination primitives for list endpoints.
//!
//! List endpoints accept a 1-based page number and translate it into a
//! `LIMIT`/`OFFSET` window for the persistence layer. Page counts are derived
//! from the total number of matching rows, rounding up so a partially filled
//! final page is still reachable.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageNumber, PageSize, PageWindow, total_pages};
//!
//! let size = PageSize::new(6).expect("non-zero page size");
//! let page = PageNumber::new(3).expect("non-zero page");
//! let window = PageWindow::new(page, size);
//! assert_eq!(window.limit(), 6);
//! assert_eq!(window.offset(), 12);
//! assert_eq!(total_pages(13, size), 3);
//! ```

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors raised when pagination inputs are out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page numbers are 1-based; zero is rejected.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Validate a raw page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPage`] when `page` is zero.
    pub fn new(page: u32) -> Result<Self, PaginationError> {
        NonZeroU32::new(page)
            .map(Self)
            .ok_or(PaginationError::ZeroPage)
    }

    /// Raw page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of items served per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Validate a raw page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `size` is zero.
    pub fn new(size: u32) -> Result<Self, PaginationError> {
        NonZeroU32::new(size)
            .map(Self)
            .ok_or(PaginationError::ZeroPageSize)
    }

    /// Construct a page size from a value known to be non-zero.
    #[must_use]
    pub const fn from_non_zero(size: NonZeroU32) -> Self {
        Self(size)
    }

    /// Raw page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// `LIMIT`/`OFFSET` pair for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    limit: u32,
    offset: u64,
}

impl PageWindow {
    /// Compute the window covering `page` when pages hold `size` items.
    #[must_use]
    pub fn new(page: PageNumber, size: PageSize) -> Self {
        let preceding_pages = u64::from(page.get() - 1);
        Self {
            limit: size.get(),
            offset: preceding_pages * u64::from(size.get()),
        }
    }

    /// Maximum number of rows in the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Rows to skip before the page starts.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }
}

/// Number of pages needed to show `total_items`, rounding up.
///
/// An empty result set has zero pages.
#[must_use]
pub const fn total_pages(total_items: u64, size: PageSize) -> u64 {
    total_items.div_ceil(size.0.get() as u64)
}
