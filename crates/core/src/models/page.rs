use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::CoreError;

/// Maximum number of page-number buttons shown in the pagination bar.
pub const PAGE_WINDOW: u32 = 5;

/// Rows per page. The transactions API only accepts these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PageSize::Ten),
            25 => Ok(PageSize::TwentyFive),
            50 => Ok(PageSize::Fifty),
            other => Err(CoreError::ValidationError(format!(
                "Unsupported page size {other}: must be one of 10, 25, 50"
            ))),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Whether amounts render in each row's own currency or converted into the
/// user's preferred currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Original,
    #[default]
    Converted,
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Original => write!(f, "original"),
            DisplayMode::Converted => write!(f, "converted"),
        }
    }
}

/// Page math over `(page, page_size, total_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-indexed
    pub page: u32,
    pub page_size: PageSize,
    /// Total rows across all pages, as reported by the API
    pub total_count: u64,
}

impl Pagination {
    pub fn new(page: u32, page_size: PageSize, total_count: u64) -> Self {
        Self {
            page,
            page_size,
            total_count,
        }
    }

    /// `ceil(total_count / page_size)`; zero when there are no rows.
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.get());
        u32::try_from(self.total_count.div_ceil(size)).unwrap_or(u32::MAX)
    }

    /// Highest page navigation may reach. Never below 1, so an empty result
    /// still has a page to sit on.
    pub fn last_page(&self) -> u32 {
        self.total_pages().max(1)
    }

    /// Clamp a requested page into `[1, last_page]`.
    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.last_page())
    }

    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.last_page()
    }

    /// 1-based inclusive row range shown on the current page, e.g. `(41, 47)`.
    /// `(0, 0)` when there are no rows.
    pub fn display_range(&self) -> (u64, u64) {
        if self.total_count == 0 {
            return (0, 0);
        }
        let size = u64::from(self.page_size.get());
        let start = u64::from(self.page.saturating_sub(1)) * size + 1;
        let end = (start + size - 1).min(self.total_count);
        (start, end)
    }

    /// Sliding window of at most `PAGE_WINDOW` page numbers centered on the
    /// current page and pinned against both ends of the range.
    pub fn page_window(&self) -> Vec<u32> {
        let total = self.total_pages();
        if total <= PAGE_WINDOW {
            return (1..=total).collect();
        }
        let half = PAGE_WINDOW / 2;
        let first = if self.page <= half + 1 {
            1
        } else if self.page >= total - half {
            total - PAGE_WINDOW + 1
        } else {
            self.page - half
        };
        (first..first + PAGE_WINDOW).collect()
    }
}

/// UI state owned by the page controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub page: u32,
    pub page_size: PageSize,
    pub total_count: u64,
    /// Ids of the selected rows
    pub selection: BTreeSet<i64>,
    pub display_mode: DisplayMode,
    /// Row targeted by a per-row delete button; takes precedence over `selection`
    pub single_delete_target: Option<i64>,
}

impl PageState {
    pub fn new(page_size: PageSize, display_mode: DisplayMode) -> Self {
        Self {
            page: 1,
            page_size,
            total_count: 0,
            selection: BTreeSet::new(),
            display_mode,
            single_delete_target: None,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size, self.total_count)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PageSize::default(), DisplayMode::default())
    }
}
