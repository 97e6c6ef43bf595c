use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Sort property used when the caller does not ask for one.
pub const DEFAULT_ORDER_BY: &str = "name";

/// Sort direction applied to a paged query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(format!("unknown sort direction `{value}`"))
        }
    }
}

/// Requested slice of a result set: zero-based page number, page size and
/// sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub order_by: String,
    pub direction: Direction,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    /// Request page `page` (zero-based) holding at most `size` items.
    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            order_by: DEFAULT_ORDER_BY.to_string(),
            direction: Direction::Asc,
        }
    }

    /// Sort the page by `order_by` in the given direction.
    pub fn sorted(mut self, order_by: impl Into<String>, direction: Direction) -> Self {
        self.order_by = order_by.into();
        self.direction = direction;
        self
    }
}

/// Bounded slice of a result set plus the metadata needed to navigate it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    /// Wrap `content` fetched for `request` out of `total_elements` rows.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_elements.div_ceil(request.size)
        };
        let number_of_elements = content.len();

        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
            total_pages,
            number_of_elements,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
            empty: number_of_elements == 0,
        }
    }

    /// Convert every item while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
