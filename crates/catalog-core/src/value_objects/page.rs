//! Offset pagination value objects
//!
//! `PageRequest` describes which slice of a result set to load and how to order it.
//! `Page` is that slice plus the metadata needed to navigate the rest of the set.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// SQL keyword for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse a direction, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// One ordering criterion: a property name and a direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    /// Ascending order on `property`
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending order on `property`
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Error when parsing a `property[,direction]` sort expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortParseError {
    #[error("sort property must not be empty")]
    EmptyProperty,

    #[error("invalid sort direction: {0}")]
    InvalidDirection(String),
}

impl FromStr for SortOrder {
    type Err = SortParseError;

    /// Accepts `name`, `name,asc` or `name,desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let property = parts.next().unwrap_or_default().trim();
        if property.is_empty() {
            return Err(SortParseError::EmptyProperty);
        }

        let direction = match parts.next() {
            Some(raw) if !raw.trim().is_empty() => Direction::parse(raw)
                .ok_or_else(|| SortParseError::InvalidDirection(raw.trim().to_string()))?,
            _ => Direction::Asc,
        };

        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.direction.as_sql())
    }
}

/// Request for one page of a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Vec<SortOrder>,
}

impl PageRequest {
    /// Create an unsorted request. A zero `size` is raised to 1.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Vec::new(),
        }
    }

    /// Replace the sort criteria
    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Zero-based page index
    #[inline]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of elements on the page
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Sort criteria, in priority order
    #[inline]
    pub fn sort(&self) -> &[SortOrder] {
        &self.sort
    }

    /// Number of rows to skip
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Number of rows to fetch
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    /// Reject sort properties outside `allowed`
    pub fn ensure_sortable(&self, allowed: &[&str]) -> Result<(), DomainError> {
        match self
            .sort
            .iter()
            .find(|order| !allowed.contains(&order.property.as_str()))
        {
            Some(order) => Err(DomainError::InvalidSort(order.property.clone())),
            None => Ok(()),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// One page of a result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Create a page from its content and the size of the whole result set
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            request,
            total_elements,
        }
    }

    /// A page with no content over an empty result set
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Map every element, keeping order and page metadata unchanged
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Zero-based page index
    pub fn number(&self) -> u32 {
        self.request.page()
    }

    /// Requested page size
    pub fn size(&self) -> u32 {
        self.request.size()
    }

    pub fn sort(&self) -> &[SortOrder] {
        self.request.sort()
    }

    /// Size of the whole result set
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages needed for the whole result set
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size()))
    }

    /// Number of elements on this page
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.number() == 0
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number()) + 1 < self.total_pages()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse() {
        let order: SortOrder = "name,desc".parse().unwrap();
        assert_eq!(order, SortOrder::desc("name"));

        let order: SortOrder = "price".parse().unwrap();
        assert_eq!(order, SortOrder::asc("price"));

        let order: SortOrder = "name,ASC".parse().unwrap();
        assert_eq!(order.direction, Direction::Asc);

        assert_eq!(
            ",desc".parse::<SortOrder>(),
            Err(SortParseError::EmptyProperty)
        );
        assert_eq!(
            "name,sideways".parse::<SortOrder>(),
            Err(SortParseError::InvalidDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_page_request_offsets() {
        let request = PageRequest::new(3, 12);
        assert_eq!(request.offset(), 36);
        assert_eq!(request.limit(), 12);

        let request = PageRequest::new(0, 0);
        assert_eq!(request.size(), 1);
    }

    #[test]
    fn test_ensure_sortable() {
        let request = PageRequest::new(0, 10).with_sort(vec![SortOrder::asc("name")]);
        assert!(request.ensure_sortable(&["id", "name"]).is_ok());

        let request = PageRequest::new(0, 10).with_sort(vec![SortOrder::asc("password")]);
        let err = request.ensure_sortable(&["id", "name"]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSort(p) if p == "password"));
    }

    #[test]
    fn test_page_metadata() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(0, 3), 7);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.number_of_elements(), 3);
        assert!(page.is_first());
        assert!(page.has_next());
        assert!(!page.is_last());

        let page = Page::new(vec![7], PageRequest::new(2, 3), 7);
        assert!(page.is_last());
        assert!(!page.is_first());
    }

    #[test]
    fn test_empty_page() {
        let page: Page<i32> = Page::empty(PageRequest::new(0, 20));
        assert!(page.is_empty());
        assert_eq!(page.total_elements(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_last());
    }

    #[test]
    fn test_map_preserves_order_and_metadata() {
        let request = PageRequest::new(1, 4).with_sort(vec![SortOrder::desc("name")]);
        let page = Page::new(vec![4, 3, 2, 1], request.clone(), 9);

        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.content(), &[40, 30, 20, 10]);
        assert_eq!(mapped.request(), &request);
        assert_eq!(mapped.total_elements(), 9);
        assert_eq!(mapped.number(), 1);
        assert_eq!(mapped.size(), 4);
    }
}
