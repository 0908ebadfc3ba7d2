//! Relay cursor-connection building blocks.
//!
//! The gateway adds no pagination logic of its own: connection arguments are
//! forwarded to the backend as a [`Pagination`] window and the page flags
//! the backend returns are copied into [`PageInfo`] verbatim. Cursors are
//! opaque backend strings, forwarded and echoed but never interpreted.

use {
    async_graphql::{Enum, InputObject, SimpleObject},
    edgecloud_service_traits::common::{
        Pagination, SortingDirection as ProtoSortingDirection,
        SortingOptionPair as ProtoSortingOptionPair,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct PageInfo {
    /// Cursor of the first edge, empty when the page is empty.
    pub start_cursor: String,
    /// Cursor of the last edge, empty when the page is empty.
    pub end_cursor: String,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    /// Build page info from the cursors of a page, in page order.
    pub fn from_cursors<'a>(
        cursors: impl IntoIterator<Item = &'a str>,
        has_previous_page: bool,
        has_next_page: bool,
    ) -> Self {
        let mut cursors = cursors.into_iter();
        let start_cursor = cursors.next().unwrap_or_default().to_string();
        let end_cursor = cursors.last().map_or_else(|| start_cursor.clone(), str::to_string);
        Self {
            start_cursor,
            end_cursor,
            has_next_page,
            has_previous_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum SortingDirection {
    Ascending,
    Descending,
}

impl From<SortingDirection> for ProtoSortingDirection {
    fn from(value: SortingDirection) -> Self {
        match value {
            SortingDirection::Ascending => Self::Ascending,
            SortingDirection::Descending => Self::Descending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, InputObject)]
pub struct SortingOptionPair {
    pub name: String,
    pub direction: SortingDirection,
}

impl From<SortingOptionPair> for ProtoSortingOptionPair {
    fn from(value: SortingOptionPair) -> Self {
        Self {
            name: value.name,
            direction: ProtoSortingDirection::from(value.direction) as i32,
        }
    }
}

/// Standard Relay connection arguments plus sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
    pub sorting_options: Vec<SortingOptionPair>,
}

impl ConnectionArgs {
    #[must_use]
    pub fn new(
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        sorting_options: Option<Vec<SortingOptionPair>>,
    ) -> Self {
        Self {
            first,
            after,
            last,
            before,
            sorting_options: sorting_options.unwrap_or_default(),
        }
    }

    /// Translate into the backend pagination window, flagging exactly the
    /// arguments that were supplied.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination {
            has_after: self.after.is_some(),
            after: self.after.clone().unwrap_or_default(),
            has_first: self.first.is_some(),
            first: self.first.unwrap_or_default(),
            has_before: self.before.is_some(),
            before: self.before.clone().unwrap_or_default(),
            has_last: self.last.is_some(),
            last: self.last.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn sorting_options(&self) -> Vec<ProtoSortingOptionPair> {
        self.sorting_options
            .iter()
            .cloned()
            .map(ProtoSortingOptionPair::from)
            .collect()
    }
}
