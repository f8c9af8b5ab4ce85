//! Client-side sorting and filtering for the paper table.
//!
//! Only the rows of the current page are touched; server-side search and
//! paging happen through the list query.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::cmp::Ordering;

use crate::net::types::Paper;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Title,
    Author,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableSort {
    pub column: Option<(SortColumn, SortDirection)>,
}

impl TableSort {
    /// Header click: a new column sorts ascending, the same column flips.
    pub fn toggle(&mut self, column: SortColumn) {
        self.column = match self.column {
            Some((current, SortDirection::Asc)) if current == column => Some((column, SortDirection::Desc)),
            _ => Some((column, SortDirection::Asc)),
        };
    }

    #[must_use]
    pub fn direction(&self, column: SortColumn) -> Option<SortDirection> {
        self.column.and_then(|(c, d)| (c == column).then_some(d))
    }
}

fn sort_key(paper: &Paper, column: SortColumn) -> String {
    match column {
        SortColumn::Title => paper.title.to_lowercase(),
        SortColumn::Author => paper.user.name.to_lowercase(),
    }
}

/// Rows whose title contains `filter` (case-insensitive), in sort order.
/// Ties keep server order.
#[must_use]
pub fn visible_rows(papers: &[Paper], filter: &str, sort: TableSort) -> Vec<Paper> {
    let needle = filter.trim().to_lowercase();
    let mut rows: Vec<Paper> = papers
        .iter()
        .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if let Some((column, direction)) = sort.column {
        rows.sort_by(|a, b| {
            let ordering: Ordering = sort_key(a, column).cmp(&sort_key(b, column));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
    rows
}
