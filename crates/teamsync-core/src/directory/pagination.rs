//! Continuation-link pagination over a directory page source.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{Group, GroupPage};
use crate::error::{SyncError, SyncResult};

/// An authenticated client that can return one page of groups at a time.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Issues the initial query.
    async fn first_page(&self) -> SyncResult<GroupPage>;

    /// Follows a server-issued continuation link verbatim.
    async fn next_page(&self, next_link: &str) -> SyncResult<GroupPage>;
}

/// Fetches every page from `source`, following continuation links until the
/// server stops sending one.
///
/// Any page failure aborts the whole fetch; no partial collection is returned.
/// With `max_pages` unset the loop is unbounded.
pub async fn fetch_all_groups<S>(source: &S, max_pages: Option<usize>) -> SyncResult<Vec<Group>>
where
    S: PageSource + ?Sized,
{
    let mut groups = Vec::new();
    let mut next_link: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        if let Some(max_pages) = max_pages {
            if page_number >= max_pages {
                return Err(SyncError::PaginationLimitExceeded { max_pages });
            }
        }

        debug!(page = page_number, "Fetching groups page");
        let page = match next_link.as_deref() {
            None => source.first_page().await?,
            Some(link) => source.next_page(link).await?,
        };

        groups.extend(page.groups);
        page_number += 1;

        match page.next_link {
            Some(link) => next_link = Some(link),
            None => break,
        }
    }

    info!(count = groups.len(), pages = page_number, "Fetched all groups");
    Ok(groups)
}
