//! Paginated Feed Module
//!
//! Accumulates pages of a list ("load more" / infinite scroll) without
//! duplicating records, with an in-flight guard and generation tickets so a
//! response for a superseded list is never applied.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::AppError;
use crate::source::{decode, with_cancel, MediaSource, Query};
use crate::tmdb::{Identified, Page};

// == Page Ticket ==
/// Permission to load one page, handed out by [`Feed::begin_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    page: u32,
    generation: u64,
}

impl PageTicket {
    /// Page number to request.
    pub fn page(&self) -> u32 {
        self.page
    }
}

// == Feed ==
/// Accumulated list built from successive pages.
#[derive(Debug)]
pub struct Feed<T: Identified> {
    items: Vec<T>,
    seen: HashSet<T::Id>,
    /// Last applied page, 0 before the first one
    page: u32,
    has_more: bool,
    in_flight: bool,
    generation: u64,
}

impl<T: Identified> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified> Feed<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            page: 0,
            has_more: true,
            in_flight: false,
            generation: 0,
        }
    }

    /// Claims the next page, or `None` if a load is running or the list is
    /// exhausted.
    pub fn begin_next(&mut self) -> Option<PageTicket> {
        if self.in_flight || !self.has_more {
            return None;
        }
        self.in_flight = true;
        Some(PageTicket {
            page: self.page + 1,
            generation: self.generation,
        })
    }

    /// Appends a loaded page, skipping records already in the list.
    ///
    /// Returns how many records were appended. Tickets from before the last
    /// [`reset`](Self::reset) are ignored.
    pub fn apply(&mut self, ticket: PageTicket, page: Page<T>) -> usize {
        if ticket.generation != self.generation {
            debug!("dropping stale page {} (generation {})", ticket.page, ticket.generation);
            return 0;
        }

        let before = self.items.len();
        for item in page.results {
            if self.seen.insert(item.identity()) {
                self.items.push(item);
            }
        }

        self.page = ticket.page;
        self.has_more = ticket.page < page.total_pages;
        self.in_flight = false;
        self.items.len() - before
    }

    /// Releases the guard after a failed load; accumulated records stay.
    pub fn fail(&mut self, ticket: PageTicket) {
        if ticket.generation == self.generation {
            self.in_flight = false;
        }
    }

    /// Starts over from page 1, e.g. after a filter change.
    pub fn reset(&mut self) {
        self.items.clear();
        self.seen.clear();
        self.page = 0;
        self.has_more = true;
        self.in_flight = false;
        self.generation += 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last applied page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }
}

// == Feed Loader ==
/// Drives a [`Feed`] for one list query on behalf of a view.
///
/// The loader owns a cancellation token: closing or dropping it abandons
/// any request still in flight.
pub struct FeedLoader<T: Identified> {
    feed: Feed<T>,
    query: Query,
    token: CancellationToken,
}

impl<T: Identified + DeserializeOwned + Send> FeedLoader<T> {
    pub fn new(query: Query) -> Self {
        Self {
            feed: Feed::new(),
            query,
            token: CancellationToken::new(),
        }
    }

    pub fn feed(&self) -> &Feed<T> {
        &self.feed
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Token tied to this loader's lifetime.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Loads the next page. Failures are logged and leave the list as is.
    ///
    /// Returns how many records were appended.
    pub async fn load_next(&mut self, source: &dyn MediaSource) -> usize {
        let Some(ticket) = self.feed.begin_next() else {
            return 0;
        };

        let query = self.query.with_page(ticket.page());
        let result = with_cancel(&self.token, async {
            decode::<Page<T>>(source.fetch(&query).await?)
        })
        .await;

        match result {
            Ok(page) => self.feed.apply(ticket, page),
            Err(AppError::Cancelled) => {
                self.feed.fail(ticket);
                0
            }
            Err(err) => {
                error!("Error loading {}: {}", query.cache_key(), err);
                self.feed.fail(ticket);
                0
            }
        }
    }

    /// Switches to another list (new filter), abandoning pending requests.
    pub fn set_query(&mut self, query: Query) {
        self.token.cancel();
        self.token = CancellationToken::new();
        self.query = query;
        self.feed.reset();
    }

    /// Abandons pending requests; later loads resolve as cancelled.
    pub fn close(&self) {
        self.token.cancel();
    }
}

impl<T: Identified> Drop for FeedLoader<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
