//! Search session state.
//!
//! `CatalogSearchSession` owns what a search panel shows: the typed text,
//! the last stable query, the current page of results and any error. It
//! never touches the network on its own. Commands hand out a
//! `SearchTicket`; the caller runs the ticket against a `CatalogClient`
//! (see [`CatalogSearchSession::fetch`]) and reports the outcome back with
//! [`CatalogSearchSession::complete`].
//!
//! ## Ordering
//!
//! Every ticket carries a sequence number from a per-session counter.
//! Responses may arrive in any order; only the response for the most
//! recently issued ticket is applied. Anything older is dropped.
//!
//! ## Results
//!
//! Each applied page replaces the previous one. Within a page, cards that
//! repeat an earlier (name, set) pair are dropped.

use std::time::Duration;

use rustc_hash::FxHashSet;
use tokio::time::Instant;
use tracing::debug;

use super::client::{CatalogClient, SearchPage};
use super::debounce::Debouncer;
use super::error::{CatalogError, CatalogResult};
use crate::cards::CardRecord;
use crate::config::EngineConfig;

/// A search request the session has committed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
    pub page: u32,
}

/// One applied page of results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResults {
    pub items: Vec<CardRecord>,
    pub has_more: bool,
}

impl From<SearchPage> for SearchResults {
    fn from(page: SearchPage) -> Self {
        Self {
            items: dedup_by_printing(page.data),
            has_more: page.has_more,
        }
    }
}

/// Drop cards whose (name, set) pair already appeared earlier in `cards`.
#[must_use]
pub fn dedup_by_printing(cards: Vec<CardRecord>) -> Vec<CardRecord> {
    let mut seen: FxHashSet<(String, Option<String>)> = FxHashSet::default();
    cards
        .into_iter()
        .filter(|card| seen.insert((card.name.clone(), card.set.clone())))
        .collect()
}

#[derive(Clone, Debug)]
pub struct CatalogSearchSession {
    debouncer: Debouncer,
    input: String,
    query: String,
    results: SearchResults,
    page: u32,
    loading: bool,
    error: Option<String>,
    latest_seq: u64,
}

impl CatalogSearchSession {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            input: String::new(),
            query: String::new(),
            results: SearchResults::default(),
            page: 1,
            loading: false,
            error: None,
            latest_seq: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.search_debounce)
    }

    // === Queries ===

    /// Text as last typed, stable or not.
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input
    }

    /// The last query that survived the debounce (or was searched directly).
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[CardRecord] {
        &self.results.items
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.results.has_more
    }

    /// Page of the latest request (1-based).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sequence number of the most recently issued ticket.
    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// When the pending input becomes due, for scheduling the next `poll`.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    // === Commands ===

    /// Record a keystroke. Replaces any input still waiting out the delay.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.input.clone_from(&text);
        self.debouncer.input(text, now);
    }

    /// Issue the page-1 request for input that has been stable long enough.
    ///
    /// Returns `None` when nothing is due, or when the stable text is blank
    /// (the results are cleared locally instead).
    pub fn poll(&mut self, now: Instant) -> Option<SearchTicket> {
        let text = self.debouncer.poll(now)?;
        self.issue(text, 1)
    }

    /// Jump to `page` of the last stable query, skipping the debounce.
    pub fn go_to_page(&mut self, page: u32) -> CatalogResult<Option<SearchTicket>> {
        if page == 0 {
            return Err(CatalogError::InvalidPage(page));
        }
        Ok(self.issue(self.query.clone(), page))
    }

    /// Search right away, bypassing the debounce.
    pub fn submit(&mut self, query: impl Into<String>, page: u32) -> CatalogResult<Option<SearchTicket>> {
        if page == 0 {
            return Err(CatalogError::InvalidPage(page));
        }
        let query = query.into();
        self.debouncer.cancel();
        self.input.clone_from(&query);
        Ok(self.issue(query, page))
    }

    fn issue(&mut self, query: String, page: u32) -> Option<SearchTicket> {
        self.latest_seq += 1;
        self.query = query;
        self.page = page;
        self.error = None;

        if self.query.trim().is_empty() {
            self.results = SearchResults::default();
            self.loading = false;
            return None;
        }

        self.loading = true;
        Some(SearchTicket {
            seq: self.latest_seq,
            query: self.query.trim().to_owned(),
            page,
        })
    }

    /// Apply the outcome of `ticket`.
    ///
    /// Returns `Ok(false)` when a newer ticket has been issued since, in
    /// which case nothing changes. A failure for the latest ticket clears
    /// the results, keeps the query, records the message and is returned.
    pub fn complete(&mut self, ticket: &SearchTicket, outcome: CatalogResult<SearchPage>) -> CatalogResult<bool> {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                query = %ticket.query,
                "discarding stale search response"
            );
            return Ok(false);
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                self.results = SearchResults::from(page);
                self.error = None;
                Ok(true)
            }
            Err(err) => {
                self.results = SearchResults::default();
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Run `ticket` against `client`. Borrows nothing from the session, so
    /// several tickets may be in flight at once.
    pub async fn fetch<C: CatalogClient>(client: &C, ticket: &SearchTicket) -> CatalogResult<SearchPage> {
        client.search(&ticket.query, ticket.page).await
    }

    /// Fetch and apply `ticket` in one step.
    pub async fn run<C: CatalogClient>(&mut self, client: &C, ticket: &SearchTicket) -> CatalogResult<bool> {
        let outcome = Self::fetch(client, ticket).await;
        self.complete(ticket, outcome)
    }

    /// Search `query` at `page` and return the page now held by the session.
    ///
    /// A blank query returns an empty result without contacting `client`.
    pub async fn search<C: CatalogClient>(
        &mut self,
        client: &C,
        query: &str,
        page: u32,
    ) -> CatalogResult<SearchResults> {
        if let Some(ticket) = self.submit(query, page)? {
            self.run(client, &ticket).await?;
        }
        Ok(self.results.clone())
    }
}

impl Default for CatalogSearchSession {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    fn card(id: &str, name: &str, set: &str) -> CardRecord {
        CardRecord::new(id, name, "Creature — Elf").with_set(set)
    }

    fn page_of(cards: Vec<CardRecord>, has_more: bool) -> SearchPage {
        SearchPage { data: cards, has_more }
    }

    #[test]
    fn test_dedup_by_printing() {
        let cards = vec![
            card("1", "Llanowar Elves", "m19"),
            card("2", "Llanowar Elves", "m19"),
            card("3", "Llanowar Elves", "dom"),
            card("4", "Elvish Mystic", "m19"),
        ];
        let ids: Vec<_> = dedup_by_printing(cards).into_iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_poll_issues_page_one_after_quiet_period() {
        let start = Instant::now();
        let mut session = CatalogSearchSession::new(DELAY);
        session.input("el", start);
        session.input("elf", start + Duration::from_millis(200));

        assert_eq!(session.poll(start + Duration::from_millis(600)), None);
        let ticket = session.poll(start + Duration::from_millis(700)).unwrap();
        assert_eq!(ticket.query, "elf");
        assert_eq!(ticket.page, 1);
        assert!(session.is_loading());
    }

    #[test]
    fn test_blank_query_clears_without_ticket() {
        let mut session = CatalogSearchSession::new(DELAY);
        let ticket = session.submit("elf", 1).unwrap().unwrap();
        session.complete(&ticket, Ok(page_of(vec![card("1", "A", "x")], true))).unwrap();

        assert_eq!(session.submit("   ", 1).unwrap(), None);
        assert!(session.results().is_empty());
        assert!(!session.has_more());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut session = CatalogSearchSession::new(DELAY);
        let first = session.submit("elf", 1).unwrap().unwrap();
        let second = session.submit("goblin", 1).unwrap().unwrap();

        let applied = session
            .complete(&second, Ok(page_of(vec![card("g", "Goblin Guide", "zen")], false)))
            .unwrap();
        assert!(applied);

        let applied = session
            .complete(&first, Ok(page_of(vec![card("e", "Llanowar Elves", "m19")], true)))
            .unwrap();
        assert!(!applied);
        assert_eq!(session.results()[0].name, "Goblin Guide");
        assert!(!session.has_more());
    }

    #[test]
    fn test_go_to_page_uses_stable_query() {
        let start = Instant::now();
        let mut session = CatalogSearchSession::new(DELAY);
        let ticket = session.submit("elf", 1).unwrap().unwrap();
        session.complete(&ticket, Ok(page_of(vec![card("1", "A", "x")], true))).unwrap();

        // Typed but not yet stable.
        session.input("elfx", start);
        let ticket = session.go_to_page(2).unwrap().unwrap();
        assert_eq!(ticket.query, "elf");
        assert_eq!(ticket.page, 2);

        assert!(matches!(session.go_to_page(0), Err(CatalogError::InvalidPage(0))));
    }

    #[test]
    fn test_error_clears_results_keeps_query() {
        let mut session = CatalogSearchSession::new(DELAY);
        let ticket = session.submit("elf", 1).unwrap().unwrap();
        session.complete(&ticket, Ok(page_of(vec![card("1", "A", "x")], true))).unwrap();

        let ticket = session.go_to_page(2).unwrap().unwrap();
        let outcome = Err(CatalogError::Query {
            status: 502,
            message: "upstream unavailable".into(),
        });
        assert!(session.complete(&ticket, outcome).is_err());

        assert!(session.results().is_empty());
        assert!(!session.has_more());
        assert_eq!(session.query(), "elf");
        assert_eq!(session.error(), Some("Failed to search cards: upstream unavailable"));
        assert!(!session.is_loading());
    }
}
