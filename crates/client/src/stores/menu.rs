//! Menu cache store.
//!
//! Holds the last-fetched menu snapshot for a table and avoids redundant
//! network fetches within a fixed freshness window. The store never
//! fetches: the menu page checks [`MenuStore::is_cache_valid`], fetches on
//! a miss, and hands the result back via [`MenuStore::set_menu_cache`].
//!
//! Overlapping fetches for the same table are ordered by fetch tickets:
//! every fetch takes a monotonically numbered ticket and only the
//! highest-numbered result is accepted, so a slow stale response can never
//! overwrite a newer snapshot (last-issued-wins).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use table_tap_core::{ItemId, MenuItem, MenuPayload, TableContext};

/// How long a cached menu stays fresh.
pub const CACHE_WINDOW: Duration = Duration::from_secs(5 * 60);

/// How many items the best-sellers view holds.
const BEST_SELLER_COUNT: usize = 4;

/// How many items the recommended view holds.
const RECOMMENDED_COUNT: usize = 2;

/// Everything a successful menu fetch produces, replaced as a unit.
#[derive(Debug, Clone)]
pub struct MenuSnapshot {
    pub menu: MenuPayload,
    pub table: TableContext,
    /// Resolved photo URL per item.
    pub photo_urls: HashMap<ItemId, String>,
}

/// A numbered in-flight fetch. Obtained from [`MenuStore::begin_fetch`]
/// and redeemed at [`MenuStore::set_menu_cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
struct CachedMenu {
    snapshot: MenuSnapshot,
    best_sellers: Vec<MenuItem>,
    recommended: Vec<MenuItem>,
    fetched_at: Instant,
}

/// Menu cache store.
pub struct MenuStore {
    cached: Option<CachedMenu>,
    error: Option<String>,
    cache_window: Duration,
    issued_seq: u64,
    applied_seq: u64,
}

impl Default for MenuStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuStore {
    /// Construct an empty store with the standard freshness window.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_window(CACHE_WINDOW)
    }

    /// Construct an empty store with a custom freshness window.
    #[must_use]
    pub const fn with_window(cache_window: Duration) -> Self {
        Self {
            cached: None,
            error: None,
            cache_window,
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    /// Take a ticket for a fetch that is about to start.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        FetchTicket(self.issued_seq)
    }

    /// Replace the cached snapshot as a unit and derive the read views.
    ///
    /// Accepts the snapshot only when `ticket` is the newest applied so
    /// far; a stale ticket (an older fetch resolving late) is dropped and
    /// `false` is returned. On accept, the timestamp resets to now and any
    /// prior error state clears.
    pub fn set_menu_cache(&mut self, ticket: FetchTicket, snapshot: MenuSnapshot) -> bool {
        if ticket.0 <= self.applied_seq {
            tracing::debug!(
                ticket = ticket.0,
                applied = self.applied_seq,
                "dropping stale menu fetch result"
            );
            return false;
        }
        self.applied_seq = ticket.0;

        let items = &snapshot.menu.items;

        // Top N by popularity, descending; stable sort keeps input order on ties
        let mut by_popularity: Vec<MenuItem> = items.clone();
        by_popularity.sort_by(|a, b| b.popularity_score.cmp(&a.popularity_score));
        by_popularity.truncate(BEST_SELLER_COUNT);

        let recommended: Vec<MenuItem> = items
            .iter()
            .filter(|item| item.is_chef_recommended)
            .take(RECOMMENDED_COUNT)
            .cloned()
            .collect();

        self.cached = Some(CachedMenu {
            snapshot,
            best_sellers: by_popularity,
            recommended,
            fetched_at: Instant::now(),
        });
        self.error = None;
        true
    }

    /// Reset every field to empty.
    ///
    /// Used on table or token change: a different table must never serve a
    /// stale table's cached menu. Ticket numbering stays monotonic so a
    /// fetch issued before the clear still cannot resurrect old data over
    /// a newer fetch issued after it.
    pub fn clear_menu_cache(&mut self) {
        self.cached = None;
        self.error = None;
    }

    /// Whether the cached snapshot may be served without a refresh.
    ///
    /// Purely a function of wall-clock time: true iff a snapshot exists
    /// and is younger than the freshness window.
    #[must_use]
    pub fn is_cache_valid(&self) -> bool {
        self.is_cache_valid_at(Instant::now())
    }

    /// [`Self::is_cache_valid`] against an explicit clock reading.
    #[must_use]
    pub fn is_cache_valid_at(&self, now: Instant) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|c| now.saturating_duration_since(c.fetched_at) < self.cache_window)
    }

    /// Record a fetch failure for the UI to surface.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// The last recorded fetch error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // =========================================================================
    // Readers
    // =========================================================================

    /// The cached menu payload, regardless of freshness.
    #[must_use]
    pub fn menu_data(&self) -> Option<&MenuPayload> {
        self.cached.as_ref().map(|c| &c.snapshot.menu)
    }

    /// Every cached item, in fetch order.
    #[must_use]
    pub fn all_items(&self) -> &[MenuItem] {
        self.cached
            .as_ref()
            .map_or(&[], |c| c.snapshot.menu.items.as_slice())
    }

    /// The cached table context.
    #[must_use]
    pub fn table_info(&self) -> Option<&TableContext> {
        self.cached.as_ref().map(|c| &c.snapshot.table)
    }

    /// Resolved photo URL for an item.
    #[must_use]
    pub fn photo_url(&self, item_id: ItemId) -> Option<&str> {
        self.cached
            .as_ref()
            .and_then(|c| c.snapshot.photo_urls.get(&item_id))
            .map(String::as_str)
    }

    /// Top items by popularity score, descending, ties in fetch order.
    #[must_use]
    pub fn best_sellers(&self) -> &[MenuItem] {
        self.cached.as_ref().map_or(&[], |c| c.best_sellers.as_slice())
    }

    /// Chef-recommended items, capped, in fetch order.
    #[must_use]
    pub fn recommended(&self) -> &[MenuItem] {
        self.cached.as_ref().map_or(&[], |c| c.recommended.as_slice())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use table_tap_core::{
        CategoryId, MenuItemStatus, Pagination, Price, RestaurantId, TableId,
    };

    fn item(name: &str, popularity: i64, chef: bool) -> MenuItem {
        MenuItem {
            id: ItemId::generate(),
            category_id: CategoryId::generate(),
            name: name.to_owned(),
            description: None,
            price: Price::new("5.00".parse().unwrap()).unwrap(),
            status: MenuItemStatus::Available,
            is_chef_recommended: chef,
            popularity_score: popularity,
            prep_time_minutes: None,
            primary_photo_id: None,
            modifier_groups: Vec::new(),
        }
    }

    fn snapshot(items: Vec<MenuItem>) -> MenuSnapshot {
        let total = items.len() as u64;
        MenuSnapshot {
            menu: MenuPayload {
                categories: Vec::new(),
                items,
                pagination: Pagination::single_page(total),
            },
            table: TableContext {
                table_id: TableId::generate(),
                restaurant_id: RestaurantId::generate(),
                table_number: "3".to_owned(),
            },
            photo_urls: HashMap::new(),
        }
    }

    #[test]
    fn test_cache_invalid_before_first_set() {
        let store = MenuStore::new();
        assert!(!store.is_cache_valid());
        assert!(store.menu_data().is_none());
    }

    #[test]
    fn test_cache_valid_immediately_after_set() {
        let mut store = MenuStore::new();
        let ticket = store.begin_fetch();
        assert!(store.set_menu_cache(ticket, snapshot(vec![item("a", 1, false)])));
        assert!(store.is_cache_valid());
    }

    #[test]
    fn test_cache_expires_past_window() {
        let mut store = MenuStore::with_window(Duration::from_secs(300));
        let ticket = store.begin_fetch();
        store.set_menu_cache(ticket, snapshot(Vec::new()));

        let now = Instant::now();
        assert!(store.is_cache_valid_at(now + Duration::from_secs(299)));
        assert!(!store.is_cache_valid_at(now + Duration::from_secs(301)));
    }

    #[test]
    fn test_best_sellers_descending_stable() {
        let mut store = MenuStore::new();
        let ticket = store.begin_fetch();
        store.set_menu_cache(
            ticket,
            snapshot(vec![
                item("five", 5, false),
                item("nine", 9, false),
                item("one", 1, false),
            ]),
        );

        let names: Vec<&str> = store.best_sellers().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["nine", "five", "one"]);
    }

    #[test]
    fn test_best_sellers_ties_keep_input_order_and_cap() {
        let mut store = MenuStore::new();
        let ticket = store.begin_fetch();
        store.set_menu_cache(
            ticket,
            snapshot(vec![
                item("a", 3, false),
                item("b", 3, false),
                item("c", 7, false),
                item("d", 3, false),
                item("e", 3, false),
            ]),
        );

        let names: Vec<&str> = store.best_sellers().iter().map(|i| i.name.as_str()).collect();
        // capped at 4; equal scores stay in input order behind the leader
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_recommended_capped_in_input_order() {
        let mut store = MenuStore::new();
        let ticket = store.begin_fetch();
        store.set_menu_cache(
            ticket,
            snapshot(vec![
                item("a", 0, true),
                item("b", 0, false),
                item("c", 0, true),
                item("d", 0, true),
            ]),
        );

        let names: Vec<&str> = store.recommended().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = MenuStore::new();
        let ticket = store.begin_fetch();
        store.set_menu_cache(ticket, snapshot(vec![item("a", 1, true)]));
        store.set_error("boom");

        store.clear_menu_cache();

        assert!(!store.is_cache_valid());
        assert!(store.menu_data().is_none());
        assert!(store.table_info().is_none());
        assert!(store.best_sellers().is_empty());
        assert!(store.recommended().is_empty());
        assert!(store.error().is_none());
    }

    #[test]
    fn test_stale_fetch_result_is_dropped() {
        let mut store = MenuStore::new();

        let first = store.begin_fetch();
        let second = store.begin_fetch();

        // Second (newer) fetch resolves first and wins
        assert!(store.set_menu_cache(second, snapshot(vec![item("new", 1, false)])));
        // First resolves late; must not overwrite
        assert!(!store.set_menu_cache(first, snapshot(vec![item("old", 1, false)])));

        assert_eq!(store.all_items()[0].name, "new");
    }

    #[test]
    fn test_fetch_issued_before_clear_cannot_apply_after_newer_fetch() {
        let mut store = MenuStore::new();

        let before_clear = store.begin_fetch();
        store.clear_menu_cache();
        let after_clear = store.begin_fetch();

        assert!(store.set_menu_cache(after_clear, snapshot(vec![item("fresh", 1, false)])));
        assert!(!store.set_menu_cache(before_clear, snapshot(vec![item("stale", 1, false)])));
        assert_eq!(store.all_items()[0].name, "fresh");
    }

    #[test]
    fn test_set_clears_error() {
        let mut store = MenuStore::new();
        store.set_error("network down");
        assert_eq!(store.error(), Some("network down"));

        let ticket = store.begin_fetch();
        store.set_menu_cache(ticket, snapshot(Vec::new()));
        assert!(store.error().is_none());
    }
}
