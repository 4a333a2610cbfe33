use tracing::{debug, warn};

use crate::api::{ApiError, CatalogApi};
use crate::filter::{filter_listings, PriceTier, SearchCriteria};
use crate::listing::Listing;
use crate::paginate::{paginate, PageView, PAGE_SIZE};

// Lifecycle of the in-memory listing collection. The snapshot is replaced
// wholesale by a completed fetch; nothing mutates individual records.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Loading,
    Loaded(Vec<Listing>),
}

impl Snapshot {
    pub fn is_loading(&self) -> bool {
        matches!(self, Snapshot::Loading)
    }

    pub fn listings(&self) -> &[Listing] {
        match self {
            Snapshot::Loading => &[],
            Snapshot::Loaded(listings) => listings,
        }
    }
}

// One command per input source: fetch completion, search box, filter modal,
// page selector.
#[derive(Debug, Clone)]
pub enum DiscoveryEvent {
    SnapshotLoaded {
        generation: u64,
        listings: Vec<Listing>,
    },
    QueryChanged(String),
    TierToggled { tier: PriceTier, selected: bool },
    PageClicked(usize),
}

// Session state for the catalog page. Sole owner of the snapshot, the search
// criteria and the page cursor; everything shown on screen derives from
// these through `view`.
#[derive(Debug)]
pub struct DiscoveryState {
    snapshot: Snapshot,
    criteria: SearchCriteria,
    // Independent of the criteria; changing a filter does not move it
    page: usize,
    generation: u64,
}

impl Default for DiscoveryState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoveryState {
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot::Loading,
            criteria: SearchCriteria::default(),
            page: 1,
            generation: 0,
        }
    }

    // Hands out the generation a completed fetch must echo back. A response
    // carrying an older generation is discarded in `apply`.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn apply(&mut self, event: DiscoveryEvent) {
        match event {
            DiscoveryEvent::SnapshotLoaded {
                generation,
                listings,
            } => {
                if generation != self.generation {
                    warn!(
                        generation,
                        current = self.generation,
                        "discarding stale listing fetch"
                    );
                    return;
                }
                debug!(count = listings.len(), "catalog snapshot loaded");
                self.snapshot = Snapshot::Loaded(listings);
            }
            DiscoveryEvent::QueryChanged(query) => {
                debug!(%query, "search query changed");
                self.criteria.query = query;
            }
            DiscoveryEvent::TierToggled { tier, selected } => {
                debug!(?tier, selected, "price band toggled");
                self.criteria.tiers.set(tier, selected);
            }
            DiscoveryEvent::PageClicked(page) => {
                debug!(page, "page selected");
                self.page = page;
            }
        }
    }

    // The rendering-ready view, recomputed from scratch on every call. No
    // derived data is stored back into the state.
    pub fn view(&self) -> DiscoveryView {
        let filtered = filter_listings(self.snapshot.listings(), &self.criteria);
        let page = paginate(&filtered, self.page, PAGE_SIZE);

        DiscoveryView {
            loading: self.snapshot.is_loading(),
            page,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn page(&self) -> usize {
        self.page
    }
}

// What the catalog page renders: the visible slice plus the flags that pick
// between the loader, the cards and the not-found box.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryView {
    pub loading: bool,
    pub page: PageView,
}

impl DiscoveryView {
    pub fn visible(&self) -> &[Listing] {
        &self.page.visible
    }

    pub fn page_count(&self) -> usize {
        self.page.page_count
    }

    // "No Places found" is only shown once the snapshot has arrived; while
    // it is still loading the spinner wins.
    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.page.visible.is_empty()
    }
}

// Owns the API collaborator and the session state, and drives the one-off
// catalog fetch through the generation guard.
pub struct DiscoveryController<C> {
    client: C,
    state: DiscoveryState,
}

impl<C: CatalogApi> DiscoveryController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: DiscoveryState::new(),
        }
    }

    // On failure the snapshot stays in `Loading`; there is no retry.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let generation = self.state.begin_fetch();
        let listings = self.client.fetch_places().await?;
        self.state.apply(DiscoveryEvent::SnapshotLoaded {
            generation,
            listings,
        });
        Ok(())
    }

    pub fn apply(&mut self, event: DiscoveryEvent) {
        self.state.apply(event);
    }

    pub fn view(&self) -> DiscoveryView {
        self.state.view()
    }

    pub fn state(&self) -> &DiscoveryState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_server::MockCatalog;

    fn place(id: &str, title: &str, address: &str, price: u32) -> Listing {
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            address: address.to_string(),
            price,
            photos: vec![],
        }
    }

    fn catalog(count: usize) -> Vec<Listing> {
        (0..count)
            .map(|i| place(&format!("p{}", i), &format!("Stay {}", i), "Somewhere", 1500))
            .collect()
    }

    fn loaded_state(listings: Vec<Listing>) -> DiscoveryState {
        let mut state = DiscoveryState::new();
        let generation = state.begin_fetch();
        state.apply(DiscoveryEvent::SnapshotLoaded {
            generation,
            listings,
        });
        state
    }

    #[test]
    fn test_loading_is_distinct_from_empty_results() {
        let state = DiscoveryState::new();
        let view = state.view();

        assert!(view.loading);
        assert!(view.visible().is_empty());
        assert!(!view.is_empty_result(), "the spinner wins while loading");
    }

    #[test]
    fn test_no_matches_is_an_empty_result_once_loaded() {
        let mut state = loaded_state(catalog(3));
        state.apply(DiscoveryEvent::QueryChanged("nowhere".to_string()));

        let view = state.view();
        assert!(!view.loading);
        assert!(view.is_empty_result());
    }

    #[test]
    fn test_query_change_recomputes_the_view() {
        let mut state = loaded_state(vec![
            place("a", "Sea View Villa", "Mumbai", 2500),
            place("b", "Hill Cabin", "Manali", 800),
        ]);

        assert_eq!(state.view().visible().len(), 2);

        state.apply(DiscoveryEvent::QueryChanged("villa".to_string()));
        let view = state.view();
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.visible()[0].id, "a");
    }

    #[test]
    fn test_tier_toggle_applies_and_clears() {
        let mut state = loaded_state(vec![
            place("a", "Hut", "Goa", 500),
            place("b", "Villa", "Alibaug", 2500),
        ]);

        state.apply(DiscoveryEvent::TierToggled {
            tier: PriceTier::Budget,
            selected: true,
        });
        assert_eq!(state.view().visible().len(), 1);

        state.apply(DiscoveryEvent::TierToggled {
            tier: PriceTier::Budget,
            selected: false,
        });
        assert_eq!(state.view().visible().len(), 2);
    }

    #[test]
    fn test_page_cursor_survives_filter_change() {
        // A user on page 3 who narrows the filter down to a handful of
        // results lands on an empty page; the cursor is not pulled back.
        let mut listings = catalog(17);
        listings.push(place("x", "Lone Villa", "Alibaug", 1500));
        let mut state = loaded_state(listings);

        state.apply(DiscoveryEvent::PageClicked(3));
        assert_eq!(state.view().visible().len(), 2);

        state.apply(DiscoveryEvent::QueryChanged("lone".to_string()));
        let view = state.view();
        assert_eq!(state.page(), 3);
        assert_eq!(view.page_count(), 1);
        assert!(view.visible().is_empty());
        assert!(view.is_empty_result());
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut state = DiscoveryState::new();

        let stale = state.begin_fetch();
        let current = state.begin_fetch();

        state.apply(DiscoveryEvent::SnapshotLoaded {
            generation: stale,
            listings: catalog(5),
        });
        assert!(state.snapshot().is_loading(), "stale payload must not land");

        state.apply(DiscoveryEvent::SnapshotLoaded {
            generation: current,
            listings: catalog(2),
        });
        assert_eq!(state.snapshot().listings().len(), 2);
    }

    #[test]
    fn test_event_replay_is_deterministic() {
        let events = vec![
            DiscoveryEvent::QueryChanged("villa".to_string()),
            DiscoveryEvent::TierToggled {
                tier: PriceTier::Premium,
                selected: true,
            },
            DiscoveryEvent::PageClicked(2),
            DiscoveryEvent::QueryChanged("".to_string()),
        ];

        let mut first = loaded_state(catalog(20));
        let mut second = loaded_state(catalog(20));
        for event in &events {
            first.apply(event.clone());
            second.apply(event.clone());
        }

        assert_eq!(first.view(), second.view());
    }

    #[tokio::test]
    async fn test_controller_load_populates_the_snapshot() {
        let mock = MockCatalog::new();
        mock.seed_places(vec![
            place("a", "Sea View Villa", "Mumbai", 2500),
            place("b", "Hill Cabin", "Manali", 800),
        ]);

        let mut controller = DiscoveryController::new(mock);
        assert!(controller.view().loading);

        controller.load().await.unwrap();

        let view = controller.view();
        assert!(!view.loading);
        assert_eq!(view.visible().len(), 2);
        assert_eq!(view.visible()[0].id, "a", "snapshot order is preserved");
    }

    #[tokio::test]
    async fn test_failed_load_stays_loading() {
        let mock = MockCatalog::new();
        mock.seed_places(catalog(3));
        mock.fail_next_requests(1);

        let mut controller = DiscoveryController::new(mock);
        let result = controller.load().await;

        assert!(result.is_err());
        assert!(controller.view().loading);
        assert!(!controller.view().is_empty_result());
    }
}
