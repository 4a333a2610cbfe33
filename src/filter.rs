use serde::{Deserialize, Serialize};

use crate::listing::Listing;

// The four price bands offered by the filter modal. The top band has no
// upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Budget,
    Midrange,
    Premium,
    Luxury,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Budget,
        PriceTier::Midrange,
        PriceTier::Premium,
        PriceTier::Luxury,
    ];

    pub fn bounds(self) -> (u32, Option<u32>) {
        match self {
            PriceTier::Budget => (0, Some(999)),
            PriceTier::Midrange => (1000, Some(1999)),
            PriceTier::Premium => (2000, Some(2999)),
            PriceTier::Luxury => (3000, None),
        }
    }

    // Closed interval check; the luxury band is open at the top
    pub fn contains(self, price: u32) -> bool {
        let (low, high) = self.bounds();
        price >= low && high.map_or(true, |h| price <= h)
    }

    fn index(self) -> usize {
        match self {
            PriceTier::Budget => 0,
            PriceTier::Midrange => 1,
            PriceTier::Premium => 2,
            PriceTier::Luxury => 3,
        }
    }
}

// Multi-select state of the price filter. Bands combine with OR; an empty
// selection leaves every listing through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierSelection {
    selected: [bool; 4],
}

impl TierSelection {
    pub fn set(&mut self, tier: PriceTier, selected: bool) {
        self.selected[tier.index()] = selected;
    }

    pub fn is_selected(&self, tier: PriceTier) -> bool {
        self.selected[tier.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.selected.iter().any(|s| *s)
    }

    pub fn matches(&self, price: u32) -> bool {
        if self.is_empty() {
            return true;
        }
        PriceTier::ALL
            .iter()
            .any(|tier| self.is_selected(*tier) && tier.contains(price))
    }
}

// Current search criteria: free-text query plus the band selection. Both
// default to pass-through.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub query: String,
    pub tiers: TierSelection,
}

impl SearchCriteria {
    // Case-insensitive substring match on title or address, combined with
    // the band selection. An empty query matches everything.
    pub fn matches(&self, listing: &Listing) -> bool {
        let query = self.query.to_lowercase();
        let text_match = listing.title.to_lowercase().contains(&query)
            || listing.address.to_lowercase().contains(&query);

        text_match && self.tiers.matches(listing.price)
    }
}

// Extract the listings that match the given criteria, preserving the
// original order of the snapshot.
pub fn filter_listings(listings: &[Listing], criteria: &SearchCriteria) -> Vec<Listing> {
    let mut filtered = Vec::new();

    for listing in listings {
        if !criteria.matches(listing) {
            continue;
        }
        filtered.push(listing.clone());
    }

    filtered
}
