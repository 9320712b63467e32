//! Request-scoped memoization of catalogue fetches.
//!
//! Every request is identified by a [`QueryKey`] built from its parameters.
//! A key that is cached or already in flight is never requested again until
//! it is invalidated. Fetches run as independent tasks and are never
//! cancelled; whatever they return is stored under their key, and the view
//! decides which keys are current.
//!
//! Results the view no longer depends on are evicted on every sync.
//! Superseded random rolls can never be current again and always go; other
//! inactive results are kept, newest first, up to [`MAX_INACTIVE`].

use crate::client::MealSource;
use crate::error::BrowserError;
use crate::model::{Area, Category, MealDetail, MealSummary};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    ByIngredient(String),
    ByCategory(String),
    ByArea(String),
    Categories,
    Areas,
    Lookup(String),
    /// Keyed by nonce so each roll is a distinct request
    Random(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Meals(Vec<MealSummary>),
    Categories(Vec<Category>),
    Areas(Vec<Area>),
    Meal(Option<MealDetail>),
}

impl Payload {
    pub fn meals(&self) -> &[MealSummary] {
        match self {
            Payload::Meals(meals) => meals,
            _ => &[],
        }
    }

    pub fn categories(&self) -> &[Category] {
        match self {
            Payload::Categories(categories) => categories,
            _ => &[],
        }
    }

    pub fn areas(&self) -> &[Area] {
        match self {
            Payload::Areas(areas) => areas,
            _ => &[],
        }
    }

    pub fn meal(&self) -> Option<&MealDetail> {
        match self {
            Payload::Meal(meal) => meal.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Ready(Payload),
    /// The request failed; kept apart from an empty result
    Unavailable(String),
}

impl Fetched {
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Fetched::Ready(payload) => Some(payload),
            Fetched::Unavailable(_) => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Fetched::Unavailable(_))
    }
}

impl From<Result<Payload, BrowserError>> for Fetched {
    fn from(result: Result<Payload, BrowserError>) -> Self {
        match result {
            Ok(payload) => Fetched::Ready(payload),
            Err(e) => Fetched::Unavailable(e.to_string()),
        }
    }
}

/// A finished fetch on its way back to the session
pub type Completion = (QueryKey, Result<Payload, BrowserError>);

/// Run the request a key describes
pub async fn fetch(source: &dyn MealSource, key: &QueryKey) -> Result<Payload, BrowserError> {
    Ok(match key {
        QueryKey::ByIngredient(term) => Payload::Meals(source.try_by_ingredient(term).await?),
        QueryKey::ByCategory(category) => Payload::Meals(source.try_by_category(category).await?),
        QueryKey::ByArea(area) => Payload::Meals(source.try_by_area(area).await?),
        QueryKey::Categories => Payload::Categories(source.try_categories().await?),
        QueryKey::Areas => Payload::Areas(source.try_areas().await?),
        QueryKey::Lookup(id) => Payload::Meal(source.try_lookup(id).await?),
        QueryKey::Random(_) => Payload::Meal(source.try_random().await?),
    })
}

/// Fire-and-forget fetch reporting back over `tx`
pub fn spawn_fetch(source: Arc<dyn MealSource>, key: QueryKey, tx: UnboundedSender<Completion>) {
    tokio::spawn(async move {
        let result = fetch(source.as_ref(), &key).await;
        // The receiver is gone once the session is dropped
        let _ = tx.send((key, result));
    });
}

/// Inactive results kept for a cheap switch back
pub const MAX_INACTIVE: usize = 32;

#[derive(Debug)]
struct Entry {
    fetched: Fetched,
    /// Completion order, for eviction
    stamp: u64,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
    in_flight: HashSet<QueryKey>,
    next_stamp: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        !self.entries.contains_key(key) && !self.in_flight.contains(key)
    }

    pub fn mark_in_flight(&mut self, key: QueryKey) {
        self.in_flight.insert(key);
    }

    pub fn is_loading(&self, key: &QueryKey) -> bool {
        self.in_flight.contains(key)
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn complete(&mut self, key: QueryKey, fetched: Fetched) {
        debug!("Fetched {:?} (unavailable: {})", key, fetched.is_unavailable());
        self.in_flight.remove(&key);
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.entries.insert(key, Entry { fetched, stamp });
    }

    pub fn get(&self, key: &QueryKey) -> Option<&Fetched> {
        self.entries.get(key).map(|entry| &entry.fetched)
    }

    pub fn payload(&self, key: &QueryKey) -> Option<&Payload> {
        self.get(key).and_then(Fetched::payload)
    }

    /// Forget a cached result so the next sync requests it again.
    /// An in-flight request for the key keeps running.
    pub fn invalidate(&mut self, key: &QueryKey) {
        self.entries.remove(key);
    }

    /// Drop results outside `current`: every random roll, and all but the
    /// `keep` most recently completed of the rest. Returns how many went.
    pub fn evict_inactive(&mut self, current: &[QueryKey], keep: usize) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| current.contains(key) || !matches!(key, QueryKey::Random(_)));

        let mut inactive: Vec<(u64, QueryKey)> = self
            .entries
            .iter()
            .filter(|(key, _)| !current.contains(key))
            .map(|(key, entry)| (entry.stamp, key.clone()))
            .collect();
        if inactive.len() > keep {
            inactive.sort_unstable_by(|a, b| b.0.cmp(&a.0));
            for (_, key) in inactive.drain(keep..) {
                self.entries.remove(&key);
            }
        }
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
