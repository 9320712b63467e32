//! Browsing session.
//!
//! [`Browser`] owns the view state, the query cache and the drawer, and is the
//! only thing that mutates them. Fetches run as background tasks and report
//! back over a channel; [`Browser::drain`] or [`Browser::wait_for_pending`]
//! fold their results into the cache.

use crate::client::MealSource;
use crate::config::BrowserConfig;
use crate::drawer::{Clock, CloseReason, Drawer, DrawerEvent, SystemClock};
use crate::model::MealDetail;
use crate::query::{spawn_fetch, Completion, QueryCache, QueryKey, MAX_INACTIVE};
use crate::render::{render, Scene};
use crate::state::{Tab, ViewState};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub struct Browser<C: Clock = SystemClock> {
    source: Arc<dyn MealSource>,
    clock: C,
    state: ViewState,
    cache: QueryCache,
    drawer: Option<Drawer>,
    drawer_delay: Duration,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl Browser<SystemClock> {
    pub fn new(source: Arc<dyn MealSource>, config: &BrowserConfig) -> Self {
        Self::with_clock(source, config, SystemClock)
    }
}

impl<C: Clock> Browser<C> {
    pub fn with_clock(source: Arc<dyn MealSource>, config: &BrowserConfig, clock: C) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            clock,
            state: ViewState::from_config(config),
            cache: QueryCache::new(),
            drawer: None,
            drawer_delay: config.drawer_delay(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn drawer(&self) -> Option<&Drawer> {
        self.drawer.as_ref()
    }

    /// Change the view state, then start any fetches the new view needs.
    ///
    /// Setting or clearing `selected_id` here mounts or drops the drawer.
    pub fn edit(&mut self, f: impl FnOnce(&mut ViewState)) {
        f(&mut self.state);
        if self.state.selected_id.is_none() {
            self.drawer = None;
        } else if self.drawer.is_none() {
            self.drawer = Some(Drawer::open(self.clock.now(), self.drawer_delay));
        }
        self.sync();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.edit(|state| state.set_tab(tab));
    }

    /// Evict results the view left behind, then request every current key
    /// that is neither cached nor in flight
    pub fn sync(&mut self) {
        let current = self.state.current_queries();
        let evicted = self.cache.evict_inactive(&current, MAX_INACTIVE);
        if evicted > 0 {
            debug!("Evicted {} cached results, {} kept", evicted, self.cache.len());
        }
        for key in current {
            if self.cache.needs_fetch(&key) {
                debug!("Requesting {:?} from {}", key, self.source.source_name());
                self.cache.mark_in_flight(key.clone());
                spawn_fetch(Arc::clone(&self.source), key, self.tx.clone());
            }
        }
    }

    /// Absorb every response that has already arrived
    pub fn drain(&mut self) -> usize {
        let mut absorbed = 0;
        while let Ok((key, result)) = self.rx.try_recv() {
            self.cache.complete(key, result.into());
            absorbed += 1;
        }
        absorbed
    }

    /// Wait until nothing is in flight
    pub async fn wait_for_pending(&mut self) {
        while self.cache.has_in_flight() {
            match self.rx.recv().await {
                Some((key, result)) => self.cache.complete(key, result.into()),
                None => break,
            }
        }
    }

    /// Open the drawer on a recipe. Always starts a fresh enter animation.
    pub fn select_meal(&mut self, id: impl Into<String>) {
        let id = id.into();
        info!("Opening recipe {}", id);
        self.state.select_meal(id);
        self.drawer = Some(Drawer::open(self.clock.now(), self.drawer_delay));
        self.sync();
    }

    /// Start closing the drawer; `false` if there is none or it is already leaving
    pub fn request_close(&mut self, reason: CloseReason) -> bool {
        let now = self.clock.now();
        self.drawer
            .as_mut()
            .is_some_and(|drawer| drawer.request_close(now, reason))
    }

    /// Advance the drawer; a finished leave animation discards the selection
    pub fn tick(&mut self) -> Option<DrawerEvent> {
        let now = self.clock.now();
        let event = self.drawer.as_mut()?.tick(now)?;
        if event == DrawerEvent::Closed {
            self.state.clear_selection();
            self.drawer = None;
        }
        Some(event)
    }

    /// Time until the drawer's next transition
    pub fn next_transition(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.drawer.as_ref().and_then(|drawer| drawer.remaining(now))
    }

    /// Explicit search: switch to the Search tab and re-run the current term
    pub fn search_now(&mut self) {
        self.state.set_tab(Tab::Search);
        if let Some(key) = self.state.search_key() {
            self.cache.invalidate(&key);
        }
        self.sync();
    }

    pub fn roll_special(&mut self) {
        self.edit(ViewState::roll_special);
    }

    /// The random recipe for the current nonce, once it has arrived
    pub fn special(&self) -> Option<&MealDetail> {
        self.cache
            .payload(&self.state.special_key())
            .and_then(|payload| payload.meal())
    }

    /// Detail of the selected recipe, once it has arrived
    pub fn detail(&self) -> Option<&MealDetail> {
        let key = self.state.detail_key()?;
        self.cache.payload(&key).and_then(|payload| payload.meal())
    }

    pub fn is_loading(&self, key: &QueryKey) -> bool {
        self.cache.is_loading(key)
    }

    pub fn frame(&self, width: usize) -> String {
        let scene = Scene {
            state: &self.state,
            cache: &self.cache,
            drawer: self.drawer.as_ref(),
        };
        render(&scene, width)
    }
}
