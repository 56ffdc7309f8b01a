use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};

use uuid::Uuid;

use crate::{
    models::HotelRecord,
    suggest::{searchbar::BarState, SearchBar},
};

struct Entry {
    bar: SearchBar,
    last_used: Instant,
}

/// Live search-bar sessions keyed by ID.
pub struct Sessions {
    max: usize,
    max_suggestions: usize,
    narrow_on_submit: bool,
    entries: Mutex<HashMap<Uuid, Entry>>,
}

impl Sessions {
    pub fn new(max: usize, max_suggestions: usize, narrow_on_submit: bool) -> Self {
        Self {
            max: max.max(1),
            max_suggestions,
            narrow_on_submit,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a session over the given catalog, evicting the least recently
    /// used one if the table is full.
    pub fn create(&self, catalog: Arc<Vec<HotelRecord>>) -> (Uuid, BarState) {
        let bar = SearchBar::new(catalog, self.max_suggestions, self.narrow_on_submit);
        let state = bar.state();
        let id = Uuid::new_v4();

        let mut entries = self.lock();
        if entries.len() >= self.max {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(id, _)| *id);
            if let Some(old) = oldest {
                entries.remove(&old);
                log::info!("session limit reached; dropped session {}", old);
            }
        }

        entries.insert(
            id,
            Entry {
                bar,
                last_used: Instant::now(),
            },
        );
        log::debug!("created session {}", id);

        (id, state)
    }

    /// Run `f` on a session. Returns None if the session doesn't exist.
    pub fn with<R>(&self, id: &Uuid, f: impl FnOnce(&mut SearchBar) -> R) -> Option<R> {
        let mut entries = self.lock();
        let e = entries.get_mut(id)?;
        e.last_used = Instant::now();
        Some(f(&mut e.bar))
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.lock().remove(id).is_some()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Deliver a newly loaded catalog to every session.
    pub fn set_catalog(&self, catalog: &Arc<Vec<HotelRecord>>) {
        let mut entries = self.lock();
        for e in entries.values_mut() {
            e.bar.set_catalog(catalog.clone());
        }
        log::info!("delivered catalog to {} sessions", entries.len());
    }
}
