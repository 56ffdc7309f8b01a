use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Destinations, FieldSession, FieldState, HotelNames, Key, KeyAction, Suggestion};
use crate::models::HotelRecord;

/// The two search inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Destination,
    Hotel,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarState {
    pub destination: FieldState,
    pub hotel: FieldState,
    pub catalog_size: usize,
}

/// Destination and hotel-name fields over a shared working catalog.
///
/// Operations that end in a search return the combined query text
/// ("{destination} {hotel}", trimmed) for the host to run.
pub struct SearchBar {
    catalog: Arc<Vec<HotelRecord>>,
    destination: FieldSession<Destinations>,
    hotel: FieldSession<HotelNames>,

    /// Shrink the working catalog to the submitted search's matches.
    narrow_on_submit: bool,
}

impl SearchBar {
    pub fn new(catalog: Arc<Vec<HotelRecord>>, limit: usize, narrow_on_submit: bool) -> Self {
        Self {
            destination: FieldSession::new(&catalog, limit),
            hotel: FieldSession::new(&catalog, limit),
            catalog,
            narrow_on_submit,
        }
    }

    pub fn catalog(&self) -> &[HotelRecord] {
        &self.catalog
    }

    pub fn destination(&self) -> &FieldSession<Destinations> {
        &self.destination
    }

    pub fn hotel(&self) -> &FieldSession<HotelNames> {
        &self.hotel
    }

    pub fn suggestions(&self, field: Field) -> &[Suggestion] {
        match field {
            Field::Destination => self.destination.suggestions(),
            Field::Hotel => self.hotel.suggestions(),
        }
    }

    /// A new catalog arrived: reindex and recompute both fields.
    pub fn set_catalog(&mut self, catalog: Arc<Vec<HotelRecord>>) {
        self.catalog = catalog;
        self.destination.on_catalog(&self.catalog);
        self.hotel.on_catalog(&self.catalog);
    }

    pub fn on_input(&mut self, field: Field, text: &str) -> &[Suggestion] {
        match field {
            Field::Destination => self.destination.on_input(text, &self.catalog),
            Field::Hotel => self.hotel.on_input(text, &self.catalog),
        }
    }

    pub fn on_key(&mut self, field: Field, key: Key) -> Option<String> {
        let action = match field {
            Field::Destination => self.destination.on_key(key),
            Field::Hotel => self.hotel.on_key(key),
        };

        match action {
            KeyAction::Commit(s) => self.commit(field, &s),
            KeyAction::Submit => self.submit(),
            KeyAction::Ignored | KeyAction::Moved(_) | KeyAction::Dismissed => None,
        }
    }

    /// Accept a suggestion into a field and search with both fields' text.
    pub fn commit(&mut self, field: Field, s: &Suggestion) -> Option<String> {
        match field {
            Field::Destination => self.destination.commit(s),
            Field::Hotel => self.hotel.commit(s),
        };

        let q = self.combined();
        (!q.is_empty()).then_some(q)
    }

    /// Search with the current text of both fields. Blank input is a no-op.
    pub fn submit(&mut self) -> Option<String> {
        let q = self.combined();
        if q.is_empty() {
            return None;
        }

        if self.narrow_on_submit {
            self.narrow();
        }

        self.destination.hide();
        self.hotel.hide();
        Some(q)
    }

    /// Interaction outside a field's region.
    pub fn dismiss(&mut self, field: Field) {
        match field {
            Field::Destination => self.destination.dismiss(),
            Field::Hotel => self.hotel.dismiss(),
        }
    }

    pub fn focus(&mut self, field: Field) {
        match field {
            Field::Destination => self.destination.focus(&self.catalog),
            Field::Hotel => self.hotel.focus(&self.catalog),
        }
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Destination => self.destination.clear(),
            Field::Hotel => self.hotel.clear(),
        }
    }

    pub fn state(&self) -> BarState {
        BarState {
            destination: self.destination.state(),
            hotel: self.hotel.state(),
            catalog_size: self.catalog.len(),
        }
    }

    fn combined(&self) -> String {
        format!("{} {}", self.destination.text(), self.hotel.text())
            .trim()
            .to_string()
    }

    /// Keep records with a city equal to the destination text and a name
    /// containing the hotel text. Blank fields don't constrain.
    fn narrow(&mut self) {
        let dest = self.destination.text().trim().to_lowercase();
        let name = self.hotel.text().trim().to_lowercase();

        let narrowed: Vec<HotelRecord> = self
            .catalog
            .iter()
            .filter(|h| {
                let city = h.city.trim();
                !city.is_empty()
                    && (dest.is_empty() || city.to_lowercase() == dest)
                    && (name.is_empty() || h.name.to_lowercase().contains(&name))
            })
            .cloned()
            .collect();

        log::debug!(
            "narrowed working catalog from {} to {} hotels",
            self.catalog.len(),
            narrowed.len()
        );
        self.set_catalog(Arc::new(narrowed));
    }
}
