pub mod searchbar;

pub use searchbar::{Field, SearchBar};

use serde::{Deserialize, Serialize};

use crate::{autocomplete::DestinationIndex, models::HotelRecord};

/// Maximum number of suggestions per field.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Hotel,
    Destination,
}

/// Autocomplete entry shown under a search field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub text: String,
    pub kind: SuggestionKind,
}

/// Produces a field's suggestions from the catalog.
pub trait Source: Default {
    const KIND: SuggestionKind;

    /// Called whenever the catalog changes.
    fn index(&mut self, catalog: &[HotelRecord]);

    /// Suggestions for a non-blank input, at most `limit`.
    fn suggest(&self, catalog: &[HotelRecord], input: &str, limit: usize) -> Vec<Suggestion>;
}

/// Cities and countries starting with the input.
#[derive(Default)]
pub struct Destinations {
    index: DestinationIndex,
}

impl Destinations {
    pub fn new(catalog: &[HotelRecord]) -> Self {
        Self {
            index: DestinationIndex::new(catalog),
        }
    }
}

impl Source for Destinations {
    const KIND: SuggestionKind = SuggestionKind::Destination;

    fn index(&mut self, catalog: &[HotelRecord]) {
        self.index.build(catalog);
    }

    fn suggest(&self, _catalog: &[HotelRecord], input: &str, limit: usize) -> Vec<Suggestion> {
        self.index
            .query(input, limit)
            .into_iter()
            .map(|d| Suggestion {
                id: format!("destination-{}", d),
                text: d,
                kind: Self::KIND,
            })
            .collect()
    }
}

/// Active hotels whose name contains the input.
#[derive(Default)]
pub struct HotelNames;

impl Source for HotelNames {
    const KIND: SuggestionKind = SuggestionKind::Hotel;

    fn index(&mut self, _catalog: &[HotelRecord]) {}

    fn suggest(&self, catalog: &[HotelRecord], input: &str, limit: usize) -> Vec<Suggestion> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        catalog
            .iter()
            .filter(|h| h.active && h.name.to_lowercase().contains(&needle))
            .take(limit)
            .map(|h| Suggestion {
                id: format!("hotel-{}", h.id),
                text: h.name.clone(),
                kind: Self::KIND,
            })
            .collect()
    }
}

/// Navigation keys a field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// What a key press asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Ignored,
    Moved(Option<usize>),
    Commit(Suggestion),
    Submit,
    Dismissed,
}

/// Serializable snapshot of a field. `highlighted` is -1 when nothing is highlighted.
#[derive(Debug, Clone, Serialize)]
pub struct FieldState {
    pub text: String,
    pub suggestions: Vec<Suggestion>,
    pub visible: bool,
    pub highlighted: i64,
}

/// Autocomplete state of one search field.
pub struct FieldSession<S> {
    source: S,
    limit: usize,
    text: String,
    suggestions: Vec<Suggestion>,
    visible: bool,
    highlighted: Option<usize>,
}

impl<S: Source> FieldSession<S> {
    pub fn new(catalog: &[HotelRecord], limit: usize) -> Self {
        let mut source = S::default();
        source.index(catalog);

        Self {
            source,
            limit,
            text: String::new(),
            suggestions: Vec::new(),
            visible: false,
            highlighted: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Set the field's text and recompute its suggestions.
    pub fn on_input(&mut self, text: &str, catalog: &[HotelRecord]) -> &[Suggestion] {
        self.text = text.to_string();
        self.recompute(catalog);
        &self.suggestions
    }

    /// Rebuild the source's index for a new catalog and recompute.
    pub fn on_catalog(&mut self, catalog: &[HotelRecord]) {
        self.source.index(catalog);
        self.recompute(catalog);
    }

    /// Re-derive suggestions for the current text, e.g. when the field regains focus.
    pub fn focus(&mut self, catalog: &[HotelRecord]) {
        self.recompute(catalog);
    }

    pub fn on_key(&mut self, key: Key) -> KeyAction {
        match key {
            Key::Enter => match self.highlighted.and_then(|i| self.suggestions.get(i)) {
                Some(s) => KeyAction::Commit(s.clone()),
                None => KeyAction::Submit,
            },
            _ if !self.visible => KeyAction::Ignored,
            Key::ArrowDown => {
                let last = match self.suggestions.len().checked_sub(1) {
                    Some(n) => n,
                    None => return KeyAction::Ignored,
                };
                self.highlighted = Some(match self.highlighted {
                    None => 0,
                    Some(i) => (i + 1).min(last),
                });
                KeyAction::Moved(self.highlighted)
            }
            Key::ArrowUp => {
                self.highlighted = match self.highlighted {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                KeyAction::Moved(self.highlighted)
            }
            Key::Escape => {
                self.hide();
                KeyAction::Dismissed
            }
        }
    }

    /// Accept a suggestion into the field.
    pub fn commit(&mut self, s: &Suggestion) -> &str {
        self.text = s.text.clone();
        self.reset();
        &self.text
    }

    /// Outside interaction: the field lost focus to something outside its region.
    pub fn dismiss(&mut self) {
        self.reset();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.reset();
    }

    /// Hide the list without discarding it.
    pub fn hide(&mut self) {
        self.visible = false;
        self.highlighted = None;
    }

    pub fn state(&self) -> FieldState {
        FieldState {
            text: self.text.clone(),
            suggestions: self.suggestions.clone(),
            visible: self.visible,
            highlighted: self.highlighted.map_or(-1, |i| i as i64),
        }
    }

    fn recompute(&mut self, catalog: &[HotelRecord]) {
        if self.text.trim().is_empty() {
            self.reset();
            return;
        }

        self.suggestions = self.source.suggest(catalog, &self.text, self.limit);
        self.visible = !self.suggestions.is_empty();
        self.highlighted = None;
    }

    fn reset(&mut self) {
        self.suggestions.clear();
        self.visible = false;
        self.highlighted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(id: i64, name: &str, city: &str, active: bool) -> HotelRecord {
        HotelRecord {
            id,
            name: name.into(),
            city: city.into(),
            country: "Sri Lanka".into(),
            active,
            ..Default::default()
        }
    }

    fn catalog() -> Vec<HotelRecord> {
        vec![
            hotel(1, "Galle Fort Hotel", "Galle", true),
            hotel(2, "Fort Bazaar", "Galle", true),
            hotel(3, "Fortune Inn", "Kandy", false),
            hotel(4, "Kandy House", "Kandy", true),
        ]
    }

    #[test]
    fn hotel_names_skip_inactive_and_cap() {
        let c = catalog();
        let out = HotelNames.suggest(&c, " FORT", 8);
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["hotel-1", "hotel-2"]);
        assert!(out.iter().all(|s| s.kind == SuggestionKind::Hotel));

        let many: Vec<HotelRecord> = (0..30).map(|i| hotel(i, "Sea View", "", true)).collect();
        assert_eq!(HotelNames.suggest(&many, "sea", 8).len(), 8);
    }

    #[test]
    fn destinations_are_prefix_matches() {
        let c = catalog();
        let out = Destinations::new(&c).suggest(&c, "k", 8);
        assert_eq!(
            out,
            vec![Suggestion {
                id: "destination-Kandy".into(),
                text: "Kandy".into(),
                kind: SuggestionKind::Destination,
            }]
        );
    }

    #[test]
    fn blank_input_hides_and_empties() {
        let c = catalog();
        let mut s: FieldSession<HotelNames> = FieldSession::new(&c, 8);
        assert_eq!(s.on_input("fort", &c).len(), 2);
        assert!(s.is_visible());

        assert!(s.on_input("   ", &c).is_empty());
        assert!(!s.is_visible());
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn no_matches_stay_hidden() {
        let c = catalog();
        let mut s: FieldSession<Destinations> = FieldSession::new(&c, 8);
        assert!(s.on_input("zanzibar", &c).is_empty());
        assert!(!s.is_visible());
        assert_eq!(s.on_key(Key::ArrowDown), KeyAction::Ignored);
    }

    #[test]
    fn arrow_down_clamps_at_last() {
        let c = catalog();
        let mut s: FieldSession<HotelNames> = FieldSession::new(&c, 8);
        let len = s.on_input("fort", &c).len();

        for _ in 0..len + 5 {
            s.on_key(Key::ArrowDown);
        }
        assert_eq!(s.highlighted(), Some(len - 1));
    }

    #[test]
    fn arrow_up_stops_at_none() {
        let c = catalog();
        let mut s: FieldSession<HotelNames> = FieldSession::new(&c, 8);
        s.on_input("fort", &c);

        assert_eq!(s.on_key(Key::ArrowUp), KeyAction::Moved(None));
        assert_eq!(s.on_key(Key::ArrowDown), KeyAction::Moved(Some(0)));
        assert_eq!(s.on_key(Key::ArrowDown), KeyAction::Moved(Some(1)));
        assert_eq!(s.on_key(Key::ArrowUp), KeyAction::Moved(Some(0)));
        assert_eq!(s.on_key(Key::ArrowUp), KeyAction::Moved(None));
        assert_eq!(s.on_key(Key::ArrowUp), KeyAction::Moved(None));
    }

    #[test]
    fn enter_commits_highlighted_or_submits() {
        let c = catalog();
        let mut s: FieldSession<HotelNames> = FieldSession::new(&c, 8);
        s.on_input("fort", &c);
        assert_eq!(s.on_key(Key::Enter), KeyAction::Submit);

        s.on_key(Key::ArrowDown);
        s.on_key(Key::ArrowDown);
        match s.on_key(Key::Enter) {
            KeyAction::Commit(sg) => assert_eq!(sg.text, "Fort Bazaar"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn escape_hides_and_keeps_text() {
        let c = catalog();
        let mut s: FieldSession<HotelNames> = FieldSession::new(&c, 8);
        s.on_input("fort", &c);
        s.on_key(Key::ArrowDown);

        assert_eq!(s.on_key(Key::Escape), KeyAction::Dismissed);
        assert!(!s.is_visible());
        assert_eq!(s.highlighted(), None);
        assert_eq!(s.text(), "fort");

        // Hidden: arrows do nothing, Enter still submits.
        assert_eq!(s.on_key(Key::ArrowDown), KeyAction::Ignored);
        assert_eq!(s.on_key(Key::Enter), KeyAction::Submit);
    }

    #[test]
    fn commit_resets_session() {
        let c = catalog();
        let mut s: FieldSession<HotelNames> = FieldSession::new(&c, 8);
        let sg = s.on_input("bazaar", &c)[0].clone();

        assert_eq!(s.commit(&sg), "Fort Bazaar");
        assert!(s.suggestions().is_empty());
        assert!(!s.is_visible());
        assert_eq!(s.state().highlighted, -1);
    }

    #[test]
    fn dismiss_then_focus_reopens() {
        let c = catalog();
        let mut s: FieldSession<Destinations> = FieldSession::new(&c, 8);
        s.on_input("ga", &c);
        assert!(s.is_visible());

        s.dismiss();
        assert!(!s.is_visible());
        assert!(s.suggestions().is_empty());

        s.focus(&c);
        assert!(s.is_visible());
        assert_eq!(s.suggestions()[0].text, "Galle");
    }

    #[test]
    fn catalog_change_recomputes() {
        let mut s: FieldSession<Destinations> = FieldSession::new(&[], 8);
        assert!(s.on_input("gal", &[]).is_empty());

        let c = catalog();
        s.on_catalog(&c);
        assert!(s.is_visible());
        assert_eq!(s.suggestions().len(), 1);
    }

    #[test]
    fn empty_catalog_never_suggests() {
        let mut d: FieldSession<Destinations> = FieldSession::new(&[], 8);
        let mut h: FieldSession<HotelNames> = FieldSession::new(&[], 8);
        for q in ["a", "galle", "Fort", " "] {
            assert!(d.on_input(q, &[]).is_empty());
            assert!(h.on_input(q, &[]).is_empty());
        }
    }
}
