use std::collections::{BTreeSet, HashMap};

use trie_rs::{Trie, TrieBuilder};

use crate::models::HotelRecord;

/// Normalize a destination for prefix matching.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Distinct destinations (cities, plus countries that differ from their city)
/// in lexicographic order.
pub fn destinations(catalog: &[HotelRecord]) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for h in catalog {
        let city = h.city.trim();
        let country = h.country.trim();

        if !city.is_empty() {
            out.insert(city.to_string());
        }
        if !country.is_empty() && country != city {
            out.insert(country.to_string());
        }
    }
    out
}

/// In-memory trie over a catalog's destinations for prefix matching.
/// Keys are normalized; each key maps back to the display forms it came from.
#[derive(Default)]
pub struct DestinationIndex {
    trie: Option<Trie<u8>>,
    display: HashMap<String, Vec<String>>,
}

impl DestinationIndex {
    pub fn new(catalog: &[HotelRecord]) -> Self {
        let mut idx = Self::default();
        idx.build(catalog);
        idx
    }

    /// (Re)build the trie from a catalog snapshot.
    pub fn build(&mut self, catalog: &[HotelRecord]) {
        let mut b = TrieBuilder::new();
        let mut display: HashMap<String, Vec<String>> = HashMap::new();

        // BTreeSet iteration keeps each key's display forms sorted.
        for d in destinations(catalog) {
            let key = normalize(&d);
            if !display.contains_key(&key) {
                b.push(&key);
            }
            display.entry(key).or_default().push(d);
        }

        self.trie = if display.is_empty() {
            None
        } else {
            Some(b.build())
        };
        self.display = display;
    }

    pub fn len(&self) -> usize {
        self.display.values().map(Vec::len).sum()
    }

    /// Query destinations starting with `prefix` (case-insensitive), in
    /// lexicographic order of their display form. Returns up to `num` entries.
    pub fn query(&self, prefix: &str, num: usize) -> Vec<String> {
        let word = normalize(prefix);
        if word.is_empty() {
            return Vec::new();
        }

        let trie = match &self.trie {
            Some(t) => t,
            None => return Vec::new(),
        };

        let keys: Vec<String> = trie.predictive_search(&word).collect();
        let mut out: Vec<String> = keys
            .iter()
            .filter_map(|k| self.display.get(k))
            .flatten()
            .cloned()
            .collect();

        out.sort();
        out.truncate(num);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(city: &str, country: &str) -> HotelRecord {
        HotelRecord {
            city: city.into(),
            country: country.into(),
            ..Default::default()
        }
    }

    #[test]
    fn collects_distinct_cities_and_countries() {
        let catalog = vec![
            hotel("Galle", "Sri Lanka"),
            hotel(" Galle ", "Sri Lanka"),
            hotel("Singapore", "Singapore"),
            hotel("", "Maldives"),
            hotel("  ", ""),
        ];
        let d: Vec<String> = destinations(&catalog).into_iter().collect();
        assert_eq!(d, vec!["Galle", "Maldives", "Singapore", "Sri Lanka"]);
    }

    #[test]
    fn prefix_query_is_case_insensitive_and_sorted() {
        let idx = DestinationIndex::new(&[
            hotel("Kandy", "Sri Lanka"),
            hotel("kalutara", "Sri Lanka"),
            hotel("Kalpitiya", "Sri Lanka"),
            hotel("Colombo", "Sri Lanka"),
        ]);

        // Display-form order: uppercase sorts before lowercase.
        assert_eq!(idx.query("KA", 8), vec!["Kalpitiya", "Kandy", "kalutara"]);
        assert_eq!(idx.query("  s", 8), vec!["Sri Lanka"]);
        assert!(idx.query("lanka", 8).is_empty());
        assert!(idx.query("   ", 8).is_empty());
    }

    #[test]
    fn keeps_every_display_form_of_a_key() {
        let idx = DestinationIndex::new(&[hotel("Galle", ""), hotel("GALLE", "")]);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.query("gal", 8), vec!["GALLE", "Galle"]);
    }

    #[test]
    fn caps_results() {
        let catalog: Vec<HotelRecord> = (0..20)
            .map(|i| hotel(&format!("Town {:02}", i), ""))
            .collect();
        let idx = DestinationIndex::new(&catalog);
        let out = idx.query("town", 8);
        assert_eq!(out.len(), 8);
        assert_eq!(out[0], "Town 00");
        assert_eq!(out[7], "Town 07");
    }

    #[test]
    fn empty_catalog() {
        let idx = DestinationIndex::new(&[]);
        assert_eq!(idx.len(), 0);
        assert!(idx.query("a", 8).is_empty());
    }
}
