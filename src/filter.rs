use crate::{intent::SearchIntent, models::HotelRecord};

/// Number of records shown when there's no search.
pub const FEATURED_HOTELS: usize = 6;

/// Narrow the catalog to the records matching an intent. Catalog order is preserved.
pub fn filter(catalog: &[HotelRecord], intent: &SearchIntent) -> Vec<HotelRecord> {
    match intent {
        SearchIntent::None => catalog.iter().take(FEATURED_HOTELS).cloned().collect(),

        SearchIntent::Destination { destination } => {
            let d = destination.to_lowercase();
            catalog
                .iter()
                .filter(|h| h.location().contains(&d))
                .cloned()
                .collect()
        }

        SearchIntent::HotelName { hotel_name } => {
            let n = hotel_name.to_lowercase();
            catalog
                .iter()
                .filter(|h| name_matches(h, &n))
                .cloned()
                .collect()
        }

        // Records without any location can't satisfy a destination and are kept.
        SearchIntent::Both {
            hotel_name,
            destination,
        } => {
            let n = hotel_name.to_lowercase();
            let d = destination.to_lowercase();
            catalog
                .iter()
                .filter(|h| {
                    name_matches(h, &n) && (h.lacks_location() || h.location().contains(&d))
                })
                .cloned()
                .collect()
        }
    }
}

fn name_matches(h: &HotelRecord, needle: &str) -> bool {
    h.name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Interpreter;

    fn hotel(id: i64, name: &str, city: &str, country: &str) -> HotelRecord {
        HotelRecord {
            id,
            name: name.into(),
            city: city.into(),
            country: country.into(),
            active: true,
            ..Default::default()
        }
    }

    fn ids(hs: &[HotelRecord]) -> Vec<i64> {
        hs.iter().map(|h| h.id).collect()
    }

    fn catalog() -> Vec<HotelRecord> {
        vec![
            hotel(1, "Galle Fort Hotel", "Galle", "Sri Lanka"),
            hotel(2, "Fort Bazaar", "Galle", "Sri Lanka"),
            hotel(3, "Earl's Regency", "Kandy", "Sri Lanka"),
            hotel(4, "Fortress Resort", "", ""),
            hotel(5, "Fort Printers", "Colombo", "Sri Lanka"),
            hotel(6, "Cinnamon Grand", "Colombo", "Sri Lanka"),
            hotel(7, "Heritance Kandalama", "Dambulla", "Sri Lanka"),
            hotel(8, "Fort Lodge", "", "Sri Lanka"),
        ]
    }

    #[test]
    fn none_returns_first_six_in_order() {
        let out = filter(&catalog(), &SearchIntent::None);
        assert_eq!(ids(&out), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn destination_matches_city_or_country() {
        let intent = SearchIntent::Destination {
            destination: "galle".into(),
        };
        assert_eq!(ids(&filter(&catalog(), &intent)), vec![1, 2]);

        let intent = SearchIntent::Destination {
            destination: "Sri Lanka".into(),
        };
        assert_eq!(filter(&catalog(), &intent).len(), 7);
    }

    #[test]
    fn hotel_name_is_case_insensitive_substring() {
        let intent = SearchIntent::HotelName {
            hotel_name: "FORT".into(),
        };
        assert_eq!(ids(&filter(&catalog(), &intent)), vec![1, 2, 4, 5, 8]);
    }

    #[test]
    fn both_keeps_records_without_location() {
        let intent = SearchIntent::Both {
            hotel_name: "fort".into(),
            destination: "galle".into(),
        };
        // 4 has no location at all; 8 has a country and doesn't match.
        assert_eq!(ids(&filter(&catalog(), &intent)), vec![1, 2, 4]);
    }

    #[test]
    fn filter_is_idempotent() {
        let it = Interpreter::default();
        for q in ["", "galle", "Galle Fort", "fort", "sri lanka hotels by the sea"] {
            let intent = it.interpret(q);
            let once = filter(&catalog(), &intent);
            let twice = filter(&once, &intent);
            assert_eq!(ids(&once), ids(&twice), "query {:?}", q);
        }
    }

    #[test]
    fn galle_scenarios() {
        let it = Interpreter::default();
        let catalog = vec![HotelRecord {
            star_rating: 4,
            lowest_rate: 120.0,
            ..hotel(1, "Galle Fort Hotel", "Galle", "Sri Lanka")
        }];

        let out = filter(&catalog, &it.interpret("galle"));
        assert_eq!(ids(&out), vec![1]);

        let out = filter(&catalog, &it.interpret("Galle Fort"));
        assert_eq!(ids(&out), vec![1]);
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let it = Interpreter::default();
        for q in ["", "galle", "fort", "Galle Fort"] {
            assert!(filter(&[], &it.interpret(q)).is_empty());
        }
    }
}
