use std::fmt;

use serde::Serialize;

/// Location keywords in the order they're tried. The first one found in the
/// input wins, so longer/more specific names must be listed deliberately.
pub const DEFAULT_LOCATION_KEYWORDS: &[&str] = &[
    "sri lanka",
    "colombo",
    "kandy",
    "galle",
    "bentota",
    "negombo",
    "ella",
    "nuwara eliya",
];

/// Inputs with at most this many tokens that contain a location keyword are
/// read as "hotel name + destination".
pub const DEFAULT_MAX_NAME_TOKENS: usize = 3;

/// Structured outcome of interpreting a raw search string.
/// All text is trimmed, lowercased and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchIntent {
    None,
    Destination {
        destination: String,
    },
    HotelName {
        hotel_name: String,
    },
    Both {
        hotel_name: String,
        destination: String,
    },
}

impl SearchIntent {
    /// Heading shown above the result set.
    pub fn title(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchIntent::None => write!(f, "Featured hotels"),
            SearchIntent::Destination { destination } => {
                write!(f, "Featured Hotels in {}", destination)
            }
            SearchIntent::HotelName { hotel_name } => {
                write!(f, "Featured Hotels related to \"{}\"", hotel_name)
            }
            SearchIntent::Both {
                hotel_name,
                destination,
            } => write!(f, "{}, {}", hotel_name, destination),
        }
    }
}

/// Classifies free-text search input against a fixed list of location keywords.
#[derive(Debug, Clone)]
pub struct Interpreter {
    keywords: Vec<String>,
    max_name_tokens: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(
            DEFAULT_LOCATION_KEYWORDS.iter().map(|k| k.to_string()),
            DEFAULT_MAX_NAME_TOKENS,
        )
    }
}

impl Interpreter {
    /// Keywords are lowercased and trimmed; blank ones are dropped. Order is preserved.
    pub fn new(keywords: impl IntoIterator<Item = String>, max_name_tokens: usize) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            keywords,
            max_name_tokens,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn interpret(&self, raw: &str) -> SearchIntent {
        let input = raw.trim().to_lowercase();
        if input.is_empty() {
            return SearchIntent::None;
        }

        let keyword = match self.keywords.iter().find(|k| input.contains(k.as_str())) {
            Some(k) => k,
            None => return SearchIntent::HotelName { hotel_name: input },
        };

        // A keyword in a long input is taken to be a destination phrase.
        if input.split_whitespace().count() > self.max_name_tokens {
            return SearchIntent::Destination { destination: input };
        }

        let hotel_name = input.replacen(keyword.as_str(), "", 1).trim().to_string();
        if hotel_name.is_empty() {
            return SearchIntent::Destination { destination: input };
        }

        SearchIntent::Both {
            hotel_name,
            destination: keyword.clone(),
        }
    }
}
