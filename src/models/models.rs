use serde::{Deserialize, Deserializer, Serialize};

/// Hotel record as returned by the catalog provider.
/// Fields the core doesn't use are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    #[serde(rename = "hotelID", default, deserialize_with = "null_default")]
    pub id: i64,
    #[serde(rename = "hotelName", default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub hotel_code: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_default")]
    pub hotel_address: String,
    #[serde(rename = "finAct", default, deserialize_with = "null_default")]
    pub active: bool,
    // Provider's spelling.
    #[serde(rename = "starCatgeory", default, deserialize_with = "null_default")]
    pub star_rating: u8,
    #[serde(default, deserialize_with = "null_default")]
    pub lowest_rate: f64,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HotelRecord {
    /// Lowercased "{city} {country}" string that destination searches match against.
    pub fn location(&self) -> String {
        format!("{} {}", self.city, self.country).to_lowercase()
    }

    /// True if the record carries neither a city nor a country.
    pub fn lacks_location(&self) -> bool {
        self.city.trim().is_empty() && self.country.trim().is_empty()
    }
}

/// Treat `null` the same as a missing field.
fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Hotel listing card handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub rating: u8,
    pub image: String,
    pub hotel_code: i64,
    pub lowest_rate: f64,
}

impl From<&HotelRecord> for Listing {
    fn from(h: &HotelRecord) -> Self {
        let location = if h.city.is_empty() {
            h.hotel_address.clone()
        } else {
            h.city.clone()
        };

        let image = h
            .extra
            .get("hotelImage")
            .and_then(|img| img.get("imageFileName"))
            .and_then(|f| f.as_str())
            .unwrap_or_default()
            .to_string();

        Self {
            id: h.id,
            name: h.name.clone(),
            location,
            rating: h.star_rating,
            image,
            hotel_code: h.hotel_code,
            lowest_rate: h.lowest_rate,
        }
    }
}

/// Search results wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub title: String,
    pub intent: crate::intent::SearchIntent,
    pub hotels: Vec<Listing>,
    pub total: usize,
    /// Set when the catalog failed to load, so an empty result can be told apart from no matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub root_url: String,
    /// Hotel detail page that selections redirect to.
    #[serde(default)]
    pub hotel_url: String,
    #[serde(default)]
    pub admin_username: String,
    #[serde(default)]
    pub admin_password: String,
    #[serde(default)]
    pub max_sessions: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Remote endpoint returning the full hotel list as a JSON array.
    #[serde(default)]
    pub url: String,
    /// Bearer token sent with catalog requests.
    #[serde(default)]
    pub token: String,
    /// Local JSON file to load instead of `url`.
    #[serde(default)]
    pub file: String,
    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub location_keywords: Vec<String>,
    #[serde(default)]
    pub max_suggestions: usize,
    #[serde(default)]
    pub max_name_tokens: usize,
    /// Unset leaves an earlier file's value in place.
    #[serde(default)]
    pub narrow_on_submit: Option<bool>,
}
