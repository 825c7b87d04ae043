//! Domain types shared by the catalog, the similarity engine and the service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub type ItemId = String;

/// Kind of catalog entry. Serialized as the upper-case tag (`"MOVIE"`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    Movie,
    Track,
    Book,
    Game,
    Art,
}

impl ItemType {
    pub const ALL: [ItemType; 5] = [Self::Movie, Self::Track, Self::Book, Self::Game, Self::Art];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::Track => "TRACK",
            Self::Book => "BOOK",
            Self::Game => "GAME",
            Self::Art => "ART",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream source of truth for an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    Spotify,
    Tmdb,
}

/// Type-specific metadata. Each variant carries only the fields that matter
/// for its kind; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemDetails {
    Movie {
        overview: Option<String>,
    },
    Track {
        artists: Vec<String>,
        album: Option<String>,
    },
    Book {
        author: Option<String>,
        description: Option<String>,
    },
    Game {
        developer: Option<String>,
        platforms: Vec<String>,
    },
    Art {
        artist: Option<String>,
        medium: Option<String>,
    },
}

impl ItemDetails {
    /// Details of the given kind with every field absent.
    pub fn empty(kind: ItemType) -> Self {
        match kind {
            ItemType::Movie => Self::Movie { overview: None },
            ItemType::Track => Self::Track { artists: Vec::new(), album: None },
            ItemType::Book => Self::Book { author: None, description: None },
            ItemType::Game => Self::Game { developer: None, platforms: Vec::new() },
            ItemType::Art => Self::Art { artist: None, medium: None },
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Movie { .. } => ItemType::Movie,
            Self::Track { .. } => ItemType::Track,
            Self::Book { .. } => ItemType::Book,
            Self::Game { .. } => ItemType::Game,
            Self::Art { .. } => ItemType::Art,
        }
    }

    fn keys(kind: ItemType) -> &'static [&'static str] {
        match kind {
            ItemType::Movie => &["overview"],
            ItemType::Track => &["artists", "album"],
            ItemType::Book => &["author", "description"],
            ItemType::Game => &["developer", "platforms"],
            ItemType::Art => &["artist", "medium"],
        }
    }

    fn from_json(kind: ItemType, map: &Map<String, Value>) -> Self {
        let text = |key: &str| map.get(key).and_then(scalar_string);
        let list = |key: &str| map.get(key).map(string_list).unwrap_or_default();
        match kind {
            ItemType::Movie => Self::Movie { overview: text("overview") },
            ItemType::Track => Self::Track { artists: list("artists"), album: text("album") },
            ItemType::Book => Self::Book { author: text("author"), description: text("description") },
            ItemType::Game => Self::Game { developer: text("developer"), platforms: list("platforms") },
            ItemType::Art => Self::Art { artist: text("artist"), medium: text("medium") },
        }
    }

    fn write_json(&self, map: &mut Map<String, Value>) {
        match self {
            Self::Movie { overview } => insert_text(map, "overview", overview),
            Self::Track { artists, album } => {
                insert_list(map, "artists", artists);
                insert_text(map, "album", album);
            }
            Self::Book { author, description } => {
                insert_text(map, "author", author);
                insert_text(map, "description", description);
            }
            Self::Game { developer, platforms } => {
                insert_text(map, "developer", developer);
                insert_list(map, "platforms", platforms);
            }
            Self::Art { artist, medium } => {
                insert_text(map, "artist", artist);
                insert_text(map, "medium", medium);
            }
        }
    }
}

/// Metadata attached to an item.
///
/// - `genres`: shared by every kind, kept in list order
/// - `details`: the kind-specific fields; also determines the item's type
/// - `extra`: any other upstream keys, carried through serialization but never
///   used for similarity
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMetadata {
    pub genres: Vec<String>,
    pub details: ItemDetails,
    pub extra: Map<String, Value>,
}

impl ItemMetadata {
    pub fn new(details: ItemDetails) -> Self {
        Self { genres: Vec::new(), details, extra: Map::new() }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Lenient conversion from an open metadata map. Known keys with an
    /// unexpected shape are dropped instead of failing.
    pub fn from_json(kind: ItemType, mut map: Map<String, Value>) -> Self {
        let genres = map.get("genres").map(string_list).unwrap_or_default();
        let details = ItemDetails::from_json(kind, &map);
        map.remove("genres");
        for key in ItemDetails::keys(kind) {
            map.remove(*key);
        }
        Self { genres, details, extra: map }
    }

    pub fn to_json(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        insert_list(&mut map, "genres", &self.genres);
        self.details.write_json(&mut map);
        map
    }
}

/// A catalog entry. The item type is derived from `metadata.details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawItem", into = "RawItem")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub provider: Provider,
    pub external_id: String,
    pub owner_id: String,
    pub metadata: ItemMetadata,
}

impl Item {
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        provider: Provider,
        external_id: impl Into<String>,
        owner_id: impl Into<String>,
        metadata: ItemMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            provider,
            external_id: external_id.into(),
            owner_id: owner_id.into(),
            metadata,
        }
    }

    pub fn item_type(&self) -> ItemType {
        self.metadata.details.item_type()
    }
}

/// Wire shape of an item, as exchanged with upstream producers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    pub id: ItemId,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub provider: Provider,
    pub external_id: String,
    #[serde(rename = "user_id", alias = "owner_id")]
    pub owner_id: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            provider: raw.provider,
            external_id: raw.external_id,
            owner_id: raw.owner_id,
            metadata: ItemMetadata::from_json(raw.item_type, raw.metadata),
        }
    }
}

impl From<Item> for RawItem {
    fn from(item: Item) -> Self {
        Self {
            item_type: item.item_type(),
            metadata: item.metadata.to_json(),
            id: item.id,
            title: item.title,
            provider: item.provider,
            external_id: item.external_id,
            owner_id: item.owner_id,
        }
    }
}

/// One ranked result. `score` is a cosine similarity in `[0, 1]`; higher is
/// more similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationScore {
    pub item_id: ItemId,
    pub score: f32,
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(values) => values.iter().filter_map(scalar_string).collect(),
        _ => Vec::new(),
    }
}

fn insert_text(map: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        map.insert(key.to_string(), Value::String(v.clone()));
    }
}

fn insert_list(map: &mut Map<String, Value>, key: &str, values: &[String]) {
    if !values.is_empty() {
        map.insert(key.to_string(), Value::Array(values.iter().cloned().map(Value::String).collect()));
    }
}
