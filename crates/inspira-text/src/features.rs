//! Feature extraction: one item in, one flat text document out.
//!
//! Token order is title, type tag, genres, then the kind-specific fields.
//! Missing or malformed metadata only means fewer tokens.

use std::fmt;

use inspira_core::types::{Item, ItemDetails};

/// Space-joined feature text of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    pub fn as_str(&self) -> &str { &self.0 }

    pub fn into_string(self) -> String { self.0 }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

pub fn extract(item: &Item) -> Document {
    let mut features: Vec<&str> = vec![item.title.as_str(), item.item_type().as_str()];
    features.extend(item.metadata.genres.iter().map(String::as_str));

    match &item.metadata.details {
        ItemDetails::Movie { overview } => features.extend(overview.as_deref()),
        ItemDetails::Track { artists, album } => {
            features.extend(artists.iter().map(String::as_str));
            features.extend(album.as_deref());
        }
        ItemDetails::Book { author, description } => {
            features.extend(author.as_deref());
            features.extend(description.as_deref());
        }
        ItemDetails::Game { developer, platforms } => {
            features.extend(developer.as_deref());
            features.extend(platforms.iter().map(String::as_str));
        }
        ItemDetails::Art { artist, medium } => {
            features.extend(artist.as_deref());
            features.extend(medium.as_deref());
        }
    }

    Document(features.into_iter().filter(|f| !f.is_empty()).collect::<Vec<_>>().join(" "))
}
