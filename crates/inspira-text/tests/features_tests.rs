use serde_json::json;

use inspira_core::types::{Item, ItemDetails, ItemMetadata, ItemType, Provider};
use inspira_text::{extract, Analyzer};

fn wire(value: serde_json::Value) -> Item {
    serde_json::from_value(value).expect("item")
}

#[test]
fn movie_document_orders_title_type_genres_overview() {
    let item = wire(json!({
        "id": "1", "title": "Inception", "type": "MOVIE", "provider": "TMDB",
        "external_id": "27205", "user_id": "user1",
        "metadata": {
            "genres": ["Science Fiction", "Action", "Adventure"],
            "overview": "A thief who steals corporate secrets through dream-sharing technology."
        }
    }));

    let doc = extract(&item);
    assert_eq!(
        doc.as_str(),
        "Inception MOVIE Science Fiction Action Adventure A thief who steals corporate secrets through dream-sharing technology."
    );
}

#[test]
fn track_document_includes_artists_and_album() {
    let item = wire(json!({
        "id": "3", "title": "Bohemian Rhapsody", "type": "TRACK", "provider": "SPOTIFY",
        "external_id": "3z8h0TU7ReDPLIbEnYhWZb", "user_id": "user1",
        "metadata": {"artists": ["Queen"], "album": "A Night at the Opera", "genres": ["Rock", "Classic Rock"]}
    }));

    assert_eq!(extract(&item).as_str(), "Bohemian Rhapsody TRACK Rock Classic Rock Queen A Night at the Opera");
}

#[test]
fn overview_only_counts_for_movies() {
    let movie = wire(json!({
        "id": "m", "title": "2001", "type": "MOVIE", "provider": "TMDB", "external_id": "62", "user_id": "u",
        "metadata": {"overview": "space odyssey"}
    }));
    let track = wire(json!({
        "id": "t", "title": "Also sprach Zarathustra", "type": "TRACK", "provider": "SPOTIFY", "external_id": "z", "user_id": "u",
        "metadata": {"overview": "space odyssey"}
    }));

    let analyzer = Analyzer::default();
    let movie_tokens = analyzer.tokens(extract(&movie).as_str());
    assert!(movie_tokens.contains(&"space".to_string()));
    assert!(movie_tokens.contains(&"odyssey".to_string()));

    let track_tokens = analyzer.tokens(extract(&track).as_str());
    assert!(!track_tokens.contains(&"space".to_string()));
    assert!(!track_tokens.contains(&"odyssey".to_string()));
}

#[test]
fn book_game_and_art_fields_follow_genres() {
    let book = Item::new(
        "b", "1984", Provider::Tmdb, "book_1984", "u",
        ItemMetadata::new(ItemDetails::Book {
            author: Some("George Orwell".into()),
            description: Some("A dystopian novel.".into()),
        })
        .with_genres(["Dystopian"]),
    );
    assert_eq!(extract(&book).as_str(), "1984 BOOK Dystopian George Orwell A dystopian novel.");

    let game = Item::new(
        "g", "Breath of the Wild", Provider::Tmdb, "zelda", "u",
        ItemMetadata::new(ItemDetails::Game {
            developer: Some("Nintendo".into()),
            platforms: vec!["Switch".into(), "Wii U".into()],
        }),
    );
    assert_eq!(extract(&game).as_str(), "Breath of the Wild GAME Nintendo Switch Wii U");

    let art = Item::new(
        "a", "Starry Night", Provider::Tmdb, "art", "u",
        ItemMetadata::new(ItemDetails::Art { artist: Some("Van Gogh".into()), medium: None }),
    );
    assert_eq!(extract(&art).as_str(), "Starry Night ART Van Gogh");
}

#[test]
fn empty_and_missing_fields_are_skipped() {
    let item = Item::new(
        "t", "Untitled", Provider::Spotify, "x", "u",
        ItemMetadata::new(ItemDetails::Track { artists: vec![String::new()], album: Some(String::new()) })
            .with_genres([""]),
    );
    assert_eq!(extract(&item).as_str(), "Untitled TRACK");

    let bare = Item::new("m", "Bare", Provider::Tmdb, "x", "u", ItemMetadata::new(ItemDetails::empty(ItemType::Movie)));
    assert_eq!(extract(&bare).to_string(), "Bare MOVIE");
}
