use super::{Album, Artist, Track};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The artist → album → track hierarchy of one music collection.
///
/// On a media node the catalog is built once at startup and never mutated
/// afterwards. On an aggregator each mirror holds one catalog that is
/// replaced wholesale by every successful poll cycle.
///
/// Collections are keyed by identifier; identifiers are opaque strings,
/// unique at their level. The key order also fixes the order entities are
/// visited in when the catalog is encoded to a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub artists: BTreeMap<String, Artist>,
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog::default()
    }

    /// Inserts an artist, replacing any previous artist with the same id.
    pub fn insert_artist(&mut self, artist: Artist) {
        self.artists.insert(artist.id.clone(), artist);
    }

    pub fn artist(&self, id: &str) -> Option<&Artist> {
        self.artists.get(id)
    }

    pub fn album(&self, artist_id: &str, album_id: &str) -> Option<&Album> {
        self.artist(artist_id)?.album(album_id)
    }

    pub fn track(&self, artist_id: &str, album_id: &str, track_id: &str) -> Option<&Track> {
        self.album(artist_id, album_id)?.track(track_id)
    }

    pub fn artists(&self) -> impl Iterator<Item = &Artist> {
        self.artists.values()
    }

    pub fn artists_count(&self) -> usize {
        self.artists.len()
    }

    pub fn albums_count(&self) -> usize {
        self.artists().map(|artist| artist.albums.len()).sum()
    }

    pub fn tracks_count(&self) -> usize {
        self.artists()
            .flat_map(|artist| artist.albums())
            .map(|album| album.tracks.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut track_album = Album::new("AL1", "First", "/covers/first.jpg");
        track_album.insert_track(Track::new("T1", "One", "/audio/one.mp3"));
        track_album.insert_track(Track::new("T2", "Two", "/audio/two.mp3"));

        let mut artist = Artist::new("A1", "Alice");
        artist.insert_album(track_album);
        artist.insert_album(Album::new("AL2", "Second", "/covers/second.jpg"));

        let mut catalog = Catalog::new();
        catalog.insert_artist(artist);
        catalog.insert_artist(Artist::new("A2", "Bob"));
        catalog
    }

    #[test]
    fn counts_nested_entities() {
        let catalog = sample();
        assert_eq!(catalog.artists_count(), 2);
        assert_eq!(catalog.albums_count(), 2);
        assert_eq!(catalog.tracks_count(), 2);
    }

    #[test]
    fn looks_up_through_the_hierarchy() {
        let catalog = sample();
        assert_eq!(catalog.artist("A1").unwrap().name, "Alice");
        assert_eq!(catalog.album("A1", "AL1").unwrap().name, "First");
        assert_eq!(catalog.track("A1", "AL1", "T2").unwrap().name, "Two");
        assert!(catalog.artist("A9").is_none());
        assert!(catalog.album("A1", "AL9").is_none());
        assert!(catalog.track("A1", "AL1", "T9").is_none());
        assert!(catalog.track("A2", "AL1", "T1").is_none());
    }

    #[test]
    fn insert_with_same_id_replaces() {
        let mut catalog = sample();
        catalog.insert_artist(Artist::new("A1", "Alice Revised"));
        assert_eq!(catalog.artists_count(), 2);
        assert_eq!(catalog.artist("A1").unwrap().name, "Alice Revised");
        assert_eq!(catalog.albums_count(), 0);
    }
}
