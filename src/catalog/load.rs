use super::{Album, Artist, Catalog, Track};
use crate::config::NodeConfig;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Deserialize)]
struct ArtistEntry {
    id: String,
    name: String,
    #[serde(default)]
    albums: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct AlbumEntry {
    id: String,
    name: String,
    cover: String,
    #[serde(default)]
    tracks: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct TrackEntry {
    id: String,
    name: String,
    file: String,
}

/// Builds the media node's catalog from its configuration.
///
/// Each artist, album and track entity is validated on its own; a malformed
/// entity is logged and skipped without discarding the rest of the catalog.
pub fn load_catalog(config: &NodeConfig) -> Catalog {
    let mut catalog = Catalog::new();

    for (index, value) in config.artists.iter().enumerate() {
        let entry: ArtistEntry = match serde_json::from_value(value.clone()) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping malformed artist entry #{}: {}", index, err);
                continue;
            }
        };

        let mut artist = Artist::new(entry.id, entry.name);
        for (album_index, album_value) in entry.albums.iter().enumerate() {
            let album_entry: AlbumEntry = match serde_json::from_value(album_value.clone()) {
                Ok(album_entry) => album_entry,
                Err(err) => {
                    warn!(
                        "Skipping malformed album entry #{} of artist {}: {}",
                        album_index, artist.id, err
                    );
                    continue;
                }
            };

            let mut album = Album::new(album_entry.id, album_entry.name, album_entry.cover);
            for (track_index, track_value) in album_entry.tracks.iter().enumerate() {
                match serde_json::from_value::<TrackEntry>(track_value.clone()) {
                    Ok(track_entry) => album.insert_track(Track::new(
                        track_entry.id,
                        track_entry.name,
                        track_entry.file,
                    )),
                    Err(err) => {
                        warn!(
                            "Skipping malformed track entry #{} of album {}: {}",
                            track_index, album.id, err
                        );
                    }
                }
            }
            artist.insert_album(album);
        }

        info!("Loaded artist: {}", artist.name);
        catalog.insert_artist(artist);
    }

    info!(
        "Catalog has:\n{} artists\n{} albums\n{} tracks",
        catalog.artists_count(),
        catalog.albums_count(),
        catalog.tracks_count()
    );
    catalog
}
