use super::Track;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    /// Cover image, a file path on a media node or a URL on a mirror.
    pub cover: String,
    pub tracks: BTreeMap<String, Track>,
}

impl Album {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cover: impl Into<String>) -> Album {
        Album {
            id: id.into(),
            name: name.into(),
            cover: cover.into(),
            tracks: BTreeMap::new(),
        }
    }

    /// Inserts a track, replacing any previous track with the same id.
    pub fn insert_track(&mut self, track: Track) {
        self.tracks.insert(track.id.clone(), track);
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.get(id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }
}
