use super::Album;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub albums: BTreeMap<String, Album>,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Artist {
        Artist {
            id: id.into(),
            name: name.into(),
            albums: BTreeMap::new(),
        }
    }

    /// Inserts an album, replacing any previous album with the same id.
    pub fn insert_album(&mut self, album: Album) {
        self.albums.insert(album.id.clone(), album);
    }

    pub fn album(&self, id: &str) -> Option<&Album> {
        self.albums.get(id)
    }

    pub fn albums(&self) -> impl Iterator<Item = &Album> {
        self.albums.values()
    }
}
