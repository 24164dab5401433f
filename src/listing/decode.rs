use crate::catalog::{Album, Artist, Catalog, Track};
use thiserror::Error;

/// A record that breaks the hierarchy of the listing.
///
/// Unrecognized line shapes are skipped, but an album or track record that
/// has no parent to attach to makes the whole listing unusable; the caller
/// keeps whatever catalog it had before.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("track record outside of any album on line {line}")]
    TrackOutsideAlbum { line: usize },
    #[error("album record outside of any artist on line {line}")]
    AlbumOutsideArtist { line: usize },
}

impl DecodeError {
    /// 1-based line number of the offending record.
    pub fn line(&self) -> usize {
        match self {
            DecodeError::TrackOutsideAlbum { line } => *line,
            DecodeError::AlbumOutsideArtist { line } => *line,
        }
    }
}

/// Parses listing text into a catalog.
///
/// Lines are classified by splitting on tab: a non-empty first field starts
/// a new artist, an empty first field with exactly four fields is an album
/// of the current artist, an empty first field with exactly five fields is a
/// track of the current album. Anything else is skipped. A repeated
/// identifier replaces the earlier entity, last one wins.
///
/// Decoding always starts from an empty catalog, so entities that
/// disappeared from the remote node disappear from the result too.
pub fn decode(text: &str) -> Result<Catalog, DecodeError> {
    let mut catalog = Catalog::new();
    let mut current_artist: Option<Artist> = None;
    let mut current_album: Option<Album> = None;

    for (index, line) in text.split('\n').enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        if !fields[0].is_empty() {
            if fields.len() < 2 {
                continue;
            }
            if let Some(mut artist) = current_artist.take() {
                if let Some(album) = current_album.take() {
                    artist.insert_album(album);
                }
                catalog.insert_artist(artist);
            }
            current_artist = Some(Artist::new(fields[1], fields[0]));
        } else if fields.len() == 4 {
            match current_artist.as_mut() {
                Some(artist) => {
                    if let Some(album) = current_album.take() {
                        artist.insert_album(album);
                    }
                    current_album = Some(Album::new(fields[2], fields[1], fields[3]));
                }
                None => return Err(DecodeError::AlbumOutsideArtist { line: index + 1 }),
            }
        } else if fields.len() == 5 {
            match current_album.as_mut() {
                Some(album) => album.insert_track(Track::new(fields[3], fields[2], fields[4])),
                None => return Err(DecodeError::TrackOutsideAlbum { line: index + 1 }),
            }
        }
    }

    if let Some(mut artist) = current_artist.take() {
        if let Some(album) = current_album.take() {
            artist.insert_album(album);
        }
        catalog.insert_artist(artist);
    }
    Ok(catalog)
}
