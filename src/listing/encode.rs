use crate::catalog::Catalog;

/// Serializes a catalog to listing text.
///
/// Artists are visited in key order, then each artist's albums, then each
/// album's tracks, one newline-terminated record per entity. Cover and track
/// URLs are derived from `host` and the entity identifiers; the file paths a
/// node keeps in its catalog never reach the wire.
pub fn encode(catalog: &Catalog, host: &str) -> String {
    let mut out = String::new();
    for artist in catalog.artists() {
        out.push_str(&format!("{}\t{}\n", artist.name, artist.id));
        for album in artist.albums() {
            out.push_str(&format!(
                "\t{}\t{}\t{}/cover/{}/{}\n",
                album.name, album.id, host, artist.id, album.id
            ));
            for track in album.tracks() {
                out.push_str(&format!(
                    "\t\t{}\t{}\t{}/track/{}/{}/{}\n",
                    track.name, track.id, host, artist.id, album.id, track.id
                ));
            }
        }
    }
    out
}
