use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// On a media node this is the path of the audio file on disk, on an
    /// aggregator mirror it is the fully qualified URL the node serves the
    /// track at.
    pub location: String,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Track {
        Track {
            id: id.into(),
            name: name.into(),
            location: location.into(),
        }
    }
}
