//! The line-oriented text format a catalog travels over HTTP in.
//!
//! One record per line, fields separated by tabs, hierarchy encoded by the
//! number of leading tabs:
//!
//! ```text
//! Alice<TAB>A1
//! <TAB>AlbumX<TAB>AL1<TAB>host/cover/A1/AL1
//! <TAB><TAB>Song1<TAB>T1<TAB>host/track/A1/AL1/T1
//! ```
//!
//! Artist lines start with a non-empty field, album lines split into exactly
//! four fields and track lines into exactly five. Lines of any other shape
//! are skipped so unknown record kinds can be added without breaking old
//! readers.

mod decode;
mod encode;

pub use decode::{decode, DecodeError};
pub use encode::encode;
