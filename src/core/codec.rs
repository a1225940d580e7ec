//! Persistence codec.
//!
//! A saved game is exactly what is needed to rebuild a session: the starting
//! arrangement and the ordered moves. The board itself is never stored; it is
//! recomputed by replay on load.
//!
//! Two encodings are offered: compact bytes (`bincode`) and JSON
//! (`serde_json`). Both round-trip losslessly.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::error::CodecError;
use super::history::History;

/// Starting arrangement plus ordered moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize, M: Serialize",
    deserialize = "P: Deserialize<'de> + Clone, M: Deserialize<'de>"
))]
pub struct SavedGame<P: Clone, M> {
    pub initial: Board<P>,
    pub moves: Vec<M>,
}

impl<P: Clone, M: Clone> SavedGame<P, M> {
    #[must_use]
    pub fn new(initial: Board<P>, history: &History<M>) -> Self {
        Self {
            initial,
            moves: history.to_vec(),
        }
    }

    /// The moves as a history.
    #[must_use]
    pub fn history(&self) -> History<M> {
        self.moves.iter().cloned().collect()
    }
}

impl<P, M> SavedGame<P, M>
where
    P: Clone + Serialize + DeserializeOwned,
    M: Serialize + DeserializeOwned,
{
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(text)?)
    }
}
