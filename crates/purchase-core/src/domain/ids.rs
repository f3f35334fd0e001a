//! Update identifiers (ULID based).
//!
//! 1 回の purchase update の処理をログ上で追跡するための ID です。
//! ULID は生成順でソートできるので、ログを時系列に並べやすくなります。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UpdateId(Ulid);

impl UpdateId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl Default for UpdateId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Ulid> for UpdateId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for UpdateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upd-{}", self.0)
    }
}
