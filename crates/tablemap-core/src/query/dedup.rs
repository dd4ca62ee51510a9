use serde::Deserialize;
use std::collections::HashSet;

///
/// DedupMode
///
/// How [`Query::all`](crate::query::Query::all) collapses rows that share a
/// key value. One-to-many joins repeat the primary row once per child row;
/// `Adjacent` folds those runs while keeping the result order.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DedupMode {
    /// Drop a row whose key equals the previous row's key.
    #[default]
    Adjacent,
    /// Drop every row whose key was already seen.
    Full,
    /// Keep every row; the entity needs no key.
    None,
}

impl DedupMode {
    pub(crate) fn tracker(self) -> KeyTracker {
        match self {
            Self::Adjacent => KeyTracker::Last(None),
            Self::Full => KeyTracker::Seen(HashSet::new()),
            Self::None => KeyTracker::Off,
        }
    }
}

///
/// KeyTracker
///

pub(crate) enum KeyTracker {
    Last(Option<String>),
    Seen(HashSet<String>),
    Off,
}

impl KeyTracker {
    /// Whether a row with `key` survives deduplication.
    pub(crate) fn admit(&mut self, key: String) -> bool {
        match self {
            Self::Last(last) => {
                if last.as_ref() == Some(&key) {
                    return false;
                }
                *last = Some(key);
                true
            }
            Self::Seen(seen) => seen.insert(key),
            Self::Off => true,
        }
    }
}
