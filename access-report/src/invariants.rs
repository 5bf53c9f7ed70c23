use derive_more::{AsRef, Debug, Display};
use serde::Serialize;

/// Client address exactly as written in the log. Not validated, so `-` or a
/// hostname is carried through unchanged.
#[derive(Debug, Display, AsRef, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClientIp(String);

impl ClientIp {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Dotted-quad segments, in order.
    pub fn octets(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// True for four segments of one to three ASCII digits each.
    pub fn is_conventional(&self) -> bool {
        let mut count = 0;
        let well_formed = self.octets().all(|octet| {
            count += 1;
            (1..=3).contains(&octet.len()) && octet.bytes().all(|b| b.is_ascii_digit())
        });
        well_formed && count == 4
    }
}

impl From<&str> for ClientIp {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

/// Synthetic sort key built from the zero-padded octets of a [`ClientIp`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OctetRank(u64);

impl OctetRank {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for OctetRank {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
