//! SUMMARY:
//! Opaque isolated-filesystem identifiers and the generators that mint them.
use std::borrow::Borrow;
use std::fmt;

/// SUMMARY:
/// Name one registered set of top-level entries.
///
/// DETAILS:
/// The token is opaque: callers may store, compare, and embed it in virtual paths,
/// but must not derive meaning from its contents. Lookups accept `&str`, so an
/// identifier read back out of a virtual path can be checked without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsolatedId(String);

impl IsolatedId {
    /// SUMMARY:
    /// Wrap an already-minted token. Intended for `IdGenerator` implementations.
    #[inline]
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for IsolatedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IsolatedId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IsolatedId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for IsolatedId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for IsolatedId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for IsolatedId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for IsolatedId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(IsolatedId)
    }
}

/// SUMMARY:
/// Mint candidate identifiers for an `IsolatedContext`.
///
/// DETAILS:
/// Output only needs to be practically unique. The registry rejects and retries any
/// candidate that equals a live identifier, so a generator never has to remember
/// what it produced. Candidates must be non-empty and must not contain `/` or the
/// host separator, otherwise they could not be read back out of a virtual path.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> IsolatedId;
}

/// SUMMARY:
/// Default generator: random (v4) UUIDs rendered as 32 uppercase hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> IsolatedId {
        let mut buf = uuid::Uuid::encode_buffer();
        let token = uuid::Uuid::new_v4().simple().encode_upper(&mut buf);
        IsolatedId::new(&*token)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate(&self) -> IsolatedId {
        (**self).generate()
    }
}
