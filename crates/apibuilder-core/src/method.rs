//! HTTP method keys.
//!
//! The router treats a method as an opaque uppercase string key rather
//! than a closed enum: the standard verbs are provided as constants, and
//! arbitrary custom verbs are accepted via [`Method::new`].

use std::borrow::Cow;
use std::fmt;

use serde::de::{Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// An HTTP method key.
///
/// Equality and hashing are on the exact uppercase string, so
/// `Method::new("get") == Method::GET`.
///
/// # Example
///
/// ```
/// use apibuilder_core::Method;
///
/// assert_eq!(Method::GET.as_str(), "GET");
/// assert_eq!(Method::new("purge").as_str(), "PURGE");
/// assert_eq!(Method::new("post"), Method::POST);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method(Cow<'static, str>);

impl Method {
    /// The `GET` method.
    pub const GET: Method = Method(Cow::Borrowed("GET"));
    /// The `POST` method.
    pub const POST: Method = Method(Cow::Borrowed("POST"));
    /// The `PUT` method.
    pub const PUT: Method = Method(Cow::Borrowed("PUT"));
    /// The `DELETE` method.
    pub const DELETE: Method = Method(Cow::Borrowed("DELETE"));
    /// The `PATCH` method.
    pub const PATCH: Method = Method(Cow::Borrowed("PATCH"));
    /// The `OPTIONS` method.
    pub const OPTIONS: Method = Method(Cow::Borrowed("OPTIONS"));
    /// The `HEAD` method.
    pub const HEAD: Method = Method(Cow::Borrowed("HEAD"));

    /// Creates a method key, uppercasing the given name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        match Self::well_known(name) {
            Some(method) => method,
            None => Self(Cow::Owned(name.to_ascii_uppercase())),
        }
    }

    /// Returns the uppercase string key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn well_known(name: &str) -> Option<Self> {
        const KNOWN: [Method; 7] = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
            Method::HEAD,
        ];
        KNOWN
            .into_iter()
            .find(|method| method.0.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Method {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MethodVisitor;

        impl Visitor<'_> for MethodVisitor {
            type Value = Method;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an HTTP method name")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Method, E> {
                if value.is_empty() {
                    return Err(E::custom("method name must not be empty"));
                }
                Ok(Method::new(value))
            }
        }

        deserializer.deserialize_str(MethodVisitor)
    }
}
