//! Session cookie values.
//!
//! A cookie value is `<session id>.<mac>`, where the MAC is a BLAKE3 keyed
//! hash of the id. Values that fail verification are treated as absent.

use std::fmt;

use http::HeaderMap;
use http::header::COOKIE;
use uuid::Uuid;

const KEY_CONTEXT: &str = "swatch session cookie 2024-06 v1";

/// Opaque key of one browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Signs and verifies session cookie values.
#[derive(Clone)]
pub struct CookieSigner {
    key: [u8; 32],
}

impl CookieSigner {
    /// Derive the signing key from a configured secret.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
        }
    }

    /// A signer with a key nobody else knows.
    pub fn random() -> Self {
        let mut seed = Vec::with_capacity(32);
        seed.extend_from_slice(Uuid::new_v4().as_bytes());
        seed.extend_from_slice(Uuid::new_v4().as_bytes());
        Self {
            key: blake3::derive_key(KEY_CONTEXT, &seed),
        }
    }

    /// Cookie value for `id`.
    pub fn sign(&self, id: SessionId) -> String {
        format!("{id}.{}", self.mac(id).to_hex())
    }

    /// The session id carried by `value`, if its MAC checks out.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (id, mac) = value.split_once('.')?;
        let id = SessionId(Uuid::try_parse(id).ok()?);
        let mac = blake3::Hash::from_hex(mac).ok()?;
        // blake3::Hash equality is constant-time.
        (self.mac(id) == mac).then_some(id)
    }

    fn mac(&self, id: SessionId) -> blake3::Hash {
        blake3::keyed_hash(&self.key, id.0.as_bytes())
    }
}

impl fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

/// Find the value of cookie `name` in the request headers.
pub(crate) fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// `Set-Cookie` value establishing a session.
pub(crate) fn set_cookie_value(name: &str, value: &str) -> String {
    format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax")
}
