//! HMAC digest type, provider seam, and dynamic truncation.

use core::convert::{TryFrom, TryInto as _};

use ring::hmac::{sign, Key as HmacKey, Tag, HMAC_SHA1_FOR_LEGACY_USE_ONLY as HMAC_SHA1};

use crate::Error;

/// HMAC-SHA1 digest type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HmacSha1(pub [u8; 20]);

impl AsRef<[u8]> for HmacSha1 {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<[u8; 20]> for HmacSha1 {
    fn from(raw: [u8; 20]) -> Self {
        Self(raw)
    }
}

impl TryFrom<Tag> for HmacSha1 {
    type Error = Error;
    fn try_from(digest: Tag) -> Result<Self, Self::Error> {
        digest.as_ref().try_into().map_err(|_| Error::Digest).map(Self)
    }
}

impl HmacSha1 {
    /// Dynamically truncates the digest to a 31-bit unsigned integer.
    ///
    /// Implements the extraction step of [RFC 4226][4226] §5.3: the low
    /// four bits of the final digest byte select an offset in `[0, 15]`,
    /// and the four bytes starting there are concatenated big-endian.
    /// The leading bit of the first selected byte is cleared (`& 0x7f`, a
    /// bitwise mask, never a modulo substitute) so the result always fits
    /// in 31 bits regardless of signedness conventions; the remaining
    /// three bytes contribute their full 0–255 values. With a 20-byte
    /// digest the selected window ends at index 19 at most, so indexing
    /// cannot go out of range.
    ///
    /// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
    pub fn truncate(&self) -> u32 {
        let offset = (self.0[19] & 0xf) as usize;
        let bytes = [
            // Strip the leading bit to remove signed/unsigned ambiguity
            self.0[offset] & 0x7f,
            self.0[offset + 1],
            self.0[offset + 2],
            self.0[offset + 3],
        ];
        u32::from_be_bytes(bytes)
    }
}

/// Source of HMAC-SHA1 digests.
///
/// The TOTP engine consumes the HMAC primitive only through this
/// contract, so alternative cryptographic backends (or test doubles) may
/// be substituted without touching the derivation pipeline. Provider
/// failures are propagated to the caller unchanged and are never retried:
/// a failing HMAC indicates a programming or configuration error, not a
/// transient condition.
pub trait Hmac {
    /// Computes `HMAC-SHA1(key, message)`.
    fn digest(&self, key: &[u8], message: &[u8]) -> Result<HmacSha1, Error>;
}

/// HMAC-SHA1 provider backed by [`ring`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RingHmac;

impl Hmac for RingHmac {
    fn digest(&self, key: &[u8], message: &[u8]) -> Result<HmacSha1, Error> {
        let key = HmacKey::new(HMAC_SHA1, key);
        sign(&key, message).try_into()
    }
}
