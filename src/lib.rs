//! Implementation of [IETF RFC 6238][6238] (TOTP).
//!
//! A time-based one-time password is an [RFC 4226][4226] HOTP whose moving
//! factor is the number of whole time steps elapsed since the Unix epoch.
//! This crate provides the derivation pipeline (Base32 secret decoding,
//! counter derivation, HMAC-SHA1 invocation, dynamic truncation, decimal
//! formatting) and exact-step verification. The HMAC primitive is consumed
//! through the [`Hmac`][digest::Hmac] trait and supplied by `ring` by
//! default.
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

use ring::constant_time::verify_slices_are_equal;

pub mod base32;
mod counter;
pub mod digest;

pub use digest::{Hmac, HmacSha1, RingHmac};

const DEFAULT_STEP_SECS: u64 = 30;
const DEFAULT_DIGITS: u8 = 6;
const MIN_DIGITS: u8 = 6;
const MAX_DIGITS: u8 = 8;

/// TOTP error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Base32 input contained a character outside the alphabet.
    #[error("invalid base32 character {0:?}")]
    InvalidEncoding(char),
    /// The provided secret decoded to zero bytes.
    #[error("decoded secret is empty")]
    EmptySecret,
    /// The requested number of digits was outside of the range [6, 8].
    #[error("requested number of digits is outside the range [6, 8]")]
    Digits,
    /// The HMAC provider produced a digest of incorrect length.
    #[error("invalid HMAC-SHA1 digest (incorrect length)")]
    Digest,
    /// The system clock reported a time before the Unix epoch.
    #[error("failed to get time since the unix epoch")]
    Time(#[from] std::time::SystemTimeError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// TOTP engine.
///
/// Holds construction-time configuration (time step, code width, HMAC
/// provider) so that independently configured engines can coexist; no
/// state is shared between instances or calls, and every operation is a
/// pure function of its inputs. [`Totp::new`] yields the conventional
/// 30-second, 6-digit, `ring`-backed configuration.
#[derive(Clone, Copy, Debug)]
pub struct Totp<H: Hmac = RingHmac> {
    hmac: H,
    step_secs: u64,
    digits: u8,
}

impl Totp<RingHmac> {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_provider(RingHmac)
    }
}

impl Default for Totp<RingHmac> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hmac> Totp<H> {
    /// Creates an engine with the default configuration atop a custom
    /// HMAC provider.
    pub fn with_provider(hmac: H) -> Self {
        Self {
            hmac,
            step_secs: DEFAULT_STEP_SECS,
            digits: DEFAULT_DIGITS,
        }
    }

    /// Sets the time-step duration in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `step_secs` is zero.
    pub fn step_secs(mut self, step_secs: u64) -> Self {
        assert!(step_secs > 0, "time step must be at least one second");
        self.step_secs = step_secs;
        self
    }

    /// Sets the code width in digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Digits`] if `!(6..=8).contains(&digits)`.
    pub fn digits(mut self, digits: u8) -> Result<Self> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return Err(Error::Digits);
        }
        self.digits = digits;
        Ok(self)
    }

    /// Generates the code for a secret at an explicit timestamp
    /// (milliseconds since the Unix epoch).
    ///
    /// Decodes the Base32 secret, derives the moving factor for the
    /// engine's time step, computes HMAC-SHA1 over the factor's eight
    /// big-endian bytes, dynamically truncates the digest, and reduces
    /// the result modulo `10^digits`, zero-padded to a fixed width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the secret is not valid
    /// Base32, [`Error::EmptySecret`] if it decodes to zero bytes, and
    /// propagates any provider failure unchanged.
    pub fn generate_at(&self, secret_base32: &str, timestamp_millis: u64) -> Result<String> {
        let key = base32::decode(secret_base32)?;
        if key.is_empty() {
            return Err(Error::EmptySecret);
        }
        let factor = counter::at(timestamp_millis, self.step_secs);
        let digest = self.hmac.digest(&key, &factor.to_be_bytes())?;
        let code = digest.truncate() % 10_u32.pow(self.digits.into());
        Ok(format!("{:0width$}", code, width = usize::from(self.digits)))
    }

    /// Generates the code for a secret at the current system time.
    pub fn generate(&self, secret_base32: &str) -> Result<String> {
        self.generate_at(secret_base32, counter::now_millis()?)
    }

    /// Checks a candidate code against a secret at an explicit timestamp.
    ///
    /// Re-derives the code and compares in constant time. Only the exact
    /// time step is consulted; callers needing clock-skew tolerance can
    /// invoke this at adjacent step offsets. A mismatch is an `Ok(false)`
    /// result, never an error.
    pub fn verify_at(
        &self,
        secret_base32: &str,
        code: &str,
        timestamp_millis: u64,
    ) -> Result<bool> {
        let expected = self.generate_at(secret_base32, timestamp_millis)?;
        Ok(verify_slices_are_equal(expected.as_bytes(), code.as_bytes()).is_ok())
    }

    /// Checks a candidate code against a secret at the current system time.
    pub fn verify(&self, secret_base32: &str, code: &str) -> Result<bool> {
        self.verify_at(secret_base32, code, counter::now_millis()?)
    }
}

/// Encodes bytes (or text) as Base32.
///
/// See [`base32::encode`].
pub fn encode_base32<B: AsRef<[u8]>>(data: B) -> String {
    base32::encode(data.as_ref())
}

/// Decodes Base32 text into bytes.
///
/// See [`base32::decode`].
pub fn decode_base32(text: &str) -> Result<Vec<u8>> {
    base32::decode(text)
}

/// Generates the 6-digit code for a Base32 secret at the current time.
pub fn generate_code(secret_base32: &str) -> Result<String> {
    Totp::new().generate(secret_base32)
}

/// Generates the 6-digit code for a Base32 secret at an explicit
/// timestamp (milliseconds since the Unix epoch).
pub fn generate_code_at(secret_base32: &str, timestamp_millis: u64) -> Result<String> {
    Totp::new().generate_at(secret_base32, timestamp_millis)
}

/// Checks a candidate code against a Base32 secret at the current time.
pub fn verify_code(secret_base32: &str, code: &str) -> Result<bool> {
    Totp::new().verify(secret_base32, code)
}

/// Checks a candidate code against a Base32 secret at an explicit
/// timestamp (milliseconds since the Unix epoch).
pub fn verify_code_at(secret_base32: &str, code: &str, timestamp_millis: u64) -> Result<bool> {
    Totp::new().verify_at(secret_base32, code, timestamp_millis)
}
