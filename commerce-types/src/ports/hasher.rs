//! Password hashing port.

use crate::error::HashError;

/// One-way salted password hashing capability.
///
/// The algorithm is an adapter concern; the domain only relies on
/// `verify(plaintext, hash(plaintext))` holding and the digest being
/// irreversible.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hashes a plaintext password into an opaque digest.
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// Verifies a plaintext password against a stored digest.
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}
