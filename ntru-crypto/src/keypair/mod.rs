pub mod keys;
pub mod params;

pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use params::{DEFAULT_MAX_KEYGEN_ATTEMPTS, NtruParams};
