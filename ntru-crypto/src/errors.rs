#[derive(thiserror::Error, Debug)]
pub enum NtruCryptoError {
    /// Parameter set or sampling request that the scheme cannot work with.
    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),
    /// Error when creating a ring with an invalid modulus (m <= 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    /// The element is not a unit of the target quotient ring.
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Modulus shape that polynomial inversion does not handle (neither prime nor a power of two).
    #[error("Unsupported: {0}")]
    Unsupported(String),
    #[error("Key generation gave up after {attempts} attempts without an invertible f")]
    KeyGenerationExhausted { attempts: usize },
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),

    #[error("EncodingError: {0}")]
    EncodingError(String),
    #[error("DecodingError: {0}")]
    DecodingError(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
