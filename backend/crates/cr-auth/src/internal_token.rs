use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Shared secret presented by trusted collaborators on internal routes
pub struct InternalTokenVerifier {
    expected: Option<Zeroizing<String>>,
}

impl InternalTokenVerifier {
    /// `None` disables internal routes entirely: every presented token is rejected.
    pub fn new(expected: Option<String>) -> Self {
        Self {
            expected: expected.map(Zeroizing::new),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    pub fn verify(&self, presented: &str) -> bool {
        match &self.expected {
            Some(expected) => expected.as_bytes().ct_eq(presented.as_bytes()).into(),
            None => false,
        }
    }
}

impl std::fmt::Debug for InternalTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalTokenVerifier")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
