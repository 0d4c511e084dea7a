//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::shared::DomainError;

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hashed = hash_password("admin123").unwrap();
        assert_ne!(hashed, "admin123");
        assert!(verify_password("admin123", &hashed));
        assert!(!verify_password("admin124", &hashed));
    }

    #[test]
    fn garbage_hash_does_not_match() {
        assert!(!verify_password("admin123", "not-a-bcrypt-hash"));
    }
}
