//! Change fingerprints for examined classes.

use apilint_core::Class;
use sha2::{Digest, Sha256};

/// SHA-256 (hex) over a class's declaration and its members' declarations,
/// in file order. Two dumps give the same fingerprint for a class exactly
/// when its text is unchanged, whatever line it sits on.
pub fn class_fingerprint(class: &Class) -> String {
    let mut hasher = Sha256::new();
    hasher.update(class.raw.as_bytes());
    for method in &class.methods {
        hasher.update(b"\n");
        hasher.update(method.raw.as_bytes());
    }
    for field in &class.fields {
        hasher.update(b"\n");
        hasher.update(field.raw.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
