//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Generate a UUIDv4 that does not satisfy `taken`
///
/// Collisions between v4 ids are astronomically unlikely, but the collection
/// invariant is "never reused", so the loop makes it unconditional.
pub fn generate_unique(taken: impl Fn(&Uuid) -> bool) -> Uuid {
    loop {
        let id = generate();
        if !taken(&id) {
            return id;
        }
    }
}

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}
