use uuid::Uuid;

/// Generate a fresh entity identity.
///
/// UUIDv4 from the OS CSPRNG, rendered in the canonical hyphenated form
/// when persisted. Every entity gets its key from here just before its
/// first insert, which keeps insert/update semantics uniform across the
/// whole data model.
pub fn generate_identity() -> Uuid {
    Uuid::new_v4()
}
