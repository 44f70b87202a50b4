use rand::Rng;
use uuid::{Uuid, Variant, Version};

pub fn make_uuid<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random())
        .with_variant(Variant::RFC4122)
        .with_version(Version::Random)
        .into_uuid()
}

/// Source of note identifiers, swappable for a deterministic one in tests.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> Uuid;
}

pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate_id(&self) -> Uuid {
        make_uuid(&mut rand::rng())
    }
}
