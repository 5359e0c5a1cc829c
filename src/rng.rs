#[cfg(test)] pub mod testing;

use rand::Rng;
use uuid::{Uuid, Variant, Version};
use crate::data::Millis;
use crate::lib_constants::{NOTE_ID_SUFFIX_ALPHABET, NOTE_ID_SUFFIX_LEN};

pub fn make_uuid<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random())
        .with_variant(Variant::RFC4122)
        .with_version(Version::Random)
        .into_uuid()
}

/// Note ids are the creation time in decimal millis followed by a short
/// random base-36 tail. Unique in practice, not guaranteed.
pub fn make_note_id<R: Rng>(now: Millis, rng: &mut R) -> String {
    let mut id = now.to_string();
    id.extend(
        (0..NOTE_ID_SUFFIX_LEN)
            .map(|_| {
                NOTE_ID_SUFFIX_ALPHABET[
                    rng.random_range(0..NOTE_ID_SUFFIX_ALPHABET.len())
                ] as char
            })
    );
    id
}
