use time::OffsetDateTime;
use crate::data::Millis;
use crate::rng::make_note_id;

/// Clock and id source of a note store.
pub trait NoteStoreEnv: Send + Sync {
    fn now_millis(&self) -> Millis;

    fn generate_note_id(&self, now: Millis) -> String;
}

#[derive(Debug, Default)]
pub struct ProductionNoteStoreEnv;

impl NoteStoreEnv for ProductionNoteStoreEnv {
    fn now_millis(&self) -> Millis {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as Millis
    }

    fn generate_note_id(&self, now: Millis) -> String {
        make_note_id(now, &mut rand::rng())
    }
}
