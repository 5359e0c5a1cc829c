mod errors;
mod internal;

pub use errors::*;
pub use internal::{NoteStore, NoteStoreImpl};
pub use internal::env_trait::{NoteStoreEnv, ProductionNoteStoreEnv};
