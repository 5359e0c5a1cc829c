// storage keys, shared with the original on-device layout
pub const ACCOUNTS_KEY: &str = "@users";
pub const CURRENT_USER_KEY: &str = "@current_user";
pub const NOTES_KEY_PREFIX: &str = "@notes_";

// relative to the data directory
pub const KV_DIRECTORY_PATH: &str = "kv";
pub const TMP_FILENAME_INFIX: &str = ".tmp.";
// longer keys are stored under a prefix plus a digest
pub const MAX_PLAIN_KEY_LEN: usize = 64;

pub const DEFAULT_MAX_VALUE_SIZE: u64 = 16 * 1024 * 1024;

pub const NOTE_ID_SUFFIX_LEN: usize = 9;
pub const NOTE_ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
