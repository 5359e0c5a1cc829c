pub const DEFAULT_CONFIG_FILE: &str = "/etc/pocketnotes/pocketnotes.toml";
pub const DEFAULT_DATA_DIR: &str = "/var/lib/pocketnotes";
pub const APP_CONFIG_ENV_PREFIX: &str = "POCKETNOTES_";
