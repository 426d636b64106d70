// Clip Vault Constants

// Fingerprinting
pub const FINGERPRINT_BLOCK_SIZE: usize = 65_536; // 64 KiB

// Watcher
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;

// Directory layout
pub const DEFAULT_INBOX_DIR: &str = "inbox";
pub const DEFAULT_ARCHIVE_DIR: &str = "archive";
pub const DEFAULT_CLONE_DIR: &str = "clones";
pub const DEFAULT_BROKEN_DIR: &str = "broken";

// Remote archive
pub const DEFAULT_ARCHIVE_FOLDER: &str = "VideoArchive";

// Custom property written onto the remote object so the archived blob is
// self-describing even without the catalog.
pub const ORIGIN_PATH_PROPERTY: &str = "originPath";

// Config
pub const CONFIG_FILENAME: &str = "clipvault.toml";
