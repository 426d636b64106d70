// MIME guessing and video classification

use std::path::Path;

// Extension to MIME type table. Video formats first (matching the camera
// formats we expect in the inbox), then common non-video types so they
// classify cleanly instead of falling through as undetermined.
const MIME_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
    ("mpg", "video/mpeg"),
    ("mpeg", "video/mpeg"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("3gp", "video/3gpp"),
    ("ts", "video/mp2t"),
    ("mts", "video/mp2t"),
    ("m2ts", "video/mp2t"),
    ("ogv", "video/ogg"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/x-wav"),
    ("aac", "audio/aac"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tiff", "image/tiff"),
    ("pdf", "application/pdf"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("zip", "application/zip"),
];

/// Guess a MIME type from the file extension. Returns None when the
/// extension is missing or not in the table.
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str())?.to_lowercase();
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Whether a file's content is treated as video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Video,
    NonVideo,
}

impl Classification {
    /// Video iff a MIME type was guessed and it contains "video".
    /// An undetermined MIME is NonVideo: unrecognized files are routed to
    /// the reject path alongside confirmed non-video files, never retried
    /// or flagged separately.
    pub fn from_mime(mime: Option<&str>) -> Self {
        match mime {
            Some(m) if m.contains("video") => Classification::Video,
            _ => Classification::NonVideo,
        }
    }
}
