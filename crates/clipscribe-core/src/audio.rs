//! Audio content-type and filename helpers

use std::path::Path;

const AUDIO_PREFIX: &str = "audio/";

/// Whether a declared content type is an audio type
pub fn is_audio(content_type: &str) -> bool {
    content_type.starts_with(AUDIO_PREFIX)
}

/// Content type for a stored recording, inferred from its extension
///
/// Falls back to `audio/wav`, the format the recorder produces.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("webm") => "audio/webm",
        Some("ogg" | "oga") => "audio/ogg",
        Some("m4a" | "mp4") => "audio/mp4",
        Some("flac") => "audio/flac",
        _ => "audio/wav",
    }
}

/// File suffix (including the dot) to use for a temp copy of `filename`
pub fn suffix_for(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map_or_else(|| ".wav".to_owned(), |e| format!(".{e}"))
}

/// Whether `name` is a plain file name that cannot escape its directory
pub fn is_bare_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Replace the extension of `filename` with `replacement`
///
/// `clip.wav` with `_transcript.txt` becomes `clip_transcript.txt`. A name
/// without extension gets `replacement` appended.
pub fn replace_extension(filename: &str, replacement: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    };

    format!("{stem}{replacement}")
}
