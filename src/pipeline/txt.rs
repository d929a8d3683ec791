//! Plain-text conversion with an encoding-tolerant decode ladder.
//!
//! Text files in the wild are rarely labelled. We try a fixed, ordered list
//! of encodings — UTF-8, then Latin-1, then Windows-1252 — and as a last
//! resort decode as UTF-8 with U+FFFD replacement, so a `.txt` file can
//! never fail conversion outright. Per the WHATWG Encoding Standard the
//! `latin1` and `windows-1252` labels resolve to the same decoder, which is
//! what `encoding_rs` exposes as [`encoding_rs::WINDOWS_1252`].

use crate::report::FileOutcome;
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Decode bytes with the ordered encoding ladder.
///
/// Returns the decoded text and the name of the encoding that won.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return (Cow::Borrowed(s), "UTF-8");
    }
    // latin1 / windows-1252 (one decoder covers both labels). This decoder
    // maps all 256 byte values, so the lossy arm below is a safety net for
    // a decoder refusal, not an expected path.
    let (decoded, _, had_errors) = WINDOWS_1252.decode(bytes);
    if !had_errors {
        return (decoded, "windows-1252");
    }
    (String::from_utf8_lossy(bytes), "UTF-8 (lossy)")
}

/// Convert a `.txt` artifact: a one-line header naming the source file,
/// then the decoded text verbatim.
pub async fn convert(input: &Path, output: &Path) -> FileOutcome {
    let bytes = match tokio::fs::read(input).await {
        Ok(b) => b,
        Err(e) => {
            return FileOutcome::Failed(crate::error::FileError::Io {
                path: input.to_path_buf(),
                detail: format!("read: {e}"),
            })
        }
    };

    let (text, encoding) = decode_text(&bytes);
    debug!("Decoded {} as {}", input.display(), encoding);

    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let doc = format!("# {name}\n\n{text}");

    match super::write_markdown(output, &doc).await {
        Ok(()) => {
            info!("Converted TXT: {}", input.display());
            FileOutcome::Converted {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }
        }
        Err(e) => FileOutcome::Failed(e),
    }
}
