//! Bounded driver diagnostics.
//!
//! Compile and link logs are read into a buffer of at most [`INFO_LOG_CAPACITY`] bytes. Anything
//! the driver has beyond that is dropped, never written past the end of the buffer.

/// Upper bound, in bytes, on the diagnostic text kept from a single compile or link.
pub const INFO_LOG_CAPACITY: usize = 1024;

/// Size of the buffer to hand the driver so that it can return `INFO_LOG_CAPACITY` bytes of text
/// plus its NUL terminator. `reported_len` is the driver's `INFO_LOG_LENGTH`, which counts the
/// terminator; zero means there is no log.
pub fn buffer_len(reported_len: i32) -> usize {
    if reported_len <= 0 {
        0
    } else {
        (reported_len as usize).min(INFO_LOG_CAPACITY + 1)
    }
}

/// Turns whatever the driver wrote into printable text, keeping at most `INFO_LOG_CAPACITY` bytes
/// of it.
///
/// Truncation happens on the raw bytes, so a multi-byte character cut in half at the bound is
/// dropped. Other invalid UTF-8 is replaced. Trailing NULs and whitespace are stripped.
pub fn to_text(raw: &[u8]) -> String {
    let end = raw.len().min(INFO_LOG_CAPACITY);
    let mut raw = &raw[..end];
    if let Some(nul) = raw.iter().position(|&b| b == 0) {
        raw = &raw[..nul];
    }

    if let Err(e) = std::str::from_utf8(raw) {
        if e.error_len().is_none() {
            raw = &raw[..e.valid_up_to()];
        }
    }

    String::from_utf8_lossy(raw).trim_end().to_string()
}
