use crate::report::model::Report;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("input is neither valid UTF-8 nor UTF-16LE")]
    Decode,

    #[error("recovered text is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Recover a report from possibly-garbled raw bytes.
///
/// Playwright runs on Windows agents occasionally leave the results file
/// UTF-16LE encoded, with a BOM, or with stray log output prepended to the
/// JSON payload. Each candidate decoding is tried in turn until one yields
/// parseable JSON; the parse error of the last candidate is reported when
/// none does.
pub fn load_tolerant(bytes: &[u8]) -> Result<Report, LoadError> {
    let mut parse_failure = None;

    for text in decode_candidates(bytes) {
        match serde_json::from_str(recover_json(&text)) {
            Ok(report) => return Ok(report),
            Err(e) => parse_failure = Some(LoadError::Parse(e)),
        }
    }

    Err(parse_failure.unwrap_or(LoadError::Decode))
}

/// Decodings to attempt, most plausible first.
///
/// An FF FE BOM or embedded NUL bytes usually mean a UTF-16LE file whose
/// UTF-8 read would "succeed" with interleaved NULs, so the ordering flips;
/// the other decoding stays available as a recovery path either way (a NUL
/// in a stray log prefix must not doom an otherwise valid UTF-8 report).
fn decode_candidates(bytes: &[u8]) -> Vec<String> {
    let utf8 = std::str::from_utf8(bytes).ok().map(str::to_owned);
    let utf16 = decode_utf16le(bytes);

    let utf16_likely = bytes.starts_with(&[0xFF, 0xFE]) || bytes.contains(&0);
    let ordered = if utf16_likely {
        [utf16, utf8]
    } else {
        [utf8, utf16]
    };

    ordered.into_iter().flatten().collect()
}

fn decode_utf16le(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }

    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

/// Strip leading BOM/zero-width artifacts, then discard anything before the
/// first `{`. Text with no `{` at all is returned as-is and left for the
/// JSON parser to reject.
fn recover_json(text: &str) -> &str {
    let trimmed =
        text.trim_start_matches(['\u{FEFF}', '\u{200B}', '\u{200C}', '\u{200D}']);

    match trimmed.find('{') {
        Some(start) => &trimmed[start..],
        None => trimmed,
    }
}
