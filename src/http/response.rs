use crate::error::HttpError;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const CHUNKED_TERMINATOR: &[u8] = b"0\r\n\r\n";

/// What a single bounded read revealed about the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    /// The whole response fit in the read and the server did not ask to close,
    /// so the connection can carry the next request.
    pub reusable: bool,
}

/// Parses the status line (`HTTP/1.1 <code> ...`) from the bytes of a single
/// read and decides whether the connection is still usable.
///
/// # Errors
///
/// Returns [`HttpError::MalformedStatusLine`] when the first line is not an
/// HTTP status line.
pub fn parse_response_head(buf: &[u8]) -> Result<ResponseHead, HttpError> {
    let (version, status) = parse_status_line(buf)?;

    let Some(head_end) = find(buf, HEADER_TERMINATOR) else {
        return Ok(ResponseHead {
            status,
            reusable: false,
        });
    };
    let head = buf.get(..head_end).unwrap_or_default();
    let body_start = head_end.saturating_add(HEADER_TERMINATOR.len());
    let body_len = buf.len().saturating_sub(body_start);

    let mut keep_alive = version != b"HTTP/1.0";
    let mut content_length: Option<usize> = None;
    let mut chunked = false;
    for line in head.split(|byte| *byte == b'\n').skip(1) {
        let line = trim_ascii(line);
        let Some(colon) = line.iter().position(|byte| *byte == b':') else {
            continue;
        };
        let name = line.get(..colon).unwrap_or_default();
        let value = trim_ascii(line.get(colon.saturating_add(1)..).unwrap_or_default());
        if name.eq_ignore_ascii_case(b"connection") {
            if contains_ignore_case(value, b"close") {
                keep_alive = false;
            } else if contains_ignore_case(value, b"keep-alive") {
                keep_alive = true;
            }
        } else if name.eq_ignore_ascii_case(b"content-length") {
            content_length = std::str::from_utf8(value)
                .ok()
                .and_then(|text| text.parse().ok());
        } else if name.eq_ignore_ascii_case(b"transfer-encoding") {
            chunked = contains_ignore_case(value, b"chunked");
        }
    }

    let complete = if (100..200).contains(&status) || status == 204 || status == 304 {
        body_len == 0
    } else if chunked {
        buf.ends_with(CHUNKED_TERMINATOR)
    } else {
        content_length.is_some_and(|expected| expected == body_len)
    };

    Ok(ResponseHead {
        status,
        reusable: keep_alive && complete,
    })
}

/// Extracts the status code from the first line of `buf`.
///
/// # Errors
///
/// Returns [`HttpError::MalformedStatusLine`] when no valid code is present.
pub fn parse_status_code(buf: &[u8]) -> Result<u16, HttpError> {
    parse_status_line(buf).map(|(_, status)| status)
}

fn parse_status_line(buf: &[u8]) -> Result<(&[u8], u16), HttpError> {
    let line_end = buf
        .iter()
        .position(|byte| *byte == b'\n')
        .unwrap_or(buf.len());
    let line = trim_ascii(buf.get(..line_end).unwrap_or_default());
    let mut parts = line.split(|byte| *byte == b' ').filter(|part| !part.is_empty());

    let version = parts.next().ok_or(HttpError::MalformedStatusLine)?;
    if !version.starts_with(b"HTTP/") {
        return Err(HttpError::MalformedStatusLine);
    }
    let code = parts.next().ok_or(HttpError::MalformedStatusLine)?;
    if code.len() != 3 || !code.iter().all(u8::is_ascii_digit) {
        return Err(HttpError::MalformedStatusLine);
    }
    let status = code.iter().fold(0u16, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(u16::from(digit.saturating_sub(b'0')))
    });
    Ok((version, status))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn contains_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(start, |idx| idx.saturating_add(1));
    bytes.get(start..end).unwrap_or_default()
}
