/// Accumulates raw byte chunks and yields complete `\n`-terminated lines.
///
/// Partial trailing data is carried in the internal buffer across chunk
/// boundaries, so the emitted line sequence is the same no matter how the
/// input was chunked. A trailing `\r` is stripped so CRLF files split
/// identically to LF files.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and drain every complete line it finishes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            lines.push(to_line(&self.buffer[start..end]));
            start = end + 1;
        }
        self.buffer.drain(..start);

        lines
    }

    /// Unterminated trailing content at end of stream, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let tail = to_line(&std::mem::take(&mut self.buffer));
        if tail.is_empty() {
            None
        } else {
            Some(tail)
        }
    }
}

fn to_line(bytes: &[u8]) -> String {
    let bytes = match bytes.last() {
        Some(b'\r') => &bytes[..bytes.len() - 1],
        _ => bytes,
    };
    String::from_utf8_lossy(bytes).into_owned()
}
