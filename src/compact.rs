//! Single-line compaction of file content.
//!
//! Each non-blank line is trimmed and joined with a single space. Indented
//! lines get a depth marker of `1 + width / 4` extra spaces, where the width
//! counts a leading space as 1 and a leading tab as 4. Exact indentation is
//! not recoverable, only its rough depth.
//!
//! Compaction works on bytes: only the first 512 bytes of a file are known to
//! be UTF-8, and anything invalid past that is passed through unchanged.

const TAB_WIDTH: usize = 4;

#[derive(Default)]
struct CompactionState {
    out: Vec<u8>,
    emitted: bool,
}

impl CompactionState {
    fn push_line(&mut self, line: &[u8]) {
        let trimmed = trim_line(line);
        if trimmed.is_empty() {
            return;
        }
        if self.emitted {
            self.out.push(b' ');
        }
        let width = indent_width(line);
        if width > 0 {
            self.out.extend(std::iter::repeat_n(b' ', 1 + width / TAB_WIDTH));
        }
        self.out.extend_from_slice(trimmed);
        self.emitted = true;
    }
}

fn indent_width(line: &[u8]) -> usize {
    line.iter()
        .map_while(|b| match b {
            b' ' => Some(1),
            b'\t' => Some(TAB_WIDTH),
            _ => None,
        })
        .sum()
}

/// Unicode whitespace trim for valid lines, ASCII trim otherwise.
fn trim_line(line: &[u8]) -> &[u8] {
    match std::str::from_utf8(line) {
        Ok(text) => text.trim().as_bytes(),
        Err(_) => line.trim_ascii(),
    }
}

/// Collapses `\r\n` and lone `\r` into `\n`.
fn normalize_newlines(content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len());
    let mut bytes = content.iter().peekable();
    while let Some(&b) = bytes.next() {
        if b == b'\r' {
            bytes.next_if_eq(&&b'\n');
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }
    out
}

/// Compacts raw file content into one line without line terminators.
pub fn compact_bytes(content: &[u8]) -> Vec<u8> {
    let normalized = normalize_newlines(content);
    let mut state = CompactionState {
        out: Vec::with_capacity(normalized.len()),
        ..Default::default()
    };
    for line in normalized.split(|b| *b == b'\n') {
        state.push_line(line);
    }
    state.out
}

/// Compacts `content` into one line without line terminators.
pub fn compact(content: &str) -> String {
    // Lines are cut only at ASCII bytes, so valid input stays valid.
    String::from_utf8_lossy(&compact_bytes(content.as_bytes())).into_owned()
}
