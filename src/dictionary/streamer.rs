use std::fs::File;
use std::io::{ErrorKind, Read};
use std::mem;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{CrackError, Result};

/// Entries produced by line-splitting one block, in file order.
pub type PasswordList = Vec<Vec<u8>>;

/// What happens to a line that straddles two block reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBoundary {
    /// Hold the unterminated tail of a block back and prefix it to the next
    /// one, so every line reaches the workers intact. A partial line that
    /// outgrows the block size is flushed as an entry of its own, which
    /// keeps the carry buffer below two blocks.
    #[default]
    Carry,
    /// Split every block on its own. A straddling line turns into two
    /// truncated entries, one per block.
    Split,
}

/// Reads a candidate list in fixed-size blocks, strictly in file order.
///
/// The block buffer is allocated once. In [`LineBoundary::Carry`] mode the
/// only other buffer is the pending partial line, never larger than two
/// blocks.
pub struct DictionaryStreamer<R> {
    reader: R,
    buffer: Vec<u8>,
    pending: Vec<u8>,
    boundary: LineBoundary,
    blocks_read: usize,
    finished: bool,
}

impl DictionaryStreamer<File> {
    pub fn open(path: &Path, block_size: usize, boundary: LineBoundary) -> Result<Self> {
        let file = File::open(path).map_err(|source| CrackError::DictionaryOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file, block_size, boundary))
    }
}

impl<R: Read> DictionaryStreamer<R> {
    pub fn new(reader: R, block_size: usize, boundary: LineBoundary) -> Self {
        Self {
            reader,
            buffer: vec![0; block_size.max(1)],
            pending: Vec::new(),
            boundary,
            blocks_read: 0,
            finished: false,
        }
    }

    pub fn block_size(&self) -> usize {
        self.buffer.len()
    }

    /// Blocks read from the underlying reader so far.
    pub fn blocks_read(&self) -> usize {
        self.blocks_read
    }

    /// Read forward until a block yields at least one entry.
    ///
    /// Returns `Ok(None)` once the reader is exhausted. Any read error other
    /// than end-of-file ends the stream and is returned.
    pub fn next_block(&mut self) -> Result<Option<PasswordList>> {
        while !self.finished {
            let filled = match self.fill() {
                Ok(filled) => filled,
                Err(err) => {
                    self.finished = true;
                    return Err(err);
                }
            };

            if filled == 0 {
                self.finished = true;
                let tail = mem::take(&mut self.pending);
                if tail.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(split_lines(&tail)));
            }

            self.blocks_read += 1;
            trace!(block = self.blocks_read, bytes = filled, "read dictionary block");

            let entries = match self.boundary {
                LineBoundary::Split => split_lines(&self.buffer[..filled]),
                LineBoundary::Carry => {
                    self.pending.extend_from_slice(&self.buffer[..filled]);
                    match self.pending.iter().rposition(|&b| b == b'\n') {
                        Some(last_newline) => {
                            let rest = self.pending.split_off(last_newline + 1);
                            let complete = mem::replace(&mut self.pending, rest);
                            split_lines(&complete)
                        }
                        // Bound the carry: a line longer than a block is cut
                        None if self.pending.len() > self.buffer.len() => {
                            warn!(
                                block = self.blocks_read,
                                bytes = self.pending.len(),
                                "line exceeds block size, splitting it"
                            );
                            split_lines(&mem::take(&mut self.pending))
                        }
                        None => Vec::new(),
                    }
                }
            };

            if !entries.is_empty() {
                return Ok(Some(entries));
            }
        }

        Ok(None)
    }

    /// Fill the block buffer as far as the reader allows.
    fn fill(&mut self) -> Result<usize> {
        let mut filled = 0;
        while filled < self.buffer.len() {
            match self.reader.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(CrackError::DictionaryRead {
                        block: self.blocks_read + 1,
                        source,
                    });
                }
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for DictionaryStreamer<R> {
    type Item = Result<PasswordList>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}

/// Split raw bytes into entries on `\n`, dropping one trailing `\r` per line.
///
/// A final newline does not start an extra empty entry; blank lines in the
/// middle are kept as empty entries.
pub fn split_lines(data: &[u8]) -> PasswordList {
    if data.is_empty() {
        return Vec::new();
    }
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    body.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn lines(items: &[&str]) -> PasswordList {
        items.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    fn drain<R: Read>(streamer: DictionaryStreamer<R>) -> Vec<PasswordList> {
        streamer.map(|block| block.unwrap()).collect()
    }

    /// Reader that hands out at most `chunk` bytes per call
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines(b"a\nb\n"), lines(&["a", "b"]));
        assert_eq!(split_lines(b"a\r\nb"), lines(&["a", "b"]));
        assert_eq!(split_lines(b"a\n\nb"), lines(&["a", "", "b"]));
        assert_eq!(split_lines(b"\n"), lines(&[""]));
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn test_whole_file_in_one_block() {
        let data = b"apple\nswordfish\nzebra\n";
        let streamer = DictionaryStreamer::new(Cursor::new(data), 1024, LineBoundary::Carry);
        assert_eq!(drain(streamer), vec![lines(&["apple", "swordfish", "zebra"])]);
    }

    #[test]
    fn test_carry_reassembles_straddling_line() {
        // block size 8 cuts "swordfish" across two reads
        let data = b"apple\nswordfish\nzebra";
        let streamer = DictionaryStreamer::new(Cursor::new(data), 8, LineBoundary::Carry);
        let all: PasswordList = drain(streamer).into_iter().flatten().collect();
        assert_eq!(all, lines(&["apple", "swordfish", "zebra"]));
    }

    #[test]
    fn test_split_truncates_straddling_line() {
        let data = b"apple\nswordfish\nzebra";
        let streamer = DictionaryStreamer::new(Cursor::new(data), 8, LineBoundary::Split);
        let blocks = drain(streamer);
        assert_eq!(
            blocks,
            vec![
                lines(&["apple", "sw"]),
                lines(&["ordfish"]),
                lines(&["zebra"]),
            ]
        );
    }

    #[test]
    fn test_carry_cuts_lines_longer_than_a_block() {
        let data = b"ab\nverylongpassword\ncd\n";
        let streamer = DictionaryStreamer::new(Cursor::new(data), 4, LineBoundary::Carry);
        let all: PasswordList = drain(streamer).into_iter().flatten().collect();
        assert_eq!(all, lines(&["ab", "veryl", "ongpassw", "ord", "cd"]));
    }

    #[test]
    fn test_carry_line_exactly_one_block_stays_whole() {
        let streamer = DictionaryStreamer::new(Cursor::new(b"abcd\nef\n"), 4, LineBoundary::Carry);
        let all: PasswordList = drain(streamer).into_iter().flatten().collect();
        assert_eq!(all, lines(&["abcd", "ef"]));
    }

    #[test]
    fn test_file_without_newlines_stays_bounded() {
        let data = vec![b'x'; 1000];
        let mut streamer = DictionaryStreamer::new(Cursor::new(data), 16, LineBoundary::Carry);

        let mut total = 0;
        while let Some(block) = streamer.next_block().unwrap() {
            for entry in &block {
                assert!(entry.len() <= 32, "entry of {} bytes", entry.len());
                total += entry.len();
            }
            assert!(streamer.pending.len() <= 16);
        }
        assert_eq!(total, 1000);
    }

    #[test]
    fn test_blocks_keep_file_order() {
        let data: Vec<u8> = (0..100).flat_map(|i| format!("pw{i}\n").into_bytes()).collect();
        let streamer = DictionaryStreamer::new(Cursor::new(&data), 32, LineBoundary::Carry);
        let blocks = drain(streamer);
        assert!(blocks.len() > 1);

        let all: Vec<String> = blocks
            .into_iter()
            .flatten()
            .map(|entry| String::from_utf8(entry).unwrap())
            .collect();
        let expected: Vec<String> = (0..100).map(|i| format!("pw{i}")).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_short_reads_still_fill_blocks() {
        let data = b"one\ntwo\nthree\nfour\n";
        let reader = Trickle { data, chunk: 3 };
        let mut streamer = DictionaryStreamer::new(reader, 64, LineBoundary::Split);
        assert_eq!(
            streamer.next_block().unwrap(),
            Some(lines(&["one", "two", "three", "four"]))
        );
        assert_eq!(streamer.blocks_read(), 1);
        assert_eq!(streamer.next_block().unwrap(), None);
    }

    #[test]
    fn test_empty_file() {
        let streamer = DictionaryStreamer::new(Cursor::new(b""), 16, LineBoundary::Carry);
        assert!(drain(streamer).is_empty());
    }

    #[test]
    fn test_read_error_is_fatal() {
        let mut streamer = DictionaryStreamer::new(Broken, 16, LineBoundary::Carry);
        assert!(matches!(
            streamer.next_block(),
            Err(CrackError::DictionaryRead { block: 1, .. })
        ));
        assert!(streamer.next_block().unwrap().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = DictionaryStreamer::open(
            &dir.path().join("missing.txt"),
            16,
            LineBoundary::Carry,
        );
        assert!(matches!(result, Err(CrackError::DictionaryOpen { .. })));
    }
}
