use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// An immutable, in-memory snapshot of a log file.
///
/// The whole log is read once up front; every scan afterwards borrows line slices from this
/// buffer, so no part of the file is ever re-read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSource {
    text: String,
}

impl LogSource {
    /// Wraps already-loaded log text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Reads an entire stream into memory.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`; only the affected lines are lost.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the stream cannot be read.
    pub fn from_reader(reader: &mut impl Read) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("Log contains invalid UTF-8; affected lines will be treated as malformed.");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        debug!(bytes = text.len(), "Log source loaded into memory.");
        Ok(Self { text })
    }

    /// Opens and reads the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while opening or reading the file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::from_reader(&mut reader)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Iterates the log line by line, without line terminators (`\n` or `\r\n`).
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }

    /// Iterates the log line by line, keeping each line's terminator.
    pub fn raw_lines(&self) -> std::str::SplitInclusive<'_, char> {
        self.text.split_inclusive('\n')
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_text_splits_lines_without_terminators() {
        let source = LogSource::from_text("first\r\nsecond\nthird");
        let lines: Vec<_> = source.lines().collect();
        assert_eq!(lines, vec!["first", "second", "third"]);
        assert_eq!(source.line_count(), 3);
    }

    #[test]
    fn raw_lines_cover_every_byte() {
        let source = LogSource::from_text("first\r\nsecond\nthird");
        let raw: Vec<_> = source.raw_lines().collect();
        assert_eq!(raw, vec!["first\r\n", "second\n", "third"]);
        assert_eq!(raw.iter().map(|l| l.len()).sum::<usize>(), source.as_str().len());
    }

    #[test]
    fn from_path_reads_whole_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, " magnetization (x)").unwrap();
        writeln!(file, "    1   0.0   0.0   0.1   0.1").unwrap();

        let source = LogSource::from_path(file.path()).unwrap();
        assert_eq!(source.line_count(), 2);
        assert!(source.as_str().contains("magnetization (x)"));
    }

    #[test]
    fn from_path_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LogSource::from_path(dir.path().join("OUTCAR"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let bytes: &[u8] = b"ok line\n\xff\xfe broken\nlast";
        let source = LogSource::from_reader(&mut &bytes[..]).unwrap();
        let lines: Vec<_> = source.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ok line");
        assert_eq!(lines[2], "last");
    }

    #[test]
    fn empty_reader_yields_empty_source() {
        let source = LogSource::from_reader(&mut io::empty()).unwrap();
        assert!(source.is_empty());
        assert_eq!(source.line_count(), 0);
    }
}
