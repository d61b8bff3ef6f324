use std::iter::{Fuse, FusedIterator};

/// Upper bound on the capacity reserved up front for a single window.
const MAX_PREALLOCATED_WINDOW: usize = 4096;

/// The scanner's position in the marker / header / data cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for the next line that contains the marker.
    Scanning,
    /// A marker was seen; `remaining` header lines still have to be discarded.
    SkippingHeader { remaining: usize },
    /// The next lines belong to the block body.
    CollectingRecord,
}

/// A contiguous run of lines believed to hold one block's per-entity data.
///
/// A window is at most `block_len` lines long. It is shorter only when the source ended first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockWindow<'a> {
    /// 1-based line number of the marker line that opened this block.
    pub marker_line: usize,
    /// 1-based line number of the first line in `lines`.
    pub first_line: usize,
    pub lines: Vec<&'a str>,
}

impl BlockWindow<'_> {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Result of a single state-machine transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a> {
    /// The scanner moved (or consumed a line) without completing a window.
    Continue,
    /// A block window was completed.
    Emit(BlockWindow<'a>),
    /// The source has no more lines.
    Exhausted,
}

/// Forward-only, single-cursor scanner that yields one [`BlockWindow`] per marker occurrence.
///
/// Lines inside a window are never re-examined for markers: after a window is emitted the
/// search resumes on the line that follows it.
#[derive(Debug)]
pub struct BlockScanner<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    lines: Fuse<I>,
    marker: &'a str,
    header_skip: usize,
    block_len: usize,
    state: ScanState,
    position: usize,
    consumed_bytes: usize,
    marker_line: usize,
}

impl<'a, I> BlockScanner<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    /// Creates a scanner over `lines`.
    ///
    /// # Arguments
    ///
    /// * `lines` - The log lines, in source order. Trailing `\n` or `\r\n` terminators are
    ///   stripped before matching, so both `str::lines` and `str::split_inclusive('\n')` work.
    ///   Only the latter makes [`BlockScanner::consumed_bytes`] exact.
    /// * `marker` - Case-sensitive substring that announces a block.
    /// * `header_skip` - Number of lines between the marker line and the first data line.
    /// * `block_len` - Number of data lines per block (one per entity).
    pub fn new(lines: I, marker: &'a str, header_skip: usize, block_len: usize) -> Self {
        Self {
            lines: lines.fuse(),
            marker,
            header_skip,
            block_len,
            state: ScanState::Scanning,
            position: 0,
            consumed_bytes: 0,
            marker_line: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Number of lines consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes of the lines consumed so far, terminators included when present.
    pub fn consumed_bytes(&self) -> usize {
        self.consumed_bytes
    }

    /// Performs exactly one state transition.
    pub fn step(&mut self) -> Step<'a> {
        match self.state {
            ScanState::Scanning => match self.advance() {
                Some(line) => {
                    if line.contains(self.marker) {
                        self.marker_line = self.position;
                        self.state = ScanState::SkippingHeader {
                            remaining: self.header_skip,
                        };
                    }
                    Step::Continue
                }
                None => Step::Exhausted,
            },
            ScanState::SkippingHeader { remaining: 0 } => {
                self.state = ScanState::CollectingRecord;
                Step::Continue
            }
            ScanState::SkippingHeader { remaining } => {
                // A source that ends inside the header still closes the block, as an empty window.
                self.state = match self.advance() {
                    Some(_) if remaining > 1 => ScanState::SkippingHeader {
                        remaining: remaining - 1,
                    },
                    _ => ScanState::CollectingRecord,
                };
                Step::Continue
            }
            ScanState::CollectingRecord => {
                let first_line = self.position + 1;
                let mut lines = Vec::with_capacity(self.block_len.min(MAX_PREALLOCATED_WINDOW));
                while lines.len() < self.block_len {
                    match self.advance() {
                        Some(line) => lines.push(line),
                        None => break,
                    }
                }
                self.state = ScanState::Scanning;
                Step::Emit(BlockWindow {
                    marker_line: self.marker_line,
                    first_line,
                    lines,
                })
            }
        }
    }

    fn advance(&mut self) -> Option<&'a str> {
        let raw = self.lines.next()?;
        self.position += 1;
        self.consumed_bytes += raw.len();
        Some(strip_terminator(raw))
    }
}

fn strip_terminator(raw: &str) -> &str {
    match raw.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => raw,
    }
}

impl<'a, I> Iterator for BlockScanner<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    type Item = BlockWindow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step() {
                Step::Continue => continue,
                Step::Emit(window) => return Some(window),
                Step::Exhausted => return None,
            }
        }
    }
}

impl<'a, I> FusedIterator for BlockScanner<'a, I> where I: Iterator<Item = &'a str> {}
