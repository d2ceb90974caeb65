//! Sparse offset-to-line index
//!
//! One entry per run of instructions that share a source line, recording the
//! offset of the run's first byte. Offsets are strictly increasing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStart {
    pub offset: usize,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<LineStart>,
}

impl LineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that the byte at `offset` belongs to `line`. Only the first byte
    /// of a new line adds an entry; offsets must arrive in increasing order.
    pub fn record(&mut self, offset: usize, line: usize) {
        match self.starts.last() {
            Some(last) if last.line == line => {}
            _ => {
                debug_assert!(self.starts.last().map_or(true, |last| last.offset < offset));
                self.starts.push(LineStart { offset, line });
            }
        }
    }

    /// Line of the byte at `offset`: the entry with the greatest start
    /// offset not past it. None for an empty index.
    pub fn line_for(&self, offset: usize) -> Option<usize> {
        let idx = self.starts.partition_point(|start| start.offset <= offset);
        idx.checked_sub(1).map(|i| self.starts[i].line)
    }

    pub fn entries(&self) -> &[LineStart] {
        &self.starts
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}
