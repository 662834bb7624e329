//! Playback scripts
//!
//! A script is a scenario's expected output split on `\n`. The cursor walks
//! it one line at a time and computes the progress shown after each line.

use lab_catalog::round_percent;

/// Expected output split into playback lines
///
/// Always holds at least one line: an empty string plays back as one empty
/// line, matching `str::split` semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackScript {
    lines: Vec<String>,
}

impl PlaybackScript {
    /// Split an expected-output string into lines
    #[must_use]
    pub fn new(expected_output: &str) -> Self {
        Self {
            lines: expected_output.split('\n').map(str::to_owned).collect(),
        }
    }

    /// Lines in playback order
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines (never zero)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cursor positioned before the first line
    #[inline]
    #[must_use]
    pub fn into_cursor(self) -> PlaybackCursor {
        let total = self.lines.len();
        PlaybackCursor {
            lines: self.lines.into_iter(),
            index: 0,
            total,
        }
    }
}

/// One revealed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackFrame {
    /// 0-based line index
    pub index: usize,
    /// Total lines in the script
    pub total: usize,
    /// Revealed line, without the trailing newline
    pub line: String,
    /// Progress after this line, in whole percent
    pub progress: u8,
}

impl PlaybackFrame {
    /// Whether this is the final line of the script
    #[inline]
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Iterator over the frames of a script
#[derive(Debug)]
pub struct PlaybackCursor {
    lines: std::vec::IntoIter<String>,
    index: usize,
    total: usize,
}

impl Iterator for PlaybackCursor {
    type Item = PlaybackFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let index = self.index;
        self.index += 1;
        Some(PlaybackFrame {
            index,
            total: self.total,
            line,
            progress: progress_percent(index, self.total),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

impl ExactSizeIterator for PlaybackCursor {}

/// Progress after revealing line `index` of `total`: `round((index+1)/total*100)`
#[inline]
#[must_use]
pub fn progress_percent(index: usize, total: usize) -> u8 {
    round_percent(index + 1, total)
}
