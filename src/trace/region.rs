/*!
 * Output Region Scanner
 * Tracks the OUTPUT START / OUTPUT END window of a benchmark log
 */

/// Substring that opens an output region (`---OUTPUT START---` in the firmware)
pub const OUTPUT_START: &str = "OUTPUT START";

/// Substring that closes an output region
pub const OUTPUT_END: &str = "OUTPUT END";

/// Where a line sits relative to the output region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionLine {
    /// A start or end marker. Never an event.
    Marker,
    Inside,
    Outside,
}

/// Region state for a single file
///
/// Starts closed. A fresh scanner must be used per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionScanner {
    open: bool,
}

impl RegionScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `line` and advance the region state
    ///
    /// The start marker wins when a line carries both markers.
    pub fn classify(&mut self, line: &str) -> RegionLine {
        if line.contains(OUTPUT_START) {
            self.open = true;
            RegionLine::Marker
        } else if line.contains(OUTPUT_END) {
            self.open = false;
            RegionLine::Marker
        } else if self.open {
            RegionLine::Inside
        } else {
            RegionLine::Outside
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }
}
