/*!
 * Trace Types
 * Domain types shared by the report and gantt parsers
 */

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Task identifier as printed by the benchmark (`task<id>`, `BWorker<id>`)
pub type TaskId = u32;

/// Timestamp in milliseconds (scheduler ticks at 1 kHz)
pub type Tick = u64;

/// Task lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Arrive,
    Start,
    End,
}

impl EventKind {
    /// Map a trace keyword to an event kind
    ///
    /// Keywords are case-sensitive. Anything unrecognised yields `None`.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "ARRIVE" => Some(Self::Arrive),
            "START" => Some(Self::Start),
            "END" => Some(Self::End),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arrive => "ARRIVE",
            Self::Start => "START",
            Self::End => "END",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed lifecycle record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub task: TaskId,
    pub time: Tick,
}

/// A core switched to `task` at `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyEvent {
    pub task: TaskId,
    pub tick: Tick,
}

impl OccupancyEvent {
    pub const fn new(task: TaskId, tick: Tick) -> Self {
        Self { task, tick }
    }
}

impl From<(TaskId, Tick)> for OccupancyEvent {
    fn from((task, tick): (TaskId, Tick)) -> Self {
        Self { task, tick }
    }
}

/// How parsers treat lines that do not match their grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Skip silently
    #[default]
    Lenient,
    /// Fail on the first in-scope line that does not match
    Strict,
}

impl ParseMode {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "lenient" | "skip" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Invalid parse mode '{}'. Valid: lenient, strict", s)),
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }

    #[inline]
    pub const fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl Serialize for ParseMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParseMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Line counters for one parse pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines that produced an event
    pub matched: usize,
    /// In-scope lines that did not match the grammar
    pub skipped: usize,
    /// Lines that matched the grammar with an unrecognised keyword
    pub unknown_keyword: usize,
}

impl ParseStats {
    pub fn merge(&mut self, other: ParseStats) {
        self.matched += other.matched;
        self.skipped += other.skipped;
        self.unknown_keyword += other.unknown_keyword;
    }

    /// Lines that were in scope but did not produce an event
    #[inline]
    pub const fn ignored(&self) -> usize {
        self.skipped + self.unknown_keyword
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_mapping() {
        assert_eq!(EventKind::from_keyword("START"), Some(EventKind::Start));
        assert_eq!(EventKind::from_keyword("END"), Some(EventKind::End));
        assert_eq!(EventKind::from_keyword("ARRIVE"), Some(EventKind::Arrive));
        assert_eq!(EventKind::from_keyword("start"), None);
        assert_eq!(EventKind::from_keyword("FINISH"), None);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(ParseMode::from_str("strict").unwrap(), ParseMode::Strict);
        assert_eq!(ParseMode::from_str("Lenient").unwrap(), ParseMode::Lenient);
        assert!(ParseMode::from_str("loose").is_err());
        assert_eq!(ParseMode::default(), ParseMode::Lenient);
    }

    #[test]
    fn test_mode_serde() {
        let json = serde_json::to_string(&ParseMode::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
        let mode: ParseMode = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(mode, ParseMode::Lenient);
    }

    #[test]
    fn test_stats_merge() {
        let mut total = ParseStats {
            matched: 3,
            skipped: 1,
            unknown_keyword: 0,
        };
        total.merge(ParseStats {
            matched: 2,
            skipped: 4,
            unknown_keyword: 1,
        });
        assert_eq!(total.matched, 5);
        assert_eq!(total.ignored(), 6);
    }
}
