/*!
 * Line Grammars
 * Regex grammars for benchmark event lines and core occupancy lines
 */

use super::types::{Event, EventKind, OccupancyEvent, TaskId, Tick};
use crate::errors::{ParseError, ParseResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Benchmark lifecycle line: `<ms> ms | <KIND> task<id>`
pub const REPORT_PATTERN: &str = r"^(\d+) ms \| (\w+) task(\d+)$";

/// Worker task name prefix used by the benchmark firmware
pub const DEFAULT_WORKER_PREFIX: &str = "BWorker";

/// Field separator of every trace line the firmware prints
pub const TRACE_SEPARATOR: char = '|';

fn report_regex() -> &'static Regex {
    static REPORT: OnceLock<Regex> = OnceLock::new();
    REPORT.get_or_init(|| Regex::new(REPORT_PATTERN).expect("report pattern is a valid regex"))
}

/// Outcome of matching one report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine<'a> {
    Event(Event),
    /// Grammar matched, keyword is not START/END/ARRIVE
    UnknownKeyword(&'a str),
    NoMatch,
}

/// Match a line against [`REPORT_PATTERN`]
///
/// Numbers that do not fit the tick or task id types count as no match.
pub fn parse_report_line(line: &str) -> ReportLine<'_> {
    let Some(caps) = report_regex().captures(line) else {
        return ReportLine::NoMatch;
    };

    let (Ok(time), Ok(task)) = (caps[1].parse::<Tick>(), caps[3].parse::<TaskId>()) else {
        return ReportLine::NoMatch;
    };

    let keyword = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    match EventKind::from_keyword(keyword) {
        Some(kind) => ReportLine::Event(Event { kind, task, time }),
        None => ReportLine::UnknownKeyword(keyword),
    }
}

/// Occupancy grammar family, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarKind {
    /// `Core<n> <tick> | <prefix><task>`
    CoreFirst,
    /// `<tick> | Core<n>: <prefix><task>`
    TickFirst,
    /// User regex with `tick` and `task` groups
    Custom,
}

impl GrammarKind {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "core_first" | "core" => Ok(Self::CoreFirst),
            "tick_first" | "tick" => Ok(Self::TickFirst),
            "custom" | "regex" => Ok(Self::Custom),
            _ => Err(format!(
                "Invalid grammar '{}'. Valid: core_first, tick_first, custom",
                s
            )),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CoreFirst => "core_first",
            Self::TickFirst => "tick_first",
            Self::Custom => "custom",
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_WORKER_PREFIX.to_string()
}

/// Serializable description of an occupancy line grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrammarSpec {
    CoreFirst {
        #[serde(default)]
        core: u32,
        #[serde(default = "default_prefix")]
        prefix: String,
    },
    TickFirst {
        #[serde(default)]
        core: u32,
        #[serde(default = "default_prefix")]
        prefix: String,
    },
    Custom {
        pattern: String,
    },
}

impl Default for GrammarSpec {
    fn default() -> Self {
        Self::TickFirst {
            core: 0,
            prefix: default_prefix(),
        }
    }
}

impl GrammarSpec {
    /// Assemble a spec from command line pieces
    pub fn from_parts(
        kind: GrammarKind,
        core: u32,
        prefix: &str,
        pattern: Option<&str>,
    ) -> ParseResult<Self> {
        match kind {
            GrammarKind::CoreFirst => Ok(Self::CoreFirst {
                core,
                prefix: prefix.to_string(),
            }),
            GrammarKind::TickFirst => Ok(Self::TickFirst {
                core,
                prefix: prefix.to_string(),
            }),
            GrammarKind::Custom => match pattern {
                Some(pattern) => Ok(Self::Custom {
                    pattern: pattern.to_string(),
                }),
                None => Err(ParseError::InvalidPattern {
                    pattern: String::new(),
                    reason: "custom grammar requires a pattern".to_string(),
                }),
            },
        }
    }

    /// Replace the given fields and keep the rest of `self`
    ///
    /// A pattern without an explicit kind selects the custom grammar.
    pub fn layered(
        &self,
        kind: Option<GrammarKind>,
        core: Option<u32>,
        prefix: Option<&str>,
        pattern: Option<&str>,
    ) -> ParseResult<Self> {
        let (base_core, base_prefix, base_pattern) = match self {
            Self::CoreFirst { core, prefix } | Self::TickFirst { core, prefix } => {
                (*core, prefix.as_str(), None)
            }
            Self::Custom { pattern } => (0, DEFAULT_WORKER_PREFIX, Some(pattern.as_str())),
        };

        let kind = kind.unwrap_or(if pattern.is_some() {
            GrammarKind::Custom
        } else {
            self.kind()
        });
        Self::from_parts(
            kind,
            core.unwrap_or(base_core),
            prefix.unwrap_or(base_prefix),
            pattern.or(base_pattern),
        )
    }

    pub fn kind(&self) -> GrammarKind {
        match self {
            Self::CoreFirst { .. } => GrammarKind::CoreFirst,
            Self::TickFirst { .. } => GrammarKind::TickFirst,
            Self::Custom { .. } => GrammarKind::Custom,
        }
    }

    /// Regex source for this grammar
    pub fn pattern(&self) -> String {
        match self {
            Self::CoreFirst { core, prefix } => format!(
                r"^Core{core} (?P<tick>\d+) \| {}(?P<task>\d+)$",
                regex::escape(prefix)
            ),
            Self::TickFirst { core, prefix } => format!(
                r"^(?P<tick>\d+) \| Core{core}: {}(?P<task>\d+)$",
                regex::escape(prefix)
            ),
            Self::Custom { pattern } => pattern.clone(),
        }
    }
}

/// Compiled occupancy grammar
#[derive(Debug, Clone)]
pub struct OccupancyGrammar {
    regex: Regex,
}

impl OccupancyGrammar {
    pub fn compile(spec: &GrammarSpec) -> ParseResult<Self> {
        let pattern = spec.pattern();
        let regex = Regex::new(&pattern).map_err(|e| ParseError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        for group in ["tick", "task"] {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(ParseError::InvalidPattern {
                    pattern,
                    reason: format!("missing named group `{}`", group),
                });
            }
        }

        Ok(Self { regex })
    }

    /// Extract `(task, tick)` from a matching line
    pub fn parse_line(&self, line: &str) -> Option<OccupancyEvent> {
        let caps = self.regex.captures(line)?;
        let tick = caps.name("tick")?.as_str().parse::<Tick>().ok()?;
        let task = caps.name("task")?.as_str().parse::<TaskId>().ok()?;
        Some(OccupancyEvent { task, tick })
    }

    /// Whether strict mode expects this line to match
    #[inline]
    pub fn in_scope(line: &str) -> bool {
        line.contains(TRACE_SEPARATOR)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
