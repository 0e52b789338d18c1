// Copyright 2025 Semgraph Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Log-file parsing: lines into vertices plus tag/id occurrence maps.
//!
//! Recognized line shape:
//!
//! ```text
//! 2012-09-01 00:00:20,305 INFO  [MyThread9] c.g.o.a.FooBarBaz : message
//! ```
//!
//! Lines that do not match are skipped. The tag and id maps are keyed by
//! token and hold line indices in occurrence order, deduplicated per line so
//! a word repeated within one line counts once.

use crate::error::Result;
use crate::tokens::{tokenize, TokenKind};
use crate::vertex::LogLineVertex;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Output of [`parse_log`]: the ordered line vertices plus token occurrence
/// maps. Map values index into `lines`.
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    pub lines: Vec<LogLineVertex>,
    pub tag_map: BTreeMap<String, Vec<usize>>,
    pub id_map: BTreeMap<String, Vec<usize>>,
}

static LOG_LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2}):(\d{2}),(\d{3})\s+(\w+)\s+\[(\w+)\](.+)$",
    )
    .unwrap()
});

/// Parse one line into (timestamp, thread id, message). Returns `None` for
/// lines that do not conform.
pub fn parse_log_line(line: &str) -> Option<(NaiveDateTime, String, String)> {
    let caps = LOG_LINE_PATTERN.captures(line)?;
    let field = |i: usize| caps.get(i).unwrap().as_str();
    let num = |i: usize| field(i).parse::<u32>().unwrap();

    let time = NaiveDate::from_ymd_opt(field(1).parse::<i32>().unwrap(), num(2), num(3))?
        .and_hms_milli_opt(num(4), num(5), num(6), num(7))?;
    Some((time, field(9).to_string(), field(10).to_string()))
}

/// Parse an iterator of lines (without trailing newlines, or with — they are
/// stripped) into [`ParsedLog`].
pub fn parse_log<I, S>(lines: I) -> ParsedLog
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedLog::default();
    let mut skipped = 0usize;

    for raw in lines {
        let line = raw.as_ref().trim_end_matches(['\n', '\r']);
        let Some((time, thread_id, message)) = parse_log_line(line) else {
            skipped += 1;
            continue;
        };
        let index = parsed.lines.len();
        let tokens = tokenize(&message);
        parsed.lines.push(LogLineVertex {
            line: line.to_string(),
            message,
            line_number: index,
            thread_id,
            time,
        });

        for (token, kind) in tokens {
            let map = match kind {
                TokenKind::Tag => &mut parsed.tag_map,
                TokenKind::Id => &mut parsed.id_map,
            };
            let entry = map.entry(token).or_default();
            // dedup within one line; entries are pushed in line order
            if entry.last() != Some(&index) {
                entry.push(index);
            }
        }
    }

    debug!(
        lines = parsed.lines.len(),
        tags = parsed.tag_map.len(),
        ids = parsed.id_map.len(),
        skipped,
        "parsed log"
    );
    parsed
}

/// Parse a log file from disk.
pub fn parse_log_file(path: impl AsRef<Path>) -> Result<ParsedLog> {
    let file = File::open(path)?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()?;
    Ok(parse_log(lines))
}
