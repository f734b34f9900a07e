//! Plain text stream of reconstructed hits.
//!
//! One hit per line:
//!
//! ```text
//! <window id> <event id> <x in mm> <y in mm> <layer id>
//! ```
//!
//! Consecutive lines sharing a window id make up one time window; within it,
//! consecutive lines sharing an event id make up one event. Blank lines and
//! `#` comments are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::hit::{Event, Hit, TimeWindow};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Row {
    window: u64,
    event: u64,
    hit: Hit,
}

pub fn read_file(path: &Path) -> Result<Vec<TimeWindow>> {
    read(BufReader::new(File::open(path)?))
}

pub fn read(input: impl BufRead) -> Result<Vec<TimeWindow>> {
    let rows = input
        .lines()
        .enumerate()
        .map(|(n, line)| parse_row(&line?, n + 1))
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>>>()?;

    Ok(group_by(|r| r.window, rows)
       .into_iter()
       .map(|window| group_by(|r| r.event, window)
            .into_iter()
            .map(|event| Event::new(event.into_iter().map(|r| r.hit).collect()))
            .collect())
       .collect())
}

fn parse_row(line: &str, n: usize) -> Result<Option<Row>> {
    let content = line.split('#').next().unwrap_or_default();
    let fields = content.split_whitespace().collect::<Vec<_>>();
    if fields.is_empty() { return Ok(None) }
    let error = |reason: String| Error::Parse { line: n, reason };
    let [window, event, x, y, layer] = fields[..] else {
        return Err(error(format!("expected 5 fields, found {}", fields.len())));
    };
    fn parse<T: std::str::FromStr>(field: &str, what: &str) -> std::result::Result<T, String>
    where
        <T as std::str::FromStr>::Err: std::fmt::Display,
    {
        field.parse().map_err(|e| format!("bad {what} `{field}`: {e}"))
    }
    let row = (|| Ok::<_, String>(Row {
        window: parse(window, "window id")?,
        event : parse(event , "event id" )?,
        hit   : Hit::new(parse(x, "x")?, parse(y, "y")?, parse(layer, "layer id")?),
    }))().map_err(error)?;
    Ok(Some(row))
}

fn group_by<T, K: PartialEq>(key: impl FnMut(&T) -> K, items: impl IntoIterator<Item = T>) -> Vec<Vec<T>> {
    items.into_iter()
        .group_by(key)
        .into_iter()
        .map(|(_, group)| group.collect())
        .collect()
}
