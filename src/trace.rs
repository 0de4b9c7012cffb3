//! Reading branch traces.
//!
//! A trace is a text file with one branch per line: a hexadecimal program
//! counter value (with or without a `0x` prefix) followed by the outcome,
//! where the first character is `t` for 'taken' or `n` for 'not-taken'.
//!
//! ```text
//! 00a3b5fc t
//! 00a3b604 n
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::branch::*;
use crate::error::*;

/// A trace of [BranchRecord]s read from a text file.
#[derive(Clone, Debug)]
pub struct TextTrace {
    pub data: Vec<BranchRecord>,
    pub name: String,
}
impl TextTrace {

    /// Create a [TextTrace] from a file.
    pub fn from_file(path: impl AsRef<Path>) -> TraceResult<Self> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| TraceError::Io {
            path: path.to_path_buf(), source
        };
        let f = File::open(path).map_err(io_err)?;
        let name = path.file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let res = Self::from_reader(BufReader::new(f), &name).map_err(|e| {
            match e {
                TraceError::Io { source, .. } => io_err(source),
                e => e,
            }
        })?;
        debug!("loaded {} records from {}", res.num_entries(), path.display());
        Ok(res)
    }

    /// Read a trace from any buffered reader.
    pub fn from_reader(reader: impl BufRead, name: &str) -> TraceResult<Self> {
        let mut data = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| TraceError::Io {
                path: name.into(), source
            })?;
            if let Some(record) = parse_line(&line, lineno + 1)? {
                data.push(record);
            }
        }
        Ok(Self { data, name: name.to_string() })
    }

    /// Return the number of records
    pub fn num_entries(&self) -> usize { self.data.len() }

    pub fn name(&self) -> &str { &self.name }

    /// Return a slice of records.
    pub fn as_slice(&self) -> &[BranchRecord] { &self.data }
}

/// Parse a single line of a trace. Blank lines yield [None].
pub fn parse_line(line: &str, lineno: usize) -> TraceResult<Option<BranchRecord>> {
    let err = |reason: String| TraceError::Parse { line: lineno, reason };

    let mut tokens = line.split_whitespace();
    let addr = match tokens.next() {
        Some(tok) => tok,
        None => return Ok(None),
    };
    let outcome = tokens.next()
        .ok_or_else(|| err("missing branch outcome".to_string()))?;
    if let Some(extra) = tokens.next() {
        return Err(err(format!("unexpected token '{}'", extra)));
    }

    let digits = addr.strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let pc = usize::from_str_radix(digits, 16)
        .map_err(|e| err(format!("invalid address '{}': {}", addr, e)))?;

    let outcome = outcome.chars().next()
        .and_then(Outcome::from_char)
        .ok_or_else(|| err(format!("invalid outcome '{}'", outcome)))?;

    Ok(Some(BranchRecord::new(pc, outcome)))
}
