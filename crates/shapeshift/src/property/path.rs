// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cascading property paths: `a.b[0].c`, `[2]`, `rows[1][0]`.

use crate::error::{ConvertError, Result};
use std::fmt;

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Name(String),
    Index(usize),
}

/// Parsed property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    text: String,
    segments: Vec<Segment>,
}

impl PropertyPath {
    pub fn parse(text: &str) -> Result<Self> {
        let fail = |reason: &str| ConvertError::invalid(format!("path '{text}': {reason}"));
        if text.is_empty() {
            return Err(fail("empty path"));
        }

        let mut segments = Vec::new();
        let mut chars = text.char_indices().peekable();
        // `true` right after a '.', where a name must follow.
        let mut expect_name = false;
        let mut name_start: Option<usize> = None;

        while let Some((i, c)) = chars.next() {
            match c {
                '.' => {
                    match name_start.take() {
                        Some(start) => segments.push(Segment::Name(text[start..i].to_string())),
                        None if matches!(segments.last(), Some(Segment::Index(_))) && !expect_name => {}
                        None => return Err(fail("empty segment")),
                    }
                    expect_name = true;
                }
                '[' => {
                    if let Some(start) = name_start.take() {
                        segments.push(Segment::Name(text[start..i].to_string()));
                    } else if expect_name {
                        return Err(fail("empty segment"));
                    }
                    expect_name = false;
                    let mut digits = String::new();
                    let mut closed = false;
                    for (_, d) in chars.by_ref() {
                        if d == ']' {
                            closed = true;
                            break;
                        }
                        digits.push(d);
                    }
                    if !closed {
                        return Err(fail("unclosed '['"));
                    }
                    let index = digits
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| fail(&format!("bad index '{digits}'")))?;
                    segments.push(Segment::Index(index));
                    if let Some(&(_, next)) = chars.peek() {
                        if next != '.' && next != '[' {
                            return Err(fail("expected '.' or '[' after index"));
                        }
                    }
                }
                ']' => return Err(fail("unexpected ']'")),
                _ => {
                    if name_start.is_none() {
                        name_start = Some(i);
                    }
                    expect_name = false;
                }
            }
        }

        match name_start {
            Some(start) => segments.push(Segment::Name(text[start..].to_string())),
            None if expect_name => return Err(fail("trailing '.'")),
            None => {}
        }

        Ok(Self {
            text: text.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
