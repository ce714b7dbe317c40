//! Key paths addressing a value inside a locale document.
//!
//! A path is stored as its segments, so keys that themselves contain dots
//! stay unambiguous. The textual form uses dot notation and falls back to
//! bracket notation (`a["b.c"]`) for segments that would not round-trip.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Return a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Split into the parent path and the last segment.
    pub fn split_last(&self) -> Option<(KeyPath, &str)> {
        let (last, parent) = self.segments.split_last()?;
        Some((KeyPath::from_segments(parent.iter().cloned()), last.as_str()))
    }
}

fn needs_brackets(segment: &str) -> bool {
    segment.is_empty() || segment.contains(['.', '[', ']', '"'])
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if needs_brackets(segment) {
                write!(f, "[{}]", serde_json::Value::String(segment.clone()))?;
            } else {
                if i > 0 {
                    f.write_str(".")?;
                }
                f.write_str(segment)?;
            }
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = anyhow::Error;

    /// Parse `a.b`, `a[0]`, `a["b.c"]` and `a['b']` forms.
    fn from_str(input: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = input.chars().peekable();
        let mut after_dot = false;

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    } else if segments.is_empty() || after_dot {
                        bail!("Empty segment in key path: \"{}\"", input);
                    }
                    after_dot = true;
                    continue;
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                    let quote = match chars.peek() {
                        Some(&q @ ('"' | '\'')) => {
                            chars.next();
                            Some(q)
                        }
                        _ => None,
                    };
                    let mut segment = String::new();
                    let mut closed = false;
                    while let Some(c) = chars.next() {
                        match (quote, c) {
                            (Some(q), c) if c == q => {
                                if chars.next() != Some(']') {
                                    bail!("Expected ']' after quoted segment in \"{}\"", input);
                                }
                                closed = true;
                                break;
                            }
                            (Some(_), '\\') => {
                                if let Some(escaped) = chars.next() {
                                    segment.push(escaped);
                                }
                            }
                            (None, ']') => {
                                closed = true;
                                break;
                            }
                            (_, c) => segment.push(c),
                        }
                    }
                    if !closed {
                        bail!("Unterminated bracket in key path: \"{}\"", input);
                    }
                    segments.push(segment);
                }
                c => current.push(c),
            }
            after_dot = false;
        }

        if !current.is_empty() {
            segments.push(current);
        } else if input.ends_with('.') {
            bail!("Key path ends with '.': \"{}\"", input);
        }

        Ok(Self { segments })
    }
}
