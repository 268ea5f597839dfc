//! Recorded operator traces.
//!
//! A trace stores the operators a PostScript interpreter reported, so a
//! conversion can be replayed without the interpreter. Two formats are
//! supported:
//!
//! - text: one `operator operand...` per line; `%` starts a comment
//! - JSON lines: one `{"op": "moveto", "args": [1, 2]}` object per line

use serde::Deserialize;

use crate::error::{PsError, Result};

/// A recorded operator with its operands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceOp {
    /// 1-based line of the trace the operator was read from
    #[serde(skip)]
    pub line: usize,
    pub op: String,
    #[serde(default)]
    pub args: Vec<f64>,
}

impl TraceOp {
    pub fn new(op: impl Into<String>, args: Vec<f64>) -> Self {
        Self {
            line: 0,
            op: op.into(),
            args,
        }
    }
}

/// Format of a trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFormat {
    #[default]
    Text,
    JsonLines,
}

/// Parses a trace in the given format.
pub fn parse(input: &str, format: TraceFormat) -> Result<Vec<TraceOp>> {
    match format {
        TraceFormat::Text => parse_text(input),
        TraceFormat::JsonLines => parse_jsonl(input),
    }
}

/// Parses a text trace.
pub fn parse_text(input: &str) -> Result<Vec<TraceOp>> {
    let mut ops = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let content = raw.split_once('%').map_or(raw, |(before, _)| before);
        let mut tokens = content.split_whitespace();
        let Some(op) = tokens.next() else {
            continue;
        };
        let args = tokens
            .map(|token| {
                token.parse::<f64>().map_err(|_| PsError::TraceSyntax {
                    line,
                    msg: format!("invalid operand '{token}'"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        ops.push(TraceOp {
            line,
            op: op.to_string(),
            args,
        });
    }
    Ok(ops)
}

/// Parses a JSON lines trace. Blank lines are skipped.
pub fn parse_jsonl(input: &str) -> Result<Vec<TraceOp>> {
    let mut ops = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let mut op: TraceOp = serde_json::from_str(raw).map_err(|err| PsError::TraceSyntax {
            line,
            msg: err.to_string(),
        })?;
        op.line = line;
        ops.push(op);
    }
    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        let input = "% a square\nmoveto 0 0\nlineto 10 0 % bottom\n\n  fill\n";
        let ops = parse_text(input).unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].op, "moveto");
        assert_eq!(ops[0].line, 2);
        assert_eq!(ops[1].args, vec![10.0, 0.0]);
        assert_eq!(ops[2].op, "fill");
        assert_eq!(ops[2].line, 5);
        assert!(ops[2].args.is_empty());
    }

    #[test]
    fn test_parse_text_invalid_operand() {
        let result = parse_text("moveto 1 2\nlineto 1 x\n");
        assert!(matches!(result, Err(PsError::TraceSyntax { line: 2, .. })));
    }

    #[test]
    fn test_parse_jsonl() {
        let input = "{\"op\": \"setgray\", \"args\": [0.5]}\n\n{\"op\": \"fill\"}\n";
        let ops = parse_jsonl(input).unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].args, vec![0.5]);
        assert_eq!(ops[1].line, 3);
        assert!(ops[1].args.is_empty());
    }

    #[test]
    fn test_parse_jsonl_error() {
        let result = parse(r#"{"args": [1]}"#, TraceFormat::JsonLines);
        assert!(matches!(result, Err(PsError::TraceSyntax { line: 1, .. })));
    }
}
