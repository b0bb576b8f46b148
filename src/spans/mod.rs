//! Method span extraction by line-oriented brace counting
//!
//! Given source text and the 0-based lines where method declarations start,
//! yields the text of each method: from the declaration line down to the line
//! where the braces opened by the body balance out. No parsing is involved,
//! so braces inside literals and comments count unless
//! [`BraceStrategy::TokenAware`] is selected.

mod braces;

pub use braces::{BraceCount, BraceCounter, BraceStrategy};

use crate::error::{MalformedReason, ReadabilityError, ReadabilityResult};
use crate::models::MethodSpan;

/// Delimiter placed after every method when feeding spans to the engine
pub const METHOD_DELIMITER: &str = "\n###\n";

/// Lazily extract one span per declaration start line, in the given order
pub fn extract_method_spans<'a, I>(
    source: &'a str,
    start_lines: I,
    strategy: BraceStrategy,
) -> MethodSpans<'a, I::IntoIter>
where
    I: IntoIterator<Item = usize>,
{
    MethodSpans {
        lines: source.lines().collect(),
        starts: start_lines.into_iter(),
        strategy,
    }
}

/// Join method texts the way the method-score engine expects them
pub fn join_for_engine<'s>(spans: impl IntoIterator<Item = &'s MethodSpan>) -> String {
    spans
        .into_iter()
        .map(|span| format!("{}{}", span.text, METHOD_DELIMITER))
        .collect()
}

/// Iterator over method spans; each item is independent, so an error for
/// one declaration does not end the sequence
#[derive(Debug)]
pub struct MethodSpans<'a, I> {
    lines: Vec<&'a str>,
    starts: I,
    strategy: BraceStrategy,
}

impl<I> MethodSpans<'_, I> {
    fn span_at(&self, start_line: usize) -> ReadabilityResult<MethodSpan> {
        let malformed = |reason| ReadabilityError::MalformedSource {
            line: start_line,
            reason,
        };

        let mut counter = self.strategy.counter();
        let mut first_brace = None;
        for (idx, line) in self.lines.iter().enumerate().skip(start_line) {
            let count = counter.count_line(line);
            if count.open > 0 {
                first_brace = Some((idx, count));
                break;
            }
        }
        let (first_brace_line, first_count) =
            first_brace.ok_or_else(|| malformed(MalformedReason::NoOpeningBrace))?;

        let mut balance = first_count.delta();
        let mut end_line = (balance == 0).then_some(first_brace_line);
        if end_line.is_none() {
            for (idx, line) in self.lines.iter().enumerate().skip(first_brace_line + 1) {
                balance += counter.count_line(line).delta();
                if balance == 0 {
                    end_line = Some(idx);
                    break;
                }
            }
        }
        let end_line = end_line.ok_or_else(|| malformed(MalformedReason::UnbalancedBraces))?;

        Ok(MethodSpan {
            start_line,
            first_brace_line,
            end_line,
            text: self.lines[start_line..=end_line].join("\n"),
        })
    }
}

impl<I> Iterator for MethodSpans<'_, I>
where
    I: Iterator<Item = usize>,
{
    type Item = ReadabilityResult<MethodSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        let start_line = self.starts.next()?;
        Some(self.span_at(start_line))
    }
}
