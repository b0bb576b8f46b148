//! Brace counting strategies
//!
//! `Literal` counts every `{` and `}` on a line, including those inside
//! string literals and comments. `TokenAware` skips Java string, char and
//! text-block literals and comments, carrying block state across lines.

use serde::{Deserialize, Serialize};

/// How braces are counted when delimiting a method body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BraceStrategy {
    /// Count every brace character
    #[default]
    Literal,
    /// Ignore braces inside literals and comments
    TokenAware,
}

impl BraceStrategy {
    pub fn counter(self) -> BraceCounter {
        BraceCounter {
            strategy: self,
            state: ScanState::Code,
        }
    }
}

impl std::fmt::Display for BraceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BraceStrategy::Literal => write!(f, "literal"),
            BraceStrategy::TokenAware => write!(f, "token-aware"),
        }
    }
}

/// Lexical state that survives a line break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    BlockComment,
    TextBlock,
}

/// Opening and closing braces seen on one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceCount {
    pub open: usize,
    pub close: usize,
}

impl BraceCount {
    pub fn delta(&self) -> i64 {
        self.open as i64 - self.close as i64
    }
}

/// Stateful per-line brace counter; feed lines in source order
#[derive(Debug, Clone)]
pub struct BraceCounter {
    strategy: BraceStrategy,
    state: ScanState,
}

impl BraceCounter {
    pub fn count_line(&mut self, line: &str) -> BraceCount {
        match self.strategy {
            BraceStrategy::Literal => BraceCount {
                open: line.matches('{').count(),
                close: line.matches('}').count(),
            },
            BraceStrategy::TokenAware => self.scan(line),
        }
    }

    fn scan(&mut self, line: &str) -> BraceCount {
        let mut count = BraceCount::default();
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            match self.state {
                ScanState::BlockComment => {
                    if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                        self.state = ScanState::Code;
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                ScanState::TextBlock => {
                    if chars[i] == '\\' {
                        i += 2;
                    } else if starts_text_block(&chars, i) {
                        self.state = ScanState::Code;
                        i += 3;
                    } else {
                        i += 1;
                    }
                }
                ScanState::Code => match chars[i] {
                    '/' if chars.get(i + 1) == Some(&'/') => break,
                    '/' if chars.get(i + 1) == Some(&'*') => {
                        self.state = ScanState::BlockComment;
                        i += 2;
                    }
                    '"' if starts_text_block(&chars, i) => {
                        self.state = ScanState::TextBlock;
                        i += 3;
                    }
                    '"' | '\'' => i = skip_quoted(&chars, i),
                    '{' => {
                        count.open += 1;
                        i += 1;
                    }
                    '}' => {
                        count.close += 1;
                        i += 1;
                    }
                    _ => i += 1,
                },
            }
        }

        count
    }
}

fn starts_text_block(chars: &[char], i: usize) -> bool {
    chars.get(i..i + 3) == Some(&['"', '"', '"'][..])
}

/// Index just past a string or char literal opened at `start`.
/// Unterminated literals end at end of line.
fn skip_quoted(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}
