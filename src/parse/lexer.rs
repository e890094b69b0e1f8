use super::token::{Token, TokenKind};
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::str::Utf8Chunks;

type RunLexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

fn run_lexer(run: &str) -> RunLexer<'_> {
    TokenKind::lexer(run).peekable_lexer()
}

/// Hands out one [`Token`] per call over possibly malformed UTF-8.
///
/// Each valid run of the input is scanned by logos; every byte of an invalid
/// sequence between runs becomes its own [`TokenKind::DecodeError`].
///
/// Lines start at 1. The column counter is bumped as each character is
/// reached, so the first character of a line sits at column 1 and a line break
/// resets the counter to 0. End of input keeps the last character's position.
pub struct Lexer<'a> {
    chunks: Utf8Chunks<'a>,
    run: &'a str,
    tokens: RunLexer<'a>,
    invalid: usize,
    cursor: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    pub fn from_bytes(source: &'a [u8]) -> Self {
        Self {
            chunks: source.utf8_chunks(),
            run: "",
            tokens: run_lexer(""),
            invalid: 0,
            cursor: 0,
            line: 1,
            column: 0,
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Token {
        let token = loop {
            if let Some(kind) = self.tokens.next() {
                let span = self.tokens.span();
                let run = self.run;
                let text = &run[span.start..span.end];
                // A token's position is that of its first character.
                let first = text.chars().next().map_or(0, char::len_utf8);
                self.track_to(span.start + first);
                break Token::new(self.line, self.column, kind, text);
            }

            self.track_to(self.run.len());
            if self.invalid > 0 {
                self.invalid -= 1;
                self.column += 1;
                break Token::new(self.line, self.column, TokenKind::DecodeError, "");
            }

            match self.chunks.next() {
                Some(chunk) => {
                    self.run = chunk.valid();
                    self.tokens = run_lexer(self.run);
                    self.invalid = chunk.invalid().len();
                    self.cursor = 0;
                }
                None => break Token::new(self.line, self.column, TokenKind::Eof, ""),
            }
        };

        log::trace!("{}:{} {} {:?}", token.line, token.column, token.kind, token.text);
        token
    }

    fn track_to(&mut self, end: usize) {
        let run = self.run;
        for c in run[self.cursor..end].chars() {
            if is_line_break(c) {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.cursor = end;
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to and including the end-of-input token.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is(TokenKind::Eof);
        Some(token)
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::init_logger;
    use TokenKind::*;

    fn check(s: &str, expected: &[(usize, usize, TokenKind, &str)]) {
        check_bytes(s.as_bytes(), expected)
    }

    fn check_bytes(s: &[u8], expected: &[(usize, usize, TokenKind, &str)]) {
        init_logger();
        let actual: Vec<_> = Lexer::from_bytes(s).collect();
        let expected: Vec<_> = expected
            .iter()
            .map(|&(line, column, kind, text)| Token::new(line, column, kind, text))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_lex_mixed() {
        check(
            "2d4 + d 20 - 4 D8?,\nkeyword = Value_1234",
            &[
                (1, 1, Integer, "2"),
                (1, 2, Dice, "d4"),
                (1, 5, Add, "+"),
                (1, 7, Dice, "d"),
                (1, 9, Integer, "20"),
                (1, 12, Subtract, "-"),
                (1, 14, Integer, "4"),
                (1, 16, Dice, "D8"),
                (1, 18, Unrecognized, "?"),
                (2, 1, Word, "keyword"),
                (2, 9, Equal, "="),
                (2, 11, Word, "Value_1234"),
                (2, 20, Eof, ""),
            ],
        );
    }

    #[test]
    fn test_lex_operators() {
        check(
            "=()^*/+-",
            &[
                (1, 1, Equal, "="),
                (1, 2, LeftParen, "("),
                (1, 3, RightParen, ")"),
                (1, 4, Exponentiate, "^"),
                (1, 5, Multiply, "*"),
                (1, 6, Divide, "/"),
                (1, 7, Add, "+"),
                (1, 8, Subtract, "-"),
                (1, 8, Eof, ""),
            ],
        );
    }

    #[test]
    fn test_lex_dice_words() {
        check(
            "d20 D d_1 dd4 d4x",
            &[
                (1, 1, Dice, "d20"),
                (1, 5, Dice, "D"),
                (1, 7, Word, "d_1"),
                (1, 11, Word, "dd4"),
                (1, 15, Word, "d4x"),
                (1, 17, Eof, ""),
            ],
        );
    }

    #[test]
    fn test_lex_empty() {
        check("", &[(1, 0, Eof, "")]);
        check(" ,, \t", &[(1, 5, Eof, "")]);
    }

    #[test]
    fn test_lex_line_breaks() {
        check(
            "1\r\n2\u{2028}3",
            &[
                (1, 1, Integer, "1"),
                (3, 1, Integer, "2"),
                (4, 1, Integer, "3"),
                (4, 1, Eof, ""),
            ],
        );
    }

    #[test]
    fn test_lex_unicode() {
        check(
            "héllo ½ →",
            &[
                (1, 1, Word, "héllo"),
                (1, 7, Unrecognized, "½"),
                (1, 9, Unrecognized, "→"),
                (1, 9, Eof, ""),
            ],
        );
    }

    #[test]
    fn test_lex_decode_error() {
        check_bytes(
            b"1 \xff 2",
            &[
                (1, 1, Integer, "1"),
                (1, 3, DecodeError, ""),
                (1, 5, Integer, "2"),
                (1, 5, Eof, ""),
            ],
        );
        check_bytes(b"\xe2\x82", &[(1, 1, DecodeError, ""), (1, 2, DecodeError, ""), (1, 2, Eof, "")]);
        check_bytes(
            b"\xe2\x82(d\n\xc0",
            &[
                (1, 1, DecodeError, ""),
                (1, 2, DecodeError, ""),
                (1, 3, LeftParen, "("),
                (1, 4, Dice, "d"),
                (2, 1, DecodeError, ""),
                (2, 1, Eof, ""),
            ],
        );
    }

    #[test]
    fn test_lex_word_classes() {
        check(
            "x\u{bd}2 \u{216b} _9",
            &[
                (1, 1, Word, "x\u{bd}2"),
                (1, 5, Unrecognized, "\u{216b}"),
                (1, 7, Word, "_9"),
                (1, 8, Eof, ""),
            ],
        );
    }

    #[test]
    fn test_lex_next_token_after_eof() {
        let mut lexer = Lexer::new("7");
        assert_eq!(lexer.next_token().kind, Integer);
        assert_eq!(lexer.next_token().kind, Eof);
        assert_eq!(lexer.next_token().kind, Eof);
    }
}
