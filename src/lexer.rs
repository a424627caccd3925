//! Component B: turns source text into a [`Token`] stream.
//!
//! The lexer owns a [`CharReader`] and is the only place dialect rules
//! about whitespace, comments, numbers, strings and JSON5 identifiers are
//! enforced. It does not decode token text into values; that is
//! `escape`'s job, driven lazily by the parser.

use crate::error::{Error, ErrorKind};
use crate::position::{Dialect, Location, LocationRange, Range};
use crate::reader::{CharReader, SourceBuf};
use crate::token::{Token, TokenKind};
use crate::unicode;
use log::trace;

#[derive(Debug, Clone, Copy)]
pub struct LexOptions {
    pub mode: Dialect,
    pub ranges: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            mode: Dialect::Json,
            ranges: false,
        }
    }
}

pub(crate) struct Lexer<'s> {
    src: &'s SourceBuf,
    reader: CharReader<'s>,
    options: LexOptions,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s SourceBuf, options: LexOptions) -> Self {
        Self {
            src,
            reader: src.reader(),
            options,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_whitespace();
        let start_loc = self.reader.locate();
        let start_idx = self.reader.char_index();

        let token = match self.reader.peek() {
            None => Ok(self.finish(TokenKind::Eof, start_loc, start_idx)),
            Some(c @ ('{' | '}' | '[' | ']' | ':' | ',')) => {
                self.reader.next();
                let kind = match c {
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    '[' => TokenKind::LBracket,
                    ']' => TokenKind::RBracket,
                    ':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                };
                Ok(self.finish(kind, start_loc, start_idx))
            }
            Some('"') => self.lex_string('"', start_loc, start_idx),
            Some('\'') if self.options.mode.is_json5() => self.lex_string('\'', start_loc, start_idx),
            Some('/') if self.options.mode.allows_comments() => self.lex_comment(start_loc, start_idx),
            Some(c) if c.is_ascii_digit() || c == '-' || (self.options.mode.is_json5() && matches!(c, '+' | '.')) => {
                self.lex_number(start_loc, start_idx)
            }
            Some('t' | 'f' | 'n') => self.lex_word(start_loc, start_idx),
            Some(c) if self.options.mode.is_json5() && (unicode::is_id_start(c) || c == '\\') => {
                self.lex_word(start_loc, start_idx)
            }
            Some(c) => {
                self.reader.next();
                Err(Error::new(ErrorKind::UnexpectedChar(c), start_loc))
            }
        }?;

        trace!("lexed {:?} {:?}", token.kind, token.loc);
        Ok(token)
    }

    fn finish(&self, kind: TokenKind, start: Location, start_idx: usize) -> Token {
        let end = self.reader.locate();
        let end_idx = self.reader.char_index();
        let loc = LocationRange::new(start, end);
        Token {
            kind,
            range: self.options.ranges.then(|| Range::from_loc(&loc)),
            loc,
            char_start: start_idx,
            char_end: end_idx,
            byte_start: self.src.byte_offset(start_idx),
            byte_end: self.src.byte_offset(end_idx),
        }
    }

    fn is_whitespace(&self, c: char) -> bool {
        match self.options.mode {
            Dialect::Json | Dialect::Jsonc => matches!(c, ' ' | '\t' | '\n' | '\r'),
            Dialect::Json5 => c == '\u{FEFF}' || c.is_whitespace(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.reader.peek() {
            if !self.is_whitespace(c) {
                break;
            }
            self.reader.next();
        }
    }

    fn lex_comment(&mut self, start: Location, start_idx: usize) -> Result<Token, Error> {
        self.reader.next(); // '/'
        match self.reader.peek() {
            Some('/') => {
                self.reader.next();
                while let Some(c) = self.reader.peek() {
                    if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                        break;
                    }
                    self.reader.next();
                }
                Ok(self.finish(TokenKind::LineComment, start, start_idx))
            }
            Some('*') => {
                self.reader.next();
                loop {
                    match self.reader.next() {
                        None => return Err(Error::new(ErrorKind::UnexpectedEof, self.reader.locate())),
                        Some('*') if self.reader.peek() == Some('/') => {
                            self.reader.next();
                            break;
                        }
                        Some(_) => {}
                    }
                }
                Ok(self.finish(TokenKind::BlockComment, start, start_idx))
            }
            _ => Err(Error::new(ErrorKind::UnexpectedChar('/'), start)),
        }
    }

    fn lex_string(&mut self, quote: char, start: Location, start_idx: usize) -> Result<Token, Error> {
        self.reader.next(); // opening quote
        loop {
            match self.reader.next() {
                None => return Err(Error::new(ErrorKind::UnexpectedEof, self.reader.locate())),
                Some(c) if c == quote => break,
                Some('\\') => {
                    // Tokenize is lenient about escape *contents*; only the
                    // decoder (escape.rs, run from the parser) validates hex
                    // digit counts and recognized escape characters.
                    match self.reader.next() {
                        None => return Err(Error::new(ErrorKind::UnexpectedEof, self.reader.locate())),
                        Some('u') => {
                            for _ in 0..4 {
                                if self.reader.peek().map_or(true, |c| !c.is_ascii_hexdigit()) {
                                    break;
                                }
                                self.reader.next();
                            }
                        }
                        Some(_) => {}
                    }
                }
                Some(_) => {}
            }
        }
        Ok(self.finish(TokenKind::String, start, start_idx))
    }

    /// Read a run of JSON5 `IdentifierStart`/`IdentifierPart` characters
    /// (or a strict-mode `true`/`false`/`null` run, which is a subset of
    /// the same grammar), then classify it.
    fn lex_word(&mut self, start: Location, start_idx: usize) -> Result<Token, Error> {
        self.read_identifier_char(true)?;
        while self.peek_identifier_continue() {
            self.read_identifier_char(false)?;
        }
        let token = self.finish(TokenKind::Identifier, start, start_idx);
        let name = crate::escape::decode_identifier(self.src, &token);

        let json5 = self.options.mode.is_json5();
        let kind = match name.as_str() {
            "true" | "false" => TokenKind::Boolean,
            "null" => TokenKind::Null,
            "Infinity" | "NaN" if json5 => TokenKind::Number,
            _ if json5 => TokenKind::Identifier,
            _ => return Err(Error::new(ErrorKind::UnexpectedIdentifier(name), start)),
        };
        Ok(Token { kind, ..token })
    }

    fn peek_identifier_continue(&self) -> bool {
        match self.reader.peek() {
            Some('\\') => true,
            Some(c) => unicode::is_id_continue(c),
            None => false,
        }
    }

    fn read_identifier_char(&mut self, is_start: bool) -> Result<(), Error> {
        if self.reader.peek() == Some('\\') {
            let bs_loc = self.reader.locate();
            self.reader.next(); // backslash
            if self.reader.peek() != Some('u') {
                return Err(Error::new(ErrorKind::UnexpectedChar('\\'), bs_loc));
            }
            self.reader.next(); // 'u'
            let mut hex = String::with_capacity(4);
            for _ in 0..4 {
                match self.reader.next() {
                    Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                    _ => return Err(Error::new(ErrorKind::InvalidUnicodeEscape(hex), bs_loc)),
                }
            }
            let code = u32::from_str_radix(&hex, 16)
                .map_err(|_| Error::new(ErrorKind::InvalidUnicodeEscape(hex.clone()), bs_loc))?;
            let c = char::from_u32(code).unwrap_or('\u{FFFD}');
            let ok = if is_start { unicode::is_id_start(c) } else { unicode::is_id_continue(c) };
            if !ok {
                return Err(Error::new(ErrorKind::UnexpectedChar(c), bs_loc));
            }
            Ok(())
        } else {
            let loc = self.reader.locate();
            let c = self.reader.next().expect("caller checked peek");
            let ok = if is_start { unicode::is_id_start(c) || c.is_ascii_alphabetic() } else { unicode::is_id_continue(c) };
            if !ok {
                return Err(Error::new(ErrorKind::UnexpectedChar(c), loc));
            }
            Ok(())
        }
    }

    fn lex_number(&mut self, start: Location, start_idx: usize) -> Result<Token, Error> {
        let json5 = self.options.mode.is_json5();
        if matches!(self.reader.peek(), Some('-' | '+')) {
            self.reader.next();
        }

        // JSON5 signed Infinity/NaN: a letter run immediately after the sign.
        if json5 && matches!(self.reader.peek(), Some(c) if c.is_ascii_alphabetic()) {
            let mut word = String::new();
            while matches!(self.reader.peek(), Some(c) if c.is_ascii_alphabetic()) {
                word.push(self.reader.next().unwrap());
            }
            if word != "Infinity" && word != "NaN" {
                return Err(Error::new(ErrorKind::UnexpectedIdentifier(word), start));
            }
            return Ok(self.finish(TokenKind::Number, start, start_idx));
        }

        match self.reader.peek() {
            Some('0') => {
                self.reader.next();
                match self.reader.peek() {
                    Some('x' | 'X') if json5 => {
                        self.reader.next();
                        let mut any = false;
                        while matches!(self.reader.peek(), Some(c) if c.is_ascii_hexdigit()) {
                            self.reader.next();
                            any = true;
                        }
                        if !any {
                            let loc = self.reader.locate();
                            return Err(match self.reader.peek() {
                                Some(c) => Error::new(ErrorKind::UnexpectedChar(c), loc),
                                None => Error::new(ErrorKind::UnexpectedEof, loc),
                            });
                        }
                        return Ok(self.finish(TokenKind::Number, start, start_idx));
                    }
                    Some(c) if c.is_ascii_digit() => {
                        let loc = self.reader.locate();
                        return Err(Error::new(ErrorKind::UnexpectedChar(c), loc));
                    }
                    _ => {}
                }
            }
            Some(c) if c.is_ascii_digit() => {
                while matches!(self.reader.peek(), Some(c) if c.is_ascii_digit()) {
                    self.reader.next();
                }
            }
            Some('.') if json5 => {}
            _ => {
                let loc = self.reader.locate();
                return Err(match self.reader.peek() {
                    Some(c) => Error::new(ErrorKind::UnexpectedChar(c), loc),
                    None => Error::new(ErrorKind::UnexpectedEof, loc),
                });
            }
        }

        if self.reader.peek() == Some('.') {
            self.reader.next();
            let mut digits = 0u32;
            while matches!(self.reader.peek(), Some(c) if c.is_ascii_digit()) {
                self.reader.next();
                digits += 1;
            }
            if digits == 0 && !json5 {
                let loc = self.reader.locate();
                return Err(match self.reader.peek() {
                    Some(c) => Error::new(ErrorKind::UnexpectedChar(c), loc),
                    None => Error::new(ErrorKind::UnexpectedEof, loc),
                });
            }
        }

        if matches!(self.reader.peek(), Some('e' | 'E')) {
            self.reader.next();
            if matches!(self.reader.peek(), Some('+' | '-')) {
                self.reader.next();
            }
            let mut digits = 0u32;
            while matches!(self.reader.peek(), Some(c) if c.is_ascii_digit()) {
                self.reader.next();
                digits += 1;
            }
            if digits == 0 {
                let loc = self.reader.locate();
                return Err(match self.reader.peek() {
                    Some(c) => Error::new(ErrorKind::UnexpectedChar(c), loc),
                    None => Error::new(ErrorKind::UnexpectedEof, loc),
                });
            }
        }

        Ok(self.finish(TokenKind::Number, start, start_idx))
    }
}

/// Tokenize `text` under `options`, collecting to completion. `Eof` is a
/// sentinel the lexer loop stops on, not a member of the public
/// `TokenKind` grammar, so it never appears in the returned vector.
pub fn tokenize(text: &str, options: LexOptions) -> Result<Vec<Token>, Error> {
    let src = SourceBuf::new(text);
    let (tokens, _eof) = tokenize_source(&src, options)?;
    Ok(tokens)
}

/// Same as [`tokenize`] but over a [`SourceBuf`] the caller already built,
/// so the parser can reuse one buffer for both lexing and later escape
/// decoding instead of re-scanning the input twice. Also hands back the
/// `Eof` sentinel itself (dropped by [`tokenize`]) so the parser can keep
/// reporting `UnexpectedEof` past the end of the significant-token list
/// without that sentinel leaking into a caller-visible token stream.
pub(crate) fn tokenize_source(src: &SourceBuf, options: LexOptions) -> Result<(Vec<Token>, Token), Error> {
    let mut lexer = Lexer::new(src, options);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::Eof {
            return Ok((tokens, token));
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, mode: Dialect) -> Vec<TokenKind> {
        tokenize(text, LexOptions { mode, ranges: false })
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn scenario_1_bare_string() {
        let tokens = tokenize(r#""hi""#, LexOptions { mode: Dialect::Json, ranges: false }).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].loc.start, Location::new(1, 1, 0));
        assert_eq!(tokens[0].loc.end, Location::new(1, 5, 4));
    }

    #[test]
    fn scenario_2_object_tokens() {
        assert_eq!(
            kinds(r#"{"foo":1, "bar": true}"#, Dialect::Json),
            vec![
                TokenKind::LBrace,
                TokenKind::String,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::String,
                TokenKind::Colon,
                TokenKind::Boolean,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn scenario_4_block_comment_spans_two_lines() {
        let tokens = tokenize("/* foo \nbar*/", LexOptions { mode: Dialect::Jsonc, ranges: false }).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[0].loc.start, Location::new(1, 1, 0));
        assert_eq!(tokens[0].loc.end, Location::new(2, 6, 13));
    }

    #[test]
    fn scenario_5_signed_hex_number() {
        let tokens = tokenize("+0x1F", LexOptions { mode: Dialect::Json5, ranges: false }).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].loc.end.offset, 5);
    }

    #[test]
    fn bad_keyword_run_is_unexpected_identifier_in_strict_json() {
        let err = tokenize("nope", LexOptions { mode: Dialect::Json, ranges: false }).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedIdentifier("nope".into()));
    }

    #[test]
    fn json5_accepts_dollar_and_underscore_identifiers() {
        assert_eq!(kinds("$_foo", Dialect::Json5), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn leading_zero_followed_by_digit_is_rejected() {
        let err = tokenize("01", LexOptions { mode: Dialect::Json, ranges: false }).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedChar('1'));
    }

    #[test]
    fn unterminated_string_is_unexpected_eof() {
        let err = tokenize("\"abc", LexOptions { mode: Dialect::Json, ranges: false }).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
    }

    #[test]
    fn tokenizing_emits_a_trace_line_per_token() {
        let _ = env_logger::builder().is_test(true).filter_level(log::LevelFilter::Trace).try_init();
        let tokens = tokenize(r#"{"a":1}"#, LexOptions::default()).unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::RBrace);
    }

    #[test]
    fn eof_sentinel_never_appears_in_the_returned_stream() {
        let tokens = tokenize("[]", LexOptions::default()).unwrap();
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Eof));
    }
}
