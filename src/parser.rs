//! Component D: recursive-descent parser building the AST from a fully
//! tokenized source.
//!
//! The pipeline always tokenizes to completion before descending (per the
//! component's contract); comments are skipped transparently by
//! [`Parser::current`]/[`Parser::bump`] rather than filtered out of the
//! token vector, so a caller who asked for `tokens` still gets every
//! comment in source order.

use crate::ast::{self, Document, Member, MemberName, ValueNode};
use crate::error::{Error, ErrorKind};
use crate::escape;
use crate::lexer::{self, LexOptions};
use crate::position::{Dialect, Location, LocationRange};
use crate::reader::SourceBuf;
use crate::token::{Token, TokenKind};
use log::{debug, trace};

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub mode: Dialect,
    pub ranges: bool,
    pub tokens: bool,
    pub allow_trailing_commas: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: Dialect::Json,
            ranges: false,
            tokens: false,
            allow_trailing_commas: false,
        }
    }
}

struct Parser<'s> {
    src: &'s SourceBuf,
    text: &'s str,
    tokens: &'s [Token],
    /// Indices into `tokens` of every non-comment token, terminated by the
    /// `Eof` token's index.
    significant: &'s [usize],
    pos: usize,
    options: ParseOptions,
}

impl<'s> Parser<'s> {
    fn current(&self) -> &Token {
        &self.tokens[self.significant[self.pos]]
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.significant[self.pos]].clone();
        if self.pos + 1 < self.significant.len() {
            self.pos += 1;
        }
        token
    }

    fn parts(&self, loc: LocationRange) -> ast::NodeParts {
        ast::NodeParts::new(loc, self.options.ranges)
    }

    fn unexpected(&self) -> Error {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => Error::new(ErrorKind::UnexpectedEof, token.loc.start),
            kind => Error::new(ErrorKind::UnexpectedToken(kind), token.loc.start),
        }
    }

    fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.current().kind == kind {
            Ok(self.bump())
        } else {
            Err(self.unexpected())
        }
    }

    fn trailing_comma_allowed(&self) -> bool {
        self.options.mode.is_json5() || self.options.allow_trailing_commas
    }

    fn parse_value(&mut self) -> Result<ValueNode, Error> {
        trace!("parse_value enter at {:?}, token {:?}", self.current().loc.start, self.current().kind);
        let value = match self.current().kind {
            TokenKind::LBrace => Ok(ValueNode::Object(self.parse_object()?)),
            TokenKind::LBracket => Ok(ValueNode::Array(self.parse_array()?)),
            TokenKind::String => Ok(ValueNode::String(self.parse_string()?)),
            TokenKind::Number => self.parse_number_like(),
            TokenKind::Boolean => Ok(ValueNode::Boolean(self.parse_boolean())),
            TokenKind::Null => Ok(ValueNode::Null(self.parse_null())),
            TokenKind::Identifier => Ok(ValueNode::Identifier(self.parse_identifier())),
            _ => Err(self.unexpected()),
        }?;
        trace!("parse_value exit at {:?}", value.loc().end);
        Ok(value)
    }

    fn parse_object(&mut self) -> Result<ast::Object, Error> {
        debug!("parse_object enter at {:?}", self.current().loc.start);
        let open = self.expect_kind(TokenKind::LBrace)?;
        let mut members = Vec::new();
        if self.current().kind != TokenKind::RBrace {
            loop {
                members.push(self.parse_member()?);
                if self.current().kind != TokenKind::Comma {
                    break;
                }
                self.bump();
                if self.current().kind == TokenKind::RBrace {
                    if self.trailing_comma_allowed() {
                        break;
                    }
                    return Err(self.unexpected());
                }
            }
        }
        let close = self.expect_kind(TokenKind::RBrace)?;
        let loc = LocationRange::new(open.loc.start, close.loc.end);
        debug!("parse_object exit with {} member(s) at {:?}", members.len(), loc.end);
        Ok(ast::object(members, self.parts(loc)))
    }

    fn parse_member(&mut self) -> Result<Member, Error> {
        trace!("parse_member enter at {:?}", self.current().loc.start);
        let name = self.parse_member_name()?;
        self.expect_kind(TokenKind::Colon)?;
        let value = self.parse_value()?;
        let loc = LocationRange::new(name.loc().start, value.loc().end);
        trace!("parse_member exit \"{}\" at {:?}", name.as_str(), loc.end);
        Ok(ast::member(name, value, self.parts(loc)))
    }

    fn parse_member_name(&mut self) -> Result<MemberName, Error> {
        match self.current().kind {
            TokenKind::String => Ok(MemberName::String(self.parse_string()?)),
            TokenKind::Identifier => Ok(MemberName::Identifier(self.parse_identifier())),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_array(&mut self) -> Result<ast::Array, Error> {
        debug!("parse_array enter at {:?}", self.current().loc.start);
        let open = self.expect_kind(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        if self.current().kind != TokenKind::RBracket {
            loop {
                elements.push(self.parse_element()?);
                if self.current().kind != TokenKind::Comma {
                    break;
                }
                self.bump();
                if self.current().kind == TokenKind::RBracket {
                    if self.trailing_comma_allowed() {
                        break;
                    }
                    return Err(self.unexpected());
                }
            }
        }
        let close = self.expect_kind(TokenKind::RBracket)?;
        let loc = LocationRange::new(open.loc.start, close.loc.end);
        debug!("parse_array exit with {} element(s) at {:?}", elements.len(), loc.end);
        Ok(ast::array(elements, self.parts(loc)))
    }

    fn parse_element(&mut self) -> Result<ast::Element, Error> {
        let value = self.parse_value()?;
        let loc = value.loc();
        Ok(ast::element(value, self.parts(loc)))
    }

    fn parse_string(&mut self) -> Result<ast::StringNode, Error> {
        let token = self.bump();
        let value = escape::decode_string(self.src, &token, self.options.mode)?;
        Ok(ast::string(value, self.parts(token.loc)))
    }

    fn parse_boolean(&mut self) -> ast::Boolean {
        let token = self.bump();
        let value = token.text(self.text) == "true";
        ast::boolean(value, self.parts(token.loc))
    }

    fn parse_null(&mut self) -> ast::Null {
        let token = self.bump();
        ast::null(self.parts(token.loc))
    }

    fn parse_identifier(&mut self) -> ast::Identifier {
        let token = self.bump();
        let name = escape::decode_identifier(self.src, &token);
        ast::identifier(name, self.parts(token.loc))
    }

    /// A `Number`-kind token may spell a signed `Infinity`/`NaN` literal
    /// (json5 only), which becomes its own node kind rather than a
    /// `Number`.
    fn parse_number_like(&mut self) -> Result<ValueNode, Error> {
        let token = self.bump();
        let raw = token.text(self.text);
        let (sign, body) = crate::position::Sign::split(raw);
        let parts = self.parts(token.loc);
        match body {
            "Infinity" => Ok(ValueNode::Infinity(ast::infinity(sign, parts))),
            "NaN" => Ok(ValueNode::NaN(ast::nan(sign, parts))),
            _ => {
                let value = escape::decode_number(raw);
                Ok(ValueNode::Number(ast::number(value, parts)))
            }
        }
    }
}

/// Parse `text` under `options` into a [`Document`].
pub fn parse(text: &str, options: ParseOptions) -> Result<Document, Error> {
    let src = SourceBuf::new(text);
    let lex_options = LexOptions {
        mode: options.mode,
        ranges: options.ranges,
    };
    let (all_tokens, eof_token) = lexer::tokenize_source(&src, lex_options)?;
    // The parser needs an `Eof` sentinel at the end of its own token view
    // to report `UnexpectedEof` uniformly, but that sentinel must not leak
    // into `Document.tokens` or `tokenize()`'s output.
    let mut parse_tokens = all_tokens.clone();
    parse_tokens.push(eof_token);
    let significant: Vec<usize> = parse_tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.kind.is_comment())
        .map(|(i, _)| i)
        .collect();

    let (body, eof_loc) = {
        let mut parser = Parser {
            src: &src,
            text,
            tokens: &parse_tokens,
            significant: &significant,
            pos: 0,
            options,
        };
        let body = parser.parse_value()?;
        let eof = parser.expect_kind(TokenKind::Eof)?;
        (body, eof.loc)
    };

    let loc = LocationRange::new(Location::start(), eof_loc.end);
    Ok(Document {
        body,
        tokens: options.tokens.then_some(all_tokens),
        loc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ValueNode;

    fn parse_json(text: &str) -> Document {
        parse(text, ParseOptions::default()).unwrap()
    }

    #[test]
    fn scenario_1_bare_string() {
        let doc = parse_json(r#""hi""#);
        match doc.body {
            ValueNode::String(s) => assert_eq!(s.value, "hi"),
            other => panic!("expected string, got {other:?}"),
        }
        assert_eq!(doc.loc, LocationRange::new(Location::new(1, 1, 0), Location::new(1, 5, 4)));
    }

    #[test]
    fn scenario_2_object_with_two_members() {
        let doc = parse_json(r#"{"foo":1, "bar": true}"#);
        let obj = match doc.body {
            ValueNode::Object(o) => o,
            other => panic!("expected object, got {other:?}"),
        };
        assert_eq!(obj.members.len(), 2);
        assert_eq!(obj.members[0].name.as_str(), "foo");
        assert_eq!(obj.members[1].name.as_str(), "bar");
        match &obj.members[0].value {
            ValueNode::Number(n) => assert_eq!(n.value, 1.0),
            other => panic!("expected number, got {other:?}"),
        }
        match &obj.members[1].value {
            ValueNode::Boolean(b) => assert!(b.value),
            other => panic!("expected boolean, got {other:?}"),
        }
    }

    #[test]
    fn scenario_3_extra_token_after_value_errors() {
        let err = parse(r#""hi"123"#, ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedToken(TokenKind::Number));
        assert_eq!(err.location, Location::new(1, 5, 4));
    }

    #[test]
    fn scenario_4_input_that_is_only_a_comment_has_no_value_to_parse() {
        let err = parse(
            "/* foo \nbar*/",
            ParseOptions {
                mode: Dialect::Jsonc,
                ..ParseOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
    }

    #[test]
    fn scenario_5_signed_hex_number() {
        let doc = parse(
            "+0x1F",
            ParseOptions {
                mode: Dialect::Json5,
                ..ParseOptions::default()
            },
        )
        .unwrap();
        match doc.body {
            ValueNode::Number(n) => assert_eq!(n.value, 31.0),
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn scenario_6_crlf_and_lf_agree_on_first_member_location() {
        let lf = parse_json("{\n\n\"b\": 2}");
        let crlf = parse_json("{\r\n\r\n\"b\": 2}");
        let member_loc = |doc: &Document| match &doc.body {
            ValueNode::Object(o) => o.members[0].name.loc().start,
            other => panic!("expected object, got {other:?}"),
        };
        let lf_loc = member_loc(&lf);
        let crlf_loc = member_loc(&crlf);
        assert_eq!((lf_loc.line, lf_loc.column), (3, 1));
        assert_eq!((crlf_loc.line, crlf_loc.column), (3, 1));
        assert_eq!(lf_loc.offset, 3);
        assert_eq!(crlf_loc.offset, 5);
    }

    #[test]
    fn trailing_comma_rejected_in_json_mode_by_default() {
        let err = parse("[1,]", ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedToken(TokenKind::RBracket));
    }

    #[test]
    fn trailing_comma_allowed_when_opted_in() {
        let doc = parse(
            "[1,]",
            ParseOptions {
                allow_trailing_commas: true,
                ..ParseOptions::default()
            },
        )
        .unwrap();
        match doc.body {
            ValueNode::Array(a) => assert_eq!(a.elements.len(), 1),
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn json5_trailing_comma_always_allowed() {
        let doc = parse(
            "[1,]",
            ParseOptions {
                mode: Dialect::Json5,
                ..ParseOptions::default()
            },
        )
        .unwrap();
        match doc.body {
            ValueNode::Array(a) => assert_eq!(a.elements.len(), 1),
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn bare_object_key_in_json_mode_is_unexpected_char_not_unexpected_token() {
        let err = parse("{a: 1}", ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedChar('a'));
    }

    #[test]
    fn json5_identifier_key_is_accepted() {
        let doc = parse(
            "{a: 1}",
            ParseOptions {
                mode: Dialect::Json5,
                ..ParseOptions::default()
            },
        )
        .unwrap();
        match doc.body {
            ValueNode::Object(o) => assert_eq!(o.members[0].name.as_str(), "a"),
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn requesting_tokens_attaches_the_full_stream() {
        let doc = parse(
            "[1]",
            ParseOptions {
                tokens: true,
                ..ParseOptions::default()
            },
        )
        .unwrap();
        assert!(doc.tokens.is_some());
    }

    #[test]
    fn requesting_tokens_never_includes_the_eof_sentinel() {
        let doc = parse(
            r#""hi""#,
            ParseOptions {
                tokens: true,
                ..ParseOptions::default()
            },
        )
        .unwrap();
        let tokens = doc.tokens.unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Eof));
    }

    #[test]
    fn parsing_emits_trace_and_debug_lines_per_production() {
        let _ = env_logger::builder().is_test(true).filter_level(log::LevelFilter::Trace).try_init();
        let doc = parse_json(r#"{"a":[1,2]}"#);
        match doc.body {
            ValueNode::Object(o) => assert_eq!(o.members.len(), 1),
            other => panic!("expected object, got {other:?}"),
        }
    }
}
