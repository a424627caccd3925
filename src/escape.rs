//! Component H: decode a raw string/identifier/number token's source text
//! into its AST value. This is the one place unicode escapes and string
//! line continuations turn into actual characters.

use crate::error::{Error, ErrorKind};
use crate::position::{Dialect, Location};
use crate::reader::{CharReader, SourceBuf};
use crate::token::Token;

/// Decode a `String` token's raw text (including its surrounding quotes)
/// into the value it spells out.
pub(crate) fn decode_string(src: &SourceBuf, token: &Token, dialect: Dialect) -> Result<String, Error> {
    let mut reader = src.reader_at(token.char_start, token.loc.start);
    let quote = reader.next().expect("string token has an opening quote");
    let mut out = String::new();

    loop {
        let bs_loc = reader.locate();
        let c = match reader.next() {
            Some(c) => c,
            None => break,
        };
        if c == quote {
            break;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        decode_escape(&mut reader, dialect, bs_loc, &mut out)?;
    }
    Ok(out)
}

fn decode_escape(
    reader: &mut CharReader,
    dialect: Dialect,
    bs_loc: Location,
    out: &mut String,
) -> Result<(), Error> {
    let json5 = dialect.is_json5();
    match reader.next() {
        Some('"') => out.push('"'),
        Some('\\') => out.push('\\'),
        Some('/') => out.push('/'),
        Some('b') => out.push('\u{8}'),
        Some('f') => out.push('\u{c}'),
        Some('n') => out.push('\n'),
        Some('r') => out.push('\r'),
        Some('t') => out.push('\t'),
        Some('\'') if json5 => out.push('\''),
        Some('v') if json5 => out.push('\u{b}'),
        Some('0') if json5 => out.push('\0'),
        // Line continuations: the escaped terminator contributes nothing
        // to the decoded value. `\r\n` is merged by the reader already.
        Some(c) if json5 && matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') => {}
        Some('x') if json5 => {
            let value = read_hex_digits(reader, bs_loc, 2)?;
            out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
        }
        Some('u') => {
            let code = read_hex_digits(reader, bs_loc, 4)?;
            out.push(decode_code_unit(reader, code));
        }
        Some(other) => {
            if json5 {
                out.push(other);
            } else {
                return Err(Error::new(ErrorKind::InvalidEscape(other), bs_loc));
            }
        }
        None => return Err(Error::new(ErrorKind::UnexpectedEof, bs_loc)),
    }
    Ok(())
}

/// Combine a possibly-surrogate `\u` code unit with a following low
/// surrogate escape, the way UTF-16-derived JSON encodes astral scalars
/// as a pair of `\uXXXX` escapes. A lone surrogate (no matching partner)
/// decodes to U+FFFD rather than producing an invalid `char`.
fn decode_code_unit(reader: &mut CharReader, code: u32) -> char {
    if (0xD800..=0xDBFF).contains(&code) {
        let mut probe = reader.clone();
        if probe.peek() == Some('\\') {
            probe.next();
            if probe.peek() == Some('u') {
                probe.next();
                if let Ok(low) = read_hex_digits(&mut probe, probe.locate(), 4) {
                    if (0xDC00..=0xDFFF).contains(&low) {
                        *reader = probe;
                        let scalar = 0x10000 + (code - 0xD800) * 0x400 + (low - 0xDC00);
                        return char::from_u32(scalar).unwrap_or('\u{FFFD}');
                    }
                }
            }
        }
        '\u{FFFD}'
    } else if (0xDC00..=0xDFFF).contains(&code) {
        '\u{FFFD}'
    } else {
        char::from_u32(code).unwrap_or('\u{FFFD}')
    }
}

fn read_hex_digits(reader: &mut CharReader, bs_loc: Location, count: usize) -> Result<u32, Error> {
    let mut hex = String::with_capacity(count);
    for _ in 0..count {
        match reader.next() {
            Some(c) if c.is_ascii_hexdigit() => hex.push(c),
            _ => return Err(Error::new(ErrorKind::InvalidUnicodeEscape(hex), bs_loc)),
        }
    }
    u32::from_str_radix(&hex, 16).map_err(|_| Error::new(ErrorKind::InvalidUnicodeEscape(hex), bs_loc))
}

/// Decode an `Identifier` token's raw text, expanding any `\uXXXX`
/// sequences to the characters they spell (identifiers carry no other
/// escape syntax).
pub(crate) fn decode_identifier(src: &SourceBuf, token: &Token) -> String {
    let mut reader = src.reader_at(token.char_start, token.loc.start);
    let mut out = String::new();
    while let Some(c) = reader.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        reader.next(); // the 'u'
        let bs_loc = reader.locate();
        match read_hex_digits(&mut reader, bs_loc, 4) {
            Ok(code) => out.push(decode_code_unit(&mut reader, code)),
            Err(_) => {
                // The lexer already validated this escape when it built
                // the identifier run; this can't happen for a well-formed
                // token, but fall back to the literal text rather than
                // dropping characters.
                out.push('u');
            }
        }
    }
    out
}

/// Decode a `Number` token's raw text into its `f64` value, per the
/// dialect's literal grammar (hex integers and a leading/trailing `.`
/// are JSON5-only, but both are recognized unconditionally here since the
/// lexer only ever produces this text when the dialect allows it).
pub(crate) fn decode_number(text: &str) -> f64 {
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'+') => (1.0, &text[1..]),
        Some(b'-') => (-1.0, &text[1..]),
        _ => (1.0, text),
    };
    if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        let mut value = 0.0f64;
        for c in hex.chars() {
            let digit = c.to_digit(16).expect("lexer validated hex digits");
            value = value * 16.0 + digit as f64;
        }
        return sign * value;
    }
    sign * rest.parse::<f64>().expect("lexer validated number syntax")
}
