//! Component G: ID_Start / ID_Continue membership for JSON5 identifiers.
//!
//! The distilled spec's lexer shipped these tables as a regex or a
//! hand-maintained range list; this crate instead calls the `unicode-ident`
//! crate (the same compile-time bitset approach `syn`/`proc-macro2` use
//! for Rust identifiers), which is the "call an existing Unicode library"
//! option the component's contract explicitly allows, and layers the
//! JSON5-specific additions (`$`, `_`, the escape sigil, ZWNJ/ZWJ) on top.
//! Membership is `const`-backed, so it costs nothing to check per call and
//! never loads anything at runtime.

/// JSON5 `IdentifierStart`: `$`, `_`, the zero-width joiner/non-joiner, a
/// Unicode `ID_Start` codepoint, or (handled by the lexer itself, not
/// here) an escaped `\uXXXX` whose decoded scalar satisfies this
/// predicate.
pub fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_start(c)
}

/// JSON5 `IdentifierPart`: everything `is_id_start` allows, plus ASCII
/// digits, `ID_Continue` codepoints, and the zero-width joiner/non-joiner.
pub fn is_id_continue(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_letters_and_sigils_start_identifiers() {
        assert!(is_id_start('a'));
        assert!(is_id_start('Z'));
        assert!(is_id_start('$'));
        assert!(is_id_start('_'));
    }

    #[test]
    fn digits_do_not_start_identifiers_but_do_continue_them() {
        assert!(!is_id_start('9'));
        assert!(is_id_continue('9'));
    }

    #[test]
    fn zero_width_joiners_start_and_continue_identifiers() {
        assert!(is_id_start('\u{200C}'));
        assert!(is_id_continue('\u{200C}'));
        assert!(is_id_start('\u{200D}'));
        assert!(is_id_continue('\u{200D}'));
    }

    #[test]
    fn non_identifier_punctuation_is_rejected() {
        assert!(!is_id_start('-'));
        assert!(!is_id_continue('-'));
        assert!(!is_id_start('{'));
    }
}
