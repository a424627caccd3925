//! Component E: serialize an AST back to text.
//!
//! The printer is source-agnostic: it never tries to reproduce the
//! original spelling (single quotes, hex numbers, trailing commas), only
//! the value the AST carries.

use crate::ast::{Array, Boolean, Identifier, Infinity, MemberName, Null, NaN, Number, Object, StringNode, ValueNode};

#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    pub indent: u32,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self { indent: 0 }
    }
}

/// Print `node` per `options`. `indent == 0` is compact; `indent > 0`
/// inserts `indent` spaces per nesting level and a newline between items.
pub fn print(node: &ValueNode, options: PrintOptions) -> String {
    let mut out = String::new();
    write_value(&mut out, node, &options, 0);
    out
}

fn write_indent(out: &mut String, options: &PrintOptions, depth: u32) {
    if options.indent > 0 {
        out.push('\n');
        for _ in 0..(options.indent * depth) {
            out.push(' ');
        }
    }
}

fn write_value(out: &mut String, node: &ValueNode, options: &PrintOptions, depth: u32) {
    match node {
        ValueNode::Object(n) => write_object(out, n, options, depth),
        ValueNode::Array(n) => write_array(out, n, options, depth),
        ValueNode::String(n) => write_string(out, n),
        ValueNode::Number(n) => write_number(out, n),
        ValueNode::Boolean(n) => write_boolean(out, n),
        ValueNode::Null(n) => write_null(out, n),
        ValueNode::Identifier(n) => write_identifier(out, n),
        ValueNode::NaN(n) => write_nan(out, n),
        ValueNode::Infinity(n) => write_infinity(out, n),
    }
}

fn write_null(out: &mut String, _: &Null) {
    out.push_str("null");
}

fn write_boolean(out: &mut String, n: &Boolean) {
    out.push_str(if n.value { "true" } else { "false" });
}

fn write_number(out: &mut String, n: &Number) {
    out.push_str(&format_number(n.value));
}

/// ECMA-262 `Number#toString` style: no trailing `.0` on integral values,
/// `0` for both `+0` and `-0`, and scientific notation only outside the
/// printable range (`|x| >= 1e21` or a nonzero `|x| < 1e-6`).
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let abs = value.abs();
    if abs >= 1e21 || abs < 1e-6 {
        format_exponential(value)
    } else if value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// `d`, `d.ddd`, or `d.ddde±n` depending on the mantissa, matching JS's
/// `e+n`/`e-n` exponent spelling (Rust's `{:e}` omits the `+`).
fn format_exponential(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().expect("Rust's {:e} always emits a valid exponent");
            if exp >= 0 {
                format!("{mantissa}e+{exp}")
            } else {
                format!("{mantissa}e{exp}")
            }
        }
        None => text,
    }
}

fn write_nan(out: &mut String, n: &NaN) {
    out.push_str(n.sign.as_str());
    out.push_str("NaN");
}

fn write_infinity(out: &mut String, n: &Infinity) {
    out.push_str(n.sign.as_str());
    out.push_str("Infinity");
}

fn write_identifier(out: &mut String, n: &Identifier) {
    out.push_str(&n.name);
}

fn write_string(out: &mut String, n: &StringNode) {
    out.push('"');
    for c in n.value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            '\0' => out.push_str("\\0"),
            c if (c as u32) <= 0x1F || c == '\u{7F}' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_object(out: &mut String, n: &Object, options: &PrintOptions, depth: u32) {
    out.push('{');
    let child_depth = depth + 1;
    for (i, member) in n.members.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_indent(out, options, child_depth);
        match &member.name {
            MemberName::String(s) => write_string(out, s),
            MemberName::Identifier(id) => write_identifier(out, id),
        }
        out.push(':');
        if options.indent > 0 {
            out.push(' ');
        }
        write_value(out, &member.value, options, child_depth);
    }
    if !n.members.is_empty() {
        write_indent(out, options, depth);
    }
    out.push('}');
}

fn write_array(out: &mut String, n: &Array, options: &PrintOptions, depth: u32) {
    out.push('[');
    let child_depth = depth + 1;
    for (i, element) in n.elements.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_indent(out, options, child_depth);
        write_value(out, &element.value, options, child_depth);
    }
    if !n.elements.is_empty() {
        write_indent(out, options, depth);
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseOptions};

    fn print_text(text: &str) -> String {
        let doc = parse(text, ParseOptions::default()).unwrap();
        print(&doc.body, PrintOptions::default())
    }

    #[test]
    fn compact_object_round_trips_shape() {
        assert_eq!(print_text(r#"{"foo":1,"bar":true}"#), r#"{"foo":1,"bar":true}"#);
    }

    #[test]
    fn null_and_booleans() {
        assert_eq!(print_text("null"), "null");
        assert_eq!(print_text("true"), "true");
        assert_eq!(print_text("false"), "false");
    }

    #[test]
    fn integral_numbers_have_no_trailing_dot_zero() {
        assert_eq!(print_text("1"), "1");
        assert_eq!(print_text("1.5"), "1.5");
    }

    #[test]
    fn negative_zero_prints_as_plain_zero() {
        assert_eq!(print_text("-0"), "0");
        assert_eq!(print_text("0"), "0");
    }

    #[test]
    fn magnitudes_at_or_above_1e21_use_exponential_notation() {
        assert_eq!(print_text("1e21"), "1e+21");
        assert_eq!(print_text("1.5e21"), "1.5e+21");
    }

    #[test]
    fn nonzero_magnitudes_below_1e_minus_6_use_exponential_notation() {
        assert_eq!(print_text("1e-7"), "1e-7");
    }

    #[test]
    fn magnitudes_inside_the_printable_range_stay_in_fixed_notation() {
        assert_eq!(print_text("1e20"), "100000000000000000000");
        assert_eq!(print_text("1e-6"), "0.000001");
    }

    #[test]
    fn control_characters_are_escaped() {
        let doc = parse(r#""a\tb""#, ParseOptions::default()).unwrap();
        assert_eq!(print(&doc.body, PrintOptions::default()), r#""a\tb""#);
    }

    #[test]
    fn indented_output_uses_newlines_and_a_space_after_colon() {
        let doc = parse(r#"{"a":1}"#, ParseOptions::default()).unwrap();
        assert_eq!(print(&doc.body, PrintOptions { indent: 2 }), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn empty_containers_print_without_interior_whitespace() {
        let doc = parse("{}", ParseOptions::default()).unwrap();
        assert_eq!(print(&doc.body, PrintOptions { indent: 2 }), "{}");
        let doc = parse("[]", ParseOptions::default()).unwrap();
        assert_eq!(print(&doc.body, PrintOptions { indent: 2 }), "[]");
    }

    #[test]
    fn printed_output_reparses_to_the_same_shape() {
        let doc = parse(r#"{"a":[1,2,"x"],"b":null}"#, ParseOptions::default()).unwrap();
        let printed = print(&doc.body, PrintOptions { indent: 2 });
        let reparsed = parse(&printed, ParseOptions::default()).unwrap();
        assert_eq!(print(&doc.body, PrintOptions::default()), print(&reparsed.body, PrintOptions::default()));
    }
}
