//! The `[[fill]align][sign][#][0][width][,|_][.precision][type]` format spec.

use serde_json::{Number, Value};

use super::number;
use crate::error::FormatError;
use crate::pretty::repr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    AfterSign,
}

impl Align {
    const fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            '=' => Some(Self::AfterSign),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
    Space,
}

/// A parsed format spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FormatSpec {
    fill: char,
    align: Option<Align>,
    sign: Option<Sign>,
    alternate: bool,
    zero: bool,
    width: Option<usize>,
    grouping: Option<char>,
    precision: Option<usize>,
    kind: Option<char>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            sign: None,
            alternate: false,
            zero: false,
            width: None,
            grouping: None,
            precision: None,
            kind: None,
        }
    }
}

/// A number narrowed to the representation the spec works on.
enum Numeric {
    Int(i128),
    Float(f64),
}

fn take_digits(chars: &[char], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == start {
        return None;
    }
    chars[start..*pos].iter().collect::<String>().parse().ok()
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn numeric(number: &Number) -> Numeric {
    if let Some(int) = number.as_i64() {
        Numeric::Int(i128::from(int))
    } else if let Some(int) = number.as_u64() {
        Numeric::Int(i128::from(int))
    } else {
        Numeric::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

/// Inserts `separator` every `every` digits, counting from the right.
fn group_digits(digits: &str, separator: char, every: usize) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / every);
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (len - index) % every == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

impl FormatSpec {
    /// Parses the text following `:` in a replacement field.
    pub(crate) fn parse(spec: &str) -> Result<Self, FormatError> {
        let chars: Vec<char> = spec.chars().collect();
        let mut parsed = Self::default();
        let mut pos = 0;

        if chars.len() >= 2
            && let Some(align) = Align::from_char(chars[1])
        {
            parsed.fill = chars[0];
            parsed.align = Some(align);
            pos = 2;
        } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
            parsed.align = Some(align);
            pos = 1;
        }

        if let Some(&c) = chars.get(pos) {
            parsed.sign = match c {
                '+' => Some(Sign::Plus),
                '-' => Some(Sign::Minus),
                ' ' => Some(Sign::Space),
                _ => None,
            };
            if parsed.sign.is_some() {
                pos += 1;
            }
        }

        if chars.get(pos) == Some(&'#') {
            parsed.alternate = true;
            pos += 1;
        }

        if chars.get(pos) == Some(&'0') {
            parsed.zero = true;
            pos += 1;
        }

        parsed.width = take_digits(&chars, &mut pos);

        if let Some(&c @ (',' | '_')) = chars.get(pos) {
            parsed.grouping = Some(c);
            pos += 1;
        }

        if chars.get(pos) == Some(&'.') {
            pos += 1;
            parsed.precision = Some(
                take_digits(&chars, &mut pos)
                    .ok_or_else(|| FormatError::spec("Format specifier missing precision"))?,
            );
        }

        match &chars[pos..] {
            [] => {}
            [kind] if "sdboxXceEfFgG%n".contains(*kind) => parsed.kind = Some(*kind),
            _ => return Err(FormatError::spec(format!("Invalid format specifier '{spec}'"))),
        }

        if parsed.zero && parsed.align.is_none() {
            parsed.fill = '0';
            parsed.align = Some(Align::AfterSign);
        }
        Ok(parsed)
    }

    /// Formats `value` according to the spec.
    pub(crate) fn apply(&self, value: &Value) -> Result<String, FormatError> {
        match value {
            Value::String(text) => self.apply_str(text, "str"),
            Value::Number(number) => self.apply_number(numeric(number), value_type_name(value)),
            Value::Bool(flag) => match self.kind {
                None | Some('s') => self.apply_str(&repr::print_repr(value), "bool"),
                Some(_) => self.apply_number(Numeric::Int(i128::from(*flag)), "bool"),
            },
            Value::Null | Value::Array(_) | Value::Object(_) => {
                self.apply_str(&repr::print_repr(value), value_type_name(value))
            }
        }
    }

    fn apply_str(&self, text: &str, type_name: &str) -> Result<String, FormatError> {
        if let Some(kind) = self.kind.filter(|kind| *kind != 's') {
            return Err(FormatError::incompatible(format!(
                "Unknown format code '{kind}' for object of type '{type_name}'"
            )));
        }
        if self.sign.is_some() {
            return Err(FormatError::incompatible(
                "Sign not allowed in string format specifier",
            ));
        }
        if self.alternate {
            return Err(FormatError::incompatible(
                "Alternate form (#) not allowed in string format specifier",
            ));
        }
        if self.align == Some(Align::AfterSign) && !self.zero {
            return Err(FormatError::incompatible(
                "'=' alignment not allowed in string format specifier",
            ));
        }
        let body: String = match self.precision {
            Some(limit) => text.chars().take(limit).collect(),
            None => text.to_owned(),
        };
        let align = match self.align {
            Some(Align::AfterSign) | None => Align::Left,
            Some(align) => align,
        };
        Ok(self.pad("", &body, align, self.fill))
    }

    fn apply_number(&self, number: Numeric, type_name: &str) -> Result<String, FormatError> {
        match (number, self.kind) {
            (Numeric::Int(int), None | Some('d' | 'n' | 'b' | 'o' | 'x' | 'X' | 'c')) => {
                if self.precision.is_some() {
                    return Err(FormatError::incompatible(
                        "Precision not allowed in integer format specifier",
                    ));
                }
                self.apply_int(int)
            }
            (Numeric::Int(int), Some(kind @ ('e' | 'E' | 'f' | 'F' | 'g' | 'G' | '%'))) => {
                self.apply_float(int as f64, Some(kind))
            }
            (Numeric::Float(float), None | Some('e' | 'E' | 'f' | 'F' | 'g' | 'G' | '%' | 'n')) => {
                self.apply_float(float, self.kind.filter(|kind| *kind != 'n'))
            }
            (_, Some(kind)) => Err(FormatError::incompatible(format!(
                "Unknown format code '{kind}' for object of type '{type_name}'"
            ))),
        }
    }

    fn apply_int(&self, int: i128) -> Result<String, FormatError> {
        let magnitude = int.unsigned_abs();
        if self.kind == Some('c') {
            if self.sign.is_some() {
                return Err(FormatError::incompatible(
                    "Sign not allowed with integer format specifier 'c'",
                ));
            }
            let c = u32::try_from(int)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| FormatError::incompatible(format!("%c arg not in range: {int}")))?;
            let align = self.align.unwrap_or(Align::Right);
            return Ok(self.pad("", &c.to_string(), align, self.fill));
        }

        let (digits, prefix, group_every) = match self.kind {
            Some('b') => (format!("{magnitude:b}"), "0b", 4),
            Some('o') => (format!("{magnitude:o}"), "0o", 4),
            Some('x') => (format!("{magnitude:x}"), "0x", 4),
            Some('X') => (format!("{magnitude:X}"), "0X", 4),
            _ => (magnitude.to_string(), "", 3),
        };
        let digits = match self.grouping {
            Some(',') if group_every == 4 => {
                return Err(FormatError::incompatible("Cannot specify ',' with this format code"));
            }
            Some(separator) => group_digits(&digits, separator, group_every),
            None => digits,
        };
        let mut lead = self.sign_text(int < 0).to_owned();
        if self.alternate {
            lead.push_str(prefix);
        }
        Ok(self.pad(&lead, &digits, self.align.unwrap_or(Align::Right), self.fill))
    }

    fn apply_float(&self, float: f64, kind: Option<char>) -> Result<String, FormatError> {
        let precision = self.precision.unwrap_or(6);
        let negative = float.is_sign_negative() && !float.is_nan();
        let body = match kind {
            Some('f') => number::fixed(float, precision, false, self.alternate),
            Some('F') => number::fixed(float, precision, true, self.alternate),
            Some('e') => number::exponent(float, precision, false, self.alternate),
            Some('E') => number::exponent(float, precision, true, self.alternate),
            Some('g') => number::general(float, precision, false, self.alternate),
            Some('G') => number::general(float, precision, true, self.alternate),
            Some('%') => {
                let mut text = number::fixed(float * 100.0, precision, false, self.alternate);
                text.push('%');
                text
            }
            _ => match self.precision {
                Some(precision) => number::general_with_point(float.abs(), precision),
                None => number::float_repr(float.abs()),
            },
        };
        let body = match self.grouping {
            Some(separator) if float.is_finite() => {
                let split = body.find(|c: char| !c.is_ascii_digit()).unwrap_or(body.len());
                let (int_part, rest) = body.split_at(split);
                format!("{}{rest}", group_digits(int_part, separator, 3))
            }
            _ => body,
        };
        let lead = self.sign_text(negative);
        Ok(self.pad(lead, &body, self.align.unwrap_or(Align::Right), self.fill))
    }

    const fn sign_text(&self, negative: bool) -> &'static str {
        match (negative, self.sign) {
            (true, _) => "-",
            (false, Some(Sign::Plus)) => "+",
            (false, Some(Sign::Space)) => " ",
            (false, Some(Sign::Minus) | None) => "",
        }
    }

    fn pad(&self, lead: &str, body: &str, align: Align, fill: char) -> String {
        let used = lead.chars().count() + body.chars().count();
        let missing = self.width.map_or(0, |width| width.saturating_sub(used));
        let filler = |count: usize| std::iter::repeat_n(fill, count).collect::<String>();
        match align {
            Align::Left => format!("{lead}{body}{}", filler(missing)),
            Align::Right => format!("{}{lead}{body}", filler(missing)),
            Align::Center => {
                let before = missing / 2;
                format!("{}{lead}{body}{}", filler(before), filler(missing - before))
            }
            Align::AfterSign => format!("{lead}{}{body}", filler(missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(spec: &str, value: Value) -> String {
        FormatSpec::parse(spec).unwrap().apply(&value).unwrap()
    }

    #[test]
    fn strings_align_left_by_default() {
        assert_eq!(render("6", json!("ab")), "ab    ");
        assert_eq!(render(">6", json!("ab")), "    ab");
        assert_eq!(render("*^7", json!("ab")), "**ab***");
        assert_eq!(render(".3", json!("abcdef")), "abc");
    }

    #[test]
    fn integers_align_right_by_default() {
        assert_eq!(render("5", json!(42)), "   42");
        assert_eq!(render("05", json!(-42)), "-0042");
        assert_eq!(render("+d", json!(7)), "+7");
        assert_eq!(render(",", json!(1234567)), "1,234,567");
        assert_eq!(render("_x", json!(0xdead_beef_u32)), "dead_beef");
    }

    #[test]
    fn integer_bases_honour_alternate_form() {
        assert_eq!(render("#b", json!(5)), "0b101");
        assert_eq!(render("#o", json!(8)), "0o10");
        assert_eq!(render("#X", json!(255)), "0XFF");
        assert_eq!(render("c", json!(65)), "A");
    }

    #[test]
    fn floats_render_per_type() {
        assert_eq!(render(".2f", json!(3.14159)), "3.14");
        assert_eq!(render("e", json!(1234.5)), "1.234500e+03");
        assert_eq!(render("g", json!(0.00001)), "1e-05");
        assert_eq!(render(".1%", json!(0.256)), "25.6%");
        assert_eq!(render("", json!(2.5)), "2.5");
        assert_eq!(render(".3", json!(3.0)), "3.0");
        assert_eq!(render("8.2f", json!(-1.5)), "   -1.50");
        assert_eq!(render(",.1f", json!(1234567.25)), "1,234,567.2");
    }

    #[test]
    fn integers_accept_float_types() {
        assert_eq!(render(".1f", json!(3)), "3.0");
    }

    #[test]
    fn booleans_print_or_count() {
        assert_eq!(render("", json!(true)), "true");
        assert_eq!(render("d", json!(true)), "1");
    }

    #[test]
    fn containers_are_formatted_as_their_repr() {
        assert_eq!(render("", json!([1, 2])), "[1, 2]");
        assert_eq!(render("<8", json!(null)), "null    ");
    }

    #[test]
    fn incompatible_types_are_rejected() {
        let spec = FormatSpec::parse("d").unwrap();
        let err = spec.apply(&json!("text")).unwrap_err();
        assert_eq!(err.kind(), crate::FormatErrorKind::IncompatibleType);
        assert!(FormatSpec::parse("s").unwrap().apply(&json!(1)).is_err());
        assert!(FormatSpec::parse(".2").unwrap().apply(&json!(1)).is_err());
        assert!(FormatSpec::parse("+").unwrap().apply(&json!("x")).is_err());
    }

    #[test]
    fn malformed_specs_are_rejected() {
        for spec in ["abc", "10.", "dd", ".x"] {
            let err = FormatSpec::parse(spec).unwrap_err();
            assert_eq!(err.kind(), crate::FormatErrorKind::InvalidSpec, "{spec}");
        }
    }
}
