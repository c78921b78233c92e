//! Best-effort printf-style message formatting
//!
//! Directives have the form `%[flags][width][.precision]verb` and are
//! substituted in order from the argument list. Arguments are taken through
//! their `Display` output, so numeric verbs accept anything that renders as
//! a number. Mistakes in the template never panic: they are rendered inline
//! with a `%!` marker so the line still reaches the sink.
//!
//! | Verb            | Renders                                          |
//! |-----------------|--------------------------------------------------|
//! | `%v`            | the argument as displayed                        |
//! | `%s`            | the argument, truncated to the precision         |
//! | `%q`            | double-quoted string, or quoted char for integers|
//! | `%t`            | `true` / `false`                                 |
//! | `%d`            | base 10 integer                                  |
//! | `%b` `%o`       | base 2 / base 8 integer                          |
//! | `%x` `%X`       | base 16 integer, or hex of the text's bytes      |
//! | `%f` `%F`       | decimal float, precision 6 by default            |
//! | `%e` `%E`       | scientific float, precision 6 by default         |
//!
//! Flags: `-` left-justify, `+` always sign, ` ` space for sign, `0` zero
//! padding, `#` alternate form (`0x`, `0b`, leading `0`).
//!
//! | Input                     | Output                 |
//! |---------------------------|------------------------|
//! | `%%`                      | `%`                    |
//! | `%d` with `"abc"`         | `%!d(abc)`             |
//! | `%z` (unknown verb)       | `%!z(<arg>)`           |
//! | verb with no argument     | `%!v(MISSING)`         |
//! | trailing `%`              | `%!(NOVERB)`           |
//! | unused arguments          | `%!(EXTRA a, b)`       |

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::iter::Peekable;
use std::str::Chars;

/// Positional argument accepted by [`format_message`]
pub type Arg<'a> = &'a dyn fmt::Display;

/// Widths and precisions above this are ignored
const MAX_WIDTH: usize = 1_000_000;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Flags, width and precision of one `%` directive
#[derive(Debug, Default)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// One rendered substitution: sign/prefix and digits are kept apart so zero
/// padding lands between them
struct Field {
    lead: String,
    body: String,
}

impl Field {
    fn plain(body: String) -> Self {
        Self {
            lead: String::new(),
            body,
        }
    }
}

/// Substitute `args` into `template`.
///
/// With no arguments the template is returned unchanged, `%` sequences
/// included.
pub fn format_message<'t>(template: &'t str, args: &[Arg<'_>]) -> Cow<'t, str> {
    if args.is_empty() {
        return Cow::Borrowed(template);
    }

    let mut result = String::with_capacity(template.len() + args.len() * 8);
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            result.push(ch);
            continue;
        }

        let directive = parse_directive(&mut chars);
        let verb = match chars.next() {
            Some('%') => {
                result.push('%');
                continue;
            }
            Some(verb) => verb,
            None => {
                result.push_str("%!(NOVERB)");
                break;
            }
        };

        let Some(arg) = remaining.next() else {
            let _ = write!(result, "%!{}(MISSING)", verb);
            continue;
        };

        match render_field(&directive, verb, *arg) {
            Some(field) => pad(&mut result, &directive, &field),
            None => {
                let _ = write!(result, "%!{}({})", verb, arg);
            }
        }
    }

    let extra: Vec<String> = remaining.map(|arg| arg.to_string()).collect();
    if !extra.is_empty() {
        let _ = write!(result, "%!(EXTRA {})", extra.join(", "));
    }

    Cow::Owned(result)
}

/// Append `params` to `message`, each preceded by a single space.
pub fn append_params(message: &str, params: &[Arg<'_>]) -> String {
    let mut result = String::from(message);
    for param in params {
        let _ = write!(result, " {}", param);
    }
    result
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Directive {
    let mut directive = Directive::default();
    while let Some(&flag) = chars.peek() {
        match flag {
            '-' => directive.minus = true,
            '+' => directive.plus = true,
            ' ' => directive.space = true,
            '0' => directive.zero = true,
            '#' => directive.sharp = true,
            _ => break,
        }
        chars.next();
    }

    directive.width = parse_number(chars);
    if chars.peek() == Some(&'.') {
        chars.next();
        directive.precision = Some(parse_number(chars).unwrap_or(0));
    }
    directive
}

/// Consume a run of digits; `None` when absent or above [`MAX_WIDTH`]
fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let next = value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize);
        value = Some(next);
    }
    value.filter(|&n| n <= MAX_WIDTH)
}

/// Render `arg` for `verb`, or `None` if the verb does not apply to it
fn render_field(directive: &Directive, verb: char, arg: Arg<'_>) -> Option<Field> {
    let rendered = arg.to_string();
    let field = match verb {
        'v' => Field::plain(rendered),
        's' => Field::plain(truncate(rendered, directive.precision)),
        'q' => match rendered.parse::<u32>().ok().and_then(char::from_u32) {
            Some(c) => Field::plain(format!("{:?}", c)),
            None => Field::plain(format!("{:?}", truncate(rendered, directive.precision))),
        },
        't' if rendered == "true" || rendered == "false" => Field::plain(rendered),
        'd' | 'b' | 'o' => format_integer(directive, rendered.parse().ok()?, verb),
        'x' | 'X' => match rendered.parse::<i128>() {
            Ok(value) => format_integer(directive, value, verb),
            Err(_) => format_hex_bytes(directive, &rendered, verb == 'X'),
        },
        'f' | 'F' | 'e' | 'E' => format_float(directive, rendered.parse().ok()?, verb),
        _ => return None,
    };
    Some(field)
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(limit) if text.chars().count() > limit => text.chars().take(limit).collect(),
        _ => text,
    }
}

fn sign(directive: &Directive, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if directive.plus {
        "+"
    } else if directive.space {
        " "
    } else {
        ""
    }
}

fn format_integer(directive: &Directive, value: i128, verb: char) -> Field {
    let magnitude = value.unsigned_abs();
    let mut digits = match verb {
        'b' => format!("{:b}", magnitude),
        'o' => format!("{:o}", magnitude),
        'x' => format!("{:x}", magnitude),
        'X' => format!("{:X}", magnitude),
        _ => magnitude.to_string(),
    };
    if let Some(precision) = directive.precision {
        if digits.len() < precision {
            digits.insert_str(0, &"0".repeat(precision - digits.len()));
        }
    }

    let prefix = match verb {
        _ if !directive.sharp => "",
        'b' => "0b",
        'o' if !digits.starts_with('0') => "0",
        'x' => "0x",
        'X' => "0X",
        _ => "",
    };

    Field {
        lead: format!("{}{}", sign(directive, value < 0), prefix),
        body: digits,
    }
}

fn format_hex_bytes(directive: &Directive, text: &str, upper: bool) -> Field {
    let mut body = String::with_capacity(text.len() * 2);
    for byte in text.bytes() {
        let _ = if upper {
            write!(body, "{:02X}", byte)
        } else {
            write!(body, "{:02x}", byte)
        };
    }
    let lead = match (directive.sharp, upper) {
        (false, _) => "",
        (true, false) => "0x",
        (true, true) => "0X",
    };
    Field {
        lead: lead.to_string(),
        body,
    }
}

fn format_float(directive: &Directive, value: f64, verb: char) -> Field {
    if value.is_nan() {
        return Field {
            lead: sign(directive, false).to_string(),
            body: "NaN".to_string(),
        };
    }

    let negative = value.is_sign_negative();
    if value.is_infinite() {
        let lead = if negative { "-" } else { "+" };
        return Field {
            lead: lead.to_string(),
            body: "Inf".to_string(),
        };
    }

    let precision = directive.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
    let body = match verb {
        'e' | 'E' => format_exponent(value.abs(), precision, verb == 'E'),
        _ => format!("{:.*}", precision, value.abs()),
    };
    Field {
        lead: sign(directive, negative).to_string(),
        body,
    }
}

/// `1.500000e+03` style: signed exponent of at least two digits
fn format_exponent(value: f64, precision: usize, upper: bool) -> String {
    let formatted = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let (exp_sign, exp_digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    let marker = if upper { 'E' } else { 'e' };
    format!("{}{}{}{:0>2}", mantissa, marker, exp_sign, exp_digits)
}

fn pad(out: &mut String, directive: &Directive, field: &Field) {
    let len = field.lead.chars().count() + field.body.chars().count();
    let fill = directive.width.map_or(0, |width| width.saturating_sub(len));

    if directive.minus {
        out.push_str(&field.lead);
        out.push_str(&field.body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if directive.zero {
        out.push_str(&field.lead);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(&field.body);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(&field.lead);
        out.push_str(&field.body);
    }
}
