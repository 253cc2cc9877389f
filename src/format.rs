//! Composite format strings such as `Total: {0:N2}`.
//!
//! A format item is `{index[,alignment][:spec]}`; `{{` and `}}` produce
//! literal braces. Supported specs (case of the letter is kept where it
//! matters):
//!
//! * `N[p]` grouped number, default 2 decimals
//! * `F[p]` fixed point, default 2 decimals
//! * `D[p]` integer, zero-padded to `p` digits
//! * `X[p]` / `x[p]` hexadecimal integer, zero-padded to `p` digits
//! * `P[p]` percentage, default 2 decimals
//! * `E[p]` / `e[p]` exponent notation, default 6 decimals
//! * `G` or no spec: plain display

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Largest alignment width or precision a format item may request.
pub const MAX_FORMAT_WIDTH: usize = 1024;

static FORMAT_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{(\d+)(?:,(-?\d+))?(?::([^{}]*))?\}")
        .expect("format item pattern is valid")
});

/// Expands every format item of `format` with the matching argument.
///
/// # Returns
/// * `Result<String>` - `Error::Format` for unbalanced braces, a missing
///   argument or a spec that does not fit the argument
pub fn format_composite(format: &str, args: &[Value]) -> Result<String> {
    let mut output = String::with_capacity(format.len());
    let mut last = 0;

    for caps in FORMAT_ITEM.captures_iter(format) {
        let Some(whole) = caps.get(0) else { continue };
        push_literal(&mut output, &format[last..whole.start()])?;
        last = whole.end();

        match whole.as_str() {
            "{{" => output.push('{'),
            "}}" => output.push('}'),
            _ => {
                let index: usize = caps[1]
                    .parse()
                    .map_err(|_| Error::Format(format!("invalid index in '{}'", whole.as_str())))?;
                let arg = args.get(index).ok_or_else(|| {
                    Error::Format(format!("no argument for index {index} in '{format}'"))
                })?;
                let text = format_value(arg, caps.get(3).map(|m| m.as_str()))?;
                let alignment = match caps.get(2) {
                    Some(m) => m.as_str().parse::<i64>().map_err(|_| {
                        Error::Format(format!("invalid alignment in '{}'", whole.as_str()))
                    })?,
                    None => 0,
                };
                check_width(alignment.unsigned_abs(), whole.as_str())?;
                output.push_str(&align(text, alignment));
            }
        }
    }
    push_literal(&mut output, &format[last..])?;
    Ok(output)
}

fn push_literal(output: &mut String, literal: &str) -> Result<()> {
    if literal.contains(['{', '}']) {
        return Err(Error::Format(format!("unbalanced brace in '{literal}'")));
    }
    output.push_str(literal);
    Ok(())
}

fn check_width(width: u64, item: &str) -> Result<()> {
    if width > MAX_FORMAT_WIDTH as u64 {
        return Err(Error::Format(format!(
            "width {width} in '{item}' exceeds the limit of {MAX_FORMAT_WIDTH}"
        )));
    }
    Ok(())
}

fn align(text: String, alignment: i64) -> String {
    let width = alignment.unsigned_abs() as usize;
    if alignment < 0 {
        format!("{text:<width$}")
    } else {
        format!("{text:>width$}")
    }
}

/// Formats a single value with an optional spec.
pub fn format_value(value: &Value, spec: Option<&str>) -> Result<String> {
    let spec = spec.map(str::trim).unwrap_or_default();
    let Some(code) = spec.chars().next() else {
        return Ok(display(value));
    };
    let precision = match &spec[code.len_utf8()..] {
        "" => None,
        digits => Some(digits.parse::<usize>().map_err(|_| {
            Error::Format(format!("unsupported format spec '{spec}'"))
        })?),
    };
    if let Some(precision) = precision {
        check_width(precision as u64, spec)?;
    }

    match code {
        'G' | 'g' => Ok(display(value)),
        'N' | 'n' => {
            let number = numeric(value, spec)?;
            Ok(group_thousands(&format!("{:.*}", precision.unwrap_or(2), number)))
        }
        'F' | 'f' => Ok(format!("{:.*}", precision.unwrap_or(2), numeric(value, spec)?)),
        'P' | 'p' => {
            let number = numeric(value, spec)? * 100.0;
            Ok(format!("{}%", group_thousands(&format!("{:.*}", precision.unwrap_or(2), number))))
        }
        'E' | 'e' => Ok(exponent(numeric(value, spec)?, precision.unwrap_or(6), code == 'E')),
        'D' | 'd' => {
            let number = integer(value, spec)?;
            let width = precision.unwrap_or(0);
            let digits = format!("{:0width$}", number.unsigned_abs());
            Ok(if number < 0 { format!("-{digits}") } else { digits })
        }
        'X' => Ok(format!("{:0width$X}", integer(value, spec)?, width = precision.unwrap_or(0))),
        'x' => Ok(format!("{:0width$x}", integer(value, spec)?, width = precision.unwrap_or(0))),
        _ => Err(Error::Format(format!("unsupported format spec '{spec}'"))),
    }
}

/// Plain text of a context value: strings unquoted, null empty.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn numeric(value: &Value, spec: &str) -> Result<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.ok_or_else(|| {
        Error::Format(format!("'{}' is not a number for spec '{spec}'", display(value)))
    })
}

fn integer(value: &Value, spec: &str) -> Result<i64> {
    let number = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    number.ok_or_else(|| {
        Error::Format(format!("'{}' is not an integer for spec '{spec}'", display(value)))
    })
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, fraction) = match unsigned.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `d.ddddddE+ddd` notation.
fn exponent(number: f64, precision: usize, upper: bool) -> String {
    let formatted = format!("{number:.precision$e}");
    let (mantissa, exp) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{:03}", exp.abs())
}
