//! Conversions between Numbers and Strings.

/// `Number::toString(x)` with radix 10.
pub fn number_to_string(x: f64) -> String {
  if x.is_nan() {
    return "NaN".to_string();
  }
  if x == 0.0 {
    // Both +0 and -0.
    return "0".to_string();
  }
  if x < 0.0 {
    return format!("-{}", number_to_string(-x));
  }
  if x.is_infinite() {
    return "Infinity".to_string();
  }

  // `ryu` finds the shortest digit string that round-trips, but lays it out differently from
  // ECMAScript (e.g. `1e16`, `100.0`). Recover the digits `s` and decimal exponent `n` such that
  // x = 0.s * 10^n, then lay them out per ECMA-262.
  let mut buf = ryu::Buffer::new();
  let formatted = buf.format_finite(x);
  let (mantissa, exponent) = match formatted.split_once('e') {
    Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
    None => (formatted, 0),
  };
  let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
  let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
  let mut n = int_part.len() as i32 + exponent;
  let leading_zeros = digits.iter().take_while(|&&d| d == b'0').count();
  digits.drain(..leading_zeros);
  n -= leading_zeros as i32;
  while digits.last() == Some(&b'0') {
    digits.pop();
  }
  let digits = String::from_utf8_lossy(&digits).into_owned();
  let k = digits.len() as i32;

  if k <= n && n <= 21 {
    format!("{digits}{}", "0".repeat((n - k) as usize))
  } else if 0 < n && n <= 21 {
    let (int, frac) = digits.split_at(n as usize);
    format!("{int}.{frac}")
  } else if -6 < n && n <= 0 {
    format!("0.{}{digits}", "0".repeat((-n) as usize))
  } else {
    let e = n - 1;
    let sign = if e < 0 { '-' } else { '+' };
    let (first, rest) = digits.split_at(1);
    if rest.is_empty() {
      format!("{first}e{sign}{}", e.abs())
    } else {
      format!("{first}.{rest}e{sign}{}", e.abs())
    }
  }
}

/// `StringToNumber(str)`. Anything that isn't a StringNumericLiteral is `NaN`.
pub fn string_to_number(raw: &str) -> f64 {
  let trimmed = raw.trim_matches(is_ecma_whitespace);

  if trimmed.is_empty() {
    return 0.0;
  }

  // Infinity is case-sensitive in ECMAScript string numeric literals.
  match trimmed {
    "Infinity" | "+Infinity" => return f64::INFINITY,
    "-Infinity" => return f64::NEG_INFINITY,
    _ => {}
  }

  // Rust accepts "inf"/"infinity"/"nan" case-insensitively.
  let rest = trimmed
    .strip_prefix('+')
    .or_else(|| trimmed.strip_prefix('-'))
    .unwrap_or(trimmed);
  if rest.eq_ignore_ascii_case("inf")
    || rest.eq_ignore_ascii_case("infinity")
    || rest.eq_ignore_ascii_case("nan")
  {
    return f64::NAN;
  }

  // Radix prefixes are only valid unsigned.
  let mut prefix = trimmed.chars();
  if let (Some('0'), Some(marker)) = (prefix.next(), prefix.next()) {
    let radix = match marker.to_ascii_lowercase() {
      'x' => Some(16),
      'o' => Some(8),
      'b' => Some(2),
      _ => None,
    };
    if let Some(radix) = radix {
      return parse_unsigned_radix(&trimmed[2..], radix).unwrap_or(f64::NAN);
    }
  }

  trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_unsigned_radix(digits: &str, radix: u32) -> Option<f64> {
  if digits.is_empty() {
    return None;
  }
  digits.chars().try_fold(0.0, |value: f64, c| {
    Some(value * f64::from(radix) + f64::from(c.to_digit(radix)?))
  })
}

// Unicode White_Space covers WhiteSpace and LineTerminator except for the BOM, and adds NEL.
fn is_ecma_whitespace(c: char) -> bool {
  c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}
