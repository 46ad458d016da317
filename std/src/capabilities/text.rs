use super::{Args, Table};
use crate::value::Value;
use piper_core::{PipeError, PipeResult};

pub static CAPABILITIES: Table<String> = &[
    ("upcase", upcase),
    ("downcase", downcase),
    ("capitalize", capitalize),
    ("swapcase", swapcase),
    ("reverse", reverse),
    ("strip", strip),
    ("lstrip", lstrip),
    ("rstrip", rstrip),
    ("chars", chars),
    ("length", length),
    ("size", length),
    ("empty?", is_empty),
    ("concat", concat),
    ("+", plus),
    ("*", times),
    ("split", split),
    ("include?", includes),
    ("start_with?", starts_with),
    ("end_with?", ends_with),
    ("to_i", to_i),
    ("to_f", to_f),
];

fn upcase(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Text(s.to_uppercase()))
}

fn downcase(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Text(s.to_lowercase()))
}

fn capitalize(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    let mut chars = s.chars();
    let out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    };
    Ok(Value::Text(out))
}

fn swapcase(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_uppercase() {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
    }
    Ok(Value::Text(out))
}

fn reverse(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Text(s.chars().rev().collect()))
}

fn strip(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::from(s.trim()))
}

fn lstrip(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::from(s.trim_start()))
}

fn rstrip(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::from(s.trim_end()))
}

fn chars(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(s.chars().map(String::from).collect())
}

fn length(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Int(s.chars().count() as i64))
}

fn is_empty(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Bool(s.is_empty()))
}

fn concat(mut s: String, args: Args) -> PipeResult<Value> {
    for index in 0..args.len() {
        s.push_str(args.text(index)?);
    }
    Ok(Value::Text(s))
}

fn plus(mut s: String, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    s.push_str(args.text(0)?);
    Ok(Value::Text(s))
}

fn times(s: String, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    let n = args.count(0)?;
    match s.len().checked_mul(n) {
        Some(len) if len <= isize::MAX as usize => Ok(Value::Text(s.repeat(n))),
        _ => Err(PipeError::failed("*", "argument too big")),
    }
}

/// Without a separator (or with a single space) splits on runs of
/// whitespace; an empty separator splits into characters. Trailing empty
/// fields are dropped.
fn split(s: String, args: Args) -> PipeResult<Value> {
    args.at_most(1)?;
    let separator = match args.get(0) {
        None | Some(Value::Nil) => None,
        Some(_) => Some(args.text(0)?),
    };

    let mut fields: Vec<&str> = match separator {
        None | Some(" ") => s.split_whitespace().collect(),
        Some("") => return chars(s, Args::new("chars", Vec::new(), None)),
        Some(sep) => s.split(sep).collect(),
    };
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    Ok(fields.into_iter().collect())
}

fn includes(s: String, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    Ok(Value::Bool(s.contains(args.text(0)?)))
}

fn starts_with(s: String, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    Ok(Value::Bool(s.starts_with(args.text(0)?)))
}

fn ends_with(s: String, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    Ok(Value::Bool(s.ends_with(args.text(0)?)))
}

/// Leading integer of the text, or 0.
fn to_i(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    let trimmed = s.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |end| end + sign_len);
    let n = trimmed[..digits].parse::<i64>().unwrap_or(0);
    Ok(Value::Int(n))
}

/// Leading decimal number of the text, or 0.0. Only digit syntax counts:
/// `inf` and `nan` read as 0.0.
fn to_f(s: String, args: Args) -> PipeResult<Value> {
    args.none()?;
    let n = float_prefix(s.trim_start()).parse::<f64>().unwrap_or(0.0);
    Ok(Value::Float(n))
}

/// `[sign] digits [. digits] [e [sign] digits]`, as long a prefix as matches.
fn float_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |at: usize| bytes[at..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(s.starts_with(['-', '+']));
    let mut mantissa = digits_from(end);
    end += mantissa;
    if bytes.get(end) == Some(&b'.') {
        let fraction = digits_from(end + 1);
        if fraction > 0 {
            end += 1 + fraction;
            mantissa += fraction;
        }
    }
    if mantissa == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exponent = digits_from(exp);
        if exponent > 0 {
            end = exp + exponent;
        }
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use piper_core::{Descriptor, Pipe, Receiver};

    fn call(s: &str, name: &str, args: Vec<Value>) -> PipeResult<Value> {
        Value::from(s).invoke(name, args, None)
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(call("h", "upcase", vec![]).unwrap(), Value::from("H"));
        assert_eq!(call("HeLLo", "downcase", vec![]).unwrap(), Value::from("hello"));
        assert_eq!(call("hELLO", "capitalize", vec![]).unwrap(), Value::from("Hello"));
        assert_eq!(call("aBc", "swapcase", vec![]).unwrap(), Value::from("AbC"));
    }

    #[test]
    fn test_concat_many() {
        let v = call("H", "concat", vec![Value::from("el"), Value::from("lo")]).unwrap();
        assert_eq!(v, Value::from("Hello"));

        let err = call("H", "concat", vec![Value::Int(1)]).unwrap_err();
        assert!(matches!(err, PipeError::ArgumentType { .. }));
    }

    #[test]
    fn test_split_variants() {
        assert_eq!(
            call("Pied  Piper ", "split", vec![]).unwrap(),
            Value::from(vec!["Pied", "Piper"])
        );
        assert_eq!(
            call("a,b,,", "split", vec![Value::from(",")]).unwrap(),
            Value::from(vec!["a", "b"])
        );
        assert_eq!(
            call("a,,b", "split", vec![Value::from(",")]).unwrap(),
            Value::from(vec!["a", "", "b"])
        );
        assert_eq!(
            call("ab", "split", vec![Value::from("")]).unwrap(),
            Value::from(vec!["a", "b"])
        );
    }

    #[test]
    fn test_numeric_parsing() {
        assert_eq!(call("  42abc", "to_i", vec![]).unwrap(), Value::Int(42));
        assert_eq!(call("-7", "to_i", vec![]).unwrap(), Value::Int(-7));
        assert_eq!(call("abc", "to_i", vec![]).unwrap(), Value::Int(0));
        assert_eq!(call("2.5", "to_f", vec![]).unwrap(), Value::Float(2.5));
        assert_eq!(call("3x", "to_f", vec![]).unwrap(), Value::Float(3.0));
        assert_eq!(call(" -1.5e2xyz", "to_f", vec![]).unwrap(), Value::Float(-150.0));
        assert_eq!(call(".5", "to_f", vec![]).unwrap(), Value::Float(0.5));
        assert_eq!(call("7.", "to_f", vec![]).unwrap(), Value::Float(7.0));
        assert_eq!(call("2e", "to_f", vec![]).unwrap(), Value::Float(2.0));
    }

    #[test]
    fn test_to_f_ignores_special_float_words() {
        for word in ["inf", "-inf", "nan", "infinity", "NaN", "e5", "-", "."] {
            assert_eq!(call(word, "to_f", vec![]).unwrap(), Value::Float(0.0), "{word}");
        }
    }

    #[test]
    fn test_repeat_too_big_is_an_error() {
        let err = call("ab", "*", vec![Value::Int(i64::MAX)]).unwrap_err();
        assert_eq!(err.to_string(), "`*` failed: argument too big");

        let err = Pipe::new(Value::from("ab"))
            .then(Descriptor::call("*", [Value::Int(i64::MAX)]))
            .unwrap_err();
        assert!(matches!(err, PipeError::Failed { .. }));
    }

    #[test]
    fn test_repeat_and_predicates() {
        assert_eq!(call("ab", "*", vec![Value::Int(3)]).unwrap(), Value::from("ababab"));
        assert!(call("ab", "*", vec![Value::Int(-1)]).is_err());
        assert_eq!(call("ab", "*", vec![Value::Int(0)]).unwrap(), Value::from(""));
        assert_eq!(call("héllo", "length", vec![]).unwrap(), Value::Int(5));
        assert_eq!(
            call("piper", "start_with?", vec![Value::from("pi")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(call("", "empty?", vec![]).unwrap(), Value::Bool(true));
    }
}
