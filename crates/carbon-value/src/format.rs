//! Human-readable rendering of values for logs and assertion messages.
//!
//! Output is single-line and loosely follows Node's `util.inspect`.
//! Containers already on the current rendering path print as `[Circular]`.

use rustc_hash::FxHashSet;

use crate::object::PropertyKey;
use crate::value::Value;

/// Render a value on one line
pub fn inspect(value: &Value) -> String {
    Inspector::default().run(value.clone())
}

/// Render a number the way script engines print them.
///
/// Uses the shortest round-trip digits; magnitudes of `1e21` and above or
/// below `1e-6` switch to exponent form (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let len = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let point = exponent + 1;

    let body = if len <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{first}e{exp_sign}{}", exponent.abs())
        } else {
            format!("{first}.{rest}e{exp_sign}{}", exponent.abs())
        }
    };
    format!("{sign}{body}")
}

/// One unit of pending output
enum Token {
    Value(Value),
    Key(PropertyKey),
    Text(&'static str),
    /// Container `id` is finished and leaves the rendering path
    Leave(usize),
}

/// Renders with an explicit token stack, so nesting depth is bounded by the
/// heap rather than the native stack.
#[derive(Default)]
struct Inspector {
    output: String,
    path: FxHashSet<usize>,
    stack: Vec<Token>,
}

impl Inspector {
    fn run(mut self, value: Value) -> String {
        self.stack.push(Token::Value(value));
        while let Some(token) = self.stack.pop() {
            match token {
                Token::Value(value) => self.write_value(&value),
                Token::Key(key) => write_key(&mut self.output, &key),
                Token::Text(text) => self.output.push_str(text),
                Token::Leave(id) => {
                    self.path.remove(&id);
                }
            }
        }
        self.output
    }

    fn write_value(&mut self, value: &Value) {
        let output = &mut self.output;
        match value {
            Value::Undefined => output.push_str("undefined"),
            Value::Null => output.push_str("null"),
            Value::Boolean(b) => output.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => output.push_str(&format_number(*n)),
            Value::String(s) => write_quoted(output, s),
            Value::Symbol(sym) => {
                output.push_str(&format!("Symbol({})", sym.description_str()));
            }
            Value::BigInt(b) => output.push_str(&format!("{}n", b)),
            Value::Function(f) if f.name.is_empty() => output.push_str("[Function (anonymous)]"),
            Value::Function(f) => output.push_str(&format!("[Function: {}]", f.name)),
            Value::Date(d) => match d.to_iso_string() {
                Some(iso) => output.push_str(&iso),
                None => output.push_str("Invalid Date"),
            },
            Value::Host(h) => output.push_str(&format!("{} {{}}", h.class_name())),
            Value::Object(_) | Value::Array(_) | Value::Set(_) | Value::Map(_) => {
                let Some(id) = value.heap_id() else {
                    return;
                };
                if self.path.contains(&id) {
                    self.output.push_str("[Circular]");
                    return;
                }
                self.enter_container(id, value);
            }
        }
    }

    /// Write the opening of a container and queue its contents
    fn enter_container(&mut self, id: usize, value: &Value) {
        let mut tokens = Vec::new();
        let (open, close, empty) = match value {
            Value::Array(arr) => {
                for (i, v) in arr.values().into_iter().enumerate() {
                    if i > 0 {
                        tokens.push(Token::Text(", "));
                    }
                    tokens.push(Token::Value(v));
                }
                ("[ ", " ]", "[]")
            }
            Value::Object(obj) => {
                for (i, (k, v)) in obj.entries().into_iter().enumerate() {
                    if i > 0 {
                        tokens.push(Token::Text(", "));
                    }
                    tokens.push(Token::Key(k));
                    tokens.push(Token::Text(": "));
                    tokens.push(Token::Value(v));
                }
                ("{ ", " }", "{}")
            }
            Value::Set(set) => {
                let values = set.values();
                self.output.push_str(&format!("Set({}) ", values.len()));
                for (i, v) in values.into_iter().enumerate() {
                    if i > 0 {
                        tokens.push(Token::Text(", "));
                    }
                    tokens.push(Token::Value(v));
                }
                ("{ ", " }", "{}")
            }
            Value::Map(map) => {
                let entries = map.entries();
                self.output.push_str(&format!("Map({}) ", entries.len()));
                for (i, (k, v)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        tokens.push(Token::Text(", "));
                    }
                    tokens.push(Token::Value(k));
                    tokens.push(Token::Text(" => "));
                    tokens.push(Token::Value(v));
                }
                ("{ ", " }", "{}")
            }
            _ => return,
        };

        if tokens.is_empty() {
            self.output.push_str(empty);
            return;
        }
        self.output.push_str(open);
        self.path.insert(id);
        tokens.push(Token::Text(close));
        tokens.push(Token::Leave(id));
        self.stack.extend(tokens.into_iter().rev());
    }
}

fn write_key(output: &mut String, key: &PropertyKey) {
    match key {
        PropertyKey::Symbol(sym) => {
            output.push_str(&format!("[Symbol({})]", sym.description_str()));
        }
        PropertyKey::String(s) if is_identifier(s) => output.push_str(s),
        PropertyKey::String(s) => write_quoted(output, s),
    }
}

fn write_quoted(output: &mut String, s: &str) {
    output.push('\'');
    for c in s.chars() {
        match c {
            '\'' => output.push_str("\\'"),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            _ => output.push(c),
        }
    }
    output.push('\'');
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, Date, Function, HostObject, MapData, Record, SetData, Symbol};
    use std::sync::Arc;

    #[test]
    fn test_primitives() {
        assert_eq!(inspect(&Value::undefined()), "undefined");
        assert_eq!(inspect(&Value::null()), "null");
        assert_eq!(inspect(&Value::nan()), "NaN");
        assert_eq!(inspect(&Value::number(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(inspect(&Value::number(-0.0)), "-0");
        assert_eq!(inspect(&Value::number(1.5)), "1.5");
        assert_eq!(inspect(&Value::number(3.0)), "3");
        assert_eq!(inspect(&Value::string("it's")), "'it\\'s'");
        assert_eq!(inspect(&Value::bigint(12)), "12n");
        assert_eq!(inspect(&Value::symbol(Symbol::new(Some("id")))), "Symbol(id)");
    }

    #[test]
    fn test_handles() {
        let f = Function::new("reset", |_| Ok(Value::undefined()));
        assert_eq!(inspect(&Value::function(f)), "[Function: reset]");
        let anon = Function::new("", |_| Ok(Value::undefined()));
        assert_eq!(inspect(&Value::function(anon)), "[Function (anonymous)]");
        let host = HostObject::new("Point", (1, 2));
        assert_eq!(inspect(&Value::host(host)), "Point {}");
    }

    #[test]
    fn test_containers() {
        let sym = Symbol::new(Some("k"));
        let obj = Record::new();
        obj.set("a", Value::number(1.0));
        obj.set("two words", Value::boolean(true));
        obj.set(sym, Value::number(2.0));
        assert_eq!(
            inspect(&Value::object(Arc::new(obj))),
            "{ a: 1, 'two words': true, [Symbol(k)]: 2 }"
        );

        let arr = Array::from_values([Value::number(1.0), Value::null()]);
        assert_eq!(inspect(&Value::array(arr)), "[ 1, null ]");

        let set = SetData::from_values([Value::number(1.0), Value::number(2.0)]);
        assert_eq!(inspect(&Value::set(set)), "Set(2) { 1, 2 }");

        let map = MapData::from_entries([(Value::string("a"), Value::number(1.0))]);
        assert_eq!(inspect(&Value::map(map)), "Map(1) { 'a' => 1 }");

        assert_eq!(inspect(&Value::object(Arc::new(Record::new()))), "{}");
        assert_eq!(inspect(&Value::set(Arc::new(SetData::new()))), "Set(0) {}");
    }

    #[test]
    fn test_dates() {
        let date = Date::parse("2023-01-01");
        assert_eq!(inspect(&Value::date(date)), "2023-01-01T00:00:00.000Z");
        assert_eq!(inspect(&Value::date(Date::parse("nope"))), "Invalid Date");
    }

    #[test]
    fn test_circular() {
        let obj = Arc::new(Record::new());
        obj.set("a", Value::number(1.0));
        obj.set("self", Value::object(obj.clone()));
        assert_eq!(inspect(&Value::object(obj.clone())), "{ a: 1, self: [Circular] }");
        obj.clear();
    }

    #[test]
    fn test_number_exponent_forms() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e25), "-2.5e+25");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(123456.789), "123456.789");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_cycle_through_sibling_is_not_circular_after_leaving() {
        let inner = Arc::new(Array::new());
        let outer = Arc::new(Array::new());
        inner.push(Value::array(outer.clone()));
        outer.push(Value::array(inner.clone()));
        outer.push(Value::array(inner.clone()));
        assert_eq!(
            inspect(&Value::array(outer.clone())),
            "[ [ [Circular] ], [ [Circular] ] ]"
        );
        outer.clear();
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 50_000;
        let mut links = Vec::with_capacity(depth);
        let mut value = Value::null();
        for _ in 0..depth {
            let link = Array::from_values([value]);
            links.push(link.clone());
            value = Value::array(link);
        }

        let rendered = inspect(&value);
        assert!(rendered.starts_with("[ [ [ "));
        assert!(rendered.contains("null"));
        assert_eq!(rendered.matches('[').count(), depth);

        drop(value);
        for link in &links {
            link.clear();
        }
    }

    #[test]
    fn test_shared_but_acyclic_is_not_circular() {
        let shared = Value::array(Array::from_values([Value::number(1.0)]));
        let outer = Array::from_values([shared.clone(), shared]);
        assert_eq!(inspect(&Value::array(outer)), "[ [ 1 ], [ 1 ] ]");
    }
}
