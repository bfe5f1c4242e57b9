// File: starter-socket/src/query.rs
// Purpose: Query string encoding for connection parameters

use serde_json::Value;

/// Encode `params` as a query string.
///
/// Nested objects flatten to dot-notation keys and arrays repeat their key,
/// recursively. `{"a": {"c": "Hello"}, "tags": ["x", "y"]}` becomes
/// `a.c=Hello&tags=x&tags=y`. Object keys come out in sorted order.
pub fn as_query_parameters(params: &Value) -> String {
    if params.is_null() {
        return String::new();
    }
    let mut collector = Vec::new();
    collect(None, params, &mut collector);
    collector.join("&")
}

fn collect(key: Option<&str>, value: &Value, collector: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect(key, item, collector);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                let nested = match key {
                    Some(prefix) => format!("{prefix}.{k}"),
                    None => k.clone(),
                };
                collect(Some(&nested), v, collector);
            }
        }
        scalar => {
            let encoded = encode_component(&scalar_text(scalar));
            match key {
                Some(k) => collector.push(format!("{}={}", encode_component(k), encoded)),
                None => collector.push(encoded),
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Percent-encode like `encodeURIComponent`: `!'()*` stay literal
pub fn encode_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_nested_objects_use_dot_notation() {
        let params = json!({"a": {"c": "Hello", "d": {"e": "World"}}});
        assert_eq!(as_query_parameters(&params), "a.c=Hello&a.d.e=World");
    }

    #[test]
    fn test_arrays_repeat_the_key() {
        let params = json!({"name": ["A", "B", "C"]});
        assert_eq!(as_query_parameters(&params), "name=A&name=B&name=C");
    }

    #[test]
    fn test_arrays_of_objects() {
        let params = json!({"f": [{"k": 1}, {"k": 2}]});
        assert_eq!(as_query_parameters(&params), "f.k=1&f.k=2");
    }

    #[test]
    fn test_empty_and_null() {
        assert_eq!(as_query_parameters(&Value::Null), "");
        assert_eq!(as_query_parameters(&json!({})), "");
    }

    #[rstest]
    #[case(json!({"q": "a b&c"}), "q=a%20b%26c")]
    #[case(json!({"q": "it's (ok)*!"}), "q=it's%20(ok)*!")]
    #[case(json!({"n": 2.0, "b": true, "z": null}), "b=true&n=2&z=null")]
    #[case(json!({"ü": "ß"}), "%C3%BC=%C3%9F")]
    fn test_scalar_encoding(#[case] params: Value, #[case] expected: &str) {
        assert_eq!(as_query_parameters(&params), expected);
    }
}
