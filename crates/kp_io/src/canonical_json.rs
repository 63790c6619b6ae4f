//! Canonical JSON for result records.
//! - Objects: keys sorted lexicographically (UTF-8 codepoint order)
//! - Arrays: order preserved (caller is responsible for stable ordering)
//! - Output: compact, no trailing newline

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::{atomic, IoResult};

/// Convert a serde_json `Value` to canonical JSON bytes.
pub fn to_canonical_json_bytes(v: &Value) -> IoResult<Vec<u8>> {
    let mut out = Vec::with_capacity(1024);
    write_canonical_value(v, &mut out)?;
    Ok(out)
}

/// Serialize any `T` to canonical JSON bytes.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> IoResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    to_canonical_json_bytes(&v)
}

/// Write canonical JSON for `value` to `path` atomically.
pub fn write_canonical_file<T: Serialize>(path: &Path, value: &T) -> IoResult<()> {
    let bytes = to_canonical_bytes(value)?;
    atomic::write_atomic(path, &bytes)
}

fn write_canonical_value(v: &Value, out: &mut Vec<u8>) -> IoResult<()> {
    match v {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(b) => {
            if *b {
                out.extend_from_slice(b"true");
            } else {
                out.extend_from_slice(b"false");
            }
        }
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => {
            // serde_json produces the correctly escaped literal.
            out.extend_from_slice(serde_json::to_string(s)?.as_bytes());
        }
        Value::Array(arr) => {
            out.push(b'[');
            for (i, elem) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical_value(elem, out)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            out.push(b'{');
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            for (i, k) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                out.extend_from_slice(serde_json::to_string(k)?.as_bytes());
                out.push(b':');
                write_canonical_value(&map[k.as_str()], out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_core::ValidationResult;
    use serde_json::json;

    #[test]
    fn objects_are_sorted_arrays_preserved() {
        let v = json!({
            "b": 1,
            "a": { "y": 1, "x": 2 },
            "arr": [ {"k":2,"j":1}, 3, "z" ]
        });
        let s = String::from_utf8(to_canonical_json_bytes(&v).unwrap()).unwrap();
        assert_eq!(s, r#"{"a":{"x":2,"y":1},"arr":[{"j":1,"k":2},3,"z"],"b":1}"#);
    }

    #[test]
    fn validation_result_field_names_are_stable() {
        let r = ValidationResult {
            declared_value: 13,
            recomputed_value: 13,
            total_weight: 6,
            capacity: 10,
            feasible: true,
            value_match: true,
            num_items_selected: 2,
        };
        let s = String::from_utf8(to_canonical_bytes(&r).unwrap()).unwrap();
        assert_eq!(
            s,
            r#"{"capacity":10,"declared_value":13,"feasible":true,"num_items_selected":2,"recomputed_value":13,"total_weight":6,"value_match":true}"#
        );
    }

    #[test]
    fn write_file_has_no_trailing_newline() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("r.json");
        write_canonical_file(&p, &json!({"a": 1})).unwrap();
        let bytes = std::fs::read(&p).unwrap();
        assert_eq!(bytes, b"{\"a\":1}");
    }
}
