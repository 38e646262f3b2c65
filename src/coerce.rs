//! Best-effort conversion of document nodes into Rust values.
//!
//! Each target type implements [`Coerce`], which either produces a value or
//! gives up with `None`. Coercion never errors: callers that want a fallback
//! use [`coerce`] with a default, callers that need to tell "unset" from
//! "invalid" use [`coerce_opt`].
//!
//! | Target | Accepts |
//! |--------|---------|
//! | `String` | any node: scalars as their text, composites as inline TOML |
//! | `i32`, `i64` | integers in range, finite floats truncated toward zero, strings that parse exactly |
//! | `f32`, `f64` | integers, floats, strings that parse |
//! | `bool` | booleans, and the strings `"true"` / `"false"` only |
//! | `Vec<Node>` | sequences |
//! | `Mapping` | mappings |
//! | `Node` | anything |
//! | [`Opaque<T>`] | whatever `T`'s `Deserialize` impl accepts |

use serde::de::DeserializeOwned;

use crate::node::{Mapping, Node, Scalar};

/// A type that can be extracted from a [`Node`].
pub trait Coerce: Sized {
    fn coerce(node: &Node) -> Option<Self>;
}

/// Coerce `node` into `T`, falling back to `default` on any mismatch.
pub fn coerce<T: Coerce>(node: &Node, default: T) -> T {
    T::coerce(node).unwrap_or(default)
}

/// Coerce `node` into `T`, or `None` on any mismatch.
pub fn coerce_opt<T: Coerce>(node: &Node) -> Option<T> {
    T::coerce(node)
}

/// Any `Deserialize` type, decoded from the node's TOML form.
///
/// Use this for enums or small structs nested in a document:
/// `doc.get_or("mode", Opaque(Mode::Fast)).0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Opaque<T>(pub T);

impl<T: DeserializeOwned> Coerce for Opaque<T> {
    fn coerce(node: &Node) -> Option<Self> {
        toml::Value::from(node.clone()).try_into().ok().map(Opaque)
    }
}

impl Coerce for String {
    fn coerce(node: &Node) -> Option<Self> {
        Some(node.display())
    }
}

fn integral(node: &Node) -> Option<i64> {
    match node.as_scalar()? {
        Scalar::Integer(i) => Some(*i),
        Scalar::Float(f) if f.is_finite() => {
            let whole = f.trunc();
            // i64::MAX as f64 rounds up to 2^63, which is out of range.
            if whole >= i64::MIN as f64 && whole < i64::MAX as f64 {
                Some(whole as i64)
            } else {
                None
            }
        }
        Scalar::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

impl Coerce for i64 {
    fn coerce(node: &Node) -> Option<Self> {
        integral(node)
    }
}

impl Coerce for i32 {
    fn coerce(node: &Node) -> Option<Self> {
        integral(node).and_then(|i| i32::try_from(i).ok())
    }
}

impl Coerce for f64 {
    fn coerce(node: &Node) -> Option<Self> {
        match node.as_scalar()? {
            Scalar::Float(f) => Some(*f),
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::String(s) => s.parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl Coerce for f32 {
    fn coerce(node: &Node) -> Option<Self> {
        match node.as_scalar()? {
            Scalar::String(s) => s.parse::<f32>().ok(),
            _ => f64::coerce(node).map(|f| f as f32),
        }
    }
}

impl Coerce for bool {
    fn coerce(node: &Node) -> Option<Self> {
        match node.as_scalar()? {
            Scalar::Boolean(b) => Some(*b),
            Scalar::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Coerce for Vec<Node> {
    fn coerce(node: &Node) -> Option<Self> {
        node.as_sequence().map(<[Node]>::to_vec)
    }
}

impl Coerce for Mapping {
    fn coerce(node: &Node) -> Option<Self> {
        node.as_mapping().cloned()
    }
}

impl Coerce for Node {
    fn coerce(node: &Node) -> Option<Self> {
        Some(node.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn s(text: &str) -> Node {
        Node::from(text)
    }

    #[test]
    fn numeric_string_to_integer() {
        assert_eq!(coerce(&s("42"), 0i32), 42);
        assert_eq!(coerce(&s("-7"), 0i64), -7);
    }

    #[test]
    fn non_numeric_string_falls_back() {
        assert_eq!(coerce(&s("abc"), 7i32), 7);
        assert_eq!(coerce_opt::<i32>(&s("abc")), None);
    }

    #[test]
    fn integer_parse_is_exact() {
        assert_eq!(coerce_opt::<i32>(&s(" 42")), None);
        assert_eq!(coerce_opt::<i32>(&s("4.2")), None);
    }

    #[test]
    fn out_of_range_integer_falls_back() {
        let big = Node::from(i64::from(i32::MAX) + 1);
        assert_eq!(coerce(&big, 1i32), 1);
        assert_eq!(coerce_opt::<i64>(&big), Some(i64::from(i32::MAX) + 1));
        assert_eq!(coerce_opt::<i32>(&s("99999999999")), None);
    }

    #[test]
    fn integral_float_to_integer() {
        assert_eq!(coerce_opt::<i32>(&Node::from(3.0)), Some(3));
        assert_eq!(coerce_opt::<i32>(&Node::from(3.5)), Some(3));
        assert_eq!(coerce(&Node::from(3.5), 7i32), 3);
        assert_eq!(coerce_opt::<i64>(&Node::from(3.5)), Some(3));
        assert_eq!(coerce_opt::<i64>(&Node::from(-2.9)), Some(-2));
        assert_eq!(coerce_opt::<i64>(&Node::from(f64::NAN)), None);
        assert_eq!(coerce_opt::<i64>(&Node::from(1e300)), None);
    }

    #[test]
    fn integer_to_float() {
        assert_eq!(coerce_opt::<f64>(&Node::from(2)), Some(2.0));
        assert_eq!(coerce_opt::<f32>(&Node::from(0.5)), Some(0.5));
        assert_eq!(coerce_opt::<f64>(&s("1.25")), Some(1.25));
        assert_eq!(coerce(&s("fast"), 9.5f64), 9.5);
    }

    #[test]
    fn strict_boolean_strings() {
        assert!(coerce(&s("true"), false));
        assert!(!coerce(&s("false"), true));
        assert!(coerce(&s("True"), true));
        assert!(!coerce(&s("True"), false));
        assert_eq!(coerce_opt::<bool>(&s("yes")), None);
        assert_eq!(coerce_opt::<bool>(&Node::from(1)), None);
        assert_eq!(coerce_opt::<bool>(&Node::from(true)), Some(true));
    }

    #[test]
    fn any_scalar_to_string() {
        assert_eq!(coerce(&Node::from(8080), String::new()), "8080");
        assert_eq!(coerce(&Node::from(true), String::new()), "true");
        assert_eq!(coerce(&s("plain"), String::new()), "plain");
    }

    #[test]
    fn composite_to_string_renders_inline() {
        let seq = Node::Sequence(vec![Node::from(1), Node::from(2)]);
        assert_eq!(coerce(&seq, "default".to_string()), "[1, 2]");

        let map = Node::Mapping([("k", 1)].into_iter().collect());
        let text = coerce(&map, String::new());
        assert!(text.contains("k = 1"));
    }

    #[test]
    fn sequence_and_mapping_identity() {
        let seq = Node::Sequence(vec![Node::from("a"), Node::from("b")]);
        assert_eq!(coerce_opt::<Vec<Node>>(&seq).map(|v| v.len()), Some(2));
        assert_eq!(coerce_opt::<Mapping>(&seq), None);

        let map = Node::Mapping([("k", 1)].into_iter().collect());
        assert_eq!(coerce_opt::<Mapping>(&map).map(|m| m.len()), Some(1));
        assert_eq!(coerce_opt::<Vec<Node>>(&map), None);
    }

    #[test]
    fn opaque_deserializes_enums() {
        #[derive(Debug, Deserialize, PartialEq)]
        #[serde(rename_all = "lowercase")]
        enum Mode {
            Fast,
            Slow,
        }

        assert_eq!(coerce_opt::<Opaque<Mode>>(&s("slow")), Some(Opaque(Mode::Slow)));
        assert_eq!(coerce(&s("warp"), Opaque(Mode::Fast)).0, Mode::Fast);
    }

    #[test]
    fn opaque_deserializes_structs() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Endpoint {
            host: String,
            port: u16,
        }

        let node = Node::Mapping(
            [("host", Node::from("db")), ("port", Node::from(5432))]
                .into_iter()
                .collect(),
        );
        let Opaque(endpoint) = coerce_opt::<Opaque<Endpoint>>(&node).unwrap();
        assert_eq!(endpoint.host, "db");
        assert_eq!(endpoint.port, 5432);

        assert!(coerce_opt::<Opaque<Endpoint>>(&s("db:5432")).is_none());
    }
}
