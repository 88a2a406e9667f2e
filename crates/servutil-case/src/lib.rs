//! Key casing for JSON payloads
//!
//! Rewrites object keys between `snake_case` and `camelCase`, walking nested
//! objects and arrays. Values are left alone, with one exception: a bare
//! top-level string is converted itself, so the same call works on a single
//! key.

#![allow(clippy::must_use_candidate)]

use convert_case::{Case, Casing};
use serde_json::{Map, Value};

/// Direction of a key conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `foo_bar` to `fooBar`
    SnakeToCamel,
    /// `fooBar` to `foo_bar`
    CamelToSnake,
}

/// Convert keys from `snake_case` to `camelCase`
pub fn snake_to_camel_case(value: Value) -> Value {
    change_case(value, Direction::SnakeToCamel)
}

/// Convert keys from `camelCase` to `snake_case`
pub fn camel_to_snake_case(value: Value) -> Value {
    change_case(value, Direction::CamelToSnake)
}

/// Convert every object key in `value`
///
/// Strings nested inside arrays or held as object values are data, not keys,
/// and are returned unchanged, as are numbers, booleans and `null`.
pub fn change_case(value: Value, direction: Direction) -> Value {
    match value {
        Value::String(s) => Value::String(convert_key(&s, direction)),
        container @ (Value::Array(_) | Value::Object(_)) => convert_container(container, direction),
        other => other,
    }
}

fn convert_container(value: Value, direction: Direction) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_container(item, direction))
                .collect(),
        ),
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, value)| (convert_key(&key, direction), convert_container(value, direction)))
                .collect::<Map<_, _>>(),
        ),
        other => other,
    }
}

/// Convert a single key
///
/// Keys that are already in the target case are returned as-is, and leading
/// underscores (`_id`) are kept.
pub fn convert_key(key: &str, direction: Direction) -> String {
    let body = key.trim_start_matches('_');
    let prefix = &key[..key.len() - body.len()];

    let converted = match direction {
        Direction::SnakeToCamel if body.contains('_') => body.from_case(Case::Snake).to_case(Case::Camel),
        Direction::CamelToSnake if body.chars().any(char::is_uppercase) => {
            body.from_case(Case::Camel).to_case(Case::Snake)
        }
        _ => return key.to_owned(),
    };

    format!("{prefix}{converted}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn snake_to_camel() {
        assert_eq!(snake_to_camel_case(json!("test_string")), json!("testString"));

        let object = json!({ "foo_bar": "foo_bar" });
        assert_eq!(snake_to_camel_case(object.clone()), json!({ "fooBar": "foo_bar" }));

        let array = json!(["foo_bar", [object]]);
        assert_eq!(
            snake_to_camel_case(array),
            json!(["foo_bar", [{ "fooBar": "foo_bar" }]])
        );
    }

    #[test]
    fn camel_to_snake() {
        assert_eq!(camel_to_snake_case(json!("testString")), json!("test_string"));

        let object = json!({ "fooBar": "fooBar" });
        assert_eq!(camel_to_snake_case(object.clone()), json!({ "foo_bar": "fooBar" }));

        let array = json!(["fooBar", [object]]);
        assert_eq!(
            camel_to_snake_case(array),
            json!(["fooBar", [{ "foo_bar": "fooBar" }]])
        );
    }

    #[test]
    fn nested_objects_are_converted() {
        let value = json!({
            "user_profile": {
                "first_name": "Ada",
                "contact_points": [{ "phone_number": "555" }, 7, null]
            },
            "is_active": true
        });
        assert_eq!(
            snake_to_camel_case(value),
            json!({
                "userProfile": {
                    "firstName": "Ada",
                    "contactPoints": [{ "phoneNumber": "555" }, 7, null]
                },
                "isActive": true
            })
        );
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(snake_to_camel_case(json!(null)), json!(null));
        assert_eq!(snake_to_camel_case(json!(42)), json!(42));
        assert_eq!(camel_to_snake_case(json!(false)), json!(false));
    }

    #[test]
    fn keys_already_in_target_case_are_kept() {
        assert_eq!(convert_key("fooBar", Direction::SnakeToCamel), "fooBar");
        assert_eq!(convert_key("foo_bar", Direction::CamelToSnake), "foo_bar");
        assert_eq!(convert_key("plain", Direction::SnakeToCamel), "plain");
    }

    #[test]
    fn leading_underscores_survive() {
        assert_eq!(convert_key("_id", Direction::SnakeToCamel), "_id");
        assert_eq!(convert_key("_created_at", Direction::SnakeToCamel), "_createdAt");
        assert_eq!(convert_key("__createdAt", Direction::CamelToSnake), "__created_at");
    }

    #[test]
    fn conversions_invert_each_other() {
        let value = json!({ "order_id": 1, "line_items": [{ "unit_price": 2 }] });
        assert_eq!(camel_to_snake_case(snake_to_camel_case(value.clone())), value);
    }
}
