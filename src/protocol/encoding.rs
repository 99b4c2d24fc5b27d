// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Payload encoding for both wire dialects.
//!
//! The encoder trusts its caller: values are written as given, without any
//! range checks.

use serde_json::{Map, Value};

use crate::command::{ArgumentValue, CommandArgument};

/// Builds the JSON object for a list of arguments.
///
/// Arguments that share an object key are merged, so several `seg` members
/// end up in a single `seg` object.
#[must_use]
pub fn to_json_object(arguments: &[CommandArgument]) -> Map<String, Value> {
    let mut object = Map::new();
    for argument in arguments {
        insert(&mut object, argument);
    }
    object
}

fn insert(object: &mut Map<String, Value>, argument: &CommandArgument) {
    let key = argument.key();
    match argument.value() {
        ArgumentValue::Object(members) => {
            let entry = object
                .entry(key)
                .or_insert_with(|| Value::Object(Map::new()));
            match entry {
                Value::Object(nested) => {
                    for member in members {
                        insert(nested, member);
                    }
                }
                other => *other = Value::Object(to_json_object(members)),
            }
        }
        value => {
            object.insert(key.to_string(), json_value(value));
        }
    }
}

fn json_value(value: &ArgumentValue) -> Value {
    match value {
        ArgumentValue::Int(n) => Value::from(*n),
        ArgumentValue::Bool(b) => Value::Bool(*b),
        ArgumentValue::Toggle => Value::String("t".to_string()),
        ArgumentValue::Colors(colors) => Value::Array(
            colors
                .iter()
                .map(|color| Value::from(color.to_array().to_vec()))
                .collect(),
        ),
        ArgumentValue::Flag => Value::Null,
        ArgumentValue::Object(members) => Value::Object(to_json_object(members)),
    }
}

/// Encodes arguments as a JSON object string.
///
/// # Examples
///
/// ```
/// use wled_lib::command::CommandArgument;
/// use wled_lib::protocol::encode_json;
///
/// let payload = encode_json(&[
///     CommandArgument::int("bri", 64),
///     CommandArgument::bool("on", true),
/// ]);
/// assert_eq!(payload, r#"{"bri":64,"on":true}"#);
/// ```
#[must_use]
pub fn encode_json(arguments: &[CommandArgument]) -> String {
    Value::Object(to_json_object(arguments)).to_string()
}

/// Encodes arguments as `K=V` tokens joined by `&`.
///
/// Booleans become `1`/`0`, flags are written as the bare key, and nested
/// arguments are flattened into the same token list.
///
/// # Examples
///
/// ```
/// use wled_lib::command::CommandArgument;
/// use wled_lib::protocol::encode_query;
///
/// let query = encode_query(&[CommandArgument::flag("ND"), CommandArgument::int("NT", 0)]);
/// assert_eq!(query, "ND&NT=0");
/// ```
#[must_use]
pub fn encode_query(arguments: &[CommandArgument]) -> String {
    let mut tokens = Vec::with_capacity(arguments.len());
    push_tokens(&mut tokens, arguments);
    tokens.join("&")
}

fn push_tokens(tokens: &mut Vec<String>, arguments: &[CommandArgument]) {
    for argument in arguments {
        let key = urlencoding::encode(argument.key());
        match argument.value() {
            ArgumentValue::Int(n) => tokens.push(format!("{key}={n}")),
            ArgumentValue::Bool(b) => tokens.push(format!("{key}={}", u8::from(*b))),
            ArgumentValue::Toggle => tokens.push(format!("{key}=2")),
            ArgumentValue::Colors(colors) => {
                let channels: Vec<String> = colors
                    .iter()
                    .flat_map(|color| color.to_array())
                    .map(|channel| channel.to_string())
                    .collect();
                tokens.push(format!("{key}={}", urlencoding::encode(&channels.join(","))));
            }
            ArgumentValue::Flag => tokens.push(key.into_owned()),
            ArgumentValue::Object(members) => push_tokens(tokens, members),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn json_toggle_is_quoted_t() {
        assert_eq!(
            encode_json(&[CommandArgument::toggle("on")]),
            r#"{"on":"t"}"#
        );
    }

    #[test]
    fn json_nests_objects_literally() {
        let payload = encode_json(&[CommandArgument::segment(CommandArgument::int("fx", 7))]);
        assert_eq!(payload, r#"{"seg":{"fx":7}}"#);
    }

    #[test]
    fn json_merges_segment_members() {
        let payload = encode_json(&[
            CommandArgument::int("bri", 5),
            CommandArgument::segment(CommandArgument::int("fx", 7)),
            CommandArgument::segment(CommandArgument::int("sx", 100)),
        ]);
        assert_eq!(payload, r#"{"bri":5,"seg":{"fx":7,"sx":100}}"#);
    }

    #[test]
    fn json_colors_are_nested_lists() {
        let payload = encode_json(&[CommandArgument::segment(CommandArgument::colors(
            "col",
            vec![Color::new(255, 0, 0), Color::new(0, 0, 255)],
        ))]);
        assert_eq!(payload, r#"{"seg":{"col":[[255,0,0],[0,0,255]]}}"#);
    }

    #[test]
    fn json_negative_numbers_are_bare() {
        assert_eq!(encode_json(&[CommandArgument::int("ps", -1)]), r#"{"ps":-1}"#);
    }

    #[test]
    fn query_tokens() {
        assert_eq!(
            encode_query(&[
                CommandArgument::int("R", 1),
                CommandArgument::int("G", 2),
                CommandArgument::int("B", 3),
            ]),
            "R=1&G=2&B=3"
        );
        assert_eq!(encode_query(&[CommandArgument::bool("T", false)]), "T=0");
    }

    #[test]
    fn query_flattens_nested() {
        assert_eq!(
            encode_query(&[CommandArgument::nested(
                "nl",
                vec![CommandArgument::int("NL", 10), CommandArgument::int("NT", 0)]
            )]),
            "NL=10&NT=0"
        );
    }
}
