//! Editor schema for the figure configuration.
//!
//! A JSON-Schema-shaped description of every accepted field, used by a host's
//! page editor to build its form. Titles and descriptions are i18n message
//! keys, not display text. The schema is metadata only; configs that never
//! went through an editor work the same.

use serde_json::{Value, json};

/// Prefix for every i18n key in the schema.
const MESSAGE_PREFIX: &str = "admin/editor.figure";

fn message(key: &str) -> String {
    format!("{MESSAGE_PREFIX}.{key}")
}

fn field(kind: &str, key: &str) -> Value {
    json!({ "type": kind, "title": message(key) })
}

fn with_default(mut value: Value, default: Value) -> Value {
    value["default"] = default;
    value
}

/// Build the editor schema.
pub fn editor_schema() -> Value {
    let loading_policy = json!({
        "title": message("loading.title"),
        "description": message("loading.description"),
        "oneOf": [
            { "type": "boolean", "title": message("loading.priority") },
            { "type": "string", "enum": ["lazy", "eager"], "title": message("loading.mode") }
        ]
    });

    json!({
        "title": message("title"),
        "description": message("description"),
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "image": {
                "type": "object",
                "title": message("image.title"),
                "additionalProperties": false,
                "required": ["desktop_url"],
                "properties": {
                    "desktop_url": with_default(field("string", "image.desktopUrl"), json!("")),
                    "mobile_url": field("string", "image.mobileUrl"),
                    "desktop_width": field("integer", "image.desktopWidth"),
                    "desktop_height": field("integer", "image.desktopHeight"),
                    "mobile_width": field("integer", "image.mobileWidth"),
                    "mobile_height": field("integer", "image.mobileHeight")
                }
            },
            "link": {
                "type": "object",
                "title": message("link.title"),
                "additionalProperties": false,
                "properties": {
                    "url": with_default(field("string", "link.url"), json!("")),
                    "open_in_new_tab": with_default(field("boolean", "link.openInNewTab"), json!(false))
                }
            },
            "caption": with_default(field("string", "caption"), json!("")),
            "alt": with_default(field("string", "alt"), json!("")),
            "block_class": with_default(field("string", "blockClass"), json!("")),
            "hero": with_default(field("boolean", "hero"), json!(false)),
            "embedding": with_default(
                json!({
                    "type": "string",
                    "title": message("embedding.title"),
                    "enum": ["none", "wrapper-only", "container-and-wrapper"],
                    "enumNames": [
                        message("embedding.none"),
                        message("embedding.wrapperOnly"),
                        message("embedding.containerAndWrapper")
                    ]
                }),
                json!("container-and-wrapper"),
            ),
            "loading": loading_policy.clone(),
            "mobile_loading": loading_policy
        }
    })
}
