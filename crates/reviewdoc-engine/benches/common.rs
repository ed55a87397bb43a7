// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use serde_json::{Map, Value, json};

/// A Swagger document with `paths` paths of three operations each and one
/// definition per path.
#[allow(dead_code)]
pub fn generate_swagger(paths: usize) -> Value {
    let mut path_map = Map::new();
    let mut definitions = Map::new();

    for i in 0..paths {
        path_map.insert(
            format!("/resources{i}/{{id}}"),
            json!({
                "get": {
                    "operationId": format!("Resource{i}_Get"),
                    "parameters": [
                        {"name": "id", "in": "path", "type": "string", "required": true},
                        {"$ref": "#/parameters/ApiVersion"}
                    ],
                    "responses": {
                        "200": {
                            "description": "ok",
                            "schema": {"$ref": format!("#/definitions/Resource{i}")}
                        },
                        "default": {"description": "error"}
                    }
                },
                "put": {
                    "operationId": format!("Resource{i}_Put"),
                    "responses": {"201": {"description": "created"}}
                },
                "delete": {
                    "operationId": format!("Resource{i}_Delete"),
                    "responses": {"204": {"description": "deleted"}}
                }
            }),
        );
        definitions.insert(
            format!("Resource{i}"),
            json!({
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {"type": "string", "readOnly": true},
                    "tags": {"type": "array", "items": {"type": "string"}},
                    "parent": {"$ref": format!("#/definitions/Resource{}", i.saturating_sub(1))}
                }
            }),
        );
    }

    json!({
        "swagger": "2.0",
        "info": {"title": "Generated", "version": "2024-01-01"},
        "paths": path_map,
        "parameters": {
            "ApiVersion": {"name": "api-version", "in": "query", "type": "string", "required": true}
        },
        "definitions": definitions
    })
}

/// Names of `count` types, each with `members` members.
#[allow(dead_code)]
pub fn generate_type_names(count: usize, members: usize) -> Vec<(String, Vec<String>)> {
    (0..count)
        .map(|i| {
            let members = (0..members).map(|m| format!("member{m}")).collect();
            (format!("Type{i}"), members)
        })
        .collect()
}
