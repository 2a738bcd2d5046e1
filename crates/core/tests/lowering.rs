//! End-to-end lowering of schema trees through the public entry points.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use oas2tf_core::ir::{
    CollectionAttribute, Float64Attribute, Int64Attribute, NestedAttributeObject,
    NestedCollectionAttribute, SingleNestedAttribute, StaticDefault, StringAttribute,
};
use oas2tf_core::{
    Attribute, AttributeOverride, AttributePath, AttributeValue, ComputedOptionalRequired,
    ElementType, ErrorMode, LowerError, Policy, Schema, build_data_source_attributes,
    build_resource_attributes, build_single_nested_resource,
};

fn parse(json: &str) -> Schema {
    serde_json::from_str(json).unwrap()
}

fn map_nested_schema() -> Schema {
    parse(
        r#"{
            "type": ["object"],
            "properties": {
                "nested_map_prop": {
                    "type": ["object"],
                    "description": "hey there! I'm a map nested type.",
                    "additionalProperties": {
                        "type": ["object"],
                        "required": ["nested_password_required"],
                        "properties": {
                            "nested_obj_prop": {
                                "type": ["object"],
                                "required": ["nested_int64_required"],
                                "description": "hey there! I'm a single nested object type.",
                                "properties": {
                                    "nested_float64": {
                                        "type": ["number"],
                                        "format": "double",
                                        "description": "hey there! I'm a nested float64 type."
                                    },
                                    "nested_int64_required": {
                                        "type": ["integer"],
                                        "format": "int64",
                                        "description": "hey there! I'm a nested int64 type, required."
                                    }
                                }
                            },
                            "nested_password_required": {
                                "type": ["string"],
                                "format": "password",
                                "description": "hey there! I'm a nested string type, required."
                            }
                        }
                    }
                }
            }
        }"#,
    )
}

fn expected_map_nested() -> Vec<Attribute> {
    vec![Attribute {
        name: "nested_map_prop".to_string(),
        value: AttributeValue::MapNested(NestedCollectionAttribute {
            nested_object: NestedAttributeObject {
                attributes: vec![
                    Attribute {
                        name: "nested_obj_prop".to_string(),
                        value: AttributeValue::SingleNested(SingleNestedAttribute {
                            attributes: vec![
                                Attribute {
                                    name: "nested_float64".to_string(),
                                    value: AttributeValue::Float64(Float64Attribute {
                                        computed_optional_required:
                                            ComputedOptionalRequired::ComputedOptional,
                                        default: None,
                                        description: Some(
                                            "hey there! I'm a nested float64 type.".to_string(),
                                        ),
                                    }),
                                },
                                Attribute {
                                    name: "nested_int64_required".to_string(),
                                    value: AttributeValue::Int64(Int64Attribute {
                                        computed_optional_required:
                                            ComputedOptionalRequired::Required,
                                        default: None,
                                        description: Some(
                                            "hey there! I'm a nested int64 type, required."
                                                .to_string(),
                                        ),
                                    }),
                                },
                            ],
                            computed_optional_required: ComputedOptionalRequired::ComputedOptional,
                            description: Some(
                                "hey there! I'm a single nested object type.".to_string(),
                            ),
                        }),
                    },
                    Attribute {
                        name: "nested_password_required".to_string(),
                        value: AttributeValue::String(StringAttribute {
                            computed_optional_required: ComputedOptionalRequired::Required,
                            default: None,
                            description: Some(
                                "hey there! I'm a nested string type, required.".to_string(),
                            ),
                            sensitive: Some(true),
                        }),
                    },
                ],
            },
            computed_optional_required: ComputedOptionalRequired::ComputedOptional,
            description: Some("hey there! I'm a map nested type.".to_string()),
        }),
    }]
}

#[test]
fn test_map_nested_resource() {
    let attributes = build_resource_attributes(&map_nested_schema(), &Policy::default()).unwrap();
    assert_eq!(attributes, expected_map_nested());
}

#[test]
fn test_map_nested_data_source() {
    let attributes =
        build_data_source_attributes(&map_nested_schema(), &Policy::default()).unwrap();
    assert_eq!(attributes, expected_map_nested());
}

#[test]
fn test_scalar_maps() {
    let schema = parse(
        r#"{
            "type": ["object"],
            "required": ["map_with_strings_required"],
            "properties": {
                "map_with_floats": {
                    "type": ["object"],
                    "description": "hey there! I'm a map type with floats.",
                    "additionalProperties": { "type": ["number"], "format": "float" }
                },
                "map_with_strings_required": {
                    "type": ["object"],
                    "description": "hey there! I'm a map type with strings, required.",
                    "additionalProperties": { "type": ["string"] }
                }
            }
        }"#,
    );

    let attributes = build_resource_attributes(&schema, &Policy::default()).unwrap();
    assert_eq!(
        attributes,
        vec![
            Attribute {
                name: "map_with_floats".to_string(),
                value: AttributeValue::Map(CollectionAttribute {
                    computed_optional_required: ComputedOptionalRequired::ComputedOptional,
                    element_type: ElementType::Float64,
                    description: Some("hey there! I'm a map type with floats.".to_string()),
                }),
            },
            Attribute {
                name: "map_with_strings_required".to_string(),
                value: AttributeValue::Map(CollectionAttribute {
                    computed_optional_required: ComputedOptionalRequired::Required,
                    element_type: ElementType::String,
                    description: Some(
                        "hey there! I'm a map type with strings, required.".to_string()
                    ),
                }),
            },
        ]
    );
}

#[test]
fn test_bare_object_property_unsupported() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "outer": {
                    "type": "object",
                    "properties": { "opaque": { "type": ["object"] } }
                }
            }
        }"#,
    );

    let err = build_resource_attributes(&schema, &Policy::default()).unwrap_err();
    assert!(matches!(err, LowerError::UnsupportedSchema { .. }));
    assert_eq!(err.path().unwrap().dotted(), "outer.opaque");
    assert!(err.to_string().starts_with("outer.opaque: unsupported schema"));
}

#[test]
fn test_declaration_order_preserved() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "string" },
                "mid": {
                    "type": "object",
                    "properties": {
                        "z": { "type": "integer" },
                        "a": { "type": "integer" }
                    }
                }
            }
        }"#,
    );

    let attributes = build_resource_attributes(&schema, &Policy::default()).unwrap();
    let names: Vec<_> = attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    let nested: Vec<_> = attributes[2].children().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(nested, vec!["z", "a"]);
}

#[test]
fn test_required_only_from_direct_parent() {
    let schema = parse(
        r#"{
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": { "type": "string" },
                "child": {
                    "type": "object",
                    "properties": { "id": { "type": "string" } }
                }
            }
        }"#,
    );

    let attributes = build_resource_attributes(&schema, &Policy::default()).unwrap();
    assert_eq!(attributes[0].computability(), ComputedOptionalRequired::Required);
    assert_eq!(
        attributes[1].children()[0].computability(),
        ComputedOptionalRequired::ComputedOptional
    );
}

#[test]
fn test_lowering_is_idempotent() {
    let schema = map_nested_schema();
    let policy = Policy::default();
    assert_eq!(
        build_resource_attributes(&schema, &policy).unwrap(),
        build_resource_attributes(&schema, &policy).unwrap()
    );
    assert_eq!(
        build_data_source_attributes(&schema, &policy).unwrap(),
        build_data_source_attributes(&schema, &policy).unwrap()
    );
}

#[test]
fn test_parallel_targets_share_tree() {
    let schema = map_nested_schema();
    let policy = Policy::default();

    let (resource, data_source) = std::thread::scope(|s| {
        let resource = s.spawn(|| build_resource_attributes(&schema, &policy));
        let data_source = s.spawn(|| build_data_source_attributes(&schema, &policy));
        (resource.join().unwrap(), data_source.join().unwrap())
    });

    assert_eq!(resource.unwrap(), expected_map_nested());
    assert_eq!(data_source.unwrap(), expected_map_nested());
}

#[test]
fn test_recursion_limit() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "a": {
                    "type": "object",
                    "properties": {
                        "b": {
                            "type": "object",
                            "properties": { "c": { "type": "string" } }
                        }
                    }
                }
            }
        }"#,
    );

    let err = build_resource_attributes(&schema, &Policy::default().with_max_depth(2)).unwrap_err();
    assert_eq!(
        err,
        LowerError::RecursionLimit {
            path: ["a", "b", "c"].into_iter().collect::<AttributePath>(),
            limit: 2,
        }
    );
    assert!(build_resource_attributes(&schema, &Policy::default().with_max_depth(3)).is_ok());
}

#[test]
fn test_name_collision() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "userName": { "type": "string" },
                "user_name": { "type": "string" }
            }
        }"#,
    );

    let err = build_resource_attributes(&schema, &Policy::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "<root>: properties 'userName' and 'user_name' both map to attribute 'user_name'"
    );
}

#[test]
fn test_collect_mode_reports_every_failure() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "good": { "type": "string" },
                "no_items": { "type": "array" },
                "inner": {
                    "type": "object",
                    "properties": {
                        "opaque": { "type": "object" },
                        "fine": { "type": "boolean" }
                    }
                }
            }
        }"#,
    );

    let fail_fast = build_resource_attributes(&schema, &Policy::default()).unwrap_err();
    assert_eq!(fail_fast.path().unwrap().dotted(), "no_items");

    let policy = Policy::default().with_error_mode(ErrorMode::Collect);
    let err = build_resource_attributes(&schema, &policy).unwrap_err();
    let paths: Vec<_> = err
        .clone()
        .into_errors()
        .iter()
        .map(|e| e.path().unwrap().dotted())
        .collect();
    assert_eq!(paths, vec!["no_items", "inner.opaque"]);
    assert!(err.to_string().starts_with("2 schema errors:"));
}

#[test]
fn test_overrides() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "apiToken": { "type": "string" },
                "etag": { "type": "string", "readOnly": true },
                "name": { "type": "string" }
            }
        }"#,
    );
    let policy = Policy::default()
        .with_override(
            "api_token",
            AttributeOverride {
                computability: None,
                sensitive: Some(true),
            },
        )
        .with_override(
            "name",
            AttributeOverride {
                computability: Some(ComputedOptionalRequired::Optional),
                sensitive: None,
            },
        );

    let attributes = build_resource_attributes(&schema, &policy).unwrap();
    assert!(attributes[0].is_sensitive());
    assert_eq!(attributes[1].computability(), ComputedOptionalRequired::Computed);
    assert_eq!(attributes[2].computability(), ComputedOptionalRequired::Optional);
}

#[test]
fn test_properties_with_additional_properties_is_object() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "hybrid": {
                    "type": "object",
                    "properties": { "known": { "type": "string" } },
                    "additionalProperties": { "type": "integer" }
                }
            }
        }"#,
    );

    let attributes = build_resource_attributes(&schema, &Policy::default()).unwrap();
    assert_eq!(attributes[0].kind_name(), "single_nested");
    assert_eq!(attributes[0].children()[0].name, "known");
}

#[test]
fn test_sets_and_nested_lists() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "tags": { "type": "array", "uniqueItems": true, "items": { "type": "string" } },
                "rules": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["port"],
                        "properties": {
                            "port": { "type": "integer" },
                            "protocol": { "type": "string" }
                        }
                    }
                },
                "peers": {
                    "type": "array",
                    "uniqueItems": true,
                    "items": {
                        "type": "object",
                        "properties": { "address": { "type": "string" } }
                    }
                }
            }
        }"#,
    );

    let attributes = build_resource_attributes(&schema, &Policy::default()).unwrap();
    let kinds: Vec<_> = attributes.iter().map(Attribute::kind_name).collect();
    assert_eq!(kinds, vec!["set", "list_nested", "set_nested"]);

    let AttributeValue::Set(tags) = &attributes[0].value else {
        panic!("tags should be a set");
    };
    assert_eq!(tags.element_type, ElementType::String);

    let rules = attributes[1].children();
    assert_eq!(rules[0].name, "port");
    assert_eq!(rules[0].computability(), ComputedOptionalRequired::Required);
    assert_eq!(rules[1].computability(), ComputedOptionalRequired::ComputedOptional);
}

#[test]
fn test_defaults_only_on_resources() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "replicas": { "type": "integer", "default": 3 },
                "region": { "type": "string", "default": "us-east-1" }
            }
        }"#,
    );

    let resource = build_resource_attributes(&schema, &Policy::default()).unwrap();
    let AttributeValue::Int64(replicas) = &resource[0].value else {
        panic!("replicas should be int64");
    };
    assert_eq!(replicas.default, Some(StaticDefault { value: 3 }));
    let AttributeValue::String(region) = &resource[1].value else {
        panic!("region should be a string");
    };
    assert_eq!(
        region.default,
        Some(StaticDefault {
            value: "us-east-1".to_string()
        })
    );

    let data_source = build_data_source_attributes(&schema, &Policy::default()).unwrap();
    let json = serde_json::to_value(&data_source).unwrap();
    assert!(json[0]["int64"].get("default").is_none());
    assert!(json[1]["string"].get("default").is_none());
}

#[test]
fn test_write_only_skipped_for_data_sources() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "password": { "type": "string", "format": "password", "writeOnly": true }
            }
        }"#,
    );

    assert_eq!(build_resource_attributes(&schema, &Policy::default()).unwrap().len(), 2);
    let data_source = build_data_source_attributes(&schema, &Policy::default()).unwrap();
    assert_eq!(data_source.len(), 1);
    assert_eq!(data_source[0].name, "name");
}

#[test]
fn test_unresolved_reference() {
    let schema = parse(
        r##"{
            "type": "object",
            "properties": { "owner": { "$ref": "#/components/schemas/User" } }
        }"##,
    );

    let err = build_resource_attributes(&schema, &Policy::default()).unwrap_err();
    assert!(matches!(err, LowerError::Schema { .. }));
    assert_eq!(err.path().unwrap().dotted(), "owner");
}

#[test]
fn test_conflicting_types() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": { "either": { "type": ["string", "integer"] } }
        }"#,
    );

    let err = build_resource_attributes(&schema, &Policy::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "either: invalid schema: conflicting types 'string' and 'integer'"
    );
}

#[test]
fn test_nullable_scalar_keeps_shape() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "note": { "type": ["string", "null"] },
                "legacy": { "type": "integer", "nullable": true }
            }
        }"#,
    );

    let attributes = build_resource_attributes(&schema, &Policy::default()).unwrap();
    assert_eq!(attributes[0].kind_name(), "string");
    assert_eq!(attributes[1].kind_name(), "int64");
}

#[test]
fn test_single_nested_resource_entry() {
    let schema = parse(
        r#"{
            "type": "object",
            "description": "settings block",
            "required": ["mode"],
            "properties": { "mode": { "type": "string" } }
        }"#,
    );

    let attribute = build_single_nested_resource(
        "settings",
        &schema,
        ComputedOptionalRequired::Optional,
        &Policy::default(),
    )
    .unwrap();
    assert_eq!(attribute.kind_name(), "single_nested");
    assert_eq!(attribute.computability(), ComputedOptionalRequired::Optional);
    assert_eq!(attribute.description(), Some("settings block"));
    assert_eq!(attribute.children()[0].computability(), ComputedOptionalRequired::Required);

    let json = serde_json::to_value(&attribute).unwrap();
    assert_eq!(json["name"], "settings");
    assert_eq!(json["single_nested"]["computed_optional_required"], "optional");
}

fn wrap(levels: usize, leaf: Schema, layer: impl Fn(Schema) -> Schema) -> Schema {
    (0..levels).fold(leaf, |inner, _| layer(inner))
}

#[test]
fn test_deep_item_chain_hits_depth_ceiling() {
    let chain = wrap(2_000, Schema::typed("string"), |inner| {
        Schema::typed("array").with_items(inner)
    });
    let schema = Schema::typed("object").with_property("deep", chain);

    let err = build_resource_attributes(&schema, &Policy::default()).unwrap_err();
    assert_eq!(
        err,
        LowerError::RecursionLimit {
            path: AttributePath::root().child("deep"),
            limit: 32,
        }
    );
}

#[test]
fn test_deep_map_chain_hits_depth_ceiling() {
    let chain = wrap(2_000, Schema::typed("integer"), |inner| {
        Schema::typed("object").with_additional_properties(inner)
    });
    let schema = Schema::typed("object").with_property("deep", chain);

    let err = build_data_source_attributes(&schema, &Policy::default()).unwrap_err();
    assert!(matches!(err, LowerError::RecursionLimit { limit: 32, .. }));
}

#[test]
fn test_property_without_identifier_characters() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "名前": { "type": "string" },
                "über": { "type": "string" }
            }
        }"#,
    );

    let err = build_resource_attributes(&schema, &Policy::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "<root>: invalid schema: property '名前' has no identifier characters"
    );

    let policy = Policy::default().with_error_mode(ErrorMode::Collect);
    let err = build_resource_attributes(&schema, &policy).unwrap_err();
    assert!(matches!(err, LowerError::Schema { .. }));

    let named = parse(r#"{ "type": "object", "properties": { "über": { "type": "string" } } }"#);
    let attributes = build_resource_attributes(&named, &Policy::default()).unwrap();
    assert_eq!(attributes[0].name, "ber");
}

#[test]
fn test_only_strings_are_sensitive() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "pin": { "type": "integer", "format": "password" },
                "ratio": { "type": "number", "format": "password" },
                "flag": { "type": "boolean", "format": "password" },
                "retries": { "type": "integer" },
                "codes": { "type": "array", "items": { "type": "string", "format": "password" } }
            }
        }"#,
    );
    let policy = Policy::default()
        .with_override(
            "retries",
            AttributeOverride {
                computability: None,
                sensitive: Some(true),
            },
        )
        .with_override(
            "codes",
            AttributeOverride {
                computability: None,
                sensitive: Some(true),
            },
        );

    let attributes = build_resource_attributes(&schema, &policy).unwrap();
    let kinds: Vec<_> = attributes.iter().map(Attribute::kind_name).collect();
    assert_eq!(kinds, vec!["int64", "number", "bool", "int64", "list"]);
    assert!(attributes.iter().all(|a| !a.is_sensitive()));

    let json = serde_json::to_value(&attributes).unwrap();
    for (attribute, kind) in json.as_array().unwrap().iter().zip(kinds) {
        assert!(attribute[kind].get("sensitive").is_none(), "{kind}");
    }
}

#[test]
fn test_object_element_type_skips_write_only_for_data_sources() {
    let schema = parse(
        r#"{
            "type": "object",
            "properties": {
                "credentials": {
                    "type": "array",
                    "items": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "user": { "type": "string" },
                                "secret": { "type": "string", "writeOnly": true }
                            }
                        }
                    }
                }
            }
        }"#,
    );

    let field_names = |attributes: &[Attribute]| -> Vec<String> {
        let AttributeValue::List(list) = &attributes[0].value else {
            panic!("credentials should be a list");
        };
        let ElementType::List(inner) = &list.element_type else {
            panic!("expected a nested list element type");
        };
        let ElementType::Object(fields) = inner.as_ref() else {
            panic!("expected an object element type");
        };
        fields.iter().map(|f| f.name.clone()).collect()
    };

    let resource = build_resource_attributes(&schema, &Policy::default()).unwrap();
    assert_eq!(field_names(&resource), vec!["user", "secret"]);

    let data_source = build_data_source_attributes(&schema, &Policy::default()).unwrap();
    assert_eq!(field_names(&data_source), vec!["user"]);
}
