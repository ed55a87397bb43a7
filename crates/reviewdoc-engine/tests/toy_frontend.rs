//! A miniature front end over a closed set of declarations, driving the
//! line-tree builder and the navigation builder the way a real language
//! parser would.

use pretty_assertions::assert_eq;
use reviewdoc_engine::{
    Declaration, DeclarationId, DeclarationKind, DeclarationTree, DependencyIndex, DocumentInfo,
    Emitted, LineMarkerOptions, ReviewBuilder, ReviewDocument, Spacing, UNRESOLVED,
    build_navigation,
};
use serde_json::Value;

enum Item {
    Struct {
        name: &'static str,
        fields: Vec<(&'static str, &'static str)>,
        methods: Vec<Method>,
    },
    Extension {
        of: &'static str,
        methods: Vec<Method>,
    },
}

struct Method {
    name: &'static str,
    params: Vec<(&'static str, &'static str)>,
    deprecated: bool,
}

fn method(name: &'static str, params: Vec<(&'static str, &'static str)>) -> Method {
    Method {
        name,
        params,
        deprecated: false,
    }
}

fn zoo() -> Vec<Item> {
    vec![
        Item::Struct {
            name: "Cage",
            fields: vec![("animal", "Animal")],
            methods: vec![],
        },
        Item::Struct {
            name: "Animal",
            fields: vec![],
            methods: vec![method("feed", vec![("food", "Food")])],
        },
        Item::Extension {
            of: "Animal",
            methods: vec![method("rest", vec![])],
        },
        Item::Extension {
            of: "Animal",
            methods: vec![Method {
                name: "sleep",
                params: vec![("in", "Cage")],
                deprecated: true,
            }],
        },
    ]
}

fn emit_package(
    package: &str,
    items: &[Item],
    dependencies: Option<DependencyIndex>,
) -> (Emitted, DeclarationTree) {
    let mut b = ReviewBuilder::new();
    if let Some(dependencies) = dependencies {
        b = b.with_dependencies(dependencies);
    }
    let mut tree = DeclarationTree::new();

    // Type IDs are registered up front so forward references link.
    let type_ids: Vec<Option<String>> = items
        .iter()
        .map(|item| match item {
            Item::Struct { name, .. } => Some(b.build_id(name, Some(package))),
            Item::Extension { .. } => None,
        })
        .collect();

    let root = tree.add_root(Declaration::new(DeclarationKind::Package, package).with_id(package));
    b.keyword("package", Spacing::Trailing);
    b.text(package, Some(package));
    b.punctuation("{", Spacing::Leading);
    b.newline();
    b.indent(|b| {
        for (index, (item, type_id)) in items.iter().zip(&type_ids).enumerate() {
            if index > 0 {
                b.blank_lines(1);
            }
            emit_item(b, &mut tree, root, package, item, type_id.as_deref());
        }
    });
    b.punctuation("}", Spacing::None);
    b.newline();

    (b.finish(), tree)
}

fn emit_item(
    b: &mut ReviewBuilder,
    tree: &mut DeclarationTree,
    root: DeclarationId,
    package: &str,
    item: &Item,
    type_id: Option<&str>,
) {
    match item {
        Item::Struct {
            name,
            fields,
            methods,
        } => {
            let mut decl = Declaration::new(DeclarationKind::Struct, *name);
            if let Some(id) = type_id {
                decl = decl.with_id(id);
            }
            let decl = tree.add_member(root, decl);
            let id = type_id.unwrap_or(*name).to_string();

            b.keyword("struct", Spacing::Trailing);
            b.type_declaration(name, type_id);
            b.punctuation("{", Spacing::Leading);
            b.newline();
            b.indent(|b| {
                for (field, ty) in fields {
                    let field_id = b.build_id(field, Some(id.as_str()));
                    let member = tree.add_member(
                        decl,
                        Declaration::new(DeclarationKind::Property, *field).with_id(&field_id),
                    );
                    b.keyword("var", Spacing::Trailing);
                    b.line_marker(Some(field_id.as_str()), LineMarkerOptions::default());
                    b.member(field, Some(field_id.as_str()));
                    b.punctuation(":", Spacing::Trailing);
                    b.type_reference(ty, Some(tree.get(member)));
                    b.newline();
                }
                for m in methods {
                    emit_method(b, tree, decl, &id, m);
                }
            });
            b.punctuation("}", Spacing::None);
            b.newline();
        }
        Item::Extension { of, methods } => {
            let id = format!("{package}.{of}.extension");
            let decl = tree.add_extension(
                Declaration::new(DeclarationKind::Extension, *of).with_id(&id),
            );

            b.keyword("extension", Spacing::Trailing);
            b.extension_declaration(of, &id, None);
            b.punctuation("{", Spacing::Leading);
            b.newline();
            b.indent(|b| {
                for m in methods {
                    emit_method(b, tree, decl, &id, m);
                }
            });
            b.punctuation("}", Spacing::None);
            b.newline();
        }
    }
}

fn emit_method(
    b: &mut ReviewBuilder,
    tree: &mut DeclarationTree,
    parent: DeclarationId,
    parent_id: &str,
    m: &Method,
) {
    let labels: String = m.params.iter().map(|(label, _)| format!("{label}:")).collect();
    let signature = format!("{}({labels})", m.name);
    let id = b.build_id(&signature, Some(parent_id));
    let decl = tree.add_member(
        parent,
        Declaration::new(DeclarationKind::Method, m.name).with_id(&id),
    );

    let body = |b: &mut ReviewBuilder| {
        b.keyword("func", Spacing::Trailing);
        b.line_marker(Some(id.as_str()), LineMarkerOptions::default());
        b.member(m.name, Some(id.as_str()));
        b.punctuation("(", Spacing::None);
        for (index, (label, ty)) in m.params.iter().enumerate() {
            if index > 0 {
                b.punctuation(",", Spacing::Trailing);
            }
            b.member(label, None);
            b.punctuation(":", Spacing::Trailing);
            b.type_reference(ty, Some(tree.get(decl)));
        }
        b.punctuation(")", Spacing::None);
    };
    if m.deprecated {
        b.deprecated(body);
    } else {
        body(b);
    }
    b.newline();
}

fn zoo_document() -> ReviewDocument {
    let (emitted, tree) = emit_package("Zoo", &zoo(), None);
    let navigation = build_navigation(&tree);
    emitted.into_document(DocumentInfo::new("Zoo", "Zoo", "Toy"), navigation)
}

#[test]
fn renders_like_source() {
    let doc = zoo_document();

    insta::assert_snapshot!(doc.render_text(4), @r"
package Zoo {
    struct Cage {
        var animal: Animal
    }

    struct Animal {
        func feed(food: Food)
    }

    extension Animal {
        func rest()
    }

    extension Animal {
        func sleep(in: Cage)
    }
}
");
}

#[test]
fn line_ids_are_unique_even_across_repeated_extensions() {
    let doc = zoo_document();

    assert_eq!(doc.duplicate_line_ids(), Vec::<String>::new());
    assert!(doc.diagnostics.is_empty());
}

#[test]
fn references_link_forward_and_unknown_names_are_unresolved() {
    let (emitted, _) = emit_package("Zoo", &zoo(), None);

    let mut links = Vec::new();
    for line in &emitted.lines {
        line.walk(0, &mut |line, _| {
            for token in &line.tokens {
                if let Some(target) = &token.navigate_to_id {
                    links.push((token.value().to_string(), target.clone()));
                }
            }
        });
    }

    assert!(links.contains(&("Animal".to_string(), "Zoo.Animal".to_string())));
    assert!(links.contains(&("Food".to_string(), UNRESOLVED.to_string())));
    assert!(links.contains(&("Cage".to_string(), "Zoo.Cage".to_string())));
}

#[test]
fn deprecated_methods_flag_every_token() {
    let (emitted, _) = emit_package("Zoo", &zoo(), None);
    let package = &emitted.lines[0];
    let sleep_extension = package
        .children
        .iter()
        .filter(|line| line.text(4).starts_with("extension"))
        .nth(1)
        .unwrap();

    let sleep = &sleep_extension.children[0];

    assert!(sleep.tokens.iter().all(|token| token.is_deprecated));
    assert_eq!(sleep.line_id.as_deref(), Some("Zoo.Animal.extension.sleep(in:)"));
}

#[test]
fn navigation_merges_extensions_and_sorts() {
    let doc = zoo_document();

    let top: Vec<_> = doc.navigation.iter().map(|n| n.display_name.as_str()).collect();
    assert_eq!(top, vec!["Animal", "Zoo"]);
    let extension: Vec<_> = doc.navigation[0]
        .children
        .iter()
        .map(|n| n.display_name.as_str())
        .collect();
    assert_eq!(extension, vec!["rest", "sleep"]);
    let types: Vec<_> = doc.navigation[1]
        .children
        .iter()
        .map(|n| n.display_name.as_str())
        .collect();
    assert_eq!(types, vec!["Animal", "Cage"]);
}

#[test]
fn json_uses_review_service_field_names() {
    let json = zoo_document().to_json().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    for key in ["Name", "PackageName", "Language", "ParserVersion", "ReviewLines", "Navigation"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["ParserVersion"], env!("CARGO_PKG_VERSION"));
    assert_eq!(value["ReviewLines"][0]["LineId"], "Zoo");
    assert_eq!(value["Navigation"][0]["Text"], "Animal");
    assert_eq!(value["ReviewLines"][0]["Tokens"][0]["Kind"], 4);
}

#[test]
fn json_round_trips() {
    let doc = zoo_document();

    let back = ReviewDocument::from_json(&doc.to_json().unwrap()).unwrap();

    assert_eq!(back, doc);
}

#[test]
fn dependency_index_links_types_from_other_packages() {
    let (base, _) = emit_package(
        "Base",
        &[Item::Struct {
            name: "Food",
            fields: vec![],
            methods: vec![],
        }],
        None,
    );
    let index = DependencyIndex::new();
    index.insert_registry("Base", &base.registry);

    let (emitted, _) = emit_package("Zoo", &zoo(), Some(index));

    let feed = emitted.lines[0].children[3].children[0].tokens.clone();
    let food = feed.iter().find(|t| t.value() == "Food").unwrap();
    assert_eq!(food.navigate_to_id.as_deref(), Some("Base.Food"));
}
