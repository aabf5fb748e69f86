use grug::error::Error;
use grug::helpers::Helpers;
use grug::template_set::{TemplateSet, TemplateSetBuilder};
use minijinja::value::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::slice;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, body: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, body).unwrap();
    path
}

fn single_template(body: &str) -> (TempDir, TemplateSet) {
    let temp_dir = TempDir::new().unwrap();
    let file = write(temp_dir.path(), "page.txt", body);
    let set =
        TemplateSet::build(&[(temp_dir.path(), slice::from_ref(&file))], Helpers::builtin())
            .unwrap();
    (temp_dir, set)
}

#[test]
fn test_templates_are_keyed_by_logical_name() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let files = vec![
        write(root, "a.tmpl", "hello"),
        write(root, "sub/c.tmpl", "nested"),
    ];

    let set = TemplateSet::build(&[(root, files.as_slice())], Helpers::builtin()).unwrap();

    assert_eq!(set.names().collect::<Vec<_>>(), vec!["a.tmpl", "sub/c.tmpl"]);
    assert!(set.contains("sub/c.tmpl"));
    assert!(!set.contains("c.tmpl"));
    assert_eq!(set.path("a.tmpl"), Some(files[0].as_path()));
    assert_eq!(set.render_to_string("sub/c.tmpl").unwrap(), "nested");
}

#[test]
fn test_mk_slice_in_template() {
    let (_dir, set) = single_template(
        r#"{% for item in mkSlice(1, "x", true) %}{{ item }};{% endfor %}{{ mkSlice(1, "x", true)|length }}"#,
    );
    assert_eq!(set.render_to_string("page.txt").unwrap(), "1;x;True;3");
}

#[test]
fn test_mk_map_in_template() {
    let (_dir, set) = single_template(
        r#"{% set page = mkMap('{"title": "Home", "count": 1}') %}{{ page.title }} {{ page.count }}"#,
    );
    assert_eq!(set.render_to_string("page.txt").unwrap(), "Home 1");
}

#[test]
fn test_mk_map_keeps_key_order() {
    let (_dir, set) =
        single_template(r#"{% for k in mkMap('{"z": 1, "a": 2, "m": 3}') %}{{ k }}{% endfor %}"#);
    assert_eq!(set.render_to_string("page.txt").unwrap(), "zam");
}

#[test]
fn test_mk_map_keeps_nested_key_order() {
    let (_dir, set) = single_template(
        r#"{% for k in mkMap('{"o": {"z": 1, "a": 2}}').o %}{{ k }}{% endfor %}"#,
    );
    assert_eq!(set.render_to_string("page.txt").unwrap(), "za");
}

#[test]
fn test_mk_map_invalid_json_fails_render() {
    let (_dir, set) = single_template(r#"{{ mkMap("not json") }}"#);
    assert!(set.render_to_string("page.txt").is_err());
}

fn shout(s: &str) -> String {
    format!("{}!", s.to_uppercase())
}

#[test]
fn test_custom_helpers_are_registered() {
    let temp_dir = TempDir::new().unwrap();
    let file = write(temp_dir.path(), "page.txt", "{{ shout('hi') }}");

    let mut helpers = Helpers::new();
    helpers.register("shout", Value::from_function(shout));
    let set = TemplateSet::build(&[(temp_dir.path(), slice::from_ref(&file))], helpers).unwrap();

    assert_eq!(set.render_to_string("page.txt").unwrap(), "HI!");
}

#[test]
fn test_sets_do_not_share_helpers() {
    let temp_dir = TempDir::new().unwrap();
    let file = write(temp_dir.path(), "page.txt", "{{ mkSlice(1)|length }}");

    let files = slice::from_ref(&file);
    let with_builtins = TemplateSet::build(&[(temp_dir.path(), files)], Helpers::builtin()).unwrap();
    let without = TemplateSet::build(&[(temp_dir.path(), files)], Helpers::new()).unwrap();

    assert_eq!(with_builtins.render_to_string("page.txt").unwrap(), "1");
    assert!(without.render_to_string("page.txt").is_err());
}

#[test]
fn test_include_by_short_name_across_roots() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("site");
    let include = temp_dir.path().join("partials");
    let inputs = vec![write(&input, "sub/page.html", r#"<{% include "nav.html" %}>"#)];
    let includes = vec![write(&include, "menus/nav.html", "nav")];

    let set = TemplateSet::build(
        &[
            (input.as_path(), inputs.as_slice()),
            (include.as_path(), includes.as_slice()),
        ],
        Helpers::builtin(),
    )
    .unwrap();

    assert_eq!(set.render_to_string("sub/page.html").unwrap(), "<nav>");
    assert_eq!(set.render_to_string("menus/nav.html").unwrap(), "nav");
}

#[test]
fn test_logical_name_wins_over_short_name() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let files = vec![
        write(root, "page.txt", r#"{% include "item.txt" %}"#),
        write(root, "item.txt", "top"),
        write(root, "sub/item.txt", "nested"),
    ];

    let set = TemplateSet::build(&[(root, files.as_slice())], Helpers::builtin()).unwrap();

    assert_eq!(set.render_to_string("page.txt").unwrap(), "top");
}

#[test]
fn test_ambiguous_short_name_fails_render() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let files = vec![
        write(root, "page.txt", r#"{% include "item.txt" %}"#),
        write(root, "one/item.txt", "1"),
        write(root, "two/item.txt", "2"),
    ];

    let set = TemplateSet::build(&[(root, files.as_slice())], Helpers::builtin()).unwrap();

    let err = set.render_to_string("page.txt").unwrap_err();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    assert!(message.contains("ambiguous"));
    assert_eq!(set.render_to_string("one/item.txt").unwrap(), "1");
}

#[test]
fn test_duplicate_logical_name_fails_build() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("site");
    let include = temp_dir.path().join("partials");
    let inputs = vec![write(&input, "b.tmpl", "input")];
    let includes = vec![write(&include, "b.tmpl", "include")];

    let mut builder = TemplateSetBuilder::new(Helpers::builtin());
    builder.add_root(&input, &inputs).unwrap();
    match builder.add_root(&include, &includes) {
        Err(Error::DuplicateTemplateError { name, path }) => {
            assert_eq!(name, "b.tmpl");
            assert_eq!(path, includes[0]);
        }
        _ => panic!("Expected DuplicateTemplateError"),
    }
}

#[test]
fn test_syntax_error_fails_build() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let files = vec![
        write(root, "good.txt", "fine"),
        write(root, "bad.txt", "{% if %}"),
    ];

    match TemplateSet::build(&[(root, files.as_slice())], Helpers::builtin()) {
        Err(Error::TemplateParseError { path, .. }) => assert_eq!(path, files[1]),
        Err(e) => panic!("Expected TemplateParseError, got {e}"),
        Ok(_) => panic!("Expected build to fail"),
    }
}

#[test]
fn test_unreadable_source_fails_build() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let missing = root.join("missing.txt");

    let result = TemplateSet::build(&[(root, slice::from_ref(&missing))], Helpers::builtin());

    assert!(matches!(result, Err(Error::ReadError { .. })));
}
