//! Integration tests for `require` resolution across files.

mod common;

use std::io::Write;

use common::Workspace;
use lunar_common::{FileId, InFile};
use lunar_infer::{InferCtx, InferSettings, ModuleHandle, SharedTypeCache, Ty};
use lunar_syntax::{make, GreenNode, SyntaxKind};

// ── Helpers ────────────────────────────────────────────────────────────

fn require(path: &str) -> GreenNode {
    make::call(make::name_ref("require"), vec![make::string(path)])
}

/// A module file that returns `value`.
fn module_returning(value: GreenNode) -> GreenNode {
    make::source_file(vec![make::ret(vec![value])])
}

/// A workspace with a global class `Foo` and a `mymodule.lua` returning it.
fn workspace_with_foo_module() -> Workspace {
    let mut ws = Workspace::new();
    ws.declare_global("Foo", Ty::class("Foo"));
    ws.add_module("mymodule.lua", module_returning(make::name_ref("Foo")));
    ws
}

fn main_file(ws: &mut Workspace, result: GreenNode) -> FileId {
    ws.add_file(module_returning(result))
}

// ── Resolution ─────────────────────────────────────────────────────────

#[test]
fn require_yields_the_module_return_type() {
    let mut ws = workspace_with_foo_module();
    let main = main_file(&mut ws, require("mymodule"));
    assert_eq!(ws.infer_returned(main), Ty::class("Foo"));
}

#[test]
fn required_value_flows_through_a_local() {
    let mut ws = workspace_with_foo_module();
    let main = ws.add_file(make::source_file(vec![
        make::local(&["m"], vec![require("mymodule")]),
        make::ret(vec![make::name_ref("m")]),
    ]));
    assert_eq!(ws.infer_returned(main), Ty::class("Foo"));
}

#[test]
fn paren_less_require() {
    let mut ws = workspace_with_foo_module();
    let main = main_file(&mut ws, make::call_str(make::name_ref("require"), "mymodule"));
    assert_eq!(ws.infer_returned(main), Ty::class("Foo"));
}

#[test]
fn module_locals_resolve_in_the_module_file() {
    let mut ws = Workspace::new();
    ws.add_module(
        "util.lua",
        make::source_file(vec![
            make::local(&["M"], vec![make::string("v1")]),
            make::call_stmt(make::call(make::name_ref("print"), vec![make::name_ref("M")])),
            make::ret(vec![make::name_ref("M")]),
        ]),
    );
    let main = main_file(&mut ws, require("util"));
    assert_eq!(ws.infer_returned(main), Ty::String);
}

#[test]
fn missing_module_is_unknown() {
    let mut ws = workspace_with_foo_module();
    let main = main_file(&mut ws, require("missing"));
    assert!(ws.infer_returned(main).is_unknown());
}

#[test]
fn non_literal_argument_is_unknown() {
    let mut ws = workspace_with_foo_module();
    let main = ws.add_file(make::source_file(vec![
        make::local(&["name"], vec![make::string("mymodule")]),
        make::ret(vec![make::call(
            make::name_ref("require"),
            vec![make::name_ref("name")],
        )]),
    ]));
    assert!(ws.infer_returned(main).is_unknown());
}

#[test]
fn module_without_return_is_unknown() {
    let mut ws = Workspace::new();
    ws.add_module(
        "side_effects.lua",
        make::source_file(vec![make::local(&["x"], vec![make::number("1")])]),
    );
    let main = main_file(&mut ws, require("side_effects"));
    assert!(ws.infer_returned(main).is_unknown());
}

#[test]
fn dotted_path_finds_nested_module() {
    let mut ws = Workspace::new();
    let http = ws.add_module("net/http.lua", module_returning(make::number("1")));
    let main = main_file(&mut ws, require("net.http"));
    assert_eq!(ws.infer_returned(main), Ty::Number);

    let handle = ws.engine().resolve_module("net.http", main);
    assert_eq!(
        handle,
        Some(ModuleHandle {
            file: http,
            path: "net/http".to_string(),
        })
    );
}

#[test]
fn directory_module_through_init() {
    let mut ws = Workspace::new();
    let init = ws.add_module("net/init.lua", module_returning(make::boolean(true)));
    let main = main_file(&mut ws, require("net"));
    assert_eq!(ws.infer_returned(main), Ty::Boolean);
    assert_eq!(
        ws.engine().resolve_module("net", main).map(|h| h.file),
        Some(init)
    );
}

// ── Cycles and modes ───────────────────────────────────────────────────

#[test]
fn cyclic_requires_terminate() {
    let mut ws = Workspace::new();
    let a = ws.add_module("a.lua", module_returning(require("b")));
    ws.add_module("b.lua", module_returning(require("a")));
    assert!(ws.infer_returned(a).is_unknown());
}

#[test]
fn cyclic_requires_keep_the_known_part() {
    let mut ws = Workspace::new();
    let a = ws.add_module(
        "a.lua",
        module_returning(make::binary(require("b"), SyntaxKind::OR_KW, make::number("1"))),
    );
    ws.add_module("b.lua", module_returning(require("a")));
    let ty = ws.infer_returned(a);
    assert!(ty.members().contains(&Ty::Number), "got `{}`", ty);
}

#[test]
fn local_only_mode_does_not_follow_require() {
    let mut ws = workspace_with_foo_module();
    let main = main_file(&mut ws, require("mymodule"));
    let expr = ws.returned(main);
    let cache = SharedTypeCache::new();
    let engine = ws.engine().with_cache(&cache);

    let full = engine.infer(InFile::new(main, &expr), &mut InferCtx::new());
    assert_eq!(full, Ty::class("Foo"));

    // The full-mode entry must not answer a local-only request.
    let local = engine.infer(InFile::new(main, &expr), &mut InferCtx::local_only());
    assert!(local.is_unknown());
}

// ── Settings ───────────────────────────────────────────────────────────

#[test]
fn custom_require_function() {
    let mut ws = workspace_with_foo_module();
    ws.settings = InferSettings::from_toml_str(r#"require-functions = ["import"]"#).unwrap();
    let main = main_file(
        &mut ws,
        make::call(make::name_ref("import"), vec![make::string("mymodule")]),
    );
    assert_eq!(ws.infer_returned(main), Ty::class("Foo"));

    // `require` is now an ordinary, unresolved global.
    let main = main_file(&mut ws, require("mymodule"));
    assert!(ws.infer_returned(main).is_unknown());
}

#[test]
fn module_patterns_from_a_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lunar.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, r#"module-patterns = ["lib/?", "lib/?/init"]"#).unwrap();
    drop(file);

    let mut ws = Workspace::new();
    ws.settings = InferSettings::from_file(&path).unwrap();
    ws.add_module("lib/util.lua", module_returning(make::string("u")));
    ws.add_module("util.lua", module_returning(make::number("0")));

    let main = main_file(&mut ws, require("util"));
    assert_eq!(ws.infer_returned(main), Ty::String);
}
