//! In-memory workspace fixture shared by the integration tests.
//!
//! Files are built with `lunar_syntax::make`. Name resolution is a small
//! lexical walk: a name refers to the last `local` (or `local function`)
//! of that name in an enclosing block that starts at or before the use,
//! then to a global `function name()` in the same file, then to a declared
//! global type. The walk is deliberately naive: `local x = x` resolves the
//! right-hand `x` to the declaration it sits in.

#![allow(dead_code)]

use lunar_common::{FileId, InFile, ModuleIndex};
use lunar_infer::{Declaration, Engine, InferSettings, NameResolver, SourceDatabase, Ty};
use lunar_syntax::ast::expr::{CallExpr, Expr, NameExpr};
use lunar_syntax::ast::stmt::{Block, FuncBody, FuncStmt, LocalFuncStmt, SourceFile, Stmt};
use lunar_syntax::ast::AstNode;
use lunar_syntax::{GreenNode, SyntaxKind, SyntaxNode};
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct Workspace {
    files: Vec<GreenNode>,
    modules: ModuleIndex,
    globals: FxHashMap<String, Ty>,
    function_annotations: FxHashMap<String, Ty>,
    pub settings: InferSettings,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file that is not reachable through `require`.
    pub fn add_file(&mut self, green: GreenNode) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(green);
        id
    }

    /// Add a file and register it under the module path of `relative`.
    pub fn add_module(&mut self, relative: &str, green: GreenNode) -> FileId {
        let id = self.add_file(green);
        self.modules.add_file(id, relative);
        id
    }

    pub fn declare_global(&mut self, name: &str, ty: Ty) {
        self.globals.insert(name.to_string(), ty);
    }

    /// Attach a declared type to the function named `name` (as written in
    /// its declaration, e.g. `Foo.new`).
    pub fn annotate_function(&mut self, name: &str, ty: Ty) {
        self.function_annotations.insert(name.to_string(), ty);
    }

    pub fn engine(&self) -> Engine<'_> {
        Engine::new(self, self, &self.settings)
    }

    pub fn root(&self, file: FileId) -> SyntaxNode {
        SyntaxNode::new_root(self.files[file.0 as usize].clone())
    }

    /// The first expression in `file` whose source text is `text`.
    pub fn find_expr(&self, file: FileId, text: &str) -> Expr {
        self.root(file)
            .descendants()
            .filter_map(Expr::cast)
            .find(|e| e.text() == text)
            .unwrap_or_else(|| panic!("no expression `{}` in {:?}", text, file))
    }

    /// The first expression of the file-level `return`.
    pub fn returned(&self, file: FileId) -> Expr {
        SourceFile::cast(self.root(file))
            .and_then(|sf| sf.return_stmt())
            .and_then(|ret| ret.first_expr())
            .expect("file should return an expression")
    }

    pub fn infer_text(&self, file: FileId, text: &str) -> Ty {
        let expr = self.find_expr(file, text);
        self.engine().infer_expr(InFile::new(file, &expr))
    }

    pub fn infer_returned(&self, file: FileId) -> Ty {
        let expr = self.returned(file);
        self.engine().infer_expr(InFile::new(file, &expr))
    }

    fn local_declaration(&self, file: FileId, name: &NameExpr, text: &str) -> Option<Declaration> {
        let offset = name.syntax().text_range().start();
        for block in name.syntax().ancestors().filter_map(Block::cast) {
            let mut found = None;
            for stmt in block.stmts() {
                if stmt.syntax().text_range().start() > offset {
                    break;
                }
                match &stmt {
                    Stmt::Local(local) => {
                        for (i, declared) in local.names().iter().enumerate() {
                            if declared.text().as_deref() == Some(text) {
                                found = Some(match local.initializer(i) {
                                    Some(init) => Declaration::Initializer(InFile::new(file, init)),
                                    None => Declaration::Annotated(Ty::Nil),
                                });
                            }
                        }
                    }
                    Stmt::LocalFunc(func) => {
                        if func.name().and_then(|n| n.text()).as_deref() == Some(text) {
                            if let Some(body) = func.body() {
                                found = Some(Declaration::Function(InFile::new(file, body)));
                            }
                        }
                    }
                    _ => {}
                }
            }
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// A `function <target>() ... end` or `local function <target>()` body
    /// anywhere in `file`.
    fn function_named(&self, file: FileId, target: &str) -> Option<FuncBody> {
        let root = self.root(file);
        for node in root.descendants() {
            if let Some(func) = FuncStmt::cast(node.clone()) {
                if func.target().map(|t| t.text()).as_deref() == Some(target) {
                    return func.body();
                }
            }
            if let Some(func) = LocalFuncStmt::cast(node) {
                if func.name().and_then(|n| n.text()).as_deref() == Some(target) {
                    return func.body();
                }
            }
        }
        None
    }
}

impl SourceDatabase for Workspace {
    fn parse(&self, file: FileId) -> Option<SyntaxNode> {
        self.files
            .get(file.0 as usize)
            .map(|green| SyntaxNode::new_root(green.clone()))
    }

    fn lookup_module(&self, path: &str, _origin: FileId) -> Option<FileId> {
        self.modules.resolve(path)
    }
}

impl NameResolver for Workspace {
    fn resolve_name(&self, name: InFile<&NameExpr>) -> Option<Declaration> {
        let text = name.value.name()?;
        if let Some(decl) = self.local_declaration(name.file_id, name.value, &text) {
            return Some(decl);
        }
        if let Some(ty) = self.globals.get(&text) {
            return Some(Declaration::Annotated(ty.clone()));
        }
        self.function_named(name.file_id, &text)
            .map(|body| Declaration::Function(InFile::new(name.file_id, body)))
    }

    fn resolve_call_target(&self, call: InFile<&CallExpr>) -> Option<InFile<FuncBody>> {
        let callee = call.value.callee()?.text();
        self.function_named(call.file_id, &callee)
            .map(|body| InFile::new(call.file_id, body))
    }

    fn annotated_function(&self, body: InFile<&FuncBody>) -> Option<Ty> {
        let owner = body.value.syntax().parent()?;
        let name = match owner.kind() {
            SyntaxKind::FUNC_STMT => FuncStmt::cast(owner)?.target()?.text(),
            SyntaxKind::LOCAL_FUNC_STMT => LocalFuncStmt::cast(owner)?.name()?.text()?,
            _ => return None,
        };
        self.function_annotations.get(&name).cloned()
    }
}
