//! Typed AST nodes for statements, blocks and function bodies.

use crate::ast::expr::{CallExpr, Expr};
use crate::ast::{ast_node, child_node, child_nodes, child_token, AstNode};
use crate::cst::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

// ── Source File ──────────────────────────────────────────────────────────

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }

    /// The file-level `return` statement: what `require` hands back.
    pub fn return_stmt(&self) -> Option<ReturnStmt> {
        self.block()?.stmts().find_map(|stmt| match stmt {
            Stmt::Return(ret) => Some(ret),
            _ => None,
        })
    }
}

// ── Block ────────────────────────────────────────────────────────────────

ast_node!(Block, BLOCK);

impl Block {
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.syntax.children().filter_map(Stmt::cast)
    }
}

/// Any statement node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Local(LocalStmt),
    LocalFunc(LocalFuncStmt),
    Func(FuncStmt),
    Return(ReturnStmt),
    Call(CallStmt),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::LOCAL_STMT => Some(Stmt::Local(LocalStmt { syntax: node })),
            SyntaxKind::LOCAL_FUNC_STMT => Some(Stmt::LocalFunc(LocalFuncStmt { syntax: node })),
            SyntaxKind::FUNC_STMT => Some(Stmt::Func(FuncStmt { syntax: node })),
            SyntaxKind::RETURN_STMT => Some(Stmt::Return(ReturnStmt { syntax: node })),
            SyntaxKind::CALL_STMT => Some(Stmt::Call(CallStmt { syntax: node })),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Stmt::Local(n) => &n.syntax,
            Stmt::LocalFunc(n) => &n.syntax,
            Stmt::Func(n) => &n.syntax,
            Stmt::Return(n) => &n.syntax,
            Stmt::Call(n) => &n.syntax,
        }
    }
}

// ── Names ────────────────────────────────────────────────────────────────

ast_node!(Name, NAME);

impl Name {
    pub fn text(&self) -> Option<String> {
        child_token(&self.syntax, SyntaxKind::IDENT).map(|t| t.text().to_string())
    }
}

ast_node!(NameList, NAME_LIST);

impl NameList {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(ExprList, EXPR_LIST);

impl ExprList {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

// ── Local Declarations ───────────────────────────────────────────────────

ast_node!(LocalStmt, LOCAL_STMT);

impl LocalStmt {
    pub fn names(&self) -> Vec<Name> {
        child_node::<NameList>(&self.syntax)
            .map(|list| list.names().collect())
            .unwrap_or_default()
    }

    pub fn exprs(&self) -> Vec<Expr> {
        child_node::<ExprList>(&self.syntax)
            .map(|list| list.exprs().collect())
            .unwrap_or_default()
    }

    /// The initializer paired with the `index`-th declared name, if any.
    pub fn initializer(&self, index: usize) -> Option<Expr> {
        self.exprs().into_iter().nth(index)
    }
}

ast_node!(LocalFuncStmt, LOCAL_FUNC_STMT);

impl LocalFuncStmt {
    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<FuncBody> {
        child_node(&self.syntax)
    }
}

// ── Function Declarations ────────────────────────────────────────────────

ast_node!(FuncStmt, FUNC_STMT);

impl FuncStmt {
    /// The assigned name: a name expression or a field path like `Foo.new`.
    pub fn target(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn body(&self) -> Option<FuncBody> {
        child_node(&self.syntax)
    }
}

ast_node!(FuncBody, FUNC_BODY);

impl FuncBody {
    pub fn param_list(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }

    /// Declared parameter names, `...` excluded.
    pub fn params(&self) -> Vec<Name> {
        self.param_list()
            .map(|list| child_nodes(&list.syntax).collect())
            .unwrap_or_default()
    }

    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }

    /// The `return` statements belonging to this body.
    ///
    /// Returns inside nested function bodies belong to those bodies and are
    /// skipped.
    pub fn return_stmts(&self) -> Vec<ReturnStmt> {
        self.syntax
            .descendants()
            .filter_map(ReturnStmt::cast)
            .filter(|ret| {
                ret.syntax
                    .ancestors()
                    .find(|node| node.kind() == SyntaxKind::FUNC_BODY)
                    .as_ref()
                    == Some(&self.syntax)
            })
            .collect()
    }
}

ast_node!(ParamList, PARAM_LIST);

// ── Return and Call Statements ───────────────────────────────────────────

ast_node!(ReturnStmt, RETURN_STMT);

impl ReturnStmt {
    pub fn exprs(&self) -> Vec<Expr> {
        child_node::<ExprList>(&self.syntax)
            .map(|list| list.exprs().collect())
            .unwrap_or_default()
    }

    /// The first returned expression; the one a single-value context sees.
    pub fn first_expr(&self) -> Option<Expr> {
        self.exprs().into_iter().next()
    }
}

ast_node!(CallStmt, CALL_STMT);

impl CallStmt {
    pub fn call(&self) -> Option<CallExpr> {
        child_node(&self.syntax)
    }
}
