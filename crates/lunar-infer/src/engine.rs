//! The inference entry point.
//!
//! [`Engine::infer`] consults the cache, enters the recursion guard, and
//! dispatches on the expression kind. Every path ends in a type; the worst
//! case is `Unknown`.

use lunar_common::InFile;
use lunar_syntax::ast::expr::{BinaryExpr, ClosureExpr, Expr, IndexExpr, NameExpr, UnaryExpr};
use lunar_syntax::ast::stmt::FuncBody;
use tracing::trace;

use crate::cache::{CacheKey, TypeCache};
use crate::guard::{ExprKey, InferCtx};
use crate::host::{Declaration, NameResolver, SourceDatabase};
use crate::ops::{binary_rule, literal_type, unary_rule, BinaryRule, UnaryRule};
use crate::settings::InferSettings;
use crate::ty::Ty;
use crate::union::UnionBuilder;

/// The inference engine: the collaborators one host hands to every request.
///
/// Cheap to build; hosts typically make one per query.
pub struct Engine<'a> {
    pub(crate) db: &'a dyn SourceDatabase,
    pub(crate) names: &'a dyn NameResolver,
    pub(crate) settings: &'a InferSettings,
    cache: Option<&'a dyn TypeCache>,
}

impl<'a> Engine<'a> {
    pub fn new(
        db: &'a dyn SourceDatabase,
        names: &'a dyn NameResolver,
        settings: &'a InferSettings,
    ) -> Self {
        Engine {
            db,
            names,
            settings,
            cache: None,
        }
    }

    /// Read through and write back to `cache`.
    pub fn with_cache(mut self, cache: &'a dyn TypeCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Infer `expr` as a fresh top-level request.
    pub fn infer_expr(&self, expr: InFile<&Expr>) -> Ty {
        let mut ctx = InferCtx::new();
        self.infer(expr, &mut ctx)
    }

    /// Infer `expr` within an ongoing request.
    pub fn infer(&self, expr: InFile<&Expr>, ctx: &mut InferCtx) -> Ty {
        let key = ExprKey::of(expr);
        let cache_key = CacheKey::new(key, ctx.mode());
        if let Some(ty) = self.cache.and_then(|cache| cache.get(&cache_key)) {
            trace!(?key, %ty, "type cache hit");
            return ty;
        }

        let Some(mut entered) = ctx.enter(key) else {
            trace!(?key, "expression already in flight, cutting recursion");
            return Ty::Unknown;
        };
        let ty = self.dispatch(expr, &mut entered);
        if entered.is_complete() {
            if let Some(cache) = self.cache {
                cache.insert(cache_key, ty.clone());
            }
        }
        ty
    }

    fn dispatch(&self, expr: InFile<&Expr>, ctx: &mut InferCtx) -> Ty {
        trace!(kind = ?expr.value.syntax().kind(), "inferring expression");
        match expr.value {
            Expr::Literal(lit) => literal_type(lit),
            Expr::Unary(un) => self.unary_type(expr.with_value(un), ctx),
            Expr::Binary(bin) => self.binary_type(expr.with_value(bin), ctx),
            Expr::Paren(paren) => match paren.expr() {
                Some(inner) => self.infer(expr.with_value(&inner), ctx),
                None => Ty::Unknown,
            },
            Expr::Closure(closure) => self.closure_type(expr.with_value(closure), ctx),
            Expr::Call(call) => self.call_type(expr.with_value(call), ctx),
            Expr::Name(name) => self.name_type(expr.with_value(name), ctx),
            Expr::Index(index) => self.index_type(expr.with_value(index), ctx),
            Expr::Table(_) => Ty::Unknown,
        }
    }

    // ── Operators ──────────────────────────────────────────────────────

    pub fn unary_type(&self, un: InFile<&UnaryExpr>, ctx: &mut InferCtx) -> Ty {
        let Some(op) = un.value.op() else {
            return Ty::Unknown;
        };
        match unary_rule(op.kind()) {
            UnaryRule::Operand => match un.value.operand() {
                Some(operand) => self.infer(un.with_value(&operand), ctx),
                None => Ty::Unknown,
            },
            UnaryRule::Number => Ty::Number,
            UnaryRule::Unknown => Ty::Unknown,
        }
    }

    pub fn binary_type(&self, bin: InFile<&BinaryExpr>, ctx: &mut InferCtx) -> Ty {
        let Some(op) = bin.value.op() else {
            return Ty::Unknown;
        };
        let rule = binary_rule(op.kind());
        if let Some(ty) = rule.fixed_result() {
            return ty;
        }
        let operand = |side: Option<Expr>, ctx: &mut InferCtx| match side {
            Some(e) => self.infer(bin.with_value(&e), ctx),
            None => Ty::Unknown,
        };
        match rule {
            BinaryRule::RightOperand => operand(bin.value.rhs(), ctx),
            BinaryRule::LeftOperand => operand(bin.value.lhs(), ctx),
            BinaryRule::EitherOperand => {
                let lhs = operand(bin.value.lhs(), ctx);
                let rhs = operand(bin.value.rhs(), ctx);
                lhs.union(rhs)
            }
            BinaryRule::Concat | BinaryRule::Relational | BinaryRule::Unknown => Ty::Unknown,
        }
    }

    // ── Names and members ──────────────────────────────────────────────

    fn name_type(&self, name: InFile<&NameExpr>, ctx: &mut InferCtx) -> Ty {
        match self.names.resolve_name(name) {
            Some(Declaration::Initializer(init)) => self.infer(init.as_ref(), ctx),
            Some(Declaration::Function(body)) => self.func_body_type(body.as_ref(), ctx),
            Some(Declaration::Annotated(ty)) => ty,
            None => Ty::Unknown,
        }
    }

    /// `base.field`: the declared type of `field` on every class `base` may be.
    fn index_type(&self, index: InFile<&IndexExpr>, ctx: &mut InferCtx) -> Ty {
        let (Some(base), Some(field)) = (index.value.base(), index.value.field_name()) else {
            return Ty::Unknown;
        };
        let base_ty = self.infer(index.with_value(&base), ctx);
        let mut result = UnionBuilder::new();
        for member in base_ty.members() {
            if let Some(ty) = member.as_class().and_then(|class| class.member(&field)) {
                result.add(ty.clone());
            }
        }
        result.build()
    }

    // ── Functions ──────────────────────────────────────────────────────

    fn closure_type(&self, closure: InFile<&ClosureExpr>, ctx: &mut InferCtx) -> Ty {
        match closure.value.body() {
            Some(body) => self.func_body_type(closure.with_value(&body), ctx),
            None => Ty::Unknown,
        }
    }

    /// The function type of a body: the host's annotation if it has one,
    /// otherwise one `Unknown` per parameter and the inferred return type.
    pub fn func_body_type(&self, body: InFile<&FuncBody>, ctx: &mut InferCtx) -> Ty {
        if let Some(ty) = self.names.annotated_function(body) {
            return ty;
        }
        let params = vec![Ty::Unknown; body.value.params().len()];
        Ty::function(params, self.func_body_return_type(body, ctx))
    }

    /// Union of what the body's own `return` statements yield.
    ///
    /// A bare `return` yields `Nil`; a body without any `return` is `Unknown`.
    pub fn func_body_return_type(&self, body: InFile<&FuncBody>, ctx: &mut InferCtx) -> Ty {
        let mut result = UnionBuilder::new();
        for ret in body.value.return_stmts() {
            match ret.first_expr() {
                Some(expr) => result.add(self.infer(body.with_value(&expr), ctx)),
                None => result.add(Ty::Nil),
            }
        }
        result.build()
    }
}
