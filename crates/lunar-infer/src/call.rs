//! Call resolution.
//!
//! The type of `f(...)` comes from what `f` may be: every signature of
//! every function member contributes its return type, and every class
//! member contributes itself (an invocable table). Arguments are not used
//! to pick an overload. When the callee's type says nothing, the call is
//! resolved by name to a function body instead. Constructor-style calls
//! (`Foo.new()`) additionally yield the owning object's type.

use lunar_common::InFile;
use lunar_syntax::ast::expr::{CallExpr, Expr};
use tracing::debug;

use crate::engine::Engine;
use crate::guard::InferCtx;
use crate::ty::Ty;
use crate::union::UnionBuilder;

/// Add `ty` unless it is the bare `Unknown` sentinel, which contributes
/// nothing to a call's result.
fn contribute(result: &mut UnionBuilder, ty: Ty) {
    if !ty.is_unknown() {
        result.add(ty);
    }
}

impl Engine<'_> {
    /// The type a call expression evaluates to.
    ///
    /// A signature whose return is the bare `Unknown` adds nothing, so
    /// overloads returning `unknown` and `number` give `number`; `a or b`
    /// keeps `unknown|number` instead.
    pub fn call_type(&self, call: InFile<&CallExpr>, ctx: &mut InferCtx) -> Ty {
        let Some(callee) = call.value.callee() else {
            return Ty::Unknown;
        };
        if self.settings.is_require_function(callee.text().trim()) {
            return self.require_type(call, ctx);
        }

        let callee_ty = self.infer(call.with_value(&callee), ctx);
        let mut result = UnionBuilder::new();
        for member in callee_ty.members() {
            match member {
                Ty::Function(func) => {
                    for sig in func.signatures() {
                        contribute(&mut result, sig.ret.clone());
                    }
                }
                Ty::Class(_) => contribute(&mut result, member.clone()),
                _ => {}
            }
        }

        let mut ty = result.build();
        if ty.is_unknown() {
            if let Some(body) = self.names.resolve_call_target(call) {
                debug!(callee = %callee.text(), "callee type unresolved, using its declared body");
                ty = self.func_body_return_type(body.as_ref(), ctx);
            }
        }

        if let Some(owner) = self.constructor_owner_type(call.with_value(&callee), ctx) {
            ty = if ty.is_unknown() {
                owner
            } else if owner.is_unknown() {
                ty
            } else {
                ty.union(owner)
            };
        }
        ty
    }

    /// For `obj.new(...)` where `new` is a configured constructor name, the
    /// type of `obj`.
    fn constructor_owner_type(&self, callee: InFile<&Expr>, ctx: &mut InferCtx) -> Option<Ty> {
        let Expr::Index(index) = callee.value else {
            return None;
        };
        let name = index.field_name()?;
        if !self.settings.is_constructor_name(&name) {
            return None;
        }
        let base = index.base()?;
        Some(self.infer(callee.with_value(&base), ctx))
    }
}
