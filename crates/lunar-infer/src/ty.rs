//! Type representation for inferred Lua expression types.
//!
//! A [`Ty`] is an immutable guess at what an expression may evaluate to.
//! Composite payloads sit behind `Arc`, so cloning a type is cheap and
//! types can be shared across requests and threads.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::union::TyUnion;

/// An inferred Lua type.
///
/// - `Unknown`: no information. Also the signal call resolution uses to
///   try a fallback.
/// - `Nil`, `Boolean`, `Number`, `String`: primitive kinds.
/// - `Function`: one or more call signatures (overloads).
/// - `Class`: a named object type, also invocable (`__call` tables,
///   constructor-style calls).
/// - `Union`: several possible types; see [`crate::union`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ty {
    Unknown,
    Nil,
    Boolean,
    Number,
    String,
    Function(Arc<TyFunction>),
    Class(Arc<TyClass>),
    Union(TyUnion),
}

impl Ty {
    /// A function type with a single signature.
    pub fn function(params: Vec<Ty>, ret: Ty) -> Ty {
        Ty::overloaded(vec![Signature::new(params, ret)])
    }

    /// A function type with several signatures.
    pub fn overloaded(signatures: Vec<Signature>) -> Ty {
        Ty::Function(Arc::new(TyFunction { signatures }))
    }

    /// A class with no declared members.
    pub fn class(name: impl Into<String>) -> Ty {
        Ty::Class(Arc::new(TyClass::new(name)))
    }

    /// Whether this is the `Unknown` sentinel itself (not a union containing it).
    pub fn is_unknown(&self) -> bool {
        matches!(self, Ty::Unknown)
    }

    pub fn as_function(&self) -> Option<&TyFunction> {
        match self {
            Ty::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&TyClass> {
        match self {
            Ty::Class(class) => Some(class),
            _ => None,
        }
    }
}

// ── Functions ──────────────────────────────────────────────────────────

/// A call signature: ordered parameter types and a return type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub params: Vec<Ty>,
    pub ret: Ty,
}

impl Signature {
    pub fn new(params: Vec<Ty>, ret: Ty) -> Self {
        Signature { params, ret }
    }
}

/// A function value's overload set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TyFunction {
    pub signatures: Vec<Signature>,
}

impl TyFunction {
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }
}

// ── Classes ────────────────────────────────────────────────────────────

/// A declared member of a class.
#[derive(Clone, Debug, Serialize)]
pub struct ClassMember {
    pub name: String,
    pub ty: Ty,
}

/// A named object type with its declared members.
///
/// Identity is the name: two `TyClass` values with the same name are the
/// same type even if one was built with fewer members. Members that refer
/// back to the class (a `new` returning the class) name it rather than
/// embedding it, so no cyclic values are needed.
#[derive(Clone, Debug, Serialize)]
pub struct TyClass {
    pub name: String,
    #[serde(skip)]
    pub members: Vec<ClassMember>,
}

impl PartialEq for TyClass {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name // members intentionally excluded
    }
}

impl Eq for TyClass {}

impl TyClass {
    pub fn new(name: impl Into<String>) -> Self {
        TyClass {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add a member, replacing an earlier one with the same name.
    pub fn with_member(mut self, name: impl Into<String>, ty: Ty) -> Self {
        let name = name.into();
        self.members.retain(|m| m.name != name);
        self.members.push(ClassMember { name, ty });
        self
    }

    /// The declared type of member `name`.
    pub fn member(&self, name: &str) -> Option<&Ty> {
        self.members.iter().find(|m| m.name == name).map(|m| &m.ty)
    }

    pub fn into_ty(self) -> Ty {
        Ty::Class(Arc::new(self))
    }
}

// ── Display ────────────────────────────────────────────────────────────

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fun(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "): {}", self.ret)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Unknown => write!(f, "unknown"),
            Ty::Nil => write!(f, "nil"),
            Ty::Boolean => write!(f, "boolean"),
            Ty::Number => write!(f, "number"),
            Ty::String => write!(f, "string"),
            Ty::Function(func) => {
                for (i, sig) in func.signatures.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{}", sig)?;
                }
                Ok(())
            }
            Ty::Class(class) => write!(f, "{}", class.name),
            Ty::Union(union) => {
                for (i, member) in union.members().iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{}", member)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn primitives_display() {
        assert_eq!(Ty::Unknown.to_string(), "unknown");
        assert_eq!(Ty::Nil.to_string(), "nil");
        assert_eq!(Ty::Boolean.to_string(), "boolean");
        assert_eq!(Ty::Number.to_string(), "number");
        assert_eq!(Ty::String.to_string(), "string");
    }

    #[test]
    fn function_display() {
        let f = Ty::function(vec![Ty::Number, Ty::String], Ty::Boolean);
        assert_snapshot!(f.to_string(), @"fun(number, string): boolean");
    }

    #[test]
    fn overloaded_display() {
        let f = Ty::overloaded(vec![
            Signature::new(vec![], Ty::Number),
            Signature::new(vec![Ty::Number], Ty::String),
        ]);
        assert_snapshot!(f.to_string(), @"fun(): number & fun(number): string");
    }

    #[test]
    fn class_identity_is_nominal() {
        let bare = Ty::class("Foo");
        let full = TyClass::new("Foo")
            .with_member("x", Ty::Number)
            .into_ty();
        assert_eq!(bare, full);
        assert_ne!(bare, Ty::class("Bar"));
        assert_eq!(full.to_string(), "Foo");
    }

    #[test]
    fn class_member_lookup_and_replace() {
        let class = TyClass::new("Point")
            .with_member("x", Ty::String)
            .with_member("x", Ty::Number);
        assert_eq!(class.member("x"), Some(&Ty::Number));
        assert_eq!(class.members.len(), 1);
        assert_eq!(class.member("y"), None);
    }

    #[test]
    fn function_returning_function() {
        let inner = Ty::function(vec![], Ty::Nil);
        let outer = Ty::function(vec![], inner.clone());
        let sig = &outer.as_function().unwrap().signatures()[0];
        assert_eq!(sig.ret, inner);
        assert_eq!(outer.to_string(), "fun(): fun(): nil");
    }
}
