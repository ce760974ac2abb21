//! Union algebra.
//!
//! Unions are always flat and duplicate-free: a `Union` never directly
//! contains another `Union`, and uniting a type with itself gives the type
//! back. `Unknown` is an ordinary member here, kept distinct from the types
//! it is united with.

use std::sync::Arc;

use serde::Serialize;

use crate::ty::Ty;

/// The member set of a union type. Always has at least two members.
///
/// Members keep first-insertion order for stable display; equality ignores
/// order.
#[derive(Clone, Debug, Serialize)]
pub struct TyUnion {
    members: Arc<[Ty]>,
}

impl TyUnion {
    pub fn members(&self) -> &[Ty] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, ty: &Ty) -> bool {
        self.members.contains(ty)
    }
}

impl PartialEq for TyUnion {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.members.iter().all(|m| other.contains(m))
    }
}

impl Eq for TyUnion {}

/// Accumulates a union, flattening and de-duplicating as members arrive.
#[derive(Debug, Default)]
pub struct UnionBuilder {
    members: Vec<Ty>,
}

impl UnionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `ty`; a union contributes each of its members.
    pub fn add(&mut self, ty: Ty) {
        match ty {
            Ty::Union(union) => {
                for member in union.members() {
                    self.add_one(member.clone());
                }
            }
            other => self.add_one(other),
        }
    }

    fn add_one(&mut self, ty: Ty) {
        if !self.members.contains(&ty) {
            self.members.push(ty);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Finish the union: nothing gives `Unknown`, one member gives that member.
    pub fn build(mut self) -> Ty {
        match self.members.len() {
            0 => Ty::Unknown,
            1 => self.members.pop().unwrap_or(Ty::Unknown),
            _ => Ty::Union(TyUnion {
                members: self.members.into(),
            }),
        }
    }
}

impl Ty {
    /// The union of two types.
    pub fn union(self, other: Ty) -> Ty {
        if self == other {
            return self;
        }
        let mut builder = UnionBuilder::new();
        builder.add(self);
        builder.add(other);
        builder.build()
    }

    /// The union of any number of types; `Unknown` when there are none.
    pub fn union_all(types: impl IntoIterator<Item = Ty>) -> Ty {
        let mut builder = UnionBuilder::new();
        for ty in types {
            builder.add(ty);
        }
        builder.build()
    }

    /// The members of this type viewed as a union.
    ///
    /// A non-union type is its own single member.
    pub fn members(&self) -> &[Ty] {
        match self {
            Ty::Union(union) => union.members(),
            other => std::slice::from_ref(other),
        }
    }
}
