//! Lexical scope chain
//!
//! Scopes live in an arena owned by [`Environment`]. Each frame stores the
//! handle of its enclosing frame, so a lookup walks parent handles instead of
//! references. Frames are strictly nested: [`Environment::enter`] opens a
//! child of the current frame and [`Environment::exit`] discards it again.
//!
//! # Handles
//!
//! A [`ScopeId`] carries the generation of the frame it was issued for. Once
//! that frame is discarded the handle resolves to nothing, even if a newer
//! frame reuses the same arena slot.
//!
//! # Shadowing
//!
//! [`Environment::put`] only ever writes the current frame. A name bound in an
//! inner frame hides the same name in every enclosing frame until the inner
//! frame is exited.

use rustc_hash::FxHashMap;
use std::fmt;

/// Basic types a declaration can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Int,
    Float,
    Char,
    Bool,
}

impl BasicType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(BasicType::Int),
            "float" => Some(BasicType::Float),
            "char" => Some(BasicType::Char),
            "bool" => Some(BasicType::Bool),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BasicType::Int => "int",
            BasicType::Float => "float",
            BasicType::Char => "char",
            BasicType::Bool => "bool",
        }
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a declared name stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub ty: BasicType,
    pub line: usize, // Line of the declaration
}

impl Symbol {
    pub fn new(ty: BasicType, line: usize) -> Self {
        Symbol { ty, line }
    }
}

/// Handle to a frame in an [`Environment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId {
    index: usize,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Frame<S> {
    table: FxHashMap<String, S>,
    parent: Option<ScopeId>,
    generation: u64,
}

/// Arena of nested scopes
#[derive(Debug, Clone)]
pub struct Environment<S = Symbol> {
    frames: Vec<Frame<S>>,
    next_generation: u64,
}

impl<S> Environment<S> {
    /// Create an environment holding only the root frame.
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame {
                table: FxHashMap::default(),
                parent: None,
                generation: 0,
            }],
            next_generation: 1,
        }
    }

    /// Handle of the innermost live frame.
    pub fn current(&self) -> ScopeId {
        let index = self.frames.len() - 1;
        ScopeId {
            index,
            generation: self.frames[index].generation,
        }
    }

    /// The root frame's handle.
    pub fn root(&self) -> ScopeId {
        ScopeId {
            index: 0,
            generation: self.frames[0].generation,
        }
    }

    /// Number of live frames, the root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open a frame nested in the current one.
    pub fn enter(&mut self) -> ScopeId {
        let parent = self.current();
        let generation = self.next_generation;
        self.next_generation += 1;
        self.frames.push(Frame {
            table: FxHashMap::default(),
            parent: Some(parent),
            generation,
        });
        self.current()
    }

    /// Discard the current frame and return to its parent.
    ///
    /// Returns `None` when only the root frame is left; the root cannot be exited.
    pub fn exit(&mut self) -> Option<ScopeId> {
        if self.frames.len() == 1 {
            return None;
        }
        self.frames.pop();
        Some(self.current())
    }

    /// Bind `name` in the current frame, returning the binding it replaced in
    /// that frame. Enclosing frames are never touched.
    pub fn put(&mut self, name: impl Into<String>, symbol: S) -> Option<S> {
        let index = self.frames.len() - 1;
        self.frames[index].table.insert(name.into(), symbol)
    }

    /// Innermost binding of `name` visible from the current frame.
    pub fn get(&self, name: &str) -> Option<&S> {
        self.get_from(self.current(), name)
    }

    /// Innermost binding of `name` visible from `scope`.
    ///
    /// A handle to a discarded frame finds nothing.
    pub fn get_from(&self, scope: ScopeId, name: &str) -> Option<&S> {
        let mut next = Some(scope);
        while let Some(id) = next {
            let frame = self.frame(id)?;
            if let Some(symbol) = frame.table.get(name) {
                return Some(symbol);
            }
            next = frame.parent;
        }
        None
    }

    fn frame(&self, id: ScopeId) -> Option<&Frame<S>> {
        self.frames
            .get(id.index)
            .filter(|frame| frame.generation == id.generation)
    }
}

impl<S> Default for Environment<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_binding_shadows_outer() {
        let mut env = Environment::new();
        env.put("x", Symbol::new(BasicType::Int, 1));
        let outer = env.current();

        env.enter();
        env.put("x", Symbol::new(BasicType::Bool, 2));
        assert_eq!(env.get("x").map(|s| s.ty), Some(BasicType::Bool));

        env.exit();
        assert_eq!(env.get_from(outer, "x").map(|s| s.ty), Some(BasicType::Int));
    }

    #[test]
    fn test_lookup_walks_to_root() {
        let mut env = Environment::new();
        env.put("g", Symbol::new(BasicType::Char, 1));
        env.enter();
        env.enter();
        assert_eq!(env.depth(), 3);
        assert_eq!(env.get("g").map(|s| s.ty), Some(BasicType::Char));
        assert!(env.get("missing").is_none());
    }

    #[test]
    fn test_put_returns_replaced_binding() {
        let mut env: Environment<u32> = Environment::new();
        assert_eq!(env.put("a", 1), None);
        assert_eq!(env.put("a", 2), Some(1));
        env.enter();
        assert_eq!(env.put("a", 3), None);
        env.exit();
        assert_eq!(env.get("a"), Some(&2));
    }

    #[test]
    fn test_stale_handle_finds_nothing() {
        let mut env: Environment<u32> = Environment::new();
        let first = env.enter();
        env.put("a", 1);
        env.exit();

        let second = env.enter();
        env.put("a", 2);
        assert_ne!(first, second);
        assert_eq!(env.get_from(first, "a"), None);
        assert_eq!(env.get_from(second, "a"), Some(&2));
    }

    #[test]
    fn test_root_cannot_be_exited() {
        let mut env: Environment<u32> = Environment::new();
        assert_eq!(env.exit(), None);
        let child = env.enter();
        assert_eq!(env.current(), child);
        assert_eq!(env.exit(), Some(env.root()));
    }

    #[test]
    fn test_basic_type_names() {
        assert_eq!(BasicType::from_name("bool"), Some(BasicType::Bool));
        assert_eq!(BasicType::from_name("string"), None);
        assert_eq!(BasicType::Float.to_string(), "float");
    }
}
