//! Binding scopes, the operand stack, and the macro table.
//!
//! Scoping is flat: an [`Environment`] is one name-to-binding map, and a
//! child scope starts as a copy of its parent's map. The copy is
//! copy-on-write (the map sits behind an `Rc` and is only cloned when the
//! child first writes), so creating a scope per block, call, or loop
//! iteration is cheap. Writes in a child never reach the parent.
//!
//! The operand stack and macro table are different: one of each lives for
//! a whole top-level execution, and every scope created during it holds a
//! handle to the same instance.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use lp_lexer::TokenSlice;
use rustc_hash::FxHashMap;

use crate::builtins::Builtin;
use crate::value::{Name, Value};

/// Shared, single-threaded interior mutability for execution-wide state.
///
/// Cloning the handle shares the same underlying value.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Returns `true` if both handles point at the same value.
    #[cfg(test)]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// What a name is bound to in a scope.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Builtin(Builtin),
    Value(Value),
}

/// An operand stack entry: a value, and the word it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    /// The source word, when the operand came from a single word token.
    /// `=` assigns to this name.
    pub name: Option<Name>,
    pub value: Value,
    /// `false` when the word resolved to nothing and `value` is just the
    /// raw name.
    pub bound: bool,
}

impl Operand {
    pub fn named(name: Name, value: Value) -> Self {
        Operand {
            name: Some(name),
            value,
            bound: true,
        }
    }

    pub fn unnamed(value: Value) -> Self {
        Operand {
            name: None,
            value,
            bound: true,
        }
    }

    /// A word that resolved to nothing: its value is its own text.
    pub fn unbound(name: Name) -> Self {
        Operand {
            value: Value::Text(Rc::clone(&name)),
            name: Some(name),
            bound: false,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.bound) {
            (Some(name), false) => write!(f, "{name}"),
            (Some(name), true) => write!(f, "{name}={}", self.value),
            (None, _) => write!(f, "{}", self.value),
        }
    }
}

/// LIFO stack of pending operands.
#[derive(Debug, Default)]
pub struct OperandStack {
    entries: Vec<Operand>,
}

impl OperandStack {
    pub fn push(&mut self, operand: Operand) {
        self.entries.push(operand);
    }

    pub fn pop(&mut self) -> Option<Operand> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Comma-separated rendering, bottom first, for diagnostics.
    pub fn describe(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A macro table entry.
#[derive(Clone, Debug)]
pub enum Macro {
    /// Raw, unevaluated source from `define`; re-expanded on every
    /// reference.
    Source(TokenSlice),
    /// An already-evaluated argument bound to a parameter name by `call`.
    Value(Value),
}

/// Name to macro mapping, shared by every scope of one execution.
#[derive(Debug, Default)]
pub struct MacroTable {
    entries: FxHashMap<Name, Macro>,
}

impl MacroTable {
    pub fn get(&self, name: &str) -> Option<Macro> {
        self.entries.get(name).cloned()
    }

    /// Bind `name`, returning the entry it replaced.
    pub fn insert(&mut self, name: Name, entry: Macro) -> Option<Macro> {
        self.entries.insert(name, entry)
    }

    pub fn remove(&mut self, name: &str) -> Option<Macro> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The active scope for one evaluation frame.
#[derive(Clone, Debug)]
pub struct Environment {
    bindings: Rc<FxHashMap<Name, Binding>>,
    operands: LocalScope<OperandStack>,
    macros: LocalScope<MacroTable>,
    /// Nesting level: 0 at top level, +1 per child scope.
    depth: usize,
}

impl Environment {
    /// An environment with no bindings at all, not even builtins.
    pub fn new() -> Self {
        Self::with_state(LocalScope::default(), LocalScope::default())
    }

    /// An environment with every builtin bound under its name.
    pub fn with_builtins() -> Self {
        let mut env = Self::new();
        env.define_builtins();
        env
    }

    /// An environment with builtins, sharing a caller-provided operand
    /// stack and macro table.
    pub fn with_shared(operands: LocalScope<OperandStack>, macros: LocalScope<MacroTable>) -> Self {
        let mut env = Self::with_state(operands, macros);
        env.define_builtins();
        env
    }

    fn with_state(operands: LocalScope<OperandStack>, macros: LocalScope<MacroTable>) -> Self {
        Environment {
            bindings: Rc::default(),
            operands,
            macros,
            depth: 0,
        }
    }

    fn define_builtins(&mut self) {
        let bindings = Rc::make_mut(&mut self.bindings);
        for builtin in Builtin::ALL {
            bindings.insert(Name::from(builtin.name()), Binding::Builtin(builtin));
        }
    }

    /// A child scope: a copy of this scope's bindings, sharing the operand
    /// stack and macro table.
    #[must_use]
    pub fn child(&self) -> Environment {
        Environment {
            bindings: Rc::clone(&self.bindings),
            operands: self.operands.clone(),
            macros: self.macros.clone(),
            depth: self.depth.saturating_add(1),
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Look up a binding in this scope.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.bindings.get(name).cloned()
    }

    /// Bind `name` to `value` in this scope only.
    pub fn define(&mut self, name: Name, value: Value) {
        Rc::make_mut(&mut self.bindings).insert(name, Binding::Value(value));
    }

    /// Bind `name` to a builtin in this scope only.
    pub fn define_builtin(&mut self, name: Name, builtin: Builtin) {
        Rc::make_mut(&mut self.bindings).insert(name, Binding::Builtin(builtin));
    }

    pub fn push_operand(&self, operand: Operand) {
        self.operands.borrow_mut().push(operand);
    }

    pub fn pop_operand(&self) -> Option<Operand> {
        self.operands.borrow_mut().pop()
    }

    /// The shared operand stack.
    pub fn operands(&self) -> &LocalScope<OperandStack> {
        &self.operands
    }

    /// The shared macro table.
    pub fn macros(&self) -> &LocalScope<MacroTable> {
        &self.macros
    }

    /// Clear the operand stack and macro table so the next execution
    /// starts clean.
    pub fn reset_execution_state(&self) {
        self.operands.borrow_mut().clear();
        self.macros.borrow_mut().clear();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
