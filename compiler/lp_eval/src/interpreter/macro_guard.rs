//! RAII guard for temporary macro-table bindings.
//!
//! `call` binds each argument in the macro table under its parameter
//! name. Whatever those names meant before the call must come back
//! afterwards, whether the body returned normally, failed, or panicked.
//! [`MacroBindings`] records the previous entry for every name it binds
//! and puts them all back when dropped.

use smallvec::SmallVec;

use crate::environment::{LocalScope, Macro, MacroTable};
use crate::value::Name;

/// Restores shadowed macro entries on drop.
///
/// Binding the same name twice through one guard is fine: restoration
/// runs in reverse order, so the oldest saved entry wins.
pub struct MacroBindings {
    table: LocalScope<MacroTable>,
    saved: SmallVec<[(Name, Option<Macro>); 4]>,
}

impl MacroBindings {
    pub fn new(table: LocalScope<MacroTable>) -> Self {
        MacroBindings {
            table,
            saved: SmallVec::new(),
        }
    }

    /// Bind `name` until this guard is dropped.
    pub fn bind(&mut self, name: Name, entry: Macro) {
        let previous = self.table.borrow_mut().insert(name.clone(), entry);
        self.saved.push((name, previous));
    }
}

impl Drop for MacroBindings {
    fn drop(&mut self) {
        let mut table = self.table.borrow_mut();
        while let Some((name, previous)) = self.saved.pop() {
            match previous {
                Some(entry) => {
                    table.insert(name, entry);
                }
                None => {
                    table.remove(&name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn value_of(table: &LocalScope<MacroTable>, name: &str) -> Option<Value> {
        match table.borrow().get(name) {
            Some(Macro::Value(value)) => Some(value),
            _ => None,
        }
    }

    #[test]
    fn new_names_are_removed_on_drop() {
        let table = LocalScope::<MacroTable>::default();
        {
            let mut guard = MacroBindings::new(table.clone());
            guard.bind(Name::from("x"), Macro::Value(Value::Int(1)));
            assert_eq!(value_of(&table, "x"), Some(Value::Int(1)));
        }
        assert!(table.borrow().is_empty());
    }

    #[test]
    fn shadowed_names_are_restored_on_drop() {
        let table = LocalScope::<MacroTable>::default();
        table
            .borrow_mut()
            .insert(Name::from("x"), Macro::Value(Value::Int(10)));
        {
            let mut outer = MacroBindings::new(table.clone());
            outer.bind(Name::from("x"), Macro::Value(Value::Int(1)));
            {
                let mut inner = MacroBindings::new(table.clone());
                inner.bind(Name::from("x"), Macro::Value(Value::Int(2)));
                assert_eq!(value_of(&table, "x"), Some(Value::Int(2)));
            }
            assert_eq!(value_of(&table, "x"), Some(Value::Int(1)));
        }
        assert_eq!(value_of(&table, "x"), Some(Value::Int(10)));
    }

    #[test]
    fn repeated_name_restores_the_oldest_entry() {
        let table = LocalScope::<MacroTable>::default();
        {
            let mut guard = MacroBindings::new(table.clone());
            guard.bind(Name::from("p"), Macro::Value(Value::Int(1)));
            guard.bind(Name::from("p"), Macro::Value(Value::Int(2)));
        }
        assert!(table.borrow().get("p").is_none());
    }

    #[test]
    fn restores_during_unwinding() {
        let table = LocalScope::<MacroTable>::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = MacroBindings::new(table.clone());
            guard.bind(Name::from("x"), Macro::Value(Value::Int(1)));
            panic!("body failed");
        }));
        assert!(result.is_err());
        assert!(table.borrow().is_empty());
    }
}
