//! Identity allocation and name lookup.
//!
//! Every namespace is a flat table keyed by bare and qualified names. A later
//! registration under an existing key replaces the earlier one, so two
//! packages declaring `New` leave only the last visited `New` reachable by its
//! bare name. This is accepted: resolution is best-effort by name.

use crate::types::{IdPrefix, NodeId};
use std::collections::HashMap;

/// Where a struct's record lives, for appending bound methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSlot {
    pub id: NodeId,
    /// Module key (path relative to the project root)
    pub module: String,
    /// Position in that module's `structs`
    pub index: usize,
}

/// A registered type as seen by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTarget {
    pub id: NodeId,
    pub is_struct: bool,
}

#[derive(Debug, Default)]
pub struct SymbolRegistry {
    next_seq: u64,
    /// Functions by `name`, `package.name`, and methods by `Type.Method`
    functions: HashMap<String, NodeId>,
    structs: HashMap<String, NodeId>,
    /// Structs and interfaces
    types: HashMap<String, NodeId>,
    /// Structs by `package.Type`
    owners: HashMap<String, StructSlot>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier; the counter is shared by all prefixes and starts at 1
    pub fn allocate(&mut self, prefix: IdPrefix) -> NodeId {
        self.next_seq += 1;
        NodeId::new(prefix, self.next_seq)
    }

    /// Number of identifiers handed out so far
    pub fn allocated(&self) -> u64 {
        self.next_seq
    }

    pub fn register_function(&mut self, package: &str, name: &str, id: NodeId) {
        self.functions.insert(format!("{package}.{name}"), id);
        self.functions.insert(name.to_string(), id);
    }

    pub fn register_method(&mut self, receiver: &str, name: &str, id: NodeId) {
        self.functions.insert(format!("{receiver}.{name}"), id);
    }

    pub fn register_struct(&mut self, name: &str, slot: StructSlot, package: &str) {
        self.structs.insert(name.to_string(), slot.id);
        self.types.insert(name.to_string(), slot.id);
        self.owners.insert(format!("{package}.{name}"), slot);
    }

    pub fn register_interface(&mut self, name: &str, id: NodeId) {
        self.types.insert(name.to_string(), id);
    }

    pub fn function(&self, key: &str) -> Option<NodeId> {
        self.functions.get(key).copied()
    }

    pub fn struct_id(&self, name: &str) -> Option<NodeId> {
        self.structs.get(name).copied()
    }

    pub fn type_id(&self, name: &str) -> Option<NodeId> {
        self.types.get(name).copied()
    }

    /// Struct first, then any registered type
    pub fn type_target(&self, name: &str) -> Option<TypeTarget> {
        if let Some(id) = self.struct_id(name) {
            return Some(TypeTarget { id, is_struct: true });
        }
        self.type_id(name).map(|id| TypeTarget {
            id,
            is_struct: false,
        })
    }

    /// Owning struct for a receiver type declared in `package`
    pub fn owner(&self, package: &str, type_name: &str) -> Option<&StructSlot> {
        self.owners.get(&format!("{package}.{type_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_one_sequence_across_prefixes() {
        let mut registry = SymbolRegistry::new();
        let a = registry.allocate(IdPrefix::Func);
        let b = registry.allocate(IdPrefix::Struct);
        let c = registry.allocate(IdPrefix::Func);

        assert_eq!(a.to_string(), "func_1");
        assert_eq!(b.to_string(), "struct_2");
        assert_eq!(c.to_string(), "func_3");
        assert_eq!(registry.allocated(), 3);
    }

    #[test]
    fn functions_resolve_by_bare_and_qualified_name() {
        let mut registry = SymbolRegistry::new();
        let id = registry.allocate(IdPrefix::Func);
        registry.register_function("bank", "Open", id);

        assert_eq!(registry.function("Open"), Some(id));
        assert_eq!(registry.function("bank.Open"), Some(id));
        assert_eq!(registry.function("other.Open"), None);
    }

    #[test]
    fn later_registration_wins_on_collision() {
        let mut registry = SymbolRegistry::new();
        let first = registry.allocate(IdPrefix::Func);
        let second = registry.allocate(IdPrefix::Func);
        registry.register_function("a", "New", first);
        registry.register_function("b", "New", second);

        assert_eq!(registry.function("New"), Some(second));
        assert_eq!(registry.function("a.New"), Some(first));
    }

    #[test]
    fn structs_are_types_and_owners() {
        let mut registry = SymbolRegistry::new();
        let account = registry.allocate(IdPrefix::Struct);
        let store = registry.allocate(IdPrefix::Interface);
        registry.register_struct(
            "Account",
            StructSlot {
                id: account,
                module: "bank/account.go".into(),
                index: 0,
            },
            "bank",
        );
        registry.register_interface("Store", store);

        assert_eq!(
            registry.type_target("Account"),
            Some(TypeTarget {
                id: account,
                is_struct: true
            })
        );
        assert_eq!(
            registry.type_target("Store"),
            Some(TypeTarget {
                id: store,
                is_struct: false
            })
        );
        assert_eq!(registry.owner("bank", "Account").map(|s| s.index), Some(0));
        assert!(registry.owner("other", "Account").is_none());
    }
}
