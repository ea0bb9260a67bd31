//! Symbols, the symbol arena and name tables.

use jsmz_parser::NodeIndex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 0;
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 1;
    pub const PROPERTY: u32 = 1 << 2;
    pub const FUNCTION: u32 = 1 << 4;
    pub const CLASS: u32 = 1 << 5;
    pub const ALIAS: u32 = 1 << 21;
    /// Exported through a CommonJS-style assignment
    pub const EXPORT_VALUE: u32 = 1 << 22;

    pub const VARIABLE: u32 = FUNCTION_SCOPED_VARIABLE | BLOCK_SCOPED_VARIABLE;
    pub const VALUE: u32 = VARIABLE | PROPERTY | FUNCTION | CLASS;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub flags: u32,
    pub escaped_name: String,
    /// Declarations in source order; usually one.
    pub declarations: SmallVec<[NodeIndex; 2]>,
    pub value_declaration: NodeIndex,
    /// Local an export symbol refers to (`{ A }` exports the local `A`).
    pub export_target: Option<SymbolId>,
}

impl Symbol {
    pub fn has_flags(&self, flags: u32) -> bool {
        self.flags & flags != 0
    }
}

/// Owns every symbol created while binding one file.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> SymbolArena {
        SymbolArena::default()
    }

    pub fn alloc(&mut self, flags: u32, escaped_name: String) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            flags,
            escaped_name,
            declarations: SmallVec::new(),
            value_declaration: NodeIndex::NONE,
            export_target: None,
        });
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Name to symbol map for one scope or export surface. Iteration follows
/// insertion order so reports are stable.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    ids: FxHashMap<String, SymbolId>,
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.ids.get(name).copied()
    }

    pub fn has(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn set(&mut self, name: String, id: SymbolId) {
        if self.ids.insert(name.clone(), id).is_none() {
            self.order.push(name);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> + '_ {
        self.order
            .iter()
            .filter_map(|name| Some((name.as_str(), self.get(name)?)))
    }
}
