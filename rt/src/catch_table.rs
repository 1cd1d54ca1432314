//! Tables for catching thrown exceptions.
//!
//! A CatchTable is used to track which instruction ranges of a method are
//! protected by a handler. When an exception is thrown the unwinder looks for
//! an entry covering the current instruction, and jumps to its handler.
use crate::class::ClassRef;

/// The type of exception an entry catches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchType {
    /// Any exception is caught (e.g. a `finally` block).
    Any,

    /// Only instances of the referenced class are caught.
    Class(ClassRef),
}

impl CatchType {
    /// Returns the catch type for a raw constant pool index, where zero means
    /// "catch anything".
    pub fn from_index(index: u16) -> CatchType {
        ClassRef::new(index).map_or(CatchType::Any, CatchType::Class)
    }
}

#[derive(Debug, Clone)]
pub struct CatchEntry {
    /// The start of the protected range, excluding the instruction at this
    /// offset.
    pub start_pc: u16,

    /// The end of the protected range, including the instruction at this
    /// offset.
    pub end_pc: u16,

    /// The instruction offset to jump to.
    pub handler_pc: u16,

    pub catch_type: CatchType,
}

impl CatchEntry {
    pub fn new(
        start_pc: u16,
        end_pc: u16,
        handler_pc: u16,
        catch_type: CatchType,
    ) -> Self {
        CatchEntry { start_pc, end_pc, handler_pc, catch_type }
    }

    /// Returns `true` if the instruction at `pc` is protected by this entry.
    pub fn covers(&self, pc: u16) -> bool {
        self.start_pc < pc && pc <= self.end_pc
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatchTable {
    pub entries: Vec<CatchEntry>,
}

impl CatchTable {
    pub fn new() -> Self {
        CatchTable { entries: Vec::new() }
    }

    /// Returns the entries covering `pc`, in declaration order.
    pub fn covering(&self, pc: u16) -> impl Iterator<Item = &CatchEntry> {
        self.entries.iter().filter(move |entry| entry.covers(pc))
    }
}
