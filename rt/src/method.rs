//! Method metadata used while unwinding.
use crate::catch_table::CatchTable;
use crate::class::ClassId;

/// The line number assigned to code that has no line number information.
pub const DEFAULT_LINE: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEntry {
    pub start_pc: u16,
    pub line: u16,
}

/// A table that maps instruction offsets to source lines.
///
/// Entries are expected to be sorted by their start offset. The table isn't
/// sorted when created, and lookups with an unsorted table produce
/// meaningless (but harmless) results.
#[derive(Debug, Clone, Default)]
pub struct LineTable {
    pub entries: Vec<LineEntry>,
}

impl LineTable {
    pub fn new(entries: Vec<LineEntry>) -> LineTable {
        LineTable { entries }
    }

    /// Returns the line of the instruction at `pc`.
    ///
    /// This is the line of the last entry that starts _before_ `pc`, or
    /// `DEFAULT_LINE` if there is no such entry.
    pub fn line_for(&self, pc: u16) -> u16 {
        let mut line = DEFAULT_LINE;

        for entry in &self.entries {
            if pc > entry.start_pc {
                line = entry.line;
            }
        }

        line
    }
}

/// The code attribute of a method.
#[derive(Debug, Clone, Default)]
pub struct Code {
    pub catch_table: CatchTable,
    pub lines: LineTable,
}

/// A method of a loaded class.
///
/// Methods are shared between the frames executing them, and between threads,
/// so they're usually wrapped in an `Arc`.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,

    /// The class that declares this method.
    pub owner: ClassId,
    pub code: Code,
}

impl Method {
    pub fn new(name: String, owner: ClassId, code: Code) -> Method {
        Method { name, owner, code }
    }
}
