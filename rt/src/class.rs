//! Class descriptors and the registry of loaded classes.
use indexmap::IndexMap;
use std::num::NonZeroU16;

/// The ID of a loaded class.
///
/// IDs are indexes into a `ClassTable`, so two IDs are the same class if and
/// only if they are equal.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ClassId(pub u32);

impl ClassId {
    pub fn name(self, table: &ClassTable) -> &str {
        &table.get(self).name
    }

    pub fn source_file(self, table: &ClassTable) -> &str {
        &table.get(self).source_file
    }

    pub fn superclass(self, table: &ClassTable) -> Option<ClassId> {
        table.get(self).superclass
    }

    /// Returns `true` if `self` is `other` or one of its subclasses.
    pub fn is_subclass_of(self, table: &ClassTable, other: ClassId) -> bool {
        let mut current = Some(self);

        while let Some(id) = current {
            if id == other {
                return true;
            }

            current = id.superclass(table);
        }

        false
    }
}

/// A symbolic reference to a class, stored as an index into the constant
/// pool of the class that contains the reference.
///
/// Index zero is never a valid constant pool index.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ClassRef(pub NonZeroU16);

impl ClassRef {
    pub fn new(index: u16) -> Option<ClassRef> {
        NonZeroU16::new(index).map(ClassRef)
    }

    pub fn index(self) -> u16 {
        self.0.get()
    }
}

/// An entry in a constant pool.
///
/// Only the entries needed for resolving class references are modelled, any
/// other entry is stored as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Class(String),
    Other,
}

#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub source_file: String,
    pub superclass: Option<ClassId>,

    /// The number of fields of an instance of this class.
    pub fields: u16,

    /// The constant pool, starting at index 1.
    pub constants: Vec<Constant>,
}

impl Class {
    pub fn new(name: String, source_file: String) -> Class {
        Class {
            name,
            source_file,
            superclass: None,
            fields: 0,
            constants: Vec::new(),
        }
    }

    /// Returns the class name a symbolic reference points to.
    pub fn class_name_at(&self, reference: ClassRef) -> Option<&str> {
        match self.constants.get(reference.index() as usize - 1) {
            Some(Constant::Class(name)) => Some(name),
            _ => None,
        }
    }
}

/// The registry of loaded classes, keyed by their name.
#[derive(Default)]
pub struct ClassTable {
    classes: IndexMap<String, Class>,
}

impl ClassTable {
    pub fn new() -> ClassTable {
        ClassTable { classes: IndexMap::new() }
    }

    /// Adds a class, returning its ID.
    ///
    /// If a class with the same name is already defined, the existing class is
    /// kept and its ID is returned.
    pub fn define(&mut self, class: Class) -> ClassId {
        let entry = self.classes.entry(class.name.clone());
        let index = entry.index();

        entry.or_insert(class);
        ClassId(index as u32)
    }

    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.classes.get_index_of(name).map(|index| ClassId(index as u32))
    }

    pub fn get(&self, id: ClassId) -> &Class {
        &self.classes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: ClassId) -> &mut Class {
        &mut self.classes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
