//! Guest objects and the heap they are allocated on.
//!
//! The heap is an arena of objects addressed by `ObjectRef`. Collection of
//! unreachable objects is the garbage collector's concern and isn't modelled
//! here: the dispatch code only allocates exceptions and reads objects.
use crate::class::{ClassId, ClassTable};

/// A reference to an object on the heap.
///
/// References are never null, a null reference is expressed as
/// `Value::Null` (or an `Option<ObjectRef>`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ObjectRef(pub u32);

/// The value of a field or array slot.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i32),
    Long(i64),
    Char(u16),
    Reference(ObjectRef),
}

impl Value {
    pub fn as_reference(self) -> Option<ObjectRef> {
        match self {
            Value::Reference(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_char(self) -> Option<u16> {
        match self {
            Value::Char(val) => Some(val),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Object {
    Instance { class: ClassId, fields: Vec<Value> },
    Array { class: ClassId, values: Vec<Value> },
}

impl Object {
    pub fn class(&self) -> ClassId {
        match self {
            Object::Instance { class, .. } | Object::Array { class, .. } => {
                *class
            }
        }
    }

    /// Returns the value of an instance field.
    ///
    /// Arrays don't have fields, so this always returns `None` for them.
    pub fn field(&self, index: usize) -> Option<Value> {
        match self {
            Object::Instance { fields, .. } => fields.get(index).copied(),
            Object::Array { .. } => None,
        }
    }

    pub fn set_field(&mut self, index: usize, value: Value) -> bool {
        match self {
            Object::Instance { fields, .. } => match fields.get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            Object::Array { .. } => false,
        }
    }

    /// Returns the values of an array, or `None` for regular instances.
    pub fn array_values(&self) -> Option<&[Value]> {
        match self {
            Object::Array { values, .. } => Some(values),
            Object::Instance { .. } => None,
        }
    }
}

#[derive(Default)]
pub struct Heap {
    objects: Vec<Object>,
}

impl Heap {
    pub fn new() -> Heap {
        Heap { objects: Vec::new() }
    }

    /// Allocates an instance with all its fields set to null.
    pub fn allocate(
        &mut self,
        classes: &ClassTable,
        class: ClassId,
    ) -> ObjectRef {
        let fields = vec![Value::Null; classes.get(class).fields as usize];

        self.push(Object::Instance { class, fields })
    }

    pub fn allocate_array(
        &mut self,
        class: ClassId,
        values: Vec<Value>,
    ) -> ObjectRef {
        self.push(Object::Array { class, values })
    }

    /// Allocates a `char[]` containing the UTF-16 code units of `value`.
    pub fn allocate_chars(
        &mut self,
        class: ClassId,
        value: &str,
    ) -> ObjectRef {
        let values = value.encode_utf16().map(Value::Char).collect();

        self.allocate_array(class, values)
    }

    pub fn get(&self, obj: ObjectRef) -> &Object {
        &self.objects[obj.0 as usize]
    }

    /// Returns the object `obj` refers to, or `None` if it refers to an
    /// object that doesn't exist.
    pub fn try_get(&self, obj: ObjectRef) -> Option<&Object> {
        self.objects.get(obj.0 as usize)
    }

    pub fn get_mut(&mut self, obj: ObjectRef) -> &mut Object {
        &mut self.objects[obj.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn push(&mut self, object: Object) -> ObjectRef {
        let obj = ObjectRef(self.objects.len() as u32);

        self.objects.push(object);
        obj
    }
}
