//! Helper functions for writing unit tests.
use crate::catalog::RuntimeException;
use crate::catch_table::{CatchEntry, CatchTable, CatchType};
use crate::class::{Class, ClassId, ClassRef, ClassTable, Constant};
use crate::config::Config;
use crate::error::Fatal;
use crate::exception::construct_and_unwind;
use crate::mem::{Heap, ObjectRef, Value};
use crate::method::{Code, LineTable, Method};
use crate::runtime::{
    Allocator, ClassLoader, Completion, Invoker, Resolution, Runtime,
};
use crate::thread::{Frame, Thread};
use std::sync::Arc;

const THROWABLE: &str = "java/lang/Throwable";
const RUNTIME_EXCEPTION: &str = "java/lang/RuntimeException";
const STRING: &str = "java/lang/String";
const CHAR_ARRAY: &str = "[C";

/// What the constructor of an exception does when invoked.
pub(crate) enum Constructor {
    /// The constructor returns without doing anything.
    Empty,

    /// The constructor sets the exception's message.
    Message(String),

    /// The constructor raises a runtime exception from the given frame.
    ///
    /// The frame is pushed onto the thread before raising, and popped when
    /// the exception is caught by the frame itself. `times` is the number of
    /// constructor calls that raise an exception, after which the constructor
    /// behaves like `Empty`.
    Raise { kind: RuntimeException, frame: Frame, times: usize },
}

/// A class whose static initializer raises a runtime exception the first time
/// the class is loaded.
pub(crate) struct Initializer {
    pub(crate) class: String,
    pub(crate) raise: RuntimeException,

    /// The frame of the initializer, pushed before raising.
    pub(crate) frame: Frame,
}

/// A runtime that loads classes from a fixed list of classes, and runs
/// constructors according to a `Constructor`.
pub(crate) struct TestRuntime {
    pub(crate) classes: ClassTable,
    pub(crate) heap: Heap,
    pub(crate) config: Config,
    pub(crate) constructor: Constructor,
    pub(crate) initializer: Option<Initializer>,

    /// The classes that can be loaded but aren't loaded yet.
    pub(crate) loadable: Vec<Class>,

    /// The names of the classes loaded, in the order they were loaded in.
    pub(crate) loaded: Vec<String>,

    /// The objects of which the constructor ran.
    pub(crate) constructed: Vec<ObjectRef>,
}

impl TestRuntime {
    /// Returns a runtime in which all runtime exceptions can be loaded.
    ///
    /// `java/lang/RuntimeException` and its superclass are loaded upfront,
    /// and all other runtime exceptions are subclasses of it.
    pub(crate) fn new() -> TestRuntime {
        let mut classes = ClassTable::new();
        let throwable = classes.define(exception_class(THROWABLE, None));
        let base =
            classes.define(exception_class(RUNTIME_EXCEPTION, Some(throwable)));
        let mut string = Class::new(STRING.to_string(), "String.java".into());

        string.fields = 1;
        classes.define(string);
        classes.define(Class::new(CHAR_ARRAY.to_string(), String::new()));

        let loadable = RuntimeException::ALL
            .iter()
            .map(|kind| kind.name())
            .filter(|&name| name != RUNTIME_EXCEPTION)
            .map(|name| exception_class(name, Some(base)))
            .collect();

        TestRuntime {
            classes,
            heap: Heap::new(),
            config: Config::new(),
            constructor: Constructor::Empty,
            initializer: None,
            loadable,
            loaded: Vec::new(),
            constructed: Vec::new(),
        }
    }

    pub(crate) fn define_class(&mut self, name: &str, file: &str) -> ClassId {
        self.classes.define(Class::new(name.to_string(), file.to_string()))
    }

    /// Defines an exception class without going through the class loader.
    pub(crate) fn define_exception(&mut self, name: &str) -> ClassId {
        let class = match self.loadable.iter().position(|c| c.name == name) {
            Some(index) => self.loadable.remove(index),
            None => exception_class(
                name,
                self.classes.id_of(RUNTIME_EXCEPTION),
            ),
        };

        self.classes.define(class)
    }

    /// Adds a class that is loaded the first time it's resolved.
    pub(crate) fn define_loadable(&mut self, name: &str, file: &str) {
        self.loadable.push(Class::new(name.to_string(), file.to_string()));
    }

    /// Makes a class impossible to load.
    pub(crate) fn forget(&mut self, name: &str) {
        self.loadable.retain(|class| class.name != name);
    }

    /// Adds a class reference to the constant pool of `owner`, and returns a
    /// catch type for it.
    pub(crate) fn catch_type(
        &mut self,
        owner: ClassId,
        name: &str,
    ) -> CatchType {
        let constants = &mut self.classes.get_mut(owner).constants;

        constants.push(Constant::Class(name.to_string()));
        CatchType::Class(ClassRef::new(constants.len() as u16).unwrap())
    }

    pub(crate) fn thread(&self, name: &str, class: ClassId) -> Thread {
        Thread::new(name.to_string(), class)
    }

    fn set_message(&mut self, object: ObjectRef, message: &str) {
        let string = self.classes.id_of(STRING).unwrap();
        let chars = self.classes.id_of(CHAR_ARRAY).unwrap();
        let chars = self.heap.allocate_chars(chars, message);
        let string = self.heap.allocate(&self.classes, string);

        self.heap.get_mut(string).set_field(0, Value::Reference(chars));
        self.heap.get_mut(object).set_field(0, Value::Reference(string));
    }
}

impl ClassLoader for TestRuntime {
    fn classes(&self) -> &ClassTable {
        &self.classes
    }

    fn resolve_or_load(
        &mut self,
        thread: &mut Thread,
        name: &str,
    ) -> Result<Resolution, Fatal> {
        if let Some(id) = self.classes.id_of(name) {
            return Ok(Resolution::Loaded(id));
        }

        if self.initializer.as_ref().is_some_and(|init| init.class == name) {
            if let Some(init) = self.initializer.take() {
                thread.push_frame(init.frame);

                let handler = construct_and_unwind(self, thread, init.raise)?;

                if handler.popped > 0 {
                    return Ok(Resolution::Unwound(handler));
                }

                thread.pop_frame();
            }
        }

        let index = match self.loadable.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => return Ok(Resolution::Missing),
        };
        let class = self.loadable.remove(index);

        self.loaded.push(name.to_string());
        Ok(Resolution::Loaded(self.classes.define(class)))
    }
}

impl Allocator for TestRuntime {
    fn heap(&self) -> &Heap {
        &self.heap
    }

    fn allocate(&mut self, class: ClassId) -> ObjectRef {
        self.heap.allocate(&self.classes, class)
    }
}

impl Invoker for TestRuntime {
    fn invoke_default_constructor(
        &mut self,
        thread: &mut Thread,
        object: ObjectRef,
    ) -> Result<Completion, Fatal> {
        self.constructed.push(object);

        let (kind, frame) = match &mut self.constructor {
            Constructor::Empty => return Ok(Completion::Returned),
            Constructor::Message(message) => {
                let message = message.clone();

                self.set_message(object, &message);
                return Ok(Completion::Returned);
            }
            Constructor::Raise { times: 0, .. } => {
                return Ok(Completion::Returned);
            }
            Constructor::Raise { kind, frame, times } => {
                *times -= 1;
                (*kind, frame.clone())
            }
        };

        thread.push_frame(frame);

        let handler = construct_and_unwind(self, thread, kind)?;

        if handler.popped > 0 {
            return Ok(Completion::Unwound(handler));
        }

        // The handler is in the constructor, which then returns normally.
        thread.pop_frame();
        Ok(Completion::Returned)
    }
}

impl Runtime for TestRuntime {
    fn config(&self) -> &Config {
        &self.config
    }
}

fn exception_class(name: &str, superclass: Option<ClassId>) -> Class {
    let file = format!("{}.java", name.rsplit('/').next().unwrap_or(name));
    let mut class = Class::new(name.to_string(), file);

    class.superclass = superclass;
    class.fields = 1;
    class
}

pub(crate) fn method(
    owner: ClassId,
    name: &str,
    entries: Vec<CatchEntry>,
) -> Arc<Method> {
    let code = Code {
        catch_table: CatchTable { entries },
        lines: LineTable::default(),
    };

    Arc::new(Method::new(name.to_string(), owner, code))
}
