//! Exceptions raised by the runtime itself.
//!
//! Guest code raises exceptions by constructing an object and throwing it. The
//! runtime has no such object when it detects a fault (e.g. a null
//! dereference), so it instead refers to the exception class by a small
//! identifier, and looks up the class using the names in this module.

/// The fully qualified names of the runtime exceptions, indexed by their
/// identifier.
const NAMES: [&str; 16] = [
    "java/lang/NullPointerException",
    "java/lang/IndexOutOfBoundsException",
    "java/lang/ArrayIndexOutOfBoundsException",
    "java/lang/IncompatibleClassChangeError",
    "java/lang/NegativeArraySizeException",
    "java/lang/OutOfMemoryError",
    "java/lang/ClassNotFoundException",
    "java/lang/ArithmeticException",
    "java/lang/NoSuchFieldError",
    "java/lang/NoSuchMethodError",
    "java/lang/RuntimeException",
    "java/io/IOException",
    "java/io/FileNotFoundException",
    "java/lang/InterruptedException",
    "java/lang/NumberFormatException",
    "java/lang/StringIndexOutOfBoundsException",
];

/// How a class name is mapped back to a catalog identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LookupMode {
    /// The name must equal the catalog name.
    Exact,

    /// The first catalog name (in identifier order) that contains the name is
    /// used.
    ///
    /// This can produce false positives: "Exception" matches
    /// NullPointerException, and "java/lang/IndexOutOfBoundsException"
    /// would also match any later name containing it. Ambiguous matches are
    /// not reported.
    Substring,
}

impl LookupMode {
    pub(crate) fn parse(value: &str) -> Option<LookupMode> {
        match value {
            "exact" => Some(LookupMode::Exact),
            "substring" => Some(LookupMode::Substring),
            _ => None,
        }
    }
}

/// An exception raised by the runtime.
///
/// The discriminant of each variant is its catalog identifier. Identifiers are
/// dense and start at zero.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RuntimeException {
    NullPointer = 0,
    IndexOutOfBounds = 1,
    ArrayIndexOutOfBounds = 2,
    IncompatibleClassChange = 3,
    NegativeArraySize = 4,
    OutOfMemory = 5,
    ClassNotFound = 6,
    Arithmetic = 7,
    NoSuchField = 8,
    NoSuchMethod = 9,
    Runtime = 10,
    Io = 11,
    FileNotFound = 12,
    Interrupted = 13,
    NumberFormat = 14,
    StringIndexOutOfBounds = 15,
}

impl RuntimeException {
    /// All runtime exceptions, in identifier order.
    pub const ALL: [RuntimeException; 16] = [
        RuntimeException::NullPointer,
        RuntimeException::IndexOutOfBounds,
        RuntimeException::ArrayIndexOutOfBounds,
        RuntimeException::IncompatibleClassChange,
        RuntimeException::NegativeArraySize,
        RuntimeException::OutOfMemory,
        RuntimeException::ClassNotFound,
        RuntimeException::Arithmetic,
        RuntimeException::NoSuchField,
        RuntimeException::NoSuchMethod,
        RuntimeException::Runtime,
        RuntimeException::Io,
        RuntimeException::FileNotFound,
        RuntimeException::Interrupted,
        RuntimeException::NumberFormat,
        RuntimeException::StringIndexOutOfBounds,
    ];

    pub fn from_identifier(identifier: u8) -> Option<RuntimeException> {
        RuntimeException::ALL.get(identifier as usize).copied()
    }

    /// Returns the identifier of the exception whose class is `name`.
    pub fn identifier_for(name: &str, mode: LookupMode) -> Option<u8> {
        let found = match mode {
            LookupMode::Exact => NAMES.iter().position(|&n| n == name),
            LookupMode::Substring => {
                NAMES.iter().position(|n| n.contains(name))
            }
        };

        found.map(|index| index as u8)
    }

    pub fn identifier(self) -> u8 {
        self as u8
    }

    /// Returns the fully qualified class name of this exception.
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }
}
