//! Human readable descriptions of thrown exceptions.
use crate::class::ClassTable;
use crate::mem::{Heap, ObjectRef};
use crate::method::DEFAULT_LINE;
use crate::thread::Thread;
use std::fmt::Write;

/// The method name shown when a thread has no frames.
const UNKNOWN_METHOD: &str = "<unknown>";

/// Returns the message printed when `throwable` isn't caught.
///
/// The location is that of the current frame of `thread`. If the thread has
/// no frames, the thread's class is shown instead.
pub fn message_for(
    classes: &ClassTable,
    heap: &Heap,
    thread: &Thread,
    throwable: ObjectRef,
) -> String {
    let class = heap.get(throwable).class();
    let (owner, method, line) = match thread.current_frame() {
        Some(frame) => {
            (frame.method.owner, frame.method.name.as_str(), frame.line())
        }
        None => (thread.class, UNKNOWN_METHOD, DEFAULT_LINE),
    };

    let mut buffer = String::new();
    let _ = write!(
        buffer,
        "Exception in thread \"{}\" {}\n\tat {}.{}({}:{})",
        thread.name,
        class.name(classes),
        owner.name(classes),
        method,
        owner.source_file(classes),
        line
    );

    buffer
}

/// Returns the message stored in a thrown exception.
///
/// The first field of an exception refers to a `String`, and the first field
/// of a `String` refers to its `char[]`. If any of these references is
/// missing or doesn't refer to an object of the right shape, the exception has
/// no message and `None` is returned.
pub fn text_of(heap: &Heap, throwable: ObjectRef) -> Option<String> {
    let string = heap.try_get(throwable)?.field(0)?.as_reference()?;
    let chars = heap.try_get(string)?.field(0)?.as_reference()?;
    let units = heap
        .try_get(chars)?
        .array_values()?
        .iter()
        .map(|value| value.as_char())
        .collect::<Option<Vec<u16>>>()?;

    Some(
        char::decode_utf16(units)
            .map(|chr| chr.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect(),
    )
}
