//! Build regular expressions by chaining readable steps instead of writing
//! regex syntax by hand.
//!
//! ```
//! let hex = restructor::empty().char_of_ranges(&[("0", "9"), ("a", "f")]);
//! let uuid = hex
//!     .repeat_exactly(8)
//!     .then("-")
//!     .then(hex.repeat_exactly(4).then("-").repeat_exactly(3))
//!     .then(hex.repeat_exactly(12))
//!     .with_any_case(true)
//!     .search_one_line(true);
//! assert_eq!(
//!     uuid.to_string(),
//!     "/[0-9a-f]{8}-(?:[0-9a-f]{4}-){3}[0-9a-f]{12}/gi"
//! );
//! ```

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod ast;
pub mod builder;
pub mod combinators;
pub mod error;
pub mod escape;
pub mod parser;
pub mod pattern;
pub mod root;
pub mod stringify;

pub use builder::{ReStructor, Value};
pub use error::{Error, Result};
pub use pattern::{Captures, Match, Pattern};
pub use root::{Flags, RootNode, RootOptions};
pub use stringify::{stringify, Stringified};

/// Starts a builder from `value`.
pub fn restructor(value: impl Into<Value>) -> ReStructor {
    ReStructor::of(value)
}

/// Starts a builder from a value of any type.
///
/// Text, numbers, [`Pattern`]s and builders are accepted. Anything else
/// logs a warning (once per process) and yields the empty builder.
pub fn restructor_dyn(value: &dyn Any) -> ReStructor {
    match coerce(value) {
        Some(value) => ReStructor::of(value),
        None => {
            warn_unsupported_value();
            empty()
        }
    }
}

fn coerce(value: &dyn Any) -> Option<Value> {
    macro_rules! try_number {
        ($($ty:ty),*) => {
            $(
                if let Some(n) = value.downcast_ref::<$ty>() {
                    return Some(Value::from(*n));
                }
            )*
        };
    }

    if let Some(text) = value.downcast_ref::<&str>() {
        return Some(Value::from(*text));
    }
    if let Some(text) = value.downcast_ref::<String>() {
        return Some(Value::from(text));
    }
    if let Some(pattern) = value.downcast_ref::<Pattern>() {
        return Some(Value::from(pattern));
    }
    if let Some(builder) = value.downcast_ref::<ReStructor>() {
        return Some(Value::from(builder));
    }
    try_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
    None
}

/// Logs the unsupported-value warning. Returns whether it fired.
///
/// The latch starts unset, is set by the first warning and is never reset.
/// Release builds stay silent.
fn warn_unsupported_value() -> bool {
    static WARNED: AtomicBool = AtomicBool::new(false);

    if !cfg!(debug_assertions) || WARNED.swap(true, Ordering::Relaxed) {
        return false;
    }
    log::warn!("argument type is not supported, returning an empty builder");
    true
}

pub fn of(value: impl Into<Value>) -> ReStructor {
    ReStructor::of(value)
}

/// Matches any one of `values`.
pub fn or<I, V>(values: I) -> ReStructor
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    ReStructor::or_all(values)
}

/// Matches all of `values` in order.
pub fn seq<I, V>(values: I) -> ReStructor
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    ReStructor::seq_all(values)
}

pub fn empty() -> ReStructor {
    ReStructor::new()
}

pub fn whitespace() -> ReStructor {
    ReStructor::from_node(combinators::whitespace())
}

pub fn digit() -> ReStructor {
    ReStructor::from_node(combinators::digit())
}

pub fn tab() -> ReStructor {
    ReStructor::from_node(combinators::tab())
}

/// A whole word.
pub fn word() -> ReStructor {
    ReStructor::from_node(combinators::word())
}

/// Any kind of line break.
pub fn linebreak() -> ReStructor {
    ReStructor::from_node(combinators::linebreak())
}

/// One or more of any character.
pub fn any() -> ReStructor {
    ReStructor::from_node(combinators::something(ast::Node::Empty))
}
