//! Memoized lazy values, lazy streams, and numerical methods that are
//! written as generators of ever better approximations plus a separate
//! convergence test.
//!
//! ```
//! use lazy_streams::{numeric, within, Stream};
//!
//! let root = numeric::sqrt(1.0, 1e-8, 2.0).last().unwrap();
//! assert!((root - 2f64.sqrt()).abs() <= 1e-8);
//!
//! let halves = Stream::unfold(1.0, |x| x / 2.0);
//! assert_eq!(within(0.2, &halves).to_vec(), vec![1.0, 0.5, 0.25, 0.125]);
//! ```

/// A thunk that already holds its value.
#[macro_export]
macro_rules! ready {
    ($e:expr) => {
        {
            use $crate::Thunk;
            Thunk::ready($e)
        }
    }
}

/// A thunk that evaluates `$e` on first use.
///
/// `lazy!(clone(a, b) { ... })` clones the named handles before moving them
/// into the deferred block, so the originals stay usable.
#[macro_export]
macro_rules! lazy {
    ($e:expr) => {
        {
            use $crate::Thunk;
            Thunk::lazy(move || $e)
        }
    };
    (clone($( $arg:ident ),*) $e:block) => {
        {
            use $crate::Thunk;
            $(
                let $arg = $arg.clone();
            )*
            Thunk::lazy(move || $e)
        }
    }
}

/// A finite stream of the listed values.
#[macro_export]
macro_rules! stream {
    () => {
        $crate::Stream::empty()
    };
    ($( $e:expr ),+ $(,)?) => {
        $crate::Stream::of([$( $e ),+])
    }
}

pub mod converge;
pub mod error;
pub mod list;
pub mod numeric;
pub mod stream;
mod thunk;

#[cfg(test)]
mod tests;

pub use crate::converge::{within, withre, Tolerance};
pub use crate::error::{Error, Result};
pub use crate::list::{List, Tree};
pub use crate::stream::Stream;
pub use crate::thunk::Thunk;
