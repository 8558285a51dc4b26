//! Cutting infinite numeric streams down to a converged prefix.
//!
//! Every truncator here walks the stream pair by pair and stops right after
//! the first adjacent pair `(a, b)` that a closeness test accepts. The
//! elements before the cut are shared with the input, nothing past `b` is
//! ever forced.

use std::rc::Rc;

use tracing::trace;

use crate::stream::Stream;
use crate::thunk::Thunk;

pub const DEFAULT_EPS: f64 = 1e-8;

/// `|a - b| <= eps`
pub fn absolute(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// `|a - b| <= eps * |b|`
pub fn relative(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps * b.abs()
}

/// Which closeness test a truncation uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    Absolute(f64),
    Relative(f64),
}

impl Default for Tolerance {
    fn default() -> Tolerance {
        Tolerance::Absolute(DEFAULT_EPS)
    }
}

impl Tolerance {
    pub fn eps(&self) -> f64 {
        match *self {
            Tolerance::Absolute(eps) | Tolerance::Relative(eps) => eps,
        }
    }

    pub fn accepts(&self, a: f64, b: f64) -> bool {
        match *self {
            Tolerance::Absolute(eps) => absolute(a, b, eps),
            Tolerance::Relative(eps) => relative(a, b, eps),
        }
    }

    pub fn truncate(&self, stream: &Stream<f64>) -> Stream<f64> {
        match *self {
            Tolerance::Absolute(eps) => within(eps, stream),
            Tolerance::Relative(eps) => withre(eps, stream),
        }
    }

    /// Like [`truncate`](Tolerance::truncate) for streams whose elements may
    /// have failed. A pair containing an error counts as the end, so the
    /// error is always kept in the output.
    pub fn truncate_fallible<E>(&self, stream: &Stream<Result<f64, E>>) -> Stream<Result<f64, E>>
    where
        E: Clone + 'static,
    {
        let tolerance = *self;
        truncate_when(stream, move |a, b| match (a, b) {
            (Ok(a), Ok(b)) => tolerance.accepts(*a, *b),
            _ => true,
        })
    }
}

/// Ends `stream` right after the first adjacent pair for which `close`
/// holds. Empty and single element streams come back unchanged.
pub fn truncate_when<T, P>(stream: &Stream<T>, close: P) -> Stream<T>
where
    T: Clone + 'static,
    P: Fn(&T, &T) -> bool + 'static,
{
    truncate_rc(stream, Rc::new(close))
}

fn truncate_rc<T>(stream: &Stream<T>, close: Rc<dyn Fn(&T, &T) -> bool>) -> Stream<T>
where
    T: Clone + 'static,
{
    let (head, tail) = match stream {
        Stream::Empty => return Stream::Empty,
        Stream::Node(head, tail) => (head.clone(), tail.clone()),
    };
    let first = head.clone();
    let rest = Thunk::lazy(move || match tail.force() {
        Stream::Empty => Stream::Empty,
        Stream::Node(next, _) => {
            if close(first.force(), next.force()) {
                Stream::node(next.clone(), Thunk::ready(Stream::Empty))
            } else {
                truncate_rc(tail.force(), close.clone())
            }
        }
    });
    Stream::node(head, rest)
}

/// Truncation with a closeness test that takes the tolerance as its third
/// argument.
pub fn within_by<P>(stream: &Stream<f64>, eps: f64, close: P) -> Stream<f64>
where
    P: Fn(f64, f64, f64) -> bool + 'static,
{
    truncate_when(stream, move |a, b| {
        let done = close(*a, *b, eps);
        if done {
            trace!(a = *a, b = *b, eps, "converged");
        }
        done
    })
}

/// Stops once two neighbours differ by at most `eps`.
pub fn within(eps: f64, stream: &Stream<f64>) -> Stream<f64> {
    within_by(stream, eps, absolute)
}

/// Stops once two neighbours differ by at most `eps` relative to the later one.
pub fn withre(eps: f64, stream: &Stream<f64>) -> Stream<f64> {
    within_by(stream, eps, relative)
}
