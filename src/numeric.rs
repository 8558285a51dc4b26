//! Numerical methods expressed as infinite streams of approximations.
//!
//! Each generator produces successively better estimates; a truncator from
//! [`converge`](crate::converge) decides when to stop. Richardson
//! extrapolation (`elimerror`, `order`, `improve`, `superman`) speeds up any
//! stream whose error shrinks like a power of the step size, which is what
//! both the differentiation and the integration streams do.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::converge::{within, withre, Tolerance};
use crate::error::{Error, Result};
use crate::stream::Stream;
use crate::thunk::Thunk;

pub use crate::converge::DEFAULT_EPS;

/// One Newton-Raphson step towards `sqrt(n)`.
pub fn newton_step(n: f64) -> impl Fn(&f64) -> f64 {
    move |x: &f64| (x + n / x) / 2.0
}

/// Successive approximations to `sqrt(n)` starting from `a0`.
pub fn sqrt_approximations(a0: f64, n: f64) -> Stream<f64> {
    Stream::unfold(a0, newton_step(n))
}

pub fn sqrt(a0: f64, eps: f64, n: f64) -> Stream<f64> {
    within(eps, &sqrt_approximations(a0, n))
}

pub fn relative_sqrt(a0: f64, eps: f64, n: f64) -> Stream<f64> {
    withre(eps, &sqrt_approximations(a0, n))
}

/// Forward difference quotient of `f` at `x` with step `h`.
pub fn easydiff<F>(f: &F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64 + ?Sized,
{
    (f(x + h) - f(x)) / h
}

pub fn halve(x: &f64) -> f64 {
    x / 2.0
}

/// Difference quotients of `f` at `x` for step sizes `h0, h0/2, h0/4, ...`.
pub fn differentiate<F>(h0: f64, f: F, x: f64) -> Stream<f64>
where
    F: Fn(f64) -> f64 + 'static,
{
    Stream::unfold(h0, halve).map(move |h| easydiff(&f, x, h))
}

/// Removes the `h^n` error term from a stream whose step halves each time.
///
/// Neighbours `a, b` become `(b * 2^n - a) / (2^n - 1)`; the last element of
/// a finite stream is kept as it is. Order `0` means the stream has already
/// settled, so the stale first element is dropped instead.
pub fn elimerror(n: i32, s: &Stream<f64>) -> Stream<f64> {
    if n == 0 {
        return s.skip(1);
    }
    let (head, tail) = match s {
        Stream::Empty => return Stream::Empty,
        Stream::Node(head, tail) => (head.clone(), tail.clone()),
    };
    let next = match tail.force() {
        Stream::Empty => return s.clone(),
        Stream::Node(next, _) => next.clone(),
    };
    let scale = 2f64.powi(n);
    Stream::node(
        Thunk::lazy(move || (next.force() * scale - head.force()) / (scale - 1.0)),
        Thunk::lazy(move || elimerror(n, tail.force())),
    )
}

/// Estimates the order of the leading error term from the first three
/// elements.
pub fn order(s: &Stream<f64>) -> Result<i32> {
    let prefix = s.take(3).to_vec();
    let &[a, b, c] = prefix.as_slice() else {
        return Err(Error::TooShort {
            op: "order",
            needed: 3,
            found: prefix.len(),
        });
    };
    if a == b {
        return Ok(0);
    }
    let estimate = round_half_up(((a - c) / (b - c) - 1.0).log2());
    if !estimate.is_finite() {
        warn!(a, b, c, "order estimate is not a number, treating the stream as settled");
        return Ok(0);
    }
    debug!(order = estimate, "estimated error order");
    Ok(estimate as i32)
}

/// Rounds to the nearest integer, halves towards positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub fn improve(s: &Stream<f64>) -> Result<Stream<f64>> {
    let n = order(s)?;
    if n == 0 {
        debug!("stream has settled, dropping its first element");
    }
    Ok(elimerror(n, s))
}

pub fn second<T: Clone + 'static>(s: &Stream<T>) -> Result<T> {
    let prefix = s.take(2).to_vec();
    match prefix.len() {
        2 => Ok(prefix[1].clone()),
        found => Err(Error::TooShort {
            op: "second",
            needed: 2,
            found,
        }),
    }
}

/// Improves the improved stream again and again, taking the second element
/// of every level.
pub fn superman(s: &Stream<f64>) -> Stream<Result<f64>> {
    let levels = Stream::unfold(Ok(s.clone()), |level: &Result<Stream<f64>>| {
        level.as_ref().map_err(Clone::clone).and_then(improve)
    });
    levels.map(|level| level.and_then(|s| second(&s)))
}

/// The derivative of `f` at `x`, accelerated with [`superman`] and cut at
/// `tolerance`.
pub fn derivative<F>(h0: f64, f: F, x: f64, tolerance: Tolerance) -> Result<f64>
where
    F: Fn(f64) -> f64 + 'static,
{
    let approximations = superman(&differentiate(h0, f, x));
    settle(&tolerance.truncate_fallible(&approximations), "derivative")
}

/// The last element of a converged stream, or the first error in it.
fn settle(s: &Stream<Result<f64>>, op: &'static str) -> Result<f64> {
    let mut last = Err(Error::EmptyStream { op });
    for approximation in s {
        last = Ok(approximation?);
    }
    last
}

/// Trapezoid estimate of the integral of `f` over `[a, b]`.
pub fn easy_integrate<F>(f: &F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64 + ?Sized,
{
    (f(a) + f(b)) * (b - a) / 2.0
}

/// Integral estimates over `[a, b]` that double the number of subintervals at
/// every step. `fa` and `fb` are `f(a)` and `f(b)`, passed down so every
/// point is evaluated once.
pub fn integ<F>(f: F, a: f64, b: f64, fa: f64, fb: f64) -> Stream<f64>
where
    F: Fn(f64) -> f64 + 'static,
{
    integ_rc(Rc::new(f), a, b, fa, fb)
}

fn integ_rc(f: Rc<dyn Fn(f64) -> f64>, a: f64, b: f64, fa: f64, fb: f64) -> Stream<f64> {
    let rest = Thunk::lazy(move || {
        let m = (a + b) / 2.0;
        let fm = f(m);
        let g = f.clone();
        let right = Thunk::lazy(move || integ_rc(g.clone(), m, b, fm, fb));
        integ_rc(f.clone(), a, m, fa, fm).zip_with(right, |l, r| l + r)
    });
    Stream::node(Thunk::ready((fa + fb) * (b - a) / 2.0), rest)
}

pub fn integrate<F>(f: F, a: f64, b: f64) -> Stream<f64>
where
    F: Fn(f64) -> f64 + 'static,
{
    let (fa, fb) = (f(a), f(b));
    integ(f, a, b, fa, fb)
}

/// The integral of `f` over `[a, b]`: one Richardson improvement of the
/// subdivision stream, cut at `tolerance`.
pub fn integral<F>(f: F, a: f64, b: f64, tolerance: Tolerance) -> Result<f64>
where
    F: Fn(f64) -> f64 + 'static,
{
    let improved = improve(&integrate(f, a, b))?;
    tolerance
        .truncate(&improved)
        .last()
        .ok_or(Error::EmptyStream { op: "integral" })
}
