use std::fmt::{self, Debug, Display};
use std::iter::{Product, Sum};
use std::ops::Add;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::thunk::Thunk;

/// A persistent lazy sequence.
///
/// A `Node` holds a thunk for its head and a thunk for the rest of the
/// stream. Nothing is evaluated until it is forced, and every position is
/// evaluated at most once no matter how many clones of the stream exist.
///
/// Streams may be infinite. `take`, `get`, the truncators in
/// [`converge`](crate::converge) and anything that reads a bounded prefix are
/// safe on them; `length`, `to_vec`, `fold_left`, `Display` and equality walk
/// to the end and never return on an infinite stream.
pub enum Stream<T> {
    Empty,
    Node(Thunk<T>, Thunk<Stream<T>>),
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Stream<T> {
        match self {
            Stream::Empty => Stream::Empty,
            Stream::Node(head, tail) => Stream::Node(head.clone(), tail.clone()),
        }
    }
}

impl<T> Default for Stream<T> {
    fn default() -> Stream<T> {
        Stream::Empty
    }
}

impl<T> Drop for Stream<T> {
    fn drop(&mut self) {
        // Unlink forced tails we own one at a time so a long chain does not
        // recurse once per node.
        let mut next = match self {
            Stream::Node(_, tail) => tail.take_unique(),
            Stream::Empty => None,
        };
        while let Some(mut stream) = next {
            next = match &mut stream {
                Stream::Node(_, tail) => tail.take_unique(),
                Stream::Empty => None,
            };
        }
    }
}

impl<T> Stream<T> {
    pub fn empty() -> Stream<T> {
        Stream::Empty
    }

    /// Builds a node from thunks that already exist, sharing them.
    pub fn node(head: Thunk<T>, tail: Thunk<Stream<T>>) -> Stream<T> {
        Stream::Node(head, tail)
    }

    /// Builds a node from two deferred computations, memoizing both.
    pub fn cons<H, R>(head: H, tail: R) -> Stream<T>
    where
        H: Fn() -> T + 'static,
        R: Fn() -> Stream<T> + 'static,
    {
        Stream::Node(Thunk::lazy(head), Thunk::lazy(tail))
    }

    /// A one element stream.
    pub fn single(value: T) -> Stream<T> {
        Stream::Node(value.into(), Stream::Empty.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Stream::Empty)
    }

    /// Forces and returns the first element.
    pub fn head(&self) -> Option<&T> {
        match self {
            Stream::Empty => None,
            Stream::Node(head, _) => Some(head.force()),
        }
    }

    /// Forces and returns everything after the first element.
    pub fn tail(&self) -> Option<&Stream<T>> {
        match self {
            Stream::Empty => None,
            Stream::Node(_, tail) => Some(tail.force()),
        }
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// A finite stream over `values`. Each tail is built only when forced.
    pub fn of<I>(values: I) -> Stream<T>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Rc<[T]> = values.into_iter().collect();
        Stream::of_slice(values, 0)
    }

    fn of_slice(values: Rc<[T]>, at: usize) -> Stream<T> {
        match values.get(at) {
            None => Stream::Empty,
            Some(value) => {
                let head = Thunk::ready(value.clone());
                Stream::Node(head, Thunk::lazy(move || Stream::of_slice(values.clone(), at + 1)))
            }
        }
    }

    /// The infinite stream `seed, step(seed), step(step(seed)), ...`.
    ///
    /// `step` runs once per forced tail, never ahead of demand.
    pub fn unfold<F>(seed: T, step: F) -> Stream<T>
    where
        F: Fn(&T) -> T + 'static,
    {
        Stream::unfold_rc(seed, Rc::new(step))
    }

    fn unfold_rc(seed: T, step: Rc<dyn Fn(&T) -> T>) -> Stream<T> {
        let current = seed.clone();
        let tail = Thunk::lazy(move || Stream::unfold_rc(step(&current), step.clone()));
        Stream::Node(Thunk::ready(seed), tail)
    }

    /// Lazy right fold.
    ///
    /// `combine` gets each head together with a thunk for the fold of the
    /// remaining stream and decides whether to force it, which is what lets
    /// `exists`-style folds stop early and lets folds build lazy streams.
    /// A `combine` that always forces the thunk recurses once per element.
    /// That is fine for about a thousand elements on a 2 MiB thread stack and
    /// overflows somewhere below five thousand; reduce longer streams with
    /// `fold_left`.
    pub fn fold_right<B, F>(&self, zero: Thunk<B>, combine: F) -> B
    where
        B: Clone + 'static,
        F: Fn(T, Thunk<B>) -> B + 'static,
    {
        self.fold_right_rc(zero, Rc::new(combine))
    }

    fn fold_right_rc<B>(&self, zero: Thunk<B>, combine: Rc<dyn Fn(T, Thunk<B>) -> B>) -> B
    where
        B: Clone + 'static,
    {
        match self {
            Stream::Empty => zero.get(),
            Stream::Node(head, tail) => {
                let tail = tail.clone();
                let f = combine.clone();
                let rest = Thunk::lazy(move || tail.force().fold_right_rc(zero.clone(), f.clone()));
                combine(head.get(), rest)
            }
        }
    }

    /// Strict left fold; walks the whole stream.
    pub fn fold_left<B, F>(&self, zero: B, combine: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.iter().fold(zero, combine)
    }

    /// This stream followed by `other`, which is not forced until this
    /// stream runs out.
    pub fn append(&self, other: Thunk<Stream<T>>) -> Stream<T> {
        self.fold_right(other, |a, rest| Stream::Node(Thunk::ready(a), rest))
    }

    pub fn map<U, F>(&self, f: F) -> Stream<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<U: 'static>(&self, f: Rc<dyn Fn(T) -> U>) -> Stream<U> {
        match self {
            Stream::Empty => Stream::Empty,
            Stream::Node(head, tail) => {
                let head = head.clone();
                let g = f.clone();
                let tail = tail.clone();
                Stream::Node(
                    Thunk::lazy(move || g(head.get())),
                    Thunk::lazy(move || tail.force().map_rc(f.clone())),
                )
            }
        }
    }

    pub fn flat_map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Stream<U> + 'static,
    {
        self.flat_map_rc(Rc::new(f))
    }

    fn flat_map_rc<U>(&self, f: Rc<dyn Fn(T) -> Stream<U>>) -> Stream<U>
    where
        U: Clone + 'static,
    {
        // Runs of empty inner streams are skipped here in a loop; appending
        // each of them would nest one force per skipped element.
        let mut cursor = self.clone();
        loop {
            let (inner, tail) = match &cursor {
                Stream::Empty => return Stream::Empty,
                Stream::Node(head, tail) => (f(head.get()), tail.clone()),
            };
            if inner.is_empty() {
                cursor = tail.force().clone();
                continue;
            }
            let f = f.clone();
            return inner.append(Thunk::lazy(move || tail.force().flat_map_rc(f.clone())));
        }
    }

    pub fn filter<P>(&self, p: P) -> Stream<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.flat_map(move |a| if p(&a) { Stream::single(a) } else { Stream::Empty })
    }

    pub fn exists<P>(&self, p: P) -> bool
    where
        P: FnMut(T) -> bool,
    {
        self.iter().any(p)
    }

    pub fn forall<P>(&self, p: P) -> bool
    where
        P: FnMut(T) -> bool,
    {
        self.iter().all(p)
    }

    /// At most the first `n` elements, sharing their thunks with `self`.
    pub fn take(&self, n: usize) -> Stream<T> {
        match self {
            Stream::Node(head, tail) if n > 0 => {
                let rest = if n == 1 {
                    Thunk::ready(Stream::Empty)
                } else {
                    let tail = tail.clone();
                    Thunk::lazy(move || tail.force().take(n - 1))
                };
                Stream::Node(head.clone(), rest)
            }
            _ => Stream::Empty,
        }
    }

    /// The longest prefix whose elements all satisfy `p`.
    pub fn take_while<P>(&self, p: P) -> Stream<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.fold_right(Thunk::ready(Stream::Empty), move |a, rest| {
            if p(&a) {
                Stream::Node(Thunk::ready(a), rest)
            } else {
                Stream::Empty
            }
        })
    }

    /// Drops the first `n` elements.
    pub fn skip(&self, n: usize) -> Stream<T> {
        let mut cursor = self.clone();
        for _ in 0..n {
            cursor = match cursor.tail() {
                Some(rest) => rest.clone(),
                None => break,
            };
        }
        cursor
    }

    pub fn zip<U>(&self, other: Thunk<Stream<U>>) -> Stream<(T, U)>
    where
        U: Clone + 'static,
    {
        self.zip_with(other, |a, b| (a, b))
    }

    /// Combines elements pairwise, ending with the shorter stream.
    pub fn zip_with<U, V, F>(&self, other: Thunk<Stream<U>>, f: F) -> Stream<V>
    where
        U: Clone + 'static,
        V: 'static,
        F: Fn(T, U) -> V + 'static,
    {
        self.zip_with_rc(other, Rc::new(f))
    }

    fn zip_with_rc<U, V>(&self, other: Thunk<Stream<U>>, f: Rc<dyn Fn(T, U) -> V>) -> Stream<V>
    where
        U: Clone + 'static,
        V: 'static,
    {
        let (h1, t1) = match self {
            Stream::Empty => return Stream::Empty,
            Stream::Node(head, tail) => (head.clone(), tail.clone()),
        };
        let (h2, t2) = match other.force() {
            Stream::Empty => return Stream::Empty,
            Stream::Node(head, tail) => (head.clone(), tail.clone()),
        };
        let g = f.clone();
        Stream::Node(
            Thunk::lazy(move || g(h1.get(), h2.get())),
            Thunk::lazy(move || t1.force().zip_with_rc(t2.clone(), f.clone())),
        )
    }

    pub fn length(&self) -> usize {
        self.iter().count()
    }

    /// Element `index`, counting from the end when negative (`-1` is the
    /// last element). Needs a finite stream: the length is computed first.
    pub fn get(&self, index: isize) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyStream { op: "get" });
        }
        let len = self.length();
        let at = if index < 0 { len as isize + index } else { index };
        if at < 0 || at as usize >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.iter()
            .nth(at as usize)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn last(&self) -> Option<T> {
        self.iter().last()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub fn iter(&self) -> Iter<T> {
        Iter {
            rest: Some(Thunk::ready(self.clone())),
        }
    }
}

/// Walks a stream, forcing each tail only when the next element is asked for.
pub struct Iter<T> {
    rest: Option<Thunk<Stream<T>>>,
}

impl<T: Clone + 'static> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let rest = self.rest.take()?;
        match rest.force() {
            Stream::Empty => None,
            Stream::Node(head, tail) => {
                self.rest = Some(tail.clone());
                Some(head.get())
            }
        }
    }
}

impl<'a, T: Clone + 'static> IntoIterator for &'a Stream<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Clone + 'static> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Stream<T> {
        Stream::of(iter)
    }
}

impl<T: Clone + PartialEq + 'static> PartialEq for Stream<T> {
    fn eq(&self, other: &Stream<T>) -> bool {
        self.iter().eq(other.iter())
    }
}

/// Renders `Stream(a, b, c)`, forcing the whole stream.
impl<T: Clone + Display + 'static> Display for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Stream(")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, ")")
    }
}

/// Shows the part of the stream that has been forced so far, `?` for a head
/// that has not been evaluated and `..` for an unevaluated tail.
impl<T: Debug> Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Stream(")?;
        let mut cursor = self;
        let mut first = true;
        while let Stream::Node(head, tail) = cursor {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            match head.peek() {
                Some(y) => write!(f, "{:?}", y)?,
                None => write!(f, "?")?,
            }
            match tail.peek() {
                Some(rest) => cursor = rest,
                None => {
                    write!(f, ", ..")?;
                    break;
                }
            }
        }
        write!(f, ")")
    }
}

pub fn sum<T>(s: &Stream<T>) -> T
where
    T: Clone + Sum + 'static,
{
    s.iter().sum()
}

pub fn product<T>(s: &Stream<T>) -> T
where
    T: Clone + Product + 'static,
{
    s.iter().product()
}

pub fn all_true(s: &Stream<bool>) -> bool {
    s.forall(|b| b)
}

pub fn double_all<T>(s: &Stream<T>) -> Stream<T>
where
    T: Clone + Add<Output = T> + 'static,
{
    s.map(|a| a.clone() + a)
}

pub fn sum_matrix<T>(rows: &Stream<Stream<T>>) -> T
where
    T: Clone + Sum + 'static,
{
    sum(&rows.map(|row| sum(&row)))
}
