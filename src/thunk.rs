use std::cell::{Cell, OnceCell};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::ops::Deref;
use std::rc::Rc;

type Evaluator<T> = Box<dyn Fn() -> T>;

struct Inner<T> {
    value: OnceCell<T>,
    // `None` while the value is unset means the evaluator is running.
    eval: Cell<Option<Evaluator<T>>>,
}

/// A deferred computation that runs at most once.
///
/// Clones share the same cell: whichever holder forces first pays for the
/// evaluation, every other holder sees the cached value.
///
/// If the evaluator panics nothing is cached and the next `force` runs it
/// again. Forcing a thunk from inside its own evaluator panics.
pub struct Thunk<T> {
    inner: Rc<Inner<T>>,
}

/// Puts the evaluator back into its slot if evaluation unwinds.
struct Rearm<'a, T> {
    slot: &'a Cell<Option<Evaluator<T>>>,
    eval: Option<Evaluator<T>>,
}

impl<T> Drop for Rearm<'_, T> {
    fn drop(&mut self) {
        if let Some(eval) = self.eval.take() {
            self.slot.set(Some(eval));
        }
    }
}

impl<T> Thunk<T> {
    fn with_inner(value: OnceCell<T>, eval: Option<Evaluator<T>>) -> Thunk<T> {
        Thunk {
            inner: Rc::new(Inner {
                value,
                eval: Cell::new(eval),
            }),
        }
    }

    pub fn lazy<F>(f: F) -> Thunk<T>
    where
        F: Fn() -> T + 'static,
    {
        Thunk::with_inner(OnceCell::new(), Some(Box::new(f)))
    }

    pub fn ready(y: T) -> Thunk<T> {
        Thunk::with_inner(OnceCell::from(y), None)
    }

    pub fn is_ready(&self) -> bool {
        self.inner.value.get().is_some()
    }

    /// The cached value, without evaluating anything.
    pub fn peek(&self) -> Option<&T> {
        self.inner.value.get()
    }

    pub fn force(&self) -> &T {
        if let Some(y) = self.inner.value.get() {
            return y;
        }

        let mut rearm = Rearm {
            slot: &self.inner.eval,
            eval: self.inner.eval.take(),
        };
        let y = match rearm.eval.as_deref() {
            Some(eval) => eval(),
            None => panic!("thunk forced during its own evaluation"),
        };
        rearm.eval = None;

        self.inner.value.get_or_init(|| y)
    }

    /// True when both handles share one cell.
    pub fn ptr_eq(&self, other: &Thunk<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Moves the cached value out when this is the last handle to the cell.
    ///
    /// Used to unlink long chains without recursing through `Drop`.
    pub(crate) fn take_unique(&mut self) -> Option<T> {
        Rc::get_mut(&mut self.inner).and_then(|inner| inner.value.take())
    }
}

impl<T: Clone> Thunk<T> {
    pub fn get(&self) -> T {
        self.force().clone()
    }
}

impl<T> Clone for Thunk<T> {
    fn clone(&self) -> Thunk<T> {
        Thunk {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> From<T> for Thunk<T> {
    fn from(y: T) -> Thunk<T> {
        Thunk::ready(y)
    }
}

impl<T> Deref for Thunk<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.force()
    }
}

impl<T: Default + 'static> Default for Thunk<T> {
    fn default() -> Thunk<T> {
        Thunk::lazy(T::default)
    }
}

struct State<'a, T>(&'a Inner<T>);

impl<T: Debug> Debug for State<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.value.get() {
            Some(y) => write!(f, "Ready({:?})", y),
            None => {
                // Peeking at the slot means taking the evaluator out for a moment.
                let eval = self.0.eval.take();
                let pending = eval.is_some();
                self.0.eval.set(eval);
                if pending {
                    write!(f, "Lazy(...)")
                } else {
                    write!(f, "Evaluating")
                }
            }
        }
    }
}

impl<T: Debug> Debug for Thunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Thunk")
            .field("value", &State(&self.inner))
            .finish()
    }
}

impl<T: Display> Display for Thunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self.force(), f)
    }
}

impl<T: PartialEq<U>, U> PartialEq<Thunk<U>> for Thunk<T> {
    fn eq(&self, rhs: &Thunk<U>) -> bool {
        self.force() == rhs.force()
    }
}

impl<T: Eq> Eq for Thunk<T> {}

impl<T: PartialOrd<U>, U> PartialOrd<Thunk<U>> for Thunk<T> {
    fn partial_cmp(&self, other: &Thunk<U>) -> Option<Ordering> {
        self.force().partial_cmp(other.force())
    }
}

impl<T: Ord> Ord for Thunk<T> {
    fn cmp(&self, other: &Thunk<T>) -> Ordering {
        self.force().cmp(other.force())
    }
}
