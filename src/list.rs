//! Finite, eagerly built lists and rose trees.
//!
//! The same fold-first vocabulary as [`Stream`](crate::Stream), without the
//! laziness: `foldr` replaces every `Cons` with a function and `Nil` with a
//! value, and `foldtree` does the same for the nodes and child lists of a
//! tree.

use std::fmt::{self, Display};
use std::ops::Add;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub enum List<T> {
    Nil,
    Cons(T, Rc<List<T>>),
}

impl<T> Clone for List<T>
where
    T: Clone,
{
    fn clone(&self) -> List<T> {
        match self {
            List::Nil => List::Nil,
            List::Cons(head, tail) => List::Cons(head.clone(), Rc::clone(tail)),
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> List<T> {
        List::Nil
    }
}

impl<T> List<T> {
    pub fn nil() -> List<T> {
        List::Nil
    }

    pub fn cons(head: T, tail: List<T>) -> List<T> {
        List::Cons(head, Rc::new(tail))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, List::Nil)
    }

    pub fn iter(&self) -> ListIter<'_, T> {
        ListIter { cursor: self }
    }

    /// Right fold: `foldr(f, x)` of `[a, b]` is `f(a, f(b, x))`.
    ///
    /// Elements are gathered first and combined from the back, so the depth
    /// of the list does not turn into depth of the call stack.
    pub fn foldr<B, F>(&self, mut f: F, zero: B) -> B
    where
        F: FnMut(&T, B) -> B,
    {
        let items: Vec<&T> = self.iter().collect();
        items.into_iter().rev().fold(zero, |acc, a| f(a, acc))
    }

    pub fn length(&self) -> usize {
        self.foldr(|_, n| n + 1, 0)
    }

    pub fn map<U, F>(&self, f: F) -> List<U>
    where
        F: Fn(&T) -> U,
    {
        self.foldr(|a, rest| List::cons(f(a), rest), List::Nil)
    }
}

impl<T: Clone> List<T> {
    pub fn append(&self, other: &List<T>) -> List<T> {
        self.foldr(|a, rest| List::cons(a.clone(), rest), other.clone())
    }
}

pub struct ListIter<'a, T> {
    cursor: &'a List<T>,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match self.cursor {
            List::Nil => None,
            List::Cons(head, tail) => {
                self.cursor = tail;
                Some(head)
            }
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> List<T> {
        let items: Vec<T> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(List::Nil, |rest, a| List::cons(a, rest))
    }
}

impl<T: Display> Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "List[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        let mut next = match self {
            List::Cons(_, tail) => Rc::get_mut(tail).map(std::mem::take),
            List::Nil => None,
        };
        while let Some(mut list) = next {
            next = match &mut list {
                List::Cons(_, tail) => Rc::get_mut(tail).map(std::mem::take),
                List::Nil => None,
            };
        }
    }
}

pub fn sum<T>(list: &List<T>) -> T
where
    T: Copy + Add<Output = T> + Default,
{
    list.foldr(|a, acc| *a + acc, T::default())
}

pub fn double_all<T>(list: &List<T>) -> List<T>
where
    T: Copy + Add<Output = T>,
{
    list.map(|a| *a + *a)
}

pub fn sum_matrix<T>(rows: &List<List<T>>) -> T
where
    T: Copy + Add<Output = T> + Default,
{
    sum(&rows.map(sum))
}

/// A labelled node with any number of subtrees.
///
/// The child list sits behind an `Rc`, so clones of a tree share it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<T> {
    pub label: T,
    pub children: Rc<List<Tree<T>>>,
}

impl<T> Tree<T> {
    pub fn new<I>(label: T, children: I) -> Tree<T>
    where
        I: IntoIterator<Item = Tree<T>>,
    {
        Tree {
            label,
            children: Rc::new(children.into_iter().collect()),
        }
    }

    pub fn leaf(label: T) -> Tree<T> {
        Tree {
            label,
            children: Rc::new(List::Nil),
        }
    }

    /// `f` combines a label with the folded children, `g` combines a folded
    /// subtree with the fold of its later siblings, and `zero` stands for an
    /// empty child list.
    pub fn foldtree<B, F, G>(&self, f: &F, g: &G, zero: &B) -> B
    where
        B: Clone,
        F: Fn(&T, B) -> B,
        G: Fn(B, B) -> B,
    {
        let children = self
            .children
            .foldr(|child, rest| g(child.foldtree(f, g, zero), rest), zero.clone());
        f(&self.label, children)
    }

    pub fn map<U, F>(&self, f: &F) -> Tree<U>
    where
        F: Fn(&T) -> U,
    {
        Tree {
            label: f(&self.label),
            children: Rc::new(self.children.map(|child| child.map(f))),
        }
    }
}

impl<T: Display> Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node {}", self.label)?;
        if !self.children.is_nil() {
            write!(f, "({})", self.children)?;
        }
        Ok(())
    }
}

pub fn sumtree<T>(tree: &Tree<T>) -> T
where
    T: Copy + Add<Output = T> + Default,
{
    tree.foldtree(&|label: &T, rest| *label + rest, &|a, b| a + b, &T::default())
}

/// Every label, parents before children, left to right.
pub fn labels<T: Clone>(tree: &Tree<T>) -> List<T> {
    tree.foldtree(
        &|label: &T, rest| List::cons(label.clone(), rest),
        &|a: List<T>, b: List<T>| a.append(&b),
        &List::Nil,
    )
}

pub fn double_tree<T>(tree: &Tree<T>) -> Tree<T>
where
    T: Copy + Add<Output = T>,
{
    tree.map(&|a: &T| *a + *a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fib() -> List<i64> {
        vec![1, 1, 2, 3, 5, 8, 13, 21].into_iter().collect()
    }

    fn sample_tree() -> Tree<i64> {
        Tree::new(1, vec![Tree::leaf(2), Tree::new(3, vec![Tree::leaf(4)])])
    }

    #[test]
    fn list_folds() {
        let xs = fib();
        assert_eq!(xs.to_string(), "List[1, 1, 2, 3, 5, 8, 13, 21]");
        assert_eq!(sum(&xs), 54);
        assert_eq!(xs.length(), 8);
        assert_eq!(double_all(&xs).to_string(), "List[2, 2, 4, 6, 10, 16, 26, 42]");
        assert_eq!(List::<i64>::nil().to_string(), "List[]");
    }

    #[test]
    fn append_and_matrix() {
        let z1: List<i64> = vec![1, 2].into_iter().collect();
        let z2: List<i64> = vec![3, 4].into_iter().collect();
        assert_eq!(z1.append(&z2).to_string(), "List[1, 2, 3, 4]");
        let m: List<List<i64>> = vec![z1, z2, fib()].into_iter().collect();
        assert_eq!(sum_matrix(&m), 64);
    }

    #[test]
    fn tree_folds() {
        let t = sample_tree();
        assert_eq!(t.to_string(), "Node 1(List[Node 2, Node 3(List[Node 4])])");
        assert_eq!(Tree::leaf(4).to_string(), "Node 4");
        assert_eq!(sumtree(&t), 10);
        assert_eq!(labels(&t).to_string(), "List[1, 2, 3, 4]");
        assert_eq!(
            double_tree(&t).to_string(),
            "Node 2(List[Node 4, Node 6(List[Node 8])])"
        );
    }

    #[test]
    fn nested_trees_share_their_children() {
        let t = Tree::new(0, vec![sample_tree(), Tree::leaf(5)]);
        let copy = t.clone();
        assert!(Rc::ptr_eq(&t.children, &copy.children));
        assert_eq!(copy, t);
        assert_eq!(sumtree(&t), 15);
        assert_eq!(labels(&t).to_string(), "List[0, 1, 2, 3, 4, 5]");
        assert_eq!(t.map(&|n: &i64| n * 10).children.length(), 2);
    }

    #[test]
    fn long_lists_fold_and_drop() {
        let xs: List<u64> = (0..200_000).collect();
        assert_eq!(xs.length(), 200_000);
        assert_eq!(sum(&xs), 199_999 * 200_000 / 2);
    }
}
