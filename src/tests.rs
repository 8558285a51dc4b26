use std::cell::Cell;
use std::rc::Rc;

use quickcheck::{quickcheck, TestResult};

use crate::converge::{absolute, relative};
use crate::list::{self, List};
use crate::numeric;
use crate::stream::{self, Stream};
use crate::{within, withre, Error, Tolerance};

fn counting_naturals(calls: &Rc<Cell<usize>>) -> Stream<u64> {
    let calls = calls.clone();
    Stream::unfold(0, move |n| {
        calls.set(calls.get() + 1);
        n + 1
    })
}

fn floats(xs: &[i16]) -> Vec<f64> {
    xs.iter().map(|&x| f64::from(x) / 8.0).collect()
}

#[test]
fn prop_take_is_a_bounded_prefix() {
    fn p(xs: Vec<i64>, n: u8) -> bool {
        let n = n as usize;
        let taken = Stream::of(xs.clone()).take(n).to_vec();
        taken.len() == n.min(xs.len()) && taken[..] == xs[..taken.len()]
    }
    quickcheck(p as fn(Vec<i64>, u8) -> bool);
}

#[test]
fn prop_append_identity() {
    fn p(xs: Vec<i64>) -> bool {
        let s = Stream::of(xs);
        s.append(ready!(Stream::empty())) == s && Stream::empty().append(ready!(s.clone())) == s
    }
    quickcheck(p as fn(Vec<i64>) -> bool);
}

#[test]
fn prop_append_associative() {
    fn p(xs: Vec<i64>, ys: Vec<i64>, zs: Vec<i64>) -> bool {
        let (a, b, c) = (Stream::of(xs), Stream::of(ys), Stream::of(zs));
        let left = a.append(ready!(b.clone())).append(ready!(c.clone()));
        let right = a.append(ready!(b.append(ready!(c))));
        left == right
    }
    quickcheck(p as fn(Vec<i64>, Vec<i64>, Vec<i64>) -> bool);
}

#[test]
fn prop_map_identity_and_composition() {
    fn p(xs: Vec<i32>) -> bool {
        let s = Stream::of(xs);
        let f = |x: i32| x.wrapping_mul(3);
        let g = |x: i32| x.wrapping_sub(7);
        s.map(|x| x) == s && s.map(f).map(g) == s.map(move |x| g(f(x)))
    }
    quickcheck(p as fn(Vec<i32>) -> bool);
}

#[test]
fn prop_fold_left_matches_vec() {
    fn p(xs: Vec<i64>) -> bool {
        let s = Stream::of(xs.clone());
        let expected = xs.iter().fold(0i64, |acc, x| acc.wrapping_mul(31).wrapping_add(*x));
        s.fold_left(0i64, |acc, x| acc.wrapping_mul(31).wrapping_add(x)) == expected
            && s.length() == xs.len()
            && s.to_vec() == xs
    }
    quickcheck(p as fn(Vec<i64>) -> bool);
}

#[test]
fn prop_get_agrees_with_indexing() {
    fn p(xs: Vec<u16>, i: u8) -> TestResult {
        if xs.is_empty() {
            return TestResult::discard();
        }
        let s = Stream::of(xs.clone());
        let i = i as usize % xs.len();
        let back = i as isize - xs.len() as isize;
        TestResult::from_bool(s.get(i as isize) == Ok(xs[i]) && s.get(back) == Ok(xs[i]))
    }
    quickcheck(p as fn(Vec<u16>, u8) -> TestResult);
}

#[test]
fn prop_skip_then_take() {
    fn p(xs: Vec<i64>, n: u8) -> bool {
        let n = (n as usize).min(xs.len());
        Stream::of(xs.clone()).skip(n).to_vec() == xs[n..]
    }
    quickcheck(p as fn(Vec<i64>, u8) -> bool);
}

#[test]
fn prop_within_is_a_prefix_cut_at_the_first_close_pair() {
    fn p(xs: Vec<i16>, eps: u8, relative_test: bool) -> bool {
        let xs = floats(&xs);
        let eps = f64::from(eps) / 16.0;
        let close = |a: f64, b: f64| {
            if relative_test {
                relative(a, b, eps)
            } else {
                absolute(a, b, eps)
            }
        };
        let s = Stream::of(xs.clone());
        let cut = if relative_test {
            withre(eps, &s).to_vec()
        } else {
            within(eps, &s).to_vec()
        };

        if cut[..] != xs[..cut.len()] || cut.is_empty() != xs.is_empty() {
            return false;
        }
        let first_close = xs.windows(2).position(|w| close(w[0], w[1]));
        match first_close {
            Some(i) => cut.len() == i + 2,
            None => cut.len() == xs.len(),
        }
    }
    quickcheck(p as fn(Vec<i16>, u8, bool) -> bool);
}

#[test]
fn prop_taking_k_elements_steps_k_minus_one_times() {
    fn p(k: u8) -> bool {
        let calls = Rc::new(Cell::new(0));
        let taken = counting_naturals(&calls).take(k as usize);
        if calls.get() != 0 {
            return false;
        }
        let values = taken.to_vec();
        values.len() == k as usize && calls.get() == (k as usize).saturating_sub(1)
    }
    quickcheck(p as fn(u8) -> bool);
}

#[test]
fn prop_list_foldr_matches_vec() {
    fn p(xs: Vec<i64>) -> bool {
        let l: List<i64> = xs.iter().cloned().collect();
        let rebuilt = l.foldr(
            |x, mut acc: Vec<i64>| {
                acc.insert(0, *x);
                acc
            },
            Vec::new(),
        );
        rebuilt == xs && l.length() == xs.len()
    }
    quickcheck(p as fn(Vec<i64>) -> bool);
}

#[test]
fn shared_streams_evaluate_each_position_once() {
    let calls = Rc::new(Cell::new(0));
    let xs = counting_naturals(&calls);
    let ys = xs.clone();
    assert_eq!(xs.take(10).to_vec(), ys.take(10).to_vec());
    assert_eq!(calls.get(), 9);
    assert_eq!(xs.take(10).get(5), Ok(5));
    assert_eq!(ys.skip(9).head(), Some(&9));
    assert_eq!(calls.get(), 9);
}

#[test]
fn laziness_across_a_pipeline() {
    let calls = Rc::new(Cell::new(0));
    let pipeline = counting_naturals(&calls)
        .map(|n| n * n)
        .filter(|n| n % 2 == 1)
        .zip(ready!(Stream::unfold(0u64, |n| n + 10)));
    assert_eq!(calls.get(), 1);
    assert_eq!(pipeline.take(3).to_vec(), vec![(1, 0), (9, 10), (25, 20)]);
    assert_eq!(calls.get(), 5);
}

#[test]
fn error_scenarios() {
    assert_eq!(
        Stream::<f64>::empty().get(0),
        Err(Error::EmptyStream { op: "get" })
    );
    assert_eq!(
        stream![1, 2, 3].get(3),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        numeric::order(&stream![1.0]),
        Err(Error::TooShort { op: "order", needed: 3, found: 1 })
    );
    assert_eq!(
        numeric::second(&Stream::<f64>::empty()),
        Err(Error::TooShort { op: "second", needed: 2, found: 0 })
    );
    assert!(numeric::improve(&stream![1.0, 2.0]).is_err());
    assert_eq!(
        Error::TooShort { op: "order", needed: 3, found: 1 }.to_string(),
        "'order' needs at least 3 elements, the stream has 1"
    );
}

#[test]
fn worked_examples() {
    let fib = stream![1, 1, 2, 3, 5, 8, 13, 21];
    assert_eq!(stream::sum(&fib), 54);
    assert_eq!(stream::product(&stream![1, 2, 3, 4]), 24);
    assert!(stream::all_true(&stream![true, true]));
    assert!(!stream::all_true(&stream![true, false]));
    assert_eq!(fib.to_string(), "Stream(1, 1, 2, 3, 5, 8, 13, 21)");

    let l: List<i64> = vec![1, 1, 2, 3, 5, 8, 13, 21].into_iter().collect();
    assert_eq!(list::sum(&l), stream::sum(&fib));

    let d = numeric::derivative(1.0, |x| x * x * x + x + 13.0, 3.0, Tolerance::default()).unwrap();
    assert!((d - 28.0).abs() <= 1e-6);
}
