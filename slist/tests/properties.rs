// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use moveit::moveit;
use proptest::prelude::*;
use proptest::sample::Index;
use slist::typed::{SlistHead, SlistLink};
use slist::{slist_loc, Slist, SlistElement};

const POOL: usize = 16;

#[derive(Slist)]
enum Numbers {}

#[derive(Default, SlistElement)]
struct Number {
    value: usize,
    link: SlistLink<Self, Numbers>,
}

#[derive(Clone, Debug)]
enum Op {
    Push(usize),
    Pop,
    InsertAfter(Index, usize),
    Remove(Index),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..POOL).prop_map(Op::Push),
        Just(Op::Pop),
        (any::<Index>(), 0..POOL).prop_map(|(prev, value)| Op::InsertAfter(prev, value)),
        any::<Index>().prop_map(Op::Remove),
    ]
}

fn pool() -> Vec<Number> {
    (0..POOL)
        .map(|value| Number {
            value,
            ..Default::default()
        })
        .collect()
}

proptest! {
    /// Every sequence of operations keeps the list in sync with a `Vec` model whose index 0 is
    /// the front of the list.
    #[test]
    fn matches_model(ops in prop::collection::vec(op(), 0..64)) {
        moveit! {
            let mut list = SlistHead::<Number, Numbers>::new();
        }

        let mut pool = pool();
        let elements = pool.as_mut_ptr();
        let mut model = Vec::<usize>::new();

        for op in ops {
            unsafe {
                match op {
                    Op::Push(value) => {
                        if !model.contains(&value) {
                            list.as_mut().push_front(&mut *elements.add(value));
                            model.insert(0, value);
                        }
                    }
                    Op::Pop => {
                        let popped = list.as_mut().pop_front().map(|number| number.value);
                        let expected = (!model.is_empty()).then(|| model.remove(0));
                        prop_assert_eq!(popped, expected);
                    }
                    Op::InsertAfter(prev, value) => {
                        if !model.is_empty() && !model.contains(&value) {
                            let position = prev.index(model.len());
                            list.as_mut().insert_after(
                                &mut *elements.add(model[position]),
                                &mut *elements.add(value),
                            );
                            model.insert(position + 1, value);
                        }
                    }
                    Op::Remove(index) => {
                        if !model.is_empty() {
                            let position = index.index(model.len());
                            list.as_mut().remove(&mut *elements.add(model[position]));
                            model.remove(position);
                        }
                    }
                }

                prop_assert!(list.as_ref().check(Some(slist_loc!())).is_some());

                // Bounded walk: the chain must reach the sentinel after exactly `model.len()`
                // elements, even when the checker above is compiled out.
                let values: Vec<usize> = list
                    .as_ref()
                    .iter()
                    .take(model.len() + 1)
                    .map(|number| number.value)
                    .collect();
                prop_assert_eq!(&values, &model);
                prop_assert_eq!(list.as_ref().is_empty(), model.is_empty());
                prop_assert_eq!(list.as_ref().len(), model.len());
            }
        }
    }

    /// Pushing an element and popping it again returns that element and restores the list.
    #[test]
    fn push_pop_round_trip(prefix in prop::collection::vec(0..POOL - 1, 0..POOL)) {
        moveit! {
            let mut list = SlistHead::<Number, Numbers>::new();
        }

        let mut pool = pool();
        let (extra, prefix_pool) = pool.split_last_mut().unwrap();
        let mut prefix = prefix;
        prefix.sort_unstable();
        prefix.dedup();

        unsafe {
            for &value in &prefix {
                list.as_mut().push_front(&mut prefix_pool[value]);
            }

            let before: Vec<usize> = list.as_ref().iter().map(|number| number.value).collect();

            list.as_mut().push_front(extra);
            prop_assert_eq!(list.as_ref().front().map(|number| number.value), Some(POOL - 1));

            let popped = list.as_mut().pop_front().map(|number| number.value);
            prop_assert_eq!(popped, Some(POOL - 1));

            let after: Vec<usize> = list.as_ref().iter().map(|number| number.value).collect();
            prop_assert_eq!(before, after);
        }
    }

    /// Traversal visits every element exactly once, and again in the same order when restarted.
    #[test]
    fn traversal_is_finite_and_restartable(count in 0..POOL) {
        moveit! {
            let mut list = SlistHead::<Number, Numbers>::new();
        }

        let mut pool = pool();

        unsafe {
            for number in pool.iter_mut().take(count) {
                list.as_mut().push_front(number);
            }

            let first: Vec<usize> = list.as_ref().iter().map(|number| number.value).collect();
            let second: Vec<usize> = list.as_ref().iter().map(|number| number.value).collect();

            prop_assert_eq!(first.len(), count);
            prop_assert!(first.iter().copied().eq((0..count).rev()));
            prop_assert_eq!(first, second);
        }
    }
}

#[test]
fn pop_empty() {
    moveit! {
        let mut list = SlistHead::<Number, Numbers>::new();
    }

    unsafe {
        assert!(list.as_mut().pop_front().is_none());
        assert!(list.as_ref().is_empty());
        assert!(list.as_ref().front().is_none());
        assert_eq!(list.as_ref().iter().count(), 0);
    }
}
