// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! Consistency checks for singly linked lists.
//!
//! Nodes only know their successor, so the checker validates that following `next` from the
//! starting node eventually leads back to it.
//! Any other outcome (a null pointer, a node pointing to itself, a cycle that bypasses the
//! starting node, a node redirected into a different list) is reported as corruption.
//! Cycles are found with Floyd's tortoise and hare, so a corrupted chain is detected after at
//! most a few passes over it instead of looping forever.
//!
//! The checks only run with the `debug` feature.
//! Without it, [`check`] and [`check_node`] return their input unchanged and the engine skips
//! its internal checks.

use core::fmt::Display;
use core::panic::Location;
use core::pin::Pin;

use super::base::{RawSlistHead, SlistNode};

const ENABLED: bool = cfg!(any(test, feature = "debug"));

struct Corruption {
    node: *const SlistNode,
    count: usize,
}

/// Checks the list anchored at `head`.
///
/// Returns `head` if the list is consistent.
/// On corruption, this aborts with a diagnostic prefixed by `abortstr` (usually [`slist_loc!`]),
/// or returns `None` if `abortstr` is `None`.
///
/// # Safety
///
/// All nodes reachable from `head` must be valid memory.
///
/// [`slist_loc!`]: crate::slist_loc
pub unsafe fn check<'a>(
    head: Pin<&'a RawSlistHead>,
    abortstr: Option<&str>,
) -> Option<Pin<&'a RawSlistHead>> {
    check_node(&head.get_ref().n, abortstr).map(|_| head)
}

/// Checks the chain that `node` is linked into.
///
/// `node` may be the sentinel of a list or any node linked into a list.
/// See [`check`] for the behaviour on corruption.
///
/// # Safety
///
/// All nodes reachable from `node` must be valid memory.
pub unsafe fn check_node<'a>(node: &'a SlistNode, abortstr: Option<&str>) -> Option<&'a SlistNode> {
    if !ENABLED {
        return Some(node);
    }

    match find_corruption(node) {
        None => Some(node),
        Some(corruption) => {
            if let Some(abortstr) = abortstr {
                abort(abortstr, node, corruption);
            }

            None
        }
    }
}

/// Aborts if the list anchored at `head` is corrupted.
pub(crate) unsafe fn debug(head: Pin<&RawSlistHead>, location: &Location<'_>) {
    if !ENABLED {
        return;
    }

    let sentinel = head.sentinel();
    if let Some(corruption) = find_corruption(sentinel) {
        abort(location, sentinel, corruption);
    }
}

/// Aborts if `node` is neither the sentinel of `head` nor linked into its list.
pub(crate) unsafe fn debug_member(
    head: Pin<&RawSlistHead>,
    node: *const SlistNode,
    location: &Location<'_>,
) {
    if !ENABLED {
        return;
    }

    debug(head, location);

    let sentinel = head.sentinel();
    let mut current = sentinel;
    let mut count = 0usize;

    while current != node {
        current = (*current).next;
        count += 1;

        if current == sentinel {
            debug_missing(sentinel, node, count, location);
            return;
        }
    }
}

/// Aborts because `node` could not be found in the list of `sentinel` after visiting `count` nodes.
pub(crate) fn debug_missing(
    sentinel: *const SlistNode,
    node: *const SlistNode,
    count: usize,
    location: &Location<'_>,
) {
    if ENABLED {
        panic!(
            "{}: node {:p} is not in list {:p} ({} nodes visited)",
            location, node, sentinel, count
        );
    }
}

fn abort(location: impl Display, head: *const SlistNode, corruption: Corruption) -> ! {
    panic!(
        "{}: next corrupt in node {:p} ({}) of {:p}",
        location, corruption.node, corruption.count, head
    );
}

unsafe fn find_corruption(start: *const SlistNode) -> Option<Corruption> {
    let mut slow = start;
    let mut fast = start;
    let mut count = 0usize;

    loop {
        for _ in 0..2 {
            let next = (*fast).next as *const SlistNode;

            if next == start {
                return None;
            }
            if next.is_null() {
                return Some(Corruption { node: fast, count });
            }

            fast = next;
            count += 1;
        }

        slow = (*slow).next;
        if slow == fast {
            return Some(Corruption { node: fast, count });
        }
    }
}

#[cfg(test)]
mod tests {
    use core::ptr::{self, NonNull};

    use moveit::moveit;

    use super::*;
    use crate::slist_loc;

    struct Child {
        name: &'static str,
        node: SlistNode,
    }

    impl Child {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                node: SlistNode::new(),
            }
        }

        fn node(&mut self) -> NonNull<SlistNode> {
            NonNull::from(&mut self.node)
        }
    }

    #[test]
    fn test_check_consistent() {
        moveit! {
            let mut head = RawSlistHead::new();
        }

        let mut c1 = Child::new("c1");
        let mut c2 = Child::new("c2");
        let mut c3 = Child::new("c3");

        unsafe {
            assert!(check(head.as_ref(), None).is_some());

            for child in [&mut c3, &mut c2, &mut c1] {
                head.as_mut().push_front(child.node());
                assert!(check(head.as_ref(), Some(slist_loc!())).is_some());
            }

            assert!(check_node(&c1.node, None).is_some());
            assert!(check_node(&c2.node, None).is_some());
            assert!(check_node(&c3.node, None).is_some());

            head.as_mut().pop_front();
            assert!(check(head.as_ref(), None).is_some());
        }

        assert_eq!(c2.name, "c2");
    }

    #[test]
    fn test_check_self_loop() {
        moveit! {
            let mut head = RawSlistHead::new();
        }

        let mut c1 = Child::new("c1");
        let mut c2 = Child::new("c2");
        let mut c3 = Child::new("c3");

        unsafe {
            head.as_mut().push_front(c3.node());
            head.as_mut().push_front(c2.node());
            head.as_mut().push_front(c1.node());

            c2.node.next = ptr::addr_of_mut!(c2.node);
            assert!(check(head.as_ref(), None).is_none());
        }
    }

    #[test]
    fn test_check_redirected_into_other_list() {
        moveit! {
            let mut head = RawSlistHead::new();
            let mut other = RawSlistHead::new();
        }

        let mut c1 = Child::new("c1");
        let mut c2 = Child::new("c2");
        let mut c3 = Child::new("c3");

        unsafe {
            head.as_mut().push_front(c3.node());
            head.as_mut().push_front(c2.node());
            other.as_mut().push_front(c1.node());

            c3.node.next = c1.node().as_ptr();
            assert!(check(head.as_ref(), None).is_none());
            assert!(check(other.as_ref(), None).is_some());
        }
    }

    #[test]
    fn test_check_null_next() {
        moveit! {
            let mut head = RawSlistHead::new();
        }

        let mut c1 = Child::new("c1");
        let mut c2 = Child::new("c2");

        unsafe {
            head.as_mut().push_front(c1.node());
            c1.node.next = c2.node().as_ptr();
            assert!(check(head.as_ref(), None).is_none());
            assert!(check_node(&c2.node, None).is_none());
        }
    }

    #[test]
    #[should_panic(expected = "next corrupt in node")]
    fn test_check_aborts() {
        moveit! {
            let mut head = RawSlistHead::new();
        }

        let mut c1 = Child::new("c1");
        let mut c2 = Child::new("c2");

        unsafe {
            head.as_mut().push_front(c2.node());
            head.as_mut().push_front(c1.node());
            c2.node.next = c1.node().as_ptr();
            check(head.as_ref(), Some(slist_loc!()));
        }
    }

    #[test]
    #[should_panic(expected = "check.rs")]
    fn test_iter_reports_caller_location() {
        moveit! {
            let mut head = RawSlistHead::new();
        }

        let mut c1 = Child::new("c1");

        unsafe {
            head.as_mut().push_front(c1.node());
            c1.node.next = c1.node().as_ptr();
            head.as_ref().iter_offset(0).count();
        }
    }

    #[test]
    #[should_panic(expected = "is not in list")]
    fn test_insert_after_foreign_node() {
        moveit! {
            let mut head = RawSlistHead::new();
        }

        let mut c1 = Child::new("c1");
        let mut c2 = Child::new("c2");
        let mut c3 = Child::new("c3");

        unsafe {
            head.as_mut().push_front(c1.node());
            head.as_mut().insert_after(c2.node(), c3.node());
        }
    }

    #[test]
    #[should_panic(expected = "is not in list")]
    fn test_remove_foreign_node() {
        moveit! {
            let mut head = RawSlistHead::new();
        }

        let mut c1 = Child::new("c1");
        let mut c2 = Child::new("c2");

        unsafe {
            head.as_mut().push_front(c1.node());
            head.as_mut().remove(c2.node());
        }
    }
}
