// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::iter::{FusedIterator, Map};
use core::marker::{PhantomData, PhantomPinned};
use core::panic::Location;
use core::pin::Pin;
use core::ptr::{self, NonNull};

use moveit::{new, New};

use super::check;

/// The link embedded into every element of a singly linked list.
///
/// A new node is unlinked and its `next` pointer is null.
/// Once a node has been removed from a list, its `next` pointer is unspecified until the node
/// is inserted again.
#[derive(Debug)]
#[repr(C)]
pub struct SlistNode {
    pub(crate) next: *mut SlistNode,
}

impl SlistNode {
    /// Creates an unlinked node.
    pub const fn new() -> Self {
        Self {
            next: ptr::null_mut(),
        }
    }
}

impl Default for SlistNode {
    fn default() -> Self {
        Self::new()
    }
}

/// The head of a singly linked list.
///
/// The head contains the sentinel node of the circular chain.
/// As the chain refers back to the address of the sentinel, a head must never move once it
/// has been initialized.
/// This is why a head can only be created in place via [`RawSlistHead::new`] and is always
/// accessed through [`Pin`].
#[repr(C)]
pub struct RawSlistHead {
    pub(crate) n: SlistNode,
    pin: PhantomPinned,
}

impl RawSlistHead {
    /// Creates a new empty list.
    pub fn new() -> impl New<Output = Self> {
        new::of(Self::uninit()).with(|this| this.init())
    }

    /// Returns a head that still needs to be initialized via [`RawSlistHead::init`].
    pub(crate) const fn uninit() -> Self {
        Self {
            n: SlistNode::new(),
            pin: PhantomPinned,
        }
    }

    /// Removes all nodes from the list.
    ///
    /// The nodes themselves are not touched.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn clear(self: Pin<&mut Self>) {
        self.init()
    }

    /// Resets the list to the empty state by making the sentinel point to itself.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn init(self: Pin<&mut Self>) {
        let sentinel = self.sentinel_mut();
        unsafe { (*sentinel).next = sentinel };
    }

    /// Inserts `node` right after `prev`, which is either a node of this list or the sentinel.
    ///
    /// The `next` pointer of `node` is overwritten without being read.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// `prev` must be the sentinel of this list or a node currently linked into it.
    /// `node` must be valid, not be part of any list, and must not move while it is linked.
    #[track_caller]
    pub unsafe fn insert_after(
        self: Pin<&mut Self>,
        prev: NonNull<SlistNode>,
        node: NonNull<SlistNode>,
    ) {
        check::debug_member(self.as_ref(), prev.as_ptr(), Location::caller());

        let prev = prev.as_ptr();
        let node = node.as_ptr();
        (*node).next = (*prev).next;
        (*prev).next = node;
    }

    /// Returns `true` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn is_empty(self: Pin<&Self>) -> bool {
        self.n.next as *const SlistNode == self.sentinel()
    }

    /// Returns an iterator yielding the start address of every memory region in the list.
    ///
    /// Each region contains its [`SlistNode`] at byte `offset`.
    /// The iterator stops when it is back at the sentinel.
    /// It can be cloned to restart the traversal from the current position.
    ///
    /// # Safety
    ///
    /// All linked nodes must be valid and embedded into their regions at exactly `offset` bytes.
    /// Passing the wrong offset makes the iterator walk through arbitrary memory.
    /// The list must not be modified while the iterator is alive.
    #[track_caller]
    pub unsafe fn iter_offset(self: Pin<&Self>, offset: usize) -> OffsetIter<'_> {
        check::debug(self, Location::caller());

        OffsetIter {
            sentinel: self.sentinel(),
            current: self.n.next,
            offset,
            phantom: PhantomData,
        }
    }

    /// Returns an iterator yielding every node in the list.
    ///
    /// # Safety
    ///
    /// See [`RawSlistHead::iter_offset`].
    #[track_caller]
    pub unsafe fn iter_nodes(
        self: Pin<&Self>,
    ) -> Map<OffsetIter<'_>, fn(NonNull<u8>) -> NonNull<SlistNode>> {
        self.iter_offset(0)
            .map(NonNull::<u8>::cast::<SlistNode> as fn(NonNull<u8>) -> NonNull<SlistNode>)
    }

    /// Counts all nodes and returns the length of the list.
    ///
    /// This operation computes in *O*(*n*) time.
    ///
    /// # Safety
    ///
    /// All linked nodes must be valid.
    #[track_caller]
    pub unsafe fn len(self: Pin<&Self>) -> usize {
        self.iter_offset(0).count()
    }

    /// Provides the first node, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn peek_front(self: Pin<&Self>) -> Option<NonNull<SlistNode>> {
        if self.is_empty() {
            None
        } else {
            NonNull::new(self.n.next)
        }
    }

    /// Removes the first node from the list and returns it, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// All linked nodes must be valid.
    pub unsafe fn pop_front(mut self: Pin<&mut Self>) -> Option<NonNull<SlistNode>> {
        let sentinel = self.as_mut().sentinel_mut();
        self.remove_after(NonNull::new_unchecked(sentinel))
    }

    /// Prepends `node` to the list.
    ///
    /// The `next` pointer of `node` is overwritten without being read.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// `node` must be valid, not be part of any list, and must not move while it is linked.
    pub unsafe fn push_front(self: Pin<&mut Self>, node: NonNull<SlistNode>) {
        let sentinel = self.sentinel_mut();
        let node = node.as_ptr();
        (*node).next = (*sentinel).next;
        (*sentinel).next = node;
    }

    /// Unlinks `node` from the list.
    ///
    /// Nodes don't know their predecessor, so this walks the list until it finds the node
    /// pointing to `node`.
    /// Use [`RawSlistHead::remove_after`] if you already know the predecessor.
    /// The `next` pointer of `node` is unspecified afterwards.
    ///
    /// With the `debug` feature, a `node` that is not part of the list aborts with a diagnostic.
    /// Otherwise, the list is left untouched in that case.
    ///
    /// This operation computes in *O*(*n*) time.
    ///
    /// # Safety
    ///
    /// `node` must be part of this list and all linked nodes must be valid.
    #[track_caller]
    pub unsafe fn remove(self: Pin<&mut Self>, node: NonNull<SlistNode>) {
        check::debug(self.as_ref(), Location::caller());

        let sentinel = self.sentinel_mut();
        let node = node.as_ptr();
        let mut prev = sentinel;
        let mut count = 0usize;

        while (*prev).next != node {
            prev = (*prev).next;
            count += 1;

            if prev == sentinel {
                check::debug_missing(sentinel, node, count, Location::caller());
                return;
            }
        }

        (*prev).next = (*node).next;
    }

    /// Unlinks the node following `prev` and returns it, or `None` if `prev` is the last node.
    ///
    /// This is the only way to remove an arbitrary node in *O*(*1*) time.
    /// The `next` pointer of the returned node is unspecified afterwards.
    ///
    /// # Safety
    ///
    /// `prev` must be the sentinel of this list or a node currently linked into it.
    /// All linked nodes must be valid.
    pub unsafe fn remove_after(
        self: Pin<&mut Self>,
        prev: NonNull<SlistNode>,
    ) -> Option<NonNull<SlistNode>> {
        let sentinel = self.sentinel_mut();
        let prev = prev.as_ptr();
        let node = (*prev).next;

        if node == sentinel {
            return None;
        }

        (*prev).next = (*node).next;
        NonNull::new(node)
    }

    /// Returns a const pointer to the sentinel node.
    pub(crate) fn sentinel(self: Pin<&Self>) -> *const SlistNode {
        ptr::addr_of!(self.get_ref().n)
    }

    /// Returns a mutable pointer to the sentinel node.
    pub(crate) fn sentinel_mut(self: Pin<&mut Self>) -> *mut SlistNode {
        let this = unsafe { self.get_unchecked_mut() };
        ptr::addr_of_mut!(this.n)
    }
}

/// Iterator over the memory regions of a singly linked list.
///
/// This iterator is returned from the [`RawSlistHead::iter_offset`] function.
pub struct OffsetIter<'a> {
    sentinel: *const SlistNode,
    current: *const SlistNode,
    offset: usize,
    phantom: PhantomData<&'a RawSlistHead>,
}

impl<'a> Clone for OffsetIter<'a> {
    fn clone(&self) -> Self {
        Self {
            sentinel: self.sentinel,
            current: self.current,
            offset: self.offset,
            phantom: PhantomData,
        }
    }
}

impl<'a> Iterator for OffsetIter<'a> {
    type Item = NonNull<u8>;

    fn next(&mut self) -> Option<NonNull<u8>> {
        if self.current == self.sentinel {
            None
        } else {
            unsafe {
                let region = self.current.cast::<u8>().sub(self.offset);
                self.current = (*self.current).next;
                NonNull::new(region.cast_mut())
            }
        }
    }
}

impl<'a> FusedIterator for OffsetIter<'a> {}
