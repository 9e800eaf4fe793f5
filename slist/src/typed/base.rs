// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::pin::Pin;
use core::ptr::NonNull;

use moveit::{new, New};

use crate::raw::{check, OffsetIter, RawSlistHead, SlistNode};
use crate::traits::{HasSlistLink, IsSlist};

/// A singly linked list header bound to the element type `E` and its link field for list `L`.
///
/// This is a zero-cost wrapper around [`RawSlistHead`].
/// It requires elements to be allocated beforehand on a stable address and be valid as long as
/// the list is used.
/// As the Rust compiler cannot guarantee the validity of them, almost all `SlistHead` functions
/// are `unsafe`.
///
/// See the [module-level documentation](crate::typed) for more details.
///
/// Elements of any other type, or linked via another list's field, are rejected at compile time:
///
/// ```compile_fail
/// # use moveit::moveit;
/// # use slist::typed::{SlistHead, SlistLink};
/// # use slist::{Slist, SlistElement};
/// #[derive(Slist)]
/// enum MyList {}
///
/// #[derive(Slist)]
/// enum OtherList {}
///
/// #[derive(Default, SlistElement)]
/// struct MyElement {
///     link: SlistLink<Self, MyList>,
/// }
///
/// #[derive(Default, SlistElement)]
/// struct OtherElement {
///     link: SlistLink<Self, OtherList>,
/// }
///
/// moveit! {
///     let mut list = SlistHead::<MyElement, MyList>::new();
/// }
///
/// let mut element = OtherElement::default();
/// unsafe { list.as_mut().push_front(&mut element) };
/// ```
#[repr(transparent)]
pub struct SlistHead<E, L> {
    raw: RawSlistHead,
    phantom: PhantomData<(*const E, L)>,
}

impl<E, L> SlistHead<E, L>
where
    E: HasSlistLink<L>,
    L: IsSlist,
{
    /// Creates a new empty list.
    pub fn new() -> impl New<Output = Self> {
        new::of(Self {
            raw: RawSlistHead::uninit(),
            phantom: PhantomData,
        })
        .with(|this| this.as_raw_mut().init())
    }

    /// Returns the untyped list head.
    pub fn as_raw(self: Pin<&Self>) -> Pin<&RawSlistHead> {
        unsafe { self.map_unchecked(|this| &this.raw) }
    }

    /// Returns the untyped list head for modification.
    ///
    /// Everything that can break the list through it is `unsafe`.
    pub fn as_raw_mut(self: Pin<&mut Self>) -> Pin<&mut RawSlistHead> {
        unsafe { self.map_unchecked_mut(|this| &mut this.raw) }
    }

    /// Validates the list with the consistency checker.
    ///
    /// See [`check::check`] for details.
    ///
    /// # Safety
    ///
    /// All linked elements must be valid.
    pub unsafe fn check(self: Pin<&Self>, abortstr: Option<&str>) -> Option<Pin<&Self>> {
        check::check(self.as_raw(), abortstr).map(|_| self)
    }

    /// Removes all elements from the list.
    ///
    /// This operation computes in *O*(*1*) time, because it only resets the sentinel.
    /// The elements are not touched.
    pub fn clear(self: Pin<&mut Self>) {
        self.as_raw_mut().clear()
    }

    /// Provides a reference to the first element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// All linked elements must be valid.
    pub unsafe fn front(self: Pin<&Self>) -> Option<&E> {
        self.as_raw()
            .peek_front()
            .map(|node| SlistLink::<E, L>::containing_record(node).as_ref())
    }

    /// Provides a mutable reference to the first element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// All linked elements must be valid.
    pub unsafe fn front_mut(self: Pin<&mut Self>) -> Option<&mut E> {
        self.as_raw_mut()
            .into_ref()
            .peek_front()
            .map(|node| SlistLink::<E, L>::containing_record(node).as_mut())
    }

    /// Resets the list to the empty state.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn init(self: Pin<&mut Self>) {
        self.as_raw_mut().init()
    }

    /// Inserts `element` right after `prev`.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// `prev` must be part of this list.
    /// `element` must not be part of this list and must not move while it is linked.
    #[track_caller]
    pub unsafe fn insert_after(self: Pin<&mut Self>, prev: &mut E, element: &mut E) {
        let prev = SlistLink::<E, L>::node(prev);
        let node = SlistLink::<E, L>::node(element);
        self.as_raw_mut().insert_after(prev, node);
    }

    /// Returns `true` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn is_empty(self: Pin<&Self>) -> bool {
        self.as_raw().is_empty()
    }

    /// Returns an iterator yielding references to each element of the list.
    ///
    /// # Safety
    ///
    /// All linked elements must be valid.
    #[track_caller]
    pub unsafe fn iter(self: Pin<&Self>) -> Iter<'_, E, L> {
        Iter {
            inner: self.as_raw().iter_offset(E::OFFSET),
            phantom: PhantomData,
        }
    }

    /// Returns an iterator yielding mutable references to each element of the list.
    ///
    /// # Safety
    ///
    /// All linked elements must be valid.
    #[track_caller]
    pub unsafe fn iter_mut(self: Pin<&mut Self>) -> IterMut<'_, E, L> {
        IterMut {
            inner: self.into_ref().as_raw().iter_offset(E::OFFSET),
            phantom: PhantomData,
        }
    }

    /// Counts all elements and returns the length of the list.
    ///
    /// This operation computes in *O*(*n*) time.
    ///
    /// # Safety
    ///
    /// All linked elements must be valid.
    #[track_caller]
    pub unsafe fn len(self: Pin<&Self>) -> usize {
        self.as_raw().len()
    }

    /// Removes the first element from the list and returns it, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// All linked elements must be valid.
    pub unsafe fn pop_front(self: Pin<&mut Self>) -> Option<&mut E> {
        self.as_raw_mut()
            .pop_front()
            .map(|node| SlistLink::<E, L>::containing_record(node).as_mut())
    }

    /// Prepends `element` to the list.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// `element` must not be part of this list and must not move while it is linked.
    pub unsafe fn push_front(self: Pin<&mut Self>, element: &mut E) {
        let node = SlistLink::<E, L>::node(element);
        self.as_raw_mut().push_front(node);
    }

    /// Removes `element` from the list.
    ///
    /// This operation computes in *O*(*n*) time, because the predecessor of `element` has to be
    /// found first.
    /// Use [`SlistHead::remove_after`] if you know the predecessor.
    ///
    /// # Safety
    ///
    /// `element` must be part of this list.
    #[track_caller]
    pub unsafe fn remove(self: Pin<&mut Self>, element: &mut E) {
        let node = SlistLink::<E, L>::node(element);
        self.as_raw_mut().remove(node);
    }

    /// Removes the element following `prev` and returns it, or `None` if `prev` is the last element.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// # Safety
    ///
    /// `prev` must be part of this list.
    pub unsafe fn remove_after(self: Pin<&mut Self>, prev: &mut E) -> Option<&mut E> {
        let prev = SlistLink::<E, L>::node(prev);
        self.as_raw_mut()
            .remove_after(prev)
            .map(|node| SlistLink::<E, L>::containing_record(node).as_mut())
    }

    /// Retains only the elements specified by the predicate, passing a mutable reference to it.
    ///
    /// In other words, remove all elements `e` for which `f(&mut e)` returns `false`.
    /// This method operates in place, visiting each element exactly once in the original order,
    /// and preserves the order of the retained elements.
    /// The predicate may relink a removed element into another list.
    ///
    /// This operation computes in *O*(*n*) time.
    ///
    /// # Safety
    ///
    /// All linked elements must be valid.
    pub unsafe fn retain<F>(self: Pin<&mut Self>, mut f: F)
    where
        F: FnMut(&mut E) -> bool,
    {
        let sentinel = self.as_raw_mut().sentinel_mut();
        let mut previous = sentinel;
        let mut current = (*sentinel).next;

        while current != sentinel {
            let next = (*current).next;
            let element = SlistLink::<E, L>::containing_record(NonNull::new_unchecked(current));

            if f(&mut *element.as_ptr()) {
                previous = current;
            } else {
                (*previous).next = next;
            }

            current = next;
        }
    }
}

/// Iterator over the elements of a singly linked list.
///
/// This iterator is returned from the [`SlistHead::iter`] function.
pub struct Iter<'a, E, L> {
    inner: OffsetIter<'a>,
    phantom: PhantomData<(&'a E, L)>,
}

impl<'a, E, L> Clone for Iter<'a, E, L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'a, E, L> Iterator for Iter<'a, E, L>
where
    E: HasSlistLink<L>,
    L: IsSlist,
{
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        self.inner
            .next()
            .map(|region| unsafe { region.cast::<E>().as_ref() })
    }
}

impl<'a, E, L> FusedIterator for Iter<'a, E, L>
where
    E: HasSlistLink<L>,
    L: IsSlist,
{
}

/// Mutable iterator over the elements of a singly linked list.
///
/// This iterator is returned from the [`SlistHead::iter_mut`] function.
pub struct IterMut<'a, E, L> {
    inner: OffsetIter<'a>,
    phantom: PhantomData<(&'a mut E, L)>,
}

impl<'a, E, L> Iterator for IterMut<'a, E, L>
where
    E: HasSlistLink<L>,
    L: IsSlist,
{
    type Item = &'a mut E;

    fn next(&mut self) -> Option<&'a mut E> {
        self.inner
            .next()
            .map(|region| unsafe { region.cast::<E>().as_mut() })
    }
}

impl<'a, E, L> FusedIterator for IterMut<'a, E, L>
where
    E: HasSlistLink<L>,
    L: IsSlist,
{
}

/// The link field of an element in list `L`.
///
/// Embed one of these into your element structure for every list the element shall be part of
/// and derive [`SlistElement`](crate::SlistElement) on the structure.
#[repr(transparent)]
pub struct SlistLink<E, L> {
    node: SlistNode,
    phantom: PhantomData<(*const E, L)>,
}

impl<E, L> SlistLink<E, L>
where
    E: HasSlistLink<L>,
    L: IsSlist,
{
    /// Creates an unlinked link.
    pub const fn new() -> Self {
        Self {
            node: SlistNode::new(),
            phantom: PhantomData,
        }
    }

    /// Returns the element that contains the link `node`.
    pub(crate) fn containing_record(node: NonNull<SlistNode>) -> NonNull<E> {
        let ptr = node.as_ptr();

        // This is the canonical implementation of `byte_sub`
        let ptr = unsafe { ptr.cast::<u8>().sub(E::OFFSET).cast::<E>() };

        unsafe { NonNull::new_unchecked(ptr) }
    }

    /// Returns the link node of `element`.
    pub(crate) fn node(element: &mut E) -> NonNull<SlistNode> {
        let element_ptr = element as *mut E;

        // This is the canonical implementation of `byte_add`
        let ptr = unsafe { element_ptr.cast::<u8>().add(E::OFFSET).cast::<SlistNode>() };

        unsafe { NonNull::new_unchecked(ptr) }
    }
}

impl<E, L> Default for SlistLink<E, L>
where
    E: HasSlistLink<L>,
    L: IsSlist,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, L> fmt::Debug for SlistLink<E, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlistLink")
            .field("next", &self.node.next)
            .finish()
    }
}
