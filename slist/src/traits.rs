// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Designates an empty enum type to identify a singly linked list.
/// You are supposed to define an empty enum type for every singly linked list in your program
/// and implement this trait.
///
/// This is required, because a single element may be part of multiple lists, and henceforth its
/// element structure then contains multiple [`SlistLink`] fields.
/// To make all list functions insert and remove elements via the correct [`SlistLink`] fields,
/// lists need to be uniquely identified, and this is what the empty enum types are for.
///
/// The easiest way to implement this trait is to use `derive`:
///
/// ```
/// # use slist::Slist;
/// #[derive(Slist)]
/// enum MyList {}
/// ```
///
/// [`SlistLink`]: crate::typed::SlistLink
pub trait IsSlist {}

/// Designates an empty enum as a singly linked list.
///
/// Technically, this macro implements [`IsSlist`].
pub use slist_macros::Slist;

/// Designates a structure type as an element structure with a [`SlistLink`] field of a particular
/// singly linked list (identified via an empty enum type that implements [`IsSlist`]).
///
/// This trait can be implemented multiple times for the same element structure if the element
/// is part of multiple lists.
///
/// Implement it via `derive`, which also verifies at compile time that the designated field is
/// exactly a [`SlistLink`] of that list:
///
/// ```
/// # use slist::typed::SlistLink;
/// # use slist::{Slist, SlistElement};
/// #[derive(Slist)]
/// enum MyList {}
///
/// #[derive(SlistElement)]
/// struct MyElement {
///     value: i32,
///     link: SlistLink<Self, MyList>,
/// }
/// ```
///
/// or via [`impl_slist_element!`] when a derive is not an option.
///
/// [`SlistLink`]: crate::typed::SlistLink
/// [`impl_slist_element!`]: crate::impl_slist_element
pub trait HasSlistLink<L: IsSlist> {
    /// Byte offset of the [`SlistLink`] field relative to the beginning of the element structure.
    ///
    /// [`SlistLink`]: crate::typed::SlistLink
    const OFFSET: usize;
}

/// Implements [`HasSlistLink`] for an element structure.
///
/// This implements [`HasSlistLink`] for all [`SlistLink`] fields of a structure and checks at
/// compile time that each of them belongs to `Self`:
///
/// ```compile_fail
/// # use slist::typed::SlistLink;
/// # use slist::{Slist, SlistElement};
/// #[derive(Slist)]
/// enum MyList {}
///
/// #[derive(SlistElement)]
/// struct Parent {
///     link: SlistLink<Child, MyList>,
/// }
///
/// #[derive(SlistElement)]
/// struct Child {
///     link: SlistLink<Self, MyList>,
/// }
/// ```
///
/// [`SlistLink`]: crate::typed::SlistLink
pub use slist_macros::SlistElement;

/// Implements [`HasSlistLink`] by hand, given the element type, its link field, and the list.
///
/// The field must be exactly an [`SlistLink`] of that element and list, otherwise compilation fails:
///
/// ```compile_fail
/// # use slist::raw::SlistNode;
/// # use slist::{impl_slist_element, Slist};
/// #[derive(Slist)]
/// enum MyList {}
///
/// struct MyElement {
///     link: SlistNode,
/// }
///
/// impl_slist_element!(MyElement, link => MyList);
/// ```
///
/// [`SlistLink`]: crate::typed::SlistLink
#[macro_export]
macro_rules! impl_slist_element {
    ($element:ty, $field:ident => $list:ty) => {
        impl $crate::HasSlistLink<$list> for $element {
            const OFFSET: usize = ::core::mem::offset_of!($element, $field);
        }

        const _: fn(&$element) -> &$crate::typed::SlistLink<$element, $list> =
            |element| &element.$field;
    };
}
