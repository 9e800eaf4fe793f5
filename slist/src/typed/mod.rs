// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! A type-safe singly linked list on top of the [`raw`](crate::raw) engine.
//!
//! To make this list type-safe, `slist` first asks you to declare an empty enum, which then serves
//! as the `L` type parameter to distinguish different lists.
//! A list element can be part of multiple linked lists by having multiple link fields in the element
//! structure.
//! You need to declare an empty enum for every link field of every element structure.
//!
//! The empty enum is designated as a singly linked list via:
//!
//! ```
//! # use slist::Slist;
//! #[derive(Slist)]
//! enum MyList {}
//! ```
//!
//! Next you define your element structure, adding an [`SlistLink`] field for each singly linked
//! list you want your element to be part of:
//!
//! ```
//! # use slist::typed::SlistLink;
//! # use slist::{Slist, SlistElement};
//! # #[derive(Slist)]
//! # enum MyList {}
//! #[derive(Default, SlistElement)]
//! struct MyElement {
//!     link: SlistLink<Self, MyList>,
//!     value: i32,
//! }
//! ```
//!
//! The derive computes the byte offset of the link field at compile time and rejects any field
//! that is not a link of `Self` in that list.
//!
//! You can then manage that list using [`SlistHead`]:
//!
//! ```
//! # use moveit::moveit;
//! # use slist::typed::{SlistHead, SlistLink};
//! # use slist::{Slist, SlistElement};
//! # #[derive(Slist)]
//! # enum MyList {}
//! # #[derive(Default, SlistElement)]
//! # struct MyElement {
//! #     link: SlistLink<Self, MyList>,
//! #     value: i32,
//! # }
//! moveit! {
//!     let mut list = SlistHead::<MyElement, MyList>::new();
//! }
//!
//! let mut element = MyElement {
//!     value: 42,
//!     ..Default::default()
//! };
//!
//! unsafe {
//!     list.as_mut().push_front(&mut element);
//!     assert_eq!(list.as_ref().front().unwrap().value, 42);
//! }
//! assert!(!list.as_ref().is_empty());
//! ```
//!
//! The list never owns its elements.
//! They have to live on a stable address for as long as they are linked, and the Rust compiler
//! cannot guarantee that.
//! This is why almost all [`SlistHead`] functions are `unsafe`.

mod base;

pub use base::*;
