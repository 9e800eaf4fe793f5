// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! Intrusive singly linked lists anchored at a circular sentinel.
//!
//! The link field lives inside your own element structure, so the list never allocates and never
//! owns its elements.
//! The crate comes in two layers:
//!
//! * [`raw`] is the untyped engine. It only knows about [`SlistNode`] links and a
//!   [`RawSlistHead`] sentinel and walks arbitrary memory regions by a byte offset.
//! * [`typed`] binds an element type and one of its link fields to a list head, so that all
//!   operations take and return references to your elements.
//!   Mixing up element types or link fields is rejected at compile time.
//!
//! Enabling the `debug` feature turns on the consistency checker in [`raw::check`].
//! Run the test suite with `--features debug` as well, so the integration tests exercise it.
//!
//! [`SlistNode`]: raw::SlistNode
//! [`RawSlistHead`]: raw::RawSlistHead

#![no_std]

// Required for deriving our traits when testing.
#[cfg(test)]
extern crate self as slist;

pub mod raw;
mod traits;
pub mod typed;

pub use traits::*;

/// Expands to a `"file:line"` string of the invocation site.
///
/// Pass this to [`raw::check::check`] and friends to have corruption diagnostics point at your code.
#[macro_export]
macro_rules! slist_loc {
    () => {
        ::core::concat!(::core::file!(), ":", ::core::line!())
    };
}
