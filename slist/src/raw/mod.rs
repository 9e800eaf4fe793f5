// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! The untyped list engine.
//!
//! A list is anchored at a [`RawSlistHead`], whose embedded [`SlistNode`] acts as a sentinel:
//! the last node of the chain points back to it, and an empty list is a sentinel pointing to itself.
//! Nodes are embedded somewhere in caller-owned memory regions.
//! The engine never looks at those regions except through [`RawSlistHead::iter_offset`], which
//! turns every node address back into the address of its region by subtracting a byte offset.
//!
//! Nothing here knows the type of the regions, which is why almost all functions are `unsafe`.
//! Use the [`typed`](crate::typed) layer unless you really need to deal with opaque elements.

mod base;
pub mod check;

pub use base::*;
