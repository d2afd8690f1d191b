//! This crate exposes [`OrderedTree`], a plain (unbalanced) Binary Search Tree
//! over unique, totally ordered elements.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//! > `Node`s with two children are called "full nodes".
//!
//! Because both comparisons are strict, an [`OrderedTree`] never stores two
//! equal elements. Inserting a duplicate is rejected rather than overwriting.
//!
//! ## Diagnostics
//!
//! With the `node-census` feature enabled, `OrderedTree::allocated_nodes` and
//! `OrderedTree::has_leak` report how many nodes are alive on the current
//! thread. Without it nothing is counted.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod census;
pub mod error;
mod tree;

pub use error::{Result, TreeError};
pub use tree::OrderedTree;
