//! An unbalanced, duplicate-free Binary Search Tree. Every node exclusively
//! owns its children through a `Box`, so dropping a subtree frees the whole
//! subtree and no node is ever shared.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{OrderedTree, TreeError};
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.is_empty());
//! assert!(matches!(tree.find_min(), Err(TreeError::EmptyStructure { .. })));
//!
//! for x in [5, 3, 8, 1, 4, 7, 9] {
//!     assert!(tree.insert(x));
//! }
//!
//! // Duplicates are rejected.
//! assert!(!tree.insert(4));
//!
//! assert_eq!(tree.find_min(), Ok(&1));
//! assert_eq!(tree.find_max(), Ok(&9));
//! assert_eq!(tree.level_order(), vec![&5, &3, &8, &1, &4, &7, &9]);
//!
//! // Removing a node with two children promotes its in-order successor.
//! assert_eq!(tree.remove(&5), Ok(true));
//! assert_eq!(tree.level_order(), vec![&7, &3, &8, &1, &4, &9]);
//! assert_eq!(tree.to_string(), "1 3 4 7 8 9 ");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::mem;

use tracing::trace;

use crate::census::Tally;
use crate::error::{Result, TreeError};

/// A Binary Search Tree holding unique, totally ordered elements. This can be
/// used for inserting, finding, and removing elements as well as answering a
/// handful of structural questions (how many leaves, how many full nodes...).
///
/// The tree never rebalances, so its shape is entirely determined by the
/// order in which elements were inserted and removed.
pub struct OrderedTree<E> {
    root: Link<E>,
}

/// An owned, possibly absent, child.
type Link<E> = Option<Box<Node<E>>>;

impl<E> Default for OrderedTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for OrderedTree<E> {
    fn drop(&mut self) {
        self.make_empty();
    }
}

impl<E> fmt::Debug for OrderedTree<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("root", &self.root.as_deref())
            .finish()
    }
}

/// Renders the elements in order, each followed by a single space.
impl<E> fmt::Display for OrderedTree<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.in_order() {
            write!(f, "{} ", item)?;
        }
        Ok(())
    }
}

impl<E> OrderedTree<E> {
    /// Generate a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Whether the tree holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node in the tree, leaving it empty.
    ///
    /// Nodes are released from an explicit stack instead of through recursive
    /// `Box` drops so a degenerate, list-shaped tree can't overflow the call
    /// stack.
    pub fn make_empty(&mut self) {
        let mut pending: Vec<Box<Node<E>>> = self.root.take().into_iter().collect();
        let mut released = 0_usize;
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
            released += 1;
        }

        if released > 0 {
            trace!(released, "emptied tree");
        }
    }

    /// The smallest element in the tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.find_min().is_err());
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.find_min(), Ok(&1));
    /// ```
    pub fn find_min(&self) -> Result<&E> {
        let mut node = self.root.as_deref().ok_or(TreeError::EmptyStructure {
            operation: "find_min",
        })?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.data)
    }

    /// The largest element in the tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    pub fn find_max(&self) -> Result<&E> {
        let mut node = self.root.as_deref().ok_or(TreeError::EmptyStructure {
            operation: "find_max",
        })?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.data)
    }

    /// Number of elements stored in the tree.
    ///
    /// This walks the whole tree: the root counts for itself and every node
    /// counts each child it has.
    pub fn number_of_nodes(&self) -> usize {
        self.root.as_deref().map_or(0, |root| 1 + root.descendants())
    }

    /// Number of nodes with no children.
    pub fn number_of_leaves(&self) -> usize {
        self.root.as_deref().map_or(0, Node::leaves)
    }

    /// Number of nodes with exactly two children.
    pub fn number_of_full_nodes(&self) -> usize {
        self.root.as_deref().map_or(0, Node::full_nodes)
    }

    /// Removes every node that is currently a leaf and returns their elements,
    /// visiting left subtrees before right subtrees.
    ///
    /// This is a single pass: parents that only become leaves because their
    /// children were pruned stay in the tree. A tree consisting of just a root
    /// loses that root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for x in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.remove_leaves(), vec![1, 4, 7, 9]);
    /// assert_eq!(tree.remove_leaves(), vec![3, 8]);
    /// assert_eq!(tree.remove_leaves(), vec![5]);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove_leaves(&mut self) -> Vec<E> {
        let mut pruned = Vec::new();
        prune_leaves(&mut self.root, &mut pruned);
        trace!(pruned = pruned.len(), "removed leaves");
        pruned
    }

    /// The elements in breadth-first order: the root, then its children left
    /// to right, then their children, and so on.
    pub fn level_order(&self) -> Vec<&E> {
        let mut out = Vec::new();
        // Level 1 is the root. An empty tree has a height of -1 so has no levels.
        for level in 1..=self.height() + 1 {
            collect_level(self.root.as_deref(), level, &mut out);
        }
        out
    }

    /// The elements in sorted order.
    pub fn in_order(&self) -> Vec<&E> {
        let mut out = Vec::new();
        if let Some(root) = self.root.as_deref() {
            root.collect_in_order(&mut out);
        }
        out
    }

    /// Writes the elements in sorted order to `sink`, each followed by a
    /// single space. This is the same text the `Display` impl produces.
    ///
    /// # Errors
    ///
    /// Only errors raised by `sink` itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(2);
    /// tree.insert(3);
    /// tree.insert(1);
    ///
    /// let mut out = Vec::new();
    /// tree.print_tree(&mut out).unwrap();
    /// assert_eq!(out, b"1 2 3 ");
    /// ```
    pub fn print_tree<W>(&self, sink: &mut W) -> io::Result<()>
    where
        W: io::Write,
        E: fmt::Display,
    {
        write!(sink, "{}", self)
    }

    /// Height of the tree where a lone root has height 0 and an empty tree
    /// has height -1.
    fn height(&self) -> isize {
        Node::height(self.root.as_deref())
    }
}

impl<E> OrderedTree<E>
where
    E: Ord,
{
    /// Inserts `item` unless an equal element is already stored. Returns
    /// whether the tree changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.number_of_nodes(), 1);
    /// ```
    pub fn insert(&mut self, item: E) -> bool {
        insert_into(&mut self.root, item)
    }

    /// Removes the element equal to `item`. Returns `Ok(false)` if there was no
    /// such element.
    ///
    /// A node with two children takes the value of its in-order successor (the
    /// smallest element of its right subtree) and the successor's node is
    /// removed instead.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.remove(&1).is_err());
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.remove(&2), Ok(false));
    /// assert_eq!(tree.remove(&1), Ok(true));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, item: &E) -> Result<bool> {
        if self.is_empty() {
            return Err(TreeError::EmptyStructure {
                operation: "remove",
            });
        }
        Ok(remove_from(&mut self.root, item))
    }

    /// Whether an element equal to `val` is stored in the tree.
    pub fn contains(&self, val: &E) -> bool {
        self.root.as_deref().map_or(false, |root| root.contains(val))
    }
}

#[cfg(any(test, feature = "node-census"))]
impl<E> OrderedTree<E> {
    /// How many nodes are alive on the current thread, across every tree.
    pub fn allocated_nodes() -> usize {
        crate::census::live_nodes()
    }

    /// Whether any node on the current thread is still alive. After every tree
    /// has been emptied or dropped this must be `false`.
    pub fn has_leak() -> bool {
        Self::allocated_nodes() != 0
    }
}

fn insert_into<E>(slot: &mut Link<E>, item: E) -> bool
where
    E: Ord,
{
    match slot {
        None => {
            *slot = Some(Node::new_boxed(item));
            true
        }
        Some(node) => match item.cmp(&node.data) {
            Ordering::Less => insert_into(&mut node.left, item),
            Ordering::Equal => false,
            Ordering::Greater => insert_into(&mut node.right, item),
        },
    }
}

fn remove_from<E>(slot: &mut Link<E>, item: &E) -> bool
where
    E: Ord,
{
    let Some(node) = slot.as_deref_mut() else {
        return false;
    };
    match item.cmp(&node.data) {
        Ordering::Less => remove_from(&mut node.left, item),
        Ordering::Greater => remove_from(&mut node.right, item),
        Ordering::Equal if node.is_full() => {
            // The successor has no left child so detaching it is a splice.
            if let Some(mut successor) = detach_min(&mut node.right) {
                mem::swap(&mut node.data, &mut successor.data);
                trace!("replaced full node with its in-order successor");
            }
            true
        }
        Ordering::Equal => {
            let child = node.left.take().or_else(|| node.right.take());
            *slot = child;
            true
        }
    }
}

/// Unlinks the leftmost node of the subtree in `slot`, putting that node's
/// right child in its place.
fn detach_min<E>(slot: &mut Link<E>) -> Link<E> {
    if slot.as_ref()?.left.is_some() {
        return detach_min(&mut slot.as_mut()?.left);
    }
    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

fn prune_leaves<E>(slot: &mut Link<E>, pruned: &mut Vec<E>) {
    let Some(node) = slot.as_deref_mut() else {
        return;
    };
    if !node.is_leaf() {
        prune_leaves(&mut node.left, pruned);
        prune_leaves(&mut node.right, pruned);
        return;
    }
    if let Some(leaf) = slot.take() {
        pruned.push(leaf.into_data());
    }
}

/// Pushes the elements `level` levels below (and including) `node`, where
/// level 1 is `node` itself.
fn collect_level<'a, E>(node: Option<&'a Node<E>>, level: isize, out: &mut Vec<&'a E>) {
    let Some(node) = node else {
        return;
    };
    if level == 1 {
        out.push(&node.data);
    } else {
        collect_level(node.left.as_deref(), level - 1, out);
        collect_level(node.right.as_deref(), level - 1, out);
    }
}

struct Node<E> {
    data: E,
    left: Link<E>,
    right: Link<E>,
    _tally: Tally,
}

impl<E> fmt::Debug for Node<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data)
            .field("left", &self.left.as_deref())
            .field("right", &self.right.as_deref())
            .finish()
    }
}

impl<E> Node<E> {
    fn new_boxed(data: E) -> Box<Self> {
        Box::new(Self {
            data,
            left: None,
            right: None,
            _tally: Tally::new(),
        })
    }

    fn into_data(self: Box<Self>) -> E {
        let Self { data, .. } = *self;
        data
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn is_full(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    fn contains(&self, val: &E) -> bool
    where
        E: Ord,
    {
        match val.cmp(&self.data) {
            Ordering::Less => self.left.as_deref().map_or(false, |n| n.contains(val)),
            Ordering::Equal => true,
            Ordering::Greater => self.right.as_deref().map_or(false, |n| n.contains(val)),
        }
    }

    /// Counts this node's children, and their children, and so on. A full
    /// node contributes two, a node with one child contributes one and a leaf
    /// contributes nothing.
    fn descendants(&self) -> usize {
        match (self.left.as_deref(), self.right.as_deref()) {
            (Some(left), Some(right)) => 2 + left.descendants() + right.descendants(),
            (Some(child), None) | (None, Some(child)) => 1 + child.descendants(),
            (None, None) => 0,
        }
    }

    fn leaves(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.left.as_deref().map_or(0, Self::leaves) + self.right.as_deref().map_or(0, Self::leaves)
    }

    fn full_nodes(&self) -> usize {
        let below = self.left.as_deref().map_or(0, Self::full_nodes)
            + self.right.as_deref().map_or(0, Self::full_nodes);
        if self.is_full() {
            below + 1
        } else {
            below
        }
    }

    fn collect_in_order<'a>(&'a self, out: &mut Vec<&'a E>) {
        if let Some(left) = self.left.as_deref() {
            left.collect_in_order(out);
        }
        out.push(&self.data);
        if let Some(right) = self.right.as_deref() {
            right.collect_in_order(out);
        }
    }

    fn height(node: Option<&Self>) -> isize {
        node.map_or(-1, |n| {
            1 + Self::height(n.left.as_deref()).max(Self::height(n.right.as_deref()))
        })
    }
}
