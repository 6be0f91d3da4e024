use std::cmp::Ordering;
use std::fmt;
use std::io;

use tracing::{debug, trace};

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::TreeError;

const INDENT: usize = 4;

type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: usize,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
            height: 1,
        }
    }
}

/// What an insertion did to the subtree it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insertion {
    /// An equal element was already stored; nothing changed.
    Duplicate,
    /// The subtree was empty and is now a single new node.
    Created,
    /// The element passed the subtree root on the given side.
    Descended(Ordering),
}

/// Self-balancing binary search tree ordered by a [`Comparator`].
///
/// Elements that compare equal to one already stored are silently dropped.
/// [`size`](Self::size) reports the largest node height the tree has ever
/// reached, not the number of elements; use [`len`](Self::len) for that.
pub struct AvlTree<T, C = NaturalOrder> {
    root: Link<T>,
    comparator: C,
    len: usize,
    max_height: usize,
}

impl<T: Ord> AvlTree<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C: Comparator<T>> AvlTree<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        AvlTree {
            root: None,
            comparator,
            len: 0,
            max_height: 0,
        }
    }

    /// Inserts `value` unless an equal element is already present.
    ///
    /// Returns whether the tree changed.
    pub fn add(&mut self, value: T) -> bool {
        let (root, step) = Self::insert_node(
            self.root.take(),
            value,
            &self.comparator,
            &mut self.max_height,
        );
        self.root = Some(root);

        let inserted = step != Insertion::Duplicate;
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn contains(&self, value: &T) -> bool {
        let mut current = &self.root;
        while let Some(n) = current {
            match self.comparator.compare(value, &n.value) {
                Ordering::Less => current = &n.left,
                Ordering::Greater => current = &n.right,
                Ordering::Equal => return true,
            }
        }
        false
    }

    /// Checks ordering, balance and cached heights of every node.
    pub fn validate(&self) -> Result<(), TreeError> {
        Self::check_node(&self.root, &self.comparator, None, None, 0).map(|_| ())
    }

    fn insert_node(
        node: Link<T>,
        value: T,
        comparator: &C,
        max_height: &mut usize,
    ) -> (Box<Node<T>>, Insertion) {
        let mut node = match node {
            None => {
                Self::observe_height(max_height, 1);
                return (Box::new(Node::new(value)), Insertion::Created);
            }
            Some(n) => n,
        };

        let side = comparator.compare(&value, &node.value);
        let below = match side {
            Ordering::Less => {
                let (left, step) =
                    Self::insert_node(node.left.take(), value, comparator, max_height);
                node.left = Some(left);
                step
            }
            Ordering::Greater => {
                let (right, step) =
                    Self::insert_node(node.right.take(), value, comparator, max_height);
                node.right = Some(right);
                step
            }
            Ordering::Equal => {
                debug!(height = node.height, "rejected duplicate element");
                return (node, Insertion::Duplicate);
            }
        };

        if below == Insertion::Duplicate {
            return (node, Insertion::Duplicate);
        }

        Self::update_height(&mut node);
        Self::observe_height(max_height, node.height);
        (Self::rebalance(node, below), Insertion::Descended(side))
    }

    fn check_node<'a>(
        node: &'a Link<T>,
        comparator: &C,
        lower: Option<&'a T>,
        upper: Option<&'a T>,
        depth: usize,
    ) -> Result<usize, TreeError> {
        let Some(n) = node else {
            return Ok(0);
        };

        let above_lower =
            lower.map_or(true, |lo| comparator.compare(&n.value, lo) == Ordering::Greater);
        let below_upper =
            upper.map_or(true, |hi| comparator.compare(&n.value, hi) == Ordering::Less);
        if !(above_lower && below_upper) {
            return Err(TreeError::OutOfOrder { depth });
        }

        let left = Self::check_node(&n.left, comparator, lower, Some(&n.value), depth + 1)?;
        let right = Self::check_node(&n.right, comparator, Some(&n.value), upper, depth + 1)?;

        let expected = 1 + left.max(right);
        if n.height != expected {
            return Err(TreeError::StaleHeight {
                depth,
                stored: n.height,
                expected,
            });
        }

        let balance = left as i32 - right as i32;
        if balance.abs() > 1 {
            return Err(TreeError::Unbalanced { depth, balance });
        }

        Ok(expected)
    }
}

impl<T, C> AvlTree<T, C> {
    /// Largest height any node has reached, including heights seen just
    /// before a rotation shortened the subtree. Never decreases.
    pub fn size(&self) -> usize {
        self.max_height
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current height of the root, 0 for an empty tree.
    pub fn height(&self) -> usize {
        Self::node_height(&self.root)
    }

    pub fn in_order(&self) -> Vec<&T> {
        let mut result = Vec::with_capacity(self.len);
        Self::in_order_traverse(&self.root, &mut result);
        result
    }

    fn node_height(node: &Link<T>) -> usize {
        node.as_ref().map_or(0, |n| n.height)
    }

    fn update_height(node: &mut Node<T>) {
        node.height = 1 + Self::node_height(&node.left).max(Self::node_height(&node.right));
    }

    fn balance_factor(node: &Node<T>) -> i32 {
        Self::node_height(&node.left) as i32 - Self::node_height(&node.right) as i32
    }

    fn observe_height(max_height: &mut usize, height: usize) {
        if height > *max_height {
            trace!(from = *max_height, to = height, "tree height grew");
            *max_height = height;
        }
    }

    fn rotate_right(mut y: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut x) = y.left.take() else {
            return y;
        };
        y.left = x.right.take();
        Self::update_height(&mut y);
        x.right = Some(y);
        Self::update_height(&mut x);
        trace!(height = x.height, "rotated right");
        x
    }

    fn rotate_left(mut x: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut y) = x.right.take() else {
            return x;
        };
        x.right = y.left.take();
        Self::update_height(&mut x);
        y.left = Some(x);
        Self::update_height(&mut y);
        trace!(height = y.height, "rotated left");
        y
    }

    // `below` is how the insertion passed the child on the heavy side.
    fn rebalance(mut node: Box<Node<T>>, below: Insertion) -> Box<Node<T>> {
        let balance = Self::balance_factor(&node);

        if balance > 1 {
            if below == Insertion::Descended(Ordering::Greater) {
                node.left = node.left.take().map(Self::rotate_left);
            }
            return Self::rotate_right(node);
        }

        if balance < -1 {
            if below == Insertion::Descended(Ordering::Less) {
                node.right = node.right.take().map(Self::rotate_right);
            }
            return Self::rotate_left(node);
        }

        node
    }

    fn in_order_traverse<'a>(node: &'a Link<T>, result: &mut Vec<&'a T>) {
        if let Some(n) = node {
            Self::in_order_traverse(&n.left, result);
            result.push(&n.value);
            Self::in_order_traverse(&n.right, result);
        }
    }
}

impl<T: fmt::Display, C> AvlTree<T, C> {
    /// Writes the tree sideways to stdout: largest element first, each line
    /// indented four spaces per level of depth.
    pub fn print(&self) {
        print!("{self}");
    }

    pub fn write_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{self}")
    }

    fn write_reversed<W: fmt::Write + ?Sized>(
        node: &Link<T>,
        depth: usize,
        out: &mut W,
    ) -> fmt::Result {
        if let Some(n) = node {
            Self::write_reversed(&n.right, depth + 1, out)?;
            writeln!(out, "{:indent$}{}", "", n.value, indent = depth * INDENT)?;
            Self::write_reversed(&n.left, depth + 1, out)?;
        }
        Ok(())
    }
}

impl<T: fmt::Display, C> fmt::Display for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_reversed(&self.root, 0, f)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("root", &self.root)
            .field("len", &self.len)
            .field("max_height", &self.max_height)
            .finish_non_exhaustive()
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
