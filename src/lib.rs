mod avl_tree;
mod comparator;
mod error;

pub use avl_tree::AvlTree;
pub use comparator::{Comparator, NaturalOrder, Signed};
pub use error::TreeError;
