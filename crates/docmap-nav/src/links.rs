//! Lazy pre-order traversal over navigation links.

use std::iter::FusedIterator;
use std::slice;

use crate::node::NavNode;

/// Iterate over every leaf link in depth-first pre-order.
///
/// The iterator is lazy and borrows the tree. It is `Clone`, so a traversal
/// can be restarted from any point, and calling `flatten` again always
/// starts from the first node.
#[must_use]
pub fn flatten(tree: &[NavNode]) -> Links<'_> {
    Links::new(tree, false)
}

/// Iterate over every link in pre-order, group landing pages included.
///
/// A group's landing link is yielded before its children's links.
#[must_use]
pub fn all_links(tree: &[NavNode]) -> Links<'_> {
    Links::new(tree, true)
}

/// Iterator returned by [`flatten`] and [`all_links`].
#[derive(Clone, Debug)]
pub struct Links<'a> {
    stack: Vec<slice::Iter<'a, NavNode>>,
    landing: bool,
}

impl<'a> Links<'a> {
    fn new(tree: &'a [NavNode], landing: bool) -> Self {
        Self {
            stack: vec![tree.iter()],
            landing,
        }
    }
}

impl<'a> Iterator for Links<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            let Some(node) = level.next() else {
                self.stack.pop();
                continue;
            };

            match &node.children {
                Some(children) => {
                    self.stack.push(children.iter());
                    if self.landing
                        && let Some(link) = &node.link
                    {
                        return Some(link.as_str());
                    }
                }
                None => {
                    if let Some(link) = &node.link {
                        return Some(link.as_str());
                    }
                }
            }
        }
    }
}

impl FusedIterator for Links<'_> {}
