//! Fail-fast navigation tree validation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use docmap_url::{is_external, page_key};

use crate::error::{NavError, NodeLocation};
use crate::node::NavNode;

/// Validate a navigation tree.
///
/// Equivalent to [`validate_scope`] with the scope name `navigation`.
///
/// # Errors
///
/// Returns the first violation found in declared pre-order.
pub fn validate(tree: &[NavNode]) -> Result<(), NavError> {
    validate_scope(tree, "navigation")
}

/// Validate a navigation tree, naming it `scope` in error locations.
///
/// Nodes are visited in declared depth-first pre-order. Per node the checks
/// run as: empty label, missing link and children, empty children list,
/// repeated link. Links are unique per tree, group landing links included.
/// Internal links are compared by page, so `/faq.md`, `/faq` and
/// `/faq.html` count as the same link.
///
/// # Errors
///
/// Returns the first violation encountered; later nodes are not inspected.
pub fn validate_scope(tree: &[NavNode], scope: &str) -> Result<(), NavError> {
    let mut walker = Walker {
        scope,
        seen: HashMap::new(),
        indices: Vec::new(),
        trail: Vec::new(),
    };
    walker.visit(tree)
}

struct Walker<'a> {
    scope: &'a str,
    seen: HashMap<&'a str, NodeLocation>,
    indices: Vec<usize>,
    trail: Vec<&'a str>,
}

impl<'a> Walker<'a> {
    fn visit(&mut self, nodes: &'a [NavNode]) -> Result<(), NavError> {
        for (index, node) in nodes.iter().enumerate() {
            self.indices.push(index);
            self.trail.push(&node.label);

            self.check(node)?;
            if let Some(children) = &node.children {
                self.visit(children)?;
            }

            self.indices.pop();
            self.trail.pop();
        }
        Ok(())
    }

    fn check(&mut self, node: &'a NavNode) -> Result<(), NavError> {
        if node.label.trim().is_empty() {
            return Err(NavError::EmptyLabel {
                location: self.location(),
            });
        }

        match (&node.link, &node.children) {
            (None, None) => {
                return Err(NavError::MalformedNode {
                    location: self.location(),
                });
            }
            (_, Some(children)) if children.is_empty() => {
                return Err(NavError::EmptyGroup {
                    location: self.location(),
                });
            }
            _ => {}
        }

        if let Some(link) = &node.link {
            let location = self.location();
            let key = if is_external(link) {
                link.as_str()
            } else {
                page_key(link)
            };
            match self.seen.entry(key) {
                Entry::Occupied(first) => {
                    return Err(NavError::DuplicateLink {
                        link: link.clone(),
                        first: first.get().clone(),
                        location,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(location);
                }
            }
        }

        Ok(())
    }

    fn location(&self) -> NodeLocation {
        NodeLocation {
            scope: self.scope.to_owned(),
            indices: self.indices.clone(),
            trail: self.trail.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}
