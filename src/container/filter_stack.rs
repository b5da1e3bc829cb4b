//! Search filters under construction.
//!
//! Each open filter element is a frame that remembers where its encoding
//! ends. The top frame is the terminal filter, the one field actions write
//! to. Once the decoder has consumed a frame's last byte the frame is
//! unstacked: validated, turned into a [`Filter`] and attached to its parent.

use crate::decoder::DecodeError;
use crate::model::Filter;

// -----------------------------------------------------------------------------
// ----- FilterNode ------------------------------------------------------------

/// A filter whose children may still be arriving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterNode {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Option<Filter>),
    Leaf(Filter),
}

impl FilterNode {
    fn is_connector(&self) -> bool {
        !matches!(self, FilterNode::Leaf(_))
    }

    fn attach(&mut self, child: Filter) -> Result<(), DecodeError> {
        match self {
            FilterNode::And(children) | FilterNode::Or(children) => children.push(child),
            FilterNode::Not(slot @ None) => *slot = Some(child),
            FilterNode::Not(Some(_)) => {
                return Err(DecodeError::InvalidFilter("not filter with more than one child"));
            }
            FilterNode::Leaf(_) => {
                return Err(DecodeError::InvalidFilter("filter nested in a leaf filter"));
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Filter, DecodeError> {
        match self {
            FilterNode::And(children) if children.is_empty() => {
                Err(DecodeError::EmptyField("and filter"))
            }
            FilterNode::Or(children) if children.is_empty() => {
                Err(DecodeError::EmptyField("or filter"))
            }
            FilterNode::And(children) => Ok(Filter::And(children)),
            FilterNode::Or(children) => Ok(Filter::Or(children)),
            FilterNode::Not(Some(child)) => Ok(Filter::Not(Box::new(child))),
            FilterNode::Not(None) => Err(DecodeError::InvalidFilter("not filter without a child")),
            FilterNode::Leaf(Filter::Substrings(sub)) if !sub.has_components() => {
                Err(DecodeError::EmptyField("substrings"))
            }
            FilterNode::Leaf(Filter::ExtensibleMatch(ext))
                if ext.matching_rule.is_none() && ext.attribute_type.is_none() =>
            {
                Err(DecodeError::InvalidFilter(
                    "extensible match without matching rule or type",
                ))
            }
            FilterNode::Leaf(filter) => Ok(filter),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- FilterStack -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    node: FilterNode,
    end: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterStack {
    frames: Vec<Frame>,
}

impl FilterStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Open a filter ending at message offset `end`.
    ///
    /// With no open frame the filter is the root, which is only allowed
    /// while the request has none yet.
    pub fn push(
        &mut self,
        node: FilterNode,
        end: usize,
        has_root: bool,
    ) -> Result<(), DecodeError> {
        match self.frames.last() {
            None if has_root => return Err(DecodeError::InvalidFilter("second root filter")),
            None => {}
            Some(parent) if !parent.node.is_connector() => {
                return Err(DecodeError::InvalidFilter("filter nested in a leaf filter"));
            }
            Some(Frame {
                node: FilterNode::Not(Some(_)),
                ..
            }) => {
                return Err(DecodeError::InvalidFilter("not filter with more than one child"));
            }
            Some(_) => {}
        }

        self.frames.push(Frame { node, end });
        Ok(())
    }

    /// The innermost open filter.
    pub fn terminal(&mut self) -> Option<&mut FilterNode> {
        self.frames.last_mut().map(|frame| &mut frame.node)
    }

    /// Unstack every frame that ends at or before `consumed`.
    ///
    /// Returns the root filter once the outermost frame closes.
    pub fn pop_completed(&mut self, consumed: usize) -> Result<Option<Filter>, DecodeError> {
        while let Some(frame) = self.frames.last() {
            if frame.end > consumed {
                break;
            }

            let Some(frame) = self.frames.pop() else {
                break;
            };
            let filter = frame.node.finish()?;

            match self.frames.last_mut() {
                Some(parent) => parent.node.attach(filter)?,
                None => return Ok(Some(filter)),
            }
        }

        Ok(None)
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SubstringFilter;

    fn present(attr: &str) -> FilterNode {
        FilterNode::Leaf(Filter::Present(attr.to_string()))
    }

    #[test]
    fn and_of_two_present_unstacks_to_root() {
        let mut stack = FilterStack::new();
        stack.push(FilterNode::And(Vec::new()), 20, false).unwrap();

        stack.push(present("cn"), 10, false).unwrap();
        assert_eq!(stack.pop_completed(10).unwrap(), None);
        assert_eq!(stack.len(), 1);

        stack.push(present("sn"), 20, false).unwrap();
        let root = stack.pop_completed(20).unwrap().unwrap();

        assert!(stack.is_empty());
        assert_eq!(
            root,
            Filter::And(vec![
                Filter::Present("cn".into()),
                Filter::Present("sn".into())
            ])
        );
    }

    #[test]
    fn second_root_rejected() {
        let mut stack = FilterStack::new();
        assert_eq!(
            stack.push(present("cn"), 4, true),
            Err(DecodeError::InvalidFilter("second root filter"))
        );
    }

    #[test]
    fn not_takes_exactly_one_child() {
        let mut stack = FilterStack::new();
        stack.push(FilterNode::Not(None), 30, false).unwrap();
        stack.push(present("cn"), 10, false).unwrap();
        stack.pop_completed(10).unwrap();
        assert!(stack.push(present("sn"), 20, false).is_err());

        let mut stack = FilterStack::new();
        stack.push(FilterNode::Not(None), 4, false).unwrap();
        assert_eq!(
            stack.pop_completed(4),
            Err(DecodeError::InvalidFilter("not filter without a child"))
        );
    }

    #[test]
    fn leaf_cannot_hold_children() {
        let mut stack = FilterStack::new();
        stack.push(present("cn"), 10, false).unwrap();
        assert!(stack.push(present("sn"), 8, false).is_err());
    }

    #[test]
    fn substrings_need_a_component() {
        let mut stack = FilterStack::new();
        let sub = SubstringFilter {
            attribute_type: "cn".into(),
            ..Default::default()
        };
        stack.push(FilterNode::Leaf(Filter::Substrings(sub)), 6, false).unwrap();
        assert_eq!(stack.pop_completed(6), Err(DecodeError::EmptyField("substrings")));
    }

    #[test]
    fn terminal_is_innermost() {
        let mut stack = FilterStack::new();
        assert!(stack.terminal().is_none());
        stack.push(FilterNode::Or(Vec::new()), 40, false).unwrap();
        stack.push(present("cn"), 12, false).unwrap();
        assert_eq!(stack.terminal(), Some(&mut present("cn")));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
