use std::thread::ThreadId;

use thiserror::Error;

use crate::NodeId;

/// A caller broke the contract of an operation before any state changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionViolation {
    #[error("tree owned by thread {owner:?} was accessed from thread {actual:?}")]
    WrongThread { owner: ThreadId, actual: ThreadId },
    #[error("node {id} does not exist")]
    MissingNode { id: NodeId },
    #[error("node {id} cannot hold children")]
    NotAContainer { id: NodeId },
    #[error("negative {axis} hint {value}")]
    NegativeHint { axis: &'static str, value: i32 },
    #[error("index {index} is out of range for the {len} children of node {parent}")]
    IndexOutOfRange {
        parent: NodeId,
        index: usize,
        len: usize,
    },
    #[error("moving node {node} under node {new_parent} would create a cycle")]
    Cycle { node: NodeId, new_parent: NodeId },
    #[error("nodes {node} and {other} do not share a parent")]
    NotSiblings { node: NodeId, other: NodeId },
    #[error("layout of node {id} resumed more often than it was suspended")]
    UnbalancedResume { id: NodeId },
}

/// Every failure the tree can report.
///
/// None of these are retried or recovered from inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),
    #[error("node {node} is not a descendant of container {container}")]
    InvalidParent { node: NodeId, container: NodeId },
    #[error("node {node} is disposed or being disposed")]
    Disposed { node: NodeId },
    #[error("layout strategy {strategy} failed on node {node}: {message}")]
    Strategy {
        node: NodeId,
        strategy: String,
        message: String,
    },
    #[error("releasing node {node} failed: {message}")]
    ReleaseFailed { node: NodeId, message: String },
}

impl TreeError {
    /// Builds the error a layout strategy returns when it cannot proceed.
    pub fn strategy(node: NodeId, strategy: impl Into<String>, message: impl Into<String>) -> Self {
        TreeError::Strategy {
            node,
            strategy: strategy.into(),
            message: message.into(),
        }
    }

    pub fn missing(id: NodeId) -> Self {
        TreeError::Precondition(PreconditionViolation::MissingNode { id })
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, TreeError::Disposed { .. })
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, TreeError::Precondition(_))
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
