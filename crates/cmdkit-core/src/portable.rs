//! Commands that can be written to bytes and rebuilt.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{Command, Reversible, ReversibleCommand, SimpleCommand};
use crate::error::CommandError;
use crate::operation::Operation;
use crate::registry::TargetId;

/// Portable reference to a registered operation and its bound arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRef {
    tag: String,
    args: Vec<u8>,
}

impl OperationRef {
    /// Refers to the operation registered under `tag`, bound to `args`.
    ///
    /// Arguments are encoded here, so values that have no portable form
    /// are rejected before a command is ever built from them.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Serialization` if `args` cannot be encoded.
    pub fn new<A: Serialize>(tag: impl Into<String>, args: &A) -> Result<Self, CommandError> {
        let tag = tag.into();
        let args = bincode::serialize(args).map_err(|e| {
            CommandError::Serialization(format!("arguments for {tag}: {e}"))
        })?;
        Ok(Self { tag, args })
    }

    /// The operation tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The encoded arguments.
    #[must_use]
    pub fn args(&self) -> &[u8] {
        &self.args
    }
}

/// Serialized form of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The target the operations apply to.
    pub target: TargetId,
    /// Operation applied on execute.
    pub forward: OperationRef,
    /// Operation applied on undo, for reversible commands.
    pub inverse: Option<OperationRef>,
}

type ErasedCall = Rc<dyn Fn(&dyn Any) -> Result<(), CommandError>>;

/// A registered operation with its arguments already decoded.
#[derive(Clone)]
pub struct ResolvedOperation {
    tag: String,
    call: ErasedCall,
}

impl ResolvedOperation {
    pub(crate) fn new(tag: String, call: ErasedCall) -> Self {
        Self { tag, call }
    }
}

impl Operation<Rc<dyn Any>> for ResolvedOperation {
    fn apply(&self, target: &Rc<dyn Any>) -> Result<(), CommandError> {
        (self.call)(&**target)
    }
}

impl fmt::Debug for ResolvedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOperation")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

type Handle = Rc<dyn Any>;

#[derive(Debug)]
enum PortableBody {
    Simple(SimpleCommand<Handle, ResolvedOperation>),
    Reversible(ReversibleCommand<Handle, ResolvedOperation, ResolvedOperation>),
}

/// A command built from a [`CommandRecord`] against a registry.
///
/// Built with [`Registry::command`](crate::registry::Registry::command) or
/// [`Registry::reversible_command`](crate::registry::Registry::reversible_command),
/// or rebuilt by [`deserialize`](crate::codec::deserialize).
#[derive(Debug)]
pub struct PortableCommand {
    record: CommandRecord,
    body: PortableBody,
}

impl PortableCommand {
    pub(crate) fn new(
        record: CommandRecord,
        target: Handle,
        forward: ResolvedOperation,
        inverse: Option<ResolvedOperation>,
    ) -> Self {
        let body = match inverse {
            Some(inverse) => {
                PortableBody::Reversible(ReversibleCommand::new(target, forward, inverse))
            }
            None => PortableBody::Simple(SimpleCommand::new(target, forward)),
        };
        Self { record, body }
    }

    /// The portable description of this command.
    #[must_use]
    pub fn record(&self) -> &CommandRecord {
        &self.record
    }

    /// The target this command is bound to.
    #[must_use]
    pub fn target_id(&self) -> TargetId {
        self.record.target
    }
}

impl Command for PortableCommand {
    fn execute(&self) -> Result<(), CommandError> {
        debug!(
            target_id = %self.record.target,
            operation = self.record.forward.tag(),
            "executing portable command"
        );
        match &self.body {
            PortableBody::Simple(command) => command.execute(),
            PortableBody::Reversible(command) => command.execute(),
        }
    }

    fn as_reversible(&self) -> Option<&dyn Reversible> {
        match &self.body {
            PortableBody::Simple(_) => None,
            PortableBody::Reversible(command) => Some(command),
        }
    }
}
