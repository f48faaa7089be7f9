//! Target and operation registry.
//!
//! Closures cannot be written to bytes, so commands that must survive a
//! round trip are built from a [`TargetId`] and one or two
//! [`OperationRef`]s, both resolved against a [`Registry`]. Rebuilding the
//! same commands elsewhere only requires a registry that knows the same ids
//! and tags.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CommandError;
use crate::portable::{CommandRecord, OperationRef, PortableCommand, ResolvedOperation};

/// Identifier of a target handle registered in a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(Uuid);

impl TargetId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type Resolver = Rc<dyn Fn(&[u8]) -> Result<ResolvedOperation, CommandError>>;

struct OperationEntry {
    target_type: TypeId,
    target_type_name: &'static str,
    resolve: Resolver,
}

/// Maps target ids to handles and operation tags to functions.
#[derive(Default)]
pub struct Registry {
    targets: HashMap<TargetId, Rc<dyn Any>>,
    operations: HashMap<String, OperationEntry>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target handle under a fresh identifier.
    pub fn insert_target<T: Any>(&mut self, handle: Rc<T>) -> TargetId {
        let id = TargetId::random();
        self.targets.insert(id, handle);
        id
    }

    /// Registers a target handle under a known identifier, returning the
    /// handle previously registered under it.
    pub fn register_target<T: Any>(&mut self, id: TargetId, handle: Rc<T>) -> Option<Rc<dyn Any>> {
        self.targets.insert(id, handle)
    }

    /// Removes a target handle. Commands already built keep their own
    /// handle but can no longer be serialized against this registry.
    pub fn remove_target(&mut self, id: TargetId) -> Option<Rc<dyn Any>> {
        self.targets.remove(&id)
    }

    /// Returns the handle registered under `id` if it has type `T`.
    #[must_use]
    pub fn target<T: Any>(&self, id: TargetId) -> Option<Rc<T>> {
        let handle = Rc::clone(self.targets.get(&id)?);
        handle.downcast::<T>().ok()
    }

    /// Returns `true` if a target is registered under `id`.
    #[must_use]
    pub fn contains_target(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id)
    }

    /// Returns `true` if an operation is registered under `tag`.
    #[must_use]
    pub fn contains_operation(&self, tag: &str) -> bool {
        self.operations.contains_key(tag)
    }

    /// Registers `operation` under `tag`.
    ///
    /// The operation receives the target handle's contents and the
    /// arguments captured when the command was built. `A` is `()` for
    /// operations without arguments.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::DuplicateOperation` if `tag` is taken.
    pub fn register_operation<T, A>(
        &mut self,
        tag: impl Into<String>,
        operation: fn(&T, &A) -> Result<(), CommandError>,
    ) -> Result<(), CommandError>
    where
        T: Any,
        A: DeserializeOwned + 'static,
    {
        let tag = tag.into();
        if self.operations.contains_key(&tag) {
            return Err(CommandError::DuplicateOperation(tag));
        }

        let resolver_tag = tag.clone();
        let resolve: Resolver = Rc::new(
            move |encoded: &[u8]| -> Result<ResolvedOperation, CommandError> {
                let args: A = bincode::deserialize(encoded).map_err(|e| {
                    CommandError::Deserialization(format!("arguments for {resolver_tag}: {e}"))
                })?;
                let call_tag = resolver_tag.clone();
                Ok(ResolvedOperation::new(
                    resolver_tag.clone(),
                    Rc::new(move |target: &dyn Any| -> Result<(), CommandError> {
                        let target = target.downcast_ref::<T>().ok_or_else(|| {
                            CommandError::TargetMismatch {
                                tag: call_tag.clone(),
                                expected: std::any::type_name::<T>(),
                            }
                        })?;
                        operation(target, &args)
                    }),
                ))
            },
        );

        self.operations.insert(
            tag,
            OperationEntry {
                target_type: TypeId::of::<T>(),
                target_type_name: std::any::type_name::<T>(),
                resolve,
            },
        );
        Ok(())
    }

    /// Builds a portable command that applies `forward` to `target`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::UnknownTarget`, `CommandError::UnknownOperation`
    /// or `CommandError::TargetMismatch` if the parts cannot be resolved, and
    /// `CommandError::Deserialization` if the arguments do not match the
    /// registered operation.
    pub fn command(
        &self,
        target: TargetId,
        forward: OperationRef,
    ) -> Result<PortableCommand, CommandError> {
        self.resolve(CommandRecord {
            target,
            forward,
            inverse: None,
        })
    }

    /// Builds a portable command that applies `forward` on execute and
    /// `inverse` on undo.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::command`], for either operation.
    pub fn reversible_command(
        &self,
        target: TargetId,
        forward: OperationRef,
        inverse: OperationRef,
    ) -> Result<PortableCommand, CommandError> {
        self.resolve(CommandRecord {
            target,
            forward,
            inverse: Some(inverse),
        })
    }

    /// Checks that `record` would resolve against this registry, so that
    /// bytes written for it can be rebuilt here.
    pub(crate) fn check_portable(&self, record: &CommandRecord) -> Result<(), CommandError> {
        self.resolve(record.clone())
            .map(|_| ())
            .map_err(|e| CommandError::Serialization(e.to_string()))
    }

    /// Resolves a record into a command bound to this registry's handles.
    pub(crate) fn resolve(&self, record: CommandRecord) -> Result<PortableCommand, CommandError> {
        let target = self
            .targets
            .get(&record.target)
            .cloned()
            .ok_or(CommandError::UnknownTarget(record.target))?;

        let forward = self.resolve_operation(&target, &record.forward)?;
        let inverse = record
            .inverse
            .as_ref()
            .map(|inverse| self.resolve_operation(&target, inverse))
            .transpose()?;

        Ok(PortableCommand::new(record, target, forward, inverse))
    }

    fn resolve_operation(
        &self,
        target: &Rc<dyn Any>,
        operation: &OperationRef,
    ) -> Result<ResolvedOperation, CommandError> {
        let entry = self
            .operations
            .get(operation.tag())
            .ok_or_else(|| {
                CommandError::UnknownOperation(operation.tag().to_owned())
            })?;

        if Any::type_id(&**target) != entry.target_type {
            return Err(CommandError::TargetMismatch {
                tag: operation.tag().to_owned(),
                expected: entry.target_type_name,
            });
        }

        (entry.resolve)(operation.args())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("Registry")
            .field("targets", &self.targets.len())
            .field("operations", &tags)
            .finish()
    }
}
