//! Binary encoding of command sequences.
//!
//! The encoding is a bincode envelope holding a format version followed by
//! one [`CommandRecord`] per command. Decoding resolves every record against
//! a [`Registry`], so the rebuilt commands act on whatever handles that
//! registry holds for the recorded target ids.

use bincode::Options;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::CommandError;
use crate::portable::{CommandRecord, PortableCommand};
use crate::registry::Registry;

/// Version written at the start of every encoded sequence.
pub const FORMAT_VERSION: u16 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u16,
    commands: Vec<&'a CommandRecord>,
}

#[derive(Deserialize)]
struct Envelope {
    version: u16,
    commands: Vec<CommandRecord>,
}

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Writes `commands` to bytes, in order.
///
/// # Errors
///
/// Returns `CommandError::Serialization` if a command would not resolve
/// against `registry`: its target or operations are unknown, the target has
/// another type than the operations expect, or the arguments do not decode.
#[instrument(skip_all, fields(count = commands.len()))]
pub fn serialize(
    registry: &Registry,
    commands: &[PortableCommand],
) -> Result<Vec<u8>, CommandError> {
    let records = commands
        .iter()
        .enumerate()
        .map(|(index, command)| -> Result<&CommandRecord, CommandError> {
            let record = command.record();
            registry.check_portable(record).map_err(|e| match e {
                CommandError::Serialization(message) => {
                    CommandError::Serialization(format!("command {index}: {message}"))
                }
                other => other,
            })?;
            Ok(record)
        })
        .collect::<Result<Vec<_>, _>>()?;

    wire_options()
        .serialize(&EnvelopeRef {
            version: FORMAT_VERSION,
            commands: records,
        })
        .map_err(|e| CommandError::Serialization(e.to_string()))
}

/// Rebuilds a command sequence written by [`serialize`].
///
/// # Errors
///
/// Returns `CommandError::Deserialization` if `bytes` are malformed or
/// truncated, were written with another format version, or name a target or
/// operation that `registry` cannot resolve.
#[instrument(skip_all, fields(len = bytes.len()))]
pub fn deserialize(
    registry: &Registry,
    bytes: &[u8],
) -> Result<Vec<PortableCommand>, CommandError> {
    let version: u16 = wire_options()
        .allow_trailing_bytes()
        .deserialize(bytes)
        .map_err(|e| {
            CommandError::Deserialization(format!("missing format version: {e}"))
        })?;
    if version != FORMAT_VERSION {
        return Err(CommandError::Deserialization(format!(
            "unsupported format version {version}, expected {FORMAT_VERSION}"
        )));
    }

    let envelope: Envelope = wire_options()
        .deserialize(bytes)
        .map_err(|e| CommandError::Deserialization(e.to_string()))?;
    debug_assert_eq!(envelope.version, FORMAT_VERSION);

    envelope
        .commands
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            registry.resolve(record).map_err(|e| {
                CommandError::Deserialization(format!("command {index}: {e}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::command::Command;
    use crate::portable::OperationRef;
    use crate::registry::TargetId;

    fn add(counter: &Cell<i32>, amount: &i32) -> Result<(), CommandError> {
        counter.set(counter.get() + amount);
        Ok(())
    }

    fn flip(counter: &Cell<i32>, negate: &bool) -> Result<(), CommandError> {
        if *negate {
            counter.set(-counter.get());
        }
        Ok(())
    }

    fn setup() -> (Registry, Rc<Cell<i32>>, TargetId) {
        let mut registry = Registry::new();
        registry.register_operation("counter.add", add).unwrap();
        let counter = Rc::new(Cell::new(0));
        let id = registry.insert_target(Rc::clone(&counter));
        (registry, counter, id)
    }

    fn add_command(registry: &Registry, id: TargetId, amount: i32) -> PortableCommand {
        registry
            .reversible_command(
                id,
                OperationRef::new("counter.add", &amount).unwrap(),
                OperationRef::new("counter.add", &-amount).unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_round_trip_preserves_order_and_reversibility() {
        // Arrange
        let (registry, counter, id) = setup();
        let commands = vec![
            registry
                .command(id, OperationRef::new("counter.add", &3).unwrap())
                .unwrap(),
            add_command(&registry, id, 4),
        ];

        // Act
        let bytes = serialize(&registry, &commands).unwrap();
        let restored = deserialize(&registry, &bytes).unwrap();

        // Assert
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].record(), commands[0].record());
        assert_eq!(restored[1].record(), commands[1].record());
        assert!(!restored[0].is_reversible());
        assert!(restored[1].is_reversible());
        for command in &restored {
            command.execute().unwrap();
        }
        assert_eq!(counter.get(), 7);
    }

    #[test]
    fn test_empty_sequence_round_trips() {
        let (registry, _, _) = setup();

        let bytes = serialize(&registry, &[]).unwrap();
        let restored = deserialize(&registry, &bytes).unwrap();

        assert!(restored.is_empty());
    }

    #[test]
    fn test_serialize_rejects_removed_target() {
        // Arrange
        let (mut registry, _, id) = setup();
        let commands = vec![add_command(&registry, id, 1)];
        registry.remove_target(id);

        // Act
        let result = serialize(&registry, &commands);

        // Assert
        match result {
            Err(CommandError::Serialization(message)) => {
                assert!(message.starts_with("command 0: unknown target"));
            }
            other => panic!("expected Serialization, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_rejects_operation_unknown_to_registry() {
        // Arrange
        let (registry, _, id) = setup();
        let commands = vec![add_command(&registry, id, 1)];
        let mut stranger = Registry::new();
        stranger.register_target(id, Rc::new(Cell::new(0_i32)));

        // Act
        let result = serialize(&stranger, &commands);

        // Assert
        match result {
            Err(CommandError::Serialization(message)) => {
                assert!(message.contains("counter.add"));
            }
            other => panic!("expected Serialization, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_rejects_target_of_other_type() {
        // Arrange
        let (registry, _, id) = setup();
        let commands = vec![add_command(&registry, id, 1)];
        let mut stranger = Registry::new();
        stranger.register_operation("counter.add", add).unwrap();
        stranger.register_target(id, Rc::new(Cell::new(false)));

        // Act
        let result = serialize(&stranger, &commands);

        // Assert
        match result {
            Err(CommandError::Serialization(message)) => {
                assert!(message.starts_with("command 0:"));
                assert!(message.contains("Cell<i32>"));
            }
            other => panic!("expected Serialization, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_rejects_arguments_registry_cannot_decode() {
        // Arrange
        let (registry, _, id) = setup();
        let mut stranger = Registry::new();
        stranger.register_operation("counter.add", flip).unwrap();
        stranger.register_target(id, Rc::new(Cell::new(0_i32)));
        let commands = vec![
            registry
                .command(id, OperationRef::new("counter.add", &7_i32).unwrap())
                .unwrap(),
        ];

        // Act
        let result = serialize(&stranger, &commands);

        // Assert
        assert!(matches!(result, Err(CommandError::Serialization(_))));
    }

    #[test]
    fn test_deserialize_rejects_truncated_input() {
        // Arrange
        let (registry, _, id) = setup();
        let bytes = serialize(&registry, &[add_command(&registry, id, 2)]).unwrap();

        // Act
        let result = deserialize(&registry, &bytes[..bytes.len() - 3]);

        // Assert
        assert!(matches!(result, Err(CommandError::Deserialization(_))));
    }

    #[test]
    fn test_deserialize_rejects_empty_input() {
        let (registry, _, _) = setup();

        let result = deserialize(&registry, &[]);

        assert!(matches!(result, Err(CommandError::Deserialization(_))));
    }

    #[test]
    fn test_deserialize_rejects_trailing_bytes() {
        // Arrange
        let (registry, _, id) = setup();
        let mut bytes = serialize(&registry, &[add_command(&registry, id, 2)]).unwrap();
        bytes.push(0xff);

        // Act
        let result = deserialize(&registry, &bytes);

        // Assert
        assert!(matches!(result, Err(CommandError::Deserialization(_))));
    }

    #[test]
    fn test_deserialize_rejects_other_format_version() {
        // Arrange
        let (registry, _, id) = setup();
        let mut bytes = serialize(&registry, &[add_command(&registry, id, 2)]).unwrap();
        bytes[..2].copy_from_slice(&(FORMAT_VERSION + 1).to_le_bytes());

        // Act
        let result = deserialize(&registry, &bytes);

        // Assert
        match result {
            Err(CommandError::Deserialization(message)) => {
                assert!(message.contains("unsupported format version 2"));
            }
            other => panic!("expected Deserialization, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_rejects_unresolvable_target() {
        // Arrange
        let (registry, _, id) = setup();
        let bytes = serialize(&registry, &[add_command(&registry, id, 2)]).unwrap();
        let mut elsewhere = Registry::new();
        elsewhere.register_operation("counter.add", add).unwrap();

        // Act
        let result = deserialize(&elsewhere, &bytes);

        // Assert
        match result {
            Err(CommandError::Deserialization(message)) => {
                assert!(message.contains("unknown target"));
            }
            other => panic!("expected Deserialization, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_binds_to_handles_of_target_registry() {
        // Arrange
        let (registry, original, id) = setup();
        let bytes = serialize(&registry, &[add_command(&registry, id, 5)]).unwrap();
        let mut elsewhere = Registry::new();
        elsewhere.register_operation("counter.add", add).unwrap();
        let replacement = Rc::new(Cell::new(10));
        elsewhere.register_target(id, Rc::clone(&replacement));

        // Act
        let restored = deserialize(&elsewhere, &bytes).unwrap();
        restored[0].execute().unwrap();
        restored[0].as_reversible().unwrap().undo().unwrap();
        restored[0].execute().unwrap();

        // Assert
        assert_eq!(original.get(), 0);
        assert_eq!(replacement.get(), 15);
    }
}
