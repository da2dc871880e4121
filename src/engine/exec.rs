//! engine::exec
//!
//! Executes a parsed [`Query`] against an in-memory [`Store`].
//!
//! # Target Resolution
//!
//! For every opcode except `*CREATE`, `PRINT` and `DROP`:
//!
//! - if the first argument names an existing structure, that structure is
//!   the target and parameters start at the second argument
//! - otherwise the target is `default` and parameters start at the first
//!   argument
//!
//! `*CREATE [name]` always takes the name from the first argument. Array
//! opcodes require the target to exist; every other kind creates an empty
//! target on first use.
//!
//! # Position Modes
//!
//! `FPUSH`/`LPUSH` and `FDEL`/`LDEL` take a numeric mode:
//!
//! | Mode | Push | Delete |
//! |------|------|--------|
//! | 0 | front | front |
//! | 1 | back | back |
//! | 2 | after head | node after head |
//! | 3 | before tail | node before tail |
//!
//! Pushes in modes 2 and 3 fall back to the front on an empty list.
//! Deletes in modes 2 and 3 do nothing with fewer than two nodes.

use super::query::{Opcode, Query};
use super::{ExecError, Outcome, Reply, StructureView};
use crate::core::error::StructureError;
use crate::core::store::Store;
use crate::core::structures::{Array, BinarySearchTree, DoubleList, ForwardList, Queue, Stack};
use crate::core::types::{Kind, StructureName};

/// Execute `query` against `store`.
///
/// The store is left unchanged when an error is returned, except that an
/// auto-created target may remain; callers abort before saving on error.
pub fn execute(store: &mut Store, query: &Query) -> Result<Outcome, ExecError> {
    let opcode = query.opcode;

    if opcode.is_create() {
        return create(store, query);
    }

    match opcode {
        Opcode::Print => {
            let name = Args::new(opcode, &query.args).value(0, "name")?;
            let view = StructureView::of(store.get(name)?);
            return Ok(Outcome {
                reply: Reply::View(view),
                mutated: false,
            });
        }
        Opcode::Drop => {
            let name = Args::new(opcode, &query.args).value(0, "name")?;
            store.remove(name)?;
            tracing::debug!(name, "dropped structure");
            return Ok(Outcome {
                reply: Reply::Done,
                mutated: true,
            });
        }
        _ => {}
    }

    let (name, params) = resolve_target(store, &query.args);
    let args = Args::new(opcode, params);
    let existed = store.contains(name.as_str());
    tracing::debug!(opcode = %opcode, target = %name, existed, "executing");

    let reply = match opcode.kind() {
        Some(Kind::Array) => array(store.typed_mut(name.as_str())?, &args)?,
        Some(Kind::ForwardList) => forward_list(store.get_or_create(&name)?, &args)?,
        Some(Kind::DoubleList) => double_list(store.get_or_create(&name)?, &args)?,
        Some(Kind::Stack) => stack(store.get_or_create(&name)?, &args)?,
        Some(Kind::Queue) => queue(store.get_or_create(&name)?, &args)?,
        Some(Kind::Tree) => tree(store.get_or_create(&name)?, &args)?,
        None => return Err(ExecError::UnknownCommand(opcode.to_string())),
    };

    Ok(Outcome {
        reply,
        mutated: opcode.is_mutating() || !existed,
    })
}

/// Split the arguments into the target name and its parameters.
fn resolve_target<'a>(store: &Store, args: &'a [String]) -> (StructureName, &'a [String]) {
    if let Some(first) = args.first() {
        if let Ok(structure) = store.get(first) {
            return (structure.name.clone(), &args[1..]);
        }
    }
    (StructureName::default_name(), args)
}

fn create(store: &mut Store, query: &Query) -> Result<Outcome, ExecError> {
    let kind = query
        .opcode
        .kind()
        .ok_or_else(|| ExecError::UnknownCommand(query.opcode.to_string()))?;
    let name = match query.args.first() {
        Some(name) => StructureName::new(name.as_str())?,
        None => StructureName::default_name(),
    };

    store.create(name.clone(), kind)?;
    tracing::debug!(name = %name, kind = %kind, "created structure");
    Ok(Outcome {
        reply: Reply::Done,
        mutated: true,
    })
}

// =============================================================================
// Per-kind handlers
// =============================================================================

fn array(array: &mut Array, args: &Args<'_>) -> Result<Reply, ExecError> {
    let reply = match args.opcode {
        Opcode::MPush => {
            array.push(args.value(0, "value")?);
            Reply::Done
        }
        Opcode::MPushAt => {
            let value = args.value(0, "value")?;
            array.insert_at(value, args.index(1, "index")?)?;
            Reply::Done
        }
        Opcode::MGet => Reply::Value(array.get(args.index(0, "index")?)?.to_string()),
        Opcode::MSet => {
            let index = args.index(0, "index")?;
            array.set(index, args.value(1, "value")?)?;
            Reply::Done
        }
        Opcode::MDel => {
            array.delete_at(args.index(0, "index")?)?;
            Reply::Done
        }
        Opcode::MLen => Reply::Count(array.len()),
        other => return Err(ExecError::UnknownCommand(other.to_string())),
    };
    Ok(reply)
}

fn forward_list(list: &mut ForwardList, args: &Args<'_>) -> Result<Reply, ExecError> {
    let reply = match args.opcode {
        Opcode::FPush => {
            let value = args.value(0, "value")?;
            match args.position(1)? {
                Position::Front => list.push_front(value),
                Position::Back => list.push_back(value),
                Position::AfterHead if !list.is_empty() => list.insert_after(value, 0)?,
                Position::BeforeTail if !list.is_empty() => {
                    list.insert_before(value, list.len() - 1)?
                }
                Position::AfterHead | Position::BeforeTail => list.push_front(value),
            }
            Reply::Done
        }
        Opcode::FDel => {
            match args.position(0)? {
                Position::Front => drop(list.pop_front()?),
                Position::Back => drop(list.pop_back()?),
                Position::AfterHead if list.len() >= 2 => drop(list.remove_at(1)?),
                Position::BeforeTail if list.len() >= 2 => drop(list.remove_at(list.len() - 2)?),
                Position::AfterHead | Position::BeforeTail => {}
            }
            Reply::Done
        }
        Opcode::FDelVal => {
            list.remove_by_value(args.value(0, "value")?)?;
            Reply::Done
        }
        Opcode::FSearch => Reply::Found(list.find(args.value(0, "value")?).is_some()),
        Opcode::FGet => Reply::Value(list.get(args.index(0, "index")?)?.to_string()),
        Opcode::FLen => Reply::Count(list.len()),
        other => return Err(ExecError::UnknownCommand(other.to_string())),
    };
    Ok(reply)
}

fn double_list(list: &mut DoubleList, args: &Args<'_>) -> Result<Reply, ExecError> {
    let reply = match args.opcode {
        Opcode::LPush => {
            let value = args.value(0, "value")?;
            match args.position(1)? {
                Position::Front => list.push_front(value),
                Position::Back => list.push_back(value),
                Position::AfterHead if !list.is_empty() => list.insert_after(value, 0)?,
                Position::BeforeTail if !list.is_empty() => {
                    list.insert_before(value, list.len() - 1)?
                }
                Position::AfterHead | Position::BeforeTail => list.push_front(value),
            }
            Reply::Done
        }
        Opcode::LDel => {
            match args.position(0)? {
                Position::Front => drop(list.pop_front()?),
                Position::Back => drop(list.pop_back()?),
                Position::AfterHead if list.len() >= 2 => drop(list.delete_at(1)?),
                Position::BeforeTail if list.len() >= 2 => drop(list.delete_at(list.len() - 2)?),
                Position::AfterHead | Position::BeforeTail => {}
            }
            Reply::Done
        }
        Opcode::LDelVal => {
            list.delete_by_value(args.value(0, "value")?)?;
            Reply::Done
        }
        Opcode::LSearch => Reply::Found(list.contains(args.value(0, "value")?)),
        Opcode::LGet => Reply::Value(list.get(args.index(0, "index")?)?.to_string()),
        Opcode::LLen => Reply::Count(list.len()),
        Opcode::LDelBefore => {
            list.delete_before(args.index(0, "index")?)?;
            Reply::Done
        }
        Opcode::LDelAfter => {
            list.delete_after(args.index(0, "index")?)?;
            Reply::Done
        }
        Opcode::LDelRange => {
            let start = args.index(0, "start")?;
            list.delete_range(start, args.index(1, "end")?)?;
            Reply::Done
        }
        other => return Err(ExecError::UnknownCommand(other.to_string())),
    };
    Ok(reply)
}

fn stack(stack: &mut Stack, args: &Args<'_>) -> Result<Reply, ExecError> {
    let reply = match args.opcode {
        Opcode::SPush => {
            stack.push(args.value(0, "value")?)?;
            Reply::Done
        }
        Opcode::SPop => Reply::Value(stack.pop()?),
        Opcode::SPeek => Reply::Value(stack.peek()?.to_string()),
        Opcode::SLen => Reply::Count(stack.len()),
        other => return Err(ExecError::UnknownCommand(other.to_string())),
    };
    Ok(reply)
}

fn queue(queue: &mut Queue, args: &Args<'_>) -> Result<Reply, ExecError> {
    let reply = match args.opcode {
        Opcode::QPush => {
            queue.enqueue(args.value(0, "value")?)?;
            Reply::Done
        }
        Opcode::QPop => Reply::Value(queue.dequeue()?),
        Opcode::QPeek => Reply::Value(queue.peek()?.to_string()),
        Opcode::QLen => Reply::Count(queue.len()),
        other => return Err(ExecError::UnknownCommand(other.to_string())),
    };
    Ok(reply)
}

fn tree(tree: &mut BinarySearchTree, args: &Args<'_>) -> Result<Reply, ExecError> {
    let reply = match args.opcode {
        Opcode::TInsert => {
            tree.insert(args.key(0)?)?;
            Reply::Done
        }
        Opcode::TSearch => Reply::Found(tree.contains(args.key(0)?)),
        Opcode::TDel => {
            tree.delete(args.key(0)?)?;
            Reply::Done
        }
        Opcode::TCheck => Reply::Found(tree.is_full()),
        Opcode::TGet => {
            let mode = args.value(0, "order")?;
            if tree.is_empty() {
                return Err(StructureError::Empty.into());
            }
            let keys = match mode {
                "PRE" => tree.pre_order(),
                "IN" => tree.in_order(),
                "POST" => tree.post_order(),
                "BFS" => tree.bfs(),
                other => return Err(args.unknown_mode(other)),
            };
            Reply::Keys(keys)
        }
        Opcode::TGetNodes => {
            let key = args.key(0)?;
            let direction = args.value(1, "direction")?;
            let node = tree.find(key)?;
            let neighbour = match direction {
                "PREV" => tree.predecessor(node),
                "NEXT" => tree.successor(node),
                other => return Err(args.unknown_mode(other)),
            };
            Reply::Neighbour(neighbour.and_then(|id| tree.key(id)))
        }
        other => return Err(ExecError::UnknownCommand(other.to_string())),
    };
    Ok(reply)
}

// =============================================================================
// Argument access
// =============================================================================

/// Where a list push or delete applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Front,
    Back,
    AfterHead,
    BeforeTail,
}

/// Positional parameters of one query.
struct Args<'a> {
    opcode: Opcode,
    tokens: &'a [String],
}

impl<'a> Args<'a> {
    fn new(opcode: Opcode, tokens: &'a [String]) -> Self {
        Self { opcode, tokens }
    }

    fn value(&self, position: usize, argument: &'static str) -> Result<&'a str, ExecError> {
        self.tokens
            .get(position)
            .map(String::as_str)
            .ok_or(ExecError::MissingArgument {
                command: self.opcode,
                argument,
            })
    }

    fn index(&self, position: usize, argument: &'static str) -> Result<usize, ExecError> {
        let raw = self.value(position, argument)?;
        raw.parse().map_err(|_| self.invalid(argument, raw))
    }

    fn key(&self, position: usize) -> Result<i64, ExecError> {
        let raw = self.value(position, "key")?;
        raw.parse().map_err(|_| self.invalid("key", raw))
    }

    fn position(&self, position: usize) -> Result<Position, ExecError> {
        let raw = self.value(position, "mode")?;
        match raw.parse::<u8>() {
            Ok(0) => Ok(Position::Front),
            Ok(1) => Ok(Position::Back),
            Ok(2) => Ok(Position::AfterHead),
            Ok(3) => Ok(Position::BeforeTail),
            _ => Err(self.invalid("mode", raw)),
        }
    }

    fn invalid(&self, argument: &'static str, value: &str) -> ExecError {
        ExecError::InvalidArgument {
            command: self.opcode,
            argument,
            value: value.to_string(),
        }
    }

    fn unknown_mode(&self, mode: &str) -> ExecError {
        ExecError::UnknownMode {
            command: self.opcode,
            mode: mode.to_string(),
        }
    }
}
