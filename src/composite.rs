/*!

  Composite prototypes: circuits declared from named instantiations of
  other prototypes connected via symbolic net names.

*/

use crate::error::ElabError;
use crate::instance::{ChildSlot, CompositeInstance, Instance};
use crate::path::InstancePath;
use crate::proto::Prototype;
use crate::store::GateStore;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// One instantiation command of a composite: which child prototype to
/// elaborate and which nets its ports attach to.
struct Command {
    proto: Rc<dyn Prototype>,
    inputs: Vec<String>,
    outputs: Vec<String>,
    child_id: Option<String>,
}

/// A circuit declared as an ordered list of child instantiations wired by
/// symbolic net names local to this scope.
///
/// A composite moves through a two-state lifecycle: while *building*,
/// [add_child](Self::add_child) appends commands; [finalize](Self::finalize)
/// freezes it permanently, after which it is safe to embed in arbitrarily
/// many other composites and instantiate arbitrarily many times. Only
/// frozen composites may be embedded or instantiated.
///
/// Net names may be consumed before (or after) the command producing them,
/// because elaboration resolves names in a second pass once the whole scope
/// is known; this is what lets feedback circuits, like a register whose
/// negated output feeds its own input, be declared without any explicit
/// cycle-breaking syntax.
pub struct CompositePrototype {
    type_name: String,
    input_ids: Vec<String>,
    output_ids: Vec<String>,
    commands: RefCell<Vec<Command>>,
    frozen: Cell<bool>,
}

impl CompositePrototype {
    /// Creates a new building composite with the given type name and
    /// declared input/output net names. Arity is fixed here and the names
    /// are never renamed.
    pub fn new(type_name: impl Into<String>, inputs: &[&str], outputs: &[&str]) -> Rc<Self> {
        Rc::new(Self {
            type_name: type_name.into(),
            input_ids: inputs.iter().map(|s| s.to_string()).collect(),
            output_ids: outputs.iter().map(|s| s.to_string()).collect(),
            commands: RefCell::new(Vec::new()),
            frozen: Cell::new(false),
        })
    }

    /// Appends one instantiation command: elaborate `child` with its input
    /// ports reading the named nets and its output ports producing them.
    ///
    /// Fails if this composite is already frozen, if `child` is a
    /// still-building composite, or if either name list length differs
    /// from the child's declared arity.
    pub fn add_child(
        &self,
        child: Rc<dyn Prototype>,
        inputs: &[&str],
        outputs: &[&str],
    ) -> Result<(), ElabError> {
        self.push_command(child, inputs, outputs, None)
    }

    /// Like [add_child](Self::add_child), but tags the command with a
    /// child id that shows up in the diagnostic labels of every gate the
    /// child elaborates.
    pub fn add_child_named(
        &self,
        child: Rc<dyn Prototype>,
        inputs: &[&str],
        outputs: &[&str],
        child_id: &str,
    ) -> Result<(), ElabError> {
        self.push_command(child, inputs, outputs, Some(child_id.to_string()))
    }

    fn push_command(
        &self,
        child: Rc<dyn Prototype>,
        inputs: &[&str],
        outputs: &[&str],
        child_id: Option<String>,
    ) -> Result<(), ElabError> {
        if self.frozen.get() {
            return Err(ElabError::Frozen {
                scope: self.type_name.clone(),
            });
        }
        if !child.is_frozen() {
            return Err(ElabError::Building {
                scope: child.type_name().to_string(),
            });
        }
        if inputs.len() != child.num_inputs() {
            return Err(ElabError::ArityMismatch {
                scope: format!(
                    "input list for child '{}' of '{}'",
                    child.type_name(),
                    self.type_name
                ),
                expected: child.num_inputs(),
                found: inputs.len(),
            });
        }
        if outputs.len() != child.num_outputs() {
            return Err(ElabError::ArityMismatch {
                scope: format!(
                    "output list for child '{}' of '{}'",
                    child.type_name(),
                    self.type_name
                ),
                expected: child.num_outputs(),
                found: outputs.len(),
            });
        }
        self.commands.borrow_mut().push(Command {
            proto: child,
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            child_id,
        });
        Ok(())
    }

    /// Freezes the composite. No further commands may be added; the
    /// prototype becomes permanently reusable. Fails if already frozen.
    pub fn finalize(&self) -> Result<(), ElabError> {
        if self.frozen.get() {
            return Err(ElabError::Frozen {
                scope: self.type_name.clone(),
            });
        }
        self.frozen.set(true);
        Ok(())
    }
}

impl Prototype for CompositePrototype {
    fn num_inputs(&self) -> usize {
        self.input_ids.len()
    }

    fn num_outputs(&self) -> usize {
        self.output_ids.len()
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    /// The collection pass: children are elaborated recursively in
    /// declaration order, and every declared output net is recorded in the
    /// scope's net table. Name resolution of the children's inputs is
    /// deferred to [Instance::link], once the table is complete.
    fn instantiate(
        &self,
        store: &mut GateStore,
        path: &InstancePath,
    ) -> Result<Instance, ElabError> {
        if !self.frozen.get() {
            return Err(ElabError::Building {
                scope: self.type_name.clone(),
            });
        }

        let mut nets: HashMap<String, crate::gate::GateId> = HashMap::new();
        let mut children = Vec::with_capacity(self.commands.borrow().len());

        for command in self.commands.borrow().iter() {
            let mut child_path = path.with_type(&self.type_name);
            if let Some(child_id) = &command.child_id {
                child_path = child_path.with_child(child_id);
            }
            let instance = command.proto.instantiate(store, &child_path)?;
            for (index, net) in command.outputs.iter().enumerate() {
                let handle = instance.output(index)?;
                if nets.insert(net.clone(), handle).is_some() {
                    return Err(ElabError::DuplicateNet {
                        scope: self.type_name.clone(),
                        net: net.clone(),
                    });
                }
            }
            children.push(ChildSlot {
                inputs: command.inputs.clone(),
                instance,
            });
        }

        Ok(Instance::composite(CompositeInstance {
            scope: self.type_name.clone(),
            input_ids: self.input_ids.clone(),
            output_ids: self.output_ids.clone(),
            children,
            nets,
            linked: false,
        }))
    }
}
