/*!

  Concrete realizations of prototypes and the linking pass.

*/

use crate::error::ElabError;
use crate::gate::GateId;
use crate::store::GateStore;
use std::collections::HashMap;

/// One child of a composite instance, paired with the net names its input
/// slots resolve against during the linking pass.
#[derive(Debug)]
pub(crate) struct ChildSlot {
    pub(crate) inputs: Vec<String>,
    pub(crate) instance: Instance,
}

/// The composite side of an [Instance]: the children elaborated by the
/// collection pass plus the scope's net table.
#[derive(Debug)]
pub(crate) struct CompositeInstance {
    /// Type name of the originating prototype, for diagnostics.
    pub(crate) scope: String,
    /// The composite's own declared input net names, in arity order.
    pub(crate) input_ids: Vec<String>,
    /// The composite's own declared output net names, in arity order.
    pub(crate) output_ids: Vec<String>,
    /// Children in declaration order.
    pub(crate) children: Vec<ChildSlot>,
    /// Maps every net name produced in this scope (and, after linking,
    /// every external input name) to the gate output driving it.
    pub(crate) nets: HashMap<String, GateId>,
    pub(crate) linked: bool,
}

#[derive(Debug)]
enum Kind {
    Gate {
        id: GateId,
        inputs: usize,
        outputs: usize,
        linked: bool,
        scope: String,
    },
    Composite(CompositeInstance),
}

/// The concrete result of instantiating a prototype against a store.
///
/// An instance starts *unlinked*; [link](Self::link) binds its external
/// inputs exactly once and recursively wires every child. Output handles
/// can be read before linking (the collection pass has already populated
/// the net table), but the network is only evaluable once the enclosing
/// scope has finished linking and the store verifies.
///
/// Instances hold only [GateId] handles; they are meaningful solely
/// against the store they were elaborated into.
#[derive(Debug)]
pub struct Instance {
    kind: Kind,
}

impl Instance {
    /// Wraps a single freshly created gate.
    pub(crate) fn gate(id: GateId, inputs: usize, outputs: usize, scope: &str) -> Self {
        Self {
            kind: Kind::Gate {
                id,
                inputs,
                outputs,
                linked: false,
                scope: scope.to_string(),
            },
        }
    }

    /// Wraps the result of a composite collection pass.
    pub(crate) fn composite(inner: CompositeInstance) -> Self {
        Self {
            kind: Kind::Composite(inner),
        }
    }

    /// Returns `true` once [link](Self::link) has completed.
    pub fn is_linked(&self) -> bool {
        match &self.kind {
            Kind::Gate { linked, .. } => *linked,
            Kind::Composite(inner) => inner.linked,
        }
    }

    /// Returns the handle driving output `index`.
    ///
    /// For a composite the lookup is lazy: the declared output name is
    /// resolved against the net table at call time, so a composite output
    /// may alias a net produced anywhere in the command list.
    pub fn output(&self, index: usize) -> Result<GateId, ElabError> {
        match &self.kind {
            Kind::Gate {
                id,
                outputs,
                scope,
                ..
            } => {
                if index >= *outputs {
                    return Err(ElabError::BadOutputIndex {
                        scope: scope.clone(),
                        index,
                        arity: *outputs,
                    });
                }
                Ok(*id)
            }
            Kind::Composite(inner) => {
                let net = inner.output_ids.get(index).ok_or_else(|| {
                    ElabError::BadOutputIndex {
                        scope: inner.scope.clone(),
                        index,
                        arity: inner.output_ids.len(),
                    }
                })?;
                inner
                    .nets
                    .get(net)
                    .copied()
                    .ok_or_else(|| ElabError::UnresolvedNet {
                        scope: inner.scope.clone(),
                        net: net.clone(),
                    })
            }
        }
    }

    /// Binds the instance's external inputs and recursively links every
    /// child, resolving each command's declared input names against the
    /// now-complete net table.
    ///
    /// The external input names enter the table before any child resolves,
    /// which is why a net may be consumed by an earlier command than the
    /// one producing it: by the time any child links, both the produced
    /// nets from the collection pass and the scope's own inputs are
    /// present.
    pub fn link(&mut self, store: &mut GateStore, inputs: &[GateId]) -> Result<(), ElabError> {
        match &mut self.kind {
            Kind::Gate {
                id,
                inputs: arity,
                linked,
                scope,
                ..
            } => {
                if *linked {
                    return Err(ElabError::Relink {
                        scope: scope.clone(),
                    });
                }
                if inputs.len() != *arity {
                    return Err(ElabError::ArityMismatch {
                        scope: format!("inputs of '{scope}'"),
                        expected: *arity,
                        found: inputs.len(),
                    });
                }
                *linked = true;
                for (slot, driver) in inputs.iter().enumerate() {
                    store.bind(*id, slot, *driver);
                }
                Ok(())
            }
            Kind::Composite(inner) => {
                if inner.linked {
                    return Err(ElabError::Relink {
                        scope: inner.scope.clone(),
                    });
                }
                if inputs.len() != inner.input_ids.len() {
                    return Err(ElabError::ArityMismatch {
                        scope: format!("external inputs of '{}'", inner.scope),
                        expected: inner.input_ids.len(),
                        found: inputs.len(),
                    });
                }
                inner.linked = true;

                for (name, driver) in inner.input_ids.iter().zip(inputs) {
                    if inner.nets.insert(name.clone(), *driver).is_some() {
                        return Err(ElabError::DuplicateNet {
                            scope: inner.scope.clone(),
                            net: name.clone(),
                        });
                    }
                }

                for child in &mut inner.children {
                    let resolved = child
                        .inputs
                        .iter()
                        .map(|net| {
                            inner.nets.get(net).copied().ok_or_else(|| {
                                ElabError::UnresolvedNet {
                                    scope: inner.scope.clone(),
                                    net: net.clone(),
                                }
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    child.instance.link(store, &resolved)?;
                }
                Ok(())
            }
        }
    }
}
