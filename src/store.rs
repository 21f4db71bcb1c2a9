/*!

  The gate arena and the synchronous tick driver.

*/

use crate::analysis::{Analysis, CombDepth};
use crate::error::ElabError;
use crate::gate::{Gate, GateId, GateKind};
use crate::path::InstancePath;
use bitvec::slice::BitSlice;

/// An arena that owns every gate elaborated into it and drives the global
/// tick sequence over them in creation order.
///
/// All cross-references between gates are [GateId] handles into this arena,
/// so instances and net tables never hold ownership. Dropping the store
/// releases the whole network.
#[derive(Debug, Default)]
pub struct GateStore {
    gates: Vec<Gate>,
    ticks: usize,
}

impl GateStore {
    /// Creates an empty store for one simulation session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a freshly created gate and returns its handle.
    pub(crate) fn insert(&mut self, kind: GateKind, path: InstancePath) -> GateId {
        let id = GateId(self.gates.len());
        self.gates.push(Gate::new(kind, path));
        id
    }

    /// Binds input slot `slot` of `gate` to the output of `driver`.
    pub(crate) fn bind(&mut self, gate: GateId, slot: usize, driver: GateId) {
        self.gates[gate.index()].inputs[slot] = Some(driver);
    }

    /// Returns the gate behind a handle.
    pub(crate) fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id.index()]
    }

    /// Iterates over every owned gate in creation order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates.iter().enumerate().map(|(i, g)| (GateId(i), g))
    }

    /// Iterates over the handles of every gate in creation order.
    pub fn ids(&self) -> impl Iterator<Item = GateId> {
        (0..self.gates.len()).map(GateId)
    }

    /// Returns the number of gates owned by the store.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if no gates have been elaborated yet.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Returns the number of completed ticks.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Returns the diagnostic label assigned to `id` at elaboration.
    pub fn path(&self, id: GateId) -> &InstancePath {
        &self.gate(id).path
    }

    /// Returns the kind name of `id`, one of `low`, `nand`, `register`,
    /// or `probe`.
    pub fn type_name(&self, id: GateId) -> &'static str {
        self.gate(id).kind.type_name()
    }

    fn driver(&self, id: GateId, slot: usize) -> GateId {
        let gate = self.gate(id);
        gate.inputs[slot].unwrap_or_else(|| {
            panic!("read of unbound input slot {slot} on gate {}", gate.path)
        })
    }

    /// Returns the current boolean output of `id`.
    ///
    /// Combinational gates recompute on demand by walking their fan-in, so
    /// the combinational depth of the network bounds the recursion depth.
    /// A register returns the value latched at the previous tick boundary,
    /// unaffected by same-tick input changes.
    ///
    /// # Panics
    ///
    /// Panics if the walk reaches an unbound input slot, or if `id` is a
    /// probe (probes are sinks with no output). Evaluating an unverified
    /// network with a combinational cycle recurses without bound; run
    /// [verify](Self::verify) first.
    pub fn value(&self, id: GateId) -> bool {
        match &self.gate(id).kind {
            GateKind::Low => false,
            GateKind::Nand => {
                !(self.value(self.driver(id, 0)) && self.value(self.driver(id, 1)))
            }
            GateKind::Register { value } => *value,
            GateKind::Probe { .. } => {
                panic!("probe gate {} has no output value", self.gate(id).path)
            }
        }
    }

    /// Advances the whole network by one synchronous clock edge.
    ///
    /// The tick is two-phase: first every stateful gate samples its fan-in
    /// against the pre-tick latch state, then all latches commit and all
    /// probes record. No latch becomes visible until every sample is taken,
    /// so the result is independent of gate creation order and feedback
    /// loops are well-defined as long as every cycle passes through a
    /// register.
    ///
    /// # Panics
    ///
    /// Panics if a stateful gate's fan-in reaches an unbound input slot.
    pub fn tick(&mut self) {
        // Begin phase: one sample per stateful gate, all against the
        // latch state from before this tick.
        let mut samples: Vec<Option<bool>> = vec![None; self.gates.len()];
        for (i, gate) in self.gates.iter().enumerate() {
            if gate.kind.is_stateful() {
                samples[i] = Some(self.value(self.driver(GateId(i), 0)));
            }
        }

        // Commit phase: latches take their samples, probes record theirs.
        for (gate, sample) in self.gates.iter_mut().zip(samples) {
            match (&mut gate.kind, sample) {
                (GateKind::Register { value }, Some(sampled)) => *value = sampled,
                (GateKind::Probe { trace, .. }, Some(sampled)) => trace.push(sampled),
                _ => (),
            }
        }
        self.ticks += 1;
    }

    /// Returns the waveform recorded by `id` so far, one sample per tick,
    /// if `id` is a probe.
    pub fn trace(&self, id: GateId) -> Option<&BitSlice> {
        match &self.gate(id).kind {
            GateKind::Probe { trace, .. } => Some(trace.as_bitslice()),
            _ => None,
        }
    }

    /// Iterates over every probe in the store as (handle, label, trace).
    pub fn probes(&self) -> impl Iterator<Item = (GateId, &str, &BitSlice)> {
        self.entries().filter_map(|(id, gate)| match &gate.kind {
            GateKind::Probe { label, trace } => Some((id, label.as_str(), trace.as_bitslice())),
            _ => None,
        })
    }

    /// Verifies that the elaborated network is well-formed: every input
    /// slot is bound, and no cycle exists once register inputs are removed
    /// from the edge set. Run this after linking the top-level instance and
    /// before evaluating or ticking.
    pub fn verify(&self) -> Result<(), ElabError> {
        for (_, gate) in self.entries() {
            for (slot, input) in gate.inputs.iter().enumerate() {
                if input.is_none() {
                    return Err(ElabError::UnboundInput {
                        gate: gate.path.to_string(),
                        slot,
                    });
                }
            }
        }
        CombDepth::build(self)?;
        Ok(())
    }
}

impl std::fmt::Display for GateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for gate in &self.gates {
            writeln!(f, "{}", gate.path)?;
        }
        Ok(())
    }
}
