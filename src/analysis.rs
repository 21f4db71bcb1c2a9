/*!

  Analyses over an elaborated gate network.

*/

use crate::error::ElabError;
use crate::gate::{GateId, GateKind};
use crate::store::GateStore;
#[cfg(feature = "graph")]
use petgraph::graph::DiGraph;

/// A common trait of analyses that can be performed on a gate store.
/// An analysis becomes stale when more gates are elaborated or linked.
pub trait Analysis<'a>
where
    Self: Sized + 'a,
{
    /// Construct the analysis against the current state of the store.
    fn build(store: &'a GateStore) -> Result<Self, ElabError>;
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Computes the combinational depth of every gate output: the longest
/// chain of NAND gates between it and a source, register, or input.
///
/// Register inputs are not combinational edges (a register drives from its
/// latch), so registers and sources sit at depth 0. Building the analysis
/// also proves the network free of combinational cycles: a loop that
/// passes through no register has no defined depth and is rejected.
pub struct CombDepth<'a> {
    _store: &'a GateStore,
    depth: Vec<usize>,
    max_depth: usize,
}

impl CombDepth<'_> {
    /// Returns the combinational depth of the gate's output.
    pub fn depth(&self, id: GateId) -> usize {
        self.depth[id.index()]
    }

    /// Returns the maximum combinational depth across the store.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// The bound combinational fan-in of a gate. Only NAND gates propagate
/// combinationally; register and probe inputs are sequential edges.
fn comb_fanin(store: &GateStore, id: GateId) -> Vec<GateId> {
    let gate = store.gate(id);
    match gate.kind {
        GateKind::Nand => gate.inputs.iter().flatten().copied().collect(),
        _ => Vec::new(),
    }
}

impl<'a> Analysis<'a> for CombDepth<'a> {
    fn build(store: &'a GateStore) -> Result<Self, ElabError> {
        let count = store.len();
        let mut depth = vec![0usize; count];
        let mut marks = vec![Mark::Unvisited; count];

        for root in 0..count {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            // Iterative depth-first walk over combinational edges only,
            // with an explicit frame stack so deep NAND chains cannot
            // overflow the call stack during verification.
            marks[root] = Mark::Active;
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            while let Some((gate, cursor)) = stack.last().copied() {
                let fanin = comb_fanin(store, GateId(gate));
                if let Some(driver) = fanin.get(cursor) {
                    stack.last_mut().unwrap().1 += 1;
                    match marks[driver.index()] {
                        Mark::Unvisited => {
                            marks[driver.index()] = Mark::Active;
                            stack.push((driver.index(), 0));
                        }
                        Mark::Active => {
                            return Err(ElabError::CombinationalCycle {
                                gate: store.path(*driver).to_string(),
                            });
                        }
                        Mark::Done => (),
                    }
                } else {
                    marks[gate] = Mark::Done;
                    if !fanin.is_empty() {
                        depth[gate] = 1 + fanin
                            .iter()
                            .map(|driver| depth[driver.index()])
                            .max()
                            .unwrap_or(0);
                    }
                    stack.pop();
                }
            }
        }

        let max_depth = depth.iter().max().copied().unwrap_or(0);

        Ok(CombDepth {
            _store: store,
            depth,
            max_depth,
        })
    }
}

/// Exports the elaborated network as a petgraph directed graph: one node
/// per gate weighted by its diagnostic label, one edge per bound input
/// slot weighted by the slot index.
#[cfg(feature = "graph")]
pub struct NetworkGraph<'a> {
    _store: &'a GateStore,
    graph: DiGraph<String, usize>,
}

#[cfg(feature = "graph")]
impl NetworkGraph<'_> {
    /// Return a reference to the graph constructed by this analysis.
    pub fn get_graph(&self) -> &DiGraph<String, usize> {
        &self.graph
    }
}

#[cfg(feature = "graph")]
impl<'a> Analysis<'a> for NetworkGraph<'a> {
    fn build(store: &'a GateStore) -> Result<Self, ElabError> {
        let mut graph = DiGraph::new();
        let mut nodes = Vec::with_capacity(store.len());
        for (id, _) in store.entries() {
            nodes.push(graph.add_node(store.path(id).to_string()));
        }
        for (id, gate) in store.entries() {
            for (slot, driver) in gate.inputs.iter().enumerate() {
                if let Some(driver) = driver {
                    graph.add_edge(nodes[driver.index()], nodes[id.index()], slot);
                }
            }
        }
        Ok(Self {
            _store: store,
            graph,
        })
    }
}
