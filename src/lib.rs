#![warn(missing_docs, unreachable_pub)]
/*!

`gatework`

A structural digital-logic simulator. Circuits are declared as reusable
*prototypes*: a primitive wraps a single gate (constant low, NAND,
register, probe), a composite wires child prototypes together through
symbolic net names. Instantiating a prototype elaborates concrete gates
into a [store::GateStore] arena in two passes (collect the produced nets,
then resolve names and bind inputs), so nets may be consumed before the
command producing them and feedback loops need no special syntax, as long
as every loop passes through a register. The store then steps the whole
network in synchronous two-phase ticks.

## Simple example

```
use gatework::composite::CompositePrototype;
use gatework::library::Library;
use gatework::path::InstancePath;
use gatework::proto::Prototype;
use gatework::store::GateStore;

let lib = Library::new();
let mut store = GateStore::new();

let top = CompositePrototype::new("top", &[], &["out"]);
top.add_child(lib.low.clone(), &[], &["zero"]).unwrap();
top.add_child(lib.not.clone(), &["zero"], &["one"]).unwrap();
top.add_child(lib.xor.clone(), &["one", "zero"], &["out"]).unwrap();
top.finalize().unwrap();

let mut top = top.instantiate(&mut store, &InstancePath::root()).unwrap();
top.link(&mut store, &[]).unwrap();
store.verify().unwrap();

assert!(store.value(top.output(0).unwrap()));
```

*/

pub mod analysis;
pub mod composite;
pub mod error;
pub mod gate;
pub mod instance;
pub mod library;
pub mod path;
pub mod proto;
pub mod store;
pub mod util;
