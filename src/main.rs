use gatework::composite::CompositePrototype;
use gatework::library::Library;
use gatework::path::InstancePath;
use gatework::proto::{Prototype, ProbePrototype};
use gatework::store::GateStore;
use std::rc::Rc;

fn main() {
    let lib = Library::new();
    let mut store = GateStore::new();

    // A free-running clock halved twice, with the three phases summed by a
    // full adder and every interesting net probed.
    let bench = CompositePrototype::new("bench", &[], &[]);
    bench
        .add_child_named(lib.clock.clone(), &[], &["clk/1"], "clock")
        .unwrap();
    bench
        .add_child_named(lib.halver.clone(), &["clk/1"], &["clk/2"], "first halver")
        .unwrap();
    bench
        .add_child_named(
            Rc::new(ProbePrototype::new("clk/1")),
            &["clk/1"],
            &[],
            "first input",
        )
        .unwrap();
    bench
        .add_child_named(lib.halver.clone(), &["clk/2"], &["clk/4"], "second halver")
        .unwrap();
    bench
        .add_child_named(
            Rc::new(ProbePrototype::new("clk/2")),
            &["clk/2"],
            &[],
            "second input",
        )
        .unwrap();
    bench
        .add_child_named(
            Rc::new(ProbePrototype::new("clk/4")),
            &["clk/4"],
            &[],
            "third input",
        )
        .unwrap();
    bench
        .add_child_named(
            lib.adder.clone(),
            &["clk/1", "clk/2", "clk/4"],
            &["sum", "carry"],
            "adder",
        )
        .unwrap();
    bench
        .add_child_named(Rc::new(ProbePrototype::new("sum")), &["sum"], &[], "sum")
        .unwrap();
    bench
        .add_child_named(
            Rc::new(ProbePrototype::new("carry")),
            &["carry"],
            &[],
            "carry",
        )
        .unwrap();
    bench.finalize().unwrap();

    let mut bench = bench
        .instantiate(&mut store, &InstancePath::root())
        .unwrap();
    bench.link(&mut store, &[]).unwrap();
    store.verify().unwrap();

    println!("elaborated {} gates:", store.len());
    print!("{store}");

    for _ in 0..24 {
        store.tick();
    }

    println!();
    for (_, label, trace) in store.probes() {
        let waveform: String = trace.iter().map(|b| if *b { 'H' } else { 'L' }).collect();
        println!("{label:>6}: {waveform}");
    }
}
