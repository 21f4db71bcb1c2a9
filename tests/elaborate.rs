use gatework::composite::CompositePrototype;
use gatework::error::ElabError;
use gatework::library::Library;
use gatework::path::InstancePath;
use gatework::proto::{GatePrototype, Prototype, ProbePrototype};
use gatework::store::GateStore;
use std::rc::Rc;

fn root() -> InstancePath {
    InstancePath::root()
}

#[test]
fn declaration_checks_arity() {
    let comp = CompositePrototype::new("t", &[], &["out"]);

    let err = comp
        .add_child(Rc::new(GatePrototype::NAND), &["a"], &["out"])
        .unwrap_err();
    assert!(matches!(
        err,
        ElabError::ArityMismatch {
            expected: 2,
            found: 1,
            ..
        }
    ));

    let err = comp
        .add_child(Rc::new(GatePrototype::NAND), &["a", "b"], &[])
        .unwrap_err();
    assert!(matches!(
        err,
        ElabError::ArityMismatch {
            expected: 1,
            found: 0,
            ..
        }
    ));
}

#[test]
fn duplicate_net_rejected_at_instantiate() {
    let comp = CompositePrototype::new("t", &[], &["out"]);
    comp.add_child(Rc::new(GatePrototype::LOW), &[], &["out"])
        .unwrap();
    comp.add_child(Rc::new(GatePrototype::LOW), &[], &["out"])
        .unwrap();
    comp.finalize().unwrap();

    let mut store = GateStore::new();
    let err = comp.instantiate(&mut store, &root()).unwrap_err();
    assert_eq!(
        err,
        ElabError::DuplicateNet {
            scope: "t".to_string(),
            net: "out".to_string(),
        }
    );
}

#[test]
fn unresolved_net_rejected_at_link() {
    let comp = CompositePrototype::new("t", &[], &[]);
    comp.add_child(Rc::new(GatePrototype::NAND), &["ghost", "ghost"], &["y"])
        .unwrap();
    comp.finalize().unwrap();

    let mut store = GateStore::new();
    let mut inst = comp.instantiate(&mut store, &root()).unwrap();
    let err = inst.link(&mut store, &[]).unwrap_err();
    assert_eq!(
        err,
        ElabError::UnresolvedNet {
            scope: "t".to_string(),
            net: "ghost".to_string(),
        }
    );
}

#[test]
fn frozen_composite_rejects_changes() {
    let comp = CompositePrototype::new("t", &[], &["out"]);
    comp.add_child(Rc::new(GatePrototype::LOW), &[], &["out"])
        .unwrap();
    comp.finalize().unwrap();

    let err = comp
        .add_child(Rc::new(GatePrototype::LOW), &[], &["late"])
        .unwrap_err();
    assert!(matches!(err, ElabError::Frozen { .. }));

    let err = comp.finalize().unwrap_err();
    assert!(matches!(err, ElabError::Frozen { .. }));
}

#[test]
fn building_composite_cannot_be_embedded_or_instantiated() {
    let inner = CompositePrototype::new("inner", &[], &["out"]);
    inner
        .add_child(Rc::new(GatePrototype::LOW), &[], &["out"])
        .unwrap();
    // Deliberately not finalized.

    let outer = CompositePrototype::new("outer", &[], &["out"]);
    let err = outer
        .add_child(inner.clone(), &[], &["out"])
        .unwrap_err();
    assert_eq!(
        err,
        ElabError::Building {
            scope: "inner".to_string(),
        }
    );

    let mut store = GateStore::new();
    let err = inner.instantiate(&mut store, &root()).unwrap_err();
    assert!(matches!(err, ElabError::Building { .. }));
    assert!(!inner.is_frozen());
}

#[test]
fn relink_rejected() {
    let mut store = GateStore::new();
    let mut low = GatePrototype::LOW.instantiate(&mut store, &root()).unwrap();
    assert!(!low.is_linked());
    low.link(&mut store, &[]).unwrap();
    assert!(low.is_linked());

    let err = low.link(&mut store, &[]).unwrap_err();
    assert_eq!(
        err,
        ElabError::Relink {
            scope: "low".to_string(),
        }
    );

    let comp = CompositePrototype::new("t", &[], &["out"]);
    comp.add_child(Rc::new(GatePrototype::LOW), &[], &["out"])
        .unwrap();
    comp.finalize().unwrap();
    let mut inst = comp.instantiate(&mut store, &root()).unwrap();
    inst.link(&mut store, &[]).unwrap();
    let err = inst.link(&mut store, &[]).unwrap_err();
    assert!(matches!(err, ElabError::Relink { .. }));
}

#[test]
fn output_index_bounds_checked() {
    let mut store = GateStore::new();

    let low = GatePrototype::LOW.instantiate(&mut store, &root()).unwrap();
    assert!(low.output(0).is_ok());
    let err = low.output(1).unwrap_err();
    assert!(matches!(
        err,
        ElabError::BadOutputIndex {
            index: 1,
            arity: 1,
            ..
        }
    ));

    // Probes are sinks: no output handle can ever be obtained for one.
    let probe = ProbePrototype::new("p")
        .instantiate(&mut store, &root())
        .unwrap();
    let err = probe.output(0).unwrap_err();
    assert!(matches!(err, ElabError::BadOutputIndex { arity: 0, .. }));

    let comp = CompositePrototype::new("t", &[], &["out"]);
    comp.add_child(Rc::new(GatePrototype::LOW), &[], &["out"])
        .unwrap();
    comp.finalize().unwrap();
    let inst = comp.instantiate(&mut store, &root()).unwrap();
    let err = inst.output(5).unwrap_err();
    assert!(matches!(
        err,
        ElabError::BadOutputIndex {
            index: 5,
            arity: 1,
            ..
        }
    ));
}

#[test]
fn link_checks_external_arity() {
    let comp = CompositePrototype::new("t", &["x"], &[]);
    comp.add_child(
        Rc::new(ProbePrototype::new("x")),
        &["x"],
        &[],
    )
    .unwrap();
    comp.finalize().unwrap();

    let mut store = GateStore::new();
    let mut inst = comp.instantiate(&mut store, &root()).unwrap();
    let err = inst.link(&mut store, &[]).unwrap_err();
    assert!(matches!(
        err,
        ElabError::ArityMismatch {
            expected: 1,
            found: 0,
            ..
        }
    ));
}

#[test]
fn external_input_colliding_with_produced_net_rejected() {
    let comp = CompositePrototype::new("t", &["x"], &[]);
    comp.add_child(Rc::new(GatePrototype::LOW), &[], &["x"])
        .unwrap();
    comp.add_child(Rc::new(ProbePrototype::new("x")), &["x"], &[])
        .unwrap();
    comp.finalize().unwrap();

    let mut store = GateStore::new();
    let mut outside = GatePrototype::LOW.instantiate(&mut store, &root()).unwrap();
    outside.link(&mut store, &[]).unwrap();
    let driver = outside.output(0).unwrap();

    let mut inst = comp.instantiate(&mut store, &root()).unwrap();
    let err = inst.link(&mut store, &[driver]).unwrap_err();
    assert_eq!(
        err,
        ElabError::DuplicateNet {
            scope: "t".to_string(),
            net: "x".to_string(),
        }
    );
}

#[test]
fn external_input_resolves_regardless_of_command_order() {
    // The first command consumes a net that only exists as the composite's
    // own external input; no command ever produces it.
    let lib = Library::new();
    let comp = CompositePrototype::new("pass", &["x"], &["o"]);
    comp.add_child(lib.not.clone(), &["x"], &["o"]).unwrap();
    comp.finalize().unwrap();

    let top = CompositePrototype::new("t", &[], &["o"]);
    top.add_child(lib.low.clone(), &[], &["zero"]).unwrap();
    top.add_child(lib.not.clone(), &["zero"], &["one"]).unwrap();
    top.add_child(comp, &["one"], &["o"]).unwrap();
    top.finalize().unwrap();

    let mut store = GateStore::new();
    let mut inst = top.instantiate(&mut store, &root()).unwrap();
    inst.link(&mut store, &[]).unwrap();
    store.verify().unwrap();

    // NOT(NOT(false)) through the pass-through scope.
    assert!(!store.value(inst.output(0).unwrap()));
}

#[test]
fn forward_reference_resolves_via_second_pass() {
    // The first command reads a net the second command produces.
    let lib = Library::new();
    let top = CompositePrototype::new("t", &[], &["o"]);
    top.add_child(lib.not.clone(), &["w"], &["o"]).unwrap();
    top.add_child(lib.low.clone(), &[], &["w"]).unwrap();
    top.finalize().unwrap();

    let mut store = GateStore::new();
    let mut inst = top.instantiate(&mut store, &root()).unwrap();
    inst.link(&mut store, &[]).unwrap();
    store.verify().unwrap();

    assert!(store.value(inst.output(0).unwrap()));
}

#[test]
#[should_panic(expected = "unbound input")]
fn reading_an_unlinked_gate_panics() {
    let mut store = GateStore::new();
    let nand = GatePrototype::NAND.instantiate(&mut store, &root()).unwrap();
    store.value(nand.output(0).unwrap());
}

#[test]
fn diagnostic_paths_follow_the_hierarchy() {
    let lib = Library::new();
    let top = CompositePrototype::new("t", &[], &["o"]);
    top.add_child(lib.low.clone(), &[], &["zero"]).unwrap();
    top.add_child_named(lib.not.clone(), &["zero"], &["o"], "inverter")
        .unwrap();
    top.finalize().unwrap();

    let mut store = GateStore::new();
    let inst = top.instantiate(&mut store, &root()).unwrap();
    let out = inst.output(0).unwrap();
    assert_eq!(store.type_name(out), "nand");
    assert_eq!(
        store.path(out).as_str(),
        "[t] {inverter}: [not] [nand]"
    );
}
