/*!

  A standard library of composite circuits built from the three primitive
  prototypes. These are ordinary prototype data declared through the public
  API; nothing here touches the engine internals.

*/

use crate::composite::CompositePrototype;
use crate::proto::GatePrototype;
use std::rc::Rc;

/// All library declarations are arity-consistent by construction.
const DECL: &str = "library declaration is arity-consistent";

/// The standard prototype library, declared once and shared via [Rc].
///
/// Every field is a frozen prototype ready to embed or instantiate. The
/// combinational circuits are pure NAND networks; the sequential ones
/// (flip-flops, clock, halver) each route their feedback through a
/// register, so any network composed from them survives verification.
pub struct Library {
    /// The constant-low source primitive.
    pub low: Rc<GatePrototype>,
    /// The universal NAND primitive.
    pub nand: Rc<GatePrototype>,
    /// The clocked register primitive.
    pub register: Rc<GatePrototype>,
    /// NOT: one NAND with both inputs tied together.
    pub not: Rc<CompositePrototype>,
    /// AND: NAND followed by NOT.
    pub and: Rc<CompositePrototype>,
    /// OR: NAND over both negated inputs.
    pub or: Rc<CompositePrototype>,
    /// XOR: `(a OR b) AND (a NAND b)`.
    pub xor: Rc<CompositePrototype>,
    /// SR flip-flop over (data, set, reset): next value is
    /// `(data OR set) AND NOT reset`, latched by a register.
    pub sr_flip_flop: Rc<CompositePrototype>,
    /// D flip-flop over (data, enable): latches data while enable is high,
    /// holds otherwise; a NAND network around a register.
    pub d_flip_flop: Rc<CompositePrototype>,
    /// Full adder over three bits, outputs (value, carry).
    pub adder: Rc<CompositePrototype>,
    /// 8+8-bit ripple adder: inputs a8..a1 then b8..b1, outputs c8..c1
    /// then the carry out; carry-in is a constant low.
    pub adder8: Rc<CompositePrototype>,
    /// Free-running clock: a register whose negated output feeds its own
    /// input. Starts low, toggles every tick.
    pub clock: Rc<CompositePrototype>,
    /// Falling-edge detector: high for exactly the tick after its input
    /// goes from high to low.
    pub falling_edge: Rc<CompositePrototype>,
    /// Clock halver: toggles once per falling edge of its input, so the
    /// output period is twice the input period.
    pub halver: Rc<CompositePrototype>,
}

impl Library {
    /// Declares and freezes the whole library.
    pub fn new() -> Self {
        let low = Rc::new(GatePrototype::LOW);
        let nand = Rc::new(GatePrototype::NAND);
        let register = Rc::new(GatePrototype::REGISTER);

        let not = CompositePrototype::new("not", &["in"], &["not"]);
        not.add_child(nand.clone(), &["in", "in"], &["not"])
            .expect(DECL);
        not.finalize().expect(DECL);

        let and = CompositePrototype::new("and", &["in1", "in2"], &["and"]);
        and.add_child(nand.clone(), &["in1", "in2"], &["nand"])
            .expect(DECL);
        and.add_child(not.clone(), &["nand"], &["and"]).expect(DECL);
        and.finalize().expect(DECL);

        let or = CompositePrototype::new("or", &["in1", "in2"], &["or"]);
        or.add_child(not.clone(), &["in1"], &["nin1"]).expect(DECL);
        or.add_child(not.clone(), &["in2"], &["nin2"]).expect(DECL);
        or.add_child(nand.clone(), &["nin1", "nin2"], &["or"])
            .expect(DECL);
        or.finalize().expect(DECL);

        let xor = CompositePrototype::new("xor", &["in1", "in2"], &["xor"]);
        xor.add_child(or.clone(), &["in1", "in2"], &["or"]).expect(DECL);
        xor.add_child(nand.clone(), &["in1", "in2"], &["nand"])
            .expect(DECL);
        xor.add_child(and.clone(), &["or", "nand"], &["xor"])
            .expect(DECL);
        xor.finalize().expect(DECL);

        // Next value is (data OR set) AND NOT reset.
        let sr_flip_flop =
            CompositePrototype::new("sr_flip_flop", &["data", "set", "reset"], &["value"]);
        sr_flip_flop
            .add_child(or.clone(), &["data", "set"], &["settable"])
            .expect(DECL);
        sr_flip_flop
            .add_child(not.clone(), &["reset"], &["nreset"])
            .expect(DECL);
        sr_flip_flop
            .add_child(and.clone(), &["nreset", "settable"], &["next"])
            .expect(DECL);
        sr_flip_flop
            .add_child(register.clone(), &["next"], &["value"])
            .expect(DECL);
        sr_flip_flop.finalize().expect(DECL);

        // Next value is (data NAND enable) NAND ((NOT data NAND enable) NAND value).
        let d_flip_flop = CompositePrototype::new("d_flip_flop", &["data", "enable"], &["value"]);
        d_flip_flop
            .add_child(nand.clone(), &["data", "enable"], &["force_high"])
            .expect(DECL);
        d_flip_flop
            .add_child(not.clone(), &["data"], &["not_data"])
            .expect(DECL);
        d_flip_flop
            .add_child(nand.clone(), &["not_data", "enable"], &["force_low"])
            .expect(DECL);
        d_flip_flop
            .add_child(nand.clone(), &["force_low", "value"], &["held"])
            .expect(DECL);
        d_flip_flop
            .add_child(nand.clone(), &["force_high", "held"], &["next"])
            .expect(DECL);
        d_flip_flop
            .add_child(register.clone(), &["next"], &["value"])
            .expect(DECL);
        d_flip_flop.finalize().expect(DECL);

        let adder = CompositePrototype::new("adder", &["1", "2", "3"], &["value", "carry"]);
        adder
            .add_child(xor.clone(), &["1", "2"], &["1x2"])
            .expect(DECL);
        adder
            .add_child(xor.clone(), &["1x2", "3"], &["value"])
            .expect(DECL);
        adder
            .add_child(and.clone(), &["1", "2"], &["12"])
            .expect(DECL);
        adder
            .add_child(and.clone(), &["1", "3"], &["13"])
            .expect(DECL);
        adder
            .add_child(and.clone(), &["3", "2"], &["32"])
            .expect(DECL);
        adder
            .add_child(or.clone(), &["12", "13"], &["12+13"])
            .expect(DECL);
        adder
            .add_child(or.clone(), &["12+13", "32"], &["carry"])
            .expect(DECL);
        adder.finalize().expect(DECL);

        let adder8 = CompositePrototype::new(
            "adder8",
            &[
                "a8", "a7", "a6", "a5", "a4", "a3", "a2", "a1", "b8", "b7", "b6", "b5", "b4",
                "b3", "b2", "b1",
            ],
            &["c8", "c7", "c6", "c5", "c4", "c3", "c2", "c1", "carry"],
        );
        adder8.add_child(low.clone(), &[], &["carry0"]).expect(DECL);
        for bit in 1..=8usize {
            let a = format!("a{bit}");
            let b = format!("b{bit}");
            let carry_in = format!("carry{}", bit - 1);
            let sum = format!("c{bit}");
            let carry_out = if bit == 8 {
                "carry".to_string()
            } else {
                format!("carry{bit}")
            };
            adder8
                .add_child(
                    adder.clone(),
                    &[a.as_str(), b.as_str(), carry_in.as_str()],
                    &[sum.as_str(), carry_out.as_str()],
                )
                .expect(DECL);
        }
        adder8.finalize().expect(DECL);

        // The declared feedback: the register's output, negated, is its
        // own input. The loop is legal because it passes through the
        // register.
        let clock = CompositePrototype::new("clock", &[], &["out"]);
        clock
            .add_child(register.clone(), &["in"], &["out"])
            .expect(DECL);
        clock.add_child(not.clone(), &["out"], &["in"]).expect(DECL);
        clock.finalize().expect(DECL);

        let falling_edge = CompositePrototype::new("falling_edge", &["clk"], &["down"]);
        falling_edge
            .add_child(register.clone(), &["clk"], &["old_clk"])
            .expect(DECL);
        falling_edge
            .add_child(not.clone(), &["clk"], &["not_clk"])
            .expect(DECL);
        falling_edge
            .add_child(and.clone(), &["old_clk", "not_clk"], &["down"])
            .expect(DECL);
        falling_edge.finalize().expect(DECL);

        let halver = CompositePrototype::new("halver", &["clk"], &["next"]);
        halver
            .add_child_named(falling_edge.clone(), &["clk"], &["down"], "down detector")
            .expect(DECL);
        halver
            .add_child(register.clone(), &["next"], &["current"])
            .expect(DECL);
        halver
            .add_child_named(xor.clone(), &["current", "down"], &["next"], "change on down")
            .expect(DECL);
        halver.finalize().expect(DECL);

        Self {
            low,
            nand,
            register,
            not,
            and,
            or,
            xor,
            sr_flip_flop,
            d_flip_flop,
            adder,
            adder8,
            clock,
            falling_edge,
            halver,
        }
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}
