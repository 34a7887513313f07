//! Behavioural checks for the loop evaluator and the simulator, driven
//! through the public API only.

use approx::assert_relative_eq;
use circuitlab_core::{evaluate, Board, ComponentKind, NodeId, Position, Simulator};

const SEED: [&str; 5] = ["battery-1", "switch-1", "resistor-1", "led-1", "ground-1"];

fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

fn place(board: &mut Board, name: &str, kind: ComponentKind) -> NodeId {
    board
        .insert_node(id(name), kind, Position::default())
        .expect("fresh id")
}

fn closed_demo() -> Board {
    let mut board = Board::demo();
    assert_eq!(board.toggle_switch(&id("switch-1")), Some(true));
    board
}

#[test]
fn no_battery_means_nothing_powered() {
    let mut board = Board::new();
    let r = place(&mut board, "R1", ComponentKind::Resistor);
    let l = place(&mut board, "L1", ComponentKind::Led);
    let g = place(&mut board, "G1", ComponentKind::Ground);
    board.connect(&r, &l).unwrap();
    board.connect(&l, &g).unwrap();
    board.connect(&g, &r).unwrap();

    let result = evaluate(board.snapshot());
    assert_eq!(result.len(), 3);
    for node in board.nodes() {
        let state = result.state(node.id());
        assert!(!state.powered);
        assert_eq!(state.current, 0.0);
    }
    assert!(result.loops().is_empty());
}

#[test]
fn empty_board_evaluates_to_empty_map() {
    let result = evaluate(Board::new().snapshot());
    assert!(result.is_empty());
}

#[test]
fn seed_with_open_switch_is_dark() {
    let board = Board::demo();
    let result = evaluate(board.snapshot());
    assert_eq!(result.len(), 5);
    for name in SEED {
        assert!(!result.is_powered(&id(name)), "{} should be off", name);
        assert_eq!(result.current(&id(name)), 0.0);
    }
}

#[test]
fn seed_with_closed_switch_lights_everything() {
    let board = closed_demo();
    let result = evaluate(board.snapshot());

    assert_eq!(result.loops().len(), 1);
    assert_relative_eq!(result.loops()[0].resistance, 111.2, epsilon = 1e-9);

    for name in SEED {
        assert!(result.is_powered(&id(name)), "{} should be on", name);
        assert_relative_eq!(result.current(&id(name)), 9.0 / 111.2, epsilon = 1e-12);
    }
    assert_relative_eq!(result.current(&id("led-1")), 0.0809, epsilon = 1e-4);
}

#[test]
fn toggling_back_and_forth_is_idempotent() {
    let mut board = closed_demo();
    let first = evaluate(board.snapshot());

    board.toggle_switch(&id("switch-1"));
    assert_eq!(evaluate(board.snapshot()).powered_count(), 0);
    board.toggle_switch(&id("switch-1"));

    assert_eq!(evaluate(board.snapshot()), first);
}

#[test]
fn unconnected_component_leaves_loop_untouched() {
    let mut board = closed_demo();
    let before = evaluate(board.snapshot());

    let extra = board.add_node(ComponentKind::Led, Position::new(10.0, 10.0));
    let after = evaluate(board.snapshot());

    for name in SEED {
        assert_eq!(after.state(&id(name)), before.state(&id(name)));
    }
    assert!(!after.is_powered(&extra));
    assert_eq!(after.current(&extra), 0.0);
}

#[test]
fn zero_volt_battery_gives_zero_current() {
    let mut board = closed_demo();
    board.set_voltage(&id("battery-1"), 0.0).unwrap();

    let result = evaluate(board.snapshot());
    assert_eq!(result.loops().len(), 1);
    for name in SEED {
        assert!(result.is_powered(&id(name)));
        assert_eq!(result.current(&id(name)), 0.0);
    }
}

#[test]
fn zero_resistance_loop_gives_zero_current() {
    let mut board = Board::new();
    let b = place(&mut board, "B1", ComponentKind::Battery);
    let g = place(&mut board, "G1", ComponentKind::Ground);
    let r = place(&mut board, "R1", ComponentKind::Resistor);
    for n in [&b, &g, &r] {
        board.set_resistance(n, 0.0).unwrap();
    }
    board.connect(&b, &r).unwrap();
    board.connect(&r, &g).unwrap();
    board.connect(&g, &b).unwrap();

    let result = evaluate(board.snapshot());
    assert!(result.is_powered(&r));
    assert_eq!(result.current(&r), 0.0);
    assert!(result.current(&r).is_finite());
}

#[test]
fn shared_resistor_records_the_larger_loop_current() {
    let mut board = Board::new();
    let b1 = place(&mut board, "B1", ComponentKind::Battery);
    let b2 = place(&mut board, "B2", ComponentKind::Battery);
    let r = place(&mut board, "R1", ComponentKind::Resistor);
    let g = place(&mut board, "G1", ComponentKind::Ground);
    board.set_voltage(&b2, 4.5).unwrap();

    board.connect(&b1, &r).unwrap();
    board.connect(&b2, &r).unwrap();
    board.connect(&r, &g).unwrap();
    board.connect(&g, &b1).unwrap();
    board.connect(&g, &b2).unwrap();

    let result = evaluate(board.snapshot());
    let strong = 9.0 / 101.1;
    let weak = 4.5 / 101.1;

    assert_eq!(result.loops().len(), 2);
    assert_relative_eq!(result.current(&r), strong, epsilon = 1e-12);
    assert!(result.current(&r) < strong + weak);
    assert_relative_eq!(result.current(&b2), weak, epsilon = 1e-12);
}

#[test]
fn self_loop_terminates() {
    let mut board = closed_demo();
    board.connect(&id("resistor-1"), &id("resistor-1")).unwrap();
    let b = place(&mut board, "lonely", ComponentKind::Battery);
    board.connect(&b, &b).unwrap();

    let result = evaluate(board.snapshot());
    assert!(result.is_powered(&id("resistor-1")));
    assert!(!result.is_powered(&b));
}

#[test]
fn single_wire_between_battery_and_ground_is_not_a_loop() {
    let mut board = Board::new();
    let b = place(&mut board, "B1", ComponentKind::Battery);
    let g = place(&mut board, "G1", ComponentKind::Ground);
    board.connect(&b, &g).unwrap();
    assert_eq!(evaluate(board.snapshot()).powered_count(), 0);
}

// Known approximation: each parallel wire is its own conductor, while the
// resistance of the components it joins is still counted once.
#[test]
fn parallel_wires_close_a_loop_without_doubling_resistance() {
    let mut board = Board::new();
    let b = place(&mut board, "B1", ComponentKind::Battery);
    let g = place(&mut board, "G1", ComponentKind::Ground);
    board.connect(&b, &g).unwrap();
    board.connect(&b, &g).unwrap();

    let result = evaluate(board.snapshot());
    assert_eq!(result.loops().len(), 1);
    assert_relative_eq!(result.loops()[0].resistance, 1.1, epsilon = 1e-12);
    assert_relative_eq!(result.current(&b), 9.0 / 1.1, epsilon = 1e-12);
}

#[test]
fn open_switch_on_return_leg_breaks_the_loop() {
    let mut board = Board::new();
    let b = place(&mut board, "B1", ComponentKind::Battery);
    let r = place(&mut board, "R1", ComponentKind::Resistor);
    let g = place(&mut board, "G1", ComponentKind::Ground);
    let s = place(&mut board, "S1", ComponentKind::Switch);
    board.connect(&b, &r).unwrap();
    board.connect(&r, &g).unwrap();
    board.connect(&g, &s).unwrap();
    board.connect(&s, &b).unwrap();

    assert_eq!(evaluate(board.snapshot()).powered_count(), 0);
    board.toggle_switch(&s);
    assert_eq!(evaluate(board.snapshot()).powered_count(), 4);
}

#[test]
fn energized_wires_follow_powered_ends() {
    let mut sim = Simulator::demo();
    assert!(!sim.board().is_wire_energized(&"e1".into()));

    sim.toggle_switch(&id("switch-1"));
    for wire in ["e1", "e2", "e3", "e4", "e5"] {
        assert!(sim.board().is_wire_energized(&wire.into()), "{}", wire);
    }
}

#[test]
fn simulator_skips_runs_for_cosmetic_edits() {
    let mut sim = Simulator::demo();
    let runs = sim.runs();

    sim.move_component(&id("led-1"), Position::new(1.0, 2.0)).unwrap();
    assert_eq!(sim.runs(), runs);

    sim.toggle_switch(&id("switch-1"));
    assert_eq!(sim.runs(), runs + 1);
    assert!(sim.state(&id("led-1")).powered);
}

#[test]
fn simulator_reruns_when_rewired_with_same_counts() {
    let mut sim = Simulator::demo();
    sim.toggle_switch(&id("switch-1"));
    let runs = sim.runs();

    // Same node and wire counts, different topology: the LED is bypassed
    assert!(sim.disconnect(&"e4".into()));
    sim.connect(&id("resistor-1"), &id("ground-1")).unwrap();

    assert!(sim.runs() > runs);
    assert!(!sim.state(&id("led-1")).powered);
    assert!(sim.state(&id("resistor-1")).powered);
    assert_relative_eq!(sim.state(&id("resistor-1")).current, 9.0 / 101.2, epsilon = 1e-12);
}

#[test]
fn paused_simulator_freezes_results() {
    let mut sim = Simulator::demo();
    sim.set_active(false);
    sim.toggle_switch(&id("switch-1"));
    assert!(!sim.state(&id("led-1")).powered);

    sim.set_active(true);
    assert!(sim.state(&id("led-1")).powered);
}

#[test]
fn reset_restores_the_seed() {
    let mut sim = Simulator::demo();
    sim.toggle_switch(&id("switch-1"));
    sim.remove_component(&id("resistor-1"));
    sim.add_component(ComponentKind::Capacitor, Position::default());

    sim.reset();
    let ids: Vec<&str> = sim.board().nodes().iter().map(|n| n.id().as_str()).collect();
    assert_eq!(ids, SEED);
    assert_eq!(sim.board().wire_count(), 5);
    assert_eq!(sim.evaluation().powered_count(), 0);
}

fn bottleneck_board(reverse: bool) -> Board {
    let mut board = Board::new();
    place(&mut board, "B", ComponentKind::Battery);
    place(&mut board, "G", ComponentKind::Ground);
    for name in ["a", "b", "c", "d"] {
        place(&mut board, name, ComponentKind::Resistor);
    }
    // The shortest way out, B-a-b-G, uses `a`, which every way back needs
    let mut wires = vec![("B", "a"), ("a", "b"), ("b", "G"), ("B", "c"), ("c", "b"), ("G", "d"), ("d", "a")];
    if reverse {
        wires.reverse();
    }
    for (x, y) in wires {
        board.connect(&id(x), &id(y)).unwrap();
    }
    board
}

#[test]
fn loop_found_when_shortest_way_out_blocks_the_way_back() {
    for reverse in [false, true] {
        let board = bottleneck_board(reverse);
        let result = evaluate(board.snapshot());

        assert_eq!(result.loops().len(), 1, "wire order reversed: {}", reverse);
        assert_eq!(result.powered_count(), 6);
        assert_relative_eq!(result.loops()[0].resistance, 401.1, epsilon = 1e-9);
        for name in ["B", "a", "b", "c", "d", "G"] {
            assert_relative_eq!(result.current(&id(name)), 9.0 / 401.1, epsilon = 1e-12);
        }
    }
}

#[test]
fn each_ground_gets_its_own_loop_in_discovery_order() {
    let mut board = Board::new();
    let b = place(&mut board, "B1", ComponentKind::Battery);
    let r1 = place(&mut board, "R1", ComponentKind::Resistor);
    let g1 = place(&mut board, "G1", ComponentKind::Ground);
    let r2 = place(&mut board, "R2", ComponentKind::Resistor);
    let g2 = place(&mut board, "G2", ComponentKind::Ground);

    board.connect(&b, &r1).unwrap();
    board.connect(&r1, &g1).unwrap();
    board.connect(&g1, &b).unwrap();
    board.connect(&r1, &r2).unwrap();
    board.connect(&r2, &g2).unwrap();
    board.connect(&g2, &b).unwrap();

    let result = evaluate(board.snapshot());
    let loops = result.loops();
    assert_eq!(loops.len(), 2);

    assert_eq!(loops[0].ground, g1);
    assert_eq!(loops[0].nodes, vec![b.clone(), g1.clone(), r1.clone()]);
    assert_relative_eq!(loops[0].resistance, 101.1, epsilon = 1e-9);

    assert_eq!(loops[1].ground, g2);
    assert_eq!(loops[1].nodes, vec![b.clone(), g2.clone(), r2.clone(), r1.clone()]);
    assert_relative_eq!(loops[1].resistance, 201.1, epsilon = 1e-9);

    let near = 9.0 / 101.1;
    let far = 9.0 / 201.1;
    // Members of both loops keep the larger current
    assert_relative_eq!(result.current(&b), near, epsilon = 1e-12);
    assert_relative_eq!(result.current(&r1), near, epsilon = 1e-12);
    assert_relative_eq!(result.current(&g1), near, epsilon = 1e-12);
    assert_relative_eq!(result.current(&r2), far, epsilon = 1e-12);
    assert_relative_eq!(result.current(&g2), far, epsilon = 1e-12);
}
