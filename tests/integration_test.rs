// Integration tests for the rewrite engine

use splicer::interpreter::constants::STREAM_TERMINATOR;
use splicer::interpreter::engine::{Engine, EngineConfig, Step, StepOutcome};
use splicer::interpreter::errors::RuntimeError;
use splicer::interpreter::matcher::AbortReason;
use splicer::memory::symbol::{parse_symbols, render};

fn small_index() -> EngineConfig {
    EngineConfig {
        index_stride: 4,
        index_capacity: 100_000,
    }
}

fn engine_with(text: &str, config: EngineConfig) -> Engine<Vec<u8>, Vec<u8>> {
    let symbols = parse_symbols(text).expect("valid symbols");
    Engine::new(&symbols, Vec::new(), Vec::new(), config).expect("valid config")
}

fn feed_after_one_step(text: &str) -> String {
    let mut engine = engine_with(text, small_index());
    let step = engine.step().expect("step failed");
    assert!(matches!(step, Step::Continue(_)), "run ended early");
    render(&engine.feed().to_symbols())
}

#[test]
fn test_capture_then_literal() {
    assert_eq!(feed_after_one_step("IIPIPICPIICICIIFICCIFPPIICCFPC"), "PICFC");
}

#[test]
fn test_protected_reference() {
    assert_eq!(
        feed_after_one_step("IIPIPICPIICICIIFICCIFCCCPPIICCFPC"),
        "PIICCFCFFPC"
    );
}

#[test]
fn test_capture_replaced_by_literal() {
    assert_eq!(feed_after_one_step("IIPIPIICPIICIICCIICFCFC"), "I");
}

#[test]
fn test_length_reference_scenario() {
    // pattern I ![2] (C), template |0|, data ICFCPP
    let mut engine = engine_with("CIPICPIIPFIICIICIIPPIICICFCPP", small_index());
    let Step::Continue(report) = engine.step().unwrap() else {
        panic!("expected an iteration");
    };
    assert_eq!(
        report.outcome,
        StepOutcome::Rewritten {
            consumed: 4,
            inserted: 2
        }
    );
    assert_eq!(render(&engine.feed().to_symbols()), "CPPP");
}

#[test]
fn test_skip_overrun_leaves_feed_intact() {
    // pattern ![9], template empty, data ICFPP
    let mut engine = engine_with("IPCIICPIICIICICFPP", small_index());
    let Step::Continue(report) = engine.step().unwrap() else {
        panic!("expected an iteration");
    };
    assert_eq!(report.outcome, StepOutcome::Aborted(AbortReason::SkipOverrun));
    assert_eq!(render(&engine.feed().to_symbols()), "ICFPP");
}

#[test]
fn test_echo_and_trace_streams() {
    // pattern: echo ICFPICF then literal I; template empty; data I
    let mut engine = engine_with("IIIICFPICFCIICIICI", small_index());
    let stats = engine.run().unwrap();
    assert_eq!(stats.iterations, 1);
    assert_eq!(stats.rewrites, 1);
    assert_eq!(stats.echoed, 7);

    let (output, trace) = engine.into_sinks();
    let mut expected_output = b"ICFPICF".to_vec();
    expected_output.push(STREAM_TERMINATOR);
    assert_eq!(output, expected_output);

    let mut expected_trace = b"IIIICFPICFCIICIIC".to_vec();
    expected_trace.push(STREAM_TERMINATOR);
    assert_eq!(trace, expected_trace);
}

#[test]
fn test_trace_includes_pushback_replay() {
    // pattern ?[C] (constant ended by II, replayed as the end construct),
    // template empty, data PPCPP
    let mut engine = engine_with("IFCFIICIICPPCPP", small_index());
    engine.step().unwrap();
    assert_eq!(render(&engine.feed().to_symbols()), "PP");
    engine.finish().unwrap();

    let (_, trace) = engine.into_sinks();
    let mut expected = b"IFCFIIIICIIC".to_vec();
    expected.push(STREAM_TERMINATOR);
    assert_eq!(trace, expected);
}

#[test]
fn test_terminators_written_once() {
    let mut engine = engine_with("IIC", small_index());
    assert_eq!(engine.run().unwrap().iterations, 0);
    engine.finish().unwrap();
    assert_eq!(engine.step().unwrap(), Step::Finished);

    let (output, trace) = engine.into_sinks();
    assert_eq!(output, vec![STREAM_TERMINATOR]);
    assert_eq!(trace, vec![b'I', b'I', b'C', STREAM_TERMINATOR]);
}

#[test]
fn test_index_capacity_exceeded_is_fatal() {
    // pattern ![12] P, template empty; data is 20 symbols
    let config = EngineConfig {
        index_stride: 2,
        index_capacity: 10,
    };
    let program = format!("IPIICCPICIICIIC{}", "C".repeat(20));
    let mut engine = engine_with(&program, config);
    let err = engine.step().unwrap_err();
    assert!(matches!(err, RuntimeError::IndexCapacityExceeded { offset: 12, .. }));
    assert!(err.is_configuration());
}

/// Deterministic symbol soup so runs are reproducible without extra crates
fn soup(seed: u64, len: usize) -> String {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ['I', 'C', 'F', 'P'][(state >> 33) as usize % 4]
        })
        .collect()
}

fn nat(mut n: usize) -> String {
    let mut out = String::new();
    while n > 0 {
        out.push(if n % 2 == 1 { 'C' } else { 'I' });
        n /= 2;
    }
    out.push('P');
    out
}

/// `count` programs followed by data
///
/// Each program captures everything up to some point inside the data, searches
/// for `CF`, and writes the capture back followed by its encoded length. The
/// programs behind the current one are only ever copied, so every iteration
/// decodes the program that was written.
fn churn_program(seed: u64, count: usize, data_len: usize) -> String {
    let mut programs: Vec<String> = Vec::new();
    let mut behind = 0;
    for i in 0..count {
        let into_data = (seed as usize * 37 + i * 53) % 300;
        let program = format!(
            "IIPIP{}IICIFCFPIIC IFPPIIPPIIC",
            nat(behind + into_data)
        );
        behind += program.len() - 1;
        programs.push(program);
    }
    programs.reverse();
    format!("{}{}", programs.concat(), soup(seed, data_len))
}

#[test]
fn test_index_stride_does_not_change_results() {
    for seed in 0..8 {
        let program = churn_program(seed, 30, 2000);
        let mut runs = Vec::new();
        for stride in [1, 3, 7, 64, 5000] {
            let config = EngineConfig {
                index_stride: stride,
                index_capacity: 20_000,
            };
            let mut engine = engine_with(&program, config);
            assert_eq!(engine.run_steps(30).unwrap(), 30);
            let stats = engine.stats();
            let feed = render(&engine.feed().to_symbols());
            let (output, trace) = engine.into_sinks();
            runs.push((stats, feed, output, trace));
        }
        assert!(runs[0].0.rewrites > 0, "seed {}", seed);
        for run in &runs[1..] {
            assert_eq!(run, &runs[0], "seed {}", seed);
        }
    }
}
