//! One full measurement pass through the library pieces.

use std::fs;

use bench_harness::{
    report_line, run, BenchmarkCallbacks, CartridgeImage, RollingAverage, Session, Workload,
    REPORT_PREFIX,
};
use console_core::{Configuration, ConstantTables};
use proptest as _;
use rstest as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

#[test]
fn one_batch_of_a_hundred_frames_reports_its_own_sample() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let path = temp_dir.path().join("game.bin");
    let mut rom = vec![0_u8; 0x200];
    rom[4..8].copy_from_slice(&[0x00, 0x00, 0x01, 0x00]);
    // ADD 1; JMP 0x100.
    rom[0x100..0x107].copy_from_slice(&[0x20, 0x00, 0x01, 0xE0, 0x00, 0x01, 0x00]);
    fs::write(&path, &rom).expect("write rom");

    let cartridge = CartridgeImage::load(&path).expect("rom should load");
    assert_eq!(cartridge.len(), 0x200);

    let config = Configuration::default();
    let constants = ConstantTables::new();
    let mut session = Session::new(&config, &constants, BenchmarkCallbacks::new(&cartridge));
    let mut window = RollingAverage::new();
    let mut sink = Vec::new();

    let summary = run(&mut session, 100, &mut window, &mut sink, || false)
        .expect("in-memory sink never fails");

    assert_eq!(summary.batches, 1);
    assert_eq!(window.len(), 1);
    let sample = summary.last_sample.expect("one sample");
    assert_eq!(window.average(), Some(sample));
    assert_eq!(session.state().vdp.frame, 100);

    let text = String::from_utf8(sink).expect("utf-8 report");
    assert_eq!(text, format!("{}\n", report_line(sample)));
    assert!(text.starts_with(REPORT_PREFIX));
}

#[test]
fn every_batch_starts_from_the_same_reset_state() {
    let cartridge = CartridgeImage::from_bytes(vec![0_u8; 0x200]);
    let config = Configuration::default();
    let constants = ConstantTables::new();
    let mut session = Session::new(&config, &constants, BenchmarkCallbacks::new(&cartridge));

    session.reset();
    let baseline = session.state().clone();

    let mut window = RollingAverage::new();
    let mut batches = 0;
    run(&mut session, 3, &mut window, &mut Vec::<u8>::new(), || {
        batches += 1;
        batches < 4
    })
    .expect("in-memory sink never fails");

    assert_eq!(window.len(), 4);
    assert_eq!(session.state().vdp.frame, 3);
    session.reset();
    assert_eq!(session.state(), &baseline);
}
