// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![allow(clippy::unwrap_used)]
//! Checks that tracer lines reach a `tracing` subscriber.

use std::{
    io,
    sync::{Arc, Mutex},
};

use wic_logging::{CallTracer, BREAKPOINT_MARKER, TRACE_TARGET};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(run: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    let bytes = capture.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn enter_exit_and_break_are_emitted() {
    let output = captured(|| {
        let mut tracer = CallTracer::new();
        tracer.enter_function("main");
        tracer.breakpoint();
        tracer.exit_function("main");
    });

    assert!(output.contains(TRACE_TARGET));
    assert!(output.contains("ENTER: main"));
    assert!(output.contains(BREAKPOINT_MARKER));
    assert!(output.contains("EXIT:  main"));
    assert!(output.contains("depth=1"));
}

#[test]
fn nothing_is_emitted_below_the_subscriber_level() {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        CallTracer::new().enter_function("quiet");
    });
    assert!(capture.0.lock().unwrap().is_empty());
}
