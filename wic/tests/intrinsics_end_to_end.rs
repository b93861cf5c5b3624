// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![allow(clippy::unwrap_used, clippy::panic)]
//! A small "compiled module" driven entirely through the public surface.

use std::{
    io,
    sync::{Arc, Mutex},
};

use wic::{
    prelude::*,
    runtime::{ContextIntrinsic, IntrinsicEntry},
};

/// Guest function: `(x: f64) -> i32` computing `trunc(nearest(x) / d)`,
/// traced on entry and exit, with an integer division by `d`.
fn guest_scaled(context: &mut IntrinsicContext, x: f64, d: i32) -> TrapResult<i32> {
    context.debug_enter_function("scaled");
    let rounded = i32_trunc_f64_s(f64_nearest(x))?;
    if d == 0 {
        divide_by_zero_trap()?;
    }
    let result = rounded.checked_div(d);
    let Some(result) = result else {
        return raise(TrapCause::IntegerDivideByZeroOrIntegerOverflow);
    };
    context.debug_exit_function("scaled");
    Ok(result)
}

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

#[test]
fn traps_unwind_to_the_boundary_with_their_cause() {
    let mut context =
        IntrinsicContext::new(IntrinsicsConfig::new().with_call_tracing(true)).unwrap();
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    context.tracer_mut().register_log_handler(move |op| sink.lock().unwrap().push(op.message));

    let mut boundary = ExecutionBoundary::new();
    assert_eq!(boundary.invoke("scaled", || guest_scaled(&mut context, 6.5, 2)), Ok(3));
    assert_eq!(
        lines.lock().unwrap().as_slice(),
        ["ENTER: scaled".to_string(), "EXIT:  scaled".to_string()]
    );

    let trap = boundary.invoke("scaled", || guest_scaled(&mut context, 1.0, 0)).unwrap_err();
    assert_eq!(trap.cause(), TrapCause::IntegerDivideByZeroOrIntegerOverflow);

    let trap = boundary.invoke("scaled", || guest_scaled(&mut context, f64::NAN, 1)).unwrap_err();
    assert_eq!(trap.cause(), TrapCause::InvalidFloatOperation);

    let trap = boundary.invoke("scaled", || guest_scaled(&mut context, 3e9, 1)).unwrap_err();
    assert_eq!(trap.cause(), TrapCause::IntegerDivideByZeroOrIntegerOverflow);

    let trap = boundary
        .invoke("scaled", || guest_scaled(&mut context, -2_147_483_648.0, -1))
        .unwrap_err();
    assert_eq!(trap.cause(), TrapCause::IntegerDivideByZeroOrIntegerOverflow);

    assert_eq!(boundary.trap_count(), 4);
    assert_eq!(boundary.last_trap(), Some(TrapCause::IntegerDivideByZeroOrIntegerOverflow));

    // Trapped frames never ran their exit hook.
    assert_eq!(context.tracer_mut().depth(), 4);
    context.tracer_mut().reset();
}

#[test]
fn every_context_intrinsic_in_the_registry_is_dispatchable() {
    let registry = IntrinsicRegistry::standard().unwrap();
    let mut context = IntrinsicContext::new(IntrinsicsConfig::default()).unwrap();
    let mut memory = Memory::sparse(2).unwrap();
    let ty = Arc::new(FuncType::new([ValueType::I32], []).unwrap());
    let table = Table::new(1);

    let mut dispatched = 0;
    for intrinsic in &registry {
        let IntrinsicEntry::Context(which) = intrinsic.entry else {
            continue;
        };
        dispatched += 1;
        match which {
            ContextIntrinsic::GrowMemory => {
                assert_eq!(context.grow_memory(&mut memory, 65534), 2);
                assert_eq!(context.grow_memory(&mut memory, 1), GROW_FAILED);
            }
            ContextIntrinsic::CurrentMemory => {
                assert_eq!(context.current_memory(&memory), 65536);
            }
            ContextIntrinsic::IndirectCallSignatureMismatch => {
                let element = table.get(0).unwrap();
                let trap = context.indirect_call_signature_mismatch(0, element, &ty).unwrap_err();
                assert_eq!(trap.cause(), TrapCause::UndefinedTableElement);
            }
            ContextIntrinsic::DebugEnterFunction => context.debug_enter_function("f"),
            ContextIntrinsic::DebugExitFunction => context.debug_exit_function("f"),
            ContextIntrinsic::DebugBreak => context.debug_break(),
        }
    }
    assert_eq!(dispatched, 6);
}

#[test]
fn float_intrinsics_resolve_by_name_and_type() {
    let registry = IntrinsicRegistry::standard().unwrap();
    let ty = FuncType::new([ValueType::F32, ValueType::F32], [ValueType::F32]).unwrap();

    let Some(IntrinsicEntry::F32Binary(max)) = registry.lookup("floatMax", &ty).map(|i| i.entry)
    else {
        panic!("floatMax (f32, f32) -> (f32) is not registered");
    };
    assert_eq!(max(-0.0, 0.0).to_bits(), 0);
    let nan = f32::from_bits(0x7f80_0042);
    assert_eq!(max(1.0, nan).to_bits(), 0x7fc0_0042);
}

#[test]
fn boundary_logs_each_trap_at_warn() {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let mut boundary = ExecutionBoundary::new();
    tracing::subscriber::with_default(subscriber, || {
        assert_eq!(boundary.invoke("fine", || Ok(1)), Ok(1));
        let trap = boundary.invoke("convert", || i64_trunc_f64_u(-1.0)).unwrap_err();
        assert_eq!(trap.cause(), TrapCause::IntegerDivideByZeroOrIntegerOverflow);
    });

    let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1, "{output}");
    let line = lines[0];
    assert!(line.contains("WARN"), "{line}");
    assert!(line.contains("wasm trap"), "{line}");
    assert!(line.contains("function=\"convert\""), "{line}");
    assert!(line.contains(&TrapCause::IntegerDivideByZeroOrIntegerOverflow.to_string()), "{line}");
    assert!(!output.contains("fine"));
}
