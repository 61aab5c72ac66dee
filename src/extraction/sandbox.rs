//! Sandboxed evaluation of extracted script literals.
//!
//! Source documents encode question data as executable object/array
//! literals, not strict JSON: trailing commas, unquoted keys, and computed
//! values all appear in the wild. Each attempt runs in a freshly
//! constructed `boa_engine` context that carries only the ECMAScript
//! builtins (no file system, network, or process objects), on a disposable
//! worker thread bounded by a wall-clock timeout. The result leaves the
//! sandbox as strict JSON via `JSON.stringify`.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use boa_engine::{Context, Source};
use serde_json::Value;
use tracing::{debug, warn};

/// Execution budget for one literal evaluation.
///
/// The wall-clock limit is enforced by the caller; the loop and recursion
/// limits are enforced inside the interpreter so an abandoned worker still
/// terminates on its own.
#[derive(Debug, Clone, Copy)]
pub struct SandboxBudget {
    pub wall_ms: u64,
    pub loop_iteration_limit: u64,
    pub recursion_limit: usize,
}

impl Default for SandboxBudget {
    fn default() -> Self {
        Self {
            wall_ms: 80,
            loop_iteration_limit: 100_000,
            recursion_limit: 128,
        }
    }
}

/// Assigns `literal` to `var_name` in an empty context, evaluates it, and
/// returns the value decoded from strict JSON.
///
/// Every failure mode (syntax error, thrown exception, timeout, value not
/// serializable) yields `None`: the variable is treated as absent and
/// extraction carries on. Failures here must never abort the caller.
pub fn eval_literal(literal: &str, var_name: &str, budget: SandboxBudget) -> Option<Value> {
    let code = format!("var {var_name} = {literal};\nJSON.stringify({var_name});");
    let (tx, rx) = mpsc::channel::<Result<Option<String>, String>>();

    let spawned = thread::Builder::new()
        .name("literal-eval".to_string())
        .spawn(move || {
            let mut context = Context::default();
            context
                .runtime_limits_mut()
                .set_loop_iteration_limit(budget.loop_iteration_limit);
            context
                .runtime_limits_mut()
                .set_recursion_limit(budget.recursion_limit);

            let outcome = match context.eval(Source::from_bytes(code.as_bytes())) {
                Ok(value) => Ok(value.as_string().map(|s| s.to_std_string_escaped())),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(outcome);
        });

    if spawned.is_err() {
        warn!(var = var_name, "could not spawn evaluation worker");
        return None;
    }

    match rx.recv_timeout(Duration::from_millis(budget.wall_ms)) {
        Ok(Ok(Some(json))) => serde_json::from_str(&json).ok(),
        Ok(Ok(None)) => {
            debug!(var = var_name, "literal evaluated to a non-serializable value");
            None
        }
        Ok(Err(error)) => {
            debug!(var = var_name, %error, "literal evaluation failed");
            None
        }
        Err(_) => {
            // The worker is abandoned here; the interpreter's own loop and
            // recursion limits bound how long it can keep running.
            warn!(
                var = var_name,
                budget_ms = budget.wall_ms,
                "literal evaluation timed out, treating variable as absent"
            );
            None
        }
    }
}
