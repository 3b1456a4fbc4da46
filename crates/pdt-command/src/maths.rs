//! Arithmetic expressions for the `M` operation.
//!
//! Expressions are evaluated with a restricted [`rhai`] engine: only
//! expressions are accepted (no statements, loops or assignments), and the
//! standard maths functions (`sqrt`, `sin`, `cos`, `PI()`, ...) are
//! available. Trigonometry works in radians, as in rhai.

use std::sync::OnceLock;

use pdt_core::{PdtError, Result};
use rhai::{Dynamic, Engine};

fn engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        let mut engine = Engine::new();
        engine.set_max_operations(10_000);
        engine.set_max_expr_depths(64, 32);
        engine
    })
}

/// Evaluates `expression` to a finite number.
pub fn evaluate(expression: &str) -> Result<f64> {
    if expression.trim().is_empty() {
        return Err(PdtError::MathsExpression("empty expression".to_string()));
    }
    let value: Dynamic = engine()
        .eval_expression(expression)
        .map_err(|e| PdtError::MathsExpression(e.to_string()))?;
    let number = to_number(&value).ok_or_else(|| {
        PdtError::MathsExpression(format!("'{expression}' is not a number ({})", value.type_name()))
    })?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(PdtError::MathsExpression(format!(
            "'{expression}' evaluates to {number}"
        )))
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_number(value: &Dynamic) -> Option<f64> {
    value
        .as_float()
        .ok()
        .or_else(|| value.as_int().ok().map(|i| i as f64))
}
