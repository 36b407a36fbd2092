use std::ops::RangeInclusive;

use crate::{
    elements::prelude::lookup as lookup_element,
    environment::prelude::{Environment, Value, NIL},
};

use super::{error::{EvalError, EvalErrorType}, EvalResult, Evaluator};

/// A builtin receives its already evaluated arguments.
pub type Builtin = fn(&Evaluator, Vec<Value>, &Environment) -> EvalResult;

pub const BUILTIN_NAMES: [&str; 4] = ["frac", "print", "root", "lookup"];

// largest denominator `frac` will produce
const MAX_DENOMINATOR: i64 = 1_000_000;

// half of the last decimal place kept by normalization
const FRACTION_TOLERANCE: f64 = 5e-6;

pub fn builtin(name: &str) -> Option<Builtin> {
    let function: Builtin = match name {
        "frac" => frac,
        "print" => print,
        "root" => root,
        "lookup" => lookup,
        _ => return None,
    };

    Some(function)
}

fn expect_arguments(function: &str, arguments: &[Value], range: RangeInclusive<usize>) -> Result<(), EvalError> {
    if range.contains(&arguments.len()) {
        return Ok(());
    }

    let expected = match range.start() == range.end() {
        true => range.start().to_string(),
        false => format!("{} to {}", range.start(), range.end()),
    };

    Err(EvalErrorType::Arity {
        function: function.to_string(),
        expected,
        got: arguments.len(),
    }.into())
}

fn invalid_argument(function: &str, message: impl Into<String>) -> EvalError {
    EvalErrorType::InvalidArgument {
        function: function.to_string(),
        message: message.into(),
    }.into()
}

fn number_argument(function: &str, value: &Value) -> Result<f64, EvalError> {
    value.magnitude()
        .ok_or_else(|| invalid_argument(function, format!("expected a number, found {}", value.value_type())))
}

/// `print(a, b, ...)` writes the arguments separated by spaces as one line.
fn print(evaluator: &Evaluator, arguments: Vec<Value>, _env: &Environment) -> EvalResult {
    let line = arguments.iter()
        .map(|argument| format!("{argument}"))
        .collect::<Vec<String>>()
        .join(" ");

    evaluator.output().write_line(&line);

    Ok(NIL)
}

/// `root(x)` is the square root, `root(x, n)` the n-th root.
fn root(_evaluator: &Evaluator, arguments: Vec<Value>, _env: &Environment) -> EvalResult {
    expect_arguments("root", &arguments, 1..=2)?;

    let radicand = number_argument("root", &arguments[0])?;
    let index = match arguments.get(1) {
        Some(index) => number_argument("root", index)?,
        None => 2.0,
    };

    if index == 0.0 {
        return Err(invalid_argument("root", "the root index must not be zero"));
    }

    let odd_index = index.fract() == 0.0 && index % 2.0 != 0.0;

    let result = match radicand < 0.0 {
        true if odd_index => -(-radicand).powf(1.0 / index),
        true => return Err(invalid_argument("root", format!("no real root of index {index} of {radicand}"))),
        false => radicand.powf(1.0 / index),
    };

    // powf(1/3) of a perfect cube lands next to the integer, not on it
    let rounded = result.round();
    let result = match index.fract() == 0.0 && index.abs() <= i32::MAX as f64 {
        true if rounded.powi(index as i32) == radicand => rounded,
        _ => result,
    };

    Ok(Value::quantity(result, arguments[0].unit().map(str::to_string)))
}

/// `frac(x)` renders `x` as the simplest fraction within the rounding
/// tolerance, e.g. `"3/4"`.
fn frac(_evaluator: &Evaluator, arguments: Vec<Value>, _env: &Environment) -> EvalResult {
    expect_arguments("frac", &arguments, 1..=1)?;

    let value = number_argument("frac", &arguments[0])?;

    if !value.is_finite() {
        return Err(invalid_argument("frac", format!("{value} has no fraction")));
    }

    if value.abs() >= i64::MAX as f64 {
        return Err(invalid_argument("frac", format!("{value} is too large for a fraction")));
    }

    let fraction = match approximate_fraction(value, MAX_DENOMINATOR) {
        (numerator, 1) => format!("{numerator}"),
        (numerator, denominator) => format!("{numerator}/{denominator}"),
    };

    let value = match arguments[0].unit() {
        Some(unit) => format!("{fraction} {unit}"),
        None => fraction,
    };

    Ok(Value::String { value })
}

/// Continued fraction expansion of `value`, stopped at the first convergent
/// within tolerance or before the denominator exceeds `max_denominator`.
/// `value` must lie within the `i64` range.
pub fn approximate_fraction(value: f64, max_denominator: i64) -> (i64, i64) {
    let target = value.abs();
    let mut x = target;

    let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);

    loop {
        let a = x.floor() as i64;

        let p2 = a.checked_mul(p1).and_then(|p| p.checked_add(p0));
        let q2 = a.checked_mul(q1).and_then(|q| q.checked_add(q0));

        let (Some(p2), Some(q2)) = (p2, q2) else { break };

        if q2 > max_denominator {
            break;
        }

        (p0, q0, p1, q1) = (p1, q1, p2, q2);

        let remainder = x - x.floor();

        if remainder == 0.0 || (p1 as f64 / q1 as f64 - target).abs() < FRACTION_TOLERANCE {
            break;
        }

        x = 1.0 / remainder;
    }

    if q1 == 0 {
        return (value.round() as i64, 1);
    }

    match value < 0.0 {
        true => (-p1, q1),
        false => (p1, q1),
    }
}

/// `lookup("Fe")` describes an element given its symbol or name.
fn lookup(_evaluator: &Evaluator, arguments: Vec<Value>, _env: &Environment) -> EvalResult {
    expect_arguments("lookup", &arguments, 1..=1)?;

    let name = match &arguments[0] {
        Value::String { value } => value,
        other => return Err(invalid_argument(
            "lookup",
            format!("expected an element symbol or name as a String, found {}", other.value_type())
        )),
    };

    match lookup_element(name) {
        Some(element) => Ok(Value::String { value: format!("{element}") }),
        None => Err(invalid_argument("lookup", format!("unknown element `{name}`"))),
    }
}
