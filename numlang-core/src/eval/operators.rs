use log::debug;

use crate::{
    environment::prelude::{round_to_precision, Environment, Value, FALSE, TRUE},
    parser::prelude::{BinaryOperator, Node, UnaryOperator},
};

use super::{error::{EvalError, EvalErrorType}, EvalResult, Evaluator};

impl Evaluator {
    pub fn eval_unary(&self, operator: UnaryOperator, operand: Value) -> EvalResult {
        match (operator, operand) {
            (UnaryOperator::Negate, Value::Integer { value }) => Ok(match value.checked_neg() {
                Some(value) => Value::Integer { value },
                None => Value::Float { value: -(value as f64) },
            }),
            (UnaryOperator::Negate, Value::Float { value }) => Ok(Value::Float { value: -value }),
            (UnaryOperator::Negate, operand) => Err(EvalErrorType::UnaryOperation {
                operator,
                operand: operand.value_type()
            }.into()),

            (UnaryOperator::Not, Value::Integer { value: 0 }) => Ok(TRUE),
            (UnaryOperator::Not, Value::String { value }) if value.is_empty() => Ok(TRUE),
            (UnaryOperator::Not, _) => Ok(FALSE),

            (UnaryOperator::Round, Value::Integer { value }) => Ok(Value::Integer { value }),
            (UnaryOperator::Round, Value::Float { value }) => Ok(Value::number(value.round())),
            (UnaryOperator::Round, operand) => Err(EvalErrorType::Rounding {
                operand: operand.value_type()
            }.into()),
        }
    }

    /// The left operand is always evaluated first. `in` with a unit name on
    /// the right never evaluates the right side.
    pub fn eval_binary(
        &self,
        left: &Node,
        operator: BinaryOperator,
        right: &Node,
        env: &mut Environment
    ) -> EvalResult {
        let left = self.eval(left, env)?;

        if operator == BinaryOperator::In {
            return match (right, &left) {
                (Node::Identifier(target), Value::Unit { value, unit }) => {
                    self.convert_quantity(*value, unit, target)
                },
                (Node::Identifier(target), Value::Integer { value }) => {
                    self.convert_quantity(*value as f64, target, target)
                },
                (Node::Identifier(target), Value::Float { value }) => {
                    self.convert_quantity(*value, target, target)
                },
                (Node::Identifier(target), _) => Err(EvalErrorType::ConversionOperands {
                    left: left.value_type().to_string(),
                    right: format!("unit `{target}`"),
                }.into()),
                (right, _) => Err(EvalErrorType::ConversionOperands {
                    left: left.value_type().to_string(),
                    right: right.kind().to_string(),
                }.into()),
            };
        }

        let right = self.eval(right, env)?;

        if let (Some(lhs), Some(rhs)) = (left.magnitude(), right.magnitude()) {
            return self.numeric_infix((lhs, left.unit()), operator, (rhs, right.unit()));
        }

        match (&left, &right) {
            (Value::String { value: left }, Value::String { value: right }) => {
                string_infix(left, operator, right)
            },
            (left, right) => Err(EvalErrorType::BinaryOperation {
                left: left.value_type(),
                operator,
                right: right.value_type(),
            }.into()),
        }
    }

    /// Arithmetic on magnitudes. With two unit operands the left one is first
    /// converted into the unit of the right one; with one, the result keeps
    /// that unit.
    pub fn numeric_infix<'a>(
        &self,
        left: (f64, Option<&'a str>),
        operator: BinaryOperator,
        right: (f64, Option<&'a str>)
    ) -> EvalResult {
        let (rhs, right_unit) = right;

        let (lhs, unit) = match (left, right_unit) {
            ((value, Some(from)), Some(to)) => (self.convert_magnitude(value, from, to)?, Some(to)),
            ((value, unit), None) => (value, unit),
            ((value, None), unit) => (value, unit),
        };

        let result = arithmetic(lhs, operator, rhs)?;

        Ok(Value::quantity(result, unit.map(str::to_string)))
    }

    /// Converts between two units and tags the result with `to`.
    pub fn convert_quantity(&self, magnitude: f64, from: &str, to: &str) -> EvalResult {
        Ok(Value::Unit {
            value: self.convert_magnitude(magnitude, from, to)?,
            unit: to.to_string(),
        })
    }

    /// Converted magnitudes are normalized; a unit converted to itself is
    /// returned untouched.
    pub fn convert_magnitude(&self, magnitude: f64, from: &str, to: &str) -> Result<f64, EvalError> {
        if from == to {
            return Ok(magnitude);
        }

        let converted = self.units().convert(magnitude, from, to)?;
        debug!("{magnitude} {from} -> {converted} {to}");

        Ok(round_to_precision(converted))
    }
}

fn string_infix(left: &str, operator: BinaryOperator, right: &str) -> EvalResult {
    match operator {
        BinaryOperator::Add => Ok(Value::String { value: format!("{left}{right}") }),
        _ => Err(EvalErrorType::StringOperation { operator }.into()),
    }
}

fn arithmetic(left: f64, operator: BinaryOperator, right: f64) -> Result<f64, EvalError> {
    let flag = |condition: bool| if condition { 1.0 } else { 0.0 };

    Ok(match operator {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => left / right,
        BinaryOperator::Pow => left.powf(right),
        // same sign as the dividend, like fmod
        BinaryOperator::Mod => left % right,
        BinaryOperator::Equal => flag(left == right),
        BinaryOperator::NotEqual => flag(left != right),
        BinaryOperator::LessThan => flag(left < right),
        BinaryOperator::LessThanOrEqual => flag(left <= right),
        BinaryOperator::GreaterThan => flag(left > right),
        BinaryOperator::GreaterThanOrEqual => flag(left >= right),
        BinaryOperator::In => return Err(EvalErrorType::ConversionOperands {
            left: "Number".into(),
            right: "Number".into(),
        }.into()),
    })
}
