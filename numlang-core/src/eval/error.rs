use std::fmt::Display;

use crate::{
    environment::prelude::ValueType,
    parser::prelude::{BinaryOperator, UnaryOperator},
    units::prelude::ConversionError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum EvalErrorType {
    UndefinedVariable {
        name: String,
    },
    UndefinedFunction {
        name: String,
    },
    BinaryOperation {
        left: ValueType,
        operator: BinaryOperator,
        right: ValueType,
    },
    StringOperation {
        operator: BinaryOperator,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: ValueType,
    },
    Rounding {
        operand: ValueType,
    },
    Conversion {
        error: ConversionError,
    },
    // `in` whose right side is not a unit name, or whose left side is not a number
    ConversionOperands {
        left: String,
        right: String,
    },
    NotANumber {
        found: ValueType,
    },
    InvalidArgument {
        function: String,
        message: String,
    },
    Arity {
        function: String,
        expected: String,
        got: usize,
    },
    EmptyFunctionBody {
        name: String,
    },
    RecursionLimit {
        name: String,
        limit: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    pub error: EvalErrorType,
    /// Names of the user functions the error propagated through, innermost
    /// first.
    pub trace: Vec<String>,
}

impl From<EvalErrorType> for EvalError {
    fn from(error: EvalErrorType) -> Self {
        Self { error, trace: vec![] }
    }
}

impl From<ConversionError> for EvalError {
    fn from(error: ConversionError) -> Self {
        EvalErrorType::Conversion { error }.into()
    }
}

impl EvalError {
    /// Records that the error left the function `name`. Direct recursion is
    /// recorded once.
    pub fn in_function(mut self, name: &str) -> Self {
        if self.trace.last().map(String::as_str) != Some(name) {
            self.trace.push(name.to_string());
        }

        self
    }

    pub fn kind(&self) -> &'static str {
        match &self.error {
            EvalErrorType::UndefinedVariable { .. } => "UndefinedVariableError",
            EvalErrorType::UndefinedFunction { .. } => "FunctionNotDefinedError",
            EvalErrorType::BinaryOperation { .. }
            | EvalErrorType::StringOperation { .. } => "BinaryOperationError",
            EvalErrorType::UnaryOperation { .. } => "UnaryOperationError",
            EvalErrorType::Rounding { .. } => "RoundingError",
            EvalErrorType::Conversion { .. }
            | EvalErrorType::ConversionOperands { .. } => "ConversionError",
            EvalErrorType::NotANumber { .. }
            | EvalErrorType::InvalidArgument { .. } => "EvaluatorError",
            EvalErrorType::Arity { .. } => "ArityError",
            EvalErrorType::EmptyFunctionBody { .. } => "IndexError",
            EvalErrorType::RecursionLimit { .. } => "RecursionLimit",
        }
    }

    pub fn message(&self) -> String {
        match &self.error {
            EvalErrorType::UndefinedVariable { name } => format!("`{name}` is not defined"),
            EvalErrorType::UndefinedFunction { name } => format!("function `{name}` is not defined"),
            EvalErrorType::BinaryOperation { left, operator, right } => {
                format!("unsupported operand types for `{operator}`: {left} and {right}")
            },
            EvalErrorType::StringOperation { operator } => {
                format!("unsupported operation between strings: `{operator}`")
            },
            EvalErrorType::UnaryOperation { operator, operand } => {
                format!("cannot apply unary `{operator}` to {operand}")
            },
            EvalErrorType::Rounding { operand } => format!("cannot round {operand}"),
            EvalErrorType::Conversion { error } => format!("{error}"),
            EvalErrorType::ConversionOperands { left, right } => {
                format!("`in` cannot convert {left} to {right}")
            },
            EvalErrorType::NotANumber { found } => format!("expected a number, found {found}"),
            EvalErrorType::InvalidArgument { function, message } => format!("{function}: {message}"),
            EvalErrorType::Arity { function, expected, got } => {
                format!("`{function}` takes {expected} argument(s), {got} given")
            },
            EvalErrorType::EmptyFunctionBody { name } => {
                format!("function `{name}` has an empty body")
            },
            EvalErrorType::RecursionLimit { name, limit } => {
                format!("calling `{name}` exceeds the maximum call depth of {limit}")
            },
        }
    }

    pub fn details(&self) -> (&'static str, Vec<String>) {
        let extra = self.trace.iter()
            .map(|name| format!("in function `{name}`"))
            .collect();

        (self.kind(), extra)
    }
}

impl Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for EvalError {}
