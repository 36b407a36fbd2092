use std::fmt::Display;

pub const NIL: Value = Value::Nil;
pub const TRUE: Value = Value::Integer { value: 1 };
pub const FALSE: Value = Value::Integer { value: 0 };

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer {
        value: i64
    },
    Float {
        value: f64,
    },
    Unit {
        value: f64,
        unit: String,
    },
    String {
        value: String,
    },
    List {
        values: Vec<Value>,
    },
    Nil,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Float { value } => write!(f, "{value}"),
            Value::Unit { value, unit } => write!(f, "{value} {unit}"),
            Value::String { value } => write!(f, "{value}"),
            Value::List { values } => {
                let values = values.iter()
                    .map(|value| format!("{value}"))
                    .collect::<Vec<String>>();

                write!(f, "[{}]", values.join(", "))
            },
            Value::Nil => write!(f, "nil"),
        }
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Float { .. } => ValueType::Float,
            Self::Unit { .. } => ValueType::Unit,
            Self::String { .. } => ValueType::String,
            Self::List { .. } => ValueType::List,
            Self::Nil => ValueType::Nil,
        }
    }

    /// Numeric magnitude of integers, floats and unit values.
    pub fn magnitude(&self) -> Option<f64> {
        match self {
            Self::Integer { value } => Some(*value as f64),
            Self::Float { value } | Self::Unit { value, .. } => Some(*value),
            _ => None
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            Self::Unit { unit, .. } => Some(unit),
            _ => None
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Turns a computed number into an `Integer` when it has no fractional
    /// part, otherwise into a `Float` rounded to 5 decimal places.
    pub fn number(value: f64) -> Self {
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value < i64::MAX as f64
        {
            return Self::Integer { value: value as i64 };
        }

        Self::Float { value: round_to_precision(value) }
    }

    /// Same as [`Value::number`], tagged with `unit` when one is given.
    pub fn quantity(value: f64, unit: Option<String>) -> Self {
        let number = Self::number(value);

        match (unit, number.magnitude()) {
            (Some(unit), Some(value)) => Self::Unit { value, unit },
            _ => number
        }
    }
}

pub fn round_to_precision(value: f64) -> f64 {
    if !value.is_finite() || value.fract() == 0.0 {
        return value;
    }

    (value * 100000.0).round() / 100000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    Unit,
    String,
    List,
    Nil,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Unit => "Unit",
            Self::String => "String",
            Self::List => "List",
            Self::Nil => "Nil",
        };

        write!(f, "{name}")
    }
}
