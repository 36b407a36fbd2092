use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::parser::prelude::FunctionDef;

use super::prelude::Value;

pub type Functions = Rc<RefCell<HashMap<String, Rc<FunctionDef>>>>;

/// Bindings visible to one evaluation scope.
///
/// Variables are kept ordered by name so that fuzzy resolution scans them in
/// a stable order. The function table is shared by every scope derived from
/// the same top-level environment.
#[derive(Default, Debug, Clone)]
pub struct Environment {
    pub constants: HashMap<String, Value>,
    pub variables: BTreeMap<String, Value>,
    pub functions: Functions,
    /// Number of user function calls between this scope and the top level.
    pub depth: usize,
}

impl Environment {
    /// Top-level environment with the scientific constants pre-seeded.
    pub fn new() -> Self {
        Self {
            constants: standard_constants(),
            ..Self::default()
        }
    }

    /// Environment without any constants.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh scope for a user function call: no constants, no variables,
    /// the same function table.
    pub fn call_scope(&self) -> Self {
        Self {
            constants: HashMap::new(),
            variables: BTreeMap::new(),
            functions: Rc::clone(&self.functions),
            depth: self.depth + 1,
        }
    }

    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.variables.insert(name, value);
    }

    pub fn define_function(&mut self, definition: Rc<FunctionDef>) {
        self.functions
            .borrow_mut()
            .insert(definition.name.clone(), definition);
    }

    pub fn function(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.functions.borrow().get(name).cloned()
    }
}

fn standard_constants() -> HashMap<String, Value> {
    [
        ("pi", std::f64::consts::PI),
        ("tau", std::f64::consts::TAU),
        ("e", std::f64::consts::E),
        ("phi", 1.618033988749895),
        // speed of light, m/s
        ("c0", 299792458.0),
        // standard gravity, m/s^2
        ("g0", 9.80665),
        ("G", 6.6743e-11),
        ("planck", 6.62607015e-34),
        ("hbar", 1.054571817e-34),
        ("kB", 1.380649e-23),
        ("NA", 6.02214076e23),
        ("R", 8.314462618),
        ("qe", 1.602176634e-19),
    ]
    .into_iter()
    .map(|(name, value)| {
        let value = if value.fract() == 0.0 {
            Value::Integer { value: value as i64 }
        } else {
            Value::Float { value }
        };

        (name.to_string(), value)
    })
    .collect()
}
