use log::debug;

use crate::{
    environment::prelude::Environment,
    parser::prelude::{FunctionDef, Node},
};

use super::{builtins::builtin, error::EvalErrorType, EvalResult, Evaluator};

impl Evaluator {
    /// Calls a builtin if `name` is one, otherwise a user defined function.
    pub fn eval_call(&self, name: &str, arguments: &[Node], env: &mut Environment) -> EvalResult {
        if let Some(function) = builtin(name) {
            let arguments = arguments.iter()
                .map(|argument| self.eval(argument, env))
                .collect::<Result<Vec<_>, _>>()?;

            return function(self, arguments, env);
        }

        match env.function(name) {
            Some(definition) => self.call_function(&definition, arguments, env),
            None => Err(EvalErrorType::UndefinedFunction { name: name.to_string() }.into()),
        }
    }

    /// Evaluates the arguments in the caller's scope, binds them by position
    /// in a fresh scope and returns the value of the last body statement.
    pub fn call_function(
        &self,
        definition: &FunctionDef,
        arguments: &[Node],
        env: &mut Environment
    ) -> EvalResult {
        let name = &definition.name;

        if arguments.len() != definition.parameters.len() {
            return Err(EvalErrorType::Arity {
                function: name.clone(),
                expected: definition.parameters.len().to_string(),
                got: arguments.len(),
            }.into());
        }

        if env.depth >= self.config.max_call_depth {
            return Err(EvalErrorType::RecursionLimit {
                name: name.clone(),
                limit: self.config.max_call_depth,
            }.into());
        }

        let mut scope = env.call_scope();

        for (parameter, argument) in definition.parameters.iter().zip(arguments) {
            let value = self.eval(argument, env)?;
            scope.set(parameter.clone(), value);
        }

        debug!("calling `{name}` at depth {}", scope.depth);

        let mut values = self.eval_program(&definition.body, &mut scope)
            .map_err(|err| err.in_function(name))?;

        values.pop()
            .ok_or_else(|| EvalErrorType::EmptyFunctionBody { name: name.clone() }.into())
    }
}
