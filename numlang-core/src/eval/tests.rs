use std::rc::Rc;

use crate::{
    environment::prelude::{Environment, Value, ValueType, NIL},
    eval::prelude::{
        approximate_fraction, closest_variable, similarity, EvalConfig, EvalError, EvalErrorType,
        Evaluator
    },
    parser::prelude::{parse_module, BinaryOperator},
    units::prelude::UnitRegistry,
    utils::prelude::{VectorOutputIO, VectorWarningEmitterIO, Warning},
};

struct Session {
    evaluator: Evaluator,
    env: Environment,
    output: VectorOutputIO,
    warnings: VectorWarningEmitterIO,
}

impl Session {
    fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    fn with_config(config: EvalConfig) -> Self {
        let output = VectorOutputIO::new();
        let warnings = VectorWarningEmitterIO::new();
        let units = UnitRegistry::standard().expect("standard units");

        let evaluator = Evaluator::new(
            Rc::new(units),
            Rc::new(output.clone()),
            Rc::new(warnings.clone())
        ).with_config(config);

        Self {
            evaluator,
            env: Environment::new(),
            output,
            warnings,
        }
    }

    fn run(&mut self, src: &str) -> Result<Vec<Value>, EvalError> {
        let parsed = parse_module(src).expect("valid program");

        self.evaluator.eval_program(&parsed.program, &mut self.env)
    }

    fn last(&mut self, src: &str) -> Result<Value, EvalError> {
        Ok(self.run(src)?.pop().unwrap_or(NIL))
    }

    fn error(&mut self, src: &str) -> EvalError {
        match self.run(src) {
            Ok(values) => panic!("`{src}` evaluated to {values:?}"),
            Err(err) => err,
        }
    }
}

fn int(value: i64) -> Value {
    Value::Integer { value }
}

fn float(value: f64) -> Value {
    Value::Float { value }
}

fn unit(value: f64, unit: &str) -> Value {
    Value::Unit { value, unit: unit.to_string() }
}

fn string(value: &str) -> Value {
    Value::String { value: value.to_string() }
}

#[test]
fn test_arithmetic() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(
        session.run("1 + 2 * 3; 7 / 2; 2 ^ 10; 10 / 3; -7 % 3; 7.5 % 2")?,
        vec![int(7), float(3.5), int(1024), float(3.33333), int(-1), float(1.5)]
    );

    Ok(())
}

#[test]
fn test_magnitudes_survive_unit_tagging() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(
        session.run("2 in meter; 2.5 in meter; 3 + 2 meter; 2 meter * 1.5; 1 km + 500 m; 4 < 5 meter")?,
        vec![
            unit(2.0, "meter"),
            unit(2.5, "meter"),
            unit(5.0, "meter"),
            unit(3.0, "meter"),
            unit(1500.0, "m"),
            unit(1.0, "meter"),
        ]
    );

    Ok(())
}

#[test]
fn test_normalization() {
    assert_eq!(Value::number(2.0), int(2));
    assert_eq!(Value::number(-0.0), int(0));
    assert_eq!(Value::number(1.234567), float(1.23457));
    assert_eq!(Value::number(1.23457), float(1.23457));
    assert_eq!(Value::number(1e20), float(1e20));
    assert_eq!(Value::number(f64::INFINITY), float(f64::INFINITY));
    assert!(matches!(Value::number(f64::NAN), Value::Float { value } if value.is_nan()));
}

#[test]
fn test_comparisons() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(
        session.run("3 > 2; 2 >= 3; 1 == 1.0; 1 != 1; 2 <= 2; 1 meter < 2 meter")?,
        vec![int(1), int(0), int(1), int(0), int(1), unit(1.0, "meter")]
    );

    Ok(())
}

#[test]
fn test_unit_tagging() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.last("3 + 2 meter")?, unit(5.0, "meter"));
    assert_eq!(session.last("2 meter + 3")?, unit(5.0, "meter"));
    assert_eq!(session.last("1 meter + 1 meter")?, unit(2.0, "meter"));
    assert_eq!(session.last("1 km + 500 m")?, unit(1500.0, "m"));
    assert_eq!(session.last("(1 + 2) hours * 2")?, unit(6.0, "hours"));

    Ok(())
}

#[test]
fn test_conversion() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.last("3 weeks in days")?, unit(21.0, "days"));
    assert_eq!(session.last("100 celsius => fahrenheit")?, unit(212.0, "fahrenheit"));
    assert_eq!(session.last("1 mile in km")?, unit(1.60934, "km"));

    // a plain number is taken to already be in the target unit
    assert_eq!(session.last("5 in meter")?, unit(5.0, "meter"));
    assert_eq!(session.last("5.123456 in meter")?, unit(5.123456, "meter"));

    Ok(())
}

#[test]
fn test_conversion_round_trip() -> Result<(), EvalError> {
    let mut session = Session::new();

    let value = session.last("x = 10 days; (x in weeks) in days")?;

    match value {
        Value::Unit { value, unit } => {
            assert_eq!(unit, "days");
            assert!((value - 10.0).abs() < 1e-4, "{value}");
        },
        other => panic!("expected a unit value, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_conversion_errors() {
    let mut session = Session::new();

    let err = session.error("8 meter in week");
    assert_eq!(err.kind(), "ConversionError");

    assert_eq!(session.error("3 parsec in meter").kind(), "ConversionError");
    assert_eq!(session.error("1 in (2 + 3)").kind(), "ConversionError");
    assert_eq!(session.error("'a' in meter").kind(), "ConversionError");
    assert_eq!(session.error("'a' in 'b'").kind(), "ConversionError");
    assert_eq!(session.error("1 meter + 1 second").kind(), "ConversionError");
}

#[test]
fn test_example_program() {
    let mut session = Session::new();

    let err = session.error("x = 5; y = x + 3 meter; y in week");

    assert_eq!(err.kind(), "ConversionError");
    assert_eq!(session.env.get("x"), Some(&int(5)));
    assert_eq!(session.env.get("y"), Some(&unit(8.0, "meter")));
}

#[test]
fn test_unary_operators() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(
        session.run("!0; !''; !'x'; !5; !0.0; !(1 meter)")?,
        vec![int(1), int(1), int(0), int(0), int(0), int(0)]
    );
    assert_eq!(
        session.run("~2.5; ~-2.5; ~2.4; ~3; -4; -1.5")?,
        vec![int(3), int(-3), int(2), int(3), int(-4), float(-1.5)]
    );

    assert_eq!(session.error("-'a'").kind(), "UnaryOperationError");
    assert_eq!(session.error("-(2 meter)").kind(), "UnaryOperationError");
    assert_eq!(session.error("~'a'").kind(), "RoundingError");

    Ok(())
}

#[test]
fn test_strings() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.last("'foo' + \"bar\"")?, string("foobar"));

    assert_eq!(
        session.error("'a' - 'b'").error,
        EvalErrorType::StringOperation { operator: BinaryOperator::Sub }
    );
    assert_eq!(
        session.error("'a' + 1").error,
        EvalErrorType::BinaryOperation {
            left: ValueType::String,
            operator: BinaryOperator::Add,
            right: ValueType::Integer,
        }
    );

    Ok(())
}

#[test]
fn test_arrays() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(
        session.last("[1, 2 + 3, 'a']")?,
        Value::List { values: vec![int(1), int(5), string("a")] }
    );
    assert_eq!(session.error("[1, 2] + 1").kind(), "BinaryOperationError");

    Ok(())
}

#[test]
fn test_unit_annotation_requires_number() {
    let mut session = Session::new();

    assert_eq!(
        session.error("('a') meter").error,
        EvalErrorType::NotANumber { found: ValueType::String }
    );
}

#[test]
fn test_constants_and_elements() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.last("pi")?, float(std::f64::consts::PI));
    assert_eq!(session.last("c0")?, int(299792458));
    assert_eq!(session.last("Fe")?, float(55.845));
    assert_eq!(session.last("iron")?, float(55.845));
    assert_eq!(session.last("Tc")?, float(98.0));
    assert_eq!(session.last("2 * H")?, float(2.016));

    Ok(())
}

#[test]
fn test_builtins_shadow_definitions() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.run("define print(x) => x * 2")?, vec![NIL]);
    assert_eq!(session.warnings.take(), vec![Warning::ShadowedBuiltin { name: "print".into() }]);

    assert_eq!(session.last("print(3)")?, NIL);
    assert_eq!(session.output.take(), vec!["3".to_string()]);

    assert_eq!(session.run("define twice(x) => x * 2")?, vec![NIL]);
    assert!(session.warnings.take().is_empty());

    Ok(())
}

#[test]
fn test_constants_shadow_assignments() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.last("pi = 3; pi")?, float(std::f64::consts::PI));
    assert_eq!(session.warnings.take(), vec![Warning::ShadowedAssignment { name: "pi".into() }]);

    // call scopes carry no constants
    assert_eq!(session.run("define first(pi) => pi")?, vec![NIL]);
    assert_eq!(session.last("first(3)")?, int(3));

    Ok(())
}

#[test]
fn test_fuzzy_resolution() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.last("speed = 10; distance = 20; distanse")?, int(20));
    assert_eq!(session.last("spede")?, int(10));
    assert_eq!(session.last("completely_unrelated")?, int(10));

    let warnings = session.warnings.take();
    assert_eq!(warnings.len(), 3);
    assert_eq!(warnings[0], Warning::FuzzySubstitution {
        requested: "distanse".into(),
        substituted: "distance".into(),
    });

    Ok(())
}

#[test]
fn test_fuzzy_ties_keep_first_in_order() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.last("ba = 2; ab = 1; zz")?, int(1));

    Ok(())
}

#[test]
fn test_undefined_variable() {
    let mut session = Session::new();

    assert_eq!(
        session.error("foo").error,
        EvalErrorType::UndefinedVariable { name: "foo".into() }
    );

    let mut strict = Session::with_config(EvalConfig {
        fuzzy_resolution: false,
        ..EvalConfig::default()
    });

    assert_eq!(strict.error("x = 1; xx").kind(), "UndefinedVariableError");
    assert!(strict.warnings.take().is_empty());
}

#[test]
fn test_similarity() {
    assert_eq!(similarity("abc", "abc"), 1.0);
    assert_eq!(similarity("", "x"), 0.0);
    assert_eq!(similarity("dist", "distance"), 0.75);
    assert!(similarity("distanse", "distance") > similarity("distanse", "speed"));

    assert_eq!(closest_variable("x", std::iter::empty()), None);
    assert_eq!(closest_variable("spede", ["distance", "speed"].into_iter()), Some("speed"));
}

#[test]
fn test_user_functions() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.run("define add(a, b) => a + b")?, vec![NIL]);
    assert_eq!(session.run("add(3, 4)")?, vec![int(7)]);
    assert_eq!(session.last("add(2 meter, 3)")?, unit(5.0, "meter"));

    // parameters bind by position
    session.run("define sub(a, b) => a - b")?;
    assert_eq!(session.last("a = 1; b = 10; sub(b, a)")?, int(9));

    Ok(())
}

#[test]
fn test_function_body_runs_to_end_of_input() -> Result<(), EvalError> {
    let mut session = Session::new();

    // the call is part of the body, so nothing is returned for it
    assert_eq!(session.run("define add(a, b) => a + b; add(2, 3)")?, vec![NIL]);
    assert_eq!(session.run("add(2, 3)")?, vec![int(5)]);

    Ok(())
}

#[test]
fn test_function_scope_is_isolated() -> Result<(), EvalError> {
    let mut session = Session::new();

    session.run("secret = 1; define peek() => secret")?;

    let err = session.error("peek()");
    assert_eq!(err.error, EvalErrorType::UndefinedVariable { name: "secret".into() });
    assert_eq!(err.trace, vec!["peek".to_string()]);

    // assignments inside a body stay inside the call
    session.run("define set() => secret = 2; secret")?;
    assert_eq!(session.last("set()")?, int(2));
    assert_eq!(session.env.get("secret"), Some(&int(1)));

    Ok(())
}

#[test]
fn test_functions_table_is_shared() -> Result<(), EvalError> {
    let mut session = Session::new();

    session.run("define outer() => define inner() => 42")?;

    assert_eq!(session.last("outer()")?, NIL);
    assert_eq!(session.last("inner()")?, int(42));

    Ok(())
}

#[test]
fn test_call_errors() {
    let mut session = Session::new();

    session.run("define add(a, b) => a + b").expect("definition");

    assert_eq!(
        session.error("add(1)").error,
        EvalErrorType::Arity { function: "add".into(), expected: "2".into(), got: 1 }
    );
    assert_eq!(session.error("nope(1)").kind(), "FunctionNotDefinedError");

    session.run("define empty() =>").expect("definition");
    assert_eq!(session.error("empty()").kind(), "IndexError");
}

#[test]
fn test_recursion_limit() {
    let mut session = Session::with_config(EvalConfig {
        max_call_depth: 16,
        ..EvalConfig::default()
    });

    session.run("define spin(n) => spin(n + 1)").expect("definition");

    let err = session.error("spin(1)");

    assert_eq!(err.error, EvalErrorType::RecursionLimit { name: "spin".into(), limit: 16 });
    assert_eq!(err.trace, vec!["spin".to_string()]);
}

#[test]
fn test_first_error_aborts_program() {
    let mut session = Session::new();

    session.run("x = 1").expect("assignment");

    assert_eq!(session.error("x = 2; y = nope(); x = 3").kind(), "FunctionNotDefinedError");
    assert_eq!(session.env.get("x"), Some(&int(2)));
    assert_eq!(session.env.get("y"), None);
}

#[test]
fn test_print() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(session.run("print(1, 'a', 2 meter, 0.5); print()")?, vec![NIL, NIL]);
    assert_eq!(session.output.take(), vec!["1 a 2 meter 0.5".to_string(), "".to_string()]);

    Ok(())
}

#[test]
fn test_root() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(
        session.run("root(16); root(27, 3); root(-8, 3); root(2); root(16, 4)")?,
        vec![int(4), int(3), int(-2), float(1.41421), int(2)]
    );
    assert_eq!(session.last("root(9 meter)")?, unit(3.0, "meter"));

    assert_eq!(session.error("root(-4)").kind(), "EvaluatorError");
    assert_eq!(session.error("root(4, 0)").kind(), "EvaluatorError");
    assert_eq!(session.error("root('a')").kind(), "EvaluatorError");
    assert_eq!(
        session.error("root()").error,
        EvalErrorType::Arity { function: "root".into(), expected: "1 to 2".into(), got: 0 }
    );

    Ok(())
}

#[test]
fn test_frac() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(
        session.run("frac(0.75); frac(2); frac(1 / 3); frac(-2.5); frac(0.1 meter)")?,
        vec![string("3/4"), string("2"), string("1/3"), string("-5/2"), string("1/10 meter")]
    );

    assert_eq!(approximate_fraction(3.14159, 1_000_000), (355, 113));
    assert_eq!(approximate_fraction(0.0, 1_000_000), (0, 1));
    assert_eq!(session.error("frac('a')").kind(), "EvaluatorError");
    assert!(matches!(session.error("frac(1e30)").error, EvalErrorType::InvalidArgument { .. }));
    assert!(matches!(session.error("frac(-1e19)").error, EvalErrorType::InvalidArgument { .. }));
    assert_eq!(session.error("frac(1, 2)").kind(), "ArityError");

    Ok(())
}

#[test]
fn test_lookup() -> Result<(), EvalError> {
    let mut session = Session::new();

    assert_eq!(
        session.last("lookup('Fe')")?,
        string("Iron (Fe): Z=26, atomic mass 55.845")
    );
    assert_eq!(session.last("lookup('oxygen')")?, session.last("lookup('O')")?);

    assert_eq!(session.error("lookup('Xx')").kind(), "EvaluatorError");
    assert_eq!(session.error("lookup(5)").kind(), "EvaluatorError");

    Ok(())
}

#[test]
fn test_error_display() {
    let mut session = Session::new();

    let err = session.error("8 meter in week");

    assert_eq!(
        format!("{err}"),
        "ConversionError: cannot convert length `meter` to time `week`"
    );
}
