use std::{path::PathBuf, rc::Rc};

use crate::{
    environment::prelude::Value,
    eval::prelude::EvalConfig,
    utils::prelude::{Error, NullWarningEmitterIO, VectorOutputIO, VectorWarningEmitterIO},
};

use super::{parse_file, Interpreter};

fn interpreter() -> (Interpreter, VectorOutputIO) {
    let output = VectorOutputIO::new();

    let interpreter = Interpreter::standard(
        EvalConfig::default(),
        Rc::new(output.clone()),
        Rc::new(NullWarningEmitterIO)
    ).expect("standard units");

    (interpreter, output)
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("numlang-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("writing test input");
    path
}

#[test]
fn test_environment_persists_between_runs() -> Result<(), Error> {
    let (mut interpreter, output) = interpreter();

    assert_eq!(
        interpreter.run_source(PathBuf::from("repl"), "define area(w, h) => w * h")?,
        vec![Value::Nil]
    );
    assert_eq!(
        interpreter.run_source(PathBuf::from("repl"), "side = 3 meter; area(side, 2); print(side)")?,
        vec![Value::Nil, Value::Unit { value: 6.0, unit: "meter".into() }, Value::Nil]
    );

    assert_eq!(interpreter.env().get("side"), Some(&Value::Unit { value: 3.0, unit: "meter".into() }));
    assert_eq!(output.take(), vec!["3 meter".to_string()]);

    Ok(())
}

#[test]
fn test_errors_carry_source() {
    let (mut interpreter, _) = interpreter();

    match interpreter.run_source(PathBuf::from("bad.num"), "1 +") {
        Err(Error::Parse { path, src, .. }) => {
            assert_eq!(path, PathBuf::from("bad.num"));
            assert_eq!(src, "1 +");
        },
        other => panic!("expected a parse error, got {other:?}"),
    }

    match interpreter.run_source(PathBuf::from("bad.num"), "8 meter in week") {
        Err(Error::Eval { error, .. }) => assert_eq!(error.kind(), "ConversionError"),
        other => panic!("expected an evaluation error, got {other:?}"),
    }
}

#[test]
fn test_pretty_errors() {
    let (mut interpreter, _) = interpreter();

    let parse_error = interpreter.run_source(PathBuf::from("bad.num"), "1 + )")
        .expect_err("syntax error");
    let rendered = parse_error.pretty_string();
    assert!(rendered.contains("Syntax error"), "{rendered}");
    assert!(rendered.contains("bad.num"), "{rendered}");

    interpreter.run_source(PathBuf::from("bad.num"), "define f() => nope()")
        .expect("definition");

    let eval_error = interpreter.run_source(PathBuf::from("bad.num"), "f()")
        .expect_err("undefined function");
    let rendered = eval_error.pretty_string();
    assert!(rendered.contains("FunctionNotDefinedError"), "{rendered}");
    assert!(rendered.contains("in function `f`"), "{rendered}");
}

#[test]
fn test_run_file() -> Result<(), Error> {
    let path = temp_file("run.num", "# distances\nx = 2 km;\nx in m\n");
    let (mut interpreter, _) = interpreter();

    let values = interpreter.run_file(path.clone())?;
    std::fs::remove_file(&path).ok();

    assert_eq!(values, vec![Value::Nil, Value::Unit { value: 2000.0, unit: "m".into() }]);

    Ok(())
}

#[test]
fn test_parse_file_keeps_source() {
    let path = temp_file("parse.num", "[1, 2");

    let result = parse_file(path.clone());
    std::fs::remove_file(&path).ok();

    match result {
        Err(Error::Parse { src, .. }) => assert_eq!(src, "[1, 2"),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    let result = parse_file(PathBuf::from("/definitely/not/here.num"));

    assert_eq!(result.err(), Some(Error::StdIo { err: std::io::ErrorKind::NotFound }));
}

#[test]
fn test_fuzzy_warnings_reach_the_emitter() -> Result<(), Error> {
    let warnings = VectorWarningEmitterIO::new();

    let mut interpreter = Interpreter::standard(
        EvalConfig::default(),
        Rc::new(VectorOutputIO::new()),
        Rc::new(warnings.clone())
    )?;

    interpreter.run_source(PathBuf::from("repl"), "width = 4; widht")?;
    assert_eq!(interpreter.evaluator().warnings().count(), 1);

    let warnings = warnings.take();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].pretty_string().contains("`widht` is not defined"));

    Ok(())
}
