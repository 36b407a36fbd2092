use std::{rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use super::diagnostic::{Diagnostic, Level};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    pub fn pop(&self) -> Option<Warning> {
        let mut warnings = self.write_lock();
        warnings.pop()
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

#[derive(Clone)]
pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    /// Number of warnings emitted so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// An unknown identifier was replaced by the closest bound variable.
    FuzzySubstitution {
        requested: String,
        substituted: String,
    },
    /// A variable was assigned under a name that resolves to a constant or
    /// an element first, so reading it back yields something else.
    ShadowedAssignment {
        name: String,
    },
    /// A user function was defined under a builtin name. Calls keep going
    /// to the builtin.
    ShadowedBuiltin {
        name: String,
    },
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("error pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::FuzzySubstitution { requested, substituted } => Diagnostic {
                title: "Unknown identifier substituted".into(),
                text: format!("`{requested}` is not defined, using the closest variable `{substituted}` instead."),
                notes: vec!["disable fuzzy resolution to report unknown identifiers as errors".into()],
                level: Level::Warning,
                location: None,
            },
            Warning::ShadowedAssignment { name } => Diagnostic {
                title: "Assignment is shadowed".into(),
                text: format!("`{name}` names a constant or an element, reading it will not return the assigned value."),
                notes: vec![],
                level: Level::Warning,
                location: None,
            },
            Warning::ShadowedBuiltin { name } => Diagnostic {
                title: "Definition is shadowed".into(),
                text: format!("`{name}` is a builtin function, calls to `{name}` will not reach this definition."),
                notes: vec![],
                level: Level::Warning,
                location: None,
            },
        }
    }
}
