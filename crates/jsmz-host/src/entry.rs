//! Replaceable host entry points.

use std::rc::Rc;
use tracing::debug;

/// One slot of the host API table.
///
/// Overrides are installed with [`EntryPoint::wrap`], which hands the current
/// function to the wrapper so it can fall back to it. Every wrap bumps the
/// depth, which makes double installation observable.
pub struct EntryPoint<F: ?Sized> {
    name: &'static str,
    current: Rc<F>,
    original: Rc<F>,
    /// Function captured by the most recent wrap
    previous: Option<Rc<F>>,
    depth: u32,
}

impl<F: ?Sized> EntryPoint<F> {
    pub fn new(name: &'static str, function: Rc<F>) -> EntryPoint<F> {
        EntryPoint {
            name,
            original: Rc::clone(&function),
            current: function,
            previous: None,
            depth: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The function currently installed.
    #[inline]
    pub fn current(&self) -> &F {
        &self.current
    }

    /// The host default, before any wrapping.
    pub fn original(&self) -> &Rc<F> {
        &self.original
    }

    pub fn previous(&self) -> Option<&Rc<F>> {
        self.previous.as_ref()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn wrap(&mut self, wrapper: impl FnOnce(Rc<F>) -> Rc<F>) {
        let previous = Rc::clone(&self.current);
        self.current = wrapper(Rc::clone(&previous));
        self.previous = Some(previous);
        self.depth += 1;
        debug!(entry = self.name, depth = self.depth, "wrapped host entry point");
    }
}
