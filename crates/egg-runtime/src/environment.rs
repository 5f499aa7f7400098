//! Chained lexical environments
//!
//! Each frame owns its bindings and holds a shared reference to its parent.
//! The parent is fixed when the frame is created, so the chain is acyclic.
//! Closures keep their defining frame alive through the same `Rc`.

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Shared handle to an environment frame
pub type Env = Rc<Environment>;

/// Outcome of [`Environment::set`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SetResult {
    Success,
    Undeclared,
}

/// One scope frame
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Env>,
}

impl Environment {
    /// Create a frame with no parent
    pub fn root() -> Env {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Create a new empty frame whose parent is `parent`
    pub fn child(parent: &Env) -> Env {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Return the value bound to `name` in this frame or the nearest
    /// enclosing frame that binds it.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.bindings.borrow().get(name) {
                return Some(value.clone());
            }
            frame = frame.parent.as_deref()?;
        }
    }

    /// Bind `name` in this frame only, overwriting an existing binding here.
    /// Parent frames are never touched.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Overwrite `name` in the nearest frame (starting here) that already
    /// binds it. The existence check is by name; if no frame binds it the
    /// chain is left unchanged and `Undeclared` is returned.
    pub fn set(&self, name: &str, value: Value) -> SetResult {
        let mut frame = self;
        loop {
            if let Some(slot) = frame.bindings.borrow_mut().get_mut(name) {
                *slot = value;
                return SetResult::Success;
            }
            match frame.parent.as_deref() {
                Some(parent) => frame = parent,
                None => return SetResult::Undeclared,
            }
        }
    }

    /// Whether any frame in the chain, starting here, binds `name`
    pub fn is_bound(&self, name: &str) -> bool {
        let mut frame = self;
        loop {
            if frame.has_own(name) {
                return true;
            }
            match frame.parent.as_deref() {
                Some(parent) => frame = parent,
                None => return false,
            }
        }
    }

    /// Whether this frame itself binds `name`
    pub fn has_own(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Names bound in this frame, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of frames from here to the root, counting this one
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = self;
        while let Some(parent) = frame.parent.as_deref() {
            depth += 1;
            frame = parent;
        }
        depth
    }
}

impl fmt::Debug for Environment {
    // Bindings can hold closures that point back at this frame, so only
    // names are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("depth", &self.depth())
            .finish()
    }
}
