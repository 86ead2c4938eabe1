// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Class-like types: named, nominal, optionally constructible from a raw value.
//!
//! A class may extend one parent and implement any number of interfaces. An instance
//! "is an instance of" every name along that graph. Coercion is a capability: only a
//! class that was given a [`ConstructibleFrom`] implementation can build an instance
//! out of a raw value. Interfaces never can.

use std::fmt;
use std::sync::Arc;

use crate::error::ConstructError;
use crate::value::{Fields, Instance, Value};

/// Single-argument construction from a raw value.
///
/// Implemented for any `Fn(&Value) -> Result<Fields, ConstructError>`, so a
/// closure is the usual way to give a class this capability.
pub trait ConstructibleFrom: Send + Sync {
    fn construct_from(&self, raw: &Value) -> Result<Fields, ConstructError>;
}

impl<F> ConstructibleFrom for F
where
    F: Fn(&Value) -> Result<Fields, ConstructError> + Send + Sync,
{
    fn construct_from(&self, raw: &Value) -> Result<Fields, ConstructError> {
        self(raw)
    }
}

/// Custom string conversion for instances of a class.
pub type DisplayFn = Box<dyn Fn(&Instance) -> String + Send + Sync>;

/// Declaration of a class-like type.
pub struct ClassDef {
    name: String,
    parent: Option<Arc<ClassDef>>,
    interfaces: Vec<Arc<ClassDef>>,
    is_interface: bool,
    constructor: Option<Box<dyn ConstructibleFrom>>,
    display: Option<DisplayFn>,
}

impl ClassDef {
    /// A concrete class with no parent, no constructor and no display hook.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            interfaces: Vec::new(),
            is_interface: false,
            constructor: None,
            display: None,
        }
    }

    /// An interface. Instances come only from implementing classes.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::new(name)
        }
    }

    pub fn extends(mut self, parent: &Arc<ClassDef>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    pub fn implements(mut self, interface: &Arc<ClassDef>) -> Self {
        self.interfaces.push(Arc::clone(interface));
        self
    }

    pub fn constructor(mut self, ctor: impl ConstructibleFrom + 'static) -> Self {
        self.constructor = Some(Box::new(ctor));
        self
    }

    pub fn display(mut self, hook: impl Fn(&Instance) -> String + Send + Sync + 'static) -> Self {
        self.display = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ClassDef>> {
        self.parent.as_ref()
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    /// Whether a raw value can be coerced into this class at all.
    pub fn is_constructible(&self) -> bool {
        !self.is_interface && self.constructor.is_some()
    }

    /// True if `name` is this class, an ancestor, or an implemented interface.
    pub fn is_subtype_of(&self, name: &str) -> bool {
        self.name == name
            || self.parent.as_ref().is_some_and(|p| p.is_subtype_of(name))
            || self.interfaces.iter().any(|i| i.is_subtype_of(name))
    }

    /// Run the single-argument constructor on `raw`.
    pub fn construct(self: &Arc<Self>, raw: &Value) -> Result<Instance, ConstructError> {
        match (&self.constructor, self.is_interface) {
            (Some(ctor), false) => {
                let fields = ctor.construct_from(raw)?;
                Ok(Instance::new(self, fields))
            }
            (_, true) => Err(ConstructError::new(format!(
                "cannot instantiate interface {}",
                self.name
            ))),
            (None, false) => Err(ConstructError::new(format!(
                "{} has no single-argument constructor",
                self.name
            ))),
        }
    }

    /// Render an instance through the nearest display hook up the parent chain.
    pub(crate) fn render(&self, instance: &Instance) -> Option<String> {
        match &self.display {
            Some(hook) => Some(hook(instance)),
            None => self.parent.as_ref().and_then(|p| p.render(instance)),
        }
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field(
                "interfaces",
                &self.interfaces.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field("is_interface", &self.is_interface)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}
