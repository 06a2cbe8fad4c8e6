//! Classification nodes and the builtin roots of the class forest.
//!
//! An [`ErrorClass`] is a cheap `Copy` handle onto an immutable node. Nodes are
//! allocated once and live for the rest of the process, so handles can be
//! stored in statics and compared from any thread without locking.
//!
//! # Examples
//!
//! ```
//! use fault_rail::{ClassFlags, ErrorClass, HIERARCHICAL_ERROR};
//!
//! let fruit = ErrorClass::new(None, "fruit");
//! let apple = fruit.subclass("apple");
//!
//! assert!(apple.is(fruit));
//! assert!(apple.is(HIERARCHICAL_ERROR));
//! assert!(!fruit.is(apple));
//! assert!(apple.flags().contains(ClassFlags::CAPTURE_STACK));
//! ```
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};

use bitflags::bitflags;

use crate::types::Fault;

bitflags! {
    /// Behaviour switches carried by an [`ErrorClass`].
    ///
    /// Flags are resolved once when the class is built and never recomputed
    /// from the parent afterwards.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ClassFlags: u64 {
        /// Emit a log line (message plus stack) whenever an error of this class is created.
        const LOG_ON_CREATION = 1 << 0;
        /// Capture a bounded stack snapshot into every error of this class.
        const CAPTURE_STACK = 1 << 1;
    }
}

/// Ids below this value are reserved for builtin classes.
const FIRST_DYNAMIC_ID: u32 = 1024;

static NEXT_ID: AtomicU32 = AtomicU32::new(FIRST_DYNAMIC_ID);

#[derive(Debug)]
pub(crate) struct ClassNode {
    id: u32,
    parent: Option<&'static ClassNode>,
    name: Cow<'static, str>,
    flags: ClassFlags,
}

impl ClassNode {
    pub(crate) const fn builtin(
        id: u32,
        parent: Option<&'static ClassNode>,
        name: &'static str,
        flags: ClassFlags,
    ) -> Self {
        Self { id, parent, name: Cow::Borrowed(name), flags }
    }
}

/// Declares a builtin class backed by a static node with a fixed id.
macro_rules! builtin_class {
    ($(#[$meta:meta])* $class:ident, $node:ident, $id:literal, $parent:expr, $name:literal, $flags:expr) => {
        pub(crate) static $node: $crate::types::error_class::ClassNode =
            $crate::types::error_class::ClassNode::builtin($id, $parent, $name, $flags);

        $(#[$meta])*
        pub static $class: $crate::types::ErrorClass =
            $crate::types::ErrorClass::from_node(&$node);
    };
}
pub(crate) use builtin_class;

builtin_class!(
    /// Root for opaque platform-originated failures. Carries no flags.
    SYSTEM_ERROR, SYSTEM_NODE, 0, None, "System Error", ClassFlags::empty()
);

builtin_class!(
    /// Root for application faults. Captures a stack for every error.
    ///
    /// Classes built with a `None` parent descend from this root.
    HIERARCHICAL_ERROR, HIERARCHICAL_NODE, 1, None, "Error", ClassFlags::CAPTURE_STACK
);

builtin_class!(
    /// Marks functionality that is declared but not implemented yet. Logs on creation.
    NOT_IMPLEMENTED_ERROR,
    NOT_IMPLEMENTED_NODE,
    2,
    Some(&HIERARCHICAL_NODE),
    "Not Implemented Error",
    ClassFlags::CAPTURE_STACK.union(ClassFlags::LOG_ON_CREATION)
);

builtin_class!(
    /// Misuse of an API by its caller. Logs on creation.
    PROGRAMMER_ERROR,
    PROGRAMMER_NODE,
    3,
    Some(&HIERARCHICAL_NODE),
    "Programmer Error",
    ClassFlags::CAPTURE_STACK.union(ClassFlags::LOG_ON_CREATION)
);

/// Handle onto a node of the classification forest.
///
/// Identity is by node, never by name: two classes created with the same name
/// are distinct and neither [`is`](ErrorClass::is) the other.
#[derive(Clone, Copy)]
pub struct ErrorClass(&'static ClassNode);

impl ErrorClass {
    pub(crate) const fn from_node(node: &'static ClassNode) -> Self {
        Self(node)
    }

    fn alloc(parent: ErrorClass, name: Cow<'static, str>, flags: ClassFlags) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let node = Box::leak(Box::new(ClassNode { id, parent: Some(parent.0), name, flags }));
        Self(node)
    }

    /// Creates a class that inherits its parent's flags unchanged.
    ///
    /// A `None` parent means [`HIERARCHICAL_ERROR`].
    pub fn new<N>(parent: Option<ErrorClass>, name: N) -> Self
    where
        N: Into<Cow<'static, str>>,
    {
        let parent = parent.unwrap_or(HIERARCHICAL_ERROR);
        Self::alloc(parent, name.into(), parent.flags())
    }

    /// Creates a class with the parent's flags plus `add`.
    pub fn new_with<N>(parent: Option<ErrorClass>, name: N, add: ClassFlags) -> Self
    where
        N: Into<Cow<'static, str>>,
    {
        let parent = parent.unwrap_or(HIERARCHICAL_ERROR);
        Self::alloc(parent, name.into(), parent.flags() | add)
    }

    /// Creates a class with the parent's flags minus `remove`.
    pub fn new_without<N>(parent: Option<ErrorClass>, name: N, remove: ClassFlags) -> Self
    where
        N: Into<Cow<'static, str>>,
    {
        let parent = parent.unwrap_or(HIERARCHICAL_ERROR);
        Self::alloc(parent, name.into(), parent.flags().difference(remove))
    }

    /// Creates a class whose flags are exactly `flags`, ignoring the parent's.
    ///
    /// # Examples
    ///
    /// ```
    /// use fault_rail::{ClassFlags, ErrorClass, HIERARCHICAL_ERROR};
    ///
    /// let quiet = ErrorClass::new_specified(None, "quiet", ClassFlags::empty());
    /// assert!(quiet.is(HIERARCHICAL_ERROR));
    /// assert!(quiet.flags().is_empty());
    /// ```
    pub fn new_specified<N>(parent: Option<ErrorClass>, name: N, flags: ClassFlags) -> Self
    where
        N: Into<Cow<'static, str>>,
    {
        Self::alloc(parent.unwrap_or(HIERARCHICAL_ERROR), name.into(), flags)
    }

    /// Shorthand for `ErrorClass::new(Some(self), name)`.
    pub fn subclass<N>(self, name: N) -> Self
    where
        N: Into<Cow<'static, str>>,
    {
        Self::new(Some(self), name)
    }

    /// Returns the parent class, or `None` for a root.
    #[inline]
    pub fn parent(self) -> Option<ErrorClass> {
        self.0.parent.map(ErrorClass)
    }

    #[inline]
    pub fn name(self) -> &'static str {
        let node: &'static ClassNode = self.0;
        &node.name
    }

    #[inline]
    pub fn flags(self) -> ClassFlags {
        self.0.flags
    }

    /// Stable numeric identity of this class.
    #[inline]
    pub fn id(self) -> u32 {
        self.0.id
    }

    /// Iterates from this class up to its root, starting with `self`.
    pub fn ancestors(self) -> impl Iterator<Item = ErrorClass> {
        std::iter::successors(Some(self), |class| class.parent())
    }

    /// Returns `true` if `ancestor` is this class or appears on its parent chain.
    pub fn is(self, ancestor: ErrorClass) -> bool {
        self.ancestors().any(|class| class == ancestor)
    }

    /// Classifies `err` and tests whether the result [`is`](ErrorClass::is) this class.
    pub fn contains(self, err: &(dyn StdError + 'static)) -> bool {
        crate::types::get_class(err).is(self)
    }

    /// Like [`contains`](ErrorClass::contains) for any raised [`Fault`].
    pub fn contains_fault(self, fault: &Fault) -> bool {
        fault.class().is(self)
    }
}

impl PartialEq for ErrorClass {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for ErrorClass {}

impl Hash for ErrorClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorClass")
            .field("id", &self.0.id)
            .field("name", &self.name())
            .field("flags", &self.0.flags)
            .finish()
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
