use std::fmt;

/// Reserved erasure name for array shapes, which have no class of their own.
pub(crate) const ARRAY_ERASURE: &str = "[]";

/// An opaque, structurally-comparable identifier for a native data type.
///
/// Keys carry generic parameterization, so `list<Foo>` and `list<Bar>` are distinct cache
/// keys even though both erase to the `list` class. Equality and hashing are structural and
/// independent of object identity, which makes the key usable as a concurrent-map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// A (possibly parameterized) class key.
    Class {
        /// The erased class name, as declared by the host application.
        name: String,
        /// Generic arguments; empty for raw classes.
        args: Vec<TypeKey>,
    },
    /// A native array shape over an element key.
    Array(Box<TypeKey>),
}

impl TypeKey {
    /// Creates a raw (unparameterized) class key.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        TypeKey::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a parameterized class key, e.g. `list<Foo>` or `map<string, Bar>`.
    #[must_use]
    pub fn parameterized(name: impl Into<String>, args: Vec<TypeKey>) -> Self {
        TypeKey::Class {
            name: name.into(),
            args,
        }
    }

    /// Creates an array key over the given element key.
    #[must_use]
    pub fn array(element: TypeKey) -> Self {
        TypeKey::Array(Box::new(element))
    }

    /// The erased class name used for hierarchy-distance computation.
    ///
    /// Arrays erase to the reserved `"[]"` name; they never participate in the
    /// class-distance search.
    #[must_use]
    pub fn erasure(&self) -> &str {
        match self {
            TypeKey::Class { name, .. } => name,
            TypeKey::Array(_) => ARRAY_ERASURE,
        }
    }

    /// Generic arguments of this key; empty for raw classes and arrays.
    #[must_use]
    pub fn args(&self) -> &[TypeKey] {
        match self {
            TypeKey::Class { args, .. } => args,
            TypeKey::Array(_) => &[],
        }
    }

    /// The generic argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&TypeKey> {
        self.args().get(index)
    }

    /// The element key of an array shape.
    #[must_use]
    pub fn element(&self) -> Option<&TypeKey> {
        match self {
            TypeKey::Array(element) => Some(element),
            TypeKey::Class { .. } => None,
        }
    }

    /// Returns `true` if this key describes an array shape.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, TypeKey::Array(_))
    }

    /// Returns `true` if this key carries generic arguments.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        !self.args().is_empty()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Class { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeKey::Array(element) => write!(f, "{element}[]"),
        }
    }
}
