//! Identifiers used to request values from an injector.
//!
//! An identifier is a plain string name, a unique [`Token`], or a type used as
//! its own key. Identifiers are compared as-is; nothing is normalized.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(0);

/// A symbol-like key.
///
/// Every call to [`Token::new`] produces a distinct token, even when the
/// description is the same. Copies of one token compare equal.
#[derive(Clone, Copy)]
pub struct Token {
    id: u64,
    description: &'static str,
}

impl Token {
    pub fn new(description: &'static str) -> Self {
        Self {
            id: NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed),
            description,
        }
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}#{})", self.description, self.id)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.description)
    }
}

/// A type used as its own key. Equality is `TypeId` equality; the name is kept
/// for error messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Full path of the type, e.g. `my_app::services::Database`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, generics included.
    ///
    /// Arrays, slices, tuples and references keep their full name.
    pub fn short_name(&self) -> &'static str {
        if self.name.starts_with(['[', '(', '&']) {
            return self.name;
        }
        let base = self.name.split('<').next().unwrap_or(self.name);
        match base.rfind("::") {
            Some(index) => &self.name[index + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Key under which a provider is registered and looked up.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Name(Cow<'static, str>),
    Token(Token),
    Type(TypeKey),
}

impl Identifier {
    /// Identifier for a type used as its own key.
    pub fn of<T: Any + ?Sized>() -> Self {
        Identifier::Type(TypeKey::of::<T>())
    }

    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Identifier::Name(name.into())
    }
}

impl From<&'static str> for Identifier {
    fn from(name: &'static str) -> Self {
        Identifier::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(Cow::Owned(name))
    }
}

impl From<Token> for Identifier {
    fn from(token: Token) -> Self {
        Identifier::Token(token)
    }
}

impl From<TypeKey> for Identifier {
    fn from(key: TypeKey) -> Self {
        Identifier::Type(key)
    }
}

impl From<&Identifier> for Identifier {
    fn from(identifier: &Identifier) -> Self {
        identifier.clone()
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Name(name) => write!(f, "{:?}", name),
            Identifier::Token(token) => write!(f, "{:?}", token),
            Identifier::Type(key) => write!(f, "{:?}", key),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Name(name) => write!(f, "'{}'", name),
            Identifier::Token(token) => write!(f, "{}", token),
            Identifier::Type(key) => write!(f, "{}", key),
        }
    }
}
