//! Typed property references and the ordered property-name set.
//!
//! Query beans declare one [`Property`] per persistent attribute. Partial
//! fetches reduce a list of those references to a [`PropertySet`] before
//! handing it to the root query.

use std::borrow::Cow;
use std::fmt;

/// Anything that names a single persistent property
pub trait PropertyRef {
    /// The property name as understood by the query engine
    fn property_name(&self) -> &str;
}

/// A typed query-bean property
///
/// # Example
///
/// ```
/// use typequery::{Property, PropertyRef};
///
/// const FIRST_NAME: Property = Property::new("firstName");
/// assert_eq!(FIRST_NAME.property_name(), "firstName");
///
/// let nested = Property::with_prefix(Some("contacts"), "email");
/// assert_eq!(nested.property_name(), "contacts.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    name: Cow<'static, str>,
}

impl Property {
    /// Declare a property by its static name
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Declare a property below a path prefix
    pub fn with_prefix(prefix: Option<&str>, name: &str) -> Self {
        Self {
            name: Cow::Owned(crate::path::add(prefix, name)),
        }
    }
}

impl PropertyRef for Property {
    fn property_name(&self) -> &str {
        &self.name
    }
}

impl<P: PropertyRef + ?Sized> PropertyRef for &P {
    fn property_name(&self) -> &str {
        (**self).property_name()
    }
}

/// Insertion-ordered set of property names without duplicates
///
/// Built transiently for a single partial-fetch call. Property lists are
/// short, so membership is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    names: Vec<String>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect property names, keeping first-seen order
    pub fn from_properties(props: &[&dyn PropertyRef]) -> Self {
        let mut set = Self::new();
        for prop in props {
            set.insert(prop.property_name());
        }
        set
    }

    /// Parse a comma and/or whitespace delimited property list
    ///
    /// ```
    /// use typequery::PropertySet;
    ///
    /// let set = PropertySet::parse("name, email  phone,name");
    /// assert_eq!(set.to_string(), "name, email, phone");
    /// ```
    pub fn parse(properties: &str) -> Self {
        let mut set = Self::new();
        for token in properties.split(|c: char| c == ',' || c.is_whitespace()) {
            if !token.is_empty() {
                set.insert(token);
            }
        }
        set
    }

    /// Add a name; returns `false` when it was already present
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
