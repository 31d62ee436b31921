//! 类型分类表
//!
//! Primitive, wrapper and container types are plain membership lookups.
//! Anything that is none of these is treated as a reference to another bean.

use crate::model::{ArgKind, CollectionKind};

/// Java primitive keywords
pub const PRIMITIVES: &[&str] = &[
    "byte", "short", "char", "int", "long", "float", "double", "boolean",
];

/// java.lang wrapper classes (String included)
pub const WRAPPERS: &[&str] = &[
    "Byte", "Short", "Character", "Integer", "Long", "Float", "Double", "Boolean", "String",
];

/// java.util containers and the Spring element each one maps to
const CONTAINERS: &[(&str, CollectionKind)] = &[
    ("List", CollectionKind::List),
    ("Set", CollectionKind::Set),
    ("Map", CollectionKind::Map),
    ("Properties", CollectionKind::Props),
];

/// Suffixes Java allows on numeric literals (`5L`, `1.5f`, `2d`)
const NUMERIC_SUFFIXES: &[char] = &['d', 'D', 'f', 'F', 'l', 'L'];

pub fn is_primitive(ty: &str) -> bool {
    PRIMITIVES.contains(&ty)
}

pub fn is_wrapper(ty: &str) -> bool {
    WRAPPERS.contains(&ty)
}

/// Primitive or wrapper: rendered as an inline value rather than a reference
pub fn is_scalar(ty: &str) -> bool {
    is_primitive(ty) || is_wrapper(ty)
}

/// Container kind for `List`, `java.util.List`, ...
pub fn collection_kind(ty: &str) -> Option<CollectionKind> {
    let simple = ty.strip_prefix("java.util.").unwrap_or(ty);
    CONTAINERS
        .iter()
        .find(|(name, _)| *name == simple)
        .map(|(_, kind)| *kind)
}

/// Constructor parameters know no containers: a `List` argument is a reference.
pub fn arg_kind(ty: &str) -> ArgKind {
    if is_primitive(ty) {
        ArgKind::Primitive
    } else if is_wrapper(ty) {
        ArgKind::Wrapper
    } else {
        ArgKind::Reference
    }
}

/// Normalize a field initializer into an attribute value.
///
/// - surrounding whitespace is trimmed
/// - `"text"` and `'c'` lose their quote pair
/// - then a single trailing `d`/`D`/`f`/`F`/`l`/`L` is dropped
///
/// The suffix rule looks at the last character only, so `"abcd"` becomes
/// `abc` and `0xFF` becomes `0xF`.
pub fn normalize_literal(raw: &str) -> String {
    let mut literal = raw.trim();

    for quote in ['"', '\''] {
        if literal.len() >= 2 && literal.starts_with(quote) && literal.ends_with(quote) {
            literal = &literal[1..literal.len() - 1];
            break;
        }
    }

    literal.strip_suffix(NUMERIC_SUFFIXES).unwrap_or(literal).to_string()
}
