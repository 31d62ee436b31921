//! Bean 提取器
//!
//! Turns the raw text of one Java source file into a [`BeanDescriptor`].
//!
//! This is pattern matching, not parsing. Comments are not stripped, nested
//! classes are not recognized, array types and `public int a, b;` declarations
//! are not matched. A construct the patterns cannot see simply produces nothing.

pub mod types;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::model::{BeanDescriptor, ConstructorArg, PropertyEntry, PropertyKind};

// ============================================================================
// 静态正则
// ============================================================================

// `\w` and `\s` are ASCII-only here, as in `java.util.regex`: `Café` is
// captured as `Caf` and `Ünit` is no identifier at all.

/// Leading `package a.b.c;` (only at the very start of the file)
static PACKAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A(?-u:\s)*package(?-u:\s)+(.*?)(?-u:\s)*;").unwrap()
});

/// First `public class Name`
static CLASS_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"public(?-u:\s)+class(?-u:\s)+((?-u:\w)+)").unwrap()
});

/// `Type name` pairs inside a parameter list
static PARAMETER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z_0-9<>.]+)(?-u:\s)+((?-u:\w)+)").unwrap()
});

/// `public <ret> setFoo(Type name)`, exactly one parameter
static SETTER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"public(?-u:\s)+(?-u:\w)+(?-u:\s)+set((?-u:\w)+)(?-u:\s)*\((?-u:\s)*([a-zA-Z_0-9.]+)(?-u:\s)+(?-u:\w)+(?-u:\s)*\)",
    )
    .unwrap()
});

/// `public Type name;` or `public Type name = init;`
static PUBLIC_FIELD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)public(?-u:\s)+([a-zA-Z_0-9.]+)(?-u:\s)+((?-u:\w)+)((?-u:\s)*=(?-u:\s)*(.*?))?;").unwrap()
});

/// Any character but a Java line terminator (`.` without dot-all)
const NOT_LINE_TERMINATOR: &str = r"[^\n\r\u{85}\u{2028}\u{2029}]";

/// Lower-case the first character (ASCII only), e.g. `AnObject` -> `anObject`
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(name.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Build the bean for one source file.
///
/// Returns `None` when the text has no `public class <Name>`.
pub fn extract_bean(source: &str) -> Option<BeanDescriptor> {
    let class_name = CLASS_NAME_REGEX.captures(source)?.get(1)?.as_str();

    let package = PACKAGE_REGEX
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    let qualified = match package {
        Some(pkg) => format!("{pkg}.{class_name}"),
        None => class_name.to_string(),
    };

    let mut properties = extract_field_properties(source);
    properties.extend(extract_setter_properties(source));

    let bean = BeanDescriptor {
        id: lower_first(class_name),
        class_name: qualified,
        constructor_args: extract_constructor_args(source, class_name),
        properties,
    };

    trace!(
        bean = %bean.id,
        args = bean.constructor_args.len(),
        properties = bean.properties.len(),
        "extracted bean"
    );
    Some(bean)
}

/// Constructor arguments of the single non-default constructor, if there is one.
pub fn extract_constructor_args(source: &str, class_name: &str) -> Vec<ConstructorArg> {
    let pattern = format!(
        r"public(?-u:\s)+{}(?-u:\s)*\((?-u:\s)*({NOT_LINE_TERMINATOR}*?)(?-u:\s)*\)",
        regex::escape(class_name)
    );
    let Ok(constructor_regex) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut constructors = Vec::new();
    for caps in constructor_regex.captures_iter(source) {
        let params = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if params.is_empty() {
            // 有默认构造器，忽略其他构造器
            return Vec::new();
        }
        constructors.push(params);
    }

    let [params] = constructors.as_slice() else {
        return Vec::new();
    };

    PARAMETER_REGEX
        .captures_iter(params)
        .enumerate()
        .map(|(index, caps)| {
            let declared_type = caps[1].to_string();
            ConstructorArg {
                index,
                kind: types::arg_kind(&declared_type),
                declared_type,
                inline_value: String::new(),
            }
        })
        .collect()
}

/// Properties from public field declarations, in file order
pub fn extract_field_properties(source: &str) -> Vec<PropertyEntry> {
    PUBLIC_FIELD_REGEX
        .captures_iter(source)
        .map(|caps| {
            let initializer = caps.get(4).map(|m| types::normalize_literal(m.as_str()));
            PropertyEntry {
                name: caps[2].to_string(),
                kind: property_kind(&caps[1], initializer.unwrap_or_default()),
            }
        })
        .collect()
}

/// Properties from public single-argument setters, in file order
pub fn extract_setter_properties(source: &str) -> Vec<PropertyEntry> {
    SETTER_REGEX
        .captures_iter(source)
        .map(|caps| PropertyEntry {
            name: lower_first(&caps[1]),
            // setter 没有默认值
            kind: property_kind(&caps[2], String::new()),
        })
        .collect()
}

fn property_kind(ty: &str, scalar_value: String) -> PropertyKind {
    if types::is_scalar(ty) {
        PropertyKind::Scalar { value: scalar_value }
    } else if let Some(collection) = types::collection_kind(ty) {
        PropertyKind::Collection { collection }
    } else {
        PropertyKind::Reference { bean: lower_first(ty) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArgKind, CollectionKind};
    use proptest::prelude::*;

    fn scalar(name: &str, value: &str) -> PropertyEntry {
        PropertyEntry {
            name: name.to_string(),
            kind: PropertyKind::Scalar { value: value.to_string() },
        }
    }

    fn reference(name: &str, bean: &str) -> PropertyEntry {
        PropertyEntry {
            name: name.to_string(),
            kind: PropertyKind::Reference { bean: bean.to_string() },
        }
    }

    fn collection(name: &str, collection: CollectionKind) -> PropertyEntry {
        PropertyEntry {
            name: name.to_string(),
            kind: PropertyKind::Collection { collection },
        }
    }

    // ========================================================================
    // Class & package
    // ========================================================================

    #[test]
    fn test_no_public_class() {
        assert!(extract_bean("class Hidden {}").is_none());
        assert!(extract_bean("public interface Api {}").is_none());
        assert!(extract_bean("").is_none());
    }

    #[test]
    fn test_default_package() {
        let bean = extract_bean("public class Clazz{}").unwrap();
        assert_eq!(bean.id, "clazz");
        assert_eq!(bean.class_name, "Clazz");
        assert!(bean.properties.is_empty());
        assert!(bean.constructor_args.is_empty());
    }

    #[test]
    fn test_package() {
        let bean = extract_bean("package com.example; public class Clazz{}").unwrap();
        assert_eq!(bean.id, "clazz");
        assert_eq!(bean.class_name, "com.example.Clazz");
    }

    #[test]
    fn test_package_must_lead() {
        let src = "// header\npackage com.example;\npublic class Clazz{}";
        let bean = extract_bean(src).unwrap();
        assert_eq!(bean.class_name, "Clazz");

        let src = "\n\n  package com.example ;\npublic class Clazz{}";
        assert_eq!(extract_bean(src).unwrap().class_name, "com.example.Clazz");
    }

    #[test]
    fn test_identifiers_are_ascii_only() {
        assert!(extract_bean("public class Ünit {}").is_none());

        let bean = extract_bean("public class Café { public Café(int a){} }").unwrap();
        assert_eq!(bean.id, "caf");
        assert_eq!(bean.class_name, "Caf");
        assert!(bean.constructor_args.is_empty());

        // U+00A0 is not Java whitespace
        assert!(extract_bean("public\u{a0}class Clazz {}").is_none());
    }

    #[test]
    fn test_constructor_params_stay_on_one_line() {
        let bean = extract_bean("public class Clazz{ public Clazz(int a,\r\n String b){} }").unwrap();
        assert!(bean.constructor_args.is_empty());
    }

    #[test]
    fn test_first_public_class_wins() {
        let bean = extract_bean("public class First{} public class Second{}").unwrap();
        assert_eq!(bean.id, "first");
    }

    // ========================================================================
    // Fields
    // ========================================================================

    #[test]
    fn test_public_field() {
        let src = "public class Clazz{ private int hidden; public byte b; public byte bv = 5; public AnObject obj;}";
        let bean = extract_bean(src).unwrap();
        assert_eq!(
            bean.properties,
            vec![scalar("b", ""), scalar("bv", "5"), reference("obj", "anObject")]
        );
    }

    #[test]
    fn test_field_initializer_normalization() {
        let src = r#"public class Clazz{
            public String name = "bob";
            public char c = 'x';
            public long big = 10L;
            public float ratio = 1.5f;
            public double d =   2.0D ;
        }"#;
        let bean = extract_bean(src).unwrap();
        assert_eq!(
            bean.properties,
            vec![
                scalar("name", "bob"),
                scalar("c", "x"),
                scalar("big", "10"),
                scalar("ratio", "1.5"),
                scalar("d", "2.0"),
            ]
        );
    }

    #[test]
    fn test_field_initializer_drops_any_trailing_suffix_letter() {
        let src = r#"public class Clazz{ public String ref = someField; public int mask = 0xFF; public String word = "abcd"; }"#;
        let bean = extract_bean(src).unwrap();
        assert_eq!(
            bean.properties,
            vec![scalar("ref", "someFiel"), scalar("mask", "0xF"), scalar("word", "abc")]
        );
    }

    #[test]
    fn test_multi_field_declaration_is_not_matched() {
        let bean = extract_bean("public class Clazz{ public int a, b; }").unwrap();
        assert!(bean.properties.is_empty());
    }

    #[test]
    fn test_static_final_is_not_a_property() {
        let bean = extract_bean("public class Clazz{ public static final int MAX = 3; }").unwrap();
        assert!(bean.properties.is_empty());
    }

    // ========================================================================
    // Setters
    // ========================================================================

    #[test]
    fn test_setter() {
        let src = "public class Clazz{ private int hidden; private void setHidden(String hidden){} public void setTooManyParams(String too, String many){} public void setFoo(int f){} public void setBar(AnObject b){}}";
        let bean = extract_bean(src).unwrap();
        assert_eq!(bean.properties, vec![scalar("foo", ""), reference("bar", "anObject")]);
    }

    #[test]
    fn test_fields_before_setters_without_dedup() {
        let src = "public class Clazz{ public void setName(String n){} public String name = \"x\"; }";
        let bean = extract_bean(src).unwrap();
        assert_eq!(bean.properties, vec![scalar("name", "x"), scalar("name", "")]);
    }

    #[test]
    fn test_collection_properties() {
        let cases = [
            ("public class Clazz{ public List list1; public void setList2(java.util.List list2){} }", "list", CollectionKind::List),
            ("public class Clazz{ public java.util.Set set1; public void setSet2(Set set2){} }", "set", CollectionKind::Set),
            ("public class Clazz{ public Map map1; public void setMap2(java.util.Map map2){} }", "map", CollectionKind::Map),
            ("public class Clazz{ public Properties prop1; public void setProp2(java.util.Properties prop2){} }", "prop", CollectionKind::Props),
        ];

        for (src, prefix, kind) in cases {
            let bean = extract_bean(src).unwrap();
            assert_eq!(
                bean.properties,
                vec![
                    collection(&format!("{prefix}1"), kind),
                    collection(&format!("{prefix}2"), kind),
                ],
                "source: {src}"
            );
        }
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    #[test]
    fn test_no_constructor() {
        let bean = extract_bean("public class Clazz{}").unwrap();
        assert!(bean.constructor_args.is_empty());
    }

    #[test]
    fn test_default_constructor() {
        let bean = extract_bean("public class Clazz{ public Clazz(){} }").unwrap();
        assert!(bean.constructor_args.is_empty());

        // 有默认构造器时忽略其他构造器
        let bean = extract_bean("public class Clazz2{ public Clazz2(){} public Clazz2(int arg){} }").unwrap();
        assert!(bean.constructor_args.is_empty());

        let bean = extract_bean("public class Clazz3{ public Clazz3(int arg){} public Clazz3( ){} }").unwrap();
        assert!(bean.constructor_args.is_empty());
    }

    #[test]
    fn test_single_constructor() {
        let bean = extract_bean("public class Clazz{ public Clazz(int arg, String arg2, AnObject obj){} }").unwrap();
        let args = &bean.constructor_args;
        assert_eq!(args.len(), 3);

        assert_eq!(args[0].index, 0);
        assert_eq!(args[0].kind, ArgKind::Primitive);
        assert_eq!(args[0].type_attr().as_deref(), Some("int"));
        assert_eq!(args[0].inline_value, "");

        assert_eq!(args[1].index, 1);
        assert_eq!(args[1].kind, ArgKind::Wrapper);
        assert_eq!(args[1].type_attr().as_deref(), Some("java.lang.String"));

        assert_eq!(args[2].index, 2);
        assert_eq!(args[2].kind, ArgKind::Reference);
        assert_eq!(args[2].ref_attr().as_deref(), Some("anObject"));
        assert!(!args[2].kind.is_scalar());
    }

    #[test]
    fn test_two_constructors() {
        let bean = extract_bean("public class Clazz2{ public Clazz2(String arg){} public Clazz2(int arg){} }").unwrap();
        assert!(bean.constructor_args.is_empty());
    }

    #[test]
    fn test_constructor_of_other_class_ignored() {
        let bean = extract_bean("public class Clazz{ public Clazz2(int a){} }").unwrap();
        assert!(bean.constructor_args.is_empty());
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("AnObject"), "anObject");
        assert_eq!(lower_first("already"), "already");
        assert_eq!(lower_first("X"), "x");
        assert_eq!(lower_first(""), "");
    }

    proptest! {
        /// Bean id is always the class name with only its first letter lowered
        #[test]
        fn prop_bean_id_is_lower_camel(name in "[A-Z][A-Za-z0-9_]{0,15}") {
            let src = format!("public class {name} {{ }}");
            let bean = extract_bean(&src).unwrap();
            prop_assert_eq!(&bean.id[1..], &name[1..]);
            prop_assert_eq!(bean.id.chars().next(), name.chars().next().map(|c| c.to_ascii_lowercase()));
            prop_assert_eq!(bean.class_name, name);
        }

        /// Without `public class` nothing is produced, whatever else the text holds
        #[test]
        fn prop_no_public_class_no_bean(body in "[a-oq-z ;=(){}]{0,60}") {
            let src = format!("class Hidden {{ {body} }}");
            prop_assert!(extract_bean(&src).is_none());
        }
    }
}
