// ============================================================================
// Bean 模型 - 提取结果的数据结构
// ============================================================================

use std::path::PathBuf;
use serde::Serialize;

/// Spring version used for the schema location when none is configured
pub const DEFAULT_SPRING_VERSION: &str = "2.5";

/// Raw text of one Java source file
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// How a constructor argument is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    /// `int`, `boolean`, ... rendered with `type` and an empty `value`
    Primitive,
    /// `Integer`, `String`, ... rendered with a `java.lang.` qualified `type`
    Wrapper,
    /// Any other type, rendered as `ref` to the bean with the lower-camel id
    Reference,
}

/// A positional argument of the single qualifying constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorArg {
    pub index: usize,
    pub kind: ArgKind,
    /// Type as written in the source (`String`, not `java.lang.String`)
    pub declared_type: String,
    pub inline_value: String,
}

impl ArgKind {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ArgKind::Reference)
    }
}

impl ConstructorArg {
    /// Value of the `type` attribute, if the argument is scalar
    pub fn type_attr(&self) -> Option<String> {
        match self.kind {
            ArgKind::Primitive => Some(self.declared_type.clone()),
            ArgKind::Wrapper => Some(format!("java.lang.{}", self.declared_type)),
            ArgKind::Reference => None,
        }
    }

    /// Value of the `ref` attribute, if the argument points at another bean
    pub fn ref_attr(&self) -> Option<String> {
        match self.kind {
            ArgKind::Reference => Some(crate::extractor::lower_first(&self.declared_type)),
            ArgKind::Primitive | ArgKind::Wrapper => None,
        }
    }
}

/// Spring collection element used for container-typed properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    List,
    Set,
    Map,
    Props,
}

impl CollectionKind {
    /// XML element name
    pub fn element_name(self) -> &'static str {
        match self {
            CollectionKind::List => "list",
            CollectionKind::Set => "set",
            CollectionKind::Map => "map",
            CollectionKind::Props => "props",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyKind {
    Scalar { value: String },
    Collection { collection: CollectionKind },
    Reference { bean: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

/// One `<bean>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeanDescriptor {
    pub id: String,
    pub class_name: String,
    pub constructor_args: Vec<ConstructorArg>,
    pub properties: Vec<PropertyEntry>,
}

/// The whole output document: schema version plus beans in visit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationContext {
    pub spring_version: String,
    pub beans: Vec<BeanDescriptor>,
}

impl ApplicationContext {
    pub fn new(spring_version: impl Into<String>) -> Self {
        Self {
            spring_version: spring_version.into(),
            beans: Vec::new(),
        }
    }

    /// Append a bean, returning the updated context
    pub fn with_bean(mut self, bean: BeanDescriptor) -> Self {
        self.beans.push(bean);
        self
    }

    /// `xsi:schemaLocation` value for the configured version
    pub fn schema_location(&self) -> String {
        format!(
            "{ns} {ns}/spring-beans-{}.xsd",
            self.spring_version,
            ns = crate::emitter::BEANS_NAMESPACE
        )
    }
}

impl Default for ApplicationContext {
    fn default() -> Self {
        Self::new(DEFAULT_SPRING_VERSION)
    }
}
