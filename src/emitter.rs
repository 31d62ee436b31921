// ============================================================================
// XML 输出 - Spring beans 文档
// ============================================================================

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::model::{ApplicationContext, BeanDescriptor, ConstructorArg, PropertyEntry, PropertyKind};

/// Default namespace of the root `beans` element
pub const BEANS_NAMESPACE: &str = "http://www.springframework.org/schema/beans";

/// XML Schema instance namespace, bound to the `xsi` prefix
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Render the whole document, declaration included, indented by two spaces.
pub fn render(context: &ApplicationContext) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let schema_location = context.schema_location();
    let mut root = BytesStart::new("beans");
    root.push_attribute(("xmlns", BEANS_NAMESPACE));
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    root.push_attribute(("xsi:schemaLocation", schema_location.as_str()));

    if context.beans.is_empty() {
        writer.write_event(Event::Empty(root))?;
    } else {
        writer.write_event(Event::Start(root))?;
        for bean in &context.beans {
            write_bean(&mut writer, bean)?;
        }
        writer.write_event(Event::End(BytesEnd::new("beans")))?;
    }

    String::from_utf8(writer.into_inner()).context("rendered document is not valid UTF-8")
}

fn write_bean(writer: &mut Writer<Vec<u8>>, bean: &BeanDescriptor) -> Result<()> {
    let mut start = BytesStart::new("bean");
    start.push_attribute(("id", bean.id.as_str()));
    start.push_attribute(("class", bean.class_name.as_str()));

    if bean.constructor_args.is_empty() && bean.properties.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for arg in &bean.constructor_args {
        write_constructor_arg(writer, arg)?;
    }
    for property in &bean.properties {
        write_property(writer, property)?;
    }
    writer.write_event(Event::End(BytesEnd::new("bean")))?;
    Ok(())
}

fn write_constructor_arg(writer: &mut Writer<Vec<u8>>, arg: &ConstructorArg) -> Result<()> {
    let index = arg.index.to_string();
    let mut element = BytesStart::new("constructor-arg");
    element.push_attribute(("index", index.as_str()));

    if let Some(ty) = arg.type_attr() {
        element.push_attribute(("type", ty.as_str()));
        element.push_attribute(("value", arg.inline_value.as_str()));
    }
    if let Some(bean) = arg.ref_attr() {
        element.push_attribute(("ref", bean.as_str()));
    }

    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn write_property(writer: &mut Writer<Vec<u8>>, property: &PropertyEntry) -> Result<()> {
    let mut element = BytesStart::new("property");
    element.push_attribute(("name", property.name.as_str()));

    match &property.kind {
        PropertyKind::Scalar { value } => {
            element.push_attribute(("value", value.as_str()));
            writer.write_event(Event::Empty(element))?;
        }
        PropertyKind::Reference { bean } => {
            element.push_attribute(("ref", bean.as_str()));
            writer.write_event(Event::Empty(element))?;
        }
        PropertyKind::Collection { collection } => {
            writer.write_event(Event::Start(element))?;
            writer.write_event(Event::Empty(BytesStart::new(collection.element_name())))?;
            writer.write_event(Event::End(BytesEnd::new("property")))?;
        }
    }
    Ok(())
}
