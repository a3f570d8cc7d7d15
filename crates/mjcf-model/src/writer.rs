//! XML generation over the element tree.
//!
//! Output is deterministic: attribute order equals schema declaration
//! order, children render in insertion order, and the same tree always
//! produces byte-identical text.

use crate::element::Element;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io;

/// Render a compact, single-line XML fragment.
pub fn to_xml(element: &dyn Element, exclude_defaults: bool) -> String {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, element, exclude_defaults)
        .expect("writing XML to an in-memory buffer cannot fail");
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Render an indented document fragment (two-space indent).
pub fn to_pretty_xml(element: &dyn Element, exclude_defaults: bool) -> String {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_element(&mut writer, element, exclude_defaults)
        .expect("writing XML to an in-memory buffer cannot fail");
    let mut text = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    text.push('\n');
    text
}

fn write_element<W: io::Write>(
    writer: &mut Writer<W>,
    element: &dyn Element,
    exclude_defaults: bool,
) -> io::Result<()> {
    let mut start = BytesStart::new(element.tag());
    for attr in element.attrs() {
        if let Some(encoded) = attr.resolve(exclude_defaults) {
            start.push_attribute((attr.name, encoded.as_str()));
        }
    }

    let children = element.children();
    if children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(io::Error::other)?;
    } else {
        writer.write_event(Event::Start(start)).map_err(io::Error::other)?;
        for child in children {
            write_element(writer, child, exclude_defaults)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(element.tag())))
            .map_err(io::Error::other)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Attr;

    struct Leaf;

    impl Element for Leaf {
        fn tag(&self) -> &'static str {
            "leaf"
        }

        fn attrs(&self) -> Vec<Attr> {
            vec![
                Attr::string("name", Some("a")),
                Attr::float_def("mass", None, 1.0),
            ]
        }
    }

    struct Parent {
        children: Vec<Leaf>,
    }

    impl Element for Parent {
        fn tag(&self) -> &'static str {
            "parent"
        }

        fn attrs(&self) -> Vec<Attr> {
            Vec::new()
        }

        fn children(&self) -> Vec<&dyn Element> {
            self.children.iter().map(|c| c as &dyn Element).collect()
        }
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(to_xml(&Leaf, true), r#"<leaf name="a"/>"#);
        assert_eq!(to_xml(&Leaf, false), r#"<leaf name="a" mass="1"/>"#);
    }

    #[test]
    fn test_nested_rendering() {
        let parent = Parent {
            children: vec![Leaf, Leaf],
        };
        assert_eq!(
            to_xml(&parent, true),
            r#"<parent><leaf name="a"/><leaf name="a"/></parent>"#
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let parent = Parent {
            children: vec![Leaf],
        };
        assert_eq!(to_xml(&parent, true), to_xml(&parent, true));
        assert_eq!(to_pretty_xml(&parent, false), to_pretty_xml(&parent, false));
    }

    #[test]
    fn test_pretty_indents_children() {
        let parent = Parent {
            children: vec![Leaf],
        };
        let text = to_pretty_xml(&parent, true);
        assert!(text.contains("<parent>\n  <leaf"), "got: {text}");
        assert!(text.ends_with("</parent>\n"), "got: {text}");
    }

    #[test]
    fn test_attribute_values_escaped() {
        struct Odd;
        impl Element for Odd {
            fn tag(&self) -> &'static str {
                "odd"
            }
            fn attrs(&self) -> Vec<Attr> {
                vec![Attr::string("model", Some(r#"a<b>"c"&d"#))]
            }
        }
        let text = to_xml(&Odd, true);
        assert!(text.contains("&lt;b&gt;"), "got: {text}");
        assert!(text.contains("&amp;d"), "got: {text}");
    }
}
