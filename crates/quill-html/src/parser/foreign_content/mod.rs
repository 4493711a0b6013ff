//! Attribute adjustments for elements inserted in the SVG and MathML
//! namespaces.
//!
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)

mod mathml;
mod svg;

pub(crate) use mathml::adjust_mathml_attributes;
pub(crate) use svg::adjust_svg_attributes;

use quill_dom::Namespace;

use crate::tokenizer::Attribute;

/// [§ 13.2.6.1 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// "if any of the attributes on the token match the strings in the first
/// column of the following table, let the attribute be a namespaced
/// attribute, with the prefix being the string in the second column, the
/// local name being the string in the third column, and the namespace being
/// the namespace in the fourth column."
const FOREIGN_ATTRIBUTES: &[(&str, Option<&str>, &str, Namespace)] = &[
    ("xlink:actuate", Some("xlink"), "actuate", Namespace::XLink),
    ("xlink:arcrole", Some("xlink"), "arcrole", Namespace::XLink),
    ("xlink:href", Some("xlink"), "href", Namespace::XLink),
    ("xlink:role", Some("xlink"), "role", Namespace::XLink),
    ("xlink:show", Some("xlink"), "show", Namespace::XLink),
    ("xlink:title", Some("xlink"), "title", Namespace::XLink),
    ("xlink:type", Some("xlink"), "type", Namespace::XLink),
    ("xml:lang", Some("xml"), "lang", Namespace::Xml),
    ("xml:space", Some("xml"), "space", Namespace::Xml),
    ("xmlns", None, "xmlns", Namespace::Xmlns),
    ("xmlns:xlink", Some("xmlns"), "xlink", Namespace::Xmlns),
];

/// A token attribute after foreign attribute adjustment, ready for
/// `set_attribute_ns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AdjustedAttribute<'a> {
    pub(crate) namespace: Option<Namespace>,
    pub(crate) prefix: Option<&'static str>,
    pub(crate) local_name: &'a str,
    pub(crate) value: &'a str,
}

/// [§ 13.2.6.1 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// Attributes not in the table keep a null namespace and their (already
/// case-adjusted) name.
pub(crate) fn adjust_foreign_attributes(attributes: &[Attribute]) -> Vec<AdjustedAttribute<'_>> {
    attributes
        .iter()
        .map(|attribute| {
            let name = attribute.name.as_str();
            FOREIGN_ATTRIBUTES
                .iter()
                .find(|(qualified, ..)| *qualified == name)
                .map_or(
                    AdjustedAttribute {
                        namespace: None,
                        prefix: None,
                        local_name: name,
                        value: &attribute.value,
                    },
                    |&(_, prefix, local_name, namespace)| AdjustedAttribute {
                        namespace: Some(namespace),
                        prefix,
                        local_name,
                        value: &attribute.value,
                    },
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_xlink_href_gets_xlink_namespace() {
        let attributes = [attr("xlink:href", "#a"), attr("width", "10")];
        let adjusted = adjust_foreign_attributes(&attributes);

        assert_eq!(adjusted[0].namespace, Some(Namespace::XLink));
        assert_eq!(adjusted[0].prefix, Some("xlink"));
        assert_eq!(adjusted[0].local_name, "href");
        assert_eq!(adjusted[0].value, "#a");

        assert_eq!(adjusted[1].namespace, None);
        assert_eq!(adjusted[1].local_name, "width");
    }

    #[test]
    fn test_bare_xmlns_has_no_prefix() {
        let binding = [attr("xmlns", "http://www.w3.org/2000/svg")];
        let adjusted = adjust_foreign_attributes(&binding);
        assert_eq!(adjusted[0].namespace, Some(Namespace::Xmlns));
        assert_eq!(adjusted[0].prefix, None);
        assert_eq!(adjusted[0].local_name, "xmlns");
    }

    #[test]
    fn test_svg_and_mathml_case_fixes() {
        let mut svg = vec![attr("viewbox", "0 0 1 1"), attr("fill", "red")];
        adjust_svg_attributes(&mut svg);
        assert_eq!(svg[0].name, "viewBox");
        assert_eq!(svg[1].name, "fill");

        let mut math = vec![attr("definitionurl", "x")];
        adjust_mathml_attributes(&mut math);
        assert_eq!(math[0].name, "definitionURL");
    }
}
