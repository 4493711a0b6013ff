//! [§ 13.2.6.1 Adjust MathML attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-mathml-attributes)

use crate::tokenizer::Attribute;

/// "if the attribute's name is "definitionurl", set the attribute's name to
/// "definitionURL"."
pub(crate) fn adjust_mathml_attributes(attributes: &mut [Attribute]) {
    attributes
        .iter_mut()
        .filter(|attribute| attribute.name == "definitionurl")
        .for_each(|attribute| "definitionURL".clone_into(&mut attribute.name));
}
