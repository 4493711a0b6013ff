//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
//!
//! DOCTYPE conformance and the quirks mode a DOCTYPE selects.

use quill_dom::QuirksMode;

/// "The public identifier starts with:" any of these sets quirks mode.
const QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "+//silmaril//dtd html pro v0r11 19970101//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

/// "The public identifier is set to:" any of these sets quirks mode.
const QUIRKS_PUBLIC_IDS: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

/// "The system identifier is set to:"
const QUIRKS_SYSTEM_ID: &str = "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

/// Quirks when the system identifier is missing, limited quirks otherwise.
const HTML4_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

/// Limited quirks whatever the system identifier.
const LIMITED_QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

/// "If the DOCTYPE token's name is not "html", or the token's public
/// identifier is not missing, or the token's system identifier is neither
/// missing nor "about:legacy-compat", then there is a parse error."
pub(super) fn is_conforming_doctype(
    name: Option<&str>,
    public_identifier: Option<&str>,
    system_identifier: Option<&str>,
) -> bool {
    name == Some("html")
        && public_identifier.is_none()
        && system_identifier.is_none_or(|system| system == "about:legacy-compat")
}

/// The document's mode after the DOCTYPE token. All comparisons are ASCII
/// case-insensitive.
pub(super) fn quirks_mode_for_doctype(
    name: Option<&str>,
    public_identifier: Option<&str>,
    system_identifier: Option<&str>,
    force_quirks: bool,
) -> QuirksMode {
    let public = public_identifier.map(str::to_ascii_lowercase);
    let public = public.as_deref();
    let system = system_identifier.map(str::to_ascii_lowercase);
    let system = system.as_deref();
    let public_starts_with =
        |prefixes: &[&str]| public.is_some_and(|id| prefixes.iter().any(|p| id.starts_with(p)));

    // "Then, if the document is not an iframe srcdoc document, and the parser
    //  cannot change the mode flag is false, and the DOCTYPE token matches one
    //  of the conditions in the following list, then set the Document to
    //  quirks mode:"
    if force_quirks
        || name != Some("html")
        || public.is_some_and(|id| QUIRKS_PUBLIC_IDS.contains(&id))
        || system == Some(QUIRKS_SYSTEM_ID)
        || public_starts_with(QUIRKS_PUBLIC_ID_PREFIXES)
        || (system.is_none() && public_starts_with(HTML4_PUBLIC_ID_PREFIXES))
    {
        return QuirksMode::Quirks;
    }

    // "Otherwise, if the document is not an iframe srcdoc document, and the
    //  parser cannot change the mode flag is false, and the DOCTYPE token
    //  matches one of the conditions in the following list, then then set the
    //  Document to limited-quirks mode:"
    if public_starts_with(LIMITED_QUIRKS_PUBLIC_ID_PREFIXES)
        || (system.is_some() && public_starts_with(HTML4_PUBLIC_ID_PREFIXES))
    {
        return QuirksMode::LimitedQuirks;
    }

    QuirksMode::NoQuirks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html5_doctype_is_no_quirks() {
        assert!(is_conforming_doctype(Some("html"), None, None));
        assert_eq!(
            quirks_mode_for_doctype(Some("html"), None, None, false),
            QuirksMode::NoQuirks
        );
    }

    #[test]
    fn test_legacy_compat_is_conforming() {
        assert!(is_conforming_doctype(
            Some("html"),
            None,
            Some("about:legacy-compat")
        ));
        assert!(!is_conforming_doctype(Some("html"), Some("x"), None));
        assert!(!is_conforming_doctype(Some("svg"), None, None));
    }

    #[test]
    fn test_force_quirks_and_wrong_name() {
        assert_eq!(
            quirks_mode_for_doctype(Some("html"), None, None, true),
            QuirksMode::Quirks
        );
        assert_eq!(
            quirks_mode_for_doctype(None, None, None, false),
            QuirksMode::Quirks
        );
    }

    #[test]
    fn test_public_id_prefix_is_case_insensitive() {
        assert_eq!(
            quirks_mode_for_doctype(
                Some("html"),
                Some("-//W3C//DTD HTML 3.2 Final//EN"),
                None,
                false
            ),
            QuirksMode::Quirks
        );
    }

    #[test]
    fn test_html401_transitional_depends_on_system_id() {
        let public = Some("-//W3C//DTD HTML 4.01 Transitional//EN");
        assert_eq!(
            quirks_mode_for_doctype(Some("html"), public, None, false),
            QuirksMode::Quirks
        );
        assert_eq!(
            quirks_mode_for_doctype(
                Some("html"),
                public,
                Some("http://www.w3.org/TR/html4/loose.dtd"),
                false
            ),
            QuirksMode::LimitedQuirks
        );
    }

    #[test]
    fn test_xhtml_transitional_is_limited_quirks() {
        assert_eq!(
            quirks_mode_for_doctype(
                Some("html"),
                Some("-//W3C//DTD XHTML 1.0 Transitional//EN"),
                None,
                false
            ),
            QuirksMode::LimitedQuirks
        );
    }
}
