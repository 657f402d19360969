//! Minimal structural scanner over HTML tags.
//!
//! Just enough traversal to find an element's matching close tag, enumerate
//! its top-level child elements, and pull out text content. Manual byte
//! scanning; not a general HTML parser.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Open,
    Close,
    /// Void elements and self-closing syntax: complete elements with no
    /// children of their own.
    Void,
    /// Comments, doctypes, processing instructions. Never a child element.
    Marker,
}

#[derive(Debug)]
pub(crate) struct Tag {
    pub kind: TagKind,
    /// Byte offset of the leading `<`.
    pub start: usize,
    /// Byte offset one past the trailing `>`.
    pub end: usize,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| name.eq_ignore_ascii_case(v))
}

/// Scans for the next tag at or after byte offset `from`. Stray `<` that
/// opens no tag is skipped; a truncated tag ends the scan.
pub(crate) fn next_tag(html: &str, mut from: usize) -> Option<Tag> {
    let bytes = html.as_bytes();
    loop {
        let start = html.get(from..)?.find('<')? + from;
        let rest = &html[start..];

        if rest.starts_with("<!--") {
            let end = rest.find("-->").map_or(html.len(), |e| start + e + 3);
            return Some(Tag {
                kind: TagKind::Marker,
                start,
                end,
            });
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            let end = rest.find('>').map_or(html.len(), |e| start + e + 1);
            return Some(Tag {
                kind: TagKind::Marker,
                start,
                end,
            });
        }

        let (name_start, closing) = if rest.starts_with("</") {
            (start + 2, true)
        } else {
            (start + 1, false)
        };
        let name_len = html[name_start..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b':')
            .count();
        if name_len == 0 {
            from = start + 1;
            continue;
        }
        let name = &html[name_start..name_start + name_len];

        // Find the closing '>' while honoring quoted attribute values,
        // which may legally contain '>'.
        let mut quote: Option<u8> = None;
        let mut i = name_start + name_len;
        while i < bytes.len() {
            let b = bytes[i];
            match quote {
                Some(q) => {
                    if b == q {
                        quote = None;
                    }
                }
                None => {
                    if b == b'"' || b == b'\'' {
                        quote = Some(b);
                    } else if b == b'>' {
                        break;
                    }
                }
            }
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }

        let kind = if closing {
            TagKind::Close
        } else if bytes[i - 1] == b'/' || is_void_element(name) {
            TagKind::Void
        } else {
            TagKind::Open
        };
        return Some(Tag {
            kind,
            start,
            end: i + 1,
        });
    }
}

/// Inner markup of an element whose open tag ends at byte offset
/// `open_end`: everything up to the matching close tag. Unbalanced markup
/// yields the rest of the document.
pub(crate) fn enclosed_block(html: &str, open_end: usize) -> &str {
    let mut depth = 1usize;
    let mut pos = open_end;
    while let Some(tag) = next_tag(html, pos) {
        match tag.kind {
            TagKind::Open => depth += 1,
            TagKind::Close => {
                depth -= 1;
                if depth == 0 {
                    return &html[open_end..tag.start];
                }
            }
            TagKind::Void | TagKind::Marker => {}
        }
        pos = tag.end;
    }
    &html[open_end..]
}

/// The top-level child elements of a markup fragment, each as its full
/// source slice. Text nodes, comments, and stray close tags do not count
/// as children.
pub(crate) fn top_level_children(fragment: &str) -> Vec<&str> {
    let mut children = Vec::new();
    let mut pos = 0usize;
    while let Some(tag) = next_tag(fragment, pos) {
        pos = tag.end;
        match tag.kind {
            TagKind::Void => children.push(&fragment[tag.start..tag.end]),
            TagKind::Open => {
                let mut depth = 1usize;
                let mut end = fragment.len();
                let mut inner_pos = tag.end;
                while let Some(inner) = next_tag(fragment, inner_pos) {
                    inner_pos = inner.end;
                    match inner.kind {
                        TagKind::Open => depth += 1,
                        TagKind::Close => {
                            depth -= 1;
                            if depth == 0 {
                                end = inner.end;
                                break;
                            }
                        }
                        TagKind::Void | TagKind::Marker => {}
                    }
                }
                children.push(&fragment[tag.start..end]);
                pos = end;
            }
            TagKind::Close | TagKind::Marker => {}
        }
    }
    children
}

/// Text content of a markup fragment: everything outside tags, with basic
/// entities decoded. Whitespace and line structure are preserved.
pub(crate) fn element_text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut pos = 0usize;
    while let Some(tag) = next_tag(fragment, pos) {
        out.push_str(&fragment[pos..tag.start]);
        pos = tag.end;
    }
    out.push_str(&fragment[pos..]);
    decode_entities(&out)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_children_counts_elements_only() {
        let fragment = r#"
            text before
            <img src="a.png" alt="icon">
            <!-- decorative -->
            <span>Title <strong>bold</strong></span>
            <div><div>nested</div></div>
            trailing text
        "#;
        let children = top_level_children(fragment);
        assert_eq!(children.len(), 3);
        assert!(children[0].starts_with("<img"));
        assert!(children[1].starts_with("<span"));
        assert!(children[2].starts_with("<div"));
        assert!(children[2].contains("nested"));
    }

    #[test]
    fn self_closing_tag_is_a_complete_child() {
        let children = top_level_children(r#"<br/><span>x</span>"#);
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn enclosed_block_stops_at_matching_close() {
        let html = r#"<div class="outer"><div>inner</div></div><div>sibling</div>"#;
        let open_end = html.find('>').unwrap() + 1;
        assert_eq!(enclosed_block(html, open_end), "<div>inner</div>");
    }

    #[test]
    fn element_text_strips_tags_and_decodes_entities() {
        let text = element_text("<span>Security &amp; Identity<br>line two</span>");
        assert_eq!(text, "Security & Identityline two");
    }

    #[test]
    fn element_text_preserves_newlines() {
        let text = element_text("<span>Earned\n  Aug 29, 2019\n</span>");
        assert_eq!(text, "Earned\n  Aug 29, 2019\n");
    }

    #[test]
    fn quoted_gt_in_attribute_does_not_end_the_tag() {
        let children = top_level_children(r#"<span data-note="a > b">x</span>"#);
        assert_eq!(children.len(), 1);
        assert_eq!(element_text(children[0]), "x");
    }
}
