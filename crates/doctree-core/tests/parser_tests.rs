//! Integration tests for the doc comment parser

use doctree_core::error::ParseErrorKind;
use doctree_core::tree::AttrKind;
use doctree_core::{DocNode, DocParser, ErrorCode, Markup, TagKind};

fn parse_html(content: &str) -> doctree_core::DocComment<'_> {
    DocParser::new(Markup::Html).parse(content).unwrap()
}

fn parse_markdown(content: &str) -> doctree_core::DocComment<'_> {
    DocParser::new(Markup::Markdown).parse(content).unwrap()
}

// ============================================================================
// Element Tests
// ============================================================================

#[test]
fn test_simple_element() {
    let doc = parse_html("<p>para</p>");

    assert_eq!(doc.first_sentence.len(), 2);
    if let DocNode::StartElement(e) = &doc.first_sentence[0] {
        assert_eq!(e.name.as_ref(), "p");
        assert!(e.attributes.is_empty());
        assert!(!e.self_closing);
        assert_eq!(e.span.start, 0);
    } else {
        panic!("Expected start element, got {:?}", doc.first_sentence[0]);
    }
    if let DocNode::Text(t) = &doc.first_sentence[1] {
        assert_eq!(t.content.as_ref(), "para");
        assert_eq!(t.span.start, 3);
    } else {
        panic!("Expected text, got {:?}", doc.first_sentence[1]);
    }

    // The closing </p> is a paragraph break, so it opens the body.
    assert_eq!(doc.body.len(), 1);
    if let DocNode::EndElement(e) = &doc.body[0] {
        assert_eq!(e.name.as_ref(), "p");
        assert_eq!(e.span.start, 7);
    } else {
        panic!("Expected end element, got {:?}", doc.body[0]);
    }
    assert!(doc.block_tags.is_empty());
}

#[test]
fn test_self_closing_element() {
    let doc = parse_html("abc <hr/>");

    assert_eq!(doc.first_sentence.len(), 2);
    if let DocNode::Text(t) = &doc.first_sentence[0] {
        assert_eq!(t.content.as_ref(), "abc ");
        assert_eq!(t.span.start, 0);
    } else {
        panic!("Expected text");
    }
    if let DocNode::StartElement(e) = &doc.first_sentence[1] {
        assert_eq!(e.name.as_ref(), "hr");
        assert!(e.self_closing);
        assert_eq!(e.span.start, 4);
    } else {
        panic!("Expected start element");
    }
    assert!(doc.body.is_empty());
    assert!(doc.block_tags.is_empty());
}

#[test]
fn test_element_name_case_preserved() {
    let doc = parse_html("<DIV>x</DIV>");

    if let DocNode::StartElement(e) = &doc.first_sentence[0] {
        assert_eq!(e.name.as_ref(), "DIV");
    } else {
        panic!("Expected start element");
    }
}

#[test]
fn test_unpaired_elements_are_legal() {
    let doc = parse_html("<b>bold text with no closing tag");
    assert_eq!(doc.erroneous().count(), 0);

    let doc = parse_html("text with only a closing tag</b>");
    assert_eq!(doc.erroneous().count(), 0);
}

#[test]
fn test_attributes() {
    let doc = parse_html(r#"<a href="x" title='y' checked name=z>"#);

    if let DocNode::StartElement(e) = &doc.first_sentence[0] {
        assert_eq!(e.attributes.len(), 4);

        assert_eq!(e.attributes[0].name.as_ref(), "href");
        assert_eq!(e.attributes[0].kind, AttrKind::DoubleQuoted);
        assert_eq!(e.attributes[0].value.as_deref(), Some("x"));

        assert_eq!(e.attributes[1].name.as_ref(), "title");
        assert_eq!(e.attributes[1].kind, AttrKind::SingleQuoted);
        assert_eq!(e.attributes[1].value.as_deref(), Some("y"));

        assert_eq!(e.attributes[2].name.as_ref(), "checked");
        assert_eq!(e.attributes[2].kind, AttrKind::Empty);
        assert_eq!(e.attributes[2].value, None);

        assert_eq!(e.attributes[3].name.as_ref(), "name");
        assert_eq!(e.attributes[3].kind, AttrKind::Unquoted);
        assert_eq!(e.attributes[3].value.as_deref(), Some("z"));
    } else {
        panic!("Expected start element");
    }
}

#[test]
fn test_attribute_value_spanning_lines() {
    let doc = parse_html("<a title=\"first\nsecond\">x");
    assert_eq!(doc.erroneous().count(), 0);

    if let DocNode::StartElement(e) = &doc.first_sentence[0] {
        assert_eq!(e.attributes[0].value.as_deref(), Some("first\nsecond"));
    } else {
        panic!("Expected start element");
    }
}

// ============================================================================
// Malformed Markup and Recovery
// ============================================================================

#[test]
fn test_bad_lt() {
    let doc = parse_html("abc < def");

    assert_eq!(doc.first_sentence.len(), 3);
    if let DocNode::Text(t) = &doc.first_sentence[0] {
        assert_eq!(t.content.as_ref(), "abc ");
    } else {
        panic!("Expected text");
    }
    if let DocNode::Erroneous(e) = &doc.first_sentence[1] {
        assert_eq!(e.code, ErrorCode::MalformedMarkup);
        assert_eq!(e.body.as_ref(), "<");
        assert_eq!(e.span.start, 4);
        assert_eq!(e.span.end, 5);
    } else {
        panic!("Expected erroneous node");
    }
    if let DocNode::Text(t) = &doc.first_sentence[2] {
        assert_eq!(t.content.as_ref(), " def");
        assert_eq!(t.span.start, 5);
    } else {
        panic!("Expected text");
    }
    assert!(doc.body.is_empty());
}

#[test]
fn test_bare_gt_is_text() {
    let doc = parse_html("abc > def");

    assert_eq!(doc.first_sentence.len(), 1);
    if let DocNode::Text(t) = &doc.first_sentence[0] {
        assert_eq!(t.content.as_ref(), "abc > def");
    } else {
        panic!("Expected text");
    }
    assert_eq!(doc.erroneous().count(), 0);
}

#[test]
fn test_bad_chars_in_start_element() {
    let doc = parse_html("abc <p 123> def");

    assert_eq!(doc.first_sentence.len(), 3);
    assert!(matches!(&doc.first_sentence[1], DocNode::Erroneous(e)
        if e.body.as_ref() == "<" && e.span.start == 4));
    // Recovery resumes right after the '<'; the rest is plain text and is
    // never re-attempted as a tag.
    if let DocNode::Text(t) = &doc.first_sentence[2] {
        assert_eq!(t.content.as_ref(), "p 123> def");
        assert_eq!(t.span.start, 5);
    } else {
        panic!("Expected text");
    }
}

#[test]
fn test_bad_chars_in_end_element() {
    let doc = parse_html("abc </p 123> def");

    assert_eq!(doc.first_sentence.len(), 3);
    assert!(matches!(&doc.first_sentence[1], DocNode::Erroneous(e)
        if e.body.as_ref() == "<" && e.span.start == 4));
    if let DocNode::Text(t) = &doc.first_sentence[2] {
        assert_eq!(t.content.as_ref(), "/p 123> def");
        assert_eq!(t.span.start, 5);
    } else {
        panic!("Expected text");
    }
}

#[test]
fn test_unterminated_tag_at_end_of_input() {
    let doc = parse_html("abc <hr");

    assert_eq!(doc.first_sentence.len(), 3);
    assert!(matches!(&doc.first_sentence[1], DocNode::Erroneous(e)
        if e.body.as_ref() == "<" && e.span.start == 4));
    if let DocNode::Text(t) = &doc.first_sentence[2] {
        assert_eq!(t.content.as_ref(), "hr");
        assert_eq!(t.span.start, 5);
    } else {
        panic!("Expected text");
    }
    assert!(doc.body.is_empty());
    assert!(doc.block_tags.is_empty());
}

#[test]
fn test_unterminated_tag_before_block_tag() {
    let doc = parse_html("abc <hr\n@author jjg");

    assert_eq!(doc.first_sentence.len(), 3);
    assert!(matches!(&doc.first_sentence[1], DocNode::Erroneous(e)
        if e.body.as_ref() == "<" && e.span.start == 4));
    assert!(matches!(&doc.first_sentence[2], DocNode::Text(t)
        if t.content.as_ref() == "hr" && t.span.start == 5));
    assert!(doc.body.is_empty());

    assert_eq!(doc.block_tags.len(), 1);
    let tag = &doc.block_tags[0];
    assert_eq!(tag.kind, TagKind::Author);
    assert_eq!(tag.name.as_ref(), "author");
    assert_eq!(tag.span.start, 8);
    assert_eq!(tag.content.len(), 1);
    assert!(matches!(&tag.content[0], DocNode::Text(t)
        if t.content.as_ref() == "jjg" && t.span.start == 16));
}

#[test]
fn test_unterminated_end_element() {
    let doc = parse_html("abc </p");

    assert_eq!(doc.first_sentence.len(), 3);
    assert!(matches!(&doc.first_sentence[1], DocNode::Erroneous(e)
        if e.body.as_ref() == "<"));
    assert!(matches!(&doc.first_sentence[2], DocNode::Text(t)
        if t.content.as_ref() == "/p" && t.span.start == 5));
}

#[test]
fn test_unterminated_quoted_attribute() {
    let doc = parse_html("abc <a href=\"un");

    assert_eq!(doc.erroneous().count(), 1);
    assert!(matches!(&doc.first_sentence[1], DocNode::Erroneous(e)
        if e.body.as_ref() == "<" && e.span.start == 4));
    assert!(matches!(&doc.first_sentence[2], DocNode::Text(t)
        if t.content.as_ref() == "a href=\"un"));
}

#[test]
fn test_lt_at_end_of_input() {
    let doc = parse_html("abc <");

    assert_eq!(doc.first_sentence.len(), 2);
    assert!(matches!(&doc.first_sentence[1], DocNode::Erroneous(e)
        if e.body.as_ref() == "<" && e.span.start == 4));
}

// ============================================================================
// HTML Comments
// ============================================================================

#[test]
fn test_html_comment() {
    let doc = parse_html("abc\n<!-- comment -->\ndef");

    assert_eq!(doc.first_sentence.len(), 3);
    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.content.as_ref() == "abc\n" && t.span.start == 0));
    if let DocNode::Comment(c) = &doc.first_sentence[1] {
        assert_eq!(c.content.as_ref(), "<!-- comment -->");
        assert_eq!(c.span.start, 4);
        assert_eq!(c.span.end, 20);
    } else {
        panic!("Expected comment");
    }
    assert!(matches!(&doc.first_sentence[2], DocNode::Text(t)
        if t.content.as_ref() == "\ndef" && t.span.start == 20));
    assert!(doc.body.is_empty());
}

#[test]
fn test_html_comment_with_dashes_inside() {
    let doc = parse_html("<!-- a - b -- c -->");

    assert_eq!(doc.first_sentence.len(), 1);
    assert!(matches!(&doc.first_sentence[0], DocNode::Comment(c)
        if c.content.as_ref() == "<!-- a - b -- c -->"));
}

#[test]
fn test_unterminated_html_comment_is_fatal() {
    let err = DocParser::new(Markup::Html)
        .parse("abc <!-- never closed")
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
}

#[test]
fn test_unterminated_html_comment_in_tag_argument_is_fatal() {
    // The failure surfaces from inside a block tag's argument too; no
    // partial tree is returned.
    let err = DocParser::new(Markup::Html)
        .parse("x\n@see <!-- open")
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
}

#[test]
fn test_html_comment_containing_tag_introducer() {
    // A '@' line inside an HTML comment belongs to the comment.
    let doc = parse_html("<!-- keep\n@author inside -->\ndone");

    assert!(doc.block_tags.is_empty());
    assert!(matches!(&doc.first_sentence[0], DocNode::Comment(c)
        if c.content.as_ref() == "<!-- keep\n@author inside -->"));
}

// ============================================================================
// Markdown Flavor
// ============================================================================

#[test]
fn test_markdown_disables_markup() {
    let doc = parse_markdown("abc < def");

    assert_eq!(doc.first_sentence.len(), 1);
    if let DocNode::RawText(r) = &doc.first_sentence[0] {
        assert_eq!(r.content.as_ref(), "abc < def");
        assert_eq!(r.span.start, 0);
    } else {
        panic!("Expected raw text, got {:?}", doc.first_sentence[0]);
    }
    assert!(doc.body.is_empty());
    assert_eq!(doc.erroneous().count(), 0);
}

#[test]
fn test_markdown_never_produces_element_nodes() {
    let doc = parse_markdown("has <p>markup</p> and <!-- comment --> inside");

    for node in doc.nodes() {
        assert!(matches!(node, DocNode::RawText(_)), "got {:?}", node);
    }
}

#[test]
fn test_markdown_still_recognizes_block_tags() {
    let doc = parse_markdown("abc\n@author jjg");

    assert_eq!(doc.first_sentence.len(), 1);
    assert!(matches!(&doc.first_sentence[0], DocNode::RawText(r)
        if r.content.as_ref() == "abc"));
    assert_eq!(doc.block_tags.len(), 1);
    assert!(matches!(&doc.block_tags[0].content[0], DocNode::RawText(r)
        if r.content.as_ref() == "jjg"));
}

#[test]
fn test_markdown_sentence_split() {
    let doc = parse_markdown("First things first. Then the rest.");

    assert_eq!(doc.first_sentence.len(), 1);
    assert!(matches!(&doc.first_sentence[0], DocNode::RawText(r)
        if r.content.as_ref() == "First things first."));
    assert_eq!(doc.body.len(), 1);
    assert!(matches!(&doc.body[0], DocNode::RawText(r)
        if r.content.as_ref() == "Then the rest." && r.span.start == 20));
}

// ============================================================================
// Sentence Splitting
// ============================================================================

#[test]
fn test_first_sentence_split_on_period() {
    let doc = parse_html("First sentence. Rest of body.");

    assert_eq!(doc.first_sentence.len(), 1);
    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.content.as_ref() == "First sentence." && t.span.start == 0));
    assert_eq!(doc.body.len(), 1);
    assert!(matches!(&doc.body[0], DocNode::Text(t)
        if t.content.as_ref() == "Rest of body." && t.span.start == 16));
}

#[test]
fn test_period_without_following_whitespace_does_not_split() {
    let doc = parse_html("version 1.2 of the parser");

    assert_eq!(doc.first_sentence.len(), 1);
    assert!(doc.body.is_empty());
}

#[test]
fn test_no_terminator_means_everything_is_first_sentence() {
    let doc = parse_html("just some words with no period");

    assert_eq!(doc.first_sentence.len(), 1);
    assert!(doc.body.is_empty());
}

#[test]
fn test_paragraph_element_breaks_sentence() {
    let doc = parse_html("Summary<p>More text.");

    assert_eq!(doc.first_sentence.len(), 1);
    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.content.as_ref() == "Summary"));
    assert_eq!(doc.body.len(), 2);
    assert!(matches!(&doc.body[0], DocNode::StartElement(e)
        if e.name.as_ref() == "p"));
}

#[test]
fn test_inline_element_does_not_break_sentence() {
    let doc = parse_html("some <b>bold</b> words");

    assert_eq!(doc.first_sentence.len(), 5);
    assert!(doc.body.is_empty());
}

#[test]
fn test_terminator_at_tag_boundary() {
    let doc = parse_html("End.<b>bold</b>");

    assert_eq!(doc.first_sentence.len(), 1);
    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.content.as_ref() == "End."));
    assert_eq!(doc.body.len(), 3);
}

#[test]
fn test_newline_counts_as_terminator_whitespace() {
    let doc = parse_html("First.\nSecond line.");

    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.content.as_ref() == "First."));
    assert!(matches!(&doc.body[0], DocNode::Text(t)
        if t.content.as_ref() == "Second line." && t.span.start == 7));
}

// ============================================================================
// Block Tags
// ============================================================================

#[test]
fn test_multiple_block_tags() {
    let doc = parse_html("Summary.\n@author a\n@version 1.0\n@custom stuff");

    assert_eq!(doc.block_tags.len(), 3);

    assert_eq!(doc.block_tags[0].kind, TagKind::Author);
    assert!(matches!(&doc.block_tags[0].content[0], DocNode::Text(t)
        if t.content.as_ref() == "a"));

    assert_eq!(doc.block_tags[1].kind, TagKind::Version);
    assert!(matches!(&doc.block_tags[1].content[0], DocNode::Text(t)
        if t.content.as_ref() == "1.0"));

    assert_eq!(doc.block_tags[2].kind, TagKind::Unknown);
    assert_eq!(doc.block_tags[2].name.as_ref(), "custom");
    assert!(matches!(&doc.block_tags[2].content[0], DocNode::Text(t)
        if t.content.as_ref() == "stuff"));
}

#[test]
fn test_tag_only_comment() {
    let doc = parse_html("@deprecated");

    assert!(doc.first_sentence.is_empty());
    assert!(doc.body.is_empty());
    assert_eq!(doc.block_tags.len(), 1);
    assert_eq!(doc.block_tags[0].kind, TagKind::Deprecated);
    assert!(doc.block_tags[0].content.is_empty());
}

#[test]
fn test_tag_argument_spans_lines() {
    let doc = parse_html("@see the first line\nand the second");

    assert_eq!(doc.block_tags.len(), 1);
    assert_eq!(doc.block_tags[0].content.len(), 1);
    assert!(matches!(&doc.block_tags[0].content[0], DocNode::Text(t)
        if t.content.as_ref() == "the first line\nand the second"));
}

#[test]
fn test_tag_argument_with_markup() {
    let doc = parse_html("@return the <code>size</code>");

    let content = &doc.block_tags[0].content;
    assert_eq!(content.len(), 4);
    assert!(matches!(&content[1], DocNode::StartElement(e)
        if e.name.as_ref() == "code"));
    assert!(matches!(&content[3], DocNode::EndElement(e)
        if e.name.as_ref() == "code"));
}

#[test]
fn test_at_sign_mid_line_is_text() {
    let doc = parse_html("mail me @home today");

    assert!(doc.block_tags.is_empty());
    assert_eq!(doc.first_sentence.len(), 1);
    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.content.as_ref() == "mail me @home today"));
}

#[test]
fn test_introducer_after_leading_whitespace() {
    let doc = parse_html("abc\n  @author x");

    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.content.as_ref() == "abc"));
    assert_eq!(doc.block_tags.len(), 1);
    assert_eq!(doc.block_tags[0].span.start, 6);
}

#[test]
fn test_at_sign_without_name_is_text() {
    let doc = parse_html("abc\n@ not a tag");

    assert!(doc.block_tags.is_empty());
    assert_eq!(doc.first_sentence.len(), 1);
}

#[test]
fn test_tag_in_first_column() {
    let doc = parse_html("@author jjg");

    assert_eq!(doc.block_tags.len(), 1);
    assert_eq!(doc.block_tags[0].span.start, 0);
}

// ============================================================================
// Offsets
// ============================================================================

#[test]
fn test_base_offset_shifts_all_spans() {
    let doc = DocParser::new(Markup::Html)
        .with_base_offset(100)
        .parse("abc < def")
        .unwrap();

    assert_eq!(doc.span.start, 100);
    assert_eq!(doc.span.end, 109);
    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.span.start == 100));
    assert!(matches!(&doc.first_sentence[1], DocNode::Erroneous(e)
        if e.span.start == 104 && e.span.end == 105));
    assert!(matches!(&doc.first_sentence[2], DocNode::Text(t)
        if t.span.start == 105));
}

#[test]
fn test_offsets_nondecreasing() {
    let inputs = [
        "<p>para</p>",
        "abc <hr/>",
        "abc <p 123> def",
        "abc\n<!-- comment -->\ndef",
        "One. Two. Three.\n@author a\n@see <b>x</b> y",
    ];

    for input in inputs {
        let doc = parse_html(input);
        let mut last = 0;
        for node in doc.nodes() {
            assert!(
                node.span().start >= last,
                "offsets went backward in {:?}: {:?}",
                input,
                node
            );
            last = node.span().start;
        }
    }
}

#[test]
fn test_reparse_reconstruction_keeps_offsets() {
    // Rebuilding the literal text from the tree of a recovered parse and
    // parsing it again must yield the same offsets.
    let input = "abc <p 123> def";
    let doc = parse_html(input);

    let mut rebuilt = String::new();
    for node in doc.nodes() {
        match node {
            DocNode::Text(t) => rebuilt.push_str(&t.content),
            DocNode::Erroneous(e) => rebuilt.push_str(&e.body),
            _ => panic!("unexpected node kind"),
        }
    }
    assert_eq!(rebuilt, input);

    let doc2 = parse_html(&rebuilt);
    let offsets: Vec<u32> = doc.nodes().map(|n| n.span().start).collect();
    let offsets2: Vec<u32> = doc2.nodes().map(|n| n.span().start).collect();
    assert_eq!(offsets, offsets2);
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_empty_input() {
    let doc = parse_html("");

    assert!(doc.first_sentence.is_empty());
    assert!(doc.body.is_empty());
    assert!(doc.block_tags.is_empty());
}

#[test]
fn test_whitespace_only_input() {
    let doc = parse_html("   \n\t  ");

    assert!(doc.first_sentence.is_empty());
    assert!(doc.body.is_empty());
}

#[test]
fn test_erroneous_surface_includes_block_tags() {
    let doc = parse_html("fine text\n@see <no");

    let faults: Vec<_> = doc.erroneous().collect();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].code, ErrorCode::MalformedMarkup);
    assert_eq!(faults[0].body.as_ref(), "<");
}

#[test]
fn test_trailing_whitespace_trimmed_before_introducer() {
    let doc = parse_html("abc   \n@author x");

    assert!(matches!(&doc.first_sentence[0], DocNode::Text(t)
        if t.content.as_ref() == "abc" && t.span.end == 3));
}
