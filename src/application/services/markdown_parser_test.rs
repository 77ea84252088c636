#[cfg(test)]
mod tests {
    use crate::application::services::markdown_parser::{
        BlockMarkdownRenderer, parse_inline, parse_markdown,
    };
    use crate::domain::entities::{Alignment, Block, Inline, ListMarker, plain_text};
    use crate::domain::ports::MarkdownRenderer;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_parse_simple_bold() {
        let blocks = parse_markdown("Hello **world**");

        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                text("Hello "),
                Inline::Strong(vec![text("world")]),
            ])]
        );
    }

    #[test]
    fn test_parse_headers() {
        let blocks = parse_markdown("### Header 3\nText");
        assert_eq!(blocks.len(), 2);

        if let Block::Heading(heading) = &blocks[0] {
            assert_eq!(heading.level, 3);
            assert_eq!(heading.text(), "Header 3");
            assert!(heading.id.is_none());
        } else {
            panic!("Expected heading");
        }
    }

    #[test]
    fn test_heading_explicit_id() {
        let blocks = parse_markdown("## Virtual Functions {#virtual}");

        let Block::Heading(heading) = &blocks[0] else {
            panic!("Expected heading");
        };
        assert_eq!(heading.id.as_deref(), Some("virtual"));
        assert_eq!(heading.text(), "Virtual Functions");
    }

    #[test]
    fn test_hash_without_space_is_text() {
        let blocks = parse_markdown("#include <vector>");
        assert!(matches!(&blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_setext_heading() {
        let blocks = parse_markdown("Templates\n=========\n\nBody");

        let Block::Heading(heading) = &blocks[0] else {
            panic!("Expected heading");
        };
        assert_eq!(heading.level, 1);
        assert_eq!(heading.text(), "Templates");
    }

    #[test]
    fn test_parse_code_block() {
        let content = "```cpp\nint main() {\n    return 0;\n}\n```";
        let blocks = parse_markdown(content);

        let Block::Code(code) = &blocks[0] else {
            panic!("Expected code block");
        };
        assert_eq!(code.lang.as_deref(), Some("cpp"));
        assert_eq!(code.code, "int main() {\n    return 0;\n}");
        assert!(code.copy.is_none());
    }

    #[test]
    fn test_code_block_keeps_markdown_literal() {
        let content = "~~~\n# not a heading\n| a | b |\n~~~\nafter";
        let blocks = parse_markdown(content);

        assert_eq!(blocks.len(), 2);
        let Block::Code(code) = &blocks[0] else {
            panic!("Expected code block");
        };
        assert!(code.lang.is_none());
        assert_eq!(code.code, "# not a heading\n| a | b |");
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let blocks = parse_markdown("```\nvoid f();");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(&blocks[0], Block::Code(c) if c.code == "void f();"));
    }

    #[test]
    fn test_parse_inline_code() {
        let inlines = parse_inline("Call `std::move` here");

        assert_eq!(
            inlines,
            vec![
                text("Call "),
                Inline::Code("std::move".to_string()),
                text(" here"),
            ]
        );
    }

    #[test]
    fn test_double_backtick_code_span() {
        let inlines = parse_inline("``a ` b``");
        assert_eq!(inlines, vec![Inline::Code("a ` b".to_string())]);
    }

    #[test]
    fn test_emphasis_and_strike() {
        let inlines = parse_inline("*virtual* and ~~old~~");

        assert_eq!(
            inlines,
            vec![
                Inline::Emphasis(vec![text("virtual")]),
                text(" and "),
                Inline::Strike(vec![text("old")]),
            ]
        );
    }

    #[test]
    fn test_snake_case_is_not_emphasis() {
        let inlines = parse_inline("make_unique and make_shared");
        assert_eq!(inlines, vec![text("make_unique and make_shared")]);
    }

    #[test]
    fn test_lone_asterisk_is_text() {
        let inlines = parse_inline("a * b");
        assert_eq!(inlines, vec![text("a * b")]);
    }

    #[test]
    fn test_nested_strong_emphasis() {
        let inlines = parse_inline("**bold _and_ more**");

        let Inline::Strong(children) = &inlines[0] else {
            panic!("Expected strong");
        };
        assert_eq!(children[1], Inline::Emphasis(vec![text("and")]));
    }

    #[test]
    fn test_parse_link() {
        let inlines = parse_inline("See [Inheritance](2-Inheritance.md \"next\") now");

        let Inline::Link(link) = &inlines[1] else {
            panic!("Expected link");
        };
        assert_eq!(link.href, "2-Inheritance.md");
        assert_eq!(plain_text(&link.children), "Inheritance");
    }

    #[test]
    fn test_link_with_parens_in_href() {
        let inlines = parse_inline("[wiki](https://en.wikipedia.org/wiki/C%2B%2B_(lang))");

        let Inline::Link(link) = &inlines[0] else {
            panic!("Expected link");
        };
        assert_eq!(link.href, "https://en.wikipedia.org/wiki/C%2B%2B_(lang)");
    }

    #[test]
    fn test_bracket_without_destination_is_text() {
        let inlines = parse_inline("arr[0] = 1");
        assert_eq!(inlines, vec![text("arr[0] = 1")]);
    }

    #[test]
    fn test_parse_image() {
        let inlines = parse_inline("![diagram](img/vtable.png)");
        assert_eq!(
            inlines,
            vec![Inline::Image {
                alt: "diagram".to_string(),
                src: "img/vtable.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_autolink_and_template_brackets() {
        let inlines = parse_inline("<https://isocpp.org> vs std::vector<int>");

        let Inline::Link(link) = &inlines[0] else {
            panic!("Expected autolink");
        };
        assert_eq!(link.href, "https://isocpp.org");
        assert_eq!(inlines[1], text(" vs std::vector<int>"));
    }

    #[test]
    fn test_escapes() {
        let inlines = parse_inline(r"\*not emphasis\*");
        assert_eq!(inlines, vec![text("*not emphasis*")]);
    }

    #[test]
    fn test_lists_with_nesting() {
        let content = "- one\n  - nested\n3. three\n   continued";
        let blocks = parse_markdown(content);

        assert_eq!(blocks.len(), 3);
        assert!(matches!(
            &blocks[0],
            Block::ListItem {
                depth: 0,
                marker: ListMarker::Bullet,
                ..
            }
        ));
        assert!(matches!(&blocks[1], Block::ListItem { depth: 1, .. }));

        let Block::ListItem {
            marker, content, ..
        } = &blocks[2]
        else {
            panic!("Expected list item");
        };
        assert_eq!(*marker, ListMarker::Ordered(3));
        assert_eq!(plain_text(content), "three continued");
    }

    #[test]
    fn test_rule_is_not_list() {
        let blocks = parse_markdown("above\n\n* * *\n\nbelow");
        assert_eq!(blocks[1], Block::Rule);
    }

    #[test]
    fn test_quote_parses_nested_blocks() {
        let blocks = parse_markdown("> **Note**\n> - item");

        let Block::Quote(inner) = &blocks[0] else {
            panic!("Expected quote");
        };
        assert_eq!(inner.len(), 2);
        assert!(matches!(&inner[1], Block::ListItem { .. }));
    }

    #[test]
    fn test_parse_table() {
        let content = "| Pointer | Owns |  Copy |\n|:--------|:----:|------:|\n| `unique_ptr` | yes | no |\n| raw | no | yes |\n\nafter";
        let blocks = parse_markdown(content);
        assert_eq!(blocks.len(), 2);

        let Block::Table(table) = &blocks[0] else {
            panic!("Expected table");
        };
        assert_eq!(
            table.alignments,
            vec![Alignment::Left, Alignment::Center, Alignment::Right]
        );
        assert_eq!(table.header.len(), 3);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], vec![Inline::Code("unique_ptr".to_string())]);
        assert!(table.wrapper.is_none());
    }

    #[test]
    fn test_table_cell_escaped_pipe() {
        let content = "| op | meaning |\n|---|---|\n| `a \\| b` | or |";
        let blocks = parse_markdown(content);

        let Block::Table(table) = &blocks[0] else {
            panic!("Expected table");
        };
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_hard_line_break() {
        let blocks = parse_markdown("first  \nsecond\nthird");

        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                text("first"),
                Inline::LineBreak,
                text("second third"),
            ])]
        );
    }

    #[test]
    fn test_renderer_port() {
        let doc = BlockMarkdownRenderer::new().render("# Overview\n\nIntro");
        assert_eq!(doc.title().as_deref(), Some("Overview"));
        assert_eq!(doc.blocks.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_markdown("").is_empty());
        assert!(parse_markdown("\n\n   \n").is_empty());
    }
}
