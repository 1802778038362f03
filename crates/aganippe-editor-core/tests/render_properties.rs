use aganippe_editor_core::platform::RecordingRestorer;
use aganippe_editor_core::*;
use proptest::prelude::*;

type TokenizeFn = fn(&str) -> Result<Vec<Token>, TokenError>;

/// Plain text, or a single `*emphasis*` when the text is wrapped in stars.
fn tokenize(text: &str) -> Result<Vec<Token>, TokenError> {
    if text.len() >= 2 && text.starts_with('*') && text.ends_with('*') {
        let inner = &text[1..text.len() - 1];
        return Ok(vec![
            Token::new(TokenKind::Emphasis, "*", inner, 0..text.len())
                .with_children(vec![Token::text(inner, 1..text.len() - 1)]),
        ]);
    }
    Ok(vec![Token::text(text, 0..text.len())])
}

fn session() -> RenderSession<LiveTree, RecordingRestorer<NodePath>, TokenizeFn> {
    RenderSession::new(
        LiveTree::mount(Element::new("div").with_id("ag-editor-id")),
        RecordingRestorer::new(),
        BlockRenderer::new(tokenize as TokenizeFn),
        RenderConfig::default(),
    )
}

fn leaf_kind() -> impl Strategy<Value = BlockKind> {
    prop_oneof![
        Just(BlockKind::Paragraph),
        (1u8..=6).prop_map(BlockKind::Heading),
        Just(BlockKind::ListItem),
        Just(BlockKind::CodeBlock),
    ]
}

fn container_kind() -> impl Strategy<Value = BlockKind> {
    prop_oneof![
        Just(BlockKind::BlockQuote),
        Just(BlockKind::OrderedList),
        Just(BlockKind::UnorderedList),
        Just(BlockKind::Container),
    ]
}

fn block_tree() -> impl Strategy<Value = Block> {
    let leaf = (leaf_kind(), "[a-z *]{0,12}").prop_map(|(kind, text)| Block::leaf("", kind, text));
    leaf.prop_recursive(3, 24, 4, |inner| {
        (container_kind(), prop::collection::vec(inner, 1..4))
            .prop_map(|(kind, children)| Block::container("", kind, children))
    })
}

/// Give every block a unique key, depth first.
fn rekey(blocks: &mut [Block], next: &mut usize) {
    for block in blocks {
        block.key = format!("b{next}").into();
        *next += 1;
        rekey(&mut block.children, next);
    }
}

fn document() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec(block_tree(), 0..5).prop_map(|mut blocks| {
        let mut next = 0;
        rekey(&mut blocks, &mut next);
        blocks
    })
}

/// Cursor in a possibly missing block, possibly without a range, possibly reversed.
fn cursor() -> impl Strategy<Value = Option<Cursor>> {
    prop::option::of((0usize..32, prop::option::of((0usize..14, 0usize..14)))).prop_map(|c| {
        c.map(|(index, range)| Cursor {
            key: format!("b{index}").into(),
            range: range.map(|(start, end)| start..end),
        })
    })
}

fn ordered_range() -> impl Strategy<Value = std::ops::Range<usize>> {
    (0usize..50, 0usize..50).prop_map(|(a, b)| a.min(b)..a.max(b))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_ranges_conflict_is_strict_overlap(a in ordered_range(), b in ordered_range()) {
        let expected = a.start < b.end && b.start < a.end;
        prop_assert_eq!(ranges_conflict(&a, &b), expected);
        prop_assert_eq!(ranges_conflict(&b, &a), expected);

        if !a.is_empty() && !b.is_empty() {
            let shared = a.clone().any(|offset| b.contains(&offset));
            prop_assert_eq!(ranges_conflict(&a, &b), shared);
        }
    }

    #[test]
    fn prop_touching_ranges_never_conflict(a in ordered_range(), len in 0usize..10) {
        let after = a.end..a.end + len;
        prop_assert!(!ranges_conflict(&a, &after));
        prop_assert!(!ranges_conflict(&after, &a));
    }

    #[test]
    fn prop_other_block_never_conflicts(
        block_key in "[a-z]{1,6}",
        cursor_key in "[a-z]{1,6}",
        token_range in ordered_range(),
        start in 0usize..50,
        end in 0usize..50,
    ) {
        prop_assume!(block_key != cursor_key);
        let block = Block::paragraph(block_key.as_str(), "");
        let token = Token::new(TokenKind::Strong, "**", "", token_range);
        let cursor = Cursor {
            key: cursor_key.into(),
            range: Some(start..end),
        };
        prop_assert!(!is_conflicted(&block, &token, Some(&cursor)));
    }

    #[test]
    fn prop_conflict_ignores_range_direction(
        token_range in ordered_range(),
        start in 0usize..50,
        end in 0usize..50,
    ) {
        let block = Block::paragraph("b1", "");
        let token = Token::new(TokenKind::Emphasis, "*", "", token_range);
        let raw = Cursor {
            key: "b1".into(),
            range: Some(start..end),
        };
        let normalized = Cursor::new("b1", start..end);
        prop_assert_eq!(
            is_conflicted(&block, &token, Some(&raw)),
            is_conflicted(&block, &token, Some(&normalized))
        );
    }

    #[test]
    fn prop_second_render_is_noop(doc in document(), cursor in cursor()) {
        let mut session = session();
        session.render(&doc, cursor.as_ref()).unwrap();
        let report = session.render(&doc, cursor.as_ref()).unwrap();

        prop_assert_eq!(report.applied, 0);
        prop_assert_eq!(Some(session.engine().root()), session.baseline().tree());
    }

    #[test]
    fn prop_live_tree_converges(
        first in document(),
        second in document(),
        first_cursor in cursor(),
        second_cursor in cursor(),
    ) {
        let mut session = session();
        session.render(&first, first_cursor.as_ref()).unwrap();
        session.render(&second, second_cursor.as_ref()).unwrap();

        let expected = session.build_tree(&second, second_cursor.as_ref()).unwrap();
        prop_assert_eq!(session.engine().root(), &expected);
    }
}
