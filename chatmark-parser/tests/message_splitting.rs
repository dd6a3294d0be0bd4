//! End-to-end splitting of chat messages through the public API

use chatmark_parser::chatmark::{
    parse_message, split_fences, split_tokens, tokenize, Block, ItemKind, ParseError,
    ParseOptions, Segment, SpecialItem, Token,
};
use rstest::rstest;

fn fences(message: &str) -> Vec<(&str, bool)> {
    split_fences(message)
        .map(|segment| (segment.text, segment.preformatted))
        .collect()
}

#[rstest]
#[case("", vec![("", false)])]
#[case("asd", vec![("asd", false)])]
#[case("a ```a``` a", vec![("a ", false), ("a", true), (" a", false)])]
#[case("```a``` a", vec![("", false), ("a", true), (" a", false)])]
#[case("```a", vec![("", false), ("a", true)])]
fn splits_code_fences(#[case] message: &str, #[case] expected: Vec<(&str, bool)>) {
    assert_eq!(fences(message), expected);
}

#[test]
fn splits_special_items() {
    assert_eq!(tokenize("a b c d").unwrap(), vec![Token::Plain("a b c d")]);
    assert_eq!(
        tokenize("a <b> <c> d").unwrap(),
        vec![
            Token::Plain("a "),
            Token::Special(SpecialItem::new("<b>").unwrap()),
            Token::Plain(" "),
            Token::Special(SpecialItem::new("<c>").unwrap()),
            Token::Plain(" d"),
        ]
    );
}

#[test]
fn consumer_flow_over_a_real_message() {
    let message = "<!here> <@U024BE7LH> pushed to <#C024BE7LR|general>:\n```cargo test <x>```\nsee <https://ci.example.com/42|build 42>";

    let mut mentions = Vec::new();
    let mut code = Vec::new();
    for segment in split_fences(message) {
        if segment.preformatted {
            code.push(segment.text);
            continue;
        }
        for token in split_tokens(segment.text) {
            if let Token::Special(item) = token.unwrap() {
                mentions.push((item.kind(), item.value(), item.human()));
            }
        }
    }

    assert_eq!(code, vec!["cargo test <x>"]);
    assert_eq!(
        mentions,
        vec![
            (ItemKind::GroupMention, "here", None),
            (ItemKind::Mention, "U024BE7LH", None),
            (ItemKind::Channel, "C024BE7LR", Some("general")),
            (
                ItemKind::Other,
                "https://ci.example.com/42",
                Some("build 42")
            ),
        ]
    );
}

#[test]
fn tokens_before_a_dangling_bracket_are_kept() {
    let results: Vec<_> = split_tokens("fine <@U1> broken <here").collect();
    assert_eq!(results.len(), 4);
    assert!(results[..3].iter().all(Result::is_ok));
    assert_eq!(results[3], Err(ParseError::MalformedToken { offset: 18 }));
}

#[test]
fn parse_message_serializes_to_json() {
    let blocks = parse_message("hi <@U1>```x```", &ParseOptions::default()).unwrap();
    let json = serde_json::to_value(&blocks).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {
                "type": "text",
                "content": [
                    { "type": "plain", "content": "hi " },
                    {
                        "type": "special",
                        "content": {
                            "raw": "<@U1>",
                            "kind": "mention",
                            "value": "U1",
                            "human": null
                        }
                    }
                ]
            },
            { "type": "preformatted", "content": "x" },
            { "type": "text", "content": [] }
        ])
    );
    assert!(matches!(blocks[1], Block::Preformatted("x")));
}

#[test]
fn segments_serialize_as_text_and_flag() {
    let segments: Vec<Segment<'_>> = split_fences("a```b").collect();
    assert_eq!(
        serde_json::to_value(&segments).unwrap(),
        serde_json::json!([
            { "text": "a", "preformatted": false },
            { "text": "b", "preformatted": true }
        ])
    );
}

#[test]
fn error_offsets_point_into_the_whole_message() {
    let message = "```x``` <b";
    let err = parse_message(message, &ParseOptions::default()).unwrap_err();
    assert_eq!(err, ParseError::MalformedToken { offset: 8 });
    assert!(err.to_string().contains("byte 8"));
}
