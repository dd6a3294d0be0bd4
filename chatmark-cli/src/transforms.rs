//! CLI output rendering
//!
//! Turns parsed blocks and special items into the text the CLI prints. Two
//! formats are available: JSON (one value per message) and a simple line
//! oriented listing meant for reading in a terminal.

use chatmark_config::OutputFormat;
use chatmark_parser::chatmark::entities::unescape;
use chatmark_parser::chatmark::{Block, SpecialItem, Token};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

/// Output knobs shared by every subcommand
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub unescape: bool,
}

/// Render the blocks of one message
pub fn render_blocks(blocks: &[Block<'_>], options: &RenderOptions) -> Result<String, String> {
    match options.format {
        OutputFormat::Json => {
            let mut value = to_json_value(blocks)?;
            if options.unescape {
                decode_blocks_json(&mut value);
            }
            to_json_string(&value, options.pretty)
        }
        OutputFormat::Simple => Ok(blocks_to_simple(blocks, options.unescape)),
    }
}

/// Render a single special item
pub fn render_item(item: &SpecialItem<'_>, options: &RenderOptions) -> Result<String, String> {
    match options.format {
        OutputFormat::Json => {
            let mut value = to_json_value(item)?;
            if options.unescape {
                decode_item_json(&mut value);
            }
            to_json_string(&value, options.pretty)
        }
        OutputFormat::Simple => {
            let human = item
                .human()
                .map(|h| decode(h, options.unescape))
                .unwrap_or_else(|| "-".to_string());
            Ok(format!(
                "kind: {}\nvalue: {}\nhuman: {}",
                item.kind().as_str(),
                item.value(),
                human
            ))
        }
    }
}

fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("JSON serialization failed: {}", e))
}

fn to_json_string(value: &Value, pretty: bool) -> Result<String, String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| format!("JSON serialization failed: {}", e))
}

/// Decode entities in plain runs and labels of serialized blocks
fn decode_blocks_json(blocks: &mut Value) {
    let Some(blocks) = blocks.as_array_mut() else {
        return;
    };
    for block in blocks {
        if block["type"] != "text" {
            continue;
        }
        let Some(tokens) = block.get_mut("content").and_then(Value::as_array_mut) else {
            continue;
        };
        for token in tokens {
            let is_plain = token["type"] == "plain";
            let Some(content) = token.get_mut("content") else {
                continue;
            };
            if is_plain {
                decode_string(content);
            } else {
                decode_item_json(content);
            }
        }
    }
}

fn decode_item_json(item: &mut Value) {
    if let Some(human) = item.get_mut("human") {
        decode_string(human);
    }
}

fn decode_string(value: &mut Value) {
    if let Value::String(text) = value {
        let decoded = match unescape(text) {
            Cow::Owned(decoded) => decoded,
            Cow::Borrowed(_) => return,
        };
        *text = decoded;
    }
}

fn blocks_to_simple(blocks: &[Block<'_>], unescape: bool) -> String {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            Block::Preformatted(text) => lines.push(format!("pre: {:?}", text)),
            Block::Text(tokens) => {
                for token in tokens {
                    match token {
                        Token::Plain(text) => {
                            lines.push(format!("text: {:?}", decode(text, unescape)))
                        }
                        Token::Special(item) => {
                            let mut line = format!("{}: {}", item.kind().as_str(), item.value());
                            if let Some(human) = item.human() {
                                line.push_str(" | ");
                                line.push_str(&decode(human, unescape));
                            }
                            lines.push(line);
                        }
                    }
                }
            }
        }
    }
    lines.join("\n")
}

fn decode(text: &str, unescape_entities: bool) -> String {
    if unescape_entities {
        unescape(text).into_owned()
    } else {
        text.to_string()
    }
}
