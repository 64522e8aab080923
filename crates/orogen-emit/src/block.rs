//! Ordered key/value blocks and the indentation-exact writer.

use crate::Scalar;

/// Indentation step of the output format: two spaces per nesting level.
const INDENT: &str = "  ";

/// One entry in a dashed sequence.
#[derive(Clone, Debug)]
pub enum Item {
    /// A bare value: `- stone`.
    Scalar(Scalar),
    /// A nested block whose first entry shares the dash line: `- type: REPLACE`.
    Entries(Block),
}

impl Item {
    /// A single `key: value` pair as a sequence entry, rendered on one line.
    pub fn pair(key: &str, value: impl Into<Scalar>) -> Self {
        let mut block = Block::new();
        block.scalar(key, value);
        Item::Entries(block)
    }
}

/// The value of a block entry.
#[derive(Clone, Debug)]
pub enum Value {
    /// A leaf, rendered on the key's own line.
    Scalar(Scalar),
    /// A nested mapping, rendered under the key one level deeper.
    Entries(Block),
    /// A dashed sequence, each element rendered with a `- ` prefix.
    Seq(Vec<Item>),
    /// An ordered node list: the key is repeated once per element.
    Repeated(Vec<Block>),
}

/// An ordered list of `key: value` entries.
///
/// Keys may repeat; emission preserves insertion order exactly. This is the
/// whole serializer-facing value algebra: domain types lower themselves to a
/// `Block` and never touch indentation directly.
#[derive(Clone, Debug, Default)]
pub struct Block {
    entries: Vec<(String, Value)>,
}

impl Block {
    /// Creates an empty block.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Returns `true` if the block has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry with an arbitrary value.
    pub fn entry(&mut self, key: &str, value: Value) {
        self.entries.push((key.to_string(), value));
    }

    /// Appends a `key: value` scalar entry.
    pub fn scalar(&mut self, key: &str, value: impl Into<Scalar>) {
        self.entry(key, Value::Scalar(value.into()));
    }

    /// Appends a nested block under `key`.
    pub fn block(&mut self, key: &str, child: Block) {
        self.entry(key, Value::Entries(child));
    }

    /// Appends a dashed sequence under `key`.
    pub fn seq(&mut self, key: &str, items: Vec<Item>) {
        self.entry(key, Value::Seq(items));
    }

    /// Appends an ordered node list, repeating `key` once per element.
    pub fn repeated(&mut self, key: &str, blocks: Vec<Block>) {
        self.entry(key, Value::Repeated(blocks));
    }

    /// Renders the block at the top level. Every line ends with `\n`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, level: usize) {
        let pad = INDENT.repeat(level);
        for (key, value) in &self.entries {
            match value {
                Value::Scalar(scalar) => {
                    out.push_str(&pad);
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(&scalar.to_string());
                    out.push('\n');
                }
                Value::Entries(child) => {
                    out.push_str(&pad);
                    out.push_str(key);
                    out.push_str(":\n");
                    child.render_into(out, level + 1);
                }
                Value::Seq(items) => {
                    out.push_str(&pad);
                    out.push_str(key);
                    out.push_str(":\n");
                    let item_pad = INDENT.repeat(level + 1);
                    for item in items {
                        render_item(item, out, &item_pad, level + 1);
                    }
                }
                Value::Repeated(blocks) => {
                    for block in blocks {
                        out.push_str(&pad);
                        out.push_str(key);
                        out.push_str(":\n");
                        block.render_into(out, level + 1);
                    }
                }
            }
        }
    }
}

fn render_item(item: &Item, out: &mut String, item_pad: &str, level: usize) {
    match item {
        Item::Scalar(scalar) => {
            out.push_str(item_pad);
            out.push_str("- ");
            out.push_str(&scalar.to_string());
            out.push('\n');
        }
        Item::Entries(block) => {
            let mut rendered = String::new();
            block.render_into(&mut rendered, level);
            // The first entry line shares the dash; continuation lines are
            // shifted two columns to stay aligned under it.
            for (index, line) in rendered.lines().enumerate() {
                if index == 0 {
                    out.push_str(item_pad);
                    out.push_str("- ");
                    out.push_str(line.trim_start());
                } else {
                    out.push_str(INDENT);
                    out.push_str(line);
                }
                out.push('\n');
            }
        }
    }
}
