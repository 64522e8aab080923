//! Symbolic arithmetic over named meta variables.
//!
//! A [`MetaExpression`] starts as a bare reference to an engine-resolved
//! variable and accumulates binary operations. The rendered text must match
//! the engine's interpolation grammar character for character: `$name` for an
//! untouched reference, `${name}` once embedded, and the accumulated form
//! re-wrapped in braces (without a leading `$`) on every further operation.
//! That asymmetry is a compatibility contract, not a bug.

use std::mem;

/// Binary operator applied to a meta expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExprOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl ExprOp {
    fn symbol(self) -> char {
        match self {
            ExprOp::Add => '+',
            ExprOp::Sub => '-',
            ExprOp::Mul => '*',
            ExprOp::Div => '/',
        }
    }
}

/// Right-hand side of an applied operation.
#[derive(Clone, Debug)]
pub enum Operand {
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// Another expression, untouched or already operated on.
    Expression(MetaExpression),
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Int(v)
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Int(v as i64)
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Float(v)
    }
}

impl From<MetaExpression> for Operand {
    fn from(v: MetaExpression) -> Self {
        Operand::Expression(v)
    }
}

#[derive(Clone, Debug)]
enum Node {
    Var(String),
    Int(i64),
    Float(f64),
    Binary {
        lhs: Box<Node>,
        op: ExprOp,
        rhs: Box<Node>,
    },
}

/// A deferred arithmetic expression over a named meta variable.
///
/// Operations mutate the accumulated state; [`render`](Self::render) is pure
/// and idempotent for a given state.
#[derive(Clone, Debug)]
pub struct MetaExpression {
    root: Node,
}

impl MetaExpression {
    /// Creates an untouched reference to the named variable.
    pub fn new(name: &str) -> Self {
        Self {
            root: Node::Var(name.to_string()),
        }
    }

    /// Returns `true` if no operation has been applied yet.
    pub fn is_untouched(&self) -> bool {
        matches!(self.root, Node::Var(_))
    }

    /// Applies a binary operation against a literal or another expression.
    pub fn apply(&mut self, operand: impl Into<Operand>, op: ExprOp) {
        let rhs = match operand.into() {
            Operand::Int(v) => Node::Int(v),
            Operand::Float(v) => Node::Float(v),
            Operand::Expression(expr) => expr.root,
        };
        let lhs = mem::replace(&mut self.root, Node::Int(0));
        self.root = Node::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        };
    }

    /// Renders the expression in the engine's interpolation grammar.
    ///
    /// Untouched expressions render `$name`; operated expressions render the
    /// accumulated composite after a literal-folding simplification pass.
    pub fn render(&self) -> String {
        match &self.root {
            Node::Var(name) => format!("${name}"),
            root => simplify(&render_node(root)),
        }
    }
}

fn render_literal_f64(v: f64) -> String {
    format!("{v}")
}

fn render_node(node: &Node) -> String {
    match node {
        Node::Var(name) => format!("${{{name}}}"),
        Node::Int(v) => v.to_string(),
        Node::Float(v) => render_literal_f64(*v),
        Node::Binary { lhs, op, rhs } => {
            let lhs_text = match lhs.as_ref() {
                // The base variable embeds as an interpolation.
                Node::Var(name) => format!("${{{name}}}"),
                // An accumulated form re-wraps in braces, dropping the `$`.
                Node::Binary { .. } => format!("{{{}}}", render_node(lhs)),
                Node::Int(v) => v.to_string(),
                Node::Float(v) => render_literal_f64(*v),
            };
            let rhs_text = match rhs.as_ref() {
                Node::Var(name) => format!("${{{name}}}"),
                // An operated operand is parenthesized.
                Node::Binary { .. } => format!("({})", render_node(rhs)),
                Node::Int(v) => v.to_string(),
                Node::Float(v) => render_literal_f64(*v),
            };
            format!("{lhs_text}{}{rhs_text}", op.symbol())
        }
    }
}

// ---------------------------------------------------------------------------
// Literal folding
// ---------------------------------------------------------------------------

/// Collapses adjacent bare literal add/subtract runs, to a fixpoint.
///
/// A literal is bare when it does not sit inside an interpolation and is not
/// bound to a higher-precedence neighbor: the character before it must be a
/// group opener, a `+`, or the start of the string, and the character after
/// the run must not be `*` or `/`.
fn simplify(input: &str) -> String {
    let mut current = input.to_string();
    while let Some((start, end, replacement)) = find_fold(&current) {
        current.replace_range(start..end, &replacement);
    }
    current
}

fn find_fold(s: &str) -> Option<(usize, usize, String)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let (a_end, a_is_float) = scan_number(bytes, i);
        let bare = i == 0 || matches!(bytes[i - 1], b'+' | b'{' | b'(');
        if bare && a_end < bytes.len() && matches!(bytes[a_end], b'+' | b'-') {
            let op = bytes[a_end];
            let b_start = a_end + 1;
            if b_start < bytes.len() && bytes[b_start].is_ascii_digit() {
                let (b_end, b_is_float) = scan_number(bytes, b_start);
                let follower_ok =
                    b_end == bytes.len() || matches!(bytes[b_end], b'+' | b'-' | b'}' | b')');
                if follower_ok {
                    let replacement =
                        fold(&s[i..a_end], &s[b_start..b_end], op, a_is_float || b_is_float);
                    return Some((i, b_end, replacement));
                }
            }
        }
        i = a_end;
    }
    None
}

fn scan_number(bytes: &[u8], start: usize) -> (usize, bool) {
    let mut i = start;
    let mut saw_dot = false;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            i += 1;
        } else if bytes[i] == b'.' && !saw_dot && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit()
        {
            saw_dot = true;
            i += 1;
        } else {
            break;
        }
    }
    (i, saw_dot)
}

fn fold(a: &str, b: &str, op: u8, float: bool) -> String {
    if float {
        let a: f64 = a.parse().unwrap_or(0.0);
        let b: f64 = b.parse().unwrap_or(0.0);
        let folded = if op == b'+' { a + b } else { a - b };
        render_literal_f64(folded)
    } else {
        let a: i64 = a.parse().unwrap_or(0);
        let b: i64 = b.parse().unwrap_or(0);
        let folded = if op == b'+' { a + b } else { a - b };
        folded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_renders_plain_reference() {
        assert_eq!(MetaExpression::new("x").render(), "$x");
        assert_eq!(MetaExpression::new("ocean-level").render(), "$ocean-level");
    }

    #[test]
    fn test_first_operation_interpolates() {
        let mut expr = MetaExpression::new("x");
        expr.apply(5, ExprOp::Add);
        assert_eq!(expr.render(), "${x}+5");
    }

    #[test]
    fn test_second_operation_rewraps_without_dollar() {
        let mut expr = MetaExpression::new("x");
        expr.apply(5, ExprOp::Add);
        expr.apply(2, ExprOp::Mul);
        assert_eq!(expr.render(), "{${x}+5}*2");
    }

    #[test]
    fn test_untouched_operand_embeds_as_interpolation() {
        let mut expr = MetaExpression::new("x");
        expr.apply(MetaExpression::new("y"), ExprOp::Add);
        assert_eq!(expr.render(), "${x}+${y}");
    }

    #[test]
    fn test_operated_operand_is_parenthesized() {
        let mut inner = MetaExpression::new("y");
        inner.apply(2, ExprOp::Add);
        let mut expr = MetaExpression::new("x");
        expr.apply(inner, ExprOp::Mul);
        assert_eq!(expr.render(), "${x}*(${y}+2)");
    }

    #[test]
    fn test_float_operand() {
        let mut expr = MetaExpression::new("scale");
        expr.apply(0.5, ExprOp::Mul);
        assert_eq!(expr.render(), "${scale}*0.5");
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut expr = MetaExpression::new("x");
        expr.apply(5, ExprOp::Add);
        expr.apply(2, ExprOp::Mul);
        assert_eq!(expr.render(), expr.render());
    }

    #[test]
    fn test_deep_accumulation_keeps_wrapping() {
        let mut expr = MetaExpression::new("h");
        expr.apply(1, ExprOp::Add);
        expr.apply(2, ExprOp::Mul);
        expr.apply(3, ExprOp::Sub);
        assert_eq!(expr.render(), "{{${h}+1}*2}-3");
    }

    #[test]
    fn test_simplify_folds_bare_literal_run() {
        assert_eq!(simplify("2+3+4"), "9");
        assert_eq!(simplify("{3+4}*2"), "{7}*2");
        assert_eq!(simplify("(10-1)+2"), "(9)+2");
    }

    #[test]
    fn test_simplify_respects_precedence_neighbors() {
        assert_eq!(simplify("3*4+2"), "3*4+2");
        assert_eq!(simplify("3+2*5"), "3+2*5");
    }

    #[test]
    fn test_simplify_leaves_interpolations_alone() {
        assert_eq!(simplify("${x}+5"), "${x}+5");
        assert_eq!(simplify("{${x}+5}*2"), "{${x}+5}*2");
        assert_eq!(simplify("${x2}+1"), "${x2}+1");
    }

    #[test]
    fn test_simplify_folds_floats() {
        assert_eq!(simplify("{1.5+2.5}*2"), "{4}*2");
    }
}
