/**
 * Angular Expression AST
 *
 * The binding-expression node types a template carries once parsed. Only the
 * forms that can appear in property bindings and interpolations are modelled.
 */

use serde::{Deserialize, Serialize};

/// Source span relative to the start of the expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }

    pub fn to_absolute(&self, absolute_offset: usize) -> AbsoluteSourceSpan {
        AbsoluteSourceSpan::new(absolute_offset + self.start, absolute_offset + self.end)
    }
}

/// Absolute source span for mapping back to source.
///
/// Two distinct nodes of one template never share an absolute span, so the
/// binder keys expression targets by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsoluteSourceSpan {
    pub start: usize,
    pub end: usize,
}

impl AbsoluteSourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        AbsoluteSourceSpan { start, end }
    }
}

/// Main AST enum containing all node types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AST {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    ThisReceiver(ThisReceiver),
    Conditional(Conditional),
    PropertyRead(PropertyRead),
    SafePropertyRead(SafePropertyRead),
    KeyedRead(KeyedRead),
    SafeKeyedRead(SafeKeyedRead),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    LiteralMap(LiteralMap),
    Interpolation(Interpolation),
    Binary(Binary),
    PrefixNot(PrefixNot),
    Unary(Unary),
    NonNullAssert(NonNullAssert),
    Call(Call),
    SafeCall(SafeCall),
    ParenthesizedExpression(ParenthesizedExpression),
}

/// Empty expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyExpr {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Implicit receiver (the component instance)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// This receiver (explicit `this`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThisReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Ternary conditional (e.g., `condition ? true : false`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditional {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// Property read (e.g., `obj.property`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// Safe property read (e.g., `obj?.property`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafePropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// Keyed read (e.g., `obj[key]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

/// Safe keyed read (e.g., `obj?.[key]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeKeyedRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

/// Literal primitive (string, number, boolean, null)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "literalType")]
pub enum LiteralPrimitive {
    String {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        value: String,
    },
    Number {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        value: f64,
    },
    Boolean {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        value: bool,
    },
    Null {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
    },
    Undefined {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
    },
}

/// Array literal (e.g., `[1, 2, 3]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralArray {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

/// Map literal key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralMapKey {
    pub key: String,
    pub quoted: bool,
}

/// Object literal (e.g., `{a: 1, b: 2}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralMap {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub keys: Vec<LiteralMapKey>,
    pub values: Vec<AST>,
}

/// Interpolation (`a {{b}} c`), `strings` has one more entry than `expressions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpolation {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub strings: Vec<String>,
    pub expressions: Vec<AST>,
}

/// Binary operator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

/// Prefix not operator (e.g., `!expr`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

/// Unary operator (e.g., `+expr`, `-expr`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operator: String,
    pub expr: Box<AST>,
}

/// Non-null assertion (e.g., `expr!`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonNullAssert {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

/// Function call (e.g., `fn(a, b)`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
}

/// Safe function call (e.g., `fn?.(a, b)`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeCall {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
}

/// Parenthesized expression (e.g., `(a + b)`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParenthesizedExpression {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

impl ImplicitReceiver {
    pub fn new(span: ParseSpan, source_span: AbsoluteSourceSpan) -> Self {
        ImplicitReceiver { span, source_span }
    }
}

impl PropertyRead {
    pub fn new(
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        name_span: AbsoluteSourceSpan,
        receiver: Box<AST>,
        name: String,
    ) -> Self {
        PropertyRead {
            span,
            source_span,
            name_span,
            receiver,
            name,
        }
    }
}

impl LiteralPrimitive {
    pub fn string(span: ParseSpan, source_span: AbsoluteSourceSpan, value: String) -> Self {
        LiteralPrimitive::String {
            span,
            source_span,
            value,
        }
    }

    pub fn number(span: ParseSpan, source_span: AbsoluteSourceSpan, value: f64) -> Self {
        LiteralPrimitive::Number {
            span,
            source_span,
            value,
        }
    }

    pub fn boolean(span: ParseSpan, source_span: AbsoluteSourceSpan, value: bool) -> Self {
        LiteralPrimitive::Boolean {
            span,
            source_span,
            value,
        }
    }

    pub fn null(span: ParseSpan, source_span: AbsoluteSourceSpan) -> Self {
        LiteralPrimitive::Null { span, source_span }
    }

    pub fn undefined(span: ParseSpan, source_span: AbsoluteSourceSpan) -> Self {
        LiteralPrimitive::Undefined { span, source_span }
    }

    fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            LiteralPrimitive::String { source_span, .. }
            | LiteralPrimitive::Number { source_span, .. }
            | LiteralPrimitive::Boolean { source_span, .. }
            | LiteralPrimitive::Null { source_span, .. }
            | LiteralPrimitive::Undefined { source_span, .. } => *source_span,
        }
    }
}

/// Pre-order walk over an expression and all of its sub-expressions.
pub fn walk_ast<F: FnMut(&AST)>(ast: &AST, f: &mut F) {
    f(ast);
    match ast {
        AST::Conditional(c) => {
            walk_ast(&c.condition, f);
            walk_ast(&c.true_exp, f);
            walk_ast(&c.false_exp, f);
        }
        AST::PropertyRead(p) => walk_ast(&p.receiver, f),
        AST::SafePropertyRead(p) => walk_ast(&p.receiver, f),
        AST::KeyedRead(k) => {
            walk_ast(&k.receiver, f);
            walk_ast(&k.key, f);
        }
        AST::SafeKeyedRead(k) => {
            walk_ast(&k.receiver, f);
            walk_ast(&k.key, f);
        }
        AST::LiteralArray(a) => a.expressions.iter().for_each(|e| walk_ast(e, f)),
        AST::LiteralMap(m) => m.values.iter().for_each(|v| walk_ast(v, f)),
        AST::Interpolation(i) => i.expressions.iter().for_each(|e| walk_ast(e, f)),
        AST::Binary(b) => {
            walk_ast(&b.left, f);
            walk_ast(&b.right, f);
        }
        AST::PrefixNot(p) => walk_ast(&p.expression, f),
        AST::Unary(u) => walk_ast(&u.expr, f),
        AST::NonNullAssert(n) => walk_ast(&n.expression, f),
        AST::Call(c) => {
            walk_ast(&c.receiver, f);
            c.args.iter().for_each(|a| walk_ast(a, f));
        }
        AST::SafeCall(c) => {
            walk_ast(&c.receiver, f);
            c.args.iter().for_each(|a| walk_ast(a, f));
        }
        AST::ParenthesizedExpression(p) => walk_ast(&p.expression, f),
        AST::EmptyExpr(_)
        | AST::ImplicitReceiver(_)
        | AST::ThisReceiver(_)
        | AST::LiteralPrimitive(_) => {}
    }
}

impl AST {
    pub fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            AST::EmptyExpr(e) => e.source_span,
            AST::ImplicitReceiver(e) => e.source_span,
            AST::ThisReceiver(e) => e.source_span,
            AST::Conditional(e) => e.source_span,
            AST::PropertyRead(e) => e.source_span,
            AST::SafePropertyRead(e) => e.source_span,
            AST::KeyedRead(e) => e.source_span,
            AST::SafeKeyedRead(e) => e.source_span,
            AST::LiteralPrimitive(e) => e.source_span(),
            AST::LiteralArray(e) => e.source_span,
            AST::LiteralMap(e) => e.source_span,
            AST::Interpolation(e) => e.source_span,
            AST::Binary(e) => e.source_span,
            AST::PrefixNot(e) => e.source_span,
            AST::Unary(e) => e.source_span,
            AST::NonNullAssert(e) => e.source_span,
            AST::Call(e) => e.source_span,
            AST::SafeCall(e) => e.source_span,
            AST::ParenthesizedExpression(e) => e.source_span,
        }
    }

    pub fn is_implicit_receiver(&self) -> bool {
        matches!(self, AST::ImplicitReceiver(_))
    }
}
