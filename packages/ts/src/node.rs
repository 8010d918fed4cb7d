//! TypeScript syntax nodes
//!
//! Only the shapes a type-check block is made of are modelled here. Nodes are
//! plain owned trees; the constructors on [`Expression`] and [`TypeNode`] play
//! the role of `ts.factory.create*`.

/// Keyword used by a variable statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Const,
    Let,
    Var,
}

impl VariableKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            VariableKind::Const => "const",
            VariableKind::Let => "let",
            VariableKind::Var => "var",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Assign,
    NullishCoalesce,
    Or,
    And,
    BitOr,
    BitAnd,
    Equals,
    NotEquals,
    IdentityEquals,
    IdentityNotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    In,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOperator {
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOperator::Assign => "=",
            BinaryOperator::NullishCoalesce => "??",
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::IdentityEquals => "===",
            BinaryOperator::IdentityNotEquals => "!==",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::In => "in",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "**",
        }
    }

    /// Parses the operator spelling used by template expressions.
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "=" => BinaryOperator::Assign,
            "??" => BinaryOperator::NullishCoalesce,
            "||" => BinaryOperator::Or,
            "&&" => BinaryOperator::And,
            "|" => BinaryOperator::BitOr,
            "&" => BinaryOperator::BitAnd,
            "==" => BinaryOperator::Equals,
            "!=" => BinaryOperator::NotEquals,
            "===" => BinaryOperator::IdentityEquals,
            "!==" => BinaryOperator::IdentityNotEquals,
            "<" => BinaryOperator::Less,
            "<=" => BinaryOperator::LessEquals,
            ">" => BinaryOperator::Greater,
            ">=" => BinaryOperator::GreaterEquals,
            "in" => BinaryOperator::In,
            "+" => BinaryOperator::Plus,
            "-" => BinaryOperator::Minus,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Modulo,
            "**" => BinaryOperator::Power,
            _ => return None,
        };
        Some(op)
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Assign => 2,
            BinaryOperator::NullishCoalesce | BinaryOperator::Or => 4,
            BinaryOperator::And => 5,
            BinaryOperator::BitOr => 6,
            BinaryOperator::BitAnd => 8,
            BinaryOperator::Equals
            | BinaryOperator::NotEquals
            | BinaryOperator::IdentityEquals
            | BinaryOperator::IdentityNotEquals => 9,
            BinaryOperator::Less
            | BinaryOperator::LessEquals
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEquals
            | BinaryOperator::In => 10,
            BinaryOperator::Plus | BinaryOperator::Minus => 12,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 13,
            BinaryOperator::Power => 14,
        }
    }

    pub(crate) fn is_right_associative(&self) -> bool {
        matches!(self, BinaryOperator::Assign | BinaryOperator::Power)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    Not,
    Minus,
    Plus,
    TypeOf,
    Void,
}

impl PrefixOperator {
    pub fn token(&self) -> &'static str {
        match self {
            PrefixOperator::Not => "!",
            PrefixOperator::Minus => "-",
            PrefixOperator::Plus => "+",
            PrefixOperator::TypeOf => "typeof ",
            PrefixOperator::Void => "void ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccessExpression {
    pub expression: Box<Expression>,
    pub name: String,
    /// `a?.b` rather than `a.b`.
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementAccessExpression {
    pub expression: Box<Expression>,
    pub argument: Box<Expression>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteralProperty {
    pub name: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub condition: Box<Expression>,
    pub when_true: Box<Expression>,
    pub when_false: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsExpression {
    pub expression: Box<Expression>,
    pub type_node: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    PropertyAccess(PropertyAccessExpression),
    ElementAccess(ElementAccessExpression),
    Call(CallExpression),
    Literal(Literal),
    ObjectLiteral(Vec<ObjectLiteralProperty>),
    ArrayLiteral(Vec<Expression>),
    Binary(BinaryExpression),
    Prefix(PrefixOperator, Box<Expression>),
    Conditional(ConditionalExpression),
    Parenthesized(Box<Expression>),
    As(AsExpression),
    NonNull(Box<Expression>),
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Expression::Literal(Literal::Number(value))
    }

    pub fn boolean(value: bool) -> Self {
        Expression::Literal(Literal::Boolean(value))
    }

    pub fn null() -> Self {
        Expression::Literal(Literal::Null)
    }

    pub fn undefined() -> Self {
        Expression::Literal(Literal::Undefined)
    }

    pub fn prop(self, name: impl Into<String>) -> Self {
        Expression::PropertyAccess(PropertyAccessExpression {
            expression: Box::new(self),
            name: name.into(),
            optional: false,
        })
    }

    pub fn optional_prop(self, name: impl Into<String>) -> Self {
        Expression::PropertyAccess(PropertyAccessExpression {
            expression: Box::new(self),
            name: name.into(),
            optional: true,
        })
    }

    pub fn key(self, argument: Expression, optional: bool) -> Self {
        Expression::ElementAccess(ElementAccessExpression {
            expression: Box::new(self),
            argument: Box::new(argument),
            optional,
        })
    }

    pub fn call(self, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            callee: Box::new(self),
            arguments,
            optional: false,
        })
    }

    pub fn optional_call(self, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            callee: Box::new(self),
            arguments,
            optional: true,
        })
    }

    /// `receiver.method(args)`
    pub fn call_method(self, method: impl Into<String>, arguments: Vec<Expression>) -> Self {
        self.prop(method).call(arguments)
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn and(self, right: Expression) -> Self {
        Expression::binary(self, BinaryOperator::And, right)
    }

    pub fn assign(self, value: Expression) -> Self {
        Expression::binary(self, BinaryOperator::Assign, value)
    }

    pub fn prefix(operator: PrefixOperator, operand: Expression) -> Self {
        Expression::Prefix(operator, Box::new(operand))
    }

    pub fn conditional(condition: Expression, when_true: Expression, when_false: Expression) -> Self {
        Expression::Conditional(ConditionalExpression {
            condition: Box::new(condition),
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        })
    }

    pub fn parens(self) -> Self {
        Expression::Parenthesized(Box::new(self))
    }

    pub fn cast(self, type_node: TypeNode) -> Self {
        Expression::As(AsExpression {
            expression: Box::new(self),
            type_node,
        })
    }

    pub fn non_null(self) -> Self {
        Expression::NonNull(Box::new(self))
    }

    pub fn object(properties: Vec<ObjectLiteralProperty>) -> Self {
        Expression::ObjectLiteral(properties)
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expression::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordType {
    Any,
    Unknown,
    Never,
    Boolean,
    Number,
    String,
}

impl KeywordType {
    pub fn keyword(&self) -> &'static str {
        match self {
            KeywordType::Any => "any",
            KeywordType::Unknown => "unknown",
            KeywordType::Never => "never",
            KeywordType::Boolean => "boolean",
            KeywordType::Number => "number",
            KeywordType::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    /// Identifier or qualified name (`i0.TemplateRef`) of the referenced type.
    pub type_name: Box<Expression>,
    pub type_arguments: Vec<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Keyword(KeywordType),
    Reference(TypeReference),
}

impl TypeNode {
    pub fn any() -> Self {
        TypeNode::Keyword(KeywordType::Any)
    }

    pub fn reference(type_name: Expression, type_arguments: Vec<TypeNode>) -> Self {
        TypeNode::Reference(TypeReference {
            type_name: Box::new(type_name),
            type_arguments,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableStatement {
    pub kind: VariableKind,
    pub name: String,
    pub type_annotation: Option<TypeNode>,
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Variable(VariableStatement),
    Expression(Expression),
    If(IfStatement),
    Function(FunctionDeclaration),
}

impl Statement {
    pub fn variable(
        kind: VariableKind,
        name: impl Into<String>,
        type_annotation: Option<TypeNode>,
        initializer: Option<Expression>,
    ) -> Self {
        Statement::Variable(VariableStatement {
            kind,
            name: name.into(),
            type_annotation,
            initializer,
        })
    }

    /// `const name = initializer;`
    pub fn constant(name: impl Into<String>, initializer: Expression) -> Self {
        Statement::variable(VariableKind::Const, name, None, Some(initializer))
    }

    pub fn expression(expression: Expression) -> Self {
        Statement::Expression(expression)
    }

    pub fn if_then(condition: Expression, then_statements: Vec<Statement>) -> Self {
        Statement::If(IfStatement {
            condition,
            then_statements,
        })
    }
}
