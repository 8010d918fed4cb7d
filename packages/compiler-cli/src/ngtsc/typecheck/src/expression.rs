// TypeCheck Expression Translation
//
// Converts binding expressions into host expressions for a type-check block.

use angular_compiler::expression_parser::ast::{LiteralPrimitive, AST};
use ts::{BinaryOperator, Expression, ObjectLiteralProperty, PrefixOperator};

use super::super::api::TcbError;

/// Callback the translator consults before translating a node itself.
///
/// `Ok(Some(expr))` replaces the node with `expr`; `Ok(None)` lets the translator
/// continue with its own rules.
pub type ResolveFn<'r> = dyn FnMut(&AST) -> Result<Option<Expression>, TcbError> + 'r;

/// Translates a single template expression into a host expression.
pub trait ExpressionTranslator: Send + Sync {
    fn translate(&self, ast: &AST, resolve: &mut ResolveFn<'_>) -> Result<Expression, TcbError>;
}

/// Default translator used for type-check blocks.
///
/// Reads off the implicit receiver go through the component instance `ctx`
/// unless the resolver supplies a template-local value.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcbExpressionTranslator;

impl ExpressionTranslator for TcbExpressionTranslator {
    fn translate(&self, ast: &AST, resolve: &mut ResolveFn<'_>) -> Result<Expression, TcbError> {
        if let Some(resolved) = resolve(ast)? {
            return Ok(resolved);
        }

        let expr = match ast {
            AST::EmptyExpr(_) => Expression::undefined(),
            AST::ImplicitReceiver(_) | AST::ThisReceiver(_) => Expression::identifier("ctx"),
            AST::PropertyRead(read) => self.translate(&read.receiver, resolve)?.prop(&read.name),
            AST::SafePropertyRead(read) => self
                .translate(&read.receiver, resolve)?
                .optional_prop(&read.name),
            AST::KeyedRead(read) => {
                let receiver = self.translate(&read.receiver, resolve)?;
                receiver.key(self.translate(&read.key, resolve)?, false)
            }
            AST::SafeKeyedRead(read) => {
                let receiver = self.translate(&read.receiver, resolve)?;
                receiver.key(self.translate(&read.key, resolve)?, true)
            }
            AST::Call(call) => {
                let callee = self.translate(&call.receiver, resolve)?;
                callee.call(self.translate_all(&call.args, resolve)?)
            }
            AST::SafeCall(call) => {
                let callee = self.translate(&call.receiver, resolve)?;
                callee.optional_call(self.translate_all(&call.args, resolve)?)
            }
            AST::LiteralPrimitive(literal) => translate_literal(literal),
            AST::LiteralArray(array) => {
                Expression::ArrayLiteral(self.translate_all(&array.expressions, resolve)?)
            }
            AST::LiteralMap(map) => {
                let mut properties = Vec::with_capacity(map.keys.len());
                for (key, value) in map.keys.iter().zip(&map.values) {
                    properties.push(ObjectLiteralProperty {
                        name: key.key.clone(),
                        value: self.translate(value, resolve)?,
                    });
                }
                Expression::object(properties)
            }
            AST::Interpolation(interpolation) => {
                // `"" + a + b` keeps the type of the interpolation a string.
                let mut result = Expression::string("");
                for expr in &interpolation.expressions {
                    let part = self.translate(expr, resolve)?;
                    result = Expression::binary(result, BinaryOperator::Plus, part);
                }
                result
            }
            AST::Binary(binary) => {
                let operator = BinaryOperator::from_token(&binary.operation).ok_or_else(|| {
                    TcbError::UnsupportedExpression(format!(
                        "binary operator '{}'",
                        binary.operation
                    ))
                })?;
                let left = self.translate(&binary.left, resolve)?;
                let right = self.translate(&binary.right, resolve)?;
                Expression::binary(left, operator, right).parens()
            }
            AST::PrefixNot(not) => {
                Expression::prefix(PrefixOperator::Not, self.translate(&not.expression, resolve)?)
            }
            AST::Unary(unary) => {
                let operator = match unary.operator.as_str() {
                    "-" => PrefixOperator::Minus,
                    "+" => PrefixOperator::Plus,
                    other => {
                        return Err(TcbError::UnsupportedExpression(format!(
                            "unary operator '{}'",
                            other
                        )))
                    }
                };
                Expression::prefix(operator, self.translate(&unary.expr, resolve)?)
            }
            AST::Conditional(conditional) => Expression::conditional(
                self.translate(&conditional.condition, resolve)?,
                self.translate(&conditional.true_exp, resolve)?,
                self.translate(&conditional.false_exp, resolve)?,
            )
            .parens(),
            AST::NonNullAssert(assert) => self.translate(&assert.expression, resolve)?.non_null(),
            AST::ParenthesizedExpression(inner) => {
                self.translate(&inner.expression, resolve)?.parens()
            }
        };
        Ok(expr)
    }
}

impl TcbExpressionTranslator {
    fn translate_all(
        &self,
        asts: &[AST],
        resolve: &mut ResolveFn<'_>,
    ) -> Result<Vec<Expression>, TcbError> {
        asts.iter().map(|ast| self.translate(ast, resolve)).collect()
    }
}

fn translate_literal(literal: &LiteralPrimitive) -> Expression {
    match literal {
        LiteralPrimitive::String { value, .. } => Expression::string(value.clone()),
        LiteralPrimitive::Number { value, .. } => Expression::number(*value),
        LiteralPrimitive::Boolean { value, .. } => Expression::boolean(*value),
        LiteralPrimitive::Null { .. } => Expression::null(),
        LiteralPrimitive::Undefined { .. } => Expression::undefined(),
    }
}
