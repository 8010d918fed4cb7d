//! TypeScript printer
//!
//! Line-oriented emitter in the spirit of `EmitterVisitorContext`: statements
//! are written one per line with two-space indentation, expressions are
//! printed inline and parenthesized only where operator precedence requires.

use crate::node::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Write};

const INDENT_WITH: &str = "  ";

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").expect("valid identifier regex"));

/// Whether `name` can be written as a bare identifier or property name.
pub fn is_identifier_name(name: &str) -> bool {
    LEGAL_IDENTIFIER_RE.is_match(name)
}

// Expression precedence levels, highest binds tightest.
const PREC_LOWEST: u8 = 0;
const PREC_ASSIGNMENT: u8 = 2;
const PREC_CONDITIONAL: u8 = 3;
const PREC_RELATIONAL: u8 = 10;
const PREC_PREFIX: u8 = 15;
const PREC_POSTFIX: u8 = 16;
const PREC_MEMBER: u8 = 17;
const PREC_PRIMARY: u8 = 18;

fn precedence_of(expr: &Expression) -> u8 {
    match expr {
        Expression::Binary(b) => b.operator.precedence(),
        Expression::Conditional(_) => PREC_CONDITIONAL,
        Expression::As(_) => PREC_RELATIONAL,
        Expression::Prefix(..) => PREC_PREFIX,
        Expression::NonNull(_) => PREC_POSTFIX,
        Expression::PropertyAccess(_) | Expression::ElementAccess(_) | Expression::Call(_) => {
            PREC_MEMBER
        }
        Expression::Identifier(_)
        | Expression::Literal(_)
        | Expression::ObjectLiteral(_)
        | Expression::ArrayLiteral(_)
        | Expression::Parenthesized(_) => PREC_PRIMARY,
    }
}

fn is_logical(expr: &Expression) -> bool {
    matches!(
        expr,
        Expression::Binary(BinaryExpression {
            operator: BinaryOperator::And | BinaryOperator::Or,
            ..
        })
    )
}

fn is_nullish(expr: &Expression) -> bool {
    matches!(
        expr,
        Expression::Binary(BinaryExpression {
            operator: BinaryOperator::NullishCoalesce,
            ..
        })
    )
}

/// An expression statement must not begin with `{`, or it reads as a block.
fn starts_with_object_literal(expr: &Expression) -> bool {
    match expr {
        Expression::ObjectLiteral(_) => true,
        Expression::PropertyAccess(p) => starts_with_object_literal(&p.expression),
        Expression::ElementAccess(e) => starts_with_object_literal(&e.expression),
        Expression::Call(c) => starts_with_object_literal(&c.callee),
        Expression::Binary(b) => starts_with_object_literal(&b.left),
        Expression::Conditional(c) => starts_with_object_literal(&c.condition),
        Expression::As(a) => starts_with_object_literal(&a.expression),
        Expression::NonNull(e) => starts_with_object_literal(e),
        _ => false,
    }
}

fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Accumulates printed statements.
pub struct Printer {
    out: String,
    indent: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn println(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT_WITH);
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    pub fn print_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Variable(var) => {
                let mut line = format!("{} {}", var.kind.keyword(), var.name);
                if let Some(ty) = &var.type_annotation {
                    line.push_str(": ");
                    write_type(&mut line, ty);
                }
                if let Some(init) = &var.initializer {
                    line.push_str(" = ");
                    write_expression(&mut line, init, PREC_ASSIGNMENT);
                }
                line.push(';');
                self.println(&line);
            }
            Statement::Expression(expr) => {
                let mut line = String::new();
                if starts_with_object_literal(expr) {
                    line.push('(');
                    write_expression(&mut line, expr, PREC_LOWEST);
                    line.push(')');
                } else {
                    write_expression(&mut line, expr, PREC_LOWEST);
                }
                line.push(';');
                self.println(&line);
            }
            Statement::If(stmt) => {
                let mut line = String::from("if (");
                write_expression(&mut line, &stmt.condition, PREC_LOWEST);
                line.push_str(") {");
                self.println(&line);
                self.print_block_body(&stmt.then_statements);
                self.println("}");
            }
            Statement::Function(func) => self.print_function(func),
        }
    }

    pub fn print_function(&mut self, func: &FunctionDeclaration) {
        let mut line = format!("function {}", func.name);
        if !func.type_parameters.is_empty() {
            line.push('<');
            line.push_str(&func.type_parameters.join(", "));
            line.push('>');
        }
        line.push('(');
        for (i, param) in func.parameters.iter().enumerate() {
            if i > 0 {
                line.push_str(", ");
            }
            line.push_str(&param.name);
            if let Some(ty) = &param.type_annotation {
                line.push_str(": ");
                write_type(&mut line, ty);
            }
        }
        line.push_str(") {");
        self.println(&line);
        self.print_block_body(&func.body);
        self.println("}");
    }

    fn print_block_body(&mut self, statements: &[Statement]) {
        self.indent += 1;
        for stmt in statements {
            self.print_statement(stmt);
        }
        self.indent -= 1;
    }
}

/// Prints a list of statements at the top level.
pub fn print_statements(statements: &[Statement]) -> String {
    let mut printer = Printer::new();
    for stmt in statements {
        printer.print_statement(stmt);
    }
    printer.finish()
}

fn write_args(out: &mut String, args: &[Expression]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expression(out, arg, PREC_ASSIGNMENT);
    }
}

fn write_operand(out: &mut String, expr: &Expression, min_precedence: u8) {
    if precedence_of(expr) < min_precedence {
        out.push('(');
        write_expression(out, expr, PREC_LOWEST);
        out.push(')');
    } else {
        write_expression(out, expr, min_precedence);
    }
}

fn write_binary_operand(out: &mut String, parent: &BinaryExpression, child: &Expression, min: u8) {
    // `??` cannot be mixed with `&&`/`||` without parentheses.
    let mixes_nullish = (parent.operator == BinaryOperator::NullishCoalesce && is_logical(child))
        || (matches!(parent.operator, BinaryOperator::And | BinaryOperator::Or)
            && is_nullish(child));
    if mixes_nullish {
        out.push('(');
        write_expression(out, child, PREC_LOWEST);
        out.push(')');
    } else {
        write_operand(out, child, min);
    }
}

pub(crate) fn write_expression(out: &mut String, expr: &Expression, min_precedence: u8) {
    if precedence_of(expr) < min_precedence {
        out.push('(');
        write_expression(out, expr, PREC_LOWEST);
        out.push(')');
        return;
    }
    match expr {
        Expression::Identifier(name) => out.push_str(name),
        Expression::Literal(lit) => match lit {
            Literal::String(s) => out.push_str(&escape_string(s)),
            Literal::Number(n) => out.push_str(&format_number(*n)),
            Literal::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Literal::Null => out.push_str("null"),
            Literal::Undefined => out.push_str("undefined"),
        },
        Expression::PropertyAccess(access) => {
            write_operand(out, &access.expression, PREC_MEMBER);
            if is_identifier_name(&access.name) {
                out.push_str(if access.optional { "?." } else { "." });
                out.push_str(&access.name);
            } else {
                out.push_str(if access.optional { "?.[" } else { "[" });
                out.push_str(&escape_string(&access.name));
                out.push(']');
            }
        }
        Expression::ElementAccess(access) => {
            write_operand(out, &access.expression, PREC_MEMBER);
            out.push_str(if access.optional { "?.[" } else { "[" });
            write_expression(out, &access.argument, PREC_LOWEST);
            out.push(']');
        }
        Expression::Call(call) => {
            write_operand(out, &call.callee, PREC_MEMBER);
            out.push_str(if call.optional { "?.(" } else { "(" });
            write_args(out, &call.arguments);
            out.push(')');
        }
        Expression::ObjectLiteral(props) => {
            if props.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{ ");
            for (i, prop) in props.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if is_identifier_name(&prop.name) {
                    out.push_str(&prop.name);
                } else {
                    out.push_str(&escape_string(&prop.name));
                }
                out.push_str(": ");
                write_expression(out, &prop.value, PREC_ASSIGNMENT);
            }
            out.push_str(" }");
        }
        Expression::ArrayLiteral(elements) => {
            out.push('[');
            write_args(out, elements);
            out.push(']');
        }
        Expression::Binary(binary) => {
            let prec = binary.operator.precedence();
            let (left_min, right_min) = if binary.operator.is_right_associative() {
                (prec + 1, prec)
            } else {
                (prec, prec + 1)
            };
            write_binary_operand(out, binary, &binary.left, left_min);
            out.push(' ');
            out.push_str(binary.operator.token());
            out.push(' ');
            write_binary_operand(out, binary, &binary.right, right_min);
        }
        Expression::Prefix(op, operand) => {
            let token = op.token();
            let mut operand_text = String::new();
            write_operand(&mut operand_text, operand, PREC_PREFIX);
            out.push_str(token);
            // `- -x` must not collapse into the `--` decrement token.
            if matches!(op, PrefixOperator::Minus | PrefixOperator::Plus)
                && operand_text.starts_with(token)
            {
                out.push(' ');
            }
            out.push_str(&operand_text);
        }
        Expression::Conditional(cond) => {
            write_operand(out, &cond.condition, PREC_CONDITIONAL + 1);
            out.push_str(" ? ");
            write_operand(out, &cond.when_true, PREC_ASSIGNMENT);
            out.push_str(" : ");
            write_operand(out, &cond.when_false, PREC_ASSIGNMENT);
        }
        Expression::Parenthesized(inner) => {
            out.push('(');
            write_expression(out, inner, PREC_LOWEST);
            out.push(')');
        }
        Expression::As(cast) => {
            write_operand(out, &cast.expression, PREC_RELATIONAL);
            out.push_str(" as ");
            write_type(out, &cast.type_node);
        }
        Expression::NonNull(inner) => {
            write_operand(out, inner, PREC_POSTFIX);
            out.push('!');
        }
    }
}

pub(crate) fn write_type(out: &mut String, ty: &TypeNode) {
    match ty {
        TypeNode::Keyword(keyword) => out.push_str(keyword.keyword()),
        TypeNode::Reference(reference) => {
            write_expression(out, &reference.type_name, PREC_MEMBER);
            if !reference.type_arguments.is_empty() {
                out.push('<');
                for (i, arg) in reference.type_arguments.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(out, arg);
                }
                out.push('>');
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_expression(&mut out, self, PREC_LOWEST);
        f.write_str(&out)
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_type(&mut out, self);
        f.write_str(&out)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::new();
        printer.print_statement(self);
        f.write_str(printer.finish().trim_end())
    }
}

impl fmt::Display for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::new();
        printer.print_function(self);
        f.write_str(&printer.finish())
    }
}
