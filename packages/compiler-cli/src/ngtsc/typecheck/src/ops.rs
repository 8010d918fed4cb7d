// TypeCheck Block Operations
//
// Each operation emits the statements for one piece of the template and may
// produce an identifier other operations refer to.

use std::collections::HashMap;

use angular_compiler::expression_parser::ast::AST;
use angular_compiler::render3::r3_ast::{
    BoundAttribute, BoundText, Element, NodeId, Template, TemplateAttr, TextAttribute, Variable,
};
use indexmap::IndexMap;
use smallvec::SmallVec;
use ts::{Expression, ObjectLiteralProperty, Statement, TypeNode, VariableKind};

use super::super::api::{TcbError, TypeCheckableDirectiveMeta};
use super::scope::{Scope, ScopeId};
use super::type_check_block::{tcb_resolve, Context};

/// A node directives can be attached to.
#[derive(Debug, Clone, Copy)]
pub enum DirectiveHost<'t> {
    Element(&'t Element),
    Template(&'t Template),
}

impl<'t> DirectiveHost<'t> {
    pub fn id(&self) -> NodeId {
        match *self {
            DirectiveHost::Element(element) => element.id,
            DirectiveHost::Template(template) => template.id,
        }
    }

    pub fn inputs(&self) -> &'t [BoundAttribute] {
        match *self {
            DirectiveHost::Element(element) => &element.inputs,
            DirectiveHost::Template(template) => &template.inputs,
        }
    }

    pub fn attributes(&self) -> &'t [TextAttribute] {
        match *self {
            DirectiveHost::Element(element) => &element.attributes,
            DirectiveHost::Template(template) => &template.attributes,
        }
    }

    /// Attributes from a structural-directive shorthand; elements have none.
    pub fn template_attrs(&self) -> &'t [TemplateAttr] {
        match *self {
            DirectiveHost::Element(_) => &[],
            DirectiveHost::Template(template) => &template.template_attrs,
        }
    }
}

/// A unit of type-check block generation.
#[derive(Debug)]
pub enum TcbOp<'t> {
    /// `const _tN = document.createElement("tag");`
    Element(&'t Element),
    /// `const _tN = _tCtx.<value>;` for a variable of a nested template.
    Variable {
        template: &'t Template,
        variable: &'t Variable,
    },
    /// `var _tN: any;`, the context of a nested template.
    TemplateContext,
    /// `if (<guards>) { <nested template> }`
    TemplateBody(&'t Template),
    /// `<expr>;` for a text interpolation.
    TextInterpolation(&'t BoundText),
    /// `const _tN = Dir.ngTypeCtor({ ... });`
    DirectiveInstantiate {
        host: DirectiveHost<'t>,
        directive: &'t TypeCheckableDirectiveMeta,
    },
    /// `_tEl.<name> = <expr>;` for inputs no directive claims.
    UnclaimedInputs {
        element: &'t Element,
        unclaimed: Vec<&'t str>,
    },
}

impl<'t> TcbOp<'t> {
    /// Run the operation within scope `scope`, returning the identifier it declares, if any.
    pub fn execute(
        self,
        ctx: &mut Context<'t>,
        scope: ScopeId,
    ) -> Result<Option<Expression>, TcbError> {
        match self {
            TcbOp::Element(element) => {
                let id = ctx.allocate_id();
                let create = Expression::identifier("document").call_method(
                    "createElement",
                    vec![Expression::string(element.name.clone())],
                );
                ctx.scopes[scope.0].add_statement(Statement::constant(id.clone(), create));
                Ok(Some(Expression::identifier(id)))
            }
            TcbOp::Variable { template, variable } => {
                let id = ctx.allocate_id();
                let template_ctx = Scope::resolve(ctx, scope, template.id, None)?;
                let field = if variable.value.is_empty() {
                    "$implicit"
                } else {
                    variable.value.as_str()
                };
                ctx.scopes[scope.0]
                    .add_statement(Statement::constant(id.clone(), template_ctx.prop(field)));
                Ok(Some(Expression::identifier(id)))
            }
            TcbOp::TemplateContext => {
                let id = ctx.allocate_id();
                ctx.scopes[scope.0].add_statement(Statement::variable(
                    VariableKind::Var,
                    id.clone(),
                    Some(TypeNode::any()),
                    None,
                ));
                Ok(Some(Expression::identifier(id)))
            }
            TcbOp::TemplateBody(template) => execute_template_body(ctx, scope, template),
            TcbOp::TextInterpolation(text) => {
                let expr = translate(ctx, scope, &text.value)?;
                ctx.scopes[scope.0].add_statement(Statement::expression(expr));
                Ok(None)
            }
            TcbOp::DirectiveInstantiate { host, directive } => {
                execute_directive_ctor(ctx, scope, host, directive)
            }
            TcbOp::UnclaimedInputs { element, unclaimed } => {
                if !ctx.config.check_type_of_dom_bindings {
                    return Ok(None);
                }
                for input in &element.inputs {
                    if !unclaimed.contains(&input.name.as_str()) {
                        continue;
                    }
                    let element_id = Scope::resolve(ctx, scope, element.id, None)?;
                    let expr = translate(ctx, scope, &input.value)?;
                    let assignment = element_id.prop(input.name.clone()).assign(expr);
                    ctx.scopes[scope.0].add_statement(Statement::expression(assignment));
                }
                Ok(None)
            }
        }
    }
}

fn translate(ctx: &mut Context<'_>, scope: ScopeId, ast: &AST) -> Result<Expression, TcbError> {
    let translator = ctx.translator;
    translator.translate(ast, &mut |node: &AST| tcb_resolve(ctx, scope, node))
}

/// The value a template hands to a guarded input.
enum GuardValue<'t> {
    Bound(&'t AST),
    Static(&'t str),
}

fn guard_binding<'t>(template: &'t Template, input: &str) -> Option<GuardValue<'t>> {
    if let Some(bound) = template.inputs.iter().find(|i| i.name == input) {
        return Some(GuardValue::Bound(&bound.value));
    }
    let from_template_attrs = template
        .template_attrs
        .iter()
        .find(|attr| attr.name() == input)
        .map(|attr| match attr {
            TemplateAttr::Bound(bound) => GuardValue::Bound(&bound.value),
            TemplateAttr::Text(text) => GuardValue::Static(&text.value),
        });
    from_template_attrs.or_else(|| {
        template
            .attributes
            .iter()
            .find(|attr| attr.name == input)
            .map(|attr| GuardValue::Static(&attr.value))
    })
}

fn execute_template_body<'t>(
    ctx: &mut Context<'t>,
    scope: ScopeId,
    template: &'t Template,
) -> Result<Option<Expression>, TcbError> {
    if !ctx.config.check_template_bodies {
        return Ok(None);
    }

    let bound_target = ctx.bound_target;
    let directives = bound_target
        .get_directives_of_node(template.id)
        .unwrap_or(&[]);

    let mut guards: SmallVec<[Expression; 2]> = SmallVec::new();
    for directive in directives {
        for input in &directive.ng_template_guards {
            let Some(value) = guard_binding(template, input) else {
                continue;
            };
            let instance = Scope::resolve(ctx, scope, template.id, Some(&directive.ref_))?;
            let expr = match value {
                GuardValue::Bound(ast) => translate(ctx, scope, ast)?,
                GuardValue::Static(text) => Expression::string(text),
            };
            let guard = ctx
                .reference(&directive.ref_)
                .call_method(format!("ngTemplateGuard_{}", input), vec![instance, expr]);
            guards.push(guard);
        }

        if directive.has_ng_template_context_guard && ctx.config.apply_template_context_guards {
            let instance = Scope::resolve(ctx, scope, template.id, Some(&directive.ref_))?;
            let template_ctx = Scope::resolve(ctx, scope, template.id, None)?;
            let guard = ctx
                .reference(&directive.ref_)
                .call_method("ngTemplateContextGuard", vec![instance, template_ctx]);
            guards.push(guard);
        }
    }

    let guard = guards
        .into_iter()
        .reduce(|acc, guard| acc.and(guard))
        .unwrap_or_else(|| Expression::boolean(true));

    let child = Scope::for_nodes(ctx, Some(scope), Some(template), &template.children);
    let statements = Scope::render(ctx, child)?;
    ctx.scopes[scope.0].add_statement(Statement::if_then(guard, statements));
    Ok(None)
}

fn execute_directive_ctor<'t>(
    ctx: &mut Context<'t>,
    scope: ScopeId,
    host: DirectiveHost<'t>,
    directive: &'t TypeCheckableDirectiveMeta,
) -> Result<Option<Expression>, TcbError> {
    let id = ctx.allocate_id();

    // Binding property -> the class fields it feeds.
    let mut fields_by_property: HashMap<&'t str, SmallVec<[&'t str; 1]>> = HashMap::new();
    for (field, property) in &directive.inputs {
        fields_by_property
            .entry(property.as_str())
            .or_default()
            .push(field.as_str());
    }

    let mut members: IndexMap<&'t str, Expression> = IndexMap::new();
    let bound = host.inputs().iter().map(|input| (input.name.as_str(), &input.value));
    let bound_template_attrs = host.template_attrs().iter().filter_map(|attr| match attr {
        TemplateAttr::Bound(input) => Some((input.name.as_str(), &input.value)),
        TemplateAttr::Text(_) => None,
    });
    for (name, value) in bound.chain(bound_template_attrs) {
        let Some(fields) = fields_by_property.get(name) else {
            continue;
        };
        let expr = translate(ctx, scope, value)?;
        for &field in fields {
            members.insert(field, expr.clone());
        }
    }

    if ctx.config.check_type_of_attributes {
        let static_template_attrs = host.template_attrs().iter().filter_map(|attr| match attr {
            TemplateAttr::Text(text) => Some(text),
            TemplateAttr::Bound(_) => None,
        });
        for attr in host.attributes().iter().chain(static_template_attrs) {
            if let Some(fields) = fields_by_property.get(attr.name.as_str()) {
                for &field in fields {
                    members
                        .entry(field)
                        .or_insert_with(|| Expression::string(attr.value.clone()));
                }
            }
        }
    }

    let properties = members
        .into_iter()
        .map(|(name, value)| ObjectLiteralProperty {
            name: name.to_string(),
            value,
        })
        .collect();
    let type_ctor = ctx
        .reference(&directive.ref_)
        .call_method("ngTypeCtor", vec![Expression::object(properties)]);
    ctx.scopes[scope.0].add_statement(Statement::constant(id.clone(), type_ctor));
    Ok(Some(Expression::identifier(id)))
}
