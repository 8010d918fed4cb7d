// TypeCheck Block Generation
//
// Generates type-check blocks (TCBs) for templates. A TCB is a function whose
// body mirrors the template: every element, directive and binding becomes a
// statement, so the TypeScript checker reports template errors as ordinary
// type errors.
//
//   function _tcb1<T>(ctx: i0.Cmp<T>) {
//     if (true) {
//       const _t1 = document.createElement("div");
//       _t1.title = ctx.title;
//     }
//   }

use angular_compiler::expression_parser::ast::AST;
use angular_compiler::render3::view::t2_api::{BoundTarget, ReferenceTarget, TemplateEntity};
use ts::{Expression, FunctionDeclaration, Parameter, Statement, TypeNode};

use super::super::api::{
    ComponentTypeCheckMeta, TcbError, TypeCheckableDirectiveMeta, TypeCheckingConfig,
};
use super::expression::{ExpressionTranslator, TcbExpressionTranslator};
use super::scope::{Scope, ScopeId};
use crate::ngtsc::imports::{Reference, ReferenceEmitter};
use crate::ngtsc::logging::{LogLevel, Logger, NullLogger};

static DEFAULT_TRANSLATOR: TcbExpressionTranslator = TcbExpressionTranslator;
static NULL_LOGGER: NullLogger = NullLogger;

/// State shared by every scope and operation while one TCB is generated.
pub struct Context<'t> {
    pub config: &'t TypeCheckingConfig,
    pub bound_target: &'t dyn BoundTarget<TypeCheckableDirectiveMeta>,
    pub translator: &'t dyn ExpressionTranslator,
    pub logger: &'t dyn Logger,
    emitter: &'t mut dyn ReferenceEmitter,
    /// Arena of every scope created so far, indexed by `ScopeId`.
    pub(crate) scopes: Vec<Scope<'t>>,
    next_id: u32,
}

impl<'t> Context<'t> {
    pub fn new(
        config: &'t TypeCheckingConfig,
        bound_target: &'t dyn BoundTarget<TypeCheckableDirectiveMeta>,
        translator: &'t dyn ExpressionTranslator,
        logger: &'t dyn Logger,
        emitter: &'t mut dyn ReferenceEmitter,
    ) -> Self {
        Self {
            config,
            bound_target,
            translator,
            logger,
            emitter,
            scopes: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocate a fresh identifier, `_t1`, `_t2`, ...
    pub fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("_t{}", self.next_id)
    }

    /// An expression naming `reference`; may register an import.
    pub fn reference(&mut self, reference: &Reference) -> Expression {
        self.emitter.reference_expression(reference)
    }

    pub fn reference_type(&mut self, reference: &Reference, type_arguments: Vec<TypeNode>) -> TypeNode {
        self.emitter.reference_type(reference, type_arguments)
    }

    /// A type reference to an external generic type, with `any` for each type argument.
    pub fn reference_external_type(&mut self, module: &str, name: &str, type_arg_count: usize) -> TypeNode {
        let reference = Reference::external(name, module);
        let type_arguments = (0..type_arg_count).map(|_| TypeNode::any()).collect();
        self.reference_type(&reference, type_arguments)
    }

    /// `(null as any as TemplateRef<any>)`, the value of a reference to an `<ng-template>`.
    pub fn template_ref_placeholder(&mut self) -> Expression {
        let template_ref = self.reference_external_type("@angular/core", "TemplateRef", 1);
        Expression::null()
            .cast(TypeNode::any())
            .cast(template_ref)
            .parens()
    }
}

/// Resolve a template-level read for the expression translator.
///
/// Called with every node of an expression; returns the value a read of a
/// template variable or reference stands for, `ctx` for the component instance,
/// and `None` for everything the translator handles itself.
pub(crate) fn tcb_resolve<'t>(
    ctx: &mut Context<'t>,
    scope: ScopeId,
    ast: &AST,
) -> Result<Option<Expression>, TcbError> {
    match ast {
        AST::ImplicitReceiver(_) | AST::ThisReceiver(_) => Ok(Some(Expression::identifier("ctx"))),
        AST::PropertyRead(read) if read.receiver.is_implicit_receiver() => {
            let bound_target = ctx.bound_target;
            match bound_target.get_expression_target(ast) {
                None => Ok(None),
                Some(TemplateEntity::Variable(variable)) => {
                    Scope::resolve(ctx, scope, variable, None).map(Some)
                }
                Some(TemplateEntity::Reference(reference)) => {
                    match bound_target.get_reference_target(reference) {
                        None => Err(TcbError::UnknownReferenceTarget(reference)),
                        Some(ReferenceTarget::Element(element)) => {
                            Scope::resolve(ctx, scope, element, None).map(Some)
                        }
                        Some(ReferenceTarget::Template(_)) => {
                            Ok(Some(ctx.template_ref_placeholder()))
                        }
                        Some(ReferenceTarget::DirectiveOnNode { directive, node }) => {
                            Scope::resolve(ctx, scope, node, Some(&directive.ref_)).map(Some)
                        }
                    }
                }
            }
        }
        _ => Ok(None),
    }
}

/// Generates a type-check block (TCB) for a component template.
pub struct TypeCheckBlockGenerator<'g> {
    /// Configuration.
    config: TypeCheckingConfig,
    translator: &'g dyn ExpressionTranslator,
    logger: &'g dyn Logger,
}

impl<'g> TypeCheckBlockGenerator<'g> {
    pub fn new(config: TypeCheckingConfig) -> Self {
        Self {
            config,
            translator: &DEFAULT_TRANSLATOR,
            logger: &NULL_LOGGER,
        }
    }

    pub fn with_logger(mut self, logger: &'g dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_translator(mut self, translator: &'g dyn ExpressionTranslator) -> Self {
        self.translator = translator;
        self
    }

    /// Generate the TCB function `name` for `component`'s bound template.
    ///
    /// Imports needed by the block are registered with `emitter`.
    pub fn generate(
        &self,
        name: &str,
        component: &ComponentTypeCheckMeta,
        bound_target: &dyn BoundTarget<TypeCheckableDirectiveMeta>,
        emitter: &mut dyn ReferenceEmitter,
    ) -> Result<FunctionDeclaration, TcbError> {
        let mut ctx = Context::new(&self.config, bound_target, self.translator, self.logger, emitter);

        let (type_parameters, type_arguments) = if self.config.use_context_generic_type {
            let arguments = component
                .type_parameters
                .iter()
                .map(|param| TypeNode::reference(Expression::identifier(param.clone()), vec![]))
                .collect();
            (component.type_parameters.clone(), arguments)
        } else {
            let arguments = component.type_parameters.iter().map(|_| TypeNode::any()).collect();
            (Vec::new(), arguments)
        };
        let ctx_type = ctx.reference_type(&component.ref_, type_arguments);

        let root = Scope::for_nodes(&mut ctx, None, None, bound_target.target());
        let statements = Scope::render(&mut ctx, root)?;
        if self.logger.is_enabled(LogLevel::Debug) {
            self.logger.debug(&format!(
                "generated {} for {} across {} scopes",
                name,
                component.ref_,
                ctx.scopes.len()
            ));
        }

        Ok(FunctionDeclaration {
            name: name.to_string(),
            type_parameters,
            parameters: vec![Parameter {
                name: "ctx".to_string(),
                type_annotation: Some(ctx_type),
            }],
            body: vec![Statement::if_then(Expression::boolean(true), statements)],
        })
    }
}
