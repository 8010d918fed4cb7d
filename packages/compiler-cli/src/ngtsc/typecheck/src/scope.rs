// TypeCheck Block Scopes
//
// A `Scope` holds the operations for one template (the root template or a
// nested `<ng-template>`) together with the statements they have emitted.
// Operations run lazily: each is executed at most once, either in queue order
// by `Scope::render` or earlier, when another operation resolves its value.

use std::collections::HashMap;
use std::mem;

use angular_compiler::render3::r3_ast::{self as t, NodeId, Template};
use indexmap::IndexSet;
use ts::{Expression, Statement};

use super::super::api::TcbError;
use super::ops::{DirectiveHost, TcbOp};
use super::type_check_block::Context;
use crate::ngtsc::imports::Reference;
use crate::ngtsc::logging::LogLevel;

/// Index of a scope in the generation session's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

/// State of one queued operation.
#[derive(Debug)]
pub enum OpSlot<'t> {
    /// Not executed yet.
    Pending(TcbOp<'t>),
    /// Currently executing; reaching it again means a cycle.
    InProgress,
    /// Executed, with the value it produced (if any).
    Resolved(Option<Expression>),
}

/// Operations and lookup tables for a single template.
#[derive(Debug)]
pub struct Scope<'t> {
    parent: Option<ScopeId>,
    ops: Vec<OpSlot<'t>>,
    /// Element node -> index of its `Element` op.
    element_op_map: HashMap<NodeId, usize>,
    /// Nested template node -> index of its `TemplateContext` op.
    template_ctx_op_map: HashMap<NodeId, usize>,
    /// Variable node -> index of its `Variable` op.
    var_map: HashMap<NodeId, usize>,
    /// (node, directive) -> index of its `DirectiveInstantiate` op.
    directive_op_map: HashMap<(NodeId, &'t Reference), usize>,
    statements: Vec<Statement>,
}

impl<'t> Scope<'t> {
    fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            ops: Vec::new(),
            element_op_map: HashMap::new(),
            template_ctx_op_map: HashMap::new(),
            var_map: HashMap::new(),
            directive_op_map: HashMap::new(),
            statements: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub(crate) fn op(&self, index: usize) -> Option<&OpSlot<'t>> {
        self.ops.get(index)
    }

    fn push_op(&mut self, op: TcbOp<'t>) -> usize {
        self.ops.push(OpSlot::Pending(op));
        self.ops.len() - 1
    }

    pub(crate) fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Construct the scope for `nodes`, the children of `template` if given or
    /// the root nodes otherwise. Returns its id in the session arena.
    pub fn for_nodes(
        ctx: &mut Context<'t>,
        parent: Option<ScopeId>,
        template: Option<&'t Template>,
        nodes: &'t [t::R3Node],
    ) -> ScopeId {
        let id = ScopeId(ctx.scopes.len());
        ctx.scopes.push(Scope::new(parent));

        if let Some(template) = template {
            for variable in &template.variables {
                let scope = &mut ctx.scopes[id.0];
                let index = scope.push_op(TcbOp::Variable { template, variable });
                scope.var_map.insert(variable.id, index);
            }
        }
        for node in nodes {
            Self::append_node(ctx, id, node);
        }

        if ctx.logger.is_enabled(LogLevel::Debug) {
            ctx.logger.debug(&format!(
                "built scope {} (parent {:?}) with {} operations",
                id.0,
                parent.map(|p| p.0),
                ctx.scopes[id.0].ops.len()
            ));
        }
        id
    }

    fn append_node(ctx: &mut Context<'t>, id: ScopeId, node: &'t t::R3Node) {
        match node {
            t::R3Node::Element(element) => {
                let scope = &mut ctx.scopes[id.0];
                let index = scope.push_op(TcbOp::Element(element));
                scope.element_op_map.insert(element.id, index);
                Self::append_directives_and_inputs(ctx, id, DirectiveHost::Element(element));
                for child in &element.children {
                    Self::append_node(ctx, id, child);
                }
            }
            t::R3Node::Template(template) => {
                Self::append_directives_and_inputs(ctx, id, DirectiveHost::Template(template));
                let scope = &mut ctx.scopes[id.0];
                let index = scope.push_op(TcbOp::TemplateContext);
                scope.template_ctx_op_map.insert(template.id, index);
                scope.push_op(TcbOp::TemplateBody(template));
            }
            t::R3Node::BoundText(text) => {
                ctx.scopes[id.0].push_op(TcbOp::TextInterpolation(text));
            }
            t::R3Node::Text(_) => {}
        }
    }

    fn append_directives_and_inputs(ctx: &mut Context<'t>, id: ScopeId, host: DirectiveHost<'t>) {
        let mut unclaimed: IndexSet<&'t str> = host
            .inputs()
            .iter()
            .map(|input| input.name.as_str())
            .chain(host.attributes().iter().map(|attr| attr.name.as_str()))
            .collect();

        let bound_target = ctx.bound_target;
        let directives = bound_target.get_directives_of_node(host.id()).unwrap_or(&[]);

        let scope = &mut ctx.scopes[id.0];
        for directive in directives {
            let index = scope.push_op(TcbOp::DirectiveInstantiate { host, directive });
            scope
                .directive_op_map
                .insert((host.id(), &directive.ref_), index);
        }

        for directive in directives {
            for property in directive.inputs.values() {
                unclaimed.shift_remove(property.as_str());
            }
        }

        // Nested templates never bind DOM properties.
        if let DirectiveHost::Element(element) = host {
            if !unclaimed.is_empty() {
                scope.push_op(TcbOp::UnclaimedInputs {
                    element,
                    unclaimed: unclaimed.into_iter().collect(),
                });
            }
        }
    }

    /// Look up the value of a template entity visible from scope `id`.
    ///
    /// `directive` selects a directive instance on `node` rather than the node itself.
    pub fn resolve(
        ctx: &mut Context<'t>,
        id: ScopeId,
        node: NodeId,
        directive: Option<&'t Reference>,
    ) -> Result<Expression, TcbError> {
        let mut current = Some(id);
        while let Some(scope_id) = current {
            let scope = &ctx.scopes[scope_id.0];
            if let Some(index) = scope.resolve_local(node, directive) {
                return Self::execute_op(ctx, scope_id, index)?.ok_or(TcbError::MissingOpResult {
                    scope: scope_id.0,
                    index,
                });
            }
            current = scope.parent;
        }

        Err(TcbError::UnresolvedEntity(match directive {
            Some(directive) => format!("directive {} on node {}", directive, node),
            None => format!("node {}", node),
        }))
    }

    fn resolve_local(&self, node: NodeId, directive: Option<&'t Reference>) -> Option<usize> {
        if let Some(&index) = self.var_map.get(&node) {
            return Some(index);
        }
        match directive {
            None => self
                .template_ctx_op_map
                .get(&node)
                .or_else(|| self.element_op_map.get(&node))
                .copied(),
            Some(directive) => self.directive_op_map.get(&(node, directive)).copied(),
        }
    }

    /// Execute the operation at `index` unless it already ran, returning its value.
    pub fn execute_op(
        ctx: &mut Context<'t>,
        id: ScopeId,
        index: usize,
    ) -> Result<Option<Expression>, TcbError> {
        let slot = mem::replace(&mut ctx.scopes[id.0].ops[index], OpSlot::InProgress);
        let op = match slot {
            OpSlot::Pending(op) => op,
            OpSlot::Resolved(value) => {
                ctx.scopes[id.0].ops[index] = OpSlot::Resolved(value.clone());
                return Ok(value);
            }
            OpSlot::InProgress => {
                if ctx.logger.is_enabled(LogLevel::Debug) {
                    ctx.logger.debug(&format!(
                        "cycle through operation {} of scope {}, using fallback",
                        index, id.0
                    ));
                }
                return Ok(Some(circular_fallback()));
            }
        };

        let value = op.execute(ctx, id)?;
        ctx.scopes[id.0].ops[index] = OpSlot::Resolved(value.clone());
        Ok(value)
    }

    /// Execute every pending operation in queue order and return the statements
    /// of scope `id`. Rendering an already rendered scope changes nothing.
    pub fn render(ctx: &mut Context<'t>, id: ScopeId) -> Result<Vec<Statement>, TcbError> {
        for index in 0..ctx.scopes[id.0].ops.len() {
            Self::execute_op(ctx, id, index)?;
        }
        Ok(ctx.scopes[id.0].statements.clone())
    }
}

/// `null!`: has type `never`, so it is assignable wherever a cyclic value is needed.
fn circular_fallback() -> Expression {
    Expression::null().non_null()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngtsc::imports::ImportManager;
    use crate::ngtsc::logging::{LogLevel, MemoryLogger};
    use crate::ngtsc::typecheck::api::{TypeCheckableDirectiveMeta, TypeCheckingConfig};
    use crate::ngtsc::typecheck::src::expression::TcbExpressionTranslator;
    use crate::ngtsc::typecheck::testing::TemplateBuilder;
    use angular_compiler::render3::view::t2_binder::R3BoundTarget;

    fn with_context<R>(
        bound: &R3BoundTarget<TypeCheckableDirectiveMeta>,
        logger: &MemoryLogger,
        f: impl FnOnce(&mut Context<'_>) -> R,
    ) -> R {
        let config = TypeCheckingConfig::default();
        let translator = TcbExpressionTranslator;
        let mut emitter = ImportManager::new();
        let mut ctx = Context::new(&config, bound, &translator, logger, &mut emitter);
        f(&mut ctx)
    }

    #[test]
    fn should_render_idempotently() {
        let mut b = TemplateBuilder::new();
        let tmpl_var = b.variable("item", "");
        let item = b.read("item");
        let title = b.read("title");
        let body = b.bound_text(item);
        let div = b.element("div").input("title", title).build();
        let tmpl = b.template().variable(tmpl_var).child(body).build();
        let bound = b.bind(vec![div, tmpl]);
        let logger = MemoryLogger::new(LogLevel::Debug);

        with_context(&bound, &logger, |ctx| {
            let nodes = ctx.bound_target.target();
            let root = Scope::for_nodes(ctx, None, None, nodes);
            let first = Scope::render(ctx, root).unwrap();
            let second = Scope::render(ctx, root).unwrap();
            assert_eq!(ts::print_statements(&first), ts::print_statements(&second));
            assert_eq!(first.len(), 4);
            assert_eq!(ctx.scopes.len(), 2);
            assert_eq!(ctx.scopes[1].parent(), Some(root));
        });
    }

    #[test]
    fn should_memoize_resolution() {
        let mut b = TemplateBuilder::new();
        let div = b.element("div");
        let div_id = div.id();
        let bound = b.bind(vec![div.build()]);
        let logger = MemoryLogger::new(LogLevel::Debug);

        with_context(&bound, &logger, |ctx| {
            let nodes = ctx.bound_target.target();
            let root = Scope::for_nodes(ctx, None, None, nodes);
            let first = Scope::resolve(ctx, root, div_id, None).unwrap();
            let second = Scope::resolve(ctx, root, div_id, None).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.to_string(), "_t1");
            assert!(matches!(ctx.scopes[0].op(0), Some(OpSlot::Resolved(Some(_)))));
            // The element statement is emitted once.
            assert_eq!(Scope::render(ctx, root).unwrap().len(), 1);
        });
    }

    #[test]
    fn should_fall_back_on_cycles() {
        let mut b = TemplateBuilder::new();
        let div = b.element("div");
        let div_id = div.id();
        let bound = b.bind(vec![div.build()]);
        let logger = MemoryLogger::new(LogLevel::Debug);

        with_context(&bound, &logger, |ctx| {
            let nodes = ctx.bound_target.target();
            let root = Scope::for_nodes(ctx, None, None, nodes);
            ctx.scopes[root.0].ops[0] = OpSlot::InProgress;
            let value = Scope::resolve(ctx, root, div_id, None).unwrap();
            assert_eq!(value.to_string(), "null!");
        });
        assert!(logger
            .messages()
            .iter()
            .any(|(_, msg)| msg.starts_with("cycle through operation 0")));
    }

    /// Counts every message handed to it, enabled or not.
    struct CountingLogger {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl crate::ngtsc::logging::Logger for CountingLogger {
        fn level(&self) -> LogLevel {
            LogLevel::Error
        }

        fn write(&self, _level: LogLevel, _msg: &str) {}

        fn log(&self, _level: LogLevel, _msg: &str) {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    #[test]
    fn should_skip_debug_messages_when_debug_is_disabled() {
        let mut b = TemplateBuilder::new();
        let div = b.element("div");
        let div_id = div.id();
        let bound = b.bind(vec![div.build()]);
        let logger = CountingLogger {
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        let config = TypeCheckingConfig::default();
        let translator = TcbExpressionTranslator;
        let mut emitter = ImportManager::new();
        let mut ctx = Context::new(&config, &bound, &translator, &logger, &mut emitter);

        let nodes = ctx.bound_target.target();
        let root = Scope::for_nodes(&mut ctx, None, None, nodes);
        ctx.scopes[root.0].ops[0] = OpSlot::InProgress;
        let value = Scope::resolve(&mut ctx, root, div_id, None).unwrap();
        assert_eq!(value.to_string(), "null!");
        assert_eq!(logger.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn should_fail_for_unknown_entities() {
        let mut b = TemplateBuilder::new();
        let bound = b.bind(vec![]);
        let logger = MemoryLogger::new(LogLevel::Error);

        with_context(&bound, &logger, |ctx| {
            let nodes = ctx.bound_target.target();
            let root = Scope::for_nodes(ctx, None, None, nodes);
            let err = Scope::resolve(ctx, root, NodeId(42), None).unwrap_err();
            assert_eq!(err, TcbError::UnresolvedEntity("node #42".to_string()));
        });
    }
}
