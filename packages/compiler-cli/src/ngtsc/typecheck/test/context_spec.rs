// Type-Checking Context Tests

use super::super::api::*;
use super::super::src::context::*;
use super::super::testing::*;
use crate::ngtsc::logging::{LogLevel, MemoryLogger, NullLogger};

fn ng_if_template(b: &mut TemplateBuilder) -> angular_compiler::render3::r3_ast::R3Node {
    let show = b.read("show");
    let tmpl = b.template().template_input("ngIf", show);
    b.attach(tmpl.id(), directive("NgIf").with_input("ngIf"));
    tmpl.build()
}

#[test]
fn should_name_tcbs_per_shim_file() {
    let mut ctx = TypeCheckingContext::new(TypeCheckingConfig::default());
    let b = TemplateBuilder::new();

    assert_eq!(ctx.add_template("a.ngtypecheck.ts", test_component(), b.bind(vec![])), "_tcb1");
    assert_eq!(ctx.add_template("a.ngtypecheck.ts", test_component(), b.bind(vec![])), "_tcb2");
    assert_eq!(ctx.add_template("b.ngtypecheck.ts", test_component(), b.bind(vec![])), "_tcb1");
    assert_eq!(ctx.file_count(), 2);
    assert_eq!(ctx.tcb_count(), 3);
}

#[test]
fn should_render_imports_before_functions() {
    let mut ctx = TypeCheckingContext::new(TypeCheckingConfig::default());
    let mut b = TemplateBuilder::new();
    let nodes = vec![ng_if_template(&mut b)];
    ctx.add_template("app.ngtypecheck.ts", test_component(), b.bind(nodes));
    ctx.add_template("app.ngtypecheck.ts", test_component(), b.bind(vec![]));

    let files = ctx.finalize(&NullLogger).unwrap();
    assert_eq!(files.len(), 1);
    let (path, source) = &files[0];
    assert_eq!(path, "app.ngtypecheck.ts");
    assert_eq!(
        source,
        "import * as i0 from \"./dirs\";\n\
         \n\
         function _tcb1(ctx: TestComponent) {\n\
         \x20 if (true) {\n\
         \x20   const _t1 = i0.NgIf.ngTypeCtor({ ngIf: ctx.show });\n\
         \x20   var _t2: any;\n\
         \x20   if (true) {\n\
         \x20   }\n\
         \x20 }\n\
         }\n\
         \n\
         function _tcb2(ctx: TestComponent) {\n\
         \x20 if (true) {\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn should_finalize_files_in_registration_order() {
    let mut ctx = TypeCheckingContext::new(TypeCheckingConfig::default());
    let b = TemplateBuilder::new();
    for path in ["z.ngtypecheck.ts", "a.ngtypecheck.ts", "m.ngtypecheck.ts"] {
        ctx.add_template(path, test_component(), b.bind(vec![]));
    }
    let logger = MemoryLogger::new(LogLevel::Debug);

    let files = ctx.finalize(&logger).unwrap();
    let paths: Vec<&str> = files.iter().map(|(path, _)| path.as_str()).collect();
    assert_eq!(paths, vec!["z.ngtypecheck.ts", "a.ngtypecheck.ts", "m.ngtypecheck.ts"]);
    // No imports are needed when every reference is local.
    assert!(files[0].1.starts_with("function _tcb1(ctx: TestComponent) {"));
    assert!(logger
        .messages()
        .iter()
        .any(|(level, msg)| *level == LogLevel::Debug && msg == "rendered 1 TCBs into a.ngtypecheck.ts"));
}

#[test]
fn should_fail_finalize_when_any_template_fails() {
    let mut ctx = TypeCheckingContext::new(TypeCheckingConfig::default());
    let mut b = TemplateBuilder::new();
    let reference = b.reference("r", "unknownExport");
    let div = b.element("div").reference(reference).build();
    let read = b.read("r");
    let text = b.bound_text(read);
    ctx.add_template("ok.ngtypecheck.ts", test_component(), b.bind(vec![]));
    ctx.add_template("bad.ngtypecheck.ts", test_component(), b.bind(vec![div, text]));

    assert!(matches!(
        ctx.finalize(&NullLogger),
        Err(TcbError::UnknownReferenceTarget(_))
    ));
}
