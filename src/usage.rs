//! Usage collection.
//!
//! One exhaustive pass over a compilation unit records every type, static
//! member and unattributed name the code refers to. The pass never looks at
//! import declarations or doc comments: those would otherwise count as uses of
//! the very imports being judged.
//!
//! String literals inside annotation arguments are scanned too, because many
//! persistence frameworks name types in string-valued attributes.

use crate::names;
use crate::tree::{
    Annotation, AnnotationValue, Binding, ClassRef, CompilationUnit, EnumConstant, Expression,
    LambdaBody, LiteralKind, Member, MethodDeclaration, Statement, SwitchCase, TypeDeclaration,
    TypeParameter, TypeTree, Variable,
};
use std::collections::{BTreeMap, BTreeSet};

/// How a type was referred to across the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeUse {
    pub sites: usize,
    /// Every reference was written with a qualifier (the package, or an
    /// enclosing type for nested types), so no import of this type is needed.
    pub fully_qualified_only: bool,
}

/// Everything one unit refers to. Built once per run, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageRecord {
    /// Keyed by binary name.
    types_in_use: BTreeMap<String, TypeUse>,
    /// Owner (source form) to the static members read or invoked on it.
    static_members_in_use: BTreeMap<String, BTreeSet<String>>,
    /// The part of `static_members_in_use` reached without an `Owner.`
    /// qualifier, which only a static import can supply.
    unqualified_static_members: BTreeMap<String, BTreeSet<String>>,
    /// Simple names of type references the front end could not attribute,
    /// with the container each site expects (`None` when unknown).
    unresolved_types: BTreeMap<String, BTreeSet<Option<String>>>,
    /// Unqualified method and field names that carried no attribution.
    unresolved_members: BTreeSet<String>,
    /// Simple type names found in annotation string literals.
    literal_names: BTreeSet<String>,
}

impl UsageRecord {
    fn record_type(&mut self, fqn: &str, fully_qualified: bool) {
        let entry = self
            .types_in_use
            .entry(names::to_binary(fqn))
            .or_insert(TypeUse {
                sites: 0,
                fully_qualified_only: true,
            });
        entry.sites += 1;
        entry.fully_qualified_only &= fully_qualified;
    }

    fn record_static_member(&mut self, owner: &str, member: &str, qualified: bool) {
        let owner = names::normalize(owner);
        if !qualified {
            self.unqualified_static_members
                .entry(owner.clone())
                .or_default()
                .insert(member.to_string());
        }
        self.static_members_in_use
            .entry(owner)
            .or_default()
            .insert(member.to_string());
    }

    fn record_unresolved_type(&mut self, simple_name: &str, expected_container: Option<String>) {
        self.unresolved_types
            .entry(simple_name.to_string())
            .or_default()
            .insert(expected_container);
    }

    pub fn types_in_use(&self) -> &BTreeMap<String, TypeUse> {
        &self.types_in_use
    }

    pub fn static_members_in_use(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.static_members_in_use
    }

    pub fn unresolved_types(&self) -> &BTreeMap<String, BTreeSet<Option<String>>> {
        &self.unresolved_types
    }

    /// Whether some reference to `binary_name` relies on an import.
    pub fn type_needs_import(&self, binary_name: &str) -> bool {
        self.types_in_use
            .get(&names::to_binary(binary_name))
            .is_some_and(|u| !u.fully_qualified_only)
    }

    /// Simple names of the importable types used from `container`.
    pub fn types_from(&self, container: &str) -> BTreeSet<String> {
        self.types_in_use
            .iter()
            .filter(|(name, u)| !u.fully_qualified_only && names::container(name) == container)
            .map(|(name, _)| names::simple_name(name).to_string())
            .collect()
    }

    /// Whether an unattributed reference named `simple_name` may resolve into
    /// `container`.
    pub fn unresolved_type_may_be(&self, simple_name: &str, container: &str) -> bool {
        self.unresolved_types.get(simple_name).is_some_and(|expected| {
            expected
                .iter()
                .any(|c| c.as_deref().is_none_or(|c| c == container))
        })
    }

    pub fn static_members_of(&self, owner: &str) -> Option<&BTreeSet<String>> {
        self.static_members_in_use.get(&names::normalize(owner))
    }

    pub fn static_member_used(&self, owner: &str, member: &str) -> bool {
        self.static_members_of(owner)
            .is_some_and(|members| members.contains(member))
    }

    /// Members of `owner` used by simple name alone.
    pub fn unqualified_static_members_of(&self, owner: &str) -> Option<&BTreeSet<String>> {
        self.unqualified_static_members.get(&names::normalize(owner))
    }

    pub fn static_member_used_unqualified(&self, owner: &str, member: &str) -> bool {
        self.unqualified_static_members_of(owner)
            .is_some_and(|members| members.contains(member))
    }

    pub fn unresolved_member(&self, name: &str) -> bool {
        self.unresolved_members.contains(name)
    }

    pub fn unresolved_members(&self) -> &BTreeSet<String> {
        &self.unresolved_members
    }

    pub fn literal_name(&self, name: &str) -> bool {
        self.literal_names.contains(name)
    }
}

/// Collects the usage record for `unit`.
pub fn collect(unit: &CompilationUnit) -> UsageRecord {
    let mut cx = Collector::default();
    for declaration in &unit.types {
        visit_type_declaration(declaration, &mut cx);
    }
    cx.record
}

/// Accumulator threaded through the traversal.
#[derive(Default)]
struct Collector {
    record: UsageRecord,
    /// Type variables in scope; references to them are not type uses.
    type_variables: Vec<String>,
    /// Nesting depth of annotation arguments.
    annotation_depth: usize,
}

impl Collector {
    fn is_type_variable(&self, written: &str) -> bool {
        !written.contains('.') && self.type_variables.iter().any(|v| v == written)
    }

    /// Records a type name as written in source, with its attribution.
    ///
    /// A partially qualified reference such as `Map.Entry` needs an import of
    /// the outermost written type only; the nested type itself is reached
    /// through it.
    fn record_written_type(&mut self, written: &str, fqn: Option<&str>) {
        if self.is_type_variable(written) {
            return;
        }
        let written_segments = written.split('.').count();

        let Some(fqn) = fqn else {
            let first = written.split('.').next().unwrap_or(written);
            if first.starts_with(|c: char| c.is_ascii_uppercase()) || written_segments == 1 {
                self.record.record_unresolved_type(first, None);
            } else {
                let simple = names::simple_name(written);
                self.record
                    .record_unresolved_type(simple, Some(names::container(written)));
            }
            return;
        };

        let binary = names::to_binary(fqn);
        let (package, types) = names::split_type_name(&binary);
        if written_segments > types.len() {
            self.record.record_type(&binary, true);
            return;
        }
        self.record.record_type(&binary, written_segments > 1);
        if written_segments > 1 {
            let outer = &types[..types.len() - written_segments + 1];
            self.record
                .record_type(&names::binary_name(&package, outer), false);
        }
    }

    fn record_class_ref(&mut self, class: &ClassRef) {
        self.record_written_type(&class.name, class.fqn.as_deref());
    }

    fn scan_string_literal(&mut self, value: &str) {
        let value = value.trim();
        if names::looks_like_qualified_type(value) {
            self.record.record_type(value, false);
            self.record
                .literal_names
                .insert(names::simple_name(value).to_string());
        } else if names::is_identifier(value) && value.starts_with(|c: char| c.is_ascii_uppercase())
        {
            self.record.literal_names.insert(value.to_string());
        }
    }
}

fn push_type_variables(parameters: &[TypeParameter], cx: &mut Collector) -> usize {
    for parameter in parameters {
        cx.type_variables.push(parameter.name.clone());
    }
    for parameter in parameters {
        visit_annotations(&parameter.annotations, cx);
        for bound in &parameter.bounds {
            visit_type_tree(bound, cx);
        }
    }
    parameters.len()
}

fn pop_type_variables(count: usize, cx: &mut Collector) {
    let keep = cx.type_variables.len().saturating_sub(count);
    cx.type_variables.truncate(keep);
}

fn visit_type_declaration(declaration: &TypeDeclaration, cx: &mut Collector) {
    visit_annotations(&declaration.annotations, cx);
    let pushed = push_type_variables(&declaration.type_parameters, cx);
    for supertype in declaration
        .extends
        .iter()
        .chain(&declaration.implements)
        .chain(&declaration.permits)
    {
        visit_type_tree(supertype, cx);
    }
    for component in &declaration.record_components {
        visit_variable(component, cx);
    }
    visit_members(&declaration.members, cx);
    pop_type_variables(pushed, cx);
}

fn visit_members(members: &[Member], cx: &mut Collector) {
    for member in members {
        match member {
            Member::Field(variable) => visit_variable(variable, cx),
            Member::Method(method) => visit_method(method, cx),
            Member::Initializer { body, .. } => visit_statements(body, cx),
            Member::Type(declaration) => visit_type_declaration(declaration, cx),
            Member::EnumConstant(constant) => visit_enum_constant(constant, cx),
        }
    }
}

fn visit_enum_constant(constant: &EnumConstant, cx: &mut Collector) {
    visit_annotations(&constant.annotations, cx);
    visit_expressions(&constant.arguments, cx);
    if let Some(body) = &constant.body {
        visit_members(body, cx);
    }
}

fn visit_method(method: &MethodDeclaration, cx: &mut Collector) {
    visit_annotations(&method.annotations, cx);
    let pushed = push_type_variables(&method.type_parameters, cx);
    if let Some(return_type) = &method.return_type {
        visit_type_tree(return_type, cx);
    }
    for parameter in &method.parameters {
        visit_variable(parameter, cx);
    }
    for exception in &method.throws {
        visit_type_tree(exception, cx);
    }
    if let Some(body) = &method.body {
        visit_statements(body, cx);
    }
    if let Some(default) = &method.default_value {
        cx.annotation_depth += 1;
        visit_annotation_value(default, cx);
        cx.annotation_depth -= 1;
    }
    pop_type_variables(pushed, cx);
}

fn visit_variable(variable: &Variable, cx: &mut Collector) {
    visit_annotations(&variable.annotations, cx);
    if let Some(type_tree) = &variable.type_tree {
        visit_type_tree(type_tree, cx);
    }
    if let Some(initializer) = &variable.initializer {
        visit_expression(initializer, cx);
    }
}

fn visit_annotations(annotations: &[Annotation], cx: &mut Collector) {
    for annotation in annotations {
        visit_annotation(annotation, cx);
    }
}

fn visit_annotation(annotation: &Annotation, cx: &mut Collector) {
    cx.record_class_ref(&annotation.annotation_type);
    cx.annotation_depth += 1;
    for argument in &annotation.arguments {
        visit_annotation_value(&argument.value, cx);
    }
    cx.annotation_depth -= 1;
}

fn visit_annotation_value(value: &AnnotationValue, cx: &mut Collector) {
    match value {
        AnnotationValue::Expression(expression) => visit_expression(expression, cx),
        AnnotationValue::Annotation(annotation) => visit_annotation(annotation, cx),
        AnnotationValue::Array(values) => {
            for value in values {
                visit_annotation_value(value, cx);
            }
        }
    }
}

fn visit_type_tree(type_tree: &TypeTree, cx: &mut Collector) {
    match type_tree {
        TypeTree::Primitive { .. } => {}
        TypeTree::Class(class) => cx.record_class_ref(class),
        TypeTree::Parameterized { base, arguments } => {
            cx.record_class_ref(base);
            for argument in arguments {
                visit_type_tree(argument, cx);
            }
        }
        TypeTree::Array { element } => visit_type_tree(element, cx),
        TypeTree::Wildcard { bound } => {
            if let Some(bound) = bound {
                visit_type_tree(bound, cx);
            }
        }
        TypeTree::Annotated { annotations, inner } => {
            visit_annotations(annotations, cx);
            visit_type_tree(inner, cx);
        }
        TypeTree::Union { alternatives } => {
            for alternative in alternatives {
                visit_type_tree(alternative, cx);
            }
        }
        TypeTree::Intersection { bounds } => {
            for bound in bounds {
                visit_type_tree(bound, cx);
            }
        }
    }
}

/// Flattens `a.b.C` style chains of identifiers back into written form.
fn dotted_name(expression: &Expression) -> Option<String> {
    match expression {
        Expression::Identifier { name, .. } => Some(name.clone()),
        Expression::FieldAccess { target, name, .. } => {
            dotted_name(target).map(|prefix| format!("{}.{}", prefix, name))
        }
        _ => None,
    }
}

fn visit_expressions(expressions: &[Expression], cx: &mut Collector) {
    for expression in expressions {
        visit_expression(expression, cx);
    }
}

fn visit_expression(expression: &Expression, cx: &mut Collector) {
    match expression {
        Expression::Literal(literal) => {
            if literal.kind == LiteralKind::String && cx.annotation_depth > 0 {
                cx.scan_string_literal(&literal.value);
            }
        }
        Expression::Identifier { name, binding } => match binding {
            Some(Binding::Type { fqn }) => cx.record_written_type(name, Some(fqn)),
            Some(Binding::StaticField { owner }) => {
                cx.record.record_static_member(owner, name, false)
            }
            Some(Binding::Field { .. }) | Some(Binding::Local) => {}
            None => {
                cx.record.unresolved_members.insert(name.clone());
                if name.starts_with(|c: char| c.is_ascii_uppercase()) {
                    cx.record_written_type(name, None);
                }
            }
        },
        Expression::FieldAccess {
            target,
            name,
            binding,
        } => match binding {
            Some(Binding::Type { fqn }) => match dotted_name(expression) {
                Some(written) => cx.record_written_type(&written, Some(fqn)),
                None => visit_expression(target, cx),
            },
            Some(Binding::StaticField { owner }) => {
                cx.record.record_static_member(owner, name, true);
                visit_expression(target, cx);
            }
            _ => visit_expression(target, cx),
        },
        Expression::MethodCall {
            target,
            type_arguments,
            name,
            arguments,
            method,
        } => {
            if let Some(target) = target {
                visit_expression(target, cx);
            }
            for argument in type_arguments {
                visit_type_tree(argument, cx);
            }
            visit_expressions(arguments, cx);
            match method {
                Some(method) if method.is_static => {
                    cx.record
                        .record_static_member(&method.declaring_type, name, target.is_some())
                }
                Some(_) => {}
                None if target.is_none() => {
                    cx.record.unresolved_members.insert(name.clone());
                }
                None => {}
            }
        }
        Expression::NewClass {
            enclosing,
            class,
            arguments,
            body,
        } => {
            if let Some(enclosing) = enclosing {
                visit_expression(enclosing, cx);
            }
            visit_type_tree(class, cx);
            visit_expressions(arguments, cx);
            if let Some(body) = body {
                visit_members(body, cx);
            }
        }
        Expression::NewArray {
            element,
            dimensions,
            initializer,
        } => {
            visit_type_tree(element, cx);
            visit_expressions(dimensions, cx);
            if let Some(initializer) = initializer {
                visit_expressions(initializer, cx);
            }
        }
        Expression::ArrayInitializer { elements } => visit_expressions(elements, cx),
        Expression::ClassLiteral { class } | Expression::TypeReference { class } => {
            visit_type_tree(class, cx)
        }
        Expression::Cast { class, expression } => {
            visit_type_tree(class, cx);
            visit_expression(expression, cx);
        }
        Expression::InstanceOf {
            expression, class, ..
        } => {
            visit_expression(expression, cx);
            visit_type_tree(class, cx);
        }
        Expression::Unary { operand, .. } => visit_expression(operand, cx),
        Expression::Binary { left, right, .. } => {
            visit_expression(left, cx);
            visit_expression(right, cx);
        }
        Expression::Assignment { target, value, .. } => {
            visit_expression(target, cx);
            visit_expression(value, cx);
        }
        Expression::Ternary {
            condition,
            then,
            otherwise,
        } => {
            visit_expression(condition, cx);
            visit_expression(then, cx);
            visit_expression(otherwise, cx);
        }
        Expression::Lambda { parameters, body } => {
            for parameter in parameters {
                visit_variable(parameter, cx);
            }
            match body {
                LambdaBody::Expression(expression) => visit_expression(expression, cx),
                LambdaBody::Block(statements) => visit_statements(statements, cx),
            }
        }
        Expression::MethodReference {
            target,
            name,
            method,
        } => {
            visit_expression(target, cx);
            if let Some(method) = method
                && method.is_static
            {
                cx.record
                    .record_static_member(&method.declaring_type, name, true);
            }
        }
        Expression::ArrayAccess { array, index } => {
            visit_expression(array, cx);
            visit_expression(index, cx);
        }
        Expression::Parenthesized { expression } => visit_expression(expression, cx),
        Expression::Switch { selector, cases } => {
            visit_expression(selector, cx);
            visit_switch_cases(cases, cx);
        }
    }
}

fn visit_switch_cases(cases: &[SwitchCase], cx: &mut Collector) {
    for case in cases {
        visit_expressions(&case.labels, cx);
        visit_statements(&case.body, cx);
    }
}

fn visit_statements(statements: &[Statement], cx: &mut Collector) {
    for statement in statements {
        visit_statement(statement, cx);
    }
}

fn visit_statement(statement: &Statement, cx: &mut Collector) {
    match statement {
        Statement::Expression { expression }
        | Statement::Throw { expression }
        | Statement::Yield { expression } => visit_expression(expression, cx),
        Statement::LocalVariable(variable) => visit_variable(variable, cx),
        Statement::LocalClass(declaration) => visit_type_declaration(declaration, cx),
        Statement::Block { statements } => visit_statements(statements, cx),
        Statement::If {
            condition,
            then,
            otherwise,
        } => {
            visit_expression(condition, cx);
            visit_statement(then, cx);
            if let Some(otherwise) = otherwise {
                visit_statement(otherwise, cx);
            }
        }
        Statement::While { condition, body } | Statement::DoWhile { body, condition } => {
            visit_expression(condition, cx);
            visit_statement(body, cx);
        }
        Statement::For {
            init,
            condition,
            update,
            body,
        } => {
            visit_statements(init, cx);
            if let Some(condition) = condition {
                visit_expression(condition, cx);
            }
            visit_expressions(update, cx);
            visit_statement(body, cx);
        }
        Statement::ForEach {
            variable,
            iterable,
            body,
        } => {
            visit_variable(variable, cx);
            visit_expression(iterable, cx);
            visit_statement(body, cx);
        }
        Statement::Switch { selector, cases } => {
            visit_expression(selector, cx);
            visit_switch_cases(cases, cx);
        }
        Statement::Try {
            resources,
            body,
            catches,
            finally,
        } => {
            for resource in resources {
                visit_variable(resource, cx);
            }
            visit_statements(body, cx);
            for catch in catches {
                visit_variable(&catch.parameter, cx);
                visit_statements(&catch.body, cx);
            }
            if let Some(finally) = finally {
                visit_statements(finally, cx);
            }
        }
        Statement::Return { expression } => {
            if let Some(expression) = expression {
                visit_expression(expression, cx);
            }
        }
        Statement::Synchronized { lock, body } => {
            visit_expression(lock, cx);
            visit_statements(body, cx);
        }
        Statement::Labeled { statement, .. } => visit_statement(statement, cx),
        Statement::Assert { condition, message } => {
            visit_expression(condition, cx);
            if let Some(message) = message {
                visit_expression(message, cx);
            }
        }
        Statement::Break { .. } | Statement::Continue { .. } | Statement::Empty => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{CatchClause, ImportDeclaration, MethodBinding, TypeKind};

    fn unit_with_body(body: Vec<Statement>) -> CompilationUnit {
        CompilationUnit::new(Some("com.acme")).with_type(
            TypeDeclaration::class("Service").with_member(Member::Method(
                MethodDeclaration::new("run", Some(TypeTree::primitive("void"))).with_body(body),
            )),
        )
    }

    fn unit_with_field(field: Variable) -> CompilationUnit {
        CompilationUnit::new(Some("com.acme"))
            .with_type(TypeDeclaration::class("Order").with_member(Member::Field(field)))
    }

    #[test]
    fn records_generic_and_array_type_arguments() {
        let field = Variable::new(
            TypeTree::parameterized(
                "Map",
                "java.util.Map",
                vec![
                    TypeTree::class("String", "java.lang.String"),
                    TypeTree::array(TypeTree::parameterized(
                        "List",
                        "java.util.List",
                        vec![TypeTree::wildcard(Some(TypeTree::class(
                            "BigDecimal",
                            "java.math.BigDecimal",
                        )))],
                    )),
                ],
            ),
            "totals",
        );
        let usage = collect(&unit_with_field(field));
        for name in [
            "java.util.Map",
            "java.lang.String",
            "java.util.List",
            "java.math.BigDecimal",
        ] {
            assert!(usage.type_needs_import(name), "{} should be in use", name);
        }
    }

    #[test]
    fn fully_qualified_reference_needs_no_import() {
        let field = Variable::new(TypeTree::class("java.util.List", "java.util.List"), "items");
        let usage = collect(&unit_with_field(field));
        assert!(!usage.type_needs_import("java.util.List"));
        assert_eq!(usage.types_in_use()["java.util.List"].sites, 1);
    }

    #[test]
    fn partially_qualified_reference_uses_outer_type() {
        let field = Variable::new(TypeTree::class("Map.Entry", "java.util.Map$Entry"), "entry");
        let usage = collect(&unit_with_field(field));
        assert!(usage.type_needs_import("java.util.Map"));
        assert!(!usage.type_needs_import("java.util.Map$Entry"));
        assert_eq!(usage.types_from("java.util"), BTreeSet::from(["Map".to_string()]));
        assert!(usage.types_from("java.util.Map").is_empty());
    }

    #[test]
    fn nested_type_by_simple_name_needs_its_own_import() {
        let field = Variable::new(TypeTree::class("Entry", "java.util.Map$Entry"), "entry");
        let usage = collect(&unit_with_field(field));
        assert!(usage.type_needs_import("java.util.Map$Entry"));
        assert!(!usage.type_needs_import("java.util.Map"));
    }

    #[test]
    fn nested_annotation_class_literals_are_uses() {
        let join_column = Annotation::marker("JoinColumn", "javax.persistence.JoinColumn")
            .with_argument(
                Some("foreignKey"),
                AnnotationValue::Annotation(
                    Annotation::marker("ForeignKey", "javax.persistence.ForeignKey").with_argument(
                        Some("value"),
                        AnnotationValue::Expression(Expression::field(
                            Expression::type_name("ConstraintMode", "javax.persistence.ConstraintMode"),
                            "NO_CONSTRAINT",
                            Some(Binding::StaticField {
                                owner: "javax.persistence.ConstraintMode".to_string(),
                            }),
                        )),
                    ),
                ),
            );
        let join_columns = Annotation::marker("JoinColumns", "javax.persistence.JoinColumns")
            .with_argument(
                None,
                AnnotationValue::Array(vec![AnnotationValue::Annotation(join_column)]),
            );
        let converts = Annotation::marker("Convert", "javax.persistence.Convert").with_argument(
            Some("converter"),
            AnnotationValue::Expression(Expression::class_literal(TypeTree::class(
                "MoneyConverter",
                "com.acme.convert.MoneyConverter",
            ))),
        );
        let field = Variable::new(TypeTree::class("Customer", "com.acme.Customer"), "customer")
            .with_annotation(join_columns)
            .with_annotation(converts);
        let usage = collect(&unit_with_field(field));

        for name in [
            "javax.persistence.JoinColumns",
            "javax.persistence.JoinColumn",
            "javax.persistence.ForeignKey",
            "javax.persistence.ConstraintMode",
            "com.acme.convert.MoneyConverter",
        ] {
            assert!(usage.type_needs_import(name), "{} should be in use", name);
        }
        assert!(usage.static_member_used("javax.persistence.ConstraintMode", "NO_CONSTRAINT"));
    }

    #[test]
    fn annotation_string_literals_are_scanned() {
        let type_def = Annotation::marker("Type", "org.hibernate.annotations.Type")
            .with_argument(
                Some("type"),
                AnnotationValue::Expression(Expression::string("org.hibernate.type.TextType")),
            )
            .with_argument(
                Some("name"),
                AnnotationValue::Expression(Expression::string("MoneyType")),
            );
        let field = Variable::new(TypeTree::class("String", "java.lang.String"), "notes")
            .with_annotation(type_def);
        let usage = collect(&unit_with_field(field));
        assert!(usage.type_needs_import("org.hibernate.type.TextType"));
        assert!(usage.literal_name("TextType"));
        assert!(usage.literal_name("MoneyType"));
    }

    #[test]
    fn string_literals_outside_annotations_are_ignored() {
        let usage = collect(&unit_with_body(vec![Statement::LocalVariable(
            Variable::new(TypeTree::class("String", "java.lang.String"), "name")
                .with_initializer(Expression::string("org.acme.Order")),
        )]));
        assert!(!usage.type_needs_import("org.acme.Order"));
        assert!(!usage.literal_name("Order"));
    }

    #[test]
    fn static_members_qualified_and_unqualified() {
        let usage = collect(&unit_with_body(vec![
            Statement::expression(Expression::static_call(
                "assertEquals",
                "org.junit.Assert",
                vec![Expression::number("1"), Expression::number("1")],
            )),
            Statement::expression(Expression::call(
                Some(Expression::type_name("Collections", "java.util.Collections")),
                "emptyList",
                Some(MethodBinding {
                    declaring_type: "java.util.Collections".to_string(),
                    is_static: true,
                }),
                Vec::new(),
            )),
            Statement::expression(Expression::static_field("MAX_VALUE", "java.lang.Integer")),
        ]));
        assert!(usage.static_member_used("org.junit.Assert", "assertEquals"));
        assert!(usage.static_member_used("java.util.Collections", "emptyList"));
        assert!(usage.static_member_used("java.lang.Integer", "MAX_VALUE"));
        assert!(usage.type_needs_import("java.util.Collections"));

        assert!(usage.static_member_used_unqualified("org.junit.Assert", "assertEquals"));
        assert!(usage.static_member_used_unqualified("java.lang.Integer", "MAX_VALUE"));
        assert!(!usage.static_member_used_unqualified("java.util.Collections", "emptyList"));
        assert!(usage.unqualified_static_members_of("java.util.Collections").is_none());
    }

    #[test]
    fn qualified_static_field_is_not_unqualified_use() {
        let usage = collect(&unit_with_body(vec![Statement::expression(Expression::field(
            Expression::type_name("Integer", "java.lang.Integer"),
            "MIN_VALUE",
            Some(Binding::StaticField {
                owner: "java.lang.Integer".to_string(),
            }),
        ))]));
        assert!(usage.static_member_used("java.lang.Integer", "MIN_VALUE"));
        assert!(!usage.static_member_used_unqualified("java.lang.Integer", "MIN_VALUE"));
    }

    #[test]
    fn nested_owner_names_are_normalized() {
        let usage = collect(&unit_with_body(vec![Statement::expression(
            Expression::static_field("DEFAULT", "com.acme.Outer$Inner"),
        )]));
        assert!(usage.static_member_used("com.acme.Outer.Inner", "DEFAULT"));
        assert!(usage.static_member_used("com.acme.Outer$Inner", "DEFAULT"));
    }

    #[test]
    fn references_inside_control_flow_are_found() {
        let body = vec![Statement::If {
            condition: Expression::local("ready"),
            then: Box::new(Statement::Try {
                resources: Vec::new(),
                body: vec![Statement::Synchronized {
                    lock: Expression::local("lock"),
                    body: vec![Statement::Labeled {
                        label: "outer".to_string(),
                        statement: Box::new(Statement::While {
                            condition: Expression::static_call("more", "com.acme.Feed", Vec::new()),
                            body: Box::new(Statement::Break { label: None }),
                        }),
                    }],
                }],
                catches: vec![CatchClause {
                    parameter: Variable::new(
                        TypeTree::Union {
                            alternatives: vec![
                                TypeTree::class("IOException", "java.io.IOException"),
                                TypeTree::class("SQLException", "java.sql.SQLException"),
                            ],
                        },
                        "e",
                    ),
                    body: vec![Statement::Throw {
                        expression: Expression::new_class(
                            TypeTree::class("DataException", "com.acme.DataException"),
                            vec![Expression::local("e")],
                        ),
                    }],
                }],
                finally: None,
            }),
            otherwise: Some(Box::new(Statement::Switch {
                selector: Expression::local("state"),
                cases: vec![SwitchCase {
                    labels: vec![Expression::static_field("OPEN", "com.acme.State")],
                    body: vec![Statement::Return {
                        expression: Some(Expression::Cast {
                            class: TypeTree::class("Ticket", "com.acme.ticket.Ticket"),
                            expression: Box::new(Expression::local("value")),
                        }),
                    }],
                }],
            })),
        }];
        let usage = collect(&unit_with_body(body));
        assert!(usage.static_member_used("com.acme.Feed", "more"));
        assert!(usage.static_member_used("com.acme.State", "OPEN"));
        for name in [
            "java.io.IOException",
            "java.sql.SQLException",
            "com.acme.DataException",
            "com.acme.ticket.Ticket",
        ] {
            assert!(usage.type_needs_import(name), "{} should be in use", name);
        }
    }

    #[test]
    fn lambdas_and_anonymous_classes_are_traversed() {
        let anonymous = Expression::NewClass {
            enclosing: None,
            class: TypeTree::class("Runnable", "java.lang.Runnable"),
            arguments: Vec::new(),
            body: Some(vec![Member::Method(
                MethodDeclaration::new("run", Some(TypeTree::primitive("void"))).with_body(vec![
                    Statement::LocalVariable(Variable::new(
                        TypeTree::class("Instant", "java.time.Instant"),
                        "now",
                    )),
                ]),
            )]),
        };
        let lambda = Expression::Lambda {
            parameters: vec![Variable::inferred("order")],
            body: LambdaBody::Expression(Box::new(Expression::static_call(
                "requireNonNull",
                "java.util.Objects",
                vec![Expression::local("order")],
            ))),
        };
        let usage = collect(&unit_with_body(vec![
            Statement::expression(anonymous),
            Statement::expression(lambda),
        ]));
        assert!(usage.type_needs_import("java.time.Instant"));
        assert!(usage.static_member_used("java.util.Objects", "requireNonNull"));
    }

    #[test]
    fn type_variables_are_not_type_uses() {
        let mut method = MethodDeclaration::new("first", Some(TypeTree::unresolved("T")))
            .with_parameter(Variable::new(
                TypeTree::parameterized("List", "java.util.List", vec![TypeTree::unresolved("T")]),
                "items",
            ));
        method.type_parameters.push(TypeParameter {
            annotations: Vec::new(),
            name: "T".to_string(),
            bounds: vec![TypeTree::class("Comparable", "java.lang.Comparable")],
        });
        let unit = CompilationUnit::new(Some("com.acme"))
            .with_type(TypeDeclaration::class("Lists").with_member(Member::Method(method)));
        let usage = collect(&unit);
        assert!(usage.unresolved_types().is_empty());
        assert!(usage.type_needs_import("java.lang.Comparable"));
    }

    #[test]
    fn unattributed_references_fall_back_to_simple_names() {
        let usage = collect(&unit_with_body(vec![
            Statement::LocalVariable(Variable::new(TypeTree::unresolved("Money"), "price")),
            Statement::LocalVariable(Variable::new(
                TypeTree::unresolved("com.acme.shared.Amount"),
                "amount",
            )),
            Statement::expression(Expression::call(None, "audit", None, Vec::new())),
        ]));
        assert!(usage.unresolved_type_may_be("Money", "anything.at.all"));
        assert!(usage.unresolved_type_may_be("Amount", "com.acme.shared"));
        assert!(!usage.unresolved_type_may_be("Amount", "com.acme.other"));
        assert!(usage.unresolved_member("audit"));
    }

    #[test]
    fn imports_and_docs_are_not_traversed() {
        let unit = CompilationUnit::new(Some("com.acme"))
            .with_import(ImportDeclaration::single("java.util.List"))
            .with_type(TypeDeclaration::class("Empty").with_doc("Holds a {@link List} of orders."));
        let usage = collect(&unit);
        assert_eq!(usage, UsageRecord::default());
    }

    #[test]
    fn supertypes_throws_and_record_components_are_uses() {
        let mut record = TypeDeclaration::new(TypeKind::Record, "Money")
            .with_implements(TypeTree::class("Serializable", "java.io.Serializable"));
        record.record_components.push(Variable::new(
            TypeTree::class("Currency", "java.util.Currency"),
            "currency",
        ));
        let mut sealed = TypeDeclaration::new(TypeKind::Interface, "Shape");
        sealed
            .permits
            .push(TypeTree::class("Circle", "com.acme.shapes.Circle"));
        let service = TypeDeclaration::class("Importer")
            .with_extends(TypeTree::class("BaseJob", "com.acme.jobs.BaseJob"))
            .with_member(Member::Method(
                MethodDeclaration::new("load", Some(TypeTree::primitive("void")))
                    .with_throws(TypeTree::class("IOException", "java.io.IOException")),
            ))
            .with_member(Member::Type(record));
        let unit = CompilationUnit::new(Some("com.acme"))
            .with_type(service)
            .with_type(sealed);
        let usage = collect(&unit);
        for name in [
            "java.io.Serializable",
            "java.util.Currency",
            "com.acme.shapes.Circle",
            "com.acme.jobs.BaseJob",
            "java.io.IOException",
        ] {
            assert!(usage.type_needs_import(name), "{} should be in use", name);
        }
    }

    #[test]
    fn enum_constants_and_initializers_are_traversed() {
        let constant = Member::EnumConstant(EnumConstant {
            annotations: Vec::new(),
            name: "STANDARD".to_string(),
            arguments: vec![Expression::field(
                Expression::type_name("Limits", "com.acme.limits.Limits"),
                "MAX",
                Some(Binding::StaticField {
                    owner: "com.acme.limits.Limits".to_string(),
                }),
            )],
            body: Some(vec![Member::Field(Variable::new(
                TypeTree::class("UUID", "java.util.UUID"),
                "id",
            ))]),
        });
        let initializer = Member::Initializer {
            is_static: true,
            body: vec![Statement::LocalVariable(Variable::new(
                TypeTree::class("Clock", "java.time.Clock"),
                "clock",
            ))],
        };
        let tier = TypeDeclaration::new(TypeKind::Enum, "Tier")
            .with_member(constant)
            .with_member(initializer);
        let usage = collect(&CompilationUnit::new(Some("com.acme")).with_type(tier));
        assert!(usage.type_needs_import("com.acme.limits.Limits"));
        assert!(usage.static_member_used("com.acme.limits.Limits", "MAX"));
        assert!(usage.type_needs_import("java.util.UUID"));
        assert!(usage.type_needs_import("java.time.Clock"));
    }

    #[test]
    fn expression_type_positions_are_uses() {
        let body = vec![
            Statement::expression(Expression::MethodReference {
                target: Box::new(Expression::type_name("Objects", "java.util.Objects")),
                name: "isNull".to_string(),
                method: Some(MethodBinding {
                    declaring_type: "java.util.Objects".to_string(),
                    is_static: true,
                }),
            }),
            Statement::expression(Expression::InstanceOf {
                expression: Box::new(Expression::local("value")),
                class: TypeTree::class("Instant", "java.time.Instant"),
                pattern: Some("instant".to_string()),
            }),
            Statement::expression(Expression::NewArray {
                element: TypeTree::class("BigDecimal", "java.math.BigDecimal"),
                dimensions: vec![Expression::number("3")],
                initializer: None,
            }),
        ];
        let usage = collect(&unit_with_body(body));
        assert!(usage.type_needs_import("java.util.Objects"));
        assert!(usage.static_member_used("java.util.Objects", "isNull"));
        assert!(!usage.static_member_used_unqualified("java.util.Objects", "isNull"));
        assert!(usage.type_needs_import("java.time.Instant"));
        assert!(usage.type_needs_import("java.math.BigDecimal"));
    }

    #[test]
    fn annotation_defaults_and_type_use_annotations_are_uses() {
        let mut element = MethodDeclaration::new(
            "unit",
            Some(TypeTree::parameterized(
                "Class",
                "java.lang.Class",
                vec![TypeTree::wildcard(None)],
            )),
        );
        element.default_value = Some(AnnotationValue::Expression(Expression::class_literal(
            TypeTree::class("Duration", "java.time.Duration"),
        )));
        let timeout = TypeDeclaration::new(TypeKind::Annotation, "Timeout")
            .with_member(Member::Method(element));
        let annotated = Member::Field(Variable::new(
            TypeTree::Annotated {
                annotations: vec![Annotation::marker("NonNull", "org.jspecify.annotations.NonNull")],
                inner: Box::new(TypeTree::class("String", "java.lang.String")),
            },
            "name",
        ));
        let holder = TypeDeclaration::class("Holder").with_member(annotated);
        let usage = collect(
            &CompilationUnit::new(Some("com.acme"))
                .with_type(timeout)
                .with_type(holder),
        );
        assert!(usage.type_needs_import("java.time.Duration"));
        assert!(usage.type_needs_import("org.jspecify.annotations.NonNull"));
    }

    #[test]
    fn loop_bodies_and_headers_are_traversed() {
        let body = vec![
            Statement::For {
                init: vec![Statement::LocalVariable(
                    Variable::new(TypeTree::class("Iterator", "java.util.Iterator"), "it")
                        .with_initializer(Expression::local("source")),
                )],
                condition: Some(Expression::local("more")),
                update: vec![Expression::static_call("advance", "com.acme.Cursor", Vec::new())],
                body: Box::new(Statement::Block {
                    statements: vec![Statement::Continue { label: None }],
                }),
            },
            Statement::ForEach {
                variable: Variable::new(TypeTree::class("Path", "java.nio.file.Path"), "path"),
                iterable: Expression::local("paths"),
                body: Box::new(Statement::Empty),
            },
            Statement::DoWhile {
                body: Box::new(Statement::LocalVariable(Variable::new(
                    TypeTree::class("Duration", "java.time.Duration"),
                    "wait",
                ))),
                condition: Expression::static_call("pending", "com.acme.Queue", Vec::new()),
            },
        ];
        let usage = collect(&unit_with_body(body));
        assert!(usage.type_needs_import("java.util.Iterator"));
        assert!(usage.type_needs_import("java.nio.file.Path"));
        assert!(usage.type_needs_import("java.time.Duration"));
        assert!(usage.static_member_used_unqualified("com.acme.Cursor", "advance"));
        assert!(usage.static_member_used_unqualified("com.acme.Queue", "pending"));
    }
}
