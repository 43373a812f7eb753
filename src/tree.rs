//! Type-attributed syntax tree for one Java compilation unit.
//!
//! The front end parses and attributes a source file and hands the engine
//! this tree, serialized as JSON. Every node kind is a closed enum so the
//! usage collector can match exhaustively. Attribution is best effort: a
//! reference whose type could not be resolved simply carries no `fqn` or
//! binding, and the collector falls back to its simple name.
//!
//! Qualified names in attribution use the binary form (`java.util.Map$Entry`).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Formatting that precedes a node: whitespace and any comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Space(String);

impl Space {
    pub const fn empty() -> Self {
        Self(String::new())
    }

    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// A single line break, the prefix of a freshly inserted import.
    pub fn newline() -> Self {
        Self("\n".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn line_breaks(&self) -> usize {
        self.0.matches('\n').count()
    }

    /// Drops leading whitespace but keeps comments, then prepends `lead`.
    pub fn with_leading(&self, lead: &str) -> Self {
        Self(format!("{}{}", lead, self.0.trim_start()))
    }
}

/// Root of the tree for one source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// File the unit was parsed from, if the front end recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<ImportDeclaration>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    /// Types the front end could not resolve. A non-empty list makes the
    /// engine leave the unit alone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_types: Vec<String>,
    /// Attributed types with the static members they declare, keyed by
    /// binary name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub known_types: BTreeMap<String, TypeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub static_members: BTreeSet<String>,
}

/// A single `import` line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportDeclaration {
    #[serde(default)]
    pub prefix: Space,
    /// Imported name in source form, without a trailing `.*`.
    pub qualified: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub wildcard: bool,
    /// Attributed binary name of the imported type, or of the owner for
    /// static imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl ImportDeclaration {
    fn build(qualified: &str, is_static: bool, wildcard: bool) -> Self {
        Self {
            prefix: Space::newline(),
            qualified: qualified.to_string(),
            is_static,
            wildcard,
            type_name: None,
        }
    }

    /// `import a.b.C;`
    pub fn single(qualified: &str) -> Self {
        Self::build(qualified, false, false)
    }

    /// `import a.b.*;`
    pub fn wildcard(container: &str) -> Self {
        Self::build(container, false, true)
    }

    /// `import static a.b.C.member;`
    pub fn static_member(qualified: &str) -> Self {
        Self::build(qualified, true, false)
    }

    /// `import static a.b.C.*;`
    pub fn static_wildcard(owner: &str) -> Self {
        Self::build(owner, true, true)
    }

    pub fn with_prefix(mut self, prefix: Space) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_type_name(mut self, type_name: &str) -> Self {
        self.type_name = Some(type_name.to_string());
        self
    }

    /// Last name segment, or `*` for wildcards.
    pub fn simple_name(&self) -> &str {
        if self.wildcard {
            "*"
        } else {
            crate::names::simple_name(&self.qualified)
        }
    }

    /// Identity used for duplicate detection.
    pub fn key(&self) -> (String, bool) {
        let target = if self.wildcard {
            format!("{}.*", self.qualified)
        } else {
            self.qualified.clone()
        };
        (target, self.is_static)
    }
}

impl fmt::Display for ImportDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import ")?;
        if self.is_static {
            write!(f, "static ")?;
        }
        write!(f, "{}", self.qualified)?;
        if self.wildcard {
            write!(f, ".*")?;
        }
        write!(f, ";")
    }
}

impl CompilationUnit {
    pub fn new(package: Option<&str>) -> Self {
        Self {
            package: package.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_import(mut self, import: ImportDeclaration) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_type(mut self, declaration: TypeDeclaration) -> Self {
        self.types.push(declaration);
        self
    }

    /// Import statements one per line, without their formatting.
    pub fn import_lines(&self) -> String {
        self.imports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Import block exactly as the printer would emit it, prefixes included.
    pub fn import_block(&self) -> String {
        self.imports
            .iter()
            .map(|i| format!("{}{}", i.prefix.as_str(), i))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A class, interface, enum, record or annotation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    #[serde(default)]
    pub prefix: Space,
    /// Javadoc text. Never scanned for usages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub extends: Vec<TypeTree>,
    #[serde(default)]
    pub implements: Vec<TypeTree>,
    #[serde(default)]
    pub permits: Vec<TypeTree>,
    #[serde(default)]
    pub record_components: Vec<Variable>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TypeDeclaration {
    pub fn new(kind: TypeKind, name: &str) -> Self {
        Self {
            prefix: Space::new("\n\n"),
            doc: None,
            annotations: Vec::new(),
            kind,
            name: name.to_string(),
            type_parameters: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            permits: Vec::new(),
            record_components: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_extends(mut self, supertype: TypeTree) -> Self {
        self.extends.push(supertype);
        self
    }

    pub fn with_implements(mut self, interface: TypeTree) -> Self {
        self.implements.push(interface);
        self
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<TypeTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Field(Variable),
    Method(MethodDeclaration),
    Initializer {
        #[serde(default)]
        is_static: bool,
        body: Vec<Statement>,
    },
    Type(TypeDeclaration),
    EnumConstant(EnumConstant),
}

/// Field, local, parameter, resource, catch parameter or record component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// `None` for `var` and implicitly typed lambda parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_tree: Option<TypeTree>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expression>,
}

impl Variable {
    pub fn new(type_tree: TypeTree, name: &str) -> Self {
        Self {
            doc: None,
            annotations: Vec::new(),
            type_tree: Some(type_tree),
            name: name.to_string(),
            initializer: None,
        }
    }

    pub fn inferred(name: &str) -> Self {
        Self {
            doc: None,
            annotations: Vec::new(),
            type_tree: None,
            name: name.to_string(),
            initializer: None,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_initializer(mut self, initializer: Expression) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    /// `None` for constructors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeTree>,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Variable>,
    #[serde(default)]
    pub throws: Vec<TypeTree>,
    /// `None` for abstract and interface methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<Statement>>,
    /// Annotation type element default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<AnnotationValue>,
}

impl MethodDeclaration {
    pub fn new(name: &str, return_type: Option<TypeTree>) -> Self {
        Self {
            doc: None,
            annotations: Vec::new(),
            type_parameters: Vec::new(),
            return_type,
            name: name.to_string(),
            parameters: Vec::new(),
            throws: Vec::new(),
            body: None,
            default_value: None,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_parameter(mut self, parameter: Variable) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_throws(mut self, exception: TypeTree) -> Self {
        self.throws.push(exception);
        self
    }

    pub fn with_body(mut self, body: Vec<Statement>) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<Member>>,
}

/// A type name as written, with its attributed binary name when resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRef {
    /// Name exactly as written: `List`, `Map.Entry`, `java.util.List`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqn: Option<String>,
}

impl ClassRef {
    pub fn new(name: &str, fqn: &str) -> Self {
        Self {
            name: name.to_string(),
            fqn: Some(fqn.to_string()),
        }
    }

    pub fn unresolved(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fqn: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeTree {
    Primitive {
        keyword: String,
    },
    Class(ClassRef),
    Parameterized {
        base: ClassRef,
        arguments: Vec<TypeTree>,
    },
    Array {
        element: Box<TypeTree>,
    },
    /// `?`, `? extends T`, `? super T`.
    Wildcard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bound: Option<Box<TypeTree>>,
    },
    Annotated {
        annotations: Vec<Annotation>,
        inner: Box<TypeTree>,
    },
    /// Multi-catch alternatives.
    Union {
        alternatives: Vec<TypeTree>,
    },
    /// Intersection casts and bounds.
    Intersection {
        bounds: Vec<TypeTree>,
    },
}

impl TypeTree {
    pub fn class(name: &str, fqn: &str) -> Self {
        Self::Class(ClassRef::new(name, fqn))
    }

    pub fn unresolved(name: &str) -> Self {
        Self::Class(ClassRef::unresolved(name))
    }

    pub fn primitive(keyword: &str) -> Self {
        Self::Primitive {
            keyword: keyword.to_string(),
        }
    }

    pub fn parameterized(name: &str, fqn: &str, arguments: Vec<TypeTree>) -> Self {
        Self::Parameterized {
            base: ClassRef::new(name, fqn),
            arguments,
        }
    }

    pub fn array(element: TypeTree) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    pub fn wildcard(bound: Option<TypeTree>) -> Self {
        Self::Wildcard {
            bound: bound.map(Box::new),
        }
    }
}

/// `@Name(arguments)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub annotation_type: ClassRef,
    #[serde(default)]
    pub arguments: Vec<AnnotationArgument>,
}

impl Annotation {
    pub fn marker(name: &str, fqn: &str) -> Self {
        Self {
            annotation_type: ClassRef::new(name, fqn),
            arguments: Vec::new(),
        }
    }

    /// Adds `name = value`, or the implicit `value` element when `name` is `None`.
    pub fn with_argument(mut self, name: Option<&str>, value: AnnotationValue) -> Self {
        self.arguments.push(AnnotationArgument {
            name: name.map(str::to_string),
            value,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationArgument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: AnnotationValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    Expression(Expression),
    Annotation(Annotation),
    Array(Vec<AnnotationValue>),
}

/// What an identifier or field access resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "binding", rename_all = "snake_case")]
pub enum Binding {
    /// The name denotes a type.
    Type { fqn: String },
    /// A static field of `owner`.
    StaticField { owner: String },
    /// An instance field of `owner`.
    Field { owner: String },
    /// A local variable or parameter.
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBinding {
    pub declaring_type: String,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    String,
    Char,
    Number,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Literal value, unquoted for strings and chars.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LambdaBody {
    Expression(Box<Expression>),
    Block(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expression {
    Literal(Literal),
    Identifier {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        binding: Option<Binding>,
    },
    FieldAccess {
        target: Box<Expression>,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        binding: Option<Binding>,
    },
    MethodCall {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<Box<Expression>>,
        #[serde(default)]
        type_arguments: Vec<TypeTree>,
        name: String,
        #[serde(default)]
        arguments: Vec<Expression>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<MethodBinding>,
    },
    NewClass {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enclosing: Option<Box<Expression>>,
        class: TypeTree,
        #[serde(default)]
        arguments: Vec<Expression>,
        /// Anonymous class body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Vec<Member>>,
    },
    NewArray {
        element: TypeTree,
        #[serde(default)]
        dimensions: Vec<Expression>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initializer: Option<Vec<Expression>>,
    },
    ArrayInitializer {
        elements: Vec<Expression>,
    },
    /// `Type.class`
    ClassLiteral {
        class: TypeTree,
    },
    /// A type in expression position, e.g. the target of `int[]::new`.
    TypeReference {
        class: TypeTree,
    },
    Cast {
        class: TypeTree,
        expression: Box<Expression>,
    },
    InstanceOf {
        expression: Box<Expression>,
        class: TypeTree,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Unary {
        operator: String,
        operand: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    Assignment {
        target: Box<Expression>,
        operator: String,
        value: Box<Expression>,
    },
    Ternary {
        condition: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
    Lambda {
        parameters: Vec<Variable>,
        body: LambdaBody,
    },
    MethodReference {
        target: Box<Expression>,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<MethodBinding>,
    },
    ArrayAccess {
        array: Box<Expression>,
        index: Box<Expression>,
    },
    Parenthesized {
        expression: Box<Expression>,
    },
    Switch {
        selector: Box<Expression>,
        cases: Vec<SwitchCase>,
    },
}

impl Expression {
    pub fn string(value: &str) -> Self {
        Self::Literal(Literal {
            kind: LiteralKind::String,
            value: value.to_string(),
        })
    }

    pub fn number(value: &str) -> Self {
        Self::Literal(Literal {
            kind: LiteralKind::Number,
            value: value.to_string(),
        })
    }

    pub fn local(name: &str) -> Self {
        Self::Identifier {
            name: name.to_string(),
            binding: Some(Binding::Local),
        }
    }

    /// Identifier that denotes a type, e.g. the `Collections` in a call target.
    pub fn type_name(name: &str, fqn: &str) -> Self {
        Self::Identifier {
            name: name.to_string(),
            binding: Some(Binding::Type {
                fqn: fqn.to_string(),
            }),
        }
    }

    /// Unqualified static field, e.g. `MAX_VALUE` through a static import.
    pub fn static_field(name: &str, owner: &str) -> Self {
        Self::Identifier {
            name: name.to_string(),
            binding: Some(Binding::StaticField {
                owner: owner.to_string(),
            }),
        }
    }

    pub fn unresolved(name: &str) -> Self {
        Self::Identifier {
            name: name.to_string(),
            binding: None,
        }
    }

    /// `target.name`
    pub fn field(target: Expression, name: &str, binding: Option<Binding>) -> Self {
        Self::FieldAccess {
            target: Box::new(target),
            name: name.to_string(),
            binding,
        }
    }

    pub fn class_literal(class: TypeTree) -> Self {
        Self::ClassLiteral { class }
    }

    /// Unqualified call of a static method, e.g. `assertEquals(a, b)`.
    pub fn static_call(name: &str, owner: &str, arguments: Vec<Expression>) -> Self {
        Self::MethodCall {
            target: None,
            type_arguments: Vec::new(),
            name: name.to_string(),
            arguments,
            method: Some(MethodBinding {
                declaring_type: owner.to_string(),
                is_static: true,
            }),
        }
    }

    pub fn call(
        target: Option<Expression>,
        name: &str,
        method: Option<MethodBinding>,
        arguments: Vec<Expression>,
    ) -> Self {
        Self::MethodCall {
            target: target.map(Box::new),
            type_arguments: Vec::new(),
            name: name.to_string(),
            arguments,
            method,
        }
    }

    pub fn new_class(class: TypeTree, arguments: Vec<Expression>) -> Self {
        Self::NewClass {
            enclosing: None,
            class,
            arguments,
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// Empty for `default`.
    #[serde(default)]
    pub labels: Vec<Expression>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub parameter: Variable,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Statement {
    Expression {
        expression: Expression,
    },
    LocalVariable(Variable),
    LocalClass(TypeDeclaration),
    Block {
        statements: Vec<Statement>,
    },
    If {
        condition: Expression,
        then: Box<Statement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<Box<Statement>>,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    DoWhile {
        body: Box<Statement>,
        condition: Expression,
    },
    For {
        #[serde(default)]
        init: Vec<Statement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<Expression>,
        #[serde(default)]
        update: Vec<Expression>,
        body: Box<Statement>,
    },
    ForEach {
        variable: Variable,
        iterable: Expression,
        body: Box<Statement>,
    },
    Switch {
        selector: Expression,
        cases: Vec<SwitchCase>,
    },
    Try {
        #[serde(default)]
        resources: Vec<Variable>,
        body: Vec<Statement>,
        #[serde(default)]
        catches: Vec<CatchClause>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        finally: Option<Vec<Statement>>,
    },
    Throw {
        expression: Expression,
    },
    Return {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<Expression>,
    },
    Yield {
        expression: Expression,
    },
    Synchronized {
        lock: Expression,
        body: Vec<Statement>,
    },
    Labeled {
        label: String,
        statement: Box<Statement>,
    },
    Break {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Continue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Assert {
        condition: Expression,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Expression>,
    },
    Empty,
}

impl Statement {
    pub fn expression(expression: Expression) -> Self {
        Self::Expression { expression }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_display() {
        assert_eq!(
            ImportDeclaration::single("java.util.List").to_string(),
            "import java.util.List;"
        );
        assert_eq!(
            ImportDeclaration::wildcard("java.util").to_string(),
            "import java.util.*;"
        );
        assert_eq!(
            ImportDeclaration::static_member("org.junit.Assert.assertEquals").to_string(),
            "import static org.junit.Assert.assertEquals;"
        );
        assert_eq!(
            ImportDeclaration::static_wildcard("org.junit.Assert").to_string(),
            "import static org.junit.Assert.*;"
        );
    }

    #[test]
    fn import_keys_distinguish_static_and_wildcard() {
        let plain = ImportDeclaration::single("a.B");
        let wildcard = ImportDeclaration::wildcard("a.B");
        let static_one = ImportDeclaration::static_wildcard("a.B");
        assert_ne!(plain.key(), wildcard.key());
        assert_ne!(wildcard.key(), static_one.key());
        assert_eq!(plain.simple_name(), "B");
        assert_eq!(wildcard.simple_name(), "*");
    }

    #[test]
    fn space_leading_keeps_comments() {
        let space = Space::new("\n\n\n// entity\n");
        assert_eq!(space.with_leading("\n\n").as_str(), "\n\n// entity\n");
        assert_eq!(Space::new("\n\n").with_leading("").as_str(), "");
        assert_eq!(space.line_breaks(), 4);
    }

    #[test]
    fn deserializes_front_end_json() {
        let json = r#"{
            "package": "com.acme",
            "imports": [
                { "prefix": "\n\n", "qualified": "java.util.List" },
                { "prefix": "\n", "qualified": "org.junit.Assert", "is_static": true, "wildcard": true }
            ],
            "types": [{
                "prefix": "\n\n",
                "kind": "class",
                "name": "Orders",
                "members": [{
                    "member": "field",
                    "type_tree": {
                        "type": "parameterized",
                        "base": { "name": "List", "fqn": "java.util.List" },
                        "arguments": [{ "type": "class", "name": "String", "fqn": "java.lang.String" }]
                    },
                    "name": "ids"
                }]
            }]
        }"#;
        let unit: CompilationUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.package.as_deref(), Some("com.acme"));
        assert_eq!(unit.imports.len(), 2);
        assert!(unit.imports[1].is_static && unit.imports[1].wildcard);
        let Member::Field(field) = &unit.types[0].members[0] else {
            panic!("expected a field");
        };
        assert_eq!(field.name, "ids");
        assert!(matches!(
            field.type_tree,
            Some(TypeTree::Parameterized { ref base, .. }) if base.name == "List"
        ));
    }

    #[test]
    fn serde_round_trip_preserves_statements() {
        let unit = CompilationUnit::new(Some("com.acme")).with_type(
            TypeDeclaration::class("Job").with_member(Member::Method(
                MethodDeclaration::new("run", None).with_body(vec![Statement::Try {
                    resources: Vec::new(),
                    body: vec![Statement::expression(Expression::static_call(
                        "work",
                        "com.acme.Worker",
                        Vec::new(),
                    ))],
                    catches: Vec::new(),
                    finally: Some(vec![Statement::Empty]),
                }]),
            )),
        );
        let json = serde_json::to_string(&unit).unwrap();
        let back: CompilationUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unit);
    }
}
