//! Type-name utilities shared by the collector, classifier and decider.
//!
//! Attributed names use the binary form, where `$` separates a nested type
//! from its owner (`java.util.Map$Entry`). Names coming straight from source
//! text use `.` throughout, so the package boundary is recovered with the
//! usual convention that package segments start lowercase and type segments
//! start uppercase.

/// Simple names implicitly visible in every unit through `java.lang`.
///
/// Sorted so membership is a binary search.
pub const JAVA_LANG_TYPES: &[&str] = &[
    "AbstractMethodError",
    "Appendable",
    "ArithmeticException",
    "ArrayIndexOutOfBoundsException",
    "ArrayStoreException",
    "AssertionError",
    "AutoCloseable",
    "Boolean",
    "BootstrapMethodError",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "ClassCastException",
    "ClassCircularityError",
    "ClassFormatError",
    "ClassLoader",
    "ClassNotFoundException",
    "ClassValue",
    "CloneNotSupportedException",
    "Cloneable",
    "Comparable",
    "Compiler",
    "Deprecated",
    "Double",
    "Enum",
    "EnumConstantNotPresentException",
    "Error",
    "Exception",
    "ExceptionInInitializerError",
    "Float",
    "FunctionalInterface",
    "IllegalAccessError",
    "IllegalAccessException",
    "IllegalArgumentException",
    "IllegalCallerException",
    "IllegalMonitorStateException",
    "IllegalStateException",
    "IllegalThreadStateException",
    "IncompatibleClassChangeError",
    "IndexOutOfBoundsException",
    "InheritableThreadLocal",
    "InstantiationError",
    "InstantiationException",
    "Integer",
    "InternalError",
    "InterruptedException",
    "Iterable",
    "LayerInstantiationException",
    "LinkageError",
    "Long",
    "Math",
    "Module",
    "ModuleLayer",
    "NegativeArraySizeException",
    "NoClassDefFoundError",
    "NoSuchFieldError",
    "NoSuchFieldException",
    "NoSuchMethodError",
    "NoSuchMethodException",
    "NullPointerException",
    "Number",
    "NumberFormatException",
    "Object",
    "OutOfMemoryError",
    "Override",
    "Package",
    "Process",
    "ProcessBuilder",
    "ProcessHandle",
    "Readable",
    "Record",
    "ReflectiveOperationException",
    "Runnable",
    "Runtime",
    "RuntimeException",
    "RuntimePermission",
    "SafeVarargs",
    "SecurityException",
    "SecurityManager",
    "Short",
    "StackOverflowError",
    "StackTraceElement",
    "StackWalker",
    "StrictMath",
    "String",
    "StringBuffer",
    "StringBuilder",
    "StringIndexOutOfBoundsException",
    "SuppressWarnings",
    "System",
    "Thread",
    "ThreadDeath",
    "ThreadGroup",
    "ThreadLocal",
    "Throwable",
    "TypeNotPresentException",
    "UnknownError",
    "UnsatisfiedLinkError",
    "UnsupportedClassVersionError",
    "UnsupportedOperationException",
    "VerifyError",
    "VirtualMachineError",
    "Void",
];

/// Whether `simple_name` would be shadowed by an implicit `java.lang` type.
pub fn is_java_lang_name(simple_name: &str) -> bool {
    JAVA_LANG_TYPES.binary_search(&simple_name).is_ok()
}

/// Replaces nested-type separators so source and binary forms compare equal.
pub fn normalize(name: &str) -> String {
    name.replace('$', ".")
}

/// Compares two qualified names ignoring the `$`/`.` nested-type distinction.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .all(|(x, y)| x == y || (x == b'$' && y == b'.') || (x == b'.' && y == b'$'))
}

/// Last segment of a qualified name, across both separators.
pub fn simple_name(name: &str) -> &str {
    name.rsplit(['.', '$']).next().unwrap_or(name)
}

/// The package or owning type that directly contains `name`, normalized to
/// source form. Empty for a name without any qualifier.
pub fn container(name: &str) -> String {
    match name.rfind(['.', '$']) {
        Some(idx) => normalize(&name[..idx]),
        None => String::new(),
    }
}

/// Whether an attributed name refers to a nested type.
pub fn is_nested(binary_name: &str) -> bool {
    binary_name.contains('$')
}

/// Splits a qualified type name into its package and its chain of type names.
///
/// Binary names split at the first `$`. Source names split before the first
/// segment starting with an uppercase letter; when no segment does, the last
/// segment is taken as the type.
pub fn split_type_name(name: &str) -> (String, Vec<String>) {
    if let Some(dollar) = name.find('$') {
        let (outer, nested) = name.split_at(dollar);
        let (package, top) = match outer.rfind('.') {
            Some(dot) => (&outer[..dot], &outer[dot + 1..]),
            None => ("", outer),
        };
        let mut types = vec![top.to_string()];
        types.extend(
            nested
                .split('$')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        return (package.to_string(), types);
    }

    let segments: Vec<&str> = name.split('.').collect();
    let first_type = segments
        .iter()
        .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
        .unwrap_or(segments.len().saturating_sub(1));
    let package = segments[..first_type].join(".");
    let types = segments[first_type..].iter().map(|s| s.to_string()).collect();
    (package, types)
}

/// Builds the binary name for `package` and a chain of type names.
pub fn binary_name(package: &str, types: &[String]) -> String {
    let nested = types.join("$");
    if package.is_empty() {
        nested
    } else {
        format!("{}.{}", package, nested)
    }
}

/// Converts any qualified type name into binary form.
pub fn to_binary(name: &str) -> String {
    let (package, types) = split_type_name(name);
    binary_name(&package, &types)
}

/// Package of a qualified type name.
pub fn package_of(name: &str) -> String {
    split_type_name(name).0
}

/// Whether `segment` is a plausible Java identifier.
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Whether `text` looks like a dotted type name, e.g. `org.acme.Order`.
///
/// Used for string literals in annotation arguments.
pub fn looks_like_qualified_type(text: &str) -> bool {
    text.contains('.')
        && text.split('.').all(is_identifier)
        && text
            .split('.')
            .any(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
}
