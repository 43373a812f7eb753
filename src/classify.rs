//! Import classification.
//!
//! Turns an [`ImportDeclaration`] into the facts the decider works with: what
//! kind of binding it introduces, which package or owner type it draws from,
//! and the binary name it denotes.

use crate::error::PruneError;
use crate::names;
use crate::tree::ImportDeclaration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `import a.b.C;`
    Type,
    /// `import static a.b.C.member;`
    StaticMember,
    /// `import a.b.*;` or `import a.b.C.*;`
    TypeWildcard,
    /// `import static a.b.C.*;`
    StaticWildcard,
}

impl ImportKind {
    pub fn is_static(self) -> bool {
        matches!(self, Self::StaticMember | Self::StaticWildcard)
    }

    pub fn is_wildcard(self) -> bool {
        matches!(self, Self::TypeWildcard | Self::StaticWildcard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescriptor {
    pub kind: ImportKind,
    /// Package or owner type the binding is drawn from, in source form.
    ///
    /// For a type import this is the enclosing package (or outer type, for a
    /// nested type); for static imports and wildcards it is the owner or
    /// wildcard target itself.
    pub container: String,
    /// Binary name of the imported type, of the static owner, or of the
    /// wildcard target.
    pub binary_name: String,
    /// Imported simple name, `None` for wildcards.
    pub simple_name: Option<String>,
    /// For type imports: the imported type is nested. For type wildcards: the
    /// wildcard imports the member types of a type rather than a package.
    pub nested: bool,
}

impl ImportDescriptor {
    /// Package that folding rules are keyed on.
    pub fn package(&self) -> String {
        match self.kind {
            ImportKind::TypeWildcard if !self.nested => self.container.clone(),
            _ => names::package_of(&self.binary_name),
        }
    }

    /// Binary name of a member reached through this wildcard.
    pub fn member_binary_name(&self, member: &str) -> String {
        let separator = match self.kind {
            ImportKind::TypeWildcard if !self.nested => '.',
            _ => '$',
        };
        format!("{}{}{}", self.binary_name, separator, member)
    }
}

/// Classifies one import declaration.
///
/// Fails only for declarations a conforming parser cannot produce.
pub fn classify(import: &ImportDeclaration) -> Result<ImportDescriptor, PruneError> {
    let qualified = import.qualified.as_str();
    if qualified.is_empty() {
        return Err(PruneError::malformed(import.to_string(), "empty import target"));
    }
    let segments: Vec<&str> = qualified.split('.').collect();
    if let Some(bad) = segments.iter().find(|s| !names::is_identifier(s)) {
        let reason = if bad.is_empty() {
            "empty name segment".to_string()
        } else {
            format!("'{}' is not an identifier", bad)
        };
        return Err(PruneError::malformed(import.to_string(), reason));
    }

    let attributed = import.type_name.as_deref();
    let (member, owner) = match segments.split_last() {
        Some((last, rest)) => (*last, rest.join(".")),
        None => return Err(PruneError::malformed(import.to_string(), "empty import target")),
    };

    match (import.is_static, import.wildcard) {
        (false, false) => {
            if owner.is_empty() {
                return Err(PruneError::malformed(
                    import.to_string(),
                    "type import without a package",
                ));
            }
            let binary = attributed.map_or_else(|| names::to_binary(qualified), str::to_string);
            if names::simple_name(&binary) != member {
                return Err(PruneError::malformed(
                    import.to_string(),
                    format!("attributed type '{}' does not end in '{}'", binary, member),
                ));
            }
            Ok(ImportDescriptor {
                kind: ImportKind::Type,
                container: names::container(&binary),
                nested: names::is_nested(&binary),
                binary_name: binary,
                simple_name: Some(member.to_string()),
            })
        }
        (false, true) => {
            let names_a_type = segments
                .iter()
                .any(|s| s.starts_with(|c: char| c.is_ascii_uppercase()));
            let binary = match attributed {
                Some(name) => name.to_string(),
                None if names_a_type => names::to_binary(qualified),
                None => qualified.to_string(),
            };
            Ok(ImportDescriptor {
                kind: ImportKind::TypeWildcard,
                container: names::normalize(&binary),
                nested: names_a_type || names::is_nested(&binary),
                binary_name: binary,
                simple_name: None,
            })
        }
        (true, false) => {
            if owner.is_empty() {
                return Err(PruneError::malformed(
                    import.to_string(),
                    "static import without an owner type",
                ));
            }
            let binary = attributed.map_or_else(|| names::to_binary(&owner), str::to_string);
            Ok(ImportDescriptor {
                kind: ImportKind::StaticMember,
                container: names::normalize(&binary),
                nested: false,
                binary_name: binary,
                simple_name: Some(member.to_string()),
            })
        }
        (true, true) => {
            let binary = attributed.map_or_else(|| names::to_binary(qualified), str::to_string);
            Ok(ImportDescriptor {
                kind: ImportKind::StaticWildcard,
                container: names::normalize(&binary),
                nested: false,
                binary_name: binary,
                simple_name: None,
            })
        }
    }
}
