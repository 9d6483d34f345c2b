use super::LineParser;
use crate::error::ParseError;
use crate::lexer::TokenKind;

/// Words accepted in modifier position.
pub(super) const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "internal",
    "private",
    "abstract",
    "default",
    "static",
    "final",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "operator",
    "sealed",
    "strictfp",
    "infix",
    "inline",
    "suspend",
    "vararg",
];

/// Simple names of `java.lang` types the dump writes without a package.
/// Sorted for binary search.
pub const JAVA_LANG_TYPES: &[&str] = &[
    "AbstractMethodError",
    "AbstractStringBuilder",
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
    "LinkageError",
    "Long",
    "Math",
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
    "Readable",
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

/// Qualify a bare `java.lang` type name; anything else is returned as is.
pub fn elide_java_lang(name: &str) -> String {
    if JAVA_LANG_TYPES.binary_search(&name).is_ok() {
        format!("java.lang.{}", name)
    } else {
        name.to_owned()
    }
}

impl LineParser {
    // -- Annotations and modifiers ------------------------------

    pub(super) fn parse_annotations(&mut self) -> Result<Vec<String>, ParseError> {
        let mut annotations = Vec::new();
        while self.lookahead_kind() == Some(TokenKind::At) {
            annotations.push(self.parse_annotation()?);
        }
        Ok(annotations)
    }

    /// `@Name` with an optional, discarded `( ... )` argument list.
    pub(super) fn parse_annotation(&mut self) -> Result<String, ParseError> {
        self.expect("@")?;
        let name = self.parse_name()?;
        self.skip_group("(", ")")?;
        Ok(format!("@{}", name))
    }

    pub(super) fn parse_modifiers(&mut self) -> Vec<String> {
        let mut modifiers = Vec::new();
        while let Some(t) = self.lookahead() {
            if !MODIFIERS.contains(&t.text.as_str()) {
                break;
            }
            modifiers.push(t.text.clone());
            self.pos += 1;
        }
        modifiers
    }

    // -- Type parsing -------------------------------------------

    /// A type reference: qualified name, generic arguments (dropped), array
    /// suffixes (kept), type-use annotations and Kotlin nullability (dropped).
    pub(super) fn parse_type(&mut self) -> Result<String, ParseError> {
        self.parse_annotations()?;
        let mut typ = self.parse_type_name()?;
        if typ.ends_with('.') {
            self.parse_annotations()?;
            typ.push_str(&self.parse_type_name()?);
        }
        let mut typ = elide_java_lang(&typ);
        self.skip_group("<", ">")?;
        loop {
            match self.lookahead_kind() {
                Some(TokenKind::At) => {
                    self.parse_annotation()?;
                }
                Some(TokenKind::Array) => {
                    self.pos += 1;
                    typ.push_str("[]");
                }
                _ if self.parse_kotlin_nullability() => {}
                _ => break,
            }
        }
        Ok(typ)
    }

    /// A parameter type, with `...` appended for varargs.
    pub(super) fn parse_arg_type(&mut self) -> Result<String, ParseError> {
        let mut typ = self.parse_type()?;
        if self.parse_if("...") {
            typ.push_str("...");
        }
        self.parse_kotlin_nullability();
        Ok(typ)
    }

    fn parse_type_name(&mut self) -> Result<String, ParseError> {
        match self.lookahead() {
            Some(t) if t.kind == TokenKind::Word => {
                let name = t.text.clone();
                self.pos += 1;
                Ok(name)
            }
            Some(t) => Err(ParseError::Expected {
                expected: "type".to_owned(),
                found: t.text.clone(),
                tokens: self.texts(),
            }),
            None => Err(self.unexpected_end("type")),
        }
    }

    fn parse_kotlin_nullability(&mut self) -> bool {
        self.parse_if("?") || self.parse_if("!")
    }

    /// Space- or comma-separated supertypes after `extends`/`implements`,
    /// up to the next clause keyword or `{`.
    pub(super) fn parse_type_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut types = vec![self.parse_type()?];
        loop {
            self.parse_if(",");
            match self.lookahead() {
                None => break,
                Some(t) if t.is("{") || t.is("implements") || t.is("extends") => break,
                Some(_) => types.push(self.parse_type()?),
            }
        }
        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_lang_table_is_sorted() {
        let mut sorted = JAVA_LANG_TYPES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, JAVA_LANG_TYPES);
    }

    #[test]
    fn elision() {
        assert_eq!(elide_java_lang("String"), "java.lang.String");
        assert_eq!(elide_java_lang("Exception"), "java.lang.Exception");
        assert_eq!(elide_java_lang("int"), "int");
        assert_eq!(elide_java_lang("android.os.String"), "android.os.String");
        assert_eq!(elide_java_lang("T"), "T");
    }

    #[test]
    fn parse_type_drops_generics_keeps_arrays() {
        let mut p = LineParser::new("Map<String, List<int[]>>[] rest").unwrap();
        assert_eq!(p.parse_type().unwrap(), "Map[]");
        assert_eq!(p.parse_name().unwrap(), "rest");
    }

    #[test]
    fn parse_type_rejects_punctuation() {
        let mut p = LineParser::new("( x").unwrap();
        assert!(p.parse_type().is_err());
    }

    #[test]
    fn annotation_arguments_with_nested_parens() {
        let mut p = LineParser::new("@A(x=(1+(2)), y={3}) @B public").unwrap();
        assert_eq!(p.parse_annotations().unwrap(), vec!["@A", "@B"]);
        assert_eq!(p.parse_modifiers(), vec!["public"]);
        assert!(p.eof());
    }

    #[test]
    fn unclosed_annotation_arguments() {
        let mut p = LineParser::new("@A(x=(1) public").unwrap();
        assert!(matches!(
            p.parse_annotations(),
            Err(ParseError::Unclosed { .. })
        ));
    }
}
