use super::{ClassHeader, FieldSig, LineParser, MethodSig};
use crate::error::ParseError;
use crate::model::{MethodKind, Modifiers, Parameter};

pub(super) const CLASS_KINDS: &[&str] = &["class", "interface", "@interface", "enum"];
pub(crate) const FIELD_KINDS: &[&str] = &["field", "property", "enum_constant"];
pub(crate) const METHOD_KINDS: &[&str] = &["ctor", "method"];

fn modifiers_with(kind: &str, annotations: &[String], words: Vec<String>) -> Modifiers {
    let mut modifiers: Modifiers = words.into_iter().collect();
    modifiers.insert(kind);
    if annotations.iter().any(|a| a == "@Deprecated") {
        modifiers.insert("deprecated");
    }
    modifiers
}

impl LineParser {
    // -- Class --------------------------------------------------

    pub(super) fn parse_class_header(&mut self) -> Result<ClassHeader, ParseError> {
        let annotations = self.parse_annotations()?;
        let words = self.parse_modifiers();
        let kind = self.expect_one_of(CLASS_KINDS)?;
        let mut modifiers = modifiers_with(&kind, &annotations, words);
        if kind == "enum" {
            // enums are implicitly final
            modifiers.insert("final");
        }
        let name = self.parse_name()?;
        self.skip_group("<", ">")?;

        let extends_all = if self.parse_if("extends") {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        let mut implements_all = if self.parse_if("implements") {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        if kind == "interface" && implements_all.is_empty() {
            implements_all = extends_all.clone();
        }

        self.expect("{")?;
        self.expect_eof()?;
        Ok(ClassHeader {
            modifiers,
            annotations,
            name,
            extends_all,
            implements_all,
        })
    }

    // -- Method -------------------------------------------------

    pub(super) fn parse_method(&mut self, in_annotation_type: bool) -> Result<MethodSig, ParseError> {
        let kind_word = self.expect_one_of(METHOD_KINDS)?;
        let annotations = self.parse_annotations()?;
        let words = self.parse_modifiers();
        let modifiers = modifiers_with(&kind_word, &annotations, words);
        self.skip_group("<", ">")?;

        let kind = if kind_word == "ctor" {
            MethodKind::Ctor
        } else {
            MethodKind::Method
        };
        let typ = match kind {
            MethodKind::Ctor => "ctor".to_owned(),
            MethodKind::Method => self.parse_type()?,
        };
        let name = self.parse_name()?;
        let parameters = self.parse_parameters()?;
        let throws = self.parse_throws()?;
        let default_value = if in_annotation_type && self.parse_if("default") {
            Some(self.parse_expression(&[";"])?)
        } else {
            None
        };
        self.expect(";")?;
        self.expect_eof()?;

        Ok(MethodSig {
            kind,
            modifiers,
            annotations,
            typ,
            name,
            parameters,
            throws,
            default_value,
        })
    }

    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut parameters = Vec::new();
        self.expect("(")?;
        if self.parse_if(")") {
            return Ok(parameters);
        }
        loop {
            parameters.push(self.parse_parameter()?);
            if self.parse_if(")") {
                return Ok(parameters);
            }
            self.expect(",")?;
        }
    }

    fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        // kotlin vararg
        self.parse_if("vararg");
        let annotations = self.parse_annotations()?;
        let mut param = Parameter::of_type(self.parse_arg_type()?);
        param.annotations = annotations;
        if !self.lookahead_is(",") && !self.lookahead_is(")") && !self.lookahead_is("=") {
            param.name = Some(self.parse_name()?);
        }
        if self.parse_if("=") {
            param.default = Some(self.parse_expression(&[",", ")"])?);
        }
        Ok(param)
    }

    fn parse_throws(&mut self) -> Result<Vec<String>, ParseError> {
        let mut throws = Vec::new();
        if self.parse_if("throws") {
            throws.push(self.parse_type()?);
            while self.parse_if(",") {
                throws.push(self.parse_type()?);
            }
        }
        Ok(throws)
    }

    // -- Field --------------------------------------------------

    pub(super) fn parse_field(&mut self) -> Result<FieldSig, ParseError> {
        let kind = self.expect_one_of(FIELD_KINDS)?;
        let annotations = self.parse_annotations()?;
        let words = self.parse_modifiers();
        let modifiers = modifiers_with(&kind, &annotations, words);
        let typ = self.parse_type()?;
        let name = self.parse_name()?;
        let value = if self.parse_if("=") {
            Some(self.parse_expression(&[";"])?)
        } else {
            None
        };
        self.expect(";")?;
        self.expect_eof()?;

        Ok(FieldSig {
            modifiers,
            annotations,
            typ,
            name,
            value,
        })
    }
}
