//! Raw type references and their compact textual syntax.
//!
//! The syntax mirrors how type references are written in source code:
//!
//! ```text
//! com.example.Foo
//! java.util.Map<java.lang.String, com.example.Foo>
//! ? extends com.example.Foo
//! int
//! com.example.Foo[]
//! T
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Substitution, TypeRefError};

/// Erasure used for references that carry no concrete type.
pub const OBJECT: &str = "java.lang.Object";

/// Primitive scalar types. Never nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    /// Get the keyword used for this primitive in type references.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }

    /// Look up a primitive by its keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "boolean" => Primitive::Boolean,
            "byte" => Primitive::Byte,
            "char" => Primitive::Char,
            "short" => Primitive::Short,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "float" => Primitive::Float,
            "double" => Primitive::Double,
            "void" => Primitive::Void,
            _ => return None,
        };
        Some(primitive)
    }
}

/// A type reference as declared, before any generic resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// A declared type, optionally parameterized.
    Named { name: String, args: Vec<TypeRef> },
    /// A primitive scalar.
    Primitive(Primitive),
    /// An array of the element type.
    Array(Box<TypeRef>),
    /// A type variable such as `T`.
    Variable(String),
    /// A wildcard with optional upper (`extends`) and lower (`super`) bounds.
    Wildcard {
        upper: Option<Box<TypeRef>>,
        lower: Option<Box<TypeRef>>,
    },
}

impl TypeRef {
    /// A plain declared type without type arguments.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized type.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            args,
        }
    }

    /// A type variable.
    pub fn variable(name: impl Into<String>) -> Self {
        TypeRef::Variable(name.into())
    }

    /// An array of `elem`.
    pub fn array(elem: TypeRef) -> Self {
        TypeRef::Array(Box::new(elem))
    }

    /// The unbounded wildcard `?`.
    pub fn wildcard() -> Self {
        TypeRef::Wildcard {
            upper: None,
            lower: None,
        }
    }

    /// `? extends bound`
    pub fn extends(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            upper: Some(Box::new(bound)),
            lower: None,
        }
    }

    /// `? super bound`
    pub fn super_of(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            upper: None,
            lower: Some(Box::new(bound)),
        }
    }

    /// Parse the textual form of a type reference.
    pub fn parse(input: &str) -> Result<Self, TypeRefError> {
        Parser::new(input).parse()
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    /// Type arguments of a parameterized type (empty otherwise).
    pub fn args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Named { args, .. } => args,
            _ => &[],
        }
    }

    /// The bound a wildcard stands for, preferring the lower bound.
    pub fn bound(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Wildcard { upper, lower } => lower.as_deref().or(upper.as_deref()),
            _ => None,
        }
    }

    /// The raw class name this reference stands for, if it names one.
    ///
    /// Type variables and unbounded wildcards have no raw name.
    pub fn raw_name(&self) -> Option<String> {
        match self {
            TypeRef::Named { name, .. } => Some(name.clone()),
            TypeRef::Primitive(p) => Some(p.as_str().to_string()),
            TypeRef::Array(elem) => Some(format!("{}[]", elem.erasure())),
            TypeRef::Variable(_) => None,
            TypeRef::Wildcard { .. } => self.bound().and_then(TypeRef::raw_name),
        }
    }

    /// The raw erasure of this reference, falling back to [`OBJECT`].
    pub fn erasure(&self) -> String {
        self.raw_name().unwrap_or_else(|| OBJECT.to_string())
    }

    /// Replace type variables bound in `subst`; unbound variables are kept.
    pub fn substitute(&self, subst: &Substitution) -> TypeRef {
        match self {
            TypeRef::Variable(name) => subst.get(name).cloned().unwrap_or_else(|| self.clone()),
            TypeRef::Named { name, args } => TypeRef::Named {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(subst)).collect(),
            },
            TypeRef::Array(elem) => TypeRef::Array(Box::new(elem.substitute(subst))),
            TypeRef::Wildcard { upper, lower } => TypeRef::Wildcard {
                upper: upper.as_ref().map(|b| Box::new(b.substitute(subst))),
                lower: lower.as_ref().map(|b| Box::new(b.substitute(subst))),
            },
            TypeRef::Primitive(_) => self.clone(),
        }
    }

    /// Turn bare names that match a type parameter in `scope` into variables.
    pub(crate) fn bind_variables(self, scope: &[String]) -> TypeRef {
        match self {
            TypeRef::Named { name, args } if args.is_empty() && scope.contains(&name) => {
                TypeRef::Variable(name)
            }
            TypeRef::Named { name, args } => TypeRef::Named {
                name,
                args: args.into_iter().map(|a| a.bind_variables(scope)).collect(),
            },
            TypeRef::Array(elem) => TypeRef::Array(Box::new(elem.bind_variables(scope))),
            TypeRef::Wildcard { upper, lower } => TypeRef::Wildcard {
                upper: upper.map(|b| Box::new(b.bind_variables(scope))),
                lower: lower.map(|b| Box::new(b.bind_variables(scope))),
            },
            other => other,
        }
    }

    /// Visit every declared type name mentioned by this reference.
    pub fn visit_names(&self, visit: &mut impl FnMut(&str)) {
        match self {
            TypeRef::Named { name, args } => {
                visit(name);
                for arg in args {
                    arg.visit_names(visit);
                }
            }
            TypeRef::Array(elem) => elem.visit_names(visit),
            TypeRef::Wildcard { upper, lower } => {
                if let Some(lower) = lower {
                    lower.visit_names(visit);
                }
                if let Some(upper) = upper {
                    upper.visit_names(visit);
                }
            }
            TypeRef::Primitive(_) | TypeRef::Variable(_) => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Primitive(p) => f.write_str(p.as_str()),
            TypeRef::Array(elem) => write!(f, "{}[]", elem),
            TypeRef::Variable(name) => f.write_str(name),
            TypeRef::Wildcard { upper, lower } => match (lower, upper) {
                (Some(lower), _) => write!(f, "? super {}", lower),
                (None, Some(upper)) => write!(f, "? extends {}", upper),
                (None, None) => f.write_str("?"),
            },
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeRef::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeRef::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> Result<TypeRef, TypeRefError> {
        self.skip_ws();
        if self.peek().is_none() {
            return Err(TypeRefError::Empty);
        }
        let ty = self.parse_type()?;
        self.skip_ws();
        match self.peek() {
            None => Ok(ty),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeRefError> {
        self.skip_ws();
        if self.eat('?') {
            return self.parse_wildcard();
        }

        let mut ty = self.parse_named()?;
        loop {
            self.skip_ws();
            if !self.eat('[') {
                break;
            }
            self.expect(']')?;
            ty = TypeRef::array(ty);
        }
        Ok(ty)
    }

    fn parse_wildcard(&mut self) -> Result<TypeRef, TypeRefError> {
        self.skip_ws();
        if self.eat_keyword("extends") {
            return Ok(TypeRef::extends(self.parse_type()?));
        }
        if self.eat_keyword("super") {
            return Ok(TypeRef::super_of(self.parse_type()?));
        }
        Ok(TypeRef::wildcard())
    }

    fn parse_named(&mut self) -> Result<TypeRef, TypeRefError> {
        let mut name = self.ident()?.to_string();
        while self.peek() == Some('.') {
            self.bump();
            name.push('.');
            name.push_str(self.ident()?);
        }

        self.skip_ws();
        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                self.skip_ws();
                if self.eat(',') {
                    continue;
                }
                self.expect('>')?;
                break;
            }
        }

        if args.is_empty()
            && !name.contains('.')
            && let Some(primitive) = Primitive::from_name(&name)
        {
            return Ok(TypeRef::Primitive(primitive));
        }
        Ok(TypeRef::Named { name, args })
    }

    fn ident(&mut self) -> Result<&'a str, TypeRefError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) => self.bump(),
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(self.end()),
        }
        while let Some(c) = self.peek() {
            if !is_ident_continue(c) {
                break;
            }
            self.bump();
        }
        Ok(&self.input[start..self.pos])
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = &self.input[self.pos..];
        let followed_by_ident = rest
            .get(keyword.len()..)
            .and_then(|tail| tail.chars().next())
            .is_some_and(is_ident_continue);
        if rest.starts_with(keyword) && !followed_by_ident {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeRefError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.end()),
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn unexpected(&self, found: char) -> TypeRefError {
        TypeRefError::Unexpected {
            input: self.input.to_string(),
            offset: self.pos,
            found,
        }
    }

    fn end(&self) -> TypeRefError {
        TypeRefError::UnexpectedEnd {
            input: self.input.to_string(),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
