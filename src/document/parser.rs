//! Minimal XML parser for interchange documents.
//!
//! Supports exactly what the wire format needs: one root element, nested
//! elements with attributes (single or double quoted), self-closing tags,
//! character data, comments, an optional XML declaration, and the five
//! predefined entities. Everything else is a syntax error.

use crate::error::{DocumentError, Result};

use super::XmlElement;

/// Parses a complete document, returning its root element.
///
/// # Errors
///
/// Returns [`DocumentError::Syntax`] if the input is not well-formed.
pub fn parse(input: &str) -> Result<XmlElement> {
    let mut cursor = Cursor::new(input);
    cursor.skip_prolog()?;
    let root = cursor.parse_element()?;
    cursor.skip_misc();
    if !cursor.at_end() {
        return Err(cursor.error("trailing content after the root element"));
    }
    Ok(root)
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.trim_start_matches('\u{feff}').chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> crate::error::CurvexError {
        DocumentError::Syntax {
            line: self.line,
            message: message.into(),
        }
        .into()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    /// Consumes `prefix` if the upcoming characters match it.
    fn eat(&mut self, prefix: &str) -> bool {
        let saved = self.chars.clone();
        for expected in prefix.chars() {
            if self.chars.peek() != Some(&expected) {
                self.chars = saved;
                return false;
            }
            self.bump();
        }
        true
    }

    fn skip_prolog(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.eat("<?") {
            loop {
                if self.eat("?>") {
                    break;
                }
                if self.bump().is_none() {
                    return Err(self.error("unterminated XML declaration"));
                }
            }
        }
        self.skip_misc();
        Ok(())
    }

    /// Skips whitespace and comments between elements.
    fn skip_misc(&mut self) {
        loop {
            self.skip_whitespace();
            if self.eat("<!--") {
                while !self.eat("-->") {
                    if self.bump().is_none() {
                        return;
                    }
                }
            } else {
                return;
            }
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(self.error("expected a name"));
        }
        Ok(name)
    }

    fn parse_element(&mut self) -> Result<XmlElement> {
        self.expect('<')?;
        let name = self.parse_name()?;
        let mut element = XmlElement::new(&name);

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('/') => {
                    self.bump();
                    self.expect('>')?;
                    return Ok(element);
                }
                Some('>') => {
                    self.bump();
                    self.parse_content(&mut element)?;
                    return Ok(element);
                }
                Some(_) => {
                    let attr_name = self.parse_name()?;
                    self.skip_whitespace();
                    self.expect('=')?;
                    self.skip_whitespace();
                    let value = self.parse_quoted()?;
                    element.set_attr(attr_name, value);
                }
                None => return Err(self.error("unterminated start tag")),
            }
        }
    }

    fn parse_quoted(&mut self) -> Result<String> {
        let quote = match self.bump() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Err(self.error("expected a quoted attribute value")),
        };
        let mut value = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(value);
                }
                Some('&') => value.push(self.parse_entity()?),
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
                None => return Err(self.error("unterminated attribute value")),
            }
        }
    }

    fn parse_content(&mut self, element: &mut XmlElement) -> Result<()> {
        loop {
            match self.peek() {
                Some('<') => {
                    if self.eat("<!--") {
                        while !self.eat("-->") {
                            if self.bump().is_none() {
                                return Err(self.error("unterminated comment"));
                            }
                        }
                    } else if self.eat("</") {
                        let close = self.parse_name()?;
                        if close != element.name {
                            return Err(self.error(format!(
                                "mismatched closing tag: expected </{}>, found </{close}>",
                                element.name
                            )));
                        }
                        self.skip_whitespace();
                        self.expect('>')?;
                        return Ok(());
                    } else {
                        element.push_child(self.parse_element()?);
                    }
                }
                Some('&') => {
                    let c = self.parse_entity()?;
                    element.text.push(c);
                }
                Some(c) => {
                    if !c.is_whitespace() || !element.text.is_empty() {
                        element.text.push(c);
                    }
                    self.bump();
                }
                None => return Err(self.error(format!("unclosed element <{}>", element.name))),
            }
        }
    }

    fn parse_entity(&mut self) -> Result<char> {
        self.expect('&')?;
        let mut name = String::new();
        loop {
            match self.bump() {
                Some(';') => break,
                Some(c) if name.len() < 8 => name.push(c),
                _ => return Err(self.error("malformed entity reference")),
            }
        }
        match name.as_str() {
            "amp" => Ok('&'),
            "lt" => Ok('<'),
            "gt" => Ok('>'),
            "quot" => Ok('"'),
            "apos" => Ok('\''),
            other => Err(self.error(format!("unknown entity: &{other};"))),
        }
    }
}
