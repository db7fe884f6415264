//! Minimal XML element parser for scene files.
//!
//! Builds a tree of elements with their attributes and text content.
//! Handles the `<?xml ?>` prolog, `<!DOCTYPE>`, comments and self-closing
//! tags. Entities, CDATA and namespaces are not interpreted; scene files
//! only carry numbers and file names.

use thiserror::Error;

/// Errors that can occur during XML parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Unexpected end of file")]
    UnexpectedEof,

    #[error("Element <{name}> opened at line {line} is never closed")]
    UnclosedElement { name: String, line: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest element nesting accepted below the root.
pub const MAX_DEPTH: usize = 256;

/// A parsed XML element.
#[derive(Clone, Debug, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated character data directly inside this element
    pub text: String,
    /// Line of the opening tag
    pub line: usize,
}

impl XmlElement {
    fn new(name: String, line: usize) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
            line,
        }
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Value of an attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Text content with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// Cursor-based XML parser.
pub struct XmlParser<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    depth: usize,
}

impl<'a> XmlParser<'a> {
    /// Create a new parser over file contents.
    pub fn new(content: &'a str) -> Self {
        Self {
            src: content,
            pos: 0,
            line: 1,
            depth: 0,
        }
    }

    /// Parse the document and return its root element.
    pub fn parse(&mut self) -> ParseResult<XmlElement> {
        self.skip_misc()?;
        if self.at_end() {
            return Err(ParseError::UnexpectedEof);
        }

        let root = self.parse_element()?;

        self.skip_misc()?;
        if !self.at_end() {
            return Err(self.error("content after the root element"));
        }
        Ok(root)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Move forward `n` bytes, keeping the line count current.
    fn advance(&mut self, n: usize) {
        let consumed = &self.src[self.pos..self.pos + n];
        self.line += consumed.matches('\n').count();
        self.pos += n;
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let n = rest.len() - rest.trim_start().len();
        self.advance(n);
    }

    fn skip_past(&mut self, terminator: &str) -> ParseResult<()> {
        match self.rest().find(terminator) {
            Some(idx) => {
                self.advance(idx + terminator.len());
                Ok(())
            }
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Skip whitespace, comments, processing instructions and doctype.
    fn skip_misc(&mut self) -> ParseResult<()> {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.skip_past("-->")?;
            } else if rest.starts_with("<?") {
                self.skip_past("?>")?;
            } else if rest.starts_with("<!") {
                self.skip_past(">")?;
            } else {
                return Ok(());
            }
        }
    }

    /// Parse `<name attr="v" ...>content</name>` or `<name ... />`.
    fn parse_element(&mut self) -> ParseResult<XmlElement> {
        let start_line = self.line;
        if !self.rest().starts_with('<') {
            return Err(self.error("expected '<'"));
        }
        self.advance(1);

        let name = self.parse_name()?;
        let mut element = XmlElement::new(name, start_line);

        // Attributes
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("/>") {
                self.advance(2);
                return Ok(element);
            }
            if rest.starts_with('>') {
                self.advance(1);
                break;
            }
            if rest.is_empty() {
                return Err(ParseError::UnexpectedEof);
            }

            let key = self.parse_name()?;
            self.skip_whitespace();
            if !self.rest().starts_with('=') {
                return Err(self.error(format!("expected '=' after attribute '{}'", key)));
            }
            self.advance(1);
            self.skip_whitespace();
            let value = self.parse_quoted()?;
            element.attributes.push((key, value));
        }

        // Content
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Err(ParseError::UnclosedElement {
                    name: element.name,
                    line: start_line,
                });
            }

            if rest.starts_with("<!--") {
                self.skip_past("-->")?;
            } else if rest.starts_with("</") {
                self.advance(2);
                let closing = self.parse_name()?;
                if closing != element.name {
                    return Err(self.error(format!(
                        "expected </{}>, found </{}>",
                        element.name, closing
                    )));
                }
                self.skip_whitespace();
                if !self.rest().starts_with('>') {
                    return Err(self.error("expected '>'"));
                }
                self.advance(1);
                return Ok(element);
            } else if rest.starts_with('<') {
                if self.depth >= MAX_DEPTH {
                    return Err(self.error("elements nested too deeply"));
                }
                self.depth += 1;
                let child = self.parse_element()?;
                self.depth -= 1;
                element.children.push(child);
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                element.text.push_str(&rest[..end]);
                self.advance(end);
            }
        }
    }

    fn parse_name(&mut self) -> ParseResult<String> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(self.error("expected a name"));
        }

        let name = rest[..end].to_string();
        self.advance(end);
        Ok(name)
    }

    fn parse_quoted(&mut self) -> ParseResult<String> {
        let rest = self.rest();
        let quote = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            Some(_) => return Err(self.error("expected a quoted attribute value")),
            None => return Err(ParseError::UnexpectedEof),
        };

        let body = &rest[1..];
        let end = body.find(quote).ok_or(ParseError::UnexpectedEof)?;
        let value = body[..end].to_string();
        self.advance(end + 2);
        Ok(value)
    }
}

/// Convenience function to parse XML content.
pub fn parse_xml(content: &str) -> ParseResult<XmlElement> {
    XmlParser::new(content).parse()
}
