//! Minimal XML element tree built from quick-xml events
//!
//! Only what table reading needs is kept: element names, their direct text and
//! their child elements. Attributes, comments, processing instructions and
//! namespaces are ignored.

use super::ImportError;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::ErrorKind;
use std::path::Path;

/// One element of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct text and CDATA content, unescaped, whitespace preserved.
    ///
    /// `Some("")` for `<a/>` and `<a></a>`. `None` for container elements whose
    /// only text is the whitespace between their children.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn children_named<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }
}

struct OpenElement {
    name: String,
    text: String,
    children: Vec<XmlElement>,
}

impl OpenElement {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn close(self) -> XmlElement {
        let text = if !self.children.is_empty() && self.text.trim().is_empty() {
            None
        } else {
            Some(self.text)
        };
        XmlElement {
            name: self.name,
            text,
            children: self.children,
        }
    }
}

/// A parsed XML document
#[derive(Debug, Clone)]
pub struct XmlDocument {
    source: String,
    root: XmlElement,
}

impl XmlDocument {
    /// Read and parse a file.
    ///
    /// Fails with [`ImportError::MissingFile`] if it does not exist and
    /// [`ImportError::MalformedDocument`] if it is not well-formed UTF-8 XML.
    pub fn from_file(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ImportError::MissingFile(path.to_path_buf()),
            _ => ImportError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        let source = path.display().to_string();
        let content = String::from_utf8(content).map_err(|e| ImportError::MalformedDocument {
            source_name: source.clone(),
            reason: format!("invalid UTF-8: {}", e),
        })?;
        Self::parse(&content, source)
    }

    /// Parse a document held in memory. `source` names it in error messages.
    pub fn parse(content: &str, source: impl Into<String>) -> Result<Self, ImportError> {
        let source = source.into();
        let malformed = |reason: String| ImportError::MalformedDocument {
            source_name: source.clone(),
            reason,
        };

        let mut reader = Reader::from_str(content);
        let mut open: Vec<OpenElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if open.is_empty() && root.is_some() {
                        return Err(malformed("more than one root element".to_string()));
                    }
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    open.push(OpenElement::new(name));
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    Self::attach(&mut open, &mut root, OpenElement::new(name).close())
                        .map_err(malformed)?;
                }
                Ok(Event::End(_)) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| malformed("unexpected closing tag".to_string()))?;
                    Self::attach(&mut open, &mut root, element.close()).map_err(malformed)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| malformed(format!("at position {}: {}", reader.buffer_position(), e)))?;
                    match open.last_mut() {
                        Some(element) => element.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => return Err(malformed("text outside the root element".to_string())),
                    }
                }
                Ok(Event::CData(e)) => {
                    let bytes = e.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|e| malformed(format!("invalid UTF-8 in CDATA: {}", e)))?;
                    match open.last_mut() {
                        Some(element) => element.text.push_str(text),
                        None => return Err(malformed("CDATA outside the root element".to_string())),
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(malformed(format!(
                        "parse error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
            }
        }

        if let Some(element) = open.last() {
            return Err(malformed(format!("element '{}' is never closed", element.name)));
        }
        let root = root.ok_or_else(|| malformed("document has no root element".to_string()))?;
        Ok(Self { source, root })
    }

    fn attach(
        open: &mut [OpenElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<(), String> {
        match open.last_mut() {
            Some(parent) => {
                parent.children.push(element);
                Ok(())
            }
            None if root.is_none() => {
                *root = Some(element);
                Ok(())
            }
            None => Err("more than one root element".to_string()),
        }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// File path or label the document was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }
}
