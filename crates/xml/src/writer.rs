//! Streaming XML output on top of quick-xml events.
//!
//! [`XmlWrite`] is the writer capability the serialization engine targets;
//! [`XmlWriter`] is the shipped implementation. It buffers the most recent
//! start tag so attributes can still attach to it, emits the XML declaration
//! before the first element, and collapses contentless elements into
//! self-closing form. Escaping of text and attribute values is handled by
//! quick-xml; raw fragments bypass escaping through an event-copy loop and
//! fail loudly on malformed input.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Result, XmlError};

/// The writer primitives the serialization engine calls.
pub trait XmlWrite {
    /// Opens an element. Attributes may be written until the next content.
    fn write_start_element(&mut self, name: &str) -> Result<()>;

    /// Attaches an attribute to the currently open start tag.
    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()>;

    /// Writes a complete element with attributes and escaped text content.
    /// Empty text produces a self-closing element.
    fn write_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()>;

    /// Inlines pre-formed XML verbatim, without escaping.
    fn write_xml_fragment(&mut self, raw: &str) -> Result<()>;

    /// Closes the most recently opened element.
    fn write_end_element(&mut self) -> Result<()>;
}

/// Streaming writer producing an XML document on any [`Write`] sink.
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
    pending: Option<BytesStart<'static>>,
    open: Vec<String>,
    declaration_written: bool,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: Writer::new(sink),
            pending: None,
            open: Vec::new(),
            declaration_written: false,
        }
    }

    /// Finishes the document and returns the sink.
    ///
    /// Fails if any element is still open; the writer never closes elements
    /// on the caller's behalf.
    pub fn finish(self) -> Result<W> {
        if self.pending.is_some() || !self.open.is_empty() {
            return Err(XmlError::Custom("unclosed elements remain".to_string()));
        }
        Ok(self.writer.into_inner())
    }

    fn write_declaration(&mut self) -> Result<()> {
        if !self.declaration_written {
            self.writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            self.declaration_written = true;
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}

impl<W: Write> XmlWrite for XmlWriter<W> {
    fn write_start_element(&mut self, name: &str) -> Result<()> {
        self.write_declaration()?;
        self.flush_pending()?;
        self.pending = Some(BytesStart::new(name.to_string()));
        self.open.push(name.to_string());
        Ok(())
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        match self.pending.as_mut() {
            Some(start) => {
                start.push_attribute((name, value));
                Ok(())
            }
            None => Err(XmlError::MisplacedAttribute {
                name: name.to_string(),
            }),
        }
    }

    fn write_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        self.write_declaration()?;
        self.flush_pending()?;

        let mut element = BytesStart::new(name.to_string());
        for (key, value) in attributes {
            element.push_attribute((*key, *value));
        }

        if text.is_empty() {
            self.writer.write_event(Event::Empty(element))?;
        } else {
            self.writer.write_event(Event::Start(element))?;
            self.writer.write_event(Event::Text(BytesText::new(text)))?;
            self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        }

        Ok(())
    }

    fn write_xml_fragment(&mut self, raw: &str) -> Result<()> {
        self.write_declaration()?;
        self.flush_pending()?;

        let mut reader = Reader::from_str(raw);
        reader.config_mut().trim_text(false);

        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(event) => {
                    self.writer.write_event(event)?;
                }
                Err(e) => {
                    return Err(XmlError::Custom(format!("malformed XML fragment: {e}")));
                }
            }
        }

        Ok(())
    }

    fn write_end_element(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Empty(start))?;
            self.open.pop();
            return Ok(());
        }

        match self.open.pop() {
            Some(name) => {
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
                Ok(())
            }
            None => Err(XmlError::Custom(
                "end element without an open element".to_string(),
            )),
        }
    }
}
