//! Streaming `osmChange` reader.

mod attributes;
mod frame;

use std::io::BufRead;

use log::debug;
use osc2sql_core::{ChangesetDocument, Element};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::ChangesetParseError;

use self::{
    attributes::Attributes,
    frame::{Closed, Frame},
};

/// Parse an `osmChange` document from a buffered reader.
///
/// Elements are matched by local name, so namespace prefixes are ignored.
/// `create`, `modify` and `delete` become operations wherever they appear;
/// `node` and `way` become entities only directly inside an operation.
/// Text inside the root and unrecognised entity children are dropped.
///
/// # Errors
/// Returns [`ChangesetParseError`] for malformed XML or attributes, for
/// input that ends with elements still open, for input without exactly one
/// root element, and for text outside the root.
pub fn parse_changeset<R: BufRead>(input: R) -> Result<ChangesetDocument, ChangesetParseError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);
    let mut builder = TreeBuilder::default();
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| ChangesetParseError::Xml {
                position: reader.buffer_position(),
                source,
            })?;
        match event {
            Event::Start(start) => builder.open(&start, position)?,
            Event::Empty(start) => {
                builder.open(&start, position)?;
                builder.close(None, position)?;
            }
            Event::End(end) => {
                let name = local_name(end.local_name().as_ref());
                builder.close(Some(name), position)?;
            }
            Event::Text(text) => builder.text(&text, position)?,
            Event::CData(data) => builder.text(&data, position)?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

/// Parse an `osmChange` document held in memory.
///
/// # Errors
/// See [`parse_changeset`].
///
/// # Examples
/// ```
/// use osc2sql_data::parse_changeset_str;
///
/// let document = parse_changeset_str(
///     r#"<osmChange version="0.6"><delete><node id="5"/></delete></osmChange>"#,
/// )?;
/// assert_eq!(document.operations().count(), 1);
/// # Ok::<(), osc2sql_data::ChangesetParseError>(())
/// ```
pub fn parse_changeset_str(input: &str) -> Result<ChangesetDocument, ChangesetParseError> {
    parse_changeset(input.as_bytes())
}

#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    roots: Vec<Element>,
    root_seen: bool,
}

impl TreeBuilder {
    fn open(&mut self, start: &BytesStart<'_>, position: u64) -> Result<(), ChangesetParseError> {
        let name = local_name(start.local_name().as_ref());
        if self.stack.is_empty() {
            if self.root_seen {
                return Err(ChangesetParseError::ExtraRoot { name, position });
            }
            self.root_seen = true;
        }
        let attributes = Attributes::read(start, position)?;
        let frame = Frame::open(self.stack.last_mut(), name, attributes);
        self.stack.push(frame);
        Ok(())
    }

    /// Character data is only allowed inside the root; whitespace anywhere
    /// is fine.
    fn text(&self, content: &[u8], position: u64) -> Result<(), ChangesetParseError> {
        if self.stack.is_empty() && !content.iter().all(u8::is_ascii_whitespace) {
            return Err(ChangesetParseError::TextOutsideRoot { position });
        }
        Ok(())
    }

    /// Close the innermost frame. `expected` is the closing tag's name when
    /// the element had an explicit end tag.
    fn close(&mut self, expected: Option<String>, position: u64) -> Result<(), ChangesetParseError> {
        let frame = match (self.stack.pop(), expected) {
            (Some(frame), None) => frame,
            (Some(frame), Some(name)) if frame.name() == name => frame,
            (_, Some(name)) => return Err(ChangesetParseError::UnexpectedEnd { name, position }),
            (None, None) => {
                return Err(ChangesetParseError::UnexpectedEnd {
                    name: String::new(),
                    position,
                });
            }
        };
        match (self.stack.last_mut(), frame.close()) {
            (Some(parent), closed) => parent.adopt(closed),
            (None, Closed::Element(element)) => self.roots.push(element),
            (None, Closed::Entity(_) | Closed::Nothing) => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<ChangesetDocument, ChangesetParseError> {
        if let Some(open) = self.stack.pop() {
            return Err(ChangesetParseError::Unclosed {
                name: open.name().to_owned(),
            });
        }
        if self.roots.is_empty() {
            return Err(ChangesetParseError::EmptyDocument);
        }
        let document = ChangesetDocument::new(self.roots);
        debug!(
            "parsed changeset with {} operations",
            document.operations().count()
        );
        Ok(document)
    }
}

fn local_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
