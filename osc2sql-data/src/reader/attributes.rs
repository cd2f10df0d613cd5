use quick_xml::events::BytesStart;

use crate::ChangesetParseError;

use super::local_name;

/// Unescaped attribute values of one element, keyed by local name.
#[derive(Debug, Default)]
pub(super) struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub(super) fn read(start: &BytesStart<'_>, position: u64) -> Result<Self, ChangesetParseError> {
        let attribute_error = |source| ChangesetParseError::Attribute {
            element: local_name(start.local_name().as_ref()),
            position,
            source,
        };
        let mut pairs = Vec::new();
        for parsed in start.attributes() {
            let attribute =
                parsed.map_err(|err| attribute_error(quick_xml::Error::InvalidAttr(err)))?;
            let value = attribute.unescape_value().map_err(attribute_error)?;
            pairs.push((local_name(attribute.key.local_name().as_ref()), value.into_owned()));
        }
        Ok(Self(pairs))
    }

    /// Remove and return the first value named `name`.
    pub(super) fn take(&mut self, name: &str) -> Option<String> {
        let index = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.swap_remove(index).1)
    }
}
