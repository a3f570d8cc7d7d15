//! The capability shared by every MJCF element kind.

use crate::attr::Attr;
use crate::writer;

/// An element that can describe itself to the XML writer.
///
/// Implementations expose their attribute slots in declaration order and
/// their children in insertion order; the generic writer does the rest.
/// An element only ever exists in a valid state (builders refuse to
/// produce anything else), so rendering never re-validates.
pub trait Element {
    /// The MJCF tag name.
    fn tag(&self) -> &'static str;

    /// Attribute slots in schema declaration order.
    fn attrs(&self) -> Vec<Attr>;

    /// Child elements in the order they were added.
    fn children(&self) -> Vec<&dyn Element> {
        Vec::new()
    }

    /// Render the XML fragment rooted at this element.
    ///
    /// With `exclude_defaults` enabled, only explicitly supplied
    /// attributes are emitted; otherwise every attribute with a declared
    /// default is emitted too.
    fn render(&self, exclude_defaults: bool) -> String
    where
        Self: Sized,
    {
        writer::to_xml(self, exclude_defaults)
    }
}
