//! Textual rendering of entities.
//!
//! ```text
//! entity @B (i1$ %x, i1$ %z) (i1$ %y, i1$ %z0) {
//!     drv %y 0
//!     drv %z0 0
//! }
//! ```

use crate::entity::Entity;
use crate::ids::SignalId;
use std::fmt;
use vela_common::{Interner, LogicVec};

/// Renders `entity` using `interner` to resolve names.
///
/// Signal lists follow `inputs` and `outputs` order and drives follow `body`
/// order, so equal entities always print identically.
pub fn print_entity(entity: &Entity, interner: &Interner) -> String {
    entity.display(interner).to_string()
}

/// [`fmt::Display`] adapter returned by [`Entity::display`].
#[derive(Clone, Copy)]
pub struct EntityDisplay<'a> {
    entity: &'a Entity,
    interner: &'a Interner,
}

impl Entity {
    /// Pairs the entity with the interner that resolves its names.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> EntityDisplay<'a> {
        EntityDisplay {
            entity: self,
            interner,
        }
    }
}

impl fmt::Display for EntityDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity @{} (", self.interner.resolve(self.entity.name))?;
        self.signal_list(f, &self.entity.inputs)?;
        f.write_str(") (")?;
        self.signal_list(f, &self.entity.outputs)?;
        f.write_str(") {")?;
        for drive in &self.entity.body {
            f.write_str("\n    drv %")?;
            self.signal_name(f, drive.target)?;
            write!(f, " {}", format_value(&drive.value))?;
        }
        f.write_str("\n}")
    }
}

impl EntityDisplay<'_> {
    fn signal_list(&self, f: &mut fmt::Formatter<'_>, ids: &[SignalId]) -> fmt::Result {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.entity.signal(id) {
                Some(s) => write!(f, "{}$ %", s.ty)?,
                None => f.write_str("? %")?,
            }
            self.signal_name(f, id)?;
        }
        Ok(())
    }

    fn signal_name(&self, f: &mut fmt::Formatter<'_>, id: SignalId) -> fmt::Result {
        match self.entity.signal(id) {
            Some(s) => f.write_str(self.interner.resolve(s.name)),
            None => write!(f, "<{}>", id.as_raw()),
        }
    }
}

/// Unsigned decimal when every bit is known and it fits 64 bits,
/// otherwise `<width>'b<bits>`.
pub fn format_value(value: &LogicVec) -> String {
    match value.to_u64() {
        Some(v) => v.to_string(),
        None => format!("{}'b{value}", value.width()),
    }
}
