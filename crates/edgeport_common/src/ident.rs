//! Interned block and port names.

use lasso::Rodeo;

/// An interned block or port name.
///
/// `Copy`, so cloning a block on every tree expansion never touches string
/// storage.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw index without interning anything.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

// SAFETY: `into_usize` and `try_from_usize` round-trip every `u32`, and
// `try_from_usize` rejects anything wider.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Name table of one design.
pub struct Interner {
    rodeo: Rodeo<Ident>,
}

impl Interner {
    /// Creates an empty name table.
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::new(),
        }
    }

    /// Interns `name`, returning the existing [`Ident`] if it was seen before.
    pub fn get_or_intern(&mut self, name: &str) -> Ident {
        self.rodeo.get_or_intern(name)
    }

    /// Looks up `name` without interning it.
    pub fn get(&self, name: &str) -> Option<Ident> {
        self.rodeo.get(name)
    }

    /// The name behind `ident`.
    ///
    /// # Panics
    ///
    /// Panics if `ident` came from another interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_and_port_names_resolve() {
        let mut names = Interner::new();
        let cpu = names.get_or_intern("cpu");
        let irq = names.get_or_intern("irq");
        assert_ne!(cpu, irq);
        assert_eq!(names.resolve(cpu), "cpu");
        assert_eq!(names.get_or_intern("irq"), irq);
    }

    #[test]
    fn lookup_does_not_intern() {
        let mut names = Interner::new();
        assert!(names.get("dma").is_none());
        let dma = names.get_or_intern("dma");
        assert_eq!(names.get("dma"), Some(dma));
    }
}
