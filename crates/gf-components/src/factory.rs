//! Named factories, grouped by family.

use gf_core::{GfError, GfResult};

use crate::component::Component;

/// Zero-argument constructor of one component variant.
pub type Factory = fn() -> GfResult<Box<dyn Component>>;

#[derive(Debug, Clone, Copy)]
pub struct FactoryEntry {
    pub family: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub factory: Factory,
}

/// Registry mapping `(family, name)` to a factory.
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    entries: Vec<FactoryEntry>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        family: &'static str,
        name: &'static str,
        description: &'static str,
        factory: Factory,
    ) -> GfResult<()> {
        if self.find(family, name).is_some() {
            return Err(GfError::DuplicateFactory {
                family: family.to_string(),
                factory: name.to_string(),
            });
        }
        self.entries.push(FactoryEntry {
            family,
            name,
            description,
            factory,
        });
        Ok(())
    }

    pub fn contains(&self, family: &str, name: &str) -> bool {
        self.find(family, name).is_some()
    }

    /// Build a fresh, unconfigured instance of `family`/`name`.
    pub fn create(&self, family: &str, name: &str) -> GfResult<Box<dyn Component>> {
        let entry = self
            .find(family, name)
            .ok_or_else(|| GfError::UnknownFactory {
                family: family.to_string(),
                factory: name.to_string(),
            })?;
        let component = (entry.factory)()?;
        if component.core().family() != family {
            return Err(GfError::Invariant {
                what: format!(
                    "factory '{}' registered in family '{}' built a '{}' component",
                    name,
                    family,
                    component.core().family()
                ),
            });
        }
        Ok(component)
    }

    /// Family names, sorted and deduplicated.
    pub fn families(&self) -> Vec<&'static str> {
        let mut families: Vec<&'static str> = self.entries.iter().map(|e| e.family).collect();
        families.sort_unstable();
        families.dedup();
        families
    }

    /// Entries of `family`, sorted by name.
    pub fn entries(&self, family: &str) -> Vec<&FactoryEntry> {
        let mut entries: Vec<&FactoryEntry> =
            self.entries.iter().filter(|e| e.family == family).collect();
        entries.sort_by_key(|e| e.name);
        entries
    }

    fn find(&self, family: &str, name: &str) -> Option<&FactoryEntry> {
        self.entries
            .iter()
            .find(|e| e.family == family && e.name == name)
    }
}
