use std::collections::HashSet;

use super::{Module, ModuleKey, Tier};
use crate::error::{ConfigError, PricingError};

/// Validated, immutable list of sellable modules.
///
/// Catalog order is the display order: quotes list modules in the order they
/// appear here, not the order they were selected in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate ids and negative prices.
    pub fn new(modules: Vec<Module>) -> Result<Self, ConfigError> {
        if modules.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for (position, module) in modules.iter().enumerate() {
            if module.id.trim().is_empty() {
                return Err(ConfigError::EmptyModuleId(position));
            }
            if !seen.insert(module.id.as_str()) {
                return Err(ConfigError::DuplicateModule(module.id.clone()));
            }
            for tier in Tier::ALL {
                let price = module.price(tier);
                if price.is_sign_negative() && !price.is_zero() {
                    return Err(ConfigError::NegativeTierPrice {
                        module: module.id.clone(),
                        tier: tier.as_str(),
                        price,
                    });
                }
            }
            if !module.prices.is_ascending() {
                tracing::warn!(
                    module = %module.id,
                    starter = %module.prices.starter,
                    professional = %module.prices.professional,
                    enterprise = %module.prices.enterprise,
                    "Tier prices are not ascending"
                );
            }
        }

        tracing::debug!(modules = modules.len(), "Catalog loaded");
        Ok(Self { modules })
    }

    /// Look up the key for a module id
    pub fn key(&self, id: &str) -> Option<ModuleKey> {
        self.modules
            .iter()
            .position(|m| m.id == id)
            .map(ModuleKey)
    }

    /// Like [`Catalog::key`], but for ids coming from user input
    pub fn resolve(&self, id: &str) -> Result<ModuleKey, PricingError> {
        self.key(id.trim())
            .ok_or_else(|| PricingError::UnknownModule(id.to_string()))
    }

    /// The module behind a key.
    ///
    /// Panics if the key came from a different, smaller catalog.
    pub fn module(&self, key: ModuleKey) -> &Module {
        &self.modules[key.0]
    }

    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleKey, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (ModuleKey(i), m))
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::TierPrices;
    use rust_decimal_macros::dec;

    fn module(id: &str, starter: i64, professional: i64, enterprise: i64) -> Module {
        Module {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: "Core".to_string(),
            prices: TierPrices {
                starter: starter.into(),
                professional: professional.into(),
                enterprise: enterprise.into(),
            },
            included_customers: None,
        }
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::new(vec![
            module("communication", 199, 499, 1499),
            module("sales", 299, 899, 2999),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let key = catalog.key("sales").unwrap();
        assert_eq!(key.index(), 1);
        assert_eq!(catalog.module(key).price(Tier::Enterprise), dec!(2999));
        assert!(catalog.key("crm").is_none());
        assert!(matches!(
            catalog.resolve("crm"),
            Err(PricingError::UnknownModule(id)) if id == "crm"
        ));
        assert_eq!(catalog.resolve(" sales ").unwrap(), key);
    }

    #[test]
    fn test_catalog_iter_keeps_order() {
        let catalog = Catalog::new(vec![
            module("b", 1, 2, 3),
            module("a", 1, 2, 3),
            module("c", 1, 2, 3),
        ])
        .unwrap();
        let ids: Vec<&str> = catalog.iter().map(|(_, m)| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_catalog_rejects_invalid_modules() {
        assert!(matches!(Catalog::new(vec![]), Err(ConfigError::EmptyCatalog)));

        let dup = Catalog::new(vec![module("crm", 1, 2, 3), module("crm", 1, 2, 3)]);
        assert!(matches!(dup, Err(ConfigError::DuplicateModule(id)) if id == "crm"));

        let empty = Catalog::new(vec![module("crm", 1, 2, 3), module("  ", 1, 2, 3)]);
        assert!(matches!(empty, Err(ConfigError::EmptyModuleId(1))));

        let negative = Catalog::new(vec![module("crm", 1, -2, 3)]);
        assert!(matches!(
            negative,
            Err(ConfigError::NegativeTierPrice { tier: "professional", .. })
        ));
    }

    #[test]
    fn test_catalog_accepts_inverted_tiers() {
        // Ascending tiers are a business convention only
        let catalog = Catalog::new(vec![module("odd", 900, 500, 100)]);
        assert!(catalog.is_ok());
    }
}
