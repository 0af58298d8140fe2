//! Name-keyed strategy registry

use std::sync::Arc;

use crate::error::ConfigError;
use crate::strategy::{
    AllCooperate, AllDefect, Gradual, GrimTrigger, Pavlov, Strategy, SuspiciousTitForTat,
    TitForTat, TitForTwoTats,
};

/// The set of strategies a simulation may reference by name.
///
/// Entries keep registration order so listings are stable.
#[derive(Clone, Debug, Default)]
pub struct StrategyRegistry {
    entries: Vec<Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in strategy
    pub fn with_builtins() -> Self {
        // Built-in names are distinct (covered by strategy tests)
        let builtins: [Arc<dyn Strategy>; 8] = [
            Arc::new(AllCooperate),
            Arc::new(AllDefect),
            Arc::new(TitForTat),
            Arc::new(TitForTwoTats),
            Arc::new(Pavlov),
            Arc::new(GrimTrigger),
            Arc::new(SuspiciousTitForTat),
            Arc::new(Gradual),
        ];
        Self {
            entries: builtins.into(),
        }
    }

    /// Add a strategy. Fails if its name is already taken.
    pub fn register<S: Strategy + 'static>(&mut self, strategy: S) -> Result<(), ConfigError> {
        self.register_shared(Arc::new(strategy))
    }

    pub fn register_shared(&mut self, strategy: Arc<dyn Strategy>) -> Result<(), ConfigError> {
        if self.contains(strategy.name()) {
            return Err(ConfigError::DuplicateRegistration(strategy.name().to_string()));
        }
        self.entries.push(strategy);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|s| s.name() == name)
    }

    /// Look up the shared instance for `name`
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Strategy>, ConfigError> {
        self.entries
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownStrategy(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Strategy>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Move, Round};

    #[derive(Debug)]
    struct Alternator;

    impl Strategy for Alternator {
        fn name(&self) -> &str {
            "Alternator"
        }

        fn description(&self) -> &str {
            "Cooperates on even rounds, defects on odd ones."
        }

        fn decide(&self, history: &[Round]) -> Move {
            if history.len() % 2 == 0 {
                Move::Cooperate
            } else {
                Move::Defect
            }
        }
    }

    #[test]
    fn test_builtins_registered_in_order() {
        let registry = StrategyRegistry::with_builtins();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            [
                "AllCooperate",
                "AllDefect",
                "TitForTat",
                "TitForTwoTats",
                "Pavlov",
                "GrimTrigger",
                "SuspiciousTitForTat",
                "Gradual",
            ]
        );
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let registry = StrategyRegistry::with_builtins();
        let tft = registry.resolve("TitForTat").unwrap();
        assert_eq!(tft.name(), "TitForTat");

        let err = registry.resolve("Nope").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStrategy(name) if name == "Nope"));
    }

    #[test]
    fn test_register_custom_strategy() {
        let mut registry = StrategyRegistry::with_builtins();
        registry.register(Alternator).unwrap();

        let alt = registry.resolve("Alternator").unwrap();
        assert_eq!(alt.decide(&[]), Move::Cooperate);
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = StrategyRegistry::new();
        registry.register(TitForTat).unwrap();

        let err = registry.register(TitForTat).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRegistration(name) if name == "TitForTat"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builtins_reject_reregistration() {
        let mut registry = StrategyRegistry::with_builtins();
        let err = registry.register(Pavlov).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRegistration(name) if name == "Pavlov"));
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_empty_registry() {
        let registry = StrategyRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve("AllDefect").is_err());
    }
}
