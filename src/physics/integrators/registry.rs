//! Registry pattern for dynamic integrator management
//!
//! The registry serves as a discovery and factory mechanism for integrators.
//! Each integrator is self-describing, providing its own name, aliases, and
//! convergence order. Configuration files and the command line name an
//! integrator, and the registry resolves that name to a fresh instance.

use super::Integrator;
use std::collections::{HashMap, HashSet};

/// Registry for runtime integrator registration
///
/// Integrators are stateless, so handing out a clone of the stored instance
/// is all `create` needs to do.
pub struct IntegratorRegistry {
    /// Maps names (canonical and aliases) to integrator instances
    integrators: HashMap<String, Box<dyn Integrator>>,
}

impl IntegratorRegistry {
    /// Create an empty registry without any pre-registered integrators.
    pub fn new() -> Self {
        Self {
            integrators: HashMap::new(),
        }
    }

    /// Register all built-in integrators.
    ///
    /// Returns self for method chaining.
    pub fn with_standard_integrators(mut self) -> Self {
        use super::{ExplicitEuler, PredictorCorrector, SymplecticEuler};

        self.register_integrator(Box::new(PredictorCorrector));
        self.register_integrator(Box::new(SymplecticEuler));
        self.register_integrator(Box::new(ExplicitEuler));

        self
    }

    /// Register a single integrator.
    ///
    /// Returns self for method chaining.
    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.register_integrator(integrator);
        self
    }

    pub fn register_integrator(&mut self, integrator: Box<dyn Integrator>) {
        for alias in integrator.aliases() {
            self.integrators
                .insert(alias.to_string(), integrator.clone_box());
        }

        self.integrators
            .insert(integrator.name().to_string(), integrator);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Integrator>, String> {
        self.integrators
            .get(name)
            .map(|integrator| integrator.clone_box())
            .ok_or_else(|| {
                let alias_names: Vec<String> =
                    self.list_aliases().into_iter().map(|(alias, _)| alias).collect();
                format!(
                    "Unknown integrator: '{}'. Available integrators: {}. Aliases: {}",
                    name,
                    self.list_available().join(", "),
                    alias_names.join(", ")
                )
            })
    }

    pub fn list_available(&self) -> Vec<String> {
        let canonical_names: HashSet<&str> = self
            .integrators
            .values()
            .map(|integrator| integrator.name())
            .collect();

        let mut names: Vec<String> = canonical_names.into_iter().map(String::from).collect();
        names.sort();
        names
    }

    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .integrators
            .iter()
            .filter(|(key, integrator)| key.as_str() != integrator.name())
            .map(|(key, integrator)| (key.clone(), integrator.name().to_string()))
            .collect();

        aliases.sort_by(|a, b| a.0.cmp(&b.0));
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new().with_standard_integrators()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::components::Body;
    use crate::physics::gravity::AccelerationField;
    use crate::physics::math::Scalar;

    // Test-specific minimal integrator implementations
    #[derive(Debug, Clone)]
    struct TestIntegratorA;

    impl Integrator for TestIntegratorA {
        fn clone_box(&self) -> Box<dyn Integrator> {
            Box::new(self.clone())
        }

        fn step(&self, _: &mut [Body], _: &dyn AccelerationField, _: Scalar) {}

        fn convergence_order(&self) -> usize {
            2
        }

        fn force_evaluations(&self) -> usize {
            1
        }

        fn name(&self) -> &'static str {
            "test_a"
        }

        fn aliases(&self) -> Vec<&'static str> {
            vec!["ta", "test_alias_a"]
        }
    }

    #[derive(Debug, Clone)]
    struct TestIntegratorNoAlias;

    impl Integrator for TestIntegratorNoAlias {
        fn clone_box(&self) -> Box<dyn Integrator> {
            Box::new(self.clone())
        }

        fn step(&self, _: &mut [Body], _: &dyn AccelerationField, _: Scalar) {}

        fn convergence_order(&self) -> usize {
            1
        }

        fn force_evaluations(&self) -> usize {
            1
        }

        fn name(&self) -> &'static str {
            "no_alias"
        }
    }

    #[test]
    fn test_alias_resolution() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegratorA));

        let canonical = registry.create("test_a").unwrap();
        let via_alias = registry.create("ta").unwrap();
        assert_eq!(canonical.name(), via_alias.name());
        assert_eq!(registry.create("test_alias_a").unwrap().name(), "test_a");
    }

    #[test]
    fn test_list_aliases() {
        let registry = IntegratorRegistry::new()
            .with_integrator(Box::new(TestIntegratorA))
            .with_integrator(Box::new(TestIntegratorNoAlias));

        let alias_map: HashMap<_, _> = registry.list_aliases().into_iter().collect();
        assert_eq!(alias_map.get("ta"), Some(&"test_a".to_string()));
        assert_eq!(alias_map.get("test_alias_a"), Some(&"test_a".to_string()));
        assert_eq!(alias_map.len(), 2);
        assert_eq!(registry.list_available(), vec!["no_alias", "test_a"]);
    }

    #[test]
    fn test_unknown_integrator_error() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegratorA));

        let error = registry.create("nonexistent").err().unwrap();
        assert!(error.contains("Unknown integrator: 'nonexistent'"));
        assert!(error.contains("Available integrators: test_a"));
        assert!(error.contains("Aliases: ta, test_alias_a"));
    }

    #[test]
    fn test_case_sensitivity() {
        let registry = IntegratorRegistry::default();

        assert!(registry.create("Predictor_Corrector").is_err());
        assert!(registry.create("VERLET").is_err());
        assert!(registry.create("verlet").is_ok());
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = IntegratorRegistry::new()
            .with_integrator(Box::new(TestIntegratorA))
            .with_integrator(Box::new(TestIntegratorA));

        assert_eq!(registry.list_available().len(), 1);
        assert!(registry.create("ta").is_ok());
    }

    #[test]
    fn test_empty_registry() {
        let registry = IntegratorRegistry::new();

        assert!(registry.list_available().is_empty());
        assert!(registry.list_aliases().is_empty());
        assert!(registry.create("anything").is_err());
    }

    #[test]
    fn test_standard_registry() {
        let registry = IntegratorRegistry::default();

        assert_eq!(
            registry.list_available(),
            vec!["explicit_euler", "predictor_corrector", "symplectic_euler"]
        );
        assert_eq!(
            registry.create("velocity_verlet").unwrap().name(),
            "predictor_corrector"
        );

        for (alias, canonical) in registry.list_aliases() {
            assert_eq!(
                registry.create(&alias).unwrap().name(),
                canonical,
                "Alias '{alias}' resolved to the wrong integrator"
            );
        }
    }
}
