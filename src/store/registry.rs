use super::dataset::DatasetStore;
use super::types::{ControlId, DomainSource, Value};
use crate::analysis::ConfigurationError;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown control '{0}'")]
    UnknownControl(String),
    #[error("value '{value}' is not selectable for control '{control}'")]
    InvalidSelection { control: String, value: Value },
}

/// Named input nodes with fixed domains.
///
/// Columnar: index `i` of every vector describes `ControlId(i)`. The current
/// value is stored as a position into the control's domain, so it can never
/// hold a value outside the domain.
#[derive(Debug, Clone, Default)]
pub struct ControlRegistry {
    pub names: Vec<String>,
    pub labels: Vec<String>,
    pub domains: Vec<Vec<Value>>,
    pub selected: Vec<usize>,

    by_name: HashMap<String, ControlId>,
}

impl ControlRegistry {
    pub fn new() -> Self { Self::default() }
    pub fn count(&self) -> usize { self.names.len() }

    /// Declares a control. The domain is resolved once against the store and never changes.
    pub fn register(
        &mut self,
        name: &str,
        label: &str,
        source: &DomainSource,
        default: Value,
        store: &DatasetStore,
    ) -> Result<ControlId, ConfigurationError> {
        if self.by_name.contains_key(name) {
            return Err(ConfigurationError::DuplicateControl { control: name.to_string() });
        }

        let domain = match source {
            DomainSource::Field(field) => store.distinct_values(*field),
            DomainSource::Fixed(values) => values.clone(),
        };
        if domain.is_empty() {
            return Err(ConfigurationError::EmptyDomain { control: name.to_string() });
        }
        let Some(position) = domain.iter().position(|v| *v == default) else {
            return Err(ConfigurationError::DefaultOutsideDomain { control: name.to_string(), value: default });
        };

        let id = ControlId::new(self.names.len());
        self.names.push(name.to_string());
        self.labels.push(label.to_string());
        self.domains.push(domain);
        self.selected.push(position);
        self.by_name.insert(name.to_string(), id);

        tracing::debug!(control = name, options = self.domains[id.index()].len(), default = %self.value(id), "Registered control");
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<ControlId> {
        self.by_name.get(name).copied()
    }

    #[inline(always)]
    pub fn value(&self, id: ControlId) -> &Value {
        &self.domains[id.index()][self.selected[id.index()]]
    }

    pub fn domain(&self, id: ControlId) -> &[Value] { &self.domains[id.index()] }
    pub fn name(&self, id: ControlId) -> &str { &self.names[id.index()] }
    pub fn label(&self, id: ControlId) -> &str { &self.labels[id.index()] }

    /// Resolves `value` to a domain position without changing anything.
    pub fn check(&self, name: &str, value: &Value) -> Result<(ControlId, usize), SelectionError> {
        let id = self.lookup(name).ok_or_else(|| SelectionError::UnknownControl(name.to_string()))?;
        let position = self.domains[id.index()]
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| SelectionError::InvalidSelection { control: name.to_string(), value: value.clone() })?;
        Ok((id, position))
    }

    /// Updates the current value. Returns whether the value actually changed.
    /// On error the current value is left untouched.
    pub fn set_value(&mut self, name: &str, value: &Value) -> Result<(ControlId, bool), SelectionError> {
        let (id, position) = self.check(name, value)?;
        let changed = self.selected[id.index()] != position;
        self.selected[id.index()] = position;
        Ok((id, changed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::dataset::fixtures::small_store;
    use crate::store::{Field, Metric};

    fn registry_with_year() -> (ControlRegistry, ControlId) {
        let store = small_store();
        let mut reg = ControlRegistry::new();
        let id = reg
            .register("year_pop", "Year", &DomainSource::Field(Field::Year), Value::Year(1952), &store)
            .unwrap();
        (reg, id)
    }

    #[test]
    fn test_register_resolves_domain_from_store() {
        let (reg, id) = registry_with_year();
        assert_eq!(reg.domain(id), &[Value::Year(1952), Value::Year(1957)]);
        assert_eq!(reg.value(id), &Value::Year(1952));
        assert_eq!(reg.lookup("year_pop"), Some(id));
    }

    #[test]
    fn test_register_rejects_default_outside_domain() {
        let store = small_store();
        let mut reg = ControlRegistry::new();
        let err = reg
            .register("cont", "Continent", &DomainSource::Field(Field::Continent), Value::text("Oceania"), &store)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DefaultOutsideDomain { control: "cont".into(), value: Value::text("Oceania") }
        );
        assert_eq!(reg.count(), 0);
    }

    #[test]
    fn test_register_rejects_duplicates_and_empty_domains() {
        let store = small_store();
        let (mut reg, _) = registry_with_year();
        let dup = reg.register("year_pop", "Year", &DomainSource::Field(Field::Year), Value::Year(1952), &store);
        assert!(matches!(dup, Err(ConfigurationError::DuplicateControl { .. })));

        let empty = reg.register("none", "None", &DomainSource::Fixed(vec![]), Value::Year(1952), &store);
        assert!(matches!(empty, Err(ConfigurationError::EmptyDomain { .. })));
    }

    #[test]
    fn test_set_value_outside_domain_keeps_current_value() {
        let (mut reg, id) = registry_with_year();
        let err = reg.set_value("year_pop", &Value::Year(2007)).unwrap_err();
        assert_eq!(err, SelectionError::InvalidSelection { control: "year_pop".into(), value: Value::Year(2007) });
        assert_eq!(reg.value(id), &Value::Year(1952));

        // Right shape, wrong type.
        assert!(reg.set_value("year_pop", &Value::Metric(Metric::Population)).is_err());
        assert_eq!(reg.value(id), &Value::Year(1952));
    }

    #[test]
    fn test_set_value_reports_change() {
        let (mut reg, id) = registry_with_year();
        assert_eq!(reg.set_value("year_pop", &Value::Year(1957)).unwrap(), (id, true));
        assert_eq!(reg.set_value("year_pop", &Value::Year(1957)).unwrap(), (id, false));
        assert_eq!(reg.value(id), &Value::Year(1957));
        assert!(matches!(reg.set_value("nope", &Value::Year(1957)), Err(SelectionError::UnknownControl(_))));
    }
}
