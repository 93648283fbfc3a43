//! The international backend interface.

use std::collections::BTreeMap;

use addr_model::{Address, AddressError, InternationalAddress};

/// External component that parses and optionally expands addresses in
/// arbitrary locales. Injected as an `Option` at service construction;
/// absence is checked at call sites.
pub trait InternationalBackend: Send + Sync {
    /// Name of this backend implementation.
    fn name(&self) -> &'static str;

    /// Parse a raw address into (value, label) pairs. Labels may repeat.
    fn parse(&self, raw_input: &str) -> Result<Vec<(String, String)>, AddressError>;

    /// Normalized expansion variants of the raw input, when supported.
    fn expand(&self, _raw_input: &str) -> Option<Vec<String>> {
        None
    }
}

/// Collect backend (value, label) pairs into the label multimap, keeping
/// duplicate labels in order.
pub fn components_multimap(pairs: &[(String, String)]) -> BTreeMap<String, Vec<String>> {
    let mut components: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (value, label) in pairs {
        components.entry(label.clone()).or_default().push(value.clone());
    }
    components
}

/// Derive a domestic-shaped record from an international parse, for
/// callers that expect the [`Address`] schema.
pub fn domestic_shape(international: &InternationalAddress) -> Result<Address, AddressError> {
    let mut address = Address {
        number: international.house_number.clone(),
        street_name: international.road.clone(),
        place: international.city.clone(),
        state: international.state.clone(),
        country: international.country.clone(),
        raw_input: Some(international.raw_input.clone()),
        is_international: Some(true),
        ..Address::default()
    };
    address.recompute()?;
    Ok(address)
}
