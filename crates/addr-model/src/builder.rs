//! Fluent builder for programmatic address construction.

use crate::address::Address;
use crate::error::AddressError;

/// Field names accepted by [`AddressBuilder::field`].
const FIELD_NAMES: &[&str] = &[
    "number_prefix",
    "number",
    "number_suffix",
    "street_pre_modifier",
    "street_pre_directional",
    "street_pre_type",
    "street_name",
    "street_post_type",
    "street_post_directional",
    "subaddress_type",
    "subaddress_id",
    "building_name",
    "occupancy_type",
    "occupancy_id",
    "corner_of",
    "landmark",
    "place",
    "state",
    "zip",
    "zip5",
    "zip4",
    "box_type",
    "box_id",
    "box_group_type",
    "box_group_id",
    "intersection_separator",
    "recipient",
    "not_address",
    "raw_input",
    "country",
];

/// Builder for [`Address`] records with validation at build time.
///
/// ```
/// use addr_model::AddressBuilder;
///
/// let address = AddressBuilder::new()
///     .street_number("123")
///     .street_name("Main")
///     .street_type("St")
///     .city("Austin")
///     .state("TX")
///     .zip("78749")
///     .build()
///     .expect("valid address");
/// assert_eq!(address.full, "123 Main St, Austin, TX 78749");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AddressBuilder {
    address: Address,
}

impl AddressBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn number_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.address.number_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn street_number(mut self, number: impl Into<String>) -> Self {
        self.address.number = Some(number.into());
        self
    }

    #[must_use]
    pub fn number_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.address.number_suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn street_pre_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.address.street_pre_modifier = Some(modifier.into());
        self
    }

    #[must_use]
    pub fn street_pre_directional(mut self, directional: impl Into<String>) -> Self {
        self.address.street_pre_directional = Some(directional.into());
        self
    }

    #[must_use]
    pub fn street_pre_type(mut self, street_type: impl Into<String>) -> Self {
        self.address.street_pre_type = Some(street_type.into());
        self
    }

    #[must_use]
    pub fn street_name(mut self, name: impl Into<String>) -> Self {
        self.address.street_name = Some(name.into());
        self
    }

    /// Street type following the name ("St", "Ave", "Blvd").
    #[must_use]
    pub fn street_type(mut self, street_type: impl Into<String>) -> Self {
        self.address.street_post_type = Some(street_type.into());
        self
    }

    #[must_use]
    pub fn street_post_directional(mut self, directional: impl Into<String>) -> Self {
        self.address.street_post_directional = Some(directional.into());
        self
    }

    #[must_use]
    pub fn unit_type(mut self, unit_type: impl Into<String>) -> Self {
        self.address.subaddress_type = Some(unit_type.into());
        self
    }

    #[must_use]
    pub fn unit_number(mut self, unit_number: impl Into<String>) -> Self {
        self.address.subaddress_id = Some(unit_number.into());
        self
    }

    #[must_use]
    pub fn building_name(mut self, name: impl Into<String>) -> Self {
        self.address.building_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.address.place = Some(city.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.address.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn zip(mut self, zip_code: impl Into<String>) -> Self {
        self.address.zip = Some(zip_code.into());
        self
    }

    #[must_use]
    pub fn po_box_type(mut self, box_type: impl Into<String>) -> Self {
        self.address.box_type = Some(box_type.into());
        self
    }

    #[must_use]
    pub fn po_box_id(mut self, box_id: impl Into<String>) -> Self {
        self.address.box_id = Some(box_id.into());
        self
    }

    #[must_use]
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.address.recipient = Some(recipient.into());
        self
    }

    #[must_use]
    pub fn raw_input(mut self, raw: impl Into<String>) -> Self {
        self.address.raw_input = Some(raw.into());
        self
    }

    /// Set an arbitrary component by its field name; unknown names fail.
    pub fn field(
        mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Self, AddressError> {
        if !FIELD_NAMES.contains(&name) {
            return Err(AddressError::parse(
                name,
                format!("Unknown address field: {name}"),
            ));
        }
        let value = value.into();
        let slot = match name {
            "number_prefix" => &mut self.address.number_prefix,
            "number" => &mut self.address.number,
            "number_suffix" => &mut self.address.number_suffix,
            "street_pre_modifier" => &mut self.address.street_pre_modifier,
            "street_pre_directional" => &mut self.address.street_pre_directional,
            "street_pre_type" => &mut self.address.street_pre_type,
            "street_name" => &mut self.address.street_name,
            "street_post_type" => &mut self.address.street_post_type,
            "street_post_directional" => &mut self.address.street_post_directional,
            "subaddress_type" => &mut self.address.subaddress_type,
            "subaddress_id" => &mut self.address.subaddress_id,
            "building_name" => &mut self.address.building_name,
            "occupancy_type" => &mut self.address.occupancy_type,
            "occupancy_id" => &mut self.address.occupancy_id,
            "corner_of" => &mut self.address.corner_of,
            "landmark" => &mut self.address.landmark,
            "place" => &mut self.address.place,
            "state" => &mut self.address.state,
            "zip" => &mut self.address.zip,
            "zip5" => &mut self.address.zip5,
            "zip4" => &mut self.address.zip4,
            "box_type" => &mut self.address.box_type,
            "box_id" => &mut self.address.box_id,
            "box_group_type" => &mut self.address.box_group_type,
            "box_group_id" => &mut self.address.box_group_id,
            "intersection_separator" => &mut self.address.intersection_separator,
            "recipient" => &mut self.address.recipient,
            "not_address" => &mut self.address.not_address,
            "raw_input" => &mut self.address.raw_input,
            "country" => &mut self.address.country,
            _ => unreachable!("name checked against FIELD_NAMES"),
        };
        *slot = Some(value);
        Ok(self)
    }

    /// Build the record, computing derived fields and enforcing postal-code
    /// shape rules.
    pub fn build(self) -> Result<Address, AddressError> {
        let mut address = self.address;
        address.recompute()?;
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_is_rejected() {
        let error = AddressBuilder::new()
            .field("latitude", "30.2")
            .expect_err("unknown field");
        assert!(error.message.contains("Unknown address field"));
    }

    #[test]
    fn build_enforces_zip_shape() {
        let error = AddressBuilder::new()
            .zip("1234")
            .build()
            .expect_err("bad zip");
        assert_eq!(error.field(), Some("zip"));
    }
}
