//! Postal address owned by a customer.

use rolodex_core::{AddressId, CustomerId, Entity};

use crate::record::AddressRecord;

/// Postal address (street / city / state / zip).
///
/// An address is owned by exactly one [`Customer`](crate::Customer) and is
/// persisted only through it. `customer_id` is a storage back-reference, not
/// ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub(crate) id: AddressId,
    pub(crate) customer_id: CustomerId,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
}

impl Address {
    /// Blank, transient address.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_record(record: AddressRecord) -> Self {
        Self {
            id: record.id,
            customer_id: record.customer_id,
            street: record.street,
            city: record.city,
            state: record.state,
            zip: record.zip,
        }
    }

    pub(crate) fn to_record(&self) -> AddressRecord {
        AddressRecord {
            id: self.id,
            customer_id: self.customer_id,
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
        }
    }

    /// Copy the four postal fields of `other`, keeping this address's identity.
    pub(crate) fn copy_fields_from(&mut self, other: &Address) {
        self.street = other.street.clone();
        self.city = other.city.clone();
        self.state = other.state.clone();
        self.zip = other.zip.clone();
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    pub fn set_street(&mut self, street: impl Into<String>) {
        self.street = Some(street.into());
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = Some(city.into());
    }

    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = Some(state.into());
    }

    pub fn set_zip(&mut self, zip: impl Into<String>) {
        self.zip = Some(zip.into());
    }

    /// Builder-style variant of the setters, handy when composing an address
    /// to hand to [`Customer::set_address`](crate::Customer::set_address).
    pub fn with_fields(
        street: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        zip: Option<&str>,
    ) -> Self {
        Self {
            street: street.map(str::to_string),
            city: city.map(str::to_string),
            state: state.map(str::to_string),
            zip: zip.map(str::to_string),
            ..Self::default()
        }
    }

    /// `true` when every postal field is absent, empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        [&self.street, &self.city, &self.state, &self.zip]
            .into_iter()
            .all(|field| trimmed(field).is_none())
    }

    /// Two-line postal block:
    ///
    /// ```text
    /// Street
    /// City, State Zip
    /// ```
    ///
    /// Blank segments are skipped without leaving separators behind. An empty
    /// address yields `""`. The result never ends with a newline.
    pub fn address_block(&self) -> String {
        let street = trimmed(&self.street);

        let locality = match (trimmed(&self.city), trimmed(&self.state)) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        };

        let last_line = match (locality, trimmed(&self.zip)) {
            (Some(locality), Some(zip)) => Some(format!("{locality} {zip}")),
            (Some(locality), None) => Some(locality),
            (None, Some(zip)) => Some(zip.to_string()),
            (None, None) => None,
        };

        [street.map(str::to_string), last_line]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Entity for Address {
    type Id = AddressId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

fn trimmed(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn address(street: &str, city: &str, state: &str, zip: &str) -> Address {
        let mut a = Address::new();
        a.set_street(street);
        a.set_city(city);
        a.set_state(state);
        a.set_zip(zip);
        a
    }

    #[test]
    fn full_address_renders_two_lines() {
        let a = address("123 Main Street", "New York", "NY", "10001");
        assert_eq!(a.address_block(), "123 Main Street\nNew York, NY 10001");
    }

    #[test]
    fn city_and_zip_join_with_single_space() {
        let a = Address::with_fields(None, Some("New York"), None, Some("10001"));
        assert_eq!(a.address_block(), "New York 10001");
    }

    #[test]
    fn city_and_state_without_zip_has_no_trailing_space() {
        let a = Address::with_fields(None, Some("New York"), Some("NY"), None);
        assert_eq!(a.address_block(), "New York, NY");
    }

    #[test]
    fn street_only_renders_single_line() {
        let a = Address::with_fields(Some("  42 Elm Road "), None, None, None);
        assert_eq!(a.address_block(), "42 Elm Road");
    }

    #[test]
    fn state_and_zip_without_city() {
        let a = Address::with_fields(None, None, Some("CA"), Some("94105"));
        assert_eq!(a.address_block(), "CA 94105");
    }

    #[test]
    fn fields_are_trimmed_before_composition() {
        let a = address("  1 Infinite Loop  ", " Cupertino ", " CA ", " 95014 ");
        assert_eq!(a.address_block(), "1 Infinite Loop\nCupertino, CA 95014");
    }

    #[test]
    fn blank_and_whitespace_address_is_empty() {
        assert_eq!(Address::new().address_block(), "");
        let a = address("   ", "\t", "", " \n ");
        assert!(a.is_empty());
        assert_eq!(a.address_block(), "");
    }

    #[test]
    fn copy_fields_keeps_identity() {
        let mut owned = Address::new();
        owned.id = AddressId::new(9);
        owned.customer_id = CustomerId::new(4);

        let source = address("1 A St", "Town", "TX", "75001");
        owned.copy_fields_from(&source);

        assert_eq!(owned.id(), AddressId::new(9));
        assert_eq!(owned.customer_id(), CustomerId::new(4));
        assert_eq!(owned.street(), Some("1 A St"));
        assert_eq!(owned.zip(), Some("75001"));
    }

    fn field() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            "[ \t]{1,3}".prop_map(Some),
            "[ ]{0,2}[A-Za-z0-9]{1,8}[ ]{0,2}".prop_map(Some),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the block is empty iff all four fields are blank.
        #[test]
        fn block_is_empty_iff_all_fields_blank(
            street in field(),
            city in field(),
            state in field(),
            zip in field(),
        ) {
            let a = Address::from_record(AddressRecord {
                street: street.clone(),
                city: city.clone(),
                state: state.clone(),
                zip: zip.clone(),
                ..AddressRecord::default()
            });

            let all_blank = [&street, &city, &state, &zip]
                .into_iter()
                .all(|f| f.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true));

            prop_assert_eq!(a.address_block().is_empty(), all_blank);
            prop_assert_eq!(a.is_empty(), all_blank);
        }

        /// Property: no stray separators and no surrounding whitespace.
        #[test]
        fn block_has_no_stray_separators(
            street in field(),
            city in field(),
            state in field(),
            zip in field(),
        ) {
            let a = Address::from_record(AddressRecord {
                street,
                city,
                state,
                zip,
                ..AddressRecord::default()
            });
            let block = a.address_block();

            prop_assert!(!block.ends_with('\n'));
            prop_assert_eq!(block.trim(), block.as_str());
            prop_assert!(block.lines().count() <= 2);
            for line in block.lines() {
                prop_assert!(!line.starts_with(','));
                prop_assert!(!line.ends_with(','));
                prop_assert!(!line.contains("  "));
                prop_assert!(!line.is_empty());
            }
        }
    }
}
