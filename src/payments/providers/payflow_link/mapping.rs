//! Static field mappings from semantic input names to Payflow Link field names

/// Semantic key to gateway field name
pub type FieldMapping = &'static [(&'static str, &'static str)];

pub const ACCOUNT: &str = "login";
pub const CREDENTIAL2: &str = "pwd";
pub const CREDENTIAL3: &str = "partner";
pub const ORDER: &str = "user1";
pub const AMOUNT: &str = "amt";

pub const BILLING_ADDRESS: FieldMapping = &[
    ("city", "city"),
    ("address", "address"),
    ("state", "state"),
    ("zip", "zip"),
    ("country", "country"),
    ("phone", "phone"),
    ("name", "name"),
];

pub const CUSTOMER: FieldMapping = &[("first_name", "first_name"), ("last_name", "last_name")];

pub fn lookup(table: FieldMapping, key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(semantic, _)| *semantic == key)
        .map(|(_, field)| *field)
}
