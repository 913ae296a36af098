use crate::slug::lookup_slug;

/// Internal field names, in output column order.
pub const FIELD_NAMES: [&str; 13] = [
    "tax_code",
    "name",
    "address_number",
    "street",
    "ward",
    "district",
    "province",
    "website",
    "facebook",
    "linkedin",
    "email",
    "phone_number",
    "other_contact_info",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Company {
    pub tax_code: String,
    pub name: String,
    pub address_number: String,
    pub street: String,
    pub ward: String,
    pub district: String,
    pub province: String,
    pub website: String,
    pub facebook: String,
    pub linkedin: String,
    pub email: String,
    pub phone_number: String,
    /// Filled from the lookup page's `itemprop="name"` cell, which in practice
    /// holds the listed representative rather than contact details.
    pub other_contact_info: String,
}

/// Field-level result of scraping one lookup page. `None` means the marker
/// was absent and the record keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub phone_number: Option<String>,
    pub other_contact_info: Option<String>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none() && self.other_contact_info.is_none()
    }
}

impl Company {
    pub fn new(tax_code: impl Into<String>, name: impl Into<String>) -> Self {
        Company {
            tax_code: tax_code.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// URL path segment derived from the company name
    pub fn lookup_slug(&self) -> String {
        lookup_slug(&self.name)
    }

    /// Returns a copy of this record with the patch applied.
    pub fn with_contact(&self, patch: &ContactPatch) -> Company {
        let mut updated = self.clone();
        if let Some(phone) = &patch.phone_number {
            updated.phone_number = phone.clone();
        }
        if let Some(other) = &patch.other_contact_info {
            updated.other_contact_info = other.clone();
        }
        updated
    }

    /// Cell values in `FIELD_NAMES` order
    pub fn fields(&self) -> [&str; 13] {
        [
            self.tax_code.as_str(),
            self.name.as_str(),
            self.address_number.as_str(),
            self.street.as_str(),
            self.ward.as_str(),
            self.district.as_str(),
            self.province.as_str(),
            self.website.as_str(),
            self.facebook.as_str(),
            self.linkedin.as_str(),
            self.email.as_str(),
            self.phone_number.as_str(),
            self.other_contact_info.as_str(),
        ]
    }
}
