//! Contact details form state.

use serde::Serialize;

use crate::validate::{validate_contact, validate_email, validate_name};

pub const EMAIL_HELP: &str = "Please enter a valid email.";
pub const NAME_HELP: &str = "Please enter a valid name.";
pub const CONTACT_HELP: &str = "Please enter a valid 10-digit contact number.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    Name,
    Contact,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [ContactField::Email, ContactField::Name, ContactField::Contact];

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Email => "Email",
            ContactField::Name => "Name",
            ContactField::Contact => "Contact Number",
        }
    }

    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            ContactField::Email => validate_email(value),
            ContactField::Name => validate_name(value),
            ContactField::Contact => validate_contact(value),
        }
    }

    fn help(&self) -> &'static str {
        match self {
            ContactField::Email => EMAIL_HELP,
            ContactField::Name => NAME_HELP,
            ContactField::Contact => CONTACT_HELP,
        }
    }
}

/// A single input with its inline error state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub value: String,
    pub error: bool,
    /// Empty while the value is valid (or untouched).
    pub help: String,
}

/// Email, name and contact number as typed so far.
///
/// Every setter revalidates its own field on the spot; the other fields are
/// left alone so one bad input never blocks the rest of the form.
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    email: FieldState,
    name: FieldState,
    contact: FieldState,
}

impl ContactInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.set(ContactField::Email, value.into());
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.set(ContactField::Name, value.into());
    }

    pub fn set_contact(&mut self, value: impl Into<String>) {
        self.set(ContactField::Contact, value.into());
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let valid = field.is_valid(&value);
        let state = self.field_mut(field);
        state.value = value;
        state.error = !valid;
        state.help = if valid { String::new() } else { field.help().to_string() };
    }

    pub fn email(&self) -> &str {
        &self.email.value
    }

    pub fn name(&self) -> &str {
        &self.name.value
    }

    pub fn contact(&self) -> &str {
        &self.contact.value
    }

    pub fn field(&self, field: ContactField) -> &FieldState {
        match field {
            ContactField::Email => &self.email,
            ContactField::Name => &self.name,
            ContactField::Contact => &self.contact,
        }
    }

    fn field_mut(&mut self, field: ContactField) -> &mut FieldState {
        match field {
            ContactField::Email => &mut self.email,
            ContactField::Name => &mut self.name,
            ContactField::Contact => &mut self.contact,
        }
    }

    pub fn is_valid(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|f| f.is_valid(&self.field(*f).value))
    }

    /// Raise the error flag on every field whose current value fails, as the
    /// submit gate does. Help text is only ever written by the setters.
    pub fn flag_invalid(&mut self) -> Vec<ContactField> {
        let mut invalid = Vec::new();
        for field in ContactField::ALL {
            let valid = field.is_valid(&self.field(field).value);
            self.field_mut(field).error = !valid;
            if !valid {
                invalid.push(field);
            }
        }
        invalid
    }
}
