//! Form payloads and their validation.

use crate::model::OrderFields;
use chrono::NaiveDate;
use serde::Deserialize;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_ADDRESS_LEN: usize = 200;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a submission was refused. The display text is the notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormRejection {
    #[error("All fields are required!")]
    MissingFields,
    #[error("Items must be a whole number!")]
    InvalidItems,
    #[error("Delivery date must be in YYYY-MM-DD format!")]
    InvalidDate,
    #[error("{field} must be at most {max} characters!")]
    TooLong { field: &'static str, max: usize },
}

/// The add and edit order forms. Every field is optional at this stage so that a missing
/// field is a validation notice rather than a 422.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderForm {
    pub items: Option<String>,
    pub delivery_date: Option<String>,
    pub sender_name: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_address: Option<String>,
    pub performer_name: Option<String>,
    /// Checkbox; present means checked.
    pub mark_completed: Option<String>,
}

/// The per-row action forms (delete, mark completed): only who is acting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerformerForm {
    pub performer_name: Option<String>,
}

fn required(value: &Option<String>) -> Result<&str, FormRejection> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(FormRejection::MissingFields)
}

fn bounded(value: &str, field: &'static str, max: usize) -> Result<String, FormRejection> {
    if value.chars().count() > max {
        return Err(FormRejection::TooLong { field, max });
    }
    Ok(value.to_string())
}

impl OrderForm {
    /// Checks the five content fields and returns them trimmed and typed.
    ///
    /// Presence is checked for all fields before any of them is parsed, so a form with
    /// a blank field always gets the "required" notice.
    pub fn validate(&self) -> Result<OrderFields, FormRejection> {
        // Values are stored trimmed; a whitespace-only field counts as missing.
        let items = required(&self.items)?;
        let delivery_date = required(&self.delivery_date)?;
        let sender_name = required(&self.sender_name)?;
        let recipient_name = required(&self.recipient_name)?;
        let recipient_address = required(&self.recipient_address)?;

        Ok(OrderFields {
            items: items.parse().map_err(|_| FormRejection::InvalidItems)?,
            delivery_date: NaiveDate::parse_from_str(delivery_date, DATE_FORMAT)
                .map_err(|_| FormRejection::InvalidDate)?,
            sender_name: bounded(sender_name, "Sender name", MAX_NAME_LEN)?,
            recipient_name: bounded(recipient_name, "Recipient name", MAX_NAME_LEN)?,
            recipient_address: bounded(recipient_address, "Recipient address", MAX_ADDRESS_LEN)?,
        })
    }

    pub fn performer(&self) -> Option<&str> {
        self.performer_name.as_deref()
    }

    pub fn mark_completed(&self) -> bool {
        self.mark_completed.is_some()
    }
}

impl PerformerForm {
    pub fn performer(&self) -> Option<&str> {
        self.performer_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> OrderForm {
        OrderForm {
            items: Some("3".into()),
            delivery_date: Some("2024-05-01".into()),
            sender_name: Some("Alice".into()),
            recipient_name: Some("Bob".into()),
            recipient_address: Some("1 Main St".into()),
            ..Default::default()
        }
    }

    #[test]
    fn complete_form_validates() {
        let fields = complete().validate().unwrap();
        assert_eq!(fields.items, 3);
        assert_eq!(fields.delivery_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(fields.sender_name, "Alice");
        assert_eq!(fields.recipient_address, "1 Main St");
    }

    #[test]
    fn values_are_trimmed() {
        let form = OrderForm {
            items: Some(" 7 ".into()),
            sender_name: Some("  Alice ".into()),
            ..complete()
        };
        let fields = form.validate().unwrap();
        assert_eq!(fields.items, 7);
        assert_eq!(fields.sender_name, "Alice");
    }

    #[test]
    fn blank_or_missing_fields_are_required() {
        let missing = OrderForm {
            recipient_name: None,
            ..complete()
        };
        assert_eq!(missing.validate(), Err(FormRejection::MissingFields));

        let blank = OrderForm {
            sender_name: Some("   ".into()),
            ..complete()
        };
        assert_eq!(blank.validate(), Err(FormRejection::MissingFields));

        // A blank field wins over a malformed one.
        let both = OrderForm {
            items: Some("three".into()),
            recipient_address: Some(String::new()),
            ..complete()
        };
        assert_eq!(both.validate(), Err(FormRejection::MissingFields));
    }

    #[test]
    fn every_content_field_is_required() {
        let clear: [fn(&mut OrderForm) -> &mut Option<String>; 5] = [
            |f| &mut f.items,
            |f| &mut f.delivery_date,
            |f| &mut f.sender_name,
            |f| &mut f.recipient_name,
            |f| &mut f.recipient_address,
        ];
        for (index, field) in clear.iter().enumerate() {
            for value in [None, Some(String::new()), Some(" \t".to_string())] {
                let mut form = complete();
                *field(&mut form) = value.clone();
                assert_eq!(
                    form.validate(),
                    Err(FormRejection::MissingFields),
                    "field #{index} set to {value:?}"
                );
            }
        }
    }

    #[test]
    fn malformed_values_are_rejected() {
        let items = OrderForm {
            items: Some("three".into()),
            ..complete()
        };
        assert_eq!(items.validate(), Err(FormRejection::InvalidItems));

        let date = OrderForm {
            delivery_date: Some("01/05/2024".into()),
            ..complete()
        };
        assert_eq!(date.validate(), Err(FormRejection::InvalidDate));
    }

    #[test]
    fn negative_items_are_accepted() {
        let form = OrderForm {
            items: Some("-2".into()),
            ..complete()
        };
        assert_eq!(form.validate().unwrap().items, -2);
    }

    #[test]
    fn length_limits_apply() {
        let long_name = OrderForm {
            sender_name: Some("a".repeat(MAX_NAME_LEN + 1)),
            ..complete()
        };
        assert_eq!(
            long_name.validate(),
            Err(FormRejection::TooLong {
                field: "Sender name",
                max: 100
            })
        );

        let long_address = OrderForm {
            recipient_address: Some("x".repeat(MAX_ADDRESS_LEN + 1)),
            ..complete()
        };
        assert!(matches!(
            long_address.validate(),
            Err(FormRejection::TooLong { max: 200, .. })
        ));

        let at_limit = OrderForm {
            recipient_address: Some("x".repeat(MAX_ADDRESS_LEN)),
            ..complete()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn checkbox_presence_means_checked() {
        assert!(!complete().mark_completed());
        let checked = OrderForm {
            mark_completed: Some("on".into()),
            ..complete()
        };
        assert!(checked.mark_completed());
    }
}
