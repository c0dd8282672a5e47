//! Field definition and filled value checks for report templates.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::{
    model::template::{FieldType, TemplateField},
    server::error::Error,
};

/// Field names must be non-empty and unique; select fields need at least one option
pub fn validate_fields(fields: &[TemplateField]) -> Result<(), Error> {
    if fields.is_empty() {
        return Err(Error::validation("A template needs at least one field"));
    }

    let mut names = HashSet::new();
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(Error::validation("Field names must not be empty"));
        }
        if !names.insert(field.name.as_str()) {
            return Err(Error::validation(format!(
                "Duplicate field name {}",
                field.name
            )));
        }
        if field.field_type == FieldType::Select && field.options.is_empty() {
            return Err(Error::validation(format!(
                "Select field {} needs at least one option",
                field.name
            )));
        }
    }

    Ok(())
}

/// Checks submitted values against the template: required fields present, types match,
/// no keys outside the template.
pub fn validate_values(fields: &[TemplateField], values: &Map<String, Value>) -> Result<(), Error> {
    if let Some(unknown) = values
        .keys()
        .find(|key| !fields.iter().any(|field| &field.name == *key))
    {
        return Err(Error::validation(format!("Unknown field {}", unknown)));
    }

    for field in fields {
        match values.get(&field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(Error::validation(format!("{} is required", field.label)));
                }
            }
            Some(value) => check_value(field, value)?,
        }
    }

    Ok(())
}

fn check_value(field: &TemplateField, value: &Value) -> Result<(), Error> {
    let valid = match field.field_type {
        FieldType::Text | FieldType::Textarea => value
            .as_str()
            .is_some_and(|text| !field.required || !text.trim().is_empty()),
        FieldType::Number => value.is_number(),
        FieldType::Date => value
            .as_str()
            .is_some_and(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()),
        FieldType::Select => value
            .as_str()
            .is_some_and(|choice| field.options.iter().any(|option| option == choice)),
        FieldType::Checkbox => value.is_boolean(),
    };

    if valid {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "Invalid value for {}",
            field.label
        )))
    }
}
