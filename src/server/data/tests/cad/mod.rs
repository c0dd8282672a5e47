use entity::cad_call::CallStatus;
use roster_test_utils::prelude::*;

use crate::{
    model::cad::{CreateCallDto, UpdateCallDto},
    server::data::cad::CadRepository,
};

mod search;
mod update_call;

fn call(title: &str, location: &str, priority: i32) -> CreateCallDto {
    CreateCallDto {
        title: title.to_string(),
        description: None,
        location: location.to_string(),
        priority,
    }
}
