use entity::roster_user::Role;
use roster_test_utils::prelude::*;

use crate::server::data::user::UserRepository;

mod add_warning;
mod create;
mod reset_monthly_warnings;
