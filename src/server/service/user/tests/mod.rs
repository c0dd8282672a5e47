
use chrono::{Duration, Utc};
use entity::roster_user::Role;
use roster_test_utils::prelude::*;
use sea_orm::EntityTrait;

use crate::server::{
    error::{auth::AuthError, Error},
    model::auth::Claims,
    service::user::UserService,
};

fn claims(sub: &str) -> Claims {
    Claims {
        sub: sub.to_string(),
        email: format!("{}@example.com", sub),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
        aud: None,
    }
}
