use roster_test_utils::prelude::*;

use crate::server::data::notification::NotificationRepository;

mod mark_read;
