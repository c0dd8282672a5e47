//! SeaORM entities for the Roster database schema.

pub mod prelude;

pub mod application;
pub mod cad_call;
pub mod cad_unit;
pub mod character;
pub mod complaint;
pub mod department;
pub mod exam;
pub mod exam_result;
pub mod exam_session;
pub mod filled_report;
pub mod forum_category;
pub mod forum_post;
pub mod forum_topic;
pub mod notification;
pub mod report;
pub mod report_template;
pub mod roster_user;
pub mod scheduler_run;
pub mod support_ticket;
