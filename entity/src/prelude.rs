pub use super::application::Entity as Application;
pub use super::cad_call::Entity as CadCall;
pub use super::cad_unit::Entity as CadUnit;
pub use super::character::Entity as Character;
pub use super::complaint::Entity as Complaint;
pub use super::department::Entity as Department;
pub use super::exam::Entity as Exam;
pub use super::exam_result::Entity as ExamResult;
pub use super::exam_session::Entity as ExamSession;
pub use super::filled_report::Entity as FilledReport;
pub use super::forum_category::Entity as ForumCategory;
pub use super::forum_post::Entity as ForumPost;
pub use super::forum_topic::Entity as ForumTopic;
pub use super::notification::Entity as Notification;
pub use super::report::Entity as Report;
pub use super::report_template::Entity as ReportTemplate;
pub use super::roster_user::Entity as RosterUser;
pub use super::scheduler_run::Entity as SchedulerRun;
pub use super::support_ticket::Entity as SupportTicket;
