pub mod m202601050001_create_users;
pub mod m202601050002_create_auth_tokens;
pub mod m202601050003_create_categories;
pub mod m202601050004_create_seminars;
pub mod m202601050005_create_planned_seminars;
pub mod m202601050006_create_attendance;
pub mod m202601050007_create_evaluations;
pub mod m202601050008_create_certificates;
