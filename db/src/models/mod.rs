pub mod attendance;
pub mod category;
pub mod certificate_record;
pub mod certificate_template;
pub mod email_change_request;
pub mod email_verification_token;
pub mod evaluation;
pub mod password_reset_token;
pub mod planned_seminar;
pub mod seminar;
pub mod seminar_qr_code;
pub mod user;

pub use attendance::Entity as Attendance;
pub use category::Entity as Category;
pub use certificate_record::Entity as CertificateRecord;
pub use certificate_template::Entity as CertificateTemplate;
pub use email_change_request::Entity as EmailChangeRequest;
pub use email_verification_token::Entity as EmailVerificationToken;
pub use evaluation::Entity as Evaluation;
pub use password_reset_token::Entity as PasswordResetToken;
pub use planned_seminar::Entity as PlannedSeminar;
pub use seminar::Entity as Seminar;
pub use seminar_qr_code::Entity as SeminarQrCode;
pub use user::Entity as User;
