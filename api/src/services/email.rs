//! Email service module for handling email-related functionality.
//!
//! Sends transactional email over SMTP using the `lettre` crate: account
//! verification, password reset, email-change codes, new-seminar
//! announcements and certificate delivery. Messages carry both plain text
//! and HTML bodies.
//!
//! # Environment Variables Required
//! - `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`: relay configuration
//! - `FRONTEND_URL`: base URL of the frontend application
//! - `EMAIL_FROM_NAME`: display name for the sender

use lettre::{
    AsyncTransport, Tokio1Executor,
    message::{Attachment, Message, MultiPart, SinglePart, header},
    transport::smtp::{AsyncSmtpTransport, authentication::Credentials},
};
use once_cell::sync::Lazy;

use common::config;
use db::models::seminar::Model as SeminarModel;

type EmailError = Box<dyn std::error::Error + Send + Sync>;

/// Global SMTP client instance.
///
/// Initialized lazily when first used, from the application configuration.
/// The client requires TLS and authentication.
static SMTP_CLIENT: Lazy<AsyncSmtpTransport<Tokio1Executor>> = Lazy::new(|| {
    let host = config::smtp_host();
    let username = config::smtp_username();
    let password = config::smtp_password();

    AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
        .expect("Failed to create SMTP transport")
        .port(587)
        .credentials(Credentials::new(username, password))
        .build()
});

fn sender_mailbox() -> Result<lettre::message::Mailbox, EmailError> {
    let from = format!("{} <{}>", config::email_from_name(), config::smtp_username());
    Ok(from.parse()?)
}

/// Service for handling email-related operations.
pub struct EmailService;

impl EmailService {
    async fn send_alternative(
        to_email: &str,
        subject: &str,
        text: String,
        html: String,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(sender_mailbox()?)
            .to(to_email.parse()?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        SMTP_CLIENT.send(email).await?;
        Ok(())
    }

    /// Sends the account verification link after registration (and on
    /// resend). The link expires with the underlying token.
    pub async fn send_verification_email(to_email: &str, token: &str) -> Result<(), EmailError> {
        let link = format!("{}/verify-email?token={}", config::frontend_url(), token);
        let from_name = config::email_from_name();

        let text = format!(
            "Hello,\n\n\
            Welcome to {from_name}! Please confirm your email address by opening the link below:\n\n\
            {link}\n\n\
            If you did not create this account, you can ignore this email.\n\n\
            Best regards,\n\
            {from_name}"
        );
        let html = format!(
            r#"<p>Hello,</p>
            <p>Welcome to {from_name}! Please confirm your email address:</p>
            <p><a href="{link}">Verify my email</a></p>
            <p>If you did not create this account, you can ignore this email.</p>
            <p>Best regards,<br>{from_name}</p>"#
        );

        Self::send_alternative(to_email, "Verify Your Email", text, html).await
    }

    /// Sends a password reset email with the reset link.
    pub async fn send_password_reset_email(
        to_email: &str,
        reset_token: &str,
    ) -> Result<(), EmailError> {
        let link = format!(
            "{}/reset-password?token={}",
            config::frontend_url(),
            reset_token
        );
        let from_name = config::email_from_name();
        let expiry = config::reset_token_expiry_minutes();

        let text = format!(
            "Hello,\n\n\
            You have requested to reset your password. Click the link below to proceed:\n\n\
            {link}\n\n\
            This link will expire in {expiry} minutes.\n\n\
            If you did not request this password reset, please ignore this email.\n\n\
            Best regards,\n\
            {from_name}"
        );
        let html = format!(
            r#"<p>Hello,</p>
            <p>You have requested to reset your password. Click the link below to proceed:</p>
            <p><a href="{link}">Reset my password</a></p>
            <p>This link will expire in {expiry} minutes.</p>
            <p>If you did not request this password reset, please ignore this email.</p>
            <p>Best regards,<br>{from_name}</p>"#
        );

        Self::send_alternative(to_email, "Reset Your Password", text, html).await
    }

    /// Sends the six-digit email-change code to the *new* address.
    pub async fn send_email_change_code(to_email: &str, code: &str) -> Result<(), EmailError> {
        let from_name = config::email_from_name();
        let expiry = config::email_change_code_expiry_minutes();

        let text = format!(
            "Hello,\n\n\
            Your email change verification code is: {code}\n\n\
            The code expires in {expiry} minutes. If you did not request an email change, ignore this message.\n\n\
            Best regards,\n\
            {from_name}"
        );
        let html = format!(
            r#"<p>Hello,</p>
            <p>Your email change verification code is:</p>
            <p style="font-size: 24px; font-weight: bold; letter-spacing: 4px;">{code}</p>
            <p>The code expires in {expiry} minutes. If you did not request an email change, ignore this message.</p>
            <p>Best regards,<br>{from_name}</p>"#
        );

        Self::send_alternative(to_email, "Confirm Your New Email", text, html).await
    }

    /// Announces a newly created seminar to one opted-in recipient.
    pub async fn send_new_seminar_notification(
        to_email: &str,
        recipient_name: &str,
        seminar: &SeminarModel,
    ) -> Result<(), EmailError> {
        let from_name = config::email_from_name();
        let subject = format!("New Seminar: {}", seminar.title);
        let when = seminar.date_start.format("%Y-%m-%d %H:%M UTC");

        let text = format!(
            "Hello {recipient_name},\n\n\
            A new seminar has been scheduled on {from_name}:\n\n\
            {title}\n\
            Speaker: {speaker}\n\
            Venue: {venue}\n\
            Starts: {when}\n\n\
            Log in to plan your attendance.\n\n\
            Best regards,\n\
            {from_name}",
            title = seminar.title,
            speaker = seminar.speaker,
            venue = seminar.venue,
        );
        let html = format!(
            r#"<p>Hello {recipient_name},</p>
            <p>A new seminar has been scheduled on {from_name}:</p>
            <h3>{title}</h3>
            <ul>
                <li>Speaker: {speaker}</li>
                <li>Venue: {venue}</li>
                <li>Starts: {when}</li>
            </ul>
            <p>Log in to plan your attendance.</p>
            <p>Best regards,<br>{from_name}</p>"#,
            title = seminar.title,
            speaker = seminar.speaker,
            venue = seminar.venue,
        );

        Self::send_alternative(to_email, &subject, text, html).await
    }

    /// Emails a generated certificate as a PNG attachment.
    pub async fn send_certificate_email(
        to_email: &str,
        recipient_name: &str,
        seminar_title: &str,
        png_bytes: Vec<u8>,
    ) -> Result<(), EmailError> {
        let from_name = config::email_from_name();
        let subject = format!("Your Certificate for {seminar_title}");
        let filename = format!("{}_Certificate.png", seminar_title.replace(' ', "_"));

        let html = format!(
            r#"<p>Good day {recipient_name},</p>
            <p>Congratulations! Here is your certificate for attending '{seminar_title}'.</p>
            <p>Best regards,<br>{from_name}</p>"#
        );

        let attachment = Attachment::new(filename).body(
            lettre::message::Body::new(png_bytes),
            header::ContentType::parse("image/png")?,
        );

        let email = Message::builder()
            .from(sender_mailbox()?)
            .to(to_email.parse()?)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html),
                    )
                    .singlepart(attachment),
            )?;

        SMTP_CLIENT.send(email).await?;
        Ok(())
    }
}
