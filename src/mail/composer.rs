use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use tera::Tera;

use crate::domain::{ContactEmail, ContactSubmission};

static TEMPLATES: Lazy<Tera> =
    Lazy::new(|| Tera::new("views/**/*").expect("Failed to initialize Tera templates"));

const DEFAULT_SUBJECT: &str = "New Contact Form Submission";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: ContactEmail,
    pub reply_to: Option<ContactEmail>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// The notification sent to the site owner. Reply-to points at the sender so
/// the owner can answer straight from their mail client.
pub fn owner_notification(
    submission: &ContactSubmission,
    owner: &ContactEmail,
    sent_at: DateTime<Utc>,
) -> OutgoingEmail {
    let header_subject = submission
        .subject
        .as_ref()
        .map_or(DEFAULT_SUBJECT, |s| s.as_ref());
    // The body shows a placeholder instead of the header's default subject.
    let body_subject = submission.subject.as_ref().map_or("—", |s| s.as_ref());
    let sent_at = sent_at.format("%Y-%m-%d %H:%M UTC").to_string();

    let html = prepare_html_template(
        &[
            ("name", submission.name.as_ref()),
            ("email", submission.email.as_ref()),
            ("subject", body_subject),
            ("message_html", &message_as_html(submission.message.as_ref())),
            ("sent_at", &sent_at),
        ],
        "owner_notification.html",
    );

    let text = format!(
        "New message via the DevTech Pro website\n\
        \n\
        Name:    {name}\n\
        Email:   {email}\n\
        Subject: {subject}\n\
        \n\
        {message}\n\
        \n\
        Sent {sent_at}\n",
        name = submission.name.as_ref(),
        email = submission.email.as_ref(),
        subject = body_subject,
        message = submission.message.as_ref(),
    );

    OutgoingEmail {
        to: owner.clone(),
        reply_to: Some(submission.email.clone()),
        subject: format!("[DevTech Pro] {header_subject}"),
        html,
        text,
    }
}

/// The acknowledgement sent back to the person who submitted the form.
pub fn sender_autoreply(submission: &ContactSubmission) -> OutgoingEmail {
    let html = prepare_html_template(
        &[
            ("name", submission.name.as_ref()),
            ("message_html", &message_as_html(submission.message.as_ref())),
        ],
        "sender_autoreply.html",
    );

    let text = format!(
        "Hi {name},\n\
        \n\
        Thank you for your message! I've received it and will get back to you \
        within 24 hours.\n\
        \n\
        Your message:\n\
        {message}\n\
        \n\
        Best regards,\n\
        DevTech Pro\n",
        name = submission.name.as_ref(),
        message = submission.message.as_ref(),
    );

    OutgoingEmail {
        to: submission.email.clone(),
        reply_to: None,
        subject: "Thanks for reaching out — DevTech Pro".into(),
        html,
        text,
    }
}

// Escaped up front so the template can mark it `safe` and keep the <br> tags.
fn message_as_html(message: &str) -> String {
    tera::escape_html(message).replace('\n', "<br>")
}

fn prepare_html_template(entries: &[(&str, &str)], template_name: &str) -> String {
    let mut ctx = tera::Context::new();
    for (key, value) in entries.iter().copied() {
        ctx.insert(key, value);
    }
    TEMPLATES
        .render(template_name, &ctx)
        .expect("Failed rendering email template")
}
