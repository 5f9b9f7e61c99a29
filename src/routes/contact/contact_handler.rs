use actix_web::{HttpResponse, web};
use anyhow::Context;
use chrono::Utc;

use crate::configuration::Environment;
use crate::domain::{ContactEmail, ContactSubmission};
use crate::mail::{MailRelay, composer};
use crate::routes::helpers::ApiEnvelope;
use crate::startup::OwnerAddress;

use super::errors::ContactError;
use super::types::SubmissionPayload;

pub const CONFIRMATION_MESSAGE: &str =
    "Your message has been sent successfully! I will respond within 24 hours.";

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip_all,
    fields(
        contact_name = tracing::field::Empty,
        contact_email = tracing::field::Empty
    )
)]
pub async fn submit_contact<M: MailRelay>(
    payload: web::Json<SubmissionPayload>,
    relay: web::Data<M>,
    owner: web::Data<OwnerAddress>,
    environment: web::Data<Environment>,
) -> Result<HttpResponse, ContactError> {
    let submission: ContactSubmission = payload
        .into_inner()
        .try_into()
        .map_err(ContactError::ValidationError)?;

    tracing::Span::current().record(
        "contact_name",
        tracing::field::display(submission.name.as_ref()),
    );
    tracing::Span::current().record("contact_email", tracing::field::display(&submission.email));

    relay_submission(relay.get_ref(), &owner.0, &submission)
        .await
        .map_err(|source| {
            tracing::error!(
                error.cause_chain = ?source,
                "Failed to relay the contact emails"
            );
            ContactError::DeliveryError {
                source,
                environment: *environment.get_ref(),
            }
        })?;

    Ok(HttpResponse::Ok().json(ApiEnvelope {
        success: true,
        message: CONFIRMATION_MESSAGE.into(),
    }))
}

/// Owner notification first, auto-reply second, strictly sequential. A failed
/// owner notification aborts before the auto-reply is attempted. A failed
/// auto-reply still leaves the owner notified; there is no compensation.
#[tracing::instrument(name = "Relaying contact emails", skip_all)]
async fn relay_submission<M: MailRelay>(
    relay: &M,
    owner: &ContactEmail,
    submission: &ContactSubmission,
) -> Result<(), anyhow::Error> {
    relay
        .send(composer::owner_notification(submission, owner, Utc::now()))
        .await
        .context("Failed to send the owner notification")?;

    relay
        .send(composer::sender_autoreply(submission))
        .await
        .context("Failed to send the auto-reply")?;

    Ok(())
}
