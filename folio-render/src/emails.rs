//! Composition of the two emails sent per contact-form submission.

use crate::templates::{ConfirmationEmailTemplate, NotificationEmailTemplate};
use askama::Template;
use folio_core::{Config, ContactMessage, OutgoingEmail};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Failed to render email template: {0}")]
pub struct RenderError(#[from] askama::Error);

/// Sender and site details that go into contact emails
#[derive(Debug, Clone)]
pub struct EmailContext {
    pub website_name: String,
    pub author: String,
    pub admin_email: String,
    pub from_email: String,
}

impl EmailContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            website_name: config.website_name(),
            author: config.site.author.clone(),
            admin_email: config.contact.admin_email.clone(),
            from_email: config.contact.from_email.clone(),
        }
    }

    /// Notification to the site owner
    pub fn notification(&self, msg: &ContactMessage) -> Result<OutgoingEmail, RenderError> {
        let html = NotificationEmailTemplate {
            website_name: &self.website_name,
            name: &msg.name,
            email: &msg.email,
            subject: &msg.subject,
            message: &msg.message,
        }
        .render()?;

        let text = format!(
            "New Contact Form Submission from {site}\n\n\
             From: {name}\nEmail: {email}\nSubject: {subject}\n\n\
             Message:\n{message}\n\n---\n\
             This email was sent from the contact form on {site}\n",
            site = self.website_name,
            name = msg.name,
            email = msg.email,
            subject = msg.subject,
            message = msg.message,
        );

        Ok(OutgoingEmail {
            from: self.from_email.clone(),
            to: self.admin_email.clone(),
            subject: format!(
                "[{}] New Contact Form Submission: {}",
                self.website_name, msg.subject
            ),
            text,
            html,
        })
    }

    /// Confirmation back to the sender
    pub fn confirmation(&self, msg: &ContactMessage) -> Result<OutgoingEmail, RenderError> {
        let html = ConfirmationEmailTemplate {
            website_name: &self.website_name,
            author: &self.author,
            name: &msg.name,
            subject: &msg.subject,
            message: &msg.message,
        }
        .render()?;

        let text = format!(
            "Hi {name},\n\n\
             Thank you for reaching out through {site}. I've received your message \
             and will get back to you as soon as possible.\n\n\
             Your Message:\nSubject: {subject}\n{message}\n\n\
             Best regards,\n{author}\n\n---\n\
             This is an automated confirmation email. Please do not reply to this address.\n",
            name = msg.name,
            site = self.website_name,
            subject = msg.subject,
            message = msg.message,
            author = self.author,
        );

        Ok(OutgoingEmail {
            from: self.from_email.clone(),
            to: msg.email.clone(),
            subject: format!("Thank you for contacting {}", self.author),
            text,
            html,
        })
    }
}
