use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::MailConfig;
use crate::models::contact_message::ContactMessage;

/// A composed plain-text email, independent of any transport so tests can
/// assert on the exact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> anyhow::Result<()>;
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn from_config(config: &MailConfig) -> anyhow::Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        let from: Mailbox =
            format!("{} <{}>", config.company_name, config.company_email).parse()?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, email: &OutboundEmail) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?;

        self.transport.send(message).await?;

        Ok(())
    }
}

/// Alert to the company inbox about a fresh quote request. Phone and product
/// sections appear only when non-blank.
pub fn admin_notification(msg: &ContactMessage, config: &MailConfig) -> OutboundEmail {
    let mut body = String::new();

    body.push_str("NEW QUOTE REQUEST\n");
    body.push_str("====================================\n\n");
    body.push_str(&format!("Reference Code: {}\n\n", msg.reference_code));
    body.push_str("Customer Details:\n");
    body.push_str(&format!("Name: {}\n", msg.name));
    body.push_str(&format!("Email: {}\n", msg.email));

    if let Some(phone) = non_blank(msg.phone.as_deref()) {
        body.push_str(&format!("Phone: {}\n", phone));
    }

    if let Some(names) = non_blank(msg.product_names.as_deref()) {
        body.push_str("\nProducts Selected:\n");
        body.push_str(&format!("{}\n", names));
    }

    body.push_str("\nMessage:\n");
    body.push_str(&format!("{}\n\n", msg.message));
    body.push_str("====================================\n");
    body.push_str(&format!(
        "Please respond using reference code {}",
        msg.reference_code
    ));

    OutboundEmail {
        to: config.company_email.clone(),
        subject: format!(
            "New Quote Request [{}] from {}",
            msg.reference_code, msg.name
        ),
        body,
    }
}

/// Confirmation back to the customer with their reference code.
pub fn auto_reply(msg: &ContactMessage, config: &MailConfig) -> OutboundEmail {
    let mut body = String::new();

    body.push_str(&format!("Dear {},\n\n", msg.name));
    body.push_str(&format!(
        "Thank you for contacting {}.\n\n",
        config.company_name
    ));
    body.push_str(&format!("Your Reference Code: {}\n\n", msg.reference_code));

    if let Some(names) = non_blank(msg.product_names.as_deref()) {
        body.push_str("Products You Selected:\n");
        body.push_str(&format!("{}\n\n", names));
    }

    body.push_str("Your Message:\n");
    body.push_str(&format!("\"{}\"\n\n", msg.message));
    body.push_str("We will contact you within 24-48 business hours.\n\n");
    body.push_str(&format!(
        "For urgent inquiries, call us at {}.\n\n",
        config.company_phone
    ));
    body.push_str("Best Regards,\n");
    body.push_str(&format!("{}\n\n", config.company_name));
    body.push_str("This is an automated email. Please do not reply directly.\n");
    body.push_str(&format!(
        "Always mention reference code {}",
        msg.reference_code
    ));

    OutboundEmail {
        to: msg.email.clone(),
        subject: format!(
            "Quote Request Received [{}] - {}",
            msg.reference_code, config.company_name
        ),
        body,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
