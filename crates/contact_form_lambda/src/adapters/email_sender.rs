use contact_form_core::email::{OutgoingEmail, SentEmail};

pub trait EmailSender {
    fn send_email(&self, email: &OutgoingEmail) -> Result<SentEmail, String>;
}
