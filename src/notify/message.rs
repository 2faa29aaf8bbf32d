use std::fmt::Write;

use crate::error::Result;

/// A plain-text email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Sender address.
    pub from: String,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
    /// Blind-copy recipients.
    pub bcc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// `text/plain` body.
    pub body: String,
}

impl Message {
    /// Renders the message as RFC 822 style text.
    pub fn to_rfc822(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "From: {}", self.from);
        let _ = writeln!(out, "To: {}", self.to.join(", "));
        if !self.cc.is_empty() {
            let _ = writeln!(out, "Cc: {}", self.cc.join(", "));
        }
        if !self.bcc.is_empty() {
            let _ = writeln!(out, "Bcc: {}", self.bcc.join(", "));
        }
        let _ = writeln!(out, "Subject: {}", self.subject);
        let _ = writeln!(out, "Content-Type: text/plain; charset=utf-8");
        let _ = writeln!(out);
        out.push_str(&self.body);
        out
    }
}

/// Delivery seam; decides nothing about what to send.
pub trait Notifier: Send {
    /// Delivers one message.
    fn send(&mut self, message: &Message) -> Result<()>;
}
