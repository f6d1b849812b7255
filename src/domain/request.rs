use crate::domain::validation::ValidationError;
use crate::domain::value::{CountryCode, MessageText, Receiver, Sender};

/// A single mobile-terminated message to hand to the gateway.
///
/// Built per call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    sender: Sender,
    receiver: Receiver,
    text: MessageText,
}

impl OutboundMessage {
    pub fn new(sender: Sender, receiver: Receiver, text: MessageText) -> Self {
        Self {
            sender,
            receiver,
            text,
        }
    }

    /// Validate raw strings in the order sender, receiver, message.
    pub fn parse(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            sender: Sender::new(sender)?,
            receiver: Receiver::new(receiver)?,
            text: MessageText::new(text)?,
        })
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    /// Return the same message with its receiver normalized for the gateway.
    pub fn normalized(self, country_code: Option<&CountryCode>) -> Self {
        let receiver = self.receiver.normalize(country_code);
        Self { receiver, ..self }
    }
}
