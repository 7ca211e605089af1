use std::fmt::Formatter;

#[derive(Debug)]
pub enum ValidationError {
    /// Couldn't reach USPS or make sense of what it sent back
    Transport(Box<dyn std::fmt::Debug + Send>),
    /// USPS rejected the request as a whole
    Api(String),
    /// USPS couldn't validate the address
    Address(String)
}

impl ValidationError {
    /// Message safe to hand back to the caller, if any.
    pub fn client_message(&self) -> Option<&str> {
        match self {
            ValidationError::Api(message) | ValidationError::Address(message) => {
                Some(message.trim())
            },
            ValidationError::Transport(_) => None,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let msg = match self {
            ValidationError::Transport(inner) => {
                format!("Transport: {:?}", inner)
            },
            ValidationError::Api(description) => {
                format!("USPS API error: {}", description)
            },
            ValidationError::Address(description) => {
                format!("Address error: {}", description)
            }
        };
        write!(f, "Validation error: {}", msg)
    }
}

impl From<reqwest::Error> for ValidationError {
    fn from(error: reqwest::Error) -> Self {
        ValidationError::Transport(Box::new(error))
    }
}

impl From<xmltree::ParseError> for ValidationError {
    fn from(error: xmltree::ParseError) -> Self {
        ValidationError::Transport(Box::new(error))
    }
}

impl From<xmltree::Error> for ValidationError {
    fn from(error: xmltree::Error) -> Self {
        ValidationError::Transport(Box::new(error))
    }
}

impl From<std::string::FromUtf8Error> for ValidationError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        ValidationError::Transport(Box::new(error))
    }
}
